use std::fmt::Write;

use crate::models::GroundedInfo;
use crate::render::{escape, is_web_link};

/// Answer paragraphs, then a source list when the provider cited anything.
pub fn render_grounded(info: &GroundedInfo) -> String {
    let mut out = String::from("<div class=\"grounded\">");

    for paragraph in info
        .text
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
    {
        let _ = write!(out, "<p>{}</p>", escape(paragraph));
    }

    if !info.sources.is_empty() {
        out.push_str("<h4>Sources:</h4><ul class=\"sources\">");
        for source in &info.sources {
            let label = escape(source.label());
            if is_web_link(&source.uri) {
                let _ = write!(
                    out,
                    "<li><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{label}</a></li>",
                    escape(source.uri.trim())
                );
            } else {
                let _ = write!(out, "<li>{label}</li>");
            }
        }
        out.push_str("</ul>");
    }

    out.push_str("</div>");
    out
}
