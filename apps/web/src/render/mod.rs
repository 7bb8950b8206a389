//! Server-side HTML for the shell, the roadmap tree, and grounded answers.
//! Every piece of provider or user text goes through `escape` on the way out.

pub mod grounded;
pub mod page;
pub mod tree;

/// Escapes text for use in HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Only http(s) links become anchors; anything else renders as plain text.
pub(crate) fn is_web_link(text: &str) -> bool {
    let t = text.trim();
    t.starts_with("https://") || t.starts_with("http://")
}
