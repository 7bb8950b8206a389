//! Page shell: header, footer, sign-in view, and the two-panel dashboard.

use std::fmt::Write;

use crate::dashboard::{DashboardView, Panel};
use crate::render::grounded::render_grounded;
use crate::render::tree::render_roadmap;
use crate::render::escape;
use crate::session::SessionState;

pub const PRODUCT_NAME: &str = "Career Path Finder";

/// Just enough style to draw the tree connectors and disabled buttons.
const STYLE: &str = "\
ul.tree, ul.children { list-style: none; margin: 0; padding: 0; }\
li.node.child { position: relative; padding-left: 2rem; border-left: 2px solid #374151; }\
li.node.child > .connector { position: absolute; left: 0; top: 1rem; width: 1.5rem; border-top: 2px solid #374151; }\
.dot { display: inline-block; width: .75rem; height: .75rem; border-radius: 50%; background: #0ea5e9; }\
.alert { border-left: 4px solid #ef4444; padding: .75rem; }\
button[disabled] { opacity: .5; cursor: not-allowed; }";

/// Everything the shell needs for one render.
pub struct ShellContext<'a> {
    pub session: SessionState,
    /// Present only when signed in.
    pub dashboard: Option<&'a DashboardView>,
    pub roadmap_model: &'a str,
    pub search_model: &'a str,
    pub year: i32,
}

pub fn render_shell(ctx: &ShellContext<'_>) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>{PRODUCT_NAME}</title><style>{STYLE}</style></head><body>"
    );

    render_header(&mut out, ctx.session);

    out.push_str("<main>");
    match (ctx.session, ctx.dashboard) {
        (SessionState::SignedIn, Some(view)) => {
            render_dashboard(&mut out, view, ctx.roadmap_model, ctx.search_model)
        }
        _ => render_sign_in(&mut out),
    }
    out.push_str("</main>");

    let _ = write!(
        out,
        "<footer><p>&copy; {} {PRODUCT_NAME}. All rights reserved.</p></footer></body></html>",
        ctx.year
    );
    out
}

fn render_header(out: &mut String, session: SessionState) {
    let _ = write!(out, "<header><h1>{PRODUCT_NAME}</h1>");
    if session.is_signed_in() {
        out.push_str(
            "<form method=\"post\" action=\"/logout\"><button type=\"submit\">Log Out</button></form>",
        );
    }
    out.push_str("</header>");
}

fn render_sign_in(out: &mut String) {
    out.push_str(
        "<section class=\"sign-in\">\
         <h2>Find your future career</h2>\
         <p>Sign in to continue to your dashboard</p>\
         <form method=\"post\" action=\"/login\">\
         <label for=\"email-address\">Email address</label>\
         <input id=\"email-address\" name=\"email\" type=\"email\" autocomplete=\"email\" required value=\"user@example.com\">\
         <label for=\"password\">Password</label>\
         <input id=\"password\" name=\"password\" type=\"password\" autocomplete=\"current-password\" required value=\"password\">\
         <button type=\"submit\">Sign in</button>\
         </form></section>",
    );
}

fn render_dashboard(out: &mut String, view: &DashboardView, roadmap_model: &str, search_model: &str) {
    let _ = write!(
        out,
        "<section class=\"panel roadmap-panel\"><h2>Generate Your Career Roadmap</h2>\
         <p>Leverage advanced AI to build a detailed plan based on your passions. (Uses {})</p>\
         <form method=\"post\" action=\"/roadmap\">\
         <textarea name=\"interests\" rows=\"4\" placeholder=\"e.g., video games, graphic design, and building computers...\">{}</textarea>",
        escape(roadmap_model),
        escape(&view.roadmap.input)
    );
    render_trigger(out, &view.roadmap, "Generate Roadmap", "Generating...");
    out.push_str("</form>");
    render_alert(out, &view.roadmap, "Roadmap Generation Failed");
    if let Some(roadmap) = &view.roadmap.result {
        out.push_str(&render_roadmap(roadmap));
    }
    out.push_str("</section>");

    let _ = write!(
        out,
        "<section class=\"panel search-panel\"><h2>Quick Search</h2>\
         <p>Get up-to-date answers to your career questions using Google Search. (Uses {})</p>\
         <form method=\"post\" action=\"/search\">\
         <input type=\"text\" name=\"query\" placeholder=\"e.g., 'What are the highest paying tech jobs in 2024?'\" value=\"{}\">",
        escape(search_model),
        escape(&view.search.input)
    );
    render_trigger(out, &view.search, "Search", "Searching...");
    out.push_str("</form>");
    render_alert(out, &view.search, "Search Failed");
    if let Some(info) = &view.search.result {
        out.push_str(&render_grounded(info));
    }
    out.push_str("</section>");
}

fn render_trigger<T>(out: &mut String, panel: &Panel<T>, idle: &str, busy: &str) {
    if panel.loading {
        let _ = write!(
            out,
            "<button type=\"submit\" disabled><span class=\"spinner\"></span>{busy}</button>"
        );
    } else {
        let _ = write!(out, "<button type=\"submit\">{idle}</button>");
    }
}

fn render_alert<T>(out: &mut String, panel: &Panel<T>, title: &str) {
    if let Some(error) = &panel.error {
        let _ = write!(
            out,
            "<div class=\"alert\" role=\"alert\"><p><strong>{title}</strong></p><p>{}</p></div>",
            escape(error)
        );
    }
}
