//! Roadmap tree renderer.
//!
//! Each node becomes one `<li class="node">` holding its name and description, the
//! optional salary, progression, and resource blocks, then a nested list of its
//! children in array order. Children carry a connector; the root does not.

use std::fmt::Write;

use crate::models::RoadmapNode;
use crate::render::{escape, is_web_link};

/// Renders `root` and every descendant exactly once.
pub fn render_roadmap(root: &RoadmapNode) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"roadmap\"><ul class=\"tree\">");
    render_node(&mut out, root, 0);
    out.push_str("</ul></div>");
    out
}

fn render_node(out: &mut String, node: &RoadmapNode, depth: usize) {
    if depth == 0 {
        let _ = write!(out, "<li class=\"node root\" data-depth=\"0\">");
    } else {
        let _ = write!(
            out,
            "<li class=\"node child\" data-depth=\"{depth}\"><span class=\"connector\"></span>"
        );
    }

    let _ = write!(
        out,
        "<div class=\"node-body\"><span class=\"dot\"></span><h3 class=\"node-name\">{}</h3><p class=\"description\">{}</p>",
        escape(&node.name),
        escape(&node.description)
    );

    if let Some(salary) = non_blank(&node.salary_expectations) {
        let _ = write!(
            out,
            "<div class=\"block salary\"><h4>Salary Expectations</h4><p>{}</p></div>",
            escape(salary)
        );
    }

    if let Some(progression) = non_blank(&node.career_progression) {
        let _ = write!(
            out,
            "<div class=\"block progression\"><h4>Career Progression</h4><p>{}</p></div>",
            escape(progression)
        );
    }

    let resources = node.resources();
    if !resources.is_empty() {
        out.push_str("<div class=\"block resources\"><h4>Resources</h4><ul>");
        for resource in resources {
            let text = escape(resource);
            if is_web_link(resource) {
                let _ = write!(
                    out,
                    "<li><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{text}</a></li>",
                    escape(resource.trim())
                );
            } else {
                let _ = write!(out, "<li>{text}</li>");
            }
        }
        out.push_str("</ul></div>");
    }
    out.push_str("</div>");

    let children = node.children();
    if !children.is_empty() {
        out.push_str("<ul class=\"children\">");
        for child in children {
            render_node(out, child, depth + 1);
        }
        out.push_str("</ul>");
    }

    out.push_str("</li>");
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names_in_order(html: &str) -> Vec<String> {
        html.split("<h3 class=\"node-name\">")
            .skip(1)
            .map(|rest| rest.split("</h3>").next().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_children_render_in_array_order() {
        let tree = RoadmapNode::new("A", "root").with_children(vec![
            RoadmapNode::new("B", "first"),
            RoadmapNode::new("C", "second"),
        ]);
        let html = render_roadmap(&tree);
        assert_eq!(names_in_order(&html), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_every_node_rendered_once_in_preorder() {
        let tree = RoadmapNode::new("A", "").with_children(vec![
            RoadmapNode::new("B", "").with_children(vec![
                RoadmapNode::new("B1", "").with_children(vec![RoadmapNode::new("B1a", "")]),
                RoadmapNode::new("B2", ""),
            ]),
            RoadmapNode::new("C", ""),
        ]);
        let html = render_roadmap(&tree);

        let expected: Vec<String> = tree.walk().map(|n| n.name.clone()).collect();
        assert_eq!(names_in_order(&html), expected);
        assert_eq!(html.matches("<li class=\"node ").count(), tree.node_count());
    }

    #[test]
    fn test_root_has_no_connector() {
        let tree = RoadmapNode::new("A", "")
            .with_children(vec![RoadmapNode::new("B", ""), RoadmapNode::new("C", "")]);
        let html = render_roadmap(&tree);

        assert_eq!(html.matches("class=\"connector\"").count(), 2);
        assert!(html.starts_with(
            "<div class=\"roadmap\"><ul class=\"tree\"><li class=\"node root\" data-depth=\"0\"><div"
        ));
    }

    #[test]
    fn test_blank_optional_text_renders_no_block() {
        let mut node = RoadmapNode::new("A", "desc");
        node.salary_expectations = Some(String::new());
        node.career_progression = Some("  ".to_string());

        let html = render_roadmap(&node);
        assert!(!html.contains("Salary Expectations"));
        assert!(!html.contains("Career Progression"));
        assert!(!html.contains("class=\"block"));
    }

    #[test]
    fn test_optional_blocks_only_when_present() {
        let bare = render_roadmap(&RoadmapNode::new("A", "desc"));
        assert!(!bare.contains("Salary Expectations"));
        assert!(!bare.contains("Career Progression"));
        assert!(!bare.contains("Resources"));
        assert!(!bare.contains("class=\"children\""));

        let mut node = RoadmapNode::new("A", "desc");
        node.salary_expectations = Some("$90k".to_string());
        node.career_progression = Some("Lead in 5 years".to_string());
        node.resources = Some(vec![]);
        let html = render_roadmap(&node);
        assert!(html.contains("<h4>Salary Expectations</h4><p>$90k</p>"));
        assert!(html.contains("<h4>Career Progression</h4><p>Lead in 5 years</p>"));
        assert!(!html.contains("Resources"));
    }

    #[test]
    fn test_resources_link_only_web_urls() {
        let mut node = RoadmapNode::new("A", "desc");
        node.resources = Some(vec![
            "https://www.coursera.org/ml".to_string(),
            "Deep Learning (Goodfellow)".to_string(),
        ]);
        let html = render_roadmap(&node);
        assert!(html.contains("<a href=\"https://www.coursera.org/ml\""));
        assert!(html.contains("<li>Deep Learning (Goodfellow)</li>"));
    }

    #[test]
    fn test_provider_text_is_escaped() {
        let node = RoadmapNode::new("<script>alert(1)</script>", "R&D");
        let html = render_roadmap(&node);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("R&amp;D"));
    }
}
