//! Structured-output schema for roadmap generation.
//!
//! One generator builds every level of the tree from the same node shape, so the
//! nesting bound is a number rather than a count of copy-pasted object literals.
//! Levels are numbered from the root (0); a node at level `max_depth` has no
//! `children` property, which caps the tree at `max_depth + 1` node levels.

use serde_json::{json, Map, Value};

/// Nested levels below the root that the provider is asked to produce.
pub const DEFAULT_ROADMAP_DEPTH: usize = 3;

struct FieldDocs {
    name: &'static str,
    description: &'static str,
    children: &'static str,
}

const ROOT_DOCS: FieldDocs = FieldDocs {
    name: "The title of the overall career path.",
    description: "A brief summary of this career path.",
    children: "The main stages or foundational areas of this career path.",
};

const STAGE_DOCS: FieldDocs = FieldDocs {
    name: "The name of this stage, skill, or concept.",
    description: "A detailed description of what this involves and why it's important.",
    children: "A list of sub-steps, more detailed skills, or specializations.",
};

const RESOURCES_DOC: &str = "A list of helpful learning resources like URLs, books, or courses.";
const SALARY_DOC: &str = "Typical salary range for this role or stage, if applicable.";
const PROGRESSION_DOC: &str =
    "Description of the career progression from this stage over the next 5-10 years, if applicable.";

/// Builds the response schema for a roadmap nested `max_depth` levels below the root.
pub fn roadmap_schema(max_depth: usize) -> Value {
    node_schema(0, max_depth)
}

fn node_schema(level: usize, max_depth: usize) -> Value {
    let docs = match level {
        0 => Some(&ROOT_DOCS),
        1 => Some(&STAGE_DOCS),
        _ => None,
    };

    let mut properties = Map::new();
    properties.insert("name".into(), string_field(docs.map(|d| d.name)));
    properties.insert(
        "description".into(),
        string_field(docs.map(|d| d.description)),
    );

    // The root names the whole path; stage details start one level down.
    if level > 0 {
        let mut resources = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
        if level == 1 {
            resources["description"] = RESOURCES_DOC.into();
        }
        properties.insert("resources".into(), resources);
        properties.insert(
            "salaryExpectations".into(),
            string_field((level == 1).then_some(SALARY_DOC)),
        );
        properties.insert(
            "careerProgression".into(),
            string_field((level == 1).then_some(PROGRESSION_DOC)),
        );
    }

    let mut required = vec!["name", "description"];
    if level < max_depth {
        let mut children = json!({
            "type": "ARRAY",
            "items": node_schema(level + 1, max_depth),
        });
        if let Some(d) = docs {
            children["description"] = d.children.into();
        }
        properties.insert("children".into(), children);
        if level == 0 {
            required.push("children");
        }
    }

    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    })
}

fn string_field(description: Option<&str>) -> Value {
    match description {
        Some(d) => json!({ "type": "STRING", "description": d }),
        None => json!({ "type": "STRING" }),
    }
}

/// Node levels below the root that `schema` permits.
pub fn schema_depth(schema: &Value) -> usize {
    schema
        .pointer("/properties/children/items")
        .map(|items| 1 + schema_depth(items))
        .unwrap_or(0)
}
