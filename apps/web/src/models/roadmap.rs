use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One stage, skill, or role in a career roadmap. The root names the overall path.
///
/// Optional fields stay `None` when the provider omits them, so an absent list is
/// never confused with an empty one on the way back out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapNode {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_expectations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career_progression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RoadmapNode>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoadmapValidationError {
    #[error("node at {path} has an empty name")]
    EmptyName { path: String },
}

impl RoadmapNode {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            resources: None,
            salary_expectations: None,
            career_progression: None,
            children: None,
        }
    }

    pub fn with_children(mut self, children: Vec<RoadmapNode>) -> Self {
        self.children = Some(children);
        self
    }

    /// Children in array order; empty for leaves.
    pub fn children(&self) -> &[RoadmapNode] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Resources in array order; empty when absent.
    pub fn resources(&self) -> &[String] {
        self.resources.as_deref().unwrap_or_default()
    }

    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// Number of node levels, counting the root as 1.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(RoadmapNode::depth).max().unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Pre-order traversal: a node, then each child subtree in array order.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Checks that every node carries a non-blank name.
    pub fn validate(&self) -> Result<(), RoadmapValidationError> {
        self.validate_at("root")
    }

    fn validate_at(&self, path: &str) -> Result<(), RoadmapValidationError> {
        if self.name.trim().is_empty() {
            return Err(RoadmapValidationError::EmptyName {
                path: path.to_string(),
            });
        }
        for (index, child) in self.children().iter().enumerate() {
            child.validate_at(&format!("{path}.children[{index}]"))?;
        }
        Ok(())
    }
}

/// Iterator returned by [`RoadmapNode::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a RoadmapNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a RoadmapNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
