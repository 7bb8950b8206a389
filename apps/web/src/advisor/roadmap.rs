//! Roadmap generation: one structured-output call, parsed and checked into a `RoadmapNode`.

use serde_json::Value;
use tracing::{info, warn};

use crate::llm_client::prompts::{roadmap_prompt, ROADMAP_SYSTEM};
use crate::llm_client::{GenerateContentRequest, LlmClient, LlmError};
use crate::models::RoadmapNode;

/// Model settings for roadmap calls.
#[derive(Debug, Clone)]
pub struct RoadmapSettings {
    pub model: String,
    pub thinking_budget: u32,
    /// Nested levels requested below the root; also the bound the schema encodes.
    pub max_depth: usize,
}

/// Requests a roadmap for `interests` and returns the validated tree.
/// The caller has already rejected blank input.
pub async fn generate_roadmap(
    llm: &LlmClient,
    settings: &RoadmapSettings,
    schema: &Value,
    interests: &str,
) -> Result<RoadmapNode, LlmError> {
    let prompt = roadmap_prompt(interests);
    let request = GenerateContentRequest::new(&prompt)
        .system(ROADMAP_SYSTEM)
        .json_schema(schema)
        .thinking_budget(settings.thinking_budget);

    let roadmap: RoadmapNode = llm.generate_json(&settings.model, &request).await?;
    check_roadmap(&roadmap, settings.max_depth)?;

    info!(
        root = %roadmap.name,
        nodes = roadmap.node_count(),
        depth = roadmap.depth(),
        "Roadmap generated"
    );
    Ok(roadmap)
}

/// Rejects structurally unusable trees. Shape deviations the schema should have
/// prevented, but which still render fine, are only logged.
pub(crate) fn check_roadmap(roadmap: &RoadmapNode, max_depth: usize) -> Result<(), LlmError> {
    roadmap
        .validate()
        .map_err(|e| LlmError::Invalid(e.to_string()))?;

    if roadmap.is_leaf() {
        warn!(root = %roadmap.name, "Roadmap root has no stages");
    }
    let nested = roadmap.depth() - 1;
    if nested > max_depth {
        warn!(nested, max_depth, "Roadmap is nested deeper than requested");
    }
    Ok(())
}
