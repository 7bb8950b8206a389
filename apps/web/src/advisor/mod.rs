//! Career advisor: the two provider-backed operations the dashboard offers.
//!
//! Both are stateless: one network attempt per call, no caching, no retries.
//! Every failure is collapsed into a `RequestError` whose message names only the
//! operation; the underlying cause is logged and kept as the error source.

pub mod roadmap;
pub mod schema;
pub mod search;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use crate::llm_client::{LlmClient, LlmError};
use crate::models::{GroundedInfo, RoadmapNode};
use roadmap::RoadmapSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Roadmap,
    Search,
}

impl Operation {
    /// The single message users see for any failure of this operation.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Roadmap => {
                "Failed to generate career roadmap. Please check your API key and try again."
            }
            Operation::Search => {
                "Failed to get information from Google Search. Please check your API key and try again."
            }
        }
    }
}

/// Any provider, transport, or parse failure of an advisor operation.
#[derive(Debug, Error)]
#[error("{}", .operation.failure_message())]
pub struct RequestError {
    pub operation: Operation,
    #[source]
    pub cause: LlmError,
}

impl RequestError {
    fn collapse(operation: Operation, cause: LlmError) -> Self {
        error!(?operation, "Advisor call failed: {cause}");
        Self { operation, cause }
    }
}

/// The advisor operations, behind a trait so handlers can run against a fake.
///
/// Carried in `AppState` as `Arc<dyn CareerAdvisor>`.
#[async_trait]
pub trait CareerAdvisor: Send + Sync {
    async fn generate_roadmap(&self, interests: &str) -> Result<RoadmapNode, RequestError>;

    async fn grounded_info(&self, query: &str) -> Result<GroundedInfo, RequestError>;

    /// Model names shown next to each panel.
    fn models(&self) -> (&str, &str);
}

/// Gemini-backed advisor. The roadmap schema is built once at construction.
pub struct GeminiAdvisor {
    llm: LlmClient,
    roadmap: RoadmapSettings,
    search_model: String,
    schema: Value,
}

impl GeminiAdvisor {
    pub fn new(llm: LlmClient, roadmap: RoadmapSettings, search_model: String) -> Self {
        let schema = schema::roadmap_schema(roadmap.max_depth);
        debug!(
            nested_levels = schema::schema_depth(&schema),
            "Roadmap response schema built"
        );
        Self {
            llm,
            roadmap,
            search_model,
            schema,
        }
    }
}

#[async_trait]
impl CareerAdvisor for GeminiAdvisor {
    async fn generate_roadmap(&self, interests: &str) -> Result<RoadmapNode, RequestError> {
        roadmap::generate_roadmap(&self.llm, &self.roadmap, &self.schema, interests)
            .await
            .map_err(|e| RequestError::collapse(Operation::Roadmap, e))
    }

    async fn grounded_info(&self, query: &str) -> Result<GroundedInfo, RequestError> {
        search::get_grounded_info(&self.llm, &self.search_model, query)
            .await
            .map_err(|e| RequestError::collapse(Operation::Search, e))
    }

    fn models(&self) -> (&str, &str) {
        (self.roadmap.model.as_str(), self.search_model.as_str())
    }
}
