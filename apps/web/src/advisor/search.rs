//! Grounded search: the raw query with web search enabled, answered as free text.

use tracing::info;

use crate::llm_client::{GenerateContentRequest, LlmClient, LlmError};
use crate::models::GroundedInfo;

/// Sends `query` verbatim and keeps only citations that point at the web.
pub async fn get_grounded_info(
    llm: &LlmClient,
    model: &str,
    query: &str,
) -> Result<GroundedInfo, LlmError> {
    let request = GenerateContentRequest::new(query).google_search();
    let response = llm.generate(model, &request).await?;

    if response.candidates.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    let text = response.text().unwrap_or_default();
    let citations = response.into_citations();
    let cited = citations.len();

    let info = GroundedInfo::from_citations(text, citations);
    info!(
        sources = info.sources.len(),
        dropped = cited - info.sources.len(),
        "Grounded answer received"
    );
    Ok(info)
}
