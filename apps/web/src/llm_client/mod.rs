/// LLM Client: the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may talk to the provider directly.
/// The advisor builds requests; this module owns the wire format and transport.
///
/// One attempt per call. Failures are returned as-is; callers decide how to surface them.
use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::{Citation, WebSource};

pub mod prompts;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Model used for structured roadmap generation.
pub const ROADMAP_MODEL: &str = "gemini-2.5-pro";
/// Model used for search-grounded answers.
pub const SEARCH_MODEL: &str = "gemini-2.5-flash";
pub const THINKING_BUDGET: u32 = 32768;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("LLM returned an invalid payload: {0}")]
    Invalid(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction<'a>>,
    #[serde(skip_serializing_if = "GenerationConfig::is_empty")]
    generation_config: GenerationConfig<'a>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

impl GenerationConfig<'_> {
    fn is_empty(&self) -> bool {
        self.response_mime_type.is_none()
            && self.response_schema.is_none()
            && self.thinking_config.is_none()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

impl<'a> GenerateContentRequest<'a> {
    /// A single-turn request carrying one user prompt.
    pub fn new(prompt: &'a str) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: None,
            generation_config: GenerationConfig::default(),
            tools: Vec::new(),
        }
    }

    pub fn system(mut self, instruction: &'a str) -> Self {
        self.system_instruction = Some(SystemInstruction {
            parts: vec![Part { text: instruction }],
        });
        self
    }

    /// Requests JSON output constrained by `schema`.
    pub fn json_schema(mut self, schema: &'a Value) -> Self {
        self.generation_config.response_mime_type = Some("application/json");
        self.generation_config.response_schema = Some(schema);
        self
    }

    pub fn thinking_budget(mut self, budget: u32) -> Self {
        self.generation_config.thinking_config = Some(ThinkingConfig {
            thinking_budget: budget,
        });
        self
    }

    /// Enables the provider's web search tool.
    pub fn google_search(mut self) -> Self {
        self.tools.push(Tool {
            google_search: GoogleSearch {},
        });
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub grounding_metadata: Option<GroundingMetadata>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
    #[serde(default)]
    pub thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
pub struct GroundingChunk {
    pub web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
pub struct WebChunk {
    pub uri: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
    pub thoughts_token_count: Option<u32>,
}

impl From<GroundingChunk> for Citation {
    fn from(chunk: GroundingChunk) -> Self {
        match chunk.web {
            Some(WebChunk {
                uri: Some(uri),
                title,
            }) if !uri.trim().is_empty() => Citation::Web(WebSource {
                uri,
                title: title.unwrap_or_default(),
            }),
            _ => Citation::Unsupported,
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated answer text of the first candidate, skipping thought parts.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let mut texts = parts
            .iter()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text.as_deref())
            .peekable();
        texts.peek()?;
        Some(texts.collect())
    }

    /// Grounding citations of the first candidate, in provider order.
    pub fn into_citations(mut self) -> Vec<Citation> {
        if self.candidates.is_empty() {
            return Vec::new();
        }
        self.candidates
            .swap_remove(0)
            .grounding_metadata
            .map(|m| m.grounding_chunks.into_iter().map(Citation::from).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single provider client, shared by both advisor operations.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_base: String,
    api_key: Option<String>,
}

impl LlmClient {
    pub fn new(
        api_base: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Makes exactly one `generateContent` call and returns the full response.
    pub async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest<'_>,
    ) -> Result<GenerateContentResponse, LlmError> {
        let url = format!("{}/models/{}:generateContent", self.api_base, model);

        let mut builder = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(request);
        if let Some(key) = &self.api_key {
            builder = builder.header("x-goog-api-key", key);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;

        let usage = body.usage_metadata.as_ref();
        debug!(
            model,
            finish_reason = body.candidates.first().and_then(|c| c.finish_reason.as_deref()),
            prompt_tokens = usage.and_then(|u| u.prompt_token_count),
            output_tokens = usage.and_then(|u| u.candidates_token_count),
            thought_tokens = usage.and_then(|u| u.thoughts_token_count),
            "LLM call succeeded"
        );

        Ok(body)
    }

    /// Calls the model and deserializes its text answer as JSON.
    pub async fn generate_json<T: DeserializeOwned>(
        &self,
        model: &str,
        request: &GenerateContentRequest<'_>,
    ) -> Result<T, LlmError> {
        let response = self.generate(model, request).await?;

        let text = response.text().ok_or(LlmError::EmptyContent)?;

        // Strip markdown code fences if the model wraps JSON in them
        let text = strip_json_fences(&text);

        serde_json::from_str(text).map_err(LlmError::Parse)
    }
}

/// Pulls the JSON body out of a fenced reply.
///
/// Bare JSON is returned trimmed. Otherwise the first ``` fence (optionally tagged
/// `json`) is taken up to its closing fence, dropping any prose around it.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if text.starts_with('{') || text.starts_with('[') {
        return text;
    }
    let Some(start) = text.find("```") else {
        return text;
    };
    let inner = &text[start + 3..];
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    match inner.find("```") {
        Some(end) => inner[..end].trim(),
        None => inner.trim(),
    }
}
