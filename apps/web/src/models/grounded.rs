use serde::{Deserialize, Serialize};

/// A web page the provider cited while answering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

impl WebSource {
    /// Display label: the title, or the uri when the title is blank.
    pub fn label(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.uri
        } else {
            &self.title
        }
    }
}

/// One grounding citation as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Citation {
    Web(WebSource),
    /// A chunk with no web reference (e.g. retrieved context). Never shown.
    Unsupported,
}

impl Citation {
    pub fn into_web(self) -> Option<WebSource> {
        match self {
            Citation::Web(source) => Some(source),
            Citation::Unsupported => None,
        }
    }
}

/// A free-text answer produced with web search enabled, plus its citations.
/// Sources keep provider order and are not deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundedInfo {
    pub text: String,
    pub sources: Vec<WebSource>,
}

impl GroundedInfo {
    pub fn from_citations(text: String, citations: impl IntoIterator<Item = Citation>) -> Self {
        Self {
            text,
            sources: citations.into_iter().filter_map(Citation::into_web).collect(),
        }
    }
}
