//! Traits and interfaces for the external capabilities: the generative
//! endpoint and the durable key-value store behind the history list

use async_trait::async_trait;
use serde::Serialize;

use crate::generator::GenerationError;

/// One ordered segment of a generation request: either plain text or an
/// inline image tagged with its mime type
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ContentPart {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

/// Inline binary segment, base64 payload plus declared content type
#[derive(Debug, Clone, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }
}

/// A text/vision model endpoint: ordered parts in, free-form reply text out.
///
/// The production implementation talks to the Gemini REST API; tests script
/// replies without touching the network.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn generate_content(&self, parts: &[ContentPart]) -> Result<String, GenerationError>;
}

/// A durable client-local key-value store holding one serialized blob per
/// key. Backends are injected into the history store: sqlite in production,
/// in-memory in tests.
#[async_trait]
pub trait HistoryBackend: Send + Sync {
    /// Read the blob stored under `key`, `None` when the key is absent
    async fn read(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous blob
    async fn write(&self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Remove `key` and its blob; removing an absent key is not an error
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
}
