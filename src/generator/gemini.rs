use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use super::GenerationError;
use crate::config::GeminiConfig;
use crate::traits::{ContentPart, GenerativeClient};

/// HTTP implementation of [`GenerativeClient`] against the Gemini REST API
pub struct GeminiClient {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    fn endpoint(&self) -> String {
        let model = self.model.trim();
        let model_path = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        };
        format!("{}/{}:generateContent", self.api_base, model_path)
    }

    /// Concatenated text of all candidate parts; `None` when the reply
    /// carries no text at all
    fn reply_text(payload: &Value) -> Option<String> {
        let mut out = String::new();
        for candidate in payload
            .get("candidates")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
        {
            for part in candidate
                .get("content")
                .and_then(|content| content.get("parts"))
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
            {
                if let Some(text) = part.get("text").and_then(Value::as_str) {
                    out.push_str(text);
                }
            }
        }

        if out.trim().is_empty() { None } else { Some(out) }
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate_content(&self, parts: &[ContentPart]) -> Result<String, GenerationError> {
        let payload = json!({ "contents": [{ "parts": parts }] });

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Endpoint { status, body });
        }

        let payload: Value = response.json().await?;
        Self::reply_text(&payload).ok_or(GenerationError::EmptyReply)
    }
}

impl Clone for GeminiClient {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            api_base: self.api_base.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(model: &str) -> GeminiClient {
        GeminiClient::new(&GeminiConfig {
            api_key: "test-key".to_string(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: model.to_string(),
        })
    }

    #[test]
    fn endpoint_prefixes_bare_model_names() {
        assert_eq!(
            client("gemini-2.5-flash").endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(
            client("models/gemini-2.5-flash").endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn reply_text_joins_candidate_parts() {
        let payload = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Вот твой пост: " }, { "text": "{}" }] }
            }]
        });
        assert_eq!(
            GeminiClient::reply_text(&payload).as_deref(),
            Some("Вот твой пост: {}")
        );
    }

    #[test]
    fn reply_without_text_is_none() {
        assert!(GeminiClient::reply_text(&json!({ "candidates": [] })).is_none());
        assert!(GeminiClient::reply_text(&json!({})).is_none());
    }
}
