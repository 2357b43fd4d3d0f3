use anyhow::Context;

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_HISTORY_DB: &str = "sqlite:history.db";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini: GeminiConfig,
    /// Webhook receiving forwarded posts; forwarding reports a
    /// configuration error when unset
    pub sheet_webhook_url: Option<String>,
    pub history_db_url: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let gemini = GeminiConfig {
            api_key: std::env::var("GEMINI_API_KEY")
                .context("GEMINI_API_KEY environment variable is not set")?,
            api_base: std::env::var("GEMINI_API_BASE")
                .ok()
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE.into()),
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
        };

        Ok(Self {
            gemini,
            sheet_webhook_url: std::env::var("SHEET_WEBHOOK_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            history_db_url: std::env::var("HISTORY_DB")
                .unwrap_or_else(|_| DEFAULT_HISTORY_DB.into()),
        })
    }
}
