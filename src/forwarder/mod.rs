//! # Sheet Webhook Forwarding
//!
//! This module pushes a finished [`RecipePost`] to the spreadsheet
//! integration webhook (a Make.com scenario feeding a Google Sheet).
//!
//! ## Payload
//!
//! One POST per forward action, `Content-Type: application/json`, with the
//! whole post nested under a single field:
//!
//! ```json
//! { "post_content": { "Заголовок": "...", "Рецепт": "...", ... } }
//! ```
//!
//! Any HTTP 2xx status counts as accepted.
//!
//! ## Failure taxonomy
//!
//! - **Not configured**: no webhook URL is set. Reported before any
//!   network I/O so the user can tell "not set up" from "broken".
//! - **Transport**: the call itself did not complete (DNS, refused
//!   connection, timeout); the underlying detail is kept in the message.
//! - **Rejected**: the webhook answered with a non-2xx status; the message
//!   carries the status code and whatever body text came back.
//!
//! There is no retry here. The orchestrator decides whether a failed
//! forward may be attempted again.
//!
//! ## Environment Configuration
//!
//! Set `SHEET_WEBHOOK_URL` with the webhook URL. Without it the rest of
//! the application works normally; only forwarding reports an error.

use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::RecipePost;

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("webhook destination is not configured")]
    NotConfigured,

    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook rejected the post: status {status}: {body}")]
    Rejected { status: StatusCode, body: String },
}

/// Wire envelope the webhook expects
#[derive(Serialize)]
struct ForwardPayload<'a> {
    post_content: &'a RecipePost,
}

pub struct SheetForwarder {
    client: Client,
    webhook_url: Option<String>,
}

impl SheetForwarder {
    pub fn new(webhook_url: Option<String>) -> Self {
        if webhook_url.is_none() {
            warn!("SHEET_WEBHOOK_URL not set - posts cannot be forwarded to the sheet");
        }

        Self {
            client: Client::new(),
            webhook_url,
        }
    }

    /// Send `post` to the configured webhook. Single attempt, no retry.
    pub async fn send(&self, post: &RecipePost) -> Result<(), ForwardError> {
        let webhook_url = self
            .webhook_url
            .as_ref()
            .ok_or(ForwardError::NotConfigured)?;

        let response = self
            .client
            .post(webhook_url)
            .json(&ForwardPayload { post_content: post })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ForwardError::Rejected { status, body });
        }

        info!("post forwarded to the sheet: {}", post.title);
        Ok(())
    }
}

impl Clone for SheetForwarder {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            webhook_url: self.webhook_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unset_destination_fails_before_any_network_call() {
        let forwarder = SheetForwarder::new(None);
        let err = forwarder.send(&RecipePost::default()).await.unwrap_err();
        assert!(matches!(err, ForwardError::NotConfigured));
    }

    #[test]
    fn rejection_message_carries_status_and_body() {
        let err = ForwardError::Rejected {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "server error".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("server error"));
    }

    #[test]
    fn payload_nests_the_post_under_post_content() {
        let post = RecipePost {
            title: "Овсяная каша".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(ForwardPayload { post_content: &post }).unwrap();
        assert_eq!(json["post_content"]["Заголовок"], "Овсяная каша");
    }
}
