//! Builds generation requests and turns model replies into [`RecipePost`]s.
//!
//! A request is an ordered list of parts: the fixed instruction block
//! first, then the user's text when non-blank, then one inline segment per
//! attachment in input order. The reply is free-form text that should be a
//! bare JSON object but often is not, so the first balanced `{...}` span is
//! extracted before decoding. Missing keys decode to empty strings; only a
//! reply with no usable JSON object at all is an error. No retries here.

mod gemini;
pub mod prompt;

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

pub use gemini::GeminiClient;

use crate::models::{ImageAttachment, RecipePost};
use crate::traits::{ContentPart, GenerativeClient};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request to the generative endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generative endpoint returned {status}: {body}")]
    Endpoint {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("generative endpoint reply contained no text")]
    EmptyReply,

    #[error("no JSON object found in the model reply")]
    MissingPayload,

    #[error("could not decode the JSON object in the model reply: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub struct PostGenerator {
    client: Arc<dyn GenerativeClient>,
}

impl PostGenerator {
    pub fn new(client: Arc<dyn GenerativeClient>) -> Self {
        Self { client }
    }

    pub async fn generate(
        &self,
        free_text: &str,
        attachments: &[ImageAttachment],
    ) -> Result<RecipePost, GenerationError> {
        let parts = build_parts(free_text, attachments);
        info!(
            prompt_version = prompt::PROMPT_VERSION,
            segments = parts.len(),
            "requesting post generation"
        );

        let reply = self.client.generate_content(&parts).await?;
        parse_reply(&reply)
    }
}

impl Clone for PostGenerator {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

fn build_parts(free_text: &str, attachments: &[ImageAttachment]) -> Vec<ContentPart> {
    let mut parts = vec![ContentPart::text(prompt::MAIN_PROMPT)];

    if !free_text.trim().is_empty() {
        parts.push(ContentPart::text(free_text));
    }

    for attachment in attachments {
        parts.push(ContentPart::inline(
            attachment.mime_type.as_str(),
            attachment.data.as_str(),
        ));
    }

    parts
}

fn parse_reply(reply: &str) -> Result<RecipePost, GenerationError> {
    let span = extract_json_object(reply.trim()).ok_or(GenerationError::MissingPayload)?;
    Ok(serde_json::from_str(span)?)
}

/// First balanced top-level `{...}` span in `text`.
///
/// Depth counting skips over string literals (including escaped quotes) so
/// a brace inside a field value cannot cut the span short.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_only_request_has_two_text_segments_and_no_inline_data() {
        let parts = build_parts("Овсяная каша с бананом", &[]);

        assert_eq!(parts.len(), 2);
        assert!(
            matches!(&parts[0], ContentPart::Text { text } if text.as_str() == prompt::MAIN_PROMPT)
        );
        assert!(
            matches!(&parts[1], ContentPart::Text { text } if text == "Овсяная каша с бананом")
        );
        assert!(
            parts
                .iter()
                .all(|part| !matches!(part, ContentPart::InlineData { .. }))
        );
    }

    #[test]
    fn blank_text_is_skipped_and_attachments_follow_in_order() {
        let attachments = vec![
            ImageAttachment {
                name: "page1.jpg".to_string(),
                mime_type: "image/jpeg".to_string(),
                data: "AAAA".to_string(),
            },
            ImageAttachment {
                name: "page2.png".to_string(),
                mime_type: "image/png".to_string(),
                data: "BBBB".to_string(),
            },
        ];

        let parts = build_parts("   ", &attachments);

        assert_eq!(parts.len(), 3);
        assert!(matches!(&parts[2], ContentPart::InlineData { .. }));
        let ContentPart::InlineData { inline_data } = &parts[1] else {
            panic!("expected inline part");
        };
        assert_eq!(inline_data.mime_type, "image/jpeg");
        assert_eq!(inline_data.data, "AAAA");
    }

    #[test]
    fn legacy_shape_reply_with_leading_prose_parses() {
        let reply = "Вот твой пост: {\"recipe\":\"Шаг 1. Варим кашу.\",\"kbju\":\"\",\"diets\":\"\",\"hashtags\":\"#ВкусноПростоПолезно\",\"prompt\":\"Instagram post, 1080x1350\"}";

        let post = parse_reply(reply).unwrap();

        assert_eq!(post.recipe, "Шаг 1. Варим кашу.");
        assert_eq!(post.kbju, "");
        assert_eq!(post.diets, "");
        assert_eq!(post.hashtags, "#ВкусноПростоПолезно");
        assert_eq!(post.image_prompt, "Instagram post, 1080x1350");
    }

    #[test]
    fn fenced_canonical_reply_parses() {
        let reply = "```json\n{\"Заголовок\":\"Овсяная каша\",\"Рецепт\":\"Шаги\",\"Совет\":\"Сохрани рецепт ❤️\",\"Хэштеги\":\"#вкуснополезно\"}\n```";

        let post = parse_reply(reply).unwrap();

        assert_eq!(post.title, "Овсяная каша");
        assert_eq!(post.tip, "Сохрани рецепт ❤️");
        assert_eq!(post.number, "");
        assert_eq!(post.diets, "");
    }

    #[test]
    fn reply_without_json_is_missing_payload() {
        let err = parse_reply("Извини, не могу обработать этот рецепт.").unwrap_err();
        assert!(matches!(err, GenerationError::MissingPayload));
    }

    #[test]
    fn undecodable_span_is_malformed() {
        let err = parse_reply("{\"Рецепт\": }").unwrap_err();
        assert!(matches!(err, GenerationError::Malformed(_)));
    }

    #[test]
    fn braces_inside_string_values_do_not_cut_the_span() {
        let text = "ответ: {\"Заголовок\":\"Каша {особая}\",\"Рецепт\":\"шаг \\\"1\\\"\"} и всё";
        let span = extract_json_object(text).unwrap();
        assert!(span.starts_with('{'));
        assert!(span.ends_with('}'));

        let post: RecipePost = serde_json::from_str(span).unwrap();
        assert_eq!(post.title, "Каша {особая}");
    }

    #[test]
    fn nested_objects_keep_the_span_balanced() {
        let span = extract_json_object("x {\"a\":{\"b\":\"c\"}} y").unwrap();
        assert_eq!(span, "{\"a\":{\"b\":\"c\"}}");
    }
}
