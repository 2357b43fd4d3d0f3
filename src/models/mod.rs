//! Data models for recipe input, generated posts and history records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An uploaded recipe image, base64-encoded for transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// Original filename, display-only
    pub name: String,
    /// Declared content type, always `image/*`
    pub mime_type: String,
    /// Base64 payload without any data-URI prefix
    pub data: String,
}

/// The user input that produced a generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub free_text: String,
    pub attachments: Vec<ImageAttachment>,
}

impl GenerationRequest {
    /// True when there is nothing to send: blank text and no images
    pub fn is_empty(&self) -> bool {
        self.free_text.trim().is_empty() && self.attachments.is_empty()
    }
}

/// A finished Instagram post as returned by the model.
///
/// The wire contract is the Cyrillic key set the instruction prompt asks
/// for. The older English keys are accepted as aliases on decode so replies
/// and persisted history from the previous prompt revision still parse.
/// Every field falls back to an empty string when the model omits it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipePost {
    #[serde(rename = "Номер", default)]
    pub number: String,
    #[serde(rename = "Заголовок", default)]
    pub title: String,
    #[serde(rename = "Рецепт", alias = "recipe", default)]
    pub recipe: String,
    #[serde(rename = "Совет", default)]
    pub tip: String,
    #[serde(rename = "ДопИнфа", alias = "kbju", default)]
    pub kbju: String,
    #[serde(rename = "Диеты", alias = "diets", default)]
    pub diets: String,
    #[serde(rename = "Хэштеги", alias = "hashtags", default)]
    pub hashtags: String,
    #[serde(rename = "Промпт", alias = "prompt", default)]
    pub image_prompt: String,
}

/// One past generation: the input that produced it plus the result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Creation time in milliseconds; unique and monotonically increasing
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub request: GenerationRequest,
    pub result: RecipePost,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipe_post_serializes_under_cyrillic_keys() {
        let post = RecipePost {
            title: "Овсяная каша".to_string(),
            recipe: "Варить 10 минут.".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(&post).unwrap();
        assert!(json.get("Заголовок").is_some());
        assert!(json.get("Рецепт").is_some());
        assert!(json.get("title").is_none());
        assert!(json.get("recipe").is_none());
    }

    #[test]
    fn recipe_post_accepts_legacy_keys_and_defaults_missing_fields() {
        let post: RecipePost = serde_json::from_str(
            r##"{"recipe":"Шаги...","hashtags":"#ВкусноПростоПолезно","prompt":"Instagram post"}"##,
        )
        .unwrap();

        assert_eq!(post.recipe, "Шаги...");
        assert_eq!(post.hashtags, "#ВкусноПростоПолезно");
        assert_eq!(post.image_prompt, "Instagram post");
        assert_eq!(post.kbju, "");
        assert_eq!(post.diets, "");
        assert_eq!(post.title, "");
    }

    #[test]
    fn generation_request_emptiness() {
        assert!(GenerationRequest::default().is_empty());
        assert!(
            GenerationRequest {
                free_text: "   ".to_string(),
                attachments: vec![],
            }
            .is_empty()
        );
        assert!(
            !GenerationRequest {
                free_text: "Овсяная каша с бананом".to_string(),
                attachments: vec![],
            }
            .is_empty()
        );
    }
}
