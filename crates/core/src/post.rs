//! Decoration posts and the create-post payload.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::PostId;

/// Hard cap on letter length, in characters.
pub const MAX_CONTENT_CHARS: usize = 850;

/// Sender names longer than this are truncated for display only.
pub const SENDER_DISPLAY_CHARS: usize = 8;

/// A decoration attached to a tree. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    /// Asset name in the decoration category.
    pub img_name: String,
    pub sender_name: String,
    /// Letter body. `None` when withheld from the viewer.
    pub content: Option<String>,
}

impl Post {
    /// Sender name as rendered under the decoration.
    pub fn sender_display(&self) -> &str {
        truncate_display(&self.sender_name, SENDER_DISPLAY_CHARS)
    }

    /// Copy of this post with the letter body removed.
    pub fn without_content(&self) -> Self {
        Self {
            content: None,
            ..self.clone()
        }
    }
}

/// Payload of `POST /post/{tree_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    #[validate(length(min = 1, max = 850))]
    pub content: String,
    #[validate(length(min = 1))]
    pub img_name: String,
    /// The full nickname, never the truncated display form.
    #[validate(length(min = 1))]
    pub sender_name: String,
}

impl NewPost {
    /// Run field validation, mapping failures to [`CoreError::Validation`].
    pub fn validated(self) -> Result<Self, CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        Ok(self)
    }
}

/// First `max_chars` characters of `s`, on a char boundary.
pub fn truncate_display(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Reject letter text over [`MAX_CONTENT_CHARS`].
pub fn validate_content_length(content: &str) -> Result<(), CoreError> {
    let len = content.chars().count();
    if len > MAX_CONTENT_CHARS {
        return Err(CoreError::Validation(format!(
            "Letter is {len} characters long; the limit is {MAX_CONTENT_CHARS}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(content: &str) -> NewPost {
        NewPost {
            content: content.to_string(),
            img_name: "bell.png".to_string(),
            sender_name: "rudolph".to_string(),
        }
    }

    // -- truncate_display --

    #[test]
    fn short_names_are_unchanged() {
        assert_eq!(truncate_display("santa", 8), "santa");
        assert_eq!(truncate_display("12345678", 8), "12345678");
    }

    #[test]
    fn long_names_are_cut_to_eight_chars() {
        assert_eq!(truncate_display("123456789", 8), "12345678");
    }

    #[test]
    fn truncation_respects_multibyte_chars() {
        assert_eq!(truncate_display("크리스마스트리꾸미기", 8), "크리스마스트리꾸");
    }

    #[test]
    fn post_sender_display_truncates() {
        let post = Post {
            id: 1,
            img_name: "bell.png".into(),
            sender_name: "jingle-bells".into(),
            content: None,
        };
        assert_eq!(post.sender_display(), "jingle-b");
        assert_eq!(post.sender_name, "jingle-bells");
    }

    #[test]
    fn without_content_strips_body_only() {
        let post = Post {
            id: 3,
            img_name: "bell.png".into(),
            sender_name: "elf".into(),
            content: Some("hello".into()),
        };
        let stripped = post.without_content();
        assert_eq!(stripped.content, None);
        assert_eq!(stripped.id, 3);
        assert_eq!(stripped.img_name, "bell.png");
    }

    // -- validate_content_length --

    #[test]
    fn content_at_limit_is_accepted() {
        assert!(validate_content_length(&"a".repeat(MAX_CONTENT_CHARS)).is_ok());
    }

    #[test]
    fn content_over_limit_is_rejected() {
        assert!(validate_content_length(&"a".repeat(MAX_CONTENT_CHARS + 1)).is_err());
    }

    #[test]
    fn content_limit_counts_chars_not_bytes() {
        assert!(validate_content_length(&"눈".repeat(MAX_CONTENT_CHARS)).is_ok());
    }

    // -- NewPost --

    #[test]
    fn new_post_valid() {
        assert!(new_post("Merry Christmas").validated().is_ok());
    }

    #[test]
    fn new_post_rejects_empty_content() {
        assert!(matches!(
            new_post("").validated(),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn new_post_rejects_overlong_content() {
        assert!(new_post(&"x".repeat(851)).validated().is_err());
        assert!(new_post(&"x".repeat(850)).validated().is_ok());
    }

    #[test]
    fn new_post_serializes_camel_case() {
        let json = serde_json::to_value(new_post("hi")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "content": "hi",
                "imgName": "bell.png",
                "senderName": "rudolph",
            })
        );
    }
}
