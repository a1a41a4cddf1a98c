//! Backend payload shapes and their conversion into domain types.
//!
//! The backend is loosely typed (ids arrive as numbers or strings, post
//! senders under two different keys). Everything is normalized here.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use yuletree_core::assets::AssetCategory;
use yuletree_core::error::CoreError;
use yuletree_core::post::Post;
use yuletree_core::session::UserProfile;
use yuletree_core::tree_config::TreeConfiguration;
use yuletree_core::types::{AssetId, UserId};

use crate::backend::TreeView;
use crate::error::ApiError;

/// `message` value of a successful `/user/me` response.
pub const MESSAGE_OK: &str = "ok";

/// `GET /user/me` body.
#[derive(Debug, Deserialize)]
pub struct MeResponse {
    pub message: Option<String>,
    #[serde(default)]
    pub id: Value,
    pub nickname: Option<String>,
}

/// `GET /tree/...` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeResponse {
    #[serde(default)]
    pub tree_info: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub posts: Option<Vec<WirePost>>,
    pub nickname: Option<String>,
}

/// One post as the backend sends it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePost {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: i64,
    pub img_name: String,
    pub nickname: Option<String>,
    pub sender_name: Option<String>,
    pub content: Option<String>,
}

/// `GET /admin/asset` body: either `{ id }` or `{ error, message }`.
#[derive(Debug, Deserialize)]
pub struct AssetLookupResponse {
    #[serde(default, deserialize_with = "optional_id")]
    pub id: Option<AssetId>,
    #[serde(default)]
    pub error: Value,
    pub message: Option<String>,
}

impl MeResponse {
    /// Anything but `message == "ok"` means the credential is unusable.
    pub fn into_profile(self) -> Result<UserProfile, CoreError> {
        if self.message.as_deref() != Some(MESSAGE_OK) {
            return Err(CoreError::AuthRequired);
        }
        let id = parse_id(&self.id).ok_or_else(|| {
            CoreError::Network(
                ApiError::Payload(format!("user id is not an integer: {}", self.id)).to_string(),
            )
        })?;
        Ok(UserProfile {
            id,
            nickname: self.nickname.unwrap_or_default(),
        })
    }
}

impl From<WirePost> for Post {
    fn from(wire: WirePost) -> Self {
        Post {
            id: wire.id,
            img_name: wire.img_name,
            sender_name: wire.nickname.or(wire.sender_name).unwrap_or_default(),
            content: wire.content,
        }
    }
}

impl From<TreeResponse> for TreeView {
    fn from(wire: TreeResponse) -> Self {
        let configuration = wire
            .tree_info
            .as_deref()
            .map(TreeConfiguration::from_positional)
            .unwrap_or_default();
        TreeView {
            configuration,
            posts: wire
                .posts
                .unwrap_or_default()
                .into_iter()
                .map(Post::from)
                .collect(),
            nickname: wire.nickname.filter(|n| !n.trim().is_empty()),
        }
    }
}

impl AssetLookupResponse {
    /// The asset id, or a resolution error carrying the backend message.
    pub fn into_asset_id(self, name: &str, category: AssetCategory) -> Result<AssetId, CoreError> {
        let flagged = match &self.error {
            Value::Null => false,
            Value::Bool(b) => *b,
            _ => true,
        };
        match self.id {
            Some(id) if !flagged => Ok(id),
            _ => Err(CoreError::Resolution {
                name: name.to_string(),
                category,
                message: self
                    .message
                    .unwrap_or_else(|| "asset is not registered".to_string()),
            }),
        }
    }
}

fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_id(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("id is not an integer: {value}")))
}

/// Absent, null or non-numeric ids all read as `None`.
fn optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_id))
}

/// Accept an integer id sent either as a JSON number or a numeric string.
pub fn parse_id(value: &Value) -> Option<UserId> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
