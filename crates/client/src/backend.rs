//! The backend contract consumed by the engine.
//!
//! Every method takes the caller's [`Session`] explicitly and returns
//! strict domain types; untyped payloads never cross this trait.

use async_trait::async_trait;

use yuletree_core::assets::AssetCategory;
use yuletree_core::error::CoreError;
use yuletree_core::post::{NewPost, Post};
use yuletree_core::routing::TreeTarget;
use yuletree_core::session::{Session, UserProfile};
use yuletree_core::tree_config::{ResolvedTreeConfiguration, TreeConfiguration};
use yuletree_core::types::{AssetId, UserId};

/// A tree as returned by `GET /tree/my` or `GET /tree/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeView {
    pub configuration: TreeConfiguration,
    /// Posts in arrival order.
    pub posts: Vec<Post>,
    /// Owner's nickname, when the backend sends one.
    pub nickname: Option<String>,
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /user/me`. Any message other than `"ok"` is `AuthRequired`.
    async fn current_user(&self, session: &Session) -> Result<UserProfile, CoreError>;

    /// `GET /tree/my` or `GET /tree/{id}`.
    async fn tree(&self, session: &Session, target: TreeTarget) -> Result<TreeView, CoreError>;

    /// `GET /image?type=`: ordered asset names of one category.
    async fn catalog(
        &self,
        session: &Session,
        category: AssetCategory,
    ) -> Result<Vec<String>, CoreError>;

    /// `GET /admin/asset?imgName=&type=`. An error payload is a
    /// [`CoreError::Resolution`].
    async fn lookup_asset(
        &self,
        session: &Session,
        name: &str,
        category: AssetCategory,
    ) -> Result<AssetId, CoreError>;

    /// `POST /tree`.
    async fn save_tree(
        &self,
        session: &Session,
        resolved: &ResolvedTreeConfiguration,
    ) -> Result<(), CoreError>;

    /// `POST /post/{tree_id}`.
    async fn create_post(
        &self,
        session: &Session,
        tree_id: UserId,
        post: &NewPost,
    ) -> Result<(), CoreError>;
}
