//! REST client for the tree backend.
//!
//! Wraps the backend HTTP API (identity, trees, catalog, asset lookup,
//! tree and post creation) using [`reqwest`]. Every request carries the
//! session's bearer token.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use yuletree_core::assets::AssetCategory;
use yuletree_core::error::CoreError;
use yuletree_core::post::NewPost;
use yuletree_core::routing::TreeTarget;
use yuletree_core::session::{Session, UserProfile};
use yuletree_core::tree_config::ResolvedTreeConfiguration;
use yuletree_core::types::{AssetId, UserId};

use crate::backend::{Backend, TreeView};
use crate::config::ClientConfig;
use crate::error::{Access, ApiError};
use crate::wire::{AssetLookupResponse, MeResponse, TreeResponse};

/// HTTP client for one backend deployment.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    api_url: String,
}

impl HttpBackend {
    /// Create a client for the given API base URL, e.g.
    /// `http://host:8070/api`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    /// Build a client honoring the configured timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CoreError::Internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Path of a tree endpoint for a target.
    pub fn tree_path(target: TreeTarget) -> String {
        match target {
            TreeTarget::Mine => "/tree/my".to_string(),
            TreeTarget::Owner(id) => format!("/tree/{id}"),
        }
    }

    // ---- private helpers ----

    async fn get_json<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        token: &str,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        tracing::debug!(path, "POST");
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::Status`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Payload(e.to_string()))
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn current_user(&self, session: &Session) -> Result<UserProfile, CoreError> {
        let me: MeResponse = self
            .get_json(session.bearer()?, "/user/me", &[])
            .await
            .map_err(|e| e.into_core(Access::Read))?;
        me.into_profile()
    }

    async fn tree(&self, session: &Session, target: TreeTarget) -> Result<TreeView, CoreError> {
        let wire: TreeResponse = self
            .get_json(session.bearer()?, &Self::tree_path(target), &[])
            .await
            .map_err(|e| e.into_core(Access::Read))?;
        Ok(TreeView::from(wire))
    }

    async fn catalog(
        &self,
        session: &Session,
        category: AssetCategory,
    ) -> Result<Vec<String>, CoreError> {
        self.get_json(session.bearer()?, "/image", &[("type", category.as_path())])
            .await
            .map_err(|e| e.into_core(Access::Read))
    }

    async fn lookup_asset(
        &self,
        session: &Session,
        name: &str,
        category: AssetCategory,
    ) -> Result<AssetId, CoreError> {
        let result: Result<AssetLookupResponse, ApiError> = self
            .get_json(
                session.bearer()?,
                "/admin/asset",
                &[("imgName", name), ("type", category.as_path())],
            )
            .await;
        match result {
            Ok(wire) => wire.into_asset_id(name, category),
            Err(e) if e.is_unauthorized() => Err(CoreError::AuthRequired),
            Err(ApiError::Request(e)) => Err(CoreError::Network(e.to_string())),
            Err(e) => Err(CoreError::Resolution {
                name: name.to_string(),
                category,
                message: e.to_string(),
            }),
        }
    }

    async fn save_tree(
        &self,
        session: &Session,
        resolved: &ResolvedTreeConfiguration,
    ) -> Result<(), CoreError> {
        self.post_json(session.bearer()?, "/tree", resolved)
            .await
            .map_err(|e| e.into_core(Access::Write))
    }

    async fn create_post(
        &self,
        session: &Session,
        tree_id: UserId,
        post: &NewPost,
    ) -> Result<(), CoreError> {
        self.post_json(session.bearer()?, &format!("/post/{tree_id}"), post)
            .await
            .map_err(|e| e.into_core(Access::Write))
    }
}
