//! Asset catalog resolver.
//!
//! URL resolution is local templating. Id resolution is one backend
//! round-trip per call, never cached and never retried: ids can change
//! with backend state.

use std::sync::Arc;

use yuletree_core::assets::{AssetCategory, ImageHost};
use yuletree_core::error::CoreError;
use yuletree_core::session::Session;
use yuletree_core::types::AssetId;

use crate::backend::Backend;

/// Resolves asset names to display URLs and backend ids.
#[derive(Clone)]
pub struct AssetResolver {
    backend: Arc<dyn Backend>,
    images: ImageHost,
}

impl AssetResolver {
    pub fn new(backend: Arc<dyn Backend>, images: ImageHost) -> Self {
        Self { backend, images }
    }

    pub fn images(&self) -> &ImageHost {
        &self.images
    }

    /// `{host}/images/{category}/{name}`. No network.
    pub fn resolve_url(&self, name: &str, category: AssetCategory) -> String {
        self.images.resolve_url(name, category)
    }

    /// Look up the numeric id of `name` in `category`.
    pub async fn resolve_asset_id(
        &self,
        session: &Session,
        name: &str,
        category: AssetCategory,
    ) -> Result<AssetId, CoreError> {
        match self.backend.lookup_asset(session, name, category).await {
            Ok(id) => {
                tracing::debug!(name, %category, asset_id = id, "Resolved asset id");
                Ok(id)
            }
            Err(e) => {
                tracing::warn!(name, %category, error = %e, "Asset id lookup failed");
                Err(e)
            }
        }
    }

    /// Ordered asset names available in a category.
    pub async fn list_catalog(
        &self,
        session: &Session,
        category: AssetCategory,
    ) -> Result<Vec<String>, CoreError> {
        let names = self.backend.catalog(session, category).await?;
        tracing::debug!(%category, count = names.len(), "Loaded catalog");
        Ok(names)
    }
}
