//! Tree configuration manager: load, validate and persist the three-layer
//! selection.
//!
//! Saving fans out three independent asset-id lookups and joins them. A
//! single failed lookup aborts the save before anything is written.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{try_join, try_join3};

use yuletree_core::assets::AssetCategory;
use yuletree_core::error::CoreError;
use yuletree_core::routing::TreeTarget;
use yuletree_core::session::{Session, UserProfile};
use yuletree_core::tree_config::{
    ConfigurationDraft, ResolvedTreeConfiguration, TreeConfiguration,
};

use crate::backend::Backend;
use crate::resolver::AssetResolver;

/// Everything the configuration picker needs to render.
#[derive(Debug, Clone)]
pub struct PickerState {
    pub profile: UserProfile,
    pub draft: ConfigurationDraft,
    /// Catalog names per layer category, in backend order.
    pub catalogs: HashMap<AssetCategory, Vec<String>>,
}

impl PickerState {
    /// Options for a layer tab.
    pub fn options(&self, category: AssetCategory) -> &[String] {
        self.catalogs
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct TreeConfigManager {
    backend: Arc<dyn Backend>,
    resolver: AssetResolver,
}

impl TreeConfigManager {
    pub fn new(backend: Arc<dyn Backend>, resolver: AssetResolver) -> Self {
        Self { backend, resolver }
    }

    pub fn resolver(&self) -> &AssetResolver {
        &self.resolver
    }

    /// Fetch the caller's own configuration or a given owner's.
    ///
    /// Absent layers signal an incomplete tree.
    pub async fn load_configuration(
        &self,
        session: &Session,
        target: TreeTarget,
    ) -> Result<TreeConfiguration, CoreError> {
        let view = self.backend.tree(session, target).await?;
        Ok(view.configuration)
    }

    /// `true` iff all three layers are non-empty after trimming.
    pub fn is_complete(config: &TreeConfiguration) -> bool {
        config.is_complete()
    }

    /// Resolve all three layer ids concurrently, then write once.
    ///
    /// Fails with `Validation` when incomplete, `Resolution` when any id
    /// lookup fails (nothing is written), `Persistence` when the backend
    /// rejects the write.
    pub async fn save(
        &self,
        session: &Session,
        config: &TreeConfiguration,
    ) -> Result<ResolvedTreeConfiguration, CoreError> {
        let [background, tree, point] = config.require_complete()?;

        let (background, tree, tree_point) = try_join3(
            self.resolver
                .resolve_asset_id(session, &background.name, background.category),
            self.resolver
                .resolve_asset_id(session, &tree.name, tree.category),
            self.resolver
                .resolve_asset_id(session, &point.name, point.category),
        )
        .await?;

        let resolved = ResolvedTreeConfiguration {
            background,
            tree,
            tree_point,
        };
        self.backend.save_tree(session, &resolved).await?;

        tracing::info!(
            background = resolved.background,
            tree = resolved.tree,
            tree_point = resolved.tree_point,
            "Tree configuration saved",
        );
        Ok(resolved)
    }

    /// Load the picker: identity first, then the saved configuration, then
    /// the three layer catalogs (fetched together).
    pub async fn load_picker(&self, session: &Session) -> Result<PickerState, CoreError> {
        let profile = self.backend.current_user(session).await?;
        let saved = self.load_configuration(session, TreeTarget::Mine).await?;

        let (trees, (backgrounds, points)) = try_join(
            self.resolver.list_catalog(session, AssetCategory::Tree),
            try_join(
                self.resolver
                    .list_catalog(session, AssetCategory::Background),
                self.resolver.list_catalog(session, AssetCategory::Point),
            ),
        )
        .await?;

        let catalogs = HashMap::from([
            (AssetCategory::Tree, trees),
            (AssetCategory::Background, backgrounds),
            (AssetCategory::Point, points),
        ]);

        Ok(PickerState {
            profile,
            draft: ConfigurationDraft::from_saved(saved),
            catalogs,
        })
    }
}
