//! Three-layer tree configuration (background, tree, point).
//!
//! A configuration is persisted wholesale: either all three layers are
//! present and every one resolves to an asset id, or nothing is written.

use serde::{Deserialize, Serialize};

use crate::assets::{Asset, AssetCategory};
use crate::error::CoreError;
use crate::types::AssetId;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// A user's chosen layer names. Any layer may be absent until complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfiguration {
    pub background: Option<String>,
    pub tree: Option<String>,
    pub point: Option<String>,
}

impl TreeConfiguration {
    pub fn new(
        background: impl Into<String>,
        tree: impl Into<String>,
        point: impl Into<String>,
    ) -> Self {
        Self {
            background: Some(background.into()),
            tree: Some(tree.into()),
            point: Some(point.into()),
        }
    }

    /// Build from the positional `[background, tree, point]` triple the
    /// backend returns. Missing or blank entries become `None`.
    pub fn from_positional<S: AsRef<str>>(layers: &[Option<S>]) -> Self {
        let at = |i: usize| {
            layers
                .get(i)
                .and_then(|v| v.as_ref())
                .map(AsRef::<str>::as_ref)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
        };
        Self {
            background: at(0),
            tree: at(1),
            point: at(2),
        }
    }

    /// The selected name for a layer.
    ///
    /// Decorations are not a layer, so they always return `None`.
    pub fn get(&self, category: AssetCategory) -> Option<&str> {
        match category {
            AssetCategory::Background => self.background.as_deref(),
            AssetCategory::Tree => self.tree.as_deref(),
            AssetCategory::Point => self.point.as_deref(),
            AssetCategory::Decoration => None,
        }
    }

    /// Replace one layer's selection.
    pub fn set(&mut self, category: AssetCategory, name: Option<String>) -> Result<(), CoreError> {
        let slot = match category {
            AssetCategory::Background => &mut self.background,
            AssetCategory::Tree => &mut self.tree,
            AssetCategory::Point => &mut self.point,
            AssetCategory::Decoration => {
                return Err(CoreError::Validation(
                    "Decorations are not part of a tree configuration".to_string(),
                ))
            }
        };
        *slot = name;
        Ok(())
    }

    /// `true` iff all three layers are non-empty after trimming.
    pub fn is_complete(&self) -> bool {
        AssetCategory::LAYERS
            .iter()
            .all(|c| self.get(*c).is_some_and(|s| !s.trim().is_empty()))
    }

    /// Layer categories that are missing or blank.
    pub fn missing_layers(&self) -> Vec<AssetCategory> {
        AssetCategory::LAYERS
            .into_iter()
            .filter(|c| self.get(*c).map_or(true, |s| s.trim().is_empty()))
            .collect()
    }

    /// The three layer assets, or a validation error naming what is missing.
    pub fn require_complete(&self) -> Result<[Asset; 3], CoreError> {
        let missing = self.missing_layers();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|c| c.label()).collect();
            return Err(CoreError::Validation(format!(
                "Select every layer before saving (missing: {})",
                names.join(", ")
            )));
        }
        let layer = |c: AssetCategory| Asset::new(self.get(c).unwrap_or_default(), c);
        Ok([
            layer(AssetCategory::Background),
            layer(AssetCategory::Tree),
            layer(AssetCategory::Point),
        ])
    }
}

/// Asset ids for a complete configuration, in the shape `POST /tree` takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTreeConfiguration {
    pub background: AssetId,
    pub tree: AssetId,
    pub tree_point: AssetId,
}

// ---------------------------------------------------------------------------
// Picker draft
// ---------------------------------------------------------------------------

/// Editable picker state: which layer tab is open and what is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationDraft {
    active_tab: AssetCategory,
    selection: TreeConfiguration,
}

impl Default for ConfigurationDraft {
    fn default() -> Self {
        Self {
            active_tab: AssetCategory::Tree,
            selection: TreeConfiguration::default(),
        }
    }
}

impl ConfigurationDraft {
    /// Start from a previously saved configuration.
    pub fn from_saved(saved: TreeConfiguration) -> Self {
        Self {
            active_tab: AssetCategory::Tree,
            selection: saved,
        }
    }

    pub fn active_tab(&self) -> AssetCategory {
        self.active_tab
    }

    pub fn switch_tab(&mut self, tab: AssetCategory) -> Result<(), CoreError> {
        if tab == AssetCategory::Decoration {
            return Err(CoreError::Validation(
                "The picker only has background, tree and point tabs".to_string(),
            ));
        }
        self.active_tab = tab;
        Ok(())
    }

    /// Select an asset on the active tab.
    pub fn select(&mut self, name: impl Into<String>) {
        let name = name.into();
        // active_tab is never Decoration, see switch_tab.
        let _ = self.selection.set(self.active_tab, Some(name));
    }

    pub fn is_selected(&self, category: AssetCategory, name: &str) -> bool {
        self.selection.get(category) == Some(name)
    }

    /// Drop every selection. Nothing is sent to the backend.
    pub fn clear(&mut self) {
        self.selection = TreeConfiguration::default();
    }

    pub fn configuration(&self) -> &TreeConfiguration {
        &self.selection
    }

    pub fn into_configuration(self) -> TreeConfiguration {
        self.selection
    }
}
