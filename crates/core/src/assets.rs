//! Asset categories and image URL templating.
//!
//! Display never needs a backend round-trip: an image URL is a pure
//! function of the image host, the category and the asset name. Numeric
//! asset ids are resolved separately, and only at submission time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// The four catalog categories an asset can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetCategory {
    #[serde(rename = "backs")]
    Background,
    #[serde(rename = "trees")]
    Tree,
    #[serde(rename = "points")]
    Point,
    #[serde(rename = "posts")]
    Decoration,
}

impl AssetCategory {
    /// All categories, in picker tab order.
    pub const ALL: [AssetCategory; 4] = [
        Self::Tree,
        Self::Background,
        Self::Point,
        Self::Decoration,
    ];

    /// The three layers that make up a tree configuration.
    pub const LAYERS: [AssetCategory; 3] = [Self::Background, Self::Tree, Self::Point];

    /// Parse a category path segment (`backs`, `trees`, `points`, `posts`).
    pub fn from_path(s: &str) -> Result<Self, CoreError> {
        match s {
            "backs" => Ok(Self::Background),
            "trees" => Ok(Self::Tree),
            "points" => Ok(Self::Point),
            "posts" => Ok(Self::Decoration),
            _ => Err(CoreError::Internal(format!(
                "Unknown asset category '{s}'. Must be one of: backs, trees, points, posts"
            ))),
        }
    }

    /// Path segment used in image URLs and as the `type` query value.
    pub fn as_path(self) -> &'static str {
        match self {
            Self::Background => "backs",
            Self::Tree => "trees",
            Self::Point => "points",
            Self::Decoration => "posts",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Background => "Background",
            Self::Tree => "Tree",
            Self::Point => "Point",
            Self::Decoration => "Decoration",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

/// A named catalog image. Names are unique within a category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub category: AssetCategory,
}

impl Asset {
    pub fn new(name: impl Into<String>, category: AssetCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

// ---------------------------------------------------------------------------
// URL templating
// ---------------------------------------------------------------------------

/// Base host that serves catalog images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHost {
    base: String,
}

impl ImageHost {
    /// Create an image host. Trailing slashes are dropped so templating
    /// never produces `//images`.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `{base}/images/{category}/{name}`.
    pub fn resolve_url(&self, name: &str, category: AssetCategory) -> String {
        format!("{}/images/{}/{}", self.base, category.as_path(), name)
    }

    /// Same as [`resolve_url`](Self::resolve_url) for a raw category path.
    ///
    /// An unknown path is a programmer error, reported as
    /// [`CoreError::Internal`].
    pub fn resolve_url_for_path(&self, name: &str, category: &str) -> Result<String, CoreError> {
        let category = AssetCategory::from_path(category)?;
        Ok(self.resolve_url(name, category))
    }

    pub fn asset_url(&self, asset: &Asset) -> String {
        self.resolve_url(&asset.name, asset.category)
    }
}
