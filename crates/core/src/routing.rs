//! Route decisions returned to the consumer.
//!
//! The engine never navigates by itself; it tells the caller where to go.

use serde::{Deserialize, Serialize};

use crate::tree_config::TreeConfiguration;
use crate::types::UserId;

/// Which tree a screen is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeTarget {
    /// The signed-in user's own default tree.
    Mine,
    /// The tree owned by a specific user.
    Owner(UserId),
}

impl TreeTarget {
    /// Explicit owner id, if the target names one.
    pub fn owner_id(self) -> Option<UserId> {
        match self {
            Self::Mine => None,
            Self::Owner(id) => Some(id),
        }
    }

    pub fn is_default(self) -> bool {
        matches!(self, Self::Mine)
    }
}

/// Destinations the consumer may be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Authentication flow (external).
    Login,
    /// Three-layer configuration picker.
    Configure,
    /// Paginated gallery of a tree.
    Gallery(TreeTarget),
    /// Decoration wizard against a tree owner's id.
    Decorate(UserId),
}

/// Where a freshly signed-in user lands.
///
/// A complete configuration goes to the user's own gallery; anything else
/// goes through the configuration flow first.
pub fn entry_route(own_configuration: &TreeConfiguration) -> Route {
    if own_configuration.is_complete() {
        Route::Gallery(TreeTarget::Mine)
    } else {
        Route::Configure
    }
}
