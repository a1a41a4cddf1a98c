use crate::assets::AssetCategory;
use crate::routing::Route;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Authentication required")]
    AuthRequired,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No asset id for '{name}' in {category}: {message}")]
    Resolution {
        name: String,
        category: AssetCategory,
        message: String,
    },

    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// How a failure is surfaced to the person driving the UI.
///
/// Every [`CoreError`] maps to exactly one notice; nothing is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Silent redirect, no message shown.
    Redirect(Route),
    /// Shown next to the control that triggered the action; blocks it.
    Inline(String),
    /// Modal alert.
    Alert(String),
}

impl CoreError {
    /// Classify this error into the notice the caller must show.
    pub fn notice(&self) -> Notice {
        match self {
            Self::AuthRequired => Notice::Redirect(Route::Login),
            Self::Validation(msg) => Notice::Inline(msg.clone()),
            Self::Resolution { .. } => {
                Notice::Alert("Could not find a valid asset id for the selection.".to_string())
            }
            Self::Persistence(_) => Notice::Alert("Saving failed. Please try again.".to_string()),
            Self::Network(_) => Notice::Alert("Could not reach the server.".to_string()),
            Self::Internal(msg) => Notice::Alert(format!("Unexpected error: {msg}")),
        }
    }

    /// `true` for errors that send the caller back to authentication.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::AuthRequired)
    }
}
