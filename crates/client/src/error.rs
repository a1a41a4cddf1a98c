//! Transport-level errors and their mapping onto [`CoreError`].

use yuletree_core::error::CoreError;

/// Errors from the backend REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body did not have the expected shape.
    #[error("Unexpected payload: {0}")]
    Payload(String),
}

/// Whether the failing call was a read or a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl ApiError {
    /// 401 and 403 mean the credential is missing, expired or rejected.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }

    /// Map onto the domain taxonomy.
    ///
    /// Rejected credentials always become [`CoreError::AuthRequired`];
    /// otherwise writes fail as persistence errors and reads as network
    /// errors.
    pub fn into_core(self, access: Access) -> CoreError {
        if self.is_unauthorized() {
            return CoreError::AuthRequired;
        }
        match access {
            Access::Read => CoreError::Network(self.to_string()),
            Access::Write => CoreError::Persistence(self.to_string()),
        }
    }
}
