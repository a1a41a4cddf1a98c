//! Explicit session context.
//!
//! Credentials and identity are passed into each entry point instead of
//! living in ambient globals. A session is acquired once, then invalidated
//! on logout or when it expires.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Timestamp, UserId};

/// The signed-in user as reported by `GET /user/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub nickname: String,
}

/// Bearer credential plus its lifecycle.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    acquired_at: Timestamp,
    expires_at: Option<Timestamp>,
    invalidated: bool,
}

impl Session {
    /// Acquire a session from a stored access token.
    ///
    /// An empty token is treated as no credential at all.
    pub fn acquire(token: impl Into<String>) -> Result<Self, CoreError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(CoreError::AuthRequired);
        }
        Ok(Self {
            token,
            acquired_at: Utc::now(),
            expires_at: None,
            invalidated: false,
        })
    }

    pub fn with_expiry(mut self, expires_at: Timestamp) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn acquired_at(&self) -> Timestamp {
        self.acquired_at
    }

    pub fn expires_at(&self) -> Option<Timestamp> {
        self.expires_at
    }

    /// Logout, or the backend rejected the credential.
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    pub fn is_active_at(&self, now: Timestamp) -> bool {
        !self.invalidated && self.expires_at.map_or(true, |exp| now < exp)
    }

    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }

    /// The token for the `Authorization` header.
    pub fn bearer(&self) -> Result<&str, CoreError> {
        if !self.is_active() {
            return Err(CoreError::AuthRequired);
        }
        Ok(&self.token)
    }
}
