/// Backend user ids. A user's tree is addressed by the owner's user id.
pub type UserId = i64;

/// Numeric catalog id of an asset, assigned by the backend.
pub type AssetId = i64;

/// Server-assigned post id.
pub type PostId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
