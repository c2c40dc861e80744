use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Corresponds to the `video` table: one video gallery entry.
#[derive(Debug, Clone, FromRow)]
pub struct Video {
    pub id: i32,
    pub caption: Option<String>,
    /// The link as the admin entered it.
    pub source_url: Option<String>,
    /// Stored thumbnail file, overrides the thumbnail derived from the link.
    pub thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
}
