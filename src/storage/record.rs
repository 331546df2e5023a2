//! The persisted request record.

use chrono::{DateTime, Utc};

/// One captured request, as handed to the store.
///
/// `id` and `created_at` are assigned by the store and are not part of the
/// application-side shape. Every field except `device_id` is an empty string
/// when the corresponding header was missing, never NULL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    pub method: String,
    pub uri: String,
    pub host: String,
    pub ip: String,
    pub device_id: Option<String>,
    pub user_agent: String,
    pub body: String,
    /// Capture time on the sidecar clock.
    pub received_at: DateTime<Utc>,
}
