//! Model: the persisted fleet record and the key-only shape returned by mutations.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the table's partition key attribute.
pub const FLEET_ID: &str = "fleetId";

/// A single fleet entry, stored as-is in the backing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fleet {
    /// Generated once at creation, never reused.
    pub fleet_id: String,
    pub fleet_name: String,
    /// ISO-8601 UTC timestamp with a `Z` suffix.
    ///
    /// Absent on items that a rename created before renames were guarded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Vec<String>>,
}

impl Fleet {
    /// Build a new record with a fresh identifier, stamped at `now`.
    pub fn create(fleet_name: String, tracks: Option<Vec<String>>, now: DateTime<Utc>) -> Self {
        Self {
            fleet_id: Uuid::new_v4().to_string(),
            fleet_name,
            created_at: Some(format_timestamp(now)),
            tracks,
        }
    }

    /// Parse `created_at`, if it holds a valid RFC 3339 timestamp.
    pub fn created_at_timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.created_at.as_deref()?)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}

/// The identifier-only payload returned by delete and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetKey {
    pub fleet_id: String,
}

impl FleetKey {
    pub fn new(fleet_id: impl Into<String>) -> Self {
        Self { fleet_id: fleet_id.into() }
    }
}

/// Microsecond precision, `Z` suffix: `2022-08-01T12:00:00.123456Z`.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
