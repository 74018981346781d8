use async_graphql::{SimpleObject, ID};
use fleets::model::{Fleet as FleetRecord, FleetKey};

/// A fleet as returned to GraphQL clients.
///
/// `deleteFleet` and `updateFleet` only know the id, so every other field is nullable.
#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
#[graphql(name = "Fleet")]
pub struct FleetView {
    pub fleet_id: ID,
    pub fleet_name: Option<String>,
    /// ISO-8601 UTC, `Z` suffix.
    pub created_at: Option<String>,
    pub tracks: Option<Vec<String>>,
}

impl From<FleetRecord> for FleetView {
    fn from(fleet: FleetRecord) -> Self {
        Self {
            fleet_id: ID(fleet.fleet_id),
            fleet_name: Some(fleet.fleet_name),
            created_at: fleet.created_at,
            tracks: fleet.tracks,
        }
    }
}

impl From<FleetKey> for FleetView {
    fn from(key: FleetKey) -> Self {
        Self {
            fleet_id: ID(key.fleet_id),
            fleet_name: None,
            created_at: None,
            tracks: None,
        }
    }
}
