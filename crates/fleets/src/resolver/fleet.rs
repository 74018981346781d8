//! Fleet resolver: list, create, delete and update over an injected table.
//!
//! Each operation validates its request, then makes exactly one table call.
//! There are no retries and no cross-call coordination.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info};

use crate::model::{Fleet, FleetKey};
use crate::table::FleetTable;
use super::error::{ResolverError, ResolverResult};
use super::request::{AddFleetRequest, DeleteFleetRequest, UpdateFleetRequest};

/// Stateless handler over the fleet collection. Cheap to share behind `Arc`.
#[derive(Clone)]
pub struct FleetResolver {
    table: Arc<dyn FleetTable>,
}

impl FleetResolver {
    pub fn new(table: Arc<dyn FleetTable>) -> Self {
        Self { table }
    }

    /// `Query.getAllFleets`: every stored record, unfiltered.
    pub async fn get_all_fleets(&self) -> ResolverResult<Vec<Fleet>> {
        let fleets = self.table.scan_fleets().await.map_err(|e| {
            error!("getAllFleets failed: {}", e);
            ResolverError::from(e)
        })?;
        info!(count = fleets.len(), "getAllFleets");
        Ok(fleets)
    }

    /// `Mutation.addFleet`: stamp a new id and timestamp, persist, return the record.
    pub async fn add_fleet(&self, request: AddFleetRequest) -> ResolverResult<Fleet> {
        request.validate()?;

        let fleet = Fleet::create(request.fleet_name, request.tracks, Utc::now());
        self.table.put_fleet(&fleet).await.map_err(|e| {
            error!(fleet_id = %fleet.fleet_id, "addFleet put failed: {}", e);
            ResolverError::from(e)
        })?;

        info!(fleet_id = %fleet.fleet_id, fleet_name = %fleet.fleet_name, "addFleet");
        Ok(fleet)
    }

    /// `Mutation.deleteFleet`: remove if present and echo the id either way.
    pub async fn delete_fleet(&self, request: DeleteFleetRequest) -> ResolverResult<FleetKey> {
        request.validate()?;

        info!(fleet_id = %request.fleet_id, "deleteFleet");
        self.table.delete_fleet(&request.fleet_id).await.map_err(|e| {
            error!(fleet_id = %request.fleet_id, "deleteFleet failed: {}", e);
            ResolverError::from(e)
        })?;

        Ok(FleetKey::new(request.fleet_id))
    }

    /// `Mutation.updateFleet`: overwrite the name only and return the id.
    ///
    /// `request.tracks` is not written; the stored track list is left as-is.
    pub async fn update_fleet(&self, request: UpdateFleetRequest) -> ResolverResult<FleetKey> {
        request.validate()?;

        info!(fleet_id = %request.fleet_id, "updateFleet");
        if request.tracks.is_some() {
            debug!(fleet_id = %request.fleet_id, "updateFleet: tracks argument ignored");
        }

        self.table
            .update_fleet_name(&request.fleet_id, &request.fleet_name)
            .await
            .map_err(|e| {
                error!(fleet_id = %request.fleet_id, "updateFleet failed: {}", e);
                ResolverError::from(e)
            })?;

        Ok(FleetKey::new(request.fleet_id))
    }
}
