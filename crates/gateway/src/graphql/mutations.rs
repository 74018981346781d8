use async_graphql::{Context, ID};
use fleets::resolver::{AddFleetRequest, DeleteFleetRequest, UpdateFleetRequest};

use super::schema::observe;
use super::types::fleet::FleetView;
use crate::state::AppState;

/// GraphQL Mutation root: fleet create, delete and rename
pub struct MutationRoot;

#[async_graphql::Object]
impl MutationRoot {
    /// Create a fleet with a fresh id and creation timestamp.
    async fn add_fleet(
        &self,
        ctx: &Context<'_>,
        fleet_name: String,
        tracks: Option<Vec<String>>,
    ) -> async_graphql::Result<FleetView> {
        let state = ctx.data::<AppState>()?;
        let result = state
            .resolver
            .add_fleet(AddFleetRequest { fleet_name, tracks })
            .await;
        observe(state, "addFleet", result).map(FleetView::from)
    }

    /// Delete a fleet. Unknown ids succeed and are echoed back.
    async fn delete_fleet(&self, ctx: &Context<'_>, fleet_id: ID) -> async_graphql::Result<FleetView> {
        let state = ctx.data::<AppState>()?;
        let result = state
            .resolver
            .delete_fleet(DeleteFleetRequest { fleet_id: fleet_id.0 })
            .await;
        observe(state, "deleteFleet", result).map(FleetView::from)
    }

    /// Rename a fleet. `tracks` is accepted and not applied.
    async fn update_fleet(
        &self,
        ctx: &Context<'_>,
        fleet_id: ID,
        fleet_name: String,
        tracks: Option<Vec<String>>,
    ) -> async_graphql::Result<FleetView> {
        let state = ctx.data::<AppState>()?;
        let result = state
            .resolver
            .update_fleet(UpdateFleetRequest {
                fleet_id: fleet_id.0,
                fleet_name,
                tracks,
            })
            .await;
        observe(state, "updateFleet", result).map(FleetView::from)
    }
}
