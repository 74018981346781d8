use async_graphql::{Context, EmptySubscription, Schema};
use fleets::resolver::ResolverResult;

use super::mutations::MutationRoot;
use super::types::fleet::FleetView;
use crate::error::ApiError;
use crate::state::AppState;

pub type FleetSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Record the call against `operation` and turn resolver errors into GraphQL errors.
pub(crate) fn observe<T>(
    state: &AppState,
    operation: &str,
    result: ResolverResult<T>,
) -> async_graphql::Result<T> {
    state.metrics.record(operation, result.is_ok());
    result.map_err(|e| ApiError::from(e).extend())
}

/// Root Query type
pub struct QueryRoot;

#[async_graphql::Object]
impl QueryRoot {
    /// Health check query
    async fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now(),
        }
    }

    /// Version information
    async fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    /// Every stored fleet, unfiltered.
    async fn get_all_fleets(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<FleetView>> {
        let state = ctx.data::<AppState>()?;
        let fleets = observe(state, "getAllFleets", state.resolver.get_all_fleets().await)?;
        Ok(fleets.into_iter().map(FleetView::from).collect())
    }
}

/// Health status type
#[derive(async_graphql::SimpleObject)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Build the GraphQL schema
pub fn build_schema(state: AppState) -> FleetSchema {
    let max_depth = state.config.graphql.max_depth;
    let max_complexity = state.config.graphql.max_complexity;

    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .limit_depth(max_depth)
        .limit_complexity(max_complexity)
        .finish()
}
