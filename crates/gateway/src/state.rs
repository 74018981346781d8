use crate::config::{GatewayConfig, StoreBackend};
use crate::metrics::OperationMetrics;
use fleets::resolver::FleetResolver;
use fleets::table::{DynamoTable, FleetTable, MemoryTable};
use std::sync::Arc;
use tracing::info;

/// Shared application state (thread-safe)
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub resolver: Arc<FleetResolver>,
    pub metrics: Arc<OperationMetrics>,
}

impl AppState {
    pub fn new(config: GatewayConfig, table: Arc<dyn FleetTable>) -> Self {
        Self {
            config: Arc::new(config),
            resolver: Arc::new(FleetResolver::new(table)),
            metrics: Arc::new(OperationMetrics::new()),
        }
    }

    /// Build the table selected by `store.backend` and wrap it in state.
    pub async fn connect(config: GatewayConfig) -> Self {
        info!("Initializing {} store...", config.store.backend.as_str());

        let table: Arc<dyn FleetTable> = match config.store.backend {
            StoreBackend::Memory => Arc::new(MemoryTable::new()),
            StoreBackend::Dynamodb => {
                let table = DynamoTable::connect(&config.store.dynamodb).await;
                info!("✓ Using DynamoDB table {}", table.table_name());
                Arc::new(table)
            }
        };

        Self::new(config, table)
    }
}
