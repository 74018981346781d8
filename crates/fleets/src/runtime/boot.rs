//! Boot: logging init, config load, table client, resolver creation.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::{FunctionConfig, LogFormat, LoggingConfig};
use crate::resolver::FleetResolver;
use crate::table::DynamoTable;

/// Initialise the tracing / logging subsystem.
///
/// Timestamps are left out: CloudWatch stamps every line on ingestion.
pub fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Json => {
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .with_target(false)
                .without_time();
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        LogFormat::Pretty => {
            let layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_ansi(false);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    }
}

/// Load config, connect the table client and build the resolver.
///
/// Runs once per cold start; the result is shared by every invocation.
pub async fn boot() -> Result<(Arc<FleetResolver>, FunctionConfig), lambda_runtime::Error> {
    info!("Starting fleets function v{}", env!("CARGO_PKG_VERSION"));

    let config = FunctionConfig::load()?;
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    info!("Backing table: {}", config.table.table_name);
    match &config.appsync_url {
        Some(url) => info!("Gateway endpoint: {}", url),
        None => info!("Gateway endpoint not configured"),
    }

    let table = DynamoTable::connect(&config.table).await;
    let resolver = Arc::new(FleetResolver::new(Arc::new(table)));
    info!("Resolver ready");

    Ok((resolver, config))
}
