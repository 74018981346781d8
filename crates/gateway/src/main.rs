mod config;
mod error;
mod graphql;
mod metrics;
mod state;

use anyhow::{Context, Result};
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{
    config::{GatewayConfig, LogFormat, LogOutput, StoreBackend},
    graphql::build_schema,
    state::AppState,
};

// Combined state for axum router
#[derive(Clone)]
struct RouterState {
    app_state: AppState,
    schema: graphql::FleetSchema,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Phase 1: thread-local subscriber for config loading, replaced in phase 2
    let basic_tracing = init_tracing_basic();

    info!("Starting fleet gateway v{}", env!("CARGO_PKG_VERSION"));

    let config = GatewayConfig::load().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    // Phase 2: global subscriber from config (format, level, output)
    drop(basic_tracing);
    init_tracing_from_config(&config)?;

    info!("Configuration loaded successfully");
    info!("Server will bind to: {}", config.server.bind_address);

    let addr: SocketAddr = config
        .server
        .bind_address
        .parse()
        .context("Invalid bind address")?;
    let enable_graphiql = config.graphql.enable_graphiql;

    let state = AppState::connect(config).await;
    let schema = build_schema(state.clone());
    info!("GraphQL schema built successfully");

    let app = build_router(RouterState {
        app_state: state,
        schema,
    });

    info!("Starting HTTP server...");
    info!("  - GraphQL endpoint: http://{}/graphql", addr);
    if enable_graphiql {
        info!("  - GraphiQL playground: http://{}/graphiql", addr);
    }
    info!("  - Health check: http://{}/health", addr);
    info!("  - Readiness check: http://{}/ready", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    info!("✓ Fleet gateway is ready!");
    info!("Listening on: http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down gracefully");
    Ok(())
}

/// Build the application router
fn build_router(state: RouterState) -> Router {
    let server = &state.app_state.config.server;

    let cors = if server.enable_cors {
        let origins = server
            .cors_origins
            .iter()
            .filter_map(|s| s.parse::<axum::http::HeaderValue>().ok())
            .collect::<Vec<_>>();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true)
    } else {
        // Same-origin only
        CorsLayer::new()
    };

    let request_timeout = Duration::from_secs(server.request_timeout_secs);

    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(readiness_handler))
        .route("/metrics", get(metrics_handler))
        .route("/graphql", post(graphql_handler).get(graphql_playground))
        .route("/graphiql", get(graphql_playground))
        .route("/", get(root_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout))
                // Fleet payloads are small; 1MB is plenty
                .layer(DefaultBodyLimit::max(1024 * 1024))
                .layer(cors),
        )
        .with_state(state)
}

/// Root handler - shows API info
async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "Fleet Gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "graphql": "/graphql",
            "graphiql": "/graphiql",
            "health": "/health",
            "ready": "/ready",
            "metrics": "/metrics"
        }
    }))
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

/// Readiness check handler
async fn readiness_handler(State(state): State<RouterState>) -> impl IntoResponse {
    let store = &state.app_state.config.store;
    let table = match store.backend {
        StoreBackend::Memory => None,
        StoreBackend::Dynamodb => Some(store.dynamodb.table_name.clone()),
    };

    (
        StatusCode::OK,
        Json(json!({
            "ready": true,
            "store": {
                "backend": store.backend.as_str(),
                "table": table
            }
        })),
    )
}

/// Metrics endpoint
async fn metrics_handler(State(state): State<RouterState>) -> impl IntoResponse {
    let metrics = &state.app_state.metrics;

    Json(json!({
        "operations": {
            "total": metrics.total_calls(),
            "failed": metrics.total_failures(),
            "by_operation": metrics.by_operation()
        }
    }))
}

/// GraphQL handler
async fn graphql_handler(State(state): State<RouterState>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

/// GraphQL playground (GraphiQL)
async fn graphql_playground(State(state): State<RouterState>) -> impl IntoResponse {
    if !state.app_state.config.graphql.enable_graphiql {
        return (StatusCode::NOT_FOUND, Html("GraphiQL is disabled".to_string()));
    }

    (
        StatusCode::OK,
        Html(GraphiQLSource::build().endpoint("/graphql").title("Fleet Gateway").finish()),
    )
}

/// Phase 1: Basic tracing init so we can log during config loading.
fn init_tracing_basic() -> tracing::subscriber::DefaultGuard {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gateway=debug"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_default(subscriber)
}

/// Phase 2: Re-initialize tracing with configuration values.
fn init_tracing_from_config(config: &GatewayConfig) -> Result<()> {
    use std::sync::Arc;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Prefer RUST_LOG env var, fall back to config level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match (&config.logging.format, &config.logging.output) {
        (LogFormat::Json, LogOutput::Stdout) => {
            let layer = fmt::layer().json().with_target(true).with_current_span(true);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        (LogFormat::Json, LogOutput::File { path }) => {
            let file = open_log_file(path)?;
            let layer = fmt::layer()
                .json()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Arc::new(file));
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        (LogFormat::Pretty, LogOutput::Stdout) => {
            let layer = fmt::layer()
                .with_target(true)
                .with_file(false)
                .with_line_number(false);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        (LogFormat::Pretty, LogOutput::File { path }) => {
            let file = open_log_file(path)?;
            let layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Arc::new(file));
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    }
    Ok(())
}

fn open_log_file(path: &str) -> Result<std::fs::File> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file '{}'", path))
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
