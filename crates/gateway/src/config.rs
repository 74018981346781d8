use anyhow::{Context, Result};
use fleets::conf::TableConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
    pub graphql: GraphQLConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub request_timeout_secs: u64,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

/// Which table implementation backs the resolver.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    #[serde(default)]
    pub dynamodb: TableConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Dynamodb,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Dynamodb => "dynamodb",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub output: LogOutput,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    Stdout,
    File { path: String },
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GraphQLConfig {
    pub enable_graphiql: bool,
    pub max_depth: usize,
    pub max_complexity: usize,
}

impl GatewayConfig {
    /// Load configuration from gateway.toml and environment variables
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = config::Config::try_from(&GatewayConfig::default())
            .context("Failed to serialize default configuration")?;

        let mut builder = config::Config::builder().add_source(defaults);

        // 1. config/gateway.toml (local development)
        // 2. crates/gateway/config/gateway.toml (workspace root)
        for path in ["config/gateway", "crates/gateway/config/gateway"] {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        // Nested keys use a double underscore: GATEWAY_STORE__BACKEND=dynamodb
        builder = builder.add_source(
            config::Environment::with_prefix("GATEWAY")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.server
            .bind_address
            .parse::<std::net::SocketAddr>()
            .context("Invalid bind_address")?;

        if self.server.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.store.backend == StoreBackend::Dynamodb {
            self.store
                .dynamodb
                .validate()
                .map_err(anyhow::Error::msg)
                .context("Invalid store.dynamodb settings")?;
        }

        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_address: "0.0.0.0:8080".to_string(),
                request_timeout_secs: 30,
                enable_cors: true,
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                dynamodb: TableConfig::default(),
            },
            logging: LoggingConfig {
                level: "info,gateway=debug,fleets=debug".to_string(),
                format: LogFormat::Pretty,
                output: LogOutput::Stdout,
            },
            graphql: GraphQLConfig {
                enable_graphiql: true,
                max_depth: 10,
                max_complexity: 200,
            },
        }
    }
}
