//! Model: FunctionConfig and related structs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionConfig {
    pub table: TableConfig,
    /// GraphQL endpoint of the gateway that invokes this function.
    pub appsync_url: Option<String>,
}

/// Where fleet records live. Shared with the local gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub table_name: String,
    /// Explicit region; otherwise the SDK chain, then `eu-west-1`.
    pub region: Option<String>,
    /// Endpoint override, e.g. DynamoDB Local.
    pub endpoint_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(format!("unknown log format '{}' (expected json or pretty)", other)),
        }
    }
}

impl TableConfig {
    /// Validate table settings
    pub fn validate(&self) -> Result<(), String> {
        if self.table_name.trim().is_empty() {
            return Err("table_name must not be empty (set DDB_TABLE)".to_string());
        }
        if let Some(region) = &self.region {
            if region.trim().is_empty() {
                return Err("region must not be empty when set".to_string());
            }
        }
        if let Some(endpoint) = &self.endpoint_url {
            validate_url(endpoint, "endpoint_url")?;
        }
        Ok(())
    }
}

impl FunctionConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        self.table.validate()?;
        if let Some(url) = &self.appsync_url {
            validate_url(url, "appsync_url")?;
        }
        Ok(())
    }
}

fn validate_url(url: &str, name: &str) -> Result<(), String> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(format!("{} must be an http(s) URL, got '{}'", name, url))
    }
}
