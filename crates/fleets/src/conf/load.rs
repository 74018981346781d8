//! Load: config loading from file and environment variables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::model::{FunctionConfig, LoggingConfig};

pub type LoadError = Box<dyn std::error::Error + Send + Sync>;

impl FunctionConfig {
    /// Load configuration from file and environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, LoadError> {
        let mut config = match std::env::var("FLEETS_CONFIG_FILE") {
            Ok(path) if Path::new(&path).exists() => {
                tracing::info!("Loading configuration from: {}", path);
                Self::from_file(&path)?
            }
            Ok(path) => {
                tracing::warn!("Config file not found at {}, using environment variables", path);
                Self::default()
            }
            Err(_) => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, LoadError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: FunctionConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Overlay environment variables onto the current values.
    ///
    /// `lookup` stands in for `std::env::var` so tests don't touch the process env.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(table) = lookup("DDB_TABLE") {
            self.table.table_name = table;
        }
        if let Some(region) = lookup("AWS_REGION") {
            self.table.region = Some(region);
        }
        if let Some(endpoint) = lookup("DDB_ENDPOINT_URL") {
            self.table.endpoint_url = Some(endpoint);
        }
        if let Some(url) = lookup("APPSYNC_URL") {
            self.appsync_url = Some(url);
        }
    }
}

impl LoggingConfig {
    /// Load logging configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            level: std::env::var("LOG_LEVEL").unwrap_or(defaults.level),
            format: std::env::var("FLEETS_LOG_FORMAT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.format),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_apply_env_sets_table_and_gateway() {
        let mut config = FunctionConfig::default();
        config.apply_env(lookup_from(&[
            ("DDB_TABLE", "fleets-prod"),
            ("APPSYNC_URL", "https://api.example.com/graphql"),
        ]));

        assert_eq!(config.table.table_name, "fleets-prod");
        assert_eq!(config.appsync_url.as_deref(), Some("https://api.example.com/graphql"));
        assert!(config.table.region.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            appsync_url = "https://file.example.com/graphql"

            [table]
            table_name = "from-file"
            region = "us-east-1"
            "#
        )
        .unwrap();

        let mut config = FunctionConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.table.table_name, "from-file");

        config.apply_env(lookup_from(&[
            ("DDB_TABLE", "from-env"),
            ("DDB_ENDPOINT_URL", "http://localhost:8000"),
        ]));

        assert_eq!(config.table.table_name, "from-env");
        assert_eq!(config.table.region.as_deref(), Some("us-east-1"));
        assert_eq!(config.table.endpoint_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.appsync_url.as_deref(), Some("https://file.example.com/graphql"));
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "table = 12").unwrap();
        assert!(FunctionConfig::from_file(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_missing_table_fails_validation() {
        let mut config = FunctionConfig::default();
        config.apply_env(lookup_from(&[("AWS_REGION", "eu-west-1")]));
        assert!(config.validate().is_err());
    }
}
