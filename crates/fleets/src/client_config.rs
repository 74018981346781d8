//! Client config: turn deployment stack outputs into the web client's config file.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const DEFAULT_OUTPUTS_PATH: &str = "cdk.outputs";
pub const DEFAULT_CONFIG_PATH: &str = "website/src/config.json";
pub const DEFAULT_STACK_NAME: &str = "CdkDeepRacerEventManagerStack";

/// Prefix of the REST endpoint output; the deploy tool appends a hash.
pub const API_ENDPOINT_PREFIX: &str = "apiGatewayEndpoint";
const API_ENDPOINT_NAME: &str = "models";

#[derive(Debug, Error)]
pub enum ClientConfigError {
    #[error("Stack not found in outputs: {0}")]
    MissingStack(String),

    #[error("Missing stack output: {0}")]
    MissingOutput(String),

    #[error("No output key starts with {}", API_ENDPOINT_PREFIX)]
    NoApiEndpoint,

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(rename = "Auth")]
    pub auth: AuthConfig,
    #[serde(rename = "Storage")]
    pub storage: StorageConfig,
    #[serde(rename = "API")]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    pub region: String,
    pub user_pool_id: String,
    pub user_pool_web_client_id: String,
    pub identity_pool_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    pub region: String,
    pub bucket: String,
    pub identity_pool_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub endpoints: Vec<ApiEndpoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEndpoint {
    pub name: String,
    pub endpoint: String,
    pub region: String,
}

impl ClientConfig {
    /// Build from the outputs document, reading the section named `stack`.
    pub fn from_outputs(json: &str, stack: &str) -> Result<Self, ClientConfigError> {
        let document: Value = serde_json::from_str(json)?;
        let outputs = document
            .get(stack)
            .and_then(Value::as_object)
            .ok_or_else(|| ClientConfigError::MissingStack(stack.to_string()))?;

        let region = output(outputs, "region")?;
        let identity_pool_id = output(outputs, "identityPoolId")?;

        // Several matches can exist after redeploys; the last in the document wins.
        let endpoint = outputs
            .iter()
            .filter(|(key, _)| key.starts_with(API_ENDPOINT_PREFIX))
            .filter_map(|(_, value)| value.as_str())
            .last()
            .ok_or(ClientConfigError::NoApiEndpoint)?
            .to_string();

        Ok(Self {
            auth: AuthConfig {
                region: region.clone(),
                user_pool_id: output(outputs, "userPoolId")?,
                user_pool_web_client_id: output(outputs, "userPoolWebClientId")?,
                identity_pool_id: identity_pool_id.clone(),
            },
            storage: StorageConfig {
                region: region.clone(),
                bucket: output(outputs, "modelsBucketName")?,
                identity_pool_id,
            },
            api: ApiConfig {
                endpoints: vec![ApiEndpoint {
                    name: API_ENDPOINT_NAME.to_string(),
                    endpoint,
                    region,
                }],
            },
        })
    }

    /// Render with 4-space indentation.
    pub fn to_pretty_json(&self) -> Result<String, ClientConfigError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        // serde_json only ever writes UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

fn output(outputs: &Map<String, Value>, key: &str) -> Result<String, ClientConfigError> {
    outputs
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ClientConfigError::MissingOutput(key.to_string()))
}
