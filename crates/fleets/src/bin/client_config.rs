//! Generate the web client's config file from deployment stack outputs.
//!
//! Usage: `client_config [OUTPUTS_PATH] [CONFIG_PATH]`
//! The stack section defaults to `CdkDeepRacerEventManagerStack`; override with `CDK_STACK_NAME`.

use std::path::Path;

use anyhow::{Context, Result};
use fleets::client_config::{
    ClientConfig, DEFAULT_CONFIG_PATH, DEFAULT_OUTPUTS_PATH, DEFAULT_STACK_NAME,
};
use tracing::info;

fn main() -> Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let outputs_path = args.next().unwrap_or_else(|| DEFAULT_OUTPUTS_PATH.to_string());
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let stack = std::env::var("CDK_STACK_NAME").unwrap_or_else(|_| DEFAULT_STACK_NAME.to_string());

    let rendered = generate(Path::new(&outputs_path), Path::new(&config_path), &stack)?;
    println!("{}", rendered);
    Ok(())
}

/// Read `outputs_path`, write the rendered config to `config_path` and return it.
fn generate(outputs_path: &Path, config_path: &Path, stack: &str) -> Result<String> {
    info!(outputs = %outputs_path.display(), stack, "reading stack outputs");
    let outputs = std::fs::read_to_string(outputs_path)
        .with_context(|| format!("Failed to read {}", outputs_path.display()))?;

    let rendered = ClientConfig::from_outputs(&outputs, stack)
        .and_then(|config| config.to_pretty_json())
        .with_context(|| format!("Failed to build client config from {}", outputs_path.display()))?;

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(config_path, &rendered)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    info!(path = %config_path.display(), "client config written");
    Ok(rendered)
}

/// Logs go to stderr so stdout carries only the rendered document.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTPUTS: &str = r#"{
        "CdkDeepRacerEventManagerStack": {
            "region": "eu-west-1",
            "userPoolId": "pool",
            "userPoolWebClientId": "client",
            "identityPoolId": "identity",
            "modelsBucketName": "bucket",
            "apiGatewayEndpointABC": "https://api.example.com/prod/"
        }
    }"#;

    #[test]
    fn test_generate_writes_nested_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let outputs_path = dir.path().join("cdk.outputs");
        std::fs::write(&outputs_path, OUTPUTS).unwrap();
        let config_path = dir.path().join("website/src/config.json");

        let rendered = generate(&outputs_path, &config_path, DEFAULT_STACK_NAME).unwrap();
        assert_eq!(std::fs::read_to_string(&config_path).unwrap(), rendered);
        assert!(rendered.contains("\"bucket\": \"bucket\""));
    }

    #[test]
    fn test_errors_name_the_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.outputs");
        let err = generate(&missing, &dir.path().join("config.json"), DEFAULT_STACK_NAME).unwrap_err();
        assert!(err.to_string().contains("absent.outputs"), "{}", err);

        let outputs_path = dir.path().join("cdk.outputs");
        std::fs::write(&outputs_path, OUTPUTS).unwrap();
        let err = generate(&outputs_path, &dir.path().join("config.json"), "OtherStack").unwrap_err();
        assert!(err.to_string().contains("cdk.outputs"), "{}", err);
        assert!(format!("{:#}", err).contains("OtherStack"), "{:#}", err);
    }
}
