use fleets::conf::LoggingConfig;
use fleets::runtime::{boot, serve};

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    boot::init_logging(&LoggingConfig::from_env());
    let (resolver, _config) = boot::boot().await?;
    serve::serve(resolver).await
}
