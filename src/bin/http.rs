#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use office_hours::{JsonFileSource, ServerConfig, http_api, telemetry};

    telemetry::init("info");
    let config = ServerConfig::from_env()?;
    tracing::info!(
        dataset = %config.dataset_path.display(),
        lang = %config.locale,
        "starting office-hours HTTP API"
    );

    let state = http_api::AppState::new(JsonFileSource::new(config.dataset_path), config.locale);
    http_api::serve(config.addr, state).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
