use es_bootstrap::{AppConfig, create_client};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("es_bootstrap=info".parse()?),
        )
        .init();

    tracing::info!("Starting es-bootstrap...");

    // Load configuration (env vars override TOML)
    let config = AppConfig::load()?;
    tracing::info!("Elasticsearch URL: {}", config.elasticsearch.url);
    tracing::info!("Resource root: {}", config.bootstrap.root.display());

    let client = create_client(&config.elasticsearch)?;

    let report = match es_bootstrap::run(&client, &config.bootstrap).await {
        Ok(report) => report,
        Err(e) if e.is_not_acknowledged() => {
            tracing::error!("Cluster refused the change, check its logs and rerun: {e}");
            return Err(e.into());
        }
        Err(e) => {
            tracing::error!("Bootstrap failed: {e}");
            return Err(e.into());
        }
    };
    tracing::info!(
        "Bootstrap complete: {} template(s), {} index(es)",
        report.templates,
        report.indices
    );

    Ok(())
}
