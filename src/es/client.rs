use elasticsearch::Elasticsearch;
use elasticsearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use url::Url;

use crate::config::EsConfig;
use crate::error::{BootstrapError, Result};

pub fn create_client(config: &EsConfig) -> Result<Elasticsearch> {
    let url = Url::parse(&config.url)
        .map_err(|e| BootstrapError::Config(format!("invalid Elasticsearch URL {}: {e}", config.url)))?;
    let pool = SingleNodeConnectionPool::new(url);
    let transport = TransportBuilder::new(pool)
        .disable_proxy()
        .build()
        .map_err(|e| BootstrapError::Config(format!("failed to build transport: {e}")))?;

    tracing::debug!("Elasticsearch client configured for {}", config.url);
    Ok(Elasticsearch::new(transport))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_urls() {
        let config = EsConfig {
            url: "not a url".into(),
        };
        assert!(matches!(
            create_client(&config),
            Err(BootstrapError::Config(_))
        ));
    }

    #[test]
    fn builds_a_client_without_connecting() {
        let config = EsConfig {
            url: "http://localhost:9200".into(),
        };
        assert!(create_client(&config).is_ok());
    }
}
