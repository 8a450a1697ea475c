//! The handful of index/template admin calls the updaters rely on.
//!
//! `IndicesAdmin` is implemented for the official [`Elasticsearch`] client and
//! can be implemented by stubs in tests.

use async_trait::async_trait;
use elasticsearch::Elasticsearch;
use elasticsearch::http::response::Response;
use elasticsearch::indices::{
    IndicesCreateParts, IndicesDeleteTemplateParts, IndicesExistsParts, IndicesGetTemplateParts,
    IndicesPutSettingsParts, IndicesPutTemplateParts,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{BootstrapError, Result};

#[async_trait]
pub trait IndicesAdmin: Send + Sync {
    async fn index_exists(&self, index: &str) -> Result<bool>;

    /// Creates `index`, with `settings` as its index settings when given.
    /// Returns the acknowledgment flag of the response.
    async fn create_index(&self, index: &str, settings: Option<&Value>) -> Result<bool>;

    async fn put_settings(&self, index: &str, settings: &Value) -> Result<()>;

    /// True when a template named exactly `template` exists.
    async fn template_exists(&self, template: &str) -> Result<bool>;

    /// Stores `body` as template `template`. Returns the acknowledgment flag.
    async fn put_template(&self, template: &str, body: &Value) -> Result<bool>;

    async fn delete_template(&self, template: &str) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct Acknowledged {
    #[serde(default)]
    acknowledged: bool,
}

#[async_trait]
impl IndicesAdmin for Elasticsearch {
    async fn index_exists(&self, index: &str) -> Result<bool> {
        let response = self
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            _ => Err(unexpected_status(format!("Index exists [{index}]"), response).await),
        }
    }

    async fn create_index(&self, index: &str, settings: Option<&Value>) -> Result<bool> {
        let parts = IndicesCreateParts::Index(index);
        let response = match settings {
            Some(settings) => {
                self.indices()
                    .create(parts)
                    .body(json!({ "settings": settings }))
                    .send()
                    .await?
            }
            None => self.indices().create(parts).send().await?,
        };

        acknowledged(format!("Create index [{index}]"), response).await
    }

    async fn put_settings(&self, index: &str, settings: &Value) -> Result<()> {
        let response = self
            .indices()
            .put_settings(IndicesPutSettingsParts::Index(&[index]))
            .body(settings)
            .send()
            .await?;

        if !response.status_code().is_success() {
            return Err(unexpected_status(format!("Update settings [{index}]"), response).await);
        }
        Ok(())
    }

    async fn template_exists(&self, template: &str) -> Result<bool> {
        let response = self
            .indices()
            .get_template(IndicesGetTemplateParts::Name(&[template]))
            .send()
            .await?;

        let status = response.status_code();
        if status.as_u16() == 404 {
            return Ok(false);
        }
        if !status.is_success() {
            return Err(unexpected_status(format!("Get template [{template}]"), response).await);
        }

        // The response is keyed by template name; wildcards may match others.
        let body: Value = response.json().await?;
        Ok(body.get(template).is_some())
    }

    async fn put_template(&self, template: &str, body: &Value) -> Result<bool> {
        let response = self
            .indices()
            .put_template(IndicesPutTemplateParts::Name(template))
            .body(body)
            .send()
            .await?;

        acknowledged(format!("Put template [{template}]"), response).await
    }

    async fn delete_template(&self, template: &str) -> Result<()> {
        let response = self
            .indices()
            .delete_template(IndicesDeleteTemplateParts::Name(template))
            .send()
            .await?;

        if !response.status_code().is_success() {
            return Err(
                unexpected_status(format!("Delete template [{template}]"), response).await,
            );
        }
        Ok(())
    }
}

async fn acknowledged(operation: String, response: Response) -> Result<bool> {
    if !response.status_code().is_success() {
        return Err(unexpected_status(operation, response).await);
    }
    let body: Acknowledged = response.json().await?;
    Ok(body.acknowledged)
}

async fn unexpected_status(operation: String, response: Response) -> BootstrapError {
    let status = response.status_code().as_u16();
    let details = response.text().await.unwrap_or_default();
    BootstrapError::UnexpectedStatus {
        operation,
        status,
        details,
    }
}
