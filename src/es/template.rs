//! Installs index templates from `<root>/_template/<template>.json`.
//!
//! Without `force` an existing template is kept as is. With `force` it is
//! deleted and recreated, even when the body did not change. Between the
//! delete and the put the template is briefly absent from the cluster.

use serde_json::Value;
use std::path::Path;

use crate::error::{BootstrapError, Result, ensure_name};
use crate::es::admin::IndicesAdmin;
use crate::resources::{self, DEFAULT_ROOT};

pub async fn create_template<C>(client: &C, template: &str, force: bool) -> Result<()>
where
    C: IndicesAdmin + ?Sized,
{
    create_template_from(client, Path::new(DEFAULT_ROOT), template, force).await
}

/// Reads `<root>/_template/<template>.json` and installs it.
///
/// A missing file only fails when the template would have to be created,
/// i.e. it is absent from the cluster or `force` is set.
pub async fn create_template_from<C>(
    client: &C,
    root: &Path,
    template: &str,
    force: bool,
) -> Result<()>
where
    C: IndicesAdmin + ?Sized,
{
    ensure_name("template", template)?;
    let loaded = resources::load_template(root, template)?;
    let json = loaded
        .as_ref()
        .ok_or_else(|| BootstrapError::TemplateNotFound {
            template: template.to_string(),
            path: resources::template_path(root, template),
        });
    apply_template(client, template, json, force).await
}

pub async fn create_template_with_json<C>(
    client: &C,
    template: &str,
    json: &Value,
    force: bool,
) -> Result<()>
where
    C: IndicesAdmin + ?Sized,
{
    apply_template(client, template, Ok(json), force).await
}

/// `json` is the resolved body, or the error to raise if one turns out to be needed.
async fn apply_template<C>(
    client: &C,
    template: &str,
    json: Result<&Value>,
    force: bool,
) -> Result<()>
where
    C: IndicesAdmin + ?Sized,
{
    let exists = is_template_exist(client, template).await?;
    if exists && !force {
        tracing::debug!("Template [{template}] already exists.");
        return Ok(());
    }

    // Checked before removing so a forced replace never leaves the template deleted.
    let json = json?;

    if exists {
        tracing::debug!("Template [{template}] already exists. Force is set. Removing it.");
        remove_template(client, template).await?;
    }

    if !is_template_exist(client, template).await? {
        tracing::debug!("Template [{template}] doesn't exist. Creating it.");
        create_in_cluster(client, template, json).await?;
    }

    Ok(())
}

pub async fn is_template_exist<C>(client: &C, template: &str) -> Result<bool>
where
    C: IndicesAdmin + ?Sized,
{
    ensure_name("template", template)?;
    client.template_exists(template).await
}

pub async fn remove_template<C>(client: &C, template: &str) -> Result<()>
where
    C: IndicesAdmin + ?Sized,
{
    ensure_name("template", template)?;
    tracing::trace!("removeTemplate({template})");
    client.delete_template(template).await?;
    tracing::trace!("/removeTemplate({template})");
    Ok(())
}

async fn create_in_cluster<C>(client: &C, template: &str, json: &Value) -> Result<()>
where
    C: IndicesAdmin + ?Sized,
{
    tracing::trace!("createTemplate([{template}])");

    if !client.put_template(template, json).await? {
        tracing::warn!("Could not create template [{template}]");
        return Err(BootstrapError::TemplateNotAcknowledged(template.to_string()));
    }

    tracing::trace!("/createTemplate([{template}])");
    Ok(())
}
