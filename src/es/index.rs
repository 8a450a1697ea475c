//! Creates indices from `<root>/<index>/_settings.json` and pushes
//! `<root>/<index>/_update_settings.json` to existing ones.
//!
//! Creation is guarded by an existence check so an existing index is never
//! touched. The check and the create are two separate requests: another
//! client creating the same index in between makes the create call fail.

use serde_json::Value;
use std::path::Path;

use crate::error::{BootstrapError, Result, ensure_name};
use crate::es::admin::IndicesAdmin;
use crate::resources::{self, DEFAULT_ROOT};

/// Creates `index` if missing, using settings found under the default root.
pub async fn create_index<C>(client: &C, index: &str) -> Result<()>
where
    C: IndicesAdmin + ?Sized,
{
    create_index_from(client, Path::new(DEFAULT_ROOT), index).await
}

/// Creates `index` if missing, using `<root>/<index>/_settings.json` when present.
pub async fn create_index_from<C>(client: &C, root: &Path, index: &str) -> Result<()>
where
    C: IndicesAdmin + ?Sized,
{
    ensure_name("index", index)?;
    let settings = resources::load_settings(root, index)?;
    create_index_with_settings(client, index, settings.as_ref()).await
}

/// Creates `index` if missing. `None` settings leave the cluster defaults.
pub async fn create_index_with_settings<C>(
    client: &C,
    index: &str,
    settings: Option<&Value>,
) -> Result<()>
where
    C: IndicesAdmin + ?Sized,
{
    if is_index_exist(client, index).await? {
        tracing::debug!("Index [{index}] already exists.");
        return Ok(());
    }

    tracing::debug!("Index [{index}] doesn't exist. Creating it.");
    create_in_cluster(client, index, settings).await
}

pub async fn is_index_exist<C>(client: &C, index: &str) -> Result<bool>
where
    C: IndicesAdmin + ?Sized,
{
    ensure_name("index", index)?;
    client.index_exists(index).await
}

/// Pushes `_update_settings.json` from the default root to `index`, if present.
pub async fn update_settings<C>(client: &C, index: &str) -> Result<()>
where
    C: IndicesAdmin + ?Sized,
{
    update_settings_from(client, Path::new(DEFAULT_ROOT), index).await
}

/// Pushes `<root>/<index>/_update_settings.json` to `index`, if present.
///
/// No existence check is made; updating a missing index fails on the cluster.
pub async fn update_settings_from<C>(client: &C, root: &Path, index: &str) -> Result<()>
where
    C: IndicesAdmin + ?Sized,
{
    ensure_name("index", index)?;
    let Some(settings) = resources::load_update_settings(root, index)? else {
        tracing::trace!("No update settings for index [{index}]");
        return Ok(());
    };

    tracing::trace!("Found update settings for index [{index}]: [{settings}]");
    tracing::debug!("Updating settings for index [{index}]");
    client.put_settings(index, &settings).await
}

async fn create_in_cluster<C>(client: &C, index: &str, settings: Option<&Value>) -> Result<()>
where
    C: IndicesAdmin + ?Sized,
{
    tracing::trace!("createIndex([{index}])");
    if let Some(settings) = settings {
        tracing::trace!("Found settings for index [{index}]: [{settings}]");
    }

    if !client.create_index(index, settings).await? {
        tracing::warn!("Could not create index [{index}]");
        return Err(BootstrapError::IndexNotAcknowledged(index.to_string()));
    }

    tracing::trace!("/createIndex([{index}])");
    Ok(())
}
