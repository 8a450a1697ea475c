//! Locates index settings and template bodies under a resource root.
//!
//! Layout, relative to the root:
//!
//! ```text
//! <root>/<index>/_settings.json          settings used when creating <index>
//! <root>/<index>/_update_settings.json   settings pushed to an existing <index>
//! <root>/_template/<template>.json       body of the <template> index template
//! ```
//!
//! A missing file is not an error here: readers return `Ok(None)`.

use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{BootstrapError, Result};

pub const DEFAULT_ROOT: &str = "es";
pub const TEMPLATE_DIR: &str = "_template";
pub const SETTINGS_FILE: &str = "_settings.json";
pub const UPDATE_SETTINGS_FILE: &str = "_update_settings.json";
pub(crate) const JSON_EXTENSION: &str = "json";

pub fn settings_path(root: &Path, index: &str) -> PathBuf {
    root.join(index).join(SETTINGS_FILE)
}

pub fn update_settings_path(root: &Path, index: &str) -> PathBuf {
    root.join(index).join(UPDATE_SETTINGS_FILE)
}

pub fn template_path(root: &Path, template: &str) -> PathBuf {
    root.join(TEMPLATE_DIR).join(format!("{template}.{JSON_EXTENSION}"))
}

pub fn read_settings(root: &Path, index: &str) -> Result<Option<String>> {
    read_file(&settings_path(root, index))
}

pub fn read_update_settings(root: &Path, index: &str) -> Result<Option<String>> {
    read_file(&update_settings_path(root, index))
}

pub fn read_template(root: &Path, template: &str) -> Result<Option<String>> {
    read_file(&template_path(root, template))
}

/// Reads a resource file, mapping "not found" to `None`.
pub(crate) fn read_file(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            tracing::trace!("Read {} bytes from {}", content.len(), path.display());
            Ok(Some(content))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::trace!("No resource at {}", path.display());
            Ok(None)
        }
        Err(source) => Err(BootstrapError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parses resource content into JSON. Blank content counts as no payload.
pub fn parse_payload(path: &Path, content: Option<String>) -> Result<Option<Value>> {
    let Some(content) = content else {
        return Ok(None);
    };
    if content.trim().is_empty() {
        tracing::debug!("{} is empty, ignoring it", path.display());
        return Ok(None);
    }
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| BootstrapError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })
}

pub(crate) fn load_settings(root: &Path, index: &str) -> Result<Option<Value>> {
    parse_payload(&settings_path(root, index), read_settings(root, index)?)
}

pub(crate) fn load_update_settings(root: &Path, index: &str) -> Result<Option<Value>> {
    parse_payload(
        &update_settings_path(root, index),
        read_update_settings(root, index)?,
    )
}

pub(crate) fn load_template(root: &Path, template: &str) -> Result<Option<Value>> {
    parse_payload(&template_path(root, template), read_template(root, template)?)
}
