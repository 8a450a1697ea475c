//! Bootstraps Elasticsearch indices and index templates from JSON files.
//!
//! Settings and templates live under a resource root (`es/` by default):
//! `<root>/<index>/_settings.json`, `<root>/<index>/_update_settings.json`
//! and `<root>/_template/<template>.json`. Every operation takes the cluster
//! client as an explicit [`IndicesAdmin`] argument.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod es;
pub mod resources;

pub use bootstrap::{BootstrapReport, run};
pub use config::{AppConfig, BootstrapConfig, EsConfig, TemplateConfig};
pub use error::{BootstrapError, Result};
pub use es::admin::IndicesAdmin;
pub use es::client::create_client;
pub use es::index::{
    create_index, create_index_from, create_index_with_settings, is_index_exist, update_settings,
    update_settings_from,
};
pub use es::template::{
    create_template, create_template_from, create_template_with_json, is_template_exist,
    remove_template,
};
