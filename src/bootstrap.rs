use crate::config::BootstrapConfig;
use crate::error::Result;
use crate::es::admin::IndicesAdmin;
use crate::es::{index, template};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub templates: usize,
    pub indices: usize,
}

/// Installs every configured template, then creates every configured index
/// and pushes its update settings. Stops at the first failure.
pub async fn run<C>(client: &C, config: &BootstrapConfig) -> Result<BootstrapReport>
where
    C: IndicesAdmin + ?Sized,
{
    let mut report = BootstrapReport::default();
    let root = config.root.as_path();

    for tpl in &config.templates {
        template::create_template_from(client, root, &tpl.name, tpl.force).await?;
        report.templates += 1;
    }

    for name in &config.indices {
        index::create_index_from(client, root, name).await?;
        index::update_settings_from(client, root, name).await?;
        report.indices += 1;
    }

    tracing::debug!(
        templates = report.templates,
        indices = report.indices,
        "Bootstrap finished"
    );
    Ok(report)
}
