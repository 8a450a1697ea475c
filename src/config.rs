use anyhow::bail;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::resources::DEFAULT_ROOT;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub elasticsearch: EsConfig,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EsConfig {
    pub url: String,
}

impl Default for EsConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9200".into(),
        }
    }
}

/// What to install on start-up. Templates go first so that indices created
/// afterwards pick them up.
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapConfig {
    /// Directory holding `<index>/_settings.json` and `_template/<name>.json`
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default)]
    pub templates: Vec<TemplateConfig>,
    #[serde(default)]
    pub indices: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TemplateConfig {
    pub name: String,
    /// Delete and recreate the template when it already exists
    #[serde(default)]
    pub force: bool,
}

fn default_root() -> PathBuf {
    PathBuf::from(DEFAULT_ROOT)
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            templates: Vec::new(),
            indices: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        // Step 1: Try loading .env file (silently ignore if not found)
        let _ = dotenvy::dotenv();

        // Step 2: Try loading TOML config as base
        let path = Path::new("config.toml");
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)?
        } else {
            Self::defaults()
        };

        // Step 3: Override with environment variables where present
        config.apply_env(|key| std::env::var(key).ok())?;

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str::<AppConfig>(content)?)
    }

    /// Overrides values from `lookup`, normally the process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("ELASTICSEARCH_URL") {
            self.elasticsearch.url = url;
        }
        if let Some(root) = lookup("ES_RESOURCE_ROOT") {
            self.bootstrap.root = PathBuf::from(root);
        }
        if let Some(indices) = lookup("ES_INDICES") {
            self.bootstrap.indices = split_list(&indices);
        }
        let force = match lookup("ES_FORCE_TEMPLATES") {
            Some(val) => Some(val.parse::<bool>()?),
            None => None,
        };
        if let Some(templates) = lookup("ES_TEMPLATES") {
            self.bootstrap.templates = split_list(&templates)
                .into_iter()
                .map(|name| TemplateConfig {
                    name,
                    force: force.unwrap_or(false),
                })
                .collect();
        } else if let Some(force) = force {
            for template in &mut self.bootstrap.templates {
                template.force = force;
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if url::Url::parse(&self.elasticsearch.url).is_err() {
            bail!(
                "Invalid Elasticsearch URL '{}'. Set ELASTICSEARCH_URL or elasticsearch.url in config.toml",
                self.elasticsearch.url
            );
        }
        if self.bootstrap.indices.iter().any(|i| i.trim().is_empty()) {
            bail!("Index names in bootstrap.indices must not be empty");
        }
        if self
            .bootstrap
            .templates
            .iter()
            .any(|t| t.name.trim().is_empty())
        {
            bail!("Template names in bootstrap.templates must not be empty");
        }
        Ok(())
    }

    fn defaults() -> Self {
        Self {
            elasticsearch: EsConfig::default(),
            bootstrap: BootstrapConfig::default(),
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn parses_a_full_config() {
        let config = AppConfig::from_toml(
            r#"
            [elasticsearch]
            url = "http://es:9200"

            [bootstrap]
            root = "resources/es"
            indices = ["twitter", "person"]

            [[bootstrap.templates]]
            name = "tweet"
            force = true

            [[bootstrap.templates]]
            name = "person"
            "#,
        )
        .unwrap();

        assert_eq!(config.elasticsearch.url, "http://es:9200");
        assert_eq!(config.bootstrap.root, PathBuf::from("resources/es"));
        assert_eq!(config.bootstrap.indices, vec!["twitter", "person"]);
        assert_eq!(
            config.bootstrap.templates,
            vec![
                TemplateConfig { name: "tweet".into(), force: true },
                TemplateConfig { name: "person".into(), force: false },
            ]
        );
        config.validate().unwrap();
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = AppConfig::from_toml("").unwrap();

        assert_eq!(config.elasticsearch.url, "http://localhost:9200");
        assert_eq!(config.bootstrap.root, PathBuf::from(DEFAULT_ROOT));
        assert!(config.bootstrap.indices.is_empty());
        assert!(config.bootstrap.templates.is_empty());
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = AppConfig::defaults();
        config
            .apply_env(env(&[
                ("ELASTICSEARCH_URL", "http://other:9200"),
                ("ES_RESOURCE_ROOT", "/etc/es"),
                ("ES_INDICES", "twitter, person,,"),
                ("ES_TEMPLATES", "tweet"),
                ("ES_FORCE_TEMPLATES", "true"),
            ]))
            .unwrap();

        assert_eq!(config.elasticsearch.url, "http://other:9200");
        assert_eq!(config.bootstrap.root, PathBuf::from("/etc/es"));
        assert_eq!(config.bootstrap.indices, vec!["twitter", "person"]);
        assert_eq!(
            config.bootstrap.templates,
            vec![TemplateConfig { name: "tweet".into(), force: true }]
        );
    }

    #[test]
    fn force_flag_applies_to_file_templates() {
        let mut config = AppConfig::from_toml(
            r#"
            [[bootstrap.templates]]
            name = "tweet"
            "#,
        )
        .unwrap();

        config
            .apply_env(env(&[("ES_FORCE_TEMPLATES", "true")]))
            .unwrap();

        assert!(config.bootstrap.templates[0].force);
    }

    #[test]
    fn rejects_bad_force_flag() {
        let mut config = AppConfig::defaults();
        assert!(config
            .apply_env(env(&[("ES_FORCE_TEMPLATES", "yes please")]))
            .is_err());
    }

    #[test]
    fn validation_catches_bad_values() {
        let mut config = AppConfig::defaults();
        config.elasticsearch.url = "localhost".into();
        assert!(config.validate().is_err());

        let mut config = AppConfig::defaults();
        config.bootstrap.indices = vec!["".into()];
        assert!(config.validate().is_err());
    }
}
