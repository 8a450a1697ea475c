use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BootstrapError>;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Elasticsearch error: {0}")]
    Elasticsearch(#[from] elasticsearch::Error),

    #[error("{operation} failed (status {status}): {details}")]
    UnexpectedStatus {
        operation: String,
        status: u16,
        details: String,
    },

    #[error("index creation not acknowledged: [{0}]")]
    IndexNotAcknowledged(String),

    #[error("template creation not acknowledged: [{0}]")]
    TemplateNotAcknowledged(String),

    #[error("No template body for [{template}] at {}", .path.display())]
    TemplateNotFound { template: String, path: PathBuf },

    #[error("Invalid JSON in {}: {source}", .path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BootstrapError {
    /// True when the cluster answered but refused to acknowledge a creation.
    pub fn is_not_acknowledged(&self) -> bool {
        matches!(
            self,
            Self::IndexNotAcknowledged(_) | Self::TemplateNotAcknowledged(_)
        )
    }
}

/// Rejects empty index or template names before anything reaches the cluster.
pub(crate) fn ensure_name(kind: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(BootstrapError::Validation(format!(
            "{kind} name must not be empty"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_acknowledged_messages_carry_the_name() {
        let err = BootstrapError::IndexNotAcknowledged("twitter".into());
        assert_eq!(err.to_string(), "index creation not acknowledged: [twitter]");
        assert!(err.is_not_acknowledged());

        let err = BootstrapError::TemplateNotAcknowledged("tweet".into());
        assert_eq!(err.to_string(), "template creation not acknowledged: [tweet]");
        assert!(err.is_not_acknowledged());
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(ensure_name("index", "twitter").is_ok());
        assert!(matches!(
            ensure_name("index", "  "),
            Err(BootstrapError::Validation(_))
        ));
    }
}
