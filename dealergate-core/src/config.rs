//! Configuration types for DealerGate

use crate::error::{Error, Result};
use crate::redirect::RedirectTarget;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Guard configuration shared by the page guards and the server layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Where redirect guards send denied users
    pub default_redirect: RedirectTarget,
    /// Log every grant and denial
    pub audit_enabled: bool,
    /// Markup rendered while the session is resolving
    pub loading_placeholder: String,
    /// Request headers carrying the resolved principal
    pub headers: HeaderConfig,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            default_redirect: RedirectTarget::default(),
            audit_enabled: true,
            loading_placeholder: DEFAULT_LOADING_PLACEHOLDER.to_string(),
            headers: HeaderConfig::default(),
        }
    }
}

/// Default spinner markup
pub const DEFAULT_LOADING_PLACEHOLDER: &str =
    r#"<div class="spinner" role="status" aria-label="Loading"></div>"#;

/// Names of the headers set by the upstream session layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub role_header: String,
    pub dealer_header: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            role_header: "x-dealergate-role".to_string(),
            dealer_header: "x-dealergate-dealer-id".to_string(),
        }
    }
}

impl GuardConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: GuardConfig = serde_json::from_str(&content)
            .map_err(|e| Error::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Configuration for local development
    pub fn development() -> Self {
        Self {
            audit_enabled: false, // Noisy during development
            ..Self::default()
        }
    }

    /// Configuration template for production deployments
    pub fn production_template() -> Self {
        Self {
            default_redirect: RedirectTarget::default(),
            audit_enabled: true,
            loading_placeholder: DEFAULT_LOADING_PLACEHOLDER.to_string(),
            headers: HeaderConfig {
                role_header: "x-portal-role".to_string(),
                dealer_header: "x-portal-dealer-id".to_string(),
            },
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (field, name) in [
            ("role_header", &self.headers.role_header),
            ("dealer_header", &self.headers.dealer_header),
        ] {
            if !is_header_name(name) {
                return Err(Error::Configuration(format!(
                    "{} '{}' is not a valid lowercase header name",
                    field, name
                )));
            }
        }

        if self.headers.role_header == self.headers.dealer_header {
            return Err(Error::Configuration(
                "role_header and dealer_header must differ".to_string(),
            ));
        }

        Ok(())
    }
}

fn is_header_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_file_operations() {
        let config = GuardConfig::production_template();
        let temp_file = NamedTempFile::new().unwrap();

        config.to_file(temp_file.path()).unwrap();
        let loaded = GuardConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: GuardConfig =
            serde_json::from_str(r#"{"default_redirect": "/claims"}"#).unwrap();
        assert_eq!(config.default_redirect.as_str(), "/claims");
        assert!(config.audit_enabled);
        assert_eq!(config.headers, HeaderConfig::default());
    }

    #[test]
    fn test_invalid_redirect_is_rejected_on_load() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(
            temp_file.path(),
            r#"{"default_redirect": "https://evil.example"}"#,
        )
        .unwrap();

        let err = GuardConfig::from_file(temp_file.path()).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_config_validation() {
        let mut config = GuardConfig::default();
        assert!(config.validate().is_ok());

        config.headers.dealer_header = config.headers.role_header.clone();
        assert!(config.validate().is_err());

        config.headers.dealer_header = "X-Dealer".to_string();
        assert!(config.validate().is_err());

        config.headers.dealer_header = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = GuardConfig::from_file("/nonexistent/dealergate.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
