//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ClientConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ClientConfig, ConfigError> {
    let config: ClientConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let config = parse_config(
            r#"
            [client]
            endpoint = "http://localhost:9000/api/v1/"

            [observability]
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.client.endpoint, "http://localhost:9000/api/v1/");
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[client\nendpoint = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_errors_joined() {
        let err = parse_config(
            r#"
            [client]
            endpoint = "ftp://example.com/"

            [observability]
            log_level = "loud"
            "#,
        )
        .unwrap_err();

        let ConfigError::Validation(errors) = &err else {
            panic!("expected validation error, got {err}");
        };
        assert_eq!(errors.len(), 2);
        assert!(err.to_string().starts_with("Validation failed: "));
        assert!(err.to_string().contains(", "));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/cu-wallet.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
