//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::CoreConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[source] toml::de::Error),

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

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<CoreConfig, ConfigError> {
    let config: CoreConfig = toml::from_str(content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<CoreConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = parse_config(&content)?;

    tracing::info!(
        path = %path.display(),
        environment = %config.ledger.environment,
        rpc_url = %config.ledger.rpc_url,
        "Configuration loaded"
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
        [ledger]
        rpc_url = "https://api.mainnet-beta.solana.com"
        environment = "mainnet-beta"
        tree_address = "BGUMAp9Gq7iTEuizy4pqaxsTyUCBK68MDfK752saRPUY"
        collection_address = "11111111111111111111111111111111"

        [leaf_resolution]
        max_retries = 5
        delay_ms = 250
    "#;

    #[test]
    fn test_parse_valid_config() {
        let config = parse_config(VALID).unwrap();
        assert_eq!(config.ledger.environment, "mainnet-beta");
        assert_eq!(config.leaf_resolution.max_retries, 5);
        assert_eq!(config.leaf_resolution.delay_ms, 250);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[ledger\nrpc_url = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_lists_fields() {
        let err = parse_config("[submission]\nmax_attempts = 0\n").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Validation failed: "));
        assert!(message.contains("submission.max_attempts"));
        assert!(message.contains("ledger.tree_address"));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("cnft-config-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, VALID).unwrap();
        let config = load_config(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.ledger.rpc_url, "https://api.mainnet-beta.solana.com");
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/cnft.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_error_keeps_source() {
        let err = load_config(Path::new("/nonexistent/cnft.toml")).unwrap_err();
        assert!(err.to_string().starts_with("IO error: "));
        assert!(std::error::Error::source(&err).is_some());
    }
}
