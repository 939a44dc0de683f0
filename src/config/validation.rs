//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, known log levels)
//! - Check the definition source settings are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>

use std::fmt;

use crate::config::schema::ServerConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::new("listener.host", "must not be empty"));
    }

    let mock = &config.mock;
    if mock.directory.is_none() && mock.directories.is_empty() {
        errors.push(ValidationError::new(
            "mock.directories",
            "at least one directory is required when mock.directory is not set",
        ));
    }
    if mock.extension.is_empty() {
        errors.push(ValidationError::new("mock.extension", "must not be empty"));
    } else if mock.extension.starts_with('.') {
        errors.push(ValidationError::new(
            "mock.extension",
            format!(
                "give the extension without a dot, e.g. \"{}\"",
                mock.extension.trim_start_matches('.')
            ),
        ));
    }
    if !mock.root_prefix.starts_with('/') || !mock.root_prefix.ends_with('/') {
        errors.push(ValidationError::new(
            "mock.root_prefix",
            format!("must start and end with '/', got \"{}\"", mock.root_prefix),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!(
                "unknown level \"{}\", expected one of {}",
                config.observability.log_level,
                LOG_LEVELS.join(", ")
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ServerConfig::default()), Ok(()));
    }

    #[rstest]
    #[case("/")]
    #[case("/api/")]
    #[case("/api/v1/")]
    fn test_valid_root_prefix(#[case] prefix: &str) {
        let mut config = ServerConfig::default();
        config.mock.root_prefix = prefix.to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("api/")]
    #[case("/api")]
    fn test_invalid_root_prefix(#[case] prefix: &str) {
        let mut config = ServerConfig::default();
        config.mock.root_prefix = prefix.to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "mock.root_prefix");
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServerConfig::default();
        config.mock.directories.clear();
        config.mock.extension = ".api".to_string();
        config.timeouts.request_secs = 0;
        config.observability.log_level = "loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "mock.directories",
                "mock.extension",
                "timeouts.request_secs",
                "observability.log_level"
            ]
        );
    }

    #[test]
    fn test_explicit_directory_allows_empty_fallback_list() {
        let mut config = ServerConfig::default();
        config.mock.directories.clear();
        config.mock.directory = Some("mock".into());
        assert!(validate_config(&config).is_ok());
    }

    #[rstest]
    #[case("INFO")]
    #[case("debug")]
    #[case("Warn")]
    fn test_log_level_is_case_insensitive(#[case] level: &str) {
        let mut config = ServerConfig::default();
        config.observability.log_level = level.to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_display() {
        let err = ValidationError::new("listener.host", "must not be empty");
        assert_eq!(err.to_string(), "listener.host: must not be empty");
    }
}
