//! Configuration validation
//!
//! Validates the clients configuration for correctness before any fetch
//! begins:
//! - At least one client section
//! - GitHub clients carry non-empty owner/repo/token
//! - Matrix clients can resolve a credentials file and room id
//!
//! All problems are collected and reported together rather than one at a time.

use super::clients::{ClientConfig, ClientsConfig};
use crate::{Result, TidingsError};

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub client: Option<String>,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            client: None,
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref client) = self.client {
            write!(f, "[{}] {}: {}", client, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Validation result
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// Validate a clients configuration
pub fn validate_config(config: &ClientsConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.clients.is_empty() {
        errors.push(ValidationError::new(
            "clients",
            "At least one client section with an `api` tag must be defined",
        ));
    }

    for (name, client) in &config.clients {
        match client {
            ClientConfig::Github(section) => {
                for (field, value) in [
                    ("owner", &section.owner),
                    ("repo", &section.repo),
                    ("access_token", &section.access_token),
                ] {
                    if value.is_empty() {
                        errors.push(
                            ValidationError::new(field, "Must not be empty")
                                .with_client(name.clone()),
                        );
                    }
                }
            }
            ClientConfig::Matrix(section) => {
                if config.matrix_credentials_path(section).is_none() {
                    errors.push(
                        ValidationError::new(
                            "config",
                            "Matrix credentials file is required (here or in [general])",
                        )
                        .with_client(name.clone()),
                    );
                }
                if config.matrix_room_id(section).is_none() {
                    errors.push(
                        ValidationError::new(
                            "room_id",
                            "Matrix room id is required (here or in [general])",
                        )
                        .with_client(name.clone()),
                    );
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate and convert failures into a single fatal error
pub fn validate_config_result(config: &ClientsConfig) -> Result<()> {
    validate_config(config).map_err(|errors| {
        let details = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        TidingsError::Config(format!("Invalid configuration: {}", details))
    })
}
