//! Validation utilities.

use revbot_config::{Config, DatabaseDriver};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on environment variables:\n{}", errors)]
    EnvVarsError { errors: String },
}

fn validate_env_vars(config: &Config) -> Result<(), ValidationError> {
    let mut missing = vec![];

    if config.server.bind_ip.is_empty() {
        missing.push("REVBOT_SERVER_BIND_IP");
    }
    if config.server.bind_port == 0 {
        missing.push("REVBOT_SERVER_BIND_PORT");
    }
    if config.database.driver == DatabaseDriver::Postgres && config.database.pg.url.is_empty() {
        missing.push("REVBOT_DATABASE_PG_URL");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EnvVarsError {
            errors: missing
                .into_iter()
                .map(|name| format!("  - Missing env. var.: {name}"))
                .collect::<Vec<_>>()
                .join("\n"),
        })
    }
}

/// Validate configuration.
pub fn validate_configuration(config: &Config) -> Result<(), ValidationError> {
    validate_env_vars(config)
}
