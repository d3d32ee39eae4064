//! Configuration validation logic
//!
//! Each section validates its own ranges and formats; `Settings::validate`
//! runs them all and stops at the first failure.

use crate::config::error::ConfigError;
use crate::config::settings::{
    ConsoleSettings, DatabaseConfig, FileSettings, LoggerSettings, ServerConfig, Settings,
    StorageBackend,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

fn validate_format(field: &str, format: &str) -> Result<(), ConfigError> {
    if VALID_LOG_FORMATS.contains(&format.to_lowercase().as_str()) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        field: field.to_string(),
        message: format!(
            "Invalid log format '{}'. Valid formats are: {}",
            format,
            VALID_LOG_FORMATS.join(", ")
        ),
    })
}

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Server host cannot be empty.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// The memory backend needs no connection settings, so only the
    /// postgres backend is checked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend == StorageBackend::Memory {
            return Ok(());
        }

        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Please specify a valid database connection string.",
            ));
        }

        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::ValidationError {
                field: "database.min_connections".to_string(),
                message: format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            });
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl ConsoleSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        validate_format("logger.console.format", &self.format)
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        validate_format("logger.file.format", &self.format)
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Level must be one of trace, debug, info, warn, error
    /// - Formats must be one of full, compact, json
    /// - At least one output must be enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        self.console.validate()?;
        self.file.validate()?;

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.application.name.trim().is_empty() {
            return Err(ConfigError::validation(
                "application.name",
                "Application name cannot be empty.",
            ));
        }

        self.server.validate()?;
        self.database.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
