//! Runtime logger configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::logger::error::LoggerError;

/// Main logger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub console: ConsoleConfig,
    pub file: FileConfig,
    /// Level directive understood by `EnvFilter`, e.g. "info"
    pub level: String,
}

impl LoggerConfig {
    /// Create a new logger configuration with validation
    pub fn new(console: ConsoleConfig, file: FileConfig, level: String) -> Result<Self, LoggerError> {
        let config = Self {
            console,
            file,
            level,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LoggerError> {
        self.parse_level()?;

        if self.file.enabled && self.file.path.as_os_str().is_empty() {
            return Err(LoggerError::config(
                "File path cannot be empty when file output is enabled",
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(LoggerError::config(
                "At least one output (console or file) must be enabled",
            ));
        }

        Ok(())
    }

    /// Parse the level string into a `tracing::Level`
    pub fn parse_level(&self) -> Result<Level, LoggerError> {
        match self.level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => Err(LoggerError::config(format!(
                "Invalid log level '{}'. Valid levels are: trace, debug, info, warn, error",
                self.level
            ))),
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: ConsoleConfig::default(),
            file: FileConfig::default(),
            level: "info".to_string(),
        }
    }
}

/// Console output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub enabled: bool,
    /// ANSI colors; ignored when stdout is not a terminal
    pub colored: bool,
    pub format: LogFormat,
}

impl ConsoleConfig {
    pub fn new(enabled: bool, colored: bool, format: LogFormat) -> Self {
        Self {
            enabled,
            colored,
            format,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
            format: LogFormat::Full,
        }
    }
}

/// File output configuration; the file is always opened for appending
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub format: LogFormat,
}

impl FileConfig {
    pub fn new(enabled: bool, path: PathBuf, format: LogFormat) -> Self {
        Self {
            enabled,
            path,
            format,
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("logs/users-api.log"),
            format: LogFormat::Json,
        }
    }
}

/// Log format options
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggerError::format(format!(
                "Invalid log format '{}'. Valid formats are: full, compact, json",
                s
            ))),
        }
    }
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(LoggerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let result = LoggerConfig::new(
            ConsoleConfig::default(),
            FileConfig::default(),
            "loud".to_string(),
        );
        assert!(matches!(result, Err(LoggerError::Config { .. })));
    }

    #[test]
    fn test_enabled_file_needs_path() {
        let file = FileConfig::new(true, PathBuf::new(), LogFormat::Json);
        let result = LoggerConfig::new(ConsoleConfig::default(), file, "info".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_no_output_enabled() {
        let console = ConsoleConfig::new(false, false, LogFormat::Full);
        let result = LoggerConfig::new(console, FileConfig::default(), "info".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_format() {
        assert!(matches!(
            "xml".parse::<LogFormat>(),
            Err(LoggerError::Format { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_level_parsing_is_case_insensitive(idx in 0usize..5, upper in any::<bool>()) {
            let levels = ["trace", "debug", "info", "warn", "error"];
            let level = if upper { levels[idx].to_uppercase() } else { levels[idx].to_string() };
            let config = LoggerConfig { level, ..LoggerConfig::default() };
            prop_assert!(config.parse_level().is_ok());
        }

        #[test]
        fn prop_format_as_str_parses_back(idx in 0usize..3) {
            let format = [LogFormat::Full, LogFormat::Compact, LogFormat::Json][idx];
            prop_assert_eq!(format.as_str().parse::<LogFormat>().unwrap(), format);
        }
    }
}
