//! CLI module for users-api
//!
//! - Argument parsing with clap
//! - Configuration merging (CLI args over config files)
//! - Command handlers for serve and migrate

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, LogLevel};

use crate::config::{ConfigError, Environment, Settings};
use crate::logger::{LogLevelHandle, init_logger};

/// Loads the configuration and applies CLI overrides.
///
/// Returns the validated settings and the environment they were loaded for.
pub fn load_and_merge_config(cli: &Cli) -> Result<(Settings, Environment), ConfigError> {
    let merger = ConfigurationMerger::load(cli.config.as_deref(), cli.env.map(Environment::from))?;
    let settings = merger.merge_cli_args(cli)?;
    Ok((settings, merger.environment()))
}

/// Installs the global subscriber described by `settings.logger`.
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<LogLevelHandle> {
    let logger_config = settings.logger.clone().into_logger_config()?;
    Ok(init_logger(logger_config)?)
}
