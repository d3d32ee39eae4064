//! Merges CLI overrides into loaded settings.
//!
//! Precedence, lowest to highest: config files, `USERS_API_*` environment
//! variables, global flags (`--verbose`/`--quiet`), subcommand flags.

use std::path::Path;

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Environment, Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
    environment: Environment,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings, environment: Environment) -> Self {
        Self {
            base_config,
            environment,
        }
    }

    /// Loads the base settings, either from a single file or from the
    /// layered config directory.
    pub fn load(config_path: Option<&Path>, environment: Option<Environment>) -> Result<Self, ConfigError> {
        let loader = match config_path {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::new()?,
        };
        let loader = match environment {
            Some(env) => loader.with_environment(env),
            None => loader,
        };

        let settings = loader.load()?;
        Ok(Self::new(settings, loader.environment()))
    }

    /// Applies CLI overrides and re-validates the result.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }
}
