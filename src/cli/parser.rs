//! CLI argument parsing with clap
//!
//! Defines the command-line surface: global options plus the `serve` and
//! `migrate` subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Users CRUD web service
#[derive(Parser, Debug)]
#[command(name = "users-api")]
#[command(about = "Users CRUD web service backed by PostgreSQL")]
#[command(long_about = "
users-api serves create, read, update and delete operations on user records
over HTTP/JSON, with PostgreSQL or in-memory storage.

EXAMPLES:
    # Start the server with default configuration
    users-api serve

    # Start server on custom host and port
    users-api serve --host 0.0.0.0 --port 8080

    # Use a single configuration file
    users-api --config /path/to/config.toml serve

    # Check configuration without starting server
    users-api serve --dry-run

    # Apply pending migrations
    users-api migrate

    # Preview pending migrations
    users-api migrate --dry-run

    # Roll back the last migration
    users-api migrate --rollback 1
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute; `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load only this TOML file (plus USERS_API_* environment variables)
    /// instead of the layered config directory.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` is layered over `default.toml`.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Examples:
    ///   users-api serve                           # Start with defaults
    ///   users-api serve --host 0.0.0.0 --port 80 # Bind to all interfaces on port 80
    ///   users-api serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on (1-65535)
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override; wins over --verbose and --quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Database migration operations
    ///
    /// Examples:
    ///   users-api migrate                    # Apply all pending migrations
    ///   users-api migrate --dry-run          # Show pending migrations without applying
    ///   users-api migrate --rollback 1       # Revert the most recent migration
    Migrate {
        /// Show pending migrations without applying
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of most recent migrations to revert (1-100)
        #[arg(long, value_name = "STEPS", conflicts_with = "dry_run", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}
