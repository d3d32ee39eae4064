//! `serve` command: runs the HTTP server, or only checks the configuration.

use crate::config::{Environment, Settings, StorageBackend};
use crate::error::AppResult;
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
    environment: Environment,
}

impl ServeCommandHandler {
    pub fn new(config: Settings, environment: Environment) -> Self {
        Self {
            config,
            environment,
        }
    }

    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            return self.validate_only();
        }

        Server::new(self.config, self.environment).run().await?;
        Ok(())
    }

    /// Validates the settings and prints what the server would do.
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid ({})", self.environment.as_str());
        println!("✓ Server would bind to: {}", self.config.server.address());
        match self.config.database.backend {
            StorageBackend::Postgres => println!(
                "✓ Storage: postgres (pool {}..={}, auto_migrate={})",
                self.config.database.min_connections,
                self.config.database.max_connections,
                self.config.database.auto_migrate
            ),
            StorageBackend::Memory => println!("✓ Storage: memory (data is not persisted)"),
        }
        println!("✓ Error mapping: {:?}", self.config.api.error_mapping);
        println!("Dry run completed successfully");

        tracing::info!("Configuration dry run passed");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
