//! `migrate` command: applies, previews or reverts the embedded migrations.

use crate::config::{Settings, StorageBackend};
use crate::db::{pending_migrations, revert_migrations, run_pending_migrations};
use crate::error::{AppError, AppResult};

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.ensure_postgres()?;
        self.config.database.validate()?;

        let url = self.config.database.url.clone();
        match (dry_run, rollback) {
            (true, _) => {
                let pending = pending_migrations(url).await?;
                if pending.is_empty() {
                    println!("No pending migrations");
                } else {
                    println!("{} pending migration(s):", pending.len());
                    for name in &pending {
                        println!("  - {}", name);
                    }
                }
            }
            (false, Some(steps)) => {
                let reverted = revert_migrations(url, steps).await?;
                tracing::info!(count = reverted.len(), migrations = ?reverted, "Migrations reverted");
                for version in &reverted {
                    println!("✓ Reverted {}", version);
                }
            }
            (false, None) => {
                let applied = run_pending_migrations(url).await?;
                tracing::info!(count = applied.len(), migrations = ?applied, "Migrations applied");
                if applied.is_empty() {
                    println!("Schema is up to date");
                }
                for version in &applied {
                    println!("✓ Applied {}", version);
                }
            }
        }

        Ok(())
    }

    fn ensure_postgres(&self) -> AppResult<()> {
        match self.config.database.backend {
            StorageBackend::Postgres => Ok(()),
            StorageBackend::Memory => Err(AppError::Validation {
                field: "database.backend".to_string(),
                reason: "migrations require the postgres backend".to_string(),
            }),
        }
    }
}
