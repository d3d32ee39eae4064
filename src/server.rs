//! Server module for managing HTTP server lifecycle
//!
//! This module handles server initialization, startup, and graceful shutdown.

use std::time::Duration;

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::{Environment, Settings, StorageBackend};
use crate::db::run_pending_migrations;
use crate::repositories::build_user_repository;
use crate::state::AppState;

/// HTTP server manager
pub struct Server {
    settings: Settings,
    environment: Environment,
}

impl Server {
    pub fn new(settings: Settings, environment: Environment) -> Self {
        Self {
            settings,
            environment,
        }
    }

    /// Start the server and run until shutdown signal
    ///
    /// This method:
    /// 1. Logs startup information
    /// 2. Applies pending migrations when `database.auto_migrate` is set
    /// 3. Builds the user repository for the configured backend
    /// 4. Binds to configured address
    /// 5. Starts the HTTP server with graceful shutdown
    ///
    /// # Errors
    /// - Migration or connection pool failures
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = self.settings;

        tracing::info!(
            app_name = %settings.application.name,
            app_version = %settings.application.version,
            environment = %self.environment.as_str(),
            "Application starting"
        );

        tracing::info!(
            host = %settings.server.host,
            port = %settings.server.port,
            request_timeout = %settings.server.request_timeout,
            error_mapping = ?settings.api.error_mapping,
            "Server configuration loaded"
        );

        // URL may carry credentials; never logged
        tracing::info!(
            backend = %settings.database.backend.as_str(),
            max_connections = %settings.database.max_connections,
            min_connections = %settings.database.min_connections,
            connection_timeout = %settings.database.connection_timeout,
            auto_migrate = %settings.database.auto_migrate,
            "Database configuration loaded"
        );

        if settings.database.backend == StorageBackend::Postgres && settings.database.auto_migrate {
            let applied = run_pending_migrations(settings.database.url.clone()).await?;
            tracing::info!(count = applied.len(), migrations = ?applied, "Migrations applied");
        }

        let users = build_user_repository(&settings.database).await?;
        let state = AppState::new(users, settings.api.error_mapping);

        let router = create_router(
            state,
            Duration::from_secs(settings.server.request_timeout),
        );
        tracing::info!("Router configured");

        let address = settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
