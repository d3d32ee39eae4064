//! Database connection pool and schema migrations.

mod migrations;
mod pool;

pub use migrations::{MIGRATIONS, pending_migrations, revert_migrations, run_pending_migrations};
pub use pool::{AsyncDbPool, establish_async_connection_pool};
