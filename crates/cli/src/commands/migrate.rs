//! Database migration commands.
//!
//! All three binaries share one database, so there is a single
//! migration set at the workspace root.
//!
//! # Usage
//!
//! ```bash
//! cedarline-cli migrate run
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string

use super::{CommandError, connect};

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration
/// fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../../migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
