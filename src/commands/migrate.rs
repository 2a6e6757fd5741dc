//! `migrate` subcommand: applies, reverts, lists or rebuilds the schema
//! without starting the HTTP server.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

/// Run one schema action. `status` prints to stdout so it can be piped.
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    tracing::info!(action = ?args.action, "Running migration command...");

    let db = Database::connect_without_migrations(&config).await?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("Applying pending migrations...");
            db.run_migrations().await?;
            tracing::info!("Schema and grant matrix up to date");
        }
        MigrateAction::Down => {
            tracing::info!("Rolling back last migration...");
            db.rollback_migration().await?;
            tracing::info!("Rollback completed successfully");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                let state = if applied { "applied" } else { "pending" };
                println!("{name}: {state}");
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables, accounts and tokens included...");
            db.fresh_migrations().await?;
            tracing::info!("Schema rebuilt; only the seeded grants remain");
        }
    }

    Ok(())
}
