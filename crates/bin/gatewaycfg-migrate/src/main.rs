//! # gatewaycfg-migrate
//!
//! Composition root for the one-shot channel configuration migration.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run schema migrations
//! - Construct the legacy migrator (adapter) and the migration service
//! - Run the migration and print `gateway-configuration-id<TAB>legacy-name`
//!   for every migrated row
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use gatewaycfg_adapter_storage_sqlite_sqlx::SqliteLegacyMigrator;
use gatewaycfg_app::services::legacy_migration_service::LegacyMigrationService;
use gatewaycfg_domain::legacy::MigrationMapping;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Render the mapping one line per migrated row, sorted by legacy name.
fn report_lines(mapping: MigrationMapping) -> Vec<String> {
    let mut entries: Vec<_> = mapping.into_iter().collect();
    entries.sort_by(|(a_id, a_name), (b_id, b_name)| a_name.cmp(b_name).then(a_id.cmp(b_id)));
    entries
        .into_iter()
        .map(|(id, name)| format!("{id}\t{name}"))
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    tracing::info!(
        database_url = config.database_url(),
        "starting legacy channel configuration migration"
    );

    // Database
    let db = gatewaycfg_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;

    // Migration
    let service = LegacyMigrationService::new(SqliteLegacyMigrator::new(db.pool().clone()));
    let mapping = service.run().await?;

    for line in report_lines(mapping) {
        println!("{line}");
    }

    db.close().await;

    Ok(())
}
