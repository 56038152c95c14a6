//! # gatewaycfg-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Store gateway configurations and their extra channels
//!   ([`gateway_configuration`]) over any connection, including an open
//!   transaction
//! - Read the legacy channel configuration schema ([`legacy`]) and migrate it
//!   ([`legacy_migration`])
//! - Implement the port traits defined in `gatewaycfg-app::ports`, owning the
//!   transaction boundary of each call
//! - Manage `SQLite` connection pool lifecycle and run embedded migrations
//!
//! ## Dependency rule
//! Depends on `gatewaycfg-app` (for port traits) and `gatewaycfg-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod gateway_configuration;
pub mod legacy;
pub mod legacy_migration;
pub mod pool;

mod gateway_configuration_repo;
mod legacy_migrator;

pub use gateway_configuration_repo::SqliteGatewayConfigurationRepository;
pub use legacy_migrator::SqliteLegacyMigrator;
pub use pool::{Config, Database};
