//! # gatewaycfg-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `GatewayConfigurationRepository` — CRUD for gateway configurations
//!   - `LegacyMigrator` — one-shot rewrite of the legacy channel configurations
//! - Define **driving/inbound ports** as use-case structs:
//!   - `GatewayConfigurationService` — create, get, update, delete
//!   - `LegacyMigrationService` — run the migration and report its outcome
//!
//! ## Dependency rule
//! Depends on `gatewaycfg-domain` only. Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
