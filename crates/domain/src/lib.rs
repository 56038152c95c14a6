//! # gatewaycfg-domain
//!
//! Pure domain model for gateway radio configurations.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error taxonomy, timestamps
//! - Define **Gateway configurations** (channel set plus owned extra channels)
//! - Define the **legacy channel configuration** shape being migrated away from
//!   and its field-for-field conversion into the new model
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod gateway_configuration;
pub mod legacy;
