//! Typed identifiers.
//!
//! New-schema records are keyed by random UUIDs rendered as text; the legacy
//! schema used integer sequences.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unique identifier for a [`GatewayConfiguration`](crate::gateway_configuration::GatewayConfiguration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GatewayConfigurationId(uuid::Uuid);

impl Default for GatewayConfigurationId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl GatewayConfigurationId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(self) -> uuid::Uuid {
        self.0
    }
}

impl fmt::Display for GatewayConfigurationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for GatewayConfigurationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s).map(Self)
    }
}

/// Row identifier of a legacy channel configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LegacyChannelConfigurationId(i64);

impl LegacyChannelConfigurationId {
    /// Wrap a raw legacy row id.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Access the raw row id.
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for LegacyChannelConfigurationId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for LegacyChannelConfigurationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_unique_ids_when_called_twice() {
        let a = GatewayConfigurationId::new();
        let b = GatewayConfigurationId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = GatewayConfigurationId::new();
        let parsed: GatewayConfigurationId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_return_error_when_parsing_invalid_uuid() {
        assert!(GatewayConfigurationId::from_str("not-a-uuid").is_err());
    }

    #[test]
    fn should_serialize_legacy_id_as_plain_integer() {
        let json = serde_json::to_string(&LegacyChannelConfigurationId::new(42)).unwrap();
        assert_eq!(json, "42");
    }
}
