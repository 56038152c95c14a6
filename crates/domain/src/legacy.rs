//! Legacy channel configuration — the flat schema replaced by
//! [`GatewayConfiguration`](crate::gateway_configuration::GatewayConfiguration).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::gateway_configuration::{ExtraChannel, GatewayConfiguration, Modulation};
use crate::id::{GatewayConfigurationId, LegacyChannelConfigurationId};

/// A row of the legacy `channel_configuration` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyChannelConfiguration {
    pub id: LegacyChannelConfigurationId,
    /// Human-readable display name.
    pub name: String,
    pub channels: Vec<i64>,
}

/// An extra channel as the legacy schema stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyExtraChannel {
    pub modulation: Modulation,
    pub frequency: i64,
    pub band_width: i64,
    pub bit_rate: i64,
    pub spread_factors: Vec<i64>,
}

impl From<LegacyExtraChannel> for ExtraChannel {
    fn from(value: LegacyExtraChannel) -> Self {
        Self {
            modulation: value.modulation,
            frequency: value.frequency,
            bandwidth: value.band_width,
            bitrate: value.bit_rate,
            spreading_factors: value.spread_factors,
        }
    }
}

impl LegacyChannelConfiguration {
    /// Build the unsaved replacement for this legacy row, copying channels
    /// and extra channels field for field.
    #[must_use]
    pub fn to_gateway_configuration(
        &self,
        extra_channels: Vec<LegacyExtraChannel>,
    ) -> GatewayConfiguration {
        GatewayConfiguration::builder()
            .channels(self.channels.iter().copied())
            .extra_channels(extra_channels.into_iter().map(ExtraChannel::from))
            .build()
    }
}

/// Outcome of a legacy migration: new configuration id → legacy display name.
pub type MigrationMapping = HashMap<GatewayConfigurationId, String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_copy_every_extra_channel_field() {
        let legacy = LegacyExtraChannel {
            modulation: Modulation::Fsk,
            frequency: 868_800_000,
            band_width: 125,
            bit_rate: 50_000,
            spread_factors: vec![],
        };

        let converted = ExtraChannel::from(legacy);
        assert_eq!(
            converted,
            ExtraChannel {
                modulation: Modulation::Fsk,
                frequency: 868_800_000,
                bandwidth: 125,
                bitrate: 50_000,
                spreading_factors: vec![],
            }
        );
    }

    #[test]
    fn should_build_unsaved_configuration_from_legacy_row() {
        let legacy = LegacyChannelConfiguration {
            id: LegacyChannelConfigurationId::new(3),
            name: "EU868".to_string(),
            channels: vec![0, 1, 2],
        };
        let extra = vec![LegacyExtraChannel {
            modulation: Modulation::LoRa,
            frequency: 867_100_000,
            band_width: 125,
            bit_rate: 0,
            spread_factors: vec![7, 8, 9],
        }];

        let config = legacy.to_gateway_configuration(extra);
        assert!(config.id.is_none());
        assert_eq!(config.channels, vec![0, 1, 2]);
        assert_eq!(config.extra_channels.len(), 1);
        assert_eq!(config.extra_channels[0].spreading_factors, vec![7, 8, 9]);
    }
}
