//! Gateway configuration — the channel set a gateway listens on, plus the
//! extra demodulation channels it owns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::id::GatewayConfigurationId;
use crate::time::{self, Timestamp};

/// Modulation of an [`ExtraChannel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modulation {
    #[serde(rename = "FSK")]
    Fsk,
    #[serde(rename = "LORA")]
    LoRa,
}

impl Modulation {
    /// Textual form used in storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fsk => "FSK",
            Self::LoRa => "LORA",
        }
    }
}

impl fmt::Display for Modulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known [`Modulation`].
#[derive(Debug, thiserror::Error)]
#[error("unknown modulation `{0}`")]
pub struct ParseModulationError(String);

impl FromStr for Modulation {
    type Err = ParseModulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FSK" => Ok(Self::Fsk),
            "LORA" => Ok(Self::LoRa),
            other => Err(ParseModulationError(other.to_string())),
        }
    }
}

/// An auxiliary channel owned by a [`GatewayConfiguration`].
///
/// Values are opaque at this layer: frequency in Hz, bandwidth in kHz,
/// bitrate in bps. `spreading_factors` only means something for
/// [`Modulation::LoRa`] and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraChannel {
    pub modulation: Modulation,
    pub frequency: i64,
    pub bandwidth: i64,
    pub bitrate: i64,
    pub spreading_factors: Vec<i64>,
}

/// Composite radio configuration: base channels plus owned extra channels.
///
/// `id` stays `None` until the configuration is persisted, at which point
/// the store assigns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfiguration {
    pub id: Option<GatewayConfigurationId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Channel indices, kept in the order given.
    pub channels: Vec<i64>,
    /// Extra channels, kept in the order given.
    pub extra_channels: Vec<ExtraChannel>,
}

impl GatewayConfiguration {
    /// Create a builder for constructing a [`GatewayConfiguration`].
    #[must_use]
    pub fn builder() -> GatewayConfigurationBuilder {
        GatewayConfigurationBuilder::default()
    }
}

/// Step-by-step builder for [`GatewayConfiguration`].
#[derive(Debug, Default)]
pub struct GatewayConfigurationBuilder {
    id: Option<GatewayConfigurationId>,
    channels: Vec<i64>,
    extra_channels: Vec<ExtraChannel>,
}

impl GatewayConfigurationBuilder {
    #[must_use]
    pub fn id(mut self, id: GatewayConfigurationId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn channels(mut self, channels: impl IntoIterator<Item = i64>) -> Self {
        self.channels = channels.into_iter().collect();
        self
    }

    #[must_use]
    pub fn extra_channel(mut self, extra_channel: ExtraChannel) -> Self {
        self.extra_channels.push(extra_channel);
        self
    }

    #[must_use]
    pub fn extra_channels(
        mut self,
        extra_channels: impl IntoIterator<Item = ExtraChannel>,
    ) -> Self {
        self.extra_channels.extend(extra_channels);
        self
    }

    /// Consume the builder. Both timestamps are set to the current time;
    /// the store overwrites them on create.
    #[must_use]
    pub fn build(self) -> GatewayConfiguration {
        let now = time::now();
        GatewayConfiguration {
            id: self.id,
            created_at: now,
            updated_at: now,
            channels: self.channels,
            extra_channels: self.extra_channels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lora(frequency: i64, spreading_factors: Vec<i64>) -> ExtraChannel {
        ExtraChannel {
            modulation: Modulation::LoRa,
            frequency,
            bandwidth: 125,
            bitrate: 0,
            spreading_factors,
        }
    }

    #[test]
    fn should_parse_storage_form_of_modulation() {
        assert_eq!("FSK".parse::<Modulation>().unwrap(), Modulation::Fsk);
        assert_eq!("LORA".parse::<Modulation>().unwrap(), Modulation::LoRa);
        assert_eq!(Modulation::LoRa.to_string(), "LORA");
    }

    #[test]
    fn should_reject_unknown_modulation() {
        let err = "lora".parse::<Modulation>().unwrap_err();
        assert_eq!(err.to_string(), "unknown modulation `lora`");
    }

    #[test]
    fn should_serialize_modulation_like_storage() {
        assert_eq!(serde_json::to_string(&Modulation::Fsk).unwrap(), "\"FSK\"");
    }

    #[test]
    fn should_build_without_id_by_default() {
        let config = GatewayConfiguration::builder().channels([0, 1, 2]).build();
        assert!(config.id.is_none());
        assert_eq!(config.channels, vec![0, 1, 2]);
        assert_eq!(config.created_at, config.updated_at);
        assert!(config.extra_channels.is_empty());
    }

    #[test]
    fn should_keep_extra_channel_order() {
        let config = GatewayConfiguration::builder()
            .extra_channel(lora(868_900_000, vec![]))
            .extra_channels([lora(868_700_000, vec![10, 11, 12]), lora(869_100_000, vec![7])])
            .build();

        let frequencies: Vec<i64> = config.extra_channels.iter().map(|ec| ec.frequency).collect();
        assert_eq!(frequencies, vec![868_900_000, 868_700_000, 869_100_000]);
    }

    #[test]
    fn should_keep_explicit_id() {
        let id = GatewayConfigurationId::new();
        let config = GatewayConfiguration::builder().id(id).build();
        assert_eq!(config.id, Some(id));
    }
}
