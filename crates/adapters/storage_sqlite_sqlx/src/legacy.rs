//! Read access to the legacy `channel_configuration` schema.
//!
//! Nothing writes these tables anymore; they are only read by the
//! [`legacy_migration`](crate::legacy_migration) job.

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqliteConnection};

use gatewaycfg_domain::error::{GatewayCfgError, NotFoundError};
use gatewaycfg_domain::gateway_configuration::Modulation;
use gatewaycfg_domain::id::LegacyChannelConfigurationId;
use gatewaycfg_domain::legacy::{LegacyChannelConfiguration, LegacyExtraChannel};

use crate::error::StorageError;

struct Wrapper(LegacyChannelConfiguration);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let channels_json: String = row.try_get("channels")?;

        let channels: Vec<i64> = serde_json::from_str(&channels_json)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(LegacyChannelConfiguration {
            id: LegacyChannelConfigurationId::new(id),
            name,
            channels,
        }))
    }
}

struct ExtraChannelWrapper(LegacyExtraChannel);

impl<'r> FromRow<'r, SqliteRow> for ExtraChannelWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let modulation: String = row.try_get("modulation")?;
        let frequency: i64 = row.try_get("frequency")?;
        let band_width: i64 = row.try_get("band_width")?;
        let bit_rate: i64 = row.try_get("bit_rate")?;
        let spread_factors_json: String = row.try_get("spread_factors")?;

        let modulation =
            Modulation::from_str(&modulation).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let spread_factors: Vec<i64> = serde_json::from_str(&spread_factors_json)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(LegacyExtraChannel {
            modulation,
            frequency,
            band_width,
            bit_rate,
            spread_factors,
        }))
    }
}

const SELECT_ALL: &str = "SELECT id, name, channels FROM channel_configuration ORDER BY id";
const SELECT_BY_ID: &str = "SELECT id, name, channels FROM channel_configuration WHERE id = ?";
const SELECT_EXTRA_CHANNELS: &str = r"
    SELECT modulation, frequency, band_width, bit_rate, spread_factors
    FROM channel_configuration_extra_channel
    WHERE channel_configuration_id = ?
    ORDER BY id
";

/// List every legacy channel configuration.
///
/// # Errors
///
/// Returns [`GatewayCfgError::ConstraintViolation`] when a stored channel
/// list cannot be decoded, or a storage error when the query fails.
pub async fn list_channel_configurations(
    conn: &mut SqliteConnection,
) -> Result<Vec<LegacyChannelConfiguration>, GatewayCfgError> {
    let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
        .fetch_all(conn)
        .await
        .map_err(StorageError::from)?;

    Ok(rows.into_iter().map(|w| w.0).collect())
}

/// Get the legacy channel configuration `id`.
///
/// # Errors
///
/// Returns [`GatewayCfgError::NotFound`] when the row does not exist, or a
/// storage error when the query fails.
pub async fn get_channel_configuration(
    conn: &mut SqliteConnection,
    id: LegacyChannelConfigurationId,
) -> Result<LegacyChannelConfiguration, GatewayCfgError> {
    let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
        .bind(id.get())
        .fetch_optional(conn)
        .await
        .map_err(StorageError::from)?;

    row.map(|w| w.0).ok_or_else(|| {
        NotFoundError {
            entity: "LegacyChannelConfiguration",
            id: id.to_string(),
        }
        .into()
    })
}

/// Get the extra channels of the legacy channel configuration `id`, in
/// insertion order. A configuration without extra channels yields an empty
/// list.
///
/// # Errors
///
/// Returns [`GatewayCfgError::ConstraintViolation`] when a stored row cannot
/// be decoded, or a storage error when the query fails.
pub async fn get_extra_channels(
    conn: &mut SqliteConnection,
    id: LegacyChannelConfigurationId,
) -> Result<Vec<LegacyExtraChannel>, GatewayCfgError> {
    let rows: Vec<ExtraChannelWrapper> = sqlx::query_as(SELECT_EXTRA_CHANNELS)
        .bind(id.get())
        .fetch_all(conn)
        .await
        .map_err(StorageError::from)?;

    Ok(rows.into_iter().map(|w| w.0).collect())
}
