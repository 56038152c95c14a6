//! Gateway configuration store.
//!
//! A configuration spans two tables: the parent `gateway_configuration` row
//! and its `gateway_configuration_extra_channel` children. Every function
//! here runs several statements on the connection it is given and opens no
//! transaction of its own, so callers that need the composite write to be
//! atomic pass an open [`sqlx::Transaction`]:
//!
//! ```ignore
//! let mut tx = pool.begin().await?;
//! gateway_configuration::update(&mut tx, &mut config).await?;
//! tx.commit().await?;
//! ```

use std::str::FromStr;

use chrono::SecondsFormat;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqliteConnection};

use gatewaycfg_domain::error::{GatewayCfgError, NotFoundError};
use gatewaycfg_domain::gateway_configuration::{ExtraChannel, GatewayConfiguration, Modulation};
use gatewaycfg_domain::id::GatewayConfigurationId;
use gatewaycfg_domain::time::{self, Timestamp};

use crate::error::StorageError;

const ENTITY: &str = "GatewayConfiguration";

/// Parent row only; extra channels are read separately.
struct Wrapper(GatewayConfiguration);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;
        let channels_json: String = row.try_get("channels")?;

        let id = GatewayConfigurationId::from_str(&id)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let channels: Vec<i64> = serde_json::from_str(&channels_json)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(GatewayConfiguration {
            id: Some(id),
            created_at: decode_timestamp(&created_at)?,
            updated_at: decode_timestamp(&updated_at)?,
            channels,
            extra_channels: Vec::new(),
        }))
    }
}

struct ExtraChannelWrapper(ExtraChannel);

impl<'r> FromRow<'r, SqliteRow> for ExtraChannelWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let modulation: String = row.try_get("modulation")?;
        let frequency: i64 = row.try_get("frequency")?;
        let bandwidth: i64 = row.try_get("bandwidth")?;
        let bitrate: i64 = row.try_get("bitrate")?;
        let spreading_factors_json: String = row.try_get("spreading_factors")?;

        let modulation =
            Modulation::from_str(&modulation).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let spreading_factors: Vec<i64> = serde_json::from_str(&spreading_factors_json)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(ExtraChannel {
            modulation,
            frequency,
            bandwidth,
            bitrate,
            spreading_factors,
        }))
    }
}

fn encode_timestamp(value: Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn decode_timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

fn not_found(id: Option<GatewayConfigurationId>) -> GatewayCfgError {
    NotFoundError {
        entity: ENTITY,
        id: id.map(|id| id.to_string()).unwrap_or_default(),
    }
    .into()
}

const INSERT: &str = r"
    INSERT INTO gateway_configuration (id, created_at, updated_at, channels)
    VALUES (?, ?, ?, ?)
";

const INSERT_EXTRA_CHANNEL: &str = r"
    INSERT INTO gateway_configuration_extra_channel
        (gateway_configuration_id, modulation, frequency, bandwidth, bitrate, spreading_factors)
    VALUES (?, ?, ?, ?, ?, ?)
";

const SELECT_BY_ID: &str =
    "SELECT id, created_at, updated_at, channels FROM gateway_configuration WHERE id = ?";

const SELECT_EXTRA_CHANNELS: &str = r"
    SELECT modulation, frequency, bandwidth, bitrate, spreading_factors
    FROM gateway_configuration_extra_channel
    WHERE gateway_configuration_id = ?
    ORDER BY id
";

const UPDATE: &str = r"
    UPDATE gateway_configuration SET updated_at = ?, channels = ?
    WHERE id = ?
    RETURNING created_at
";

const DELETE_EXTRA_CHANNELS: &str =
    "DELETE FROM gateway_configuration_extra_channel WHERE gateway_configuration_id = ?";

const DELETE_BY_ID: &str = "DELETE FROM gateway_configuration WHERE id = ?";

async fn insert_extra_channels(
    conn: &mut SqliteConnection,
    id: GatewayConfigurationId,
    extra_channels: &[ExtraChannel],
) -> Result<(), StorageError> {
    let id = id.to_string();
    for extra_channel in extra_channels {
        let spreading_factors = serde_json::to_string(&extra_channel.spreading_factors)?;
        sqlx::query(INSERT_EXTRA_CHANNEL)
            .bind(&id)
            .bind(extra_channel.modulation.as_str())
            .bind(extra_channel.frequency)
            .bind(extra_channel.bandwidth)
            .bind(extra_channel.bitrate)
            .bind(spreading_factors)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

/// Insert `config` and its extra channels, returning its id.
///
/// Both timestamps are set to now and an id is generated when `config.id`
/// is `None`; the caller's value is updated in place.
///
/// # Errors
///
/// Returns [`GatewayCfgError::ConstraintViolation`] when the id already
/// exists, or [`GatewayCfgError::Storage`] for any other database failure.
pub async fn create(
    conn: &mut SqliteConnection,
    config: &mut GatewayConfiguration,
) -> Result<GatewayConfigurationId, GatewayCfgError> {
    let now = time::now();
    config.created_at = now;
    config.updated_at = now;
    let id = *config.id.get_or_insert_with(GatewayConfigurationId::new);

    let channels = serde_json::to_string(&config.channels).map_err(StorageError::from)?;

    sqlx::query(INSERT)
        .bind(id.to_string())
        .bind(encode_timestamp(config.created_at))
        .bind(encode_timestamp(config.updated_at))
        .bind(channels)
        .execute(&mut *conn)
        .await
        .map_err(StorageError::from)?;

    insert_extra_channels(conn, id, &config.extra_channels).await?;

    tracing::info!(id = %id, "gateway configuration created");

    Ok(id)
}

/// Load the configuration `id` with its extra channels in insertion order.
///
/// # Errors
///
/// Returns [`GatewayCfgError::NotFound`] when no configuration has this id,
/// [`GatewayCfgError::ConstraintViolation`] when a stored value cannot be
/// decoded, or [`GatewayCfgError::Storage`] for any other database failure.
pub async fn get(
    conn: &mut SqliteConnection,
    id: GatewayConfigurationId,
) -> Result<GatewayConfiguration, GatewayCfgError> {
    let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
        .bind(id.to_string())
        .fetch_optional(&mut *conn)
        .await
        .map_err(StorageError::from)?;
    let Wrapper(mut config) = row.ok_or_else(|| not_found(Some(id)))?;

    let extra_channels: Vec<ExtraChannelWrapper> = sqlx::query_as(SELECT_EXTRA_CHANNELS)
        .bind(id.to_string())
        .fetch_all(&mut *conn)
        .await
        .map_err(StorageError::from)?;
    config.extra_channels = extra_channels.into_iter().map(|w| w.0).collect();

    Ok(config)
}

/// Store the channels of `config` and replace all of its extra channels.
///
/// `updated_at` is refreshed on the caller's value and `created_at` is
/// replaced by the stored one, so `config` matches what a later [`get`]
/// returns. The extra channels are deleted and re-inserted rather than
/// diffed.
///
/// # Errors
///
/// Returns [`GatewayCfgError::NotFound`] when `config` has no id or no
/// configuration has it, or a storage error when a statement fails.
pub async fn update(
    conn: &mut SqliteConnection,
    config: &mut GatewayConfiguration,
) -> Result<(), GatewayCfgError> {
    let Some(id) = config.id else {
        return Err(not_found(None));
    };
    config.updated_at = time::now();

    let channels = serde_json::to_string(&config.channels).map_err(StorageError::from)?;

    let created_at: Option<(String,)> = sqlx::query_as(UPDATE)
        .bind(encode_timestamp(config.updated_at))
        .bind(channels)
        .bind(id.to_string())
        .fetch_optional(&mut *conn)
        .await
        .map_err(StorageError::from)?;
    let Some((created_at,)) = created_at else {
        return Err(not_found(Some(id)));
    };
    config.created_at = decode_timestamp(&created_at).map_err(StorageError::from)?;

    sqlx::query(DELETE_EXTRA_CHANNELS)
        .bind(id.to_string())
        .execute(&mut *conn)
        .await
        .map_err(StorageError::from)?;
    insert_extra_channels(conn, id, &config.extra_channels).await?;

    tracing::info!(id = %id, "gateway configuration updated");

    Ok(())
}

/// Delete the configuration `id`; its extra channels follow through the
/// cascading foreign key.
///
/// # Errors
///
/// Returns [`GatewayCfgError::NotFound`] when no configuration has this id,
/// or a storage error when the statement fails.
pub async fn delete(
    conn: &mut SqliteConnection,
    id: GatewayConfigurationId,
) -> Result<(), GatewayCfgError> {
    let result = sqlx::query(DELETE_BY_ID)
        .bind(id.to_string())
        .execute(&mut *conn)
        .await
        .map_err(StorageError::from)?;
    if result.rows_affected() == 0 {
        return Err(not_found(Some(id)));
    }

    tracing::info!(id = %id, "gateway configuration deleted");

    Ok(())
}
