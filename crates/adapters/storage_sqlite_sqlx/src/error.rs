//! Storage-specific error type wrapping sqlx errors, and its translation into
//! the domain error taxonomy.

use sqlx::error::ErrorKind;

use gatewaycfg_domain::error::{ConstraintViolationError, GatewayCfgError};

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to serialize or deserialize a stored JSON array.
    #[error("JSON array error")]
    Json(#[from] serde_json::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for GatewayCfgError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Database(sqlx::Error::Database(db_err)) => {
                let kind = db_err.kind();
                let source = Box::new(sqlx::Error::Database(db_err));
                match kind {
                    ErrorKind::UniqueViolation => ConstraintViolationError::Unique(source).into(),
                    ErrorKind::ForeignKeyViolation => {
                        ConstraintViolationError::ForeignKey(source).into()
                    }
                    ErrorKind::NotNullViolation => ConstraintViolationError::NotNull(source).into(),
                    ErrorKind::CheckViolation => ConstraintViolationError::Check(source).into(),
                    _ => Self::Storage(source),
                }
            }
            StorageError::Database(
                err @ (sqlx::Error::Decode(_) | sqlx::Error::ColumnDecode { .. }),
            ) => ConstraintViolationError::MalformedPayload(Box::new(err)).into(),
            StorageError::Json(err) => {
                ConstraintViolationError::MalformedPayload(Box::new(err)).into()
            }
            other => Self::Storage(Box::new(other)),
        }
    }
}
