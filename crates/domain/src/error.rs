//! Error taxonomy shared by every layer of the workspace.
//!
//! Storage adapters translate engine-specific failures into
//! [`GatewayCfgError`] at their boundary so nothing above them ever sees a
//! driver error type.

/// Boxed error used as the source of translated storage failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error returned by stores, migrators and services.
#[derive(Debug, thiserror::Error)]
pub enum GatewayCfgError {
    /// The targeted record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The storage layer rejected the data (uniqueness, references, payload shape).
    #[error("constraint violation")]
    ConstraintViolation(#[from] ConstraintViolationError),

    /// Any other storage failure, including lost connectivity.
    #[error("storage error")]
    Storage(#[source] BoxError),
}

/// A record looked up by identifier was absent.
#[derive(Debug, thiserror::Error)]
#[error("{entity} `{id}` not found")]
pub struct NotFoundError {
    /// Kind of record, e.g. `"GatewayConfiguration"`.
    pub entity: &'static str,
    /// Identifier that was looked up.
    pub id: String,
}

/// The storage layer refused a write or returned a value it could not decode.
#[derive(Debug, thiserror::Error)]
pub enum ConstraintViolationError {
    #[error("unique constraint violated")]
    Unique(#[source] BoxError),

    #[error("foreign key constraint violated")]
    ForeignKey(#[source] BoxError),

    #[error("not-null constraint violated")]
    NotNull(#[source] BoxError),

    #[error("check constraint violated")]
    Check(#[source] BoxError),

    /// A stored array, enum or timestamp could not be decoded.
    #[error("malformed payload")]
    MalformedPayload(#[source] BoxError),
}

impl GatewayCfgError {
    /// Whether this error reports a missing record.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
