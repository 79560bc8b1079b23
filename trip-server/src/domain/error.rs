//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from provider/IO errors.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Address is empty after trimming
    #[error("address must not be empty")]
    EmptyAddress,

    /// Coordinate is zero, NaN or infinite
    #[error("invalid coordinate: ({lng}, {lat})")]
    InvalidCoordinate { lng: f64, lat: f64 },

    /// Coordinate text could not be parsed
    #[error("invalid coordinate text: {0}")]
    MalformedCoordinate(String),

    /// Route planning requested with no transport mode
    #[error("请至少选择一种交通方式")]
    NoModesSelected,

    /// API key too short or blank
    #[error("invalid API key: must be at least {min} characters")]
    InvalidApiKey { min: usize },

    /// Unrecognised transport mode name
    #[error("unknown transport mode: {0}")]
    UnknownMode(String),

    /// Unrecognised POI category name
    #[error("unknown POI category: {0}")]
    UnknownCategory(String),

    /// Unrecognised sort key
    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),
}
