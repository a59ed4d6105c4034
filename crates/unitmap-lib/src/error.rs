use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the unit map library.
pub type Result<T> = std::result::Result<T, Error>;

/// Raised while turning raw records into a batch of [`Unit`](crate::Unit)s.
///
/// Any of these aborts the whole batch; no partial batch is ever installed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    /// A required field was absent (or blank) on the record at the given index.
    #[error("record {1} is missing required field '{0}'")]
    MissingField(&'static str, usize),

    /// A numeric field was present but could not be parsed.
    #[error("record {1} has a non-numeric or out-of-bounds value for '{0}'")]
    InvalidNumeric(&'static str, usize),

    /// A coordinate parsed but lies outside its legal range.
    #[error("record {1} has an out-of-range {0}")]
    InvalidCoordinate(&'static str, usize),

    /// Two records in the same batch share an identifier.
    #[error("duplicate unit id '{id}' at record {record_index} (first seen at record {first_index})")]
    DuplicateId {
        id: String,
        first_index: usize,
        record_index: usize,
    },
}

/// Raised by coordinate construction and distance computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A latitude or longitude was NaN or infinite.
    #[error("coordinate component is not a finite number")]
    NonFinite,

    /// A latitude or longitude fell outside its legal range.
    #[error("{field} {value} is out of range")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Raised when a range query cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("radius must not be negative (got {0} km)")]
    NegativeRadius(f64),

    #[error("radius must be a finite number")]
    NonFiniteRadius,

    #[error("center-relative query requires a reference point")]
    MissingReferencePoint,
}

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Query(#[from] QueryError),

    /// Raised when a unit id could not be found in the current batch.
    #[error("unknown unit id: {id}{}", format_suggestions(.suggestions))]
    UnknownUnit { id: String, suggestions: Vec<String> },

    /// Raised when the source document is malformed or not shaped like a unit list.
    #[error("failed to parse unit document: {message}")]
    Document { message: String },

    /// Raised when loading a document from disk fails.
    #[error("failed to read unit document {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wrapper for JSON record errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
