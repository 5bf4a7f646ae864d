//! Error types for u-rotation.
//!
//! Only caller contract violations surface as errors. Unsatisfiable slots,
//! empty qualification pools and bad configuration values are normal
//! outcomes and are represented in the output data instead.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::validation::ValidationError;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RotaError>;

/// Errors raised for malformed input.
#[derive(Error, Debug)]
pub enum RotaError {
    /// A service date string could not be parsed.
    #[error("invalid service date '{input}': {source}")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A computed calendar month falls outside the representable range.
    #[error("date out of range: {year}-{month:02}")]
    DateOutOfRange { year: i32, month: u32 },

    /// Service dates must be strictly ascending.
    #[error("service dates out of order: {next} does not follow {previous}")]
    UnsortedDates {
        previous: NaiveDate,
        next: NaiveDate,
    },

    /// The roster failed structural validation.
    #[error("invalid roster: {}", summarize(.0))]
    InvalidRoster(Vec<ValidationError>),

    /// A grid lookup named a role that is not one of its columns.
    #[error("unknown role column '{0}'")]
    UnknownRole(String),

    /// A grid lookup named a date that is not one of its rows.
    #[error("unknown service date {0}")]
    UnknownDate(NaiveDate),

    /// Two grids that must share a shape do not.
    #[error("grid shape mismatch: expected {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    /// Configuration text is not valid TOML for `RotationConfig`.
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Reading a configuration file failed.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
