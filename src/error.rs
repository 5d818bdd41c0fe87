// File: src/error.rs
//! Error types for loading and validating the event dataset.
//!
//! Only the load step and per-record field access can fail. Everything
//! downstream (filtering, bucketing, map projection) is total.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to fetch or parse the dataset as a whole.
///
/// Recoverable: the synchronizer surfaces it as a status message and keeps
/// operating on an empty dataset.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse event data: {0}")]
    Parse(String),

    #[error("Unsupported data format: {0}")]
    Unsupported(String),
}

/// A single record that cannot become an `Item`. The record is skipped,
/// the rest of the batch is kept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedItem {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("invalid date '{value}' in field '{field}'")]
    InvalidDate { field: &'static str, value: String },

    #[error("record is not an object")]
    NotARecord,
}

pub type LoadResult<T> = Result<T, LoadError>;
