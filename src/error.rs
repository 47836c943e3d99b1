//! Error types for loading and querying the movie dataset.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal failure while reading the source CSV. Nothing downstream runs after one.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV is missing expected columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// A record lacks a field that a particular view needs.
///
/// Never fatal: callers exclude the record from that view and move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MissingFieldError {
    #[error("record has no release date")]
    ReleaseDate,

    #[error("record has no primary genre")]
    PrimaryGenre,

    #[error("record has no critic score")]
    CriticScore,

    #[error("record has no audience score")]
    AudienceScore,
}
