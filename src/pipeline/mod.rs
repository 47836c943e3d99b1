//! Builds the working dataset from raw records.
//!
//! Each stage consumes the previous stage's output and returns a new
//! collection:
//!
//! ```text
//! Vec<Record> -> filter_genres -> rank_and_truncate -> derive_fields -> Dataset
//! ```

pub mod derive;
pub mod filter;
pub mod rank;

pub use derive::derive_fields;
pub use filter::filter_genres;
pub use rank::rank_and_truncate;

use tracing::info;

use crate::config::PipelineConfig;
use crate::record::{MovieRecord, Record};

/// The filtered, ranked and truncated movies every analysis reads from.
///
/// Read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<MovieRecord>,
}

impl Dataset {
    pub(crate) fn new(records: Vec<MovieRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MovieRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a MovieRecord;
    type IntoIter = std::slice::Iter<'a, MovieRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Runs filter, rank and derive over `records`.
#[tracing::instrument(skip_all, fields(input = records.len(), limit = config.limit))]
pub fn build_dataset(records: Vec<Record>, config: &PipelineConfig) -> Dataset {
    let filtered = filter_genres(records, &config.excluded_genre);
    info!(rows = filtered.len(), "Filter stage complete");

    let ranked = rank_and_truncate(filtered, config.tie_break, config.limit);
    info!(rows = ranked.len(), tie_break = ?config.tie_break, "Rank stage complete");

    let dataset = derive_fields(ranked);
    info!(rows = dataset.len(), "Working dataset ready");
    dataset
}
