use crate::pipeline::Dataset;
use crate::record::{GenreRecord, MovieRecord};

/// Adds the derived columns to every ranked record. No record is dropped.
pub fn derive_fields(ranked: Vec<GenreRecord>) -> Dataset {
    Dataset::new(ranked.into_iter().map(MovieRecord::derive).collect())
}
