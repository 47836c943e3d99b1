use tracing::debug;

use crate::record::{GenreRecord, Record, primary_genre};

/// Keeps records with a primary genre other than `excluded_genre`.
///
/// Order is preserved.
pub fn filter_genres(records: Vec<Record>, excluded_genre: &str) -> Vec<GenreRecord> {
    let mut no_genre = 0usize;
    let mut excluded = 0usize;

    let kept: Vec<GenreRecord> = records
        .into_iter()
        .filter_map(|record| {
            let Some(genre) = record.genres.as_deref().and_then(primary_genre) else {
                no_genre += 1;
                return None;
            };
            if genre == excluded_genre {
                excluded += 1;
                return None;
            }
            Some(GenreRecord {
                record,
                primary_genre: genre,
            })
        })
        .collect();

    debug!(no_genre, excluded, kept = kept.len(), "Genre filter applied");
    kept
}
