use std::cmp::Reverse;

use tracing::debug;

use crate::config::TieBreak;
use crate::record::GenreRecord;

/// Drops records without both review counts, sorts by audience-review count
/// (descending) and truncates to `limit`.
///
/// The sort is stable: records equal on every active key keep their input order.
pub fn rank_and_truncate(
    records: Vec<GenreRecord>,
    tie_break: TieBreak,
    limit: usize,
) -> Vec<GenreRecord> {
    let before = records.len();

    let mut counted: Vec<(u32, u32, GenreRecord)> = records
        .into_iter()
        .filter_map(|gr| {
            let audience = gr.record.audience_count?;
            let critic = gr.record.critic_count?;
            Some((audience, critic, gr))
        })
        .collect();
    let dropped = before - counted.len();

    match tie_break {
        TieBreak::CriticCount => {
            counted.sort_by_key(|(audience, critic, _)| (Reverse(*audience), Reverse(*critic)))
        }
        TieBreak::None => counted.sort_by_key(|(audience, _, _)| Reverse(*audience)),
    }
    counted.truncate(limit);

    debug!(dropped, kept = counted.len(), limit, "Ranked by review count");
    counted.into_iter().map(|(_, _, gr)| gr).collect()
}
