//! Top-N queries on critical disconnect.

use std::cmp::Ordering;

use crate::pipeline::Dataset;
use crate::record::MovieRecord;

/// Which side of the disconnect to rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Favor {
    /// Highest disconnect first; ties go to the earlier release year.
    Critics,
    /// Lowest disconnect first; ties go to the later release year.
    Audiences,
}

/// The `n` movies critics rated most above audiences.
pub fn critics_favor(dataset: &Dataset, n: usize) -> Vec<&MovieRecord> {
    top_by_disconnect(dataset, n, Favor::Critics)
}

/// The `n` movies audiences rated most above critics.
pub fn audiences_favor(dataset: &Dataset, n: usize) -> Vec<&MovieRecord> {
    top_by_disconnect(dataset, n, Favor::Audiences)
}

/// Signed form: positive `n` selects critics-favor, negative selects
/// audiences-favor, zero selects nothing.
pub fn select_disconnect(dataset: &Dataset, n: i64) -> Vec<&MovieRecord> {
    let count = n.unsigned_abs() as usize;
    match n.cmp(&0) {
        Ordering::Greater => critics_favor(dataset, count),
        Ordering::Less => audiences_favor(dataset, count),
        Ordering::Equal => Vec::new(),
    }
}

/// Records without a disconnect are skipped. Inside a tie, records without a
/// release year sort after those with one.
pub fn top_by_disconnect(dataset: &Dataset, n: usize, favor: Favor) -> Vec<&MovieRecord> {
    let mut candidates: Vec<(f64, &MovieRecord)> = dataset
        .iter()
        .filter_map(|m| m.disconnect().ok().map(|d| (d, m)))
        .collect();

    candidates.sort_by(|(da, a), (db, b)| match favor {
        Favor::Critics => db
            .total_cmp(da)
            .then_with(|| year_order(a.release_year, b.release_year, false)),
        Favor::Audiences => da
            .total_cmp(db)
            .then_with(|| year_order(a.release_year, b.release_year, true)),
    });

    candidates.into_iter().take(n).map(|(_, m)| m).collect()
}

fn year_order(a: Option<i32>, b: Option<i32>, latest_first: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if latest_first => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
