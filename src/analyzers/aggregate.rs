use std::collections::BTreeMap;

use tracing::debug;

use crate::analyzers::types::{DecadeCount, GroupKey, GroupLabel, GroupSummary};
use crate::analyzers::utility::mean;
use crate::error::MissingFieldError;
use crate::pipeline::Dataset;
use crate::record::MovieRecord;

fn label_for(key: GroupKey, m: &MovieRecord) -> Result<GroupLabel, MissingFieldError> {
    match key {
        GroupKey::Genre if m.primary_genre.is_empty() => Err(MissingFieldError::PrimaryGenre),
        GroupKey::Genre => Ok(GroupLabel::Genre(m.primary_genre.clone())),
        GroupKey::Decade => m.decade().map(GroupLabel::Decade),
    }
}

/// Partitions the dataset by `key` and averages scores within each group.
///
/// Records missing the key are left out. Groups with fewer than `min_count`
/// records are dropped. Rows come back ordered by group label.
pub fn summarize(dataset: &Dataset, key: GroupKey, min_count: usize) -> Vec<GroupSummary> {
    let mut groups: BTreeMap<GroupLabel, Vec<&MovieRecord>> = BTreeMap::new();
    let mut unkeyed = 0usize;

    for m in dataset {
        match label_for(key, m) {
            Ok(label) => groups.entry(label).or_default().push(m),
            Err(_) => unkeyed += 1,
        }
    }

    let total_groups = groups.len();
    let summaries: Vec<GroupSummary> = groups
        .into_iter()
        .filter(|(_, members)| members.len() >= min_count)
        .map(|(group, members)| summarize_group(group, &members))
        .collect();

    debug!(
        ?key,
        unkeyed,
        total_groups,
        reported = summaries.len(),
        min_count,
        "Grouped summary computed"
    );
    summaries
}

fn summarize_group(group: GroupLabel, members: &[&MovieRecord]) -> GroupSummary {
    let critic: Vec<f64> = members.iter().filter_map(|m| m.critic_score).collect();
    let audience: Vec<f64> = members.iter().filter_map(|m| m.audience_score).collect();
    let disconnect: Vec<f64> = members
        .iter()
        .filter_map(|m| m.disconnect().ok())
        .collect();

    GroupSummary {
        group,
        mean_critic_score: mean(&critic),
        mean_audience_score: mean(&audience),
        count: members.len(),
        mean_critical_disconnect: mean(&disconnect),
    }
}

/// Sorts summaries by mean disconnect, largest first. Groups without a mean go last.
pub fn sort_by_disconnect(mut summaries: Vec<GroupSummary>) -> Vec<GroupSummary> {
    summaries.sort_by(|a, b| {
        match (a.mean_critical_disconnect, b.mean_critical_disconnect) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });
    summaries
}

/// Movies per release decade, ascending, with no minimum count.
pub fn decade_counts(dataset: &Dataset) -> Vec<DecadeCount> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for decade in dataset.iter().filter_map(|m| m.decade().ok()) {
        *counts.entry(decade).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(decade, count)| DecadeCount { decade, count })
        .collect()
}
