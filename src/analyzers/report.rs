use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::analyzers::aggregate::{decade_counts, sort_by_disconnect, summarize};
use crate::analyzers::describe::describe_dataset;
use crate::analyzers::select::{audiences_favor, critics_favor};
use crate::analyzers::types::{DecadeCount, Description, DisconnectRow, GroupKey, GroupSummary};
use crate::config::PipelineConfig;
use crate::pipeline::Dataset;

/// Everything the full report prints, in one serializable value.
#[derive(Debug, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub config: PipelineConfig,
    pub dataset_size: usize,
    pub descriptions: Vec<Description>,
    pub decade_counts: Vec<DecadeCount>,
    pub critics_favor: Vec<DisconnectRow>,
    pub audiences_favor: Vec<DisconnectRow>,
    pub genres: Vec<GroupSummary>,
    pub decades: Vec<GroupSummary>,
}

/// Runs every analysis over `dataset`.
#[tracing::instrument(skip_all, fields(rows = dataset.len()))]
pub fn build_report(dataset: &Dataset, config: &PipelineConfig) -> Report {
    let genres = sort_by_disconnect(summarize(dataset, GroupKey::Genre, config.min_group_count));
    let decades = sort_by_disconnect(summarize(dataset, GroupKey::Decade, config.min_group_count));
    info!(
        genres = genres.len(),
        decades = decades.len(),
        "Grouped summaries ready"
    );

    Report {
        generated_at: Utc::now(),
        config: config.clone(),
        dataset_size: dataset.len(),
        descriptions: describe_dataset(dataset),
        decade_counts: decade_counts(dataset),
        critics_favor: critics_favor(dataset, config.top_n)
            .into_iter()
            .map(DisconnectRow::from)
            .collect(),
        audiences_favor: audiences_favor(dataset, config.top_n)
            .into_iter()
            .map(DisconnectRow::from)
            .collect(),
        genres,
        decades,
    }
}
