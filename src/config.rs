//! Tunables for the pipeline and report.

use serde::Serialize;

/// How the ranker breaks ties in audience-review count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TieBreak {
    /// Ties are ordered by critic-review count, descending.
    #[default]
    CriticCount,
    /// Single-key sort; tied records keep their filtered order.
    None,
}

/// Settings shared by every stage.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineConfig {
    /// Size of the working dataset after ranking.
    pub limit: usize,
    /// Minimum records a genre or decade needs to appear in a summary.
    pub min_group_count: usize,
    /// Length of the critics-favor / audiences-favor lists.
    pub top_n: usize,
    pub tie_break: TieBreak,
    /// Primary genre dropped by the filter stage.
    pub excluded_genre: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            limit: 5000,
            min_group_count: 100,
            top_n: 10,
            tie_break: TieBreak::CriticCount,
            excluded_genre: "Documentary".to_string(),
        }
    }
}
