//! Data types produced by the analyzers.

use serde::Serialize;
use std::fmt;

use crate::record::MovieRecord;

/// Column a [`GroupSummary`] is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Genre,
    Decade,
}

/// Value of a group key. All rows of one summary share a variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum GroupLabel {
    Genre(String),
    Decade(i32),
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupLabel::Genre(genre) => f.write_str(genre),
            GroupLabel::Decade(decade) => write!(f, "{}s", decade),
        }
    }
}

/// Per-group averages of critic score, audience score and disconnect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub group: GroupLabel,
    pub mean_critic_score: Option<f64>,
    pub mean_audience_score: Option<f64>,
    pub count: usize,
    pub mean_critical_disconnect: Option<f64>,
}

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Description {
    pub field: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Number of working-dataset movies released in a decade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecadeCount {
    pub decade: i32,
    pub count: usize,
}

/// One line of a critics-favor or audiences-favor listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisconnectRow {
    pub title_with_year: String,
    pub primary_genre: String,
    pub synopsis: Option<String>,
    pub critic_score: Option<f64>,
    pub audience_score: Option<f64>,
    pub critical_disconnect: Option<f64>,
}

impl From<&MovieRecord> for DisconnectRow {
    fn from(m: &MovieRecord) -> Self {
        DisconnectRow {
            title_with_year: m.title_with_year.clone(),
            primary_genre: m.primary_genre.clone(),
            synopsis: m.synopsis.clone(),
            critic_score: m.critic_score,
            audience_score: m.audience_score,
            critical_disconnect: m.critical_disconnect,
        }
    }
}
