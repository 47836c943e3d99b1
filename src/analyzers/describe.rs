use crate::analyzers::types::Description;
use crate::analyzers::utility::{mean, quantile, stddev};
use crate::pipeline::Dataset;
use crate::record::MovieRecord;

/// Numeric columns summarized by [`describe_dataset`], in output order.
const DESCRIBED_FIELDS: &[(&str, fn(&MovieRecord) -> Option<f64>)] = &[
    ("critic_score", |m| m.critic_score),
    ("audience_score", |m| m.audience_score),
    ("critic_count", |m| m.critic_count.map(f64::from)),
    ("audience_count", |m| m.audience_count.map(f64::from)),
    ("critical_disconnect", |m| m.critical_disconnect),
];

/// Count, mean, standard deviation, min, quartiles and max of `values`.
///
/// Non-finite values are ignored.
pub fn describe(field: &str, values: &[f64]) -> Description {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);

    let avg = mean(&sorted);

    Description {
        field: field.to_string(),
        count: sorted.len(),
        mean: avg,
        std: avg.and_then(|m| stddev(&sorted, m)),
        min: sorted.first().copied(),
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted.last().copied(),
    }
}

/// Describes the score, count and disconnect columns of the working dataset.
pub fn describe_dataset(dataset: &Dataset) -> Vec<Description> {
    DESCRIBED_FIELDS
        .iter()
        .map(|(name, get)| {
            let values: Vec<f64> = dataset.iter().filter_map(get).collect();
            describe(name, &values)
        })
        .collect()
}
