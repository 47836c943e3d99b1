//! Queries and summaries over the working dataset.
//!
//! This module computes descriptive statistics, ranks movies by how far
//! critic and audience scores diverge, and averages scores per genre and
//! per release decade.

pub mod aggregate;
pub mod describe;
pub mod report;
pub mod select;
pub mod types;
pub mod utility;
