//! Output formatting and persistence for analysis results.
//!
//! Supports fixed-width text tables, JSON serialization, and CSV export.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::analyzers::report::Report;
use crate::analyzers::types::{DecadeCount, Description, DisconnectRow, GroupSummary};
use crate::pipeline::Dataset;

const TITLE_WIDTH: usize = 40;
const GENRE_WIDTH: usize = 20;
const SYNOPSIS_WIDTH: usize = 60;

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}

/// Shortens `s` to at most `width` characters, marking the cut with `...`.
fn clip(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let kept: String = s.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

/// Writes `value` as pretty-printed JSON.
pub fn write_json<W: Write>(out: &mut W, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Writes `rows` to a new CSV file at `path`, replacing any existing file.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV");

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

pub fn render_descriptions<W: Write>(out: &mut W, descriptions: &[Description]) -> Result<()> {
    writeln!(
        out,
        "{:<20} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "field", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    )?;
    for d in descriptions {
        writeln!(
            out,
            "{:<20} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            d.field,
            d.count,
            fmt_opt(d.mean, 2),
            fmt_opt(d.std, 2),
            fmt_opt(d.min, 2),
            fmt_opt(d.q25, 2),
            fmt_opt(d.median, 2),
            fmt_opt(d.q75, 2),
            fmt_opt(d.max, 2),
        )?;
    }
    Ok(())
}

pub fn render_disconnect<W: Write>(out: &mut W, heading: &str, rows: &[DisconnectRow]) -> Result<()> {
    writeln!(out, "{}", heading)?;
    writeln!(
        out,
        "{:<tw$} {:<gw$} {:>7} {:>8}  {}",
        "title",
        "genre",
        "critic",
        "audience",
        "synopsis",
        tw = TITLE_WIDTH,
        gw = GENRE_WIDTH
    )?;
    for row in rows {
        writeln!(
            out,
            "{:<tw$} {:<gw$} {:>7} {:>8}  {}",
            clip(&row.title_with_year, TITLE_WIDTH),
            clip(&row.primary_genre, GENRE_WIDTH),
            fmt_opt(row.critic_score, 0),
            fmt_opt(row.audience_score, 0),
            clip(row.synopsis.as_deref().unwrap_or(""), SYNOPSIS_WIDTH),
            tw = TITLE_WIDTH,
            gw = GENRE_WIDTH
        )?;
    }
    Ok(())
}

pub fn render_summaries<W: Write>(out: &mut W, heading: &str, rows: &[GroupSummary]) -> Result<()> {
    writeln!(out, "{}", heading)?;
    writeln!(
        out,
        "{:<gw$} {:>6} {:>12} {:>14} {:>12}",
        "group",
        "count",
        "mean_critic",
        "mean_audience",
        "disconnect",
        gw = GENRE_WIDTH
    )?;
    for row in rows {
        writeln!(
            out,
            "{:<gw$} {:>6} {:>12} {:>14} {:>12}",
            clip(&row.group.to_string(), GENRE_WIDTH),
            row.count,
            fmt_opt(row.mean_critic_score, 2),
            fmt_opt(row.mean_audience_score, 2),
            fmt_opt(row.mean_critical_disconnect, 2),
            gw = GENRE_WIDTH
        )?;
    }
    Ok(())
}

pub fn render_decade_counts<W: Write>(out: &mut W, counts: &[DecadeCount]) -> Result<()> {
    writeln!(out, "{:<8} {:>6}", "decade", "count")?;
    for c in counts {
        writeln!(out, "{:<8} {:>6}", format!("{}s", c.decade), c.count)?;
    }
    Ok(())
}

/// Prints every section of the report as text tables.
pub fn render_report<W: Write>(out: &mut W, report: &Report) -> Result<()> {
    writeln!(out, "Working dataset: {} movies", report.dataset_size)?;
    writeln!(out)?;
    render_descriptions(out, &report.descriptions)?;
    writeln!(out)?;
    render_decade_counts(out, &report.decade_counts)?;
    writeln!(out)?;
    render_disconnect(out, "Critics rate higher", &report.critics_favor)?;
    writeln!(out)?;
    render_disconnect(out, "Audiences rate higher", &report.audiences_favor)?;
    writeln!(out)?;
    render_summaries(out, "By primary genre", &report.genres)?;
    writeln!(out)?;
    render_summaries(out, "By release decade", &report.decades)?;
    Ok(())
}

/// Writes the working dataset and every report table into `dir`.
///
/// Returns the paths written.
pub fn export_report(dir: &Path, dataset: &Dataset, report: &Report) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut written = Vec::new();
    let mut csv_file = |name: &str| {
        let path = dir.join(name);
        written.push(path.clone());
        path
    };

    write_csv(&csv_file("dataset.csv"), dataset.records())?;
    write_csv(&csv_file("describe.csv"), &report.descriptions)?;
    write_csv(&csv_file("decade_counts.csv"), &report.decade_counts)?;
    write_csv(&csv_file("critics_favor.csv"), &report.critics_favor)?;
    write_csv(&csv_file("audiences_favor.csv"), &report.audiences_favor)?;
    write_csv(&csv_file("genres.csv"), &report.genres)?;
    write_csv(&csv_file("decades.csv"), &report.decades)?;

    let json_path = csv_file("report.json");
    let mut file = fs::File::create(&json_path)
        .with_context(|| format!("creating {}", json_path.display()))?;
    write_json(&mut file, report)?;

    info!(dir = %dir.display(), files = written.len(), "Report exported");
    Ok(written)
}
