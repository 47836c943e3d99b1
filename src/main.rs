//! CLI entry point for the movie disconnect analysis.
//!
//! Provides subcommands for the full report, descriptive statistics,
//! critic/audience disconnect rankings, grouped summaries, and CSV export.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use movie_disconnect::analyzers::aggregate::{sort_by_disconnect, summarize};
use movie_disconnect::analyzers::describe::describe_dataset;
use movie_disconnect::analyzers::report::build_report;
use movie_disconnect::analyzers::select::select_disconnect;
use movie_disconnect::analyzers::types::{DisconnectRow, GroupKey};
use movie_disconnect::config::{PipelineConfig, TieBreak};
use movie_disconnect::loader::load_records;
use movie_disconnect::output::{
    export_report, render_descriptions, render_disconnect, render_report, render_summaries,
    write_json,
};
use movie_disconnect::pipeline::{Dataset, build_dataset};
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "movie_disconnect")]
#[command(about = "Compare critic and audience scores in a Rotten Tomatoes movie export", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args)]
struct PipelineArgs {
    /// Path to the movie CSV
    #[arg(value_name = "CSV")]
    input: PathBuf,

    /// Number of most-reviewed movies to keep
    #[arg(short, long, default_value_t = 5000)]
    limit: usize,

    /// Minimum movies for a genre or decade to be reported
    #[arg(long, default_value_t = 100)]
    min_group_count: usize,

    /// Rank by audience-review count only, without the critic-count tie-break
    #[arg(long, default_value_t = false)]
    no_tie_break: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum By {
    Genre,
    Decade,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full report
    Report {
        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Length of each disconnect list
        #[arg(short = 'n', long, default_value_t = 10)]
        top_n: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Print descriptive statistics for scores and review counts
    Describe {
        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// List the movies with the largest critic/audience disconnect
    Disconnect {
        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Number of movies; negative lists movies audiences rate higher
        #[arg(short = 'n', long, default_value_t = 10, allow_negative_numbers = true)]
        count: i64,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Print the genre or decade summary
    Summary {
        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Column to group by
        #[arg(long, value_enum, default_value_t = By::Genre)]
        by: By,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Write the working dataset and all report tables to a directory
    Export {
        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Length of each disconnect list
        #[arg(short = 'n', long, default_value_t = 10)]
        top_n: usize,

        /// Directory to write CSV and JSON files into
        #[arg(short, long, default_value = "out")]
        output_dir: PathBuf,
    },
}

impl PipelineArgs {
    fn config(&self, top_n: usize) -> PipelineConfig {
        PipelineConfig {
            limit: self.limit,
            min_group_count: self.min_group_count,
            top_n,
            tie_break: if self.no_tie_break {
                TieBreak::None
            } else {
                TieBreak::CriticCount
            },
            ..PipelineConfig::default()
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/movie_disconnect.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("movie_disconnect.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Report {
            pipeline,
            top_n,
            format,
        } => {
            let config = pipeline.config(top_n);
            let dataset = load_dataset(&pipeline.input, &config)?;
            let report = build_report(&dataset, &config);

            match format {
                Format::Table => render_report(&mut out, &report)?,
                Format::Json => write_json(&mut out, &report)?,
            }
        }
        Commands::Describe { pipeline, format } => {
            let config = pipeline.config(0);
            let dataset = load_dataset(&pipeline.input, &config)?;
            let descriptions = describe_dataset(&dataset);

            match format {
                Format::Table => render_descriptions(&mut out, &descriptions)?,
                Format::Json => write_json(&mut out, &descriptions)?,
            }
        }
        Commands::Disconnect {
            pipeline,
            count,
            format,
        } => {
            let config = pipeline.config(count.unsigned_abs() as usize);
            let dataset = load_dataset(&pipeline.input, &config)?;
            let rows: Vec<DisconnectRow> = select_disconnect(&dataset, count)
                .into_iter()
                .map(DisconnectRow::from)
                .collect();

            let heading = if count < 0 {
                "Audiences rate higher"
            } else {
                "Critics rate higher"
            };
            match format {
                Format::Table => render_disconnect(&mut out, heading, &rows)?,
                Format::Json => write_json(&mut out, &rows)?,
            }
        }
        Commands::Summary {
            pipeline,
            by,
            format,
        } => {
            let config = pipeline.config(0);
            let dataset = load_dataset(&pipeline.input, &config)?;
            let (key, heading) = match by {
                By::Genre => (GroupKey::Genre, "By primary genre"),
                By::Decade => (GroupKey::Decade, "By release decade"),
            };
            let rows = sort_by_disconnect(summarize(&dataset, key, config.min_group_count));

            match format {
                Format::Table => render_summaries(&mut out, heading, &rows)?,
                Format::Json => write_json(&mut out, &rows)?,
            }
        }
        Commands::Export {
            pipeline,
            top_n,
            output_dir,
        } => {
            let config = pipeline.config(top_n);
            let dataset = load_dataset(&pipeline.input, &config)?;
            let report = build_report(&dataset, &config);

            for path in export_report(&output_dir, &dataset, &report)? {
                writeln!(out, "{}", path.display())?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

/// Loads the CSV and runs it through the pipeline. A load failure aborts the run.
#[tracing::instrument(skip_all, fields(input = %input.display()))]
fn load_dataset(input: &Path, config: &PipelineConfig) -> Result<Dataset> {
    let records =
        load_records(input).with_context(|| format!("failed to load {}", input.display()))?;
    let dataset = build_dataset(records, config);

    if dataset.is_empty() {
        info!("Working dataset is empty; nothing to analyze");
    }
    Ok(dataset)
}
