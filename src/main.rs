//! CLI entry point for metro_unfold.
//!
//! Provides subcommands for listing lines, browsing the characteristics available on a
//! line, building chart data for one characteristic, and appending line averages to CSV.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use metro_unfold::{
    catalog::{build_catalog, group_by_category},
    config::{LineFileConfig, Settings},
    fetch::BasicClient,
    lines::LINES,
    loader::{DataSource, load_line},
    output::{append_records, print_json, print_pretty, write_json},
    session::{Explorer, LineState},
    stats::summarize_line,
};
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use tracing::Instrument;
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "metro_unfold")]
#[command(about = "Explore how neighbourhoods change along Paris transit lines", long_about = None)]
struct Cli {
    /// Data directory or base URL holding one CSV per line (overrides METRO_DATA_SOURCE)
    #[arg(short, long, global = true, value_name = "DIR_OR_URL")]
    source: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the known lines with their data files and colors
    Lines,
    /// List the characteristics available on a line, grouped by category
    Characteristics {
        #[arg(short, long, default_value = "METRO 1")]
        line: String,
    },
    /// Build chart data for one characteristic along a line
    Chart {
        #[arg(short, long, default_value = "METRO 1")]
        line: String,

        /// Characteristic key (defaults to the first one in the catalog)
        #[arg(short, long)]
        characteristic: Option<String>,

        /// Hide intermediate points
        #[arg(long, default_value_t = false)]
        stations_only: bool,

        /// Write the chart JSON to this file instead of logging it
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Append the average of every characteristic to a CSV file
    Summary {
        /// Lines to summarize (repeatable; all lines when omitted)
        #[arg(short, long = "line")]
        lines: Vec<String>,

        /// CSV file to append results to
        #[arg(short, long, default_value = "averages.csv")]
        output: String,

        /// Maximum number of lines loaded at once
        #[arg(short, long, default_value_t = 4)]
        concurrency: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/metro_unfold.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("metro_unfold.log"));

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

    let settings = Settings::from_env();
    let source = DataSource::parse(cli.source.as_deref().unwrap_or(&settings.data_source));
    let files = LineFileConfig::from_settings(&settings)?;

    match cli.command {
        Commands::Lines => {
            for line in LINES {
                info!(
                    line = line.name,
                    label = %line.short_label(),
                    file = %source.resource(&files.file_stem(line.name).unwrap_or_default()),
                    color = line.color,
                    "Line"
                );
            }
            for (line, stem) in files.iter() {
                info!(line, file = %source.resource(stem), "Line override");
            }
        }
        Commands::Characteristics { line } => {
            let client = BasicClient::new();
            let records = load_line(&client, &source, &files, &line).await?;
            let Some(sample) = records.first() else {
                warn!(line = %line, "No data available for this line");
                return Ok(());
            };

            let catalog = build_catalog(sample);
            print_pretty(&catalog);
            info!(line = %line, count = catalog.len(), "Characteristics available");
            for (category, members) in group_by_category(&catalog) {
                info!(category = %category, "Category");
                for c in members {
                    info!(key = %c.key, label = %c.label(), "Characteristic");
                }
            }
        }
        Commands::Chart {
            line,
            characteristic,
            stations_only,
            output,
        } => {
            chart(&source, &files, &line, characteristic, stations_only, output).await?;
        }
        Commands::Summary {
            lines,
            output,
            concurrency,
        } => {
            summary(source, files, lines, &output, concurrency).await?;
        }
    }

    Ok(())
}

/// Loads one line through an [`Explorer`] and emits the chart for the selection.
#[tracing::instrument(skip(source, files, output))]
async fn chart(
    source: &DataSource,
    files: &LineFileConfig,
    line: &str,
    characteristic: Option<String>,
    stations_only: bool,
    output: Option<String>,
) -> Result<()> {
    let mut explorer = Explorer::new();
    if let Some(key) = &characteristic {
        explorer.select_characteristic(key);
    }
    explorer.set_stations_only(stations_only);

    let ticket = explorer.select_line(line);
    let client = BasicClient::new();
    let result = load_line(&client, source, files, line).await;
    explorer.finish_load(ticket, result);

    match explorer.state() {
        LineState::Failed { error, .. } => {
            return Err(error.clone()).context("failed to load line data");
        }
        LineState::Loaded(loaded) if loaded.records.is_empty() => {
            warn!("No data available for this line");
            return Ok(());
        }
        _ => {}
    }

    let Some(chart) = explorer.chart() else {
        warn!("Line has no known characteristic to chart");
        return Ok(());
    };
    info!(
        characteristic = %chart.characteristic,
        points = chart.raw.len(),
        stations = chart.stations.len(),
        average = chart.average,
        "Chart built"
    );

    match output {
        Some(path) => write_json(&path, &chart)?,
        None => print_json(&chart)?,
    }
    Ok(())
}

/// Loads lines concurrently and appends one CSV row per (line, characteristic).
///
/// Rows are written in the order the lines were requested, once every load has finished.
#[tracing::instrument(skip(source, files, lines), fields(line_count))]
async fn summary(
    source: DataSource,
    files: LineFileConfig,
    lines: Vec<String>,
    output: &str,
    concurrency: usize,
) -> Result<()> {
    let lines = if lines.is_empty() {
        LINES.iter().map(|l| l.name.to_string()).collect()
    } else {
        lines
    };
    tracing::Span::current().record("line_count", lines.len());

    let semaphore = Arc::new(tokio::sync::Semaphore::new(concurrency.max(1)));
    let source = Arc::new(source);
    let files = Arc::new(files);

    let mut tasks = vec![];

    for line in &lines {
        let sem = semaphore.clone();
        let source = source.clone();
        let files = files.clone();
        let line = line.clone();

        let line_span = tracing::info_span!("summarize_line", line = %line);

        let task = tokio::spawn(
            async move {
                let _permit = sem.acquire().await?;
                let client = BasicClient::new();
                let records = load_line(&client, &source, &files, &line).await?;
                let catalog = records.first().map(build_catalog).unwrap_or_default();
                Ok::<_, anyhow::Error>(summarize_line(&line, &records, &catalog))
            }
            .instrument(line_span),
        );

        tasks.push(task);
    }

    let mut written = 0;
    for (line, task) in lines.iter().zip(tasks) {
        match task.await {
            Ok(Ok(rows)) if rows.is_empty() => {
                warn!(line = %line, "No data available for this line");
            }
            Ok(Ok(rows)) => {
                append_records(output, &rows)?;
                written += rows.len();
                info!(line = %line, rows = rows.len(), "Line summarized");
            }
            Ok(Err(e)) => error!(line = %line, error = %e, "Line summary failed"),
            Err(e) => error!(line = %line, error = %e, "Line summary task panicked"),
        }
    }

    info!(output, rows = written, "Summary complete");
    Ok(())
}
