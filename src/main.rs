//! CLI entry point for the fuel analytics tool.
//!
//! Provides subcommands for analyzing local record exports, fetching records
//! from a Supabase/PostgREST store, and refreshing the report on an interval.

use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use fuel_analytics::{
    analytics::AnalyticsReport,
    config::{AnalyticsConfig, RestConfig},
    output::{ReportSummary, append_summary, print_json, print_pretty, write_report},
    records::parse_local_datetime,
    source::{FileSource, RecordSource, RestSource, refresh},
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "fuel_analytics")]
#[command(about = "Fuel expense and vehicle maintenance analytics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ReportArgs {
    /// Reference date for calendar windows (defaults to the local clock)
    #[arg(long, value_name = "DATETIME")]
    now: Option<String>,

    /// JSON file overriding analytics constants
    #[arg(short, long)]
    config: Option<String>,

    /// File to write the JSON report to
    #[arg(short, long, default_value = "report.json")]
    output: String,

    /// CSV file to append a summary row to
    #[arg(long)]
    history: Option<String>,

    /// Log the full report as JSON instead of the debug dump
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze local CSV/JSON record exports
    Analyze {
        /// Fuel purchases CSV
        #[arg(short, long, default_value = "fuel.csv")]
        fuel: PathBuf,

        /// Service records CSV
        #[arg(short, long, default_value = "services.csv")]
        services: PathBuf,

        /// Vehicle profile JSON
        #[arg(short, long)]
        vehicle: Option<PathBuf>,

        #[command(flatten)]
        report: ReportArgs,
    },
    /// Fetch records from the remote store and analyze them once
    Fetch {
        #[command(flatten)]
        report: ReportArgs,
    },
    /// Re-fetch and recompute the report on a fixed interval
    Watch {
        /// Seconds between refreshes
        #[arg(short, long, default_value_t = 300)]
        interval: u64,

        /// Number of refreshes (0 = infinite)
        #[arg(short = 'n', long, default_value_t = 0)]
        count: usize,

        #[command(flatten)]
        report: ReportArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/fuel_analytics.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("fuel_analytics.log"));

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

    match cli.command {
        Commands::Analyze {
            fuel,
            services,
            vehicle,
            report,
        } => {
            let source = FileSource::new(fuel, services, vehicle);
            run_once(&source, &report).await?;
        }
        Commands::Fetch { report } => {
            let source = RestSource::from_config(&RestConfig::from_env()?)?;
            run_once(&source, &report).await?;
        }
        Commands::Watch {
            interval,
            count,
            report,
        } => {
            let source = RestSource::from_config(&RestConfig::from_env()?)?;
            watch(&source, &report, interval, count).await?;
        }
    }

    Ok(())
}

fn reference_time(raw: Option<&str>) -> Result<NaiveDateTime> {
    match raw {
        Some(raw) => {
            parse_local_datetime(raw).ok_or_else(|| anyhow!("invalid --now value '{raw}'"))
        }
        None => Ok(Local::now().naive_local()),
    }
}

fn load_config(args: &ReportArgs) -> Result<AnalyticsConfig> {
    match &args.config {
        Some(path) => AnalyticsConfig::load(path),
        None => Ok(AnalyticsConfig::default()),
    }
}

/// Writes the report and, if requested, its summary row.
fn emit(report: &AnalyticsReport, now: NaiveDateTime, args: &ReportArgs) -> Result<()> {
    if args.json {
        print_json(report)?;
    } else {
        print_pretty(report);
    }
    write_report(&args.output, report)?;

    if let Some(history) = &args.history {
        append_summary(history, &ReportSummary::from_report(report, now))
            .with_context(|| format!("appending history to {history}"))?;
    }

    info!(
        output = %args.output,
        monthly = report.monthly_expenses,
        yearly = report.yearly_expenses,
        avg_mpg = report.avg_mpg,
        "Report written"
    );
    Ok(())
}

#[tracing::instrument(skip_all, fields(output = %args.output))]
async fn run_once<S: RecordSource>(source: &S, args: &ReportArgs) -> Result<()> {
    let config = load_config(args)?;
    let now = reference_time(args.now.as_deref())?;
    let report = refresh(source, now, &config).await?;
    emit(&report, now, args)
}

/// Refreshes every `interval` seconds. A failed round is logged and the
/// previously written report stays in place until the next success.
#[tracing::instrument(skip(source, args))]
async fn watch<S: RecordSource>(
    source: &S,
    args: &ReportArgs,
    interval: u64,
    count: usize,
) -> Result<()> {
    let config = load_config(args)?;

    if count == 0 {
        info!(interval, "Refreshing indefinitely. Press Ctrl+C to stop.");
    } else {
        info!(count, interval, "Starting refresh rounds");
    }

    let mut round = 0;

    loop {
        // Check if we've reached the refresh limit (0 = infinite)
        if count > 0 && round >= count {
            break;
        }

        round += 1;

        let now = reference_time(args.now.as_deref())?;
        match refresh(source, now, &config).await {
            Ok(report) => {
                if let Err(e) = emit(&report, now, args) {
                    error!(round, error = %e, "Failed to write report");
                }
            }
            Err(e) => error!(round, error = %e, "Refresh failed, keeping previous report"),
        }

        if count == 0 || round < count {
            info!(interval, "Waiting before next refresh");
            tokio::time::sleep(tokio::time::Duration::from_secs(interval)).await;
        }
    }

    info!(rounds = round, "Finished refreshing");
    Ok(())
}
