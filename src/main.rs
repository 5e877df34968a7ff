//! CLI entry point for the school dashboard engine.
//!
//! Loads the dataset once per run and prints the network summary, the PEI
//! versus Regular comparison, a single school's analysis, a filtered school
//! list, or a CSV export of per-school scores.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use school_dashboard::analyzers::{
    category_comparison, filter_by_category, group_statistics, overall_score, school_detail,
};
use school_dashboard::dataset::types::sort_by_name;
use school_dashboard::dataset::{DatasetLoader, source_from};
use school_dashboard::output::{append_records, print_json, print_pretty};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_SOURCE: &str = "./dados_escolas.json";

#[derive(Parser)]
#[command(name = "school_dashboard")]
#[command(about = "Aggregates school performance data for the dashboard", long_about = None)]
struct Cli {
    /// Dataset document: a file path or an http(s) URL. Overrides DATASET_SOURCE.
    #[arg(short, long, global = true)]
    source: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the network summary and where the data came from
    Summary,
    /// Compare PEI and Regular schools
    Compare {
        /// Print the full report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show one school's detail and trend analysis
    School {
        /// School id
        #[arg(value_name = "ID")]
        id: String,
    },
    /// List schools sorted by name
    List {
        /// Only schools of this category (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Append one CSV row per school to a file
    Export {
        /// CSV file to append results to
        #[arg(short, long, default_value = "school_scores.csv")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/school_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("school_dashboard.log"));

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

    let location = cli
        .source
        .or_else(|| std::env::var("DATASET_SOURCE").ok())
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string());
    let loader = DatasetLoader::new(source_from(&location));
    let dataset = loader.load().await;

    match cli.command {
        Commands::Summary => {
            let s = &dataset.summary;
            info!(
                origin = ?dataset.origin,
                loaded_at = %dataset.loaded_at.format("%Y-%m-%d %H:%M:%S"),
                total = s.total_schools,
                pei = s.pei_schools,
                regular = s.regular_schools,
                mean_score = %fmt_metric(s.mean_score_overall, ""),
                mean_attendance = %fmt_metric(s.mean_attendance, "%"),
                mean_performance = %fmt_metric(s.mean_performance, ""),
                mean_approval = %fmt_metric(s.mean_approval, "%"),
                "Network summary"
            );
        }
        Commands::Compare { json } => {
            let report = category_comparison(&dataset.schools);
            if json {
                print_json(&report)?;
            } else {
                let groups = [("PEI", &report.groups.pei), ("Regular", &report.groups.regular)];
                for (label, stats) in groups {
                    info!(
                        category = label,
                        count = stats.count,
                        score = %format!("{:.1}", stats.mean_composite_score),
                        attendance = %format!("{:.1}%", stats.mean_attendance),
                        performance = %format!("{:.1}", stats.mean_performance),
                        profile = ?stats.normalized_profile(),
                        "Category statistics"
                    );
                }
                info!(
                    score_difference = %report.score_difference_label(),
                    excellence = %report.excellence_ratio(),
                    "PEI vs Regular"
                );
            }
        }
        Commands::School { id } => {
            let Some(record) = dataset.find_by_id(&id) else {
                bail!("no school with id '{id}'");
            };
            let detail = school_detail(record);
            print_pretty(&detail);
            info!(
                name = %detail.name,
                category = %detail.category,
                students = %detail
                    .student_count
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
                overall = %format!("{:.1}", detail.overall_score),
                "School"
            );
            for statement in &detail.analysis {
                info!("{statement}");
            }
        }
        Commands::List { category } => {
            let mut sorted = filter_by_category(&dataset.schools, category.as_deref());
            sort_by_name(&mut sorted);
            for school in &sorted {
                info!(
                    id = %school.id,
                    name = %school.name,
                    category = %school.category,
                    overall = %format!("{:.1}", overall_score(school)),
                    classification = school.classification.as_deref().unwrap_or(""),
                    "School"
                );
            }
            let stats = group_statistics(&dataset.schools);
            info!(
                listed = sorted.len(),
                pei = stats.pei.count,
                regular = stats.regular.count,
                "School list summary"
            );
        }
        Commands::Export { output } => {
            let rows = append_records(&output, &dataset.schools)?;
            info!(rows, output = %output, "Export complete");
        }
    }

    Ok(())
}

/// Formats an optional summary metric to one decimal, `n/a` when absent.
fn fmt_metric(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{v:.1}{suffix}"),
        None => "n/a".to_string(),
    }
}
