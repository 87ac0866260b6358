//! CLI entry point for the exercise dataset tool.
//!
//! Fetches the public exercise database, saves it as JSON and CSV, reports
//! frequency breakdowns, runs ad hoc filters and lookups, and exports the
//! reduced projection consumed by the Gymmando app.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use exercise_db::{
    Config, Dataset,
    analysis::analyze,
    export::{export_reduced, write_reduced},
    fetch::{BasicClient, load_source},
    output::{print_json, print_report, write_json},
    query::{Criteria, filter, find_by_name},
    store::save,
};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "exercise_db")]
#[command(about = "Fetch, analyze and export the free exercise database", long_about = None)]
struct Cli {
    /// Directory for saved and exported files [env: EXERCISE_OUTPUT_DIR]
    #[arg(short = 'd', long, global = true)]
    output_dir: Option<PathBuf>,

    /// Request timeout in seconds [env: EXERCISE_TIMEOUT_SECS]
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, save, analyze, sample a few queries and export
    Run {
        /// URL or local JSON file (defaults to the configured source)
        #[arg(short, long)]
        source: Option<String>,
    },
    /// Log frequency breakdowns for the dataset
    Analyze {
        #[arg(short, long)]
        source: Option<String>,

        /// Log the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Filter by equipment, level and primary muscle (all optional, combined with AND)
    Filter {
        #[arg(short, long)]
        source: Option<String>,

        #[arg(short, long)]
        equipment: Option<String>,

        #[arg(short, long)]
        level: Option<String>,

        #[arg(short, long)]
        muscle: Option<String>,

        /// Write the matching records to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Find the first exercise whose name contains NAME (case-insensitive)
    Find {
        #[arg(value_name = "NAME")]
        name: String,

        #[arg(short, long)]
        source: Option<String>,
    },
    /// Write the reduced projection for the app
    Export {
        #[arg(short, long)]
        source: Option<String>,

        /// File name inside the output directory [env: EXERCISE_EXPORT_FILE]
        #[arg(short = 'f', long)]
        output_file: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let _file_guard = init_tracing();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout = Duration::from_secs(secs.max(1));
    }

    let client = BasicClient::new(config.timeout)?;

    match cli.command {
        Commands::Run { source } => {
            let source = source.unwrap_or_else(|| config.source_url.clone());
            run_pipeline(&client, &config, &source).await?;
        }
        Commands::Analyze { source, json } => {
            let dataset = load(&client, &config, source).await?;
            let report = analyze(&dataset);
            if json {
                print_json(&report)?;
            } else {
                print_report(&report);
            }
        }
        Commands::Filter {
            source,
            equipment,
            level,
            muscle,
            output,
        } => {
            let dataset = load(&client, &config, source).await?;
            let criteria = Criteria {
                equipment,
                level,
                muscle,
            };
            let matches = filter(&dataset, &criteria);
            info!(matched = matches.len(), total = dataset.len(), ?criteria, "Filtered exercises");

            for record in &matches {
                info!(
                    id = record.id().unwrap_or("-"),
                    name = record.name().unwrap_or("-"),
                    "Match"
                );
            }

            if let Some(path) = output {
                write_json(&path, &matches)?;
                info!(path = %path.display(), "Saved filtered exercises");
            }
        }
        Commands::Find { name, source } => {
            let dataset = load(&client, &config, source).await?;
            match find_by_name(&dataset, &name) {
                Some(record) => info!("{}", serde_json::to_string_pretty(record)?),
                None => warn!(query = %name, "No exercise found"),
            }
        }
        Commands::Export {
            source,
            output_file,
        } => {
            if let Some(file) = output_file {
                config.export_file = file;
            }
            let dataset = load(&client, &config, source).await?;
            write_reduced(&export_reduced(&dataset), &config.export_path())?;
        }
    }

    Ok(())
}

/// Colored stderr plus a JSON daily-rolling log file. The returned guard must
/// live until exit so buffered file lines are flushed.
fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/exercise_db.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("exercise_db.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", "info"));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", "debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    file_guard
}

fn env_filter(var: &str, default: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default))
}

async fn load(client: &BasicClient, config: &Config, source: Option<String>) -> Result<Dataset> {
    let source = source.unwrap_or_else(|| config.source_url.clone());
    Ok(load_source(client, &source).await?)
}

/// Fetch → save → analyze → sample queries → export.
#[tracing::instrument(skip(client, config))]
async fn run_pipeline(client: &BasicClient, config: &Config, source: &str) -> Result<()> {
    let dataset = load_source(client, source).await?;

    let paths = save(&dataset, &config.output_dir)?;
    info!(json = %paths.json.display(), csv = %paths.csv.display(), "Raw dataset saved");

    print_report(&analyze(&dataset));

    let samples = [
        ("Dumbbell", Criteria::new().equipment("dumbbell")),
        ("Beginner", Criteria::new().level("beginner")),
        ("Chest", Criteria::new().muscle("chest")),
    ];
    for (label, criteria) in &samples {
        let count = filter(&dataset, criteria).len();
        info!(count, "{label} exercises");
    }

    if let Some(found) = find_by_name(&dataset, "bench press") {
        info!(
            name = found.name().unwrap_or_default(),
            steps = found.instructions().len(),
            "Found exercise"
        );
    }

    write_reduced(&export_reduced(&dataset), &config.export_path())?;

    Ok(())
}
