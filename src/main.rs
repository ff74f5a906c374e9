//! CLI entry point for the COVID-19 Senegal dashboard pipeline.
//!
//! Every subcommand reloads the case table and rebuilds the dashboard from
//! scratch before presenting one view of it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use covid_senegal::config::Settings;
use covid_senegal::i18n::Lang;
use covid_senegal::output::{print_json, print_pretty, write_daily_csv, write_transmission_csv};
use covid_senegal::pipeline::{Dashboard, run};
use covid_senegal::report::render_summary;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "covid_senegal")]
#[command(about = "COVID-19 Senegal case aggregation and dashboard figures", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the headline figures
    Summary {
        /// Case table (defaults to COVID_DATA_PATH)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Display language (defaults to DASHBOARD_LANG)
        #[arg(short, long, value_enum, ignore_case = true)]
        lang: Option<Lang>,

        /// Print the full dashboard as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Export the cumulative daily series as CSV
    Daily {
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// CSV file to write
        #[arg(short, long, default_value = "daily_aggregates.csv")]
        output: PathBuf,
    },
    /// Export the merged transmission-factor series as CSV
    Transmission {
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// CSV file to write
        #[arg(short, long, default_value = "transmission.csv")]
        output: PathBuf,
    },
    /// Print the population breakdown as JSON
    Population {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let settings = Settings::from_env()?;

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = settings
        .log_file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = settings
        .log_file_path
        .file_name()
        .unwrap_or(OsStr::new("covid_senegal.log"));

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
        Commands::Summary { input, lang, json } => {
            let dashboard = load(input, &settings)?;
            if json {
                print_json(&dashboard)?;
            } else {
                print!("{}", render_summary(&dashboard, lang.unwrap_or(settings.lang)));
            }
        }
        Commands::Daily { input, output } => {
            let dashboard = load(input, &settings)?;
            write_daily_csv(&output, &dashboard.daily)
                .with_context(|| format!("failed to write {}", output.display()))?;
        }
        Commands::Transmission { input, output } => {
            let dashboard = load(input, &settings)?;
            write_transmission_csv(&output, &dashboard.transmission)
                .with_context(|| format!("failed to write {}", output.display()))?;
        }
        Commands::Population { input } => {
            let dashboard = load(input, &settings)?;
            print_json(&dashboard.population)?;
        }
    }

    Ok(())
}

/// Runs the pipeline over `input`, or the configured data path.
fn load(input: Option<PathBuf>, settings: &Settings) -> Result<Dashboard> {
    let path = input.unwrap_or_else(|| settings.data_path.clone());
    info!(path = %path.display(), "Loading case table");

    let dashboard = run(&path)
        .with_context(|| format!("failed to build dashboard from {}", path.display()))?;
    print_pretty(&dashboard);
    Ok(dashboard)
}
