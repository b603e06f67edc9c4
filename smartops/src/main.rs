//! Entry point for the smartops TUI. Parses args and runs the App.

use std::env;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use smartops::api::{DataService, Latency, MockService};
use smartops::app::App;
use smartops::config::{config_path, load_config, Config};
use smartops::export::write_anomalies_csv;
use smartops::filter::{AnomalyFilter, SeverityFilter};
use smartops::storage::{storage_path, LocalStorage, TOKEN_KEY};

const USAGE_FLAGS: &str = "[--config PATH|-c PATH] [--no-delay] [--logout] \
                           [--export-anomalies DIR [--severity LEVEL] [--search TEXT]] [--dry-run]";

#[derive(Debug, Default)]
struct ParsedArgs {
    config: Option<PathBuf>,
    no_delay: bool,
    logout: bool,
    export_dir: Option<PathBuf>,
    severity: SeverityFilter,
    search: Option<String>,
    dry_run: bool,
}

enum ArgsError {
    Help(String),
    Invalid(String),
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, ArgsError> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "smartops".into());
    let usage = format!("Usage: {prog} {USAGE_FLAGS}");
    let mut parsed = ParsedArgs::default();

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                return Err(ArgsError::Help(format!(
                    "{usage}\n\n\
                     Keys: 1-4 switch pages, L logs out, q quits.\n\
                     Severity levels: all, critical, high, medium, low"
                )));
            }
            "--config" | "-c" => {
                parsed.config = it.next().map(PathBuf::from);
            }
            "--no-delay" => parsed.no_delay = true,
            "--logout" => parsed.logout = true,
            "--dry-run" => parsed.dry_run = true,
            "--export-anomalies" => {
                parsed.export_dir = it.next().map(PathBuf::from);
            }
            "--search" => parsed.search = it.next(),
            "--severity" => {
                let level = it.next().unwrap_or_default();
                parsed.severity = SeverityFilter::parse(&level).ok_or_else(|| {
                    ArgsError::Invalid(format!("Unknown severity '{level}'. {usage}"))
                })?;
            }
            _ if arg.starts_with("--config=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        parsed.config = Some(PathBuf::from(v));
                    }
                }
            }
            _ => {
                return Err(ArgsError::Invalid(format!(
                    "Unexpected argument '{arg}'. {usage}"
                )));
            }
        }
    }
    Ok(parsed)
}

fn init_logging(config: &Config) -> anyhow::Result<()> {
    let path = config.log_file();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::options().create(true).append(true).open(&path)?;
    let filter = EnvFilter::try_from_env("SMARTOPS_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(ArgsError::Help(msg)) => {
            println!("{msg}");
            return Ok(());
        }
        Err(ArgsError::Invalid(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    let config = load_config(&parsed.config.clone().unwrap_or_else(config_path));
    if parsed.dry_run {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }
    init_logging(&config)?;

    let latency = if parsed.no_delay || !config.simulate_latency {
        Latency::none()
    } else {
        Latency::default()
    };
    let service = MockService::new(latency);
    let mut storage = LocalStorage::open(storage_path());

    if parsed.logout {
        storage.remove_item(TOKEN_KEY)?;
        info!("token cleared from command line");
        println!("Signed out.");
        return Ok(());
    }

    if let Some(dir) = parsed.export_dir.as_ref() {
        let filter = AnomalyFilter {
            search: parsed.search.clone().unwrap_or_default(),
            severity: parsed.severity,
        };
        let anomalies = service.get_anomalies(None).await?;
        let rows = filter.apply(&anomalies);
        let path = write_anomalies_csv(dir, &rows, Utc::now())?;
        println!("{}", path.display());
        return Ok(());
    }

    info!("starting smartops");
    let mut app = App::new(service, storage, config);
    app.run().await
}
