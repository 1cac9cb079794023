//! Terminal front end for geocapture.
//!
//! # Responsibility
//! - Drive the same controller the mobile shell uses, against an on-disk data dir.
//! - Stand in for the platform location service with `--lat/--lon` or `--deny`.

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use geocapture_core::config::APP_TITLE;
use geocapture_core::{
    default_log_level, init_logging, start_with_config, AppConfig, ControllerError, Coordinate,
    FileAppController, FixedLocationProvider, LocationRecord, LocationRepository,
};
use std::path::PathBuf;
use std::process::ExitCode;

const DATA_DIR_NAME: &str = "geocapture";

/// Capture, store and list device locations.
#[derive(Parser, Debug)]
#[command(name = "geocapture", author, version)]
struct Cli {
    /// Directory holding locations.db, preferences.json and logs/
    /// (defaults to $GEOCAPTURE_DATA_DIR, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show theme, record count and data paths
    Status,
    /// List every captured location
    List {
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Capture one location
    Capture(CaptureArgs),
    /// Toggle dark mode
    ToggleTheme,
}

#[derive(Args, Debug)]
struct CaptureArgs {
    /// Latitude reported by the location source
    #[arg(long, allow_hyphen_values = true, required_unless_present_any = ["deny", "unavailable"])]
    lat: Option<f64>,

    /// Longitude reported by the location source
    #[arg(long, allow_hyphen_values = true, required_unless_present_any = ["deny", "unavailable"])]
    lon: Option<f64>,

    /// Simulate the user refusing location permission
    #[arg(long, conflicts_with = "unavailable")]
    deny: bool,

    /// Simulate a location source that cannot produce a fix
    #[arg(long, value_name = "REASON")]
    unavailable: Option<String>,
}

impl CaptureArgs {
    fn provider(&self) -> FixedLocationProvider {
        if self.deny {
            return FixedLocationProvider::denied();
        }
        match (&self.unavailable, self.lat, self.lon) {
            (Some(reason), _, _) => FixedLocationProvider::unavailable(reason.clone()),
            (None, Some(lat), Some(lon)) => {
                FixedLocationProvider::granted(Coordinate::new(lat, lon))
            }
            _ => FixedLocationProvider::unavailable("no coordinates given"),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.data_dir)?;
    config.ensure_dirs().map_err(|err| anyhow!(err))?;

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    let log_dir = config
        .log_dir
        .to_str()
        .context("log directory path is not valid UTF-8")?;
    init_logging(level, log_dir).map_err(|err| anyhow!(err))?;

    match cli.command {
        Command::Status => {
            let controller = open(&config, FixedLocationProvider::denied())?;
            print_status(&config, &controller)?;
            controller.shutdown()?;
        }
        Command::List { json } => {
            let controller = open(&config, FixedLocationProvider::denied())?;
            if json {
                println!("{}", serde_json::to_string_pretty(controller.locations())?);
            } else {
                print_records(controller.locations());
            }
            controller.shutdown()?;
        }
        Command::Capture(args) => {
            let mut controller = open(&config, args.provider())?;
            let outcome = controller.capture_location();
            let result = match outcome {
                Ok(record) => {
                    println!("Saved {}", record.display_title());
                    println!("  {}", record.display_description());
                    Ok(())
                }
                Err(err) => Err(alert_error(&err)),
            };
            controller.shutdown()?;
            result?;
        }
        Command::ToggleTheme => {
            let mut controller = open(&config, FixedLocationProvider::denied())?;
            let outcome = controller.toggle_theme();
            let mode = controller.theme().mode();
            let result = match outcome {
                Ok(_) => Ok(()),
                Err(err) => Err(alert_error(&err)),
            };
            println!("Dark Mode: {}", if mode.is_dark() { "on" } else { "off" });
            controller.shutdown()?;
            result?;
        }
    }

    Ok(())
}

fn resolve_config(data_dir: Option<PathBuf>) -> Result<AppConfig> {
    let config = match data_dir {
        Some(dir) => {
            let dir = if dir.is_absolute() {
                dir
            } else {
                std::env::current_dir()
                    .context("Failed to determine current directory")?
                    .join(dir)
            };
            AppConfig::from_data_dir(dir)
        }
        None => {
            let fallback = dirs::data_dir()
                .context("Failed to determine data directory")?
                .join(DATA_DIR_NAME);
            AppConfig::from_env_or(fallback)
        }
    };
    config.map_err(|err| anyhow!(err))
}

fn open(
    config: &AppConfig,
    provider: FixedLocationProvider,
) -> Result<FileAppController<FixedLocationProvider>> {
    start_with_config(config, provider).map_err(|err| anyhow!(err))
}

fn alert_error(err: &ControllerError) -> anyhow::Error {
    let alert = err.alert();
    anyhow!("{}: {} ({})", alert.title, alert.message, err)
}

fn print_status(
    config: &AppConfig,
    controller: &FileAppController<FixedLocationProvider>,
) -> Result<()> {
    let theme = controller.theme();
    println!("{APP_TITLE}");
    println!(
        "Dark Mode: {}",
        if theme.is_dark() { "on" } else { "off" }
    );
    println!("Palette: {}", theme.palette().name);
    println!("Locations: {}", controller.repository().count()?);
    println!("Database: {}", config.db_path.display());
    println!("Preferences: {}", config.prefs_path.display());
    println!("Logs: {}", config.log_dir.display());
    Ok(())
}

fn print_records(records: &[LocationRecord]) {
    if records.is_empty() {
        println!("No locations captured yet.");
        return;
    }
    for record in records {
        println!("{}", record.display_title());
        println!("  {}", record.display_description());
    }
}
