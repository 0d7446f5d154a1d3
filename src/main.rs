mod script;

use std::path::PathBuf;
use std::process::ExitCode;

use bevy::prelude::*;
use clap::{Parser, Subcommand};

use paint_polygon::config::AppConfig;
use paint_polygon::constants::DEFAULT_SAVE_FILE_NAME;
use paint_polygon::paths;

/// Paint and erase polygon regions with a brush, headless.
#[derive(Parser, Debug)]
#[command(name = "paint-polygon", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a recorded interaction script and save the painted region
    Replay {
        /// JSON file with the interaction steps
        #[arg(short, long, value_name = "FILE")]
        script: PathBuf,

        /// GeoJSON region to start from
        #[arg(short, long, value_name = "FILE")]
        load: Option<PathBuf>,

        /// Where to write the resulting region
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SAVE_FILE_NAME)]
        output: PathBuf,
    },
}

/// Set up stdout logging, plus file logging for debug builds
#[cfg(debug_assertions)]
fn setup_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use std::fs::OpenOptions;
    use std::io::Write;
    use tracing_subscriber::prelude::*;

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true)
        .with_level(true);

    // Default to info for bevy, debug for paint_polygon
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,paint_polygon=debug"));

    let logs_dir = paths::logs_dir();
    if std::fs::create_dir_all(&logs_dir).is_err() {
        eprintln!("Failed to create logs directory");
        tracing_subscriber::registry()
            .with(filter)
            .with(stdout_layer)
            .init();
        return None;
    }

    let log_file_path = logs_dir.join("paint-polygon.log");

    // Append session separator to existing log file
    if let Ok(mut file) = OpenOptions::new().append(true).open(&log_file_path) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let separator = "=".repeat(80);
        let _ = writeln!(
            file,
            "\n\n{}\n=== New Session Started at {} ===\n{}\n",
            separator, timestamp, separator
        );
    }

    let file_appender = tracing_appender::rolling::never(&logs_dir, "paint-polygon.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // No ANSI colors for file output
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer.and_then(stdout_layer))
        .init();

    Some(guard)
}

#[cfg(not(debug_assertions))]
fn setup_logging() -> Option<()> {
    use tracing_subscriber::prelude::*;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_ansi(true))
        .init();
    None
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Keep the guard alive for the duration of the program
    let _log_guard = setup_logging();

    if let Err(e) = paths::ensure_directories() {
        warn!("Failed to create data directories: {}", e);
    }

    match cli.command {
        Command::Replay {
            script,
            load,
            output,
        } => {
            let steps = match script::read_script(&script) {
                Ok(steps) => steps,
                Err(e) => {
                    error!("{}", e);
                    return ExitCode::FAILURE;
                }
            };

            let mut app = script::build_app(AppConfig::default());
            match script::replay(&mut app, &steps, load.as_deref(), &output) {
                Ok(summary) => {
                    println!(
                        "{} steps replayed, {} polygons saved to {}",
                        summary.steps,
                        summary.polygons,
                        summary.output.display()
                    );
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
