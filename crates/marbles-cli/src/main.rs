//! marbles CLI: Command-line interface for real-time event timelines

use clap::{Args, Parser, Subcommand};
use marbles_engine::{ConfigError, VisualizerConfig};
use marbles_tui::demo::ProducerOptions;
use marbles_tui::DemoOptions;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Real-time event timeline visualizer
#[derive(Parser)]
#[command(name = "marbles")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write logs to this file (the terminal belongs to the TUI)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the timeline demo (default when no command specified)
    Demo(DemoArgs),

    /// Print the effective configuration as JSON
    Config,
}

#[derive(Args, Default)]
struct DemoArgs {
    /// Milliseconds between produced values
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    period_ms: u64,

    /// Complete after this many values
    #[arg(long)]
    count: Option<u64>,

    /// Fail after this many values instead of completing
    #[arg(long)]
    fail_after: Option<u64>,

    /// Values per batch
    #[arg(long, default_value = "3")]
    batch_size: usize,

    /// Longest time a batch stays open, in milliseconds
    #[arg(long, default_value = "3000", value_parser = clap::value_parser!(u64).range(1..))]
    batch_ms: u64,

    /// Keep the frame loop running after completion
    #[arg(long)]
    keep_running: bool,

    /// Use the light palette
    #[arg(long)]
    light: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        if let Err(e) = init_logging(path) {
            eprintln!("Error: failed to open log file {}: {e}", path.display());
            std::process::exit(1);
        }
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        None => cmd_demo(config, &demo_defaults()),
        Some(Commands::Demo(args)) => cmd_demo(config, &args),
        Some(Commands::Config) => cmd_config(&config),
    }
}

/// Install a file-backed subscriber honoring `RUST_LOG`.
fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<VisualizerConfig, ConfigError> {
    match path {
        Some(path) => VisualizerConfig::load(path),
        None => Ok(VisualizerConfig::default()),
    }
}

/// Demo arguments as clap would fill them with no flags.
fn demo_defaults() -> DemoArgs {
    DemoArgs {
        period_ms: 1000,
        batch_size: 3,
        batch_ms: 3000,
        ..Default::default()
    }
}

fn cmd_demo(mut config: VisualizerConfig, args: &DemoArgs) {
    config.keep_running |= args.keep_running;

    let options = DemoOptions {
        config,
        producer: ProducerOptions {
            period: Duration::from_millis(args.period_ms),
            count: args.count,
            fail_after: args.fail_after,
        },
        batch_size: args.batch_size,
        batch_span: Duration::from_millis(args.batch_ms),
        light: args.light,
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = rt.block_on(marbles_tui::run_demo(options)) {
        tracing::error!(error = %e, "demo failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_config(config: &VisualizerConfig) {
    match serde_json::to_string_pretty(config) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
