use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use onslaught_cli::{log_event, run_headless, RunOptions};
use onslaught_core::config::DirectorConfig;

#[derive(Parser, Debug)]
#[command(
    name = "onslaught",
    version,
    about = "Run the arena director headless against a scripted target"
)]
struct Cli {
    /// JSON director configuration; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Simulated seconds to run.
    #[arg(long, default_value_t = 60.0)]
    seconds: f64,

    /// Rendered frames per simulated second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Seconds between scripted gunner shots (0 disables the gunner).
    #[arg(long, default_value_t = 0.5)]
    fire_interval: f64,

    /// Print the final snapshot as JSON on stdout.
    #[arg(long)]
    print_snapshot: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    ensure!(cli.fps > 0, "--fps must be positive");
    ensure!(
        cli.seconds.is_finite() && cli.seconds >= 0.0,
        "--seconds must be a non-negative number"
    );

    let director = match &cli.config {
        Some(path) => DirectorConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => DirectorConfig::default(),
    };

    let options = RunOptions {
        seed: cli.seed,
        seconds: cli.seconds,
        fps: cli.fps,
        director,
        fire_interval_secs: (cli.fire_interval > 0.0).then_some(cli.fire_interval),
        ..RunOptions::default()
    };
    info!(seed = options.seed, seconds = options.seconds, "starting headless arena");

    let summary = run_headless(&options, log_event);
    info!(
        score = summary.final_snapshot.score.score,
        peak_alive = summary.peak_alive,
        contacts = summary.contacts,
        bosses_defeated = summary.bosses_defeated,
        "session summary"
    );

    if cli.print_snapshot {
        let json = serde_json::to_string_pretty(&summary.final_snapshot)
            .context("failed to serialize snapshot")?;
        println!("{json}");
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
