use anyhow::{bail, Result};
use clap::Parser;
use std::time::Duration;

use traffic_gate::simulation::{
    SimConfig, SimWorld, DEFAULT_CROSSING_MS, DEFAULT_MAX_INTERARRIVAL_MS, DEFAULT_THREADS,
    DEFAULT_VEHICLES_PER_THREAD,
};

#[derive(Parser)]
#[command(name = "traffic_gate")]
#[command(about = "Four-way intersection admission simulation")]
struct Cli {
    /// Number of concurrent vehicle threads
    #[arg(long, default_value_t = DEFAULT_THREADS)]
    threads: usize,

    /// Number of vehicles generated by each thread
    #[arg(long, default_value_t = DEFAULT_VEHICLES_PER_THREAD)]
    vehicles: usize,

    /// Maximum pause before a vehicle arrives, in milliseconds
    #[arg(long, default_value_t = DEFAULT_MAX_INTERARRIVAL_MS)]
    interarrival_ms: u64,

    /// Time each vehicle spends inside the intersection, in milliseconds
    #[arg(long, default_value_t = DEFAULT_CROSSING_MS)]
    crossing_ms: u64,

    /// Seed for reproducible vehicle routes
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn into_config(self) -> SimConfig {
        SimConfig {
            threads: self.threads,
            vehicles_per_thread: self.vehicles,
            max_interarrival: Duration::from_millis(self.interarrival_ms),
            crossing_time: Duration::from_millis(self.crossing_ms),
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    run_headless(cli.into_config())
}

/// Run the simulation in headless mode and report the outcome
fn run_headless(config: SimConfig) -> Result<()> {
    let world = SimWorld::new(config);
    let stats = world.run()?;
    stats.log_summary();

    if !stats.collisions.is_empty() {
        bail!(
            "{} collision(s) detected inside the intersection",
            stats.collisions.len()
        );
    }
    Ok(())
}
