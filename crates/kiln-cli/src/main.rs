//! Launcher for the kiln simulator.
//!
//! This build ships no renderer, so every mode runs headless: plain sim
//! mode prints the frame counter once per second, stress mode grows the
//! world until the frame budget trips and then exits with the summary.

use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use kiln_engine::{seed_world, SimConfig, SimServer};
use kiln_stress::{GrowthController, StressConfig};
use kiln_world::World;

#[derive(Parser)]
#[command(name = "kiln", about = "Chunked thermal-diffusion simulator")]
struct Cli {
    /// Run without a renderer (always the case in this build).
    #[arg(long)]
    headless: bool,
    /// Grow the world until a frame exceeds its real-time budget.
    #[arg(long)]
    stress: bool,
    /// PRNG seed for stress mode. Random if omitted.
    #[arg(long)]
    seed: Option<u32>,
    /// Simulated seconds per step, and the stress frame budget.
    #[arg(long, default_value_t = 1.0)]
    dt: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(rand::random);
    if !cli.headless && !cli.stress {
        println!("note: this build ships no renderer; running headless");
    }

    let mut world = World::new();
    seed_world(&mut world);
    // Section flags must match cell contents before the server starts.
    world.recompute_all_section_loaded();

    let config = SimConfig {
        dt_seconds: cli.dt,
        ..SimConfig::default()
    };
    let mut server = SimServer::new(world, config).context("invalid simulation config")?;
    server.start();

    if cli.stress {
        let stress = StressConfig {
            seed,
            dt_seconds: cli.dt,
            ..StressConfig::default()
        };
        let mut controller = GrowthController::spawn(server.handle(), stress)
            .context("invalid stress config")?;
        // The controller prints the bar and the summary itself; block
        // here until it trips.
        let report = controller.wait_for_report();
        controller.stop();
        controller.join();
        server.stop();
        server.join();
        anyhow::ensure!(report.is_some(), "grower exited without tripping");
        return Ok(());
    }

    println!("kiln sim running headless (dt={} s); Ctrl+C to exit", cli.dt);
    loop {
        thread::sleep(Duration::from_secs(1));
        println!("frames={}", server.frames_simulated());
    }
}
