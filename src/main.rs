//! Particle Life
//!
//! Headless driver: spawns colored particles with a random affinity matrix and
//! ticks the simulation, logging throughput and state statistics.
//!
//! Usage: `particle-life [TICKS] [SEED]`

use std::collections::VecDeque;
use std::process::ExitCode;
use std::time::Instant;

use particle_physics::AffinityMatrix;
use particle_simulation::{ParticleSimulation, PhysicsParams};
use rand::rngs::StdRng;
use rand::SeedableRng;

const PARTICLE_COUNT: usize = 2000;
const NUM_COLORS: usize = 8;
const DEFAULT_TICKS: u64 = 600;
const REPORT_INTERVAL: u64 = 60;
const TICK_WINDOW: usize = 100;

struct Args {
    ticks: u64,
    seed: Option<u64>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);

    let ticks = match args.next() {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| format!("invalid tick count {raw:?}: {e}"))?,
        None => DEFAULT_TICKS,
    };
    let seed = args
        .next()
        .map(|raw| {
            raw.parse::<u64>()
                .map_err(|e| format!("invalid seed {raw:?}: {e}"))
        })
        .transpose()?;

    Ok(Args { ticks, seed })
}

fn build_simulation(seed: Option<u64>) -> Result<ParticleSimulation, String> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let affinities = AffinityMatrix::random(NUM_COLORS, &mut rng).map_err(|e| e.to_string())?;
    for (color, row) in affinities.rows().enumerate() {
        log::debug!("  affinities[{color}] = {row:.2?}");
    }

    let result = match seed {
        Some(seed) => {
            ParticleSimulation::with_seed(PARTICLE_COUNT, affinities, PhysicsParams::default(), seed)
        }
        None => ParticleSimulation::new(PARTICLE_COUNT, affinities),
    };
    result.map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            log::error!("usage: particle-life [TICKS] [SEED]");
            return ExitCode::FAILURE;
        }
    };

    log::info!("Starting particle life simulation...");

    let mut simulation = match build_simulation(args.seed) {
        Ok(simulation) => simulation,
        Err(e) => {
            log::error!("Failed to create simulation: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut tick_times: VecDeque<f32> = VecDeque::with_capacity(TICK_WINDOW);
    let started = Instant::now();

    for _ in 0..args.ticks {
        let tick_start = Instant::now();
        simulation.tick();
        let tick_time = tick_start.elapsed().as_secs_f32() * 1000.0;

        tick_times.push_back(tick_time);
        if tick_times.len() > TICK_WINDOW {
            tick_times.pop_front();
        }

        if simulation.tick_count() % REPORT_INTERVAL == 0 {
            let avg_tick_time = tick_times.iter().sum::<f32>() / tick_times.len() as f32;
            log::info!(
                "tick {:>6} | {:6.2} ms/tick ({:7.1} ticks/s) | cells {:>4} | energy {:.4} | max speed {:.3}",
                simulation.tick_count(),
                avg_tick_time,
                1000.0 / avg_tick_time,
                simulation.spatial_index().occupied_cells(),
                simulation.kinetic_energy(),
                simulation.max_speed(),
            );
        }
    }

    let centroid = simulation.centroid();
    log::info!(
        "✓ Ran {} ticks in {:.2?} (centroid at {:.3}, {:.3})",
        simulation.tick_count(),
        started.elapsed(),
        centroid.x,
        centroid.y
    );

    ExitCode::SUCCESS
}
