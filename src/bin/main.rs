//! sdf-repair CLI
//!
//! Distance-field statistics and repair benchmarks for a planar arm.

#![allow(clippy::uninlined_format_args, clippy::needless_pass_by_value, clippy::cast_precision_loss)]

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use rand::{Rng, SeedableRng};
#[cfg(feature = "cli")]
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "cli")]
use sdf_repair::prelude::*;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use std::time::Instant;
#[cfg(feature = "cli")]
use tracing::info;
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
const ARM_DOF: usize = 4;

#[cfg(feature = "cli")]
type Arm = PlanarArm<ARM_DOF>;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "sdf-repair")]
#[command(version = sdf_repair::VERSION)]
#[command(about = "Batched sphere-obstacle distances and configuration repair", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Distance-field statistics over random configurations
    Eval {
        /// Obstacle file (JSON list of descriptors); built-in ring if omitted
        #[arg(short, long)]
        env: Option<PathBuf>,
        /// Number of random configurations
        #[arg(short, long, default_value = "1000")]
        samples: usize,
        /// RNG seed
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Repair random configurations and report success rate and timing
    Repair {
        /// Obstacle file (JSON list of descriptors); built-in ring if omitted
        #[arg(short, long)]
        env: Option<PathBuf>,
        /// Number of random start configurations
        #[arg(short, long, default_value = "1000")]
        samples: usize,
        /// Step budgets to compare
        #[arg(long, value_delimiter = ',', default_value = "10,100")]
        steps: Vec<usize>,
        /// Learning rate
        #[arg(short, long, default_value = "0.5")]
        learning_rate: f32,
        /// Start noise half-width
        #[arg(short, long, default_value = "0.05")]
        noise: f32,
        /// RNG seed
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

#[cfg(feature = "cli")]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Eval { env, samples, seed } => cmd_eval(env, samples, seed),
        Commands::Repair {
            env,
            samples,
            steps,
            learning_rate,
            noise,
            seed,
        } => cmd_repair(env, samples, steps, learning_rate, noise, seed),
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI not enabled. Build with --features cli");
    std::process::exit(1);
}

/// Ring of spheres at two heights around the arm base
#[cfg(feature = "cli")]
const DEMO_RING: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/ring.json"));

#[cfg(feature = "cli")]
fn demo_arm() -> Arm {
    PlanarArm::new(Vec3::new(0.0, 0.0, 0.25), 0.2, 0.04, 3)
}

#[cfg(feature = "cli")]
fn load_environment(path: Option<PathBuf>) -> Environment<DefaultLanes> {
    let text = match path {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("Load error: {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => DEMO_RING.to_string(),
    };
    let mut env = match Environment::from_json(&text) {
        Ok(env) => env,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    env.sort();
    info!(
        spheres = env.spheres().len(),
        cuboids = env.cuboids().len(),
        z_aligned = env.z_aligned_cuboids().len(),
        "environment loaded"
    );
    env.broadcast()
}

#[cfg(feature = "cli")]
fn random_configurations(samples: usize, seed: u64) -> Vec<Configuration<ARM_DOF>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let pi = std::f32::consts::PI;
    (0..samples)
        .map(|_| std::array::from_fn(|_| rng.random_range(-pi..pi)))
        .collect()
}

#[cfg(feature = "cli")]
fn cmd_eval(env_path: Option<PathBuf>, samples: usize, seed: u64) {
    let env = load_environment(env_path);
    let arm = demo_arm();
    let configs = random_configurations(samples, seed);

    let start = Instant::now();
    let distances: Vec<f32> = configs
        .chunks(DEFAULT_WIDTH)
        .flat_map(|chunk| {
            let block = ConfigurationBlock::<DefaultLanes, ARM_DOF>::from_configurations(chunk);
            let d = arm.sdf(&env, &block);
            (0..chunk.len()).map(move |lane| d.lane(lane))
        })
        .collect();
    let elapsed = start.elapsed();

    if distances.is_empty() {
        println!("No samples");
        return;
    }

    let min = distances.iter().copied().fold(f32::INFINITY, f32::min);
    let max = distances.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mean = distances.iter().sum::<f32>() / distances.len() as f32;
    let colliding = distances.iter().filter(|&&d| d <= 0.0).count();

    println!("=== SDF Evaluation ===");
    println!("Robot: {} ({} spheres)", arm.name(), arm.sphere_count());
    println!("Samples: {}", distances.len());
    println!("Lanes: {}", DEFAULT_WIDTH);
    println!("Min: {:.4}  Mean: {:.4}  Max: {:.4}", min, mean, max);
    println!(
        "Colliding: {} ({:.1}%)",
        colliding,
        100.0 * colliding as f64 / distances.len() as f64
    );
    println!(
        "Time: {:.3}ms ({:.1} ns/config)",
        elapsed.as_secs_f64() * 1000.0,
        elapsed.as_nanos() as f64 / distances.len() as f64
    );
}

#[cfg(feature = "cli")]
fn cmd_repair(
    env_path: Option<PathBuf>,
    samples: usize,
    steps: Vec<usize>,
    learning_rate: f32,
    noise: f32,
    seed: u64,
) {
    let env = load_environment(env_path);
    let arm = demo_arm();
    let configs = random_configurations(samples, seed);

    println!("=== Repair Benchmark ===");
    println!("Samples: {}", samples);
    println!("Lanes per sample: {}", DEFAULT_WIDTH);
    println!("Threads: {}", rayon::current_num_threads());
    println!("--------------------------------------------------");

    for budget in steps {
        let config = RepairConfig {
            steps: budget,
            learning_rate,
            noise_scale: noise,
            ..RepairConfig::default()
        };

        let start = Instant::now();
        let blocks = project_batch_parallel(&arm, &configs, &env, &config, seed);
        let elapsed = start.elapsed();

        let repaired = blocks
            .iter()
            .filter(|block| first_valid_lane(&arm, &env, block).is_some())
            .count();
        let rate = if samples == 0 {
            0.0
        } else {
            100.0 * repaired as f64 / samples as f64
        };

        println!(
            "Solver ({} steps): {:.1}% valid, {:.3} ms total, {:.3} ms/sample",
            budget,
            rate,
            elapsed.as_secs_f64() * 1000.0,
            elapsed.as_secs_f64() * 1000.0 / samples.max(1) as f64
        );
    }
}
