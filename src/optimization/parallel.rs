//! Parallel repair over many start configurations
//!
//! Each start gets its own `ChaCha8Rng` seeded from `(seed, index)`, so results
//! do not depend on how rayon schedules the work.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

use super::project::{project_to_valid, RepairConfig};
use crate::configuration::{Configuration, ConfigurationBlock};
use crate::environment::Environment;
use crate::lanes::FloatLanes;
use crate::robot::RobotModel;

#[inline]
fn start_rng(seed: u64, index: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(index as u64);
    rng
}

/// Repair every start (single-threaded)
pub fn project_batch<R, L, const D: usize>(
    robot: &R,
    starts: &[Configuration<D>],
    environment: &Environment<L>,
    config: &RepairConfig,
    seed: u64,
) -> Vec<ConfigurationBlock<L, D>>
where
    R: RobotModel<D>,
    L: FloatLanes,
{
    starts
        .iter()
        .enumerate()
        .map(|(i, start)| project_to_valid(robot, start, environment, config, &mut start_rng(seed, i)))
        .collect()
}

/// Repair every start (parallel)
///
/// Output order matches `starts` and equals [`project_batch`] for the same
/// seed.
pub fn project_batch_parallel<R, L, const D: usize>(
    robot: &R,
    starts: &[Configuration<D>],
    environment: &Environment<L>,
    config: &RepairConfig,
    seed: u64,
) -> Vec<ConfigurationBlock<L, D>>
where
    R: RobotModel<D>,
    L: FloatLanes,
{
    debug!(starts = starts.len(), lanes = L::WIDTH, "parallel repair");
    starts
        .par_iter()
        .enumerate()
        .map(|(i, start)| project_to_valid(robot, start, environment, config, &mut start_rng(seed, i)))
        .collect()
}
