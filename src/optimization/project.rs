//! Gradient-projection repair
//!
//! Starting from one configuration, fill a block with noisy copies and push
//! every colliding lane along the distance-field gradient until it clears or
//! the step budget runs out. Lanes that are already clear stop moving: their
//! step magnitude is `learning_rate · max(0, -dist) = 0`.
//!
//! Nothing is reported back about success; use [`first_valid_lane`] (or
//! re-evaluate the field) to pick a usable result.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, Level};

use super::gradient::{compute_gradient, DEFAULT_GRADIENT_STEP};
use crate::configuration::{Configuration, ConfigurationBlock};
use crate::environment::Environment;
use crate::lanes::FloatLanes;
use crate::robot::RobotModel;

/// Repair parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairConfig {
    /// Number of gradient steps
    pub steps: usize,
    /// Scale applied to the penetration depth of each lane
    pub learning_rate: f32,
    /// Half-width of the uniform noise added to the start configuration
    pub noise_scale: f32,
    /// Finite-difference step for the gradient
    pub gradient_step: f32,
}

impl Default for RepairConfig {
    fn default() -> Self {
        RepairConfig {
            steps: 100,
            learning_rate: 0.5,
            noise_scale: 0.1,
            gradient_step: DEFAULT_GRADIENT_STEP,
        }
    }
}

impl RepairConfig {
    /// Same parameters with a different step budget
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Same parameters with a different noise scale
    pub fn with_noise_scale(mut self, noise_scale: f32) -> Self {
        self.noise_scale = noise_scale;
        self
    }
}

/// Per-iteration adjustment of the state after the gradient update
pub trait StatePolicy<L: FloatLanes, const D: usize> {
    /// Modify `state` in place
    fn apply(&self, state: &mut ConfigurationBlock<L, D>);
}

/// No adjustment; joints are unbounded
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl<L: FloatLanes, const D: usize> StatePolicy<L, D> for Unbounded {
    #[inline(always)]
    fn apply(&self, _state: &mut ConfigurationBlock<L, D>) {}
}

/// Clamp each dimension to `[lower, upper]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointLimits<const D: usize> {
    lower: [f32; D],
    upper: [f32; D],
}

impl<const D: usize> JointLimits<D> {
    /// Build limits; swapped bounds are reordered per dimension
    pub fn new(lower: [f32; D], upper: [f32; D]) -> Self {
        let lo = std::array::from_fn(|i| lower[i].min(upper[i]));
        let hi = std::array::from_fn(|i| lower[i].max(upper[i]));
        JointLimits { lower: lo, upper: hi }
    }

    /// Lower bounds
    pub fn lower(&self) -> &[f32; D] {
        &self.lower
    }

    /// Upper bounds
    pub fn upper(&self) -> &[f32; D] {
        &self.upper
    }
}

impl<L: FloatLanes, const D: usize> StatePolicy<L, D> for JointLimits<D> {
    fn apply(&self, state: &mut ConfigurationBlock<L, D>) {
        for i in 0..D {
            state[i] = state[i].max(L::splat(self.lower[i])).min(L::splat(self.upper[i]));
        }
    }
}

/// Repair `start` with unbounded joints.
///
/// # Example
///
/// ```rust
/// use sdf_repair::prelude::*;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut env = Environment::new();
/// env.push_sphere(Sphere::new(Vec3::ZERO, 0.5));
/// env.sort();
/// let env: Environment<DefaultLanes> = env.broadcast();
///
/// let robot = FreeSphere::new(0.1);
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let config = RepairConfig { learning_rate: 1.5, ..RepairConfig::default() };
/// let block = project_to_valid(&robot, &[0.2, 0.0, 0.0], &env, &config, &mut rng);
/// assert!(first_valid_lane(&robot, &env, &block).is_some());
/// ```
pub fn project_to_valid<R, L, G, const D: usize>(
    robot: &R,
    start: &Configuration<D>,
    environment: &Environment<L>,
    config: &RepairConfig,
    rng: &mut G,
) -> ConfigurationBlock<L, D>
where
    R: RobotModel<D>,
    L: FloatLanes,
    G: Rng + ?Sized,
{
    project_to_valid_with(robot, start, environment, config, rng, &Unbounded)
}

/// Repair `start`, applying `policy` after every update.
pub fn project_to_valid_with<R, L, G, P, const D: usize>(
    robot: &R,
    start: &Configuration<D>,
    environment: &Environment<L>,
    config: &RepairConfig,
    rng: &mut G,
    policy: &P,
) -> ConfigurationBlock<L, D>
where
    R: RobotModel<D>,
    L: FloatLanes,
    G: Rng + ?Sized,
    P: StatePolicy<L, D> + ?Sized,
{
    let mut state = noisy_block(start, config.noise_scale, rng);
    let learning_rate = L::splat(config.learning_rate);
    let zero = L::zero();
    let tracing_steps = tracing::enabled!(Level::TRACE);

    for step in 0..config.steps {
        let dist = robot.sdf(environment, &state);
        let grad = compute_gradient(robot, environment, &state, config.gradient_step);
        let magnitude = learning_rate * (-dist).max(zero);

        for i in 0..D {
            state[i] = state[i] + grad[i] * magnitude;
        }
        policy.apply(&mut state);

        if tracing_steps {
            trace!(step, colliding = dist.count_lanes(|d| d <= 0.0), "repair step");
        }
    }

    debug!(
        robot = robot.name(),
        steps = config.steps,
        lanes = L::WIDTH,
        "repair finished"
    );
    state
}

/// First lane of `block` whose exact distance is strictly positive.
pub fn first_valid_lane<R, L, const D: usize>(
    robot: &R,
    environment: &Environment<L>,
    block: &ConfigurationBlock<L, D>,
) -> Option<Configuration<D>>
where
    R: RobotModel<D>,
    L: FloatLanes,
{
    let dist = robot.sdf(environment, block);
    (0..L::WIDTH)
        .find(|&lane| dist.lane(lane) > 0.0)
        .map(|lane| block.lane(lane))
}

/// Broadcast `start` and add uniform noise in `[-scale, scale]`.
///
/// Draws are dimension-major, then lane order. A scale that is not a
/// positive finite number (after taking its magnitude) draws nothing.
fn noisy_block<L, G, const D: usize>(start: &Configuration<D>, noise_scale: f32, rng: &mut G) -> ConfigurationBlock<L, D>
where
    L: FloatLanes,
    G: Rng + ?Sized,
{
    let scale = noise_scale.abs();
    if !(scale > 0.0 && scale.is_finite()) {
        return ConfigurationBlock::broadcast(start);
    }
    ConfigurationBlock::from_rows(std::array::from_fn(|i| {
        L::from_fn(|_| start[i] + scale * rng.random_range(-1.0f32..=1.0))
    }))
}
