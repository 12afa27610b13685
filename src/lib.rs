//! # sdf_repair
//!
//! Batched signed-distance queries between sphere-approximated robot bodies
//! and primitive obstacles, plus a gradient-projection optimizer that pushes
//! colliding configurations out of collision.
//!
//! ## Features
//!
//! - **Lanes**: one code path for `f32`, `wide::f32x4`, `wide::f32x8` and a
//!   scalar-loop fallback
//! - **Primitives**: sphere vs sphere, box and z-aligned box (pseudo and exact)
//! - **Environment**: JSON / descriptor builder, sort, lane broadcast
//! - **Robots**: `RobotModel` trait with free-sphere and planar-arm models
//! - **Repair**: finite-difference gradient, noisy multi-start descent,
//!   rayon batch repair
//!
//! ## Example
//!
//! ```rust
//! use sdf_repair::prelude::*;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! // Obstacles are built in scalar form, then broadcast across lanes
//! let mut env = Environment::new();
//! env.push_sphere(Sphere::new(Vec3::new(0.0, 0.5, 0.0), 0.2));
//! env.push_cuboid(Cuboid::axis_aligned(Vec3::new(0.0, 0.0, -0.1), Vec3::new(2.0, 2.0, 0.05)));
//! env.sort();
//! let env: Environment<DefaultLanes> = env.broadcast();
//!
//! // Two-link arm whose second link runs through the sphere
//! let arm = PlanarArm::<2>::new(Vec3::ZERO, 0.4, 0.05, 4);
//! let start = [std::f32::consts::FRAC_PI_2, 0.0];
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(0);
//! let repaired = project_to_valid(&arm, &start, &env, &RepairConfig::default(), &mut rng);
//! let distances = arm.sdf(&env, &repaired);
//! assert_eq!(distances.to_array().len(), DEFAULT_WIDTH);
//! ```

#![warn(missing_docs)]

pub mod configuration;
pub mod environment;
pub mod error;
pub mod lanes;
pub mod optimization;
pub mod primitives;
pub mod robot;
pub mod robots;
pub mod shapes;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::configuration::{Configuration, ConfigurationBlock};
    pub use crate::environment::{Environment, ObstacleDescriptor};
    pub use crate::error::EnvironmentError;
    pub use crate::lanes::{DefaultLanes, FloatLanes, LaneArray, DEFAULT_WIDTH};
    pub use crate::optimization::{
        compute_gradient, first_valid_lane, project_batch, project_batch_parallel, project_to_valid,
        project_to_valid_with, JointLimits, RepairConfig, StatePolicy, Unbounded, DEFAULT_GRADIENT_STEP,
    };
    pub use crate::primitives::*;
    pub use crate::robot::{
        sphere_environment_distance, sphere_environment_in_collision, sphere_environment_pseudo_distance,
        RobotModel, NO_OBSTACLE_DISTANCE,
    };
    pub use crate::robots::{FreeSphere, PlanarArm};
    pub use crate::shapes::{Cuboid, Sphere};
    pub use glam::{Quat, Vec3};
}

// Re-exports for convenience
pub use environment::Environment;
pub use optimization::{project_to_valid, RepairConfig};
pub use robot::RobotModel;
