//! Configuration repair
//!
//! | Item | Role |
//! |------|------|
//! | [`compute_gradient`] | Centered-difference joint-space gradient |
//! | [`project_to_valid`] | Noisy broadcast + gradient pushes out of collision |
//! | [`project_batch_parallel`] | Many starts across threads (rayon) |
//! | [`first_valid_lane`] | Pick a clear result from a repaired block |

mod gradient;
mod parallel;
mod project;

pub use gradient::{compute_gradient, Gradient, DEFAULT_GRADIENT_STEP};
pub use parallel::{project_batch, project_batch_parallel};
pub use project::{
    first_valid_lane, project_to_valid, project_to_valid_with, JointLimits, RepairConfig, StatePolicy, Unbounded,
};
