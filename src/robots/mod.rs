//! Reference robot models
//!
//! Small sphere-body robots implementing [`RobotModel`](crate::robot::RobotModel),
//! used by the CLI, the benches, and the tests. Real manipulators plug in by
//! implementing the same trait.

mod free_sphere;
mod planar_arm;

pub use free_sphere::FreeSphere;
pub use planar_arm::PlanarArm;
