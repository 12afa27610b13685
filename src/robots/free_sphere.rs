//! Free-floating sphere: the configuration is the sphere's center.
//!
//! With this model the joint-space gradient of the field is exactly the
//! spatial gradient of the obstacle distance, which makes it the reference
//! model for checking the estimator against closed forms.

use crate::configuration::ConfigurationBlock;
use crate::lanes::FloatLanes;
use crate::robot::RobotModel;
use crate::shapes::Sphere;

/// Single sphere of fixed radius translating freely in 3-D
#[derive(Debug, Clone, Copy)]
pub struct FreeSphere {
    radius: f32,
}

impl FreeSphere {
    /// Create a free sphere with the given radius
    pub fn new(radius: f32) -> Self {
        FreeSphere { radius }
    }

    /// Body radius
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl RobotModel<3> for FreeSphere {
    fn name(&self) -> &str {
        "free_sphere"
    }

    fn forward_kinematics<L: FloatLanes>(&self, q: &ConfigurationBlock<L, 3>) -> Vec<Sphere<L>> {
        vec![Sphere::from_lanes(q[0], q[1], q[2], L::splat(self.radius))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use glam::Vec3;
    use wide::f32x8;

    #[test]
    fn test_sdf_is_sphere_distance() {
        let mut env = Environment::new();
        env.push_sphere(Sphere::new(Vec3::ZERO, 1.0));
        let env: Environment<f32x8> = env.broadcast();

        let robot = FreeSphere::new(0.25);
        let q = ConfigurationBlock::<f32x8, 3>::from_configurations(&[[2.0, 0.0, 0.0], [0.0, 0.5, 0.0]]);
        let d = robot.sdf(&env, &q);
        assert!((d.lane(0) - 0.75).abs() < 1e-6);
        assert!((d.lane(1) + 0.75).abs() < 1e-6);

        let hits = robot.in_collision(&env, &q);
        assert!(!hits[0]);
        assert!(hits[1]);
    }
}
