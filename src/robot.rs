//! Robot-model contract
//!
//! The core never knows a robot's kinematics. A [`RobotModel`] maps a
//! [`ConfigurationBlock`] to its body spheres and combines their distances to
//! the environment into one signed distance per lane. The helpers in this
//! module do the per-sphere part; the model decides how spheres are produced
//! and may override [`RobotModel::sdf`] with something faster.

use crate::configuration::ConfigurationBlock;
use crate::environment::Environment;
use crate::lanes::FloatLanes;
use crate::primitives::{
    sphere_cuboid, sphere_cuboid_l2, sphere_sphere_l2, sphere_sphere_sql2,
    sphere_z_aligned_cuboid, sphere_z_aligned_cuboid_l2,
};
use crate::shapes::Sphere;

/// Distance reported when there is nothing to collide with.
///
/// Finite on purpose: finite differences of two `NO_OBSTACLE_DISTANCE`
/// evaluations are exactly zero.
pub const NO_OBSTACLE_DISTANCE: f32 = f32::MAX;

/// A robot whose body is approximated by spheres, with `D` joint dimensions.
pub trait RobotModel<const D: usize>: Send + Sync {
    /// Human-readable model name
    fn name(&self) -> &str;

    /// Body spheres for every lane of `q`
    fn forward_kinematics<L: FloatLanes>(&self, q: &ConfigurationBlock<L, D>) -> Vec<Sphere<L>>;

    /// Minimum exact signed distance between the robot body and the
    /// environment, per lane. Positive means clear.
    fn sdf<L: FloatLanes>(&self, environment: &Environment<L>, q: &ConfigurationBlock<L, D>) -> L {
        self.forward_kinematics(q)
            .iter()
            .fold(L::splat(NO_OBSTACLE_DISTANCE), |acc, s| {
                acc.min(sphere_environment_distance(environment, s))
            })
    }

    /// Per-lane collision flag from the pseudo-distance (`<= 0` means
    /// possibly colliding). Returns one bool per lane.
    fn in_collision<L: FloatLanes>(&self, environment: &Environment<L>, q: &ConfigurationBlock<L, D>) -> Vec<bool> {
        let mut hits = vec![false; L::WIDTH];
        for s in self.forward_kinematics(q) {
            let d = sphere_environment_pseudo_distance(environment, &s);
            for (lane, hit) in hits.iter_mut().enumerate() {
                *hit |= d.lane(lane) <= 0.0;
            }
        }
        hits
    }
}

/// Minimum exact signed distance from one (batched) query sphere to every
/// obstacle in the environment.
pub fn sphere_environment_distance<L: FloatLanes>(environment: &Environment<L>, s: &Sphere<L>) -> L {
    let mut best = L::splat(NO_OBSTACLE_DISTANCE);
    for o in environment.spheres() {
        best = best.min(sphere_sphere_l2(o, s));
    }
    for c in environment.cuboids() {
        best = best.min(sphere_cuboid_l2(c, s));
    }
    for c in environment.z_aligned_cuboids() {
        best = best.min(sphere_z_aligned_cuboid_l2(c, s));
    }
    best
}

/// Minimum pseudo-distance from one (batched) query sphere to every obstacle.
///
/// Only the sign is meaningful; use for rejection, never for gradients.
pub fn sphere_environment_pseudo_distance<L: FloatLanes>(environment: &Environment<L>, s: &Sphere<L>) -> L {
    let mut best = L::splat(NO_OBSTACLE_DISTANCE);
    for o in environment.spheres() {
        best = best.min(sphere_sphere_sql2(o, s));
    }
    for c in environment.cuboids() {
        best = best.min(sphere_cuboid(c, s));
    }
    for c in environment.z_aligned_cuboids() {
        best = best.min(sphere_z_aligned_cuboid(c, s));
    }
    best
}

/// True if any lane of the query sphere may touch an obstacle.
pub fn sphere_environment_in_collision<L: FloatLanes>(environment: &Environment<L>, s: &Sphere<L>) -> bool {
    sphere_environment_pseudo_distance(environment, s).any_lane(|d| d <= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Cuboid;
    use glam::Vec3;
    use wide::f32x8;

    fn mixed_environment() -> Environment<f32> {
        let mut env = Environment::new();
        env.push_sphere(Sphere::new(Vec3::new(2.0, 0.0, 0.0), 0.5));
        env.push_cuboid(Cuboid::axis_aligned(Vec3::new(0.0, 0.0, -1.0), Vec3::new(5.0, 5.0, 0.5)));
        env
    }

    #[test]
    fn test_min_over_obstacles() {
        let env = mixed_environment();
        // Floor top at z = -0.5, sphere obstacle surface at x = 1.5
        let q = Sphere::new(Vec3::new(1.0, 0.0, 0.0), 0.1);
        let d = sphere_environment_distance(&env, &q);
        assert!((d - 0.4).abs() < 1e-6);

        let q = Sphere::new(Vec3::new(-3.0, 0.0, 0.0), 0.1);
        let d = sphere_environment_distance(&env, &q);
        assert!((d - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_empty_environment_is_finite() {
        let env = Environment::new();
        let q = Sphere::new(Vec3::ZERO, 1.0);
        let d = sphere_environment_distance(&env, &q);
        assert!(d.is_finite());
        assert_eq!(d, NO_OBSTACLE_DISTANCE);
    }

    #[test]
    fn test_pseudo_collision() {
        let env: Environment<f32x8> = mixed_environment().broadcast();
        let inside = Sphere::from_lanes(
            f32x8::new([1.8, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0]),
            f32x8::splat(0.0),
            f32x8::splat(0.5),
            f32x8::splat(0.2),
        );
        // Lane 0 overlaps the sphere obstacle, the rest hover above the floor
        let d = sphere_environment_pseudo_distance(&env, &inside);
        assert!(d.lane(0) <= 0.0);
        assert!((1..8).all(|lane| d.lane(lane) > 0.0));
        assert!(sphere_environment_in_collision(&env, &inside));

        let clear = Sphere::from_lanes(f32x8::splat(8.0), f32x8::ZERO, f32x8::splat(2.0), f32x8::splat(0.5));
        assert!(!sphere_environment_in_collision(&env, &clear));
    }
}
