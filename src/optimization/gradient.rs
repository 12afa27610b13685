//! Joint-space gradient of a robot's distance field by centered differences
//!
//! For each joint dimension `i`:
//!
//! ```text
//! g_i = (sdf(q + h·e_i) - sdf(q - h·e_i)) / (2h)
//! ```
//!
//! Two field evaluations per dimension, each covering every lane at once.
//! Truncation error is O(h²); cancellation error grows as `h` shrinks. The
//! default `h = 1e-4` suits `f32` fields with values around unit scale.
//!
//! The perturbed points are built as fresh copies, so the input block is
//! never written to.

use crate::configuration::ConfigurationBlock;
use crate::environment::Environment;
use crate::lanes::FloatLanes;
use crate::robot::RobotModel;

/// Default finite-difference step
pub const DEFAULT_GRADIENT_STEP: f32 = 1e-4;

/// Per-lane gradient; same layout as a configuration block
pub type Gradient<L, const D: usize> = ConfigurationBlock<L, D>;

/// Centered finite-difference gradient of `robot.sdf` at every lane of `state`.
pub fn compute_gradient<R, L, const D: usize>(
    robot: &R,
    environment: &Environment<L>,
    state: &ConfigurationBlock<L, D>,
    step: f32,
) -> Gradient<L, D>
where
    R: RobotModel<D>,
    L: FloatLanes,
{
    let h = L::splat(step);
    let inv_2h = L::splat(0.5 / step);

    ConfigurationBlock::from_rows(std::array::from_fn(|i| {
        let plus = state.with(i, state[i] + h);
        let minus = state.with(i, state[i] - h);
        let f_plus = robot.sdf(environment, &plus);
        let f_minus = robot.sdf(environment, &minus);
        (f_plus - f_minus) * inv_2h
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robots::FreeSphere;
    use crate::shapes::Sphere;
    use glam::Vec3;
    use wide::f32x8;

    #[test]
    fn test_sphere_obstacle_gradient_is_radial() {
        let mut env = Environment::new();
        env.push_sphere(Sphere::new(Vec3::ZERO, 1.0));
        let env: Environment<f32x8> = env.broadcast();

        let robot = FreeSphere::new(0.1);
        let points = [
            [2.0, 0.0, 0.0],
            [0.0, -0.5, 0.0],
            [0.3, 0.4, 0.0],
            [-1.0, 1.0, 1.0],
        ];
        let q = ConfigurationBlock::<f32x8, 3>::from_configurations(&points);
        let g = compute_gradient(&robot, &env, &q, DEFAULT_GRADIENT_STEP);

        for (lane, p) in points.iter().enumerate() {
            let expected = Vec3::from_array(*p).normalize();
            let got = Vec3::from_array(g.lane(lane));
            assert!(got.abs_diff_eq(expected, 5e-3), "lane {}: {:?} vs {:?}", lane, got, expected);
        }
    }

    #[test]
    fn test_input_untouched() {
        let mut env = Environment::new();
        env.push_sphere(Sphere::new(Vec3::ZERO, 1.0));
        let env: Environment<f32x8> = env.broadcast();

        let q = ConfigurationBlock::<f32x8, 3>::broadcast(&[0.5, 0.25, -0.125]);
        let before = q;
        let _ = compute_gradient(&FreeSphere::new(0.1), &env, &q, DEFAULT_GRADIENT_STEP);
        assert_eq!(q, before);
    }

    #[test]
    fn test_empty_environment_gradient_is_zero() {
        let env: Environment<f32x8> = Environment::new().broadcast();
        let q = ConfigurationBlock::<f32x8, 3>::broadcast(&[0.1, 0.2, 0.3]);
        let g = compute_gradient(&FreeSphere::new(0.1), &env, &q, DEFAULT_GRADIENT_STEP);
        for i in 0..3 {
            assert_eq!(g[i].to_array(), [0.0; 8]);
        }
    }
}
