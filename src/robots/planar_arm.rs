//! Planar serial arm with `D` revolute joints.
//!
//! All joints rotate about world +Z; the arm lies in the horizontal plane
//! through `base`. Joint `j`'s absolute heading is the sum of `q[0..=j]`, and
//! each link carries `spheres_per_link` body spheres evenly spaced from just
//! past its proximal joint up to its distal end. The base itself carries no
//! sphere since it cannot move.

use crate::configuration::ConfigurationBlock;
use crate::lanes::FloatLanes;
use crate::robot::RobotModel;
use crate::shapes::Sphere;
use glam::Vec3;

/// Planar arm with `D` equal-length links
#[derive(Debug, Clone, Copy)]
pub struct PlanarArm<const D: usize> {
    base: Vec3,
    link_length: f32,
    sphere_radius: f32,
    spheres_per_link: usize,
}

impl<const D: usize> PlanarArm<D> {
    /// Create an arm rooted at `base`
    pub fn new(base: Vec3, link_length: f32, sphere_radius: f32, spheres_per_link: usize) -> Self {
        PlanarArm {
            base,
            link_length,
            sphere_radius,
            spheres_per_link: spheres_per_link.max(1),
        }
    }

    /// Number of body spheres produced by forward kinematics
    pub fn sphere_count(&self) -> usize {
        D * self.spheres_per_link
    }

    /// End-effector position for a single configuration
    pub fn end_effector(&self, q: &[f32; D]) -> Vec3 {
        let mut heading = 0.0f32;
        let mut p = self.base;
        for &angle in q {
            heading += angle;
            let (s, c) = heading.sin_cos();
            p += Vec3::new(c, s, 0.0) * self.link_length;
        }
        p
    }
}

impl<const D: usize> RobotModel<D> for PlanarArm<D> {
    fn name(&self) -> &str {
        "planar_arm"
    }

    fn forward_kinematics<L: FloatLanes>(&self, q: &ConfigurationBlock<L, D>) -> Vec<Sphere<L>> {
        let mut spheres = Vec::with_capacity(self.sphere_count());
        let radius = L::splat(self.sphere_radius);
        let z = L::splat(self.base.z);
        let step = self.link_length / self.spheres_per_link as f32;

        let mut heading = L::zero();
        let mut x = L::splat(self.base.x);
        let mut y = L::splat(self.base.y);

        for j in 0..D {
            heading = heading + q[j];
            let (s, c) = heading.sin_cos();
            for k in 1..=self.spheres_per_link {
                let t = L::splat(step * k as f32);
                spheres.push(Sphere::from_lanes(x + c * t, y + s * t, z, radius));
            }
            let len = L::splat(self.link_length);
            x = x + c * len;
            y = y + s * len;
        }
        spheres
    }
}
