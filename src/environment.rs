//! Obstacle environment in scalar and lane-broadcast form
//!
//! An environment is built once and queried many times:
//!
//! ```text
//! descriptors ──> Environment<f32> ──sort()──> Environment<f32> ──broadcast()──> Environment<f32x8>
//!                 (scalar, mutable)                                             (batch, read-only)
//! ```
//!
//! The scalar form owns construction and the optional sort; the batch form
//! holds every parameter splatted across all lanes so that distance queries
//! for a whole [`ConfigurationBlock`](crate::configuration::ConfigurationBlock)
//! run without any shuffling. Nothing mutates a batch environment once built.
//!
//! Sorting is a performance hint only (obstacles nearest the world origin,
//! where robot bases usually sit, are checked first). Callers must sort
//! *before* broadcasting; this is not checked.
//!
//! # Example
//!
//! ```rust
//! use sdf_repair::prelude::*;
//!
//! let mut env = Environment::new();
//! env.push_sphere(Sphere::new(Vec3::new(0.5, 0.0, 0.5), 0.2));
//! env.push_cuboid(Cuboid::axis_aligned(Vec3::new(0.0, 0.0, -0.05), Vec3::new(1.0, 1.0, 0.05)));
//! env.sort();
//!
//! let batch: Environment<DefaultLanes> = env.broadcast();
//! assert_eq!(batch.len(), 2);
//! ```

use crate::error::EnvironmentError;
use crate::lanes::FloatLanes;
use crate::shapes::{Cuboid, Sphere, Z_ALIGNED_TOLERANCE};
use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// User-facing description of one obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObstacleDescriptor {
    /// Sphere obstacle
    Sphere {
        /// Center
        center: [f32; 3],
        /// Radius (non-negative)
        radius: f32,
    },
    /// Box obstacle, optionally rotated
    Cuboid {
        /// Center
        center: [f32; 3],
        /// Intrinsic XYZ Euler angles in radians
        #[serde(default)]
        euler_xyz: [f32; 3],
        /// Half-extent along each local axis (non-negative)
        half_extents: [f32; 3],
    },
}

impl ObstacleDescriptor {
    fn validate(&self, index: usize) -> Result<(), EnvironmentError> {
        let (values, radii): (Vec<f32>, Vec<f32>) = match self {
            ObstacleDescriptor::Sphere { center, radius } => {
                let mut v = center.to_vec();
                v.push(*radius);
                (v, vec![*radius])
            }
            ObstacleDescriptor::Cuboid {
                center,
                euler_xyz,
                half_extents,
            } => {
                let v = center.iter().chain(euler_xyz).chain(half_extents).copied().collect();
                (v, half_extents.to_vec())
            }
        };

        if values.iter().any(|v| !v.is_finite()) {
            return Err(EnvironmentError::NonFinite { index });
        }
        if let Some(&radius) = radii.iter().find(|&&r| r < 0.0) {
            return Err(EnvironmentError::NegativeRadius { index, radius });
        }
        Ok(())
    }
}

/// Ordered collection of obstacle primitives.
///
/// `Environment<f32>` is the scalar form; `Environment<L>` for a lane type is
/// the batch form produced by [`Environment::broadcast`].
#[derive(Debug, Clone)]
pub struct Environment<D = f32> {
    spheres: Vec<Sphere<D>>,
    cuboids: Vec<Cuboid<D>>,
    z_aligned_cuboids: Vec<Cuboid<D>>,
}

impl<D> Default for Environment<D> {
    fn default() -> Self {
        Environment {
            spheres: Vec::new(),
            cuboids: Vec::new(),
            z_aligned_cuboids: Vec::new(),
        }
    }
}

impl<D: FloatLanes> Environment<D> {
    /// Sphere obstacles
    #[inline]
    pub fn spheres(&self) -> &[Sphere<D>] {
        &self.spheres
    }

    /// Oriented box obstacles
    #[inline]
    pub fn cuboids(&self) -> &[Cuboid<D>] {
        &self.cuboids
    }

    /// Box obstacles whose third axis is world +Z
    #[inline]
    pub fn z_aligned_cuboids(&self) -> &[Cuboid<D>] {
        &self.z_aligned_cuboids
    }

    /// Total obstacle count
    pub fn len(&self) -> usize {
        self.spheres.len() + self.cuboids.len() + self.z_aligned_cuboids.len()
    }

    /// True if there are no obstacles
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Environment<f32> {
    /// Empty scalar environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sphere obstacle
    pub fn push_sphere(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    /// Append a box obstacle.
    ///
    /// Boxes whose third axis is world +Z go to the z-aligned list and are
    /// queried with the cheaper specialized formula.
    pub fn push_cuboid(&mut self, cuboid: Cuboid) {
        if cuboid.is_z_aligned(Z_ALIGNED_TOLERANCE) {
            self.z_aligned_cuboids.push(cuboid);
        } else {
            self.cuboids.push(cuboid);
        }
    }

    /// Build a scalar environment from descriptors, in order.
    ///
    /// Rejects negative radii / half-extents and non-finite parameters. The
    /// result is not sorted.
    pub fn from_descriptors(descriptors: &[ObstacleDescriptor]) -> Result<Self, EnvironmentError> {
        let mut env = Self::new();
        for (index, descriptor) in descriptors.iter().enumerate() {
            descriptor.validate(index)?;
            match *descriptor {
                ObstacleDescriptor::Sphere { center, radius } => {
                    env.push_sphere(Sphere::new(Vec3::from_array(center), radius));
                }
                ObstacleDescriptor::Cuboid {
                    center,
                    euler_xyz,
                    half_extents,
                } => {
                    let [a, b, c] = euler_xyz;
                    let rotation = Quat::from_euler(EulerRot::XYZ, a, b, c);
                    env.push_cuboid(Cuboid::new(
                        Vec3::from_array(center),
                        rotation,
                        Vec3::from_array(half_extents),
                    ));
                }
            }
        }
        debug!(
            obstacles = descriptors.len(),
            spheres = env.spheres.len(),
            cuboids = env.cuboids.len(),
            z_aligned = env.z_aligned_cuboids.len(),
            "built environment from descriptors"
        );
        Ok(env)
    }

    /// Parse a JSON array of [`ObstacleDescriptor`]s
    pub fn from_json(json: &str) -> Result<Self, EnvironmentError> {
        let descriptors: Vec<ObstacleDescriptor> =
            serde_json::from_str(json).map_err(|e| EnvironmentError::Serialization(e.to_string()))?;
        Self::from_descriptors(&descriptors)
    }

    /// Order each obstacle list by its lower-bound distance from the world
    /// origin, nearest first.
    pub fn sort(&mut self) {
        self.spheres
            .sort_by(|a, b| a.min_distance().total_cmp(&b.min_distance()));
        self.cuboids
            .sort_by(|a, b| a.min_distance().total_cmp(&b.min_distance()));
        self.z_aligned_cuboids
            .sort_by(|a, b| a.min_distance().total_cmp(&b.min_distance()));
    }

    /// Derive the batch form with every parameter broadcast across `L`.
    pub fn broadcast<L: FloatLanes>(&self) -> Environment<L> {
        debug!(
            width = L::WIDTH,
            spheres = self.spheres.len(),
            cuboids = self.cuboids.len(),
            z_aligned = self.z_aligned_cuboids.len(),
            "broadcast environment"
        );
        Environment {
            spheres: self.spheres.iter().map(|s| s.broadcast()).collect(),
            cuboids: self.cuboids.iter().map(|c| c.broadcast()).collect(),
            z_aligned_cuboids: self.z_aligned_cuboids.iter().map(|c| c.broadcast()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wide::f32x8;

    #[test]
    fn test_push_routes_z_aligned() {
        let mut env = Environment::new();
        env.push_cuboid(Cuboid::z_aligned(Vec3::ZERO, 0.3, Vec3::ONE));
        env.push_cuboid(Cuboid::new(Vec3::ZERO, Quat::from_rotation_y(0.3), Vec3::ONE));
        assert_eq!(env.z_aligned_cuboids().len(), 1);
        assert_eq!(env.cuboids().len(), 1);
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn test_sort_nearest_first() {
        let mut env = Environment::new();
        env.push_sphere(Sphere::new(Vec3::new(5.0, 0.0, 0.0), 0.5));
        env.push_sphere(Sphere::new(Vec3::new(1.0, 0.0, 0.0), 0.5));
        env.push_sphere(Sphere::new(Vec3::new(3.0, 0.0, 0.0), 2.5));
        env.sort();
        let order: Vec<f32> = env.spheres().iter().map(|s| s.min_distance()).collect();
        assert_eq!(order, vec![0.5, 0.5, 4.5]);
        assert_eq!(env.spheres()[2].center().0, 5.0);
    }

    #[test]
    fn test_broadcast_keeps_order() {
        let mut env = Environment::new();
        env.push_sphere(Sphere::new(Vec3::new(1.0, 0.0, 0.0), 0.1));
        env.push_sphere(Sphere::new(Vec3::new(2.0, 0.0, 0.0), 0.2));
        let batch: Environment<f32x8> = env.broadcast();
        assert_eq!(batch.spheres().len(), 2);
        assert_eq!(batch.spheres()[1].radius().to_array(), [0.2; 8]);
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"type": "sphere", "center": [0.5, 0.0, 0.5], "radius": 0.2},
            {"type": "cuboid", "center": [0.0, 0.0, 0.0], "half_extents": [1.0, 1.0, 0.1]},
            {"type": "cuboid", "center": [1.0, 0.0, 0.0], "euler_xyz": [0.5, 0.0, 0.0], "half_extents": [0.1, 0.1, 0.1]}
        ]"#;
        let env = Environment::from_json(json).unwrap();
        assert_eq!(env.spheres().len(), 1);
        assert_eq!(env.z_aligned_cuboids().len(), 1);
        assert_eq!(env.cuboids().len(), 1);
    }

    #[test]
    fn test_rejects_negative_radius() {
        let descriptors = [
            ObstacleDescriptor::Sphere { center: [0.0; 3], radius: 1.0 },
            ObstacleDescriptor::Sphere { center: [0.0; 3], radius: -1.0 },
        ];
        match Environment::from_descriptors(&descriptors) {
            Err(EnvironmentError::NegativeRadius { index, radius }) => {
                assert_eq!(index, 1);
                assert_eq!(radius, -1.0);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_non_finite() {
        let descriptors = [ObstacleDescriptor::Cuboid {
            center: [0.0, f32::NAN, 0.0],
            euler_xyz: [0.0; 3],
            half_extents: [1.0; 3],
        }];
        assert!(matches!(
            Environment::from_descriptors(&descriptors),
            Err(EnvironmentError::NonFinite { index: 0 })
        ));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Environment::from_json("{not json"),
            Err(EnvironmentError::Serialization(_))
        ));
    }
}
