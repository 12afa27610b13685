//! Collision shapes: spheres and (oriented / z-aligned) cuboids
//!
//! Shapes are generic over their data type `D`. `Sphere<f32>` and
//! `Cuboid<f32>` are the scalar form used while building and sorting an
//! environment; `Sphere<L>` / `Cuboid<L>` for a [`FloatLanes`] type `L` hold
//! every parameter broadcast across all lanes and are what the distance
//! primitives consume.
//!
//! Fields are crate-private so the cached squared radius of a sphere can never
//! drift from its radius.

use crate::lanes::FloatLanes;
use glam::{Quat, Vec3};

/// Tolerance used to decide whether a cuboid's third axis is world +Z
pub const Z_ALIGNED_TOLERANCE: f32 = 1e-6;

// ============================================================================
// Sphere
// ============================================================================

/// Sphere given by center and radius, with cached squared radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere<D = f32> {
    pub(crate) x: D,
    pub(crate) y: D,
    pub(crate) z: D,
    pub(crate) r: D,
    pub(crate) rsq: D,
}

impl<D: FloatLanes> Sphere<D> {
    /// Build a sphere from per-lane center components and radius
    #[inline(always)]
    pub fn from_lanes(x: D, y: D, z: D, r: D) -> Self {
        Sphere { x, y, z, r, rsq: r * r }
    }

    /// Center components `(x, y, z)`
    #[inline(always)]
    pub fn center(&self) -> (D, D, D) {
        (self.x, self.y, self.z)
    }

    /// Radius
    #[inline(always)]
    pub fn radius(&self) -> D {
        self.r
    }

    /// Squared radius (always `radius * radius`)
    #[inline(always)]
    pub fn radius_squared(&self) -> D {
        self.rsq
    }
}

impl Sphere<f32> {
    /// Create a scalar sphere
    pub fn new(center: Vec3, radius: f32) -> Self {
        Sphere::from_lanes(center.x, center.y, center.z, radius)
    }

    /// Center as a `Vec3`
    pub fn center_vec3(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Lower bound on the distance from the world origin to the sphere
    pub fn min_distance(&self) -> f32 {
        self.center_vec3().length() - self.r
    }

    /// Broadcast every parameter across all lanes of `L`
    pub fn broadcast<L: FloatLanes>(&self) -> Sphere<L> {
        Sphere {
            x: L::splat(self.x),
            y: L::splat(self.y),
            z: L::splat(self.z),
            r: L::splat(self.r),
            rsq: L::splat(self.rsq),
        }
    }
}

// ============================================================================
// Cuboid
// ============================================================================

/// Box with center, three orthonormal axes and a half-extent along each.
///
/// Orthonormality of the axes is a precondition and is not checked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cuboid<D = f32> {
    pub(crate) center: [D; 3],
    pub(crate) axes: [[D; 3]; 3],
    pub(crate) half_extents: [D; 3],
}

impl<D: FloatLanes> Cuboid<D> {
    /// Center components
    #[inline(always)]
    pub fn center(&self) -> [D; 3] {
        self.center
    }

    /// Unit axes (`axes[i]` is axis `i + 1`)
    #[inline(always)]
    pub fn axes(&self) -> [[D; 3]; 3] {
        self.axes
    }

    /// Half-extent along each axis
    #[inline(always)]
    pub fn half_extents(&self) -> [D; 3] {
        self.half_extents
    }
}

impl Cuboid<f32> {
    /// Create an oriented box from explicit axes
    pub fn from_axes(center: Vec3, axes: [Vec3; 3], half_extents: Vec3) -> Self {
        Cuboid {
            center: center.to_array(),
            axes: [axes[0].to_array(), axes[1].to_array(), axes[2].to_array()],
            half_extents: half_extents.to_array(),
        }
    }

    /// Create an oriented box whose local frame is `rotation`
    pub fn new(center: Vec3, rotation: Quat, half_extents: Vec3) -> Self {
        Self::from_axes(
            center,
            [rotation * Vec3::X, rotation * Vec3::Y, rotation * Vec3::Z],
            half_extents,
        )
    }

    /// Create a box aligned with the world axes
    pub fn axis_aligned(center: Vec3, half_extents: Vec3) -> Self {
        Self::from_axes(center, [Vec3::X, Vec3::Y, Vec3::Z], half_extents)
    }

    /// Create a box rotated only about world Z (third axis stays +Z)
    pub fn z_aligned(center: Vec3, yaw: f32, half_extents: Vec3) -> Self {
        let (s, c) = yaw.sin_cos();
        Self::from_axes(
            center,
            [Vec3::new(c, s, 0.0), Vec3::new(-s, c, 0.0), Vec3::Z],
            half_extents,
        )
    }

    /// Center as a `Vec3`
    pub fn center_vec3(&self) -> Vec3 {
        Vec3::from_array(self.center)
    }

    /// Half-extents as a `Vec3`
    pub fn half_extents_vec3(&self) -> Vec3 {
        Vec3::from_array(self.half_extents)
    }

    /// True if the third axis equals world +Z within `tolerance`
    pub fn is_z_aligned(&self, tolerance: f32) -> bool {
        Vec3::from_array(self.axes[2]).abs_diff_eq(Vec3::Z, tolerance)
    }

    /// Lower bound on the distance from the world origin to the box
    /// (center distance minus bounding-sphere radius)
    pub fn min_distance(&self) -> f32 {
        self.center_vec3().length() - self.half_extents_vec3().length()
    }

    /// Broadcast every parameter across all lanes of `L`
    pub fn broadcast<L: FloatLanes>(&self) -> Cuboid<L> {
        let splat3 = |v: [f32; 3]| [L::splat(v[0]), L::splat(v[1]), L::splat(v[2])];
        Cuboid {
            center: splat3(self.center),
            axes: [splat3(self.axes[0]), splat3(self.axes[1]), splat3(self.axes[2])],
            half_extents: splat3(self.half_extents),
        }
    }
}
