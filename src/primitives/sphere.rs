//! Sphere-vs-sphere distances
//!
//! Same split as the box primitives: a squared pseudo-distance for cheap
//! rejection and an exact signed distance for gradients.

use crate::lanes::FloatLanes;
use crate::shapes::Sphere;

/// Squared pseudo-distance: `|c_a - p|^2 - (r_a + r)^2`.
///
/// `<= 0` exactly when the spheres overlap or touch.
#[inline(always)]
pub fn sphere_sphere_sql2_at<L: FloatLanes>(a: &Sphere<L>, x: L, y: L, z: L, r: L) -> L {
    let dx = a.x - x;
    let dy = a.y - y;
    let dz = a.z - z;
    let rs = a.r + r;
    dx * dx + dy * dy + dz * dz - rs * rs
}

/// [`sphere_sphere_sql2_at`] for two [`Sphere`]s
#[inline(always)]
pub fn sphere_sphere_sql2<L: FloatLanes>(a: &Sphere<L>, b: &Sphere<L>) -> L {
    sphere_sphere_sql2_at(a, b.x, b.y, b.z, b.r)
}

/// Exact signed distance between sphere surfaces: `|c_a - p| - r_a - r`.
#[inline(always)]
pub fn sphere_sphere_l2_at<L: FloatLanes>(a: &Sphere<L>, x: L, y: L, z: L, r: L) -> L {
    let dx = a.x - x;
    let dy = a.y - y;
    let dz = a.z - z;
    (dx * dx + dy * dy + dz * dz).sqrt() - a.r - r
}

/// [`sphere_sphere_l2_at`] for two [`Sphere`]s
#[inline(always)]
pub fn sphere_sphere_l2<L: FloatLanes>(a: &Sphere<L>, b: &Sphere<L>) -> L {
    sphere_sphere_l2_at(a, b.x, b.y, b.z, b.r)
}
