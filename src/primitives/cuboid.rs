//! Sphere-vs-box distances
//!
//! Two families, each with a general (oriented) and a z-aligned form:
//!
//! - **Pseudo-distance** (`sphere_cuboid*`): clamped per-axis excess, squared
//!   and summed, minus the squared sphere radius. `<= 0` means the sphere may
//!   overlap the box. Cheap, sign-correct, but not a metric; use it to reject,
//!   not to descend.
//! - **Exact signed distance** (`sphere_cuboid_l2*`): Euclidean distance from
//!   the sphere surface to the box surface. Positive when clear, zero at
//!   contact, minus the penetration depth when overlapping.
//!
//! The z-aligned forms assume the box's third axis is world +Z, which turns one
//! 3-D projection into a direct coordinate difference and the other two into
//! 2-D dot products.

use crate::lanes::FloatLanes;
use crate::shapes::{Cuboid, Sphere};

#[inline(always)]
fn dot_3<L: FloatLanes>(a: [L; 3], bx: L, by: L, bz: L) -> L {
    a[0] * bx + a[1] * by + a[2] * bz
}

#[inline(always)]
fn dot_2<L: FloatLanes>(a: [L; 3], bx: L, by: L) -> L {
    a[0] * bx + a[1] * by
}

/// Combine signed per-axis excess into an exact signed distance.
#[inline(always)]
fn signed_from_excess<L: FloatLanes>(q1: L, q2: L, q3: L, r: L) -> L {
    let zero = L::zero();
    let a1 = q1.max(zero);
    let a2 = q2.max(zero);
    let a3 = q3.max(zero);
    let outside = (a1 * a1 + a2 * a2 + a3 * a3).sqrt();

    // Deepest-violated axis decides the penetration term
    let max_q = q1.max(q2).max(q3);
    let inside = -((-max_q).max(zero));

    outside + inside - r
}

#[inline(always)]
fn squared_from_excess<L: FloatLanes>(q1: L, q2: L, q3: L, rsq: L) -> L {
    let zero = L::zero();
    let a1 = q1.max(zero);
    let a2 = q2.max(zero);
    let a3 = q3.max(zero);
    a1 * a1 + a2 * a2 + a3 * a3 - rsq
}

// ============================================================================
// Oriented box
// ============================================================================

/// Pseudo-distance between a sphere at `(x, y, z)` with squared radius `rsq`
/// and an oriented box. `<= 0` when the sphere may overlap the box.
#[doc(alias = "sphere_box")]
#[inline(always)]
pub fn sphere_cuboid_at<L: FloatLanes>(c: &Cuboid<L>, x: L, y: L, z: L, rsq: L) -> L {
    let xs = x - c.center[0];
    let ys = y - c.center[1];
    let zs = z - c.center[2];

    let q1 = dot_3(c.axes[0], xs, ys, zs).abs() - c.half_extents[0];
    let q2 = dot_3(c.axes[1], xs, ys, zs).abs() - c.half_extents[1];
    let q3 = dot_3(c.axes[2], xs, ys, zs).abs() - c.half_extents[2];

    squared_from_excess(q1, q2, q3, rsq)
}

/// [`sphere_cuboid_at`] for a [`Sphere`]
#[inline(always)]
pub fn sphere_cuboid<L: FloatLanes>(c: &Cuboid<L>, s: &Sphere<L>) -> L {
    sphere_cuboid_at(c, s.x, s.y, s.z, s.rsq)
}

/// Exact signed distance between a sphere at `(x, y, z)` with radius `r` and
/// an oriented box.
#[doc(alias = "sphere_box_l2")]
#[inline(always)]
pub fn sphere_cuboid_l2_at<L: FloatLanes>(c: &Cuboid<L>, x: L, y: L, z: L, r: L) -> L {
    let xs = x - c.center[0];
    let ys = y - c.center[1];
    let zs = z - c.center[2];

    let q1 = dot_3(c.axes[0], xs, ys, zs).abs() - c.half_extents[0];
    let q2 = dot_3(c.axes[1], xs, ys, zs).abs() - c.half_extents[1];
    let q3 = dot_3(c.axes[2], xs, ys, zs).abs() - c.half_extents[2];

    signed_from_excess(q1, q2, q3, r)
}

/// [`sphere_cuboid_l2_at`] for a [`Sphere`]
#[inline(always)]
pub fn sphere_cuboid_l2<L: FloatLanes>(c: &Cuboid<L>, s: &Sphere<L>) -> L {
    sphere_cuboid_l2_at(c, s.x, s.y, s.z, s.r)
}

// ============================================================================
// Z-aligned box
// ============================================================================

/// Pseudo-distance against a box whose third axis is world +Z.
#[inline(always)]
pub fn sphere_z_aligned_cuboid_at<L: FloatLanes>(c: &Cuboid<L>, x: L, y: L, z: L, rsq: L) -> L {
    let xs = x - c.center[0];
    let ys = y - c.center[1];
    let zs = z - c.center[2];

    let q1 = dot_2(c.axes[0], xs, ys).abs() - c.half_extents[0];
    let q2 = dot_2(c.axes[1], xs, ys).abs() - c.half_extents[1];
    let q3 = zs.abs() - c.half_extents[2];

    squared_from_excess(q1, q2, q3, rsq)
}

/// [`sphere_z_aligned_cuboid_at`] for a [`Sphere`]
#[inline(always)]
pub fn sphere_z_aligned_cuboid<L: FloatLanes>(c: &Cuboid<L>, s: &Sphere<L>) -> L {
    sphere_z_aligned_cuboid_at(c, s.x, s.y, s.z, s.rsq)
}

/// Exact signed distance against a box whose third axis is world +Z.
#[inline(always)]
pub fn sphere_z_aligned_cuboid_l2_at<L: FloatLanes>(c: &Cuboid<L>, x: L, y: L, z: L, r: L) -> L {
    let xs = x - c.center[0];
    let ys = y - c.center[1];
    let zs = z - c.center[2];

    let q1 = dot_2(c.axes[0], xs, ys).abs() - c.half_extents[0];
    let q2 = dot_2(c.axes[1], xs, ys).abs() - c.half_extents[1];
    let q3 = zs.abs() - c.half_extents[2];

    signed_from_excess(q1, q2, q3, r)
}

/// [`sphere_z_aligned_cuboid_l2_at`] for a [`Sphere`]
#[inline(always)]
pub fn sphere_z_aligned_cuboid_l2<L: FloatLanes>(c: &Cuboid<L>, s: &Sphere<L>) -> L {
    sphere_z_aligned_cuboid_l2_at(c, s.x, s.y, s.z, s.r)
}
