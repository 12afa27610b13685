//! Sphere-vs-obstacle distance primitives
//!
//! Every function here is pure, generic over the lane type, and behaves
//! identically for one value (`f32`) or a batch (`f32x8`, ...).
//!
//! | Obstacle | Pseudo (reject) | Exact (descend) |
//! |---|---|---|
//! | Sphere | [`sphere_sphere_sql2`] | [`sphere_sphere_l2`] |
//! | Box | [`sphere_cuboid`] | [`sphere_cuboid_l2`] |
//! | Z-aligned box | [`sphere_z_aligned_cuboid`] | [`sphere_z_aligned_cuboid_l2`] |

mod cuboid;
mod sphere;

pub use cuboid::{
    sphere_cuboid, sphere_cuboid_at, sphere_cuboid_l2, sphere_cuboid_l2_at,
    sphere_z_aligned_cuboid, sphere_z_aligned_cuboid_at, sphere_z_aligned_cuboid_l2,
    sphere_z_aligned_cuboid_l2_at,
};
pub use sphere::{sphere_sphere_l2, sphere_sphere_l2_at, sphere_sphere_sql2, sphere_sphere_sql2_at};
