//! Common test helpers for sdf_repair integration tests

#![allow(dead_code)]

use sdf_repair::prelude::*;

// ============================================================================
// Standard environments
// ============================================================================

/// Ring of 14 spheres shared with the CLI and benches
pub const RING_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/ring.json"));

/// Single sphere obstacle of radius `radius` at the origin
pub fn origin_sphere(radius: f32) -> Environment {
    let mut env = Environment::new();
    env.push_sphere(Sphere::new(Vec3::ZERO, radius));
    env
}

/// Axis-aligned box of half-size 1 at the origin
pub fn unit_box() -> Environment {
    let mut env = Environment::new();
    env.push_cuboid(Cuboid::axis_aligned(Vec3::ZERO, Vec3::ONE));
    env
}

/// Ring of spheres at two heights around the origin, plus a tilted slab and a
/// yawed pillar
pub fn ring_environment() -> Environment {
    let mut env = Environment::from_json(RING_JSON).expect("ring fixture");
    env.push_cuboid(Cuboid::new(
        Vec3::new(0.9, 0.9, 0.1),
        Quat::from_rotation_x(0.3),
        Vec3::new(0.2, 0.3, 0.05),
    ));
    env.push_cuboid(Cuboid::z_aligned(Vec3::new(-0.9, 0.6, 0.25), 0.7, Vec3::new(0.1, 0.1, 0.5)));
    env
}

// ============================================================================
// Standard robots
// ============================================================================

/// Four-link planar arm at the height of the lower ring
pub fn ring_arm() -> PlanarArm<4> {
    PlanarArm::new(Vec3::new(0.0, 0.0, 0.25), 0.2, 0.04, 3)
}

/// Configurations spread over the joint range, deterministic
pub fn sweep_configurations(count: usize) -> Vec<[f32; 4]> {
    (0..count)
        .map(|i| {
            let t = i as f32 * 0.37;
            [t.sin() * 3.0, (t * 1.7).cos() * 2.0, (t * 0.3).sin(), -(t * 2.3).cos()]
        })
        .collect()
}

// ============================================================================
// Assertion helpers
// ============================================================================

/// Assert two f32 values are close within tolerance
pub fn assert_close(a: f32, b: f32, tol: f32, msg: &str) {
    assert!(
        (a - b).abs() < tol,
        "{}: {} vs {} (diff={}, tol={})",
        msg,
        a,
        b,
        (a - b).abs(),
        tol
    );
}

/// Closed-form gradient of the exact distance to an axis-aligned box
/// centered at the origin
pub fn box_gradient(p: Vec3, half: Vec3) -> Vec3 {
    let q = p.abs() - half;
    let signs = Vec3::new(p.x.signum(), p.y.signum(), p.z.signum());
    let outside = q.max(Vec3::ZERO);
    if outside.length_squared() > 0.0 {
        outside.normalize() * signs
    } else if q.x >= q.y && q.x >= q.z {
        Vec3::new(signs.x, 0.0, 0.0)
    } else if q.y >= q.z {
        Vec3::new(0.0, signs.y, 0.0)
    } else {
        Vec3::new(0.0, 0.0, signs.z)
    }
}
