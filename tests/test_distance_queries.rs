//! Integration tests: distance queries
//!
//! Verifies closed-form distances, lane-type agreement, and that sorting and
//! broadcasting never change the field.

mod common;

use common::*;
use sdf_repair::prelude::*;
use wide::f32x4;

// ============================================================================
// Closed forms
// ============================================================================

#[test]
fn exterior_distance_matches_gap() {
    let env = unit_box();
    let robot = FreeSphere::new(1.0);

    let cases = [
        ([3.0, 0.0, 0.0], 1.0),
        ([0.0, -2.5, 0.0], 0.5),
        ([0.0, 0.0, 4.0], 2.0),
        ([3.0, 3.0, 3.0], 12.0f32.sqrt() - 1.0),
    ];
    for (p, expected) in cases {
        let d = robot.sdf(&env, &ConfigurationBlock::<f32, 3>::broadcast(&p));
        assert_close(d, expected, 1e-5, &format!("exterior {:?}", p));
    }
}

#[test]
fn interior_distance_is_negative_face_depth_minus_radius() {
    let env = unit_box();
    let robot = FreeSphere::new(0.25);

    let cases = [
        ([0.0, 0.0, 0.0], -1.25),
        ([0.5, 0.0, 0.0], -0.75),
        ([0.1, -0.8, 0.2], -0.45),
    ];
    for (p, expected) in cases {
        let d = robot.sdf(&env, &ConfigurationBlock::<f32, 3>::broadcast(&p));
        assert_close(d, expected, 1e-5, &format!("interior {:?}", p));
    }
}

#[test]
fn pseudo_and_exact_agree_on_sign() {
    let env: Environment<DefaultLanes> = ring_environment().broadcast();
    let arm = ring_arm();

    for chunk in sweep_configurations(64).chunks(DEFAULT_WIDTH) {
        let block = ConfigurationBlock::<DefaultLanes, 4>::from_configurations(chunk);
        let exact = arm.sdf(&env, &block);
        let flags = arm.in_collision(&env, &block);
        for lane in 0..DEFAULT_WIDTH {
            let d = exact.lane(lane);
            // Skip grazing contacts where rounding may flip either sign
            if d.abs() > 1e-4 {
                assert_eq!(flags[lane], d <= 0.0, "lane {} distance {}", lane, d);
            }
        }
    }
}

// ============================================================================
// Lane types
// ============================================================================

#[test]
fn lane_types_agree() {
    let scalar_env = ring_environment();
    let env8: Environment<DefaultLanes> = scalar_env.broadcast();
    let env4: Environment<f32x4> = scalar_env.broadcast();
    let env_loop: Environment<LaneArray<3>> = scalar_env.broadcast();
    let arm = ring_arm();

    let configs = sweep_configurations(8);
    let d8 = arm.sdf(&env8, &ConfigurationBlock::from_configurations(&configs));
    let d4 = arm.sdf(&env4, &ConfigurationBlock::from_configurations(&configs[..4]));
    let d_loop = arm.sdf(&env_loop, &ConfigurationBlock::from_configurations(&configs[..3]));

    for (lane, q) in configs.iter().enumerate() {
        let d = arm.sdf(&scalar_env, &ConfigurationBlock::<f32, 4>::broadcast(q));
        assert_close(d8.lane(lane), d, 1e-5, "f32x8");
        if lane < 4 {
            assert_close(d4.lane(lane), d, 1e-5, "f32x4");
        }
        if lane < 3 {
            assert_close(d_loop.lane(lane), d, 1e-5, "LaneArray");
        }
    }
}

// ============================================================================
// Environment invariance
// ============================================================================

#[test]
fn sort_does_not_change_distances() {
    let unsorted = ring_environment();
    let mut sorted = unsorted.clone();
    sorted.sort();

    let arm = ring_arm();
    let a: Environment<DefaultLanes> = unsorted.broadcast();
    let b: Environment<DefaultLanes> = sorted.broadcast();

    for chunk in sweep_configurations(40).chunks(DEFAULT_WIDTH) {
        let block = ConfigurationBlock::<DefaultLanes, 4>::from_configurations(chunk);
        assert_eq!(arm.sdf(&a, &block).to_array(), arm.sdf(&b, &block).to_array());
    }
}

#[test]
fn ring_fixture_loads() {
    let env = Environment::from_json(RING_JSON).unwrap();
    assert_eq!(env.spheres().len(), 14);
    assert!(env.cuboids().is_empty() && env.z_aligned_cuboids().is_empty());
    assert!(env.spheres().iter().all(|s| s.radius() == 0.2));
    assert_eq!(ring_environment().len(), 16);
}

#[test]
fn json_environment_matches_programmatic() {
    let json = r#"[
        {"type": "sphere", "center": [0.55, 0.0, 0.25], "radius": 0.2},
        {"type": "cuboid", "center": [-0.9, 0.6, 0.25], "euler_xyz": [0.0, 0.0, 0.7], "half_extents": [0.1, 0.1, 0.5]}
    ]"#;
    let from_json = Environment::from_json(json).unwrap();
    assert_eq!(from_json.z_aligned_cuboids().len(), 1);

    let mut manual = Environment::new();
    manual.push_sphere(Sphere::new(Vec3::new(0.55, 0.0, 0.25), 0.2));
    manual.push_cuboid(Cuboid::z_aligned(Vec3::new(-0.9, 0.6, 0.25), 0.7, Vec3::new(0.1, 0.1, 0.5)));

    let arm = ring_arm();
    for q in sweep_configurations(16) {
        let block = ConfigurationBlock::<f32, 4>::broadcast(&q);
        assert_close(arm.sdf(&from_json, &block), arm.sdf(&manual, &block), 1e-5, "json vs manual");
    }
}

#[test]
fn empty_environment_is_finite_and_flat() {
    let env: Environment<DefaultLanes> = Environment::new().broadcast();
    let arm = ring_arm();
    let block = ConfigurationBlock::<DefaultLanes, 4>::broadcast(&[0.1, 0.2, 0.3, 0.4]);
    let d = arm.sdf(&env, &block);
    assert!(d.to_array().iter().all(|v| *v == NO_OBSTACLE_DISTANCE));

    let g = compute_gradient(&arm, &env, &block, DEFAULT_GRADIENT_STEP);
    for i in 0..4 {
        assert_eq!(g[i].to_array(), [0.0; 8]);
    }
}
