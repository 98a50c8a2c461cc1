//! Tests for face mapping and outcome resolution

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use dicetray::dice3d::types::{resolve_face, D6_FACES};

#[test]
fn test_d6_table_is_valid() {
    assert_eq!(D6_FACES.validate(), Ok(()));
}

#[test]
fn test_opposite_faces_sum_to_seven() {
    for (direction, value) in D6_FACES.faces() {
        let opposite = D6_FACES
            .faces()
            .iter()
            .find(|(other, _)| *other == -*direction)
            .map(|(_, v)| *v);
        assert_eq!(opposite, Some(7 - value), "opposite of {}", value);
    }
}

#[test]
fn test_rotating_each_face_up_reads_that_face() {
    for value in 1..=6 {
        let direction = D6_FACES.direction_of(value).expect("every value has a face");
        let rotation = Quat::from_rotation_arc(direction, Vec3::Y);
        assert_eq!(resolve_face(&D6_FACES, rotation), value);
    }
}

#[test]
fn test_named_rotations() {
    use std::f32::consts::{FRAC_PI_2, PI};

    assert_eq!(resolve_face(&D6_FACES, Quat::IDENTITY), 6);
    assert_eq!(resolve_face(&D6_FACES, Quat::from_rotation_z(FRAC_PI_2)), 3);
    assert_eq!(resolve_face(&D6_FACES, Quat::from_rotation_z(-FRAC_PI_2)), 4);
    assert_eq!(resolve_face(&D6_FACES, Quat::from_rotation_x(-FRAC_PI_2)), 2);
    assert_eq!(resolve_face(&D6_FACES, Quat::from_rotation_x(FRAC_PI_2)), 5);
    assert_eq!(resolve_face(&D6_FACES, Quat::from_rotation_x(PI)), 1);
}

#[test]
fn test_resolver_is_total_over_random_orientations() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..2000 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            rng.gen_range(0.0..std::f32::consts::TAU),
            rng.gen_range(0.0..std::f32::consts::TAU),
            rng.gen_range(0.0..std::f32::consts::TAU),
        );
        let value = resolve_face(&D6_FACES, rotation);
        assert!((1..=6).contains(&value));
    }
}

#[test]
fn test_resolver_picks_most_upward_face() {
    let mut rng = StdRng::seed_from_u64(77);
    for _ in 0..500 {
        let rotation = Quat::from_euler(
            EulerRot::YXZ,
            rng.gen_range(0.0..std::f32::consts::TAU),
            rng.gen_range(0.0..std::f32::consts::TAU),
            rng.gen_range(0.0..std::f32::consts::TAU),
        );
        let value = resolve_face(&D6_FACES, rotation);
        let chosen = D6_FACES.direction_of(value).expect("resolved value has a face");
        let best = D6_FACES
            .faces()
            .iter()
            .map(|(direction, _)| (rotation * *direction).y)
            .fold(f32::MIN, f32::max);
        assert!((rotation * chosen).y >= best - 1e-6);
    }
}

#[test]
fn test_resolver_handles_degenerate_rotations() {
    let zero = Quat::from_xyzw(0.0, 0.0, 0.0, 0.0);
    let nan = Quat::from_xyzw(f32::NAN, 0.0, 0.0, 1.0);
    let scaled = Quat::from_xyzw(0.0, 0.0, 0.0, 5.0);

    assert!((1..=6).contains(&resolve_face(&D6_FACES, zero)));
    assert!((1..=6).contains(&resolve_face(&D6_FACES, nan)));
    assert_eq!(resolve_face(&D6_FACES, scaled), 6);
}
