//! Scene setup system
//!
//! This module contains the setup function that initializes the 3D scene:
//! camera, lights, the static arena colliders and the HUD text.

use bevy::prelude::*;
use bevy::window::WindowResized;
use bevy_rapier3d::prelude::*;

use crate::dice3d::pool::{ARENA_CEILING_Y, ARENA_FLOOR_Y, ARENA_HALF_EXTENT};
use crate::dice3d::types::*;

const GROUND_SIZE: f32 = 50.0;
const WALL_THICKNESS: f32 = 0.5;

const GROUND_FRICTION: f32 = 0.1;
const GROUND_RESTITUTION: f32 = 0.5;
const WALL_FRICTION: f32 = 0.0;
const WALL_RESTITUTION: f32 = 0.9;

/// Center and half extents of each static arena collider: the ground slab,
/// four walls whose inner faces sit on `±ARENA_HALF_EXTENT`, and a ceiling.
pub fn arena_colliders() -> Vec<(Vec3, Vec3, f32, f32)> {
    let half = ARENA_HALF_EXTENT;
    let t = WALL_THICKNESS / 2.0;
    let wall_height = (ARENA_CEILING_Y - ARENA_FLOOR_Y) / 2.0;
    let wall_y = ARENA_FLOOR_Y + wall_height;

    vec![
        (
            Vec3::new(0.0, ARENA_FLOOR_Y - t, 0.0),
            Vec3::new(GROUND_SIZE / 2.0, t, GROUND_SIZE / 2.0),
            GROUND_FRICTION,
            GROUND_RESTITUTION,
        ),
        (
            Vec3::new(half + t, wall_y, 0.0),
            Vec3::new(t, wall_height, half + WALL_THICKNESS),
            WALL_FRICTION,
            WALL_RESTITUTION,
        ),
        (
            Vec3::new(-half - t, wall_y, 0.0),
            Vec3::new(t, wall_height, half + WALL_THICKNESS),
            WALL_FRICTION,
            WALL_RESTITUTION,
        ),
        (
            Vec3::new(0.0, wall_y, half + t),
            Vec3::new(half + WALL_THICKNESS, wall_height, t),
            WALL_FRICTION,
            WALL_RESTITUTION,
        ),
        (
            Vec3::new(0.0, wall_y, -half - t),
            Vec3::new(half + WALL_THICKNESS, wall_height, t),
            WALL_FRICTION,
            WALL_RESTITUTION,
        ),
        (
            Vec3::new(0.0, ARENA_CEILING_Y + t, 0.0),
            Vec3::new(half + WALL_THICKNESS, t, half + WALL_THICKNESS),
            WALL_FRICTION,
            WALL_RESTITUTION,
        ),
    ]
}

/// Main setup system - initializes the entire 3D scene
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    theme: Res<DiceTheme>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(CAMERA_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 7.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        PointLight {
            intensity: 400_000.0,
            range: 30.0,
            ..default()
        },
        Transform::from_xyz(-4.0, 8.0, -4.0),
    ));

    // Visible floor; the walls and ceiling are collision only.
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.2, 0.22, 0.25),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::from_xyz(0.0, ARENA_FLOOR_Y, 0.0),
    ));

    for (center, half_extents, friction, restitution) in arena_colliders() {
        commands.spawn((
            Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
            Transform::from_translation(center),
            RigidBody::Fixed,
            Friction::coefficient(friction),
            Restitution::coefficient(restitution),
            DiceBox,
        ));
    }

    spawn_hud(&mut commands, &theme.0);
}

fn spawn_hud(commands: &mut Commands, theme: &ThemeColor) {
    commands.spawn((
        Text::new("Ready"),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            max_width: Val::Px(420.0),
            ..default()
        },
        ResultsText,
    ));

    commands.spawn((
        Text::new("Total: 0"),
        TextFont {
            font_size: 48.0,
            ..default()
        },
        TextColor(theme.to_color()),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(16.0),
            left: Val::Px(16.0),
            ..default()
        },
        TotalText,
        AccentText,
    ));

    commands.spawn((
        Text::new("History"),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::srgb(0.85, 0.85, 0.85)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            right: Val::Px(12.0),
            ..default()
        },
        HistoryText,
    ));
}

/// The camera projection follows the window on its own; just note it.
pub fn log_window_resize(mut resized: MessageReader<WindowResized>) {
    for event in resized.read() {
        debug!("Window resized to {}x{}", event.width, event.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_walls_sit_on_half_extent() {
        let colliders = arena_colliders();
        assert_eq!(colliders.len(), 6);

        for (center, half_extents, _, _) in &colliders[1..5] {
            let inner_x = center.x.abs() - half_extents.x;
            let inner_z = center.z.abs() - half_extents.z;
            let inner = if center.x != 0.0 { inner_x } else { inner_z };
            assert!((inner - ARENA_HALF_EXTENT).abs() < 1e-5);
        }
    }

    #[test]
    fn test_ground_and_ceiling_heights() {
        let colliders = arena_colliders();
        let (ground, ground_half, _, _) = colliders[0];
        assert!((ground.y + ground_half.y - ARENA_FLOOR_Y).abs() < 1e-5);

        let (ceiling, ceiling_half, _, _) = colliders[5];
        assert!((ceiling.y - ceiling_half.y - ARENA_CEILING_Y).abs() < 1e-5);
    }

    #[test]
    fn test_walls_are_frictionless_and_bouncy() {
        for (_, _, friction, restitution) in &arena_colliders()[1..] {
            assert_eq!(*friction, WALL_FRICTION);
            assert_eq!(*restitution, WALL_RESTITUTION);
        }
    }
}
