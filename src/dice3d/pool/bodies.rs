use std::collections::HashSet;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::{DicePool, DiePlacement};
use crate::dice3d::face_textures::{FaceMaterialSet, FaceTextures};
use crate::dice3d::meshes::{create_d6, DieAssets};
use crate::dice3d::types::*;

pub const DIE_MASS: f32 = 1.0;
pub const DIE_FRICTION: f32 = 0.4;
pub const DIE_RESTITUTION: f32 = 0.5;

/// Die bodies currently registered with the simulation.
#[derive(Resource, Default, Debug)]
pub struct LiveBodies(HashSet<Entity>);

impl LiveBodies {
    pub fn register(&mut self, body: Entity) {
        self.0.insert(body);
    }

    /// Returns false when the body was not registered (already released).
    pub fn release(&mut self, body: Entity) -> bool {
        self.0.remove(&body)
    }

    pub fn contains(&self, body: Entity) -> bool {
        self.0.contains(&body)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Spawn a unit cube rigid body for a die and register it.
pub fn create_die_body(commands: &mut Commands, live: &mut LiveBodies, id: DieId) -> Entity {
    let (_, collider, _) = create_d6();

    let body = commands
        .spawn((
            DieBody { id },
            Transform::default(),
            RigidBody::Dynamic,
            collider,
            Velocity::zero(),
            Restitution::coefficient(DIE_RESTITUTION),
            Friction::coefficient(DIE_FRICTION),
            ColliderMassProperties::Mass(DIE_MASS),
        ))
        .id();

    live.register(body);
    body
}

/// Move a body to its drop pose and queue the throw impulse.
pub fn place_randomized(commands: &mut Commands, body: Entity, placement: &DiePlacement) {
    commands.entity(body).insert((
        Transform::from_translation(placement.position).with_rotation(placement.rotation),
        Velocity::zero(),
        ExternalImpulse {
            impulse: placement.impulse,
            torque_impulse: placement.torque_impulse,
        },
    ));
}

/// Unregister and despawn a die body. Unknown bodies are ignored.
pub fn remove_die_body(commands: &mut Commands, live: &mut LiveBodies, body: Entity) {
    if !live.release(body) {
        return;
    }

    if let Ok(mut entity) = commands.get_entity(body) {
        entity.try_despawn();
    }
}

/// Spawn the visual for a die: one textured quad per face of the table.
pub fn spawn_die_visual(
    commands: &mut Commands,
    face_quad: &Handle<Mesh>,
    materials: &FaceMaterialSet,
    faces: &FaceTable,
    id: DieId,
    placement: &DiePlacement,
) -> Entity {
    commands
        .spawn((
            DieVisual { id },
            Transform::from_translation(placement.position).with_rotation(placement.rotation),
            Visibility::default(),
        ))
        .with_children(|parent| {
            for (normal, value) in faces.faces() {
                parent.spawn((
                    DieFace { value: *value },
                    Mesh3d(face_quad.clone()),
                    MeshMaterial3d(materials.material(*value)),
                    Transform::from_translation(*normal * (DIE_SIZE / 2.0))
                        .with_rotation(Quat::from_rotation_arc(Vec3::Z, *normal)),
                ));
            }
        })
        .id()
}

/// The simulation world and scene as seen by the roll state.
#[derive(SystemParam)]
pub struct DiceWorld<'w, 's> {
    commands: Commands<'w, 's>,
    live: ResMut<'w, LiveBodies>,
    textures: ResMut<'w, FaceTextures>,
    theme: ResMut<'w, DiceTheme>,
    die_assets: Res<'w, DieAssets>,
    images: ResMut<'w, Assets<Image>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
}

impl DiceWorld<'_, '_> {
    /// Switch the theme for dice created from now on.
    ///
    /// Cached face materials are dropped; dice already on the table keep theirs.
    pub fn set_theme(&mut self, theme: ThemeColor) {
        if self.theme.0 == theme {
            return;
        }
        info!("Dice theme set to {}", theme);
        self.theme.0 = theme;
        self.textures.invalidate();
    }
}

impl DicePool for DiceWorld<'_, '_> {
    fn create_die(&mut self, id: DieId, placement: &DiePlacement) -> DieRecord {
        let body = create_die_body(&mut self.commands, &mut self.live, id);
        place_randomized(&mut self.commands, body, placement);

        let face_materials =
            self.textures
                .materials_for(&self.theme.0, &mut self.images, &mut self.materials);
        let visual = spawn_die_visual(
            &mut self.commands,
            &self.die_assets.face_quad,
            &face_materials,
            &D6_FACES,
            id,
            placement,
        );

        DieRecord {
            id,
            body,
            visual,
            faces: &D6_FACES,
        }
    }

    fn remove_die(&mut self, record: &DieRecord) {
        remove_die_body(&mut self.commands, &mut self.live, record.body);

        if let Ok(mut entity) = self.commands.get_entity(record.visual) {
            entity.try_despawn();
        }
    }
}
