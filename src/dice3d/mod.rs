pub mod face_textures;
pub mod meshes;
pub mod pool;
pub mod systems;
pub mod types;

pub use face_textures::*;
pub use meshes::*;
pub use pool::*;
pub use systems::*;
pub use types::*;

use bevy::prelude::*;
use bevy::transform::TransformSystems;
use bevy_rapier3d::prelude::*;

/// Physics, roll engine, scene and HUD for the dice tray.
///
/// Settings-derived resources (`DiceTheme`, `DiceRng`, `SettleMode`,
/// `DiceCountSelection`, `AppSettings`, `SettingsPath`) may be inserted
/// before adding the plugin; missing ones fall back to defaults.
pub struct DiceTrayPlugin;

impl Plugin for DiceTrayPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
            .insert_resource(fixed_timestep())
            .add_message::<RollCommand>()
            .add_message::<RollResolved>()
            .init_resource::<RollState>()
            .init_resource::<LiveBodies>()
            .init_resource::<FaceTextures>()
            .init_resource::<DiceRng>()
            .init_resource::<DiceTheme>()
            .init_resource::<SettleMode>()
            .init_resource::<DiceCountSelection>()
            .init_resource::<AppSettings>()
            .init_resource::<SettingsPath>()
            .add_systems(Startup, (init_die_assets, setup))
            .add_systems(
                Update,
                (
                    handle_input,
                    apply_roll_commands,
                    resolve_settled_roll,
                    update_results_display,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    configure_gravity,
                    refresh_accent_colors_on_theme_change,
                    persist_settings_on_change,
                    log_window_resize,
                    echo_roll_results
                        .after(resolve_settled_roll)
                        .run_if(resource_exists::<EchoRolls>),
                ),
            )
            .add_systems(
                PostUpdate,
                sync_die_visuals
                    .after(PhysicsSet::Writeback)
                    .before(TransformSystems::Propagate),
            );
    }
}
