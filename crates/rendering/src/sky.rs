use bevy::prelude::*;

use simulation::config::GROUND_LEVEL_Y;

/// Resting sky color; lightning briefly washes it toward [`FLASH_SKY`].
pub const CLEAR_SKY: Color = Color::srgb(0.36, 0.56, 0.85);
pub const FLASH_SKY: Color = Color::srgb(0.82, 0.86, 1.0);

/// Half-extent of the ground plane, comfortably past the spawn area.
const GROUND_EXTENT: f32 = 400.0;

pub fn setup_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Ambient light for baseline illumination
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.9, 1.0),
        brightness: 250.0,
    });

    // Directional light (sun) angled from above
    commands.spawn((
        DirectionalLight {
            illuminance: 9000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::XYZ,
            -std::f32::consts::FRAC_PI_4,
            std::f32::consts::FRAC_PI_6,
            0.0,
        )),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(
            GROUND_EXTENT * 2.0,
            GROUND_EXTENT * 2.0,
        ))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.24, 0.4, 0.26),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_translation(Vec3::new(0.0, GROUND_LEVEL_Y, 0.0)),
    ));
}
