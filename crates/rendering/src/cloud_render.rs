//! Cloud drawables.
//!
//! Each cloud entity gets one child sphere per puff, all sharing a single
//! unit-sphere mesh but owning their own translucent material so opacity
//! and tint can fade per puff. The simulation owns every number shown here;
//! this module only mirrors it into transforms and materials.

use bevy::prelude::*;

use simulation::clouds::{Cloud, CloudPuff};

/// Shared mesh for every puff sphere.
#[derive(Resource)]
pub struct CloudAssets {
    pub puff_mesh: Handle<Mesh>,
}

impl FromWorld for CloudAssets {
    fn from_world(world: &mut World) -> Self {
        let mut meshes = world.resource_mut::<Assets<Mesh>>();
        Self {
            puff_mesh: meshes.add(Sphere::new(1.0)),
        }
    }
}

/// Marks a puff drawable and the index of its puff in the parent cloud.
#[derive(Component)]
pub struct PuffMesh(pub usize);

/// Sunlit white shading toward a heavy storm grey as tint rises.
fn puff_color(puff: &CloudPuff) -> Color {
    let t = puff.tint;
    Color::srgba(
        0.96 - 0.58 * t,
        0.96 - 0.56 * t,
        0.98 - 0.52 * t,
        puff.opacity,
    )
}

fn puff_transform(puff: &CloudPuff) -> Transform {
    Transform {
        translation: puff.offset,
        scale: Vec3::new(puff.scale, puff.scale * puff.stretch, puff.scale),
        ..default()
    }
}

fn cloud_transform(cloud: &Cloud) -> Transform {
    Transform {
        translation: cloud.position,
        rotation: Quat::from_rotation_y(cloud.rotation_y),
        scale: cloud.current_scale,
    }
}

/// Give every newly formed cloud its puff sphere children.
pub fn spawn_puff_meshes(
    mut commands: Commands,
    assets: Res<CloudAssets>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    clouds: Query<(Entity, &Cloud), Added<Cloud>>,
) {
    for (entity, cloud) in &clouds {
        commands
            .entity(entity)
            .insert((cloud_transform(cloud), Visibility::default()))
            .with_children(|parent| {
                for (i, puff) in cloud.puffs.iter().enumerate() {
                    parent.spawn((
                        PuffMesh(i),
                        Mesh3d(assets.puff_mesh.clone()),
                        MeshMaterial3d(materials.add(StandardMaterial {
                            base_color: puff_color(puff),
                            alpha_mode: AlphaMode::Blend,
                            perceptual_roughness: 1.0,
                            ..default()
                        })),
                        puff_transform(puff),
                    ));
                }
            });
    }
}

/// Mirror the simulated cloud state into transforms and materials.
#[allow(clippy::type_complexity)]
pub fn sync_cloud_meshes(
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut clouds: Query<(&Cloud, &mut Transform)>,
    mut puffs: Query<
        (
            &PuffMesh,
            &Parent,
            &mut Transform,
            &MeshMaterial3d<StandardMaterial>,
        ),
        Without<Cloud>,
    >,
) {
    for (cloud, mut transform) in &mut clouds {
        *transform = cloud_transform(cloud);
    }

    for (index, parent, mut transform, material) in &mut puffs {
        let Ok((cloud, _)) = clouds.get(parent.get()) else {
            continue;
        };
        let Some(puff) = cloud.puffs.get(index.0) else {
            continue;
        };
        *transform = puff_transform(puff);
        if let Some(material) = materials.get_mut(&material.0) {
            material.base_color = puff_color(puff);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_puff(tint: f32, opacity: f32, stretch: f32) -> CloudPuff {
        CloudPuff {
            offset: Vec3::new(1.0, 2.0, 3.0),
            rest_y: 2.0,
            scale: 0.8,
            phase: 0.0,
            base_opacity: opacity,
            opacity,
            tint,
            stretch,
        }
    }

    #[test]
    fn test_puff_color_darkens_with_tint() {
        let dry = puff_color(&test_puff(0.0, 0.9, 1.0)).to_srgba();
        let wet = puff_color(&test_puff(1.0, 0.9, 1.0)).to_srgba();
        assert!(wet.red < dry.red);
        assert!(wet.green < dry.green);
        assert!(wet.blue < dry.blue);
        assert_eq!(wet.alpha, dry.alpha);
    }

    #[test]
    fn test_puff_transform_stretches_vertically_only() {
        let transform = puff_transform(&test_puff(0.0, 0.9, 2.5));
        assert_eq!(transform.scale.x, 0.8);
        assert_eq!(transform.scale.z, 0.8);
        assert!((transform.scale.y - 2.0).abs() < 1e-6);
        assert_eq!(transform.translation, Vec3::new(1.0, 2.0, 3.0));
    }
}
