use bevy::prelude::*;
use rand::Rng;

/// Fixed vantage point: slightly above ground, looking up at the cloud deck.
const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 14.0, 110.0);
const LOOK_TARGET: Vec3 = Vec3::new(0.0, 24.0, 0.0);

/// Per-frame multiplicative shake falloff.
const SHAKE_DECAY: f32 = 0.9;

/// Below this intensity the shake snaps to zero and the camera returns to
/// its rest transform.
const SHAKE_FLOOR: f32 = 0.01;

/// The undisturbed camera transform, captured at startup so shake offsets
/// never accumulate.
#[derive(Resource)]
pub struct CameraRig {
    pub base: Transform,
}

/// Decaying screen-shake driven by lightning strikes.
#[derive(Resource, Default)]
pub struct CameraShake {
    pub intensity: f32,
}

impl CameraShake {
    /// Strikes don't stack; the strongest live shake wins.
    pub fn trigger(&mut self, intensity: f32) {
        self.intensity = self.intensity.max(intensity);
    }
}

pub fn setup_camera(mut commands: Commands) {
    let base = Transform::from_translation(CAMERA_POSITION).looking_at(LOOK_TARGET, Vec3::Y);
    commands.spawn((Camera3d::default(), base));
    commands.insert_resource(CameraRig { base });
}

/// Offset the camera from its rig by a random amount each frame while shake
/// is live, decaying toward the floor. Purely visual, so entropy comes from
/// the thread RNG rather than the simulation stream.
pub fn apply_camera_shake(
    rig: Res<CameraRig>,
    mut shake: ResMut<CameraShake>,
    mut cameras: Query<&mut Transform, With<Camera3d>>,
) {
    let Ok(mut transform) = cameras.get_single_mut() else {
        return;
    };

    if shake.intensity <= SHAKE_FLOOR {
        if shake.intensity != 0.0 {
            shake.intensity = 0.0;
            *transform = rig.base;
        }
        return;
    }

    let mut rng = rand::thread_rng();
    *transform = rig.base;
    transform.translation.x += rng.gen_range(-1.0..1.0) * shake.intensity;
    transform.translation.y += rng.gen_range(-1.0..1.0) * shake.intensity;
    shake.intensity *= SHAKE_DECAY;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_keeps_strongest_shake() {
        let mut shake = CameraShake::default();
        shake.trigger(2.5);
        shake.trigger(1.0);
        assert_eq!(shake.intensity, 2.5);
        shake.trigger(3.0);
        assert_eq!(shake.intensity, 3.0);
    }

    #[test]
    fn test_shake_decays_to_rest() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(CameraShake { intensity: 2.5 })
            .add_systems(Update, apply_camera_shake);
        let base = Transform::from_translation(CAMERA_POSITION).looking_at(LOOK_TARGET, Vec3::Y);
        app.insert_resource(CameraRig { base });
        let camera = app.world_mut().spawn((Camera3d::default(), base)).id();

        // 2.5 * 0.9^n drops below the floor within 60 frames.
        for _ in 0..60 {
            app.update();
        }

        assert_eq!(app.world().resource::<CameraShake>().intensity, 0.0);
        let transform = app.world().get::<Transform>(camera).unwrap();
        assert_eq!(transform.translation, base.translation);
    }
}
