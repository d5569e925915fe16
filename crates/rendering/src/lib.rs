use bevy::prelude::*;

pub mod camera;
pub mod cloud_render;
pub mod lightning_render;
pub mod rain_render;
pub mod sky;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<camera::CameraShake>()
            .init_resource::<lightning_render::FlashQueue>()
            .init_resource::<cloud_render::CloudAssets>()
            .insert_resource(ClearColor(sky::CLEAR_SKY))
            .add_systems(Startup, (camera::setup_camera, sky::setup_environment))
            .add_systems(
                Update,
                (
                    (
                        cloud_render::spawn_puff_meshes,
                        cloud_render::sync_cloud_meshes,
                    )
                        .chain(),
                    rain_render::draw_rain,
                    (
                        lightning_render::handle_strikes,
                        lightning_render::draw_bolts,
                        lightning_render::process_flash_queue,
                        camera::apply_camera_shake,
                    )
                        .chain(),
                )
                    .after(simulation::SimulationSet::Stats),
            );
    }
}
