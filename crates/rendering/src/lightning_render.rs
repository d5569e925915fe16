//! Lightning drawing and strike side effects.
//!
//! Bolt polylines are redrawn from the simulation's bolt list each frame,
//! fading with bolt age. Strike events additionally kick off short-lived
//! side effects: a point light at the strike origin, a sky flash and a
//! burst of camera shake. The light and sky reverts are scheduled through
//! [`FlashQueue`] on wall-clock time, so a paused or slowed simulation
//! never leaves a flash stuck on.

use bevy::prelude::*;

use simulation::lightning::{Bolts, LightningStrikeEvent};

use crate::camera::CameraShake;
use crate::sky::{CLEAR_SKY, FLASH_SKY};

/// Seconds the strike point light stays lit.
const FLASH_LIGHT_SECS: f32 = 0.15;

/// Seconds the sky holds the flash color.
const SKY_FLASH_SECS: f32 = 0.05;

const FLASH_LIGHT_INTENSITY: f32 = 50_000_000.0;
const FLASH_LIGHT_RANGE: f32 = 250.0;

const STRIKE_SHAKE: f32 = 2.5;

const BOLT_CORE_COLOR: Color = Color::srgb(0.95, 0.95, 1.0);

#[derive(Clone, Copy)]
pub enum FlashAction {
    ExtinguishLight(Entity),
    RestoreSky,
}

/// Pending flash reverts, ordered by insertion and drained by deadline.
#[derive(Resource, Default)]
pub struct FlashQueue {
    pub pending: Vec<(f32, FlashAction)>,
}

/// React to strikes: light, sky flash, shake, and the scheduled reverts.
pub fn handle_strikes(
    mut commands: Commands,
    mut strikes: EventReader<LightningStrikeEvent>,
    mut queue: ResMut<FlashQueue>,
    mut clear_color: ResMut<ClearColor>,
    mut shake: ResMut<CameraShake>,
    time: Res<Time<Real>>,
) {
    let now = time.elapsed_secs();
    for strike in strikes.read() {
        let light = commands
            .spawn((
                PointLight {
                    intensity: FLASH_LIGHT_INTENSITY,
                    range: FLASH_LIGHT_RANGE,
                    color: Color::srgb(0.9, 0.9, 1.0),
                    shadows_enabled: false,
                    ..default()
                },
                Transform::from_translation(strike.position),
            ))
            .id();

        clear_color.0 = FLASH_SKY;
        shake.trigger(STRIKE_SHAKE);

        queue
            .pending
            .push((now + FLASH_LIGHT_SECS, FlashAction::ExtinguishLight(light)));
        queue
            .pending
            .push((now + SKY_FLASH_SECS, FlashAction::RestoreSky));
    }
}

/// Run every flash revert whose deadline has passed.
///
/// Lights may already be gone if something despawned them wholesale, so
/// each despawn goes through `get_entity` instead of assuming liveness.
pub fn process_flash_queue(
    mut commands: Commands,
    time: Res<Time<Real>>,
    mut queue: ResMut<FlashQueue>,
    mut clear_color: ResMut<ClearColor>,
) {
    let now = time.elapsed_secs();
    queue.pending.retain(|&(due, action)| {
        if due > now {
            return true;
        }
        match action {
            FlashAction::ExtinguishLight(entity) => {
                if let Some(mut light) = commands.get_entity(entity) {
                    light.despawn();
                }
            }
            FlashAction::RestoreSky => {
                clear_color.0 = CLEAR_SKY;
            }
        }
        false
    });
}

/// Draw every live bolt as one fading polyline.
pub fn draw_bolts(bolts: Res<Bolts>, mut gizmos: Gizmos) {
    for bolt in &bolts.bolts {
        let color = BOLT_CORE_COLOR.with_alpha(bolt.opacity());
        gizmos.linestrip(bolt.path.iter().copied(), color);
    }
}
