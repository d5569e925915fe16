//! Cloud lifecycle engine.
//!
//! `step_cloud` is a pure function of the cloud, the scaled frame delta and
//! the ambient state; the `update_clouds` system applies it to every cloud
//! and despawns the ones that have run out their lifetime.

use bevy::prelude::*;

use super::types::{Cloud, CloudStage, DISSIPATION_START, GROWTH_END};
use crate::atmosphere::Atmosphere;
use crate::config::SimulationSettings;

/// Vertical squash applied during growth: clouds flatten as they form.
const GROWTH_VERTICAL_RATIO: f32 = 0.6;

/// Sine jitter amplitudes, in cloud-local units.
const JITTER_AMPLITUDE_GROWING: f32 = 0.3;
const JITTER_AMPLITUDE_MATURE: f32 = 0.12;
const JITTER_FREQUENCY: f32 = 1.5;

/// Moisture level above which convective towers start stretching upward.
const STRETCH_MOISTURE_GATE: f32 = 0.7;
/// Puff rest height above which stretch applies (upper portion of the tower).
const STRETCH_MIN_REST_Y: f32 = 3.0;
/// Per-second stretch growth (the reference applied 1.001x per frame).
const STRETCH_RATE_PER_SECOND: f32 = 0.06;
/// Hard ceiling on accumulated stretch. The reference let this grow without
/// bound; capping keeps long-lived storm towers from drifting off screen.
const STRETCH_CAP: f32 = 3.0;

/// Humidity gates and rates for ambient moisture exchange.
const HUMID_EXCHANGE_GATE: f32 = 70.0;
const DRY_EXCHANGE_GATE: f32 = 40.0;
const MOISTURE_GAIN_RATE: f32 = 0.002;
const MOISTURE_DRY_RATE: f32 = 0.001;
const DRY_MOISTURE_FLOOR: f32 = 0.2;

/// Moisture drift while precipitating: slow regain, faster loss scaled by
/// intensity and the evaporation rate.
const PRECIPITATION_REGAIN_RATE: f32 = 0.0005;
const PRECIPITATION_LOSS_RATE: f32 = 0.002;

/// Ambient humidity required for any precipitation at all.
const PRECIPITATION_HUMIDITY_GATE: f32 = 60.0;

/// Advance one cloud by `dt` (already scaled) seconds.
///
/// Returns `true` exactly when the cloud's life ratio has reached 1 and it
/// should be removed. A zero `dt` leaves age, moisture and every puff
/// position untouched.
pub fn step_cloud(
    cloud: &mut Cloud,
    dt: f32,
    atmosphere: &Atmosphere,
    settings: &SimulationSettings,
) -> bool {
    if dt > 0.0 {
        cloud.age += dt;
        cloud.local_time += dt;
    }

    if cloud.life_ratio() >= 1.0 {
        return true;
    }

    exchange_ambient_moisture(cloud, dt, atmosphere, settings);

    match cloud.stage() {
        CloudStage::Growing => step_growing(cloud),
        CloudStage::Mature => step_mature(cloud, dt, atmosphere, settings),
        CloudStage::Dissipating => step_dissipating(cloud),
    }

    cloud.moisture = cloud.moisture.clamp(0.0, 1.0);
    // Puff tint tracks the moisture budget: saturated clouds darken.
    let tint = cloud.moisture;
    for puff in &mut cloud.puffs {
        puff.tint = tint;
    }
    false
}

/// Humidity-driven moisture exchange, applied in every stage.
fn exchange_ambient_moisture(
    cloud: &mut Cloud,
    dt: f32,
    atmosphere: &Atmosphere,
    settings: &SimulationSettings,
) {
    if atmosphere.humidity > HUMID_EXCHANGE_GATE {
        cloud.moisture =
            (cloud.moisture + dt * MOISTURE_GAIN_RATE / settings.evaporation_rate).min(1.0);
    } else if atmosphere.humidity < DRY_EXCHANGE_GATE && cloud.moisture > DRY_MOISTURE_FLOOR {
        cloud.moisture = (cloud.moisture - dt * MOISTURE_DRY_RATE * settings.evaporation_rate)
            .max(DRY_MOISTURE_FLOOR);
    }
}

fn step_growing(cloud: &mut Cloud) {
    let t = cloud.life_ratio() / GROWTH_END;
    let uniform = cloud.base_scale * t;
    cloud.current_scale = Vec3::new(uniform, uniform * GROWTH_VERTICAL_RATIO, uniform);
    apply_jitter(cloud, JITTER_AMPLITUDE_GROWING);
    cloud.precipitating = false;
    cloud.precipitation_intensity = 0.0;
}

fn step_mature(
    cloud: &mut Cloud,
    dt: f32,
    atmosphere: &Atmosphere,
    settings: &SimulationSettings,
) {
    let s = cloud.base_scale;
    cloud.current_scale = Vec3::new(s, s * GROWTH_VERTICAL_RATIO, s);
    apply_jitter(cloud, JITTER_AMPLITUDE_MATURE);

    // Convective towers: saturated congestus/cumulonimbus slowly stretch
    // their upper puffs vertically, up to the cap.
    if cloud.kind.is_convective() && cloud.moisture > STRETCH_MOISTURE_GATE {
        let growth = 1.0 + STRETCH_RATE_PER_SECOND * dt;
        for puff in &mut cloud.puffs {
            if puff.rest_y > STRETCH_MIN_REST_Y {
                puff.stretch = (puff.stretch * growth).min(STRETCH_CAP);
            }
        }
    }

    let gate = cloud.can_precipitate
        && cloud.moisture > cloud.precipitation_threshold
        && atmosphere.humidity > PRECIPITATION_HUMIDITY_GATE;

    if gate {
        cloud.precipitating = true;
        cloud.precipitation_intensity = ((cloud.moisture - cloud.precipitation_threshold)
            / (1.0 - cloud.precipitation_threshold))
            .clamp(0.0, 1.0);
        cloud.moisture += dt * PRECIPITATION_REGAIN_RATE
            - dt * PRECIPITATION_LOSS_RATE
                * cloud.precipitation_intensity
                * settings.evaporation_rate;
    } else {
        cloud.precipitating = false;
        cloud.precipitation_intensity = 0.0;
    }
}

fn step_dissipating(cloud: &mut Cloud) {
    let fade = 1.0
        - (cloud.life_ratio() - DISSIPATION_START) / (1.0 - DISSIPATION_START);
    let fade = fade.clamp(0.0, 1.0);
    for puff in &mut cloud.puffs {
        puff.opacity = puff.base_opacity * fade;
    }
    cloud.precipitating = false;
    cloud.precipitation_intensity = 0.0;
}

/// Per-puff phase-shifted vertical sine jitter around the rest height.
/// Driven by the cloud's accumulated local time, so a zero-dt frame leaves
/// every offset where it was.
fn apply_jitter(cloud: &mut Cloud, amplitude: f32) {
    let t = cloud.local_time * JITTER_FREQUENCY;
    for puff in &mut cloud.puffs {
        puff.offset.y = puff.rest_y + (t + puff.phase).sin() * amplitude;
    }
}

/// System wrapper: steps every cloud and despawns the expired ones together
/// with their puff drawables.
pub fn update_clouds(
    mut commands: Commands,
    time: Res<Time>,
    settings: Res<SimulationSettings>,
    atmosphere: Res<Atmosphere>,
    mut clouds: Query<(Entity, &mut Cloud)>,
) {
    let dt = settings.scaled_dt(time.delta_secs());
    for (entity, mut cloud) in &mut clouds {
        if step_cloud(&mut cloud, dt, &atmosphere, &settings) {
            debug!(
                "cloud dissipated: {} after {:.0}s",
                cloud.kind.name(),
                cloud.age
            );
            commands.entity(entity).despawn_recursive();
        }
    }
}
