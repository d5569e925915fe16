use bevy::prelude::*;

use super::state::Atmosphere;
use crate::config::SimulationSettings;

/// Humidity oscillator period scales. Two superposed sines give a slow
/// front-like swell with a faster ripple on top.
const HUMIDITY_SLOW_FREQ: f32 = 0.005;
const HUMIDITY_FAST_FREQ: f32 = 0.02;
const HUMIDITY_BASE: f32 = 65.0;
const HUMIDITY_SLOW_AMP: f32 = 18.0;
const HUMIDITY_FAST_AMP: f32 = 8.0;

const TEMPERATURE_BASE: f32 = 18.0;
const TEMPERATURE_AMP: f32 = 8.0;
const TEMPERATURE_FREQ: f32 = 0.008;

/// Deterministic humidity value for a given elapsed simulation time.
pub fn humidity_at(elapsed: f32) -> f32 {
    let h = HUMIDITY_BASE
        + HUMIDITY_SLOW_AMP * (elapsed * HUMIDITY_SLOW_FREQ).sin()
        + HUMIDITY_FAST_AMP * (elapsed * HUMIDITY_FAST_FREQ).sin();
    h.clamp(0.0, 100.0)
}

/// Deterministic temperature value for a given elapsed simulation time.
pub fn temperature_at(elapsed: f32) -> f32 {
    TEMPERATURE_BASE + TEMPERATURE_AMP * (elapsed * TEMPERATURE_FREQ).cos()
}

/// Advances the ambient oscillator by the scaled frame delta.
pub fn update_atmosphere(
    time: Res<Time>,
    settings: Res<SimulationSettings>,
    mut atmosphere: ResMut<Atmosphere>,
) {
    let dt = settings.scaled_dt(time.delta_secs());
    if dt > 0.0 {
        atmosphere.elapsed += dt;
    }
    atmosphere.humidity = humidity_at(atmosphere.elapsed);
    atmosphere.temperature = temperature_at(atmosphere.elapsed);
}
