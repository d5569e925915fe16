use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Maximum number of clouds alive at once.
pub const MAX_CLOUDS: usize = 18;

/// Half-extent of the square region clouds spawn over, in world units.
pub const SPAWN_EXTENT: f32 = 80.0;

/// World-space Y level of the ground plane. Raindrops and lightning bolts
/// terminate here.
pub const GROUND_LEVEL_Y: f32 = 0.0;

/// Smallest evaporation rate accepted from the host. Rates below this would
/// make the moisture regain term blow up (it divides by the rate).
pub const MIN_EVAPORATION_RATE: f32 = 0.01;

/// Host-configurable simulation multipliers.
///
/// Injected by the hosting layer as plain numbers; invalid values are clamped
/// rather than rejected so a bad setting can never stall the frame loop.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Scales moisture loss while precipitating and ambient drying.
    pub evaporation_rate: f32,
    /// Multiplier applied to wall-clock `dt` before it reaches any integrator.
    pub simulation_speed: f32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            evaporation_rate: 1.0,
            simulation_speed: 1.0,
        }
    }
}

impl SimulationSettings {
    /// Set the evaporation rate, clamping to [`MIN_EVAPORATION_RATE`].
    pub fn set_evaporation_rate(&mut self, rate: f32) {
        if !(rate >= MIN_EVAPORATION_RATE) {
            warn!(
                "evaporation_rate {} below minimum, clamping to {}",
                rate, MIN_EVAPORATION_RATE
            );
            self.evaporation_rate = MIN_EVAPORATION_RATE;
        } else {
            self.evaporation_rate = rate;
        }
    }

    /// Set the simulation speed, clamping negatives to zero (paused).
    pub fn set_simulation_speed(&mut self, speed: f32) {
        if !(speed >= 0.0) {
            warn!("simulation_speed {} is negative or NaN, clamping to 0", speed);
            self.simulation_speed = 0.0;
        } else {
            self.simulation_speed = speed;
        }
    }

    /// Scale a wall-clock frame delta by the configured simulation speed.
    pub fn scaled_dt(&self, dt: f32) -> f32 {
        dt * self.simulation_speed
    }
}
