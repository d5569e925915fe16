use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Global atmospheric state shared by every subsystem.
///
/// `humidity` is a relative percentage in [0, 100]; `temperature` is in
/// degrees Celsius. Both follow the deterministic oscillator in
/// `systems::update_atmosphere` and are never mutated anywhere else.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Atmosphere {
    /// Relative humidity percentage (0 - 100).
    pub humidity: f32,
    /// Air temperature in Celsius.
    pub temperature: f32,
    /// Accumulated simulation time in seconds, scaled by the simulation
    /// speed. Drives the oscillator; does not advance on zero-dt frames.
    pub elapsed: f32,
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self {
            humidity: 65.0,
            temperature: 18.0,
            elapsed: 0.0,
        }
    }
}
