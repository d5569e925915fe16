//! Ambient atmospheric state.
//!
//! Humidity and temperature are driven by a deterministic time-based
//! oscillator so that two runs with the same settings see the same ambient
//! conditions. Both values are shared reads for the cloud factory and the
//! lifecycle engine.

mod state;
mod systems;

pub use state::Atmosphere;
pub use systems::{humidity_at, temperature_at, update_atmosphere};

use bevy::prelude::*;

pub struct AtmospherePlugin;

impl Plugin for AtmospherePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Atmosphere>().add_systems(
            Update,
            update_atmosphere.in_set(crate::SimulationSet::Ambient),
        );
    }
}
