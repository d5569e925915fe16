//! Per-cloud raindrop pools.
//!
//! Each precipitating cloud owns one dense, fixed-capacity particle pool.
//! Pools are created lazily on the first precipitating frame and released
//! the moment the cloud stops precipitating.

pub mod pool;
pub mod systems;
mod tests;

pub use pool::{RainPool, RainPools, RAIN_POOL_CAPACITY};
pub use systems::update_rain;

use bevy::prelude::*;

pub struct PrecipitationPlugin;

impl Plugin for PrecipitationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RainPools>().add_systems(
            Update,
            update_rain.in_set(crate::SimulationSet::Precipitation),
        );
    }
}
