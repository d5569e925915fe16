use bevy::prelude::*;

pub mod atmosphere;
pub mod clouds;
pub mod config;
pub mod lightning;
pub mod precipitation;
pub mod sim_rng;
pub mod stats;

pub use sim_rng::SimRng;

/// Per-frame update phases, run strictly in this order so each piece of
/// shared state has exactly one writer per frame: the ambient oscillator
/// feeds the cloud systems, whose precipitation flags feed the rain pools,
/// whose intensity feeds the lightning triggers, and stats read everything
/// at the end.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Ambient,
    Clouds,
    Precipitation,
    Lightning,
    Stats,
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimRng>()
            .init_resource::<config::SimulationSettings>()
            .init_resource::<stats::WeatherStats>()
            .configure_sets(
                Update,
                (
                    SimulationSet::Ambient,
                    SimulationSet::Clouds,
                    SimulationSet::Precipitation,
                    SimulationSet::Lightning,
                    SimulationSet::Stats,
                )
                    .chain(),
            )
            .add_systems(Update, stats::update_stats.in_set(SimulationSet::Stats));

        app.add_plugins((
            atmosphere::AtmospherePlugin,
            clouds::CloudsPlugin,
            precipitation::PrecipitationPlugin,
            lightning::LightningPlugin,
        ));
    }
}
