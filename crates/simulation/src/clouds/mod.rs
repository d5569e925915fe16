//! Cloud entities: stochastic creation and lifecycle simulation.

pub mod factory;
pub mod lifecycle;
mod tests_factory;
pub mod types;

pub use factory::{build_cloud, build_puffs, select_kind, spawn_clouds};
pub use lifecycle::{step_cloud, update_clouds};
pub use types::{
    Cloud, CloudKind, CloudPuff, CloudStage, CLOUD_KIND_COUNT, DISSIPATION_START, GROWTH_END,
};

use bevy::prelude::*;

pub struct CloudsPlugin;

impl Plugin for CloudsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (factory::spawn_clouds, lifecycle::update_clouds)
                .chain()
                .in_set(crate::SimulationSet::Clouds),
        );
    }
}
