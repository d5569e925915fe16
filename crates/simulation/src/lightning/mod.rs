//! Procedural branching lightning.
//!
//! Bolt paths are generated by a bounded recursive subdivision that splices
//! sub-branch points inline, so each strike is one flattened polyline. The
//! generator owns bolt lifetimes; strike side effects (flash lights,
//! background flash, camera shake) are delegated to the rendering layer via
//! [`LightningStrikeEvent`].

pub mod bolt;
pub mod systems;
mod tests;

pub use bolt::{generate_bolt, Bolt, Bolts, BOLT_LIFETIME, MAX_BRANCH_DEPTH};
pub use systems::{age_bolts, trigger_strikes, LightningStrikeEvent};

use bevy::prelude::*;

pub struct LightningPlugin;

impl Plugin for LightningPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Bolts>()
            .add_event::<LightningStrikeEvent>()
            .add_systems(
                Update,
                (systems::trigger_strikes, systems::age_bolts)
                    .chain()
                    .in_set(crate::SimulationSet::Lightning),
            );
    }
}
