use bevy::prelude::*;
use rand::Rng;

use super::bolt::{generate_bolt, Bolt, Bolts, BOLT_LIFETIME};
use crate::clouds::{Cloud, CloudKind};
use crate::config::SimulationSettings;
use crate::sim_rng::SimRng;

/// Storm-potential gates and per-frame trigger probabilities by kind.
/// Per-frame probabilities are deliberately not dt-scaled, matching the
/// reference behaviour.
const CUMULONIMBUS_GATE: f32 = 0.7;
const CUMULONIMBUS_TRIGGER_P: f32 = 0.003;
const CONGESTUS_GATE: f32 = 0.8;
const CONGESTUS_TRIGGER_P: f32 = 0.001;

/// Fired once per strike; the rendering layer reacts with flash lights,
/// a background flash and camera shake.
#[derive(Event, Debug, Clone)]
pub struct LightningStrikeEvent {
    /// The cloud that discharged.
    pub cloud: Entity,
    /// World-space strike origin (the cloud center).
    pub position: Vec3,
}

/// Evaluate the Bernoulli trigger for every storm-capable cloud.
///
/// Each cloud rolls independently, so several bolts can fire in one frame.
pub fn trigger_strikes(
    mut bolts: ResMut<Bolts>,
    mut rng: ResMut<SimRng>,
    mut strikes: EventWriter<LightningStrikeEvent>,
    clouds: Query<(Entity, &Cloud)>,
) {
    for (entity, cloud) in &clouds {
        let (gate, probability) = match cloud.kind {
            CloudKind::Cumulonimbus => (CUMULONIMBUS_GATE, CUMULONIMBUS_TRIGGER_P),
            CloudKind::CumulusCongestus => (CONGESTUS_GATE, CONGESTUS_TRIGGER_P),
            _ => continue,
        };
        if cloud.storm_potential() <= gate {
            continue;
        }
        if rng.0.gen::<f32>() >= probability {
            continue;
        }

        let path = generate_bolt(cloud.position, &mut rng.0);
        debug!(
            "lightning strike from {} cloud, {} path points",
            cloud.kind.name(),
            path.len()
        );
        bolts.bolts.push(Bolt { path, age: 0.0 });
        strikes.send(LightningStrikeEvent {
            cloud: entity,
            position: cloud.position,
        });
    }
}

/// Age live bolts and drop the expired ones.
pub fn age_bolts(
    time: Res<Time>,
    settings: Res<SimulationSettings>,
    mut bolts: ResMut<Bolts>,
) {
    let dt = settings.scaled_dt(time.delta_secs());
    for bolt in &mut bolts.bolts {
        bolt.age += dt;
    }
    bolts.bolts.retain(|b| b.age <= BOLT_LIFETIME);
}
