use bevy::prelude::*;
use rand::Rng;

use super::pool::{
    RainPool, RainPools, SPAWN_ATTEMPTS_PER_INTENSITY, SPAWN_SUCCESS_PROBABILITY,
};
use crate::clouds::Cloud;
use crate::config::SimulationSettings;
use crate::sim_rng::SimRng;

/// Per-frame precipitation update.
///
/// Releases pools whose cloud stopped precipitating (or disappeared),
/// lazily creates pools for clouds that just started, then runs the
/// spawn / integrate / recycle passes for every live pool.
pub fn update_rain(
    time: Res<Time>,
    settings: Res<SimulationSettings>,
    mut pools: ResMut<RainPools>,
    mut rng: ResMut<SimRng>,
    clouds: Query<(Entity, &Cloud)>,
) {
    let dt = settings.scaled_dt(time.delta_secs());

    // Release pass: cessation of the precipitating flag is the trigger, so a
    // cloud that merely despawned mid-rain also drops out here.
    pools.pools.retain(|entity, _| {
        clouds
            .get(*entity)
            .map(|(_, c)| c.precipitating)
            .unwrap_or(false)
    });

    for (entity, cloud) in &clouds {
        if !cloud.precipitating {
            continue;
        }
        let pool = pools.pools.entry(entity).or_insert_with(|| {
            debug!("rain pool created for {} cloud", cloud.kind.name());
            RainPool::new()
        });

        let attempts =
            (cloud.precipitation_intensity * SPAWN_ATTEMPTS_PER_INTENSITY).floor() as usize;
        for _ in 0..attempts {
            if rng.0.gen::<f32>() < SPAWN_SUCCESS_PROBABILITY {
                pool.try_spawn(
                    cloud.position,
                    cloud.current_scale.x,
                    cloud.precipitation_intensity,
                    &mut rng.0,
                );
            }
        }

        pool.integrate(dt);
        pool.compact();
    }
}
