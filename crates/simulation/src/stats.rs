//! Aggregate per-frame weather statistics for display.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::atmosphere::Atmosphere;
use crate::clouds::{Cloud, CloudKind, CLOUD_KIND_COUNT};
use crate::lightning::Bolts;
use crate::precipitation::RainPools;

/// Snapshot of the current sky, refreshed at the end of every frame.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherStats {
    /// Cloud counts indexed by [`CloudKind::index`].
    pub cloud_counts: [u32; CLOUD_KIND_COUNT],
    /// Number of clouds currently precipitating.
    pub precipitating: u32,
    /// Live raindrops across all pools.
    pub raindrops: u32,
    /// Live lightning bolts.
    pub bolts: u32,
    /// Ambient humidity percentage.
    pub humidity: f32,
    /// Ambient temperature in Celsius.
    pub temperature: f32,
}

impl WeatherStats {
    pub fn total_clouds(&self) -> u32 {
        self.cloud_counts.iter().sum()
    }

    pub fn count(&self, kind: CloudKind) -> u32 {
        self.cloud_counts[kind.index()]
    }
}

pub fn update_stats(
    atmosphere: Res<Atmosphere>,
    pools: Res<RainPools>,
    bolts: Res<Bolts>,
    clouds: Query<&Cloud>,
    mut stats: ResMut<WeatherStats>,
) {
    let mut counts = [0u32; CLOUD_KIND_COUNT];
    let mut precipitating = 0;
    for cloud in &clouds {
        counts[cloud.kind.index()] += 1;
        if cloud.precipitating {
            precipitating += 1;
        }
    }
    stats.cloud_counts = counts;
    stats.precipitating = precipitating;
    stats.raindrops = pools.total_active() as u32;
    stats.bolts = bolts.bolts.len() as u32;
    stats.humidity = atmosphere.humidity;
    stats.temperature = atmosphere.temperature;
}
