use bevy::prelude::*;
use rand::Rng;
use std::collections::HashMap;

use crate::config::GROUND_LEVEL_Y;

/// Fixed particle capacity per pool.
pub const RAIN_POOL_CAPACITY: usize = 500;

/// Spawn attempts per frame per unit of precipitation intensity.
pub const SPAWN_ATTEMPTS_PER_INTENSITY: f32 = 8.0;

/// Probability that a single spawn attempt succeeds.
pub const SPAWN_SUCCESS_PROBABILITY: f32 = 0.4;

/// Horizontal spawn jitter per unit of cloud scale.
const HORIZONTAL_JITTER: f32 = 12.0;

/// How far below the cloud center drops appear.
const SPAWN_DROP_BELOW: f32 = 2.0;

/// Fall speed components, in world units per reference frame (60 Hz).
/// Integration multiplies by `dt * 60` so the visual speed matches the
/// reference regardless of the actual frame rate.
const FALL_SPEED_BASE: f32 = 0.5;
const FALL_SPEED_JITTER: f32 = 0.4;
const FALL_SPEED_INTENSITY: f32 = 0.3;

/// Reference frame rate the per-frame fall speeds were tuned against.
const REFERENCE_FRAME_RATE: f32 = 60.0;

/// Dense raindrop pool for one precipitating cloud.
///
/// `positions` and `fall_speeds` are parallel arrays; only indices in
/// `[0, active)` are live. Slots beyond `active` are stale garbage and must
/// never be drawn.
#[derive(Debug)]
pub struct RainPool {
    pub positions: Vec<Vec3>,
    pub fall_speeds: Vec<f32>,
    pub active: usize,
}

impl RainPool {
    pub fn new() -> Self {
        Self {
            positions: Vec::with_capacity(RAIN_POOL_CAPACITY),
            fall_speeds: Vec::with_capacity(RAIN_POOL_CAPACITY),
            active: 0,
        }
    }

    /// Attempt to spawn one drop under a cloud. Returns `false` without side
    /// effects when the pool is saturated; a full pool is expected
    /// steady-state behaviour, not an error.
    pub fn try_spawn(
        &mut self,
        cloud_pos: Vec3,
        cloud_scale: f32,
        intensity: f32,
        rng: &mut impl Rng,
    ) -> bool {
        if self.active >= RAIN_POOL_CAPACITY {
            return false;
        }

        let jitter = HORIZONTAL_JITTER * cloud_scale;
        let pos = Vec3::new(
            cloud_pos.x + (rng.gen::<f32>() - 0.5) * jitter,
            cloud_pos.y - SPAWN_DROP_BELOW - rng.gen::<f32>(),
            cloud_pos.z + (rng.gen::<f32>() - 0.5) * jitter,
        );
        let speed = FALL_SPEED_BASE
            + rng.gen::<f32>() * FALL_SPEED_JITTER
            + intensity * FALL_SPEED_INTENSITY;

        if self.active < self.positions.len() {
            // Reuse a stale slot left behind by compaction.
            self.positions[self.active] = pos;
            self.fall_speeds[self.active] = speed;
        } else {
            self.positions.push(pos);
            self.fall_speeds.push(speed);
        }
        self.active += 1;
        true
    }

    /// Advance every live drop downward by its fall speed.
    pub fn integrate(&mut self, dt: f32) {
        let step = dt * REFERENCE_FRAME_RATE;
        for i in 0..self.active {
            self.positions[i].y -= self.fall_speeds[i] * step;
        }
    }

    /// Remove drops that reached the ground with a stable in-place
    /// compaction: surviving drops keep their relative order and `active`
    /// shrinks to the survivor count.
    pub fn compact(&mut self) {
        let mut write = 0;
        for read in 0..self.active {
            if self.positions[read].y > GROUND_LEVEL_Y {
                if write != read {
                    self.positions[write] = self.positions[read];
                    self.fall_speeds[write] = self.fall_speeds[read];
                }
                write += 1;
            }
        }
        self.active = write;
    }
}

impl Default for RainPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Owned-resource table mapping each precipitating cloud entity to its pool.
///
/// Keeping the association explicit (instead of hanging pools off the cloud)
/// means a cloud despawned mid-rain cannot leave a dangling pool: the update
/// system releases any entry whose key is no longer precipitating.
#[derive(Resource, Default)]
pub struct RainPools {
    pub pools: HashMap<Entity, RainPool>,
}

impl RainPools {
    /// Total live drops across all pools.
    pub fn total_active(&self) -> usize {
        self.pools.values().map(|p| p.active).sum()
    }
}
