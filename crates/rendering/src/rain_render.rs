//! Rain streak overlay.
//!
//! Raindrops are short vertical gizmo lines, redrawn every frame straight
//! from the pool buffers. Only slots below each pool's active watermark are
//! drawn; recycled slots past it hold stale positions.

use bevy::prelude::*;

use simulation::precipitation::RainPools;

/// Vertical length of one rain streak in world units.
const STREAK_LENGTH: f32 = 0.6;

const STREAK_COLOR: Color = Color::srgba(0.55, 0.65, 0.9, 0.5);

pub fn draw_rain(pools: Res<RainPools>, mut gizmos: Gizmos) {
    for pool in pools.pools.values() {
        for position in &pool.positions[..pool.active] {
            gizmos.line(*position, *position + Vec3::Y * STREAK_LENGTH, STREAK_COLOR);
        }
    }
}
