//! Stochastic cloud creation.
//!
//! Kind selection is a priority cascade over ambient humidity and a single
//! uniform roll; structural layout places puffs in concentric angular rings
//! at increasing heights, denser and taller for the more convective kinds.
//! Cumulonimbus additionally gets a flared anvil top and a noise-displaced
//! turbulent core.

use bevy::prelude::*;
use fastnoise_lite::{FastNoiseLite, NoiseType};
use rand::Rng;

use super::types::{Cloud, CloudKind, CloudPuff};
use crate::atmosphere::Atmosphere;
use crate::config::{MAX_CLOUDS, SPAWN_EXTENT};
use crate::sim_rng::SimRng;

/// Per-frame spawn probability divisor: chance = humidity / 5000.
/// Deliberately frame-rate dependent, matching the reference behaviour.
const SPAWN_PROBABILITY_DIVISOR: f32 = 5000.0;

/// Lifetime sample range in seconds.
const MIN_LIFETIME: f32 = 300.0;
const MAX_LIFETIME: f32 = 500.0;

/// Number of extra turbulent core puffs for cumulonimbus.
const TURBULENT_CORE_PUFFS: usize = 8;

/// Radius multiplier for the cumulonimbus anvil layer.
const ANVIL_FLARE: f32 = 1.6;

/// Ring arrangement constants for one cloud kind.
struct RingLayout {
    /// Number of stacked ring layers.
    layers: usize,
    /// Ring radius of the bottom layer, relative to the cloud scale.
    base_radius: f32,
    /// Fractional radius shrink per layer (rings taper upward).
    radius_shrink: f32,
    /// Puffs per ring on the bottom layer; upper layers lose one per step.
    puffs_per_ring: usize,
    /// Vertical spacing between layers.
    layer_height: f32,
    /// Puff radius sample range.
    puff_scale: (f32, f32),
}

fn layout(kind: CloudKind) -> RingLayout {
    match kind {
        CloudKind::CumulusHumilis => RingLayout {
            layers: 2,
            base_radius: 1.0,
            radius_shrink: 0.35,
            puffs_per_ring: 5,
            layer_height: 0.8,
            puff_scale: (0.5, 0.9),
        },
        CloudKind::CumulusMediocris => RingLayout {
            layers: 3,
            base_radius: 1.1,
            radius_shrink: 0.3,
            puffs_per_ring: 6,
            layer_height: 0.9,
            puff_scale: (0.6, 1.0),
        },
        CloudKind::CumulusCongestus => RingLayout {
            layers: 5,
            base_radius: 1.2,
            radius_shrink: 0.22,
            puffs_per_ring: 7,
            layer_height: 1.0,
            puff_scale: (0.7, 1.2),
        },
        CloudKind::Cumulonimbus => RingLayout {
            layers: 7,
            base_radius: 1.4,
            radius_shrink: 0.16,
            puffs_per_ring: 8,
            layer_height: 1.1,
            puff_scale: (0.8, 1.4),
        },
        CloudKind::Stratocumulus => RingLayout {
            layers: 2,
            base_radius: 1.8,
            radius_shrink: 0.1,
            puffs_per_ring: 9,
            layer_height: 0.5,
            puff_scale: (0.6, 1.0),
        },
    }
}

/// Weighted kind selection as an ordered threshold cascade.
///
/// The ordering is the contract: each rule is checked in priority order and
/// the first match wins, so high humidity plus a high roll always yields the
/// most convective kind even though later rules would also match.
pub fn select_kind(humidity: f32, roll: f32) -> CloudKind {
    if humidity > 75.0 && roll > 0.7 {
        CloudKind::Cumulonimbus
    } else if humidity > 70.0 && roll > 0.6 {
        CloudKind::CumulusCongestus
    } else if humidity > 60.0 && roll > 0.5 {
        CloudKind::CumulusMediocris
    } else if roll > 0.7 {
        CloudKind::Stratocumulus
    } else {
        CloudKind::CumulusHumilis
    }
}

/// Build the ordered puff arrangement for a cloud kind.
pub fn build_puffs(kind: CloudKind, seed: i32, rng: &mut impl Rng) -> Vec<CloudPuff> {
    let l = layout(kind);
    let mut puffs = Vec::new();

    for layer in 0..l.layers {
        let radius = l.base_radius * (1.0 - l.radius_shrink * layer as f32).max(0.15);
        let y = layer as f32 * l.layer_height;
        let count = l.puffs_per_ring.saturating_sub(layer / 2).max(3);
        push_ring(&mut puffs, radius, y, count, l.puff_scale, rng);
    }

    if kind == CloudKind::Cumulonimbus {
        // Flared anvil: one wide, flat ring above the top layer.
        let anvil_y = l.layers as f32 * l.layer_height;
        push_ring(
            &mut puffs,
            l.base_radius * ANVIL_FLARE,
            anvil_y,
            l.puffs_per_ring + 2,
            (0.9, 1.1),
            rng,
        );
        push_turbulent_core(&mut puffs, &l, seed, rng);
    }

    puffs
}

/// Append one angular ring of puffs at the given height.
fn push_ring(
    puffs: &mut Vec<CloudPuff>,
    radius: f32,
    y: f32,
    count: usize,
    scale_range: (f32, f32),
    rng: &mut impl Rng,
) {
    for i in 0..count {
        let angle = i as f32 / count as f32 * std::f32::consts::TAU
            + rng.gen_range(-0.2..0.2);
        let r = radius * rng.gen_range(0.85..1.1);
        let offset = Vec3::new(angle.cos() * r, y + rng.gen_range(-0.15..0.15), angle.sin() * r);
        puffs.push(new_puff(offset, rng.gen_range(scale_range.0..scale_range.1), rng));
    }
}

/// Unordered cluster of puffs displaced by smooth noise, filling the
/// cumulonimbus interior with churn instead of a clean ring silhouette.
fn push_turbulent_core(
    puffs: &mut Vec<CloudPuff>,
    l: &RingLayout,
    seed: i32,
    rng: &mut impl Rng,
) {
    let mut noise = FastNoiseLite::with_seed(seed);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));

    let core_height = l.layers as f32 * l.layer_height * 0.6;
    for i in 0..TURBULENT_CORE_PUFFS {
        let t = i as f32 / TURBULENT_CORE_PUFFS as f32;
        let y = t * core_height;
        let nx = noise.get_noise_3d(t * 40.0, y, 0.0);
        let nz = noise.get_noise_3d(0.0, y, t * 40.0);
        let offset = Vec3::new(nx * l.base_radius, y, nz * l.base_radius);
        puffs.push(new_puff(offset, rng.gen_range(0.7..1.3), rng));
    }
}

fn new_puff(offset: Vec3, scale: f32, rng: &mut impl Rng) -> CloudPuff {
    let base_opacity = rng.gen_range(0.75..0.95);
    CloudPuff {
        offset,
        rest_y: offset.y,
        scale,
        phase: rng.gen_range(0.0..std::f32::consts::TAU),
        base_opacity,
        opacity: base_opacity,
        tint: 0.0,
        stretch: 1.0,
    }
}

/// Assemble a complete cloud from the current ambient state.
pub fn build_cloud(atmosphere: &Atmosphere, rng: &mut impl Rng) -> Cloud {
    let kind = select_kind(atmosphere.humidity, rng.gen::<f32>());
    let can_precipitate = kind.roll_precipitation_capability(rng);
    let seed = rng.gen::<i32>();

    let position = Vec3::new(
        rng.gen_range(-SPAWN_EXTENT..SPAWN_EXTENT),
        kind.base_altitude() + rng.gen_range(-2.0..2.0),
        rng.gen_range(-SPAWN_EXTENT..SPAWN_EXTENT),
    );

    Cloud {
        kind,
        position,
        rotation_y: rng.gen_range(0.0..std::f32::consts::TAU),
        base_scale: kind.base_scale(),
        // Growth ramp starts from nothing.
        current_scale: Vec3::ZERO,
        age: 0.0,
        max_age: rng.gen_range(MIN_LIFETIME..MAX_LIFETIME),
        local_time: 0.0,
        moisture: (atmosphere.humidity / 100.0 * rng.gen_range(0.5..0.8)).clamp(0.0, 1.0),
        can_precipitate,
        precipitation_threshold: kind.precipitation_threshold(),
        precipitating: false,
        precipitation_intensity: 0.0,
        puffs: build_puffs(kind, seed, rng),
    }
}

/// Per-frame stochastic spawner: while below the population cap, a new cloud
/// forms with probability `humidity / 5000` each frame.
pub fn spawn_clouds(
    mut commands: Commands,
    atmosphere: Res<Atmosphere>,
    mut rng: ResMut<SimRng>,
    clouds: Query<(), With<Cloud>>,
) {
    if clouds.iter().count() >= MAX_CLOUDS {
        return;
    }
    if rng.0.gen::<f32>() >= atmosphere.humidity / SPAWN_PROBABILITY_DIVISOR {
        return;
    }

    let cloud = build_cloud(&atmosphere, &mut rng.0);
    debug!(
        "cloud formed: {} at ({:.0}, {:.0}), lifetime {:.0}s, {} puffs",
        cloud.kind.name(),
        cloud.position.x,
        cloud.position.z,
        cloud.max_age,
        cloud.puffs.len(),
    );
    commands.spawn(cloud);
}
