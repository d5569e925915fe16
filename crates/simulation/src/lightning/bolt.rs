use bevy::prelude::*;
use rand::Rng;

use crate::config::GROUND_LEVEL_Y;

/// Maximum recursion depth for sub-branches; enforced strictly.
pub const MAX_BRANCH_DEPTH: u32 = 3;

/// Seconds a bolt stays visible before removal.
pub const BOLT_LIFETIME: f32 = 0.2;

/// Horizontal jitter applied per interpolation step at depth 0; deeper
/// branches jitter proportionally less.
const STEP_JITTER: f32 = 2.5;

/// Horizontal wander of the main strike's ground target.
const GROUND_DRIFT: f32 = 8.0;

/// Horizontal reach of a spawned sub-branch.
const SUB_BRANCH_REACH: f32 = 6.0;

/// One discrete strike: a flattened fork path and its display age.
#[derive(Debug, Clone)]
pub struct Bolt {
    /// Ordered point sequence from cloud to ground, with sub-branch points
    /// spliced inline after their parent point.
    pub path: Vec<Vec3>,
    /// Seconds since the strike; the bolt fades out and is removed at
    /// [`BOLT_LIFETIME`].
    pub age: f32,
}

impl Bolt {
    /// Remaining opacity in [0, 1], fading linearly over the lifetime.
    pub fn opacity(&self) -> f32 {
        (1.0 - self.age / BOLT_LIFETIME).clamp(0.0, 1.0)
    }
}

/// All live bolts, owned by the lightning generator alone.
#[derive(Resource, Default)]
pub struct Bolts {
    pub bolts: Vec<Bolt>,
}

/// Generate a full forked strike path from a cloud position down to the
/// ground. Pure over the injected RNG: a fixed seed yields a fixed path.
pub fn generate_bolt(start: Vec3, rng: &mut impl Rng) -> Vec<Vec3> {
    let end = Vec3::new(
        start.x + rng.gen_range(-GROUND_DRIFT..GROUND_DRIFT),
        GROUND_LEVEL_Y,
        start.z + rng.gen_range(-GROUND_DRIFT..GROUND_DRIFT),
    );
    let mut path = Vec::new();
    create_branch(start, end, 0, &mut path, rng);
    path
}

/// Subdivide one branch segment and recursively splice sub-branches.
///
/// Step count shrinks with depth (`8 - depth * 2`), as does the horizontal
/// jitter. At each interior point a sub-branch spawns with probability
/// `0.3 - depth * 0.1`, but only while below [`MAX_BRANCH_DEPTH`]; its
/// points are appended inline right after the parent point, producing one
/// flattened sequence for the whole fork.
fn create_branch(start: Vec3, end: Vec3, depth: u32, out: &mut Vec<Vec3>, rng: &mut impl Rng) {
    let steps = 8 - depth * 2;
    let jitter = STEP_JITTER / (depth + 1) as f32;

    out.push(start);
    for i in 1..=steps {
        let t = i as f32 / steps as f32;
        let mut point = start.lerp(end, t);
        if i < steps {
            point.x += (rng.gen::<f32>() - 0.5) * 2.0 * jitter;
            point.z += (rng.gen::<f32>() - 0.5) * 2.0 * jitter;
        }
        out.push(point);

        let branch_chance = 0.3 - depth as f32 * 0.1;
        if i < steps && depth < MAX_BRANCH_DEPTH && rng.gen::<f32>() < branch_chance {
            let sub_end = Vec3::new(
                point.x + rng.gen_range(-SUB_BRANCH_REACH..SUB_BRANCH_REACH),
                (point.y * rng.gen_range(0.2..0.6)).max(GROUND_LEVEL_Y),
                point.z + rng.gen_range(-SUB_BRANCH_REACH..SUB_BRANCH_REACH),
            );
            create_branch(point, sub_end, depth + 1, out, rng);
        }
    }
}
