use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Life ratio below which a cloud is still growing.
pub const GROWTH_END: f32 = 0.2;
/// Life ratio at which a cloud begins dissipating.
pub const DISSIPATION_START: f32 = 0.7;

/// Fraction of Cumulus Mediocris instances that are precipitation-capable.
pub const MEDIOCRIS_PRECIPITATION_CHANCE: f32 = 0.3;

/// Cloud classification, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CloudKind {
    CumulusHumilis,
    CumulusMediocris,
    CumulusCongestus,
    Cumulonimbus,
    Stratocumulus,
}

/// Number of cloud kinds, for per-kind stat arrays.
pub const CLOUD_KIND_COUNT: usize = 5;

impl CloudKind {
    pub fn name(self) -> &'static str {
        match self {
            CloudKind::CumulusHumilis => "Cumulus humilis",
            CloudKind::CumulusMediocris => "Cumulus mediocris",
            CloudKind::CumulusCongestus => "Cumulus congestus",
            CloudKind::Cumulonimbus => "Cumulonimbus",
            CloudKind::Stratocumulus => "Stratocumulus",
        }
    }

    /// Dense index for per-kind stat arrays.
    pub fn index(self) -> usize {
        match self {
            CloudKind::CumulusHumilis => 0,
            CloudKind::CumulusMediocris => 1,
            CloudKind::CumulusCongestus => 2,
            CloudKind::Cumulonimbus => 3,
            CloudKind::Stratocumulus => 4,
        }
    }

    /// Convective kinds develop vertical towers in the mature stage and are
    /// the only lightning candidates.
    pub fn is_convective(self) -> bool {
        matches!(self, CloudKind::CumulusCongestus | CloudKind::Cumulonimbus)
    }

    /// Moisture level above which this kind starts precipitating (when it is
    /// capable at all).
    pub fn precipitation_threshold(self) -> f32 {
        match self {
            CloudKind::Cumulonimbus => 0.6,
            CloudKind::CumulusCongestus => 0.7,
            // Mediocris can rain but needs to be nearly saturated; the rest
            // carry the same threshold but are never capable, so it is
            // effectively unreachable.
            _ => 0.8,
        }
    }

    /// Roll precipitation capability for a fresh instance of this kind.
    ///
    /// Congestus and cumulonimbus always rain when saturated; mediocris only
    /// in a minority of instances; flat and small kinds never do.
    pub fn roll_precipitation_capability(self, rng: &mut impl Rng) -> bool {
        match self {
            CloudKind::Cumulonimbus | CloudKind::CumulusCongestus => true,
            CloudKind::CumulusMediocris => rng.gen::<f32>() < MEDIOCRIS_PRECIPITATION_CHANCE,
            _ => false,
        }
    }

    /// Horizontal base scale in world units.
    pub fn base_scale(self) -> f32 {
        match self {
            CloudKind::CumulusHumilis => 5.0,
            CloudKind::CumulusMediocris => 7.0,
            CloudKind::CumulusCongestus => 9.0,
            CloudKind::Cumulonimbus => 12.0,
            CloudKind::Stratocumulus => 8.0,
        }
    }

    /// Cloud-base altitude in world units.
    pub fn base_altitude(self) -> f32 {
        match self {
            CloudKind::CumulusHumilis => 20.0,
            CloudKind::CumulusMediocris => 24.0,
            CloudKind::CumulusCongestus => 28.0,
            CloudKind::Cumulonimbus => 32.0,
            CloudKind::Stratocumulus => 18.0,
        }
    }
}

/// Lifecycle stage, derived purely from `age / max_age`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudStage {
    Growing,
    Mature,
    Dissipating,
}

impl CloudStage {
    /// Classify a life ratio into a stage. Monotonic in its argument, so a
    /// cloud whose age only increases can never move backward.
    pub fn from_life_ratio(life_ratio: f32) -> Self {
        if life_ratio < GROWTH_END {
            CloudStage::Growing
        } else if life_ratio < DISSIPATION_START {
            CloudStage::Mature
        } else {
            CloudStage::Dissipating
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CloudStage::Growing => "Growing",
            CloudStage::Mature => "Mature",
            CloudStage::Dissipating => "Dissipating",
        }
    }
}

/// One sphere-like puff composing a cloud's visual shape.
///
/// Created once by the factory, mutated in place by the lifecycle engine,
/// and destroyed with the owning cloud entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudPuff {
    /// Current local offset from the cloud center (jitter applied).
    pub offset: Vec3,
    /// Rest-pose vertical offset the jitter oscillates around.
    pub rest_y: f32,
    /// Uniform puff radius relative to the cloud.
    pub scale: f32,
    /// Phase shift for the per-puff vertical sine jitter.
    pub phase: f32,
    /// Opacity the puff was built with; dissipation fades from this.
    pub base_opacity: f32,
    /// Current opacity in [0, 1].
    pub opacity: f32,
    /// Moisture darkening in [0, 1]; 0 = white, 1 = storm grey.
    pub tint: f32,
    /// Accumulated vertical stretch for convective towers, capped by the
    /// lifecycle engine.
    pub stretch: f32,
}

/// One simulated cloud instance.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub kind: CloudKind,
    /// World-space cloud center.
    pub position: Vec3,
    /// Yaw applied to the whole puff arrangement.
    pub rotation_y: f32,
    /// Full-grown horizontal scale.
    pub base_scale: f32,
    /// Current non-uniform scale, driven by the growth ramp.
    pub current_scale: Vec3,
    /// Seconds since creation (scaled time).
    pub age: f32,
    /// Lifetime in seconds, sampled in [300, 500) at creation.
    pub max_age: f32,
    /// Accumulated scaled time driving puff jitter. Kept separate from `age`
    /// so a zero-dt frame moves nothing.
    pub local_time: f32,
    /// Moisture budget in [0, 1].
    pub moisture: f32,
    /// Whether this instance can ever precipitate (fixed at creation).
    pub can_precipitate: bool,
    /// Moisture gate for precipitation (fixed at creation).
    pub precipitation_threshold: f32,
    /// Derived each frame by the lifecycle engine.
    pub precipitating: bool,
    /// Derived each frame; in [0, 1].
    pub precipitation_intensity: f32,
    /// Ordered puff arrangement, owned exclusively by this cloud.
    pub puffs: Vec<CloudPuff>,
}

impl Cloud {
    /// Fraction of this cloud's lifetime that has elapsed.
    pub fn life_ratio(&self) -> f32 {
        self.age / self.max_age
    }

    /// Current lifecycle stage, derived from the life ratio.
    pub fn stage(&self) -> CloudStage {
        CloudStage::from_life_ratio(self.life_ratio())
    }

    /// Lightning trigger signal: moisture weighted by precipitation strength.
    pub fn storm_potential(&self) -> f32 {
        self.moisture * self.precipitation_intensity
    }
}
