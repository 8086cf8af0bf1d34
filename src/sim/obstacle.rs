//! Obstacle kinds and their lookup table
//!
//! Size, placement, retirement, collision radius and look are all read from
//! one `KindInfo` per kind. `ObstacleKind::info()` holds the shipped values;
//! the field reads an `ObstacleTable` so tuning can override them.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::assets::{MeshKind, TextureKey};
use crate::consts::GROUND_SURFACE_Y;

/// Closed set of things the generator can spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    SmallBarrier,
    LargeBarrier,
    FloatingBarrier,
    Hole,
    GoldCoin,
    RedCoin,
    Life,
}

/// How an obstacle's centre height is chosen at spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Placement {
    /// Resting on the track: surface + half-height
    OnGround,
    /// Fixed centre height, clear of a grounded player
    Elevated(f32),
    /// Sunk into the track, poking `lift` above the surface so it can be hit
    Sunken { lift: f32 },
    /// Uniformly random centre height in [min, max)
    Floating { min: f32, max: f32 },
}

/// Everything that differs between obstacle kinds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KindInfo {
    /// Box half-extents
    pub size: Vec3,
    pub placement: Placement,
    /// Retired once the travel-axis coordinate passes this (player sits at 0)
    pub retire_z: f32,
    /// Multiplier on the player radius when testing this kind
    pub collision_radius_factor: f32,
    pub texture: Option<TextureKey>,
    pub mesh: MeshKind,
    pub color: [f32; 3],
}

pub const BARRIER_COLOR: [f32; 3] = [0.7, 0.7, 0.7];
pub const HOLE_COLOR: [f32; 3] = [0.4, 0.4, 0.4];
pub const GOLD_COIN_COLOR: [f32; 3] = [0.967, 0.702, 0.019];
pub const RED_COIN_COLOR: [f32; 3] = [0.878, 0.282, 0.275];
pub const LIFE_COLOR: [f32; 3] = [0.0, 1.0, 0.0];

/// Holes need the player centred over them before they swallow it
pub const HOLE_RADIUS_FACTOR: f32 = 0.95;
pub const PICKUP_FLOAT_MIN: f32 = 0.0;
pub const PICKUP_FLOAT_MAX: f32 = 2.0;

pub const SMALL_BARRIER: KindInfo = KindInfo {
    size: Vec3::new(1.2, 0.6, 0.5),
    placement: Placement::OnGround,
    retire_z: 5.0,
    collision_radius_factor: 1.0,
    texture: Some(TextureKey::SmallBarrier),
    mesh: MeshKind::Cube,
    color: BARRIER_COLOR,
};

pub const LARGE_BARRIER: KindInfo = KindInfo {
    size: Vec3::new(1.2, 2.5, 0.5),
    placement: Placement::OnGround,
    retire_z: 8.0,
    collision_radius_factor: 1.0,
    texture: Some(TextureKey::LargeBarrier),
    mesh: MeshKind::Cube,
    color: BARRIER_COLOR,
};

pub const FLOATING_BARRIER: KindInfo = KindInfo {
    size: Vec3::new(1.2, 0.5, 0.5),
    placement: Placement::Elevated(2.2),
    retire_z: 6.0,
    collision_radius_factor: 1.0,
    texture: Some(TextureKey::FloatingBarrier),
    mesh: MeshKind::Cube,
    color: BARRIER_COLOR,
};

pub const HOLE: KindInfo = KindInfo {
    size: Vec3::new(1.3, 0.05, 1.5),
    placement: Placement::Sunken { lift: 0.05 },
    retire_z: 3.0,
    collision_radius_factor: HOLE_RADIUS_FACTOR,
    texture: Some(TextureKey::Hole),
    mesh: MeshKind::Cube,
    color: HOLE_COLOR,
};

pub const GOLD_COIN: KindInfo = KindInfo {
    size: Vec3::splat(0.4),
    placement: Placement::Floating {
        min: PICKUP_FLOAT_MIN,
        max: PICKUP_FLOAT_MAX,
    },
    retire_z: 3.0,
    collision_radius_factor: 1.0,
    texture: None,
    mesh: MeshKind::Sphere,
    color: GOLD_COIN_COLOR,
};

pub const RED_COIN: KindInfo = KindInfo {
    color: RED_COIN_COLOR,
    ..GOLD_COIN
};

pub const LIFE: KindInfo = KindInfo {
    size: Vec3::splat(0.45),
    color: LIFE_COLOR,
    ..GOLD_COIN
};

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 7] = [
        ObstacleKind::SmallBarrier,
        ObstacleKind::LargeBarrier,
        ObstacleKind::FloatingBarrier,
        ObstacleKind::Hole,
        ObstacleKind::GoldCoin,
        ObstacleKind::RedCoin,
        ObstacleKind::Life,
    ];

    pub const BARRIERS: [ObstacleKind; 3] = [
        ObstacleKind::SmallBarrier,
        ObstacleKind::LargeBarrier,
        ObstacleKind::FloatingBarrier,
    ];

    pub fn info(&self) -> &'static KindInfo {
        match self {
            ObstacleKind::SmallBarrier => &SMALL_BARRIER,
            ObstacleKind::LargeBarrier => &LARGE_BARRIER,
            ObstacleKind::FloatingBarrier => &FLOATING_BARRIER,
            ObstacleKind::Hole => &HOLE,
            ObstacleKind::GoldCoin => &GOLD_COIN,
            ObstacleKind::RedCoin => &RED_COIN,
            ObstacleKind::Life => &LIFE,
        }
    }

    /// Pickups are consumed on contact instead of ending the run
    pub fn is_pickup(&self) -> bool {
        matches!(
            self,
            ObstacleKind::GoldCoin | ObstacleKind::RedCoin | ObstacleKind::Life
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            ObstacleKind::SmallBarrier => "small-barrier",
            ObstacleKind::LargeBarrier => "large-barrier",
            ObstacleKind::FloatingBarrier => "floating-barrier",
            ObstacleKind::Hole => "hole",
            ObstacleKind::GoldCoin => "gold-coin",
            ObstacleKind::RedCoin => "red-coin",
            ObstacleKind::Life => "life",
        }
    }

    /// Centre height for a freshly spawned obstacle of this kind
    pub fn spawn_height<R: Rng>(&self, rng: &mut R) -> f32 {
        self.info().spawn_height(rng)
    }
}

impl KindInfo {
    /// Centre height at spawn under this entry's placement rule
    pub fn spawn_height<R: Rng>(&self, rng: &mut R) -> f32 {
        match self.placement {
            Placement::OnGround => GROUND_SURFACE_Y + self.size.y,
            Placement::Elevated(y) => y,
            Placement::Sunken { lift } => GROUND_SURFACE_Y + lift,
            Placement::Floating { min, max } => {
                if max > min {
                    rng.random_range(min..max)
                } else {
                    min
                }
            }
        }
    }
}

/// Per-kind entries the field plays by; defaults to the shipped table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleTable {
    pub small_barrier: KindInfo,
    pub large_barrier: KindInfo,
    pub floating_barrier: KindInfo,
    pub hole: KindInfo,
    pub gold_coin: KindInfo,
    pub red_coin: KindInfo,
    pub life: KindInfo,
}

impl Default for ObstacleTable {
    fn default() -> Self {
        Self {
            small_barrier: SMALL_BARRIER,
            large_barrier: LARGE_BARRIER,
            floating_barrier: FLOATING_BARRIER,
            hole: HOLE,
            gold_coin: GOLD_COIN,
            red_coin: RED_COIN,
            life: LIFE,
        }
    }
}

impl ObstacleTable {
    pub fn get(&self, kind: ObstacleKind) -> &KindInfo {
        match kind {
            ObstacleKind::SmallBarrier => &self.small_barrier,
            ObstacleKind::LargeBarrier => &self.large_barrier,
            ObstacleKind::FloatingBarrier => &self.floating_barrier,
            ObstacleKind::Hole => &self.hole,
            ObstacleKind::GoldCoin => &self.gold_coin,
            ObstacleKind::RedCoin => &self.red_coin,
            ObstacleKind::Life => &self.life,
        }
    }

    pub fn get_mut(&mut self, kind: ObstacleKind) -> &mut KindInfo {
        match kind {
            ObstacleKind::SmallBarrier => &mut self.small_barrier,
            ObstacleKind::LargeBarrier => &mut self.large_barrier,
            ObstacleKind::FloatingBarrier => &mut self.floating_barrier,
            ObstacleKind::Hole => &mut self.hole,
            ObstacleKind::GoldCoin => &mut self.gold_coin,
            ObstacleKind::RedCoin => &mut self.red_coin,
            ObstacleKind::Life => &mut self.life,
        }
    }
}

impl std::fmt::Display for ObstacleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A live obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Box centre; z grows as the obstacle approaches and passes the player
    pub position: Vec3,
    /// Box half-extents
    pub size: Vec3,
    /// Lane it spawned in (collision uses `position`)
    pub lane: u32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    /// Obstacle sized from the shipped table
    pub fn new(kind: ObstacleKind, position: Vec3, lane: u32) -> Self {
        Self::with_info(kind, kind.info(), position, lane)
    }

    pub fn with_info(kind: ObstacleKind, info: &KindInfo, position: Vec3, lane: u32) -> Self {
        Self {
            position,
            size: info.size,
            lane,
            kind,
        }
    }

    /// Past its retirement line under `table`
    pub fn is_retired(&self, table: &ObstacleTable) -> bool {
        self.position.z > table.get(self.kind).retire_z
    }
}
