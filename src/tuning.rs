//! Data-driven game balance
//!
//! Every feel-affecting constant lives here so tests can run fast-forwarded,
//! deterministic simulations with their own numbers. Hosts may overlay a
//! partial JSON document over the defaults.

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::sim::obstacle::ObstacleTable;

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn from_hard(hard: bool) -> Self {
        if hard { Difficulty::Hard } else { Difficulty::Normal }
    }

    pub fn is_hard(&self) -> bool {
        *self == Difficulty::Hard
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Per-difficulty track layout and speed ramp
///
/// Overrides must give all three fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub lane_count: u32,
    /// Game speed at the start of a run
    pub base_speed: f32,
    /// Game speed gained per second of running
    pub speed_ramp: f32,
}

impl DifficultyProfile {
    pub const NORMAL: Self = Self {
        lane_count: 3,
        base_speed: 2.0,
        speed_ramp: 0.01,
    };

    pub const HARD: Self = Self {
        lane_count: 5,
        base_speed: 3.0,
        speed_ramp: 0.05,
    };
}

/// Player kinematics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Collision sphere radius (also the rendered sphere scale)
    pub radius: f32,
    /// Upward velocity applied by a jump
    pub jump_impulse: f32,
    pub gravity: f32,
    /// Seconds before another jump is accepted
    pub jump_cooldown: f32,
    /// Downward velocity snapped to when a jump is cancelled
    pub fast_fall_speed: f32,
    /// Exponential approach rate toward the lane centre (1/s)
    pub lane_smoothing: f32,
    /// Rolling rate per unit of game speed (rad/s)
    pub roll_rate: f32,
    /// Extra roll per unit of sideways travel
    pub lean_factor: f32,
    /// Gravity used by the scripted hole fall
    pub fall_gravity: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            radius: 1.0,
            jump_impulse: 15.0,
            gravity: 30.0,
            jump_cooldown: 0.1,
            fast_fall_speed: 30.0,
            lane_smoothing: 10.0,
            roll_rate: 3.0,
            lean_factor: 2.0,
            fall_gravity: 7.5,
        }
    }
}

/// Obstacle field movement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTuning {
    /// Travel speed of obstacles at game speed 1 (units/s)
    pub base_unit_speed: f32,
    /// How far ahead of the player obstacles appear
    pub spawn_distance: f32,
    /// Size, placement, retirement and collision radius per kind
    pub obstacles: ObstacleTable,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            base_unit_speed: 10.0,
            spawn_distance: 50.0,
            obstacles: ObstacleTable::default(),
        }
    }
}

/// Spawn timing and type mix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Countdown before the first spawn of a run
    pub initial_delay: f32,
    /// Countdown reset value at game speed 1
    pub base_interval: f32,
    /// Upper bound of the uniform jitter added to each reset
    pub jitter: f32,
    /// Share of barrier spawns (split evenly between the three barrier kinds)
    pub barrier_weight: f32,
    pub hole_weight: f32,
    pub pickup_weight: f32,
    /// Split of pickup spawns
    pub gold_coin_weight: f32,
    pub red_coin_weight: f32,
    pub life_weight: f32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            initial_delay: 0.5,
            base_interval: 1.5,
            jitter: 0.5,
            barrier_weight: 0.6,
            hole_weight: 0.3,
            pickup_weight: 0.1,
            gold_coin_weight: 0.5,
            red_coin_weight: 0.35,
            life_weight: 0.15,
        }
    }
}

/// Scoring, lives and the game-over sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionTuning {
    /// Score per second per unit of game speed
    pub score_rate: f32,
    pub starting_lives: u32,
    /// Optional ceiling on lives from pickups; unlimited when `None`
    pub max_lives: Option<u32>,
    pub gold_coin_bonus: f32,
    pub red_coin_penalty: f32,
    /// The hole fall ends once the player centre drops to this height
    pub fall_depth: f32,
    pub fall_step_dt: f32,
    pub max_fall_steps: u32,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            score_rate: 10.0,
            starting_lives: 1,
            max_lives: None,
            gold_coin_bonus: 100.0,
            red_coin_penalty: 100.0,
            fall_depth: -4.0,
            fall_step_dt: 1.0 / 60.0,
            max_fall_steps: 600,
        }
    }
}

/// Complete tuning set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub field: FieldTuning,
    pub spawn: SpawnTuning,
    pub session: SessionTuning,
    pub normal: DifficultyProfile,
    pub hard: DifficultyProfile,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            field: FieldTuning::default(),
            spawn: SpawnTuning::default(),
            session: SessionTuning::default(),
            normal: DifficultyProfile::NORMAL,
            hard: DifficultyProfile::HARD,
        }
    }
}

impl Tuning {
    /// Defaults with any fields present in `json` overridden
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn profile(&self, difficulty: Difficulty) -> &DifficultyProfile {
        match difficulty {
            Difficulty::Normal => &self.normal,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Tuning that never spawns anything (for scripted scenarios)
    pub fn without_spawns() -> Self {
        let mut tuning = Self::default();
        tuning.spawn.initial_delay = f32::INFINITY;
        tuning.spawn.base_interval = f32::INFINITY;
        tuning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profiles() {
        let tuning = Tuning::default();
        assert_eq!(tuning.profile(Difficulty::Normal).lane_count, 3);
        assert_eq!(tuning.profile(Difficulty::Hard).lane_count, 5);
        assert!(tuning.hard.speed_ramp > tuning.normal.speed_ramp);
    }

    #[test]
    fn test_spawn_weights_sum_to_one() {
        let s = SpawnTuning::default();
        assert!((s.barrier_weight + s.hole_weight + s.pickup_weight - 1.0).abs() < 1e-6);
        assert!((s.gold_coin_weight + s.red_coin_weight + s.life_weight - 1.0).abs() < 1e-6);
        assert!(s.life_weight < s.red_coin_weight && s.life_weight < s.gold_coin_weight);
    }

    #[test]
    fn test_partial_json_overrides() {
        let tuning = Tuning::from_json(r#"{
                "player": { "jump_impulse": 20.0 },
                "hard": { "lane_count": 7, "base_speed": 4.0, "speed_ramp": 0.1 }
            }"#)
            .unwrap();
        assert_eq!(tuning.player.jump_impulse, 20.0);
        assert_eq!(tuning.player.gravity, PlayerTuning::default().gravity);
        assert_eq!(tuning.hard.lane_count, 7);
        assert_eq!(tuning.normal, DifficultyProfile::NORMAL);
    }

    #[test]
    fn test_obstacle_entry_override() {
        let mut tuning = Tuning::default();
        tuning.field.obstacles.hole.retire_z = 1.5;
        let json = tuning.to_json();

        let back = Tuning::from_json(&json).unwrap();
        assert_eq!(back.field.obstacles.hole.retire_z, 1.5);
        assert_eq!(back.field.obstacles.life, Tuning::default().field.obstacles.life);
    }

    #[test]
    fn test_missing_hard_section_keeps_hard_defaults() {
        let tuning = Tuning::from_json("{}").unwrap();
        assert_eq!(tuning.hard, DifficultyProfile::HARD);
    }

    #[test]
    fn test_partial_profile_is_rejected() {
        assert!(Tuning::from_json(r#"{ "hard": { "lane_count": 7 } }"#).is_err());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, GameError::Tuning(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let back = Tuning::from_json(&tuning.to_json()).unwrap();
        assert_eq!(back, tuning);
    }
}
