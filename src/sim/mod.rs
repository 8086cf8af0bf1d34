//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-provided timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod field;
pub mod obstacle;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{closest_point_on_box, distance_sq_to_box, sphere_box_intersects};
pub use field::{CollisionReport, Hit, ObstacleField};
pub use obstacle::{KindInfo, Obstacle, ObstacleKind, Placement};
pub use player::Player;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickOutcome, apply_collision, tick};
