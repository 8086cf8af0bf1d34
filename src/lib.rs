//! Lane Runner - A 3D lane-based endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player kinematics, obstacle field, collisions)
//! - `game`: Orchestrator driving update/render and notifying the host
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven game balance
//! - `assets`: Logical texture/mesh names shared by sim and renderer

pub mod assets;
pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use game::{Game, InputEvent};
pub use highscores::HighScores;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real frame delta accepted before clamping (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Distance between adjacent lane centres on the x axis
    pub const LANE_SPACING: f32 = 3.0;
    /// Height of the player's centre when resting on the track
    pub const GROUND_Y: f32 = 0.0;
    /// Top surface of the track slab
    pub const GROUND_SURFACE_Y: f32 = -1.0;

    /// Where consumed pickups are parked, far below the play field
    pub const CONSUMED_Y: f32 = -1000.0;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// World x of a lane centre, with lanes centred on x = 0
#[inline]
pub fn lane_to_x(lane: u32, lane_count: u32) -> f32 {
    let centre = (lane_count / 2) as i32;
    (lane as i32 - centre) as f32 * consts::LANE_SPACING
}
