//! The player: a rolling sphere that glides between lanes and jumps

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::GROUND_Y;
use crate::tuning::PlayerTuning;
use crate::{lane_to_x, wrap_angle};

/// Kinematic player state
///
/// Difficulty (and so `lane_count`) is fixed at construction; a new run
/// builds a new player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec3,
    /// Only the vertical component is integrated
    pub velocity: Vec3,
    pub lane: u32,
    pub lane_count: u32,
    pub is_jumping: bool,
    /// Seconds until another jump is accepted
    pub jump_cooldown: f32,
    /// Rolling angle, always in [0, 2π)
    pub rotation: f32,
    /// Collision sphere radius
    pub size: f32,
    tuning: PlayerTuning,
}

impl Player {
    /// Create a player resting on the centre lane
    pub fn new(lane_count: u32, tuning: PlayerTuning) -> Self {
        let lane_count = lane_count.max(1);
        let lane = lane_count / 2;
        Self {
            position: Vec3::new(lane_to_x(lane, lane_count), GROUND_Y, 0.0),
            velocity: Vec3::ZERO,
            lane,
            lane_count,
            is_jumping: false,
            jump_cooldown: 0.0,
            rotation: 0.0,
            size: tuning.radius,
            tuning,
        }
    }

    /// Shift one lane left; returns false at the left edge
    pub fn move_left(&mut self) -> bool {
        if self.lane == 0 {
            return false;
        }
        self.lane -= 1;
        true
    }

    /// Shift one lane right; returns false at the right edge
    pub fn move_right(&mut self) -> bool {
        if self.lane + 1 >= self.lane_count {
            return false;
        }
        self.lane += 1;
        true
    }

    /// Start a jump if grounded and off cooldown; returns whether it fired
    pub fn jump(&mut self) -> bool {
        if self.is_jumping || self.jump_cooldown > 0.0 || self.position.y < GROUND_Y {
            return false;
        }
        self.velocity.y = self.tuning.jump_impulse;
        self.is_jumping = true;
        self.jump_cooldown = self.tuning.jump_cooldown;
        true
    }

    /// Fast-fall out of a jump
    pub fn cancel_jump(&mut self) -> bool {
        if !self.is_jumping || self.position.y <= GROUND_Y {
            return false;
        }
        self.velocity.y = -self.tuning.fast_fall_speed;
        true
    }

    /// World x the player is gliding toward
    pub fn target_x(&self) -> f32 {
        lane_to_x(self.lane, self.lane_count)
    }

    pub fn is_airborne(&self) -> bool {
        self.is_jumping || self.position.y > GROUND_Y
    }

    pub fn update(&mut self, dt: f32, game_speed: f32) {
        if self.jump_cooldown > 0.0 {
            self.jump_cooldown = (self.jump_cooldown - dt).max(0.0);
        }

        if self.is_airborne() {
            self.velocity.y -= self.tuning.gravity * dt;
            self.position.y += self.velocity.y * dt;

            if self.position.y <= GROUND_Y {
                self.position.y = GROUND_Y;
                self.velocity.y = 0.0;
                self.is_jumping = false;
            }
        }

        // Exponential glide; clamp the blend so huge steps cannot overshoot
        let previous_x = self.position.x;
        let blend = (self.tuning.lane_smoothing * dt).min(1.0);
        self.position.x += (self.target_x() - self.position.x) * blend;

        let lateral = self.position.x - previous_x;
        self.rotation = wrap_angle(
            self.rotation
                - self.tuning.roll_rate * game_speed * dt
                - lateral * self.tuning.lean_factor,
        );
    }

    /// One step of the scripted fall into a hole
    pub fn fall(&mut self, dt: f32) {
        self.velocity.y -= self.tuning.fall_gravity * dt;
        self.position.y += self.velocity.y * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::TAU;

    fn player(lanes: u32) -> Player {
        Player::new(lanes, PlayerTuning::default())
    }

    #[test]
    fn test_starts_centred() {
        let p = player(3);
        assert_eq!(p.lane, 1);
        assert_eq!(p.position, Vec3::ZERO);

        let p = player(5);
        assert_eq!(p.lane, 2);
        assert_eq!(p.position.x, 0.0);
    }

    #[test]
    fn test_lane_moves_clamp_at_edges() {
        let mut p = player(3);
        assert!(p.move_left());
        assert!(!p.move_left());
        assert_eq!(p.lane, 0);
        assert!(p.move_right());
        assert!(p.move_right());
        assert!(!p.move_right());
        assert_eq!(p.lane, 2);
    }

    #[test]
    fn test_jump_twice_within_cooldown_is_one_impulse() {
        let mut p = player(3);
        assert!(p.jump());
        let v = p.velocity.y;
        assert!(!p.jump());
        assert_eq!(p.velocity.y, v);

        // Still airborne after the cooldown expires, so no double jump either
        p.update(0.05, 1.0);
        p.update(0.06, 1.0);
        assert_eq!(p.jump_cooldown, 0.0);
        assert!(!p.jump());
    }

    #[test]
    fn test_cooldown_is_time_based() {
        let mut p = player(3);
        p.jump_cooldown = 0.1;
        for _ in 0..9 {
            p.update(0.01, 1.0);
        }
        assert!(p.jump_cooldown > 0.0);
        p.update(0.02, 1.0);
        assert_eq!(p.jump_cooldown, 0.0);
    }

    #[test]
    fn test_lands_exactly_on_ground() {
        let mut p = player(3);
        p.jump();
        let mut peak = 0.0_f32;
        for _ in 0..200 {
            p.update(1.0 / 60.0, 1.0);
            peak = peak.max(p.position.y);
        }
        assert!(peak > 3.0);
        assert_eq!(p.position.y, GROUND_Y);
        assert_eq!(p.velocity.y, 0.0);
        assert!(!p.is_jumping);
    }

    #[test]
    fn test_cancel_jump_fast_falls() {
        let mut p = player(3);
        assert!(!p.cancel_jump(), "nothing to cancel on the ground");

        p.jump();
        p.update(0.1, 1.0);
        assert!(p.position.y > 0.0);
        assert!(p.cancel_jump());
        assert_eq!(p.velocity.y, -PlayerTuning::default().fast_fall_speed);

        for _ in 0..10 {
            p.update(1.0 / 60.0, 1.0);
        }
        assert_eq!(p.position.y, GROUND_Y);
    }

    #[test]
    fn test_no_jump_while_below_ground() {
        let mut p = player(3);
        p.fall(0.5);
        assert!(p.position.y < GROUND_Y);
        assert!(!p.jump());
    }

    #[test]
    fn test_lane_glide_is_smooth() {
        let mut p = player(3);
        p.move_right();
        p.update(1.0 / 60.0, 1.0);
        assert!(p.position.x > 0.0 && p.position.x < 3.0, "x = {}", p.position.x);
        for _ in 0..240 {
            p.update(1.0 / 60.0, 1.0);
        }
        assert!((p.position.x - 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_rotation_rolls_and_wraps() {
        let mut p = player(3);
        p.update(0.1, 2.0);
        assert!((p.rotation - (TAU - 0.6)).abs() < 1e-4);
        for _ in 0..1000 {
            p.update(0.1, 2.0);
            assert!((0.0..TAU).contains(&p.rotation));
        }
    }

    #[test]
    fn test_fall_descends_monotonically() {
        let mut p = player(3);
        let mut last = p.position.y;
        for _ in 0..60 {
            p.fall(1.0 / 60.0);
            assert!(p.position.y < last);
            last = p.position.y;
        }
    }

    proptest! {
        #[test]
        fn prop_lane_stays_in_bounds(
            hard in any::<bool>(),
            moves in prop::collection::vec(any::<bool>(), 0..64),
        ) {
            let lanes = if hard { 5 } else { 3 };
            let mut p = player(lanes);
            for right in moves {
                if right {
                    p.move_right();
                } else {
                    p.move_left();
                }
                prop_assert!(p.lane < lanes);
            }
        }
    }
}
