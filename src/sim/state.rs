//! Session state and core simulation types
//!
//! Everything a run needs to advance lives in `GameState`. Rendering state
//! (ground scroll, matrices) belongs to the renderer.

use serde::{Deserialize, Serialize};

use super::field::ObstacleField;
use super::obstacle::ObstacleKind;
use super::player::Player;
use crate::tuning::{Difficulty, Tuning};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Constructed, waiting for the first `start()`
    Idle,
    /// Simulation advancing
    Running,
    /// Frozen until toggled back
    Paused,
    /// Run ended; only `start()` leaves this phase
    GameOver,
}

/// Things that happened during a tick, for sound and UI hooks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    LaneChanged,
    PickedUp(ObstacleKind),
    /// Non-pickup hit; `lives_left` is the count after the loss
    Crashed { kind: ObstacleKind, lives_left: u32 },
    /// Last life lost to a hole; the fall sequence follows
    FellIntoHole,
    GameOver { score: u32 },
}

/// Complete run state (deterministic given the seed and inputs)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    /// Fixed for the duration of a run
    pub difficulty: Difficulty,
    /// Never negative
    pub score: f32,
    pub lives: u32,
    pub game_speed: f32,
    /// Simulated seconds since `start()`
    pub elapsed: f32,
    pub player: Player,
    pub field: ObstacleField,
    /// Pending events, drained by the orchestrator
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Idle session with fresh entities for `difficulty`
    pub fn new(difficulty: Difficulty, tuning: &Tuning) -> Self {
        let profile = tuning.profile(difficulty);
        Self {
            phase: GamePhase::Idle,
            difficulty,
            score: 0.0,
            lives: tuning.session.starting_lives,
            game_speed: profile.base_speed,
            elapsed: 0.0,
            player: Player::new(profile.lane_count, tuning.player),
            field: ObstacleField::new(
                profile.lane_count,
                difficulty.is_hard(),
                tuning.field,
                tuning.spawn,
            ),
            events: Vec::new(),
        }
    }

    /// Fresh run: new player and field bound to `difficulty`, phase Running
    pub fn restart(&mut self, difficulty: Difficulty, tuning: &Tuning) {
        *self = Self::new(difficulty, tuning);
        self.phase = GamePhase::Running;
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Score as reported to the host
    pub fn floored_score(&self) -> u32 {
        self.score.max(0.0).floor() as u32
    }

    pub fn lane_count(&self) -> u32 {
        self.player.lane_count
    }

    /// Terminate the run and queue the final score
    pub fn end_run(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        let score = self.floored_score();
        log::info!("Game over: score {} ({})", score, self.difficulty.as_str());
        self.events.push(GameEvent::GameOver { score });
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_with_difficulty_layout() {
        let tuning = Tuning::default();
        let state = GameState::new(Difficulty::Hard, &tuning);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.lane_count(), 5);
        assert_eq!(state.field.lane_count(), 5);
        assert!(state.field.is_hard());
        assert_eq!(state.game_speed, 3.0);
        assert_eq!(state.lives, 1);
    }

    #[test]
    fn test_restart_resets_everything() {
        let tuning = Tuning::default();
        let mut state = GameState::new(Difficulty::Normal, &tuning);
        state.score = 500.0;
        state.lives = 0;
        state.game_speed = 9.0;
        state.phase = GamePhase::GameOver;
        state.player.move_left();

        state.restart(Difficulty::Normal, &tuning);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.lives, 1);
        assert_eq!(state.game_speed, 2.0);
        assert_eq!(state.player.lane, 1);
        assert!(state.field.is_empty());
    }

    #[test]
    fn test_end_run_fires_once() {
        let tuning = Tuning::default();
        let mut state = GameState::new(Difficulty::Normal, &tuning);
        state.phase = GamePhase::Running;
        state.score = 123.9;
        state.end_run();
        state.end_run();
        assert_eq!(state.drain_events(), vec![GameEvent::GameOver { score: 123 }]);
        assert!(state.drain_events().is_empty());
    }
}
