//! Fixed timestep simulation tick
//!
//! One update step: advance the player and the field, ramp the speed,
//! accrue score, then resolve collisions.

use rand::Rng;

use super::field::CollisionReport;
use super::obstacle::ObstacleKind;
use super::state::{GameEvent, GamePhase, GameState};
use crate::tuning::{SessionTuning, Tuning};

/// What a tick did that the orchestrator has to act on
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub collision: CollisionReport,
    /// Kind of the hit that took the last life; the run is over
    pub terminal: Option<ObstacleKind>,
}

/// Advance the game state by one timestep
pub fn tick<R: Rng>(state: &mut GameState, tuning: &Tuning, rng: &mut R, dt: f32) -> TickOutcome {
    if state.phase != GamePhase::Running {
        return TickOutcome::default();
    }

    let speed = state.game_speed;
    state.player.update(dt, speed);
    state.field.update(dt, speed, rng);

    state.game_speed += dt * tuning.profile(state.difficulty).speed_ramp;
    state.score += dt * tuning.session.score_rate * state.game_speed;
    state.elapsed += dt;

    let collision = state.field.check_collision(&state.player);
    let terminal = apply_collision(state, &tuning.session, &collision);
    TickOutcome {
        collision,
        terminal,
    }
}

/// Apply a collision report to score and lives.
///
/// Returns the kind of the hit that took the last life, if any. The phase is
/// left alone so the caller can play the fall sequence first.
pub fn apply_collision(
    state: &mut GameState,
    session: &SessionTuning,
    report: &CollisionReport,
) -> Option<ObstacleKind> {
    for &kind in &report.pickups {
        match kind {
            ObstacleKind::GoldCoin => state.score += session.gold_coin_bonus,
            ObstacleKind::RedCoin => {
                state.score = (state.score - session.red_coin_penalty).max(0.0);
            }
            ObstacleKind::Life => {
                let lives = state.lives.saturating_add(1);
                state.lives = session.max_lives.map_or(lives, |cap| lives.min(cap));
            }
            _ => {}
        }
        state.events.push(GameEvent::PickedUp(kind));
    }

    let hit = report.hit?;
    state.lives = state.lives.saturating_sub(1);
    state.field.break_obstacle(hit.index);
    log::info!("Hit {} ({} lives left)", hit.kind, state.lives);
    state.events.push(GameEvent::Crashed {
        kind: hit.kind,
        lives_left: state.lives,
    });

    if state.lives > 0 {
        return None;
    }
    if hit.kind == ObstacleKind::Hole {
        state.events.push(GameEvent::FellIntoHole);
    }
    Some(hit.kind)
}
