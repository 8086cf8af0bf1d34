//! Orchestrator: drives update and render, owns the session and notifies the host
//!
//! `Idle -> Running <-> Paused -> GameOver -> Running (restart)`.
//! Observers fire synchronously at tick boundaries, one slot per kind,
//! last registration wins.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::highscores::HighScores;
use crate::renderer::SceneRenderer;
use crate::sim::{
    CollisionReport, GameEvent, GamePhase, GameState, ObstacleKind, apply_collision, tick,
};
use crate::tuning::{Difficulty, Tuning};

/// Seed used when the host does not supply one
pub const DEFAULT_SEED: u64 = 0x5EED_1A4E;

/// Discrete input the host delivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    Jump,
    CancelJump,
    TogglePause,
}

impl InputEvent {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(InputEvent::MoveLeft),
            "ArrowRight" | "d" | "D" => Some(InputEvent::MoveRight),
            "ArrowUp" | "w" | "W" | " " => Some(InputEvent::Jump),
            "ArrowDown" | "s" | "S" => Some(InputEvent::CancelJump),
            "Escape" | "p" | "P" => Some(InputEvent::TogglePause),
            _ => None,
        }
    }
}

type Observer<T> = Option<Box<dyn FnMut(T)>>;

/// A game session bound to one renderer
pub struct Game<R: SceneRenderer> {
    renderer: R,
    tuning: Tuning,
    state: GameState,
    rng: Pcg32,
    /// Applied on the next `start()`
    hard_difficulty: bool,
    high_scores: HighScores,
    accumulator: f32,
    last_frame_ms: Option<f64>,
    last_notified_score: Option<u32>,
    last_notified_lives: Option<u32>,
    /// Events since the host last drained them
    events: Vec<GameEvent>,
    on_score_update: Observer<u32>,
    on_game_over: Observer<u32>,
    on_pause: Observer<bool>,
    on_lives_update: Observer<u32>,
}

impl<R: SceneRenderer> Game<R> {
    pub fn new(renderer: R) -> Self {
        Self::with_config(renderer, Tuning::default(), DEFAULT_SEED)
    }

    pub fn with_config(renderer: R, tuning: Tuning, seed: u64) -> Self {
        let state = GameState::new(Difficulty::Normal, &tuning);
        Self {
            renderer,
            state,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            hard_difficulty: false,
            high_scores: HighScores::new(),
            accumulator: 0.0,
            last_frame_ms: None,
            last_notified_score: None,
            last_notified_lives: None,
            events: Vec::new(),
            on_score_update: None,
            on_game_over: None,
            on_pause: None,
            on_lives_update: None,
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Begin a fresh run with the current difficulty
    pub fn start(&mut self) {
        let difficulty = Difficulty::from_hard(self.hard_difficulty);
        self.state.restart(difficulty, &self.tuning);
        self.renderer.reset_ground();
        self.accumulator = 0.0;
        self.last_frame_ms = None;
        self.last_notified_score = None;
        self.last_notified_lives = None;
        log::info!(
            "Starting {} run: {} lanes, speed {}",
            difficulty.as_str(),
            self.state.lane_count(),
            self.state.game_speed
        );
        self.notify();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
    }

    /// Takes effect on the next `start()`
    pub fn set_hard_difficulty(&mut self, hard: bool) {
        self.hard_difficulty = hard;
    }

    /// Flip between Running and Paused; ignored in other phases
    pub fn toggle_pause(&mut self) {
        let paused = match self.state.phase {
            GamePhase::Running => {
                self.state.phase = GamePhase::Paused;
                true
            }
            GamePhase::Paused => {
                self.state.phase = GamePhase::Running;
                // Next frame must not see the paused time as delta
                self.last_frame_ms = None;
                self.accumulator = 0.0;
                false
            }
            _ => return,
        };
        log::info!("{}", if paused { "Paused" } else { "Resumed" });
        if let Some(cb) = self.on_pause.as_mut() {
            cb(paused);
        }
    }

    pub fn handle_input(&mut self, input: InputEvent) {
        match self.state.phase {
            GamePhase::Running => {}
            GamePhase::Paused if input == InputEvent::TogglePause => {}
            _ => return,
        }

        let player = &mut self.state.player;
        let event = match input {
            InputEvent::TogglePause => {
                self.toggle_pause();
                return;
            }
            InputEvent::MoveLeft => player.move_left().then_some(GameEvent::LaneChanged),
            InputEvent::MoveRight => player.move_right().then_some(GameEvent::LaneChanged),
            InputEvent::Jump => player.jump().then_some(GameEvent::Jumped),
            InputEvent::CancelJump => {
                player.cancel_jump();
                None
            }
        };
        if let Some(event) = event {
            self.state.events.push(event);
        }
    }

    // ------------------------------------------------------------------
    // Per-frame driving
    // ------------------------------------------------------------------

    /// Host frame callback with a monotonic timestamp in milliseconds.
    ///
    /// Runs fixed substeps for the elapsed time, then renders once.
    /// Returns whether the host should schedule another frame.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if !self.state.is_running() {
            return false;
        }

        let dt = match self.last_frame_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            if !self.state.is_running() {
                break;
            }
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.accumulator = 0.0;
        }

        self.render();
        self.state.is_running()
    }

    /// One update tick of `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if !self.state.is_running() {
            return;
        }
        let speed = self.state.game_speed;
        let outcome = tick(&mut self.state, &self.tuning, &mut self.rng, dt);
        self.renderer.advance_ground(dt, speed);

        if let Some(kind) = outcome.terminal {
            self.finish_run(kind);
        }
        self.notify();
    }

    /// Test the player against the field now and apply the result.
    ///
    /// Consumes any pickups touched, so repeated calls will not report them again.
    pub fn check_collision(&mut self) -> CollisionReport {
        if !self.state.is_running() {
            return CollisionReport::default();
        }
        let report = self.state.field.check_collision(&self.state.player);
        if let Some(kind) = apply_collision(&mut self.state, &self.tuning.session, &report) {
            self.finish_run(kind);
        }
        self.notify();
        report
    }

    pub fn render(&mut self) {
        self.renderer
            .render(&self.state.player, self.state.field.obstacles());
    }

    fn finish_run(&mut self, kind: ObstacleKind) {
        if kind == ObstacleKind::Hole {
            self.run_fall_sequence();
        }
        self.state.end_run();
    }

    /// Sink the player through the hole, rendering each step
    fn run_fall_sequence(&mut self) {
        let session = self.tuning.session;
        let mut steps = 0;
        while self.state.player.position.y > session.fall_depth && steps < session.max_fall_steps {
            self.state.player.fall(session.fall_step_dt);
            self.render();
            steps += 1;
        }
        log::debug!(
            "Fall sequence finished after {} steps at y={}",
            steps,
            self.state.player.position.y
        );
    }

    /// Fire observers for anything that changed this tick
    fn notify(&mut self) {
        let score = self.state.floored_score();
        if self.last_notified_score != Some(score) {
            self.last_notified_score = Some(score);
            if let Some(cb) = self.on_score_update.as_mut() {
                cb(score);
            }
        }

        let lives = self.state.lives;
        if self.last_notified_lives != Some(lives) {
            self.last_notified_lives = Some(lives);
            if let Some(cb) = self.on_lives_update.as_mut() {
                cb(lives);
            }
        }

        for event in self.state.drain_events() {
            if let GameEvent::GameOver { score } = event {
                self.high_scores.record(self.state.difficulty, score);
                if let Some(cb) = self.on_game_over.as_mut() {
                    cb(score);
                }
            }
            self.events.push(event);
        }
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    pub fn on_score_update(&mut self, callback: impl FnMut(u32) + 'static) {
        self.on_score_update = Some(Box::new(callback));
    }

    pub fn on_game_over(&mut self, callback: impl FnMut(u32) + 'static) {
        self.on_game_over = Some(Box::new(callback));
    }

    pub fn on_pause(&mut self, callback: impl FnMut(bool) + 'static) {
        self.on_pause = Some(Box::new(callback));
    }

    pub fn on_lives_update(&mut self, callback: impl FnMut(u32) + 'static) {
        self.on_lives_update = Some(Box::new(callback));
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Floored score
    pub fn score(&self) -> u32 {
        self.state.floored_score()
    }

    pub fn lives(&self) -> u32 {
        self.state.lives
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }

    pub fn is_paused(&self) -> bool {
        self.state.phase == GamePhase::Paused
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn hard_difficulty(&self) -> bool {
        self.hard_difficulty
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Best score this session for the current difficulty setting
    pub fn high_score(&self) -> Option<u32> {
        self.high_scores
            .best(Difficulty::from_hard(self.hard_difficulty))
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Take events for sound and UI hooks
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::HeadlessRenderer;
    use crate::sim::Obstacle;
    use glam::Vec3;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn quiet_game() -> Game<HeadlessRenderer> {
        Game::with_config(HeadlessRenderer::new(), Tuning::without_spawns(), 7)
    }

    fn recorder<T: 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(T) + 'static) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, move |v| sink.borrow_mut().push(v))
    }

    #[test]
    fn test_idle_until_started() {
        let mut game = quiet_game();
        assert_eq!(game.phase(), GamePhase::Idle);
        game.step(0.1);
        game.handle_input(InputEvent::MoveLeft);
        assert_eq!(game.score(), 0);
        assert_eq!(game.state().player.lane, 1);
        assert!(!game.frame(0.0));
    }

    #[test]
    fn test_normal_run_ramps_speed_and_score() {
        let mut game = quiet_game();
        game.start();
        let ramp = game.tuning().normal.speed_ramp;

        let mut last_score = game.state().score;
        let mut last_speed = game.state().game_speed;
        for _ in 0..5 {
            game.step(0.1);
            let state = game.state();
            assert!(state.score > last_score);
            assert!((state.game_speed - last_speed - 0.1 * ramp).abs() < 1e-6);
            last_score = state.score;
            last_speed = state.game_speed;
        }
        assert!(game.state().field.is_empty());
        assert!(game.renderer().ground.offset() > 0.0);
    }

    #[test]
    fn test_barrier_on_last_life_ends_run() {
        let mut game = quiet_game();
        let (over, on_over) = recorder();
        game.on_game_over(on_over);
        game.start();
        game.step(0.5);
        let expected = game.score();

        let pos = game.state().player.position;
        game.state_mut()
            .field
            .insert(Obstacle::new(ObstacleKind::SmallBarrier, pos, 1));
        let report = game.check_collision();

        assert!(report.is_hit());
        assert_eq!(report.kind(), Some(ObstacleKind::SmallBarrier));
        assert_eq!(game.lives(), 0);
        assert!(game.is_game_over());
        assert_eq!(*over.borrow(), vec![expected]);
        assert_eq!(game.high_score(), Some(expected));
        assert!(game.drain_events().contains(&GameEvent::GameOver { score: expected }));
    }

    #[test]
    fn test_hole_on_last_life_plays_fall_then_ends() {
        let mut game = quiet_game();
        let (over, on_over) = recorder();
        game.on_game_over(on_over);
        game.start();

        let hole_y = ObstacleKind::Hole.info().size.y + crate::consts::GROUND_SURFACE_Y;
        game.state_mut()
            .field
            .insert(Obstacle::new(ObstacleKind::Hole, Vec3::new(0.0, hole_y, 0.0), 1));
        let report = game.check_collision();
        assert_eq!(report.kind(), Some(ObstacleKind::Hole));

        let trail = &game.renderer().player_trail;
        assert!(trail.len() > 1);
        for (before, after) in trail.iter().zip(trail.iter().skip(1)) {
            assert!(after.y < before.y);
        }
        let depth = game.tuning().session.fall_depth;
        assert!(trail.back().unwrap().y <= depth);
        assert!(game.is_game_over());
        assert_eq!(over.borrow().len(), 1);
        assert!(game.drain_events().contains(&GameEvent::FellIntoHole));
    }

    #[test]
    fn test_hit_with_spare_life_keeps_running() {
        let mut tuning = Tuning::without_spawns();
        tuning.session.starting_lives = 2;
        let mut game = Game::with_config(HeadlessRenderer::new(), tuning, 7);
        let (lives, on_lives) = recorder();
        game.on_lives_update(on_lives);
        game.start();

        let pos = game.state().player.position;
        game.state_mut()
            .field
            .insert(Obstacle::new(ObstacleKind::FloatingBarrier, pos, 1));
        game.check_collision();

        assert!(game.is_running());
        assert_eq!(game.lives(), 1);
        assert_eq!(*lives.borrow(), vec![2, 1]);
        // Broken barrier does not hit again
        game.step(SIM_DT);
        assert_eq!(game.lives(), 1);
    }

    #[test]
    fn test_double_toggle_pause_notifies_twice() {
        let mut game = quiet_game();
        let (pauses, on_pause) = recorder();
        game.on_pause(on_pause);
        game.start();

        game.toggle_pause();
        game.toggle_pause();
        assert!(!game.is_paused());
        assert_eq!(*pauses.borrow(), vec![true, false]);
    }

    #[test]
    fn test_paused_game_does_not_advance() {
        let mut game = quiet_game();
        game.start();
        game.frame(0.0);
        game.frame(50.0);
        let score = game.state().score;

        game.handle_input(InputEvent::TogglePause);
        assert!(!game.frame(10_000.0));
        game.step(1.0);
        game.handle_input(InputEvent::Jump);
        assert_eq!(game.state().score, score);
        assert!(!game.state().player.is_jumping);

        // Resume: the paused gap must not count as frame time
        game.handle_input(InputEvent::TogglePause);
        assert!(game.frame(20_000.0));
        assert_eq!(game.state().score, score);
        assert!(game.frame(20_050.0));
        assert!(game.state().score > score);
    }

    #[test]
    fn test_frame_runs_fixed_substeps() {
        let mut game = quiet_game();
        game.start();
        game.frame(1000.0);
        assert_eq!(game.state().elapsed, 0.0);

        // 55 ms is 6.6 ticks
        game.frame(1055.0);
        let steps = (game.state().elapsed / SIM_DT).round() as u32;
        assert_eq!(steps, 6);
        assert_eq!(game.renderer().frames, 2);

        // A long stall is clamped and capped
        game.frame(10_000.0);
        let steps = (game.state().elapsed / SIM_DT).round() as u32;
        assert_eq!(steps, 6 + MAX_SUBSTEPS);
    }

    #[test]
    fn test_input_ignored_after_game_over() {
        let mut game = quiet_game();
        game.start();
        game.state_mut().end_run();
        game.handle_input(InputEvent::MoveLeft);
        game.handle_input(InputEvent::TogglePause);
        assert_eq!(game.state().player.lane, 1);
        assert!(!game.is_paused());
    }

    #[test]
    fn test_inputs_emit_events() {
        let mut game = quiet_game();
        game.start();
        game.handle_input(InputEvent::MoveLeft);
        game.handle_input(InputEvent::MoveLeft);
        game.handle_input(InputEvent::Jump);
        game.handle_input(InputEvent::Jump);
        game.step(SIM_DT);
        let events = game.drain_events();
        assert_eq!(events, vec![GameEvent::LaneChanged, GameEvent::Jumped]);
    }

    #[test]
    fn test_difficulty_applies_on_start() {
        let mut game = quiet_game();
        game.start();
        game.set_hard_difficulty(true);
        assert_eq!(game.state().lane_count(), 3);
        game.start();
        assert!(game.hard_difficulty());
        assert_eq!(game.state().lane_count(), 5);
        assert_eq!(game.state().player.lane, 2);
        assert_eq!(game.state().game_speed, 3.0);
    }

    #[test]
    fn test_score_observer_fires_on_floor_change_only() {
        let mut game = quiet_game();
        let (scores, on_score) = recorder();
        game.on_score_update(on_score);
        game.start();
        for _ in 0..240 {
            game.step(SIM_DT);
        }
        let scores = scores.borrow();
        assert_eq!(scores[0], 0);
        assert!(scores.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(*scores.last().unwrap(), game.score());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut game = quiet_game();
        game.start();
        game.step(1.0);
        game.state_mut().end_run();
        game.start();
        assert!(game.is_running());
        assert_eq!(game.score(), 0);
        assert_eq!(game.lives(), 1);
    }

    #[test]
    fn test_resize_updates_projection() {
        let mut game = quiet_game();
        game.resize(1600, 800);
        assert_eq!(game.renderer().camera.aspect(), 2.0);
        game.resize(0, 800);
        assert_eq!(game.renderer().size, (1600, 800));
    }

    #[test]
    fn test_input_event_keys() {
        assert_eq!(InputEvent::from_key("ArrowLeft"), Some(InputEvent::MoveLeft));
        assert_eq!(InputEvent::from_key(" "), Some(InputEvent::Jump));
        assert_eq!(InputEvent::from_key("Escape"), Some(InputEvent::TogglePause));
        assert_eq!(InputEvent::from_key("q"), None);
        // Reserved for the page: start, difficulty and mute
        for key in ["Enter", "h", "m", "M"] {
            assert_eq!(InputEvent::from_key(key), None);
        }
    }
}
