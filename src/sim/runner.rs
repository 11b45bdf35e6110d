//! Fixed timestep game loop
//!
//! Wraps one `Game` and enforces the lifecycle contract:
//! - input is queued between ticks and applied at the start of the next one
//! - score changes are reported only while the run is alive
//! - game over is reported exactly once, after which nothing is reported
//! - an unmounted loop never ticks or reports again

use std::collections::VecDeque;

use super::game::{EventQueue, Game, GameEvent, Reporter, RunStatus, Viewport};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::input::InputEvent;
use crate::menu::GameKey;
use crate::renderer::Frame;

/// Drives a single game instance from start to game over
pub struct GameLoop {
    game: Box<dyn Game>,
    inputs: VecDeque<InputEvent>,
    accumulator: f32,
    last_reported: u64,
    finished: bool,
    active: bool,
    cues: Vec<SoundEffect>,
    ticks: u64,
}

impl GameLoop {
    pub fn new(game: Box<dyn Game>) -> Self {
        Self {
            game,
            inputs: VecDeque::new(),
            accumulator: 0.0,
            last_reported: 0,
            finished: false,
            active: true,
            cues: Vec::new(),
            ticks: 0,
        }
    }

    pub fn key(&self) -> GameKey {
        self.game.key()
    }

    pub fn status(&self) -> RunStatus {
        self.game.status()
    }

    pub fn score(&self) -> u64 {
        self.game.score()
    }

    /// Number of ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// False once unmounted
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True once game over has been reported
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Begin the run. No-op unless the game has not started yet.
    pub fn start(&mut self, reporter: &mut dyn Reporter) {
        if !self.active || self.game.status() != RunStatus::NotStarted {
            return;
        }
        self.game.start();
        self.last_reported = self.game.score();
        reporter.report_score(self.last_reported);
        log::debug!("{:?} started", self.game.key());
    }

    /// Record an input event for the next tick
    pub fn push_input(&mut self, event: InputEvent) {
        if self.active && !self.finished {
            self.inputs.push_back(event);
        }
    }

    /// Advance by a frame's worth of wall time, running whole ticks only.
    ///
    /// Returns the number of ticks run.
    pub fn frame(&mut self, dt: f32, reporter: &mut dyn Reporter) -> u32 {
        if !self.is_running() {
            return 0;
        }

        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
            self.step(reporter);
            if !self.is_running() {
                self.accumulator = 0.0;
                break;
            }
        }
        // Drop backlog we could not catch up on
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Run exactly one tick
    pub fn step(&mut self, reporter: &mut dyn Reporter) {
        if !self.is_running() {
            return;
        }

        // (a) queued input
        while let Some(event) = self.inputs.pop_front() {
            self.game.handle_input(&event, &mut self.cues);
            if self.game.status() != RunStatus::Running {
                self.inputs.clear();
                break;
            }
        }

        // (b)-(d) kinematics, spawns, collisions
        if self.game.status() == RunStatus::Running {
            self.game.tick(SIM_DT, &mut self.cues);
        }
        self.ticks += 1;

        // (e)-(f) reports
        let score = self.game.score();
        debug_assert!(score >= self.last_reported, "score went backwards");
        if self.game.status() == RunStatus::GameOver {
            self.finished = true;
            self.inputs.clear();
            log::info!("{:?} game over with score {}", self.game.key(), score);
            reporter.report_game_over(score);
        } else if score != self.last_reported {
            self.last_reported = score;
            reporter.report_score(score);
        }
    }

    /// Run one tick and return the reports as events
    pub fn step_events(&mut self) -> Vec<GameEvent> {
        let mut queue = EventQueue::default();
        self.step(&mut queue);
        queue.events
    }

    /// Advance by `dt` and return the reports as events
    pub fn drain_events(&mut self, dt: f32) -> Vec<GameEvent> {
        let mut queue = EventQueue::default();
        self.frame(dt, &mut queue);
        queue.events
    }

    /// Stop scheduling. Nothing is reported after this returns.
    pub fn unmount(&mut self) {
        if self.active {
            log::debug!("{:?} unmounted", self.game.key());
        }
        self.active = false;
        self.inputs.clear();
        self.cues.clear();
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if self.active {
            self.game.resize(viewport);
        }
    }

    /// Sound cues produced since the last call
    pub fn take_cues(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.cues)
    }

    pub fn draw(&self, frame: &mut Frame) {
        self.game.draw(frame);
    }

    fn is_running(&self) -> bool {
        self.active && !self.finished && self.game.status() == RunStatus::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    /// Scripted game: scores on every tick, dies on a given tick
    struct Scripted {
        status: RunStatus,
        score: u64,
        ticks: u32,
        die_at: u32,
        inputs_seen: usize,
    }

    impl Scripted {
        fn new(die_at: u32) -> Self {
            Self {
                status: RunStatus::NotStarted,
                score: 0,
                ticks: 0,
                die_at,
                inputs_seen: 0,
            }
        }
    }

    impl Game for Scripted {
        fn key(&self) -> GameKey {
            GameKey::Snake
        }
        fn start(&mut self) {
            self.status = RunStatus::Running;
        }
        fn handle_input(&mut self, _event: &InputEvent, _cues: &mut Vec<SoundEffect>) {
            self.inputs_seen += 1;
        }
        fn tick(&mut self, _dt: f32, _cues: &mut Vec<SoundEffect>) {
            self.ticks += 1;
            if self.ticks >= self.die_at {
                self.status = RunStatus::GameOver;
                return;
            }
            self.score += 1;
        }
        fn score(&self) -> u64 {
            self.score
        }
        fn status(&self) -> RunStatus {
            self.status
        }
        fn resize(&mut self, _viewport: Viewport) {}
        fn draw(&self, _frame: &mut Frame) {}
    }

    #[test]
    fn test_no_ticks_before_start() {
        let mut game_loop = GameLoop::new(Box::new(Scripted::new(100)));
        let mut queue = EventQueue::default();
        assert_eq!(game_loop.frame(0.05, &mut queue), 0);
        assert!(queue.events.is_empty());
        assert_eq!(game_loop.status(), RunStatus::NotStarted);
    }

    #[test]
    fn test_fixed_timestep_accumulates() {
        let mut game_loop = GameLoop::new(Box::new(Scripted::new(1000)));
        let mut queue = EventQueue::default();
        game_loop.start(&mut queue);

        // Half a tick does nothing, the second half completes it
        assert_eq!(game_loop.frame(SIM_DT * 0.5, &mut queue), 0);
        assert_eq!(game_loop.frame(SIM_DT * 0.6, &mut queue), 1);
        // A huge frame is capped
        assert!(game_loop.frame(10.0, &mut queue) <= MAX_SUBSTEPS);
    }

    #[test]
    fn test_game_over_reported_exactly_once() {
        let mut game_loop = GameLoop::new(Box::new(Scripted::new(3)));
        let mut queue = EventQueue::default();
        game_loop.start(&mut queue);
        for _ in 0..20 {
            game_loop.frame(SIM_DT, &mut queue);
        }

        assert_eq!(
            queue.events,
            vec![
                GameEvent::ScoreChanged(0),
                GameEvent::ScoreChanged(1),
                GameEvent::ScoreChanged(2),
                GameEvent::GameOver(2),
            ]
        );
        assert!(game_loop.is_finished());
    }

    #[test]
    fn test_unmount_stops_reports() {
        let mut game_loop = GameLoop::new(Box::new(Scripted::new(1000)));
        let mut queue = EventQueue::default();
        game_loop.start(&mut queue);
        game_loop.frame(SIM_DT, &mut queue);
        let before = queue.events.len();

        game_loop.unmount();
        game_loop.push_input(InputEvent::KeyDown(Key::Left));
        game_loop.frame(1.0, &mut queue);
        game_loop.step(&mut queue);
        assert_eq!(queue.events.len(), before);
        assert!(!game_loop.is_active());
    }

    #[test]
    fn test_inputs_applied_at_next_tick() {
        let mut game_loop = GameLoop::new(Box::new(Scripted::new(1000)));
        let mut queue = EventQueue::default();
        game_loop.start(&mut queue);
        game_loop.push_input(InputEvent::KeyDown(Key::Left));
        game_loop.push_input(InputEvent::KeyUp(Key::Left));
        let events = game_loop.step_events();
        assert_eq!(events, vec![GameEvent::ScoreChanged(1)]);
        assert_eq!(game_loop.ticks(), 1);
    }

    #[test]
    fn test_non_finite_dt_ignored() {
        let mut game_loop = GameLoop::new(Box::new(Scripted::new(1000)));
        let mut queue = EventQueue::default();
        game_loop.start(&mut queue);
        assert_eq!(game_loop.frame(f32::NAN, &mut queue), 0);
        assert_eq!(game_loop.frame(-1.0, &mut queue), 0);
    }
}
