//! The lifecycle contract every game implements
//!
//! A game owns its entities, actor and score exclusively. The `GameLoop`
//! drives it one tick at a time and is the only thing that talks to the shell.

use crate::audio::SoundEffect;
use crate::input::InputEvent;
use crate::menu::GameKey;
use crate::renderer::Frame;

/// Run status of one game instance.
///
/// Transitions are one-way: `NotStarted -> Running -> GameOver`. Playing again
/// means constructing a new instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunStatus {
    #[default]
    NotStarted,
    Running,
    GameOver,
}

/// Drawing surface dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Narrow (phone-sized) layouts use smaller paddles and fewer columns
    pub fn is_narrow(&self) -> bool {
        self.width < 500.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Reports flowing from a running game to its host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Non-terminal score change
    ScoreChanged(u64),
    /// Terminal; fires exactly once per instance
    GameOver(u64),
}

/// The two callbacks a host hands to a running game
pub trait Reporter {
    fn report_score(&mut self, score: u64);
    fn report_game_over(&mut self, final_score: u64);
}

/// Collects reports as `GameEvent`s, for hosts that prefer a queue
#[derive(Debug, Default)]
pub struct EventQueue {
    pub events: Vec<GameEvent>,
}

impl Reporter for EventQueue {
    fn report_score(&mut self, score: u64) {
        self.events.push(GameEvent::ScoreChanged(score));
    }

    fn report_game_over(&mut self, final_score: u64) {
        self.events.push(GameEvent::GameOver(final_score));
    }
}

/// One game simulation.
///
/// `tick` must run to completion without blocking; collision checks run in a
/// fixed order with terminal checks first, so a tick that both kills the actor
/// and would award points ends the run without the points.
pub trait Game {
    /// Which game this is
    fn key(&self) -> GameKey;

    /// Build the starting entities for the current viewport and begin running
    fn start(&mut self);

    /// Apply one queued input event. Only called while running.
    fn handle_input(&mut self, event: &InputEvent, cues: &mut Vec<SoundEffect>);

    /// Advance the simulation by one step
    fn tick(&mut self, dt: f32, cues: &mut Vec<SoundEffect>);

    /// Current score (never decreases within a run)
    fn score(&self) -> u64;

    /// Current run status
    fn status(&self) -> RunStatus;

    /// Re-derive bounds after the drawing surface changed size
    fn resize(&mut self, viewport: Viewport);

    /// Emit the current scene into a display list
    fn draw(&self, frame: &mut Frame);
}
