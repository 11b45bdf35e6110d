//! Neon Stack
//!
//! A block slides across above the tower; tapping drops it and trims off the
//! overhang. Landing within a few pixels snaps it perfectly and builds a combo.

use glam::Vec2;

use crate::audio::SoundEffect;
use crate::input::InputEvent;
use crate::menu::GameKey;
use crate::renderer::{Color, Frame};
use crate::sim::{Game, Ramp, Rect, RunStatus, Viewport};

pub const BLOCK_H: f32 = 28.0;
pub const MAX_START_W: f32 = 300.0;
/// Offsets within this snap to a perfect placement
pub const PERFECT_TOLERANCE: f32 = 8.0;
/// Narrower trimmed blocks end the run
pub const MIN_WIDTH: f32 = 6.0;
/// How far past the far edge a missed block may travel
pub const EXIT_MARGIN: f32 = 50.0;
/// Block slide speed per tick
pub const SLIDE_SPEED: Ramp = Ramp::rising(3.5, 0.1, 9.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub hue: f32,
}

impl Block {
    fn color(&self) -> Color {
        Color::hsl(self.hue, 0.55)
    }
}

/// Outcome of dropping the moving block
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drop {
    Perfect,
    Trimmed(f32),
    Missed,
}

pub struct StackerGame {
    status: RunStatus,
    score: u64,
    viewport: Viewport,
    pub stack: Vec<Block>,
    pub current: Block,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    pub speed: f32,
    pub combo: u32,
}

impl StackerGame {
    /// The stacker has no randomness; the seed is accepted for a uniform factory
    pub fn new(_seed: u64, viewport: Viewport) -> Self {
        Self {
            status: RunStatus::NotStarted,
            score: 0,
            viewport,
            stack: Vec::new(),
            current: Block {
                x: 0.0,
                y: 0.0,
                w: 0.0,
                hue: 0.0,
            },
            direction: -1.0,
            speed: SLIDE_SPEED.at(0),
            combo: 0,
        }
    }

    fn top(&self) -> Block {
        self.stack.last().copied().unwrap_or(self.current)
    }

    fn spawn_block(&mut self) {
        let top = self.top();
        self.current = Block {
            x: 0.0,
            y: top.y - BLOCK_H,
            w: top.w,
            hue: ((self.score + 1) * 15 % 360) as f32,
        };
        self.speed = SLIDE_SPEED.at(self.score);
        if self.score % 2 == 0 {
            self.direction = -1.0;
            self.current.x = self.viewport.width - 10.0;
        } else {
            self.direction = 1.0;
            self.current.x = -self.current.w + 10.0;
        }
    }

    /// Resolve a drop of the moving block onto the tower
    pub fn drop_block(&mut self, cues: &mut Vec<SoundEffect>) -> Drop {
        let top = self.top();
        let delta = self.current.x - top.x;
        let offset = delta.abs();

        let outcome = if offset <= PERFECT_TOLERANCE {
            Drop::Perfect
        } else if offset >= self.current.w || self.current.w - offset < MIN_WIDTH {
            Drop::Missed
        } else {
            Drop::Trimmed(self.current.w - offset)
        };

        match outcome {
            Drop::Missed => {
                cues.push(SoundEffect::StackOver);
                self.status = RunStatus::GameOver;
                return outcome;
            }
            Drop::Perfect => {
                self.combo += 1;
                cues.push(SoundEffect::StackPerfect(self.combo));
                self.current.x = top.x;
            }
            Drop::Trimmed(width) => {
                self.combo = 0;
                cues.push(SoundEffect::StackPlace);
                // Keep the overlapping part
                if delta < 0.0 {
                    self.current.x = top.x;
                }
                self.current.w = width;
            }
        }

        self.stack.push(self.current);
        self.score += 1;
        self.spawn_block();
        outcome
    }

    /// Vertical scroll keeping the top of the tower in view
    fn camera_y(&self) -> f32 {
        (self.viewport.height * 0.6 - self.top().y).max(0.0)
    }
}

impl Game for StackerGame {
    fn key(&self) -> GameKey {
        GameKey::Stack
    }

    fn start(&mut self) {
        let w = (self.viewport.width * 0.7).min(MAX_START_W);
        self.stack = vec![Block {
            x: (self.viewport.width - w) / 2.0,
            y: self.viewport.height - 60.0,
            w,
            hue: 199.0,
        }];
        self.score = 0;
        self.combo = 0;
        self.spawn_block();
        self.status = RunStatus::Running;
    }

    fn handle_input(&mut self, event: &InputEvent, cues: &mut Vec<SoundEffect>) {
        let tap = match event {
            InputEvent::KeyDown(key) => key.is_tap(),
            InputEvent::PointerDown { .. } => true,
            _ => false,
        };
        if tap {
            self.drop_block(cues);
        }
    }

    fn tick(&mut self, _dt: f32, cues: &mut Vec<SoundEffect>) {
        self.current.x += self.speed * self.direction;

        let gone = if self.direction > 0.0 {
            self.current.x > self.viewport.width + self.current.w + EXIT_MARGIN
        } else {
            self.current.x < -self.current.w - EXIT_MARGIN
        };
        if gone {
            cues.push(SoundEffect::StackOver);
            self.status = RunStatus::GameOver;
        }
    }

    fn score(&self) -> u64 {
        self.score
    }

    fn status(&self) -> RunStatus {
        self.status
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn draw(&self, frame: &mut Frame) {
        frame.background = Color::hex(0x050508);
        let cam = self.camera_y();
        let height = self.viewport.height;
        let last = self.stack.len().saturating_sub(1);
        for (i, block) in self.stack.iter().enumerate() {
            if block.y + cam > height + 100.0 {
                continue;
            }
            let glow = if i == last { 15.0 } else { 0.0 };
            frame.glow_rect(
                Rect::new(block.x, block.y + cam, block.w, BLOCK_H - 1.0),
                block.color(),
                glow,
            );
        }
        if self.status != RunStatus::GameOver {
            let c = self.current;
            frame.glow_rect(Rect::new(c.x, c.y + cam, c.w, BLOCK_H - 1.0), c.color(), 20.0);
        }
        if self.combo > 1 {
            frame.label(
                Vec2::new(self.viewport.width / 2.0, 40.0),
                format!("PERFECT x{}", self.combo),
                18.0,
                Color::hex(0xffffff),
            );
        }
    }
}
