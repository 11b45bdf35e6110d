//! Neon Snake
//!
//! Grid snake stepping on a timer whose interval comes from the speed setting.
//! Leaving the grid or running into the body ends the run.

use std::collections::VecDeque;

use glam::{IVec2, Vec2};
use rand::Rng;
use rand_pcg::Pcg32;

use super::seeded_rng;
use crate::audio::SoundEffect;
use crate::input::{InputEvent, Key, UiButton};
use crate::menu::GameKey;
use crate::renderer::{Color, Frame, palette};
use crate::settings::SnakeSpeed;
use crate::sim::{Game, Rect, RunStatus, Viewport};

/// Cell size in pixels
pub const CELL: f32 = 20.0;

pub struct SnakeGame {
    status: RunStatus,
    score: u64,
    rng: Pcg32,
    viewport: Viewport,
    cols: i32,
    rows: i32,
    /// Head first
    pub body: VecDeque<IVec2>,
    pub direction: IVec2,
    next_direction: IVec2,
    pub food: IVec2,
    pub speed: SnakeSpeed,
    step_timer_ms: f32,
}

impl SnakeGame {
    pub fn new(seed: u64, viewport: Viewport, speed: SnakeSpeed) -> Self {
        let mut game = Self {
            status: RunStatus::NotStarted,
            score: 0,
            rng: seeded_rng(seed),
            viewport,
            cols: 1,
            rows: 1,
            body: VecDeque::new(),
            direction: IVec2::X,
            next_direction: IVec2::X,
            food: IVec2::ZERO,
            speed,
            step_timer_ms: 0.0,
        };
        game.fit_grid();
        game
    }

    /// Explicit grid size, independent of the viewport
    pub fn with_grid(cols: i32, rows: i32, seed: u64) -> Self {
        let viewport = Viewport::new(cols as f32 * CELL, rows as f32 * CELL);
        Self::new(seed, viewport, SnakeSpeed::default())
    }

    pub fn grid(&self) -> (i32, i32) {
        (self.cols, self.rows)
    }

    pub fn head(&self) -> IVec2 {
        self.body.front().copied().unwrap_or_default()
    }

    fn fit_grid(&mut self) {
        self.cols = ((self.viewport.width / CELL).floor() as i32).max(2);
        self.rows = ((self.viewport.height / CELL).floor() as i32).max(2);
    }

    fn in_grid(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.x < self.cols && cell.y >= 0 && cell.y < self.rows
    }

    /// Random cell not covered by the snake
    fn random_free_cell(&mut self) -> Option<IVec2> {
        let free: Vec<IVec2> = (0..self.rows)
            .flat_map(|y| (0..self.cols).map(move |x| IVec2::new(x, y)))
            .filter(|cell| !self.body.contains(cell))
            .collect();
        if free.is_empty() {
            None
        } else {
            Some(free[self.rng.random_range(0..free.len())])
        }
    }

    /// Queue a turn. Turns along the current axis are ignored.
    pub fn turn(&mut self, key: Key) {
        let dir = match key {
            Key::Up => IVec2::NEG_Y,
            Key::Down => IVec2::Y,
            Key::Left => IVec2::NEG_X,
            Key::Right => IVec2::X,
            _ => return,
        };
        let same_axis = (dir.x != 0 && self.direction.x != 0) || (dir.y != 0 && self.direction.y != 0);
        if !same_axis {
            self.next_direction = dir;
        }
    }

    /// Advance the snake by one cell
    pub fn step(&mut self, cues: &mut Vec<SoundEffect>) {
        if self.status != RunStatus::Running {
            return;
        }
        self.direction = self.next_direction;
        let head = self.head() + self.direction;

        if !self.in_grid(head) || self.body.contains(&head) {
            cues.push(SoundEffect::SnakeDie);
            self.status = RunStatus::GameOver;
            return;
        }

        self.body.push_front(head);
        if head == self.food {
            self.score += 1;
            cues.push(SoundEffect::Eat);
            match self.random_free_cell() {
                Some(cell) => self.food = cell,
                None => {
                    log::info!("Snake filled the grid");
                    self.status = RunStatus::GameOver;
                }
            }
        } else {
            self.body.pop_back();
        }
    }
}

impl Game for SnakeGame {
    fn key(&self) -> GameKey {
        GameKey::Snake
    }

    fn start(&mut self) {
        self.fit_grid();
        self.body.clear();
        self.body.push_back(IVec2::new(self.cols / 2, self.rows / 2));
        self.direction = IVec2::X;
        self.next_direction = IVec2::X;
        self.food = self.random_free_cell().unwrap_or_default();
        self.score = 0;
        self.step_timer_ms = 0.0;
        self.status = RunStatus::Running;
    }

    fn handle_input(&mut self, event: &InputEvent, _cues: &mut Vec<SoundEffect>) {
        match event {
            InputEvent::KeyDown(key) | InputEvent::Button(UiButton::Pad(key)) => self.turn(*key),
            InputEvent::Button(UiButton::Speed(speed)) => self.speed = *speed,
            InputEvent::PointerDown { x, y, .. } => {
                // Touch relative to the head picks the turn
                let head = (self.head().as_vec2() + 0.5) * CELL;
                let delta = Vec2::new(*x, *y) - head;
                let key = if self.direction.x != 0 {
                    if delta.y < 0.0 { Key::Up } else { Key::Down }
                } else if delta.x < 0.0 {
                    Key::Left
                } else {
                    Key::Right
                };
                self.turn(key);
            }
            _ => {}
        }
    }

    fn tick(&mut self, dt: f32, cues: &mut Vec<SoundEffect>) {
        self.step_timer_ms += dt * 1000.0;
        let interval = self.speed.interval_ms();
        while self.step_timer_ms >= interval && self.status == RunStatus::Running {
            self.step_timer_ms -= interval;
            self.step(cues);
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
        self.fit_grid();
        if !self.in_grid(self.food) || self.body.contains(&self.food) {
            if let Some(cell) = self.random_free_cell() {
                self.food = cell;
            }
        }
    }

    fn draw(&self, frame: &mut Frame) {
        frame.background = Color::hex(0x050508);
        for (i, cell) in self.body.iter().enumerate() {
            let color = if i == 0 { Color::hex(0xecfeff) } else { Color::hex(0x06b6d4) };
            let rect = Rect::new(
                cell.x as f32 * CELL + 1.0,
                cell.y as f32 * CELL + 1.0,
                CELL - 2.0,
                CELL - 2.0,
            );
            frame.glow_rect(rect, color, 10.0);
        }
        if self.status != RunStatus::NotStarted {
            let food = (self.food.as_vec2() + 0.5) * CELL;
            frame.circle(food, CELL / 3.0, Color::hex(0xec4899), 15.0);
        }

        frame.text(
            Vec2::new(10.0, 14.0),
            format!("SPEED {}", self.speed.as_str().to_uppercase()),
            11.0,
            palette::SLATE,
            crate::renderer::Align::Left,
        );
        if self.status == RunStatus::NotStarted {
            let center = Vec2::new(self.viewport.width / 2.0, self.viewport.height / 2.0);
            frame.label(center, "START SYSTEM", 32.0, palette::WHITE);
            frame.label(center + Vec2::new(0.0, 40.0), "PRESS ENTER OR TAP", 14.0, palette::CYAN);
        }
    }
}
