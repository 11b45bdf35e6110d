//! Neon Slide
//!
//! Sliding tile puzzle with growing levels. There is no game over: solving a
//! level scores 50 per level number and loads the next one after a pause.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::seeded_rng;
use crate::audio::SoundEffect;
use crate::input::{InputEvent, Key, UiButton};
use crate::menu::GameKey;
use crate::renderer::{Color, Frame, palette};
use crate::sim::{Game, Rect, RunStatus, Viewport};

pub const PADDING: f32 = 10.0;
/// Pause between solving and the next level
pub const LEVEL_PAUSE: f32 = 1.5;
pub const TILES_PER_LEVEL: usize = 5;
pub const SHUFFLE_PER_LEVEL: usize = 30;
pub const POINTS_PER_LEVEL: u64 = 50;

/// Blank slot marker
const BLANK: u32 = 0;

/// Grid dimensions (cols, rows) for a level
pub fn grid_for_level(level: u32) -> (usize, usize) {
    if level <= 1 {
        return (3, 2);
    }
    let slots = TILES_PER_LEVEL * level as usize + 1;
    let cols = (slots as f64).sqrt().ceil() as usize;
    let rows = slots.div_ceil(cols);
    (cols, rows)
}

/// Pending level transition
#[derive(Debug, Clone, Copy, PartialEq)]
struct Solved {
    timer: f32,
    award: bool,
}

pub struct SlideGame {
    status: RunStatus,
    score: u64,
    rng: Pcg32,
    viewport: Viewport,
    pub level: u32,
    pub cols: usize,
    pub rows: usize,
    /// Row-major; `0` is blank
    pub tiles: Vec<u32>,
    solved: Option<Solved>,
}

impl SlideGame {
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self {
            status: RunStatus::NotStarted,
            score: 0,
            rng: seeded_rng(seed),
            viewport,
            level: 1,
            cols: 3,
            rows: 2,
            tiles: Vec::new(),
            solved: None,
        }
    }

    fn tile_count(&self) -> usize {
        TILES_PER_LEVEL * self.level as usize
    }

    fn solved_layout(&self) -> Vec<u32> {
        let n = self.tile_count();
        (0..self.cols * self.rows)
            .map(|i| if i < n { i as u32 + 1 } else { BLANK })
            .collect()
    }

    /// First `5n` slots read 1..5n
    pub fn is_solved(&self) -> bool {
        self.tiles
            .iter()
            .take(self.tile_count())
            .enumerate()
            .all(|(i, &t)| t == i as u32 + 1)
    }

    pub fn is_transitioning(&self) -> bool {
        self.solved.is_some()
    }

    fn neighbors(&self, index: usize) -> Vec<usize> {
        let (r, c) = (index / self.cols, index % self.cols);
        let mut out = Vec::with_capacity(4);
        if r > 0 {
            out.push(index - self.cols);
        }
        if r + 1 < self.rows {
            out.push(index + self.cols);
        }
        if c > 0 {
            out.push(index - 1);
        }
        if c + 1 < self.cols {
            out.push(index + 1);
        }
        out
    }

    fn load_level(&mut self, level: u32) {
        self.level = level;
        let (cols, rows) = grid_for_level(level);
        self.cols = cols;
        self.rows = rows;
        self.tiles = self.solved_layout();
        self.solved = None;

        let mut blank = self.tiles.iter().position(|&t| t == BLANK).unwrap_or(0);
        let mut last = None;
        let mut moves = 0;
        // Random walk of the blank that never undoes its previous move
        while moves < SHUFFLE_PER_LEVEL * level as usize || self.is_solved() {
            let options: Vec<usize> = self
                .neighbors(blank)
                .into_iter()
                .filter(|&n| Some(n) != last)
                .collect();
            if options.is_empty() {
                break;
            }
            let next = options[self.rng.random_range(0..options.len())];
            self.tiles.swap(blank, next);
            last = Some(blank);
            blank = next;
            moves += 1;
        }
        log::debug!("Slide level {} ({}x{}) shuffled in {} moves", level, cols, rows, moves);
    }

    /// Tile width/height with padding
    fn tile_size(&self) -> Vec2 {
        Vec2::new(
            (self.viewport.width - (self.cols as f32 + 1.0) * PADDING) / self.cols as f32,
            (self.viewport.height - (self.rows as f32 + 1.0) * PADDING) / self.rows as f32,
        )
    }

    pub fn tile_rect(&self, index: usize) -> Rect {
        let size = self.tile_size();
        let (r, c) = (index / self.cols, index % self.cols);
        Rect::new(
            PADDING + c as f32 * (size.x + PADDING),
            PADDING + r as f32 * (size.y + PADDING),
            size.x,
            size.y,
        )
    }

    /// Slot under a canvas point
    pub fn hit_test(&self, point: Vec2) -> Option<usize> {
        let size = self.tile_size();
        let c = ((point.x - PADDING / 2.0) / (size.x + PADDING)).floor();
        let r = ((point.y - PADDING / 2.0) / (size.y + PADDING)).floor();
        if c < 0.0 || r < 0.0 || c as usize >= self.cols || r as usize >= self.rows {
            return None;
        }
        Some(r as usize * self.cols + c as usize)
    }

    /// Slide the tile at `index` into an adjacent blank. Returns true if it moved.
    pub fn tap(&mut self, index: usize, cues: &mut Vec<SoundEffect>) -> bool {
        if self.is_transitioning() || index >= self.tiles.len() || self.tiles[index] == BLANK {
            return false;
        }
        let Some(blank) = self
            .neighbors(index)
            .into_iter()
            .find(|&n| self.tiles[n] == BLANK)
        else {
            return false;
        };

        self.tiles.swap(index, blank);
        cues.push(SoundEffect::Slide);
        if self.is_solved() {
            cues.push(SoundEffect::LevelWin);
            log::info!("Slide level {} solved", self.level);
            self.solved = Some(Solved {
                timer: 0.0,
                award: true,
            });
        }
        true
    }

    /// Hint: finish the level without scoring
    pub fn solve(&mut self, cues: &mut Vec<SoundEffect>) {
        if self.is_transitioning() {
            return;
        }
        cues.push(SoundEffect::Solve);
        self.tiles = self.solved_layout();
        self.solved = Some(Solved {
            timer: 0.0,
            award: false,
        });
    }

    /// Arrow keys move the tile on the far side of the blank into it
    fn nudge(&mut self, key: Key, cues: &mut Vec<SoundEffect>) {
        let Some(blank) = self.tiles.iter().position(|&t| t == BLANK) else {
            return;
        };
        let (r, c) = (blank / self.cols, blank % self.cols);
        let source = match key {
            Key::Left if c + 1 < self.cols => Some(blank + 1),
            Key::Right if c > 0 => Some(blank - 1),
            Key::Up if r + 1 < self.rows => Some(blank + self.cols),
            Key::Down if r > 0 => Some(blank - self.cols),
            _ => None,
        };
        if let Some(index) = source {
            self.tap(index, cues);
        }
    }
}

impl Game for SlideGame {
    fn key(&self) -> GameKey {
        GameKey::Slide
    }

    fn start(&mut self) {
        self.score = 0;
        self.load_level(1);
        self.status = RunStatus::Running;
    }

    fn handle_input(&mut self, event: &InputEvent, cues: &mut Vec<SoundEffect>) {
        match event {
            InputEvent::PointerDown { x, y, .. } => {
                if let Some(index) = self.hit_test(Vec2::new(*x, *y)) {
                    self.tap(index, cues);
                }
            }
            InputEvent::Button(UiButton::Solve) => self.solve(cues),
            InputEvent::KeyDown(key) => self.nudge(*key, cues),
            _ => {}
        }
    }

    fn tick(&mut self, dt: f32, _cues: &mut Vec<SoundEffect>) {
        let Some(mut solved) = self.solved else { return };
        solved.timer += dt;
        if solved.timer < LEVEL_PAUSE {
            self.solved = Some(solved);
            return;
        }
        if solved.award {
            self.score = self.score.max(POINTS_PER_LEVEL * self.level as u64);
        }
        self.load_level(self.level + 1);
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
        let size = self.tile_size();
        for (i, &num) in self.tiles.iter().enumerate() {
            if num == BLANK {
                continue;
            }
            let rect = self.tile_rect(i);
            let color = if num == i as u32 + 1 { palette::GREEN } else { Color::hex(0xfacc15) };
            frame.glow_rect(rect, color, 12.0);
            frame.label(rect.center(), num.to_string(), size.x.min(size.y) * 0.35, Color::hex(0x000000));
        }

        frame.text(
            Vec2::new(24.0, 24.0),
            format!("LVL {}", self.level),
            12.0,
            palette::CYAN,
            crate::renderer::Align::Left,
        );

        if self.is_transitioning() {
            let (w, h) = (self.viewport.width, self.viewport.height);
            frame.rect(Rect::new(0.0, 0.0, w, h), Color::hex(0x000000).with_alpha(0.6));
            frame.label(Vec2::new(w / 2.0, h / 2.0), "SYSTEM SOLVED", 36.0, palette::CYAN);
        }
    }
}
