//! Neon Type
//!
//! Words fall from the top. Typing a word's first letter locks onto it and
//! the rest must follow in order; finishing a word destroys it for 10 points
//! per letter. A word reaching the bottom ends the run.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::seeded_rng;
use crate::audio::SoundEffect;
use crate::input::InputEvent;
use crate::menu::GameKey;
use crate::renderer::{Align, Color, Frame};
use crate::sim::{Game, Ramp, Rect, RunStatus, Viewport};

pub const WORDS: &[&str] = &[
    "SYSTEM", "HACK", "CODE", "DATA", "CYBER", "NEON", "FLUX", "GRID", "NODE", "CORE", "BYTE", "LINK",
    "SYNC", "WAVE", "SCAN", "VOID", "NULL", "BIOS", "ROOT", "HOST", "ACCESS", "DENIED", "LOGIN", "USER",
    "ADMIN", "SHELL", "BASH", "SUDO", "GREP", "REACT", "TYPES", "CONST", "AWAIT", "ASYNC", "PROMISE",
    "STACK", "HEAP", "QUEUE", "MEMORY", "DRIVER", "SOCKET", "PACKET", "LATENCY", "SERVER", "CLIENT",
    "ROUTER", "MODEM", "FIBER", "OPTIC", "LASER", "POWER", "ENERGY", "FORCE", "LIGHT", "DARK", "FUTURE",
    "RETRO", "ARCADE", "GAME", "OVER", "LEVEL", "SCORE", "HIGH", "BEST", "PLAYER", "READY", "START",
    "PAUSE", "RESUME", "EXIT", "MENU", "SOUND", "MUSIC", "VIDEO", "AUDIO", "INPUT", "OUTPUT", "MOUSE",
    "CLICK", "PRESS", "TOUCH", "SWIPE", "SCROLL", "DRAG", "DROP", "FILES", "FOLDER", "DISK", "DRIVE",
    "SPACE", "ENTER", "SHIFT", "CTRL", "ALT", "TAB", "CAPS", "LOCK", "PRINT", "SCREEN", "INSERT", "HOME",
    "DELETE", "END", "PAGE", "DOWN", "LEFT", "RIGHT", "UP", "NUM", "PAD", "FUNCTION",
];

pub const SPAWN_Y: f32 = -30.0;
pub const POINTS_PER_LETTER: u64 = 10;
const MARGIN: f32 = 50.0;
const FONT_SIZE: f32 = 24.0;
/// Approximate advance of one glyph at `FONT_SIZE`
const GLYPH_W: f32 = 17.0;

/// Base fall speed per tick; a random 0-0.5 is added per word
pub const FALL_SPEED: Ramp = Ramp::rising(1.0, 1.0 / 500.0, 4.0);
pub const BASE_SPAWN_INTERVAL: u64 = 60;
pub const MIN_SPAWN_INTERVAL: u64 = 20;

/// Ticks between spawns at `score`
pub fn spawn_interval(score: u64) -> u64 {
    BASE_SPAWN_INTERVAL.saturating_sub(score / 100).max(MIN_SPAWN_INTERVAL)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: &'static str,
    pub pos: Vec2,
    pub speed: f32,
    /// Letters typed so far
    pub matched: usize,
    pub locked: bool,
}

impl Word {
    pub fn new(text: &'static str, pos: Vec2, speed: f32) -> Self {
        Self {
            text,
            pos,
            speed,
            matched: 0,
            locked: false,
        }
    }

    fn next_letter(&self) -> Option<char> {
        self.text.chars().nth(self.matched)
    }

    fn is_complete(&self) -> bool {
        self.matched >= self.text.chars().count()
    }
}

#[derive(Debug, Clone)]
struct Fragment {
    pos: Vec2,
    vel: Vec2,
    life: f32,
    letter: char,
}

pub struct TypingGame {
    status: RunStatus,
    score: u64,
    rng: Pcg32,
    viewport: Viewport,
    pub words: Vec<Word>,
    spawn_timer: u64,
    fragments: Vec<Fragment>,
}

impl TypingGame {
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self {
            status: RunStatus::NotStarted,
            score: 0,
            rng: seeded_rng(seed),
            viewport,
            words: Vec::new(),
            spawn_timer: 0,
            fragments: Vec::new(),
        }
    }

    fn spawn_word(&mut self) {
        let text = WORDS[self.rng.random_range(0..WORDS.len())];
        let span = (self.viewport.width - MARGIN * 2.0 - 100.0).max(0.0);
        let x = MARGIN + self.rng.random::<f32>() * span;
        let speed = FALL_SPEED.at(self.score) + self.rng.random::<f32>() * 0.5;
        self.words.push(Word::new(text, Vec2::new(x, SPAWN_Y), speed));
    }

    /// Feed one typed letter. Returns true if it advanced a word.
    pub fn type_letter(&mut self, letter: char, cues: &mut Vec<SoundEffect>) -> bool {
        if !letter.is_ascii_alphabetic() {
            return false;
        }
        let letter = letter.to_ascii_uppercase();

        let index = match self.words.iter().position(|w| w.locked) {
            Some(i) => {
                if self.words[i].next_letter() != Some(letter) {
                    return false;
                }
                self.words[i].matched += 1;
                i
            }
            None => {
                // Lowest word starting with the letter
                let lowest = self
                    .words
                    .iter()
                    .enumerate()
                    .filter(|(_, w)| w.text.starts_with(letter))
                    .max_by(|(_, a), (_, b)| a.pos.y.total_cmp(&b.pos.y))
                    .map(|(i, _)| i);
                let Some(i) = lowest else {
                    return false;
                };
                self.words[i].locked = true;
                self.words[i].matched = 1;
                i
            }
        };
        cues.push(SoundEffect::TypeKey);

        if self.words[index].is_complete() {
            let word = self.words.remove(index);
            self.score += word.text.len() as u64 * POINTS_PER_LETTER;
            cues.push(SoundEffect::WordDestroyed);
            self.shatter(&word);
        }
        true
    }

    fn shatter(&mut self, word: &Word) {
        for (i, letter) in word.text.chars().enumerate() {
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 5.0,
                (self.rng.random::<f32>() - 0.5) * 5.0,
            );
            self.fragments.push(Fragment {
                pos: word.pos + Vec2::new(i as f32 * 15.0, 0.0),
                vel,
                life: 1.0,
                letter,
            });
        }
    }
}

impl Game for TypingGame {
    fn key(&self) -> GameKey {
        GameKey::Type
    }

    fn start(&mut self) {
        self.words.clear();
        self.fragments.clear();
        self.score = 0;
        self.spawn_timer = 0;
        self.spawn_word();
        self.status = RunStatus::Running;
    }

    fn handle_input(&mut self, event: &InputEvent, cues: &mut Vec<SoundEffect>) {
        for letter in event.typed_chars() {
            self.type_letter(letter, cues);
        }
    }

    fn tick(&mut self, _dt: f32, cues: &mut Vec<SoundEffect>) {
        self.spawn_timer += 1;
        if self.spawn_timer > spawn_interval(self.score) {
            self.spawn_word();
            self.spawn_timer = 0;
        }

        for word in &mut self.words {
            word.pos.y += word.speed;
        }
        if self.words.iter().any(|w| w.pos.y > self.viewport.height) {
            cues.push(SoundEffect::WordMissed);
            self.status = RunStatus::GameOver;
            return;
        }

        for f in &mut self.fragments {
            f.pos += f.vel;
            f.life -= 0.05;
        }
        self.fragments.retain(|f| f.life > 0.0);
    }

    fn score(&self) -> u64 {
        self.score
    }

    fn status(&self) -> RunStatus {
        self.status
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let max_x = (viewport.width - MARGIN).max(0.0);
        for word in &mut self.words {
            word.pos.x = word.pos.x.min(max_x);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        frame.background = Color::hex(0x050508);
        let red = Color::hex(0xef4444);
        let cyan = Color::hex(0x22d3ee);
        let green = Color::hex(0x22c55e);

        for word in &self.words {
            let (done, rest) = word.text.split_at(word.matched.min(word.text.len()));
            if !done.is_empty() {
                frame.text(word.pos, done, FONT_SIZE, red, Align::Left);
            }
            let rest_pos = word.pos + Vec2::new(done.len() as f32 * GLYPH_W, 0.0);
            let color = if word.locked { cyan } else { green };
            frame.text(rest_pos, rest, FONT_SIZE, color, Align::Left);
            if word.locked {
                let width = word.text.len() as f32 * GLYPH_W;
                frame.stroke_rect(
                    Rect::new(word.pos.x - 5.0, word.pos.y - 25.0, width + 10.0, 35.0),
                    red.with_alpha(0.5),
                    2.0,
                );
            }
        }

        for f in &self.fragments {
            frame.text(f.pos, f.letter.to_string(), 12.0, green.with_alpha(f.life), Align::Left);
        }
    }
}
