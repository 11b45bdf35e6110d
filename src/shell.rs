//! Game shell: hosts one running game
//!
//! The shell owns the `GameLoop` for the selected game, mirrors its live score,
//! shows the game-over overlay and hands the final score upward exactly once.
//! Restarting throws the instance away and builds a fresh one under a new
//! instance id.

use glam::Vec2;

use crate::audio::SoundEffect;
use crate::games;
use crate::input::{InputEvent, Key};
use crate::menu::GameKey;
use crate::renderer::{Align, Color, Frame, palette};
use crate::settings::Settings;
use crate::sim::{GameLoop, Rect, Reporter, RunStatus, Viewport};

/// Live score state fed by the running game
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scoreboard {
    pub live: u64,
    /// Set once by `report_game_over`
    pub final_score: Option<u64>,
    handed_off: bool,
}

impl Reporter for Scoreboard {
    fn report_score(&mut self, score: u64) {
        if self.final_score.is_none() {
            self.live = score;
        }
    }

    fn report_game_over(&mut self, final_score: u64) {
        if self.final_score.is_none() {
            self.live = final_score;
            self.final_score = Some(final_score);
        }
    }
}

/// Buttons on the game-over overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    Restart,
    Menu,
}

pub struct GameShell {
    key: GameKey,
    game: GameLoop,
    board: Scoreboard,
    stored_best: u64,
    instance_id: u64,
    viewport: Viewport,
}

impl GameShell {
    /// Mount `key` with the best score currently on record
    pub fn mount(key: GameKey, seed: u64, viewport: Viewport, settings: &Settings, stored_best: u64) -> Self {
        log::info!("Mounting {}", key.metadata().title);
        let mut shell = Self {
            key,
            game: GameLoop::new(games::create(key, seed, viewport, settings)),
            board: Scoreboard::default(),
            stored_best,
            instance_id: 0,
            viewport,
        };
        shell.autostart();
        shell
    }

    fn autostart(&mut self) {
        if !self.key.metadata().needs_start_prompt {
            self.game.start(&mut self.board);
        }
    }

    pub fn key(&self) -> GameKey {
        self.key
    }

    pub fn title(&self) -> &'static str {
        self.key.metadata().title
    }

    pub fn hint(&self) -> &'static str {
        self.key.metadata().hint
    }

    pub fn instance_id(&self) -> u64 {
        self.instance_id
    }

    pub fn status(&self) -> RunStatus {
        self.game.status()
    }

    /// Waiting on the start prompt
    pub fn awaiting_start(&self) -> bool {
        self.game.status() == RunStatus::NotStarted
    }

    /// Begin a prompted game
    pub fn start(&mut self) {
        self.game.start(&mut self.board);
    }

    pub fn current_score(&self) -> u64 {
        self.board.live
    }

    /// Best shown in the top bar: the live score once it passes the record
    pub fn best_display(&self) -> u64 {
        self.board.live.max(self.stored_best)
    }

    pub fn set_stored_best(&mut self, best: u64) {
        self.stored_best = best;
    }

    pub fn is_game_over(&self) -> bool {
        self.board.final_score.is_some()
    }

    pub fn final_score(&self) -> Option<u64> {
        self.board.final_score
    }

    /// The final score, returned once per instance
    pub fn take_finished(&mut self) -> Option<u64> {
        match self.board.final_score {
            Some(score) if !self.board.handed_off => {
                self.board.handed_off = true;
                Some(score)
            }
            _ => None,
        }
    }

    /// Route an input event to the game, or to the start prompt
    pub fn push_input(&mut self, event: InputEvent) {
        if self.awaiting_start() {
            let starts = match &event {
                InputEvent::KeyDown(key) => matches!(key, Key::Enter | Key::Space),
                InputEvent::PointerDown { .. } => true,
                _ => false,
            };
            if starts {
                self.start();
                return;
            }
        }
        self.game.push_input(event);
    }

    /// Advance by a frame's worth of wall time
    pub fn frame(&mut self, dt: f32) -> u32 {
        self.game.frame(dt, &mut self.board)
    }

    pub fn take_cues(&mut self) -> Vec<SoundEffect> {
        self.game.take_cues()
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.game.resize(viewport);
    }

    /// Discard the current instance and start a fresh one built from the
    /// current `settings`
    pub fn restart(&mut self, seed: u64, settings: &Settings) {
        self.game.unmount();
        self.instance_id += 1;
        self.board = Scoreboard::default();
        self.game = GameLoop::new(games::create(self.key, seed, self.viewport, settings));
        log::info!("Restarting {} (instance {})", self.title(), self.instance_id);
        self.autostart();
    }

    /// Stop the running instance; nothing is reported afterwards
    pub fn unmount(&mut self) {
        self.game.unmount();
    }

    pub fn is_mounted(&self) -> bool {
        self.game.is_active()
    }

    fn overlay_button(&self, index: usize) -> Rect {
        let (w, h) = (self.viewport.width, self.viewport.height);
        let width = (w - 48.0).clamp(1.0, 260.0);
        Rect::new((w - width) / 2.0, h / 2.0 + 40.0 + index as f32 * 64.0, width, 52.0)
    }

    /// Which overlay button sits under `point`
    pub fn overlay_hit(&self, point: Vec2) -> Option<OverlayAction> {
        if !self.is_game_over() {
            return None;
        }
        if self.overlay_button(0).contains(point) {
            Some(OverlayAction::Restart)
        } else if self.overlay_button(1).contains(point) {
            Some(OverlayAction::Menu)
        } else {
            None
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        self.game.draw(frame);
        let (w, h) = (self.viewport.width, self.viewport.height);

        frame.text(Vec2::new(16.0, 20.0), self.title(), 16.0, palette::WHITE, Align::Left);
        frame.text(
            Vec2::new(w - 16.0, 16.0),
            format!("BEST {}", self.best_display()),
            14.0,
            palette::CYAN,
            Align::Right,
        );
        frame.text(
            Vec2::new(w - 16.0, 34.0),
            format!("SCORE {}", self.current_score()),
            14.0,
            palette::WHITE,
            Align::Right,
        );
        if !self.viewport.is_narrow() {
            frame.label(Vec2::new(w / 2.0, h - 12.0), self.hint(), 10.0, Color::hex(0x334155));
        }

        if let Some(score) = self.board.final_score {
            frame.rect(Rect::new(0.0, 0.0, w, h), Color::hex(0x000000).with_alpha(0.9));
            let size = if self.viewport.is_narrow() { 40.0 } else { 64.0 };
            frame.label(Vec2::new(w / 2.0, h / 2.0 - 60.0), "GAME OVER", size, palette::WHITE);
            frame.label(
                Vec2::new(w / 2.0, h / 2.0),
                format!("FINAL SCORE: {score}"),
                20.0,
                palette::SLATE,
            );
            for (i, (text, fill, ink)) in [
                ("TRY AGAIN", palette::WHITE, Color::hex(0x000000)),
                ("MENU", Color::hex(0x111111), palette::WHITE),
            ]
            .into_iter()
            .enumerate()
            {
                let button = self.overlay_button(i);
                frame.rect(button, fill);
                frame.label(button.center(), text, 18.0, ink);
            }
        }
    }
}
