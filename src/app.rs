//! Top-level arcade state
//!
//! `Arcade` owns the persistent store, the high-score table, settings and
//! audio, and switches between the menu and a mounted `GameShell`. Hosts feed
//! it frames and input and paint whatever it draws.

use glam::Vec2;

use crate::audio::{AudioManager, SoundEffect};
use crate::highscores::HighScores;
use crate::input::{InputEvent, Key, UiButton};
use crate::menu::{self, GameKey};
use crate::persistence::KeyValueStore;
use crate::platform;
use crate::renderer::Frame;
use crate::settings::Settings;
use crate::shell::{GameShell, OverlayAction};
use crate::sim::{RunStatus, Viewport};

/// What is on screen
pub enum Screen {
    Menu,
    Playing(GameShell),
}

pub struct Arcade {
    store: Box<dyn KeyValueStore>,
    scores: HighScores,
    settings: Settings,
    audio: AudioManager,
    screen: Screen,
    viewport: Viewport,
}

impl Arcade {
    /// Load scores and settings from `store` and open on the menu
    pub fn new(store: Box<dyn KeyValueStore>, viewport: Viewport) -> Self {
        let scores = HighScores::load(store.as_ref());
        let settings = Settings::load(store.as_ref());
        let mut audio = AudioManager::new();
        audio.apply_settings(&settings);
        Self {
            store,
            scores,
            settings,
            audio,
            screen: Screen::Menu,
            viewport,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn shell(&self) -> Option<&GameShell> {
        match &self.screen {
            Screen::Playing(shell) => Some(shell),
            Screen::Menu => None,
        }
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Backing store for scores and settings
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Mount `key`, replacing whatever was playing
    pub fn select(&mut self, key: GameKey, seed: u64) {
        self.leave_game();
        let best = self.scores.get(key);
        self.screen = Screen::Playing(GameShell::mount(key, seed, self.viewport, &self.settings, best));
    }

    /// Unmount the running game and show the menu
    pub fn back_to_menu(&mut self) {
        self.leave_game();
        self.screen = Screen::Menu;
    }

    /// Replay the current game with a new instance
    pub fn restart(&mut self, seed: u64) {
        self.collect_final();
        if let Screen::Playing(shell) = &mut self.screen {
            shell.restart(seed, &self.settings);
        }
    }

    fn leave_game(&mut self) {
        self.collect_final();
        if let Screen::Playing(shell) = &mut self.screen {
            shell.unmount();
            log::info!("Leaving {}", shell.title());
        }
    }

    /// Advance the running game and settle any finished run
    pub fn frame(&mut self, dt: f32) {
        let Screen::Playing(shell) = &mut self.screen else {
            return;
        };
        shell.frame(dt);
        let cues = shell.take_cues();
        self.audio.play_all(&cues);
        self.collect_final();
    }

    /// Hand a finished run's score to the high-score table
    fn collect_final(&mut self) {
        let Screen::Playing(shell) = &mut self.screen else {
            return;
        };
        let Some(score) = shell.take_finished() else {
            return;
        };
        let key = shell.key();
        if self.scores.record(key, score) {
            log::info!("New high score for {}: {}", shell.title(), score);
            shell.set_stored_best(score);
            self.audio.play(SoundEffect::HighScore);
            if let Err(e) = self.scores.save(self.store.as_mut()) {
                log::warn!("Failed to save high scores: {}", e);
            }
        }
    }

    pub fn push_input(&mut self, event: InputEvent) {
        if matches!(event, InputEvent::KeyDown(_) | InputEvent::PointerDown { .. }) {
            self.audio.resume();
        }

        if let InputEvent::Button(UiButton::Speed(speed)) = event {
            if self.settings.snake_speed != speed {
                self.settings.snake_speed = speed;
                self.save_settings();
            }
        }

        if matches!(self.screen, Screen::Menu) {
            self.menu_input(&event);
            return;
        }
        if event == InputEvent::KeyDown(Key::Escape) {
            self.back_to_menu();
            return;
        }
        let Screen::Playing(shell) = &mut self.screen else {
            return;
        };
        if !shell.is_game_over() {
            shell.push_input(event);
            return;
        }
        let action = match event {
            InputEvent::KeyDown(Key::Enter | Key::Space) => Some(OverlayAction::Restart),
            InputEvent::PointerDown { x, y, .. } => shell.overlay_hit(Vec2::new(x, y)),
            _ => None,
        };
        match action {
            Some(OverlayAction::Restart) => self.restart(platform::fresh_seed()),
            Some(OverlayAction::Menu) => self.back_to_menu(),
            None => {}
        }
    }

    fn menu_input(&mut self, event: &InputEvent) {
        let key = match event {
            InputEvent::PointerDown { x, y, .. } => menu::hit_test(self.viewport, Vec2::new(*x, *y)),
            InputEvent::KeyDown(Key::Char(c)) => match c.to_digit(10) {
                Some(n) if n >= 1 => GameKey::ALL.get(n as usize - 1).copied(),
                _ => {
                    if c.eq_ignore_ascii_case(&'m') {
                        self.toggle_mute();
                    }
                    None
                }
            },
            _ => None,
        };
        if let Some(key) = key {
            self.select(key, platform::fresh_seed());
        }
    }

    pub fn toggle_mute(&mut self) {
        self.settings.muted = !self.settings.muted;
        self.audio.apply_settings(&self.settings);
        log::info!("Audio {}", if self.settings.muted { "muted" } else { "unmuted" });
        self.save_settings();
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.settings.save(self.store.as_mut()) {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if let Screen::Playing(shell) = &mut self.screen {
            shell.resize(viewport);
        }
    }

    /// Whether a game is mounted and still running
    pub fn is_playing(&self) -> bool {
        self.shell().is_some_and(|s| s.status() == RunStatus::Running)
    }

    pub fn draw(&self, frame: &mut Frame) {
        frame.clear(self.viewport);
        match &self.screen {
            Screen::Menu => menu::draw(frame, &self.scores),
            Screen::Playing(shell) => shell.draw(frame),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::persistence::MemoryStore;

    fn arcade() -> Arcade {
        Arcade::new(Box::new(MemoryStore::new()), Viewport::default())
    }

    fn lose_stack(arcade: &mut Arcade) {
        arcade.push_input(InputEvent::KeyDown(Key::Space));
        arcade.frame(SIM_DT * 1.5);
    }

    #[test]
    fn test_opens_on_menu() {
        let arcade = arcade();
        assert!(matches!(arcade.screen(), Screen::Menu));
        assert!(arcade.shell().is_none());
    }

    #[test]
    fn test_digit_selects_from_menu() {
        let mut arcade = arcade();
        arcade.push_input(InputEvent::KeyDown(Key::Char('2')));
        assert_eq!(arcade.shell().map(|s| s.key()), Some(GameKey::Snake));
        arcade.push_input(InputEvent::KeyDown(Key::Escape));
        assert!(arcade.shell().is_none());
        arcade.push_input(InputEvent::KeyDown(Key::Char('0')));
        assert!(arcade.shell().is_none());
    }

    #[test]
    fn test_click_selects_from_menu() {
        let mut arcade = arcade();
        let row = menu::row_rect(arcade.viewport(), 6).center();
        arcade.push_input(InputEvent::PointerDown {
            x: row.x,
            y: row.y,
            kind: Default::default(),
        });
        assert_eq!(arcade.shell().map(|s| s.key()), Some(GameKey::Stack));
        assert!(arcade.is_playing());
    }

    #[test]
    fn test_zero_run_not_recorded() {
        let mut arcade = arcade();
        arcade.select(GameKey::Stack, 1);
        lose_stack(&mut arcade);
        assert!(arcade.shell().is_some_and(|s| s.is_game_over()));
        // A zero run never beats the empty table
        assert_eq!(arcade.scores().get(GameKey::Stack), 0);
        assert!(!arcade.is_playing());
    }

    #[test]
    fn test_enter_restarts_after_game_over() {
        let mut arcade = arcade();
        arcade.select(GameKey::Stack, 1);
        lose_stack(&mut arcade);
        arcade.push_input(InputEvent::KeyDown(Key::Enter));
        let shell = arcade.shell().expect("still mounted");
        assert_eq!(shell.instance_id(), 1);
        assert!(!shell.is_game_over());
        assert_eq!(shell.current_score(), 0);
    }

    #[test]
    fn test_speed_button_persists_setting() {
        let mut arcade = arcade();
        arcade.select(GameKey::Snake, 1);
        arcade.push_input(InputEvent::Button(UiButton::Speed(crate::SnakeSpeed::High)));
        assert_eq!(arcade.settings().snake_speed, crate::SnakeSpeed::High);
        assert!(arcade.store.get(Settings::STORAGE_KEY).is_some());
    }

    #[test]
    fn test_mute_toggle_in_menu() {
        let mut arcade = arcade();
        arcade.push_input(InputEvent::KeyDown(Key::Char('m')));
        assert!(arcade.settings().muted);
        let reloaded = Settings::load(arcade.store.as_ref());
        assert!(reloaded.muted);
    }

    #[test]
    fn test_draw_menu_lists_titles() {
        let arcade = arcade();
        let mut frame = Frame::new(arcade.viewport());
        arcade.draw(&mut frame);
        assert!(frame.texts().any(|t| t.contains("NEON SNAKE")));
    }

    #[test]
    fn test_restart_uses_changed_snake_speed() {
        let mut arcade = arcade();
        arcade.select(GameKey::Snake, 1);
        arcade.push_input(InputEvent::KeyDown(Key::Enter));
        arcade.push_input(InputEvent::Button(UiButton::Speed(crate::SnakeSpeed::High)));
        for _ in 0..2000 {
            if !arcade.is_playing() {
                break;
            }
            arcade.frame(SIM_DT);
        }
        assert!(arcade.shell().is_some_and(|s| s.is_game_over()));

        arcade.push_input(InputEvent::KeyDown(Key::Enter));
        let shell = arcade.shell().expect("still mounted");
        assert_eq!(shell.instance_id(), 1);
        let mut frame = Frame::new(arcade.viewport());
        arcade.draw(&mut frame);
        assert!(frame.texts().any(|t| t == "SPEED HIGH"));
    }
}
