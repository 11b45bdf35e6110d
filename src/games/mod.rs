//! The individual games
//!
//! Each module owns one `Game` implementation with its tuning constants.
//! `create` builds a fresh, not-yet-started instance for a `GameKey`.

pub mod breaker;
pub mod pong;
pub mod racer;
pub mod shooter;
pub mod slide;
pub mod snake;
pub mod stacker;
pub mod typing;

use rand::SeedableRng;
use rand_pcg::Pcg32;

pub use breaker::BreakerGame;
pub use pong::PongGame;
pub use racer::RacerGame;
pub use shooter::ShooterGame;
pub use slide::SlideGame;
pub use snake::SnakeGame;
pub use stacker::StackerGame;
pub use typing::TypingGame;

use crate::input::{InputEvent, Key};
use crate::menu::GameKey;
use crate::settings::Settings;
use crate::sim::{Game, Viewport};

/// Build a new game instance
pub fn create(key: GameKey, seed: u64, viewport: Viewport, settings: &Settings) -> Box<dyn Game> {
    match key {
        GameKey::Snake => Box::new(SnakeGame::new(seed, viewport, settings.snake_speed)),
        GameKey::Galaxy => Box::new(ShooterGame::new(seed, viewport).with_reduced_motion(settings.reduced_motion)),
        GameKey::Pong => Box::new(PongGame::new(seed, viewport)),
        GameKey::Slide => Box::new(SlideGame::new(seed, viewport)),
        GameKey::Stack => Box::new(StackerGame::new(seed, viewport)),
        GameKey::Breaker => Box::new(BreakerGame::new(seed, viewport)),
        GameKey::Racing => Box::new(RacerGame::new(seed, viewport)),
        GameKey::Type => Box::new(TypingGame::new(seed, viewport)),
    }
}

/// Deterministic per-instance RNG
pub(crate) fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Held-direction state plus the last pointer x, shared by the
/// paddle and ship games
#[derive(Debug, Clone, Default)]
pub(crate) struct Steering {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    /// Pointer x while a pointer is steering
    pub pointer_x: Option<f32>,
    pub pointer_down: bool,
}

impl Steering {
    pub fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(Key::Left) => self.left = true,
            InputEvent::KeyDown(Key::Right) => self.right = true,
            InputEvent::KeyDown(Key::Up) => self.up = true,
            InputEvent::KeyUp(Key::Left) => self.left = false,
            InputEvent::KeyUp(Key::Right) => self.right = false,
            InputEvent::KeyUp(Key::Up) => self.up = false,
            InputEvent::PointerMove { x, .. } => self.pointer_x = Some(*x),
            InputEvent::PointerDown { x, .. } => {
                self.pointer_x = Some(*x);
                self.pointer_down = true;
            }
            InputEvent::PointerUp { .. } => self.pointer_down = false,
            _ => {}
        }
    }

    /// -1, 0 or 1 from held keys
    pub fn axis(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// Keyboard steering overrides a stale pointer position
    pub fn take_pointer(&mut self) -> Option<f32> {
        if self.axis() != 0.0 {
            self.pointer_x = None;
        }
        self.pointer_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::RunStatus;

    #[test]
    fn test_create_every_game_not_started() {
        let settings = Settings::default();
        for key in GameKey::ALL {
            let game = create(key, 7, Viewport::default(), &settings);
            assert_eq!(game.key(), key);
            assert_eq!(game.status(), RunStatus::NotStarted);
            assert_eq!(game.score(), 0);
        }
    }

    #[test]
    fn test_steering_axis() {
        let mut steering = Steering::default();
        steering.apply(&InputEvent::KeyDown(Key::Left));
        assert_eq!(steering.axis(), -1.0);
        steering.apply(&InputEvent::KeyDown(Key::Right));
        assert_eq!(steering.axis(), 0.0);
        steering.apply(&InputEvent::KeyUp(Key::Left));
        assert_eq!(steering.axis(), 1.0);
    }

    #[test]
    fn test_keyboard_drops_pointer() {
        let mut steering = Steering::default();
        steering.apply(&InputEvent::PointerMove {
            x: 10.0,
            y: 0.0,
            kind: Default::default(),
        });
        assert_eq!(steering.take_pointer(), Some(10.0));
        steering.apply(&InputEvent::KeyDown(Key::Right));
        assert_eq!(steering.take_pointer(), None);
    }
}
