//! Neon Arcade - a bundle of small neon arcade games
//!
//! Core modules:
//! - `sim`: Shared game loop contract (fixed timestep, lifecycle, collisions)
//! - `games`: The individual game simulations
//! - `shell` / `app`: Hosting a running game, menu navigation and high scores
//! - `renderer`: Backend-neutral display list the hosts paint
//! - `persistence`: Key/value storage for scores and settings

pub mod app;
pub mod audio;
pub mod demo;
pub mod games;
pub mod highscores;
pub mod input;
pub mod menu;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod shell;
pub mod sim;

pub use app::{Arcade, Screen};
pub use highscores::HighScores;
pub use menu::{GameKey, GameMetadata};
pub use settings::{Settings, SnakeSpeed};
pub use shell::GameShell;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one display refresh at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted by the loop (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Coerce a raw score value into a displayable score.
///
/// NaN, infinities and negative values become 0; everything else is floored.
#[inline]
pub fn sanitize_score(raw: f64) -> u64 {
    if raw.is_finite() && raw > 0.0 {
        raw.floor() as u64
    } else {
        0
    }
}
