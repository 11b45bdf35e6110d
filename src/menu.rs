//! Game catalog and the menu screen
//!
//! The menu lists every game in a fixed order with its description, accent
//! colour and stored best score, and turns a selection into a `GameKey`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::highscores::HighScores;
use crate::renderer::{Align, Color, Frame, palette};
use crate::sim::{Rect, Viewport};

/// Stable game identifier (also the high score key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameKey {
    Snake,
    Galaxy,
    Pong,
    Slide,
    Stack,
    Breaker,
    Racing,
    Type,
}

impl GameKey {
    /// Every game, in menu order
    pub const ALL: [GameKey; 8] = [
        GameKey::Racing,
        GameKey::Snake,
        GameKey::Galaxy,
        GameKey::Pong,
        GameKey::Breaker,
        GameKey::Slide,
        GameKey::Stack,
        GameKey::Type,
    ];

    /// Upper-case identifier used in storage
    pub fn id(&self) -> &'static str {
        match self {
            GameKey::Snake => "SNAKE",
            GameKey::Galaxy => "GALAXY",
            GameKey::Pong => "PONG",
            GameKey::Slide => "SLIDE",
            GameKey::Stack => "STACK",
            GameKey::Breaker => "BREAKER",
            GameKey::Racing => "RACING",
            GameKey::Type => "TYPE",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        GameKey::ALL.into_iter().find(|k| k.id() == id)
    }

    pub fn metadata(&self) -> &'static GameMetadata {
        let index = CATALOG.iter().position(|m| m.key == *self).unwrap_or(0);
        &CATALOG[index]
    }
}

/// Static description of one game
#[derive(Debug, Clone, PartialEq)]
pub struct GameMetadata {
    pub key: GameKey,
    pub title: &'static str,
    pub description: &'static str,
    pub accent: Color,
    /// Control hint shown under the game area
    pub hint: &'static str,
    /// Whether the game waits for an explicit start press
    pub needs_start_prompt: bool,
}

const DEFAULT_HINT: &str = "USE ARROW KEYS OR TOUCH SIDES TO PLAY";

/// The catalog, in menu order
pub static CATALOG: [GameMetadata; 8] = [
    GameMetadata {
        key: GameKey::Racing,
        title: "NEON RACER",
        description: "Adrenaline rush. Dodge traffic at high speeds.",
        accent: palette::ORANGE,
        hint: "TAP LEFT/RIGHT TO STEER - HOLD UP FOR TURBO",
        needs_start_prompt: false,
    },
    GameMetadata {
        key: GameKey::Snake,
        title: "NEON SNAKE",
        description: "Classic redefined. Collect energy orbs in a cyber grid.",
        accent: palette::CYAN,
        hint: DEFAULT_HINT,
        needs_start_prompt: true,
    },
    GameMetadata {
        key: GameKey::Galaxy,
        title: "GALAXY RAID",
        description: "Defend humanity. Shoot down invaders in deep space.",
        accent: palette::PURPLE,
        hint: DEFAULT_HINT,
        needs_start_prompt: false,
    },
    GameMetadata {
        key: GameKey::Pong,
        title: "NEON PONG",
        description: "High-speed duels. Master the physics of light.",
        accent: palette::PINK,
        hint: DEFAULT_HINT,
        needs_start_prompt: false,
    },
    GameMetadata {
        key: GameKey::Breaker,
        title: "NEON BREAKER",
        description: "Smash the system. Explosive brick-breaking action.",
        accent: palette::RED,
        hint: DEFAULT_HINT,
        needs_start_prompt: false,
    },
    GameMetadata {
        key: GameKey::Slide,
        title: "NEON SLIDE",
        description: "Solve the matrix. A sliding puzzle challenge.",
        accent: palette::YELLOW,
        hint: "TAP A TILE NEXT TO THE GAP TO SLIDE IT",
        needs_start_prompt: false,
    },
    GameMetadata {
        key: GameKey::Stack,
        title: "NEON STACK",
        description: "Reach the sky. Precision stacking for high scores.",
        accent: palette::GREEN,
        hint: "TAP OR PRESS SPACE TO DROP",
        needs_start_prompt: false,
    },
    GameMetadata {
        key: GameKey::Type,
        title: "NEON TYPE",
        description: "Type fast. Destroy falling words before they land.",
        accent: palette::WHITE,
        hint: "TYPE THE FALLING WORDS",
        needs_start_prompt: false,
    },
];

const ROW_HEIGHT: f32 = 52.0;
const ROW_GAP: f32 = 6.0;
const TOP: f32 = 80.0;

/// Screen-space box of the `index`th menu row
pub fn row_rect(viewport: Viewport, index: usize) -> Rect {
    let width = (viewport.width - 40.0).clamp(1.0, 640.0);
    let x = (viewport.width - width) / 2.0;
    Rect::new(x, TOP + index as f32 * (ROW_HEIGHT + ROW_GAP), width, ROW_HEIGHT)
}

/// Which game a click at `point` selects, if any
pub fn hit_test(viewport: Viewport, point: Vec2) -> Option<GameKey> {
    GameKey::ALL
        .iter()
        .enumerate()
        .find(|(i, _)| row_rect(viewport, *i).contains(point))
        .map(|(_, key)| *key)
}

/// Draw the menu with stored best scores
pub fn draw(frame: &mut Frame, scores: &HighScores) {
    let viewport = frame.viewport;
    frame.label(
        Vec2::new(viewport.width / 2.0, 45.0),
        "NEON ARCADE",
        32.0,
        palette::CYAN,
    );

    for (i, meta) in CATALOG.iter().enumerate() {
        let row = row_rect(viewport, i);
        frame.stroke_rect(row, meta.accent.with_alpha(0.6), 1.5);
        frame.text(
            Vec2::new(row.pos.x + 14.0, row.pos.y + 18.0),
            format!("{}  {}", i + 1, meta.title),
            18.0,
            meta.accent,
            Align::Left,
        );
        if !viewport.is_narrow() {
            frame.text(
                Vec2::new(row.pos.x + 14.0, row.pos.y + 40.0),
                meta.description,
                12.0,
                palette::SLATE,
                Align::Left,
            );
        }
        frame.text(
            Vec2::new(row.max().x - 14.0, row.pos.y + ROW_HEIGHT / 2.0),
            format!("BEST {}", scores.get(meta.key)),
            14.0,
            palette::WHITE,
            Align::Right,
        );
    }
}
