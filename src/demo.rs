//! Headless attract-mode run of every game
//!
//! Used by the native binary. Runs play against an in-memory store so the
//! player's saved best scores are never touched.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::app::Arcade;
use crate::consts::SIM_DT;
use crate::input::{InputEvent, Key};
use crate::menu::GameKey;
use crate::persistence::MemoryStore;
use crate::sim::Viewport;

/// Outcome of one game's demo run
#[derive(Debug, Clone, PartialEq)]
pub struct DemoRun {
    pub key: GameKey,
    pub ticks: u32,
    pub score: u64,
    /// Best in the demo's own table
    pub best: u64,
}

/// Mash random keys at every game for up to `seconds` of simulated time
pub fn run_all(seed: u64, seconds: u32) -> (Arcade, Vec<DemoRun>) {
    let mut arcade = Arcade::new(Box::new(MemoryStore::new()), Viewport::default());
    let mut rng = Pcg32::seed_from_u64(seed);
    let keys = [Key::Left, Key::Right, Key::Up, Key::Down, Key::Space];
    let mut runs = Vec::with_capacity(GameKey::ALL.len());

    for key in GameKey::ALL {
        arcade.select(key, rng.random());
        if key.metadata().needs_start_prompt {
            arcade.push_input(InputEvent::KeyDown(Key::Enter));
        }

        let mut ticks = 0;
        while ticks < seconds * 60 && arcade.is_playing() {
            // A new key every third of a second
            if ticks % 20 == 0 {
                let pressed = keys[rng.random_range(0..keys.len())];
                arcade.push_input(InputEvent::KeyDown(pressed));
                if key == GameKey::Type {
                    let letter = rng.random_range(b'A'..=b'Z') as char;
                    arcade.push_input(InputEvent::KeyDown(Key::Char(letter)));
                }
            } else if ticks % 20 == 10 {
                for k in keys {
                    arcade.push_input(InputEvent::KeyUp(k));
                }
            }
            arcade.frame(SIM_DT);
            ticks += 1;
        }

        let score = arcade.shell().map_or(0, |s| s.current_score());
        arcade.back_to_menu();
        log::debug!("Demo {} ran {} ticks", key.metadata().title, ticks);
        runs.push(DemoRun {
            key,
            ticks,
            score,
            best: arcade.scores().get(key),
        });
    }
    (arcade, runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScores;

    #[test]
    fn test_runs_every_game_in_catalog_order() {
        let (_, runs) = run_all(9, 2);
        let keys: Vec<GameKey> = runs.iter().map(|r| r.key).collect();
        assert_eq!(keys, GameKey::ALL.to_vec());
        assert!(runs.iter().all(|r| r.ticks <= 120));
    }

    #[test]
    fn test_demo_scores_stay_in_memory() {
        let (arcade, runs) = run_all(9, 2);
        let table = HighScores::load(arcade.store());
        for run in runs {
            assert_eq!(table.get(run.key), run.best);
        }
    }
}
