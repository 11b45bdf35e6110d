//! Best score per game
//!
//! Persisted as a flat JSON object keyed by game id, e.g. `{"SNAKE": 12}`.
//! Loading is forgiving: malformed data means no scores, unknown keys are
//! dropped and missing keys read as zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::menu::GameKey;
use crate::persistence::{KeyValueStore, StoreError};
use crate::sanitize_score;

/// Best score for each game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    scores: BTreeMap<GameKey, u64>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "neon-arcade-scores";

    /// Create an empty table (all zeros)
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored best for `key` (0 if never played)
    pub fn get(&self, key: GameKey) -> u64 {
        self.scores.get(&key).copied().unwrap_or(0)
    }

    /// Record a finished run. Returns true if it beat the stored best.
    pub fn record(&mut self, key: GameKey, score: u64) -> bool {
        if score > self.get(key) {
            self.scores.insert(key, score);
            true
        } else {
            false
        }
    }

    /// Parse stored JSON, keeping whatever entries are usable
    pub fn from_json(json: &str) -> Self {
        let raw: BTreeMap<String, serde_json::Value> = match serde_json::from_str(json) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Ignoring malformed high scores: {}", e);
                return Self::new();
            }
        };

        let scores = raw
            .iter()
            .filter_map(|(id, value)| {
                let key = GameKey::from_id(id)?;
                let score = value
                    .as_u64()
                    .or_else(|| value.as_f64().map(sanitize_score))
                    .unwrap_or(0);
                Some((key, score))
            })
            .collect();
        Self { scores }
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load high scores from a store
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(json) => {
                let scores = Self::from_json(&json);
                log::info!("Loaded high scores for {} games", scores.scores.len());
                scores
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save high scores to a store
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        store.set(Self::STORAGE_KEY, &self.to_json()?)?;
        log::info!("High scores saved");
        Ok(())
    }
}
