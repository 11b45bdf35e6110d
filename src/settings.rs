//! Player settings and preferences
//!
//! Persisted separately from high scores. Missing fields fall back to their
//! defaults so older saved settings keep loading.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StoreError};

/// Snake step speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SnakeSpeed {
    Normal,
    #[default]
    Medium,
    High,
}

impl SnakeSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnakeSpeed::Normal => "Normal",
            SnakeSpeed::Medium => "Medium",
            SnakeSpeed::High => "High",
        }
    }

    /// Time between snake steps
    pub fn interval_ms(&self) -> f32 {
        match self {
            SnakeSpeed::Normal => 350.0,
            SnakeSpeed::Medium => 200.0,
            SnakeSpeed::High => 90.0,
        }
    }
}

/// Player settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Gameplay ===
    /// Snake step speed
    pub snake_speed: SnakeSpeed,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute everything
    pub muted: bool,

    // === Accessibility ===
    /// Galaxy Raid: frozen starfield, no explosion bursts
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snake_speed: SnakeSpeed::Medium,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "neon-arcade-settings";

    /// Parse stored JSON. Malformed data yields defaults.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Ignoring malformed settings: {}", e);
                Self::default()
            }
        }
    }

    /// Clamp volumes back into range
    pub fn sanitized(mut self) -> Self {
        let fix = |v: f32, default: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { default };
        self.master_volume = fix(self.master_volume, 0.8);
        self.sfx_volume = fix(self.sfx_volume, 1.0);
        self
    }

    /// Load settings from a store
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(json) => {
                log::info!("Loaded settings");
                Self::from_json(&json)
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to a store
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        let json = serde_json::to_string(self)?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_snake_speed_intervals() {
        assert_eq!(SnakeSpeed::Normal.interval_ms(), 350.0);
        assert_eq!(SnakeSpeed::Medium.interval_ms(), 200.0);
        assert_eq!(SnakeSpeed::High.interval_ms(), 90.0);
        assert_eq!(SnakeSpeed::default(), SnakeSpeed::Medium);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings = Settings::from_json(r#"{"muted": true}"#);
        assert!(settings.muted);
        assert_eq!(settings.snake_speed, SnakeSpeed::Medium);
        assert_eq!(settings.master_volume, 0.8);
    }

    #[test]
    fn test_malformed_settings_fall_back() {
        assert_eq!(Settings::from_json("{not json"), Settings::default());
        let loud = Settings::from_json(r#"{"master_volume": 7.0}"#);
        assert_eq!(loud.master_volume, 1.0);
    }

    #[test]
    fn test_settings_save_load() {
        let mut store = MemoryStore::default();
        let settings = Settings {
            snake_speed: SnakeSpeed::High,
            reduced_motion: true,
            ..Settings::default()
        };
        settings.save(&mut store).unwrap();
        assert_eq!(Settings::load(&store), settings);
    }
}
