//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time and RNG seeding
//! - Storage backend selection (LocalStorage on web, files on native)

use crate::persistence::KeyValueStore;

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// A seed for a new game instance
pub fn fresh_seed() -> u64 {
    let ms = now_ms() as u64;
    // Mix with a random draw so two restarts in the same millisecond differ
    ms ^ rand::random::<u64>().rotate_left(17)
}

/// The persistent store for this platform
#[cfg(target_arch = "wasm32")]
pub fn default_store() -> Box<dyn KeyValueStore> {
    Box::new(crate::persistence::LocalStore::new())
}

/// The persistent store for this platform.
///
/// `NEON_ARCADE_DATA` overrides the data directory.
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> Box<dyn KeyValueStore> {
    let dir = std::env::var_os("NEON_ARCADE_DATA")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("neon-arcade"));
    let store = crate::persistence::FileStore::new(dir);
    log::info!("Using data directory {}", store.dir().display());
    Box::new(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_seeds_differ() {
        assert_ne!(fresh_seed(), fresh_seed());
        assert!(now_ms() > 0.0);
    }
}
