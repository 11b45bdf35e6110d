//! Menu, shell and high-score flow through the public `Arcade` API

use neon_arcade::consts::SIM_DT;
use neon_arcade::games::StackerGame;
use neon_arcade::games::stacker::PERFECT_TOLERANCE;
use neon_arcade::input::{InputEvent, Key, PointerKind};
use neon_arcade::persistence::{KeyValueStore, MemoryStore};
use neon_arcade::sim::{Game, RunStatus, Viewport};
use neon_arcade::{Arcade, GameKey, HighScores, Screen, Settings, SnakeSpeed};

fn arcade_with(store: MemoryStore) -> Arcade {
    Arcade::new(Box::new(store), Viewport::default())
}

/// Stacker's first drop lands far from the base and ends the run at 0
fn lose_stack(arcade: &mut Arcade) {
    arcade.push_input(InputEvent::KeyDown(Key::Space));
    arcade.frame(SIM_DT * 1.5);
}

/// Play the running stacker with `placements` perfect drops, then let the
/// next block slide off. A local stacker fed the same taps tells us when
/// the block lines up with the tower.
fn play_stack(arcade: &mut Arcade, placements: u64) -> u64 {
    let mut twin = StackerGame::new(0, arcade.viewport());
    twin.start();
    let tap = InputEvent::KeyDown(Key::Space);
    let mut placed = 0;
    for _ in 0..20_000 {
        if let Some(score) = arcade.shell().and_then(|s| s.final_score()) {
            return score;
        }
        let top = *twin.stack.last().expect("tower has a base");
        if placed < placements && (twin.current.x - top.x).abs() <= PERFECT_TOLERANCE {
            arcade.push_input(tap.clone());
            twin.handle_input(&tap, &mut Vec::new());
            placed += 1;
        }
        arcade.frame(SIM_DT);
        twin.tick(SIM_DT, &mut Vec::new());
    }
    panic!("stacker run never ended");
}

#[test]
fn test_finished_runs_update_stored_best() {
    let store = MemoryStore::with_entry(HighScores::STORAGE_KEY, r#"{"STACK": 5}"#);
    let mut arcade = arcade_with(store);
    arcade.select(GameKey::Stack, 1);

    // A worse run leaves the stored best alone
    assert_eq!(play_stack(&mut arcade, 3), 3);
    assert_eq!(arcade.scores().get(GameKey::Stack), 5);
    assert_eq!(HighScores::load(arcade.store()).get(GameKey::Stack), 5);

    // A better run is recorded and written back
    arcade.push_input(InputEvent::KeyDown(Key::Enter));
    assert_eq!(play_stack(&mut arcade, 7), 7);
    assert_eq!(arcade.scores().get(GameKey::Stack), 7);
    assert_eq!(arcade.shell().map(|s| s.best_display()), Some(7));
    assert_eq!(HighScores::load(arcade.store()).get(GameKey::Stack), 7);
}

#[test]
fn test_high_score_only_replaced_by_better_run() {
    let mut scores = HighScores::from_json(r#"{"STACK": 500}"#);
    assert!(!scores.record(GameKey::Stack, 300));
    assert_eq!(scores.get(GameKey::Stack), 500);
    assert!(scores.record(GameKey::Stack, 700));
    assert_eq!(scores.get(GameKey::Stack), 700);

    let mut store = MemoryStore::new();
    scores.save(&mut store).expect("memory store never fails");
    let reloaded = HighScores::load(&store);
    assert_eq!(reloaded.get(GameKey::Stack), 700);
    assert_eq!(reloaded.get(GameKey::Snake), 0);
}

#[test]
fn test_stored_best_shown_and_kept_after_worse_run() {
    let store = MemoryStore::with_entry(HighScores::STORAGE_KEY, r#"{"STACK": 500}"#);
    let mut arcade = arcade_with(store);
    arcade.select(GameKey::Stack, 11);
    assert_eq!(arcade.shell().map(|s| s.best_display()), Some(500));

    lose_stack(&mut arcade);
    let shell = arcade.shell().expect("mounted");
    assert!(shell.is_game_over());
    assert_eq!(shell.final_score(), Some(0));
    assert_eq!(arcade.scores().get(GameKey::Stack), 500);
}

#[test]
fn test_malformed_storage_falls_back_to_defaults() {
    let mut store = MemoryStore::with_entry(HighScores::STORAGE_KEY, "{not json");
    store
        .set(Settings::STORAGE_KEY, "[1, 2, 3]")
        .expect("memory store never fails");
    let arcade = arcade_with(store);
    assert_eq!(arcade.scores(), &HighScores::new());
    assert_eq!(arcade.settings(), &Settings::default());
}

#[test]
fn test_restart_builds_new_instance_at_zero() {
    let mut arcade = arcade_with(MemoryStore::new());
    arcade.select(GameKey::Stack, 1);
    lose_stack(&mut arcade);

    arcade.push_input(InputEvent::KeyDown(Key::Space));
    let shell = arcade.shell().expect("mounted");
    assert_eq!(shell.instance_id(), 1);
    assert_eq!(shell.current_score(), 0);
    assert_eq!(shell.status(), RunStatus::Running);
}

#[test]
fn test_escape_unmounts_and_returns_to_menu() {
    let mut arcade = arcade_with(MemoryStore::new());
    arcade.push_input(InputEvent::KeyDown(Key::Char('1')));
    assert_eq!(arcade.shell().map(|s| s.key()), Some(GameKey::Racing));
    arcade.frame(0.05);

    arcade.push_input(InputEvent::KeyDown(Key::Escape));
    assert!(matches!(arcade.screen(), Screen::Menu));
    // Frames on the menu do nothing
    arcade.frame(1.0);
    assert!(!arcade.is_playing());
}

#[test]
fn test_snake_prompt_then_play() {
    let mut arcade = arcade_with(MemoryStore::new());
    arcade.select(GameKey::Snake, 5);
    assert!(arcade.shell().is_some_and(|s| s.awaiting_start()));
    arcade.frame(0.5);
    assert!(arcade.shell().is_some_and(|s| s.awaiting_start()));

    arcade.push_input(InputEvent::PointerDown {
        x: 10.0,
        y: 10.0,
        kind: PointerKind::Touch,
    });
    assert!(arcade.is_playing());
}

#[test]
fn test_speed_button_updates_settings() {
    let mut arcade = arcade_with(MemoryStore::new());
    arcade.select(GameKey::Snake, 5);
    arcade.push_input(InputEvent::Button(neon_arcade::input::UiButton::Speed(SnakeSpeed::Normal)));
    assert_eq!(arcade.settings().snake_speed, SnakeSpeed::Normal);
}

#[test]
fn test_resize_reaches_running_game() {
    let mut arcade = arcade_with(MemoryStore::new());
    arcade.select(GameKey::Breaker, 2);
    arcade.resize(Viewport::new(360.0, 640.0));
    assert_eq!(arcade.viewport(), Viewport::new(360.0, 640.0));
    arcade.frame(0.05);
    assert!(arcade.is_playing());
}
