//! Lifecycle properties every game must hold under arbitrary input

use neon_arcade::games;
use neon_arcade::input::{InputEvent, Key, PointerKind};
use neon_arcade::sim::{EventQueue, GameEvent, GameLoop, Ramp, RunStatus, Viewport};
use neon_arcade::{GameKey, Settings};
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = Key> {
    prop_oneof![
        Just(Key::Left),
        Just(Key::Right),
        Just(Key::Up),
        Just(Key::Down),
        Just(Key::Space),
        Just(Key::Enter),
        prop::char::range('A', 'Z').prop_map(Key::Char),
    ]
}

fn event_strategy() -> impl Strategy<Value = InputEvent> {
    let kind = prop_oneof![Just(PointerKind::Mouse), Just(PointerKind::Touch)];
    prop_oneof![
        key_strategy().prop_map(InputEvent::KeyDown),
        key_strategy().prop_map(InputEvent::KeyUp),
        (0.0f32..800.0, 0.0f32..600.0, kind.clone()).prop_map(|(x, y, kind)| InputEvent::PointerDown { x, y, kind }),
        (0.0f32..800.0, 0.0f32..600.0, kind.clone()).prop_map(|(x, y, kind)| InputEvent::PointerMove { x, y, kind }),
        kind.prop_map(|kind| InputEvent::PointerUp { kind }),
        "[a-z]{1,3}".prop_map(InputEvent::Text),
    ]
}

fn game_strategy() -> impl Strategy<Value = GameKey> {
    prop::sample::select(GameKey::ALL.to_vec())
}

/// Each script entry is an input followed by that many idle ticks
fn script_strategy() -> impl Strategy<Value = Vec<(InputEvent, u8)>> {
    prop::collection::vec((event_strategy(), 0u8..40), 1..60)
}

fn started(key: GameKey, seed: u64) -> (GameLoop, Vec<GameEvent>) {
    let mut game_loop = GameLoop::new(games::create(key, seed, Viewport::default(), &Settings::default()));
    let mut queue = EventQueue::default();
    game_loop.start(&mut queue);
    (game_loop, queue.events)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn game_over_reported_once_and_scores_never_drop(
        key in game_strategy(),
        seed in any::<u64>(),
        script in script_strategy(),
    ) {
        let (mut game_loop, mut events) = started(key, seed);
        for (event, idle) in script {
            game_loop.push_input(event);
            for _ in 0..=idle {
                events.extend(game_loop.step_events());
            }
        }

        let mut last = 0;
        let mut over_at = None;
        for (i, event) in events.iter().enumerate() {
            let score = match *event {
                GameEvent::ScoreChanged(s) => s,
                GameEvent::GameOver(s) => {
                    prop_assert!(over_at.is_none(), "second game over");
                    over_at = Some(i);
                    s
                }
            };
            prop_assert!(score >= last, "score dropped from {} to {}", last, score);
            last = score;
        }
        if let Some(i) = over_at {
            prop_assert_eq!(i, events.len() - 1, "report after game over");
            prop_assert_eq!(game_loop.status(), RunStatus::GameOver);
            prop_assert!(game_loop.drain_events(1.0).is_empty());
        }
    }

    #[test]
    fn unmounted_loop_stays_silent(
        key in game_strategy(),
        seed in any::<u64>(),
        script in script_strategy(),
    ) {
        let (mut game_loop, _) = started(key, seed);
        game_loop.unmount();
        for (event, idle) in script {
            game_loop.push_input(event);
            for _ in 0..=idle {
                prop_assert!(game_loop.step_events().is_empty());
            }
        }
        prop_assert_eq!(game_loop.ticks(), 0);
    }

    #[test]
    fn fresh_instance_starts_clean(key in game_strategy(), seed in any::<u64>()) {
        let game = games::create(key, seed, Viewport::default(), &Settings::default());
        prop_assert_eq!(game.status(), RunStatus::NotStarted);
        prop_assert_eq!(game.score(), 0);
        prop_assert_eq!(game.key(), key);
    }

    #[test]
    fn frame_never_exceeds_substep_cap(key in game_strategy(), dt in prop::num::f32::ANY) {
        let (mut game_loop, _) = started(key, 3);
        let mut queue = EventQueue::default();
        let ran = game_loop.frame(dt, &mut queue);
        prop_assert!(ran <= neon_arcade::consts::MAX_SUBSTEPS);
    }

    #[test]
    fn ramps_are_monotone(
        base in 0.5f32..100.0,
        step in 0.0001f32..1.0,
        a in 0u64..100_000,
        b in 0u64..100_000,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let rising = Ramp::rising(base, step, base * 3.0);
        prop_assert!(rising.at(lo) <= rising.at(hi));
        prop_assert!(rising.at(hi) <= base * 3.0);

        let falling = Ramp::falling(base, step, base / 4.0);
        prop_assert!(falling.at(lo) >= falling.at(hi));
        prop_assert!(falling.at(hi) >= base / 4.0);
    }
}
