//! Same seed, same commands, same clock: same event log, byte for byte.

use fireroom_core::{command::PlayerCommand, engine::GameEngine, text};
use std::cell::RefCell;
use std::rc::Rc;

fn run_session(seed: u64) -> Vec<String> {
    let mut engine = GameEngine::build(seed);
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    engine.bus().subscribe_all(move |e| {
        sink.borrow_mut().push(serde_json::to_string(e).expect("serialize event"));
    });

    engine.start().unwrap();
    engine.advance(500);
    for _ in 0..6 {
        engine.apply(PlayerCommand::AddFuel).unwrap();
    }
    engine.run_until_idle(120_000);
    for _ in 0..10 {
        engine.apply(PlayerCommand::ChopWood).unwrap();
    }
    for _ in 0..5 {
        engine.apply(PlayerCommand::BuildTrap).unwrap();
    }
    for _ in 0..20 {
        engine.apply(PlayerCommand::CheckTraps).unwrap();
        engine.advance(7_000);
    }
    drop(engine);

    Rc::try_unwrap(log).expect("engine dropped").into_inner()
}

#[test]
fn equal_seeds_replay_identically() {
    let a = run_session(2024);
    let b = run_session(2024);
    assert!(!a.is_empty());
    assert_eq!(a, b);
}

#[test]
fn different_seeds_diverge() {
    assert_ne!(run_session(1), run_session(2));
}

#[test]
fn event_log_uses_tagged_json() {
    let log = run_session(7);
    let first: serde_json::Value = serde_json::from_str(&log[0]).unwrap();
    // Starting wood is seeded silently, so the intro speaks first.
    assert_eq!(first["type"], "message");
    assert_eq!(first["text"], text::FIRE_DEAD);
}
