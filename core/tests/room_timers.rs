//! Room status timer tests: heat decay and announcements per regime.

use fireroom_core::{
    engine::GameEngine,
    event::GameEvent,
    room_timers::Regime,
    text,
};
use std::cell::RefCell;
use std::rc::Rc;

fn status_messages(engine: &GameEngine) -> Rc<RefCell<Vec<String>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    engine.bus().subscribe_message(move |msg| {
        if text::ROOM_STATUS.contains(&msg) {
            sink.borrow_mut().push(msg.to_string());
        }
    });
    log
}

#[test]
fn ember_regime_cools_every_ten_seconds() {
    let mut engine = GameEngine::build(21);
    engine.start().unwrap();
    engine.advance(500); // intro
    assert_eq!(engine.room_timers().regime(), Regime::Ember);
    assert_eq!(engine.state().room_heat(), 2);

    let log = status_messages(&engine);
    engine.advance(9_999);
    assert!(log.borrow().is_empty());

    engine.advance(1);
    assert_eq!(engine.state().room_heat(), 1);
    assert_eq!(*log.borrow(), vec![text::ROOM_STATUS[1].to_string()]);

    engine.advance(30_000);
    assert_eq!(engine.state().room_heat(), 0, "heat bottoms out at zero");
    assert_eq!(
        *log.borrow(),
        vec![
            text::ROOM_STATUS[1].to_string(),
            text::ROOM_STATUS[0].to_string(),
            text::ROOM_STATUS[0].to_string(),
            text::ROOM_STATUS[0].to_string(),
        ]
    );
}

#[test]
fn no_timers_before_the_intro() {
    let mut engine = GameEngine::build(22);
    assert_eq!(engine.room_timers().regime(), Regime::Stopped);
    engine.advance(60_000);
    assert_eq!(engine.state().room_heat(), 2);
    assert_eq!(engine.snapshot().pending_tasks, 0);
}

#[test]
fn settlement_switches_to_two_timers() {
    let mut engine = GameEngine::build(23);
    engine.start().unwrap();
    engine.add_fuel(); // heat 3; story starts
    engine.advance(25_000); // ember decays at 10.5s and 20.5s; settlement at 25s

    assert!(engine.is_settlement());
    assert_eq!(engine.room_timers().regime(), Regime::Settlement);
    assert_eq!(engine.room_timers().active_timers().len(), 2);
    assert_eq!(engine.state().room_heat(), 1);

    let log = status_messages(&engine);

    // The cancelled ember timer would have fired at 30.5s.
    engine.advance(29_999);
    assert!(log.borrow().is_empty());
    assert_eq!(engine.state().room_heat(), 1);

    // 55s: announcement only.
    engine.advance(1);
    assert_eq!(*log.borrow(), vec![text::ROOM_STATUS[1].to_string()]);
    assert_eq!(engine.state().room_heat(), 1);

    // 85s: both timers are due. The cooling timer was queued at 25s, the
    // announcement re-queued at 55s, so cooling goes first.
    engine.advance(30_000);
    assert_eq!(engine.state().room_heat(), 0);
    assert_eq!(
        *log.borrow(),
        vec![
            text::ROOM_STATUS[1].to_string(),
            text::ROOM_STATUS[0].to_string(),
            text::ROOM_STATUS[0].to_string(),
        ]
    );
}

#[test]
fn announcements_never_duplicate_after_the_switch() {
    let mut engine = GameEngine::build(24);
    engine.start().unwrap();
    engine.add_fuel();
    engine.advance(25_000);

    let log = status_messages(&engine);
    engine.advance(600_000);
    // 30s timer: 20 firings. 60s timer: 10 firings.
    assert_eq!(log.borrow().len(), 30);
}

#[test]
fn stopping_cancels_room_timers() {
    let mut engine = GameEngine::build(25);
    engine.start().unwrap();
    engine.advance(500);
    engine.stop_room_timers();
    assert_eq!(engine.room_timers().regime(), Regime::Stopped);

    let events = Rc::new(RefCell::new(0usize));
    let sink = events.clone();
    engine.bus().subscribe_all(move |e| {
        if matches!(e, GameEvent::Message { .. }) {
            *sink.borrow_mut() += 1;
        }
    });
    engine.advance(120_000);
    assert_eq!(*events.borrow(), 0);
}
