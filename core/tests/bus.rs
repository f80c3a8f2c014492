//! Subscriber behaviour seen through a running engine.

use fireroom_core::{
    engine::GameEngine,
    event::{EventKind, GameEvent},
    text,
    types::Resource,
};
use std::cell::RefCell;
use std::rc::Rc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn panicking_subscriber_does_not_stop_the_game() {
    init_logging();
    let mut engine = GameEngine::build(31);

    engine.bus().subscribe_message(|msg| panic!("listener blew up on {msg}"));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    engine.bus().subscribe_message(move |msg| sink.borrow_mut().push(msg.to_string()));

    engine.start().unwrap();
    assert_eq!(engine.chop_wood().unwrap(), 10);
    assert_eq!(engine.resource(Resource::Wood), 20);

    engine.add_fuel();
    engine.run_until_idle(120_000);
    assert!(engine.is_settlement());

    // Later subscribers still got everything, including the story.
    let seen = seen.borrow();
    assert!(seen.iter().any(|m| m == text::WOOD_SCATTERED));
    assert!(seen.iter().any(|m| m == text::BUILDER_WORKERS));
    assert!(seen.len() >= 8);
}

#[test]
fn unsubscribed_handler_hears_nothing_more() {
    let mut engine = GameEngine::build(32);
    let count = Rc::new(RefCell::new(0usize));
    let sink = count.clone();
    let id = engine.bus().subscribe_resources(move |_| *sink.borrow_mut() += 1);
    assert_eq!(engine.bus().subscriber_count(EventKind::ResourcesChanged), 1);

    engine.chop_wood().unwrap();
    assert_eq!(*count.borrow(), 1);

    assert!(engine.bus().unsubscribe(id));
    assert!(!engine.bus().unsubscribe(id));
    assert_eq!(engine.bus().subscriber_count(EventKind::ResourcesChanged), 0);

    engine.chop_wood().unwrap();
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn typed_and_catch_all_subscribers_see_the_same_order() {
    let mut engine = GameEngine::build(34);
    let typed = Rc::new(RefCell::new(Vec::new()));
    let all = Rc::new(RefCell::new(Vec::new()));

    let t = typed.clone();
    engine.bus().subscribe_message(move |msg| t.borrow_mut().push(msg.to_string()));
    let a = all.clone();
    engine.bus().subscribe_all(move |e| {
        if let GameEvent::Message { text } = e {
            a.borrow_mut().push(text.clone());
        }
    });

    engine.start().unwrap();
    engine.add_fuel();
    engine.run_until_idle(120_000);

    assert!(!typed.borrow().is_empty());
    assert_eq!(*typed.borrow(), *all.borrow());
}
