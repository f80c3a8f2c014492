//! Story and phase-transition tests.
//!
//! Timeline with the default config, first stoke at t=0:
//!   10s stranger arrives, 15s mumbles, 20s calms, 25s offers help
//!   25s settlement begins (wood reset to 5)
//!   40s / 45s / 50s builder dialogue

use fireroom_core::{
    engine::GameEngine,
    event::GameEvent,
    narrative::SequenceId,
    text,
    types::{Resource, ResourceMap},
};
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<(u64, GameEvent)>>>;

fn record(engine: &GameEngine) -> Rc<RefCell<Vec<GameEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    engine.bus().subscribe_all(move |e| sink.borrow_mut().push(e.clone()));
    log
}

/// Advance in 1s steps so every event can be stamped with a whole second.
fn run_stamped(engine: &mut GameEngine, log: &Rc<RefCell<Vec<GameEvent>>>, seconds: u64) -> Log {
    let stamped: Log = Rc::new(RefCell::new(Vec::new()));
    for _ in 0..seconds {
        engine.advance(1_000);
        let now = engine.now();
        for event in log.borrow_mut().drain(..) {
            stamped.borrow_mut().push((now, event));
        }
    }
    stamped
}

fn started_engine(seed: u64) -> GameEngine {
    let mut engine = GameEngine::build(seed);
    engine.start().expect("start");
    engine
}

#[test]
fn one_stoke_leads_to_exactly_one_phase_change() {
    let mut engine = started_engine(11);
    let log = record(&engine);

    assert!(engine.add_fuel());
    engine.run_until_idle(120_000);

    let log = log.borrow();
    let phases: Vec<&GameEvent> =
        log.iter().filter(|e| matches!(e, GameEvent::PhaseChanged { .. })).collect();
    assert_eq!(phases, vec![&GameEvent::PhaseChanged { settlement: true }]);

    let stock: Vec<&ResourceMap> = log
        .iter()
        .filter_map(|e| match e {
            GameEvent::ResourcesChanged { resources } => Some(resources),
            _ => None,
        })
        .collect();
    let expected: ResourceMap = [(Resource::Wood, 5)].into_iter().collect();
    assert_eq!(stock, vec![&expected]);
    assert!(engine.is_settlement());
}

#[test]
fn story_steps_fire_in_order_at_their_delays() {
    let mut engine = started_engine(12);
    let log = record(&engine);
    engine.add_fuel();
    log.borrow_mut().clear();

    let stamped = run_stamped(&mut engine, &log, 55);
    let story: Vec<(u64, String)> = stamped
        .borrow()
        .iter()
        .filter_map(|(t, e)| match e {
            GameEvent::Message { text: msg }
                if !text::ROOM_STATUS.contains(&msg.as_str()) && msg != text::FIRE_DEAD =>
            {
                Some((*t, msg.clone()))
            }
            _ => None,
        })
        .collect();

    assert_eq!(
        story,
        vec![
            (10_000, text::STRANGER_ARRIVAL.to_string()),
            (15_000, text::STRANGER_MUMBLE.to_string()),
            (20_000, text::STRANGER_CALM.to_string()),
            (25_000, text::STRANGER_HELP.to_string()),
            (40_000, text::BUILDER_TRAPS.to_string()),
            (45_000, text::BUILDER_CART.to_string()),
            (50_000, text::BUILDER_WORKERS.to_string()),
        ]
    );

    let phase_at: Vec<u64> = stamped
        .borrow()
        .iter()
        .filter(|(_, e)| matches!(e, GameEvent::PhaseChanged { .. }))
        .map(|(t, _)| *t)
        .collect();
    assert_eq!(phase_at, vec![25_000]);
}

#[test]
fn help_message_precedes_the_settlement_reset() {
    let mut engine = started_engine(13);
    let log = record(&engine);
    engine.add_fuel();
    engine.advance(25_000);

    let log = log.borrow();
    let help = log
        .iter()
        .position(|e| *e == GameEvent::Message { text: text::STRANGER_HELP.into() })
        .expect("help message");
    let reset = log
        .iter()
        .position(|e| matches!(e, GameEvent::ResourcesChanged { .. }))
        .expect("reset");
    let phase = log
        .iter()
        .position(|e| matches!(e, GameEvent::PhaseChanged { .. }))
        .expect("phase");
    assert!(help < reset && reset < phase);
}

#[test]
fn stoking_during_the_story_costs_wood_and_restarts_nothing() {
    let mut engine = started_engine(14);
    assert_eq!(engine.resource(Resource::Wood), 10);

    engine.add_fuel();
    assert!(engine.is_settlement());
    assert_eq!(engine.resource(Resource::Wood), 10, "first stoke is free");

    for _ in 0..3 {
        assert!(engine.add_fuel());
    }
    assert_eq!(engine.resource(Resource::Wood), 7);
    assert!(engine.narrator().has_started(SequenceId::Stranger));

    let log = record(&engine);
    engine.run_until_idle(120_000);
    let arrivals = log
        .borrow()
        .iter()
        .filter(|e| **e == GameEvent::Message { text: text::STRANGER_ARRIVAL.into() })
        .count();
    assert_eq!(arrivals, 1);
    assert_eq!(engine.resource(Resource::Wood), 5, "settlement resets the stock");
}

#[test]
fn settlement_fuel_costs_one_wood() {
    let mut engine = started_engine(15);
    engine.add_fuel();
    engine.advance(25_000);
    assert_eq!(engine.resource(Resource::Wood), 5);

    let heat = engine.state().room_heat();
    assert!(engine.add_fuel());
    assert_eq!(engine.resource(Resource::Wood), 4);
    assert_eq!(engine.state().room_heat(), (heat + 1).min(5));
}

#[test]
fn settlement_fuel_without_wood_is_refused() {
    let mut engine = started_engine(16);
    engine.add_fuel();
    engine.advance(25_000);
    for _ in 0..5 {
        assert!(engine.add_fuel());
    }
    assert_eq!(engine.resource(Resource::Wood), 0);

    let heat = engine.state().room_heat();
    let log = record(&engine);
    assert!(!engine.add_fuel());
    assert_eq!(engine.state().room_heat(), heat);
    assert_eq!(*log.borrow(), vec![GameEvent::Message { text: text::WOOD_SHORTAGE.into() }]);
}

#[test]
fn ember_stoke_picks_a_fire_message_and_warms_the_room() {
    let mut engine = GameEngine::build(17);
    let log = record(&engine);
    assert_eq!(engine.state().room_heat(), 2);

    engine.add_fuel();
    assert_eq!(engine.state().room_heat(), 3);
    match &log.borrow()[0] {
        GameEvent::Message { text: msg } => assert!(text::FIRE_STOKED.contains(&msg.as_str())),
        other => panic!("expected a fire message, got {other:?}"),
    };
}

#[test]
fn start_twice_is_an_error() {
    let mut engine = started_engine(18);
    assert!(engine.start().is_err());
}

#[test]
fn intro_runs_after_its_delay() {
    let mut engine = started_engine(19);
    let log = record(&engine);

    engine.advance(499);
    assert!(log.borrow().is_empty());

    engine.advance(1);
    assert_eq!(
        *log.borrow(),
        vec![
            GameEvent::Message { text: text::FIRE_DEAD.into() },
            GameEvent::Message { text: text::ROOM_STATUS[0].into() },
        ]
    );
}
