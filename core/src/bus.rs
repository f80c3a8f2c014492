//! The event bus: typed publish/subscribe registries.
//!
//! RULES:
//!   - Handlers run synchronously, in registration order, on the caller's turn.
//!   - Each handler invocation is isolated: a panicking handler is logged
//!     and skipped, and dispatch continues with the next one.
//!   - Subscribing returns a SubscriptionId; unsubscribing uses that token.
//!   - A handler registered during a dispatch first runs on the next publish.
//!   - A handler that publishes on its own channel while it is being
//!     dispatched reaches only handlers registered during that dispatch.
//!
//! Every publish is also appended to a journal the engine drains to feed
//! its internal reactors (see engine.rs).

use crate::{
    event::{EventKind, GameEvent},
    types::{BuildingMap, ResourceMap},
};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, VecDeque};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Token returned by every `subscribe_*` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Handler<T> = Box<dyn FnMut(&T)>;

struct Registry<T: ?Sized> {
    channel:  &'static str,
    handlers: RefCell<Vec<(SubscriptionId, Handler<T>)>>,
    live:     RefCell<BTreeSet<SubscriptionId>>,
}

impl<T: ?Sized> Registry<T> {
    fn new(channel: &'static str) -> Self {
        Self {
            channel,
            handlers: RefCell::new(Vec::new()),
            live:     RefCell::new(BTreeSet::new()),
        }
    }

    fn subscribe(&self, id: SubscriptionId, handler: Handler<T>) {
        self.live.borrow_mut().insert(id);
        self.handlers.borrow_mut().push((id, handler));
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        if !self.live.borrow_mut().remove(&id) {
            return false;
        }
        // While dispatching, the handler is outside the list; the merge
        // in `publish` drops it because it is no longer live.
        self.handlers.borrow_mut().retain(|(h, _)| *h != id);
        true
    }

    fn len(&self) -> usize {
        self.live.borrow().len()
    }

    fn publish(&self, payload: &T) {
        let mut dispatching = std::mem::take(&mut *self.handlers.borrow_mut());

        for (id, handler) in dispatching.iter_mut() {
            if !self.live.borrow().contains(id) {
                continue;
            }
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| handler(payload))) {
                log::error!(
                    "{} subscriber {:?} panicked: {}",
                    self.channel,
                    id,
                    panic_message(panic.as_ref())
                );
            }
        }

        let mut handlers = self.handlers.borrow_mut();
        let added_meanwhile = std::mem::take(&mut *handlers);
        let live = self.live.borrow();
        dispatching.retain(|(id, _)| live.contains(id));
        dispatching.extend(added_meanwhile);
        *handlers = dispatching;
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic>"
    }
}

pub struct EventBus {
    next_id:   Cell<u64>,
    message:   Registry<str>,
    resources: Registry<ResourceMap>,
    buildings: Registry<BuildingMap>,
    phase:     Registry<bool>,
    scene:     Registry<str>,
    all:       Registry<GameEvent>,
    journal:   RefCell<VecDeque<GameEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            next_id:   Cell::new(0),
            message:   Registry::new(EventKind::Message.name()),
            resources: Registry::new(EventKind::ResourcesChanged.name()),
            buildings: Registry::new(EventKind::BuildingsChanged.name()),
            phase:     Registry::new(EventKind::PhaseChanged.name()),
            scene:     Registry::new(EventKind::SceneChanged.name()),
            all:       Registry::new("all"),
            journal:   RefCell::new(VecDeque::new()),
        }
    }

    // ── Subscribing ────────────────────────────────

    pub fn subscribe_message(&self, handler: impl FnMut(&str) + 'static) -> SubscriptionId {
        let id = self.mint_id();
        self.message.subscribe(id, Box::new(handler));
        id
    }

    pub fn subscribe_resources(
        &self,
        handler: impl FnMut(&ResourceMap) + 'static,
    ) -> SubscriptionId {
        let id = self.mint_id();
        self.resources.subscribe(id, Box::new(handler));
        id
    }

    pub fn subscribe_buildings(
        &self,
        handler: impl FnMut(&BuildingMap) + 'static,
    ) -> SubscriptionId {
        let id = self.mint_id();
        self.buildings.subscribe(id, Box::new(handler));
        id
    }

    pub fn subscribe_phase(&self, handler: impl FnMut(&bool) + 'static) -> SubscriptionId {
        let id = self.mint_id();
        self.phase.subscribe(id, Box::new(handler));
        id
    }

    pub fn subscribe_scene(&self, handler: impl FnMut(&str) + 'static) -> SubscriptionId {
        let id = self.mint_id();
        self.scene.subscribe(id, Box::new(handler));
        id
    }

    /// Receive every publish, across all channels, in publish order.
    pub fn subscribe_all(&self, handler: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        let id = self.mint_id();
        self.all.subscribe(id, Box::new(handler));
        id
    }

    /// Remove a subscription from whichever channel holds it.
    /// Returns false for unknown or already-removed tokens.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.message.unsubscribe(id)
            || self.resources.unsubscribe(id)
            || self.buildings.unsubscribe(id)
            || self.phase.unsubscribe(id)
            || self.scene.unsubscribe(id)
            || self.all.unsubscribe(id)
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        match kind {
            EventKind::Message          => self.message.len(),
            EventKind::ResourcesChanged => self.resources.len(),
            EventKind::BuildingsChanged => self.buildings.len(),
            EventKind::PhaseChanged     => self.phase.len(),
            EventKind::SceneChanged     => self.scene.len(),
        }
    }

    // ── Publishing ─────────────────────────────────

    pub fn publish_message(&self, text: &str) {
        self.message.publish(text);
        self.record(GameEvent::Message { text: text.to_string() });
    }

    /// Publishes an owned snapshot; later mutations never leak into it.
    pub fn publish_resources(&self, resources: &ResourceMap) {
        self.resources.publish(resources);
        self.record(GameEvent::ResourcesChanged { resources: resources.clone() });
    }

    pub fn publish_buildings(&self, buildings: &BuildingMap) {
        self.buildings.publish(buildings);
        self.record(GameEvent::BuildingsChanged { buildings: buildings.clone() });
    }

    pub fn publish_phase(&self, settlement: bool) {
        self.phase.publish(&settlement);
        self.record(GameEvent::PhaseChanged { settlement });
    }

    pub fn publish_scene(&self, scene: &str) {
        self.scene.publish(scene);
        self.record(GameEvent::SceneChanged { scene: scene.to_string() });
    }

    /// Take every event published since the last call, oldest first.
    pub fn take_journal(&self) -> Vec<GameEvent> {
        self.journal.borrow_mut().drain(..).collect()
    }

    fn record(&self, event: GameEvent) {
        log::trace!("publish {}", event.kind().name());
        self.all.publish(&event);
        self.journal.borrow_mut().push_back(event);
    }

    fn mint_id(&self) -> SubscriptionId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        SubscriptionId(id)
    }
}

impl Default for EventBus {
    fn default() -> Self { Self::new() }
}
