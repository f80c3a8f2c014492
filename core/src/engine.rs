//! The game engine: owns the model and drives everything that happens to it.
//!
//! FLOW:
//!   1. A player command (or a due scheduled task) runs against the model
//!      through the narrow services.
//!   2. Every notification it causes is published on the bus immediately,
//!      reaching subscribers in registration order.
//!   3. The bus journal is then drained and routed to internal reactors
//!      (the room status timers), which may reschedule work.
//!
//! RULES:
//!   - All mutation happens on the caller's turn; nothing here blocks.
//!   - Time only moves through `advance` / `run_until_idle`.
//!   - All randomness flows through the RngBank.

use crate::{
    bus::EventBus,
    command::PlayerCommand,
    config::GameConfig,
    error::{GameError, GameResult},
    narrative::{Advance, Cursor, Narrator, SequenceId, Transition},
    rng::{RngBank, RngSlot, StreamRng},
    room::RoomManager,
    room_timers::{RoomStatusTimerManager, RoomTimer},
    scheduler::Scheduler,
    service::{MessageService, ResourceService, Stockpile},
    snapshot::GameSnapshot,
    state::GameState,
    text,
    trap::{TrapHaul, TrapManager},
    types::{BuildOutcome, Building, Millis, Resource},
    vehicle::VehicleManager,
};

/// Longest step `try_advance` accepts: one hour of game time.
pub const MAX_ADVANCE: Millis = 60 * 60 * 1000;

/// Work the engine schedules for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Opening messages and the first room timer regime.
    Intro,
    Narrative(Cursor),
    Room(RoomTimer),
}

impl From<RoomTimer> for Task {
    fn from(timer: RoomTimer) -> Self {
        Self::Room(timer)
    }
}

impl From<Cursor> for Task {
    fn from(cursor: Cursor) -> Self {
        Self::Narrative(cursor)
    }
}

pub struct GameEngine {
    config:      GameConfig,
    state:       GameState,
    bus:         EventBus,
    scheduler:   Scheduler<Task>,
    narrator:    Narrator,
    room_timers: RoomStatusTimerManager,
    traps:       TrapManager,
    vehicles:    VehicleManager,
    rooms:       RoomManager,
    fire_rng:    StreamRng,
    started:     bool,
}

impl GameEngine {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let rng_bank = RngBank::new(seed);
        Self {
            state:       GameState::new(),
            bus:         EventBus::new(),
            scheduler:   Scheduler::new(),
            narrator:    Narrator::new(&config.narrative),
            room_timers: RoomStatusTimerManager::new(config.room_timers.clone()),
            traps:       TrapManager::new(config.costs.trap, rng_bank.for_slot(RngSlot::Traps)),
            vehicles:    VehicleManager::new(config.costs.cart, &config.yields),
            rooms:       RoomManager::new(config.costs.hut, config.yields.hut_population_capacity),
            fire_rng:    rng_bank.for_slot(RngSlot::Fire),
            started:     false,
            config,
        }
    }

    /// Engine with the canonical constants.
    pub fn build(seed: u64) -> Self {
        Self::new(GameConfig::default(), seed)
    }

    /// Subscribe here; this is the only supported way to observe the game.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn now(&self) -> Millis {
        self.scheduler.now()
    }

    /// Seed the starting wood (silently) and queue the intro.
    pub fn start(&mut self) -> GameResult<()> {
        if self.started {
            return Err(GameError::AlreadyStarted);
        }
        self.started = true;

        let wood = self.config.start.starting_wood;
        if wood > 0 {
            self.state.increase_resource(Resource::Wood, wood)?;
        }
        self.scheduler.schedule_once(self.config.start.intro_delay, Task::Intro);
        log::info!("game started at t={}ms", self.now());
        Ok(())
    }

    pub fn apply(&mut self, command: PlayerCommand) -> GameResult<()> {
        log::debug!("t={}ms command {}", self.now(), command.name());
        match command {
            PlayerCommand::AddFuel    => { self.add_fuel(); }
            PlayerCommand::ChopWood   => { self.chop_wood()?; }
            PlayerCommand::CheckTraps => { self.check_traps()?; }
            PlayerCommand::BuildHut   => { self.build_hut(); }
            PlayerCommand::BuildTrap  => { self.build_trap(); }
            PlayerCommand::BuildCart  => { self.build_cart(); }
        }
        Ok(())
    }

    // ── Player actions ─────────────────────────────

    /// Stoke the fire. Free in the ember phase; costs wood afterwards.
    /// The very first stoke sets the stranger's story in motion.
    /// Returns false if the fire could not be fed.
    pub fn add_fuel(&mut self) -> bool {
        if self.state.is_game_phase2() {
            let cost = self.config.costs.fuel;
            let paid = {
                let mut resources = ResourceService::new(&mut self.state, &self.bus);
                resources.resource(Resource::Wood) >= cost
                    && resources.decrease_resource(Resource::Wood, cost)
            };
            if !paid {
                MessageService::new(&self.bus).send_message(text::WOOD_SHORTAGE);
                self.route_events();
                return false;
            }
            self.stoke();
        } else {
            self.stoke();
            self.trigger_game_progression();
        }
        self.route_events();
        true
    }

    /// Returns the wood gained.
    pub fn chop_wood(&mut self) -> GameResult<u32> {
        let mut resources = ResourceService::new(&mut self.state, &self.bus);
        let gain = self.vehicles.wood_gain_amount(&resources);
        resources.increase_resource(Resource::Wood, gain)?;
        MessageService::new(&self.bus).send_message(text::WOOD_SCATTERED);
        self.route_events();
        Ok(gain)
    }

    pub fn build_hut(&mut self) -> BuildOutcome {
        let mut resources = ResourceService::new(&mut self.state, &self.bus);
        let messages = MessageService::new(&self.bus);
        let outcome = self.rooms.build_hut(&mut resources, &messages);
        self.route_events();
        outcome
    }

    pub fn build_trap(&mut self) -> BuildOutcome {
        let mut resources = ResourceService::new(&mut self.state, &self.bus);
        let messages = MessageService::new(&self.bus);
        let outcome = self.traps.build_trap(&mut resources, &messages);
        self.route_events();
        outcome
    }

    pub fn build_cart(&mut self) -> BuildOutcome {
        let mut resources = ResourceService::new(&mut self.state, &self.bus);
        let messages = MessageService::new(&self.bus);
        let outcome = self.vehicles.build_cart(&mut resources, &messages);
        self.route_events();
        outcome
    }

    /// None when there are no traps to check.
    pub fn check_traps(&mut self) -> GameResult<Option<TrapHaul>> {
        let mut resources = ResourceService::new(&mut self.state, &self.bus);
        let messages = MessageService::new(&self.bus);
        let haul = self.traps.check_traps(&mut resources, &messages)?;
        self.route_events();
        Ok(haul)
    }

    // ── Time ───────────────────────────────────────

    /// Move time forward by `millis`, running every task that falls due,
    /// in due order. Returns how many tasks ran. Time saturates at
    /// `Millis::MAX`.
    pub fn advance(&mut self, millis: Millis) -> usize {
        let until = self.now().saturating_add(millis);
        let mut fired = 0;
        while let Some(due) = self.scheduler.pop_due(until) {
            self.dispatch(due.task);
            fired += 1;
        }
        self.scheduler.advance_to(until);
        fired
    }

    /// `advance`, refusing steps longer than `MAX_ADVANCE` so a single
    /// call never replays an unbounded number of timer firings.
    pub fn try_advance(&mut self, millis: Millis) -> GameResult<usize> {
        if millis > MAX_ADVANCE {
            log::warn!("refusing to advance {millis}ms (max {MAX_ADVANCE}ms)");
            return Err(GameError::AdvanceTooLong { millis, max: MAX_ADVANCE });
        }
        Ok(self.advance(millis))
    }

    /// Keep advancing to the next due task while any one-shot task
    /// (intro or story step) is pending, for at most `limit` ms.
    /// Returns the time reached.
    pub fn run_until_idle(&mut self, limit: Millis) -> Millis {
        let deadline = self.now().saturating_add(limit);
        while self.scheduler.pending_one_shots() > 0 {
            match self.scheduler.next_due() {
                Some(due) if due <= deadline => {
                    let step = due - self.now();
                    self.advance(step);
                }
                _ => break,
            }
        }
        self.now()
    }

    /// Cancel every room timer. Story steps already queued still run.
    pub fn stop_room_timers(&mut self) {
        self.room_timers.stop(&mut self.scheduler);
    }

    // ── Queries (tooling and tests) ────────────────

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn resource(&self, resource: Resource) -> u32 {
        self.state.resource(resource)
    }

    pub fn building(&self, building: Building) -> u32 {
        self.state.building(building)
    }

    /// Count for a resource given by its external name, e.g. "wood".
    pub fn resource_named(&self, name: &str) -> GameResult<u32> {
        Ok(self.resource(name.parse()?))
    }

    /// Count for a building given by its external name, e.g. "hut".
    pub fn building_named(&self, name: &str) -> GameResult<u32> {
        Ok(self.building(name.parse()?))
    }

    pub fn is_settlement(&self) -> bool {
        self.state.is_game_phase2()
    }

    pub fn population_capacity(&self) -> u32 {
        self.rooms.population_capacity(&self.state)
    }

    pub fn wood_gain_amount(&self) -> u32 {
        self.vehicles.wood_gain_amount(&self.state)
    }

    pub fn narrator(&self) -> &Narrator {
        &self.narrator
    }

    pub fn room_timers(&self) -> &RoomStatusTimerManager {
        &self.room_timers
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            now:                 self.now(),
            started:             self.started,
            settlement:          self.state.is_game_phase2(),
            room_heat:           self.state.room_heat(),
            room_status:         self.state.room_status_message().to_string(),
            resources:           self.state.resources().clone(),
            buildings:           self.state.buildings().clone(),
            population_capacity: self.population_capacity(),
            room_timers:         self.room_timers.regime(),
            pending_tasks:       self.scheduler.pending(),
        }
    }

    // ── Internals ──────────────────────────────────

    fn stoke(&mut self) {
        self.state.increase_room_heat();
        log::debug!("stoked, heat={} ({} stream)", self.state.room_heat(), self.fire_rng.name());
        MessageService::new(&self.bus).send_random_message(&text::FIRE_STOKED, &mut self.fire_rng);
    }

    /// The phase flag flips before anything is scheduled, so no later
    /// stoke can start the story a second time.
    fn trigger_game_progression(&mut self) {
        self.state.set_game_phase2(true);
        self.begin_sequence(SequenceId::Stranger);
    }

    fn trigger_game_phase2(&mut self) {
        self.state.set_game_phase2(true);
        ResourceService::new(&mut self.state, &self.bus)
            .reset_resources(self.config.start.settlement_wood);
        log::info!("t={}ms settlement phase begins", self.now());
        self.bus.publish_phase(true);
        self.begin_sequence(SequenceId::Builder);
    }

    fn begin_sequence(&mut self, id: SequenceId) {
        if let Some((delay, cursor)) = self.narrator.begin(id) {
            self.scheduler.schedule_once(delay, cursor.into());
        }
    }

    fn dispatch(&mut self, task: Task) {
        log::trace!("t={}ms dispatch {task:?}", self.now());
        match task {
            Task::Intro => {
                MessageService::new(&self.bus).send_messages(&[text::FIRE_DEAD, text::ROOM_STATUS[0]]);
                self.room_timers.start_ember(&mut self.scheduler);
            }
            Task::Narrative(cursor) => {
                let advance = self.narrator.fire(cursor, &MessageService::new(&self.bus));
                match advance {
                    Advance::Schedule { delay, next } => {
                        self.scheduler.schedule_once(delay, next.into());
                    }
                    Advance::Finished(Transition::EnterSettlement) => self.trigger_game_phase2(),
                    Advance::Finished(Transition::Nothing) => {
                        log::debug!("sequence {:?} finished", cursor.sequence);
                    }
                }
            }
            Task::Room(timer) => {
                self.room_timers.fire(timer, &mut self.state, &MessageService::new(&self.bus));
            }
        }
        self.route_events();
    }

    /// Feed everything published since the last drain to internal reactors.
    fn route_events(&mut self) {
        for event in self.bus.take_journal() {
            self.room_timers.observe(&event, &mut self.scheduler);
        }
    }
}
