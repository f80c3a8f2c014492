//! Room status timers: the fire slowly dies and the room says so.
//!
//! Two regimes, switched by phase_changed notifications:
//!   ember:      one timer; every period, cool the room one level and announce.
//!   settlement: an announcement-only timer plus a slower cooling timer,
//!               running independently of each other.
//!
//! Starting a regime always cancels every timer of the previous one first.

use crate::{
    config::RoomTimerConfig,
    event::GameEvent,
    scheduler::{Scheduler, TimerId},
    service::MessageService,
    state::GameState,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomTimer {
    EmberDecay,
    SettlementStatus,
    SettlementDecay,
}

impl RoomTimer {
    fn cools_room(&self) -> bool {
        matches!(self, Self::EmberDecay | Self::SettlementDecay)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    Stopped,
    Ember,
    Settlement,
}

pub struct RoomStatusTimerManager {
    config: RoomTimerConfig,
    regime: Regime,
    active: Vec<TimerId>,
}

impl RoomStatusTimerManager {
    pub fn new(config: RoomTimerConfig) -> Self {
        Self { config, regime: Regime::Stopped, active: Vec::new() }
    }

    pub fn regime(&self) -> Regime {
        self.regime
    }

    pub fn active_timers(&self) -> &[TimerId] {
        &self.active
    }

    pub fn start_ember<T: Clone + From<RoomTimer>>(&mut self, scheduler: &mut Scheduler<T>) {
        self.stop(scheduler);
        let id = scheduler.schedule_repeating(
            self.config.ember_decay_period,
            RoomTimer::EmberDecay.into(),
        );
        self.active.push(id);
        self.regime = Regime::Ember;
        log::debug!("room timers: ember regime every {}ms", self.config.ember_decay_period);
    }

    pub fn start_settlement<T: Clone + From<RoomTimer>>(&mut self, scheduler: &mut Scheduler<T>) {
        self.stop(scheduler);
        let status = scheduler.schedule_repeating(
            self.config.settlement_status_period,
            RoomTimer::SettlementStatus.into(),
        );
        let decay = scheduler.schedule_repeating(
            self.config.settlement_decay_period,
            RoomTimer::SettlementDecay.into(),
        );
        self.active.extend([status, decay]);
        self.regime = Regime::Settlement;
        log::debug!(
            "room timers: settlement regime, status every {}ms, decay every {}ms",
            self.config.settlement_status_period,
            self.config.settlement_decay_period
        );
    }

    pub fn stop<T: Clone>(&mut self, scheduler: &mut Scheduler<T>) {
        for id in self.active.drain(..) {
            scheduler.cancel(id);
        }
        self.regime = Regime::Stopped;
    }

    /// React to a published event. Only phase changes matter here.
    pub fn observe<T: Clone + From<RoomTimer>>(
        &mut self,
        event: &GameEvent,
        scheduler: &mut Scheduler<T>,
    ) {
        if let GameEvent::PhaseChanged { settlement } = event {
            if *settlement {
                self.start_settlement(scheduler);
            } else {
                self.start_ember(scheduler);
            }
        }
    }

    pub fn fire(&self, timer: RoomTimer, state: &mut GameState, messages: &MessageService) {
        if timer.cools_room() {
            state.decrease_room_heat();
        }
        log::trace!("room timer {timer:?}: heat={}", state.room_heat());
        messages.send_message(state.room_status_message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switching_regimes_cancels_previous_timers() {
        let mut scheduler: Scheduler<RoomTimer> = Scheduler::new();
        let mut timers = RoomStatusTimerManager::new(RoomTimerConfig::default());

        timers.start_ember(&mut scheduler);
        let ember = timers.active_timers().to_vec();
        assert_eq!(ember.len(), 1);

        timers.observe(&GameEvent::PhaseChanged { settlement: true }, &mut scheduler);
        assert_eq!(timers.regime(), Regime::Settlement);
        assert_eq!(timers.active_timers().len(), 2);
        assert!(!scheduler.is_active(ember[0]));
        assert_eq!(scheduler.pending(), 2);
    }

    #[test]
    fn restarting_the_same_regime_does_not_duplicate() {
        let mut scheduler: Scheduler<RoomTimer> = Scheduler::new();
        let mut timers = RoomStatusTimerManager::new(RoomTimerConfig::default());
        timers.start_settlement(&mut scheduler);
        timers.start_settlement(&mut scheduler);
        assert_eq!(scheduler.pending(), 2);

        timers.stop(&mut scheduler);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(timers.regime(), Regime::Stopped);
    }

    #[test]
    fn unrelated_events_are_ignored() {
        let mut scheduler: Scheduler<RoomTimer> = Scheduler::new();
        let mut timers = RoomStatusTimerManager::new(RoomTimerConfig::default());
        timers.observe(&GameEvent::Message { text: "hi".into() }, &mut scheduler);
        assert_eq!(timers.regime(), Regime::Stopped);
        assert_eq!(scheduler.pending(), 0);
    }
}
