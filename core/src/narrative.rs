//! Scripted story sequences.
//!
//! A sequence is a fixed list of named steps, each with a delay and a
//! message, plus a transition to run once the last step has fired. Only
//! the current step is ever scheduled: step n+1 is queued from inside
//! step n's firing, so steps can never overlap or reorder.
//!
//! Each sequence runs at most once per game.

use crate::{config::NarrativeConfig, service::MessageService, text, types::Millis};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceId {
    /// The stranger stumbles in and recovers; ends by opening the settlement.
    Stranger,
    /// The builder explains what can be made.
    Builder,
}

/// What happens after a sequence's final step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    EnterSettlement,
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeStep {
    pub name:    &'static str,
    pub delay:   Millis,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeSequence {
    pub id:          SequenceId,
    pub steps:       Vec<NarrativeStep>,
    pub on_complete: Transition,
}

impl NarrativeSequence {
    pub fn stranger(config: &NarrativeConfig) -> Self {
        Self {
            id: SequenceId::Stranger,
            steps: vec![
                NarrativeStep { name: "arrives", delay: config.stranger_arrival, message: text::STRANGER_ARRIVAL },
                NarrativeStep { name: "mumbles", delay: config.stranger_mumble,  message: text::STRANGER_MUMBLE },
                NarrativeStep { name: "calms",   delay: config.stranger_calm,    message: text::STRANGER_CALM },
                NarrativeStep { name: "helps",   delay: config.stranger_help,    message: text::STRANGER_HELP },
            ],
            on_complete: Transition::EnterSettlement,
        }
    }

    pub fn builder(config: &NarrativeConfig) -> Self {
        Self {
            id: SequenceId::Builder,
            steps: vec![
                NarrativeStep { name: "traps",   delay: config.builder_traps,   message: text::BUILDER_TRAPS },
                NarrativeStep { name: "cart",    delay: config.builder_cart,    message: text::BUILDER_CART },
                NarrativeStep { name: "workers", delay: config.builder_workers, message: text::BUILDER_WORKERS },
            ],
            on_complete: Transition::Nothing,
        }
    }

    /// Sum of all step delays.
    pub fn total_duration(&self) -> Millis {
        self.steps.iter().map(|s| s.delay).sum()
    }
}

/// Position within a sequence; the payload of a scheduled narrative task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub sequence: SequenceId,
    pub step:     usize,
}

/// What the caller must do after a step fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Queue `next` to fire `delay` ms from now.
    Schedule { delay: Millis, next: Cursor },
    Finished(Transition),
}

pub struct Narrator {
    stranger: NarrativeSequence,
    builder:  NarrativeSequence,
    started:  BTreeSet<SequenceId>,
}

impl Narrator {
    pub fn new(config: &NarrativeConfig) -> Self {
        Self {
            stranger: NarrativeSequence::stranger(config),
            builder:  NarrativeSequence::builder(config),
            started:  BTreeSet::new(),
        }
    }

    pub fn sequence(&self, id: SequenceId) -> &NarrativeSequence {
        match id {
            SequenceId::Stranger => &self.stranger,
            SequenceId::Builder  => &self.builder,
        }
    }

    pub fn has_started(&self, id: SequenceId) -> bool {
        self.started.contains(&id)
    }

    /// Mark `id` as started and return its first step to schedule.
    /// None if it already ran (or is running) or has no steps.
    pub fn begin(&mut self, id: SequenceId) -> Option<(Millis, Cursor)> {
        if !self.started.insert(id) {
            log::warn!("sequence {id:?} already started; ignoring");
            return None;
        }
        let first = self.sequence(id).steps.first()?;
        log::debug!("sequence {id:?} begins, first step '{}' in {}ms", first.name, first.delay);
        Some((first.delay, Cursor { sequence: id, step: 0 }))
    }

    /// Deliver the step at `cursor` and say what comes next.
    pub fn fire(&self, cursor: Cursor, messages: &MessageService) -> Advance {
        let sequence = self.sequence(cursor.sequence);
        let Some(step) = sequence.steps.get(cursor.step) else {
            return Advance::Finished(sequence.on_complete);
        };

        log::debug!("sequence {:?} step '{}'", cursor.sequence, step.name);
        messages.send_message(step.message);

        let next = cursor.step + 1;
        match sequence.steps.get(next) {
            Some(following) => Advance::Schedule {
                delay: following.delay,
                next:  Cursor { sequence: cursor.sequence, step: next },
            },
            None => Advance::Finished(sequence.on_complete),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::EventBus;
    use crate::event::GameEvent;

    #[test]
    fn default_timings() {
        let config = NarrativeConfig::default();
        let stranger = NarrativeSequence::stranger(&config);
        let delays: Vec<Millis> = stranger.steps.iter().map(|s| s.delay).collect();
        assert_eq!(delays, vec![10_000, 5_000, 5_000, 5_000]);
        assert_eq!(stranger.total_duration(), 25_000);

        let builder = NarrativeSequence::builder(&config);
        let delays: Vec<Millis> = builder.steps.iter().map(|s| s.delay).collect();
        assert_eq!(delays, vec![15_000, 5_000, 5_000]);
    }

    #[test]
    fn sequence_begins_once() {
        let mut narrator = Narrator::new(&NarrativeConfig::default());
        assert!(narrator.begin(SequenceId::Stranger).is_some());
        assert!(narrator.begin(SequenceId::Stranger).is_none());
        assert!(narrator.has_started(SequenceId::Stranger));
        assert!(!narrator.has_started(SequenceId::Builder));
    }

    #[test]
    fn walking_the_builder_sequence() {
        let narrator = Narrator::new(&NarrativeConfig::default());
        let bus = EventBus::new();
        let messages = MessageService::new(&bus);

        let mut cursor = Cursor { sequence: SequenceId::Builder, step: 0 };
        let mut fired = 0;
        loop {
            fired += 1;
            match narrator.fire(cursor, &messages) {
                Advance::Schedule { next, .. } => cursor = next,
                Advance::Finished(t) => {
                    assert_eq!(t, Transition::Nothing);
                    break;
                }
            }
        }
        assert_eq!(fired, 3);

        let texts: Vec<String> = bus
            .take_journal()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::Message { text } => Some(text),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec![text::BUILDER_TRAPS, text::BUILDER_CART, text::BUILDER_WORKERS]);
    }
}
