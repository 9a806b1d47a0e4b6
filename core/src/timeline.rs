use crate::event::EventKind;
use serde::{Deserialize, Serialize};

/// Represents a discrete happening in a typer's life.
///
/// `at_ms` is measured from the construction of the typer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimelineEvent {
    /// An event left the queue and began running
    EventStarted {
        index: usize,
        kind: EventKind,
        at_ms: u64,
    },
    /// The running event completed
    EventFinished {
        index: usize,
        kind: EventKind,
        at_ms: u64,
    },
    TextChanged { text: String, at_ms: u64 },
    TypingChanged { is_typing: bool, at_ms: u64 },
    /// The queue drained
    Halted { at_ms: u64 },
    /// The typer was stopped from outside
    Stopped { at_ms: u64 },
}

impl TimelineEvent {
    pub fn at_ms(&self) -> u64 {
        match self {
            TimelineEvent::EventStarted { at_ms, .. }
            | TimelineEvent::EventFinished { at_ms, .. }
            | TimelineEvent::TextChanged { at_ms, .. }
            | TimelineEvent::TypingChanged { at_ms, .. }
            | TimelineEvent::Halted { at_ms }
            | TimelineEvent::Stopped { at_ms } => *at_ms,
        }
    }
}

/// A sequential record of a typer session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Timeline {
    pub events: Vec<TimelineEvent>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TimelineEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Sort events by timestamp, keeping insertion order for ties
    pub fn sort(&mut self) {
        self.events.sort_by_key(TimelineEvent::at_ms);
    }

    /// Every text the listener saw, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TimelineEvent::TextChanged { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Kinds of the events that started, in execution order.
    pub fn executed(&self) -> Vec<EventKind> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TimelineEvent::EventStarted { kind, .. } => Some(*kind),
                _ => None,
            })
            .collect()
    }
}
