//! Event - The Unit of Work of a Typer Queue
//!
//! An `Event` only carries configuration. It never runs itself: the runtime
//! driver interprets the queue one event at a time, which keeps this crate
//! free of timers and executors.
//!
//! # Variants
//! - `Type`: append the text one grapheme per tick
//! - `Remove`: drop graphemes from the end, one per tick
//! - `Sleep`: wait without touching the text
//! - `Loop`: replay an earlier segment of the queue

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Text typed by a `Type` event that was queued without any text.
pub const DEFAULT_TO_TYPE: &str = "Hello World";

/// Default cadence of typing and removal ticks.
pub const DEFAULT_LETTER_DELAY: Duration = Duration::from_millis(100);

/// Default length of a `Sleep` event.
pub const DEFAULT_SLEEP: Duration = Duration::from_millis(1000);

/// Smallest delay a timer is ever armed with.
pub const MIN_DELAY: Duration = Duration::from_millis(1);

/// Clamp a configured delay so a zero interval can never be armed.
pub fn clamp_delay(delay: Duration) -> Duration {
    delay.max(MIN_DELAY)
}

/// Serialize durations as whole milliseconds.
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeConfig {
    pub to_type: String,
    #[serde(with = "millis")]
    pub time_between_letter: Duration,
}

impl TypeConfig {
    pub fn new(to_type: impl Into<String>) -> Self {
        Self {
            to_type: to_type.into(),
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, time_between_letter: Duration) -> Self {
        self.time_between_letter = time_between_letter;
        self
    }

    /// The tick interval actually used by the driver.
    pub fn delay(&self) -> Duration {
        clamp_delay(self.time_between_letter)
    }
}

impl Default for TypeConfig {
    fn default() -> Self {
        Self {
            to_type: DEFAULT_TO_TYPE.to_string(),
            time_between_letter: DEFAULT_LETTER_DELAY,
        }
    }
}

/// Removal configuration.
///
/// `char_count` counts grapheme clusters. `None` and `Some(0)` both mean
/// "remove everything accumulated so far".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveConfig {
    pub char_count: Option<usize>,
    #[serde(with = "millis")]
    pub time_between_letter: Duration,
}

impl RemoveConfig {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn chars(char_count: usize) -> Self {
        Self {
            char_count: Some(char_count),
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, time_between_letter: Duration) -> Self {
        self.time_between_letter = time_between_letter;
        self
    }

    pub fn removes_all(&self) -> bool {
        matches!(self.char_count, None | Some(0))
    }

    pub fn delay(&self) -> Duration {
        clamp_delay(self.time_between_letter)
    }
}

impl Default for RemoveConfig {
    fn default() -> Self {
        Self {
            char_count: None,
            time_between_letter: DEFAULT_LETTER_DELAY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepConfig {
    #[serde(with = "millis")]
    pub ms: Duration,
}

impl SleepConfig {
    pub fn new(ms: Duration) -> Self {
        Self { ms }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn delay(&self) -> Duration {
        clamp_delay(self.ms)
    }
}

impl Default for SleepConfig {
    fn default() -> Self {
        Self { ms: DEFAULT_SLEEP }
    }
}

/// Which part of the queue a `Loop` event replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoopScope {
    /// Every event queued before the loop.
    #[default]
    FromStart,
    /// Only the events queued after the previous loop event.
    SincePreviousLoop,
}

/// Loop configuration.
///
/// `count` is the total number of runs of the segment, the original pass
/// included: `Some(2)` replays once. `None` repeats forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoopConfig {
    pub count: Option<u32>,
    pub scope: LoopScope,
}

impl LoopConfig {
    pub fn times(count: u32) -> Self {
        Self {
            count: Some(count),
            ..Default::default()
        }
    }

    pub fn forever() -> Self {
        Self::default()
    }

    pub fn with_scope(mut self, scope: LoopScope) -> Self {
        self.scope = scope;
        self
    }

    /// Number of replays after the original pass, `None` when infinite.
    pub fn replays(&self) -> Option<u32> {
        self.count.map(|count| count.saturating_sub(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Type,
    Remove,
    Sleep,
    Loop,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Type => "type",
            EventKind::Remove => "remove",
            EventKind::Sleep => "sleep",
            EventKind::Loop => "loop",
        };
        f.write_str(name)
    }
}

/// One queued unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    Type(TypeConfig),
    Remove(RemoveConfig),
    Sleep(SleepConfig),
    Loop(LoopConfig),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Type(_) => EventKind::Type,
            Event::Remove(_) => EventKind::Remove,
            Event::Sleep(_) => EventKind::Sleep,
            Event::Loop(_) => EventKind::Loop,
        }
    }

    /// Only `Type` events raise the is-typing flag.
    pub fn is_typing(&self) -> bool {
        matches!(self, Event::Type(_))
    }

    /// Short human readable description used in logs and schematics.
    pub fn label(&self) -> String {
        match self {
            Event::Type(c) => format!("type {:?} every {}ms", c.to_type, c.delay().as_millis()),
            Event::Remove(c) => match c.char_count {
                Some(n) if n > 0 => format!("remove {n} every {}ms", c.delay().as_millis()),
                _ => format!("remove all every {}ms", c.delay().as_millis()),
            },
            Event::Sleep(c) => format!("sleep {}ms", c.delay().as_millis()),
            Event::Loop(c) => match c.count {
                Some(n) => format!("loop {n}x"),
                None => "loop forever".to_string(),
            },
        }
    }
}

impl From<TypeConfig> for Event {
    fn from(config: TypeConfig) -> Self {
        Event::Type(config)
    }
}

impl From<RemoveConfig> for Event {
    fn from(config: RemoveConfig) -> Self {
        Event::Remove(config)
    }
}

impl From<SleepConfig> for Event {
    fn from(config: SleepConfig) -> Self {
        Event::Sleep(config)
    }
}

impl From<LoopConfig> for Event {
    fn from(config: LoopConfig) -> Self {
        Event::Loop(config)
    }
}

/// Index of the first event replayed by the loop at `loop_index`.
///
/// The segment is `start..loop_index`; it is empty when the loop has
/// nothing in front of it.
pub fn segment_start(events: &[Event], loop_index: usize) -> usize {
    let scope = match events.get(loop_index) {
        Some(Event::Loop(config)) => config.scope,
        _ => return loop_index,
    };
    match scope {
        LoopScope::FromStart => 0,
        LoopScope::SincePreviousLoop => events[..loop_index]
            .iter()
            .rposition(|e| matches!(e, Event::Loop(_)))
            .map(|i| i + 1)
            .unwrap_or(0),
    }
}
