use super::Preset;
use autotyper_core::event::{Event, LoopConfig, RemoveConfig, SleepConfig, TypeConfig};
use autotyper_core::text::grapheme_count;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fast typing with a backspace of exactly the typed word.
///
/// Unlike [`WordCycle`](super::word_cycle::WordCycle) the removal counts
/// graphemes, so text shown before the word survives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Endless {
    pub words: Vec<String>,
    pub type_delay_ms: u64,
    pub backspace_after_ms: u64,
}

impl Endless {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

impl Default for Endless {
    fn default() -> Self {
        Self {
            words: Vec::new(),
            type_delay_ms: 50,
            backspace_after_ms: 800,
        }
    }
}

impl Preset for Endless {
    fn name(&self) -> &'static str {
        "endless"
    }

    fn events(&self) -> Vec<Event> {
        let delay = Duration::from_millis(self.type_delay_ms);
        let mut events: Vec<Event> = Vec::with_capacity(self.words.len() * 3 + 1);
        for word in self.words.iter().filter(|w| !w.is_empty()) {
            events.push(TypeConfig::new(word.as_str()).with_delay(delay).into());
            events.push(SleepConfig::from_millis(self.backspace_after_ms).into());
            events.push(
                RemoveConfig::chars(grapheme_count(word))
                    .with_delay(delay)
                    .into(),
            );
        }
        if !events.is_empty() {
            events.push(LoopConfig::forever().into());
        }
        events
    }
}
