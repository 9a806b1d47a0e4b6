use super::Preset;
use autotyper_core::event::{Event, LoopConfig, RemoveConfig, SleepConfig, TypeConfig};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Type each word, hold it, erase it, forever. The landing page header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct WordCycle {
    pub words: Vec<String>,
    pub type_delay_ms: u64,
    pub remove_delay_ms: u64,
    pub pause_ms: u64,
}

impl WordCycle {
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

    pub fn with_type_delay(mut self, ms: u64) -> Self {
        self.type_delay_ms = ms;
        self
    }

    pub fn with_pause(mut self, ms: u64) -> Self {
        self.pause_ms = ms;
        self
    }
}

impl Default for WordCycle {
    fn default() -> Self {
        Self {
            words: vec![
                "nothing to type".to_string(),
                "are you sure".to_string(),
                "really?".to_string(),
            ],
            type_delay_ms: 100,
            remove_delay_ms: 100,
            pause_ms: 500,
        }
    }
}

impl Preset for WordCycle {
    fn name(&self) -> &'static str {
        "word_cycle"
    }

    fn events(&self) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .words
            .iter()
            .filter(|w| !w.is_empty())
            .flat_map(|word| {
                [
                    Event::from(
                        TypeConfig::new(word.as_str())
                            .with_delay(Duration::from_millis(self.type_delay_ms)),
                    ),
                    Event::from(SleepConfig::from_millis(self.pause_ms)),
                    Event::from(
                        RemoveConfig::all().with_delay(Duration::from_millis(self.remove_delay_ms)),
                    ),
                ]
            })
            .collect();

        if !events.is_empty() {
            events.push(LoopConfig::forever().into());
        }
        events
    }
}
