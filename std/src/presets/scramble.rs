use super::Preset;
use autotyper_core::event::{Event, TypeConfig};
use rand::distributions::Alphanumeric;
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Types a run of random alphanumeric characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Scramble {
    pub len: usize,
    pub delay_ms: u64,
}

impl Scramble {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            ..Default::default()
        }
    }

    /// Draw the characters from `rng`.
    pub fn events_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Event> {
        if self.len == 0 {
            return Vec::new();
        }
        let text: String = rng
            .sample_iter(&Alphanumeric)
            .take(self.len)
            .map(char::from)
            .collect();
        vec![
            TypeConfig::new(text)
                .with_delay(Duration::from_millis(self.delay_ms))
                .into(),
        ]
    }
}

impl Default for Scramble {
    fn default() -> Self {
        Self {
            len: 16,
            delay_ms: 500,
        }
    }
}

impl Preset for Scramble {
    fn name(&self) -> &'static str {
        "scramble"
    }

    fn events(&self) -> Vec<Event> {
        self.events_with(&mut rand::thread_rng())
    }
}
