//! Test utilities for autotyper.
//!
//! A [`Probe`] is a listener that remembers every notification together with
//! the virtual time it arrived at. Pair it with
//! `#[tokio::test(start_paused = true)]` and [`Probe::until_ms`] to check the
//! text at exact points of a sequence.
//!
//! ```rust,ignore
//! let (typer, probe) = typer_with_probe("");
//! let typer = typer.type_str("hi").start();
//! probe.until_ms(150).await;
//! assert_texts!(probe, ["", "h"]);
//! ```

use autotyper_core::listener::TyperListener;
use autotyper_runtime::AutoTyper;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Typing(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub at: Duration,
    pub frame: Frame,
}

/// Recording listener.
pub struct Probe {
    origin: Instant,
    records: Mutex<Vec<Record>>,
}

impl Probe {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            origin: Instant::now(),
            records: Mutex::new(Vec::new()),
        })
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn texts(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter_map(|r| match &r.frame {
                Frame::Text(text) => Some(text.clone()),
                Frame::Typing(_) => None,
            })
            .collect()
    }

    pub fn typing_flags(&self) -> Vec<bool> {
        self.records
            .lock()
            .iter()
            .filter_map(|r| match r.frame {
                Frame::Typing(flag) => Some(flag),
                Frame::Text(_) => None,
            })
            .collect()
    }

    pub fn last_text(&self) -> Option<String> {
        self.texts().pop()
    }

    /// Records that arrived strictly after `ms` from the probe's creation.
    pub fn after_ms(&self, ms: u64) -> Vec<Record> {
        let at = Duration::from_millis(ms);
        self.records
            .lock()
            .iter()
            .filter(|r| r.at > at)
            .cloned()
            .collect()
    }

    /// Sleep until `ms` after the probe's creation, letting the typer run.
    pub async fn until_ms(&self, ms: u64) {
        tokio::time::sleep_until(self.origin + Duration::from_millis(ms)).await;
    }

    fn push(&self, frame: Frame) {
        let at = self.origin.elapsed();
        self.records.lock().push(Record { at, frame });
    }
}

impl TyperListener for Probe {
    fn on_text_changed(&self, text: &str) {
        self.push(Frame::Text(text.to_string()));
    }

    fn on_typing_changed(&self, is_typing: bool) {
        self.push(Frame::Typing(is_typing));
    }
}

/// A fresh probe and a typer reporting to it.
pub fn typer_with_probe(initial_text: &str) -> (AutoTyper, Arc<Probe>) {
    let probe = Probe::new();
    let typer = AutoTyper::with_listener(initial_text, probe.clone());
    (typer, probe)
}

/// Assert the full list of texts a probe saw.
#[macro_export]
macro_rules! assert_texts {
    ($probe:expr, [$($text:expr),* $(,)?]) => {{
        let expected: Vec<String> = vec![$(String::from($text)),*];
        assert_eq!($probe.texts(), expected);
    }};
}
