//! Shared - State owned by one typer
//!
//! The handle and the driver task both hold an `Arc<Shared>`. Text and the
//! typing flag are only mutated here; listeners observe them through the
//! notification methods.
//!
//! Notifications run under a re-entrant gate. `stop()` takes the same gate
//! before flagging cancellation, so once it returns no listener call is in
//! flight and none will follow. A listener may call `stop()` itself.

use crate::timer::TimerSlot;
use autotyper_core::listener::TyperListener;
use autotyper_core::text;
use autotyper_core::timeline::{Timeline, TimelineEvent};
use parking_lot::{Mutex, ReentrantMutex};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;
use tokio::time::Instant;
use uuid::Uuid;

/// Lifecycle of a typer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Built, not started yet
    Idle,
    /// The driver is draining the queue
    Running,
    /// The queue drained
    Finished,
    /// Stopped from outside; terminal
    Stopped,
}

impl Phase {
    pub fn is_done(self) -> bool {
        matches!(self, Phase::Finished | Phase::Stopped)
    }
}

#[derive(Debug, Default)]
struct State {
    text: String,
    is_typing: bool,
}

pub(crate) struct Shared {
    pub(crate) id: Uuid,
    pub(crate) timer: TimerSlot,
    state: Mutex<State>,
    gate: ReentrantMutex<()>,
    cancelled: AtomicBool,
    listener: Arc<dyn TyperListener>,
    phase: watch::Sender<Phase>,
    timeline: Option<Mutex<Timeline>>,
    born: Instant,
}

impl Shared {
    pub(crate) fn new(
        initial_text: String,
        listener: Arc<dyn TyperListener>,
        record_timeline: bool,
    ) -> Self {
        let (phase, _) = watch::channel(Phase::Idle);
        Self {
            id: Uuid::new_v4(),
            timer: TimerSlot::new(),
            state: Mutex::new(State {
                text: initial_text,
                is_typing: false,
            }),
            gate: ReentrantMutex::new(()),
            cancelled: AtomicBool::new(false),
            listener,
            phase,
            timeline: record_timeline.then(|| Mutex::new(Timeline::new())),
            born: Instant::now(),
        }
    }

    pub(crate) fn text(&self) -> String {
        self.state.lock().text.clone()
    }

    pub(crate) fn is_typing(&self) -> bool {
        self.state.lock().is_typing
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Append one grapheme and notify. Returns `false` once cancelled.
    pub(crate) fn push_grapheme(&self, grapheme: &str) -> bool {
        let text = {
            let mut state = self.state.lock();
            state.text.push_str(grapheme);
            state.text.clone()
        };
        self.notify_text(&text)
    }

    /// Drop the last grapheme and notify. Returns `false` once cancelled.
    pub(crate) fn pop_grapheme(&self) -> bool {
        let text = {
            let mut state = self.state.lock();
            text::pop_grapheme(&mut state.text);
            state.text.clone()
        };
        self.notify_text(&text)
    }

    pub(crate) fn grapheme_count(&self) -> usize {
        text::grapheme_count(&self.state.lock().text)
    }

    /// Set the typing flag and notify. Returns `false` once cancelled.
    pub(crate) fn set_typing(&self, is_typing: bool) -> bool {
        let _gate = self.gate.lock();
        if self.is_cancelled() {
            return false;
        }
        self.state.lock().is_typing = is_typing;
        self.notify_typing(is_typing)
    }

    /// Fire the construction-time notifications.
    pub(crate) fn announce(&self) {
        let (text, is_typing) = {
            let state = self.state.lock();
            (state.text.clone(), state.is_typing)
        };
        self.notify_text(&text);
        self.notify_typing(is_typing);
    }

    fn notify_text(&self, text: &str) -> bool {
        let _gate = self.gate.lock();
        if self.is_cancelled() {
            return false;
        }
        self.record(|at_ms| TimelineEvent::TextChanged {
            text: text.to_string(),
            at_ms,
        });
        self.listener.on_text_changed(text);
        true
    }

    fn notify_typing(&self, is_typing: bool) -> bool {
        let _gate = self.gate.lock();
        if self.is_cancelled() {
            return false;
        }
        self.record(|at_ms| TimelineEvent::TypingChanged { is_typing, at_ms });
        self.listener.on_typing_changed(is_typing);
        true
    }

    /// Flag cancellation. Returns `false` if it was already flagged.
    pub(crate) fn cancel(&self) -> bool {
        let _gate = self.gate.lock();
        if self.cancelled.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.timer.disarm();
        // no event runs from here on; listeners are not told
        self.state.lock().is_typing = false;
        self.record(|at_ms| TimelineEvent::Stopped { at_ms });
        self.phase.send_if_modified(|phase| {
            if phase.is_done() {
                return false;
            }
            *phase = Phase::Stopped;
            true
        });
        true
    }

    pub(crate) fn mark_running(&self) {
        self.phase.send_replace(Phase::Running);
    }

    /// The queue drained without being stopped.
    pub(crate) fn finish(&self) {
        let _gate = self.gate.lock();
        if self.is_cancelled() {
            return;
        }
        self.record(|at_ms| TimelineEvent::Halted { at_ms });
        self.phase.send_replace(Phase::Finished);
    }

    pub(crate) fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Phase> {
        self.phase.subscribe()
    }

    /// Record an event boundary unless stopped. Returns `false` once cancelled.
    pub(crate) fn record_step(&self, event: impl FnOnce(u64) -> TimelineEvent) -> bool {
        let _gate = self.gate.lock();
        if self.is_cancelled() {
            return false;
        }
        self.record(event);
        true
    }

    pub(crate) fn record(&self, event: impl FnOnce(u64) -> TimelineEvent) {
        if let Some(timeline) = &self.timeline {
            let at_ms = self.born.elapsed().as_millis() as u64;
            timeline.lock().push(event(at_ms));
        }
    }

    pub(crate) fn timeline(&self) -> Option<Timeline> {
        self.timeline.as_ref().map(|t| t.lock().clone())
    }
}

impl std::fmt::Debug for Shared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shared")
            .field("id", &self.id)
            .field("phase", &self.phase())
            .field("cancelled", &self.is_cancelled())
            .field("live_timers", &self.timer.live())
            .finish()
    }
}
