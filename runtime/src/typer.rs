//! # AutoTyper: Sequential Text Animation
//!
//! The `AutoTyper` is the **runtime handle** of a typer queue.
//!
//! ## Design Philosophy
//!
//! * **Builder pattern**: `AutoTyper::new(..).type_str("hi").sleep_ms(500).start()`
//! * **One thing at a time**: a single driver task, a single live timer
//! * **Observers only observe**: text and typing flag are owned by the typer
//!
//! Dropping the handle stops the typer, which is the unmount path of a UI.

use crate::executor;
use crate::shared::{Phase, Shared};
use autotyper_core::config::TyperOptions;
use autotyper_core::error::{TyperError, TyperResult};
use autotyper_core::event::{Event, LoopConfig, RemoveConfig, SleepConfig, TypeConfig};
use autotyper_core::listener::{FnListener, TyperListener};
use autotyper_core::schematic::Schematic;
use autotyper_core::script::Script;
use autotyper_core::timeline::Timeline;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

/// The AutoTyper Builder and Runtime handle.
///
/// ## Example
///
/// ```rust,ignore
/// let typer = AutoTyper::new(
///     "",
///     |text| println!("{text}"),
///     |typing| println!("typing: {typing}"),
/// )
/// .type_str("Hello")
/// .sleep_ms(800)
/// .remove_all()
/// .repeat_forever()
/// .start();
///
/// // later, on unmount
/// typer.stop();
/// ```
pub struct AutoTyper {
    shared: Arc<Shared>,
    queue: Vec<Event>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl AutoTyper {
    /// Create a typer showing `initial_text`.
    ///
    /// Fires `on_text(initial_text)` and `on_typing(false)` before returning.
    pub fn new<T, I>(initial_text: impl Into<String>, on_text: T, on_typing: I) -> Self
    where
        T: Fn(&str) + Send + Sync + 'static,
        I: Fn(bool) + Send + Sync + 'static,
    {
        Self::with_options(
            TyperOptions::default().with_initial_text(initial_text),
            Arc::new(FnListener::new(on_text, on_typing)),
        )
    }

    /// Create a typer with a listener object.
    pub fn with_listener(initial_text: impl Into<String>, listener: Arc<dyn TyperListener>) -> Self {
        Self::with_options(TyperOptions::default().with_initial_text(initial_text), listener)
    }

    pub fn with_options(options: TyperOptions, listener: Arc<dyn TyperListener>) -> Self {
        let shared = Arc::new(Shared::new(
            options.initial_text,
            listener,
            options.record_timeline,
        ));
        shared.announce();
        Self {
            shared,
            queue: Vec::new(),
            task: Mutex::new(None),
        }
    }

    /// Build a typer from a script, queueing all of its steps.
    pub fn from_script(script: &Script, listener: Arc<dyn TyperListener>) -> TyperResult<Self> {
        let events = script.events()?;
        let typer = Self::with_options(script.typer.clone(), listener);
        Ok(events.into_iter().fold(typer, |typer, event| typer.push(event)))
    }

    /// Append any event to the queue.
    pub fn push(mut self, event: impl Into<Event>) -> Self {
        if self.task.get_mut().is_some() {
            tracing::warn!(typer.id = %self.shared.id, "event queued after start is ignored");
            return self;
        }
        self.queue.push(event.into());
        self
    }

    pub fn type_text(self, config: TypeConfig) -> Self {
        self.push(config)
    }

    /// Type `text` at the default cadence.
    pub fn type_str(self, text: impl Into<String>) -> Self {
        self.push(TypeConfig::new(text))
    }

    pub fn remove(self, config: RemoveConfig) -> Self {
        self.push(config)
    }

    pub fn remove_all(self) -> Self {
        self.push(RemoveConfig::all())
    }

    pub fn sleep(self, config: SleepConfig) -> Self {
        self.push(config)
    }

    pub fn sleep_ms(self, ms: u64) -> Self {
        self.push(SleepConfig::from_millis(ms))
    }

    /// Replay the queue defined so far, see [`LoopConfig`].
    pub fn repeat(self, config: LoopConfig) -> Self {
        self.push(config)
    }

    pub fn repeat_forever(self) -> Self {
        self.push(LoopConfig::forever())
    }

    /// Start draining the queue on the ambient tokio runtime.
    ///
    /// Starting twice, or after `stop()`, is a no-op.
    pub fn start(self) -> Self {
        if let Err(error) = self.try_start() {
            tracing::warn!(%error, typer.id = %self.shared.id, "typer not started");
        }
        self
    }

    /// Like [`start`](Self::start) but reports a missing runtime.
    pub fn try_start(&self) -> TyperResult<()> {
        let mut task = self.task.lock();
        if task.is_some() || self.shared.is_cancelled() {
            tracing::debug!(typer.id = %self.shared.id, "typer already started");
            return Ok(());
        }
        let handle = Handle::try_current().map_err(|_| TyperError::NoRuntime)?;

        let events: Arc<[Event]> = self.queue.clone().into();
        let span = tracing::info_span!(
            "typer",
            typer.id = %self.shared.id,
            typer.events = events.len()
        );
        self.shared.mark_running();
        *task = Some(handle.spawn(executor::drive(self.shared.clone(), events).instrument(span)));
        Ok(())
    }

    /// Halt the typer. No listener call happens after this returns.
    ///
    /// Text already typed stays as it is.
    pub fn stop(&self) {
        if !self.shared.cancel() {
            return;
        }
        if let Some(task) = self.task.lock().take() {
            task.abort();
        }
        tracing::debug!(typer.id = %self.shared.id, "typer stopped");
    }

    /// Resolve once the typer finished its queue or was stopped.
    ///
    /// Never resolves for a typer that is not started or loops forever.
    pub async fn wait(&self) -> Phase {
        let mut phase = self.shared.subscribe();
        match phase.wait_for(|p| p.is_done()).await {
            Ok(done) => *done,
            Err(_) => self.shared.phase(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.shared.id
    }

    pub fn text(&self) -> String {
        self.shared.text()
    }

    pub fn is_typing(&self) -> bool {
        self.shared.is_typing()
    }

    pub fn phase(&self) -> Phase {
        self.shared.phase()
    }

    pub fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }

    /// Number of live timers, 0 or 1.
    pub fn live_timers(&self) -> usize {
        self.shared.timer.live()
    }

    pub fn events(&self) -> &[Event] {
        &self.queue
    }

    /// Recorded timeline, when the typer was built with `record_timeline`.
    pub fn timeline(&self) -> Option<Timeline> {
        self.shared.timeline()
    }

    pub fn schematic(&self, name: impl Into<String>) -> Schematic {
        Schematic::from_events(name, &self.queue)
    }
}

impl Drop for AutoTyper {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for AutoTyper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoTyper")
            .field("shared", &self.shared)
            .field("events", &self.queue.len())
            .finish()
    }
}
