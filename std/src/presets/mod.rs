pub mod endless;
pub mod scramble;
pub mod word_cycle;

use autotyper_core::event::Event;
use autotyper_runtime::AutoTyper;

/// A reusable sequence of events.
pub trait Preset {
    /// Name used in logs and schematics.
    fn name(&self) -> &'static str;

    fn events(&self) -> Vec<Event>;

    /// Queue the preset on `typer`.
    fn apply(&self, typer: AutoTyper) -> AutoTyper {
        let events = self.events();
        tracing::debug!(preset = self.name(), events = events.len(), "applying preset");
        events.into_iter().fold(typer, |typer, event| typer.push(event))
    }
}
