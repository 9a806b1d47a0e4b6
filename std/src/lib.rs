//! Ready-made typer sequences.

pub mod prelude;
pub mod presets;

pub use presets::endless::Endless;
pub use presets::scramble::Scramble;
pub use presets::word_cycle::WordCycle;
pub use presets::Preset;
