pub use crate::presets::Preset;
pub use crate::presets::endless::Endless;
pub use crate::presets::scramble::Scramble;
pub use crate::presets::word_cycle::WordCycle;
