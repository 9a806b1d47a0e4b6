//! Sequential typewriter animations.
//!
//! Queue `type`, `remove`, `sleep` and `loop` events on an [`AutoTyper`] and
//! start it inside a tokio runtime. The typer reports every text change and
//! every change of its typing flag to your listener, and goes quiet for good
//! once stopped or dropped.
//!
//! ```rust,no_run
//! use autotyper::prelude::*;
//!
//! # async fn demo() {
//! let typer = AutoTyper::new("", |text| println!("{text}"), |_| {})
//!     .type_str("Hello")
//!     .sleep_ms(500)
//!     .remove_all()
//!     .repeat_forever()
//!     .start();
//! # typer.stop();
//! # }
//! ```

// Re-export core modules
pub use autotyper_core::config;
pub use autotyper_core::error;
pub use autotyper_core::event;
pub use autotyper_core::listener;
pub use autotyper_core::replay;
pub use autotyper_core::schematic;
pub use autotyper_core::script;
pub use autotyper_core::text;
pub use autotyper_core::timeline;

pub use autotyper_runtime::{AutoTyper, Phase};

#[cfg(feature = "std")]
pub use autotyper_std as presets;

pub mod prelude {
    pub use autotyper_core::prelude::*;
    pub use autotyper_runtime::prelude::*;

    #[cfg(feature = "std")]
    pub use autotyper_std::prelude::*;
}
