//! autotyper core
//!
//! Runtime-agnostic pieces of the typer:
//! - `event`: the queued units of work and their configuration
//! - `script` / `config`: TOML descriptions of a queue
//! - `listener`: the observer hooks
//! - `timeline` / `replay`: execution records
//! - `schematic`: a static graph of a queue

pub mod config;
pub mod error;
pub mod event;
pub mod listener;
pub mod outcome;
pub mod replay;
pub mod schematic;
pub mod script;
pub mod text;
pub mod timeline;

pub use config::{Defaults, TyperOptions};
pub use error::{TyperError, TyperResult};
pub use event::{
    Event, EventKind, LoopConfig, LoopScope, RemoveConfig, SleepConfig, TypeConfig,
};
pub use listener::{FnListener, NoopListener, TyperListener};
pub use outcome::Outcome;
pub use replay::{Replay, ReplayFrame};
pub use schematic::Schematic;
pub use script::{Script, Step};
pub use timeline::{Timeline, TimelineEvent};

pub mod prelude {
    pub use crate::config::TyperOptions;
    pub use crate::error::{TyperError, TyperResult};
    pub use crate::event::{
        Event, EventKind, LoopConfig, LoopScope, RemoveConfig, SleepConfig, TypeConfig,
    };
    pub use crate::listener::{FnListener, NoopListener, TyperListener};
    pub use crate::script::Script;
    pub use crate::timeline::Timeline;
}
