mod executor;
pub mod shared;
pub mod timer;
pub mod typer;

pub mod prelude {
    pub use crate::shared::Phase;
    pub use crate::typer::AutoTyper;
}

pub use shared::Phase;
pub use timer::{TimerGuard, TimerSlot};
pub use typer::AutoTyper;
