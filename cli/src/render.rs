//! Terminal rendering of a running typer.

use autotyper::listener::TyperListener;
use parking_lot::Mutex;
use std::io::Write;

const CLEAR_LINE: &str = "\r\x1b[2K";

/// Cursor drawn after the text while letters are being typed.
pub const TYPING_CURSOR: char = '|';
/// Cursor drawn while the typer is idle or removing.
pub const IDLE_CURSOR: char = '_';

/// One redraw of the current line.
pub fn render_line(text: &str, is_typing: bool) -> String {
    let cursor = if is_typing { TYPING_CURSOR } else { IDLE_CURSOR };
    format!("{CLEAR_LINE}{text}{cursor}")
}

#[derive(Default)]
struct Screen {
    text: String,
    is_typing: bool,
}

/// Listener that redraws a single terminal line on every notification.
#[derive(Default)]
pub struct Terminal {
    screen: Mutex<Screen>,
}

impl Terminal {
    pub fn new() -> Self {
        Self::default()
    }

    fn draw(&self, screen: &Screen) {
        let mut out = std::io::stdout().lock();
        // a closed stdout is not worth aborting the animation for
        if let Err(e) = write!(out, "{}", render_line(&screen.text, screen.is_typing))
            .and_then(|_| out.flush())
        {
            tracing::debug!(error = %e, "failed to draw");
        }
    }

    /// Finish the line so the shell prompt starts on a fresh one.
    pub fn finish(&self) {
        let screen = self.screen.lock();
        println!("{CLEAR_LINE}{}", screen.text);
    }
}

impl TyperListener for Terminal {
    fn on_text_changed(&self, text: &str) {
        let mut screen = self.screen.lock();
        screen.text.clear();
        screen.text.push_str(text);
        self.draw(&screen);
    }

    fn on_typing_changed(&self, is_typing: bool) {
        let mut screen = self.screen.lock();
        screen.is_typing = is_typing;
        self.draw(&screen);
    }
}
