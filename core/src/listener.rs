//! Listener - Observer hooks of a typer
//!
//! The engine owns its text and typing flag. Callers only ever see them
//! through these two notifications.

use std::sync::Arc;

/// Receives every text mutation and every typing flag change.
pub trait TyperListener: Send + Sync + 'static {
    fn on_text_changed(&self, text: &str);
    fn on_typing_changed(&self, is_typing: bool);
}

/// Listener built from two closures.
pub struct FnListener<T, I> {
    on_text: T,
    on_typing: I,
}

impl<T, I> FnListener<T, I>
where
    T: Fn(&str) + Send + Sync + 'static,
    I: Fn(bool) + Send + Sync + 'static,
{
    pub fn new(on_text: T, on_typing: I) -> Self {
        Self { on_text, on_typing }
    }
}

impl<T, I> TyperListener for FnListener<T, I>
where
    T: Fn(&str) + Send + Sync + 'static,
    I: Fn(bool) + Send + Sync + 'static,
{
    fn on_text_changed(&self, text: &str) {
        (self.on_text)(text)
    }

    fn on_typing_changed(&self, is_typing: bool) {
        (self.on_typing)(is_typing)
    }
}

/// Ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl TyperListener for NoopListener {
    fn on_text_changed(&self, _text: &str) {}
    fn on_typing_changed(&self, _is_typing: bool) {}
}

impl<L: TyperListener + ?Sized> TyperListener for Arc<L> {
    fn on_text_changed(&self, text: &str) {
        (**self).on_text_changed(text)
    }

    fn on_typing_changed(&self, is_typing: bool) {
        (**self).on_typing_changed(is_typing)
    }
}
