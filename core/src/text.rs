//! Grapheme-aware text helpers.
//!
//! One tick always moves one user-perceived character, so an emoji or a
//! letter with a combining accent is typed and removed as a single unit.

use unicode_segmentation::UnicodeSegmentation;

/// Split `text` into extended grapheme clusters.
pub fn graphemes(text: &str) -> Vec<&str> {
    text.graphemes(true).collect()
}

pub fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Remove the last grapheme of `text`. Returns `false` when already empty.
pub fn pop_grapheme(text: &mut String) -> bool {
    match text.grapheme_indices(true).next_back() {
        Some((idx, _)) => {
            text.truncate(idx);
            true
        }
        None => false,
    }
}
