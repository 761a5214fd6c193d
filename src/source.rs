//! Character buffers that patterns can be matched against.
//!
//! All positions are **character** (not byte) indices.

use ropey::{Rope, RopeSlice};

/// A random-access sequence of characters.
pub trait CharSource {
    /// Number of characters in the buffer.
    fn char_count(&self) -> usize;

    /// The character at `index`. Callers guarantee `index < char_count()`.
    fn char_at(&self, index: usize) -> char;

    /// Copy `[begin, end)` into an owned string.
    ///
    /// Only the host-regex leaf needs this; every other pattern reads one
    /// character at a time.
    fn collect_range(&self, begin: usize, end: usize) -> String {
        (begin..end).map(|i| self.char_at(i)).collect()
    }
}

impl CharSource for [char] {
    fn char_count(&self) -> usize {
        self.len()
    }

    fn char_at(&self, index: usize) -> char {
        self[index]
    }

    fn collect_range(&self, begin: usize, end: usize) -> String {
        self[begin..end].iter().collect()
    }
}

impl CharSource for Vec<char> {
    fn char_count(&self) -> usize {
        self.len()
    }

    fn char_at(&self, index: usize) -> char {
        self[index]
    }

    fn collect_range(&self, begin: usize, end: usize) -> String {
        self.as_slice().collect_range(begin, end)
    }
}

impl CharSource for Rope {
    fn char_count(&self) -> usize {
        self.len_chars()
    }

    fn char_at(&self, index: usize) -> char {
        self.char(index)
    }

    fn collect_range(&self, begin: usize, end: usize) -> String {
        self.slice(begin..end).to_string()
    }
}

impl CharSource for RopeSlice<'_> {
    fn char_count(&self) -> usize {
        self.len_chars()
    }

    fn char_at(&self, index: usize) -> char {
        self.char(index)
    }

    fn collect_range(&self, begin: usize, end: usize) -> String {
        self.slice(begin..end).to_string()
    }
}
