//! Terminal cell width calculations.
//!
//! Everything the layout engine knows about text size lives here: per-char
//! and per-string display widths (wide CJK characters count as 2 cells,
//! control characters as 0), ANSI escape stripping, and the longest-word /
//! longest-line measurements that drive column sizing.

use std::num::NonZeroUsize;
use std::sync::{LazyLock, Mutex};

use lru::LruCache;
use regex::Regex;
use unicode_width::UnicodeWidthChar;

/// Minimum string length to cache (shorter strings have minimal overhead).
const CACHE_MIN_LEN: usize = 8;

/// LRU cache for `cell_len` calculations.
static CELL_LEN_CACHE: LazyLock<Mutex<LruCache<String, usize>>> =
    LazyLock::new(|| Mutex::new(LruCache::new(NonZeroUsize::new(1024).expect("non-zero"))));

/// Matches ANSI escape sequences: CSI (`ESC [ ... final-byte`) and OSC
/// (`ESC ] ...` terminated by BEL or ST), the latter covering hyperlinks
/// like `ESC ] 8 ; ; url BEL`.
static ANSI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;:?]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)").expect("valid regex")
});

/// Get the cell width of a single character.
///
/// Most characters are 1 cell wide, but CJK characters and some emoji
/// are 2 cells wide. Control characters have 0 width.
#[must_use]
pub fn char_cell_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

#[inline]
fn compute_cell_width(text: &str) -> usize {
    text.chars().map(char_cell_width).sum()
}

/// Get the total cell width of a string (cached for longer strings).
///
/// The sum of the widths of all characters. Embedded ANSI escape sequences
/// are *not* skipped; strip them first (see [`strip_ansi`]) or use
/// [`display_width`].
#[must_use]
pub fn cell_len(text: &str) -> usize {
    if text.len() < CACHE_MIN_LEN {
        return compute_cell_width(text);
    }

    if let Ok(mut cache) = CELL_LEN_CACHE.lock()
        && let Some(&cached) = cache.get(text)
    {
        return cached;
    }

    let width = compute_cell_width(text);

    if let Ok(mut cache) = CELL_LEN_CACHE.lock() {
        cache.put(text.to_string(), width);
    }

    width
}

/// Remove all ANSI escape sequences from a string.
///
/// Returns a borrowed `Cow` when the input contains no escapes.
#[must_use]
pub fn strip_ansi(text: &str) -> std::borrow::Cow<'_, str> {
    if text.contains('\x1b') {
        ANSI_RE.replace_all(text, "")
    } else {
        std::borrow::Cow::Borrowed(text)
    }
}

/// Display width of a string in terminal cells, ignoring ANSI escapes.
#[must_use]
pub fn display_width(text: &str) -> usize {
    cell_len(&strip_ansi(text))
}

/// Width of the longest whitespace-delimited token, in display cells.
///
/// This is the narrowest a column can be made while still fitting every
/// word unbroken. Expects already-stripped text; newlines split words
/// like any other whitespace.
#[must_use]
pub fn longest_word(text: &str) -> usize {
    let mut max_len = 0;
    let mut cur_len = 0;

    for c in text.chars() {
        if c.is_whitespace() {
            max_len = max_len.max(cur_len);
            cur_len = 0;
        } else {
            cur_len += char_cell_width(c);
        }
    }

    max_len.max(cur_len)
}

/// Width of the longest newline-delimited segment, in display cells.
///
/// This is the width a column needs to show its longest line unwrapped.
/// Expects already-stripped text.
#[must_use]
pub fn longest_line(text: &str) -> usize {
    let mut max_len = 0;
    let mut cur_len = 0;

    for c in text.chars() {
        if c == '\n' {
            max_len = max_len.max(cur_len);
            cur_len = 0;
        } else {
            cur_len += char_cell_width(c);
        }
    }

    max_len.max(cur_len)
}
