//! Terminal size detection.

/// Get the terminal size (width, height) in cells.
///
/// Returns `None` if the size cannot be determined, e.g. when stdout is
/// not a terminal.
#[must_use]
pub fn get_terminal_size() -> Option<(usize, usize)> {
    crossterm::terminal::size()
        .ok()
        .map(|(w, h)| (w as usize, h as usize))
}

/// Get the terminal width in cells, if it can be determined.
///
/// Callers fall back to their configured default width on `None`.
#[must_use]
pub fn get_terminal_width() -> Option<usize> {
    get_terminal_size().map(|(w, _)| w)
}
