//! ANSI-aware soft wrapping.
//!
//! Wraps text at whitespace boundaries to a target display width. Escape
//! sequences occupy zero width and survive wrapping: sequences still open at
//! a line break are re-emitted at the start of the next line, so a styled
//! span that spans lines stays styled. A single word wider than the target
//! is chopped mid-word rather than overflowing.
//!
//! Whitespace is kept at the end of a line while it still fits; whitespace
//! that falls exactly on the break is dropped, never carried to the next
//! line.

use crate::cells::char_cell_width;

enum Atom {
    /// A complete CSI escape sequence.
    Esc(String),
    Ch(char),
}

fn atoms(text: &str) -> Vec<Atom> {
    let mut out = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            let mut seq = String::from("\x1b[");
            chars.next();
            for c in chars.by_ref() {
                seq.push(c);
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
            out.push(Atom::Esc(seq));
        } else {
            out.push(Atom::Ch(c));
        }
    }

    out
}

fn is_reset(seq: &str) -> bool {
    seq == "\x1b[0m" || seq == "\x1b[m"
}

struct Wrapper {
    width: usize,
    out: String,
    line_width: usize,
    /// A break is owed before the next word.
    pending_break: bool,
    /// Escape sequences currently open, in emission order.
    open: Vec<String>,
}

impl Wrapper {
    fn track(&mut self, seq: String) {
        if is_reset(&seq) {
            self.open.clear();
        } else {
            self.open.push(seq);
        }
    }

    fn newline(&mut self) {
        self.out.push('\n');
        self.line_width = 0;
        self.pending_break = false;
        for seq in &self.open {
            self.out.push_str(seq);
        }
    }

    fn place_word(&mut self, buf: &str, buf_width: usize) {
        if buf.is_empty() {
            return;
        }
        if self.pending_break || (self.line_width > 0 && self.line_width + buf_width > self.width)
        {
            self.newline();
        }
        if buf_width <= self.width {
            self.out.push_str(buf);
            self.line_width += buf_width;
            for atom in atoms(buf) {
                if let Atom::Esc(seq) = atom {
                    self.track(seq);
                }
            }
        } else {
            // Word wider than the target: chop mid-word.
            for atom in atoms(buf) {
                match atom {
                    Atom::Esc(seq) => {
                        self.out.push_str(&seq);
                        self.track(seq);
                    }
                    Atom::Ch(c) => {
                        let w = char_cell_width(c);
                        if self.line_width > 0 && self.line_width + w > self.width {
                            self.newline();
                        }
                        self.out.push(c);
                        self.line_width += w;
                    }
                }
            }
        }
    }
}

/// Soft-wrap `text` to `width` display cells, breaking at whitespace.
///
/// Embedded newlines are hard breaks. A width of 0 is treated as 1.
#[must_use]
pub fn soft_wrap(text: &str, width: usize) -> String {
    let width = width.max(1);
    let mut w = Wrapper {
        width,
        out: String::with_capacity(text.len()),
        line_width: 0,
        pending_break: false,
        open: Vec::new(),
    };

    let mut word = String::new();
    let mut word_width = 0;

    for atom in atoms(text) {
        match atom {
            Atom::Esc(seq) => {
                if word.is_empty() {
                    w.out.push_str(&seq);
                    w.track(seq);
                } else {
                    word.push_str(&seq);
                }
            }
            Atom::Ch('\n') => {
                w.place_word(&word, word_width);
                word.clear();
                word_width = 0;
                w.newline();
            }
            Atom::Ch(c) if c.is_whitespace() => {
                w.place_word(&word, word_width);
                word.clear();
                word_width = 0;
                let cw = char_cell_width(c);
                if w.line_width + cw <= w.width {
                    w.out.push(c);
                    w.line_width += cw;
                } else {
                    w.pending_break = true;
                }
            }
            Atom::Ch(c) => {
                word.push(c);
                word_width += char_cell_width(c);
            }
        }
    }
    w.place_word(&word, word_width);

    w.out
}
