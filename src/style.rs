//! Style system: ANSI attributes and composable cell/table styles.
//!
//! Attributes are kept as an *ordered* set rather than a bitmask because the
//! emission order of SGR codes is significant when styles from several scopes
//! are layered (first-seen order wins after deduplication).

use std::fmt::Write as _;

use smallvec::SmallVec;

use crate::cells;

/// The SGR reset sequence.
pub const RESET: &str = "\x1b[0m";

/// A single ANSI SGR attribute.
///
/// Discriminants are the raw SGR codes.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attr {
    /// Bold/bright text (SGR 1).
    Bold = 1,
    /// Dim/faint text (SGR 2).
    Faint = 2,
    /// Italic text (SGR 3).
    Italic = 3,
    /// Single underline (SGR 4).
    Underline = 4,
    /// Slow blinking text (SGR 5).
    BlinkSlow = 5,
    /// Fast blinking text (SGR 6).
    BlinkRapid = 6,
    /// Reverse video (SGR 7).
    Reverse = 7,
    /// Concealed/hidden text (SGR 8).
    Conceal = 8,
    /// Strikethrough text (SGR 9).
    CrossedOut = 9,

    FgBlack = 30,
    FgRed = 31,
    FgGreen = 32,
    FgYellow = 33,
    FgBlue = 34,
    FgMagenta = 35,
    FgCyan = 36,
    FgWhite = 37,

    BgBlack = 40,
    BgRed = 41,
    BgGreen = 42,
    BgYellow = 43,
    BgBlue = 44,
    BgMagenta = 45,
    BgCyan = 46,
    BgWhite = 47,

    FgHiBlack = 90,
    FgHiRed = 91,
    FgHiGreen = 92,
    FgHiYellow = 93,
    FgHiBlue = 94,
    FgHiMagenta = 95,
    FgHiCyan = 96,
    FgHiWhite = 97,

    BgHiBlack = 100,
    BgHiRed = 101,
    BgHiGreen = 102,
    BgHiYellow = 103,
    BgHiBlue = 104,
    BgHiMagenta = 105,
    BgHiCyan = 106,
    BgHiWhite = 107,
}

impl Attr {
    /// The raw SGR code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// The escape sequence enabling just this attribute.
    #[must_use]
    pub fn escape_seq(self) -> String {
        format!("\x1b[{}m", self.code())
    }
}

/// An ordered set of [`Attr`]s, applied to text as one combined SGR sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs(SmallVec<[Attr; 4]>);

impl Attrs {
    /// Create an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no attributes are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append an attribute, ignoring duplicates.
    pub fn push(&mut self, attr: Attr) {
        if !self.0.contains(&attr) {
            self.0.push(attr);
        }
    }

    /// The combined escape sequence, e.g. `\x1b[1;32m`.
    ///
    /// Empty attribute sets produce an empty string.
    #[must_use]
    pub fn escape_seq(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }
        let mut seq = String::from("\x1b[");
        for (i, attr) in self.0.iter().enumerate() {
            if i > 0 {
                seq.push(';');
            }
            let _ = write!(seq, "{}", attr.code());
        }
        seq.push('m');
        seq
    }

    /// Wrap `text` in this attribute set's escape sequence and a reset.
    ///
    /// Any reset already embedded in `text` gets the sequence re-opened
    /// right after it, so enclosing attributes survive inner styled spans.
    /// Empty sets return the text unchanged.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        if self.0.is_empty() {
            return text.to_string();
        }
        let seq = self.escape_seq();
        let reopened = format!("{RESET}{seq}");
        let body = text.replace(RESET, &reopened);
        format!("{seq}{body}{RESET}")
    }

    /// Concatenate `other` onto this set, dropping attributes already seen.
    pub fn merge(&mut self, other: &Attrs) {
        for &attr in &other.0 {
            self.push(attr);
        }
    }
}

impl FromIterator<Attr> for Attrs {
    fn from_iter<T: IntoIterator<Item = Attr>>(iter: T) -> Self {
        let mut attrs = Self::new();
        for attr in iter {
            attrs.push(attr);
        }
        attrs
    }
}

impl<const N: usize> From<[Attr; N]> for Attrs {
    fn from(arr: [Attr; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl From<Attr> for Attrs {
    fn from(attr: Attr) -> Self {
        std::iter::once(attr).collect()
    }
}

/// Horizontal alignment of text within its allocated width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    /// Pad on the right.
    #[default]
    Left,
    /// Pad on the left.
    Right,
    /// Split padding; the odd cell goes to the right.
    Center,
}

impl Alignment {
    /// Pad `text` with spaces to `width` display cells.
    ///
    /// Width is measured ignoring ANSI escapes. Text already at or over the
    /// target is returned unchanged; overlong content is never truncated.
    #[must_use]
    pub fn apply(self, text: &str, width: usize) -> String {
        let len = cells::display_width(text);
        if len >= width {
            return text.to_string();
        }
        let pad = width - len;
        match self {
            Self::Left => format!("{text}{}", " ".repeat(pad)),
            Self::Right => format!("{}{text}", " ".repeat(pad)),
            Self::Center => {
                let left = pad / 2;
                format!("{}{text}{}", " ".repeat(left), " ".repeat(pad - left))
            }
        }
    }
}

/// Style of a single cell, composable across scopes.
///
/// Scalar fields are `Option` so a scope can leave them unset; `merge`
/// only replaces what the override explicitly sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellStyle {
    /// Alignment of the text.
    pub align: Option<Alignment>,
    /// Whether the text should be soft-wrapped.
    pub wrap_text: Option<bool>,
    /// Whether the content should be rendered as Markdown.
    pub markdown: Option<bool>,
    /// Attributes applied to the text itself.
    pub text_attrs: Attrs,
    /// Attributes applied to the whole padded cell line.
    pub cell_attrs: Attrs,
}

impl CellStyle {
    /// Create an empty style that overrides nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the alignment.
    #[must_use]
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    /// Enable or disable soft wrapping.
    #[must_use]
    pub fn wrap_text(mut self, wrap: bool) -> Self {
        self.wrap_text = Some(wrap);
        self
    }

    /// Enable or disable Markdown rendering.
    #[must_use]
    pub fn markdown(mut self, markdown: bool) -> Self {
        self.markdown = Some(markdown);
        self
    }

    /// Set the text attributes.
    #[must_use]
    pub fn text_attrs(mut self, attrs: impl Into<Attrs>) -> Self {
        self.text_attrs = attrs.into();
        self
    }

    /// Set the cell attributes.
    #[must_use]
    pub fn cell_attrs(mut self, attrs: impl Into<Attrs>) -> Self {
        self.cell_attrs = attrs.into();
        self
    }

    /// Layer `other` on top of this style.
    ///
    /// Scalar fields are replaced when `other` sets them; attribute lists
    /// are concatenated and deduplicated preserving first-seen order.
    /// Merging is associative but not commutative.
    pub fn merge(&mut self, other: &CellStyle) {
        if other.align.is_some() {
            self.align = other.align;
        }
        if other.wrap_text.is_some() {
            self.wrap_text = other.wrap_text;
        }
        if other.markdown.is_some() {
            self.markdown = other.markdown;
        }
        self.text_attrs.merge(&other.text_attrs);
        self.cell_attrs.merge(&other.cell_attrs);
    }

    pub(crate) fn alignment(&self) -> Alignment {
        self.align.unwrap_or_default()
    }

    pub(crate) fn wraps(&self) -> bool {
        self.wrap_text.unwrap_or(false)
    }

    pub(crate) fn is_markdown(&self) -> bool {
        self.markdown.unwrap_or(false)
    }
}

/// Table-wide defaults and layout paddings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStyle {
    /// Width used when terminal detection is off or fails.
    pub default_width: usize,
    /// Query the terminal for the rendering width.
    pub fit_to_terminal: bool,
    /// Default for soft-wrapping cell text.
    pub wrap_text: bool,
    /// Default for Markdown rendering of cell content.
    pub markdown: bool,
    /// Drop columns whose data cells are all empty.
    pub hide_empty: bool,
    /// Spaces on the outer left/right of the whole table.
    pub outer_padding: usize,
    /// Spaces between adjacent columns.
    pub inner_padding: usize,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            default_width: 80,
            fit_to_terminal: true,
            wrap_text: true,
            markdown: false,
            hide_empty: true,
            outer_padding: 0,
            inner_padding: 1,
        }
    }
}
