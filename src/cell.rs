//! A single table cell: content, decorations and rendering.

use std::fmt;
use std::sync::Arc;

use crate::cells;
use crate::markdown;
use crate::style::CellStyle;
use crate::wrap;

/// Decoration prepended or appended to every visual line of a cell.
///
/// The static and per-line forms are mutually exclusive by construction.
#[derive(Clone, Default)]
pub enum Decoration {
    /// No decoration.
    #[default]
    None,
    /// The same string on every line.
    Static(String),
    /// Computed per line from `(is_first, is_last)`.
    PerLine(Arc<dyn Fn(bool, bool) -> String + Send + Sync>),
}

impl Decoration {
    /// The decoration text for one visual line.
    #[must_use]
    pub fn for_line(&self, is_first: bool, is_last: bool) -> String {
        match self {
            Self::None => String::new(),
            Self::Static(s) => s.clone(),
            Self::PerLine(f) => f(is_first, is_last),
        }
    }

    /// Display width of the first-line rendering.
    ///
    /// Measurement always uses the first-line form; per-line decorations
    /// are expected to keep a constant width across lines.
    pub(crate) fn first_line_width(&self) -> usize {
        cells::display_width(&self.for_line(true, false))
    }
}

impl fmt::Debug for Decoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Static(s) => f.debug_tuple("Static").field(s).finish(),
            Self::PerLine(_) => f.write_str("PerLine(..)"),
        }
    }
}

impl From<&str> for Decoration {
    fn from(s: &str) -> Self {
        Self::Static(s.to_string())
    }
}

impl From<String> for Decoration {
    fn from(s: String) -> Self {
        Self::Static(s)
    }
}

/// One table entry: raw content plus optional prefix/suffix decorations
/// and a cell-scope style override.
///
/// Content may embed literal ANSI sequences and, when the effective style
/// enables it, Markdown markup.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    /// The raw content.
    pub content: String,
    /// Decoration prepended to every visual line.
    pub prefix: Decoration,
    /// Decoration appended to every visual line.
    pub suffix: Decoration,
    style: Option<CellStyle>,
}

impl Cell {
    /// Create a cell from its content.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Set the prefix decoration.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<Decoration>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the suffix decoration.
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<Decoration>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Set a per-line prefix function.
    #[must_use]
    pub fn prefix_fn(mut self, f: impl Fn(bool, bool) -> String + Send + Sync + 'static) -> Self {
        self.prefix = Decoration::PerLine(Arc::new(f));
        self
    }

    /// Set a per-line suffix function.
    #[must_use]
    pub fn suffix_fn(mut self, f: impl Fn(bool, bool) -> String + Send + Sync + 'static) -> Self {
        self.suffix = Decoration::PerLine(Arc::new(f));
        self
    }

    /// Set a cell-scope style override, the highest-precedence scope.
    #[must_use]
    pub fn style(mut self, style: CellStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub(crate) fn style_override(&self) -> Option<&CellStyle> {
        self.style.as_ref()
    }

    /// Measure the cell's minimum and maximum footprint in display cells.
    ///
    /// When the effective style enables Markdown, the content is replaced by
    /// its converted form first; conversion is idempotent, so re-measuring
    /// is a no-op. Min is the longest word of the stripped content, max the
    /// longest line plus first-line decoration widths.
    pub(crate) fn measure(&mut self, style: &CellStyle) -> (usize, usize) {
        if style.is_markdown() {
            self.content = markdown::render_markdown(&self.content);
        }
        let plain = cells::strip_ansi(&self.content);

        let min_width = cells::longest_word(&plain);
        let max_width =
            self.prefix.first_line_width() + cells::longest_line(&plain) + self.suffix.first_line_width();
        (min_width, max_width)
    }

    /// Render the cell into a stack of physical lines at the given width.
    ///
    /// Per line: text attributes, alignment padding, decorations (with
    /// first/last flags relative to this cell's own line count), then cell
    /// attributes around the whole padded line.
    pub(crate) fn render(&self, style: &CellStyle, width: usize) -> Vec<String> {
        let prefix_len = self.prefix.first_line_width();
        let suffix_len = self.suffix.first_line_width();

        let mut width = width;
        if prefix_len + suffix_len < width {
            width -= prefix_len + suffix_len;
        }

        let content = if style.wraps() {
            wrap::soft_wrap(&self.content, width)
        } else {
            self.content.clone()
        };

        let lines: Vec<&str> = content.split('\n').collect();
        let count = lines.len();

        lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let styled = style.text_attrs.apply(line);
                let aligned = style.alignment().apply(&styled, width);
                let (first, last) = (i == 0, i == count - 1);
                let decorated = format!(
                    "{}{}{}",
                    self.prefix.for_line(first, last),
                    aligned,
                    self.suffix.for_line(first, last)
                );
                style.cell_attrs.apply(&decorated)
            })
            .collect()
    }
}

impl From<&str> for Cell {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

impl From<String> for Cell {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}
