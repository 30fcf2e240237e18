//! Table orchestration: data accumulation, style resolution, measurement,
//! column hiding, width allocation and final output assembly.
//!
//! ```rust
//! use termtable::prelude::*;
//!
//! let mut table = Table::with_style(TableStyle {
//!     default_width: 40,
//!     fit_to_terminal: false,
//!     ..TableStyle::default()
//! });
//! table.add_header(["Feature", "Example"]);
//! table.add_row(row!["**Markdown**", "[link](http://example.com)"]);
//! table.set_header_style(CellStyle::new().cell_attrs([Attr::FgGreen, Attr::Underline]));
//! let text = table.render();
//! ```

use std::collections::HashMap;

use crate::cell::Cell;
use crate::cells;
use crate::row::{self, Row};
use crate::style::{CellStyle, TableStyle};
use crate::terminal;
use crate::width;

/// Identifies a row for style overrides.
///
/// The header is its own variant rather than a sentinel index, so it can
/// never collide with a data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum RowIndex {
    Header,
    Data(usize),
}

/// Per-render layout: which columns are visible and how wide each one is.
struct Layout {
    /// Original indices of visible columns, in order.
    visible: Vec<usize>,
    /// Allocated widths, parallel to `visible`.
    widths: Vec<usize>,
}

/// A table accumulating a header, data rows and style overrides, rendered
/// to a single string.
///
/// A table is exclusively owned by one caller; nothing here is shared or
/// synchronized. Rendering mutates cells only to expand Markdown, which is
/// idempotent, so `render` may be called repeatedly.
#[derive(Debug)]
pub struct Table {
    style: TableStyle,
    width: usize,
    header: Vec<Cell>,
    rows: Vec<Vec<Cell>>,
    row_styles: HashMap<RowIndex, CellStyle>,
    col_styles: HashMap<usize, CellStyle>,
}

impl Default for Table {
    /// Equivalent to [`Table::new`].
    fn default() -> Self {
        Self::new()
    }
}

fn detect_width(style: &TableStyle) -> usize {
    if style.fit_to_terminal {
        terminal::get_terminal_width().unwrap_or(style.default_width)
    } else {
        style.default_width
    }
}

impl Table {
    /// Create a table with the default [`TableStyle`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_style(TableStyle::default())
    }

    /// Create a table with an explicit style.
    ///
    /// The rendering width is resolved here: the terminal width when
    /// `fit_to_terminal` is set and detection succeeds, otherwise
    /// `default_width`.
    #[must_use]
    pub fn with_style(style: TableStyle) -> Self {
        let width = detect_width(&style);
        Self {
            style,
            width,
            header: Vec::new(),
            rows: Vec::new(),
            row_styles: HashMap::new(),
            col_styles: HashMap::new(),
        }
    }

    /// Replace the table style, re-resolving the rendering width.
    pub fn set_style(&mut self, style: TableStyle) {
        self.width = detect_width(&style);
        self.style = style;
    }

    /// Append header columns. The header fixes the table's column count.
    pub fn add_header<I>(&mut self, header: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.header
            .extend(header.into_iter().map(|h| Cell::new(h.into())));
    }

    /// Append one data row.
    ///
    /// # Panics
    ///
    /// Panics when the row's length differs from the header's column count,
    /// or when no header has been added yet. Silently accepting a
    /// misaligned row would corrupt the layout invisibly.
    pub fn add_row(&mut self, row: Row) {
        assert!(
            !self.header.is_empty(),
            "add_row called before add_header: the header fixes the column count"
        );
        let cells = row.into_cells();
        assert_eq!(
            cells.len(),
            self.header.len(),
            "row has {} cells but the table has {} columns",
            cells.len(),
            self.header.len()
        );
        self.rows.push(cells);
    }

    /// Append several data rows.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Table::add_row`].
    pub fn add_rows<I: IntoIterator<Item = Row>>(&mut self, rows: I) {
        for row in rows {
            self.add_row(row);
        }
    }

    /// Number of data rows (the header does not count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if no data rows have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Set the style applied to every header cell.
    pub fn set_header_style(&mut self, style: CellStyle) {
        self.row_styles.insert(RowIndex::Header, style);
    }

    /// Set the style applied to every cell of data row `row`.
    pub fn set_row_style(&mut self, row: usize, style: CellStyle) {
        self.row_styles.insert(RowIndex::Data(row), style);
    }

    /// Set the style applied to every data cell of column `col`.
    pub fn set_col_style(&mut self, col: usize, style: CellStyle) {
        self.col_styles.insert(col, style);
    }

    /// Resolve the effective style for one cell.
    ///
    /// Precedence, highest last so later merges win: table default,
    /// column, row, cell. The header row sees only the header style.
    fn effective_style(&self, index: RowIndex, col: usize) -> CellStyle {
        let mut style = CellStyle::new()
            .wrap_text(self.style.wrap_text)
            .markdown(self.style.markdown);

        match index {
            RowIndex::Header => {
                if let Some(header_style) = self.row_styles.get(&RowIndex::Header) {
                    style.merge(header_style);
                }
            }
            RowIndex::Data(row) => {
                if let Some(col_style) = self.col_styles.get(&col) {
                    style.merge(col_style);
                }
                if let Some(row_style) = self.row_styles.get(&index) {
                    style.merge(row_style);
                }
                if let Some(cell_style) = self.rows[row][col].style_override() {
                    style.merge(cell_style);
                }
            }
        }

        style
    }

    /// Measure every column and allocate widths for this render.
    fn layout(&mut self) -> Layout {
        let col_count = self.header.len();

        let mut header_widths = Vec::with_capacity(col_count);
        let mut min_widths = Vec::with_capacity(col_count);
        let mut max_widths = Vec::with_capacity(col_count);
        let mut empty = Vec::with_capacity(col_count);

        for col in 0..col_count {
            let header_width = cells::display_width(&self.header[col].content);
            let mut min_width = header_width;
            let mut max_width = header_width;
            let mut col_empty = true;
            let mut wraps = self.style.wrap_text;

            for row in 0..self.rows.len() {
                let style = self.effective_style(RowIndex::Data(row), col);
                let (cell_min, cell_max) = self.rows[row][col].measure(&style);

                if cell_min != 0 {
                    col_empty = false;
                }
                if !style.wraps() {
                    wraps = false;
                }
                min_width = min_width.max(cell_min);
                max_width = max_width.max(cell_max);
            }

            // A column no cell is allowed to wrap never squeezes below its
            // longest line.
            if !wraps {
                min_width = max_width;
            }

            header_widths.push(header_width);
            min_widths.push(min_width);
            max_widths.push(max_width);
            empty.push(col_empty);
        }

        let visible: Vec<usize> = (0..col_count)
            .filter(|&col| !(self.style.hide_empty && empty[col]))
            .collect();

        let header_vis: Vec<usize> = visible.iter().map(|&c| header_widths[c]).collect();
        let min_vis: Vec<usize> = visible.iter().map(|&c| min_widths[c]).collect();
        let max_vis: Vec<usize> = visible.iter().map(|&c| max_widths[c]).collect();

        let padding = self.style.outer_padding * 2
            + self.style.inner_padding * visible.len().saturating_sub(1);
        let budget = self.width.saturating_sub(padding);

        let min_sum = width::sum(&min_vis);
        let max_sum = width::sum(&max_vis);
        log::debug!(
            "column layout: budget={budget} min_sum={min_sum} max_sum={max_sum} visible={}",
            visible.len()
        );

        let widths = if budget >= max_sum {
            max_vis
        } else {
            let mut widths = min_vis;
            if budget >= min_sum {
                width::expand(&mut widths, &max_vis, budget - min_sum);
            } else {
                width::shrink(&mut widths, &header_vis, min_sum - budget);
            }
            widths
        };

        Layout { visible, widths }
    }

    fn render_row_into(&self, out: &mut String, index: RowIndex, layout: &Layout) {
        let row_cells: Vec<&Cell> = match index {
            RowIndex::Header => layout.visible.iter().map(|&c| &self.header[c]).collect(),
            RowIndex::Data(row) => layout
                .visible
                .iter()
                .map(|&c| &self.rows[row][c])
                .collect(),
        };
        let styles: Vec<CellStyle> = layout
            .visible
            .iter()
            .map(|&c| self.effective_style(index, c))
            .collect();

        let (stacks, line_count) = row::render_line_stacks(&row_cells, &styles, &layout.widths);

        for line in 0..line_count {
            out.push_str(&" ".repeat(self.style.outer_padding));
            for (i, stack) in stacks.iter().enumerate() {
                out.push_str(&stack[line]);
                if i < stacks.len() - 1 {
                    out.push_str(&" ".repeat(self.style.inner_padding));
                }
            }
            out.push_str(&" ".repeat(self.style.outer_padding));
            out.push('\n');
        }
    }

    /// Render the table: header first, then data rows in insertion order.
    ///
    /// Lines are separated by `\n` with a trailing `\n` after the last row;
    /// an empty table renders to the empty string. Rendering is idempotent
    /// and may run more than once.
    pub fn render(&mut self) -> String {
        let layout = self.layout();

        let mut out = String::new();
        self.render_row_into(&mut out, RowIndex::Header, &layout);
        for i in 0..self.rows.len() {
            self.render_row_into(&mut out, RowIndex::Data(i), &layout);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;
    use crate::style::{Alignment, Attr};

    fn fixed(width: usize) -> TableStyle {
        TableStyle {
            default_width: width,
            fit_to_terminal: false,
            ..TableStyle::default()
        }
    }

    #[test]
    fn test_render_empty_table() {
        let mut table = Table::with_style(fixed(80));
        assert_eq!(table.render(), "");
    }

    #[test]
    fn test_render_normal_table() {
        let mut table = Table::with_style(fixed(80));
        table.add_header(["Header1", "Header2"]);
        table.add_rows([
            row!["Row1Col1", "Row1Col2"],
            row!["Row2Col1", "Row2Col2"],
        ]);

        let want = "Header1  Header2 \n\
                    Row1Col1 Row1Col2\n\
                    Row2Col1 Row2Col2\n";
        assert_eq!(table.render(), want);
    }

    #[test]
    fn test_render_wrapped_table() {
        let mut table = Table::with_style(TableStyle {
            default_width: 32,
            fit_to_terminal: false,
            wrap_text: true,
            markdown: false,
            hide_empty: false,
            outer_padding: 0,
            inner_padding: 1,
        });
        table.add_header(["Header1", "Header2"]);
        table.add_rows([
            row!["This is a long text that should wrap", "Row1"],
            row!["Another long text that should wrap", "Row2"],
        ]);

        let want = "Header1                  Header2\n\
                    This is a long text that Row1   \n\
                    should wrap                     \n\
                    Another long text that   Row2   \n\
                    should wrap                     \n";
        assert_eq!(table.render(), want);
    }

    #[test]
    fn test_render_markdown_table() {
        let mut table = Table::with_style(TableStyle {
            default_width: 32,
            fit_to_terminal: false,
            wrap_text: false,
            markdown: true,
            hide_empty: false,
            outer_padding: 0,
            inner_padding: 1,
        });
        table.add_header(["Header1", "Header2"]);
        table.add_rows([
            row!["**Bold Text**", "~~Strikethrough~~"],
            row!["[Link](https://example.com)", "Inline `code`"],
            row!["*Italic Text*", "~~**Bold and Strikethrough**~~"],
        ]);

        let want = concat!(
            "Header1   Header2               \n",
            "\x1b[1mBold Text\x1b[0m \x1b[9mStrikethrough\x1b[0m         \n",
            "\x1b[1mLink\x1b[0m \x1b[4mhttps://example.com\x1b[0m Inline \x1b[1mcode\x1b[0m           \n",
            "\x1b[3mItalic Text\x1b[0m \x1b[9m\x1b[1mBold and Strikethrough\x1b[0m\x1b[9m\x1b[0m\n",
        );
        assert_eq!(table.render(), want);
    }

    #[test]
    fn test_hide_empty_column() {
        let mut table = Table::with_style(fixed(40));
        table.add_header(["A", "Empty", "C"]);
        table.add_rows([row!["a1", "", "c1"], row!["a2", "", "c2"]]);

        let out = table.render();
        assert_eq!(out, "A  C \na1 c1\na2 c2\n");
    }

    #[test]
    fn test_hide_empty_disabled_keeps_column() {
        let mut table = Table::with_style(TableStyle {
            hide_empty: false,
            ..fixed(40)
        });
        table.add_header(["A", "Empty", "C"]);
        table.add_rows([row!["a1", "", "c1"]]);

        // Header text alone does not exempt the column from being empty,
        // but with hiding disabled it still takes layout space.
        assert_eq!(table.render(), "A  Empty C \na1       c1\n");
    }

    #[test]
    fn test_style_precedence_cell_over_row_over_col() {
        let mut table = Table::with_style(fixed(40));
        table.add_header(["A", "B"]);
        table.add_row(row![
            Cell::new("x").style(CellStyle::new().align(Alignment::Right)),
            "y"
        ]);
        table.set_col_style(0, CellStyle::new().align(Alignment::Center));
        table.set_row_style(0, CellStyle::new().align(Alignment::Left));

        // Cell override wins over the row style, which wins over the column
        // style: "x" is right-aligned under header width 1... widen via a
        // second row so the column has room to show it.
        table.add_row(row!["wide", "y"]);
        let out = table.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "   x y");
        assert_eq!(lines[2], "wide y");
    }

    #[test]
    fn test_header_style_attrs() {
        let mut table = Table::with_style(fixed(40));
        table.add_header(["H"]);
        table.add_row(row!["x"]);
        table.set_header_style(CellStyle::new().cell_attrs([Attr::FgGreen, Attr::Underline]));

        let out = table.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "\x1b[32;4mH\x1b[0m");
        assert_eq!(lines[1], "x");
    }

    #[test]
    fn test_render_twice_is_stable() {
        let mut table = Table::with_style(TableStyle {
            markdown: true,
            ..fixed(40)
        });
        table.add_header(["A", "B"]);
        table.add_row(row!["**bold**", ""]);

        let first = table.render();
        assert_eq!(table.render(), first);
    }

    #[test]
    fn test_budget_below_header_widths_overflows() {
        let mut table = Table::with_style(TableStyle {
            wrap_text: true,
            ..fixed(10)
        });
        table.add_header(["LongHeader1", "LongHeader2"]);
        table.add_row(row!["aaaa", "bbbb"]);

        // Columns never shrink below their header width; the table renders
        // wider than the requested budget instead of truncating.
        let out = table.render();
        let first_line = out.lines().next().unwrap();
        assert_eq!(first_line, "LongHeader1 LongHeader2");
    }

    #[test]
    #[should_panic(expected = "row has 1 cells but the table has 2 columns")]
    fn test_mismatched_row_panics() {
        let mut table = Table::with_style(fixed(40));
        table.add_header(["A", "B"]);
        table.add_row(row!["only one"]);
    }

    #[test]
    #[should_panic(expected = "add_row called before add_header")]
    fn test_row_before_header_panics() {
        let mut table = Table::with_style(fixed(40));
        table.add_row(row!["x"]);
    }

    #[test]
    fn test_default_table_resolves_width_like_new() {
        // `Default` goes through the same width resolution as `new`; a
        // zero width would squeeze every column to its header floor and
        // chop data mid-word.
        let mut defaulted = Table::default();
        let mut explicit = Table::new();
        for table in [&mut defaulted, &mut explicit] {
            table.add_header(["Header1", "Header2"]);
            table.add_row(row!["Row1Col1", "Row1Col2"]);
        }

        let out = defaulted.render();
        assert_eq!(out, explicit.render());
        assert!(
            out.lines().any(|l| l.contains("Row1Col1")),
            "data chopped mid-word: {out:?}"
        );
    }

    #[test]
    fn test_outer_padding() {
        let mut table = Table::with_style(TableStyle {
            outer_padding: 2,
            ..fixed(40)
        });
        table.add_header(["A"]);
        table.add_row(row!["x"]);
        assert_eq!(table.render(), "  A  \n  x  \n");
    }
}
