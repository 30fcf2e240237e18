//! Rows: heterogeneous value conversion and logical-row rendering.
//!
//! A row is appended as a sequence of [`RowValue`]s, a tagged variant over
//! prepared cells and plain text. Scalars convert through their `Display`
//! form; there is no dynamic typing involved.

use std::fmt;

use crate::cell::Cell;
use crate::style::CellStyle;

/// One value appended to a row: a prepared cell or stringified text.
#[derive(Debug, Clone)]
pub enum RowValue {
    /// A fully configured cell.
    Cell(Cell),
    /// Plain text content.
    Text(String),
}

impl RowValue {
    /// The explicit stringification rule: any `Display` value becomes text.
    #[must_use]
    pub fn display(value: impl fmt::Display) -> Self {
        Self::Text(value.to_string())
    }

    pub(crate) fn into_cell(self) -> Cell {
        match self {
            Self::Cell(cell) => cell,
            Self::Text(text) => Cell::new(text),
        }
    }
}

impl From<Cell> for RowValue {
    fn from(cell: Cell) -> Self {
        Self::Cell(cell)
    }
}

impl From<&str> for RowValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RowValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

macro_rules! row_value_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for RowValue {
                fn from(value: $ty) -> Self {
                    Self::display(value)
                }
            }
        )*
    };
}

row_value_from_display!(bool, char, i32, i64, u32, u64, usize, isize, f32, f64);

/// An ordered sequence of values, one per column.
#[derive(Debug, Clone, Default)]
pub struct Row(Vec<RowValue>);

impl Row {
    /// Create an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value.
    pub fn push(&mut self, value: impl Into<RowValue>) {
        self.0.push(value.into());
    }

    /// Append a value, builder style.
    #[must_use]
    pub fn with(mut self, value: impl Into<RowValue>) -> Self {
        self.push(value);
        self
    }

    /// Number of values in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the row holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn into_cells(self) -> Vec<Cell> {
        self.0.into_iter().map(RowValue::into_cell).collect()
    }
}

impl From<Vec<RowValue>> for Row {
    fn from(values: Vec<RowValue>) -> Self {
        Self(values)
    }
}

impl<T: Into<RowValue>> FromIterator<T> for Row {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Build a [`Row`] from heterogeneous values.
///
/// ```rust
/// use termtable::prelude::*;
///
/// let r = row!["name", 42, true, Cell::new("styled")];
/// assert_eq!(r.len(), 4);
/// ```
#[macro_export]
macro_rules! row {
    ($($value:expr),* $(,)?) => {
        $crate::row::Row::from(vec![$($crate::row::RowValue::from($value)),*])
    };
}

/// Render one logical row into aligned per-column line stacks.
///
/// Every cell renders at its allocated width; columns with fewer lines are
/// padded with blank width-wide lines until all stacks share the row's
/// maximum line count, which is returned alongside the stacks.
pub(crate) fn render_line_stacks(
    cells: &[&Cell],
    styles: &[CellStyle],
    widths: &[usize],
) -> (Vec<Vec<String>>, usize) {
    let mut stacks = Vec::with_capacity(cells.len());
    let mut line_count = 0;

    for ((cell, style), &width) in cells.iter().zip(styles).zip(widths) {
        let lines = cell.render(style, width);
        line_count = line_count.max(lines.len());
        stacks.push(lines);
    }

    for (stack, &width) in stacks.iter_mut().zip(widths) {
        while stack.len() < line_count {
            stack.push(" ".repeat(width));
        }
    }

    (stacks, line_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_value_conversions() {
        assert!(matches!(RowValue::from("text"), RowValue::Text(_)));
        assert!(matches!(RowValue::from(Cell::new("c")), RowValue::Cell(_)));
        let RowValue::Text(n) = RowValue::from(42) else {
            panic!("expected text");
        };
        assert_eq!(n, "42");
        let RowValue::Text(b) = RowValue::from(true) else {
            panic!("expected text");
        };
        assert_eq!(b, "true");
    }

    #[test]
    fn test_row_macro_heterogeneous() {
        let row = row!["a", 1, false, Cell::new("b").prefix("[")];
        assert_eq!(row.len(), 4);
    }

    #[test]
    fn test_render_line_stacks_pads_to_tallest() {
        let multi = Cell::new("Hello\nWorld");
        let single = Cell::new("Hello World");
        let styles = vec![CellStyle::new(), CellStyle::new()];

        let (stacks, line_count) =
            render_line_stacks(&[&multi, &single], &styles, &[5, 12]);

        assert_eq!(line_count, 2);
        assert_eq!(stacks[0], vec!["Hello", "World"]);
        assert_eq!(stacks[1], vec!["Hello World ", "            "]);
    }
}
