//! Character grid with ragged rows.
//!
//! Rows keep their original lengths. Lookups outside a row (or outside the grid) return `None`,
//! which classification treats as an unknown neighbor rather than an error.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<char>>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a grid from already-split rows.
    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|r| r.as_ref().chars().collect())
                .collect(),
        }
    }

    /// Splits `text` on newlines. A single trailing newline does not create an extra row.
    pub fn parse(text: &str) -> Self {
        Self::from_rows(text.lines())
    }

    /// Number of rows. This is also the `max_y` used for row inversion.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, row: usize) -> Option<&[char]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        self.rows.get(row)?.get(col).copied()
    }

    /// Character at `(row + d_row, col + d_col)`, or `None` when the offset leaves the grid.
    pub fn neighbor(&self, row: usize, col: usize, d_row: isize, d_col: isize) -> Option<char> {
        let r = row.checked_add_signed(d_row)?;
        let c = col.checked_add_signed(d_col)?;
        self.get(r, c)
    }

    pub fn above(&self, row: usize, col: usize, d_col: isize) -> Option<char> {
        self.neighbor(row, col, -1, d_col)
    }

    pub fn below(&self, row: usize, col: usize) -> Option<char> {
        self.neighbor(row, col, 1, 0)
    }

    /// Cells strictly between two columns of one row, clipped to the row length.
    pub fn between(&self, row: usize, a: usize, b: usize) -> &[char] {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let Some(cells) = self.rows.get(row) else {
            return &[];
        };
        let start = (lo + 1).min(cells.len());
        let end = hi.min(cells.len());
        if start >= end {
            return &[];
        }
        &cells[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_outside_ragged_rows_are_none() {
        let g = Grid::parse("ab\nc");
        assert_eq!(g.height(), 2);
        assert_eq!(g.get(0, 1), Some('b'));
        assert_eq!(g.get(1, 1), None);
        assert_eq!(g.above(0, 0, 0), None);
        assert_eq!(g.above(1, 0, 1), Some('b'));
        assert_eq!(g.above(1, 0, -1), None);
        assert_eq!(g.below(1, 0), None);
    }

    #[test]
    fn between_excludes_both_ends_and_clips() {
        let g = Grid::parse("/___\\");
        assert_eq!(g.between(0, 0, 4), &['_', '_', '_']);
        assert_eq!(g.between(0, 4, 0), &['_', '_', '_']);
        assert_eq!(g.between(0, 3, 9), &['\\']);
        assert!(g.between(0, 1, 2).is_empty());
        assert!(g.between(5, 0, 3).is_empty());
    }
}
