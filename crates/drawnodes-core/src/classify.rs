//! Grid classification: cells → typed junctions, text glyphs and edge labels.
//!
//! Classification is order dependent. For `/` and `\` the lower corner test runs before the
//! upper one, and a `#` only starts a new node when the previous cell of the row was not `#`.

use crate::dialect::Dialect;
use crate::grid::Grid;
use crate::junction::{Junction, JunctionKind, TextGlyph};
use indexmap::IndexMap;

/// Output of [`classify`]: junctions without connections yet.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub junctions: Vec<Junction>,
    pub glyphs: Vec<TextGlyph>,
    /// Lowercase edge labels keyed by `(row, col)`, in scan order.
    pub labels: IndexMap<(usize, usize), char>,
}

pub fn classify(grid: &Grid, dialect: Dialect) -> Classification {
    let mut out = Classification::default();

    for (row, cells) in grid.rows().enumerate() {
        if dialect.collects_labels() {
            for (col, &ch) in cells.iter().enumerate() {
                if ch.is_ascii_lowercase() {
                    out.labels.insert((row, col), ch);
                }
            }
        }

        // Text rows hold no junctions, so they get no sentinel either.
        if !dialect.is_drawing_row(cells) {
            out.glyphs.extend(
                cells
                    .iter()
                    .enumerate()
                    .filter(|(_, ch)| !ch.is_whitespace())
                    .map(|(col, &ch)| TextGlyph::new(row, col, ch)),
            );
            continue;
        }

        let mut prev: Option<char> = None;
        for (col, &ch) in cells.iter().enumerate() {
            if let Some(kind) = classify_cell(grid, dialect, row, col, ch, prev) {
                let index = out.junctions.len();
                out.junctions.push(Junction::new(index, row, col, kind));
            }
            if dialect.is_inline_text(ch) {
                out.glyphs.push(TextGlyph::new(row, col, ch));
            }
            prev = Some(ch);
        }

        // Caps mark runs so extent scans stop inside the arena.
        let index = out.junctions.len();
        out.junctions
            .push(Junction::new(index, row, cells.len(), JunctionKind::Sentinel));
    }

    tracing::debug!(
        dialect = %dialect,
        junctions = out.junctions.len(),
        glyphs = out.glyphs.len(),
        labels = out.labels.len(),
        "classified grid"
    );
    out
}

fn above_is(grid: &Grid, row: usize, col: usize, d_col: isize, set: &str) -> bool {
    grid.above(row, col, d_col).is_some_and(|c| set.contains(c))
}

fn classify_cell(
    grid: &Grid,
    dialect: Dialect,
    row: usize,
    col: usize,
    ch: char,
    prev: Option<char>,
) -> Option<JunctionKind> {
    match dialect {
        Dialect::Nodes | Dialect::Labeled => match ch {
            '/' if above_is(grid, row, col, 0, "|#\\") => Some(JunctionKind::LowerRight),
            '/' if above_is(grid, row, col, 1, "_") => Some(JunctionKind::UpperLeft),
            '\\' if above_is(grid, row, col, 0, "|#/") => Some(JunctionKind::LowerLeft),
            '\\' if above_is(grid, row, col, -1, "_") => Some(JunctionKind::UpperRight),
            '#' if prev == Some('#') => Some(JunctionKind::Continuation),
            '#' => Some(JunctionKind::Head),
            'X' => Some(JunctionKind::Cross),
            _ => None,
        },
        Dialect::Progression => {
            let below_bar = grid.below(row, col) == Some('|');
            match ch {
                '/' if above_is(grid, row, col, 0, "|\\") => Some(JunctionKind::LowerRight),
                '/' if below_bar => Some(JunctionKind::UpperRight),
                '/' if above_is(grid, row, col, 1, "_") => Some(JunctionKind::UpperLeft),
                '\\' if above_is(grid, row, col, 0, "|/") => Some(JunctionKind::LowerLeft),
                '\\' if below_bar => Some(JunctionKind::UpperLeft),
                '\\' if above_is(grid, row, col, -1, "_") => Some(JunctionKind::UpperRight),
                '|' if !below_bar => Some(JunctionKind::VerticalEnd),
                _ => None,
            }
        }
    }
}
