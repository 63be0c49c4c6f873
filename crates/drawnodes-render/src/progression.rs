//! Label-driven paths for progression diagrams.
//!
//! A progression drawing has a row of output labels and, further down, a row of input labels.
//! Every output label owns one path: up from the label to the top corner, across to the far
//! corner, then down towards the input row.
//!
//! ```text
//!  ___
//! /   \
//! |   |
//! a   |
//!     |
//!     b
//! ```

use crate::primitive::{Primitive, y_out};
use drawnodes_core::{CanonicalEdge, Diagram, Junction, JunctionId, JunctionKind};
use rustc_hash::FxBuildHasher;
use serde::Serialize;

type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// Output and input label rows of a progression diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelRows {
    pub output_row: usize,
    pub input_row: usize,
    /// Output labels in column order.
    pub outputs: Vec<(usize, char)>,
}

/// Finds the first two rows holding path labels.
///
/// A lowercase glyph counts as a label when it is `x` (an unconnected input) or sits directly
/// below `|`, `/` or `\`. Returns `None` with fewer than two such rows.
pub fn label_rows(diagram: &Diagram) -> Option<LabelRows> {
    let grid = diagram.grid();
    let mut rows: Vec<usize> = Vec::new();
    let mut labels: Vec<(usize, usize, char)> = Vec::new();

    for g in diagram.glyphs() {
        if !g.ch.is_ascii_lowercase() {
            continue;
        }
        let under_edge = grid
            .above(g.row, g.col, 0)
            .is_some_and(|c| matches!(c, '|' | '/' | '\\'));
        if g.ch == 'x' || under_edge {
            labels.push((g.row, g.col, g.ch));
            rows.push(g.row);
        }
    }
    rows.sort_unstable();
    rows.dedup();
    let (&output_row, &input_row) = (rows.first()?, rows.get(1)?);

    let mut outputs: Vec<(usize, char)> = labels
        .iter()
        .filter(|(row, _, _)| *row == output_row)
        .map(|&(_, col, ch)| (col, ch))
        .collect();
    outputs.sort_by_key(|(col, _)| *col);

    Some(LabelRows {
        output_row,
        input_row,
        outputs,
    })
}

/// One output label's path as a list of traversed connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Path {
    pub label: char,
    pub start_row: usize,
    pub start_col: usize,
    pub segments: Vec<(JunctionId, JunctionId)>,
    /// `(row, col)` of the input the path reached, if it got there.
    pub end: Option<(usize, usize)>,
}

impl Path {
    pub fn is_complete(&self) -> bool {
        self.end.is_some()
    }

    /// Emits the path's strokes.
    ///
    /// Horizontal segments draw arcs at both ends with the quadrants swapped so they bend
    /// toward the bar. An arc already drawn by the previous horizontal segment is not repeated.
    pub fn primitives(&self, diagram: &Diagram) -> Vec<Primitive> {
        let height = diagram.height();
        let mut out = Vec::new();
        let Some(&(first, _)) = self.segments.first() else {
            return out;
        };

        let first = diagram.junction(first);
        if first.row < self.start_row {
            out.push(Primitive::VBar {
                x: self.start_col,
                y: y_out(height, first.row).min(y_out(height, self.start_row)),
                len: self.start_row - first.row,
            });
        }

        let mut prev: Option<(&Junction, &Junction)> = None;
        for &(c, d) in &self.segments {
            let (c, d) = (diagram.junction(c), diagram.junction(d));
            let after_horizontal = prev.is_some_and(|(pc, pd)| {
                pc.col != pd.col && pc.row == pd.row && pd.row == c.row
            });

            if c.col != d.col && c.row == d.row {
                if c.kind.is_corner() && !after_horizontal {
                    push_arc(&mut out, height, c, d.kind);
                }
                out.push(Primitive::HBar {
                    x: c.col.min(d.col) + 1,
                    y: y_out(height, c.row),
                    len: c.col.abs_diff(d.col) - 1,
                });
                if d.kind.is_corner() {
                    push_arc(&mut out, height, d, c.kind);
                }
            } else {
                if c.kind.is_corner() && !after_horizontal {
                    push_arc(&mut out, height, c, c.kind);
                }
                if c.row != d.row {
                    out.push(Primitive::VBar {
                        x: c.col,
                        y: y_out(height, c.row).min(y_out(height, d.row)),
                        len: c.row.abs_diff(d.row) - 1,
                    });
                }
            }
            prev = Some((c, d));
        }

        if let (Some((end_row, _)), Some(&(_, last))) = (self.end, self.segments.last()) {
            let last = diagram.junction(last);
            if last.row < end_row {
                out.push(Primitive::VBar {
                    x: last.col,
                    y: y_out(height, last.row).min(y_out(height, end_row)),
                    len: end_row - last.row,
                });
            }
        }
        out
    }
}

/// Arc in `at`'s cell using the quadrant of `kind`.
fn push_arc(out: &mut Vec<Primitive>, height: usize, at: &Junction, kind: JunctionKind) {
    if let Some(q) = kind.quadrant() {
        out.push(Primitive::Arc {
            x: at.col,
            y: y_out(height, at.row),
            dx: q.dx,
            dy: q.dy,
        });
    }
}

/// Builds one path per output label, or `None` when the diagram has no label rows.
pub fn build_paths(diagram: &Diagram) -> Option<Vec<Path>> {
    let rows = label_rows(diagram)?;
    let paths: Vec<Path> = rows
        .outputs
        .iter()
        .map(|&(col, label)| PathWalk::new(diagram, &rows).walk(label, col))
        .collect();
    tracing::debug!(
        output_row = rows.output_row,
        input_row = rows.input_row,
        paths = paths.len(),
        complete = paths.iter().filter(|p| p.is_complete()).count(),
        "built progression paths"
    );
    Some(paths)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vertical {
    Up,
    Down,
}

struct PathWalk<'a> {
    diagram: &'a Diagram,
    rows: &'a LabelRows,
    visited: HashSet<CanonicalEdge>,
    segments: Vec<(JunctionId, JunctionId)>,
}

impl<'a> PathWalk<'a> {
    fn new(diagram: &'a Diagram, rows: &'a LabelRows) -> Self {
        Self {
            diagram,
            rows,
            visited: HashSet::default(),
            segments: Vec::new(),
        }
    }

    fn walk(mut self, label: char, col: usize) -> Path {
        let end = self.phases(col).map(|end_col| (self.rows.input_row, end_col));
        Path {
            label,
            start_row: self.rows.output_row,
            start_col: col,
            segments: self.segments,
            end,
        }
    }

    fn phases(&mut self, col: usize) -> Option<usize> {
        let start = self.start(col)?;
        let top = self.up(start)?;
        let far = self.across(top)?;
        self.down(far)
    }

    /// The vertical-line-end in `col` at or above the output row, closest to it.
    fn start(&self, col: usize) -> Option<JunctionId> {
        self.diagram
            .of_kind(JunctionKind::VerticalEnd)
            .filter(|j| j.col == col && j.row <= self.rows.output_row)
            .max_by_key(|j| j.row)
            .map(|j| j.index)
    }

    /// Records `c → d` unless it was already walked.
    fn step(&mut self, c: JunctionId, d: JunctionId) -> bool {
        let edge = self
            .diagram
            .junction(c)
            .canonical_edge(self.diagram.junction(d));
        if !self.visited.insert(edge) {
            return false;
        }
        self.segments.push((c, d));
        true
    }

    fn nearest(&self, from: JunctionId, dir: Vertical) -> Option<JunctionId> {
        let at = self.diagram.junction(from);
        let same_col = self
            .diagram
            .placed()
            .filter(|j| j.col == at.col && j.index != at.index);
        match dir {
            Vertical::Up => same_col.filter(|j| j.row < at.row).max_by_key(|j| j.row),
            Vertical::Down => same_col.filter(|j| j.row > at.row).min_by_key(|j| j.row),
        }
        .map(|j| j.index)
    }

    fn up(&mut self, mut c: JunctionId) -> Option<JunctionId> {
        loop {
            let d = self.nearest(c, Vertical::Up)?;
            if !self.step(c, d) {
                return None;
            }
            match self.diagram.junction(d).kind {
                k if k.is_corner() => return Some(d),
                JunctionKind::VerticalEnd => c = d,
                _ => return None,
            }
        }
    }

    fn across(&mut self, c: JunctionId) -> Option<JunctionId> {
        let top = self.diagram.junction(c);
        let mut horizontal: Vec<&Junction> = top
            .connections
            .iter()
            .map(|&d| self.diagram.junction(d))
            .filter(|d| d.row == top.row && d.col != top.col)
            .collect();
        match top.kind {
            JunctionKind::UpperRight => horizontal.sort_by_key(|d| std::cmp::Reverse(d.col)),
            JunctionKind::UpperLeft => horizontal.sort_by_key(|d| d.col),
            _ => {}
        }
        let candidates: Vec<(JunctionId, bool)> = horizontal
            .iter()
            .map(|d| (d.index, d.kind.is_corner()))
            .collect();

        for (d, is_corner) in candidates {
            if self.step(c, d) && is_corner {
                return Some(d);
            }
        }
        None
    }

    fn down(&mut self, mut c: JunctionId) -> Option<usize> {
        loop {
            let d = self.nearest(c, Vertical::Down)?;
            if !self.step(c, d) {
                return None;
            }
            let dj = self.diagram.junction(d);
            match dj.kind {
                JunctionKind::VerticalEnd if dj.row + 1 >= self.rows.input_row => {
                    return Some(dj.col);
                }
                k if k.is_corner() || k == JunctionKind::VerticalEnd => c = d,
                _ => return None,
            }
        }
    }
}
