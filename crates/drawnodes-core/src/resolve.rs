//! Connection resolution over the junction arena.
//!
//! Every search scans forward from the junction's own index and takes the first match, so
//! "nearest" always means nearest in scan order after filtering by row or column.

use crate::dialect::Dialect;
use crate::grid::Grid;
use crate::junction::{Junction, JunctionId, JunctionKind};
use serde::{Deserialize, Serialize};

/// Default column distance under which two progression corners join without an `_` run.
///
/// Empirical: diagrams in the wild draw adjacent corners a few cells apart without an
/// underscore. Tune it through [`ResolveOptions::short_span`].
pub const DEFAULT_SHORT_SPAN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    pub short_span: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            short_span: DEFAULT_SHORT_SPAN,
        }
    }
}

/// Registers a symmetric connection. Registering an existing pair (or a self pair) is a no-op.
pub fn connect(junctions: &mut [Junction], a: JunctionId, b: JunctionId) {
    if a == b {
        return;
    }
    if !junctions[a].connections.contains(&b) {
        junctions[a].connections.push(b);
    }
    if !junctions[b].connections.contains(&a) {
        junctions[b].connections.push(a);
    }
}

pub fn resolve(junctions: &mut [Junction], grid: &Grid, dialect: Dialect, options: &ResolveOptions) {
    let mut links = 0usize;
    for idx in 0..junctions.len() {
        let kind = junctions[idx].kind;
        if seeks_horizontal(dialect, kind) {
            if let Some(other) = horizontal_partner(junctions, idx, grid, dialect, options) {
                connect(junctions, idx, other);
                links += 1;
            }
        }
        if seeks_vertical(dialect, kind) {
            if let Some(other) = vertical_partner(junctions, idx, dialect) {
                connect(junctions, idx, other);
                links += 1;
            }
        }
    }
    tracing::debug!(dialect = %dialect, links, "resolved connections");
}

fn seeks_horizontal(dialect: Dialect, kind: JunctionKind) -> bool {
    match dialect {
        Dialect::Nodes | Dialect::Labeled => {
            matches!(kind, JunctionKind::UpperLeft | JunctionKind::LowerLeft)
        }
        Dialect::Progression => kind.is_corner(),
    }
}

fn seeks_vertical(dialect: Dialect, kind: JunctionKind) -> bool {
    match dialect {
        Dialect::Nodes | Dialect::Labeled => matches!(
            kind,
            JunctionKind::UpperLeft
                | JunctionKind::UpperRight
                | JunctionKind::Head
                | JunctionKind::Continuation
        ),
        Dialect::Progression => kind.is_corner() || kind == JunctionKind::VerticalEnd,
    }
}

/// First later junction in the same row that closes the horizontal run of `junctions[idx]`.
pub fn horizontal_partner(
    junctions: &[Junction],
    idx: JunctionId,
    grid: &Grid,
    dialect: Dialect,
    options: &ResolveOptions,
) -> Option<JunctionId> {
    let me = &junctions[idx];
    junctions[idx + 1..]
        .iter()
        .filter(|j| j.row == me.row)
        .find(|j| match dialect {
            Dialect::Nodes | Dialect::Labeled => {
                matches!(j.kind, JunctionKind::UpperRight | JunctionKind::LowerRight)
            }
            Dialect::Progression => {
                j.kind.is_corner() && spans_run(grid, me.row, me.col, j.col, options.short_span)
            }
        })
        .map(|j| j.index)
}

/// First later junction in the same column that can end the vertical run of `junctions[idx]`.
pub fn vertical_partner(junctions: &[Junction], idx: JunctionId, dialect: Dialect) -> Option<JunctionId> {
    let me = &junctions[idx];
    junctions[idx + 1..]
        .iter()
        .filter(|j| j.col == me.col)
        .find(|j| match dialect {
            Dialect::Nodes | Dialect::Labeled => matches!(
                j.kind,
                JunctionKind::LowerLeft
                    | JunctionKind::LowerRight
                    | JunctionKind::Cross
                    | JunctionKind::Head
                    | JunctionKind::Continuation
            ),
            Dialect::Progression => j.kind.is_corner() || j.kind == JunctionKind::VerticalEnd,
        })
        .map(|j| j.index)
}

/// Whether the cells between two corners of one row read as a horizontal run: an `_` anywhere,
/// or a short gap with no intervening diagonal.
fn spans_run(grid: &Grid, row: usize, a: usize, b: usize, short_span: usize) -> bool {
    let between = grid.between(row, a, b);
    if between.contains(&'_') {
        return true;
    }
    let distance = a.abs_diff(b);
    distance <= short_span && !between.iter().any(|c| matches!(c, '/' | '\\'))
}
