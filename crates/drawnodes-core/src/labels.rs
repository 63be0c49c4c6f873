//! Edge labels for the labeled dialect.
//!
//! Output labels sit on the row directly above the topmost node row. Each node pairs its output
//! labels (left to right) with its upward connections (left to right) and follows every paired
//! connection to the node it ends on.

use crate::diagram::Diagram;
use crate::junction::{CanonicalEdge, JunctionId, JunctionKind};
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputLabel {
    /// Row of the node the label belongs to.
    pub node_row: usize,
    pub col: usize,
    pub label: char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledEdge {
    pub label: char,
    /// Head of the node the edge leaves.
    pub source: JunctionId,
    /// Column of the output label.
    pub out_col: usize,
    /// Head (or orphan continuation) of the node the edge arrives at.
    pub dest: JunctionId,
    /// Column at which the trace arrives at the destination node.
    pub arrival_col: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeLabels {
    pub edges: Vec<LabeledEdge>,
    /// Every output label found, used or not, in discovery order.
    pub outputs: Vec<OutputLabel>,
}

impl EdgeLabels {
    /// Output labels that did not produce an edge.
    pub fn unused_outputs(&self, diagram: &Diagram) -> Vec<OutputLabel> {
        let used: HashSet<(usize, usize)> = self
            .edges
            .iter()
            .map(|e| (diagram.junction(e.source).row, e.out_col))
            .collect();
        self.outputs
            .iter()
            .filter(|o| !used.contains(&(o.node_row, o.col)))
            .copied()
            .collect()
    }
}

/// Row that carries output labels: the row above the topmost mark junction.
pub fn label_row(diagram: &Diagram) -> Option<usize> {
    diagram.marks().map(|m| m.row).min()?.checked_sub(1)
}

pub fn discover_edges(diagram: &Diagram) -> EdgeLabels {
    let mut out = EdgeLabels::default();
    let label_row = label_row(diagram);

    for head in diagram.heads() {
        let end_col = head.col + diagram.node_extent(head.index);
        let in_extent = |row: usize, col: usize| row == head.row && (head.col..end_col).contains(&col);

        let mut output_labels: Vec<(usize, char)> = Vec::new();
        if let Some(label_row) = label_row {
            for (&(row, col), &label) in diagram.labels() {
                if row == label_row && (head.col..end_col).contains(&col) {
                    output_labels.push((col, label));
                    out.outputs.push(OutputLabel {
                        node_row: head.row,
                        col,
                        label,
                    });
                }
            }
        }
        output_labels.sort_by_key(|(col, _)| *col);

        let mut upward: Vec<(JunctionId, JunctionId)> = Vec::new();
        for j in diagram.marks().filter(|j| in_extent(j.row, j.col)) {
            for &d in &j.connections {
                if d <= j.index {
                    upward.push((j.index, d));
                }
            }
        }
        upward.sort_by_key(|&(from, _)| diagram.junction(from).col);

        for (&(out_col, label), &(from, to)) in output_labels.iter().zip(&upward) {
            let Some((dest, arrival_col)) = find_destination(diagram, from, to) else {
                continue;
            };
            if !diagram.junction(dest).kind.is_mark() {
                continue;
            }
            out.edges.push(LabeledEdge {
                label,
                source: head.index,
                out_col,
                dest,
                arrival_col,
            });
        }
    }

    tracing::debug!(
        edges = out.edges.len(),
        outputs = out.outputs.len(),
        "discovered labeled edges"
    );
    out
}

/// Follows the connection `from → to` through corners until the first terminal junction.
///
/// Returns the terminal (continuations resolved to their head) and the column of the junction
/// the trace arrived from. Each canonical edge is walked at most once.
pub fn find_destination(
    diagram: &Diagram,
    from: JunctionId,
    to: JunctionId,
) -> Option<(JunctionId, usize)> {
    let mut visited: HashSet<CanonicalEdge> = HashSet::default();
    let mut stack = vec![(from, to)];

    while let Some((c, d)) = stack.pop() {
        let cj = diagram.junction(c);
        let dj = diagram.junction(d);
        if !visited.insert(cj.canonical_edge(dj)) {
            continue;
        }
        if dj.kind.is_terminal() {
            let dest = match dj.kind {
                JunctionKind::Continuation => diagram.head_of(d).unwrap_or(d),
                _ => d,
            };
            return Some((dest, cj.col));
        }
        if dj.kind.is_corner() {
            stack.extend(dj.connections.iter().rev().map(|&e| (d, e)));
        }
    }
    None
}
