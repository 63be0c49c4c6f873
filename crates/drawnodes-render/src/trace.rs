//! Cycle-safe tracing of the junction graph into colored primitive groups.
//!
//! A trace starts at a root junction and follows connections depth first. Every canonical edge
//! is drawn at most once per diagram, which both terminates cycles and keeps two roots from
//! drawing the same wire.

use crate::palette::{Palette, color_index};
use crate::primitive::{Primitive, y_out};
use drawnodes_core::{CanonicalEdge, Diagram, Dialect, Junction, JunctionId, JunctionKind};
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// Which partners of a root open traces first.
///
/// Partners on the other side are traced afterwards, so every connection reachable from a root
/// is drawn whichever selection is used. The selection decides which root owns a shared wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootSelection {
    /// Partners with a strictly greater index (below or right of the root).
    #[default]
    Following,
    /// Partners with a strictly smaller index (out of the top of a node).
    Preceding,
}

impl RootSelection {
    fn accepts(self, root: JunctionId, partner: JunctionId) -> bool {
        match self {
            Self::Following => partner > root,
            Self::Preceding => partner < root,
        }
    }
}

impl std::str::FromStr for RootSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "following" | "down" => Ok(Self::Following),
            "preceding" | "up" => Ok(Self::Preceding),
            other => Err(format!(
                "unknown root selection: {other} (expected following or preceding)"
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceOptions {
    pub roots: RootSelection,
    /// Custom trace colors; `None` (or an empty list) uses the built-in palette.
    pub palette: Option<Vec<String>>,
    /// Steps deeper than this below a root are dropped.
    pub max_depth: Option<usize>,
}

/// One top-level trace: everything reachable from a root through one starting connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub root: JunctionId,
    /// Column the trace leaves its root from; decides the color.
    pub origin_col: usize,
    pub color_index: usize,
    pub color: String,
    pub primitives: Vec<Primitive>,
}

/// Per-diagram tracing state.
pub struct Tracer<'a> {
    diagram: &'a Diagram,
    drawn: HashSet<CanonicalEdge>,
    max_depth: Option<usize>,
    truncated: usize,
}

impl<'a> Tracer<'a> {
    pub fn new(diagram: &'a Diagram) -> Self {
        Self {
            diagram,
            drawn: HashSet::default(),
            max_depth: None,
            truncated: 0,
        }
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn is_drawn(&self, a: &Junction, b: &Junction) -> bool {
        self.drawn.contains(&a.canonical_edge(b))
    }

    /// Number of edges drawn so far.
    pub fn drawn_count(&self) -> usize {
        self.drawn.len()
    }

    /// Steps skipped because of the depth limit.
    pub fn truncated(&self) -> usize {
        self.truncated
    }

    /// Traces the connection `from → to` and everything reachable past it.
    pub fn trace(&mut self, from: JunctionId, to: JunctionId) -> Vec<Primitive> {
        let mut out = Vec::new();
        let mut stack = vec![(from, to, 0usize)];

        while let Some((c, d, depth)) = stack.pop() {
            let cj = self.diagram.junction(c);
            let dj = self.diagram.junction(d);
            if !self.drawn.insert(cj.canonical_edge(dj)) {
                continue;
            }
            segment(self.diagram.height(), cj, dj, &mut out);

            if !continues_through(self.diagram.dialect(), dj.kind) {
                continue;
            }
            if self.max_depth.is_some_and(|max| depth >= max) {
                self.truncated += dj.connections.len();
                continue;
            }
            // Reversed so the first connection is walked first.
            stack.extend(dj.connections.iter().rev().map(|&e| (d, e, depth + 1)));
        }
        out
    }
}

fn continues_through(dialect: Dialect, kind: JunctionKind) -> bool {
    match dialect {
        Dialect::Nodes | Dialect::Labeled => kind.is_corner(),
        Dialect::Progression => kind.is_corner() || kind == JunctionKind::VerticalEnd,
    }
}

/// Primitives for one connection: the arc at `c` (corners only) plus the straight run to `d`.
pub fn segment(height: usize, c: &Junction, d: &Junction, out: &mut Vec<Primitive>) {
    if let Some(q) = c.kind.quadrant() {
        out.push(Primitive::Arc {
            x: c.col,
            y: y_out(height, c.row),
            dx: q.dx,
            dy: q.dy,
        });
    }
    if c.col != d.col {
        out.push(Primitive::HBar {
            x: c.col.min(d.col) + 1,
            y: y_out(height, c.row),
            len: c.col.abs_diff(d.col) - 1,
        });
    }
    if c.row != d.row {
        out.push(Primitive::VBar {
            x: c.col,
            y: y_out(height, c.row).min(y_out(height, d.row)),
            len: c.row.abs_diff(d.row) - 1,
        });
    }
}

/// Junctions that start traces: connected marks, or connected corners for the progression
/// dialect (which has no marks).
pub fn roots(diagram: &Diagram) -> impl Iterator<Item = &Junction> {
    let dialect = diagram.dialect();
    diagram.junctions().iter().filter(move |j| {
        j.is_connected()
            && match dialect {
                Dialect::Nodes | Dialect::Labeled => j.kind.is_mark(),
                Dialect::Progression => j.kind.is_corner(),
            }
    })
}

/// Traces the whole diagram. Every connection reachable from a root is drawn by exactly one
/// trace. Traces come back ordered by color index, ties in discovery order.
pub fn trace_diagram(diagram: &Diagram, options: &TraceOptions) -> Vec<Trace> {
    let mut tracer = Tracer::new(diagram).with_max_depth(options.max_depth);
    let mut found: Vec<(JunctionId, usize, Vec<Primitive>)> = Vec::new();

    // Preferred partners open traces first; the second pass draws whatever they left, such as
    // wires leaving the other side of a node.
    for preferred in [true, false] {
        for root in roots(diagram) {
            for &partner in &root.connections {
                if options.roots.accepts(root.index, partner) != preferred {
                    continue;
                }
                let primitives = tracer.trace(root.index, partner);
                if !primitives.is_empty() {
                    found.push((root.index, root.col, primitives));
                }
            }
        }
    }

    if tracer.truncated() > 0 {
        tracing::warn!(
            skipped = tracer.truncated(),
            max_depth = ?options.max_depth,
            "trace depth limit reached"
        );
    }

    let columns = match diagram.dialect() {
        Dialect::Progression => {
            let mut cols: Vec<usize> = found.iter().map(|(_, col, _)| *col).collect();
            cols.sort_unstable();
            cols.dedup();
            cols
        }
        Dialect::Nodes | Dialect::Labeled => diagram.output_columns(),
    };
    let palette = Palette::new(options.palette.as_deref());

    let mut traces: Vec<Trace> = found
        .into_iter()
        .map(|(root, origin_col, primitives)| {
            let color_index = color_index(&columns, origin_col);
            Trace {
                root,
                origin_col,
                color_index,
                color: palette.color(color_index),
                primitives,
            }
        })
        .collect();
    traces.sort_by_key(|t| t.color_index);

    tracing::debug!(
        traces = traces.len(),
        edges = tracer.drawn_count(),
        "traced diagram"
    );
    traces
}
