use crate::classify::{Classification, classify};
use crate::dialect::Dialect;
use crate::grid::Grid;
use crate::junction::{Junction, JunctionId, JunctionKind, TextGlyph};
use crate::resolve::{ResolveOptions, resolve};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// A fully classified and connected diagram.
///
/// The only way to obtain one is [`Diagram::build`], which runs classification and connection
/// resolution to completion; consumers never see a partially connected graph.
#[derive(Debug, Clone, Serialize)]
pub struct Diagram {
    dialect: Dialect,
    height: usize,
    junctions: Vec<Junction>,
    glyphs: Vec<TextGlyph>,
    #[serde(serialize_with = "labels_as_glyphs")]
    labels: IndexMap<(usize, usize), char>,
    #[serde(skip)]
    grid: Grid,
}

impl Diagram {
    pub fn build(grid: Grid, dialect: Dialect, options: &ResolveOptions) -> Self {
        let Classification {
            mut junctions,
            glyphs,
            labels,
        } = classify(&grid, dialect);
        resolve(&mut junctions, &grid, dialect, options);
        Self {
            dialect,
            height: grid.height(),
            junctions,
            glyphs,
            labels,
            grid,
        }
    }

    pub fn from_rows<I, S>(rows: I, dialect: Dialect) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build(Grid::from_rows(rows), dialect, &ResolveOptions::default())
    }

    pub fn parse(text: &str, dialect: Dialect) -> Self {
        Self::build(Grid::parse(text), dialect, &ResolveOptions::default())
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Number of grid rows; `y = height - row` inverts the row axis.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// All junctions in scan order, sentinels included.
    pub fn junctions(&self) -> &[Junction] {
        &self.junctions
    }

    pub fn junction(&self, id: JunctionId) -> &Junction {
        &self.junctions[id]
    }

    pub fn glyphs(&self) -> &[TextGlyph] {
        &self.glyphs
    }

    pub fn labels(&self) -> &IndexMap<(usize, usize), char> {
        &self.labels
    }

    pub fn label_at(&self, row: usize, col: usize) -> Option<char> {
        self.labels.get(&(row, col)).copied()
    }

    /// Junctions with geometry (everything except row sentinels).
    pub fn placed(&self) -> impl Iterator<Item = &Junction> {
        self.junctions
            .iter()
            .filter(|j| j.kind != JunctionKind::Sentinel)
    }

    pub fn of_kind(&self, kind: JunctionKind) -> impl Iterator<Item = &Junction> {
        self.junctions.iter().filter(move |j| j.kind == kind)
    }

    /// Node heads and continuations, in scan order.
    pub fn marks(&self) -> impl Iterator<Item = &Junction> {
        self.junctions.iter().filter(|j| j.kind.is_mark())
    }

    pub fn heads(&self) -> impl Iterator<Item = &Junction> {
        self.of_kind(JunctionKind::Head)
    }

    pub fn crosses(&self) -> impl Iterator<Item = &Junction> {
        self.of_kind(JunctionKind::Cross)
    }

    /// Number of columns covered by the node starting at `head`: the head itself plus every
    /// immediately following continuation in the next column.
    pub fn node_extent(&self, head: JunctionId) -> usize {
        let origin = &self.junctions[head];
        let mut xfar = 1;
        while let Some(next) = self.junctions.get(head + xfar) {
            if next.kind != JunctionKind::Continuation
                || next.row != origin.row
                || next.col != origin.col + xfar
            {
                break;
            }
            xfar += 1;
        }
        xfar
    }

    /// The head owning a continuation: nearest earlier head in the same row.
    pub fn head_of(&self, id: JunctionId) -> Option<JunctionId> {
        let j = &self.junctions[id];
        if j.kind == JunctionKind::Head {
            return Some(id);
        }
        self.junctions[..id]
            .iter()
            .rev()
            .find(|h| h.row == j.row && h.kind == JunctionKind::Head)
            .map(|h| h.index)
    }

    /// Sorted, deduplicated output columns: the first column of every node and the last column
    /// of every multi-column node.
    pub fn output_columns(&self) -> Vec<usize> {
        let mut cols = Vec::new();
        for head in self.heads() {
            let xfar = self.node_extent(head.index);
            cols.push(head.col);
            if xfar > 1 {
                cols.push(head.col + xfar - 1);
            }
        }
        cols.sort_unstable();
        cols.dedup();
        cols
    }

    /// Number of registered (undirected) connections.
    pub fn connection_count(&self) -> usize {
        self.junctions
            .iter()
            .map(|j| j.connections.len())
            .sum::<usize>()
            / 2
    }
}

fn labels_as_glyphs<S: Serializer>(
    labels: &IndexMap<(usize, usize), char>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(
        labels
            .iter()
            .map(|(&(row, col), &ch)| TextGlyph::new(row, col, ch)),
    )
}
