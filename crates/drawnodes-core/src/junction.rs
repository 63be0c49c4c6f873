//! Junction records and the identities derived from them.

use serde::{Deserialize, Serialize};

/// Position of a junction in the junction arena. Equal to its scan-order number.
pub type JunctionId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JunctionKind {
    UpperRight,
    LowerRight,
    UpperLeft,
    LowerLeft,
    /// Row terminator; carries no geometry and matches no search.
    Sentinel,
    /// `X`: an unconnected sink/input indicator.
    Cross,
    /// First `#` of a node body.
    Head,
    /// `#` directly following another `#` in the same row.
    Continuation,
    /// Last `|` of a vertical run.
    VerticalEnd,
}

impl JunctionKind {
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Self::UpperRight | Self::LowerRight | Self::UpperLeft | Self::LowerLeft
        )
    }

    pub fn is_mark(self) -> bool {
        matches!(self, Self::Head | Self::Continuation)
    }

    /// Terminal kinds end a trace: marks, `X` and vertical-run ends.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Cross | Self::Head | Self::Continuation | Self::VerticalEnd
        )
    }

    /// Corner code as used by the quadrant bits: UR=0, LR=1, UL=2, LL=3.
    pub fn corner_code(self) -> Option<u8> {
        match self {
            Self::UpperRight => Some(0),
            Self::LowerRight => Some(1),
            Self::UpperLeft => Some(2),
            Self::LowerLeft => Some(3),
            _ => None,
        }
    }

    /// `(dx, dy)` offset of the arc center for a corner, in cell units.
    pub fn quadrant(self) -> Option<Quadrant> {
        let code = self.corner_code()?;
        Some(Quadrant {
            dx: code >> 1,
            dy: code & 1,
        })
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Self::UpperRight => "UR",
            Self::LowerRight => "LR",
            Self::UpperLeft => "UL",
            Self::LowerLeft => "LL",
            Self::Sentinel => "--",
            Self::Cross => "XM",
            Self::Head => "HM",
            Self::Continuation => "HX",
            Self::VerticalEnd => "VL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quadrant {
    pub dx: u8,
    pub dy: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Junction {
    pub index: JunctionId,
    pub row: usize,
    pub col: usize,
    pub kind: JunctionKind,
    /// Directly reachable junctions, in registration order.
    pub connections: Vec<JunctionId>,
}

impl Junction {
    pub fn new(index: JunctionId, row: usize, col: usize, kind: JunctionKind) -> Self {
        Self {
            index,
            row,
            col,
            kind,
            connections: Vec::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        !self.connections.is_empty()
    }

    pub fn canonical_edge(&self, other: &Junction) -> CanonicalEdge {
        CanonicalEdge::between(self, other)
    }
}

impl std::fmt::Display for Junction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:2} {:2} {:2} {}",
            self.index,
            self.row,
            self.col,
            self.kind.short_name()
        )
    }
}

/// Order-independent identity of a connection: `(min_col, max_col, min_row, max_row)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CanonicalEdge {
    pub min_col: usize,
    pub max_col: usize,
    pub min_row: usize,
    pub max_row: usize,
}

impl CanonicalEdge {
    pub fn between(a: &Junction, b: &Junction) -> Self {
        Self {
            min_col: a.col.min(b.col),
            max_col: a.col.max(b.col),
            min_row: a.row.min(b.row),
            max_row: a.row.max(b.row),
        }
    }
}

/// A character outside the junction alphabet, kept for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextGlyph {
    pub row: usize,
    pub col: usize,
    pub ch: char,
}

impl TextGlyph {
    pub fn new(row: usize, col: usize, ch: char) -> Self {
        Self { row, col, ch }
    }
}
