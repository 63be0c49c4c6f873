use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Drawing conventions of one input family.
///
/// - `Nodes`: `#` node bodies, `X` sinks, corners joined by `_` runs.
/// - `Labeled`: `Nodes` plus lowercase edge labels mixed into drawing rows.
/// - `Progression`: no node bodies; plain `|` runs between corners, labels as text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Nodes,
    Labeled,
    Progression,
}

const NODE_ALPHABET: &str = "X#|_ /\\";
const LABELED_DRAWING: &str = "X#_ /\\";
const EDGE_CHARS: &str = "|/\\_";

impl Dialect {
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Nodes => "nodes",
            Dialect::Labeled => "labeled",
            Dialect::Progression => "progression",
        }
    }

    /// Whether `row` is scanned for junctions. Rows that are not scanned contribute text only.
    pub fn is_drawing_row(self, row: &[char]) -> bool {
        match self {
            Dialect::Nodes => row.iter().all(|c| NODE_ALPHABET.contains(*c)),
            Dialect::Labeled => {
                let has_drawing = row.iter().any(|c| LABELED_DRAWING.contains(*c));
                let has_other = row.iter().any(|&c| {
                    !NODE_ALPHABET.contains(c) && !c.is_whitespace() && !c.is_ascii_lowercase()
                });
                has_drawing && !has_other
            }
            Dialect::Progression => true,
        }
    }

    /// Whether `ch` at a scanned position is also reported as a free-floating text glyph.
    ///
    /// Only the progression dialect mixes text into scanned rows; the node dialects report
    /// text through whole non-drawing rows instead.
    pub fn is_inline_text(self, ch: char) -> bool {
        match self {
            Dialect::Progression => !EDGE_CHARS.contains(ch) && !ch.is_whitespace(),
            Dialect::Nodes | Dialect::Labeled => false,
        }
    }

    /// Whether lowercase letters are collected as edge labels.
    pub fn collects_labels(self) -> bool {
        matches!(self, Dialect::Labeled)
    }

    pub fn has_marks(self) -> bool {
        !matches!(self, Dialect::Progression)
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nodes" | "basic" => Ok(Self::Nodes),
            "labeled" | "labelled" => Ok(Self::Labeled),
            "progression" => Ok(Self::Progression),
            other => Err(Error::UnknownDialect {
                name: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
