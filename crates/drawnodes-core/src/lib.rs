#![forbid(unsafe_code)]

//! ASCII wiring-diagram model (headless).
//!
//! A drawing such as
//!
//! ```text
//!  __
//!  # \
//!    |
//!    X
//! ```
//!
//! is read into a [`Grid`], classified into typed [`Junction`]s and resolved into an
//! undirected junction graph. The result is a [`Diagram`], which renderers consume without
//! touching the characters again.
//!
//! Design goals:
//! - deterministic output: identical input yields identical junction numbering and connections
//! - no failure modes on odd drawings: ambiguous or dangling strokes are simply left unconnected

pub mod classify;
pub mod color;
pub mod diagram;
pub mod dialect;
pub mod error;
pub mod grid;
pub mod junction;
pub mod labels;
pub mod resolve;
pub mod source;

pub use diagram::Diagram;
pub use dialect::Dialect;
pub use error::{Error, Result};
pub use grid::Grid;
pub use junction::{CanonicalEdge, Junction, JunctionId, JunctionKind, Quadrant, TextGlyph};
pub use labels::{EdgeLabels, LabeledEdge, OutputLabel};
pub use resolve::ResolveOptions;
pub use source::{Directives, Section, SourceFile, parse_sections};

impl Section {
    /// Builds the diagram for this section's rows.
    pub fn diagram(&self, dialect: Dialect, options: &ResolveOptions) -> Diagram {
        Diagram::build(Grid::from_rows(&self.rows), dialect, options)
    }
}
