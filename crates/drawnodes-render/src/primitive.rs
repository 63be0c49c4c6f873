//! Drawing primitives in grid units.
//!
//! The row axis is inverted on output: `y = height - row`, so the top row of a drawing ends up
//! with the largest `y`.

use serde::Serialize;

/// `y` coordinate of a grid row.
pub fn y_out(height: usize, row: usize) -> usize {
    height.saturating_sub(row)
}

/// Grid row of an output `y` coordinate; inverse of [`y_out`] for rows inside the grid.
pub fn row_of(height: usize, y: usize) -> usize {
    height.saturating_sub(y)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Primitive {
    /// Quarter ring in cell `(x, y)`, centered on the cell corner `(x + dx, y + dy)`.
    Arc { x: usize, y: usize, dx: u8, dy: u8 },
    /// Horizontal stroke covering `len` cells starting at `x`.
    HBar { x: usize, y: usize, len: usize },
    /// Vertical stroke covering `len` cells above `y`.
    VBar { x: usize, y: usize, len: usize },
    /// Node body spanning `xfar` cells.
    Body { x: usize, y: usize, xfar: usize },
    Glyph { x: f64, y: f64, text: String },
    /// Complement (inversion) dot on a node output.
    Complement { x: usize, y: usize },
}

impl Primitive {
    pub fn glyph(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self::Glyph {
            x,
            y,
            text: text.into(),
        }
    }

    pub fn cell_glyph(col: usize, y: usize, ch: char) -> Self {
        Self::glyph(col as f64, y as f64, ch)
    }
}

/// Primitives sharing one color and extrusion height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorGroup {
    /// `None` leaves the renderer's default color.
    pub color: Option<String>,
    pub height: f64,
    pub primitives: Vec<Primitive>,
}

impl ColorGroup {
    pub fn new(color: Option<String>, height: f64) -> Self {
        Self {
            color,
            height,
            primitives: Vec::new(),
        }
    }

    pub fn colored(color: impl Into<String>, height: f64) -> Self {
        Self::new(Some(color.into()), height)
    }

    pub fn with_primitives(mut self, primitives: impl IntoIterator<Item = Primitive>) -> Self {
        self.primitives.extend(primitives);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

/// Ordered color groups for one diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    /// Row count of the source grid (`max_y`).
    pub height: usize,
    pub groups: Vec<ColorGroup>,
}

impl Scene {
    pub fn new(height: usize) -> Self {
        Self {
            height,
            groups: Vec::new(),
        }
    }

    /// Appends `group` unless it has nothing to draw.
    pub fn push(&mut self, group: ColorGroup) {
        if !group.is_empty() {
            self.groups.push(group);
        }
    }

    pub fn primitive_count(&self) -> usize {
        self.groups.iter().map(|g| g.primitives.len()).sum()
    }
}
