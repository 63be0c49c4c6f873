//! Bounding box of a diagram and the OpenSCAD camera that frames it.

use crate::geom::{Point, Size, point, size};
use drawnodes_core::Diagram;
use serde::Serialize;

/// OpenSCAD units per grid cell.
pub const SCALE: f64 = 10.0;

/// Border around the drawing, in percent of its size.
pub const DEFAULT_BORDER: f64 = 20.0;

/// Image pixels per OpenSCAD unit when the image size is derived.
const PIXELS_PER_UNIT: f64 = 10.0;

const IMAGE_STEP: u32 = 50;

/// Padded grid-space box: `(min_col, max_col, min_row, max_row)` plus the row count `max_y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Bounds {
    pub min_col: isize,
    pub max_col: isize,
    pub min_row: isize,
    pub max_row: isize,
    pub max_y: usize,
}

impl Bounds {
    /// Box over every placed junction, text glyph and edge label, padded by one column left,
    /// two right and one row on each side. An empty diagram gives all zeros.
    pub fn of(diagram: &Diagram) -> Self {
        let cells = diagram
            .placed()
            .map(|j| (j.row, j.col))
            .chain(diagram.glyphs().iter().map(|g| (g.row, g.col)))
            .chain(diagram.labels().keys().copied());

        let mut extent: Option<(usize, usize, usize, usize)> = None;
        for (row, col) in cells {
            extent = Some(match extent {
                None => (col, col, row, row),
                Some((c0, c1, r0, r1)) => (c0.min(col), c1.max(col), r0.min(row), r1.max(row)),
            });
        }

        let max_y = diagram.height();
        match extent {
            None => Self {
                max_y,
                ..Self::default()
            },
            Some((c0, c1, r0, r1)) => Self {
                min_col: c0 as isize - 1,
                max_col: c1 as isize + 2,
                min_row: r0 as isize - 1,
                max_row: r1 as isize + 1,
                max_y,
            },
        }
    }

    pub fn width(&self) -> f64 {
        (self.max_col - self.min_col) as f64
    }

    pub fn height(&self) -> f64 {
        (self.max_row - self.min_row) as f64
    }

    /// Center in OpenSCAD units, with the row axis inverted.
    pub fn center(&self) -> Point {
        point(
            (self.min_col + self.max_col) as f64 / 2.0 * SCALE,
            (self.max_y as f64 - (self.min_row + self.max_row) as f64 / 2.0) * SCALE,
        )
    }

    /// Size in OpenSCAD units including a border of `border` percent.
    pub fn padded(&self, border: f64) -> Size {
        let k = SCALE * (1.0 + border / 100.0);
        size(self.width() * k, self.height() * k)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraOptions {
    /// Border in percent of the drawing size.
    pub border: f64,
    /// Target image size; derived from the drawing when unset.
    pub imgsize: Option<(u32, u32)>,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            border: DEFAULT_BORDER,
            imgsize: None,
        }
    }
}

/// Orthographic camera looking straight down at `center` from `distance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    pub center: Point,
    pub distance: f64,
    pub imgsize: (u32, u32),
    /// Area the camera must cover.
    pub padded: Size,
}

impl Camera {
    /// Smallest distance whose visible area covers the padded bounds at the image aspect.
    pub fn fit(bounds: &Bounds, options: &CameraOptions) -> Self {
        let padded = bounds.padded(options.border);
        let imgsize = options.imgsize.unwrap_or_else(|| derived_imgsize(padded));
        let aspect = aspect(imgsize);
        let distance = (1.0 + aspect * aspect).sqrt() * (padded.width / aspect).max(padded.height);
        Self {
            center: bounds.center(),
            distance,
            imgsize,
            padded,
        }
    }

    /// Uses an explicit `(x, y, distance)` triple, keeping the derived image size.
    pub fn with_eye(mut self, eye: (f64, f64, f64)) -> Self {
        self.center = point(eye.0, eye.1);
        self.distance = eye.2;
        self
    }

    /// Visible area: `height = d / sqrt(1 + a²)`, `width = height · a`.
    pub fn visible(&self) -> Size {
        let a = aspect(self.imgsize);
        let h = self.distance / (1.0 + a * a).sqrt();
        size(h * a, h)
    }

    /// Whether an area of `area` centered on the camera is fully visible.
    pub fn frames(&self, area: Size) -> bool {
        const EPS: f64 = 1e-9;
        let v = self.visible();
        v.width + EPS >= area.width && v.height + EPS >= area.height
    }

    /// `--camera` argument for OpenSCAD: eye position followed by the look-at point.
    pub fn openscad_arg(&self) -> String {
        let (x, y, z) = (self.center.x, self.center.y, self.distance);
        format!("{x},{y},{z},{x},{y},0")
    }

    /// `--imgsize` argument for OpenSCAD.
    pub fn imgsize_arg(&self) -> String {
        format!("{},{}", self.imgsize.0, self.imgsize.1)
    }
}

fn aspect((w, h): (u32, u32)) -> f64 {
    if h == 0 { 1.0 } else { f64::from(w) / f64::from(h) }
}

fn derived_imgsize(padded: Size) -> (u32, u32) {
    let px = |units: f64| {
        let raw = (units * PIXELS_PER_UNIT).ceil().max(0.0) as u32;
        raw.div_ceil(IMAGE_STEP).max(1) * IMAGE_STEP
    };
    (px(padded.width), px(padded.height))
}
