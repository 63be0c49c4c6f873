#![forbid(unsafe_code)]

//! Tracing, scene assembly and OpenSCAD output for drawnodes diagrams (headless).
//!
//! The pipeline for one diagram is
//! [`Diagram`] → [`build_scene`] (tracing included) → [`to_scad`], with [`Bounds`] and
//! [`Camera`] computed alongside for rasterization.

pub mod bounds;
pub mod geom;
pub mod palette;
pub mod primitive;
pub mod progression;
pub mod scad;
pub mod scene;
pub mod trace;

pub use bounds::{Bounds, Camera, CameraOptions};
pub use primitive::{ColorGroup, Primitive, Scene};
pub use scad::to_scad;
pub use scene::{SceneOptions, build_scene};
pub use trace::{RootSelection, Trace, TraceOptions, trace_diagram};

use drawnodes_core::{Diagram, Dialect, ResolveOptions, Section};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] drawnodes_core::Error),
    #[error("failed to format OpenSCAD output: {0}")]
    Fmt(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    pub resolve: ResolveOptions,
    pub scene: SceneOptions,
    pub camera: CameraOptions,
}

/// Everything produced for one `=name ... =` section.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedSection {
    pub name: String,
    pub scene: Scene,
    pub bounds: Bounds,
    pub camera: Camera,
    #[serde(skip)]
    pub scad: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Renders one section, letting its directives override `options`.
pub fn render_section(
    section: &Section,
    dialect: Dialect,
    options: &RenderOptions,
) -> Result<RenderedSection> {
    let diagram = section.diagram(dialect, &options.resolve);

    let mut scene_options = options.scene.clone();
    if let Some(colors) = &section.directives.colors {
        scene_options.trace.palette = Some(colors.clone());
    }
    let scene = build_scene(&diagram, &scene_options);

    let bounds = Bounds::of(&diagram);
    let camera_options = CameraOptions {
        border: section.directives.border.unwrap_or(options.camera.border),
        imgsize: section.directives.imgsize.or(options.camera.imgsize),
    };
    let mut camera = Camera::fit(&bounds, &camera_options);
    if let Some(eye) = section.directives.camera {
        camera = camera.with_eye(eye);
    }

    let scad = to_scad(&section.name, &scene)?;
    Ok(RenderedSection {
        name: section.name.clone(),
        scene,
        bounds,
        camera,
        scad,
        warnings: section.warnings.clone(),
    })
}

/// Reads a description file and renders every complete section.
///
/// `dialect` is parsed by name (`nodes`, `labeled`, `progression`).
pub fn render_text(
    text: &str,
    dialect: &str,
    options: &RenderOptions,
) -> Result<Vec<RenderedSection>> {
    let dialect: Dialect = dialect.parse()?;
    let source = drawnodes_core::parse_sections(text);
    source
        .sections
        .iter()
        .map(|s| render_section(s, dialect, options))
        .collect()
}

/// Convenience for single-diagram callers that already hold a [`Diagram`].
pub fn render_diagram(name: &str, diagram: &Diagram, options: &SceneOptions) -> Result<String> {
    to_scad(name, &build_scene(diagram, options))
}
