#![forbid(unsafe_code)]

//! `drawnodes` turns ASCII wiring sketches into OpenSCAD scripts.
//!
//! A sketch is split into `=name ... =` sections; each section is classified into junctions,
//! its connections are resolved and traced, and the resulting colored primitives are written
//! as an OpenSCAD script.
//!
//! # Features
//!
//! - `render`: enable tracing, scene assembly and OpenSCAD output (`drawnodes::render`)
//! - `raster`: enable PNG output by running the external `openscad` binary

pub use drawnodes_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use drawnodes_render::bounds::{Bounds, Camera, CameraOptions};
    pub use drawnodes_render::primitive::{ColorGroup, Primitive, Scene};
    pub use drawnodes_render::progression::{Path, build_paths};
    pub use drawnodes_render::scene::{SceneOptions, build_scene};
    pub use drawnodes_render::trace::{RootSelection, Trace, TraceOptions, trace_diagram};
    pub use drawnodes_render::{
        Error as RenderError, RenderOptions, RenderedSection, render_section, to_scad,
    };

    use drawnodes_core::{Diagram, Dialect, Grid};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Parse(#[from] drawnodes_core::Error),
        #[error(transparent)]
        Render(#[from] drawnodes_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Converts a section name into a file stem that is safe on every platform.
    ///
    /// Unsupported characters become `-`, runs of `-` collapse, and an empty result falls back
    /// to `untitled`.
    pub fn sanitize_file_stem(raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        for ch in raw.trim().chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.';
            out.push(if ok { ch } else { '-' });
        }
        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches(|c| c == '-' || c == '.');
        if out.is_empty() {
            return "untitled".to_string();
        }
        out.to_string()
    }

    /// Renders every complete section of `text`; `dialect` is parsed by name.
    pub fn render_sections(
        text: &str,
        dialect: &str,
        options: &RenderOptions,
    ) -> Result<Vec<RenderedSection>> {
        Ok(drawnodes_render::render_text(text, dialect, options)?)
    }

    /// Classifies, traces and writes one bare drawing (no section markers).
    pub fn render_scad(
        name: &str,
        rows: &str,
        dialect: Dialect,
        options: &RenderOptions,
    ) -> Result<String> {
        let diagram = Diagram::build(Grid::parse(rows), dialect, &options.resolve);
        Ok(drawnodes_render::render_diagram(
            name,
            &diagram,
            &options.scene,
        )?)
    }

    /// Bundles the options used for every section of a file.
    #[derive(Debug, Clone, Default)]
    pub struct HeadlessRenderer {
        pub dialect: Dialect,
        pub options: RenderOptions,
    }

    impl HeadlessRenderer {
        pub fn new(dialect: Dialect) -> Self {
            Self {
                dialect,
                options: RenderOptions::default(),
            }
        }

        pub fn with_options(mut self, options: RenderOptions) -> Self {
            self.options = options;
            self
        }

        pub fn parse(&self, text: &str) -> Vec<Diagram> {
            drawnodes_core::parse_sections(text)
                .sections
                .iter()
                .map(|s| s.diagram(self.dialect, &self.options.resolve))
                .collect()
        }

        pub fn render(&self, text: &str) -> Result<Vec<RenderedSection>> {
            drawnodes_core::parse_sections(text)
                .sections
                .iter()
                .map(|s| Ok(render_section(s, self.dialect, &self.options)?))
                .collect()
        }

        #[cfg(feature = "raster")]
        pub fn render_png(
            &self,
            section: &RenderedSection,
            dir: &std::path::Path,
            raster: &raster::RasterOptions,
        ) -> raster::Result<std::path::PathBuf> {
            raster::render_png(section, dir, raster)
        }
    }
}
