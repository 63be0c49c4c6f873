//! Scene assembly: the fixed group order for each dialect.

use crate::palette::Palette;
use crate::primitive::{ColorGroup, Primitive, Scene, y_out};
use crate::progression::build_paths;
use crate::trace::{TraceOptions, trace_diagram};
use drawnodes_core::color::normalize_color;
use drawnodes_core::labels::discover_edges;
use drawnodes_core::{Diagram, Dialect};

pub const DEFAULT_NODE_FILL: &str = "0000FF20";
pub const DEFAULT_LOCI: &str = "Red";

const BASE_HEIGHT: f64 = 1.0;
const LABEL_HEIGHT: f64 = 1.1;
const RAISED_HEIGHT: f64 = 1.2;

/// Optional layers of a scene. `None` leaves the layer out.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneOptions {
    pub node_fill: Option<String>,
    /// Color of the running junction numbers.
    pub loci: Option<String>,
    /// Color of free text rows.
    pub text: Option<String>,
    pub trace: TraceOptions,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            node_fill: Some(DEFAULT_NODE_FILL.to_string()),
            loci: Some(DEFAULT_LOCI.to_string()),
            text: None,
            trace: TraceOptions::default(),
        }
    }
}

impl SceneOptions {
    /// Options with every optional layer off; only traces (and dialect essentials) remain.
    pub fn bare() -> Self {
        Self {
            node_fill: None,
            loci: None,
            text: None,
            trace: TraceOptions::default(),
        }
    }
}

pub fn build_scene(diagram: &Diagram, options: &SceneOptions) -> Scene {
    let mut scene = Scene::new(diagram.height());
    match diagram.dialect() {
        Dialect::Nodes => {
            push_bodies(&mut scene, diagram, options);
            push_text(&mut scene, diagram, options);
            push_loci(&mut scene, diagram, options);
            scene.push(cross_marks(diagram, Some("Grey".to_string())));
            push_traces(&mut scene, diagram, options);
        }
        Dialect::Labeled => {
            push_bodies(&mut scene, diagram, options);
            push_text(&mut scene, diagram, options);
            if options.loci.is_some() {
                push_loci(&mut scene, diagram, options);
                scene.push(cross_marks(diagram, None));
            }
            push_edge_labels(&mut scene, diagram);
            push_traces(&mut scene, diagram, options);
            push_complements(&mut scene, diagram);
        }
        Dialect::Progression => {
            push_progression(&mut scene, diagram, options);
            let height = diagram.height();
            scene.push(
                ColorGroup::colored("Black", RAISED_HEIGHT).with_primitives(
                    diagram
                        .glyphs()
                        .iter()
                        .map(|g| Primitive::cell_glyph(g.col, y_out(height, g.row), g.ch)),
                ),
            );
        }
    }
    tracing::debug!(
        dialect = %diagram.dialect(),
        groups = scene.groups.len(),
        primitives = scene.primitive_count(),
        "assembled scene"
    );
    scene
}

fn push_bodies(scene: &mut Scene, diagram: &Diagram, options: &SceneOptions) {
    let Some(fill) = &options.node_fill else {
        return;
    };
    let height = diagram.height();
    scene.push(
        ColorGroup::colored(normalize_color(fill), BASE_HEIGHT).with_primitives(
            diagram.heads().map(|h| Primitive::Body {
                x: h.col,
                y: y_out(height, h.row),
                xfar: diagram.node_extent(h.index),
            }),
        ),
    );
}

fn push_text(scene: &mut Scene, diagram: &Diagram, options: &SceneOptions) {
    let Some(color) = &options.text else {
        return;
    };
    let height = diagram.height();
    scene.push(
        ColorGroup::colored(normalize_color(color), BASE_HEIGHT).with_primitives(
            diagram
                .glyphs()
                .iter()
                .map(|g| Primitive::cell_glyph(g.col, y_out(height, g.row), g.ch)),
        ),
    );
}

/// Running numbers on every connected mark.
fn push_loci(scene: &mut Scene, diagram: &Diagram, options: &SceneOptions) {
    let Some(color) = &options.loci else {
        return;
    };
    let height = diagram.height();
    scene.push(
        ColorGroup::colored(normalize_color(color), RAISED_HEIGHT).with_primitives(
            diagram
                .marks()
                .filter(|m| m.is_connected())
                .enumerate()
                .map(|(n, m)| {
                    Primitive::glyph(
                        m.col as f64 + 0.2,
                        y_out(height, m.row) as f64 + 0.1,
                        n.to_string(),
                    )
                }),
        ),
    );
}

fn cross_marks(diagram: &Diagram, color: Option<String>) -> ColorGroup {
    let height = diagram.height();
    ColorGroup::new(color, RAISED_HEIGHT).with_primitives(
        diagram
            .crosses()
            .map(|x| Primitive::cell_glyph(x.col, y_out(height, x.row), 'X')),
    )
}

/// Edge labels at both ends in black, unused outputs in grey.
fn push_edge_labels(scene: &mut Scene, diagram: &Diagram) {
    let height = diagram.height();
    let found = discover_edges(diagram);

    let mut used = ColorGroup::colored("Black", LABEL_HEIGHT);
    for e in &found.edges {
        let source = diagram.junction(e.source);
        let dest = diagram.junction(e.dest);
        used.primitives.push(Primitive::glyph(
            e.out_col as f64,
            y_out(height, source.row) as f64 + 1.3,
            e.label,
        ));
        used.primitives.push(Primitive::glyph(
            e.arrival_col as f64,
            y_out(height, dest.row + 1) as f64,
            e.label,
        ));
    }
    scene.push(used);

    scene.push(
        ColorGroup::colored("Grey", RAISED_HEIGHT).with_primitives(
            found.unused_outputs(diagram).into_iter().map(|o| {
                Primitive::glyph(o.col as f64, y_out(height, o.node_row) as f64 + 1.3, o.label)
            }),
        ),
    );
}

fn push_traces(scene: &mut Scene, diagram: &Diagram, options: &SceneOptions) {
    for trace in trace_diagram(diagram, &options.trace) {
        scene.push(ColorGroup::colored(trace.color, BASE_HEIGHT).with_primitives(trace.primitives));
    }
}

/// Complement dot on the last column of every node.
fn push_complements(scene: &mut Scene, diagram: &Diagram) {
    let height = diagram.height();
    scene.push(
        ColorGroup::colored("Black", BASE_HEIGHT).with_primitives(diagram.heads().map(|h| {
            Primitive::Complement {
                x: h.col + diagram.node_extent(h.index) - 1,
                y: y_out(height, h.row),
            }
        })),
    );
}

/// Label-driven paths when the drawing has label rows, plain traces otherwise.
fn push_progression(scene: &mut Scene, diagram: &Diagram, options: &SceneOptions) {
    let Some(paths) = build_paths(diagram) else {
        push_traces(scene, diagram, options);
        return;
    };
    let palette = Palette::new(options.trace.palette.as_deref());
    for (idx, path) in paths.iter().enumerate() {
        scene.push(
            ColorGroup::colored(palette.color(idx), BASE_HEIGHT)
                .with_primitives(path.primitives(diagram)),
        );
    }
}
