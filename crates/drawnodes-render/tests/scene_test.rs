use drawnodes_core::{Diagram, Dialect};
use drawnodes_render::{Primitive, Scene, SceneOptions, build_scene};

const TWO_NODES: &str = " __\n/  \\\na  |  c\n#  #  #";

fn colors(scene: &Scene) -> Vec<Option<&str>> {
    scene.groups.iter().map(|g| g.color.as_deref()).collect()
}

fn glyphs(scene: &Scene, group: usize) -> Vec<(f64, f64, &str)> {
    scene.groups[group]
        .primitives
        .iter()
        .filter_map(|p| match p {
            Primitive::Glyph { x, y, text } => Some((*x, *y, text.as_str())),
            _ => None,
        })
        .collect()
}

fn assert_glyphs(got: &[(f64, f64, &str)], want: &[(f64, f64, &str)]) {
    assert_eq!(got.len(), want.len(), "{got:?}");
    for (g, w) in got.iter().zip(want) {
        assert!(
            (g.0 - w.0).abs() < 1e-9 && (g.1 - w.1).abs() < 1e-9 && g.2 == w.2,
            "{got:?} != {want:?}"
        );
    }
}

#[test]
fn nodes_scene_layers_in_order() {
    let d = Diagram::parse("#  #\n|  |\n\\__/", Dialect::Nodes);
    let scene = build_scene(&d, &SceneOptions::default());
    assert_eq!(
        colors(&scene),
        vec![Some("#0000FF20"), Some("Red"), Some("#A6CEE3")]
    );
    assert_eq!(
        scene.groups[0].primitives,
        vec![
            Primitive::Body { x: 0, y: 3, xfar: 1 },
            Primitive::Body { x: 3, y: 3, xfar: 1 },
        ]
    );
    assert_glyphs(&glyphs(&scene, 1), &[(0.2, 3.1, "0"), (3.2, 3.1, "1")]);
    assert_eq!(scene.groups[1].height, 1.2);
}

#[test]
fn nodes_scene_marks_sinks_in_grey_and_shows_text() {
    let d = Diagram::parse("in\n#\n|\nX", Dialect::Nodes);
    let options = SceneOptions {
        text: Some("000000".to_string()),
        ..SceneOptions::default()
    };
    let scene = build_scene(&d, &options);
    assert_eq!(
        colors(&scene),
        vec![
            Some("#0000FF20"),
            Some("#000000"),
            Some("Red"),
            Some("Grey"),
            Some("#A6CEE3"),
        ]
    );
    assert_glyphs(&glyphs(&scene, 1), &[(0.0, 4.0, "i"), (1.0, 4.0, "n")]);
    assert_glyphs(&glyphs(&scene, 3), &[(0.0, 1.0, "X")]);
}

#[test]
fn bare_scene_keeps_only_traces() {
    let d = Diagram::parse("#  #\n|  |\n\\__/", Dialect::Nodes);
    let scene = build_scene(&d, &SceneOptions::bare());
    assert_eq!(colors(&scene), vec![Some("#A6CEE3")]);
}

#[test]
fn labeled_scene_draws_edge_labels_and_complements() {
    let d = Diagram::parse(TWO_NODES, Dialect::Labeled);
    let scene = build_scene(&d, &SceneOptions::default());
    assert_eq!(
        colors(&scene),
        vec![
            Some("#0000FF20"),
            Some("Red"),
            Some("Black"),
            Some("Grey"),
            Some("#A6CEE3"),
            Some("Black"),
        ]
    );
    assert_eq!(scene.groups[2].height, 1.1);
    assert_glyphs(&glyphs(&scene, 2), &[(0.0, 2.3, "a"), (3.0, 0.0, "a")]);
    assert_glyphs(&glyphs(&scene, 3), &[(6.0, 2.3, "c")]);
    // The labeled wire `a` runs up out of the first node and down into the second.
    assert_eq!(
        scene.groups[4].primitives,
        vec![
            Primitive::VBar { x: 0, y: 1, len: 1 },
            Primitive::Arc {
                x: 0,
                y: 3,
                dx: 1,
                dy: 0,
            },
            Primitive::HBar { x: 1, y: 3, len: 2 },
            Primitive::Arc {
                x: 3,
                y: 3,
                dx: 0,
                dy: 0,
            },
            Primitive::VBar { x: 3, y: 1, len: 1 },
        ]
    );
    assert_eq!(
        scene.groups[5].primitives,
        vec![
            Primitive::Complement { x: 0, y: 1 },
            Primitive::Complement { x: 3, y: 1 },
            Primitive::Complement { x: 6, y: 1 },
        ]
    );
}

#[test]
fn labeled_complement_sits_on_the_last_column() {
    let d = Diagram::parse("###", Dialect::Labeled);
    let scene = build_scene(&d, &SceneOptions::bare());
    assert_eq!(
        scene.groups.last().map(|g| g.primitives.clone()),
        Some(vec![Primitive::Complement { x: 2, y: 1 }])
    );
}

#[test]
fn labeled_crosses_follow_the_loci_layer() {
    let text = " __\n/  \\\na  |\n#  X";
    let d = Diagram::parse(text, Dialect::Labeled);

    let with_loci = build_scene(&d, &SceneOptions::default());
    assert!(with_loci.groups.iter().any(|g| g.color.is_none()));

    let without = build_scene(&d, &SceneOptions::bare());
    assert!(without.groups.iter().all(|g| g.color.is_some()));
}

#[test]
fn progression_scene_draws_paths_then_text() {
    let d = Diagram::parse(
        " ___\n/   \\\n|   |\na   |\n    |\n    b",
        Dialect::Progression,
    );
    let scene = build_scene(&d, &SceneOptions::default());
    assert_eq!(colors(&scene), vec![Some("#A6CEE3"), Some("Black")]);
    assert_glyphs(&glyphs(&scene, 1), &[(0.0, 3.0, "a"), (4.0, 1.0, "b")]);
    assert_eq!(scene.groups[1].height, 1.2);
}

#[test]
fn scene_serializes_with_kind_tags() {
    let d = Diagram::parse("#\n|\nX", Dialect::Nodes);
    let scene = build_scene(&d, &SceneOptions::bare());
    let json = serde_json::to_value(&scene).unwrap();
    assert_eq!(
        json["groups"][0]["primitives"][0],
        serde_json::json!({ "kind": "vBar", "x": 0, "y": 1, "len": 1 })
    );
}
