use drawnodes_core::{Dialect, JunctionKind, ResolveOptions, parse_sections};
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn fixture(name: &str) -> String {
    let path = workspace_root().join("fixtures").join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

#[test]
fn fixtures_nodes_sections() {
    let src = parse_sections(&fixture("nodes.txt"));
    assert!(src.warnings.is_empty());
    let names: Vec<_> = src.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["wire", "pair", "bus"]);

    let bus = &src.sections[2];
    assert_eq!(bus.directives.border, Some(20.0));
    assert_eq!(
        bus.directives.colors.as_deref(),
        Some(&["Red".to_string(), "#0000FF".to_string()][..])
    );

    let d = bus.diagram(Dialect::Nodes, &ResolveOptions::default());
    assert_eq!(d.heads().count(), 2);
    assert_eq!(d.crosses().count(), 1);
    assert_eq!(d.connection_count(), 4);
    assert_eq!(d.output_columns(), vec![0, 1, 4]);
}

#[test]
fn fixtures_single_wire() {
    let src = parse_sections(&fixture("nodes.txt"));
    let d = src.sections[0].diagram(Dialect::Nodes, &ResolveOptions::default());
    let heads: Vec<_> = d.heads().collect();
    assert_eq!(heads.len(), 2);
    assert_eq!(heads[0].connections, vec![heads[1].index]);
    assert_eq!(d.connection_count(), 1);
}

#[test]
fn fixtures_labeled_section() {
    let src = parse_sections(&fixture("labeled.txt"));
    let section = &src.sections[0];
    assert_eq!(section.directives.imgsize, Some((400, 300)));

    let d = section.diagram(Dialect::Labeled, &ResolveOptions::default());
    assert_eq!(d.labels().len(), 2);
    let found = drawnodes_core::labels::discover_edges(&d);
    assert_eq!(found.edges.len(), 1);
    assert_eq!(found.unused_outputs(&d).len(), 1);
}

#[test]
fn fixtures_progression_section() {
    let src = parse_sections(&fixture("progression.txt"));
    let d = src.sections[0].diagram(Dialect::Progression, &ResolveOptions::default());
    let kinds: Vec<_> = d.placed().map(|j| j.kind).collect();
    assert_eq!(
        kinds,
        vec![
            JunctionKind::UpperRight,
            JunctionKind::UpperLeft,
            JunctionKind::VerticalEnd,
            JunctionKind::VerticalEnd,
        ]
    );
    assert_eq!(d.connection_count(), 3);
    let text: String = d.glyphs().iter().map(|g| g.ch).collect();
    assert_eq!(text, "ab");
}
