#![cfg(feature = "render")]

use drawnodes::Dialect;
use drawnodes::render::{
    HeadlessRenderer, RenderOptions, render_scad, render_sections, sanitize_file_stem,
};

const FILE: &str = "\
=first
#  #
|  |
\\__/
=
=second
@colors=Green
#
|
X
=
=dangling
#
";

#[test]
fn every_closed_section_is_rendered() {
    let sections = render_sections(FILE, "nodes", &RenderOptions::default()).unwrap();
    let names: Vec<_> = sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second"]);
    assert!(sections[0].scad.contains("color(c=\"#A6CEE3\")"));
    assert!(sections[1].scad.contains("color(c=\"Green\")"));
}

#[test]
fn unknown_dialect_is_an_error() {
    assert!(render_sections(FILE, "flowchart", &RenderOptions::default()).is_err());
}

#[test]
fn bare_rows_render_without_sections() {
    let scad = render_scad("wire", "#\n|\nX", Dialect::Nodes, &RenderOptions::default()).unwrap();
    assert!(scad.starts_with("// File wire, generated by drawnodes\n"));
    assert!(scad.contains("drawV(0, 1, 1);"));
}

#[test]
fn renderer_parses_and_renders_the_same_sections() {
    let renderer = HeadlessRenderer::new(Dialect::Nodes);
    let diagrams = renderer.parse(FILE);
    let rendered = renderer.render(FILE).unwrap();
    assert_eq!(diagrams.len(), rendered.len());
    assert_eq!(diagrams[0].heads().count(), 2);
}

#[test]
fn file_stems_are_sanitized() {
    assert_eq!(sanitize_file_stem("wire demo"), "wire-demo");
    assert_eq!(sanitize_file_stem("a/../b"), "a-..-b");
    assert_eq!(sanitize_file_stem("  "), "untitled");
    assert_eq!(sanitize_file_stem("full adder (v2)"), "full-adder-v2");
}
