use drawnodes_core::labels::discover_edges;
use drawnodes_core::{Diagram, Dialect, JunctionKind};
use drawnodes_render::trace::Tracer;
use drawnodes_render::{Primitive, RootSelection, TraceOptions, trace_diagram};

fn bars(primitives: &[Primitive]) -> usize {
    primitives
        .iter()
        .filter(|p| matches!(p, Primitive::HBar { .. } | Primitive::VBar { .. }))
        .count()
}

#[test]
fn single_wire_draws_one_vertical_bar() {
    let d = Diagram::parse("#__\n|  \n#  ", Dialect::Nodes);
    let traces = trace_diagram(&d, &TraceOptions::default());
    assert_eq!(traces.len(), 1);
    assert_eq!(
        traces[0].primitives,
        vec![Primitive::VBar { x: 0, y: 1, len: 1 }]
    );
}

#[test]
fn unconnected_heads_have_no_traces() {
    let d = Diagram::parse("#  #", Dialect::Nodes);
    assert!(trace_diagram(&d, &TraceOptions::default()).is_empty());
}

#[test]
fn u_turn_is_one_trace_through_both_corners() {
    let d = Diagram::parse("#  #\n|  |\n\\__/", Dialect::Nodes);
    let traces = trace_diagram(&d, &TraceOptions::default());
    assert_eq!(traces.len(), 1);
    assert_eq!(
        traces[0].primitives,
        vec![
            Primitive::VBar { x: 0, y: 1, len: 1 },
            Primitive::Arc {
                x: 0,
                y: 1,
                dx: 1,
                dy: 1,
            },
            Primitive::HBar { x: 1, y: 1, len: 2 },
            Primitive::Arc {
                x: 3,
                y: 1,
                dx: 0,
                dy: 1,
            },
            Primitive::VBar { x: 3, y: 1, len: 1 },
        ]
    );
}

#[test]
fn custom_palette_cycles_by_output_column() {
    let d = Diagram::parse("#  #  #\n|  |  |\nX  X  X", Dialect::Nodes);
    let options = TraceOptions {
        palette: Some(vec!["Red".to_string(), "Blue".to_string()]),
        ..TraceOptions::default()
    };
    let colors: Vec<_> = trace_diagram(&d, &options)
        .into_iter()
        .map(|t| t.color)
        .collect();
    assert_eq!(colors, vec!["Red", "Blue", "Red"]);
}

#[test]
fn colors_follow_columns_not_discovery_order() {
    // The rightmost node is found first.
    let d = Diagram::parse("      #\n   #  |\n#  |  X\n|  X\nX", Dialect::Nodes);
    let options = TraceOptions {
        palette: Some(vec!["Red".to_string(), "Blue".to_string()]),
        ..TraceOptions::default()
    };
    let traces = trace_diagram(&d, &options);
    let got: Vec<_> = traces
        .iter()
        .map(|t| (t.origin_col, t.color_index, t.color.as_str()))
        .collect();
    assert_eq!(got, vec![(0, 0, "Red"), (3, 1, "Blue"), (6, 2, "Red")]);

    let again = trace_diagram(&d, &options);
    assert_eq!(traces, again);
}

#[test]
fn builtin_palette_is_used_without_custom_colors() {
    let d = Diagram::parse("#  #\n|  |\nX  X", Dialect::Nodes);
    let colors: Vec<_> = trace_diagram(&d, &TraceOptions::default())
        .into_iter()
        .map(|t| t.color)
        .collect();
    assert_eq!(colors, vec!["#A6CEE3", "#1F78B4"]);
}

#[test]
fn every_connection_is_drawn_exactly_once() {
    let d = Diagram::parse("##  #\n||  |\n|\\__/\nX", Dialect::Nodes);
    let traces = trace_diagram(&d, &TraceOptions::default());
    let total: usize = traces.iter().map(|t| bars(&t.primitives)).sum();
    assert_eq!(total, d.connection_count());
    assert_eq!(traces.len(), 2);
}

#[test]
fn tracing_terminates_on_cycles() {
    let d = Diagram::parse(" __\n/  \\\n\\__/", Dialect::Nodes);
    let corners: Vec<_> = d.placed().map(|j| j.index).collect();
    let mut tracer = Tracer::new(&d);
    let first = tracer.trace(corners[0], corners[1]);
    assert_eq!(tracer.drawn_count(), 4);
    assert_eq!(bars(&first), 4);
    assert!(tracer.trace(corners[0], corners[2]).is_empty());
}

#[test]
fn depth_limit_cuts_long_traces() {
    let d = Diagram::parse("#  #\n|  |\n\\__/", Dialect::Nodes);
    let heads: Vec<_> = d.heads().map(|h| h.index).collect();
    let mut tracer = Tracer::new(&d).with_max_depth(Some(0));
    let first = d.junction(heads[0]).connections[0];
    let got = tracer.trace(heads[0], first);
    assert_eq!(got, vec![Primitive::VBar { x: 0, y: 1, len: 1 }]);
    assert!(tracer.truncated() > 0);
}

#[test]
fn wires_leaving_the_top_of_a_node_are_drawn() {
    for dialect in [Dialect::Nodes, Dialect::Labeled] {
        let d = Diagram::parse(" __\n/  \\\n#  #", dialect);
        let traces = trace_diagram(&d, &TraceOptions::default());
        assert_eq!(traces.len(), 1, "{dialect}");
        assert_eq!(
            traces[0].primitives,
            vec![
                Primitive::VBar { x: 0, y: 1, len: 0 },
                Primitive::Arc {
                    x: 0,
                    y: 2,
                    dx: 1,
                    dy: 0,
                },
                Primitive::HBar { x: 1, y: 2, len: 2 },
                Primitive::Arc {
                    x: 3,
                    y: 2,
                    dx: 0,
                    dy: 0,
                },
                Primitive::VBar { x: 3, y: 1, len: 0 },
            ],
            "{dialect}"
        );
    }
}

#[test]
fn labeled_edges_are_drawn_once_each() {
    let text = " __\n/  \\\na  |  c\n#  #  #";
    let d = Diagram::parse(text, Dialect::Labeled);
    let traces = trace_diagram(&d, &TraceOptions::default());
    let total: usize = traces.iter().map(|t| bars(&t.primitives)).sum();
    assert_eq!(total, d.connection_count());

    let edges = discover_edges(&d).edges;
    assert_eq!(edges.len(), 1);
    for edge in &edges {
        assert!(
            traces.iter().any(|t| t.root == edge.source),
            "edge {:?} has no trace",
            edge.label
        );
    }
}

#[test]
fn mixed_up_and_down_wiring_is_fully_drawn() {
    // One wire leaves the top of the left node, another runs down into a sink.
    let text = " __\n/  \\\n#  #\n|\nX";
    let d = Diagram::parse(text, Dialect::Nodes);
    let traces = trace_diagram(&d, &TraceOptions::default());
    let total: usize = traces.iter().map(|t| bars(&t.primitives)).sum();
    assert_eq!(total, d.connection_count());
    assert_eq!(traces.len(), 2);
}

#[test]
fn root_selection_decides_which_node_owns_a_wire() {
    let text = " __\n/  \\\na  |\n#  #";
    let d = Diagram::parse(text, Dialect::Labeled);

    let options = TraceOptions {
        roots: RootSelection::Preceding,
        ..TraceOptions::default()
    };
    let traces = trace_diagram(&d, &options);
    assert_eq!(traces.len(), 1);
    let root = d.junction(traces[0].root);
    assert_eq!((root.kind, root.col), (JunctionKind::Head, 0));
    assert_eq!(bars(&traces[0].primitives), 3);
    assert_eq!(traces, trace_diagram(&d, &TraceOptions::default()));

    // Downward wires are still drawn when upward partners are preferred.
    let d = Diagram::parse("#  #\n|  |\n\\__/", Dialect::Nodes);
    let traces = trace_diagram(&d, &options);
    let total: usize = traces.iter().map(|t| bars(&t.primitives)).sum();
    assert_eq!(total, d.connection_count());
}

#[test]
fn progression_fallback_traces_from_corners() {
    let d = Diagram::parse(" ___\n/   \\\n|   |\na   b", Dialect::Progression);
    let traces = trace_diagram(&d, &TraceOptions::default());
    assert_eq!(traces.len(), 2);
    assert!(traces.iter().all(|t| t.color_index == 0));
    let total: usize = traces.iter().map(|t| bars(&t.primitives)).sum();
    assert_eq!(total, d.connection_count());
}

#[test]
fn root_selection_parses_names() {
    assert_eq!(
        "following".parse::<RootSelection>(),
        Ok(RootSelection::Following)
    );
    assert_eq!(
        "Preceding".parse::<RootSelection>(),
        Ok(RootSelection::Preceding)
    );
    assert!("sideways".parse::<RootSelection>().is_err());
}
