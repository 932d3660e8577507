use super::*;

use crate::present::timeline::Timeline;
use crate::stage::stage::Stage;
use crate::state::model::{Label, StatePatch};

/// Two parallel augmentable routes: source -> m1 -> sink (capacity 3) and
/// source -> m2 -> sink (capacity 2).
fn parallel_paths() -> (Stage, EntityId, EntityId, [EntityId; 4]) {
    let mut stage = Stage::new();
    stage.set_jitter_enabled(false);
    let source = stage.add_vertex(VertexPatch::new().opacity(1.0));
    let m1 = stage.add_vertex(VertexPatch::new().opacity(1.0));
    let m2 = stage.add_vertex(VertexPatch::new().opacity(1.0));
    let sink = stage.add_vertex(VertexPatch::new().opacity(1.0));
    let a = stage.add_edge([source, m1], EdgePatch::new().label(3.0)).unwrap();
    let b = stage.add_edge([m1, sink], EdgePatch::new().label(3.0)).unwrap();
    let c = stage.add_edge([source, m2], EdgePatch::new().label(2.0)).unwrap();
    let d = stage.add_edge([m2, sink], EdgePatch::new().label(2.0)).unwrap();
    (stage, source, sink, [a, b, c, d])
}

fn final_edge_patch(tl: &Timeline, e: EntityId) -> Option<EdgePatch> {
    match tl.slides().last()?.delta.get(e.index())?.as_ref()? {
        StatePatch::Edge(p) => Some(p.clone()),
        _ => None,
    }
}

#[test]
fn parallel_paths_reach_max_flow_five_in_two_augmentations() {
    let (mut stage, source, sink, edges) = parallel_paths();
    let mut tl = Timeline::new(&stage, Box::new(FordFulkerson), vec![source, sink]).unwrap();
    tl.prepare(&mut stage).unwrap();

    let finale = &tl.slides().last().unwrap().narration;
    assert!(finale.contains("maximum flow 5"), "unexpected finale: {finale}");

    // The sink's running total ends at 5.
    let sink_label = match tl.slides().last().unwrap().delta[sink.index()].as_ref() {
        Some(StatePatch::Vertex(p)) => p.label.clone(),
        _ => None,
    };
    assert_eq!(sink_label, Some(Label::Value(5.0)));

    // Every edge saturates: labels read flow/capacity and saturated edges turn
    // black.
    for (e, expect) in edges.iter().zip(["3/3", "3/3", "2/2", "2/2"]) {
        let patch = final_edge_patch(&tl, *e).expect("edge delta");
        assert_eq!(patch.label, Some(Label::from(expect)));
        assert_eq!(patch.color, Some(Rgb::BLACK));
    }

    // Three scene-setting slides, two per augmentation, one finale.
    assert_eq!(tl.slide_count(), 3 + 2 * 2 + 1);
}

#[test]
fn flow_direction_is_shown_with_arrowheads() {
    let (mut stage, source, sink, [a, ..]) = parallel_paths();
    let mut tl = Timeline::new(&stage, Box::new(FordFulkerson), vec![source, sink]).unwrap();
    tl.prepare(&mut stage).unwrap();
    // Edge [source, m1] carries positive flow, so its arrowhead sits at the
    // second stored endpoint.
    let patch = final_edge_patch(&tl, a).expect("edge delta");
    assert_eq!(patch.arrows, Some(Arrows([false, true])));
}

#[test]
fn zero_capacity_admits_no_flow() {
    let mut stage = Stage::new();
    stage.set_jitter_enabled(false);
    let s = stage.add_vertex(VertexPatch::new().opacity(1.0));
    let t = stage.add_vertex(VertexPatch::new().opacity(1.0));
    stage.add_edge([s, t], EdgePatch::new().label(0.0)).unwrap();
    let mut tl = Timeline::new(&stage, Box::new(FordFulkerson), vec![s, t]).unwrap();
    tl.prepare(&mut stage).unwrap();
    let finale = &tl.slides().last().unwrap().narration;
    assert!(finale.contains("maximum flow 0"), "unexpected finale: {finale}");
}

#[test]
fn check_requires_numeric_capacities_but_allows_any_sign() {
    let mut stage = Stage::new();
    let a = stage.add_vertex(VertexPatch::new());
    let b = stage.add_vertex(VertexPatch::new());
    let e = stage.add_edge([a, b], EdgePatch::new()).unwrap();

    let unset = FordFulkerson.check(&GraphView::capture(&stage)).unwrap_err();
    assert!(unset.is_precondition());

    stage.set_state(
        e,
        &StatePatch::Edge(EdgePatch::new().label(-3.0)),
        crate::stage::entity::Apply::Immediate,
    );
    assert!(FordFulkerson.check(&GraphView::capture(&stage)).is_ok());
}
