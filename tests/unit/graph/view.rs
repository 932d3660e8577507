use super::*;

use crate::stage::entity::Apply;
use crate::state::model::{EdgePatch, StatePatch, VertexPatch};

fn triangle() -> (Stage, [EntityId; 3], [EntityId; 3]) {
    let mut stage = Stage::new();
    stage.set_jitter_enabled(false);
    let a = stage.add_vertex(VertexPatch::new());
    let b = stage.add_vertex(VertexPatch::new());
    let c = stage.add_vertex(VertexPatch::new());
    let ab = stage.add_edge([a, b], EdgePatch::new().label(4.0)).unwrap();
    let bc = stage.add_edge([b, c], EdgePatch::new().label(1.0)).unwrap();
    let ac = stage.add_edge([a, c], EdgePatch::new().label(10.0)).unwrap();
    (stage, [a, b, c], [ab, bc, ac])
}

#[test]
fn capture_lists_vertices_and_edges_in_registration_order() {
    let (stage, [a, b, c], [ab, bc, ac]) = triangle();
    let graph = GraphView::capture(&stage);
    assert_eq!(graph.vertices(), &[a, b, c]);
    let ids: Vec<EntityId> = graph.edges().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![ab, bc, ac]);
    assert_eq!(graph.edges()[0].weight, Some(4.0));
}

#[test]
fn adjacency_follows_creation_order() {
    let (stage, [a, ..], [ab, _, ac]) = triangle();
    let graph = GraphView::capture(&stage);
    let at_a: Vec<EntityId> = graph.edges_at(a).map(|e| e.id).collect();
    assert_eq!(at_a, vec![ab, ac]);
}

#[test]
fn other_end_and_missing_weight() {
    let mut stage = Stage::new();
    let a = stage.add_vertex(VertexPatch::new());
    let b = stage.add_vertex(VertexPatch::new());
    let e = stage.add_edge([a, b], EdgePatch::new()).unwrap();
    let graph = GraphView::capture(&stage);
    let info = &graph.edges()[0];
    assert_eq!(info.id, e);
    assert_eq!(info.other(a), b);
    assert_eq!(info.other(b), a);
    assert_eq!(info.weight, None);
}

#[test]
fn arrowheads_block_traversal_out_of_their_endpoint() {
    let mut stage = Stage::new();
    let a = stage.add_vertex(VertexPatch::new());
    let b = stage.add_vertex(VertexPatch::new());
    let e = stage
        .add_edge([a, b], EdgePatch::new().label(1.0).arrows(Arrows::toward(1)))
        .unwrap();
    let graph = GraphView::capture(&stage);
    let info = &graph.edges()[0];
    assert_eq!(info.id, e);
    // Arrow points at b: a -> b is allowed, b -> a is not.
    assert!(info.traversable_from(a));
    assert!(!info.traversable_from(b));

    // Undirected edges allow both directions.
    stage.set_state(
        e,
        &StatePatch::Edge(EdgePatch::new().arrows(Arrows::none())),
        Apply::Immediate,
    );
    let graph = GraphView::capture(&stage);
    assert!(graph.edges()[0].traversable_from(b));
}
