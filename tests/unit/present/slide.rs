use super::*;

use crate::state::model::{StatePatch, VertexPatch};

fn delta_with(slot: usize, patch: StatePatch) -> SlideDelta {
    let mut delta: SlideDelta = vec![None; 4];
    delta[slot] = Some(patch);
    delta
}

#[test]
fn digest_is_stable_for_equal_deltas() {
    let a = delta_with(1, StatePatch::Vertex(VertexPatch::new().opacity(0.5)));
    let b = delta_with(1, StatePatch::Vertex(VertexPatch::new().opacity(0.5)));
    assert_eq!(
        fingerprint_delta(a.iter().map(Option::as_ref)),
        fingerprint_delta(b.iter().map(Option::as_ref))
    );
}

#[test]
fn digest_differs_on_value_change() {
    let a = delta_with(1, StatePatch::Vertex(VertexPatch::new().opacity(0.5)));
    let b = delta_with(1, StatePatch::Vertex(VertexPatch::new().opacity(0.6)));
    assert_ne!(
        fingerprint_delta(a.iter().map(Option::as_ref)),
        fingerprint_delta(b.iter().map(Option::as_ref))
    );
}

#[test]
fn digest_is_position_sensitive() {
    let patch = StatePatch::Vertex(VertexPatch::new().opacity(0.5));
    let a = delta_with(1, patch.clone());
    let b = delta_with(2, patch);
    assert_ne!(
        fingerprint_delta(a.iter().map(Option::as_ref)),
        fingerprint_delta(b.iter().map(Option::as_ref))
    );
}
