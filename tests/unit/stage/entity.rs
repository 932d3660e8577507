use std::cell::Cell;
use std::rc::Rc;

use smallvec::SmallVec;

use super::*;
use crate::state::model::{EntityState, Label, StatePatch, VertexPatch, VertexState};

fn vertex() -> Entity {
    Entity::new(
        EntityState::Vertex(VertexState::default()),
        Links::Vertex(SmallVec::new()),
    )
}

fn patch(p: VertexPatch) -> StatePatch {
    StatePatch::Vertex(p)
}

fn opacity_of(e: &Entity) -> f64 {
    e.displayed().as_vertex().map(|v| v.opacity).unwrap_or(f64::NAN)
}

#[test]
fn immediate_set_merges_exactly_with_no_animation() {
    let mut e = vertex();
    e.set_state(
        &patch(VertexPatch::new().label(5.0).size(2.0)),
        Apply::Immediate,
        None,
    );
    assert!(!e.in_transition());
    let v = e.resolved();
    let v = v.as_vertex().expect("vertex state");
    assert_eq!(v.label, Label::Value(5.0));
    assert_eq!(v.size, 2.0);
    assert_eq!(v.opacity, 0.0);
}

#[test]
fn immediate_completion_hook_fires_before_return() {
    let fired = Rc::new(Cell::new(false));
    let seen = fired.clone();
    let mut e = vertex();
    e.set_state(
        &patch(VertexPatch::new().opacity(1.0)),
        Apply::Immediate,
        Some(Box::new(move || seen.set(true))),
    );
    assert!(fired.get());
}

#[test]
fn eased_transition_interpolates_and_resolves_to_target() {
    let mut e = vertex();
    e.set_state(
        &patch(VertexPatch::new().opacity(1.0)),
        Apply::Ease { window: 1.0 },
        None,
    );
    assert!(e.in_transition());
    e.knock(0.25);
    assert!((opacity_of(&e) - 0.25).abs() < 1e-12);
    // Resolved state reads as if the transition had already completed.
    assert_eq!(e.resolved().as_vertex().map(|v| v.opacity), Some(1.0));
}

#[test]
fn cumulative_knocks_land_exactly_on_target_and_fire_once() {
    let count = Rc::new(Cell::new(0));
    let seen = count.clone();
    let mut e = vertex();
    e.set_state(
        &patch(VertexPatch::new().opacity(1.0)),
        Apply::Ease { window: 1.0 },
        Some(Box::new(move || seen.set(seen.get() + 1))),
    );
    e.knock(0.5);
    assert_eq!(count.get(), 0);
    e.knock(0.7);
    assert_eq!(opacity_of(&e), 1.0);
    assert!(!e.in_transition());
    assert_eq!(count.get(), 1);
    // Extra knocks change nothing and never re-fire the hook.
    e.knock(1.0);
    e.knock(1.0);
    assert_eq!(opacity_of(&e), 1.0);
    assert_eq!(count.get(), 1);
}

#[test]
fn immediate_set_completes_the_displaced_transition() {
    let mut e = vertex();
    e.set_state(
        &patch(VertexPatch::new().size(2.0)),
        Apply::Ease { window: 1.0 },
        None,
    );
    e.knock(0.25);
    e.set_state(
        &patch(VertexPatch::new().label(7.0)),
        Apply::Immediate,
        None,
    );
    assert!(!e.in_transition());
    let v = e.resolved();
    let v = v.as_vertex().expect("vertex state");
    assert_eq!(v.size, 2.0);
    assert_eq!(v.label, Label::Value(7.0));
}

#[test]
fn overlay_applies_without_stopping_the_transition() {
    let mut e = vertex();
    e.set_state(
        &patch(VertexPatch::new().size(2.0)),
        Apply::Ease { window: 1.0 },
        None,
    );
    e.knock(0.5);
    e.set_state(
        &patch(VertexPatch::new().label(7.0)),
        Apply::Overlay,
        None,
    );
    assert!(e.in_transition());
    e.knock(0.6);
    let v = e.resolved();
    let v = v.as_vertex().expect("vertex state");
    assert_eq!(v.size, 2.0);
    assert_eq!(v.label, Label::Value(7.0));
}

#[test]
fn new_ease_merges_over_the_previous_target() {
    let mut e = vertex();
    e.set_state(
        &patch(VertexPatch::new().size(2.0)),
        Apply::Ease { window: 1.0 },
        None,
    );
    e.knock(0.3);
    e.set_state(
        &patch(VertexPatch::new().opacity(1.0)),
        Apply::Ease { window: 1.0 },
        None,
    );
    e.knock(2.0);
    let v = e.resolved();
    let v = v.as_vertex().expect("vertex state");
    assert_eq!(v.size, 2.0);
    assert_eq!(v.opacity, 1.0);
}

#[test]
fn resolved_returns_deep_copies() {
    let mut e = vertex();
    e.set_state(
        &patch(VertexPatch::new().label(1.0)),
        Apply::Immediate,
        None,
    );
    let mut copy = e.resolved();
    copy.apply(&patch(VertexPatch::new().label(99.0)));
    assert_eq!(
        e.resolved().as_vertex().map(|v| v.label.clone()),
        Some(Label::Value(1.0))
    );
}
