use smallvec::SmallVec;

use crate::foundation::core::{EntityId, EntityKind};
use crate::stage::wave::Jitter;
use crate::state::model::{EntityState, StatePatch};

/// Completion hook fired exactly once when a state application finishes.
pub type Done = Box<dyn FnOnce()>;

/// How a patch lands on an entity.
#[derive(Clone, Copy, Debug)]
pub enum Apply {
    /// Merge and display at once. A running transition is cancelled by
    /// *completing* it: the new target is the patch merged over the in-flight
    /// target, and the displaced completion hook is dropped.
    Immediate,
    /// Merge and display at once while leaving a running transition untouched.
    /// Used for dependent cosmetic updates that ride along a transition.
    Overlay,
    /// Begin a transition from the currently displayed state toward the patch
    /// merged over the previous in-flight target, over `window` seconds.
    Ease {
        /// Transition window in seconds.
        window: f64,
    },
}

/// In-flight transition.
///
/// `old` is a deep snapshot of the displayed state taken when the transition
/// began and is never mutated afterward; `target` accumulates every patch
/// merged in while the transition runs.
struct Tween {
    old: EntityState,
    target: StatePatch,
    elapsed: f64,
    rate: f64,
    done: Option<Done>,
}

/// Topology links per entity kind.
pub(crate) enum Links {
    /// Backdrop and hint have no topology.
    Free,
    /// Vertices track their incident edges in creation order.
    Vertex(SmallVec<[EntityId; 4]>),
    /// Edges store their endpoint pair in creation order.
    Edge([EntityId; 2]),
}

/// One animatable thing on a stage.
pub struct Entity {
    state: EntityState,
    tween: Option<Tween>,
    pub(crate) links: Links,
    pub(crate) jitter: Option<Jitter>,
    pub(crate) retiring: bool,
}

impl Entity {
    pub(crate) fn new(state: EntityState, links: Links) -> Self {
        Self {
            state,
            tween: None,
            links,
            jitter: None,
            retiring: false,
        }
    }

    /// Kind discriminator.
    pub fn kind(&self) -> EntityKind {
        self.state.kind()
    }

    /// The state currently displayed, possibly mid-transition.
    pub fn displayed(&self) -> &EntityState {
        &self.state
    }

    /// Deep copy of the state as if any in-flight transition had completed.
    pub fn resolved(&self) -> EntityState {
        let mut state = self.state.clone();
        if let Some(tween) = &self.tween {
            state.apply(&tween.target);
        }
        state
    }

    /// `true` while a transition is in flight.
    pub fn in_transition(&self) -> bool {
        self.tween.is_some()
    }

    /// Endpoints, when this entity is an edge.
    pub fn endpoints(&self) -> Option<[EntityId; 2]> {
        match &self.links {
            Links::Edge(ends) => Some(*ends),
            _ => None,
        }
    }

    /// Incident edges, when this entity is a vertex (empty otherwise).
    pub fn incident_edges(&self) -> &[EntityId] {
        match &self.links {
            Links::Vertex(edges) => edges,
            _ => &[],
        }
    }

    pub(crate) fn link_edge(&mut self, edge: EntityId) {
        if let Links::Vertex(edges) = &mut self.links
            && !edges.contains(&edge)
        {
            edges.push(edge);
        }
    }

    pub(crate) fn unlink_edge(&mut self, edge: EntityId) {
        if let Links::Vertex(edges) = &mut self.links {
            edges.retain(|e| *e != edge);
        }
    }

    /// Apply `patch` with the given mode. Immediate modes fire `done` before
    /// returning; an eased application defers it until the transition
    /// completes (and drops the hook of any transition it displaces).
    pub fn set_state(&mut self, patch: &StatePatch, apply: Apply, done: Option<Done>) {
        match apply {
            Apply::Immediate => {
                let target = self.merged_target(patch);
                self.state.apply(&target);
                if let Some(hook) = done {
                    hook();
                }
            }
            Apply::Overlay => {
                self.state.apply(patch);
                if let Some(hook) = done {
                    hook();
                }
            }
            Apply::Ease { window } => {
                let target = self.merged_target(patch);
                self.tween = Some(Tween {
                    old: self.state.clone(),
                    target,
                    elapsed: 0.0,
                    rate: 1.0 / window.max(1e-9),
                    done,
                });
            }
        }
    }

    /// Patch merged over the in-flight target, consuming the old transition.
    fn merged_target(&mut self, patch: &StatePatch) -> StatePatch {
        match self.tween.take() {
            Some(tween) => {
                let mut target = tween.target;
                target.merge(patch);
                target
            }
            None => patch.clone(),
        }
    }

    /// Advance the in-flight transition by `dt` seconds.
    ///
    /// Progress clamps at 1; reaching it ends the transition and fires the
    /// completion hook exactly once. Returns `true` when the displayed state
    /// changed.
    pub fn knock(&mut self, dt: f64) -> bool {
        let Some(tween) = self.tween.as_mut() else {
            return false;
        };
        tween.elapsed = (tween.elapsed + dt * tween.rate).min(1.0);
        let t = tween.elapsed;
        self.state.blend_from(&tween.old, &tween.target, t);
        if t >= 1.0
            && let Some(finished) = self.tween.take()
            && let Some(hook) = finished.done
        {
            hook();
        }
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/entity.rs"]
mod tests;
