use std::time::Instant;

use smallvec::SmallVec;

use crate::foundation::core::{EntityId, EntityKind, Point};
use crate::foundation::error::{LecternError, LecternResult};
use crate::stage::entity::{Apply, Done, Entity, Links};
use crate::stage::sink::{NullSink, RenderSink};
use crate::stage::wave::Jitter;
use crate::state::model::{EdgePatch, EntityState, StatePatch, VertexPatch};

/// Default transition window, in seconds, for eased state applications.
pub const DEFAULT_TRANSITION_WINDOW: f64 = 1.0;

/// The stage: entity arena, tick scheduler and render-sink boundary.
///
/// Entities live in a dense arena; ids are assigned in registration order and
/// never reused. A new stage comes furnished with the two fixture entities
/// every presentation needs: the gradient backdrop and the narration hint.
pub struct Stage {
    slots: Vec<Option<Entity>>,
    sink: Box<dyn RenderSink>,
    backdrop: EntityId,
    hint: EntityId,
    transition_window: f64,
    jitter_enabled: bool,
    last_tick: Option<Instant>,
}

impl Stage {
    /// Create a stage with a [`NullSink`].
    pub fn new() -> Self {
        Self::with_sink(Box::new(NullSink))
    }

    /// Create a stage wired to a render sink.
    pub fn with_sink(sink: Box<dyn RenderSink>) -> Self {
        let mut stage = Self {
            slots: Vec::new(),
            sink,
            backdrop: EntityId(0),
            hint: EntityId(0),
            transition_window: DEFAULT_TRANSITION_WINDOW,
            jitter_enabled: true,
            last_tick: None,
        };
        stage.backdrop = stage.push(Entity::new(
            EntityState::Backdrop(Default::default()),
            Links::Free,
        ));
        stage.hint = stage.push(Entity::new(EntityState::Hint(Default::default()), Links::Free));
        stage
    }

    fn push(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.slots.len() as u32);
        self.slots.push(Some(entity));
        id
    }

    /// The gradient backdrop fixture.
    pub fn backdrop(&self) -> EntityId {
        self.backdrop
    }

    /// The narration hint fixture.
    pub fn hint(&self) -> EntityId {
        self.hint
    }

    /// Transition window, in seconds, used for eased applications.
    pub fn transition_window(&self) -> f64 {
        self.transition_window
    }

    /// Override the transition window.
    pub fn set_transition_window(&mut self, seconds: f64) {
        self.transition_window = seconds.max(1e-3);
    }

    /// Enable or disable idle vertex jitter.
    pub fn set_jitter_enabled(&mut self, enabled: bool) {
        self.jitter_enabled = enabled;
    }

    /// Number of arena slots ever allocated (live or not).
    ///
    /// Timelines freeze this value at construction; side-tables index by it.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Live entity ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| EntityId(i as u32))
    }

    /// Live entity ids of one kind, in registration order.
    pub fn ids_of_kind(&self, kind: EntityKind) -> impl Iterator<Item = EntityId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(move |(_, slot)| slot.as_ref().is_some_and(|e| e.kind() == kind))
            .map(|(i, _)| EntityId(i as u32))
    }

    /// Borrow a live entity.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(id.index()).and_then(|slot| slot.as_ref())
    }

    /// Deep copy of an entity's resolved state.
    pub fn resolved(&self, id: EntityId) -> Option<EntityState> {
        self.entity(id).map(Entity::resolved)
    }

    /// Where the entity is actually drawn: resolved position plus idle jitter.
    pub fn display_position(&self, id: EntityId) -> Option<Point> {
        let entity = self.entity(id)?;
        let pos = entity.resolved().as_vertex()?.pos;
        let offset = entity
            .jitter
            .as_ref()
            .map(Jitter::offset)
            .unwrap_or_default();
        Some(pos + offset)
    }

    /// Register a free-standing entity (backdrop, hint, custom fixtures).
    ///
    /// Vertices and edges carry topology and must be created through
    /// [`Stage::add_vertex`] / [`Stage::add_edge`].
    pub fn register(&mut self, state: EntityState) -> LecternResult<EntityId> {
        match state.kind() {
            EntityKind::Vertex | EntityKind::Edge => Err(LecternError::validation(
                "vertices and edges must be created through add_vertex / add_edge",
            )),
            _ => Ok(self.push(Entity::new(state, Links::Free))),
        }
    }

    /// Create a vertex, apply `init` immediately, and return its id.
    pub fn add_vertex(&mut self, init: VertexPatch) -> EntityId {
        let mut state = crate::state::model::VertexState::default();
        state.apply(&init);
        let id = self.push(Entity::new(
            EntityState::Vertex(state),
            Links::Vertex(SmallVec::new()),
        ));
        if let Some(entity) = self.slots[id.index()].as_mut() {
            entity.jitter = Some(Jitter::new(u64::from(id.0)));
        }
        self.notify(id);
        id
    }

    /// Create an edge between two distinct vertices, or return the existing
    /// one for that unordered pair. `init` is applied immediately either way.
    pub fn add_edge(&mut self, ends: [EntityId; 2], init: EdgePatch) -> LecternResult<EntityId> {
        if ends[0] == ends[1] {
            return Err(LecternError::validation("an edge needs two distinct vertices"));
        }
        for end in ends {
            if self.entity(end).map(Entity::kind) != Some(EntityKind::Vertex) {
                return Err(LecternError::validation(format!(
                    "edge endpoint {:?} is not a live vertex",
                    end
                )));
            }
        }

        let id = match self.find_edge(ends) {
            Some(existing) => existing,
            None => {
                let id = self.push(Entity::new(
                    EntityState::Edge(Default::default()),
                    Links::Edge(ends),
                ));
                for end in ends {
                    if let Some(vertex) = self.slots[end.index()].as_mut() {
                        vertex.link_edge(id);
                    }
                }
                id
            }
        };
        self.set_state(id, &StatePatch::Edge(init), Apply::Immediate);
        Ok(id)
    }

    /// The edge joining the given unordered vertex pair, if one exists.
    pub fn find_edge(&self, ends: [EntityId; 2]) -> Option<EntityId> {
        self.entity(ends[0])?
            .incident_edges()
            .iter()
            .copied()
            .find(|&edge| {
                self.entity(edge)
                    .and_then(Entity::endpoints)
                    .is_some_and(|pair| pair.contains(&ends[1]))
            })
    }

    /// Remove an entity from the stage. Idempotent.
    ///
    /// Removing a vertex also removes its incident edges; removing an edge
    /// unlinks it from its endpoints.
    pub fn unregister(&mut self, id: EntityId) {
        let Some(entity) = self.slots.get_mut(id.index()).and_then(Option::take) else {
            return;
        };
        match entity.links {
            Links::Vertex(edges) => {
                for edge in edges {
                    self.unregister(edge);
                }
            }
            Links::Edge(ends) => {
                for end in ends {
                    if let Some(vertex) = self.slots.get_mut(end.index()).and_then(Option::as_mut)
                    {
                        vertex.unlink_edge(id);
                    }
                }
            }
            Links::Free => {}
        }
        self.sink.retire(id);
    }

    /// Remove an entity now, or fade it out and reap it when the fade ends.
    pub fn remove(&mut self, id: EntityId, immediate: bool) {
        let fade = match self.entity(id).map(Entity::kind) {
            Some(EntityKind::Vertex) => StatePatch::Vertex(VertexPatch::new().opacity(0.0)),
            Some(EntityKind::Edge) => StatePatch::Edge(EdgePatch::new().opacity(0.0)),
            // Fixtures have no opacity to fade.
            Some(_) => {
                self.unregister(id);
                return;
            }
            None => return,
        };
        if immediate {
            self.unregister(id);
            return;
        }
        let window = self.transition_window;
        if let Some(entity) = self.slots.get_mut(id.index()).and_then(Option::as_mut) {
            entity.retiring = true;
            entity.set_state(&fade, Apply::Ease { window }, None);
        }
        self.notify(id);
    }

    /// Apply a patch to one entity.
    pub fn set_state(&mut self, id: EntityId, patch: &StatePatch, apply: Apply) {
        self.set_state_with(id, patch, apply, None);
    }

    /// Apply a patch with an optional completion hook.
    pub fn set_state_with(
        &mut self,
        id: EntityId,
        patch: &StatePatch,
        apply: Apply,
        done: Option<Done>,
    ) {
        let Some(entity) = self.slots.get_mut(id.index()).and_then(Option::as_mut) else {
            return;
        };
        entity.set_state(patch, apply, done);
        self.sink.redraw(id, entity.displayed());
    }

    fn notify(&mut self, id: EntityId) {
        if let Some(entity) = self.slots.get(id.index()).and_then(Option::as_ref) {
            self.sink.redraw(id, entity.displayed());
        }
    }

    /// Wall-clock tick: knock every entity with the elapsed time since the
    /// previous tick. The tick period may be much coarser than transition
    /// windows; transitions simply span several ticks.
    pub fn tick(&mut self, now: Instant) {
        let dt = self
            .last_tick
            .map(|last| now.saturating_duration_since(last).as_secs_f64())
            .unwrap_or(0.0);
        self.last_tick = Some(now);
        self.advance(dt);
    }

    /// Clock-free scheduler core: advance every live entity by `dt` seconds in
    /// registration order, then reap faded-out removals.
    pub fn advance(&mut self, dt: f64) {
        let jitter_enabled = self.jitter_enabled;
        let mut reap: Vec<EntityId> = Vec::new();
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let Some(entity) = slot else {
                continue;
            };
            let mut changed = entity.knock(dt);
            if jitter_enabled && let Some(jitter) = entity.jitter.as_mut() {
                jitter.advance(dt);
                changed = true;
            }
            if changed {
                self.sink.redraw(EntityId(i as u32), entity.displayed());
            }
            if entity.retiring && !entity.in_transition() {
                reap.push(EntityId(i as u32));
            }
        }
        for id in reap {
            self.unregister(id);
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/stage.rs"]
mod tests;
