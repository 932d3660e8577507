use crate::foundation::core::EntityId;
use crate::state::model::EntityState;

/// Boundary contract with the rendering layer.
///
/// The stage calls [`RenderSink::redraw`] after every successful state
/// application (immediate sets and every transition step), passing the entity
/// id and its displayed state. What "drawing" means is entirely up to the
/// implementation; the engine never inspects the result.
pub trait RenderSink {
    /// One entity's displayed state changed.
    fn redraw(&mut self, id: EntityId, state: &EntityState);

    /// An entity left the stage and should disappear from the output.
    fn retire(&mut self, id: EntityId) {
        let _ = id;
    }
}

/// Sink that ignores everything; the default for headless use.
#[derive(Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn redraw(&mut self, _id: EntityId, _state: &EntityState) {}
}

/// In-memory sink for tests and debugging.
#[derive(Default)]
pub struct RecordingSink {
    /// Redraw notifications in arrival order.
    pub frames: Vec<(EntityId, EntityState)>,
    /// Retired entities in arrival order.
    pub retired: Vec<EntityId>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last recorded state for `id`, if any.
    pub fn last_for(&self, id: EntityId) -> Option<&EntityState> {
        self.frames
            .iter()
            .rev()
            .find(|(fid, _)| *fid == id)
            .map(|(_, state)| state)
    }
}

impl RenderSink for RecordingSink {
    fn redraw(&mut self, id: EntityId, state: &EntityState) {
        self.frames.push((id, state.clone()));
    }

    fn retire(&mut self, id: EntityId) {
        self.retired.push(id);
    }
}

/// Shared-handle sink, so a caller can keep inspecting a sink it handed to a
/// stage.
impl<T: RenderSink> RenderSink for std::rc::Rc<std::cell::RefCell<T>> {
    fn redraw(&mut self, id: EntityId, state: &EntityState) {
        self.borrow_mut().redraw(id, state);
    }

    fn retire(&mut self, id: EntityId) {
        self.borrow_mut().retire(id);
    }
}
