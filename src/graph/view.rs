use smallvec::SmallVec;

use crate::foundation::core::{EntityId, EntityKind};
use crate::stage::stage::Stage;
use crate::state::model::Arrows;

/// One edge in a captured graph snapshot.
#[derive(Clone, Debug)]
pub struct EdgeInfo {
    /// Entity id of the edge.
    pub id: EntityId,
    /// Endpoint pair in stored order.
    pub ends: [EntityId; 2],
    /// Numeric weight, when the edge label carries one.
    pub weight: Option<f64>,
    /// Arrowhead flags per endpoint.
    pub arrows: Arrows,
}

impl EdgeInfo {
    /// Position (0 or 1) of `v` in the stored endpoint pair.
    pub fn endpoint_index(&self, v: EntityId) -> Option<usize> {
        self.ends.iter().position(|&end| end == v)
    }

    /// The endpoint that is not `v`.
    pub fn other(&self, v: EntityId) -> EntityId {
        if self.ends[0] == v {
            self.ends[1]
        } else {
            self.ends[0]
        }
    }

    /// `true` when the edge may be traversed leaving `v`.
    ///
    /// An arrowhead at an endpoint means the edge is directed toward it, so
    /// leaving that endpoint would go against the arrow.
    pub fn traversable_from(&self, v: EntityId) -> bool {
        match self.endpoint_index(v) {
            Some(i) => !self.arrows.at(i),
            None => false,
        }
    }
}

/// Immutable adjacency snapshot of the vertices and edges on a stage.
///
/// Captured once before an algorithm runs; the recording never mutates live
/// entity state, so the snapshot stays valid for the whole run. Vertex and
/// edge order is registration order, which tie-breaking rules rely on.
pub struct GraphView {
    vertices: Vec<EntityId>,
    edges: Vec<EdgeInfo>,
    incident: Vec<SmallVec<[usize; 4]>>,
}

impl GraphView {
    /// Snapshot the stage's current graph.
    pub fn capture(stage: &Stage) -> Self {
        let vertices: Vec<EntityId> = stage.ids_of_kind(EntityKind::Vertex).collect();

        let mut edges = Vec::new();
        let mut incident = vec![SmallVec::new(); stage.slot_count()];
        for id in stage.ids_of_kind(EntityKind::Edge) {
            let Some(entity) = stage.entity(id) else {
                continue;
            };
            let Some(ends) = entity.endpoints() else {
                continue;
            };
            let state = entity.resolved();
            let Some(edge) = state.as_edge() else {
                continue;
            };
            let index = edges.len();
            edges.push(EdgeInfo {
                id,
                ends,
                weight: edge.label.as_value(),
                arrows: edge.arrows,
            });
            for end in ends {
                incident[end.index()].push(index);
            }
        }

        Self {
            vertices,
            edges,
            incident,
        }
    }

    /// Vertex ids in registration order.
    pub fn vertices(&self) -> &[EntityId] {
        &self.vertices
    }

    /// Edges in registration order.
    pub fn edges(&self) -> &[EdgeInfo] {
        &self.edges
    }

    /// Edges incident to `v`, in creation order.
    pub fn edges_at(&self, v: EntityId) -> impl Iterator<Item = &EdgeInfo> + '_ {
        self.incident
            .get(v.index())
            .into_iter()
            .flatten()
            .map(|&i| &self.edges[i])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/view.rs"]
mod tests;
