use crate::foundation::core::{EntityId, Point};
use crate::foundation::error::{LecternError, LecternResult};
use crate::stage::entity::Apply;
use crate::stage::stage::Stage;
use crate::state::model::{Arrows, EdgePatch, Label, StatePatch, VertexPatch};

/// Serialized description of a graph, the input format of the surrounding
/// application:
///
/// ```json
/// {
///   "vertices": [{"x": 100, "y": 200}, {"x": 300, "y": 100}],
///   "edges": [[0, 1, {"text": 20}]]
/// }
/// ```
///
/// Edge endpoints are indices into `vertices`; `text` is the edge weight
/// (`null` or absent means "unset", which every algorithm rejects).
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct GraphSpec {
    /// Vertex descriptions.
    pub vertices: Vec<VertexSpec>,
    /// Edge descriptions.
    pub edges: Vec<EdgeSpec>,
}

/// One vertex in a [`GraphSpec`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct VertexSpec {
    /// Canvas x coordinate.
    pub x: f64,
    /// Canvas y coordinate.
    pub y: f64,
    /// Optional label.
    #[serde(default)]
    pub label: Label,
}

/// One edge in a [`GraphSpec`]: `[from, to, init]`.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct EdgeSpec(pub usize, pub usize, pub EdgeInit);

/// Initial edge state inside an [`EdgeSpec`].
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct EdgeInit {
    /// Edge weight/label.
    #[serde(default)]
    pub text: Label,
    /// Arrowhead flags (absent means undirected).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrows: Option<Arrows>,
}

impl GraphSpec {
    /// Parse a JSON graph description.
    pub fn from_json(json: &str) -> LecternResult<Self> {
        serde_json::from_str(json).map_err(|e| LecternError::serde(e.to_string()))
    }
}

/// Build the described graph on a stage.
///
/// Vertices are placed immediately and fade in over the stage's transition
/// window, like the interactive builder does. Returns the created vertex ids
/// in description order.
pub fn load_graph(stage: &mut Stage, spec: &GraphSpec) -> LecternResult<Vec<EntityId>> {
    let mut vertices = Vec::with_capacity(spec.vertices.len());
    for v in &spec.vertices {
        let id = stage.add_vertex(
            VertexPatch::new()
                .pos(Point::new(v.x, v.y))
                .label(v.label.clone()),
        );
        let window = stage.transition_window();
        stage.set_state(
            id,
            &StatePatch::Vertex(VertexPatch::new().opacity(1.0)),
            Apply::Ease { window },
        );
        vertices.push(id);
    }

    for (i, EdgeSpec(from, to, init)) in spec.edges.iter().enumerate() {
        let ends = [*from, *to].map(|end| {
            vertices
                .get(end)
                .copied()
                .ok_or_else(|| LecternError::validation(format!("edge {i} endpoint {end} is out of range")))
        });
        let [a, b] = ends;
        let mut patch = EdgePatch::new().label(init.text.clone());
        if let Some(arrows) = init.arrows {
            patch = patch.arrows(arrows);
        }
        let id = stage.add_edge([a?, b?], patch)?;
        let window = stage.transition_window();
        stage.set_state(
            id,
            &StatePatch::Edge(EdgePatch::new().opacity(1.0)),
            Apply::Ease { window },
        );
    }

    Ok(vertices)
}

#[cfg(test)]
#[path = "../../tests/unit/graph/spec.rs"]
mod tests;
