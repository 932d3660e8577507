use std::time::Duration;

use crate::algo::{Algorithm, SelectionPrompt, num};
use crate::foundation::core::{EntityId, EntityKind, Palette, Rgb};
use crate::foundation::error::{LecternError, LecternResult};
use crate::graph::view::GraphView;
use crate::present::timeline::Recorder;
use crate::state::model::{BackdropPatch, EdgePatch, VertexPatch};

/// Single-source shortest paths over non-negative edge weights.
///
/// Directed-aware: an edge is relaxed from a vertex only when no arrowhead
/// blocks leaving that endpoint.
pub struct Dijkstra;

impl Algorithm for Dijkstra {
    fn name(&self) -> &'static str {
        "Dijkstra's algorithm"
    }

    fn description(&self) -> &'static str {
        "Finds the shortest path from a chosen vertex to every other vertex of \
         a graph with non-negative edge weights (an unweighted graph is easily \
         converted by weighting every edge 1)."
    }

    fn required_selection(&self) -> Vec<SelectionPrompt> {
        vec![SelectionPrompt::plain(
            "Dijkstra's algorithm starts from a single vertex and searches the \
             whole graph along its edges. Please pick the vertex to start from.",
        )]
    }

    fn check(&self, graph: &GraphView) -> LecternResult<()> {
        for edge in graph.edges() {
            let Some(weight) = edge.weight else {
                return Err(LecternError::precondition(
                    "Please give every edge a numeric weight first!",
                ));
            };
            if weight < 0.0 {
                return Err(LecternError::precondition(
                    "Dijkstra's algorithm only works with non-negative edge weights!",
                ));
            }
        }
        Ok(())
    }

    fn run(&mut self, rec: &mut Recorder<'_>) {
        let graph = rec.graph();
        let source = rec.selection()[0];

        rec.set_slide_state_for_all(
            EntityKind::Backdrop,
            BackdropPatch::new().palette(Palette::working()),
        );
        rec.snapshot(
            Duration::from_millis(8000),
            "Dijkstra's algorithm finds the shortest path from the chosen vertex to \
             every other vertex. Each vertex keeps the shortest distance reached so \
             far; at the start that is infinity, meaning no path to it has been \
             found yet.",
        );

        rec.set_slide_state_for_all(
            EntityKind::Vertex,
            VertexPatch::new().opacity(0.2).label("∞"),
        );
        rec.set_slide_state_for_all(EntityKind::Edge, EdgePatch::new().opacity(0.2));

        let mut dist: Vec<Option<f64>> = vec![None; rec.entity_count()];
        let mut pred: Vec<Option<EntityId>> = vec![None; rec.entity_count()];

        rec.set_slide_state(source, VertexPatch::new().opacity(1.0).label(0.0));
        dist[source.index()] = Some(0.0);

        rec.snapshot(
            Duration::from_millis(5000),
            "A vertex is in one of three states: undiscovered (dimmed), open \
             (white) or closed (outlined black). At the start only the chosen \
             vertex is open, at distance 0.",
        );

        let mut open = vec![source];
        while !open.is_empty() {
            let current = open.remove(0);
            let here = dist[current.index()].unwrap_or(0.0);

            rec.set_slide_state(current, VertexPatch::new().size(1.5));
            for edge in graph.edges_at(current) {
                rec.set_slide_state(edge.id, EdgePatch::new().opacity(1.0));
            }

            if open.is_empty() {
                rec.snapshot(
                    Duration::from_millis(5000),
                    "One vertex is open, so we take it and search onward from it.",
                );
            } else {
                rec.snapshot(
                    Duration::from_millis(5000),
                    &format!(
                        "{} vertices are open. We take the one with the smallest \
                         distance ({}) and search onward from it.",
                        open.len() + 1,
                        num(here)
                    ),
                );
            }

            for edge in graph.edges_at(current) {
                if !edge.traversable_from(current) {
                    continue;
                }
                let Some(weight) = edge.weight else {
                    continue;
                };
                let neighbor = edge.other(current);
                let candidate = here + weight;

                rec.set_slide_state(neighbor, VertexPatch::new().size(1.3));

                match dist[neighbor.index()] {
                    None => {
                        rec.set_slide_state(
                            neighbor,
                            VertexPatch::new().opacity(1.0).label(candidate),
                        );
                        rec.set_slide_state(edge.id, EdgePatch::new().color(Rgb::BLACK));
                        dist[neighbor.index()] = Some(candidate);
                        pred[neighbor.index()] = Some(edge.id);
                        open.push(neighbor);
                        rec.snapshot(
                            Duration::from_millis(5000),
                            &format!(
                                "We discovered a vertex that was not open before. Its \
                                 distance is {} + {}, the distance of the current \
                                 vertex plus the weight of the connecting edge, so it \
                                 opens with distance {}.",
                                num(here),
                                num(weight),
                                num(candidate)
                            ),
                        );
                    }
                    Some(previous) if previous > candidate => {
                        if let Some(old_edge) = pred[neighbor.index()] {
                            rec.set_slide_state(old_edge, EdgePatch::new().color(Rgb::WHITE));
                        }
                        rec.set_slide_state(neighbor, VertexPatch::new().label(candidate));
                        rec.set_slide_state(edge.id, EdgePatch::new().color(Rgb::BLACK));
                        dist[neighbor.index()] = Some(candidate);
                        pred[neighbor.index()] = Some(edge.id);
                        rec.snapshot(
                            Duration::from_millis(8000),
                            &format!(
                                "This vertex is already open with distance {}, but \
                                 going through the current vertex reaches it in {}. \
                                 We update its distance and move its incoming edge.",
                                num(previous),
                                num(candidate)
                            ),
                        );
                    }
                    Some(_) => {
                        rec.snapshot(
                            Duration::from_millis(3000),
                            "The path to this vertex would be longer this way, so \
                             nothing needs to change.",
                        );
                    }
                }

                rec.set_slide_state(neighbor, VertexPatch::new().size(1.0));
            }

            rec.set_slide_state(current, VertexPatch::new().stroke(Rgb::BLACK).size(1.0));
            rec.snapshot(
                Duration::from_millis(5000),
                "Every edge of the current vertex has been examined, so the vertex \
                 closes.",
            );

            // Stable sort: equal distances keep their discovery order.
            open.sort_by(|a, b| {
                let da = dist[a.index()].unwrap_or(f64::INFINITY);
                let db = dist[b.index()].unwrap_or(f64::INFINITY);
                da.total_cmp(&db)
            });
        }

        rec.set_slide_state_for_all(
            EntityKind::Backdrop,
            BackdropPatch::new().palette(Palette::finished()),
        );
        rec.snapshot(
            Duration::from_millis(2000),
            "Dijkstra's algorithm is done. Every reachable vertex shows the length \
             of its shortest path, and the black edges trace those paths back to \
             the start.",
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/algo/dijkstra.rs"]
mod tests;
