use std::time::Duration;

use crate::algo::{Algorithm, SelectionPrompt, num};
use crate::foundation::core::{EntityId, EntityKind, Palette, Rgb};
use crate::foundation::error::{LecternError, LecternResult};
use crate::graph::view::GraphView;
use crate::present::timeline::Recorder;
use crate::state::model::{Arrows, BackdropPatch, EdgePatch, VertexPatch};

/// Accent color for the source/sink selection.
const ACCENT: Rgb = Rgb::new(255, 65, 54);

/// Opacity floor for edges carrying no flow.
const EDGE_MIN_OPACITY: f64 = 0.2;

/// Signed flow bookkeeping for one edge.
///
/// Positive flow runs from the edge's first stored endpoint toward the second;
/// negative flow runs the other way. Residual capacity leaving endpoint order
/// `u -> v` is `cap - flow`, against it `cap + flow`.
struct EdgeFlow {
    flow: f64,
    cap: f64,
}

/// Maximum flow between a selected source and sink via repeated augmenting
/// paths.
///
/// The augmenting path is found with a plain depth-first search; any path with
/// positive residual capacity is acceptable, mirroring the textbook
/// non-deterministic formulation.
pub struct FordFulkerson;

impl Algorithm for FordFulkerson {
    fn name(&self) -> &'static str {
        "Ford–Fulkerson algorithm"
    }

    fn description(&self) -> &'static str {
        "Computes the maximum flow in a network: pick a source and a sink, and \
         the algorithm finds how much material can be moved between them along \
         edges whose weights limit how much they can carry."
    }

    fn required_selection(&self) -> Vec<SelectionPrompt> {
        vec![
            SelectionPrompt::styled(
                "Please pick the vertex that will act as the source.",
                VertexPatch::new()
                    .label("S")
                    .color(ACCENT)
                    .stroke(ACCENT)
                    .size(1.5),
            ),
            SelectionPrompt::styled(
                "Now pick a different vertex to act as the sink.",
                VertexPatch::new()
                    .label(0.0)
                    .color(ACCENT)
                    .stroke(ACCENT)
                    .size(1.5),
            ),
        ]
    }

    fn check(&self, graph: &GraphView) -> LecternResult<()> {
        for edge in graph.edges() {
            if edge.weight.is_none() {
                return Err(LecternError::precondition(
                    "Please give every edge a numeric capacity first!",
                ));
            }
        }
        Ok(())
    }

    fn run(&mut self, rec: &mut Recorder<'_>) {
        let graph = rec.graph();
        let source = rec.selection()[0];
        let sink = rec.selection()[1];

        let mut table: Vec<Option<EdgeFlow>> = (0..rec.entity_count()).map(|_| None).collect();
        for edge in graph.edges() {
            table[edge.id.index()] = Some(EdgeFlow {
                flow: 0.0,
                cap: edge.weight.unwrap_or(0.0),
            });
        }

        rec.set_slide_state_for_all(
            EntityKind::Backdrop,
            BackdropPatch::new().palette(Palette::finished()),
        );
        rec.set_slide_state(sink, VertexPatch::new().label(0.0));
        rec.snapshot(
            Duration::from_millis(5000),
            "A source and a sink have been picked. The sink shows the running \
             total of the flow, which is still zero.",
        );

        refresh_edges(rec, graph, &table);
        rec.snapshot(
            Duration::from_millis(8000),
            "Nothing flows through any edge yet, so every edge was also set to \
             zero.",
        );

        rec.snapshot(
            Duration::from_millis(8000),
            "We show the basic version of the algorithm and do not dwell on how \
             an unsaturated path is found; assume such a path can always be found \
             when one exists. Saturated edges and paths are drawn black.",
        );
        rec.set_slide_state_for_all(
            EntityKind::Backdrop,
            BackdropPatch::new().palette(Palette::working()),
        );

        let mut total = 0.0;
        loop {
            let mut stops = vec![source];
            let mut path = Vec::new();
            let delta = augment(graph, &table, source, sink, &mut stops, &mut path);
            if delta <= 0.0 {
                break;
            }

            rec.set_slide_state_for_all(EntityKind::Edge, EdgePatch::new().opacity(0.1));
            rec.set_slide_state_for_all(EntityKind::Vertex, VertexPatch::new().opacity(0.1));
            for (i, &edge) in path.iter().enumerate() {
                rec.set_slide_state(edge, EdgePatch::new().opacity(1.0).arrows(Arrows::none()));
                rec.set_slide_state(stops[i], VertexPatch::new().opacity(1.0));
            }
            rec.set_slide_state(sink, VertexPatch::new().opacity(1.0));
            rec.snapshot(
                Duration::from_millis(5000),
                &format!(
                    "We found a path that can be improved by {}. Every edge on it \
                     can be raised by some maximum amount; the smallest of those \
                     amounts can certainly be pushed through the whole path.",
                    num(delta)
                ),
            );

            for (i, &edge_id) in path.iter().enumerate() {
                rec.set_slide_state(edge_id, EdgePatch::new().size(1.0));
                let forward = graph
                    .edges_at(stops[i])
                    .find(|e| e.id == edge_id)
                    .is_some_and(|e| e.ends[0] == stops[i]);
                if let Some(entry) = table[edge_id.index()].as_mut() {
                    entry.flow += if forward { delta } else { -delta };
                }
            }
            refresh_edges(rec, graph, &table);

            total += delta;
            rec.set_slide_state(sink, VertexPatch::new().label(total));
            rec.snapshot(
                Duration::from_millis(5000),
                &format!("The flow along every edge of the path rose by {}.", num(delta)),
            );
        }

        rec.snapshot(
            Duration::from_millis(8000),
            &format!(
                "No path can be improved any more. The algorithm stops, having \
                 found the maximum flow {}.",
                num(total)
            ),
        );
    }
}

/// Refresh every edge's label, opacity, color and arrows from its flow.
fn refresh_edges(rec: &mut Recorder<'_>, graph: &GraphView, table: &[Option<EdgeFlow>]) {
    for edge in graph.edges() {
        let Some(entry) = table.get(edge.id.index()).and_then(Option::as_ref) else {
            continue;
        };
        let carried = entry.flow.abs();
        let ratio = if entry.cap > 0.0 {
            carried / entry.cap
        } else {
            0.0
        };
        rec.set_slide_state(
            edge.id,
            EdgePatch::new()
                .label(format!("{}/{}", num(carried), num(entry.cap)))
                .opacity((1.0 - EDGE_MIN_OPACITY) * ratio + EDGE_MIN_OPACITY)
                .color(if carried == entry.cap {
                    Rgb::BLACK
                } else {
                    Rgb::WHITE
                })
                .arrows(Arrows([entry.flow < 0.0, entry.flow > 0.0])),
        );
    }
}

/// Depth-first search for an augmenting path; returns its bottleneck residual
/// (0 when no path remains). `stops` and `path` come back holding the visited
/// vertices and the edges between them, with `path[i]` leaving `stops[i]`.
fn augment(
    graph: &GraphView,
    table: &[Option<EdgeFlow>],
    from: EntityId,
    sink: EntityId,
    stops: &mut Vec<EntityId>,
    path: &mut Vec<EntityId>,
) -> f64 {
    for edge in graph.edges_at(from) {
        let other = edge.other(from);
        let Some(entry) = table.get(edge.id.index()).and_then(Option::as_ref) else {
            continue;
        };
        let sign = if edge.ends[0] == from { 1.0 } else { -1.0 };
        let residual = entry.cap - sign * entry.flow;
        if residual <= 0.0 || stops.contains(&other) {
            continue;
        }
        stops.push(other);
        path.push(edge.id);
        if other == sink {
            return residual;
        }
        let downstream = augment(graph, table, other, sink, stops, path);
        if downstream > 0.0 {
            return downstream.min(residual);
        }
        stops.pop();
        path.pop();
    }
    0.0
}

#[cfg(test)]
#[path = "../../tests/unit/algo/ford_fulkerson.rs"]
mod tests;
