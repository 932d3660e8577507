use std::time::Duration;

use crate::algo::{Algorithm, num};
use crate::foundation::core::{EntityKind, Palette, Rgb};
use crate::foundation::error::{LecternError, LecternResult};
use crate::graph::view::GraphView;
use crate::present::timeline::Recorder;
use crate::state::model::{BackdropPatch, EdgePatch, VertexPatch};

/// Minimum spanning forest by repeated component merging.
///
/// Each round every component picks its cheapest outgoing edge (ties go to the
/// earliest-registered edge); picked edges join the forest and the components
/// they bridge merge by relabeling. The round loop stops when no component has
/// an outgoing edge left: one component for a connected graph, a forest
/// otherwise.
pub struct Boruvka;

impl Algorithm for Boruvka {
    fn name(&self) -> &'static str {
        "Borůvka's algorithm"
    }

    fn description(&self) -> &'static str {
        "Finds a minimum spanning tree of a graph whose edges carry \
         non-negative weights. The graph must be undirected."
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
                    "Borůvka's algorithm only works with non-negative edge weights!",
                ));
            }
            if edge.arrows.is_directed() {
                return Err(LecternError::precondition(
                    "Borůvka's algorithm has no meaning on directed edges. Please \
                     remove the directed edges before continuing!",
                ));
            }
        }
        Ok(())
    }

    fn run(&mut self, rec: &mut Recorder<'_>) {
        let graph = rec.graph();

        rec.set_slide_state_for_all(
            EntityKind::Backdrop,
            BackdropPatch::new().palette(Palette::working()),
        );
        rec.snapshot(
            Duration::from_millis(8000),
            "Borůvka's algorithm builds a minimum spanning tree. Every vertex \
             starts as its own component, shown by its label. Each round, every \
             component picks the cheapest edge leaving it; the picked edges join \
             the tree and the components they connect merge.",
        );

        // Component id per entity slot; initialized to the vertex's position
        // in registration order.
        let mut component: Vec<Option<usize>> = vec![None; rec.entity_count()];
        // Round in which an edge joined the forest.
        let mut joined: Vec<Option<usize>> = vec![None; rec.entity_count()];

        rec.set_slide_state_for_all(EntityKind::Vertex, VertexPatch::new().opacity(1.0));
        rec.set_slide_state_for_all(
            EntityKind::Edge,
            EdgePatch::new().opacity(0.2).color(Rgb::WHITE),
        );
        for (i, &v) in graph.vertices().iter().enumerate() {
            component[v.index()] = Some(i);
            rec.set_slide_state(v, VertexPatch::new().label(i as f64));
        }
        rec.snapshot(
            Duration::from_millis(5000),
            &format!(
                "The graph starts with {} components, one per vertex.",
                graph.vertices().len()
            ),
        );

        let mut total = 0.0;
        let mut round = 0;
        loop {
            round += 1;

            // Cheapest outgoing edge per component; scanning in registration
            // order with a strict comparison makes the first find win ties.
            let mut cheapest: Vec<Option<usize>> = vec![None; graph.vertices().len()];
            for (index, edge) in graph.edges().iter().enumerate() {
                let (Some(ca), Some(cb)) = (
                    component[edge.ends[0].index()],
                    component[edge.ends[1].index()],
                ) else {
                    continue;
                };
                if ca == cb {
                    continue;
                }
                let Some(weight) = edge.weight else {
                    continue;
                };
                for side in [ca, cb] {
                    let better = match cheapest[side] {
                        Some(best) => graph.edges()[best]
                            .weight
                            .is_some_and(|bw| weight < bw),
                        None => true,
                    };
                    if better {
                        cheapest[side] = Some(index);
                    }
                }
            }

            let mut picked: Vec<usize> = cheapest.iter().flatten().copied().collect();
            picked.sort_unstable();
            picked.dedup();
            if picked.is_empty() {
                break;
            }

            for &index in &picked {
                let edge = &graph.edges()[index];
                rec.set_slide_state(
                    edge.id,
                    EdgePatch::new().opacity(1.0).color(Rgb::BLACK),
                );
            }
            rec.snapshot(
                Duration::from_millis(6000),
                &format!(
                    "Round {}: every component picks its cheapest outgoing edge. \
                     {} edge(s) are picked; components sharing a picked edge will \
                     merge.",
                    round,
                    picked.len()
                ),
            );

            for &index in &picked {
                let edge = &graph.edges()[index];
                let (Some(ca), Some(cb)) = (
                    component[edge.ends[0].index()],
                    component[edge.ends[1].index()],
                ) else {
                    continue;
                };
                if ca == cb {
                    continue;
                }
                let keep = ca.min(cb);
                let old = ca.max(cb);
                joined[edge.id.index()] = Some(round);
                total += edge.weight.unwrap_or(0.0);
                for &v in graph.vertices() {
                    if component[v.index()] == Some(old) {
                        component[v.index()] = Some(keep);
                        rec.set_slide_state(v, VertexPatch::new().label(keep as f64));
                    }
                }
            }

            let mut remaining: Vec<usize> = graph
                .vertices()
                .iter()
                .filter_map(|v| component[v.index()])
                .collect();
            remaining.sort_unstable();
            remaining.dedup();
            rec.snapshot(
                Duration::from_millis(6000),
                &format!(
                    "The picked edges join the tree and their components merge; {} \
                     component(s) remain.",
                    remaining.len()
                ),
            );
        }

        rec.set_slide_state_for_all(
            EntityKind::Backdrop,
            BackdropPatch::new().palette(Palette::finished()),
        );
        let forest_edges = joined.iter().flatten().count();
        rec.snapshot(
            Duration::from_millis(8000),
            &format!(
                "No component has an outgoing edge left, so the algorithm stops. \
                 The {} black edge(s) form a minimum spanning forest of total \
                 weight {}.",
                forest_edges,
                num(total)
            ),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/algo/boruvka.rs"]
mod tests;
