//! Algorithm instrumentation contract and the bundled graph algorithms.
//!
//! An [`Algorithm`] never touches live entity state: it validates the graph in
//! `check`, then narrates its run through the recording surface: staging
//! per-entity deltas and committing named, timed snapshots. Everything visual
//! about a run (dimming, highlighting, labels, narration) is expressed this
//! way, so algorithms know nothing about animation or replay.

/// Minimum spanning forest by component merging.
pub mod boruvka;
/// Single-source shortest paths.
pub mod dijkstra;
/// Maximum flow via augmenting paths.
pub mod ford_fulkerson;

use crate::foundation::error::LecternResult;
use crate::graph::view::GraphView;
use crate::present::timeline::Recorder;
use crate::state::model::{Label, VertexPatch};

/// One vertex-selection request an algorithm makes before it can run.
#[derive(Clone, Debug)]
pub struct SelectionPrompt {
    /// Explanation shown to the user while picking.
    pub text: String,
    /// Cosmetic patch the shell applies to the picked vertex.
    pub emphasis: VertexPatch,
}

impl SelectionPrompt {
    /// Prompt with no cosmetic emphasis.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasis: VertexPatch::new(),
        }
    }

    /// Prompt applying `emphasis` to the picked vertex.
    pub fn styled(text: impl Into<String>, emphasis: VertexPatch) -> Self {
        Self {
            text: text.into(),
            emphasis,
        }
    }
}

/// A pluggable, narratable graph algorithm.
pub trait Algorithm {
    /// Short display name.
    fn name(&self) -> &'static str;

    /// One-paragraph description for the algorithm picker.
    fn description(&self) -> &'static str;

    /// Vertex selections the shell must collect before `run`, in order.
    fn required_selection(&self) -> Vec<SelectionPrompt> {
        Vec::new()
    }

    /// Validate the graph. A refusal returns
    /// [`LecternError::Precondition`](crate::foundation::error::LecternError)
    /// with a reason fit for showing to the user; nothing is mutated either
    /// way.
    fn check(&self, graph: &GraphView) -> LecternResult<()>;

    /// Execute to completion synchronously, recording snapshots as it goes.
    fn run(&mut self, rec: &mut Recorder<'_>);
}

/// Compact number rendering for narration ("5", not "5.0").
pub(crate) fn num(v: f64) -> String {
    Label::Value(v).to_string()
}
