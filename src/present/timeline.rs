use std::time::Duration;

use crate::algo::Algorithm;
use crate::foundation::core::{EntityId, EntityKind};
use crate::foundation::error::{LecternError, LecternResult};
use crate::graph::view::GraphView;
use crate::present::slide::{Slide, SlideDelta, fingerprint_delta};
use crate::stage::entity::Apply;
use crate::stage::stage::Stage;
use crate::state::model::{HintPatch, StatePatch};

/// Snapshot timeline for one algorithm run.
///
/// A timeline is bound to a frozen entity range and one algorithm instance.
/// `prepare` runs the algorithm to completion exactly once, recording named,
/// timed snapshots of entity-state deltas; afterwards the slide list is
/// immutable and any slide can be replayed, in any order, by merging the
/// recorded delta over the derived baseline and pushing the result at the
/// touched entities. `destroy` puts every touched entity back exactly as it
/// was before the run.
pub struct Timeline {
    algorithm: Box<dyn Algorithm>,
    selection: Vec<EntityId>,
    entity_count: usize,
    hint: EntityId,
    pending: SlideDelta,
    baseline: SlideDelta,
    slides: Vec<Slide>,
    prepared: bool,
}

impl Timeline {
    /// Bind a timeline to the stage's current entity range, an algorithm and
    /// an ordered vertex selection.
    ///
    /// The selection length must match what the algorithm declared through
    /// [`Algorithm::required_selection`], and every selected id must be a live
    /// vertex.
    pub fn new(
        stage: &Stage,
        algorithm: Box<dyn Algorithm>,
        selection: Vec<EntityId>,
    ) -> LecternResult<Self> {
        let wanted = algorithm.required_selection().len();
        if selection.len() != wanted {
            return Err(LecternError::validation(format!(
                "{} needs {} selected vertices, got {}",
                algorithm.name(),
                wanted,
                selection.len()
            )));
        }
        for &id in &selection {
            let is_vertex = stage
                .entity(id)
                .is_some_and(|e| e.kind() == EntityKind::Vertex);
            if !is_vertex {
                return Err(LecternError::validation(format!(
                    "selected entity {:?} is not a live vertex",
                    id
                )));
            }
        }

        let entity_count = stage.slot_count();
        Ok(Self {
            algorithm,
            selection,
            entity_count,
            hint: stage.hint(),
            pending: vec![None; entity_count],
            baseline: vec![None; entity_count],
            slides: Vec::new(),
            prepared: false,
        })
    }

    /// Run the algorithm and derive the baseline. Single-use.
    ///
    /// A precondition refusal comes back as [`LecternError::Precondition`]
    /// with the human-readable reason and leaves every entity untouched.
    #[tracing::instrument(skip(self, stage), fields(algorithm = self.algorithm.name()))]
    pub fn prepare(&mut self, stage: &mut Stage) -> LecternResult<()> {
        if self.prepared {
            return Err(LecternError::validation(
                "timeline already prepared; build a fresh one to re-run",
            ));
        }

        let graph = GraphView::capture(stage);
        self.algorithm.check(&graph)?;

        {
            let mut recorder = Recorder {
                graph: &graph,
                stage,
                selection: &self.selection,
                hint: self.hint,
                pending: &mut self.pending,
                slides: &mut self.slides,
            };
            self.algorithm.run(&mut recorder);
        }

        // Baseline: the live pre-run value of every field the recording ever
        // touched, and nothing else. Replay merges each slide's delta over it.
        for (slot, accumulated) in self.pending.iter().enumerate() {
            let Some(shape) = accumulated else {
                continue;
            };
            if shape.is_empty() {
                continue;
            }
            if let Some(state) = stage.resolved(EntityId(slot as u32)) {
                self.baseline[slot] = Some(state.masked_by(shape));
            }
        }

        self.prepared = true;
        tracing::debug!(slides = self.slides.len(), "timeline prepared");
        Ok(())
    }

    /// `true` once `prepare` has succeeded.
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Number of recorded slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Recorded slides in order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// One slide, if `n` is in range.
    pub fn slide(&self, n: usize) -> Option<&Slide> {
        self.slides.get(n)
    }

    /// Absolute state pushed at `slot` by slide `n`, or `None` when the slide
    /// does not touch that entity.
    fn merged_patch(&self, slot: usize, n: usize) -> Option<StatePatch> {
        let delta = self.slides.get(n)?.delta.get(slot)?.as_ref()?;
        let mut merged = self.baseline.get(slot)?.clone()?;
        merged.merge(delta);
        Some(merged)
    }

    /// Digest of the absolute states slide `n` would push.
    pub fn slide_digest(&self, n: usize) -> u64 {
        let merged: Vec<Option<StatePatch>> = (0..self.entity_count)
            .map(|slot| self.merged_patch(slot, n))
            .collect();
        fingerprint_delta(merged.iter().map(Option::as_ref))
    }

    /// Show slide `n`, clamped into range; returns the index actually shown.
    ///
    /// Replay is a direct baseline+delta jump, never a replay of intermediate
    /// slides, so arbitrary backward and forward seeks resolve identically.
    /// Each touched entity eases from whatever it currently shows toward the
    /// slide's absolute state over the stage's transition window.
    #[tracing::instrument(skip(self, stage))]
    pub fn draw_slide(&self, stage: &mut Stage, n: usize) -> LecternResult<usize> {
        if !self.prepared {
            return Err(LecternError::validation(
                "draw_slide called before prepare",
            ));
        }
        if self.slides.is_empty() {
            return Ok(0);
        }
        let n = n.min(self.slides.len() - 1);
        let window = stage.transition_window();
        for slot in 0..self.entity_count {
            if let Some(merged) = self.merged_patch(slot, n) {
                stage.set_state(EntityId(slot as u32), &merged, Apply::Ease { window });
            }
        }
        Ok(n)
    }

    /// Put every touched entity straight back to its pre-run state and drop
    /// the timeline (and with it the algorithm and its side-tables).
    pub fn destroy(self, stage: &mut Stage) {
        for (slot, baseline) in self.baseline.iter().enumerate() {
            if let Some(patch) = baseline {
                stage.set_state(EntityId(slot as u32), patch, Apply::Immediate);
            }
        }
    }
}

/// Recording surface handed to a running algorithm.
///
/// Algorithms never mutate live entity state; they stage per-entity deltas
/// with [`Recorder::set_slide_state`] and commit them with
/// [`Recorder::snapshot`]. Deltas are *not* reset by a snapshot; they keep
/// accumulating, so each slide carries the full set of properties touched so
/// far and replay needs no intermediate slides.
pub struct Recorder<'a> {
    graph: &'a GraphView,
    stage: &'a Stage,
    selection: &'a [EntityId],
    hint: EntityId,
    pending: &'a mut SlideDelta,
    slides: &'a mut Vec<Slide>,
}

impl<'a> Recorder<'a> {
    /// The graph snapshot the algorithm runs against.
    ///
    /// The returned borrow is independent of the recorder, so it can be held
    /// across recording calls.
    pub fn graph(&self) -> &'a GraphView {
        self.graph
    }

    /// Vertices picked by the user, in prompt order.
    pub fn selection(&self) -> &'a [EntityId] {
        self.selection
    }

    /// Size of the frozen entity range; side-tables index by entity id within
    /// it.
    pub fn entity_count(&self) -> usize {
        self.pending.len()
    }

    /// Merge a patch into one entity's delta for the slide under construction.
    /// Later calls overwrite overlapping fields.
    pub fn set_slide_state(&mut self, id: EntityId, patch: impl Into<StatePatch>) {
        let patch = patch.into();
        let Some(slot) = self.pending.get_mut(id.index()) else {
            debug_assert!(false, "entity {id:?} is outside the frozen range");
            return;
        };
        match slot {
            Some(existing) => existing.merge(&patch),
            None => *slot = Some(patch),
        }
    }

    /// Merge a patch into the delta of every entity of `kind`.
    pub fn set_slide_state_for_all(&mut self, kind: EntityKind, patch: impl Into<StatePatch>) {
        let patch = patch.into();
        let ids: Vec<EntityId> = self
            .stage
            .ids_of_kind(kind)
            .filter(|id| id.index() < self.pending.len())
            .collect();
        for id in ids {
            self.set_slide_state(id, patch.clone());
        }
    }

    /// Commit the accumulated deltas as one slide.
    ///
    /// The narration is also routed into the hint entity's delta, so replaying
    /// the slide restores the narration line too.
    pub fn snapshot(&mut self, dwell: Duration, narration: &str) {
        self.set_slide_state(self.hint, HintPatch::new().text(narration));
        self.slides.push(Slide {
            dwell,
            narration: narration.to_owned(),
            delta: self.pending.clone(),
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/timeline.rs"]
mod tests;
