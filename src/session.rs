//! Session context: one stage, at most one live presentation.

use std::time::Instant;

use crate::algo::Algorithm;
use crate::foundation::core::EntityId;
use crate::foundation::error::LecternResult;
use crate::present::player::{PlayState, Player};
use crate::present::timeline::Timeline;
use crate::stage::sink::RenderSink;
use crate::stage::stage::Stage;

struct Presentation {
    timeline: Timeline,
    player: Player,
}

/// Application-level context tying the pieces together.
///
/// A session owns the stage and at most one live timeline; which presentation
/// is currently driving entity state is always explicit here rather than
/// ambient. Starting a new presentation destroys the previous one first,
/// restoring its baseline, so the registry is consistent for the fresh run.
pub struct Session {
    stage: Stage,
    active: Option<Presentation>,
}

impl Session {
    /// Session with a headless stage.
    pub fn new() -> Self {
        Self {
            stage: Stage::new(),
            active: None,
        }
    }

    /// Session with a stage wired to a render sink.
    pub fn with_sink(sink: Box<dyn RenderSink>) -> Self {
        Self {
            stage: Stage::with_sink(sink),
            active: None,
        }
    }

    /// The stage.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Mutable stage access, for building and editing the graph.
    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    /// `true` while a presentation is live.
    pub fn is_presenting(&self) -> bool {
        self.active.is_some()
    }

    /// The live timeline, if any.
    pub fn timeline(&self) -> Option<&Timeline> {
        self.active.as_ref().map(|p| &p.timeline)
    }

    /// The live playback controller, if any.
    pub fn player(&self) -> Option<&Player> {
        self.active.as_ref().map(|p| &p.player)
    }

    /// Run an algorithm and show its first slide.
    ///
    /// Any previous presentation is destroyed first (its baseline restored).
    /// A precondition refusal comes back as
    /// [`LecternError::Precondition`](crate::foundation::error::LecternError)
    /// with the reason to surface to the user; the graph itself is left
    /// untouched by the failed run.
    pub fn present(
        &mut self,
        algorithm: Box<dyn Algorithm>,
        selection: Vec<EntityId>,
        now: Instant,
    ) -> LecternResult<()> {
        self.stop();
        let mut timeline = Timeline::new(&self.stage, algorithm, selection)?;
        timeline.prepare(&mut self.stage)?;
        let mut player = Player::new();
        player.show(&timeline, &mut self.stage, 0, now);
        self.active = Some(Presentation { timeline, player });
        Ok(())
    }

    /// End the live presentation, restoring every touched entity to its
    /// pre-run state. Cancels any pending auto-advance. Idempotent.
    pub fn stop(&mut self) {
        if let Some(mut presentation) = self.active.take() {
            presentation.player.pause();
            presentation.timeline.destroy(&mut self.stage);
        }
    }

    /// Start or resume auto-advancing.
    pub fn play(&mut self, now: Instant) {
        if let Some(p) = &mut self.active {
            p.player.play(&p.timeline, &mut self.stage, now);
        }
    }

    /// Stop auto-advancing, staying on the current slide.
    pub fn pause(&mut self) {
        if let Some(p) = &mut self.active {
            p.player.pause();
        }
    }

    /// Step one slide forward.
    pub fn next(&mut self, now: Instant) {
        if let Some(p) = &mut self.active {
            p.player.next(&p.timeline, &mut self.stage, now);
        }
    }

    /// Step one slide back.
    pub fn prev(&mut self, now: Instant) {
        if let Some(p) = &mut self.active {
            p.player.prev(&p.timeline, &mut self.stage, now);
        }
    }

    /// Jump to slide `n` (clamped).
    pub fn seek(&mut self, n: usize, now: Instant) {
        if let Some(p) = &mut self.active {
            p.player.show(&p.timeline, &mut self.stage, n, now);
        }
    }

    /// Change the playback speed multiplier; a pending auto-advance restarts
    /// its wait at the new speed.
    pub fn set_speed(&mut self, speed: f64, now: Instant) {
        if let Some(p) = &mut self.active {
            p.player.set_speed(&p.timeline, speed, now);
        }
    }

    /// Current playback state, if a presentation is live.
    pub fn play_state(&self) -> Option<PlayState> {
        self.player().map(Player::state)
    }

    /// Drive the whole session: advance animations and fire a due
    /// auto-advance. Call this from the application's periodic tick.
    pub fn tick(&mut self, now: Instant) {
        self.stage.tick(now);
        if let Some(p) = &mut self.active {
            p.player.poll(&p.timeline, &mut self.stage, now);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
