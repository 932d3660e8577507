use std::time::Instant;

use crate::present::timeline::Timeline;
use crate::stage::stage::Stage;

/// Current state of playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayState {
    /// Stopped on a slide; no auto-advance pending.
    Paused,
    /// Auto-advancing through the slides.
    Playing,
    /// The last slide has been shown and playback ran off the end.
    Finished,
}

/// Redraw bookkeeping for one presentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayStats {
    /// Slides pushed to the stage.
    pub drawn: u64,
    /// Seeks skipped because the target's merged state was already shown.
    pub elided: u64,
}

/// Playback controller: scrubbing, auto-advance and speed control.
///
/// The controller owns the single pending auto-advance deadline; pausing,
/// seeking or dropping the player is guaranteed to cancel it, and no stale
/// timer can ever fire against a destroyed timeline. The deadline for leaving slide `n`
/// is `shown_at + dwell(n) / speed`; changing the speed reschedules the wait
/// from zero.
pub struct Player {
    slide: usize,
    speed: f64,
    state: PlayState,
    due: Option<Instant>,
    last_digest: Option<u64>,
    stats: PlayStats,
}

impl Player {
    /// Create a paused player positioned on slide 0 at normal speed.
    pub fn new() -> Self {
        Self {
            slide: 0,
            speed: 1.0,
            state: PlayState::Paused,
            due: None,
            last_digest: None,
            stats: PlayStats::default(),
        }
    }

    /// Slide the player is positioned on.
    pub fn current_slide(&self) -> usize {
        self.slide
    }

    /// Playback state.
    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Relative speed multiplier.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Redraw bookkeeping.
    pub fn stats(&self) -> PlayStats {
        self.stats
    }

    /// Seek to slide `n` (clamped) and show it.
    ///
    /// A seek whose merged state is already on the stage is elided. While
    /// playing, the auto-advance deadline restarts from the new slide.
    pub fn show(&mut self, timeline: &Timeline, stage: &mut Stage, n: usize, now: Instant) {
        if timeline.slide_count() == 0 {
            return;
        }
        let target = n.min(timeline.slide_count() - 1);
        let digest = timeline.slide_digest(target);
        if self.last_digest == Some(digest) {
            self.stats.elided += 1;
        } else {
            if timeline.draw_slide(stage, target).is_err() {
                return;
            }
            self.stats.drawn += 1;
            self.last_digest = Some(digest);
        }
        self.slide = target;
        if self.state == PlayState::Playing {
            self.schedule(timeline, now);
        } else {
            self.due = None;
            self.state = PlayState::Paused;
        }
    }

    /// Start (or resume) auto-advancing from the current slide.
    ///
    /// Playing again after finishing restarts from the first slide.
    pub fn play(&mut self, timeline: &Timeline, stage: &mut Stage, now: Instant) {
        if self.state == PlayState::Finished {
            self.slide = 0;
        }
        self.state = PlayState::Playing;
        self.show(timeline, stage, self.slide, now);
    }

    /// Stop auto-advancing; cancels the pending deadline.
    pub fn pause(&mut self) {
        if self.state == PlayState::Playing {
            self.state = PlayState::Paused;
        }
        self.due = None;
    }

    /// Step one slide forward.
    pub fn next(&mut self, timeline: &Timeline, stage: &mut Stage, now: Instant) {
        self.show(timeline, stage, self.slide.saturating_add(1), now);
    }

    /// Step one slide back.
    pub fn prev(&mut self, timeline: &Timeline, stage: &mut Stage, now: Instant) {
        self.show(timeline, stage, self.slide.saturating_sub(1), now);
    }

    /// Change the speed multiplier (clamped to a sane positive range).
    ///
    /// A pending auto-advance restarts its wait from zero at the new speed.
    pub fn set_speed(&mut self, timeline: &Timeline, speed: f64, now: Instant) {
        self.speed = speed.clamp(0.01, 100.0);
        if self.due.is_some() {
            self.schedule(timeline, now);
        }
    }

    /// Fire a due auto-advance, if any. Returns `true` when a slide advanced.
    pub fn poll(&mut self, timeline: &Timeline, stage: &mut Stage, now: Instant) -> bool {
        let Some(due) = self.due else {
            return false;
        };
        if now < due {
            return false;
        }
        if self.slide + 1 < timeline.slide_count() {
            tracing::debug!(from = self.slide, "auto-advance");
            self.show(timeline, stage, self.slide + 1, now);
            true
        } else {
            self.state = PlayState::Finished;
            self.due = None;
            false
        }
    }

    fn schedule(&mut self, timeline: &Timeline, now: Instant) {
        self.due = timeline
            .slide(self.slide)
            .map(|slide| now + slide.dwell.div_f64(self.speed));
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/present/player.rs"]
mod tests;
