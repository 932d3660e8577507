use std::time::{Duration, Instant};

use super::*;

use crate::algo::{Algorithm, SelectionPrompt};
use crate::foundation::core::EntityId;
use crate::foundation::error::LecternResult;
use crate::graph::view::GraphView;
use crate::present::timeline::Recorder;
use crate::state::model::VertexPatch;

/// Three slides, one second of dwell each.
struct Paced;

impl Algorithm for Paced {
    fn name(&self) -> &'static str {
        "paced"
    }

    fn description(&self) -> &'static str {
        "three evenly paced slides"
    }

    fn required_selection(&self) -> Vec<SelectionPrompt> {
        vec![SelectionPrompt::plain("pick any vertex")]
    }

    fn check(&self, _graph: &GraphView) -> LecternResult<()> {
        Ok(())
    }

    fn run(&mut self, rec: &mut Recorder<'_>) {
        let v = rec.selection()[0];
        for step in 0..3 {
            rec.set_slide_state(v, VertexPatch::new().label(step as f64));
            rec.snapshot(Duration::from_millis(1000), &format!("step {step}"));
        }
    }
}

fn prepared() -> (Stage, Timeline, EntityId) {
    let mut stage = Stage::new();
    stage.set_jitter_enabled(false);
    let v = stage.add_vertex(VertexPatch::new().opacity(1.0));
    let mut tl = Timeline::new(&stage, Box::new(Paced), vec![v]).unwrap();
    tl.prepare(&mut stage).unwrap();
    (stage, tl, v)
}

#[test]
fn show_seeks_and_clamps() {
    let (mut stage, tl, _v) = prepared();
    let mut player = Player::new();
    let t0 = Instant::now();
    player.show(&tl, &mut stage, 99, t0);
    assert_eq!(player.current_slide(), 2);
    assert_eq!(player.state(), PlayState::Paused);
}

#[test]
fn repeated_seeks_to_the_same_state_are_elided() {
    let (mut stage, tl, _v) = prepared();
    let mut player = Player::new();
    let t0 = Instant::now();
    player.show(&tl, &mut stage, 1, t0);
    player.show(&tl, &mut stage, 1, t0);
    let stats = player.stats();
    assert_eq!(stats.drawn, 1);
    assert_eq!(stats.elided, 1);
}

#[test]
fn autoplay_advances_when_the_dwell_elapses() {
    let (mut stage, tl, _v) = prepared();
    let mut player = Player::new();
    let t0 = Instant::now();
    player.play(&tl, &mut stage, t0);
    assert_eq!(player.state(), PlayState::Playing);
    assert_eq!(player.current_slide(), 0);

    assert!(!player.poll(&tl, &mut stage, t0 + Duration::from_millis(900)));
    assert_eq!(player.current_slide(), 0);
    assert!(player.poll(&tl, &mut stage, t0 + Duration::from_millis(1100)));
    assert_eq!(player.current_slide(), 1);
}

#[test]
fn playback_finishes_after_the_last_slide() {
    let (mut stage, tl, _v) = prepared();
    let mut player = Player::new();
    let t0 = Instant::now();
    player.show(&tl, &mut stage, 2, t0);
    player.play(&tl, &mut stage, t0);
    assert!(!player.poll(&tl, &mut stage, t0 + Duration::from_millis(1100)));
    assert_eq!(player.state(), PlayState::Finished);
    // Nothing further fires once finished.
    assert!(!player.poll(&tl, &mut stage, t0 + Duration::from_millis(60_000)));
}

#[test]
fn play_after_finish_restarts_from_the_top() {
    let (mut stage, tl, _v) = prepared();
    let mut player = Player::new();
    let t0 = Instant::now();
    player.show(&tl, &mut stage, 2, t0);
    player.play(&tl, &mut stage, t0);
    player.poll(&tl, &mut stage, t0 + Duration::from_millis(1100));
    assert_eq!(player.state(), PlayState::Finished);
    player.play(&tl, &mut stage, t0 + Duration::from_millis(1200));
    assert_eq!(player.state(), PlayState::Playing);
    assert_eq!(player.current_slide(), 0);
}

#[test]
fn pause_cancels_the_pending_advance() {
    let (mut stage, tl, _v) = prepared();
    let mut player = Player::new();
    let t0 = Instant::now();
    player.play(&tl, &mut stage, t0);
    player.pause();
    assert_eq!(player.state(), PlayState::Paused);
    assert!(!player.poll(&tl, &mut stage, t0 + Duration::from_millis(60_000)));
    assert_eq!(player.current_slide(), 0);
}

#[test]
fn changing_speed_restarts_the_wait_at_the_new_rate() {
    let (mut stage, tl, _v) = prepared();
    let mut player = Player::new();
    let t0 = Instant::now();
    player.play(&tl, &mut stage, t0);
    // Halfway through the one-second dwell, halve the speed: the wait
    // restarts from zero as a two-second dwell.
    player.set_speed(&tl, 0.5, t0 + Duration::from_millis(500));
    assert!(!player.poll(&tl, &mut stage, t0 + Duration::from_millis(1100)));
    assert!(player.poll(&tl, &mut stage, t0 + Duration::from_millis(2600)));
    assert_eq!(player.current_slide(), 1);

    // Doubling the speed shortens the next wait.
    player.set_speed(&tl, 2.0, t0 + Duration::from_millis(2600));
    assert!(player.poll(&tl, &mut stage, t0 + Duration::from_millis(3200)));
    assert_eq!(player.current_slide(), 2);
}

#[test]
fn next_and_prev_step_and_stay_clamped() {
    let (mut stage, tl, _v) = prepared();
    let mut player = Player::new();
    let t0 = Instant::now();
    player.prev(&tl, &mut stage, t0);
    assert_eq!(player.current_slide(), 0);
    player.next(&tl, &mut stage, t0);
    player.next(&tl, &mut stage, t0);
    player.next(&tl, &mut stage, t0);
    assert_eq!(player.current_slide(), 2);
}
