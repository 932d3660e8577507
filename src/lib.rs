//! Lectern is an interactive graph-algorithm presentation engine.
//!
//! A user builds a graph on a stage, picks an algorithm, and the algorithm
//! runs to completion instantly. Its execution is captured as a sequence
//! of named, timed snapshots ("slides") that can then be scrubbed forward,
//! backward, or jumped through arbitrarily, with every visual entity easing
//! smoothly between states.
//!
//! # Pipeline overview
//!
//! 1. **Build**: vertices and edges live on a [`Stage`], a dense entity arena
//!    with a tick-driven animation scheduler and a [`RenderSink`] boundary.
//! 2. **Record**: a [`Timeline`] runs an [`Algorithm`] once; the algorithm
//!    narrates itself through a recording surface, staging per-entity state
//!    deltas and committing them as slides.
//! 3. **Replay**: any slide is reconstructed by merging its recorded delta
//!    over a derived baseline and easing the touched entities there. No
//!    intermediate slides are ever replayed, so seeking is free in both
//!    directions.
//! 4. **Play**: a [`Player`] owns dwell-time auto-advance, speed control and
//!    cancellation; a [`Session`] ties one stage to at most one live timeline.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: recording and replay are pure for a given
//!   graph; even the idle-motion jitter is seeded.
//! - **Rendering stays outside**: the engine pushes resolved entity states at
//!   a sink trait and never draws anything itself.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod graph;
pub(crate) mod present;
pub(crate) mod state;

/// Algorithm contract and the bundled graph algorithms.
pub mod algo;
/// Session context: one stage, at most one live presentation.
pub mod session;
/// Entity arena, animation scheduler and render-sink boundary.
pub mod stage;

pub use crate::foundation::core::{EntityId, EntityKind, Palette, Point, Rgb, Vec2};
pub use crate::foundation::error::{LecternError, LecternResult};

pub use crate::algo::{Algorithm, SelectionPrompt};
pub use crate::algo::boruvka::Boruvka;
pub use crate::algo::dijkstra::Dijkstra;
pub use crate::algo::ford_fulkerson::FordFulkerson;
pub use crate::graph::spec::{EdgeInit, EdgeSpec, GraphSpec, VertexSpec, load_graph};
pub use crate::graph::view::{EdgeInfo, GraphView};
pub use crate::present::player::{PlayState, PlayStats, Player};
pub use crate::present::slide::{Slide, SlideDelta};
pub use crate::present::timeline::{Recorder, Timeline};
pub use crate::session::Session;
pub use crate::stage::entity::{Apply, Done, Entity};
pub use crate::stage::sink::{NullSink, RecordingSink, RenderSink};
pub use crate::stage::stage::{DEFAULT_TRANSITION_WINDOW, Stage};
pub use crate::stage::wave::{Jitter, Rng64, Wave};
pub use crate::state::blend::Blend;
pub use crate::state::model::{
    Arrows, BackdropPatch, BackdropState, EdgePatch, EdgeState, EntityState, HintPatch, HintState,
    Label, StatePatch, VertexPatch, VertexState,
};
