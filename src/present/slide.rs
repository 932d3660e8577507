use std::time::Duration;

use xxhash_rust::xxh3::Xxh3;

use crate::state::model::StatePatch;

/// Per-entity delta vector, indexed by frozen arena slot.
///
/// `None` means the entity was never touched by the recording.
pub type SlideDelta = Vec<Option<StatePatch>>;

/// One recorded step of an algorithm's execution.
#[derive(Clone, Debug)]
pub struct Slide {
    /// How long playback dwells on this slide before auto-advancing
    /// (divided by the playback speed multiplier).
    pub dwell: Duration,
    /// Narration shown with the slide.
    pub narration: String,
    /// Accumulated per-entity state delta at the moment of the snapshot.
    pub delta: SlideDelta,
}

/// Order-sensitive xxh3 digest of a delta vector.
///
/// Two slides that would push identical merged states hash equally, which the
/// player uses to skip redundant redraws when seeking.
pub fn fingerprint_delta<'a>(patches: impl Iterator<Item = Option<&'a StatePatch>>) -> u64 {
    let mut hasher = Xxh3::new();
    for (index, patch) in patches.enumerate() {
        let Some(patch) = patch else {
            continue;
        };
        if let Ok(bytes) = serde_json::to_vec(patch) {
            hasher.update(&(index as u32).to_le_bytes());
            hasher.update(&bytes);
        }
    }
    hasher.digest()
}

#[cfg(test)]
#[path = "../../tests/unit/present/slide.rs"]
mod tests;
