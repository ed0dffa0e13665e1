//! # tonica-types
//!
//! Shared type definitions for the Tonica key finder.
//! This crate contains the value types passed between tonica-core and its
//! front ends: pitch classes, modes, note weights and ranking results.

mod candidate;
mod mode;
mod pitch;
mod weights;

pub use candidate::{Candidate, Caveat, Emphasis, Explanation, Ranking, Reason, ScaleDegree};
pub use mode::{Mode, ParseModeError};
pub use pitch::{ParsePitchClassError, PitchClass, PitchSet};
pub use weights::NoteWeights;

/// One sounding note as delivered by a file decoder: which pitch class it was
/// and how long it sounded.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NoteEvent {
    pub pitch_class: PitchClass,
    pub duration_secs: f64,
}

impl NoteEvent {
    pub fn new(pitch_class: PitchClass, duration_secs: f64) -> Self {
        Self {
            pitch_class,
            duration_secs,
        }
    }
}
