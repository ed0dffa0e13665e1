//! Pitch-class weighting: note events or a manual selection → [`NoteWeights`].

use tonica_types::{NoteEvent, NoteWeights, PitchSet};

/// Constants for weighting notes a user adds on top of a loaded file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightingParams {
    /// Fraction of the baseline's smallest weight given to an added note.
    pub baseline_fraction: f64,
    /// Floor for the synthetic weight of an added note.
    pub min_synthetic_weight: f64,
}

impl Default for WeightingParams {
    fn default() -> Self {
        Self {
            baseline_fraction: 0.25,
            min_synthetic_weight: 0.0001,
        }
    }
}

/// How a bare selection gets its weights. `Baseline` is only available when
/// emphasis data (a loaded file) exists.
#[derive(Debug, Clone, Copy)]
pub enum WeightingPolicy<'a> {
    /// Every selected note weighs 1.
    Uniform,
    /// Reuse file-derived weights; notes the file never played get a small
    /// synthetic weight so they cannot dominate the explanation.
    Baseline(&'a NoteWeights),
}

impl<'a> WeightingPolicy<'a> {
    /// Pick `Baseline` when a non-empty baseline exists, `Uniform` otherwise.
    pub fn for_baseline(baseline: Option<&'a NoteWeights>) -> Self {
        match baseline {
            Some(b) if !b.is_empty() => WeightingPolicy::Baseline(b),
            _ => WeightingPolicy::Uniform,
        }
    }

    pub fn has_emphasis(&self) -> bool {
        matches!(self, WeightingPolicy::Baseline(_))
    }
}

/// Sum durations per pitch class.
pub fn weights_from_events(events: &[NoteEvent]) -> NoteWeights {
    events
        .iter()
        .map(|e| (e.pitch_class, e.duration_secs))
        .collect()
}

pub fn weights_from_selection(
    selection: PitchSet,
    policy: WeightingPolicy<'_>,
    params: &WeightingParams,
) -> NoteWeights {
    let mut weights = NoteWeights::new();
    match policy {
        WeightingPolicy::Baseline(baseline) if !baseline.is_empty() => {
            let min = baseline.min_weight().unwrap_or(0.0);
            let synthetic = (params.baseline_fraction * min).max(params.min_synthetic_weight);
            for pc in selection.iter() {
                let w = baseline.get(pc);
                weights.set(pc, if w > 0.0 { w } else { synthetic });
            }
        }
        _ => {
            for pc in selection.iter() {
                weights.set(pc, 1.0);
            }
        }
    }
    weights
}
