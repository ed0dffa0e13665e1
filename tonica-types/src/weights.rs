use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{PitchClass, PitchSet};

/// Non-negative weight per pitch class. A missing entry means weight 0.
///
/// For file input the weight is accumulated sounding time; for a manual
/// selection it is chosen by a weighting policy in tonica-core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteWeights(BTreeMap<PitchClass, f64>);

impl NoteWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate `weight` onto `pc`. Negative and non-finite weights count
    /// as 0, but the pitch class is still recorded as present.
    pub fn add(&mut self, pc: PitchClass, weight: f64) {
        *self.0.entry(pc).or_insert(0.0) += sanitize(weight);
    }

    pub fn set(&mut self, pc: PitchClass, weight: f64) {
        self.0.insert(pc, sanitize(weight));
    }

    pub fn get(&self, pc: PitchClass) -> f64 {
        self.0.get(&pc).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, pc: PitchClass) -> bool {
        self.0.contains_key(&pc)
    }

    /// Sum of all weights; 0 for an empty mapping.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Largest single weight, or 0 when empty.
    pub fn max_weight(&self) -> f64 {
        self.0.values().copied().fold(0.0, f64::max)
    }

    pub fn min_weight(&self) -> Option<f64> {
        self.0.values().copied().reduce(f64::min)
    }

    pub fn pitch_classes(&self) -> PitchSet {
        self.0.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PitchClass, f64)> + '_ {
        self.0.iter().map(|(&pc, &w)| (pc, w))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn sanitize(weight: f64) -> f64 {
    if weight.is_finite() {
        weight.max(0.0)
    } else {
        0.0
    }
}

impl FromIterator<(PitchClass, f64)> for NoteWeights {
    fn from_iter<I: IntoIterator<Item = (PitchClass, f64)>>(iter: I) -> Self {
        let mut weights = NoteWeights::new();
        for (pc, w) in iter {
            weights.add(pc, w);
        }
        weights
    }
}
