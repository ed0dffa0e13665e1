//! Weighted scoring of every key against the used notes.
//!
//! Each used note contributes `weight × multiplier` to a key's score when it
//! lies in the scale, or `weight × outside` (plus `weight × wrong_third` for
//! the other mode's third) to its penalty when it does not. The multipliers
//! live in [`ScoringParams`] so they can be retuned without touching the
//! scoring loop.

use serde::{Deserialize, Serialize};
use tonica_types::{Mode, NoteWeights, PitchSet};

use crate::scale::{all_instances, ScaleInstance};

/// Degree multipliers and penalty factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringParams {
    pub tonic: f64,
    pub dominant: f64,
    pub subdominant: f64,
    /// The third that matches the mode being scored.
    pub third: f64,
    pub outside: f64,
    /// Extra penalty when the other mode's third is used.
    pub wrong_third: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            tonic: 4.0,
            dominant: 1.75,
            subdominant: 0.35,
            third: 1.4,
            outside: 2.5,
            wrong_third: 0.75,
        }
    }
}

impl ScoringParams {
    /// Multiplier for an in-scale note `degree` semitones above the root.
    pub fn degree_multiplier(&self, degree: u8, mode: Mode) -> f64 {
        match degree {
            0 => self.tonic,
            7 => self.dominant,
            5 => self.subdominant,
            d if d == mode.third() => self.third,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleScore {
    pub instance: ScaleInstance,
    pub score: f64,
    pub penalty: f64,
}

impl ScaleScore {
    pub fn net(&self) -> f64 {
        self.score - self.penalty
    }
}

pub fn score_instance(
    instance: ScaleInstance,
    used: PitchSet,
    weights: &NoteWeights,
    params: &ScoringParams,
) -> ScaleScore {
    let mut score = 0.0;
    let mut penalty = 0.0;

    for pc in used.iter() {
        let w = weights.get(pc);
        let degree = pc.interval_from(instance.root);
        if instance.contains(pc) {
            score += w * params.degree_multiplier(degree, instance.mode);
        } else {
            penalty += w * params.outside;
            if degree == instance.mode.wrong_third() {
                penalty += w * params.wrong_third;
            }
        }
    }

    ScaleScore {
        instance,
        score,
        penalty,
    }
}

/// Scores for all 24 keys, in scale enumeration order.
pub fn score_all(used: PitchSet, weights: &NoteWeights, params: &ScoringParams) -> Vec<ScaleScore> {
    all_instances()
        .map(|inst| score_instance(inst, used, weights, params))
        .collect()
}
