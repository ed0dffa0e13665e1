#![allow(dead_code)]

use tonica_core::{rank, RankingParams, ScoringParams};
use tonica_types::{NoteWeights, PitchClass, PitchSet, Ranking};

pub fn pc(n: u8) -> PitchClass {
    PitchClass::new(n)
}

pub fn set(pcs: &[u8]) -> PitchSet {
    pcs.iter().map(|&p| pc(p)).collect()
}

pub fn uniform(pcs: &[u8]) -> NoteWeights {
    pcs.iter().map(|&p| (pc(p), 1.0)).collect()
}

pub fn weighted(pairs: &[(u8, f64)]) -> NoteWeights {
    pairs.iter().map(|&(p, w)| (pc(p), w)).collect()
}

/// Rank with default parameters, using the weighted notes as the selection.
pub fn rank_default(weights: &NoteWeights) -> Ranking {
    rank(
        weights.pitch_classes(),
        weights,
        &ScoringParams::default(),
        &RankingParams::default(),
    )
}

pub fn names(ranking: &Ranking) -> Vec<String> {
    ranking.candidates.iter().map(|c| c.name()).collect()
}

/// Every non-empty subset of the twelve pitch classes.
pub fn all_selections() -> impl Iterator<Item = PitchSet> {
    (1u16..4096).map(|mask| (0..12u8).filter(|b| mask & (1 << b) != 0).map(pc).collect())
}
