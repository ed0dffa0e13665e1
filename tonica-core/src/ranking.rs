//! Candidate ranking: merges containment matches with weighted scores.
//!
//! When some key holds every used note, the list is exactly those keys,
//! ordered by net score. Otherwise the list falls back to the best-scoring
//! keys without the containment guarantee. Either way the first entry is the
//! best guess.

use std::cmp::Reverse;

use tonica_types::{Candidate, Caveat, Explanation, NoteWeights, PitchSet, Ranking};

use crate::containment::containing_scales;
use crate::explain;
use crate::scale::INSTANCE_COUNT;
use crate::scoring::{score_all, ScaleScore, ScoringParams};

/// Number of weighted candidates listed when nothing contains every note.
pub const DEFAULT_FALLBACK_CANDIDATES: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingParams {
    pub fallback_candidates: usize,
}

impl Default for RankingParams {
    fn default() -> Self {
        Self {
            fallback_candidates: DEFAULT_FALLBACK_CANDIDATES,
        }
    }
}

pub fn rank(
    used: PitchSet,
    weights: &NoteWeights,
    scoring: &ScoringParams,
    params: &RankingParams,
) -> Ranking {
    if used.is_empty() {
        log::debug!("rank: empty selection, no candidates");
        return Ranking::empty();
    }

    let total: f64 = used.iter().map(|pc| weights.get(pc)).sum();
    let scores = score_all(used, weights, scoring);
    debug_assert_eq!(scores.len(), INSTANCE_COUNT);

    let matches = containing_scales(used);
    let full_match = !matches.is_empty();

    let mut chosen: Vec<ScaleScore> = if full_match {
        scores
            .into_iter()
            .filter(|s| matches.contains(&s.instance))
            .collect()
    } else {
        scores
    };
    let scale = net_scale(&chosen);
    chosen.sort_by_key(|s| Reverse(order_key(s.net(), scale)));
    if !full_match {
        chosen.truncate(params.fallback_candidates);
    }

    let mut candidates: Vec<Candidate> = chosen
        .iter()
        .map(|s| {
            let (coverage_in_pct, coverage_out_pct) = coverage(s, used, weights, total);
            Candidate {
                root: s.instance.root,
                mode: s.instance.mode,
                contains_all: used.is_subset(s.instance.pitches),
                score: s.score,
                penalty: s.penalty,
                net_score: s.net(),
                coverage_in_pct,
                coverage_out_pct,
                emphasis_rank: None,
            }
        })
        .collect();

    let tied = annotate_emphasis(&mut candidates);

    let mut caveats = Vec::new();
    if tied > 1 {
        caveats.push(Caveat::CoverageTie { count: tied });
    }
    if !full_match {
        caveats.push(Caveat::NoFullMatch);
    }

    let reasons = candidates
        .first()
        .map(|best| explain::reasons(best, used, weights))
        .unwrap_or_default();

    if let Some(best) = candidates.first() {
        log::debug!(
            "rank: {} notes, {} candidates, best {} (net {:.3}, {}%)",
            used.len(),
            candidates.len(),
            best,
            best.net_score,
            best.coverage_in_pct
        );
    }

    Ranking {
        candidates,
        full_match,
        explanation: Explanation { reasons, caveats },
    }
}

/// Largest net magnitude among the scored keys; 1 when all are zero.
fn net_scale(scores: &[ScaleScore]) -> f64 {
    let scale = scores.iter().map(|s| s.net().abs()).fold(0.0, f64::max);
    if scale.is_normal() {
        scale
    } else {
        1.0
    }
}

/// Net score relative to `scale`, at a resolution of one part in 1e9.
/// Keys whose scores are equal on paper but differ by summation rounding
/// share a key and keep enumeration order. The result is within ±1e9.
fn order_key(net: f64, scale: f64) -> i64 {
    (net / scale * ORDER_RESOLUTION).round() as i64
}

const ORDER_RESOLUTION: f64 = 1e9;

/// `(in, out)` coverage percentages. Zero total weight yields `(0, 0)`.
fn coverage(s: &ScaleScore, used: PitchSet, weights: &NoteWeights, total: f64) -> (u8, u8) {
    if total <= 0.0 {
        return (0, 0);
    }
    let inside: f64 = used
        .iter()
        .filter(|&pc| s.instance.contains(pc))
        .map(|pc| weights.get(pc))
        .sum();
    let pct = (100.0 * inside / total).round().clamp(0.0, 100.0) as u8;
    (pct, 100 - pct)
}

/// Number candidates tied at 100% coverage by their position in the list.
/// Returns the size of the tie group.
fn annotate_emphasis(candidates: &mut [Candidate]) -> usize {
    let tied = candidates
        .iter()
        .filter(|c| c.coverage_in_pct == 100)
        .count();
    if tied > 1 {
        for (rank, c) in candidates
            .iter_mut()
            .filter(|c| c.coverage_in_pct == 100)
            .enumerate()
        {
            c.emphasis_rank = Some(rank);
        }
    }
    tied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::ScaleInstance;
    use tonica_types::{Mode, PitchClass, Reason};

    fn pc(n: u8) -> PitchClass {
        PitchClass::new(n)
    }

    fn weights(pairs: &[(u8, f64)]) -> NoteWeights {
        pairs.iter().map(|&(p, w)| (pc(p), w)).collect()
    }

    fn run(w: &NoteWeights) -> Ranking {
        rank(
            w.pitch_classes(),
            w,
            &ScoringParams::default(),
            &RankingParams::default(),
        )
    }

    fn names(r: &Ranking) -> Vec<String> {
        r.candidates.iter().map(|c| c.name()).collect()
    }

    #[test]
    fn empty_selection_is_empty_ranking() {
        let r = rank(
            PitchSet::empty(),
            &NoteWeights::new(),
            &ScoringParams::default(),
            &RankingParams::default(),
        );
        assert!(r.is_empty());
        assert!(r.best().is_none());
        assert!(r.explanation.reasons.is_empty());
    }

    #[test]
    fn containment_list_sorted_by_net() {
        let r = run(&weights(&[(0, 10.0), (4, 1.0), (7, 1.0)]));
        assert!(r.full_match);
        assert_eq!(
            names(&r),
            vec!["C Major", "F Major", "A Minor", "E Minor", "D Minor", "G Major"]
        );
        assert!(r.candidates.iter().all(|c| c.contains_all));
        assert!(r
            .candidates
            .windows(2)
            .all(|w| w[0].net_score >= w[1].net_score));
    }

    #[test]
    fn full_coverage_ties_get_emphasis_ranks() {
        let r = run(&weights(&[(0, 1.0), (4, 1.0), (7, 1.0)]));
        let ranks: Vec<Option<usize>> = r.candidates.iter().map(|c| c.emphasis_rank).collect();
        assert_eq!(ranks, (0..6).map(Some).collect::<Vec<_>>());
        assert_eq!(r.explanation.caveats, vec![Caveat::CoverageTie { count: 6 }]);
    }

    #[test]
    fn harmonic_minor_collection_has_no_full_match() {
        // C D Eb F G Ab B fits no major or minor scale
        let r = run(&weights(&[(0, 1.0), (2, 1.0), (3, 1.0), (5, 1.0), (7, 1.0), (8, 1.0), (11, 1.0)]));
        assert!(!r.full_match);
        assert!(r.candidates.iter().all(|c| c.coverage_in_pct < 100));
        assert!(r.candidates.iter().all(|c| c.emphasis_rank.is_none()));
    }

    #[test]
    fn fallback_lists_top_twelve() {
        let r = run(&weights(&[(0, 1.0), (1, 1.0), (2, 1.0)]));
        assert!(!r.full_match);
        assert_eq!(r.candidates.len(), DEFAULT_FALLBACK_CANDIDATES);
        assert!(r.candidates.iter().all(|c| !c.contains_all));
        assert!(r.explanation.caveats.contains(&Caveat::NoFullMatch));
    }

    #[test]
    fn fallback_size_is_configurable() {
        let w = weights(&[(0, 1.0), (1, 1.0), (2, 1.0)]);
        let r = rank(
            w.pitch_classes(),
            &w,
            &ScoringParams::default(),
            &RankingParams {
                fallback_candidates: 3,
            },
        );
        assert_eq!(r.candidates.len(), 3);
    }

    #[test]
    fn coverage_is_weight_based() {
        // C weighs 6 of 8; C major holds C and D but not C#
        let w = weights(&[(0, 6.0), (1, 1.0), (2, 1.0)]);
        let used = w.pitch_classes();
        let c_major = ScaleScore {
            instance: ScaleInstance::new(pc(0), Mode::Major),
            score: 0.0,
            penalty: 0.0,
        };
        assert_eq!(coverage(&c_major, used, &w, w.total()), (88, 12));

        let r = run(&w);
        for c in &r.candidates {
            assert_eq!(c.coverage_in_pct + c.coverage_out_pct, 100);
        }
    }

    #[test]
    fn zero_total_weight_gives_zero_coverage() {
        let w = weights(&[(0, 0.0), (4, 0.0), (7, 0.0)]);
        let r = run(&w);
        assert!(!r.is_empty());
        for c in &r.candidates {
            assert_eq!((c.coverage_in_pct, c.coverage_out_pct), (0, 0));
            assert_eq!(c.emphasis_rank, None);
        }
        assert_eq!(r.explanation.reasons, vec![Reason::NoClearEmphasis]);
    }

    #[test]
    fn order_does_not_depend_on_weight_magnitude() {
        let unit = run(&weights(&[(0, 1.0), (4, 1.0), (7, 1.0)]));
        let tiny = run(&weights(&[(0, 1e-7), (4, 1e-7), (7, 1e-7)]));
        let huge = run(&weights(&[(0, 1e12), (4, 1e12), (7, 1e12)]));
        assert_eq!(
            names(&unit),
            vec!["C Major", "E Minor", "G Major", "A Minor", "F Major", "D Minor"]
        );
        assert_eq!(names(&tiny), names(&unit));
        assert_eq!(names(&huge), names(&unit));
        assert!(tiny
            .candidates
            .windows(2)
            .all(|w| w[0].net_score >= w[1].net_score));
    }

    #[test]
    fn close_scores_are_not_merged() {
        // C Major and A Minor differ only by a 1e-8 nudge on C
        let w = weights(&[
            (0, 1.0 + 1e-8),
            (2, 1.0),
            (4, 1.0),
            (5, 1.0),
            (7, 1.0),
            (9, 1.0),
            (11, 1.0),
        ]);
        let r = run(&w);
        assert_eq!(names(&r), vec!["C Major", "A Minor"]);
        assert!(r.candidates[0].net_score > r.candidates[1].net_score);

        // same nudge on A flips the order
        let w = weights(&[
            (0, 1.0),
            (2, 1.0),
            (4, 1.0),
            (5, 1.0),
            (7, 1.0),
            (9, 1.0 + 1e-8),
            (11, 1.0),
        ]);
        assert_eq!(names(&run(&w)), vec!["A Minor", "C Major"]);
    }

    #[test]
    fn equal_scores_keep_enumeration_order() {
        // Full C major collection: C Major and A Minor score the same.
        let w = weights(&[(0, 1.0), (2, 1.0), (4, 1.0), (5, 1.0), (7, 1.0), (9, 1.0), (11, 1.0)]);
        let r = run(&w);
        assert_eq!(names(&r), vec!["C Major", "A Minor"]);
        assert!((r.candidates[0].net_score - r.candidates[1].net_score).abs() < 1e-9);
    }
}
