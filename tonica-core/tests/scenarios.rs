mod common;

use common::{names, pc, rank_default, set, uniform, weighted};
use tonica_core::containment::containing_scales;
use tonica_core::{rank, RankingParams, ScoringParams, SelectionHistory};
use tonica_types::{Caveat, Mode, NoteWeights, PitchSet};

#[test]
fn test_major_triad_matches_relative_keys() {
    let matches = containing_scales(set(&[0, 4, 7]));
    assert!(matches.iter().any(|s| s.root == pc(0) && s.mode == Mode::Major));
    assert!(matches.iter().any(|s| s.root == pc(9) && s.mode == Mode::Minor));

    let ranking = rank_default(&uniform(&[0, 4, 7]));
    for name in ["C Major", "A Minor"] {
        let c = ranking
            .candidates
            .iter()
            .find(|c| c.name() == name)
            .unwrap_or_else(|| panic!("{} missing", name));
        assert_eq!(c.coverage_in_pct, 100);
        assert_eq!(c.coverage_out_pct, 0);
    }
}

#[test]
fn test_full_major_scale_picks_c_major() {
    let notes = [0, 2, 4, 5, 7, 9, 11];
    let matches = containing_scales(set(&notes));
    // A natural minor shares the C major pitch set
    assert_eq!(matches.len(), 2);
    assert_eq!((matches[0].root, matches[0].mode), (pc(0), Mode::Major));
    assert_eq!((matches[1].root, matches[1].mode), (pc(9), Mode::Minor));

    let ranking = rank_default(&uniform(&notes));
    assert_eq!(names(&ranking), vec!["C Major", "A Minor"]);
    let best = ranking.best().expect("best guess");
    assert_eq!((best.root, best.mode), (pc(0), Mode::Major));
    assert_eq!(
        ranking.explanation.caveats,
        vec![Caveat::CoverageTie { count: 2 }]
    );
}

#[test]
fn test_emphasis_changes_ordering() {
    let tonic_heavy = rank_default(&weighted(&[(0, 10.0), (4, 1.0), (7, 1.0)]));
    let dominant_heavy = rank_default(&weighted(&[(0, 1.0), (4, 1.0), (7, 10.0)]));

    assert_ne!(names(&tonic_heavy), names(&dominant_heavy));
    assert_eq!(tonic_heavy.best().map(|c| c.name()).as_deref(), Some("C Major"));
    assert_eq!(dominant_heavy.best().map(|c| c.name()).as_deref(), Some("G Major"));
}

#[test]
fn test_empty_selection_has_no_best_guess() {
    let ranking = rank(
        PitchSet::empty(),
        &NoteWeights::new(),
        &ScoringParams::default(),
        &RankingParams::default(),
    );
    assert!(ranking.is_empty());
    assert!(ranking.best().is_none());
    assert!(!ranking.full_match);
    assert!(containing_scales(PitchSet::empty()).is_empty());
}

#[test]
fn test_history_branch_is_discarded() {
    let a = set(&[0]);
    let b = set(&[0, 4]);
    let c = set(&[0, 3]);

    let mut history = SelectionHistory::new();
    history.push(a);
    history.push(b);
    assert_eq!(history.undo(), Some(a));
    assert_eq!(history.current(), a);
    assert_eq!(history.redo(), Some(b));
    assert_eq!(history.current(), b);

    history.undo();
    history.push(c);
    assert_eq!(history.redo(), None);
    assert_eq!(history.current(), c);
    assert!(!(0..history.len()).any(|_| history.undo() == Some(b)));
}
