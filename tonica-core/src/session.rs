use tonica_types::{NoteEvent, NoteWeights, PitchClass, PitchSet, Ranking};

use crate::history::SelectionHistory;
use crate::ranking::{rank, RankingParams};
use crate::scoring::ScoringParams;
use crate::weighting::{weights_from_events, weights_from_selection, WeightingParams, WeightingPolicy};

/// Every tunable the engine and session read, resolved from config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineParams {
    pub scoring: ScoringParams,
    pub weighting: WeightingParams,
    pub ranking: RankingParams,
    /// Maximum selection history length. `None` = unbounded.
    pub history_limit: Option<usize>,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            scoring: ScoringParams::default(),
            weighting: WeightingParams::default(),
            ranking: RankingParams::default(),
            history_limit: None,
        }
    }
}

/// State of one interactive session, owned by the front end and passed to
/// the engine by reference.
///
/// Holds the weights of the last loaded file (the baseline), the current note
/// selection and its undo/redo history. The engine itself stays stateless:
/// [`Session::analyze`] derives weights from this state and ranks them.
#[derive(Debug, Clone)]
pub struct Session {
    params: EngineParams,
    baseline: Option<NoteWeights>,
    selection: PitchSet,
    history: SelectionHistory,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EngineParams::default())
    }
}

impl Session {
    pub fn new(params: EngineParams) -> Self {
        Self {
            params,
            baseline: None,
            selection: PitchSet::empty(),
            history: new_history(&params),
        }
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    pub fn selection(&self) -> PitchSet {
        self.selection
    }

    pub fn baseline(&self) -> Option<&NoteWeights> {
        self.baseline.as_ref()
    }

    pub fn history(&self) -> &SelectionHistory {
        &self.history
    }

    /// Replace the session with notes decoded from a file: their weights
    /// become the baseline and their pitch classes the selection. History
    /// restarts from the empty selection.
    pub fn load_events(&mut self, events: &[NoteEvent]) {
        let weights = weights_from_events(events);
        log::debug!(
            "session: loaded {} events over {} pitch classes",
            events.len(),
            weights.len()
        );
        let selection = weights.pitch_classes();
        self.baseline = if weights.is_empty() {
            None
        } else {
            Some(weights)
        };
        self.history = new_history(&self.params);
        self.set_selection(selection);
    }

    /// Forget the loaded file so manual selections weigh uniformly again.
    pub fn clear_baseline(&mut self) {
        self.baseline = None;
    }

    /// Make `set` the selection and record it. Returns whether a history
    /// entry was added.
    pub fn set_selection(&mut self, set: PitchSet) -> bool {
        self.selection = set;
        self.history.push(set)
    }

    /// Add or remove one note. Returns whether the note is now selected.
    pub fn toggle(&mut self, pc: PitchClass) -> bool {
        let mut set = self.selection;
        let selected = set.toggle(pc);
        self.set_selection(set);
        selected
    }

    pub fn clear_selection(&mut self) {
        self.set_selection(PitchSet::empty());
    }

    /// Go back to the previous selection. Returns `false` at the earliest
    /// entry.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(set) => {
                self.replay(set);
                true
            }
            None => false,
        }
    }

    /// Go forward to the next selection. Returns `false` at the latest
    /// entry.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(set) => {
                self.replay(set);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Weights for the current selection: baseline-derived when a file is
    /// loaded, uniform otherwise.
    pub fn weights(&self) -> NoteWeights {
        let policy = WeightingPolicy::for_baseline(self.baseline.as_ref());
        log::debug!(
            "session: weighting {} notes (emphasis data: {})",
            self.selection.len(),
            policy.has_emphasis()
        );
        weights_from_selection(self.selection, policy, &self.params.weighting)
    }

    pub fn analyze(&self) -> Ranking {
        rank(
            self.selection,
            &self.weights(),
            &self.params.scoring,
            &self.params.ranking,
        )
    }

    /// Re-enter the selection path without recording it again.
    fn replay(&mut self, set: PitchSet) {
        self.history.set_suppressed(true);
        self.set_selection(set);
        self.history.set_suppressed(false);
    }
}

fn new_history(params: &EngineParams) -> SelectionHistory {
    match params.history_limit {
        Some(limit) => SelectionHistory::with_limit(limit),
        None => SelectionHistory::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonica_types::{Mode, Reason, ScaleDegree};

    fn pc(n: u8) -> PitchClass {
        PitchClass::new(n)
    }

    fn set(pcs: &[u8]) -> PitchSet {
        pcs.iter().map(|&p| pc(p)).collect()
    }

    #[test]
    fn new_session_is_empty() {
        let session = Session::default();
        assert!(session.selection().is_empty());
        assert!(session.analyze().is_empty());
        assert!(!session.can_undo());
    }

    #[test]
    fn toggling_records_history() {
        let mut session = Session::default();
        assert!(session.toggle(pc(0)));
        assert!(session.toggle(pc(4)));
        assert!(!session.toggle(pc(0)));
        assert_eq!(session.selection(), set(&[4]));
        assert_eq!(session.history().len(), 4);
    }

    #[test]
    fn undo_redo_replay_without_recording() {
        let mut session = Session::default();
        session.set_selection(set(&[0]));
        session.set_selection(set(&[0, 4]));
        let len = session.history().len();

        assert!(session.undo());
        assert_eq!(session.selection(), set(&[0]));
        assert!(session.redo());
        assert_eq!(session.selection(), set(&[0, 4]));
        assert!(!session.redo());
        assert_eq!(session.history().len(), len);
        assert!(!session.history().is_suppressed());
    }

    #[test]
    fn load_events_sets_baseline_and_selection() {
        let mut session = Session::default();
        session.set_selection(set(&[1, 2]));
        session.load_events(&[
            NoteEvent::new(pc(60), 4.0),
            NoteEvent::new(pc(64), 1.0),
            NoteEvent::new(pc(67), 1.0),
        ]);
        assert_eq!(session.selection(), set(&[0, 4, 7]));
        assert_eq!(session.baseline().map(|b| b.get(pc(0))), Some(4.0));
        // fresh history: empty entry, then the loaded selection
        assert_eq!(session.history().len(), 2);

        let ranking = session.analyze();
        let best = ranking.best().expect("best guess");
        assert_eq!((best.root, best.mode), (pc(0), Mode::Major));
    }

    #[test]
    fn added_note_does_not_dominate_explanation() {
        let mut session = Session::default();
        session.load_events(&[
            NoteEvent::new(pc(9), 8.0),
            NoteEvent::new(pc(0), 2.0),
            NoteEvent::new(pc(4), 2.0),
        ]);
        session.toggle(pc(7));
        let weights = session.weights();
        assert!((weights.get(pc(7)) - 0.5).abs() < 1e-12);

        let ranking = session.analyze();
        let best = ranking.best().expect("best guess");
        assert_eq!((best.root, best.mode), (pc(9), Mode::Minor));
        assert!(matches!(
            ranking.explanation.reasons.first(),
            Some(Reason::Emphasis {
                degree: ScaleDegree::Tonic,
                ..
            })
        ));
    }

    #[test]
    fn without_baseline_weights_are_uniform() {
        let mut session = Session::default();
        session.set_selection(set(&[0, 4]));
        assert_eq!(session.weights().total(), 2.0);
        session.load_events(&[NoteEvent::new(pc(0), 3.0)]);
        session.clear_baseline();
        assert_eq!(session.weights().get(pc(0)), 1.0);
    }

    #[test]
    fn history_limit_applies() {
        let mut session = Session::new(EngineParams {
            history_limit: Some(2),
            ..EngineParams::default()
        });
        session.toggle(pc(0));
        session.toggle(pc(1));
        session.toggle(pc(2));
        assert_eq!(session.history().len(), 2);
        assert!(session.undo());
        assert!(!session.undo());
    }
}
