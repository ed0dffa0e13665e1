use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Mode, PitchClass};

/// One ranked key, produced by the ranker for a single input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub root: PitchClass,
    pub mode: Mode,
    /// The scale contains every used pitch class.
    pub contains_all: bool,
    pub score: f64,
    pub penalty: f64,
    /// `score - penalty`; the value candidates are ordered by.
    pub net_score: f64,
    /// Share of the input weight that falls inside the scale, 0..=100.
    pub coverage_in_pct: u8,
    pub coverage_out_pct: u8,
    /// Position by net score among candidates tied at 100% coverage. `None`
    /// unless at least two candidates share full coverage.
    pub emphasis_rank: Option<usize>,
}

impl Candidate {
    pub fn name(&self) -> String {
        format!("{} {}", self.root, self.mode)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.root, self.mode)
    }
}

/// Scale degrees the explanation table looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleDegree {
    Tonic,
    /// The third that defines the mode (major or minor third).
    Third,
    Dominant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Emphasis {
    /// The degree carries the heaviest weight of all used notes.
    MostUsed,
    /// The degree carries a large share of the heaviest weight.
    UsedALot,
}

/// Why the best guess was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reason {
    Emphasis {
        degree: ScaleDegree,
        note: PitchClass,
        strength: Emphasis,
    },
    NoClearEmphasis,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Emphasis {
                degree: ScaleDegree::Tonic,
                note,
                strength: Emphasis::MostUsed,
            } => write!(f, "{} is the most-used note, which makes it a natural tonic", note),
            Reason::Emphasis {
                degree: ScaleDegree::Tonic,
                note,
                strength: Emphasis::UsedALot,
            } => write!(f, "{} is used a lot, which supports it as the tonic", note),
            Reason::Emphasis {
                degree: ScaleDegree::Third,
                note,
                strength: Emphasis::MostUsed,
            } => write!(f, "{}, the third that sets the mode, is the most-used note", note),
            Reason::Emphasis {
                degree: ScaleDegree::Third,
                note,
                strength: Emphasis::UsedALot,
            } => write!(f, "{}, the third that sets the mode, is used a lot", note),
            Reason::Emphasis {
                degree: ScaleDegree::Dominant,
                note,
                strength: Emphasis::MostUsed,
            } => write!(f, "{}, the dominant, is the most-used note", note),
            Reason::Emphasis {
                degree: ScaleDegree::Dominant,
                note,
                strength: Emphasis::UsedALot,
            } => write!(f, "{}, the dominant, is used a lot", note),
            Reason::NoClearEmphasis => f.write_str(
                "no note stands out, so the guess rests on which scales fit the notes",
            ),
        }
    }
}

/// Ambiguity in a ranking, shown to the user as text rather than raised as
/// an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Caveat {
    /// Several keys contain every used note.
    CoverageTie { count: usize },
    /// No key contains every used note; the list holds the closest fits.
    NoFullMatch,
}

impl fmt::Display for Caveat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Caveat::CoverageTie { count } => write!(
                f,
                "{} keys contain every note; their order reflects emphasis only",
                count
            ),
            Caveat::NoFullMatch => f.write_str(
                "no major or minor key contains every note; showing the closest fits",
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub reasons: Vec<Reason>,
    pub caveats: Vec<Caveat>,
}

/// Ordered candidates for one input. The best guess is always the first
/// candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub candidates: Vec<Candidate>,
    /// At least one candidate contains every used note.
    pub full_match: bool,
    pub explanation: Explanation,
}

impl Ranking {
    /// The "no candidates" result for an empty selection.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn best(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
