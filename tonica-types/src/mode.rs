use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two supported key modes. The set is closed: church modes, pentatonics
/// and the like are deliberately not modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Mode {
    Major,
    Minor,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Major, Mode::Minor];

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Major => "Major",
            Mode::Minor => "Minor",
        }
    }

    /// Semitone intervals from the root for the seven scale degrees.
    pub fn intervals(&self) -> &'static [u8; 7] {
        match self {
            Mode::Major => &[0, 2, 4, 5, 7, 9, 11],
            Mode::Minor => &[0, 2, 3, 5, 7, 8, 10],
        }
    }

    /// Interval of the third that gives the mode its quality.
    pub fn third(&self) -> u8 {
        match self {
            Mode::Major => 4,
            Mode::Minor => 3,
        }
    }

    pub fn other(&self) -> Mode {
        match self {
            Mode::Major => Mode::Minor,
            Mode::Minor => Mode::Major,
        }
    }

    /// The other mode's third. Hearing it is the strongest evidence against
    /// this mode.
    pub fn wrong_third(&self) -> u8 {
        self.other().third()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for any mode name other than Major or Minor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError(String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported mode '{}' (expected Major or Minor)", self.0)
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "major" | "maj" => Ok(Mode::Major),
            "minor" | "min" => Ok(Mode::Minor),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}
