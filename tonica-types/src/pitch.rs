use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A note identity independent of octave (C = 0 … B = 11).
///
/// The value is always reduced modulo 12, so a MIDI note number can be passed
/// straight to [`PitchClass::new`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "u8", into = "u8")]
pub struct PitchClass(u8);

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass(0),
        PitchClass(1),
        PitchClass(2),
        PitchClass(3),
        PitchClass(4),
        PitchClass(5),
        PitchClass(6),
        PitchClass(7),
        PitchClass(8),
        PitchClass(9),
        PitchClass(10),
        PitchClass(11),
    ];

    pub fn new(value: u8) -> Self {
        Self(value % 12)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "C",
            1 => "C#",
            2 => "D",
            3 => "D#",
            4 => "E",
            5 => "F",
            6 => "F#",
            7 => "G",
            8 => "G#",
            9 => "A",
            10 => "A#",
            _ => "B",
        }
    }

    /// Semitones from `root` up to this pitch class, in 0..12.
    pub fn interval_from(self, root: PitchClass) -> u8 {
        (self.0 + 12 - root.0) % 12
    }

    /// The pitch class `semitones` above this one.
    pub fn transpose(self, semitones: u8) -> Self {
        Self::new(self.0 + semitones % 12)
    }
}

impl From<u8> for PitchClass {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<PitchClass> for u8 {
    fn from(pc: PitchClass) -> Self {
        pc.0
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a note name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePitchClassError(String);

impl fmt::Display for ParsePitchClassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown note name '{}'", self.0)
    }
}

impl std::error::Error for ParsePitchClassError {}

impl FromStr for PitchClass {
    type Err = ParsePitchClassError;

    /// Accepts note names (`C`, `C#`, `Cs`, `Db`, `bb`) or a bare number,
    /// which is reduced modulo 12.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParsePitchClassError(s.to_string());

        if let Ok(n) = s.parse::<u8>() {
            return Ok(Self::new(n));
        }

        let mut chars = s.chars();
        let base: i8 = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => 0,
            Some('D') => 2,
            Some('E') => 4,
            Some('F') => 5,
            Some('G') => 7,
            Some('A') => 9,
            Some('B') => 11,
            _ => return Err(err()),
        };
        let accidental: i8 = match chars.as_str() {
            "" => 0,
            "#" | "s" | "♯" => 1,
            "b" | "♭" => -1,
            _ => return Err(err()),
        };
        Ok(Self::new((base + accidental).rem_euclid(12) as u8))
    }
}

/// An unordered set of pitch classes.
///
/// Stored as a 12-bit mask, so two sets holding the same notes compare equal
/// regardless of the order they were built in. Iteration is ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<PitchClass>", into = "Vec<PitchClass>")]
pub struct PitchSet(u16);

impl PitchSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn contains(self, pc: PitchClass) -> bool {
        self.0 & (1 << pc.0) != 0
    }

    /// Returns `true` if `pc` was not already present.
    pub fn insert(&mut self, pc: PitchClass) -> bool {
        let added = !self.contains(pc);
        self.0 |= 1 << pc.0;
        added
    }

    /// Returns `true` if `pc` was present.
    pub fn remove(&mut self, pc: PitchClass) -> bool {
        let removed = self.contains(pc);
        self.0 &= !(1 << pc.0);
        removed
    }

    /// Flip membership of `pc`; returns whether it is now in the set.
    pub fn toggle(&mut self, pc: PitchClass) -> bool {
        self.0 ^= 1 << pc.0;
        self.contains(pc)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_subset(self, other: PitchSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = PitchClass> {
        PitchClass::ALL
            .into_iter()
            .filter(move |&pc| self.contains(pc))
    }
}

impl FromIterator<PitchClass> for PitchSet {
    fn from_iter<I: IntoIterator<Item = PitchClass>>(iter: I) -> Self {
        let mut set = PitchSet::empty();
        for pc in iter {
            set.insert(pc);
        }
        set
    }
}

impl From<Vec<PitchClass>> for PitchSet {
    fn from(pcs: Vec<PitchClass>) -> Self {
        pcs.into_iter().collect()
    }
}

impl From<PitchSet> for Vec<PitchClass> {
    fn from(set: PitchSet) -> Self {
        set.iter().collect()
    }
}

impl fmt::Display for PitchSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(none)");
        }
        let names: Vec<&str> = self.iter().map(PitchClass::name).collect();
        f.write_str(&names.join(" "))
    }
}
