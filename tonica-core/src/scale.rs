//! Scale model: the Major and Minor templates transposed to all twelve roots.

use tonica_types::{Mode, PitchClass, PitchSet};

/// Number of keys every ranking considers (12 roots × 2 modes).
pub const INSTANCE_COUNT: usize = 24;

/// A mode built on a specific root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleInstance {
    pub root: PitchClass,
    pub mode: Mode,
    pub pitches: PitchSet,
}

impl ScaleInstance {
    pub fn new(root: PitchClass, mode: Mode) -> Self {
        Self {
            root,
            mode,
            pitches: instance(root, mode),
        }
    }

    pub fn contains(&self, pc: PitchClass) -> bool {
        self.pitches.contains(pc)
    }
}

/// Pitch classes of `mode` starting on `root`.
pub fn instance(root: PitchClass, mode: Mode) -> PitchSet {
    mode.intervals().iter().map(|&i| root.transpose(i)).collect()
}

/// All 24 instances: roots ascending from C, Major before Minor on each root.
/// Stable sorts downstream fall back to this order on ties.
pub fn all_instances() -> impl Iterator<Item = ScaleInstance> {
    PitchClass::ALL
        .into_iter()
        .flat_map(|root| Mode::ALL.into_iter().map(move |mode| ScaleInstance::new(root, mode)))
}
