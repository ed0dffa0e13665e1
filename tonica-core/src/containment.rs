//! Containment matching: keys whose scale holds every used note.

use tonica_types::PitchSet;

use crate::scale::{all_instances, ScaleInstance};

/// Every key whose scale is a superset of `used`, in enumeration order.
///
/// An empty selection matches nothing rather than all 24 keys.
pub fn containing_scales(used: PitchSet) -> Vec<ScaleInstance> {
    if used.is_empty() {
        return Vec::new();
    }
    all_instances()
        .filter(|inst| used.is_subset(inst.pitches))
        .collect()
}
