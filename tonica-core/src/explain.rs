//! Explanation table for the best guess.
//!
//! Each rule compares one scale degree's weight against the heaviest used
//! note: equal to it means "most used", above the degree's threshold means
//! "used a lot". Rules are checked tonic, third, dominant; if none fires the
//! single fallback reason is returned.

use tonica_types::{Candidate, Emphasis, NoteWeights, PitchSet, Reason, ScaleDegree};

pub const TONIC_THRESHOLD: f64 = 0.6;
pub const THIRD_THRESHOLD: f64 = 0.3;
pub const DOMINANT_THRESHOLD: f64 = 0.5;

const DOMINANT_INTERVAL: u8 = 7;

pub fn reasons(best: &Candidate, used: PitchSet, weights: &NoteWeights) -> Vec<Reason> {
    let max = used.iter().map(|pc| weights.get(pc)).fold(0.0, f64::max);

    let rules = [
        (ScaleDegree::Tonic, 0, TONIC_THRESHOLD),
        (ScaleDegree::Third, best.mode.third(), THIRD_THRESHOLD),
        (ScaleDegree::Dominant, DOMINANT_INTERVAL, DOMINANT_THRESHOLD),
    ];

    let mut out = Vec::new();
    if max > 0.0 {
        for (degree, interval, threshold) in rules {
            let note = best.root.transpose(interval);
            let weight = if used.contains(note) {
                weights.get(note)
            } else {
                0.0
            };
            if let Some(strength) = emphasis(weight, max, threshold) {
                out.push(Reason::Emphasis {
                    degree,
                    note,
                    strength,
                });
            }
        }
    }

    if out.is_empty() {
        out.push(Reason::NoClearEmphasis);
    }
    out
}

fn emphasis(weight: f64, max: f64, threshold: f64) -> Option<Emphasis> {
    if weight == max {
        Some(Emphasis::MostUsed)
    } else if weight > threshold * max {
        Some(Emphasis::UsedALot)
    } else {
        None
    }
}
