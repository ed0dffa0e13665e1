//! Standard MIDI File import.
//!
//! Byte-level parsing is left to `midly`; this module only pairs note-on and
//! note-off events and converts their tick spans to seconds, producing the
//! `NoteEvent`s the weighting step consumes.

use std::collections::{BTreeMap, VecDeque};
use std::path::Path;

use midly::{MetaMessage, MidiMessage, Smf, Timing, Track, TrackEventKind};
use tonica_types::{NoteEvent, PitchClass};

/// MIDI channel 10, reserved for percussion in General MIDI.
const PERCUSSION_CHANNEL: u8 = 9;

/// Tempo assumed until the file sets one (120 BPM).
const DEFAULT_MICROS_PER_QUARTER: f64 = 500_000.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Keep notes on the General MIDI percussion channel. Drum hits carry no
    /// key information, so they are skipped by default.
    pub include_percussion: bool,
}

/// Error type for MIDI import.
#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Parse(midly::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<midly::Error> for ImportError {
    fn from(e: midly::Error) -> Self {
        Self::Parse(e)
    }
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Parse(e) => write!(f, "MIDI parse error: {}", e),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

/// Read and decode a `.mid` file.
pub fn import_file(path: &Path, options: &ImportOptions) -> Result<Vec<NoteEvent>, ImportError> {
    let bytes = std::fs::read(path)?;
    log::debug!("midi: read {} bytes from {}", bytes.len(), path.display());
    import_smf(&bytes, options)
}

/// Decode an in-memory Standard MIDI File into note events.
pub fn import_smf(bytes: &[u8], options: &ImportOptions) -> Result<Vec<NoteEvent>, ImportError> {
    let smf = Smf::parse(bytes)?;
    let clock = Clock::new(&smf);

    let mut events = Vec::new();
    for track in &smf.tracks {
        collect_notes(track, &clock, options, &mut events);
    }
    log::debug!(
        "midi: {} tracks, {} notes",
        smf.tracks.len(),
        events.len()
    );
    Ok(events)
}

/// Pair note-ons with note-offs in one track. Repeated notes on the same key
/// pair first-in first-out; notes left sounding end with the track.
fn collect_notes(track: &Track<'_>, clock: &Clock, options: &ImportOptions, out: &mut Vec<NoteEvent>) {
    let mut tick: u64 = 0;
    let mut sounding: BTreeMap<(u8, u8), VecDeque<u64>> = BTreeMap::new();

    for event in track {
        tick += u64::from(event.delta.as_int());
        let TrackEventKind::Midi { channel, message } = event.kind else {
            continue;
        };
        let channel = channel.as_int();
        if channel == PERCUSSION_CHANNEL && !options.include_percussion {
            continue;
        }
        match message {
            MidiMessage::NoteOn { key, vel } if vel.as_int() > 0 => {
                sounding
                    .entry((channel, key.as_int()))
                    .or_default()
                    .push_back(tick);
            }
            MidiMessage::NoteOn { key, .. } | MidiMessage::NoteOff { key, .. } => {
                let start = sounding
                    .get_mut(&(channel, key.as_int()))
                    .and_then(VecDeque::pop_front);
                if let Some(start) = start {
                    out.push(note(key.as_int(), start, tick, clock));
                }
            }
            _ => {}
        }
    }

    for ((_, key), starts) in sounding {
        for start in starts {
            out.push(note(key, start, tick, clock));
        }
    }
}

fn note(key: u8, start: u64, end: u64, clock: &Clock) -> NoteEvent {
    NoteEvent::new(
        PitchClass::new(key),
        clock.seconds_at(end) - clock.seconds_at(start),
    )
}

#[derive(Debug, Clone, Copy)]
struct TempoSegment {
    tick: u64,
    seconds: f64,
    micros_per_quarter: f64,
}

/// Tick → seconds conversion for one file.
#[derive(Debug, Clone)]
enum Clock {
    Metrical {
        ticks_per_quarter: f64,
        /// Sorted by tick; the first segment starts at tick 0.
        segments: Vec<TempoSegment>,
    },
    Timecode {
        ticks_per_second: f64,
    },
}

impl Clock {
    fn new(smf: &Smf<'_>) -> Self {
        match smf.header.timing {
            Timing::Metrical(tpq) => {
                let ticks_per_quarter = f64::from(tpq.as_int().max(1));
                let segments = tempo_segments(smf, ticks_per_quarter);
                Clock::Metrical {
                    ticks_per_quarter,
                    segments,
                }
            }
            Timing::Timecode(fps, subframes) => {
                let ticks_per_second = f64::from(fps.as_f32()) * f64::from(subframes.max(1));
                Clock::Timecode { ticks_per_second }
            }
        }
    }

    fn seconds_at(&self, tick: u64) -> f64 {
        match self {
            Clock::Timecode { ticks_per_second } => tick as f64 / ticks_per_second,
            Clock::Metrical {
                ticks_per_quarter,
                segments,
            } => {
                let seg = segments
                    .iter()
                    .rev()
                    .find(|s| s.tick <= tick)
                    .copied()
                    .unwrap_or(TempoSegment {
                        tick: 0,
                        seconds: 0.0,
                        micros_per_quarter: DEFAULT_MICROS_PER_QUARTER,
                    });
                seg.seconds
                    + (tick - seg.tick) as f64 * seg.micros_per_quarter / 1_000_000.0
                        / ticks_per_quarter
            }
        }
    }
}

/// Merge tempo changes from every track into one map. Format 1 files keep
/// them in the first track, but some writers scatter them.
fn tempo_segments(smf: &Smf<'_>, ticks_per_quarter: f64) -> Vec<TempoSegment> {
    let mut changes: Vec<(u64, f64)> = Vec::new();
    for track in &smf.tracks {
        let mut tick: u64 = 0;
        for event in track {
            tick += u64::from(event.delta.as_int());
            if let TrackEventKind::Meta(MetaMessage::Tempo(t)) = event.kind {
                changes.push((tick, f64::from(t.as_int())));
            }
        }
    }
    changes.sort_by_key(|&(tick, _)| tick);

    let mut segments = vec![TempoSegment {
        tick: 0,
        seconds: 0.0,
        micros_per_quarter: DEFAULT_MICROS_PER_QUARTER,
    }];
    for (tick, micros) in changes {
        let Some(last) = segments.last_mut() else {
            break;
        };
        if tick == last.tick {
            last.micros_per_quarter = micros;
            continue;
        }
        let seconds = last.seconds
            + (tick - last.tick) as f64 * last.micros_per_quarter / 1_000_000.0 / ticks_per_quarter;
        segments.push(TempoSegment {
            tick,
            seconds,
            micros_per_quarter: micros,
        });
    }
    segments
}
