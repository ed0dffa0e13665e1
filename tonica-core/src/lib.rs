//! # tonica-core
//!
//! Key inference engine for the Tonica key finder. Turns a weighted set of
//! pitch classes into a ranked list of Major/Minor keys with an explanation,
//! and keeps the undo/redo history of an interactive note selection.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tonica_core::config::Config;
//! use tonica_core::midi::{import_file, ImportOptions};
//! use tonica_core::session::Session;
//!
//! // 1. Engine parameters from the embedded defaults plus the user config
//! let config = Config::load();
//! let mut session = Session::new(config.engine_params());
//!
//! // 2. Feed note events from a file, or edit the selection by hand
//! let events = import_file(path, &ImportOptions::default())?;
//! session.load_events(&events);
//! session.toggle("F#".parse()?);
//!
//! // 3. Rank keys for the current selection
//! let ranking = session.analyze();
//! if let Some(best) = ranking.best() {
//!     println!("{} ({}%)", best, best.coverage_in_pct);
//! }
//!
//! // 4. Step back through earlier selections
//! session.undo();
//! ```
//!
//! ## Module Overview
//!
//! - [`weighting`]: note events or a manual selection → `NoteWeights`
//! - [`scale`]: Major/Minor templates and their 24 transpositions
//! - [`containment`]: keys whose scale holds every used note
//! - [`scoring`]: degree-weighted score and penalty per key (`ScoringParams`)
//! - [`ranking`]: merges containment and scores into an ordered `Ranking`
//! - [`explain`]: reasons and caveats for the best guess
//! - [`history`]: `SelectionHistory` undo/redo log
//! - [`session`]: per-session state: baseline weights, selection, history
//! - [`midi`]: Standard MIDI File import through `midly`
//! - [`config`]: TOML configuration (embedded defaults + user override)

pub mod config;
pub mod containment;
pub mod explain;
pub mod history;
pub mod midi;
pub mod ranking;
pub mod scale;
pub mod scoring;
pub mod session;
pub mod weighting;

pub use config::Config;
pub use history::SelectionHistory;
pub use ranking::{rank, RankingParams};
pub use scoring::ScoringParams;
pub use session::{EngineParams, Session};
pub use weighting::{WeightingParams, WeightingPolicy};
