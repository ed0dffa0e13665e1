//! Line-oriented editor over a [`Session`].

use std::io::{BufRead, Write};
use std::path::Path;

use tonica_core::midi::{import_file, ImportOptions};
use tonica_core::Session;
use tonica_types::PitchSet;

use crate::args::parse_notes;
use crate::report;

const HELP: &str = "\
commands:
  C E G / F#,Bb    toggle notes in the selection
  undo, redo       step through earlier selections
  clear            empty the selection
  load FILE.mid    use a MIDI file as the weight baseline
  show             print the ranking again
  quit             leave";

#[derive(Debug, PartialEq)]
enum Command {
    Toggle(PitchSet),
    Undo,
    Redo,
    Clear,
    Show,
    Load(String),
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let cmd = match word.to_ascii_lowercase().as_str() {
        "undo" | "u" => Command::Undo,
        "redo" | "r" => Command::Redo,
        "clear" => Command::Clear,
        "show" | "" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "load" if !rest.trim().is_empty() => Command::Load(rest.trim().to_string()),
        "load" => return Err("load needs a file path".to_string()),
        _ => Command::Toggle(parse_notes(line).map_err(|e| e.to_string())?),
    };
    Ok(cmd)
}

/// Read commands until `quit` or end of input, printing the ranking after
/// every change.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    import: &ImportOptions,
    top: Option<usize>,
    input: R,
    mut out: W,
) -> std::io::Result<()> {
    writeln!(out, "{}", HELP)?;
    for line in input.lines() {
        let line = line?;
        let changed = match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            Ok(Command::Show) => true,
            Ok(Command::Toggle(notes)) => {
                // one line is one history step
                let mut next = session.selection();
                for pc in notes.iter() {
                    next.toggle(pc);
                }
                session.set_selection(next);
                true
            }
            Ok(Command::Clear) => {
                session.clear_selection();
                true
            }
            Ok(Command::Undo) => {
                let moved = session.undo();
                if !moved {
                    writeln!(out, "nothing to undo")?;
                }
                moved
            }
            Ok(Command::Redo) => {
                let moved = session.redo();
                if !moved {
                    writeln!(out, "nothing to redo")?;
                }
                moved
            }
            Ok(Command::Load(path)) => match import_file(Path::new(&path), import) {
                Ok(events) => {
                    session.load_events(&events);
                    writeln!(out, "loaded {} notes from {}", events.len(), path)?;
                    true
                }
                Err(e) => {
                    log::warn!("load {} failed: {}", path, e);
                    writeln!(out, "could not load {}: {}", path, e)?;
                    false
                }
            },
            Err(msg) => {
                writeln!(out, "{} (type `help`)", msg)?;
                false
            }
        };
        if changed {
            let ranking = session.analyze();
            let text = report::render_text(session.selection(), &session.weights(), &ranking, top);
            write!(out, "{}", text)?;
        }
    }
    Ok(())
}
