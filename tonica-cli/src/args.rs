use std::fmt;
use std::path::PathBuf;

use tonica_types::{ParsePitchClassError, PitchClass, PitchSet};

pub const USAGE: &str = "\
usage: tonica [-v|--verbose] [--json] [--top N] (--notes C,E,G | FILE.mid | --interactive)

  --notes LIST     comma-separated note names (C, F#, Bb) or numbers 0-11
  FILE.mid         Standard MIDI File; note durations become weights
  --interactive    edit a selection line by line (type `help` inside)
  --top N          show at most N candidates
  --json           print the ranking as JSON
  -v, --verbose    debug logging on stderr";

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Notes(PitchSet),
    File(PathBuf),
    Interactive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub verbose: bool,
    pub json: bool,
    pub top: Option<usize>,
    pub input: Input,
}

#[derive(Debug)]
pub enum ArgsError {
    Help,
    Missing(&'static str),
    Conflict,
    NoInput,
    BadTop(String),
    UnknownFlag(String),
    Note(ParsePitchClassError),
}

impl From<ParsePitchClassError> for ArgsError {
    fn from(e: ParsePitchClassError) -> Self {
        Self::Note(e)
    }
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Help => write!(f, "{}", USAGE),
            Self::Missing(flag) => write!(f, "{} needs a value", flag),
            Self::Conflict => write!(f, "give only one of --notes, FILE, --interactive"),
            Self::NoInput => write!(f, "nothing to analyze"),
            Self::BadTop(v) => write!(f, "--top expects a positive number, got '{}'", v),
            Self::UnknownFlag(v) => write!(f, "unknown option '{}'", v),
            Self::Note(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ArgsError {}

/// Parse arguments after the program name.
pub fn parse<I, S>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let mut verbose = false;
    let mut json = false;
    let mut top = None;
    let mut input: Option<Input> = None;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Err(ArgsError::Help),
            "-v" | "--verbose" => verbose = true,
            "--json" => json = true,
            "--top" => {
                let value = iter.next().ok_or(ArgsError::Missing("--top"))?;
                match value.parse::<usize>() {
                    Ok(n) if n > 0 => top = Some(n),
                    _ => return Err(ArgsError::BadTop(value)),
                }
            }
            "--notes" => {
                let value = iter.next().ok_or(ArgsError::Missing("--notes"))?;
                set_input(Input::Notes(parse_notes(&value)?), &mut input)?;
            }
            "-i" | "--interactive" => set_input(Input::Interactive, &mut input)?,
            flag if flag.starts_with('-') => return Err(ArgsError::UnknownFlag(flag.to_string())),
            path => set_input(Input::File(PathBuf::from(path)), &mut input)?,
        }
    }

    Ok(Args {
        verbose,
        json,
        top,
        input: input.ok_or(ArgsError::NoInput)?,
    })
}

fn set_input(next: Input, input: &mut Option<Input>) -> Result<(), ArgsError> {
    if input.replace(next).is_some() {
        return Err(ArgsError::Conflict);
    }
    Ok(())
}

/// `"C,E,G"` or `"C E G"` → pitch set. Duplicates collapse.
pub fn parse_notes(list: &str) -> Result<PitchSet, ParsePitchClassError> {
    list.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::parse::<PitchClass>)
        .collect()
}
