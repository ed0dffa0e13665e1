mod args;
mod interactive;
mod report;

use std::fmt;
use std::io::Write;
use std::process::ExitCode;

use tonica_core::config::Config;
use tonica_core::midi::{import_file, ImportError};
use tonica_core::Session;

use args::{ArgsError, Input};

fn init_logging(verbose: bool) {
    use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let config = simplelog::Config::default();
    if TermLogger::init(log_level, config, TerminalMode::Stderr, ColorChoice::Auto).is_err() {
        eprintln!("tonica: logger already initialized");
    }

    log::info!("tonica starting (log level: {:?})", log_level);
}

#[derive(Debug)]
enum CliError {
    Args(ArgsError),
    Import(ImportError),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl From<ArgsError> for CliError {
    fn from(e: ArgsError) -> Self {
        Self::Args(e)
    }
}

impl From<ImportError> for CliError {
    fn from(e: ImportError) -> Self {
        Self::Import(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Args(e) => write!(f, "{}", e),
            Self::Import(e) => write!(f, "{}", e),
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for CliError {}

fn main() -> ExitCode {
    let args = match args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(ArgsError::Help) => {
            println!("{}", args::USAGE);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("tonica: {}\n\n{}", e, args::USAGE);
            return ExitCode::from(2);
        }
    };
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("exiting with {:?}", e);
            eprintln!("tonica: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &args::Args) -> Result<(), CliError> {
    let config = Config::load();
    let mut session = Session::new(config.engine_params());
    let import = config.import_options();

    match &args.input {
        Input::Interactive => {
            let stdin = std::io::stdin();
            interactive::run(&mut session, &import, args.top, stdin.lock(), std::io::stdout())?;
            return Ok(());
        }
        Input::Notes(notes) => {
            session.set_selection(*notes);
        }
        Input::File(path) => {
            let events = import_file(path, &import)?;
            log::info!("{}: {} note events", path.display(), events.len());
            session.load_events(&events);
        }
    }

    let ranking = session.analyze();
    let text = if args.json {
        report::render_json(&ranking, args.top)? + "\n"
    } else {
        report::render_text(session.selection(), &session.weights(), &ranking, args.top)
    };
    std::io::stdout().lock().write_all(text.as_bytes())?;
    Ok(())
}
