//! Command line shell around the parser and the solvers

use std::{
    env,
    ffi::OsString,
    io::Write,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context;
use clap::{ArgGroup, Parser, ValueEnum};
use itertools::Itertools;
use log::debug;
use thiserror::Error;

use crate::{
    grid::{Grid, Position},
    parser::{parse_and_validate, LoadError},
    shortest_path::shortest_path,
    wall_follower::{wall_follow, Hand},
};

const HELP_STYLE_VAR: &str = "MAZE_HELP_STYLE";
const VERTICAL_MISMATCH_VAR: &str = "MAZE_VERTICAL_MISMATCH";

const DESCRIPTIVE_HELP: &str = "\
Usage: ./maze [options] file...
Options:
  --help                     Display this information.
  --test                     Test if given file is a valid maze.
  --rpath <row> <column>     Solve maze using the right hand rule.
  --lpath <row> <column>     Solve maze using the left hand rule.
  --shortest <row> <column>  Solve maze by finding the shortest path to the exit.
";

const BARE_HELP: &str = "\
Usage: ./maze [option] file...
Option:
  --help
  --test
  --rpath
  --lpath
  --shortest
";

const READ_FAILURE: &str = "Failed to read file.";

/// How the help text lists the options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HelpStyle {
    /// Options with their operands and descriptions
    #[default]
    Descriptive,
    /// Option names only
    Bare,
}

/// How a wall mismatch between a cell and the one below it is reported
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MismatchPolicy {
    /// The maze is `Invalid`
    #[default]
    Invalid,
    /// The file is reported as unreadable
    ReadFailure,
}

/// Output policy of the shell, read from the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub help_style: HelpStyle,
    pub vertical_mismatch: MismatchPolicy,
}

impl Config {
    /// Read `MAZE_HELP_STYLE` and `MAZE_VERTICAL_MISMATCH`; unset variables
    /// keep their defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(HELP_STYLE_VAR) {
            config.help_style = parse_value(HELP_STYLE_VAR, &value)?;
        }
        if let Some(value) = lookup(VERTICAL_MISMATCH_VAR) {
            config.vertical_mismatch = parse_value(VERTICAL_MISMATCH_VAR, &value)?;
        }
        debug!("Using {:?}", config);
        Ok(config)
    }

    pub fn help_text(&self) -> &'static str {
        match self.help_style {
            HelpStyle::Descriptive => DESCRIPTIVE_HELP,
            HelpStyle::Bare => BARE_HELP,
        }
    }
}

fn parse_value<T: ValueEnum>(var: &str, value: &str) -> anyhow::Result<T> {
    T::from_str(value.trim(), true)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("Invalid value `{}` of {}", value, var))
}

/// Arguments accepted by `maze`, other than `--help`
#[derive(Parser, Debug)]
#[command(name = "maze", version, about, long_about = None, disable_help_flag = true)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["test", "rpath", "lpath", "shortest"])
))]
pub struct CliArgs {
    /// Test if given file is a valid maze.
    #[arg(long, value_name = "FILE")]
    pub test: Option<PathBuf>,

    /// Solve maze using the right hand rule.
    #[arg(long, num_args = 3, value_names = ["ROW", "COLUMN", "FILE"])]
    pub rpath: Option<Vec<String>>,

    /// Solve maze using the left hand rule.
    #[arg(long, num_args = 3, value_names = ["ROW", "COLUMN", "FILE"])]
    pub lpath: Option<Vec<String>>,

    /// Solve maze by finding the shortest path to the exit.
    #[arg(long, num_args = 3, value_names = ["ROW", "COLUMN", "FILE"])]
    pub shortest: Option<Vec<String>>,
}

/// What one invocation of `maze` does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Test { file: PathBuf },
    SolveRight { start: Position, file: PathBuf },
    SolveLeft { start: Position, file: PathBuf },
    SolveShortest { start: Position, file: PathBuf },
}

/// Operands that clap accepted but do not make sense
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("Invalid argument `{0}`. Try `maze --help` for more information.")]
    InvalidArgument(String),
    #[error("Invalid amount of arguments. Try `maze --help` for more information.")]
    ArgumentCount,
}

#[derive(Error, Debug)]
pub enum CliError {
    /// Rejected by clap, which renders its own message
    #[error(transparent)]
    Clap(#[from] clap::Error),
    #[error(transparent)]
    Usage(#[from] UsageError),
}

impl Command {
    /// Parse the full argument list, program name first.
    ///
    /// No arguments, or `--help` anywhere, asks for help regardless of the
    /// rest of the line.
    pub fn from_args<I, T>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = args.into_iter().map(Into::into).collect::<Vec<OsString>>();
        if args.len() <= 1 || args.iter().skip(1).any(|arg| arg == "--help") {
            return Ok(Command::Help);
        }

        let cli_args = CliArgs::try_parse_from(args)?;
        Ok(Command::try_from(cli_args)?)
    }
}

impl TryFrom<CliArgs> for Command {
    type Error = UsageError;

    fn try_from(value: CliArgs) -> Result<Self, Self::Error> {
        if let Some(file) = value.test {
            return Ok(Command::Test { file });
        }
        if let Some(operands) = value.rpath {
            let (start, file) = solve_operands(operands)?;
            return Ok(Command::SolveRight { start, file });
        }
        if let Some(operands) = value.lpath {
            let (start, file) = solve_operands(operands)?;
            return Ok(Command::SolveLeft { start, file });
        }
        if let Some(operands) = value.shortest {
            let (start, file) = solve_operands(operands)?;
            return Ok(Command::SolveShortest { start, file });
        }
        Err(UsageError::ArgumentCount)
    }
}

fn solve_operands(operands: Vec<String>) -> Result<(Position, PathBuf), UsageError> {
    let (row, col, file) = operands
        .into_iter()
        .collect_tuple()
        .ok_or(UsageError::ArgumentCount)?;
    let start = Position::new(parse_coordinate(&row)?, parse_coordinate(&col)?);
    Ok((start, PathBuf::from(file)))
}

/// 1-based row or column number
fn parse_coordinate(arg: &str) -> Result<usize, UsageError> {
    arg.parse::<usize>()
        .ok()
        .filter(|value| *value >= 1)
        .ok_or_else(|| UsageError::InvalidArgument(arg.to_string()))
}

/// Exit status of an invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A result was computed, including an `Invalid` verdict or an unsolvable maze
    Success,
    /// Bad usage or unreadable file
    Failure,
}

impl From<Status> for ExitCode {
    fn from(value: Status) -> Self {
        match value {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::FAILURE,
        }
    }
}

/// Outcome of loading the maze file, as the shell reports it
enum Loaded {
    Grid(Grid),
    Invalid,
    Unreadable,
}

fn load(file: &Path, config: &Config) -> Loaded {
    match parse_and_validate(file) {
        Ok(grid) => Loaded::Grid(grid),
        Err(LoadError::Io(e)) => {
            debug!("Cannot read {}: {}", file.display(), e);
            Loaded::Unreadable
        }
        Err(LoadError::Invalid(kind)) => {
            debug!("{} is invalid: {}", file.display(), kind);
            let as_read_failure = config.vertical_mismatch == MismatchPolicy::ReadFailure;
            if as_read_failure && kind.is_vertical_mismatch() {
                Loaded::Unreadable
            } else {
                Loaded::Invalid
            }
        }
    }
}

/// Run `command`, writing results to `out` and diagnostics to `err`.
///
/// Errors are only returned when writing fails.
pub fn execute<W, E>(
    command: &Command,
    config: &Config,
    out: &mut W,
    err: &mut E,
) -> anyhow::Result<Status>
where
    W: Write,
    E: Write,
{
    let (start, file, strategy) = match command {
        Command::Help => {
            write!(out, "{}", config.help_text())?;
            return Ok(Status::Success);
        }
        Command::Test { file } => {
            return match load(file, config) {
                Loaded::Grid(_) => {
                    writeln!(out, "Valid")?;
                    Ok(Status::Success)
                }
                Loaded::Invalid => {
                    writeln!(out, "Invalid")?;
                    Ok(Status::Success)
                }
                Loaded::Unreadable => {
                    writeln!(err, "{}", READ_FAILURE)?;
                    Ok(Status::Failure)
                }
            };
        }
        Command::SolveRight { start, file } => (start, file, Some(Hand::Right)),
        Command::SolveLeft { start, file } => (start, file, Some(Hand::Left)),
        Command::SolveShortest { start, file } => (start, file, None),
    };

    let grid = match load(file, config) {
        Loaded::Grid(grid) => grid,
        Loaded::Invalid => {
            writeln!(out, "Invalid")?;
            return Ok(Status::Success);
        }
        Loaded::Unreadable => {
            writeln!(err, "{}", READ_FAILURE)?;
            return Ok(Status::Failure);
        }
    };

    if let Err(e) = grid.check_start(*start) {
        writeln!(err, "{}", e)?;
        return Ok(Status::Failure);
    }

    let solution = match strategy {
        Some(hand) => wall_follow(&grid, *start, hand).map_err(|e| e.to_string()),
        None => shortest_path(&grid, *start).map_err(|e| e.to_string()),
    };
    match solution {
        Ok(path) => writeln!(out, "{}", path)?,
        Err(message) => writeln!(err, "{}", message)?,
    }
    Ok(Status::Success)
}
