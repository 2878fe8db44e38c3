//! Line commands for the headless driver.
//!
//! One command per line, whitespace separated, case-insensitive keyword:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `press <row> <col>` | start a drag on a cell |
//! | `drag <dx> <dy>` | feed one drag sample |
//! | `release` | resolve the drag |
//! | `cancel` | abandon the drag |
//! | `show` | print the board |
//! | `matches` | list current match groups |
//! | `snapshot` | print the presentation snapshot as JSON |
//! | `help` | list commands |
//! | `quit` | exit |

use std::io::Write;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::core::describe_groups;
use crate::engine::{PuzzleEngine, Resolution};
use crate::types::{Cell, DragDelta};

pub const HELP: &str = "\
commands:
  press <row> <col>   start a drag on a cell
  drag <dx> <dy>      feed one drag sample (x: columns, y: rows)
  release             resolve the drag
  cancel              abandon the drag
  show                print the board
  matches             list current match groups
  snapshot            print the board snapshot as JSON
  help                show this list
  quit                exit";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Press(Cell),
    Drag(DragDelta),
    Release,
    Cancel,
    Show,
    Matches,
    Snapshot,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),

    #[error("`{command}` expects {expected}")]
    Usage {
        command: &'static str,
        expected: &'static str,
    },

    #[error("invalid number {0:?}")]
    Number(String),
}

/// Parse one input line; blank lines and `#` comments yield `None`
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let keyword = words.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = words.collect();

    let command = match keyword.as_str() {
        "press" | "p" => {
            let [row, col] = two_args(&args, "press", "<row> <col>")?;
            Command::Press(Cell::new(number(row)?, number(col)?))
        }
        "drag" | "d" => {
            let [dx, dy] = two_args(&args, "drag", "<dx> <dy>")?;
            Command::Drag(DragDelta::new(number(dx)?, number(dy)?))
        }
        "release" | "r" => no_args(&args, "release", Command::Release)?,
        "cancel" | "c" => no_args(&args, "cancel", Command::Cancel)?,
        "show" | "s" => no_args(&args, "show", Command::Show)?,
        "matches" | "m" => no_args(&args, "matches", Command::Matches)?,
        "snapshot" => no_args(&args, "snapshot", Command::Snapshot)?,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(keyword)),
    };
    Ok(Some(command))
}

fn two_args<'a>(
    args: &[&'a str],
    command: &'static str,
    expected: &'static str,
) -> Result<[&'a str; 2], CommandError> {
    match args {
        [a, b] => Ok([*a, *b]),
        _ => Err(CommandError::Usage { command, expected }),
    }
}

fn no_args(args: &[&str], command: &'static str, parsed: Command) -> Result<Command, CommandError> {
    if args.is_empty() {
        Ok(parsed)
    } else {
        Err(CommandError::Usage {
            command,
            expected: "no arguments",
        })
    }
}

fn number<T: std::str::FromStr>(word: &str) -> Result<T, CommandError> {
    word.parse()
        .map_err(|_| CommandError::Number(word.to_string()))
}

/// Whether the driver loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run one command against the engine, writing its output to `out`
///
/// Gesture misuse is reported on `out` and does not stop the driver; only
/// I/O and serialization failures are returned as errors.
pub fn execute(engine: &mut PuzzleEngine, command: Command, out: &mut impl Write) -> Result<Flow> {
    match command {
        Command::Press(cell) => match engine.on_press_start(cell) {
            Ok(()) => writeln!(out, "pressed {}", cell)?,
            Err(err) => writeln!(out, "error: {}", err)?,
        },
        Command::Drag(delta) => match engine.on_drag_delta(delta) {
            Ok(()) => match engine.drag_preview() {
                Some((direction, steps)) => {
                    writeln!(out, "dragging {} ({:+} steps)", direction.as_str(), steps)?
                }
                None => writeln!(out, "dragging (direction not locked)")?,
            },
            Err(err) => writeln!(out, "error: {}", err)?,
        },
        Command::Release => match engine.on_release() {
            Ok(Resolution::NoMove) => writeln!(out, "no move")?,
            Ok(Resolution::Committed(shift)) => {
                writeln!(out, "committed {}", shift)?;
                write!(out, "{}", engine.grid())?;
            }
            Ok(Resolution::RolledBack(shift)) => writeln!(out, "rolled back {}", shift)?,
            Err(err) => writeln!(out, "error: {}", err)?,
        },
        Command::Cancel => match engine.on_cancel() {
            Ok(()) => writeln!(out, "cancelled")?,
            Err(err) => writeln!(out, "error: {}", err)?,
        },
        Command::Show => write!(out, "{}", engine.grid())?,
        Command::Matches => writeln!(out, "{}", describe_groups(&engine.current_match_groups()))?,
        Command::Snapshot => {
            let json = serde_json::to_string(&engine.snapshot()).context("serialize snapshot")?;
            writeln!(out, "{}", json)?;
        }
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}
