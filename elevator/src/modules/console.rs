/// ----- CONSOLE MODULE -----
/// Turns lines typed at the prompt into commands for the controller.
/// Bad input is reported and the prompt carries on; nothing typed here
/// can take the controller down.

use std::io::{self, Write};

use log::warn;
use thiserror::Error;

use shared_resources::Direction;

use crate::modules::controller::ElevatorController;
use crate::utilities::debug::StatusPrinter;

pub const USAGE: [&str; 4] = [
    "  r <floor> <up|down>   - request elevator",
    "  d <floor>             - add destination from inside elevator",
    "  s                     - show elevator status",
    "  q                     - quit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Request { floor: i32, direction: Direction },
    Destination { floor: i32 },
    Status,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid floor value {0:?}")]
    InvalidFloor(String),

    #[error("unknown command {0:?}")]
    Unknown(String),
}

/// `Ok(None)` for a blank line.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(name) = parts.first() else {
        return Ok(None);
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "q" => Command::Quit,
        "s" => Command::Status,
        "r" => {
            if parts.len() != 3 {
                return Err(CommandError::Usage("r <floor> <up|down>"));
            }
            Command::Request {
                floor: parse_floor(parts[1])?,
                direction: Direction::from_word(parts[2]),
            }
        },
        "d" => {
            if parts.len() != 2 {
                return Err(CommandError::Usage("d <floor>"));
            }
            Command::Destination { floor: parse_floor(parts[1])? }
        },
        _ => return Err(CommandError::Unknown(name.to_string())),
    };
    Ok(Some(command))
}

fn parse_floor(word: &str) -> Result<i32, CommandError> {
    word.parse().map_err(|_| CommandError::InvalidFloor(word.to_string()))
}

/// Out-of-range floors are logged as warnings rather than returned.
pub fn execute<W: Write>(
    controller: &ElevatorController,
    command: Command,
    printer: &mut StatusPrinter<W>,
) -> io::Result<()> {
    match command {
        Command::Request { floor, direction } => {
            if let Err(e) = controller.request_elevator(floor, direction) {
                warn!("invalid floor request ({}): {}", floor, e);
            }
        },
        Command::Destination { floor } => {
            if let Err(e) = controller.add_destination(floor) {
                warn!("invalid destination ({}): {}", floor, e);
            }
        },
        Command::Status => {
            printer.print_status(&controller.status(), &controller.pending_requests(), controller.stalled_for())?;
        },
        Command::Quit => {},
    }
    Ok(())
}
