//! Session command parsing.

use gambit_core::{Move, Square};

use crate::error::CliError;

/// A session option set with `set <name> <value>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOption {
    /// Print the board after every accepted move.
    Autoboard(bool),
    /// Print the status after every accepted move.
    Verbose(bool),
}

/// A parsed session command.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// `new` -- start a fresh game.
    New,
    /// `board` -- print the board and the side to move.
    Board,
    /// `moves <sq>` -- list the legal moves of one piece.
    Moves(Square),
    /// `move <mv>` or a bare `<mv>` -- play a move.
    Move(Move),
    /// `status` -- print turn and status.
    Status,
    /// `resign` -- end the game.
    Resign,
    /// `export` -- print the game as JSON.
    Export,
    /// `import <json>` -- replace the game with a JSON snapshot.
    Import(String),
    /// `set <name> <value>` -- change a session option.
    Set(SessionOption),
    /// `help` -- list commands.
    Help,
    /// `quit` -- end the session.
    Quit,
    /// Unrecognized command (logged and ignored).
    Unknown(String),
}

/// Parse a single line of input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, CliError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(Command::Unknown(String::new()));
    }

    match tokens[0] {
        "new" => Ok(Command::New),
        "board" => Ok(Command::Board),
        "status" => Ok(Command::Status),
        "resign" => Ok(Command::Resign),
        "export" => Ok(Command::Export),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "moves" => parse_square(tokens.get(1), "moves").map(Command::Moves),
        "move" => parse_move(tokens.get(1), "move").map(Command::Move),
        "import" => parse_import(line),
        "set" => parse_set(&tokens[1..]),
        other => match Move::from_coordinate(other) {
            Some(mv) if tokens.len() == 1 => Ok(Command::Move(mv)),
            _ => Ok(Command::Unknown(other.to_string())),
        },
    }
}

fn parse_square(token: Option<&&str>, command: &'static str) -> Result<Square, CliError> {
    let text = token.ok_or(CliError::MissingArgument { command })?;
    Square::from_algebraic(text).ok_or_else(|| CliError::InvalidSquare {
        text: text.to_string(),
    })
}

fn parse_move(token: Option<&&str>, command: &'static str) -> Result<Move, CliError> {
    let text = token.ok_or(CliError::MissingArgument { command })?;
    Move::from_coordinate(text).ok_or_else(|| CliError::InvalidNotation {
        text: text.to_string(),
    })
}

/// Everything after the `import` keyword is the JSON snapshot, spaces included.
fn parse_import(line: &str) -> Result<Command, CliError> {
    let json = line
        .trim_start()
        .strip_prefix("import")
        .map(str::trim)
        .unwrap_or_default();
    if json.is_empty() {
        return Err(CliError::MissingArgument { command: "import" });
    }
    Ok(Command::Import(json.to_string()))
}

/// Parse `set <name> <value>` arguments.
fn parse_set(tokens: &[&str]) -> Result<Command, CliError> {
    let (Some(name), Some(value)) = (tokens.first(), tokens.get(1)) else {
        return Err(CliError::MissingArgument { command: "set" });
    };

    let flag = match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "1" => true,
        "false" | "off" | "0" => false,
        _ => {
            return Err(CliError::InvalidOptionValue {
                name: name.to_string(),
                value: value.to_string(),
            });
        }
    };

    match name.to_ascii_lowercase().as_str() {
        "autoboard" => Ok(Command::Set(SessionOption::Autoboard(flag))),
        "verbose" => Ok(Command::Set(SessionOption::Verbose(flag))),
        _ => Err(CliError::UnknownOption {
            name: name.to_string(),
        }),
    }
}
