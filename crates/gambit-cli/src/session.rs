//! Line-oriented game session over any reader/writer pair.

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use gambit_core::{Game, Move, Square};

use crate::command::{Command, SessionOption, parse_command};
use crate::error::CliError;

const HELP: &str = "\
commands:
  new                start a fresh game
  board              print the board
  moves <sq>         list legal moves from a square
  move <mv> | <mv>   play a move, e.g. e2e4 or e7e8q
  status             print turn and game status
  resign             end the game
  export             print the game as JSON
  import <json>      load a game exported earlier
  set <name> <val>   autoboard | verbose, on | off
  help               show this text
  quit               leave";

/// Configuration knobs adjustable via `set`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Print the board after every accepted move.
    pub autoboard: bool,
    /// Print the status after every accepted move.
    pub verbose: bool,
}

/// Whether the read loop keeps going after a command.
enum Flow {
    Continue,
    Quit,
}

/// One game driven by text commands.
#[derive(Debug, Default)]
pub struct Session {
    game: Game,
    config: SessionConfig,
}

impl Session {
    /// Create a session with a fresh game and default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with a fresh game and the given options.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            game: Game::new(),
            config,
        }
    }

    /// Return the game being played.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Return the current options.
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Read commands from `input` until `quit` or end of input.
    ///
    /// Rejected commands print `error: <reason>` and the loop continues.
    /// Only I/O failures end the session early.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<(), CliError> {
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(cmd = %trimmed, "received command");

            let result = match parse_command(trimmed) {
                Ok(cmd) => self.execute(cmd, out),
                Err(e) => {
                    warn!(error = %e, "command parse error");
                    Err(e)
                }
            };
            let flow = match result {
                Ok(flow) => flow,
                Err(CliError::Io { source }) => return Err(CliError::Io { source }),
                Err(e) => {
                    writeln!(out, "error: {e}")?;
                    Flow::Continue
                }
            };
            out.flush()?;

            if matches!(flow, Flow::Quit) {
                break;
            }
        }

        info!("session closed");
        Ok(())
    }

    fn execute<W: Write>(&mut self, cmd: Command, out: &mut W) -> Result<Flow, CliError> {
        match cmd {
            Command::New => self.handle_new(out)?,
            Command::Board => self.handle_board(out)?,
            Command::Moves(sq) => self.handle_moves(sq, out)?,
            Command::Move(mv) => self.handle_move(mv, out)?,
            Command::Status => self.handle_status(out)?,
            Command::Resign => self.handle_resign(out)?,
            Command::Export => self.handle_export(out)?,
            Command::Import(json) => self.handle_import(&json, out)?,
            Command::Set(option) => self.handle_set(option, out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(name) => warn!(command = %name, "unknown command, ignoring"),
        }
        Ok(Flow::Continue)
    }

    fn handle_new<W: Write>(&mut self, out: &mut W) -> Result<(), CliError> {
        self.game = Game::new();
        info!("new game");
        writeln!(out, "new game, {} to move", self.game.team_turn())?;
        Ok(())
    }

    fn handle_board<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        writeln!(out, "{}", self.game.board().pretty())?;
        writeln!(out, "{} to move", self.game.team_turn())?;
        Ok(())
    }

    fn handle_moves<W: Write>(&self, sq: Square, out: &mut W) -> Result<(), CliError> {
        let mut moves: Vec<String> = self
            .game
            .valid_moves(sq)
            .unwrap_or_default()
            .into_iter()
            .map(|mv| mv.to_string())
            .collect();
        if moves.is_empty() {
            writeln!(out, "none")?;
        } else {
            moves.sort();
            writeln!(out, "{}", moves.join(" "))?;
        }
        Ok(())
    }

    fn handle_move<W: Write>(&mut self, mv: Move, out: &mut W) -> Result<(), CliError> {
        self.game.make_move(mv)?;
        writeln!(out, "played {mv}")?;

        if self.config.autoboard {
            self.handle_board(out)?;
        }
        if self.config.verbose {
            self.handle_status(out)?;
        }
        if self.game.is_over() {
            writeln!(out, "game over: {}", self.game.status())?;
        }
        Ok(())
    }

    fn handle_status<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        writeln!(
            out,
            "turn {} status {} over {}",
            self.game.team_turn(),
            self.game.status(),
            self.game.is_over()
        )?;
        Ok(())
    }

    fn handle_resign<W: Write>(&mut self, out: &mut W) -> Result<(), CliError> {
        let loser = self.game.team_turn();
        self.game.end_game();
        writeln!(out, "{loser} resigns")?;
        Ok(())
    }

    fn handle_export<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        let json = serde_json::to_string(&self.game)?;
        writeln!(out, "{json}")?;
        Ok(())
    }

    fn handle_import<W: Write>(&mut self, json: &str, out: &mut W) -> Result<(), CliError> {
        let mut game: Game = serde_json::from_str(json)?;
        // Status is derived; recompute it rather than trust the snapshot.
        let board = game.board().clone();
        game.set_board(board);
        self.game = game;
        info!(moves = self.game.board().history().len(), "game imported");
        writeln!(out, "imported, {} to move", self.game.team_turn())?;
        Ok(())
    }

    fn handle_set<W: Write>(&mut self, option: SessionOption, out: &mut W) -> Result<(), CliError> {
        match option {
            SessionOption::Autoboard(on) => {
                self.config.autoboard = on;
                writeln!(out, "autoboard {on}")?;
            }
            SessionOption::Verbose(on) => {
                self.config.verbose = on;
                writeln!(out, "verbose {on}")?;
            }
        }
        Ok(())
    }
}
