//! Turn order, castling, and game status on top of [`Board`].

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::Board;
use crate::chess_move::Move;
use crate::color::Color;
use crate::error::InvalidMove;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// File the king starts on.
const KING_HOME_FILE: i8 = 5;

/// Status of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    None,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    /// Return `true` for statuses that end the game.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameStatus::None => "none",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        };
        write!(f, "{s}")
    }
}

/// A game of chess: one board, the side to move, and the derived status.
///
/// The only way to change the position is [`Game::make_move`], which either
/// applies a legal move completely or returns an error and changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    turn: Color,
    status: GameStatus,
    game_over: bool,
}

impl Game {
    /// Start a game from the standard position with White to move.
    pub fn new() -> Game {
        Game {
            board: Board::starting_position(),
            turn: Color::White,
            status: GameStatus::None,
            game_over: false,
        }
    }

    /// Start a game from an arbitrary board with `turn` to move.
    pub fn from_board(board: Board, turn: Color) -> Game {
        let mut game = Game {
            board,
            turn,
            status: GameStatus::None,
            game_over: false,
        };
        game.refresh_status();
        game
    }

    /// Return the side to move.
    #[inline]
    pub fn team_turn(&self) -> Color {
        self.turn
    }

    /// Hand the move to `color` and recompute the status.
    pub fn set_team_turn(&mut self, color: Color) {
        self.turn = color;
        self.refresh_status();
    }

    /// Return the status of the side to move.
    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Return `true` once the game has ended by checkmate, stalemate, or resignation.
    #[inline]
    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// End the game. The engine does not record why.
    pub fn end_game(&mut self) {
        if !self.game_over {
            info!(turn = %self.turn, "game ended by request");
        }
        self.game_over = true;
    }

    /// Return the current board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replace the board and recompute the status for the side to move.
    ///
    /// A game that has ended stays ended.
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
        self.refresh_status();
    }

    /// Legal moves for the piece on `from`, including castling, or `None`
    /// if the square is empty.
    pub fn valid_moves(&self, from: Square) -> Option<HashSet<Move>> {
        let mut moves = self.board.valid_moves(from)?;
        if let Some(piece) = self.board.piece_at(from)
            && piece.kind == PieceKind::King
        {
            moves.extend(self.castling_moves(from, piece.color));
        }
        Some(moves)
    }

    /// Every legal move for `color`, whether or not it is that side's turn.
    pub fn all_valid_moves(&self, color: Color) -> HashSet<Move> {
        self.board
            .pieces(color)
            .filter_map(|(sq, _)| self.valid_moves(sq))
            .flatten()
            .collect()
    }

    /// Play `mv` for the side to move.
    ///
    /// Castling is requested as the king's two-square move; the rook follows.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove`] if the game is over, the source square is
    /// empty, the piece belongs to the other side, or the move is not legal.
    /// The game is unchanged on error.
    pub fn make_move(&mut self, mv: Move) -> Result<(), InvalidMove> {
        self.check_move(mv)
            .inspect_err(|err| debug!(%mv, error = %err, "move rejected"))?;
        self.play(mv)
    }

    fn check_move(&self, mv: Move) -> Result<(), InvalidMove> {
        if self.game_over {
            return Err(InvalidMove::GameOver);
        }
        let piece = self
            .board
            .piece_at(mv.from)
            .ok_or(InvalidMove::NoPiece { square: mv.from })?;
        if piece.color != self.turn {
            return Err(InvalidMove::WrongTurn {
                piece: piece.color,
                turn: self.turn,
            });
        }
        let legal = self.valid_moves(mv.from).unwrap_or_default();
        if !legal.contains(&mv) {
            return Err(InvalidMove::Illegal { mv });
        }
        Ok(())
    }

    /// Execute an already-validated move, flip the turn, and refresh the status.
    pub(crate) fn play(&mut self, mv: Move) -> Result<(), InvalidMove> {
        let mut next = self.board.clone();
        let is_king = next
            .piece_at(mv.from)
            .is_some_and(|piece| piece.kind == PieceKind::King);
        next.make_move(mv)?;

        if is_king && mv.file_delta().abs() == 2 {
            let dir = mv.file_delta().signum();
            let rook_file = if dir > 0 { 8 } else { 1 };
            let rook_from = Square::new(mv.from.rank(), rook_file);
            next.make_move(Move::new(rook_from, mv.to.offset(0, -dir)))?;
        }

        self.board = next;
        self.turn = self.turn.flip();
        self.refresh_status();
        debug!(%mv, turn = %self.turn, status = %self.status, "move applied");
        Ok(())
    }

    /// Return `true` if `color`'s king is attacked.
    pub fn is_in_check(&self, color: Color) -> bool {
        self.board.is_in_check(color)
    }

    /// Return `true` if `color` is in check and has no legal move.
    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_any_move(color)
    }

    /// Return `true` if `color` is not in check but has no legal move.
    pub fn is_in_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_any_move(color)
    }

    fn has_any_move(&self, color: Color) -> bool {
        self.board
            .pieces(color)
            .any(|(sq, _)| self.valid_moves(sq).is_some_and(|moves| !moves.is_empty()))
    }

    /// Two-square king moves for a king of `color` on `king_sq`.
    ///
    /// The king must be on its home square and never have moved from it. The
    /// rook must stand on a home corner of the same rank and never have moved.
    /// Every square strictly between them must be empty, and the king's
    /// start, transit, and landing squares must not be attacked.
    fn castling_moves(&self, king_sq: Square, color: Color) -> Vec<Move> {
        let home = Square::new(color.back_rank(), KING_HOME_FILE);
        if king_sq != home || !self.board.never_moved_from(home) {
            return Vec::new();
        }

        let attacked = self.board.attacked_by(color.flip());
        let mut moves = Vec::with_capacity(2);
        for rook_sq in self.board.castle_candidates(color) {
            if rook_sq.rank() != home.rank() || !matches!(rook_sq.file(), 1 | 8) {
                continue;
            }
            let dir = (rook_sq.file() - home.file()).signum();
            let gap = (rook_sq.file() - home.file()).abs();

            let path_clear = (1..gap).all(|step| self.board.piece_at(home.offset(0, dir * step)).is_none());
            let path_safe = (0..=2).all(|step| !attacked.contains(&home.offset(0, dir * step)));

            if path_clear && path_safe {
                moves.push(Move::new(home, home.offset(0, 2 * dir)));
            }
        }
        moves
    }

    fn refresh_status(&mut self) {
        let in_check = self.board.is_in_check(self.turn);
        let has_move = self.has_any_move(self.turn);
        self.status = match (in_check, has_move) {
            (true, false) => GameStatus::Checkmate,
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::None,
        };
        if self.status.is_terminal() && !self.game_over {
            info!(turn = %self.turn, status = %self.status, "game over");
            self.game_over = true;
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
