//! Error types for move execution, board text parsing, and square decoding.

use crate::chess_move::Move;
use crate::color::Color;
use crate::square::Square;

/// A move rejected by the engine. The game is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMove {
    /// The source square is empty.
    #[error("no piece at {square}")]
    NoPiece {
        /// The empty source square.
        square: Square,
    },
    /// The piece on the source square belongs to the side not on move.
    #[error("{piece} cannot move on {turn}'s turn")]
    WrongTurn {
        /// Color of the piece that was asked to move.
        piece: Color,
        /// The side to move.
        turn: Color,
    },
    /// The move is not among the legal moves of the piece.
    #[error("{mv} is not a legal move")]
    Illegal {
        /// The rejected move.
        mv: Move,
    },
    /// The game has already ended.
    #[error("the game is over")]
    GameOver,
}

/// Errors that occur when parsing a piece-placement string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    /// The placement does not have exactly 8 ranks.
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount {
        /// Number of ranks found.
        found: usize,
    },
    /// A rank describes more or fewer than 8 squares.
    #[error("rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength {
        /// Zero-based rank index (0 = rank 8, 7 = rank 1).
        rank_index: usize,
        /// Number of squares described.
        length: usize,
    },
    /// An unrecognized character appeared in the placement.
    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar {
        /// The invalid character.
        character: char,
    },
}

/// A square read from outside the engine lies off the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SquareError {
    /// Rank or file is outside 1..=8.
    #[error("square ({rank},{file}) is off the board")]
    OffBoard {
        /// The rank that was read.
        rank: i8,
        /// The file that was read.
        file: i8,
    },
}
