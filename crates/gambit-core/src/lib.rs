//! Core chess types: board representation, move generation, and game rules.

mod board;
mod chess_move;
mod color;
mod error;
mod fen;
mod game;
mod make_move;
mod movegen;
mod perft;
mod piece;
mod piece_kind;
mod square;

pub use board::{Board, PrettyBoard};
pub use chess_move::Move;
pub use color::Color;
pub use error::{InvalidMove, PlacementError, SquareError};
pub use fen::STARTING_PLACEMENT;
pub use game::{Game, GameStatus};
pub use perft::{divide, perft};
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use square::Square;
