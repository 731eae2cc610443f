//! Geometric move and attack generation.
//!
//! Nothing here consults check-safety: the board filters these candidates
//! by playing each one out on a copy.

mod pawns;
mod sliders;

use crate::board::Board;
use crate::chess_move::Move;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use self::pawns::{pawn_attacks, pawn_moves};
use self::sliders::{pattern, walk};

/// Candidate moves for `piece` standing on `from`.
pub(crate) fn piece_moves(board: &Board, from: Square, piece: Piece) -> Vec<Move> {
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, from, piece.color),
        kind => {
            let (rays, reach) = pattern(kind);
            let mut targets = Vec::with_capacity(28);
            walk(board, from, piece.color, rays, reach, &mut targets);
            targets.into_iter().map(|to| Move::new(from, to)).collect()
        }
    }
}

/// Squares `piece` standing on `from` threatens.
pub(crate) fn piece_attacks(board: &Board, from: Square, piece: Piece) -> Vec<Square> {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(from, piece.color),
        kind => {
            let (rays, reach) = pattern(kind);
            let mut targets = Vec::with_capacity(28);
            walk(board, from, piece.color, rays, reach, &mut targets);
            targets
        }
    }
}
