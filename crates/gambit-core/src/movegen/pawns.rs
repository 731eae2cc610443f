//! Pawn pushes, captures, en passant, and promotion.

use crate::board::Board;
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Candidate pawn moves for a `color` pawn on `from`.
pub(super) fn pawn_moves(board: &Board, from: Square, color: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(12);
    let fwd = color.forward();

    // Pushes
    let one = from.offset(fwd, 0);
    if one.is_valid() && board.piece_at(one).is_none() {
        push_pawn_move(&mut moves, from, one, color);

        let two = from.offset(2 * fwd, 0);
        if from.rank() == color.pawn_rank() && board.piece_at(two).is_none() {
            push_pawn_move(&mut moves, from, two, color);
        }
    }

    // Captures, including en passant onto the skipped square
    for target in pawn_attacks(from, color) {
        let capturable = match board.piece_at(target) {
            Some(occupant) => occupant.color != color,
            None => {
                let passer = Square::new(from.rank(), target.file());
                board.can_en_passant_at(target)
                    && board
                        .piece_at(passer)
                        .is_some_and(|p| p.is(color.flip(), PieceKind::Pawn))
            }
        };
        if capturable {
            push_pawn_move(&mut moves, from, target, color);
        }
    }

    moves
}

/// The forward-diagonal squares a `color` pawn on `from` threatens.
pub(super) fn pawn_attacks(from: Square, color: Color) -> Vec<Square> {
    let fwd = color.forward();
    [from.offset(fwd, -1), from.offset(fwd, 1)]
        .into_iter()
        .filter(|sq| sq.is_valid())
        .collect()
}

/// Push `from -> to`, expanded into one move per promotion kind on the last rank.
fn push_pawn_move(moves: &mut Vec<Move>, from: Square, to: Square, color: Color) {
    if to.rank() == color.promotion_rank() {
        moves.extend(
            PieceKind::PROMOTIONS
                .into_iter()
                .map(|kind| Move::new_promotion(from, to, kind)),
        );
    } else {
        moves.push(Move::new(from, to));
    }
}
