//! Direction tables and the ray walk shared by every piece except the pawn.

use crate::board::Board;
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

const KING_RAYS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

const KNIGHT_RAYS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

const ROOK_RAYS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

const BISHOP_RAYS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const QUEEN_RAYS: [(i8, i8); 8] = [
    (0, 1), (0, -1), (1, 0), (-1, 0),
    (1, 1), (1, -1), (-1, 1), (-1, -1),
];

/// Longest slide on an 8x8 board.
const FULL_REACH: i8 = 7;

/// Direction vectors (rank delta, file delta) and maximum slide distance for `kind`.
///
/// Pawns move asymmetrically and are handled separately; asking for their
/// pattern yields no rays.
pub(super) fn pattern(kind: PieceKind) -> (&'static [(i8, i8)], i8) {
    match kind {
        PieceKind::King => (&KING_RAYS, 1),
        PieceKind::Knight => (&KNIGHT_RAYS, 1),
        PieceKind::Rook => (&ROOK_RAYS, FULL_REACH),
        PieceKind::Bishop => (&BISHOP_RAYS, FULL_REACH),
        PieceKind::Queen => (&QUEEN_RAYS, FULL_REACH),
        PieceKind::Pawn => (&[], 0),
    }
}

/// Walk each ray from `from` up to `reach` steps, pushing reachable squares.
///
/// An empty square is pushed and the walk continues. An occupied square ends
/// the ray; it is pushed only if it holds a piece of the other color.
pub(super) fn walk(
    board: &Board,
    from: Square,
    color: Color,
    rays: &[(i8, i8)],
    reach: i8,
    out: &mut Vec<Square>,
) {
    for &(d_rank, d_file) in rays {
        for dist in 1..=reach {
            let to = from.offset(d_rank * dist, d_file * dist);
            if !to.is_valid() {
                break;
            }
            match board.piece_at(to) {
                None => out.push(to),
                Some(occupant) => {
                    if occupant.color != color {
                        out.push(to);
                    }
                    break;
                }
            }
        }
    }
}
