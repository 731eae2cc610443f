//! The chess board: an 8x8 grid of optional pieces plus the log of moves played on it.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chess_move::Move;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Back-rank arrangement from the a-file to the h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece placement and move history.
///
/// The history is append-only. Castling rights and en passant eligibility
/// are derived from it rather than stored as flags.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Grid indexed `[rank - 1][file - 1]`.
    squares: [[Option<Piece>; 8]; 8],
    /// Every move executed on this board, oldest first.
    history: Vec<Move>,
}

impl Board {
    /// Return an empty board with no history.
    pub fn new() -> Board {
        Board::default()
    }

    /// Return the standard starting position.
    pub fn starting_position() -> Board {
        let mut board = Board::new();
        board.reset();
        board
    }

    /// Restore the standard starting position and clear the history.
    pub fn reset(&mut self) {
        self.squares = [[None; 8]; 8];
        self.history.clear();
        for color in Color::ALL {
            for (file, kind) in (1i8..).zip(BACK_RANK) {
                self.add_piece(Square::new(color.back_rank(), file), Piece::new(color, kind));
                self.add_piece(Square::new(color.pawn_rank(), file), Piece::new(color, PieceKind::Pawn));
            }
        }
    }

    /// Return the piece on `sq`, if any. Off-board squares are always empty.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        let (r, f) = sq.grid_index()?;
        self.squares[r][f]
    }

    /// Place `piece` on `sq`, replacing whatever stood there.
    ///
    /// Placing a piece off the board does nothing.
    pub fn add_piece(&mut self, sq: Square, piece: Piece) {
        debug_assert!(sq.is_valid(), "add_piece off the board: {sq}");
        if let Some((r, f)) = sq.grid_index() {
            self.squares[r][f] = Some(piece);
        }
    }

    /// Remove and return the piece on `sq`, if any.
    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        let (r, f) = sq.grid_index()?;
        self.squares[r][f].take()
    }

    /// Iterate over every occupied square, a1 to h8.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Iterate over the squares and pieces of one side.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.color == color)
    }

    /// Return the square of `color`'s king, if it has one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Return every move executed on this board, oldest first.
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Return the most recent move, if any.
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    /// Append an executed move to the history.
    #[inline]
    pub(crate) fn record(&mut self, mv: Move) {
        self.history.push(mv);
    }

    /// Return `true` if no move in the history started on `sq`.
    pub fn never_moved_from(&self, sq: Square) -> bool {
        !self.history.iter().any(|mv| mv.from == sq)
    }

    /// Squares holding `color`'s rooks that have never moved.
    ///
    /// "Never moved" means no move started from the rook's square. This is
    /// exact only for games played from the standard starting position, where
    /// nothing else can arrive on a rook's home square unnoticed.
    pub fn castle_candidates(&self, color: Color) -> HashSet<Square> {
        self.pieces(color)
            .filter(|(sq, piece)| piece.kind == PieceKind::Rook && self.never_moved_from(*sq))
            .map(|(sq, _)| sq)
            .collect()
    }

    /// Return `true` if the previous move was a pawn's double step that
    /// passed over `target`.
    pub fn can_en_passant_at(&self, target: Square) -> bool {
        let Some(last) = self.last_move() else {
            return false;
        };
        let moved_pawn = self
            .piece_at(last.to)
            .is_some_and(|piece| piece.kind == PieceKind::Pawn);

        moved_pawn
            && last.from.file() == target.file()
            && last.to.file() == target.file()
            && last.rank_delta().abs() == 2
            && (last.from.rank() + last.to.rank()) / 2 == target.rank()
    }

    /// Return a pretty-printable wrapper for this board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{}\", {} moves)", self, self.history.len())
    }
}

/// Wrapper for pretty-printing a board as an 8x8 grid, White at the bottom.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        for rank in (1i8..=8).rev() {
            write!(f, "{rank}  ")?;
            for file in 1i8..=8 {
                let c = board
                    .piece_at(Square::new(rank, file))
                    .map_or('.', Piece::fen_char);
                if file < 8 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::Board;
    use crate::chess_move::Move;
    use crate::color::Color;
    use crate::piece::Piece;
    use crate::square::Square;

    #[test]
    fn starting_position_pieces() {
        let board = Board::starting_position();
        assert_eq!(board.piece_at(Square::E1), Some(Piece::WHITE_KING));
        assert_eq!(board.piece_at(Square::D1), Some(Piece::WHITE_QUEEN));
        assert_eq!(board.piece_at(Square::A1), Some(Piece::WHITE_ROOK));
        assert_eq!(board.piece_at(Square::B1), Some(Piece::WHITE_KNIGHT));
        assert_eq!(board.piece_at(Square::C1), Some(Piece::WHITE_BISHOP));
        assert_eq!(board.piece_at(Square::E2), Some(Piece::WHITE_PAWN));
        assert_eq!(board.piece_at(Square::E8), Some(Piece::BLACK_KING));
        assert_eq!(board.piece_at(Square::D8), Some(Piece::BLACK_QUEEN));
        assert_eq!(board.piece_at(Square::H7), Some(Piece::BLACK_PAWN));
        assert_eq!(board.piece_at(Square::E4), None);
    }

    #[test]
    fn starting_position_counts() {
        let board = Board::starting_position();
        assert_eq!(board.occupied().count(), 32);
        assert_eq!(board.pieces(Color::White).count(), 16);
        assert_eq!(board.pieces(Color::Black).count(), 16);
        assert!(board.history().is_empty());
    }

    #[test]
    fn king_square() {
        let board = Board::starting_position();
        assert_eq!(board.king_square(Color::White), Some(Square::E1));
        assert_eq!(board.king_square(Color::Black), Some(Square::E8));
        assert_eq!(Board::new().king_square(Color::White), None);
    }

    #[test]
    fn add_and_remove() {
        let mut board = Board::new();
        board.add_piece(Square::D4, Piece::BLACK_KNIGHT);
        assert_eq!(board.piece_at(Square::D4), Some(Piece::BLACK_KNIGHT));
        assert_eq!(board.remove_piece(Square::D4), Some(Piece::BLACK_KNIGHT));
        assert_eq!(board.remove_piece(Square::D4), None);
        assert_eq!(board.piece_at(Square::new(0, 4)), None);
    }

    #[test]
    fn reset_clears_history() {
        let mut board = Board::starting_position();
        board.make_move(Move::new(Square::E2, Square::E4)).unwrap();
        assert_eq!(board.history().len(), 1);
        board.reset();
        assert_eq!(board, Board::starting_position());
    }

    #[test]
    fn never_moved_from_tracks_history() {
        let mut board = Board::starting_position();
        assert!(board.never_moved_from(Square::G1));
        board.make_move(Move::new(Square::G1, Square::F3)).unwrap();
        assert!(!board.never_moved_from(Square::G1));
        // The knight now on f3 has moved, but nothing has moved *from* f3.
        assert!(board.never_moved_from(Square::F3));
    }

    #[test]
    fn castle_candidates_drop_moved_rooks() {
        let mut board = Board::starting_position();
        assert_eq!(board.castle_candidates(Color::White).len(), 2);
        board.remove_piece(Square::H2);
        board.make_move(Move::new(Square::H1, Square::H3)).unwrap();
        // Nothing has moved from h3 yet; corner filtering is left to the game.
        assert_eq!(
            board.castle_candidates(Color::White),
            HashSet::from([Square::A1, Square::H3])
        );
        assert!(!board.castle_candidates(Color::White).contains(&Square::H1));
        assert_eq!(board.castle_candidates(Color::Black).len(), 2);
    }

    #[test]
    fn en_passant_window() {
        let mut board = Board::starting_position();
        assert!(!board.can_en_passant_at(Square::D6));
        board.make_move(Move::new(Square::D7, Square::D5)).unwrap();
        assert!(board.can_en_passant_at(Square::D6));
        assert!(!board.can_en_passant_at(Square::D5));
        assert!(!board.can_en_passant_at(Square::E6));
        board.make_move(Move::new(Square::G1, Square::F3)).unwrap();
        assert!(!board.can_en_passant_at(Square::D6));
    }

    #[test]
    fn single_step_is_not_en_passant() {
        let mut board = Board::starting_position();
        board.make_move(Move::new(Square::D7, Square::D6)).unwrap();
        assert!(!board.can_en_passant_at(Square::D6));
        assert!(!board.can_en_passant_at(Square::D7));
    }

    #[test]
    fn pretty_print() {
        let board = Board::starting_position();
        let output = format!("{}", board.pretty());
        assert!(output.starts_with("8  r n b q k b n r"));
        assert!(output.contains("1  R N B Q K B N R"));
        assert!(output.ends_with("a b c d e f g h"));
    }
}
