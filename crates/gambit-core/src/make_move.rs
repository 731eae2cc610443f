//! Move execution, attack detection, and the copy-and-test legality filter.

use std::collections::HashSet;

use crate::board::Board;
use crate::chess_move::Move;
use crate::color::Color;
use crate::error::InvalidMove;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

impl Board {
    /// Every square threatened by a piece of `by_color`.
    pub fn attacked_by(&self, by_color: Color) -> HashSet<Square> {
        self.pieces(by_color)
            .flat_map(|(sq, piece)| piece.attacks(self, sq))
            .collect()
    }

    /// Return `true` if a king of `color` stands on a square the other side attacks.
    pub fn is_in_check(&self, color: Color) -> bool {
        let attacked = self.attacked_by(color.flip());
        self.pieces(color)
            .any(|(sq, piece)| piece.kind == PieceKind::King && attacked.contains(&sq))
    }

    /// Legal moves for the piece on `from`, or `None` if the square is empty.
    ///
    /// Each geometric candidate is played on a copy of the board and kept
    /// only if the mover's king is not attacked afterwards. Castling is not
    /// included; see [`Game::valid_moves`](crate::Game::valid_moves).
    pub fn valid_moves(&self, from: Square) -> Option<HashSet<Move>> {
        let piece = self.piece_at(from)?;
        let moves = piece
            .moves(self, from)
            .into_iter()
            .filter(|&mv| {
                let mut trial = self.clone();
                trial.make_move(mv).is_ok() && !trial.is_in_check(piece.color)
            })
            .collect();
        Some(moves)
    }

    /// Execute `mv` without any legality check and return the captured piece.
    ///
    /// A pawn moving diagonally onto an empty square captures en passant: the
    /// pawn beside its starting square, on the destination file, is removed.
    /// Promotion places a new piece of the chosen kind. The move is always
    /// appended to the history.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove::NoPiece`] if `mv.from` is empty and
    /// [`InvalidMove::Illegal`] if `mv.to` is off the board. The board is
    /// unchanged on error.
    pub fn make_move(&mut self, mv: Move) -> Result<Option<Piece>, InvalidMove> {
        if !mv.to.is_valid() {
            return Err(InvalidMove::Illegal { mv });
        }
        let piece = self
            .remove_piece(mv.from)
            .ok_or(InvalidMove::NoPiece { square: mv.from })?;

        let mut captured = self.remove_piece(mv.to);
        if piece.kind == PieceKind::Pawn && captured.is_none() && mv.file_delta() != 0 {
            captured = self.remove_piece(Square::new(mv.from.rank(), mv.to.file()));
        }

        let placed = match mv.promotion {
            Some(kind) => Piece::new(piece.color, kind),
            None => piece,
        };
        self.add_piece(mv.to, placed);
        self.record(mv);

        Ok(captured)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::board::Board;
    use crate::chess_move::Move;
    use crate::color::Color;
    use crate::error::InvalidMove;
    use crate::piece::Piece;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    #[test]
    fn pawn_push_e2e4() {
        let mut board = Board::starting_position();
        let captured = board.make_move(Move::new(Square::E2, Square::E4)).unwrap();
        assert_eq!(captured, None);
        assert_eq!(board.piece_at(Square::E4), Some(Piece::WHITE_PAWN));
        assert_eq!(board.piece_at(Square::E2), None);
        assert_eq!(board.last_move(), Some(Move::new(Square::E2, Square::E4)));
    }

    #[test]
    fn capture_returns_victim() {
        let mut board = Board::starting_position();
        board.make_move(Move::new(Square::E2, Square::E4)).unwrap();
        board.make_move(Move::new(Square::D7, Square::D5)).unwrap();
        let captured = board.make_move(Move::new(Square::E4, Square::D5)).unwrap();
        assert_eq!(captured, Some(Piece::BLACK_PAWN));
        assert_eq!(board.piece_at(Square::D5), Some(Piece::WHITE_PAWN));
        assert_eq!(board.pieces(Color::Black).count(), 15);
    }

    #[test]
    fn empty_source_is_rejected_without_change() {
        let mut board = Board::starting_position();
        let before = board.clone();
        let err = board.make_move(Move::new(Square::E4, Square::E5)).unwrap_err();
        assert_eq!(err, InvalidMove::NoPiece { square: Square::E4 });
        assert_eq!(board, before);
    }

    #[test]
    fn off_board_destination_is_rejected() {
        let mut board = Board::starting_position();
        let before = board.clone();
        assert!(board.make_move(Move::new(Square::E2, Square::new(9, 5))).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn en_passant_removes_passed_pawn() {
        let mut board = Board::new();
        board.add_piece(Square::E5, Piece::WHITE_PAWN);
        board.add_piece(Square::D7, Piece::BLACK_PAWN);
        board.make_move(Move::new(Square::D7, Square::D5)).unwrap();
        let captured = board.make_move(Move::new(Square::E5, Square::D6)).unwrap();
        assert_eq!(captured, Some(Piece::BLACK_PAWN));
        assert_eq!(board.piece_at(Square::D6), Some(Piece::WHITE_PAWN));
        assert_eq!(board.piece_at(Square::D5), None);
        assert_eq!(board.piece_at(Square::E5), None);
    }

    #[test]
    fn promotion_replaces_pawn() {
        let mut board = Board::new();
        board.add_piece(Square::A7, Piece::WHITE_PAWN);
        board
            .make_move(Move::new_promotion(Square::A7, Square::A8, PieceKind::Knight))
            .unwrap();
        assert_eq!(board.piece_at(Square::A8), Some(Piece::WHITE_KNIGHT));
        assert_eq!(board.piece_at(Square::A7), None);
    }

    #[test]
    fn attacked_by_starting_position() {
        let board = Board::starting_position();
        let white = board.attacked_by(Color::White);
        assert!(white.contains(&Square::F3)); // knight and pawns
        assert!(white.contains(&Square::D3));
        assert!(!white.contains(&Square::E4));
        assert!(!white.contains(&Square::D4));
        let black = board.attacked_by(Color::Black);
        assert!(black.contains(&Square::F6));
        assert!(!black.contains(&Square::E5));
        // Defended friendly pieces are not part of the attack set.
        assert!(!white.contains(&Square::E1));
    }

    #[test]
    fn pawn_attacks_squares_it_cannot_move_to() {
        let mut board = Board::new();
        board.add_piece(Square::E4, Piece::WHITE_PAWN);
        let attacked = board.attacked_by(Color::White);
        assert_eq!(attacked, HashSet::from([Square::D5, Square::F5]));
        assert!(!attacked.contains(&Square::E5));
    }

    #[test]
    fn check_detection() {
        let mut board = Board::new();
        board.add_piece(Square::E1, Piece::WHITE_KING);
        board.add_piece(Square::E8, Piece::BLACK_ROOK);
        assert!(board.is_in_check(Color::White));
        board.add_piece(Square::E4, Piece::WHITE_BISHOP);
        assert!(!board.is_in_check(Color::White));
        assert!(!board.is_in_check(Color::Black));
    }

    #[test]
    fn valid_moves_empty_square_is_none() {
        let board = Board::starting_position();
        assert_eq!(board.valid_moves(Square::E4), None);
        assert_eq!(board.valid_moves(Square::A1), Some(HashSet::new()));
    }

    #[test]
    fn pinned_piece_stays_on_pin_line() {
        let mut board = Board::new();
        board.add_piece(Square::E1, Piece::WHITE_KING);
        board.add_piece(Square::E2, Piece::WHITE_ROOK);
        board.add_piece(Square::E8, Piece::BLACK_QUEEN);
        let moves = board.valid_moves(Square::E2).unwrap();
        assert!(moves.iter().all(|mv| mv.to.file() == 5));
        assert!(moves.contains(&Move::new(Square::E2, Square::E8)));
        assert_eq!(moves.len(), 6);
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let mut board = Board::new();
        board.add_piece(Square::E1, Piece::WHITE_KING);
        board.add_piece(Square::D8, Piece::BLACK_ROOK);
        let moves = board.valid_moves(Square::E1).unwrap();
        assert!(!moves.iter().any(|mv| mv.to.file() == 4));
        assert!(moves.contains(&Move::new(Square::E1, Square::F2)));
    }

    #[test]
    fn en_passant_exposing_king_is_filtered() {
        // King on a5, rook on h5: taking en passant clears the whole rank.
        let mut board = Board::new();
        board.add_piece(Square::A5, Piece::WHITE_KING);
        board.add_piece(Square::B5, Piece::WHITE_PAWN);
        board.add_piece(Square::C7, Piece::BLACK_PAWN);
        board.add_piece(Square::H5, Piece::BLACK_ROOK);
        board.make_move(Move::new(Square::C7, Square::C5)).unwrap();
        let moves = board.valid_moves(Square::B5).unwrap();
        assert!(!moves.contains(&Move::new(Square::B5, Square::C6)));
        assert!(moves.contains(&Move::new(Square::B5, Square::B6)));
    }

    #[test]
    fn valid_moves_do_not_mutate() {
        let board = Board::starting_position();
        let before = board.clone();
        let first = board.valid_moves(Square::B1);
        let second = board.valid_moves(Square::B1);
        assert_eq!(first, second);
        assert_eq!(board, before);
    }
}
