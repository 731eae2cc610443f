//! Chess move representation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::piece_kind::PieceKind;
use crate::square::Square;

/// A move from one square to another, with the promotion kind when a pawn
/// reaches its last rank.
///
/// Castling is expressed as the king's two-square move; en passant as the
/// pawn's diagonal move onto the skipped square. The board works out the
/// side effects from the position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Create a move without promotion.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Create a promotion move.
    #[inline]
    pub const fn new_promotion(from: Square, to: Square, kind: PieceKind) -> Move {
        Move {
            from,
            to,
            promotion: Some(kind),
        }
    }

    /// Return `true` if this move promotes a pawn.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    /// Files travelled, signed (positive toward the h-file).
    #[inline]
    pub const fn file_delta(self) -> i8 {
        self.to.file() - self.from.file()
    }

    /// Ranks travelled, signed (positive toward rank 8).
    #[inline]
    pub const fn rank_delta(self) -> i8 {
        self.to.rank() - self.from.rank()
    }

    /// Parse coordinate notation such as `e2e4` or `e7e8q`.
    ///
    /// Only the syntax is checked; whether the move is legal is up to the game.
    pub fn from_coordinate(s: &str) -> Option<Move> {
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        match s[4..].chars().next() {
            None => Some(Move::new(from, to)),
            Some(c) => {
                let kind = PieceKind::from_fen_char(c).filter(|k| k.is_promotion_target())?;
                Some(Move::new_promotion(from, to, kind))
            }
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.promotion {
            Some(kind) => write!(f, "{}{}{}", self.from, self.to, kind.fen_char()),
            None => write!(f, "{}{}", self.from, self.to),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::Move;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    #[test]
    fn coordinate_normal() {
        let mv = Move::from_coordinate("e2e4").unwrap();
        assert_eq!(mv, Move::new(Square::E2, Square::E4));
        assert_eq!(mv.to_string(), "e2e4");
        assert_eq!(mv.rank_delta(), 2);
        assert_eq!(mv.file_delta(), 0);
        assert!(!mv.is_promotion());
    }

    #[test]
    fn coordinate_promotion() {
        let mv = Move::from_coordinate("e7e8q").unwrap();
        assert_eq!(mv, Move::new_promotion(Square::E7, Square::E8, PieceKind::Queen));
        assert_eq!(mv.to_string(), "e7e8q");
        for kind in PieceKind::PROMOTIONS {
            let mv = Move::new_promotion(Square::B2, Square::A1, kind);
            assert_eq!(Move::from_coordinate(&mv.to_string()), Some(mv));
        }
    }

    #[test]
    fn coordinate_invalid() {
        assert!(Move::from_coordinate("").is_none());
        assert!(Move::from_coordinate("e2").is_none());
        assert!(Move::from_coordinate("e2e9").is_none());
        assert!(Move::from_coordinate("e7e8k").is_none());
        assert!(Move::from_coordinate("e7e8p").is_none());
        assert!(Move::from_coordinate("e7e8qq").is_none());
        assert!(Move::from_coordinate("é2e4").is_none());
    }

    #[test]
    fn promotion_distinguishes_moves() {
        let mut set = HashSet::new();
        set.insert(Move::new(Square::E7, Square::E8));
        for kind in PieceKind::PROMOTIONS {
            set.insert(Move::new_promotion(Square::E7, Square::E8, kind));
        }
        set.insert(Move::new_promotion(Square::E7, Square::E8, PieceKind::Queen));
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn debug_contains_coordinate() {
        let mv = Move::new(Square::D2, Square::D4);
        assert_eq!(format!("{:?}", mv), "Move(d2d4)");
    }
}
