//! Piece-placement text (the first field of a FEN string) for [`Board`].

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::error::PlacementError;
use crate::piece::Piece;
use crate::square::Square;

/// Piece placement of the standard starting position.
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

impl FromStr for Board {
    type Err = PlacementError;

    /// Parse a placement such as `"4k3/8/8/8/8/8/8/4K3"`.
    ///
    /// A full FEN string is accepted too; fields after the placement are
    /// ignored. The resulting board has no history.
    fn from_str(s: &str) -> Result<Board, PlacementError> {
        let placement = s.split_whitespace().next().unwrap_or("");
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(PlacementError::WrongRankCount { found: ranks.len() });
        }

        let mut board = Board::new();
        for (rank_index, rank_str) in ranks.iter().enumerate() {
            // Placement ranks go from 8 to 1 (top to bottom)
            let rank = 8 - rank_index as i8;
            let mut file: i8 = 1;

            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    if !(1..=8).contains(&digit) {
                        return Err(PlacementError::InvalidPieceChar { character: c });
                    }
                    file += digit as i8;
                    if file > 9 {
                        return Err(PlacementError::BadRankLength {
                            rank_index,
                            length: (file - 1) as usize,
                        });
                    }
                } else {
                    let piece = Piece::from_fen_char(c)
                        .ok_or(PlacementError::InvalidPieceChar { character: c })?;
                    if file > 8 {
                        return Err(PlacementError::BadRankLength {
                            rank_index,
                            length: file as usize,
                        });
                    }
                    board.add_piece(Square::new(rank, file), piece);
                    file += 1;
                }
            }

            if file != 9 {
                return Err(PlacementError::BadRankLength {
                    rank_index,
                    length: (file - 1) as usize,
                });
            }
        }

        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (1i8..=8).rev() {
            let mut empty_count = 0u8;

            for file in 1i8..=8 {
                match self.piece_at(Square::new(rank, file)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            write!(f, "{empty_count}")?;
                            empty_count = 0;
                        }
                        write!(f, "{}", piece.fen_char())?;
                    }
                    None => empty_count += 1,
                }
            }

            if empty_count > 0 {
                write!(f, "{empty_count}")?;
            }
            if rank > 1 {
                write!(f, "/")?;
            }
        }
        Ok(())
    }
}
