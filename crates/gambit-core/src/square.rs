//! Board squares addressed by 1-based rank and file.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SquareError;

/// A (rank, file) coordinate, each 1..=8 on the board.
///
/// Off-board coordinates are representable: move generation steps off the
/// edge routinely and discards the result with [`Square::is_valid`].
/// Deserialization accepts on-board squares only.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSquare")]
pub struct Square {
    rank: i8,
    file: i8,
}

/// Unchecked wire form of [`Square`].
#[derive(Deserialize)]
struct RawSquare {
    rank: i8,
    file: i8,
}

impl TryFrom<RawSquare> for Square {
    type Error = SquareError;

    fn try_from(raw: RawSquare) -> Result<Square, SquareError> {
        let sq = Square::new(raw.rank, raw.file);
        if sq.is_valid() {
            Ok(sq)
        } else {
            Err(SquareError::OffBoard {
                rank: raw.rank,
                file: raw.file,
            })
        }
    }
}

impl Square {
    /// Total number of on-board squares.
    pub const COUNT: usize = 64;

    /// Create a square from a rank and file. No range check is made.
    #[inline]
    pub const fn new(rank: i8, file: i8) -> Square {
        Square { rank, file }
    }

    /// Return `true` if both coordinates lie in 1..=8.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.rank >= 1 && self.rank <= 8 && self.file >= 1 && self.file <= 8
    }

    /// Return the rank (row), 1 = White's back rank.
    #[inline]
    pub const fn rank(self) -> i8 {
        self.rank
    }

    /// Return the file (column), 1 = the a-file.
    #[inline]
    pub const fn file(self) -> i8 {
        self.file
    }

    /// Return the square `d_rank` ranks and `d_file` files away. May be off the board.
    #[inline]
    pub const fn offset(self, d_rank: i8, d_file: i8) -> Square {
        Square::new(self.rank + d_rank, self.file + d_file)
    }

    /// Zero-based grid index (rank-major, a1 = 0), or `None` when off the board.
    #[inline]
    pub(crate) fn grid_index(self) -> Option<(usize, usize)> {
        if self.is_valid() {
            Some(((self.rank - 1) as usize, (self.file - 1) as usize))
        } else {
            None
        }
    }

    /// Parse an algebraic notation string (e.g. "e4") into a square.
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }

        let file_byte = bytes[0].to_ascii_lowercase();
        let rank_byte = bytes[1];

        if !(b'a'..=b'h').contains(&file_byte) || !(b'1'..=b'8').contains(&rank_byte) {
            return None;
        }

        Some(Square::new((rank_byte - b'0') as i8, (file_byte - b'a' + 1) as i8))
    }

    /// Iterate over all 64 squares, a1, b1, ..., h8.
    pub fn all() -> impl Iterator<Item = Square> {
        (1i8..=8).flat_map(|rank| (1i8..=8).map(move |file| Square::new(rank, file)))
    }

    // Named square constants
    pub const A1: Square = Square::new(1, 1);
    pub const B1: Square = Square::new(1, 2);
    pub const C1: Square = Square::new(1, 3);
    pub const D1: Square = Square::new(1, 4);
    pub const E1: Square = Square::new(1, 5);
    pub const F1: Square = Square::new(1, 6);
    pub const G1: Square = Square::new(1, 7);
    pub const H1: Square = Square::new(1, 8);
    pub const A2: Square = Square::new(2, 1);
    pub const B2: Square = Square::new(2, 2);
    pub const C2: Square = Square::new(2, 3);
    pub const D2: Square = Square::new(2, 4);
    pub const E2: Square = Square::new(2, 5);
    pub const F2: Square = Square::new(2, 6);
    pub const G2: Square = Square::new(2, 7);
    pub const H2: Square = Square::new(2, 8);
    pub const A3: Square = Square::new(3, 1);
    pub const B3: Square = Square::new(3, 2);
    pub const C3: Square = Square::new(3, 3);
    pub const D3: Square = Square::new(3, 4);
    pub const E3: Square = Square::new(3, 5);
    pub const F3: Square = Square::new(3, 6);
    pub const G3: Square = Square::new(3, 7);
    pub const H3: Square = Square::new(3, 8);
    pub const A4: Square = Square::new(4, 1);
    pub const B4: Square = Square::new(4, 2);
    pub const C4: Square = Square::new(4, 3);
    pub const D4: Square = Square::new(4, 4);
    pub const E4: Square = Square::new(4, 5);
    pub const F4: Square = Square::new(4, 6);
    pub const G4: Square = Square::new(4, 7);
    pub const H4: Square = Square::new(4, 8);
    pub const A5: Square = Square::new(5, 1);
    pub const B5: Square = Square::new(5, 2);
    pub const C5: Square = Square::new(5, 3);
    pub const D5: Square = Square::new(5, 4);
    pub const E5: Square = Square::new(5, 5);
    pub const F5: Square = Square::new(5, 6);
    pub const G5: Square = Square::new(5, 7);
    pub const H5: Square = Square::new(5, 8);
    pub const A6: Square = Square::new(6, 1);
    pub const B6: Square = Square::new(6, 2);
    pub const C6: Square = Square::new(6, 3);
    pub const D6: Square = Square::new(6, 4);
    pub const E6: Square = Square::new(6, 5);
    pub const F6: Square = Square::new(6, 6);
    pub const G6: Square = Square::new(6, 7);
    pub const H6: Square = Square::new(6, 8);
    pub const A7: Square = Square::new(7, 1);
    pub const B7: Square = Square::new(7, 2);
    pub const C7: Square = Square::new(7, 3);
    pub const D7: Square = Square::new(7, 4);
    pub const E7: Square = Square::new(7, 5);
    pub const F7: Square = Square::new(7, 6);
    pub const G7: Square = Square::new(7, 7);
    pub const H7: Square = Square::new(7, 8);
    pub const A8: Square = Square::new(8, 1);
    pub const B8: Square = Square::new(8, 2);
    pub const C8: Square = Square::new(8, 3);
    pub const D8: Square = Square::new(8, 4);
    pub const E8: Square = Square::new(8, 5);
    pub const F8: Square = Square::new(8, 6);
    pub const G8: Square = Square::new(8, 7);
    pub const H8: Square = Square::new(8, 8);
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            let file = (b'a' + (self.file - 1) as u8) as char;
            write!(f, "{file}{}", self.rank)
        } else {
            write!(f, "({},{})", self.rank, self.file)
        }
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self)
    }
}
