//! Board coordinates and diagonal geometry helpers.

use std::fmt;

/// A `(file, rank)` pair identifying a square.
///
/// Coordinates are signed so offsets can step off the board; bounds are
/// checked by the board, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub file: i8,
    pub rank: i8,
}

impl Coordinate {
    #[inline]
    pub const fn new(file: i8, rank: i8) -> Self {
        Self { file, rank }
    }

    /// Moves a coordinate by a file and rank offset.
    #[inline]
    pub const fn offset(self, d_file: i8, d_rank: i8) -> Self {
        Self::new(self.file + d_file, self.rank + d_rank)
    }

    /// Number of diagonal steps from `self` to `other`, or `None` when the two
    /// coordinates do not share a diagonal (or are equal).
    pub fn diagonal_distance(self, other: Coordinate) -> Option<u8> {
        let (d_file, d_rank) = self.delta(other);
        let distance = d_file.unsigned_abs();
        if distance == 0 || distance != d_rank.unsigned_abs() {
            return None;
        }
        u8::try_from(distance).ok()
    }

    /// Coordinates strictly between `self` and `other` along their shared
    /// diagonal, ordered from `self` outward. Empty when not on a diagonal.
    pub fn diagonal_between(self, other: Coordinate) -> Vec<Coordinate> {
        let Some(distance) = self.diagonal_distance(other) else {
            return Vec::new();
        };
        let (d_file, d_rank) = self.delta(other);
        let (step_file, step_rank) = (d_file.signum(), d_rank.signum());

        // Every intermediate square lies between two valid coordinates.
        (1..i16::from(distance))
            .map(|i| {
                Coordinate::new(
                    (i16::from(self.file) + step_file * i) as i8,
                    (i16::from(self.rank) + step_rank * i) as i8,
                )
            })
            .collect()
    }

    /// Signed file and rank difference, widened so extreme coordinates
    /// cannot overflow.
    fn delta(self, other: Coordinate) -> (i16, i16) {
        (
            i16::from(other.file) - i16::from(self.file),
            i16::from(other.rank) - i16::from(self.rank),
        )
    }
}

impl From<(i8, i8)> for Coordinate {
    fn from((file, rank): (i8, i8)) -> Self {
        Self::new(file, rank)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.file, self.rank)
    }
}
