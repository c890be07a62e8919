//! Absolute connector directions on the square grid and the fixed rotation permutation.

use strum::VariantArray;

use crate::location::Location;

/// One of the four absolute directions a connector can face.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Direction {
    /// Toward row 0.
    North,
    /// Toward higher columns.
    East,
    /// Toward higher rows.
    South,
    /// Toward column 0.
    West,
}

impl Direction {
    /// Attempt the unit step from `location` in the direction specified by `self` and return the
    /// resultant [`Location`].
    ///
    /// Steps off the top or left edge wrap to an unindexable location rather than panicking.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::North => location.offset_by((-1, 0)),
            Self::East => location.offset_by((0, 1)),
            Self::South => location.offset_by((1, 0)),
            Self::West => location.offset_by((0, -1)),
        }
    }

    /// Invert the direction specified by `self`.
    pub fn opposite(&self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Rotate `self` clockwise by `quarter_turns` quarter turns.
    ///
    /// One quarter turn maps North to East, East to South, South to West, and West to North.
    /// Turn counts are taken modulo 4.
    pub fn rotated(&self, quarter_turns: u8) -> Self {
        let mut out = *self;
        for _ in 0..(quarter_turns & 3) {
            out = match out {
                Self::North => Self::East,
                Self::East => Self::South,
                Self::South => Self::West,
                Self::West => Self::North,
            };
        }
        out
    }

    /// Determine the direction from `a` to `b` by calling [`attempt_from`](Self::attempt_from)
    /// until one works.
    ///
    /// Works only on two [`Location`]s which are grid-adjacent and returns [`None`] otherwise.
    pub fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }
}
