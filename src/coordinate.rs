//! Grid coordinates and the distance function shared by both search strategies.

use std::{fmt, str::FromStr};

use crate::error::Error;

/// Integer position of a single grid cell.
///
/// The `x` component grows to the right and the `y` component grows downwards, matching the row
/// and column order in which the terminal renders the board. Components are signed so that
/// out-of-bounds input from the user can be represented and rejected explicitly instead of
/// wrapping around.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    /// Column of the cell.
    pub x: i32,
    /// Row of the cell.
    pub y: i32,
}

impl Coordinate {
    /// Builds a coordinate from its two components.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the coordinate shifted by the given offset, or [`None`] on overflow.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// Chebyshev (king-move) distance between two coordinates.
    ///
    /// Two distinct cells are adjacent in the 8-connected lattice exactly when this distance is 1.
    #[must_use]
    pub fn chebyshev(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    /// Parses the `x,y` form used on the command line. Surrounding whitespace around either
    /// component is ignored.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidCoordinateFormat {
            input: input.to_owned(),
        };

        let (x, y) = input.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse().map_err(|_err| invalid())?;
        let y = y.trim().parse().map_err(|_err| invalid())?;

        Ok(Self::new(x, y))
    }
}

/// Straight-line distance between two coordinates.
///
/// This is both the edge weight between adjacent cells (so a diagonal step costs the square root
/// of two) and the heuristic A* uses towards the goal. Because every edge weight is itself a
/// Euclidean distance, the heuristic never overestimates the remaining cost.
#[must_use]
pub fn euclidean(from: Coordinate, to: Coordinate) -> f64 {
    let dx = f64::from(from.x) - f64::from(to.x);
    let dy = f64::from(from.y) - f64::from(to.y);

    dx.hypot(dy)
}
