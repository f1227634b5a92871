//! Error types for the pathfinding core.
//!
//! The graph and the search engines report failures through the [`Error`] enumeration below. The
//! interactive and headless front ends wrap these into `color_eyre` reports at their boundary.

use thiserror::Error;

/// Failures raised by graph construction, vertex lookup and search entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A coordinate falls outside the bounds of the grid.
    ///
    /// Raised by vertex lookup on the [`Graph`](crate::graph::Graph) and by the search engine when
    /// the start, end or any wall coordinate is out of bounds.
    #[error("coordinate ({x}, {y}) lies outside the {width}x{height} grid")]
    InvalidCoordinate {
        /// Horizontal component of the rejected coordinate.
        x: i32,
        /// Vertical component of the rejected coordinate.
        y: i32,
        /// Width of the grid the coordinate was checked against.
        width: usize,
        /// Height of the grid the coordinate was checked against.
        height: usize,
    },
    /// A dense vertex index falls outside the vertex store.
    #[error("vertex index {index} is out of range for a graph of {len} vertices")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Number of vertices in the graph.
        len: usize,
    },
    /// The requested grid dimensions are zero or cannot be addressed with `i32` coordinates.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// A textual coordinate could not be parsed as `x,y`.
    #[error("invalid coordinate {input:?}, expected the form x,y")]
    InvalidCoordinateFormat {
        /// The text that failed to parse.
        input: String,
    },
}

/// Result alias used throughout the pathfinding core.
pub type Result<T> = std::result::Result<T, Error>;
