//! Priority strategies plugged into the shared search engine.
//!
//! A* and Dijkstra's algorithm differ only in the remaining-cost estimate they attach to each
//! discovered vertex. The engine computes the frontier priority as the start distance plus that
//! estimate, so a strategy without an estimate orders the frontier by start distance alone.

use std::fmt;

use clap::ValueEnum;

use crate::coordinate::{euclidean, Coordinate};

/// Capability interface distinguishing one search algorithm from another.
pub trait Strategy {
    /// Human-readable algorithm name, used in logs and on screen.
    fn name(&self) -> &'static str;

    /// Estimated remaining cost from `from` to `to`, or [`None`] when the strategy keeps no
    /// heuristic. Any returned estimate must never exceed the true remaining cost.
    fn estimate(&self, from: Coordinate, to: Coordinate) -> Option<f64>;
}

/// A* search guided by the straight-line distance to the goal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AStar;

impl Strategy for AStar {
    fn name(&self) -> &'static str {
        "A*"
    }

    fn estimate(&self, from: Coordinate, to: Coordinate) -> Option<f64> {
        Some(euclidean(from, to))
    }
}

/// Dijkstra's algorithm, ordering the frontier by distance from the start only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dijkstra;

impl Strategy for Dijkstra {
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn estimate(&self, _from: Coordinate, _to: Coordinate) -> Option<f64> {
        None
    }
}

/// Algorithm selected at runtime, from the command line or the options menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Delegates to [`AStar`].
    #[default]
    #[value(name = "astar")]
    AStar,
    /// Delegates to [`Dijkstra`].
    #[value(name = "dijkstra")]
    Dijkstra,
}

impl Algorithm {
    /// Returns the other algorithm.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::AStar => Self::Dijkstra,
            Self::Dijkstra => Self::AStar,
        }
    }
}

impl Strategy for Algorithm {
    fn name(&self) -> &'static str {
        match self {
            Self::AStar => AStar.name(),
            Self::Dijkstra => Dijkstra.name(),
        }
    }

    fn estimate(&self, from: Coordinate, to: Coordinate) -> Option<f64> {
        match self {
            Self::AStar => AStar.estimate(from, to),
            Self::Dijkstra => Dijkstra.estimate(from, to),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
