//! Grid pathfinding visualizer for A* and Dijkstra's algorithm.
//!
//! The crate is split in two halves. The core ([`graph`], [`search`], [`strategy`], [`observer`])
//! builds an 8-connected vertex lattice from the grid dimensions and explores it with a single
//! frontier-expansion engine parameterised by the algorithm, reporting its progress through an
//! observer interface. The terminal surface ([`App`]) lets the user draw walls, place the start
//! and end cells, pick an algorithm and watch the exploration unfold one expansion per frame.
//! The [`headless`] module runs a single search without a terminal.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
mod board;
pub mod config;
pub mod coordinate;
pub mod error;
mod events;
pub mod graph;
pub mod headless;
pub mod observer;
mod playback;
pub mod search;
pub mod strategy;
mod types;
mod ui;

pub use app::App;
pub use config::Config;
pub use coordinate::Coordinate;
pub use error::{Error, Result};
pub use graph::Graph;
pub use search::{CancellationToken, Path, Search, SearchStatus};
pub use strategy::{AStar, Algorithm, Dijkstra, Strategy};
