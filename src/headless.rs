//! Single search run without the terminal interface.

use std::fmt;

use color_eyre::eyre::{OptionExt as _, Result};
use log::info;

use crate::{
    config::Config,
    graph::Graph,
    observer::LogObserver,
    search::{Path, Search, SearchStatus},
    strategy::{Algorithm, Strategy as _},
};

/// Outcome of a headless run, printable as a short plain-text summary.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    /// Algorithm that ran.
    pub algorithm: Algorithm,
    /// Terminal status of the run.
    pub status: SearchStatus,
    /// Number of vertices finalized.
    pub expanded: usize,
    /// Path found, empty when the end was unreachable.
    pub path: Path,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "algorithm: {}", self.algorithm)?;
        writeln!(f, "status: {:?}", self.status)?;
        writeln!(f, "expanded: {}", self.expanded)?;

        if self.path.is_empty() {
            write!(f, "path: none")
        } else {
            writeln!(f, "cost: {:.3}", self.path.cost())?;
            let steps = self
                .path
                .coordinates()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>();
            write!(f, "path: {}", steps.join(" -> "))
        }
    }
}

/// Runs the configured search to completion.
///
/// Every notification of the engine is forwarded to the `trace` log level. Walls given on the
/// start or end cell are ignored.
///
/// # Errors
///
/// This function may return errors if:
/// - The start or the end cell is missing from the configuration
/// - The grid dimensions are invalid
/// - The start, the end or a wall lies outside the grid
pub fn run(config: &Config) -> Result<Report> {
    let start = config
        .start
        .ok_or_eyre("headless mode requires a start cell (--start x,y)")?;
    let end = config
        .end
        .ok_or_eyre("headless mode requires an end cell (--end x,y)")?;
    let (width, height) = config.dimensions();

    let mut search = Search::new(Graph::new(width, height)?, config.algorithm);
    let status = search.find_path(start, end, &config.walls_off_endpoints(), &mut LogObserver)?;
    search.load_path(&mut LogObserver)?;
    let path = search.path()?;

    info!(
        "{} finished with {status:?} after {} expansions",
        config.algorithm.name(),
        search.expanded()
    );

    Ok(Report {
        algorithm: config.algorithm,
        status,
        expanded: search.expanded(),
        path,
    })
}
