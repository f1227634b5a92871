//! Command-line configuration and logger setup.

use std::time::Duration;

use clap::Parser;
use env_logger::Env;
use log::SetLoggerError;

use crate::{coordinate::Coordinate, strategy::Algorithm};

/// Default delay between two animated expansions, in milliseconds.
pub const DEFAULT_FRAME_DELAY_MS: u64 = 25;

/// Settings gathered from the command line.
///
/// Walls and endpoints given here are placed on the board when the application starts, so a
/// prepared scenario can be replayed without drawing it by hand. In headless mode they are the
/// only input.
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
#[command(version, about)]
pub struct Config {
    /// Number of columns of the grid.
    #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(u16).range(1..))]
    pub width: u16,
    /// Number of rows of the grid.
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..))]
    pub height: u16,
    /// Algorithm used to search the grid.
    #[arg(long, value_enum, default_value_t = Algorithm::AStar)]
    pub algorithm: Algorithm,
    /// A wall cell, given as x,y. May be repeated.
    #[arg(long = "wall", value_name = "X,Y")]
    pub walls: Vec<Coordinate>,
    /// Start cell, given as x,y.
    #[arg(long, value_name = "X,Y")]
    pub start: Option<Coordinate>,
    /// End cell, given as x,y.
    #[arg(long, value_name = "X,Y")]
    pub end: Option<Coordinate>,
    /// Run a single search, print the result and exit instead of opening the interface.
    #[arg(long)]
    pub headless: bool,
    /// Delay between two animated expansions, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_FRAME_DELAY_MS, value_name = "MS")]
    pub frame_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 40,
            height: 20,
            algorithm: Algorithm::AStar,
            walls: Vec::new(),
            start: None,
            end: None,
            headless: false,
            frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
        }
    }
}

impl Config {
    /// Grid dimensions as `(width, height)`.
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (usize::from(self.width), usize::from(self.height))
    }

    /// Configured walls, leaving out any that fall on the start or end cell.
    #[must_use]
    pub fn walls_off_endpoints(&self) -> Vec<Coordinate> {
        self.walls
            .iter()
            .copied()
            .filter(|wall| Some(*wall) != self.start && Some(*wall) != self.end)
            .collect()
    }

    /// Delay between two animated expansions.
    #[must_use]
    pub const fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}

/// Installs the global logger.
///
/// The interactive interface owns the terminal, so logging is off by default there; headless runs
/// log at `info`. `RUST_LOG` overrides both defaults.
///
/// # Errors
///
/// - [`SetLoggerError`] if a global logger was already installed.
pub fn init_logging(headless: bool) -> Result<(), SetLoggerError> {
    let default_filter = if headless { "info" } else { "off" };

    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).try_init()
}
