//! This crate contains the source code for the binary of the pathfinding visualizer pathtuine.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use pathtuine::{config, headless, App, Config};

fn main() -> Result<()> {
    install()?;

    let config = Config::parse();
    config::init_logging(config.headless)?;

    if config.headless {
        println!("{}", headless::run(&config)?);
        return Ok(());
    }

    let mut app = App::new(&config)?;
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}
