//! Core application state and logic for the pathfinding visualizer.

use color_eyre::eyre::Result;
use log::info;
use ratatui::DefaultTerminal;

use crate::{
    board::Board,
    config::Config,
    events,
    graph::Graph,
    playback::Playback,
    search::Search,
    strategy::{Algorithm, Strategy as _},
    types::{MainMenuItem, Screen},
    ui,
};

/// Application state container for the pathfinding visualizer.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the interface and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    ///
    /// This field holds the current screen of the application. It is used to determine which
    /// screen to render and what actions to take based on user input.
    pub(crate) screen: Screen,
    /// Grid being edited and visualized.
    ///
    /// This field holds the walls, endpoints and cursor placed by the user, as well as the render
    /// state of every cell during the current search.
    pub(crate) board: Board,
    /// Algorithm used by the next search.
    pub(crate) algorithm: Algorithm,
    /// Search engine over the graph built from the board dimensions.
    ///
    /// The graph is built once for the whole session; walls are cleared and reapplied from the
    /// board before every search.
    pub(crate) search: Search<Algorithm>,
    /// Pacing and cancellation of the animated search.
    pub(crate) playback: Playback,
    /// One-line message shown under the board, such as why a search could not start.
    pub(crate) message: Option<String>,
}

impl App {
    /// Creates a new instance of the App structure from the command-line configuration.
    ///
    /// # Errors
    ///
    /// This function may return errors if the configured dimensions are invalid or if a configured
    /// wall or endpoint lies outside the grid.
    pub fn new(config: &Config) -> Result<Self> {
        let (width, height) = config.dimensions();
        let board = Board::from_config(config)?;
        let search = Search::new(Graph::new(width, height)?, config.algorithm);

        Ok(Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::Start),
            board,
            algorithm: config.algorithm,
            search,
            playback: Playback::new(config.frame_delay()),
            message: None,
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame)
                    .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Starts an animated search from the board's start to its end.
    ///
    /// Walls left on the graph by the previous search are cleared and the board's current walls
    /// applied instead. If either endpoint is missing, a message is shown and nothing starts.
    ///
    /// # Errors
    ///
    /// This function may return errors if the board holds cells outside the graph.
    pub(crate) fn start_search(&mut self) -> Result<()> {
        let (Some(start), Some(end)) = (self.board.start, self.board.end) else {
            self.message = Some("place a start (s) and an end (e) first".to_owned());
            return Ok(());
        };

        self.board.clear_overlay();
        self.search.set_strategy(self.algorithm);
        self.search.graph_mut().clear_walls();
        self.search.begin(start, end, &self.board.wall_list())?;
        self.playback.reset();
        self.message = None;

        info!("started {} search from {start} to {end}", self.algorithm.name());

        Ok(())
    }

    /// Requests cancellation of the running search, honored on the next update.
    pub(crate) fn cancel_search(&mut self) {
        self.playback.cancel.cancel();
    }

    /// Advances the running search, if any, by one paced step.
    ///
    /// # Errors
    ///
    /// This function may return errors from the search engine.
    pub(crate) fn update_search(&mut self) -> Result<()> {
        let _ = self.playback.update(&mut self.search, &mut self.board)?;

        Ok(())
    }

    /// Discards the current search and its overlay so the board can be edited again.
    pub(crate) fn discard_search(&mut self) {
        self.search.set_strategy(self.algorithm);
        self.board.clear_overlay();
    }
}
