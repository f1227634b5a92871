//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{
    types::{MainMenuItem, OptionsMenuItem, Screen},
    App,
};

/// Longest time a single poll may block the interface.
const MAX_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to the appropriate handler
/// functions based on the current screen. It uses a timeout to avoid blocking the UI, short enough
/// that a running search keeps the configured animation pace.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    let timeout = app
        .playback
        .frame_delay
        .clamp(Duration::from_millis(1), MAX_POLL_TIMEOUT);

    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code)?;
            }
        }
    }

    if matches!(app.screen, Screen::InGame) {
        app.update_search()?;
    }

    Ok(())
}

/// Dispatches a key press to the handler of the current screen.
///
/// The `q` key quits from every screen.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    if code == KeyCode::Char('q') {
        app.exit = true;
        return Ok(());
    }

    match app.screen {
        Screen::MainMenu(_) | Screen::OptionsMenu(_) => handle_menu_key(app, code),
        Screen::InGame => handle_editor_key(app, code)?,
    }

    Ok(())
}

/// Handles navigation keys in the main and options menus.
///
/// `j`/down and `k`/up move the selection, `l`/right/Enter selects and `h`/left/Esc goes back.
fn handle_menu_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('j') | KeyCode::Down => handle_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_up(app),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => handle_select(app),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Esc => handle_back(app),
        _ => {}
    }
}

/// Moves the menu selection down.
fn handle_down(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Start) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::Quit);
        }
        Screen::OptionsMenu(OptionsMenuItem::Algorithm) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Back);
        }
        _ => {}
    }
}

/// Moves the menu selection up.
fn handle_up(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::MainMenu(MainMenuItem::Start);
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Algorithm);
        }
        _ => {}
    }
}

/// Activates the selected menu item.
///
/// Selecting the algorithm in the options menu toggles it in place rather than opening a submenu.
fn handle_select(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Start) => {
            app.screen = Screen::InGame;
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.screen = Screen::OptionsMenu(OptionsMenuItem::Algorithm);
        }
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.exit = true;
        }
        Screen::OptionsMenu(OptionsMenuItem::Algorithm) => {
            app.algorithm = app.algorithm.toggled();
            app.discard_search();
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.screen = Screen::MainMenu(MainMenuItem::Options);
        }
        Screen::InGame => {}
    }
}

/// Returns from the options menu to the main menu.
fn handle_back(app: &mut App) {
    if let Screen::OptionsMenu(_) = app.screen {
        app.screen = Screen::MainMenu(MainMenuItem::Options);
    }
}

/// Handles keys in the grid editor.
///
/// Cursor movement is always allowed. Any edit of the grid discards the current search, running or
/// finished, so the overlay never disagrees with the walls on screen.
fn handle_editor_key(app: &mut App, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('h') | KeyCode::Left => app.board.move_cursor(-1, 0),
        KeyCode::Char('l') | KeyCode::Right => app.board.move_cursor(1, 0),
        KeyCode::Char('k') | KeyCode::Up => app.board.move_cursor(0, -1),
        KeyCode::Char('j') | KeyCode::Down => app.board.move_cursor(0, 1),
        KeyCode::Char('w' | ' ') => {
            app.discard_search();
            app.board.toggle_wall();
        }
        KeyCode::Char('s') => {
            app.discard_search();
            app.board.set_start();
        }
        KeyCode::Char('e') => {
            app.discard_search();
            app.board.set_end();
        }
        KeyCode::Char('c') => {
            app.discard_search();
            app.board.clear();
        }
        KeyCode::Char('a') => {
            app.algorithm = app.algorithm.toggled();
            app.discard_search();
        }
        KeyCode::Char('r') | KeyCode::Enter => app.start_search()?,
        KeyCode::Char('x') => app.cancel_search(),
        KeyCode::Esc => {
            app.discard_search();
            app.screen = Screen::MainMenu(MainMenuItem::Start);
        }
        _ => {}
    }

    Ok(())
}
