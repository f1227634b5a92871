//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::{block, DOT},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Widget},
    Frame,
};

use crate::{
    board::{Board, CellState},
    coordinate::Coordinate,
    search::SearchStatus,
    types::{MainMenuItem, MenuType, OptionsMenuItem, Screen},
    App,
};

/// Key bindings shown under the board.
const EDITOR_KEYS: &str =
    "(hjkl) move / (w) wall / (s) start / (e) end / (a) algorithm / (r) run / (x) cancel / (c) clear / (esc) menu";

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match &app.screen {
        Screen::MainMenu(item) => main_menu(frame, *item),
        Screen::OptionsMenu(item) => options_menu(app, frame, *item),
        Screen::InGame => in_game(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    frame.render_widget(Clear, frame.area());
}

/// Renders the generic layout structure for the main and options menus.
///
/// This function creates the common layout and block structure used by both main and options menus.
/// The generic part includes the centered positioning and border styling, while the specific menu
/// content is handled by the caller using the [`MenuType`] parameter.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: MenuType) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(35),
        Constraint::Percentage(30),
        Constraint::Percentage(35),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(u16::from(menu.value() + 2))])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); menu.value().into()]).split(inner_space)
}

/// Styles a menu entry depending on whether it is the selected one.
fn menu_line(label: String, selected: bool) -> Line<'static> {
    let style = if selected {
        Style::default().fg(Color::White).bg(Color::Green)
    } else {
        Style::default().fg(Color::Green)
    };

    Line::styled(label, style).centered()
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu with options for "Start", "Options", and "Quit". It
/// highlights the currently selected option and provides visual feedback for user navigation.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::MainMenu(3));
    let entries = [
        ("Start", MainMenuItem::Start),
        ("Options", MainMenuItem::Options),
        ("Quit", MainMenuItem::Quit),
    ];

    for ((label, entry), area) in entries.into_iter().zip(inner_layout.iter()) {
        frame.render_widget(menu_line(label.to_owned(), entry == item), *area);
    }
}

/// Renders the options menu screen with configuration choices.
///
/// This function displays the options menu with the algorithm toggle, which shows the algorithm
/// the next search will use, and "Return" to the main menu. It provides the same navigation
/// highlighting as the main menu.
pub(crate) fn options_menu(app: &App, frame: &mut Frame, item: OptionsMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::OptionsMenu(2));
    let entries = [
        (
            format!("Algorithm: {}", app.algorithm),
            OptionsMenuItem::Algorithm,
        ),
        ("Return".to_owned(), OptionsMenuItem::Back),
    ];

    for ((label, entry), area) in entries.into_iter().zip(inner_layout.iter()) {
        frame.render_widget(menu_line(label, entry == item), *area);
    }
}

/// Centers an area of the given size inside another, clipping it to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect::new(
        area.x + rounded_div::u16(area.width - width, 2),
        area.y + rounded_div::u16(area.height - height, 2),
        width,
        height,
    )
}

/// Summary of the current search shown under the board.
///
/// # Errors
///
/// This function may return errors if the found path cannot be reconstructed.
pub(crate) fn status_line(app: &App) -> Result<String> {
    let status = app.search.status();
    let cost = if status == SearchStatus::Found {
        format!(" | cost: {:.3}", app.search.path()?.cost())
    } else {
        String::new()
    };

    Ok(format!(
        "{} | {status:?} | expanded: {}{cost}",
        app.algorithm,
        app.search.expanded()
    ))
}

/// Color of a board cell, `None` for a cell the current search has not touched.
///
/// The cursor is drawn over the endpoints, the endpoints over walls and walls over the search
/// overlay.
fn cell_color(board: &Board, coordinate: Coordinate) -> Option<Color> {
    let color = if board.cursor == coordinate {
        Color::Yellow
    } else if board.end == Some(coordinate) {
        Color::Magenta
    } else if board.start == Some(coordinate) {
        Color::Green
    } else if board.walls.contains(&coordinate) {
        Color::White
    } else {
        match board.cell(coordinate) {
            CellState::Path => Color::Red,
            CellState::Processed => Color::Cyan,
            CellState::Processing => Color::Blue,
            CellState::Empty => return None,
        }
    };

    Some(color)
}

/// Board drawn one terminal cell per grid cell, anchored at the top-left corner of its area.
struct BoardView<'board>(&'board Board);

impl Widget for BoardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let board = self.0;

        for (row, y) in (area.top()..area.bottom()).enumerate() {
            for (column, x) in (area.left()..area.right()).enumerate() {
                let (Ok(column), Ok(row)) = (i32::try_from(column), i32::try_from(row)) else {
                    continue;
                };
                let coordinate = Coordinate::new(column, row);
                if !board.contains(coordinate) {
                    continue;
                }
                let Some(cell) = buf.cell_mut((x, y)) else {
                    continue;
                };

                let _ = match cell_color(board, coordinate) {
                    Some(color) => cell.set_symbol(block::FULL).set_fg(color),
                    None => cell.set_symbol(DOT).set_fg(Color::DarkGray),
                };
            }
        }
    }
}

/// Renders the grid editor with the search overlay.
///
/// This function draws the board centered on the screen, one terminal cell per grid cell, with the
/// key bindings, the search status and any pending message in a block at the bottom. Boards larger
/// than the screen are clipped at the bottom and right edges.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations or path reconstruction.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    // Board area + tooltip at bottom
    let overall_layout =
        Layout::vertical([Constraint::Min(1), Constraint::Length(4)]).split(frame.area());

    let board_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get board content area from layout")?;
    let tooltip_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    let space = centered(
        board_content_area,
        u16::try_from(app.board.width)?,
        u16::try_from(app.board.height)?,
    );
    frame.render_widget(BoardView(&app.board), space);

    let tooltip_block = Block::bordered()
        .title(EDITOR_KEYS)
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    let tooltip_inner = tooltip_block.inner(tooltip_area);

    frame.render_widget(tooltip_block, tooltip_area);

    let tooltip_lines = Layout::vertical([Constraint::Length(1), Constraint::Length(1)])
        .split(tooltip_inner);
    if let Some(area) = tooltip_lines.first() {
        frame.render_widget(Line::raw(status_line(app)?).centered(), *area);
    }
    if let (Some(message), Some(area)) = (&app.message, tooltip_lines.get(1)) {
        frame.render_widget(
            Line::styled(message.as_str(), Style::default().fg(Color::Yellow)).centered(),
            *area,
        );
    }

    Ok(())
}
