//! Board state rendered by the terminal interface.
//!
//! The board is the visual surface of a search. It holds what the user edits (walls, start, end
//! and the cursor) and, through its [`SearchObserver`] implementation, the render state each cell
//! has reached during the current search.

use std::collections::BTreeSet;

use color_eyre::eyre::Result;

use crate::{config::Config, coordinate::Coordinate, error::Error, observer::SearchObserver};

/// Render state of a cell during a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum CellState {
    /// Untouched by the current search.
    #[default]
    Empty,
    /// Discovered and waiting on the frontier.
    Processing,
    /// Finalized by the search.
    Processed,
    /// Part of the reconstructed path.
    Path,
}

/// Editable grid together with the search overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Board {
    /// Number of columns.
    pub(crate) width: usize,
    /// Number of rows.
    pub(crate) height: usize,
    /// Cells the user marked as walls.
    pub(crate) walls: BTreeSet<Coordinate>,
    /// Start cell, if placed.
    pub(crate) start: Option<Coordinate>,
    /// End cell, if placed.
    pub(crate) end: Option<Coordinate>,
    /// Cell under the editing cursor.
    pub(crate) cursor: Coordinate,
    /// Row-major render state of every cell.
    pub(crate) cells: Vec<CellState>,
}

impl Board {
    /// Creates an empty board with the cursor in the top-left corner.
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            walls: BTreeSet::new(),
            start: None,
            end: None,
            cursor: Coordinate::default(),
            cells: vec![CellState::Empty; width.saturating_mul(height)],
        }
    }

    /// Creates a board with the walls and endpoints given on the command line.
    ///
    /// Walls given on the start or end cell are dropped, as the editor never allows them.
    ///
    /// # Errors
    ///
    /// This function may return errors if any configured wall or endpoint lies outside the grid.
    pub(crate) fn from_config(config: &Config) -> Result<Self> {
        let (width, height) = config.dimensions();
        let mut board = Self::new(width, height);

        for &coordinate in config
            .walls
            .iter()
            .chain(config.start.iter())
            .chain(config.end.iter())
        {
            if !board.contains(coordinate) {
                return Err(Error::InvalidCoordinate {
                    x: coordinate.x,
                    y: coordinate.y,
                    width,
                    height,
                }
                .into());
            }
        }

        board.walls.extend(config.walls_off_endpoints());
        board.start = config.start;
        board.end = config.end;

        Ok(board)
    }

    /// Row-major index of a cell, if it lies on the board.
    fn index(&self, coordinate: Coordinate) -> Option<usize> {
        let x = usize::try_from(coordinate.x).ok()?;
        let y = usize::try_from(coordinate.y).ok()?;

        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    /// Whether the coordinate lies on the board.
    pub(crate) fn contains(&self, coordinate: Coordinate) -> bool {
        self.index(coordinate).is_some()
    }

    /// Render state of a cell, [`CellState::Empty`] outside the board.
    pub(crate) fn cell(&self, coordinate: Coordinate) -> CellState {
        self.index(coordinate)
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or_default()
    }

    /// Sets the render state of a cell, ignoring cells outside the board.
    fn set_cell(&mut self, coordinate: Coordinate, state: CellState) {
        if let Some(cell) = self
            .index(coordinate)
            .and_then(|index| self.cells.get_mut(index))
        {
            *cell = state;
        }
    }

    /// Moves the cursor by the given offset, stopping at the board edges.
    pub(crate) fn move_cursor(&mut self, dx: i32, dy: i32) {
        if let Some(target) = self.cursor.offset(dx, dy) {
            if self.contains(target) {
                self.cursor = target;
            }
        }
    }

    /// Toggles a wall under the cursor. The start and end cells cannot become walls.
    pub(crate) fn toggle_wall(&mut self) {
        let cursor = self.cursor;
        if self.start == Some(cursor) || self.end == Some(cursor) {
            return;
        }
        if !self.walls.remove(&cursor) {
            let _ = self.walls.insert(cursor);
        }
    }

    /// Places the start cell under the cursor, removing any wall there.
    pub(crate) fn set_start(&mut self) {
        let _ = self.walls.remove(&self.cursor);
        self.start = Some(self.cursor);
    }

    /// Places the end cell under the cursor, removing any wall there.
    pub(crate) fn set_end(&mut self) {
        let _ = self.walls.remove(&self.cursor);
        self.end = Some(self.cursor);
    }

    /// Resets the render state of every cell.
    pub(crate) fn clear_overlay(&mut self) {
        self.cells.fill(CellState::Empty);
    }

    /// Removes every wall and the search overlay, keeping the endpoints.
    pub(crate) fn clear(&mut self) {
        self.walls.clear();
        self.clear_overlay();
    }

    /// Walls as a list, in row-major order.
    pub(crate) fn wall_list(&self) -> Vec<Coordinate> {
        let mut walls: Vec<_> = self.walls.iter().copied().collect();
        walls.sort_by_key(|wall| (wall.y, wall.x));
        walls
    }

    /// Coordinates of every cell currently in the given render state.
    pub(crate) fn cells_in(&self, state: CellState) -> Vec<Coordinate> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, cell)| *cell == state)
            .filter_map(|(index, _)| self.coordinate_of(index))
            .collect()
    }

    /// Coordinate of a row-major index.
    fn coordinate_of(&self, index: usize) -> Option<Coordinate> {
        let x = i32::try_from(index % self.width).ok()?;
        let y = i32::try_from(index / self.width).ok()?;

        Some(Coordinate::new(x, y))
    }
}

impl SearchObserver for Board {
    fn processing(&mut self, coordinate: Coordinate) {
        self.set_cell(coordinate, CellState::Processing);
    }

    fn processed(&mut self, coordinate: Coordinate) {
        self.set_cell(coordinate, CellState::Processed);
    }

    fn path_edge(&mut self, from: Coordinate, to: Coordinate) {
        self.set_cell(from, CellState::Path);
        self.set_cell(to, CellState::Path);
    }
}
