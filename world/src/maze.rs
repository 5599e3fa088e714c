//! Randomized depth-first maze carving.

use std::collections::VecDeque;

use artifact_maze_core::{Cell, CellCoord, Direction};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::GenerationError;

/// Rectangular grid of wall and open cells with the origin at the top-left.
///
/// Generated grids treat even-parity coordinates as rooms and the odd cells
/// between them as removable walls. Carving starts at `(0, 0)` and forms a
/// spanning tree over the rooms, so every open cell is reachable from the
/// origin and the open region contains no cycles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Generates a connected maze using the provided random source.
    ///
    /// Dimensions that are not aligned to even parity are tolerated: the
    /// trailing odd column or row simply stays walled.
    pub fn generate<R>(columns: u32, rows: u32, rng: &mut R) -> Result<Self, GenerationError>
    where
        R: Rng + ?Sized,
    {
        let mut grid = Self::walled(columns, rows)?;
        grid.carve_from_origin(rng);
        Ok(grid)
    }

    /// Generates a connected maze deterministically from `seed`.
    pub fn from_seed(columns: u32, rows: u32, seed: u64) -> Result<Self, GenerationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::generate(columns, rows, &mut rng)
    }

    fn walled(columns: u32, rows: u32) -> Result<Self, GenerationError> {
        if columns == 0 || rows == 0 {
            return Err(GenerationError::InvalidDimensions { columns, rows });
        }

        let count = usize::try_from(u64::from(columns) * u64::from(rows))
            .map_err(|_| GenerationError::InvalidDimensions { columns, rows })?;
        Ok(Self {
            columns,
            rows,
            cells: vec![Cell::Wall; count],
        })
    }

    fn carve_from_origin<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let origin = CellCoord::new(0, 0);
        self.set(origin, Cell::Open);

        let mut stack = vec![CarveFrame::enter(origin, rng)];
        loop {
            let Some(frame) = stack.last_mut() else {
                break;
            };
            let room = frame.room;
            let Some(direction) = frame.next_direction() else {
                let _ = stack.pop();
                continue;
            };

            let Some(target) = room.offset_by(direction, 2, self.columns, self.rows) else {
                continue;
            };
            if self.cell(target) != Some(Cell::Wall) {
                continue;
            }

            if let Some(between) = room.step(direction, self.columns, self.rows) {
                self.set(between, Cell::Open);
            }
            self.set(target, Cell::Open);
            stack.push(CarveFrame::enter(target, rng));
        }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the cell lies inside the grid bounds.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Content of the provided cell, or `None` when it lies outside the grid.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<Cell> {
        self.index(cell).and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the cell is inside the grid and walkable.
    #[must_use]
    pub fn is_open(&self, cell: CellCoord) -> bool {
        self.cell(cell) == Some(Cell::Open)
    }

    /// Adjacent cell in `direction` when it is inside the grid and open.
    #[must_use]
    pub fn open_step(&self, from: CellCoord, direction: Direction) -> Option<CellCoord> {
        from.step(direction, self.columns, self.rows)
            .filter(|cell| self.is_open(*cell))
    }

    /// Iterates over every open cell in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Open)
            .filter_map(move |(index, _)| {
                let index = u32::try_from(index).ok()?;
                Some(CellCoord::new(index % columns, index / columns))
            })
    }

    /// Counts the open cells reachable from `origin` through open-only
    /// four-directional steps.
    #[must_use]
    pub fn open_cells_reachable_from(&self, origin: CellCoord) -> usize {
        if !self.is_open(origin) {
            return 0;
        }

        let mut visited = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();
        if let Some(index) = self.index(origin) {
            visited[index] = true;
            queue.push_back(origin);
        }

        let mut reached = 0;
        while let Some(cell) = queue.pop_front() {
            reached += 1;
            for direction in Direction::ALL {
                let Some(next) = self.open_step(cell, direction) else {
                    continue;
                };
                let Some(index) = self.index(next) else {
                    continue;
                };
                if !visited[index] {
                    visited[index] = true;
                    queue.push_back(next);
                }
            }
        }

        reached
    }

    /// Reports whether every open cell is reachable from the origin.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        let open = self.open_cells().count();
        open == self.open_cells_reachable_from(CellCoord::new(0, 0))
    }

    /// Builds a grid from text rows where `#` marks a wall and any other
    /// character an open cell. Short rows are padded with walls.
    #[cfg(any(test, feature = "scaffolding"))]
    pub fn from_rows(rows: &[&str]) -> Result<Self, GenerationError> {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let columns = u32::try_from(width).unwrap_or(0);
        let row_count = u32::try_from(rows.len()).unwrap_or(0);
        let mut grid = Self::walled(columns, row_count)?;

        for (row_index, row) in (0..row_count).zip(rows) {
            for (column_index, glyph) in (0..columns).zip(row.chars()) {
                if glyph != '#' {
                    grid.set(CellCoord::new(column_index, row_index), Cell::Open);
                }
            }
        }

        Ok(grid)
    }

    fn set(&mut self, cell: CellCoord, value: Cell) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = value;
            }
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }

        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }
}

/// Pending work for one room on the explicit carving stack.
#[derive(Clone, Copy, Debug)]
struct CarveFrame {
    room: CellCoord,
    directions: [Direction; 4],
    cursor: usize,
}

impl CarveFrame {
    fn enter<R>(room: CellCoord, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut directions = Direction::ALL;
        directions.shuffle(rng);
        Self {
            room,
            directions,
            cursor: 0,
        }
    }

    fn next_direction(&mut self) -> Option<Direction> {
        let direction = self.directions.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(direction)
    }
}
