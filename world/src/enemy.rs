use artifact_maze_core::{CellCoord, Direction, EnemyId, MAX_RUN_LENGTH, MIN_RUN_LENGTH};
use rand::{seq::SliceRandom, Rng};

use crate::Grid;

/// Enemy wandering the maze in short straight runs.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    id: EnemyId,
    cell: CellCoord,
    heading: Direction,
    run_length: u32,
    run_progress: u32,
    step_accumulator: u32,
    step_threshold: u32,
    alive: bool,
}

impl Enemy {
    /// Creates a live enemy with a random heading and run length.
    pub(crate) fn spawn<R>(id: EnemyId, cell: CellCoord, step_threshold: u32, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let heading = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        Self {
            id,
            cell,
            heading,
            run_length: rng.gen_range(MIN_RUN_LENGTH..=MAX_RUN_LENGTH),
            run_progress: 0,
            step_accumulator: 0,
            step_threshold,
            alive: true,
        }
    }

    pub(crate) const fn id(&self) -> EnemyId {
        self.id
    }

    pub(crate) const fn cell(&self) -> CellCoord {
        self.cell
    }

    pub(crate) const fn heading(&self) -> Direction {
        self.heading
    }

    pub(crate) const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Live enemies collide with whatever shares their cell.
    pub(crate) fn occupies(&self, cell: CellCoord) -> bool {
        self.alive && self.cell == cell
    }

    /// Marks the enemy as defeated. Returns `false` when it already was.
    pub(crate) fn defeat(&mut self) -> bool {
        let was_alive = self.alive;
        self.alive = false;
        was_alive
    }

    /// Accumulates one tick and steps once the threshold is reached.
    ///
    /// A finished run or a blocked heading triggers a replan among the open
    /// neighbours. An enemy boxed in on all four sides stays put.
    pub(crate) fn advance<R>(&mut self, grid: &Grid, rng: &mut R) -> Option<(CellCoord, CellCoord)>
    where
        R: Rng + ?Sized,
    {
        if !self.alive {
            return None;
        }

        self.step_accumulator = self.step_accumulator.saturating_add(1);
        if self.step_accumulator < self.step_threshold {
            return None;
        }
        self.step_accumulator = 0;

        let blocked = grid.open_step(self.cell, self.heading).is_none();
        if blocked || self.run_progress >= self.run_length {
            let candidates: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|direction| grid.open_step(self.cell, *direction).is_some())
                .collect();
            let heading = *candidates.choose(rng)?;
            self.heading = heading;
            self.run_length = rng.gen_range(MIN_RUN_LENGTH..=MAX_RUN_LENGTH);
            self.run_progress = 0;
        }

        let to = grid.open_step(self.cell, self.heading)?;
        let from = self.cell;
        self.cell = to;
        self.run_progress += 1;
        Some((from, to))
    }

    #[cfg(test)]
    pub(crate) fn run_length(&self) -> u32 {
        self.run_length
    }
}
