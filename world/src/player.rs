use artifact_maze_core::{CellCoord, Direction, ATTACK_COOLDOWN_TICKS};

use crate::Grid;

/// Player avatar steered by the operator.
#[derive(Clone, Debug)]
pub(crate) struct Player {
    cell: CellCoord,
    artifacts_collected: u32,
    attack_cooldown: u32,
}

impl Player {
    pub(crate) const fn new(cell: CellCoord) -> Self {
        Self {
            cell,
            artifacts_collected: 0,
            attack_cooldown: 0,
        }
    }

    pub(crate) const fn cell(&self) -> CellCoord {
        self.cell
    }

    pub(crate) const fn artifacts_collected(&self) -> u32 {
        self.artifacts_collected
    }

    pub(crate) const fn attack_cooldown(&self) -> u32 {
        self.attack_cooldown
    }

    /// Moves one cell when the destination is open.
    pub(crate) fn step(
        &mut self,
        direction: Direction,
        grid: &Grid,
    ) -> Option<(CellCoord, CellCoord)> {
        let to = grid.open_step(self.cell, direction)?;
        let from = self.cell;
        self.cell = to;
        Some((from, to))
    }

    /// Starts the cooldown and reports whether the attack fired.
    pub(crate) fn try_attack(&mut self) -> bool {
        if self.attack_cooldown > 0 {
            return false;
        }

        self.attack_cooldown = ATTACK_COOLDOWN_TICKS;
        true
    }

    pub(crate) fn decay_cooldown(&mut self) {
        self.attack_cooldown = self.attack_cooldown.saturating_sub(1);
    }

    pub(crate) fn credit_artifact(&mut self) -> u32 {
        self.artifacts_collected = self.artifacts_collected.saturating_add(1);
        self.artifacts_collected
    }

    #[cfg(any(test, feature = "scaffolding"))]
    pub(crate) fn set_artifacts_collected(&mut self, collected: u32) {
        self.artifacts_collected = collected;
    }
}
