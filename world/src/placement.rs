//! Rejection sampling of artifact cells, enemy spawns, and the player start.

use artifact_maze_core::{CellCoord, ARTIFACT_COUNT};
use rand::Rng;

use crate::{Grid, PlacementError, PlacementItem};

/// Upper bound on draws spent placing a single entity.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

/// Cells chosen for the artifacts and enemy spawns of a new session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Distinct open cells that hold an artifact.
    pub artifacts: Vec<CellCoord>,
    /// Open cells where enemies start. Spawns may share a cell with each
    /// other but never with an artifact.
    pub enemy_spawns: Vec<CellCoord>,
}

/// Scatters [`ARTIFACT_COUNT`] artifacts and `enemy_count` enemy spawns over
/// the open cells of `grid`.
///
/// Each draw samples a uniformly random cell of the whole grid and rejects
/// walls, so the attempt budget covers wall hits as well.
pub fn place_entities<R>(
    grid: &Grid,
    enemy_count: usize,
    rng: &mut R,
) -> Result<Placement, PlacementError>
where
    R: Rng + ?Sized,
{
    let mut artifacts = Vec::with_capacity(ARTIFACT_COUNT);
    while artifacts.len() < ARTIFACT_COUNT {
        let cell = sample_open_cell(grid, rng, PlacementItem::Artifact, |cell| {
            !artifacts.contains(&cell)
        })?;
        artifacts.push(cell);
    }

    let mut enemy_spawns = Vec::with_capacity(enemy_count);
    for _ in 0..enemy_count {
        let cell = sample_open_cell(grid, rng, PlacementItem::Enemy, |cell| {
            !artifacts.contains(&cell)
        })?;
        enemy_spawns.push(cell);
    }

    Ok(Placement {
        artifacts,
        enemy_spawns,
    })
}

/// First open cell in row-major order that no enemy spawns on.
pub fn find_player_start(
    grid: &Grid,
    enemy_spawns: &[CellCoord],
) -> Result<CellCoord, PlacementError> {
    grid.open_cells()
        .find(|cell| !enemy_spawns.contains(cell))
        .ok_or(PlacementError::NoPlayerStart)
}

fn sample_open_cell<R, F>(
    grid: &Grid,
    rng: &mut R,
    item: PlacementItem,
    accept: F,
) -> Result<CellCoord, PlacementError>
where
    R: Rng + ?Sized,
    F: Fn(CellCoord) -> bool,
{
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let cell = CellCoord::new(
            rng.gen_range(0..grid.columns()),
            rng.gen_range(0..grid.rows()),
        );
        if grid.is_open(cell) && accept(cell) {
            return Ok(cell);
        }
    }

    Err(PlacementError::Exhausted {
        item,
        attempts: MAX_PLACEMENT_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn artifacts_are_distinct_and_avoid_walls() {
        let grid = Grid::from_seed(20, 15, 42).expect("valid dimensions");
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let placement = place_entities(&grid, 5, &mut rng).expect("placement succeeds");

        assert_eq!(placement.artifacts.len(), ARTIFACT_COUNT);
        for (index, cell) in placement.artifacts.iter().enumerate() {
            assert!(grid.is_open(*cell));
            assert!(!placement.artifacts[index + 1..].contains(cell));
        }
        for spawn in &placement.enemy_spawns {
            assert!(grid.is_open(*spawn));
            assert!(!placement.artifacts.contains(spawn));
        }
        assert_eq!(placement.enemy_spawns.len(), 5);
    }

    #[test]
    fn too_few_open_cells_exhausts_artifact_placement() {
        let grid = Grid::from_rows(&["..", "##"]).expect("non-empty layout");
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            place_entities(&grid, 0, &mut rng),
            Err(PlacementError::Exhausted {
                item: PlacementItem::Artifact,
                attempts: MAX_PLACEMENT_ATTEMPTS,
            })
        );
    }

    #[test]
    fn enemies_need_a_cell_outside_the_artifacts() {
        let grid = Grid::from_rows(&["...", "###"]).expect("non-empty layout");
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(
            place_entities(&grid, 1, &mut rng),
            Err(PlacementError::Exhausted {
                item: PlacementItem::Enemy,
                attempts: MAX_PLACEMENT_ATTEMPTS,
            })
        );
    }

    #[test]
    fn enemies_may_share_a_spawn_cell() {
        let grid = Grid::from_rows(&["....#"]).expect("non-empty layout");
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let placement = place_entities(&grid, 2, &mut rng).expect("one free cell suffices");

            let free = grid
                .open_cells()
                .find(|cell| !placement.artifacts.contains(cell))
                .expect("one open cell outside the artifacts");
            assert_eq!(placement.enemy_spawns, vec![free, free]);
        }
    }

    #[test]
    fn player_start_skips_enemy_cells_in_row_major_order() {
        let grid = Grid::from_rows(&["#..", "..."]).expect("non-empty layout");
        let spawns = [CellCoord::new(1, 0)];
        assert_eq!(find_player_start(&grid, &spawns), Ok(CellCoord::new(2, 0)));
        assert_eq!(find_player_start(&grid, &[]), Ok(CellCoord::new(1, 0)));
    }

    #[test]
    fn player_start_may_share_an_artifact_cell() {
        let grid = Grid::from_rows(&["..."]).expect("non-empty layout");
        assert_eq!(find_player_start(&grid, &[]), Ok(CellCoord::new(0, 0)));
    }

    #[test]
    fn fully_occupied_grid_has_no_player_start() {
        let grid = Grid::from_rows(&[".#"]).expect("non-empty layout");
        assert_eq!(
            find_player_start(&grid, &[CellCoord::new(0, 0)]),
            Err(PlacementError::NoPlayerStart)
        );
    }
}
