#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for a single Artifact Maze session.
//!
//! A [`World`] owns the maze, the player, the enemies, and the artifacts
//! still lying on the floor. It is mutated exclusively through [`apply`],
//! which reports what changed as [`Event`] values, and inspected through the
//! [`query`] module.

mod enemy;
mod error;
mod maze;
mod placement;
mod player;

use artifact_maze_core::{
    attack_radius_in_cells, CellCoord, Command, Direction, EnemyId, Event, Level, GRID_COLUMNS,
    GRID_ROWS,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{enemy::Enemy, player::Player};

pub use crate::{
    error::{GenerationError, PlacementError, PlacementItem, WorldError},
    maze::Grid,
    placement::{find_player_start, place_entities, Placement, MAX_PLACEMENT_ATTEMPTS},
};

/// Represents the authoritative state of one play session.
#[derive(Debug)]
pub struct World {
    level: Level,
    seed: u64,
    grid: Grid,
    player: Player,
    enemies: Vec<Enemy>,
    artifacts: Vec<CellCoord>,
    rng: ChaCha8Rng,
    tick_index: u64,
}

impl World {
    /// Generates a fresh maze for `level` and populates it.
    ///
    /// All randomness flows from `seed`, so two worlds built from the same
    /// level and seed evolve identically under the same commands.
    pub fn new(level: Level, seed: u64) -> Result<Self, WorldError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = Grid::generate(GRID_COLUMNS, GRID_ROWS, &mut rng)?;
        let placement = place_entities(&grid, level.enemy_count(), &mut rng)?;
        let start = find_player_start(&grid, &placement.enemy_spawns)?;
        let enemies = spawn_enemies(&placement.enemy_spawns, level, &mut rng);

        tracing::debug!(
            level = level.get(),
            seed,
            open_cells = grid.open_cells().count(),
            start = ?start,
            "world generated"
        );

        Ok(Self {
            level,
            seed,
            grid,
            player: Player::new(start),
            enemies,
            artifacts: placement.artifacts,
            rng,
            tick_index: 0,
        })
    }

    fn fire_attack(&mut self) -> Vec<EnemyId> {
        let origin = self.player.cell();
        let radius = attack_radius_in_cells();
        let mut defeated = Vec::new();
        for enemy in &mut self.enemies {
            if enemy.is_alive()
                && enemy.cell().euclidean_distance(origin) <= radius
                && enemy.defeat()
            {
                defeated.push(enemy.id());
            }
        }
        defeated
    }

    fn advance_enemies(&mut self, out_events: &mut Vec<Event>) {
        let Self {
            grid, enemies, rng, ..
        } = self;
        for enemy in enemies.iter_mut() {
            if let Some((from, to)) = enemy.advance(grid, rng) {
                out_events.push(Event::EnemyAdvanced {
                    enemy: enemy.id(),
                    from,
                    to,
                });
            }
        }
    }
}

#[cfg(any(test, feature = "scaffolding"))]
impl World {
    /// Assembles a world from a hand-written layout.
    ///
    /// Enemy headings and run lengths are still drawn from `seed`.
    pub fn from_layout(
        level: Level,
        grid: Grid,
        start: CellCoord,
        artifacts: Vec<CellCoord>,
        enemy_spawns: &[CellCoord],
        seed: u64,
    ) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let enemies = spawn_enemies(enemy_spawns, level, &mut rng);
        Self {
            level,
            seed,
            grid,
            player: Player::new(start),
            enemies,
            artifacts,
            rng,
            tick_index: 0,
        }
    }

    /// Overrides the number of artifacts credited to the player.
    pub fn set_artifacts_collected(&mut self, collected: u32) {
        self.player.set_artifacts_collected(collected);
    }
}

fn spawn_enemies<R>(spawns: &[CellCoord], level: Level, rng: &mut R) -> Vec<Enemy>
where
    R: Rng + ?Sized,
{
    (0u32..)
        .zip(spawns)
        .map(|(index, cell)| {
            Enemy::spawn(
                EnemyId::new(index),
                *cell,
                level.enemy_step_threshold(),
                rng,
            )
        })
        .collect()
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StepPlayer { direction } => {
            if let Some((from, to)) = world.player.step(direction, &world.grid) {
                out_events.push(Event::PlayerMoved { from, to });
            }
        }
        Command::Attack => {
            if world.player.try_attack() {
                let defeated = world.fire_attack();
                for enemy in &defeated {
                    out_events.push(Event::EnemyDefeated { enemy: *enemy });
                }
                out_events.push(Event::AttackFired { defeated });
            } else {
                out_events.push(Event::AttackRejected {
                    cooldown_remaining: world.player.attack_cooldown(),
                });
            }
        }
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced {
                tick: world.tick_index,
            });

            world.player.decay_cooldown();
            world.advance_enemies(out_events);
        }
        Command::CollectArtifact { cell } => {
            if let Some(index) = world.artifacts.iter().position(|artifact| *artifact == cell) {
                let _ = world.artifacts.remove(index);
                out_events.push(Event::ArtifactCollected {
                    cell,
                    remaining: world.artifacts.len(),
                });
            }
        }
        Command::CreditArtifact => {
            let collected = world.player.credit_artifact();
            out_events.push(Event::ArtifactCredited { collected });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use artifact_maze_core::{CellCoord, EnemyId, Level};

    use super::{EnemySnapshot, Grid, World};

    /// Level the world was generated for.
    #[must_use]
    pub fn level(world: &World) -> Level {
        world.level
    }

    /// Seed the world was generated from.
    #[must_use]
    pub fn seed(world: &World) -> u64 {
        world.seed
    }

    /// Provides read-only access to the maze layout.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player_cell(world: &World) -> CellCoord {
        world.player.cell()
    }

    /// Number of artifacts credited to the player.
    #[must_use]
    pub fn artifacts_collected(world: &World) -> u32 {
        world.player.artifacts_collected()
    }

    /// Ticks remaining before the player may attack again.
    #[must_use]
    pub fn attack_cooldown(world: &World) -> u32 {
        world.player.attack_cooldown()
    }

    /// Cells of the artifacts still lying in the maze.
    #[must_use]
    pub fn artifacts(world: &World) -> &[CellCoord] {
        &world.artifacts
    }

    /// Reports whether an uncollected artifact lies on `cell`.
    #[must_use]
    pub fn artifact_at(world: &World, cell: CellCoord) -> bool {
        world.artifacts.contains(&cell)
    }

    /// Identifier of a live enemy standing on `cell`, if any.
    #[must_use]
    pub fn live_enemy_at(world: &World, cell: CellCoord) -> Option<EnemyId> {
        world
            .enemies
            .iter()
            .find(|enemy| enemy.occupies(cell))
            .map(|enemy| enemy.id())
    }

    /// Captures a read-only view of every enemy, defeated ones included.
    #[must_use]
    pub fn enemy_view(world: &World) -> Vec<EnemySnapshot> {
        world
            .enemies
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id(),
                cell: enemy.cell(),
                heading: enemy.heading(),
                alive: enemy.is_alive(),
            })
            .collect()
    }

    /// Number of ticks processed since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemySnapshot {
    /// Identifier assigned to the enemy.
    pub id: EnemyId,
    /// Cell currently occupied by the enemy.
    pub cell: CellCoord,
    /// Direction of the enemy's current run.
    pub heading: Direction,
    /// Whether the enemy still roams and collides.
    pub alive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use artifact_maze_core::ATTACK_COOLDOWN_TICKS;

    fn level(value: u8) -> Level {
        Level::new(value).expect("selectable level")
    }

    fn open_field(columns: usize, rows: usize) -> Grid {
        let row = ".".repeat(columns);
        let rows: Vec<&str> = (0..rows).map(|_| row.as_str()).collect();
        Grid::from_rows(&rows).expect("non-empty layout")
    }

    fn ticks(world: &mut World, count: usize) -> Vec<Event> {
        let mut events = Vec::new();
        for _ in 0..count {
            apply(world, Command::Tick, &mut events);
        }
        events
    }

    #[test]
    fn new_world_is_deterministic_per_seed() {
        let first = World::new(level(3), 77).expect("world builds");
        let second = World::new(level(3), 77).expect("world builds");

        assert_eq!(query::grid(&first), query::grid(&second));
        assert_eq!(query::artifacts(&first), query::artifacts(&second));
        assert_eq!(query::enemy_view(&first), query::enemy_view(&second));
        assert_eq!(query::player_cell(&first), query::player_cell(&second));
    }

    #[test]
    fn new_world_populates_level_enemies() {
        for value in Level::MIN..=Level::MAX {
            let world = World::new(level(value), u64::from(value)).expect("world builds");
            assert_eq!(query::enemy_view(&world).len(), usize::from(value));
            assert_eq!(query::artifacts(&world).len(), 3);
            assert_eq!(query::artifacts_collected(&world), 0);
            assert_eq!(query::attack_cooldown(&world), 0);
        }
    }

    #[test]
    fn player_step_reports_movement_and_respects_walls() {
        let grid = Grid::from_rows(&["..", "#."]).expect("non-empty layout");
        let mut world = World::from_layout(
            level(1),
            grid,
            CellCoord::new(0, 0),
            Vec::new(),
            &[],
            0,
        );
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::StepPlayer {
                direction: Direction::South,
            },
            &mut events,
        );
        assert!(events.is_empty());

        apply(
            &mut world,
            Command::StepPlayer {
                direction: Direction::East,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::PlayerMoved {
                from: CellCoord::new(0, 0),
                to: CellCoord::new(1, 0),
            }]
        );
        assert_eq!(query::player_cell(&world), CellCoord::new(1, 0));
    }

    #[test]
    fn attack_defeats_orthogonal_neighbours_only() {
        let grid = Grid::from_rows(&["###", "###", "###"]).expect("non-empty layout");
        let spawns = [
            CellCoord::new(1, 0),
            CellCoord::new(2, 2),
            CellCoord::new(1, 1),
        ];
        let mut world = World::from_layout(
            level(3),
            grid,
            CellCoord::new(1, 1),
            Vec::new(),
            &spawns,
            0,
        );
        let mut events = Vec::new();

        apply(&mut world, Command::Attack, &mut events);

        let defeated = vec![EnemyId::new(0), EnemyId::new(2)];
        assert_eq!(
            events,
            vec![
                Event::EnemyDefeated {
                    enemy: EnemyId::new(0)
                },
                Event::EnemyDefeated {
                    enemy: EnemyId::new(2)
                },
                Event::AttackFired { defeated },
            ]
        );
        let alive: Vec<bool> = query::enemy_view(&world)
            .iter()
            .map(|enemy| enemy.alive)
            .collect();
        assert_eq!(alive, vec![false, true, false]);
        assert_eq!(query::live_enemy_at(&world, CellCoord::new(1, 1)), None);
    }

    #[test]
    fn attack_during_cooldown_changes_nothing() {
        let grid = open_field(3, 3);
        let mut world = World::from_layout(
            level(1),
            grid,
            CellCoord::new(0, 0),
            Vec::new(),
            &[CellCoord::new(2, 2)],
            0,
        );
        let mut events = Vec::new();
        apply(&mut world, Command::Attack, &mut events);
        assert_eq!(events, vec![Event::AttackFired { defeated: Vec::new() }]);

        let _ = ticks(&mut world, 5);
        events.clear();
        apply(&mut world, Command::Attack, &mut events);
        assert_eq!(
            events,
            vec![Event::AttackRejected {
                cooldown_remaining: ATTACK_COOLDOWN_TICKS - 5,
            }]
        );
        assert!(query::enemy_view(&world)[0].alive);
        assert_eq!(query::attack_cooldown(&world), ATTACK_COOLDOWN_TICKS - 5);

        let _ = ticks(&mut world, 15);
        events.clear();
        apply(&mut world, Command::Attack, &mut events);
        assert!(matches!(events.as_slice(), [Event::AttackFired { .. }]));
    }

    #[test]
    fn rejected_attack_spares_an_adjacent_enemy() {
        let grid = Grid::from_rows(&["....."]).expect("non-empty layout");
        let mut world = World::from_layout(
            level(1),
            grid,
            CellCoord::new(0, 0),
            Vec::new(),
            &[CellCoord::new(4, 0)],
            0,
        );
        let mut events = Vec::new();
        apply(&mut world, Command::Attack, &mut events);
        assert_eq!(events, vec![Event::AttackFired { defeated: Vec::new() }]);

        for _ in 0..3 {
            apply(
                &mut world,
                Command::StepPlayer {
                    direction: Direction::East,
                },
                &mut events,
            );
        }
        assert_eq!(query::player_cell(&world), CellCoord::new(3, 0));

        events.clear();
        apply(&mut world, Command::Attack, &mut events);
        assert_eq!(
            events,
            vec![Event::AttackRejected {
                cooldown_remaining: ATTACK_COOLDOWN_TICKS,
            }]
        );
        assert_eq!(
            query::live_enemy_at(&world, CellCoord::new(4, 0)),
            Some(EnemyId::new(0))
        );

        let _ = ticks(&mut world, ATTACK_COOLDOWN_TICKS as usize);
        events.clear();
        apply(&mut world, Command::Attack, &mut events);
        assert_eq!(
            events,
            vec![
                Event::EnemyDefeated {
                    enemy: EnemyId::new(0)
                },
                Event::AttackFired {
                    defeated: vec![EnemyId::new(0)]
                },
            ]
        );
    }

    #[test]
    fn enemy_speed_scales_with_level() {
        for (value, expected_moves) in [(1u8, 4usize), (3, 6), (5, 20)] {
            let grid = open_field(9, 9);
            let mut world = World::from_layout(
                level(value),
                grid,
                CellCoord::new(0, 0),
                Vec::new(),
                &[CellCoord::new(4, 4)],
                u64::from(value),
            );

            let moves = ticks(&mut world, 100)
                .iter()
                .filter(|event| matches!(event, Event::EnemyAdvanced { .. }))
                .count();
            assert_eq!(moves, expected_moves, "level {value}");
        }
    }

    #[test]
    fn defeated_enemies_stop_moving() {
        let grid = open_field(5, 5);
        let mut world = World::from_layout(
            level(5),
            grid,
            CellCoord::new(2, 2),
            Vec::new(),
            &[CellCoord::new(2, 3)],
            1,
        );
        let mut events = Vec::new();
        apply(&mut world, Command::Attack, &mut events);

        let moved = ticks(&mut world, 50)
            .iter()
            .any(|event| matches!(event, Event::EnemyAdvanced { .. }));
        assert!(!moved);
        assert_eq!(query::enemy_view(&world)[0].cell, CellCoord::new(2, 3));
    }

    #[test]
    fn tick_advances_clock_and_decays_cooldown() {
        let mut world = World::from_layout(
            level(1),
            open_field(2, 2),
            CellCoord::new(0, 0),
            Vec::new(),
            &[],
            0,
        );
        let mut events = Vec::new();
        apply(&mut world, Command::Attack, &mut events);

        let events = ticks(&mut world, 2);
        assert_eq!(
            events,
            vec![Event::TimeAdvanced { tick: 1 }, Event::TimeAdvanced { tick: 2 }]
        );
        assert_eq!(query::tick_index(&world), 2);
        assert_eq!(query::attack_cooldown(&world), ATTACK_COOLDOWN_TICKS - 2);
    }

    #[test]
    fn collecting_removes_artifact_once() {
        let artifacts = vec![CellCoord::new(1, 0), CellCoord::new(0, 1)];
        let mut world = World::from_layout(
            level(1),
            open_field(2, 2),
            CellCoord::new(0, 0),
            artifacts,
            &[],
            0,
        );
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::CollectArtifact {
                cell: CellCoord::new(1, 0),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::CollectArtifact {
                cell: CellCoord::new(1, 0),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::ArtifactCollected {
                cell: CellCoord::new(1, 0),
                remaining: 1,
            }]
        );
        assert!(!query::artifact_at(&world, CellCoord::new(1, 0)));
        assert!(query::artifact_at(&world, CellCoord::new(0, 1)));
    }

    #[test]
    fn credit_increments_collected_count() {
        let mut world = World::from_layout(
            level(1),
            open_field(2, 2),
            CellCoord::new(0, 0),
            Vec::new(),
            &[],
            0,
        );
        world.set_artifacts_collected(2);
        let mut events = Vec::new();

        apply(&mut world, Command::CreditArtifact, &mut events);

        assert_eq!(events, vec![Event::ArtifactCredited { collected: 3 }]);
        assert_eq!(query::artifacts_collected(&world), 3);
    }
}
