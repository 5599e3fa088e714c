#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Artifact Maze engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the game-flow system. The game flow submits
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then reports [`Event`] values
//! describing what actually changed. Every timer in the simulation is a tick
//! counter, so replaying the same commands against the same seed reproduces
//! the same event stream.

use std::{error::Error, fmt};

use serde::{Deserialize, Serialize};

/// Title shown by adapters when the window opens.
pub const WINDOW_TITLE: &str = "Artifact Maze";

/// Width of the play field measured in world units (pixels at scale 1).
pub const PLAYFIELD_WIDTH: u32 = 800;

/// Height of the play field measured in world units.
pub const PLAYFIELD_HEIGHT: u32 = 600;

/// Side length of a single maze tile measured in world units.
pub const TILE_SIZE: u32 = 40;

/// Number of tile columns in the fixed play field.
pub const GRID_COLUMNS: u32 = PLAYFIELD_WIDTH / TILE_SIZE;

/// Number of tile rows in the fixed play field.
pub const GRID_ROWS: u32 = PLAYFIELD_HEIGHT / TILE_SIZE;

/// Edge length of the player and enemy sprites in world units.
pub const ACTOR_SIZE: u32 = 30;

/// Edge length of the artifact sprite in world units.
pub const ARTIFACT_SIZE: u32 = 20;

/// Radius of the player's area attack measured in world units.
pub const ATTACK_RADIUS: f32 = 50.0;

/// Ticks that must elapse after an attack before another one may fire.
pub const ATTACK_COOLDOWN_TICKS: u32 = 20;

/// Number of artifacts scattered through every maze.
pub const ARTIFACT_COUNT: usize = 3;

/// Nominal simulation rate of the game loop.
pub const TICKS_PER_SECOND: u32 = 60;

/// Shortest run an enemy commits to before reconsidering its heading.
pub const MIN_RUN_LENGTH: u32 = 1;

/// Longest run an enemy commits to before reconsidering its heading.
pub const MAX_RUN_LENGTH: u32 = 3;

/// Step threshold applied to levels without an explicit speed entry.
pub const DEFAULT_STEP_THRESHOLD: u32 = 15;

/// Attack radius expressed in cell units.
#[must_use]
pub fn attack_radius_in_cells() -> f32 {
    ATTACK_RADIUS / TILE_SIZE as f32
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that the player move one cell in the provided direction.
    StepPlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that the player trigger the area attack.
    Attack,
    /// Advances the simulation by a single tick.
    Tick,
    /// Removes the artifact lying on the provided cell from the maze.
    CollectArtifact {
        /// Cell holding the artifact being picked up.
        cell: CellCoord,
    },
    /// Credits the player with one validated artifact.
    CreditArtifact,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Index of the tick that just completed.
        tick: u64,
    },
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after the move.
        to: CellCoord,
    },
    /// Confirms that the player's attack fired.
    AttackFired {
        /// Enemies defeated by the blast, in identifier order.
        defeated: Vec<EnemyId>,
    },
    /// Reports that an attack was requested while still cooling down.
    AttackRejected {
        /// Ticks remaining before the next attack becomes available.
        cooldown_remaining: u32,
    },
    /// Confirms that an enemy moved between two cells.
    EnemyAdvanced {
        /// Identifier of the enemy that advanced.
        enemy: EnemyId,
        /// Cell the enemy occupied before moving.
        from: CellCoord,
        /// Cell the enemy occupies after moving.
        to: CellCoord,
    },
    /// Announces that an enemy was defeated and stopped roaming.
    EnemyDefeated {
        /// Identifier of the defeated enemy.
        enemy: EnemyId,
    },
    /// Confirms that an artifact was removed from the maze.
    ArtifactCollected {
        /// Cell the artifact occupied.
        cell: CellCoord,
        /// Number of artifacts still lying in the maze.
        remaining: usize,
    },
    /// Confirms that the player was credited with an artifact.
    ArtifactCredited {
        /// Total artifacts credited to the player so far.
        collected: u32,
    },
}

/// Audio feedback requested by the simulation.
///
/// Playback is an adapter concern; adapters without a sound device may
/// ignore cues entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// Background theme started once at start-up.
    Theme,
    /// A menu button was pressed.
    Click,
    /// The player's attack fired.
    Attack,
    /// The session ended in victory.
    Victory,
    /// The session ended in defeat.
    Defeat,
}

/// Content of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Impassable cell.
    Wall,
    /// Walkable cell.
    Open,
}

/// Cardinal movement directions available to actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in a fixed, deterministic order.
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::South,
        Direction::North,
    ];

    /// Column and row offsets of a single step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the cell `distance` steps away in `direction`, provided it lies
    /// inside a grid of `columns` by `rows` cells.
    #[must_use]
    pub fn offset_by(
        self,
        direction: Direction,
        distance: u32,
        columns: u32,
        rows: u32,
    ) -> Option<CellCoord> {
        let (dx, dy) = direction.offset();
        let column = i64::from(self.column) + dx * i64::from(distance);
        let row = i64::from(self.row) + dy * i64::from(distance);
        if column < 0 || row < 0 || column >= i64::from(columns) || row >= i64::from(rows) {
            return None;
        }

        Some(CellCoord::new(
            u32::try_from(column).ok()?,
            u32::try_from(row).ok()?,
        ))
    }

    /// Returns the adjacent cell in `direction` when it lies inside the grid.
    #[must_use]
    pub fn step(self, direction: Direction, columns: u32, rows: u32) -> Option<CellCoord> {
        self.offset_by(direction, 1, columns, rows)
    }

    /// Computes the straight-line distance between two cells in cell units.
    #[must_use]
    pub fn euclidean_distance(self, other: CellCoord) -> f32 {
        let dx = self.column.abs_diff(other.column) as f32;
        let dy = self.row.abs_diff(other.row) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Difficulty level chosen on the level-select screen.
///
/// The level doubles as the enemy count and selects how many ticks an enemy
/// waits between steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    /// Lowest selectable level.
    pub const MIN: u8 = 1;

    /// Highest selectable level.
    pub const MAX: u8 = 5;

    /// Creates a level when `value` lies within the selectable range.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Every selectable level in ascending order.
    pub fn all() -> impl Iterator<Item = Level> {
        (Self::MIN..=Self::MAX).map(Level)
    }

    /// Numeric value of the level.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Number of enemies roaming a maze at this level.
    #[must_use]
    pub const fn enemy_count(&self) -> usize {
        self.0 as usize
    }

    /// Ticks an enemy accumulates before taking a step at this level.
    #[must_use]
    pub const fn enemy_step_threshold(&self) -> u32 {
        step_threshold_for(self.0)
    }
}

impl TryFrom<u8> for Level {
    type Error = InvalidLevel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Level::new(value).ok_or(InvalidLevel { value })
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps a raw level value to the enemy step threshold.
///
/// Higher levels step more often; values outside the table fall back to
/// [`DEFAULT_STEP_THRESHOLD`].
#[must_use]
pub const fn step_threshold_for(level: u8) -> u32 {
    match level {
        1 => 25,
        2 => 20,
        3 => 15,
        4 => 10,
        5 => 5,
        _ => DEFAULT_STEP_THRESHOLD,
    }
}

/// Error returned when a raw value does not name a selectable level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidLevel {
    value: u8,
}

impl InvalidLevel {
    /// Raw value that failed validation.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }
}

impl fmt::Display for InvalidLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "level must lie within {}..={} (received {})",
            Level::MIN,
            Level::MAX,
            self.value
        )
    }
}

impl Error for InvalidLevel {}
