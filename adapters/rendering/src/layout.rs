use artifact_maze_core::{CellCoord, Level};
use glam::Vec2;

use crate::{ActorKind, RenderingConfig};

/// Axis-aligned rectangle in pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    /// Reports whether `point` lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let end = self.origin + self.size;
        point.x >= self.origin.x && point.y >= self.origin.y && point.x <= end.x && point.y <= end.y
    }
}

const LEVEL_BUTTON_SIZE: Vec2 = Vec2::new(200.0, 50.0);
const WIDE_BUTTON_SIZE: Vec2 = Vec2::new(300.0, 50.0);
const BUTTON_COLUMN_TOP: f32 = 200.0;
const BUTTON_PITCH: f32 = 70.0;

/// Pixel geometry of every screen, derived from a [`RenderingConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenLayout {
    playfield: Vec2,
    tile_size: f32,
    actor_size: f32,
    artifact_size: f32,
}

impl ScreenLayout {
    /// Derives the layout from the presentation settings.
    #[must_use]
    pub fn new(config: &RenderingConfig) -> Self {
        Self {
            playfield: config.playfield,
            tile_size: config.tile_size,
            actor_size: config.actor_size,
            artifact_size: config.artifact_size,
        }
    }

    /// Width and height of the play field.
    #[must_use]
    pub const fn playfield(&self) -> Vec2 {
        self.playfield
    }

    /// Top-left corner of the tile at `cell`.
    #[must_use]
    pub fn tile_origin(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(cell.column() as f32, cell.row() as f32) * self.tile_size
    }

    /// Center of the tile at `cell`.
    #[must_use]
    pub fn tile_center(&self, cell: CellCoord) -> Vec2 {
        self.tile_origin(cell) + Vec2::splat(self.tile_size * 0.5)
    }

    /// Top-left corner of an actor sprite centered in the tile at `cell`.
    #[must_use]
    pub fn actor_origin(&self, cell: CellCoord, kind: ActorKind) -> Vec2 {
        let size = match kind {
            ActorKind::Player | ActorKind::Enemy => self.actor_size,
            ActorKind::Artifact => self.artifact_size,
        };
        let inset = ((self.tile_size - size) * 0.5).floor();
        self.tile_origin(cell) + Vec2::splat(inset)
    }

    /// Button for the level at zero-based `index` on the level-select screen.
    #[must_use]
    pub fn level_button(&self, index: usize) -> Rect {
        self.column_button(index, LEVEL_BUTTON_SIZE)
    }

    /// Every level paired with its button.
    pub fn level_buttons(&self) -> impl Iterator<Item = (Level, Rect)> + '_ {
        Level::all()
            .enumerate()
            .map(|(index, level)| (level, self.level_button(index)))
    }

    /// Level whose button contains `point`.
    #[must_use]
    pub fn level_button_at(&self, point: Vec2) -> Option<Level> {
        self.level_buttons()
            .find(|(_, rect)| rect.contains(point))
            .map(|(level, _)| level)
    }

    /// Button for the displayed answer at `index`.
    #[must_use]
    pub fn answer_button(&self, index: usize) -> Rect {
        self.column_button(index, WIDE_BUTTON_SIZE)
    }

    /// Index of the answer button containing `point`, among `count` answers.
    #[must_use]
    pub fn answer_button_at(&self, point: Vec2, count: usize) -> Option<usize> {
        (0..count).find(|index| self.answer_button(*index).contains(point))
    }

    /// Restart button on the game-over screen.
    #[must_use]
    pub fn restart_button(&self) -> Rect {
        self.centered_button(self.playfield.y * 0.5 + 50.0)
    }

    /// Exit button on the game-over screen.
    #[must_use]
    pub fn exit_button(&self) -> Rect {
        self.centered_button(self.playfield.y * 0.5 + 120.0)
    }

    fn column_button(&self, index: usize, size: Vec2) -> Rect {
        let top = BUTTON_COLUMN_TOP + BUTTON_PITCH * index as f32;
        Rect::new(self.playfield.x * 0.5 - size.x * 0.5, top, size.x, size.y)
    }

    fn centered_button(&self, top: f32) -> Rect {
        Rect::new(
            self.playfield.x * 0.5 - WIDE_BUTTON_SIZE.x * 0.5,
            top,
            WIDE_BUTTON_SIZE.x,
            WIDE_BUTTON_SIZE.y,
        )
    }
}
