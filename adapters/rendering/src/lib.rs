#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Artifact Maze adapters.
//!
//! Backends implement the three ports ([`PresentationPort`], [`InputPort`],
//! [`AudioPort`]) plus [`RenderingBackend`]. Everything that decides *what*
//! appears on screen lives in [`Presenter`] and [`InputRouter`], so the same
//! frame logic runs against a window or a recording port in tests.

mod input;
mod layout;
mod presenter;

use std::time::Duration;

use anyhow::Result as AnyResult;
use artifact_maze_core::{
    AudioCue, CellCoord, ACTOR_SIZE, ARTIFACT_SIZE, ATTACK_RADIUS, PLAYFIELD_HEIGHT,
    PLAYFIELD_WIDTH, TILE_SIZE, WINDOW_TITLE,
};
use artifact_maze_system_game_flow::Flow;
use glam::Vec2;

pub use crate::{
    input::InputRouter,
    layout::{Rect, ScreenLayout},
    presenter::Presenter,
};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with a different alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }
}

/// Fill and hover colors of a button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonTone {
    /// Fill while the pointer is elsewhere.
    pub fill: Color,
    /// Fill while the pointer hovers the button.
    pub hover: Color,
}

impl ButtonTone {
    /// Creates a tone from its two fills.
    #[must_use]
    pub const fn new(fill: Color, hover: Color) -> Self {
        Self { fill, hover }
    }

    /// Fill matching the hover state.
    #[must_use]
    pub const fn resolve(&self, hovered: bool) -> Color {
        if hovered {
            self.hover
        } else {
            self.fill
        }
    }
}

/// Colors used across every screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    /// Background of every screen and outline of open tiles.
    pub background: Color,
    /// Wall tiles, button outlines, and level-select text.
    pub contrast: Color,
    /// Heads-up display text.
    pub hud_text: Color,
    /// Text drawn on top of the dimming overlay.
    pub overlay_text: Color,
    /// Player square.
    pub player: Color,
    /// Enemy squares.
    pub enemy: Color,
    /// Artifact discs.
    pub artifact: Color,
    /// Translucent disc shown while the attack is fresh.
    pub attack_aura: Color,
    /// Dimming overlay before alpha is applied.
    pub overlay: Color,
    /// Level buttons from easiest to hardest.
    pub level_buttons: [ButtonTone; 5],
    /// Quiz answer buttons.
    pub answer_button: ButtonTone,
    /// Restart button on the game-over screen.
    pub restart_button: ButtonTone,
    /// Exit button on the game-over screen.
    pub exit_button: ButtonTone,
}

impl Default for Palette {
    fn default() -> Self {
        let yellow = Color::from_rgb_u8(255, 255, 0);
        let level =
            |red, green, blue| ButtonTone::new(Color::from_rgb_u8(red, green, blue), yellow);
        Self {
            background: Color::from_rgb_u8(198, 255, 202),
            contrast: Color::from_rgb_u8(51, 113, 41),
            hud_text: Color::from_rgb_u8(67, 130, 255),
            overlay_text: Color::from_rgb_u8(198, 255, 202),
            player: Color::from_rgb_u8(255, 0, 0),
            enemy: Color::from_rgb_u8(128, 0, 128),
            artifact: Color::from_rgb_u8(0, 255, 0),
            attack_aura: yellow.with_alpha(100.0 / 255.0),
            overlay: Color::from_rgb_u8(0, 0, 0),
            level_buttons: [
                level(45, 252, 101),
                level(151, 252, 43),
                level(215, 247, 9),
                level(248, 141, 41),
                level(253, 0, 0),
            ],
            answer_button: ButtonTone::new(Color::from_rgb_u8(173, 216, 230), yellow),
            restart_button: ButtonTone::new(
                Color::from_rgb_u8(0, 255, 0),
                Color::from_rgb_u8(0, 150, 0),
            ),
            exit_button: ButtonTone::new(
                Color::from_rgb_u8(255, 0, 0),
                Color::from_rgb_u8(150, 0, 0),
            ),
        }
    }
}

/// Relative text sizes used by the screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextSize {
    /// HUD, hints, and button labels.
    Small,
    /// Quiz prompts and game-over messages.
    Medium,
    /// Screen titles.
    Large,
}

/// Pixel sizes assigned to each [`TextSize`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSizes {
    /// Size of [`TextSize::Small`] text.
    pub small: f32,
    /// Size of [`TextSize::Medium`] text.
    pub medium: f32,
    /// Size of [`TextSize::Large`] text.
    pub large: f32,
}

impl FontSizes {
    /// Pixel size of the provided text size.
    #[must_use]
    pub const fn resolve(&self, size: TextSize) -> f32 {
        match size {
            TextSize::Small => self.small,
            TextSize::Medium => self.medium,
            TextSize::Large => self.large,
        }
    }
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            small: 24.0,
            medium: 36.0,
            large: 48.0,
        }
    }
}

/// Size and color of a line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Relative size of the text.
    pub size: TextSize,
    /// Color of the glyphs.
    pub color: Color,
}

impl TextStyle {
    /// Creates a text style.
    #[must_use]
    pub const fn new(size: TextSize, color: Color) -> Self {
        Self { size, color }
    }
}

/// Immutable presentation settings built once at start-up.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderingConfig {
    /// Title used by the created window.
    pub window_title: String,
    /// Width and height of the play field in pixels.
    pub playfield: Vec2,
    /// Side length of a maze tile in pixels.
    pub tile_size: f32,
    /// Side length of the player and enemy squares.
    pub actor_size: f32,
    /// Diameter of an artifact disc.
    pub artifact_size: f32,
    /// Radius of the attack aura.
    pub attack_radius: f32,
    /// Opacity of the dimming overlay behind quiz and game-over panels.
    pub overlay_alpha: f32,
    /// Font sizes in pixels.
    pub fonts: FontSizes,
    /// Colors for every screen.
    pub palette: Palette,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            window_title: WINDOW_TITLE.to_owned(),
            playfield: Vec2::new(PLAYFIELD_WIDTH as f32, PLAYFIELD_HEIGHT as f32),
            tile_size: TILE_SIZE as f32,
            actor_size: ACTOR_SIZE as f32,
            artifact_size: ARTIFACT_SIZE as f32,
            attack_radius: ATTACK_RADIUS,
            overlay_alpha: 180.0 / 255.0,
            fonts: FontSizes::default(),
            palette: Palette::default(),
        }
    }
}

/// Role of a maze tile when drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileRole {
    /// Solid wall.
    Wall,
    /// Walkable floor.
    Open,
}

/// Sprite kinds drawn on top of the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActorKind {
    /// The player avatar.
    Player,
    /// A live enemy.
    Enemy,
    /// An uncollected artifact.
    Artifact,
}

/// Drawing surface exposed by a backend.
///
/// Positions are pixel coordinates with the origin at the top-left corner of
/// the window. Implementations resolve tile and actor colors from their own
/// [`RenderingConfig`].
pub trait PresentationPort {
    /// Clears the frame to the background color.
    fn clear(&mut self);

    /// Draws the tile occupying `cell`.
    fn fill_tile(&mut self, cell: CellCoord, role: TileRole);

    /// Draws an actor whose bounding box starts at `origin`.
    fn draw_actor(&mut self, origin: Vec2, kind: ActorKind);

    /// Draws the translucent attack disc.
    fn draw_attack_aura(&mut self, center: Vec2, radius: f32);

    /// Dims the whole frame with the overlay color at `alpha`.
    fn draw_overlay_panel(&mut self, alpha: f32);

    /// Draws text whose bounding box starts at `origin`.
    fn draw_text(&mut self, content: &str, origin: Vec2, style: TextStyle);

    /// Width and height `content` would occupy when drawn with `style`.
    fn measure_text(&self, content: &str, style: TextStyle) -> Vec2;

    /// Draws a labelled button.
    fn draw_button(&mut self, rect: Rect, label: &str, tone: ButtonTone, hovered: bool);
}

/// Keys the game reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Step north.
    Up,
    /// Step south.
    Down,
    /// Step west.
    Left,
    /// Step east.
    Right,
    /// Fire the area attack.
    Attack,
}

/// Discrete input delivered by a backend each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// The window was closed or the quit key pressed.
    Quit,
    /// The pointer moved to a new pixel position.
    PointerMoved(Vec2),
    /// The primary button was pressed at a pixel position.
    PointerClicked(Vec2),
    /// A game key was pressed.
    KeyPressed(Key),
}

/// Source of input events.
pub trait InputPort {
    /// Returns every event observed since the previous poll.
    fn poll(&mut self) -> Vec<InputEvent>;
}

/// Sink for audio cues.
pub trait AudioPort {
    /// Plays the provided cue, or ignores it when no device is available.
    fn play(&mut self, cue: AudioCue);
}

/// Ports handed to the frame callback.
pub struct Frame<'a> {
    /// Wall-clock time elapsed since the previous frame.
    pub dt: Duration,
    /// Input gathered for this frame.
    pub input: &'a mut dyn InputPort,
    /// Surface to draw the frame on.
    pub presentation: &'a mut dyn PresentationPort,
    /// Audio sink for this frame's cues.
    pub audio: &'a mut dyn AudioPort,
}

/// Rendering backend capable of running the Artifact Maze frame loop.
pub trait RenderingBackend {
    /// Runs the backend until the frame callback returns [`Flow::Exit`].
    fn run<F>(self, config: RenderingConfig, frame: F) -> AnyResult<()>
    where
        F: FnMut(Frame<'_>) -> Flow + 'static;
}
