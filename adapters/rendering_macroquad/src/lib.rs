#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Artifact Maze.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment, so
//! the crate depends on macroquad without its default `audio` feature. Audio
//! cues therefore go to [`SilentAudio`], which only logs them.
//!
//! Every port operation is drawn with primitive shapes; the adapter ships no
//! textures or fonts beyond macroquad's built-in one.

use std::time::Duration;

use anyhow::Result;
use artifact_maze_core::{AudioCue, CellCoord};
use artifact_maze_rendering::{
    ActorKind, AudioPort, ButtonTone, Color, Frame, InputEvent, InputPort, Key, PresentationPort,
    Rect, RenderingBackend, RenderingConfig, TextSize, TextStyle, TileRole,
};
use artifact_maze_system_game_flow::Flow;
use glam::Vec2;
use macroquad::{
    input::{is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton},
    shapes::{draw_circle, draw_rectangle, draw_rectangle_lines},
    text::{draw_text, measure_text},
};

const BUTTON_OUTLINE: f32 = 2.0;
const TILE_OUTLINE: f32 = 1.0;

const KEY_BINDINGS: [(KeyCode, Key); 5] = [
    (KeyCode::Up, Key::Up),
    (KeyCode::Down, Key::Down),
    (KeyCode::Left, Key::Left),
    (KeyCode::Right, Key::Right),
    (KeyCode::Space, Key::Attack),
];

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.swap_interval = Some(i32::from(enabled));
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, config: RenderingConfig, mut frame: F) -> Result<()>
    where
        F: FnMut(Frame<'_>) -> Flow + 'static,
    {
        let mut window = macroquad::window::Conf {
            window_title: config.window_title.clone(),
            window_width: config.playfield.x.round() as i32,
            window_height: config.playfield.y.round() as i32,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = self.swap_interval {
            window.platform.swap_interval = Some(swap_interval);
        }

        let mut canvas = MacroquadCanvas::new(config);
        macroquad::Window::from_config(window, async move {
            let mut input = MacroquadInput::default();
            let mut audio = SilentAudio;

            loop {
                let dt_seconds = macroquad::time::get_frame_time();
                let flow = frame(Frame {
                    dt: Duration::from_secs_f32(dt_seconds.max(0.0)),
                    input: &mut input,
                    presentation: &mut canvas,
                    audio: &mut audio,
                });
                if flow == Flow::Exit {
                    tracing::info!("frame loop finished");
                    break;
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Presentation port drawing primitive shapes with macroquad.
#[derive(Debug)]
struct MacroquadCanvas {
    config: RenderingConfig,
}

impl MacroquadCanvas {
    fn new(config: RenderingConfig) -> Self {
        Self { config }
    }

    fn text_metrics(
        &self,
        content: &str,
        style: TextStyle,
    ) -> (f32, macroquad::text::TextDimensions) {
        let size = self.config.fonts.resolve(style.size);
        (size, measure_text(content, None, font_px(size), 1.0))
    }
}

impl PresentationPort for MacroquadCanvas {
    fn clear(&mut self) {
        macroquad::window::clear_background(to_macroquad_color(self.config.palette.background));
    }

    fn fill_tile(&mut self, cell: CellCoord, role: TileRole) {
        let tile = self.config.tile_size;
        let x = cell.column() as f32 * tile;
        let y = cell.row() as f32 * tile;
        match role {
            TileRole::Wall => {
                let wall = to_macroquad_color(self.config.palette.contrast);
                draw_rectangle(x, y, tile, tile, wall);
            }
            TileRole::Open => draw_rectangle_lines(
                x,
                y,
                tile,
                tile,
                TILE_OUTLINE,
                to_macroquad_color(self.config.palette.background),
            ),
        }
    }

    fn draw_actor(&mut self, origin: Vec2, kind: ActorKind) {
        let palette = &self.config.palette;
        match kind {
            ActorKind::Player | ActorKind::Enemy => {
                let fill = if kind == ActorKind::Player {
                    palette.player
                } else {
                    palette.enemy
                };
                let size = self.config.actor_size;
                draw_rectangle(origin.x, origin.y, size, size, to_macroquad_color(fill));
            }
            ActorKind::Artifact => {
                let radius = self.config.artifact_size * 0.5;
                draw_circle(
                    origin.x + radius,
                    origin.y + radius,
                    radius,
                    to_macroquad_color(palette.artifact),
                );
            }
        }
    }

    fn draw_attack_aura(&mut self, center: Vec2, radius: f32) {
        draw_circle(
            center.x,
            center.y,
            radius,
            to_macroquad_color(self.config.palette.attack_aura),
        );
    }

    fn draw_overlay_panel(&mut self, alpha: f32) {
        let overlay = self.config.palette.overlay.with_alpha(alpha);
        draw_rectangle(
            0.0,
            0.0,
            self.config.playfield.x,
            self.config.playfield.y,
            to_macroquad_color(overlay),
        );
    }

    fn draw_text(&mut self, content: &str, origin: Vec2, style: TextStyle) {
        let (size, dimensions) = self.text_metrics(content, style);
        draw_text(
            content,
            origin.x,
            origin.y + dimensions.offset_y,
            size,
            to_macroquad_color(style.color),
        );
    }

    fn measure_text(&self, content: &str, style: TextStyle) -> Vec2 {
        let (_, dimensions) = self.text_metrics(content, style);
        Vec2::new(dimensions.width, dimensions.height)
    }

    fn draw_button(&mut self, rect: Rect, label: &str, tone: ButtonTone, hovered: bool) {
        let outline = self.config.palette.contrast;
        draw_rectangle(
            rect.origin.x,
            rect.origin.y,
            rect.size.x,
            rect.size.y,
            to_macroquad_color(tone.resolve(hovered)),
        );
        draw_rectangle_lines(
            rect.origin.x,
            rect.origin.y,
            rect.size.x,
            rect.size.y,
            BUTTON_OUTLINE,
            to_macroquad_color(outline),
        );

        let style = TextStyle::new(TextSize::Small, outline);
        let extent = self.measure_text(label, style);
        let origin = rect.center() - extent * 0.5;
        self.draw_text(label, origin, style);
    }
}

/// Input port polling macroquad's keyboard and mouse state.
#[derive(Debug, Default)]
struct MacroquadInput {
    pointer: Option<Vec2>,
}

impl InputPort for MacroquadInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if is_key_pressed(KeyCode::Escape) {
            events.push(InputEvent::Quit);
        }

        let (x, y) = mouse_position();
        let pointer = Vec2::new(x, y);
        if self.pointer != Some(pointer) {
            self.pointer = Some(pointer);
            events.push(InputEvent::PointerMoved(pointer));
        }
        if is_mouse_button_pressed(MouseButton::Left) {
            events.push(InputEvent::PointerClicked(pointer));
        }

        events.extend(
            KEY_BINDINGS
                .iter()
                .filter(|(code, _)| is_key_pressed(*code))
                .map(|(_, key)| InputEvent::KeyPressed(*key)),
        );
        events
    }
}

/// Audio port used when no sound device is compiled in; cues are logged and
/// dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAudio;

impl AudioPort for SilentAudio {
    fn play(&mut self, cue: AudioCue) {
        tracing::debug!(?cue, "audio cue skipped");
    }
}

fn font_px(size: f32) -> u16 {
    size.round().clamp(1.0, f32::from(u16::MAX)) as u16
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
