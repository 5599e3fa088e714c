use artifact_maze_core::{Cell, CellCoord, ARTIFACT_COUNT, ATTACK_COOLDOWN_TICKS};
use artifact_maze_system_game_flow::{DefeatCause, GameFlow, Outcome, Phase, Session};
use artifact_maze_system_quiz::PresentedQuestion;
use artifact_maze_world::query;
use glam::Vec2;

use crate::{
    ActorKind, PresentationPort, Rect, RenderingConfig, ScreenLayout, TextSize, TextStyle,
    TileRole,
};

/// Ticks after an attack during which the aura stays visible.
const AURA_TICKS: u32 = 5;

const EDGE_MARGIN: f32 = 10.0;
const LEVEL_TITLE_TOP: f32 = 100.0;
const PANEL_TITLE_TOP: f32 = 150.0;
const PANEL_MESSAGE_TOP: f32 = 220.0;

/// Draws the current game state through a [`PresentationPort`].
#[derive(Clone, Debug)]
pub struct Presenter {
    config: RenderingConfig,
    layout: ScreenLayout,
}

impl Presenter {
    /// Creates a presenter for the provided settings.
    #[must_use]
    pub fn new(config: RenderingConfig) -> Self {
        let layout = ScreenLayout::new(&config);
        Self { config, layout }
    }

    /// Geometry shared with the input router.
    #[must_use]
    pub fn layout(&self) -> &ScreenLayout {
        &self.layout
    }

    /// Draws one frame. `pointer` drives button hover.
    pub fn draw<P>(&self, flow: &GameFlow, pointer: Option<Vec2>, port: &mut P)
    where
        P: PresentationPort + ?Sized,
    {
        port.clear();
        match flow.phase() {
            Phase::LevelSelect => self.draw_level_select(pointer, port),
            Phase::Playing => {
                if let Some(session) = flow.session() {
                    self.draw_session(session, port);
                }
            }
            Phase::QuizPrompt(question) => {
                if let Some(session) = flow.session() {
                    self.draw_session(session, port);
                }
                self.draw_quiz(question, pointer, port);
            }
            Phase::GameOver(outcome) => {
                if let Some(session) = flow.session() {
                    self.draw_session(session, port);
                }
                self.draw_game_over(*outcome, pointer, port);
            }
            Phase::Exited => {}
        }
    }

    fn draw_level_select<P>(&self, pointer: Option<Vec2>, port: &mut P)
    where
        P: PresentationPort + ?Sized,
    {
        let palette = &self.config.palette;
        let title = TextStyle::new(TextSize::Large, palette.contrast);
        self.draw_centered(port, "Choose a difficulty level", LEVEL_TITLE_TOP, title);

        for ((level, rect), tone) in self.layout.level_buttons().zip(palette.level_buttons) {
            let label = format!("Level {level}");
            port.draw_button(rect, &label, tone, is_hovered(rect, pointer));
        }

        let hint = TextStyle::new(TextSize::Small, palette.contrast);
        self.draw_centered(
            port,
            "Higher levels bring more enemies that move faster",
            self.layout.playfield().y - 50.0,
            hint,
        );
    }

    fn draw_session<P>(&self, session: &Session, port: &mut P)
    where
        P: PresentationPort + ?Sized,
    {
        let world = session.world();
        let grid = query::grid(world);
        for row in 0..grid.rows() {
            for column in 0..grid.columns() {
                let cell = CellCoord::new(column, row);
                let role = match grid.cell(cell) {
                    Some(Cell::Open) => TileRole::Open,
                    _ => TileRole::Wall,
                };
                port.fill_tile(cell, role);
            }
        }

        for artifact in query::artifacts(world) {
            port.draw_actor(
                self.layout.actor_origin(*artifact, ActorKind::Artifact),
                ActorKind::Artifact,
            );
        }

        for enemy in query::enemy_view(world).into_iter().filter(|enemy| enemy.alive) {
            port.draw_actor(
                self.layout.actor_origin(enemy.cell, ActorKind::Enemy),
                ActorKind::Enemy,
            );
        }

        let player = query::player_cell(world);
        port.draw_actor(
            self.layout.actor_origin(player, ActorKind::Player),
            ActorKind::Player,
        );
        if query::attack_cooldown(world) > ATTACK_COOLDOWN_TICKS - AURA_TICKS {
            port.draw_attack_aura(self.layout.tile_center(player), self.config.attack_radius);
        }

        self.draw_hud(session, port);
    }

    fn draw_hud<P>(&self, session: &Session, port: &mut P)
    where
        P: PresentationPort + ?Sized,
    {
        let style = TextStyle::new(TextSize::Small, self.config.palette.hud_text);
        let playfield = self.layout.playfield();

        let collected = query::artifacts_collected(session.world());
        let artifacts = format!("Artifacts: {collected}/{ARTIFACT_COUNT}");
        port.draw_text(&artifacts, Vec2::splat(EDGE_MARGIN), style);

        let hint = "Space - attack";
        let width = port.measure_text(hint, style).x;
        port.draw_text(
            hint,
            Vec2::new(playfield.x - width - EDGE_MARGIN, EDGE_MARGIN),
            style,
        );

        let level = format!("Level: {}", session.level());
        let width = port.measure_text(&level, style).x;
        port.draw_text(
            &level,
            Vec2::new(playfield.x - width - EDGE_MARGIN, playfield.y - 30.0),
            style,
        );
    }

    fn draw_quiz<P>(&self, question: &PresentedQuestion, pointer: Option<Vec2>, port: &mut P)
    where
        P: PresentationPort + ?Sized,
    {
        port.draw_overlay_panel(self.config.overlay_alpha);
        let style = TextStyle::new(TextSize::Medium, self.config.palette.overlay_text);
        self.draw_centered(port, question.prompt(), PANEL_TITLE_TOP, style);

        for (index, answer) in question.answers().iter().enumerate() {
            let rect = self.layout.answer_button(index);
            port.draw_button(
                rect,
                answer,
                self.config.palette.answer_button,
                is_hovered(rect, pointer),
            );
        }
    }

    fn draw_game_over<P>(&self, outcome: Outcome, pointer: Option<Vec2>, port: &mut P)
    where
        P: PresentationPort + ?Sized,
    {
        let palette = &self.config.palette;
        port.draw_overlay_panel(self.config.overlay_alpha);

        let (title, message) = outcome_text(outcome);
        let title_style = TextStyle::new(TextSize::Large, palette.overlay_text);
        self.draw_centered(port, title, PANEL_TITLE_TOP, title_style);
        let message_style = TextStyle::new(TextSize::Medium, palette.overlay_text);
        self.draw_centered(port, message, PANEL_MESSAGE_TOP, message_style);

        let restart = self.layout.restart_button();
        port.draw_button(
            restart,
            "Start over",
            palette.restart_button,
            is_hovered(restart, pointer),
        );
        let exit = self.layout.exit_button();
        port.draw_button(exit, "Exit game", palette.exit_button, is_hovered(exit, pointer));
    }

    fn draw_centered<P>(&self, port: &mut P, content: &str, top: f32, style: TextStyle)
    where
        P: PresentationPort + ?Sized,
    {
        let width = port.measure_text(content, style).x;
        let left = (self.layout.playfield().x - width) * 0.5;
        port.draw_text(content, Vec2::new(left, top), style);
    }
}

fn is_hovered(rect: Rect, pointer: Option<Vec2>) -> bool {
    pointer.is_some_and(|position| rect.contains(position))
}

fn outcome_text(outcome: Outcome) -> (&'static str, &'static str) {
    match outcome {
        Outcome::Victory => ("Congratulations!", "You won!"),
        Outcome::Defeat(DefeatCause::WrongAnswer) => ("Game over", "Wrong answer!"),
        Outcome::Defeat(DefeatCause::CaughtByEnemy) => ("Game over", "An enemy caught you!"),
    }
}
