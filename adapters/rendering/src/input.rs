use artifact_maze_core::Direction;
use artifact_maze_system_game_flow::{Intent, Phase};
use glam::Vec2;

use crate::{InputEvent, Key, ScreenLayout};

/// Translates raw input into intents for the current phase.
#[derive(Clone, Debug)]
pub struct InputRouter {
    layout: ScreenLayout,
    pointer: Option<Vec2>,
}

impl InputRouter {
    /// Creates a router hit-testing against `layout`.
    #[must_use]
    pub fn new(layout: ScreenLayout) -> Self {
        Self {
            layout,
            pointer: None,
        }
    }

    /// Last known pointer position, used for button hover.
    #[must_use]
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Maps one event to an intent; events with no meaning in `phase` yield
    /// `None`.
    pub fn route(&mut self, phase: &Phase, event: InputEvent) -> Option<Intent> {
        match event {
            InputEvent::Quit => Some(Intent::Quit),
            InputEvent::PointerMoved(position) => {
                self.pointer = Some(position);
                None
            }
            InputEvent::PointerClicked(position) => {
                self.pointer = Some(position);
                self.click(phase, position)
            }
            InputEvent::KeyPressed(key) => match phase {
                Phase::Playing => Some(key_intent(key)),
                _ => None,
            },
        }
    }

    fn click(&self, phase: &Phase, position: Vec2) -> Option<Intent> {
        match phase {
            Phase::LevelSelect => self
                .layout
                .level_button_at(position)
                .map(Intent::SelectLevel),
            Phase::QuizPrompt(question) => self
                .layout
                .answer_button_at(position, question.answers().len())
                .map(Intent::Answer),
            Phase::GameOver(_) => {
                if self.layout.restart_button().contains(position) {
                    Some(Intent::Restart)
                } else if self.layout.exit_button().contains(position) {
                    Some(Intent::Exit)
                } else {
                    None
                }
            }
            Phase::Playing | Phase::Exited => None,
        }
    }
}

fn key_intent(key: Key) -> Intent {
    match key {
        Key::Up => Intent::Move(Direction::North),
        Key::Down => Intent::Move(Direction::South),
        Key::Left => Intent::Move(Direction::West),
        Key::Right => Intent::Move(Direction::East),
        Key::Attack => Intent::Attack,
    }
}
