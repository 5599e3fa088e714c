#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game state machine that sequences level selection, play, quizzes, and
//! the game-over screen.
//!
//! Adapters translate raw input into [`Intent`] values and feed them through
//! [`GameFlow::handle`]; the fixed-rate loop calls [`GameFlow::tick`] once per
//! simulation step. Only the `Playing` phase advances the world.

mod clock;
mod session;

use artifact_maze_core::{AudioCue, Command, Direction, Event, Level, ARTIFACT_COUNT};
use artifact_maze_system_quiz::{PresentedQuestion, QuestionSet};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::session::Resolution;

pub use crate::{
    clock::{FixedStep, MAX_CATCH_UP_TICKS},
    session::Session,
};

/// Phase currently driving input handling and presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the player to pick a level.
    LevelSelect,
    /// The world advances every tick.
    Playing,
    /// A question guards the artifact that was just picked up.
    QuizPrompt(PresentedQuestion),
    /// The session ended; waiting for restart or exit.
    GameOver(Outcome),
    /// The player asked to leave; the loop should stop.
    Exited,
}

impl Phase {
    fn label(&self) -> &'static str {
        match self {
            Self::LevelSelect => "level_select",
            Self::Playing => "playing",
            Self::QuizPrompt(_) => "quiz_prompt",
            Self::GameOver(_) => "game_over",
            Self::Exited => "exited",
        }
    }
}

/// Result of a finished session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every artifact was collected.
    Victory,
    /// The session was lost.
    Defeat(DefeatCause),
}

/// Reason a session was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefeatCause {
    /// A live enemy reached the player's cell.
    CaughtByEnemy,
    /// A quiz question was answered incorrectly.
    WrongAnswer,
}

/// Player intent decoded from raw input by an adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Start a session at the given level.
    SelectLevel(Level),
    /// Step one cell in a direction.
    Move(Direction),
    /// Fire the area attack.
    Attack,
    /// Choose the displayed answer at this index.
    Answer(usize),
    /// Return to level selection after a game over.
    Restart,
    /// Leave the game from the game-over screen.
    Exit,
    /// Leave the game from any phase.
    Quit,
}

/// Signal returned to the loop after each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Keep running.
    Continue,
    /// Stop the loop and release adapter resources.
    Exit,
}

/// Start-up parameters of the state machine.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Seed of the master generator that seeds every session.
    pub seed: u64,
    /// Question set every session draws its bank from.
    pub questions: QuestionSet,
}

/// Owns the phase, the active session, and pending audio cues.
#[derive(Debug)]
pub struct GameFlow {
    questions: QuestionSet,
    seeds: ChaCha8Rng,
    phase: Phase,
    session: Option<Session>,
    buffered: Option<Command>,
    cues: Vec<AudioCue>,
    events: Vec<Event>,
}

impl GameFlow {
    /// Creates the state machine in `LevelSelect` and queues the theme.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        tracing::info!(
            seed = config.seed,
            questions = config.questions.len(),
            "game flow ready"
        );
        Self {
            questions: config.questions,
            seeds: ChaCha8Rng::seed_from_u64(config.seed),
            phase: Phase::LevelSelect,
            session: None,
            buffered: None,
            cues: vec![AudioCue::Theme],
            events: Vec::new(),
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Active session, kept through quiz and game-over screens.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// World events produced by the most recent tick or answer.
    #[must_use]
    pub fn last_events(&self) -> &[Event] {
        &self.events
    }

    /// Removes and yields the audio cues queued since the last call.
    pub fn drain_cues(&mut self) -> impl Iterator<Item = AudioCue> + '_ {
        self.cues.drain(..)
    }

    /// Installs a prepared session and switches to `Playing`.
    pub fn resume(&mut self, session: Session) {
        self.session = Some(session);
        self.buffered = None;
        self.enter(Phase::Playing);
    }

    /// Processes one intent and reports whether the current phase accepted it.
    pub fn handle(&mut self, intent: Intent) -> bool {
        let accepted = match (&self.phase, intent) {
            (Phase::Exited, _) => false,
            (_, Intent::Quit) => {
                self.enter(Phase::Exited);
                true
            }
            (Phase::LevelSelect, Intent::SelectLevel(level)) => self.start_session(level),
            (Phase::Playing, Intent::Move(direction)) => {
                self.buffered = Some(Command::StepPlayer { direction });
                true
            }
            (Phase::Playing, Intent::Attack) => {
                self.buffered = Some(Command::Attack);
                true
            }
            (Phase::QuizPrompt(_), Intent::Answer(index)) => self.answer(index),
            (Phase::GameOver(_), Intent::Restart) => {
                self.cues.push(AudioCue::Click);
                self.session = None;
                self.enter(Phase::LevelSelect);
                true
            }
            (Phase::GameOver(_), Intent::Exit) => {
                self.cues.push(AudioCue::Click);
                self.enter(Phase::Exited);
                true
            }
            _ => false,
        };

        if !accepted {
            tracing::debug!(phase = self.phase.label(), ?intent, "intent ignored");
        }
        accepted
    }

    /// Advances the simulation by one tick when a session is playing.
    pub fn tick(&mut self) -> Flow {
        match self.phase {
            Phase::Exited => return Flow::Exit,
            Phase::Playing => {}
            _ => return Flow::Continue,
        }

        self.events.clear();
        let Some(session) = self.session.as_mut() else {
            return Flow::Continue;
        };
        let resolution = session.advance(self.buffered.take(), &mut self.events);

        if self
            .events
            .iter()
            .any(|event| matches!(event, Event::AttackFired { .. }))
        {
            self.cues.push(AudioCue::Attack);
        }

        match resolution {
            Resolution::Continue => {}
            Resolution::Caught => self.finish(Outcome::Defeat(DefeatCause::CaughtByEnemy)),
            Resolution::Quiz(question) => self.enter(Phase::QuizPrompt(question)),
            Resolution::Credited(collected) => self.check_victory(collected),
        }
        Flow::Continue
    }

    fn start_session(&mut self, level: Level) -> bool {
        let seed = self.seeds.gen::<u64>();
        match Session::start(level, seed, &self.questions) {
            Ok(session) => {
                tracing::info!(
                    level = level.get(),
                    seed,
                    enemies = level.enemy_count(),
                    "session started"
                );
                self.cues.push(AudioCue::Click);
                self.resume(session);
                true
            }
            Err(error) => {
                tracing::error!(level = level.get(), seed, %error, "failed to start session");
                false
            }
        }
    }

    fn answer(&mut self, index: usize) -> bool {
        let verdict = match &self.phase {
            Phase::QuizPrompt(question) => question
                .answer(index)
                .map(|answer| question.is_correct(answer)),
            _ => None,
        };
        let Some(correct) = verdict else {
            return false;
        };
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        self.cues.push(AudioCue::Click);
        if correct {
            self.events.clear();
            let collected = session.credit(&mut self.events);
            self.enter(Phase::Playing);
            self.check_victory(collected);
        } else {
            self.finish(Outcome::Defeat(DefeatCause::WrongAnswer));
        }
        true
    }

    fn check_victory(&mut self, collected: u32) {
        if usize::try_from(collected).map_or(true, |count| count >= ARTIFACT_COUNT) {
            self.finish(Outcome::Victory);
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.buffered = None;
        self.cues.push(match outcome {
            Outcome::Victory => AudioCue::Victory,
            Outcome::Defeat(_) => AudioCue::Defeat,
        });
        self.enter(Phase::GameOver(outcome));
    }

    fn enter(&mut self, phase: Phase) {
        tracing::info!(from = self.phase.label(), to = phase.label(), "phase changed");
        self.phase = phase;
    }
}
