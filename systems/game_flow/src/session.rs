use artifact_maze_core::{Command, Event, Level};
use artifact_maze_system_quiz::{present, PresentedQuestion, QuestionSet, QuizBank};
use artifact_maze_world::{apply, query, World, WorldError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Stream of the session seed reserved for quiz shuffling, so the world's
/// own draws never shift question order.
const QUIZ_STREAM: u64 = 1;

/// Mutable state of one play-through: the world plus its quiz bank.
#[derive(Debug)]
pub struct Session {
    world: World,
    bank: QuizBank,
    quiz_rng: ChaCha8Rng,
}

/// What a playing tick left behind once collisions and pickups resolved.
#[derive(Debug)]
pub(crate) enum Resolution {
    Continue,
    Caught,
    Quiz(PresentedQuestion),
    Credited(u32),
}

impl Session {
    /// Builds a fresh maze for `level` and shuffles a private quiz bank.
    pub fn start(level: Level, seed: u64, questions: &QuestionSet) -> Result<Self, WorldError> {
        let world = World::new(level, seed)?;
        let mut quiz_rng = ChaCha8Rng::seed_from_u64(seed);
        quiz_rng.set_stream(QUIZ_STREAM);
        let bank = QuizBank::shuffled(questions, &mut quiz_rng);
        Ok(Self::from_parts(world, bank, quiz_rng))
    }

    /// Assembles a session from an existing world and bank.
    #[must_use]
    pub fn from_parts(world: World, bank: QuizBank, quiz_rng: ChaCha8Rng) -> Self {
        Self {
            world,
            bank,
            quiz_rng,
        }
    }

    /// Read-only access to the session's world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Level the session was started with.
    #[must_use]
    pub fn level(&self) -> Level {
        query::level(&self.world)
    }

    /// Questions not yet asked this session.
    #[must_use]
    pub fn remaining_questions(&self) -> usize {
        self.bank.remaining()
    }

    /// Runs one tick: the buffered action, then the world clock, then
    /// collision ahead of pickup.
    pub(crate) fn advance(
        &mut self,
        action: Option<Command>,
        events: &mut Vec<Event>,
    ) -> Resolution {
        if let Some(command) = action {
            apply(&mut self.world, command, events);
        }
        apply(&mut self.world, Command::Tick, events);

        let player = query::player_cell(&self.world);
        if let Some(enemy) = query::live_enemy_at(&self.world, player) {
            tracing::debug!(enemy = enemy.get(), cell = ?player, "player caught");
            return Resolution::Caught;
        }

        if !query::artifact_at(&self.world, player) {
            return Resolution::Continue;
        }
        apply(
            &mut self.world,
            Command::CollectArtifact { cell: player },
            events,
        );

        match self.bank.take_next() {
            Some(question) => Resolution::Quiz(present(&question, &mut self.quiz_rng)),
            None => Resolution::Credited(self.credit(events)),
        }
    }

    /// Credits one artifact and returns the new total.
    pub(crate) fn credit(&mut self, events: &mut Vec<Event>) -> u32 {
        apply(&mut self.world, Command::CreditArtifact, events);
        query::artifacts_collected(&self.world)
    }
}
