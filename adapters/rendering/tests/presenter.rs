use artifact_maze_core::{CellCoord, Direction, Level, GRID_COLUMNS, GRID_ROWS};
use artifact_maze_rendering::{
    ActorKind, ButtonTone, InputEvent, InputRouter, Key, PresentationPort, Presenter, Rect,
    RenderingConfig, TextStyle, TileRole,
};
use artifact_maze_system_game_flow::{GameConfig, GameFlow, Intent, Phase, Session};
use artifact_maze_system_quiz::{Question, QuestionSet, QuizBank};
use artifact_maze_world::{Grid, World};
use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Clone, Debug, PartialEq)]
enum Op {
    Clear,
    Tile(CellCoord, TileRole),
    Actor(Vec2, ActorKind),
    Aura(Vec2, f32),
    Overlay(f32),
    Text(String, Vec2),
    Button(Rect, String, bool),
}

#[derive(Default)]
struct RecordingPort {
    ops: Vec<Op>,
}

impl RecordingPort {
    fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text(text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn buttons(&self) -> Vec<(&str, bool)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Button(_, label, hovered) => Some((label.as_str(), *hovered)),
                _ => None,
            })
            .collect()
    }

    fn actors(&self, kind: ActorKind) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Actor(_, drawn) if *drawn == kind))
            .count()
    }
}

impl PresentationPort for RecordingPort {
    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn fill_tile(&mut self, cell: CellCoord, role: TileRole) {
        self.ops.push(Op::Tile(cell, role));
    }

    fn draw_actor(&mut self, origin: Vec2, kind: ActorKind) {
        self.ops.push(Op::Actor(origin, kind));
    }

    fn draw_attack_aura(&mut self, center: Vec2, radius: f32) {
        self.ops.push(Op::Aura(center, radius));
    }

    fn draw_overlay_panel(&mut self, alpha: f32) {
        self.ops.push(Op::Overlay(alpha));
    }

    fn draw_text(&mut self, content: &str, origin: Vec2, _style: TextStyle) {
        self.ops.push(Op::Text(content.to_owned(), origin));
    }

    fn measure_text(&self, content: &str, _style: TextStyle) -> Vec2 {
        Vec2::new(content.chars().count() as f32 * 10.0, 20.0)
    }

    fn draw_button(&mut self, rect: Rect, label: &str, _tone: ButtonTone, hovered: bool) {
        self.ops.push(Op::Button(rect, label.to_owned(), hovered));
    }
}

fn presenter() -> Presenter {
    Presenter::new(RenderingConfig::default())
}

fn one_question() -> QuestionSet {
    QuestionSet::from_questions(vec![Question::new(
        "Which function returns the length of a string?",
        ["len", "input", "print", "length"].map(String::from),
    )])
}

fn corridor_flow(questions: QuestionSet, enemies: &[CellCoord]) -> GameFlow {
    let level = Level::new(2).expect("selectable level");
    let grid = Grid::from_rows(&["....", "#..#"]).expect("non-empty layout");
    let world = World::from_layout(
        level,
        grid,
        CellCoord::new(0, 0),
        vec![CellCoord::new(1, 0)],
        enemies,
        3,
    );
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let bank = QuizBank::shuffled(&questions, &mut rng);
    let mut flow = GameFlow::new(GameConfig { seed: 3, questions });
    flow.resume(Session::from_parts(world, bank, rng));
    flow
}

#[test]
fn level_select_shows_five_buttons_with_hover() {
    let flow = GameFlow::new(GameConfig {
        seed: 1,
        questions: QuestionSet::default(),
    });
    let mut port = RecordingPort::default();
    presenter().draw(&flow, Some(Vec2::new(400.0, 290.0)), &mut port);

    assert_eq!(port.ops.first(), Some(&Op::Clear));
    assert_eq!(
        port.buttons(),
        vec![
            ("Level 1", false),
            ("Level 2", true),
            ("Level 3", false),
            ("Level 4", false),
            ("Level 5", false),
        ]
    );
    assert!(port.texts().contains(&"Choose a difficulty level"));
}

#[test]
fn playing_draws_maze_actors_and_hud() {
    let flow = corridor_flow(one_question(), &[CellCoord::new(2, 1)]);
    let mut port = RecordingPort::default();
    presenter().draw(&flow, None, &mut port);

    let tiles = port
        .ops
        .iter()
        .filter(|op| matches!(op, Op::Tile(..)))
        .count();
    assert_eq!(tiles, 8);
    assert!(port
        .ops
        .contains(&Op::Tile(CellCoord::new(0, 1), TileRole::Wall)));
    assert_eq!(port.actors(ActorKind::Artifact), 1);
    assert_eq!(port.actors(ActorKind::Enemy), 1);
    assert!(port
        .ops
        .contains(&Op::Actor(Vec2::new(5.0, 5.0), ActorKind::Player)));

    assert_eq!(
        port.texts(),
        vec!["Artifacts: 0/3", "Space - attack", "Level: 2"]
    );
    assert!(port
        .ops
        .contains(&Op::Text("Space - attack".to_owned(), Vec2::new(650.0, 10.0))));
    assert!(!port.ops.iter().any(|op| matches!(op, Op::Aura(..))));
}

#[test]
fn aura_fades_once_the_attack_is_a_few_ticks_old() {
    let mut flow = corridor_flow(one_question(), &[]);
    assert!(flow.handle(Intent::Attack));

    let mut visible = 0;
    for _ in 0..20 {
        let _ = flow.tick();
        let mut port = RecordingPort::default();
        presenter().draw(&flow, None, &mut port);
        if port
            .ops
            .contains(&Op::Aura(Vec2::new(20.0, 20.0), 50.0))
        {
            visible += 1;
        }
    }
    assert_eq!(visible, 4);
}

#[test]
fn defeated_enemies_are_not_drawn() {
    let mut flow = corridor_flow(one_question(), &[CellCoord::new(0, 0)]);
    assert!(flow.handle(Intent::Attack));
    let _ = flow.tick();

    let mut port = RecordingPort::default();
    presenter().draw(&flow, None, &mut port);
    assert_eq!(port.actors(ActorKind::Enemy), 0);
}

#[test]
fn quiz_overlay_lists_answers_over_the_maze() {
    let mut flow = corridor_flow(one_question(), &[]);
    let mut router = InputRouter::new(*presenter().layout());
    let intent = router.route(flow.phase(), InputEvent::KeyPressed(Key::Right));
    assert_eq!(intent.map(|intent| flow.handle(intent)), Some(true));
    let _ = flow.tick();
    assert!(matches!(flow.phase(), Phase::QuizPrompt(_)));

    let mut port = RecordingPort::default();
    presenter().draw(&flow, None, &mut port);

    assert!(port.ops.iter().any(|op| matches!(op, Op::Overlay(_))));
    assert!(port
        .texts()
        .contains(&"Which function returns the length of a string?"));
    let mut labels: Vec<&str> = port.buttons().into_iter().map(|(label, _)| label).collect();
    labels.sort_unstable();
    assert_eq!(labels, vec!["input", "len", "length", "print"]);
}

#[test]
fn game_over_offers_restart_and_exit() {
    let mut flow = corridor_flow(QuestionSet::default(), &[CellCoord::new(1, 0)]);
    assert!(flow.handle(Intent::Move(Direction::East)));
    let _ = flow.tick();

    let mut port = RecordingPort::default();
    presenter().draw(&flow, Some(Vec2::new(400.0, 440.0)), &mut port);

    let texts = port.texts();
    assert!(texts.contains(&"Game over"));
    assert!(texts.contains(&"An enemy caught you!"));
    assert_eq!(
        port.buttons(),
        vec![("Start over", false), ("Exit game", true)]
    );
}

#[test]
fn playfield_grid_draws_every_tile() {
    let mut flow = GameFlow::new(GameConfig {
        seed: 5,
        questions: QuestionSet::default(),
    });
    assert!(flow.handle(Intent::SelectLevel(Level::new(1).expect("level 1"))));

    let mut port = RecordingPort::default();
    presenter().draw(&flow, None, &mut port);
    let tiles = port
        .ops
        .iter()
        .filter(|op| matches!(op, Op::Tile(..)))
        .count();
    assert_eq!(tiles, (GRID_COLUMNS * GRID_ROWS) as usize);
}
