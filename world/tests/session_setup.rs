use std::collections::HashSet;

use artifact_maze_core::{Command, Direction, Event, Level, ARTIFACT_COUNT};
use artifact_maze_world::{apply, query, World};
use proptest::prelude::*;

fn level(value: u8) -> Level {
    Level::new(value).expect("selectable level")
}

#[test]
fn entities_are_placed_on_legal_cells() {
    for value in Level::MIN..=Level::MAX {
        for seed in 0..32u64 {
            let world = World::new(level(value), seed).expect("world builds");
            let grid = query::grid(&world);
            let artifacts = query::artifacts(&world);

            let distinct: HashSet<_> = artifacts.iter().copied().collect();
            assert_eq!(distinct.len(), ARTIFACT_COUNT);
            assert!(artifacts.iter().all(|cell| grid.is_open(*cell)));

            let enemies = query::enemy_view(&world);
            assert_eq!(enemies.len(), usize::from(value));
            for enemy in &enemies {
                assert!(enemy.alive);
                assert!(grid.is_open(enemy.cell));
                assert!(!distinct.contains(&enemy.cell));
            }

            let start = query::player_cell(&world);
            assert!(grid.is_open(start));
            assert!(enemies.iter().all(|enemy| enemy.cell != start));
        }
    }
}

#[test]
fn player_starts_at_first_free_open_cell() {
    let world = World::new(level(2), 5).expect("world builds");
    let enemies: Vec<_> = query::enemy_view(&world)
        .into_iter()
        .map(|enemy| enemy.cell)
        .collect();
    let expected = query::grid(&world)
        .open_cells()
        .find(|cell| !enemies.contains(cell));
    assert_eq!(Some(query::player_cell(&world)), expected);
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Tick),
        Just(Command::Attack),
        prop::sample::select(Direction::ALL.to_vec())
            .prop_map(|direction| Command::StepPlayer { direction }),
    ]
}

proptest! {
    #[test]
    fn actors_stay_on_open_cells(
        seed in any::<u64>(),
        value in 1u8..=5,
        commands in prop::collection::vec(command_strategy(), 0..400),
    ) {
        let mut world = World::new(level(value), seed).expect("world builds");
        let mut events = Vec::new();
        for command in commands {
            apply(&mut world, command, &mut events);
            let grid = query::grid(&world);
            prop_assert!(grid.is_open(query::player_cell(&world)));
            for enemy in query::enemy_view(&world) {
                prop_assert!(grid.is_open(enemy.cell));
            }
        }

        for event in events {
            if let Event::EnemyAdvanced { from, to, .. } | Event::PlayerMoved { from, to } = event {
                prop_assert_eq!(from.euclidean_distance(to), 1.0);
            }
        }
    }
}
