use std::{
    collections::{hash_map::DefaultHasher, HashSet},
    hash::{Hash, Hasher},
};

use nature_lovers_core::{CellCoord, Command, Config, Direction, EntityKind, Event};
use nature_lovers_world::{self as world, query, World};

const SCRIPT: [Option<Direction>; 8] = [
    Some(Direction::Right),
    Some(Direction::Right),
    None,
    Some(Direction::Down),
    Some(Direction::Left),
    None,
    Some(Direction::Up),
    Some(Direction::Down),
];

fn small_config(seed: u64) -> Config {
    Config {
        width: 300,
        height: 200,
        hazard_count: 12,
        resource_count: 6,
        forager_count: 15,
        seed,
        ..Config::default()
    }
}

fn run(config: Config, ticks: usize) -> (u64, Vec<Event>) {
    let mut world = World::new(config).expect("valid configuration");
    let mut events = Vec::new();
    for tick in 0..ticks {
        if let Some(direction) = SCRIPT[tick % SCRIPT.len()] {
            world::apply(
                &mut world,
                Command::SubmitAgentIntent { direction },
                &mut events,
            );
        }
        world::apply(&mut world, Command::Tick, &mut events);
    }

    let mut hasher = DefaultHasher::new();
    query::snapshot(&world).hash(&mut hasher);
    query::entities(&world).hash(&mut hasher);
    query::agent(&world).hash(&mut hasher);
    (hasher.finish(), events)
}

fn pollution_grid(world: &World) -> Vec<u32> {
    let config = query::config(world);
    (0..config.rows())
        .flat_map(|row| (0..config.columns()).map(move |column| CellCoord::new(column, row)))
        .map(|cell| query::pollution_at(world, cell).expect("cell on grid"))
        .collect()
}

#[test]
fn identical_seeds_replay_identically() {
    let (first_fingerprint, first_events) = run(small_config(7), 120);
    let (second_fingerprint, second_events) = run(small_config(7), 120);

    assert_eq!(first_fingerprint, second_fingerprint);
    assert_eq!(first_events, second_events);
}

#[test]
fn different_seeds_diverge() {
    let (first, _) = run(small_config(7), 40);
    let (second, _) = run(small_config(8), 40);
    assert_ne!(first, second);
}

#[test]
fn occupancy_stays_consistent_across_ticks() {
    let mut world = World::new(small_config(21)).expect("valid configuration");
    let mut events = Vec::new();
    for tick in 0..150 {
        if let Some(direction) = SCRIPT[tick % SCRIPT.len()] {
            world::apply(
                &mut world,
                Command::SubmitAgentIntent { direction },
                &mut events,
            );
        }
        world::apply(&mut world, Command::Tick, &mut events);

        let view = query::field_view(&world);
        let (columns, rows) = view.dimensions();
        let entities = query::entities(&world);
        let mut cells = HashSet::new();
        for entity in &entities {
            assert!(entity.cell.column() < columns && entity.cell.row() < rows);
            assert_eq!(view.occupant(entity.cell), Some(entity.id));
            assert!(cells.insert(entity.cell), "two entities share {}", entity.cell);
        }

        let occupied = (0..rows)
            .flat_map(|row| (0..columns).map(move |column| CellCoord::new(column, row)))
            .filter(|cell| view.occupant(*cell).is_some())
            .count();
        assert_eq!(occupied, entities.len());
        assert_eq!(query::population(&world, EntityKind::Agent), 1);
    }
}

#[test]
fn pollution_only_drops_where_the_agent_or_companions_arrive() {
    let mut world = World::new(small_config(3)).expect("valid configuration");
    let mut events = Vec::new();
    let mut previous = pollution_grid(&world);

    for tick in 0..100 {
        if let Some(direction) = SCRIPT[tick % SCRIPT.len()] {
            world::apply(
                &mut world,
                Command::SubmitAgentIntent { direction },
                &mut events,
            );
        }
        events.clear();
        world::apply(&mut world, Command::Tick, &mut events);

        let scrubbed: HashSet<CellCoord> = events
            .iter()
            .filter_map(|event| match event {
                Event::EntityMoved { kind, to, .. }
                    if matches!(kind, EntityKind::Agent | EntityKind::Companion) =>
                {
                    Some(*to)
                }
                _ => None,
            })
            .collect();

        let current = pollution_grid(&world);
        let columns = query::config(&world).columns();
        for (index, (before, after)) in previous.iter().zip(&current).enumerate() {
            let cell = CellCoord::new(index as u32 % columns, index as u32 / columns);
            if after < before {
                assert!(scrubbed.contains(&cell), "pollution fell at {cell}");
            }
        }
        previous = current;
    }
}

#[test]
fn every_tick_reports_completion() {
    let (_, events) = run(small_config(11), 25);
    let ticks: Vec<u64> = events
        .iter()
        .filter_map(|event| match event {
            Event::TickCompleted { tick } => Some(*tick),
            _ => None,
        })
        .collect();
    assert_eq!(ticks, (1..=25).collect::<Vec<_>>());
}
