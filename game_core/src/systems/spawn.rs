use hecs::{Entity, World};
use rand::seq::SliceRandom;

use crate::{Derived, Events, GameMap, GameRng, Note, Pipe, Settings, SpawnTimer};

/// Spawn a pipe at the right edge whose gap is centred on `note`.
///
/// `gap_size` is copied into the pipe and never re-read from settings.
pub fn spawn_pipe_with_note(
    world: &mut World,
    map: &GameMap,
    settings: &Settings,
    note: Note,
    gap_size: f32,
) -> Entity {
    let gap_center = map.pitch_to_y(note.freq, settings);
    world.spawn((Pipe::new(map.width, note, gap_center, gap_size),))
}

/// Spawn a pipe targeting a uniformly random natural note.
///
/// Returns `None` when the note grid has no naturals to choose from.
pub fn spawn_pipe(
    world: &mut World,
    map: &GameMap,
    settings: &Settings,
    derived: &Derived,
    rng: &mut GameRng,
) -> Option<Entity> {
    let naturals = derived.notes.natural_notes();
    let Some(note) = naturals.choose(&mut rng.0).copied() else {
        log::warn!("Note grid has no natural notes; skipping pipe spawn");
        return None;
    };
    Some(spawn_pipe_with_note(
        world,
        map,
        settings,
        note,
        derived.pipe_gap,
    ))
}

/// Count one frame toward the spawn interval and spawn when it is reached
pub fn tick_spawner(
    world: &mut World,
    timer: &mut SpawnTimer,
    map: &GameMap,
    settings: &Settings,
    derived: &Derived,
    rng: &mut GameRng,
    events: &mut Events,
) {
    if timer.tick(settings.pipe_spawn_interval) {
        events.pipe_spawned = spawn_pipe(world, map, settings, derived, rng).is_some();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (World, GameMap, Settings, Derived, GameRng) {
        let map = GameMap::new();
        let settings = Settings::new();
        let derived = Derived::from_settings(&settings, &map);
        (World::new(), map, settings, derived, GameRng::new(7))
    }

    #[test]
    fn test_spawned_pipe_targets_natural_note() {
        let (mut world, map, settings, derived, mut rng) = setup();
        for _ in 0..50 {
            spawn_pipe(&mut world, &map, &settings, &derived, &mut rng).unwrap();
        }
        for (_e, pipe) in world.query::<&Pipe>().iter() {
            assert!(pipe.note.is_natural());
            assert_eq!(pipe.x, map.width);
            assert_eq!(pipe.gap_size, derived.pipe_gap);
            assert_eq!(pipe.gap_center, map.pitch_to_y(pipe.note.freq, &settings));
            assert_eq!(pipe.gap_top, pipe.gap_center - pipe.gap_size / 2.0);
        }
    }

    #[test]
    fn test_gap_size_frozen_after_settings_change() {
        let (mut world, map, settings, derived, mut rng) = setup();
        let entity = spawn_pipe(&mut world, &map, &settings, &derived, &mut rng).unwrap();

        let wider = settings.with("gapMultiplier", 5.0).unwrap();
        let rederived = Derived::from_settings(&wider, &map);
        assert_eq!(rederived.pipe_gap, 120.0);

        assert_eq!(world.get::<&Pipe>(entity).unwrap().gap_size, 72.0);
    }

    #[test]
    fn test_spawner_waits_for_interval() {
        let (mut world, map, settings, derived, mut rng) = setup();
        let mut timer = SpawnTimer::new();
        let mut events = Events::new();

        for _ in 0..settings.pipe_spawn_interval - 1 {
            tick_spawner(&mut world, &mut timer, &map, &settings, &derived, &mut rng, &mut events);
        }
        assert_eq!(world.query::<&Pipe>().iter().count(), 0);

        tick_spawner(&mut world, &mut timer, &map, &settings, &derived, &mut rng, &mut events);
        assert_eq!(world.query::<&Pipe>().iter().count(), 1);
        assert!(events.pipe_spawned);
    }

    #[test]
    fn test_same_seed_same_notes() {
        let (mut world_a, map, settings, derived, mut rng_a) = setup();
        let mut world_b = World::new();
        let mut rng_b = GameRng::new(7);

        for _ in 0..10 {
            let a = spawn_pipe(&mut world_a, &map, &settings, &derived, &mut rng_a).unwrap();
            let b = spawn_pipe(&mut world_b, &map, &settings, &derived, &mut rng_b).unwrap();
            assert_eq!(
                world_a.get::<&Pipe>(a).unwrap().note,
                world_b.get::<&Pipe>(b).unwrap().note
            );
        }
    }
}
