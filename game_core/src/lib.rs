pub mod components;
pub mod config;
pub mod draw;
pub mod error;
pub mod map;
pub mod notes;
pub mod params;
pub mod pitch;
pub mod resources;
pub mod session;
pub mod snapshot;
pub mod systems;

pub use components::*;
pub use config::*;
pub use draw::*;
pub use error::*;
pub use map::*;
pub use notes::*;
pub use params::*;
pub use pitch::*;
pub use resources::*;
pub use session::*;
pub use snapshot::*;

use hecs::World;
use systems::*;

/// Advance the Whistly Bird simulation by one frame.
///
/// `frequency` is this frame's pitch estimate (0 or a decaying remnant when
/// nobody is whistling). All timing is in frames, so a slow or uneven display
/// refresh slows the game down but never changes its outcome.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    clock: &mut FrameClock,
    map: &GameMap,
    settings: &Settings,
    derived: &Derived,
    score: &mut Score,
    spawn_timer: &mut SpawnTimer,
    events: &mut Events,
    rng: &mut GameRng,
    frequency: f32,
) {
    // Clear events at start of frame
    events.clear();

    // 1. Pitch input, gated by the lock as it stood at the end of last frame
    steer_bird(world, frequency, map, settings);

    // 2. Advance the frame and release an expired lock
    clock.tick();
    expire_lock(world, clock, events);

    // 3. Move bird toward its target or glide
    move_bird(world, map);

    // 4. Scroll pipes and score the ones the bird has cleared
    move_pipes(world, settings);
    check_passes(world, map, clock, score, events);

    // 5. Retire pipes that left the screen
    despawn_offscreen_pipes(world, map);

    // 6. Spawn on the difficulty cadence
    tick_spawner(world, spawn_timer, map, settings, derived, rng, events);

    // 7. Collisions end the run
    check_collisions(world, map, events);
}

/// Helper to create the bird entity
pub fn create_bird(world: &mut World, map: &GameMap, settings: &Settings) -> hecs::Entity {
    world.spawn((Bird::new(map, Params::BIRD_SMOOTHING, settings.glide_speed),))
}
