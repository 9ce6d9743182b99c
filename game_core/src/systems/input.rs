use hecs::World;

use crate::{Bird, Events, FrameClock, GameMap, Settings};

/// Apply this frame's pitch estimate to the bird.
///
/// A locked bird ignores pitch. Otherwise an in-range frequency sets a new
/// target height and puts the bird in whistling mode; anything else (silence,
/// a decayed remnant below the range, a squeal above it) lets it glide.
pub fn steer_bird(world: &mut World, frequency: f32, map: &GameMap, settings: &Settings) {
    for (_entity, bird) in world.query_mut::<&mut Bird>() {
        if bird.is_locked {
            bird.is_whistling = false;
            continue;
        }

        if settings.in_range(frequency) {
            bird.is_whistling = true;
            bird.target_y = map.pitch_to_y(frequency, settings);
            bird.velocity = 0.0;
        } else {
            bird.is_whistling = false;
        }
    }
}

/// Release the input lock once its end frame is reached
pub fn expire_lock(world: &mut World, clock: &FrameClock, events: &mut Events) {
    for (_entity, bird) in world.query_mut::<&mut Bird>() {
        if bird.is_locked && clock.frame >= bird.lock_end_frame {
            bird.is_locked = false;
            events.bird_unlocked = true;
            log::info!("Bird unlocked at frame {}, whistle input resumed", clock.frame);
        }
    }
}
