use hecs::World;

use crate::{Bird, GameMap, Pipe, Settings};

/// Advance the bird one frame.
///
/// Whistling closes a fixed fraction of the distance to the target height;
/// gliding and locked birds sink at the glide speed. The result is clamped to
/// the screen and velocity is zeroed whenever a bound is touched.
pub fn move_bird(world: &mut World, map: &GameMap) {
    for (_entity, bird) in world.query_mut::<&mut Bird>() {
        if bird.is_whistling && !bird.is_locked {
            let dy = bird.target_y - bird.pos.y;
            bird.pos.y += dy * bird.smoothing;
            bird.velocity = 0.0;
        } else {
            bird.pos.y += bird.glide_speed;
            bird.velocity = bird.glide_speed;
        }

        bird.pos.y = map.clamp_bird_y(bird.pos.y);
        if bird.pos.y <= map.bird_min_y() || bird.pos.y >= map.bird_max_y() {
            bird.velocity = 0.0;
        }
    }
}

/// Scroll every pipe left by the pipe speed
pub fn move_pipes(world: &mut World, settings: &Settings) {
    for (_entity, pipe) in world.query_mut::<&mut Pipe>() {
        pipe.x -= settings.pipe_speed;
    }
}
