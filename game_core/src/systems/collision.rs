use hecs::World;

use crate::{Bird, Events, GameMap, Pipe};

/// Whether the bird hits any pipe.
///
/// Only pipes horizontally overlapping the bird are tested; the bird collides
/// when any part of it leaves that pipe's gap. Edges that merely touch are safe.
pub fn collides<'a>(bird: &Bird, pipes: impl IntoIterator<Item = &'a Pipe>, pipe_width: f32) -> bool {
    let bounds = bird.bounds();
    pipes.into_iter().any(|pipe| {
        bounds.overlaps_x(pipe.x, pipe.x + pipe_width)
            && bounds.escapes_y(pipe.gap_top, pipe.gap_bottom())
    })
}

/// Check the bird against every live pipe, flagging `events.collided` on a hit
pub fn check_collisions(world: &World, map: &GameMap, events: &mut Events) -> bool {
    let bird = {
        let mut query = world.query::<&Bird>();
        match query.iter().next() {
            Some((_e, bird)) => *bird,
            None => return false,
        }
    };

    let mut pipes = world.query::<&Pipe>();
    let hit = collides(&bird, pipes.iter().map(|(_e, pipe)| pipe), map.pipe_width);
    if hit {
        events.collided = true;
    }
    hit
}
