use hecs::World;

use crate::{GameMap, Pipe};

/// Despawn pipes that have scrolled fully off the left edge
pub fn despawn_offscreen_pipes(world: &mut World, map: &GameMap) {
    let to_remove: Vec<hecs::Entity> = world
        .query::<&Pipe>()
        .iter()
        .filter(|(_e, pipe)| pipe.x <= -map.pipe_width)
        .map(|(e, _pipe)| e)
        .collect();

    for entity in to_remove {
        let _ = world.despawn(entity);
    }
}
