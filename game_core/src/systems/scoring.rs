use hecs::World;

use crate::{Bird, Events, FrameClock, GameMap, Params, PassEvent, Pipe, Score};

/// Score pipes whose trailing edge has crossed the bird.
///
/// Each newly passed pipe adds one point and emits a `PassEvent` for the
/// reward tone; the bird is then locked for as many frames as the tone lasts.
pub fn check_passes(
    world: &mut World,
    map: &GameMap,
    clock: &FrameClock,
    score: &mut Score,
    events: &mut Events,
) {
    let bird_x = {
        let mut query = world.query::<&Bird>();
        match query.iter().next() {
            Some((_e, bird)) => bird.pos.x,
            None => return,
        }
    };

    let mut passed_any = false;
    for (_entity, pipe) in world.query_mut::<&mut Pipe>() {
        if !pipe.passed && pipe.trailing_edge(map.pipe_width) < bird_x {
            pipe.passed = true;
            passed_any = true;
            score.increment();
            events.passes.push(PassEvent {
                note: pipe.note.name,
                frequency: pipe.note.freq,
                duration: Params::TONE_DURATION,
                frame: clock.frame,
            });
            log::info!(
                "Passed pipe! Playing {} ({:.2} Hz) for {}s",
                pipe.note.name,
                pipe.note.freq,
                Params::TONE_DURATION
            );
        }
    }

    if !passed_any {
        return;
    }

    let lock_frames = Params::frames_for(Params::TONE_DURATION);
    for (_entity, bird) in world.query_mut::<&mut Bird>() {
        bird.lock_until(clock.frame + lock_frames);
        log::info!(
            "Bird locked for {} frames (until frame {})",
            lock_frames,
            bird.lock_end_frame
        );
    }
}
