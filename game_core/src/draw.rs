//! Frame description for the presentation layer.
//!
//! The simulation decides what goes where; the host decides whether each
//! primitive is painted with a sprite or a fallback shape.

use crate::{Bird, Derived, GameMap, Pipe, Settings};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Background {
        width: f32,
        height: f32,
    },
    /// Horizontal guide at a natural note's height
    GridLine {
        y: f32,
        width: f32,
        label: &'static str,
    },
    /// Both halves of a pipe around its gap
    Pipe {
        x: f32,
        width: f32,
        gap_top: f32,
        gap_bottom: f32,
        height: f32,
    },
    /// Target note centred in a pipe's gap
    NoteLabel {
        x: f32,
        y: f32,
        text: &'static str,
    },
    Bird {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        locked: bool,
    },
}

/// Back-to-front draw order: background, grid, pipes with labels, bird
pub fn build_draw_list(
    world: &hecs::World,
    map: &GameMap,
    settings: &Settings,
    derived: &Derived,
) -> Vec<DrawCmd> {
    let mut cmds = vec![DrawCmd::Background {
        width: map.width,
        height: map.height,
    }];

    for note in derived.notes.natural_notes() {
        cmds.push(DrawCmd::GridLine {
            y: map.pitch_to_y(note.freq, settings),
            width: map.width,
            label: note.name,
        });
    }

    let mut pipes: Vec<Pipe> = world.query::<&Pipe>().iter().map(|(_e, p)| *p).collect();
    pipes.sort_by(|a, b| a.x.total_cmp(&b.x));
    for pipe in &pipes {
        cmds.push(DrawCmd::Pipe {
            x: pipe.x,
            width: map.pipe_width,
            gap_top: pipe.gap_top,
            gap_bottom: pipe.gap_bottom(),
            height: map.height,
        });
        cmds.push(DrawCmd::NoteLabel {
            x: pipe.x + map.pipe_width / 2.0,
            y: pipe.gap_center,
            text: pipe.note.name,
        });
    }

    for (_e, bird) in world.query::<&Bird>().iter() {
        cmds.push(DrawCmd::Bird {
            x: bird.pos.x,
            y: bird.pos.y,
            width: bird.size.x,
            height: bird.size.y,
            locked: bird.is_locked,
        });
    }

    cmds
}
