use glam::Vec2;
use serde::Serialize;

use crate::{Aabb, GameMap, Note};

/// How the bird is currently being driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BirdMode {
    /// Following the player's pitch
    Whistling,
    /// Descending at the glide speed
    Gliding,
    /// Ignoring pitch while the reward tone plays; glides meanwhile
    Locked,
}

/// Bird component - the pitch-controlled player
#[derive(Debug, Clone, Copy)]
pub struct Bird {
    pub pos: Vec2,   // centre; x is fixed for the whole run
    pub size: Vec2,
    pub target_y: f32,
    pub velocity: f32, // descent speed bookkeeping, zeroed while whistling or clamped
    pub smoothing: f32,
    pub glide_speed: f32,
    pub is_whistling: bool,
    pub is_locked: bool,
    pub lock_end_frame: u64,
}

impl Bird {
    pub fn new(map: &GameMap, smoothing: f32, glide_speed: f32) -> Self {
        let pos = map.bird_spawn();
        Self {
            pos,
            size: map.bird_size,
            target_y: pos.y,
            velocity: 0.0,
            smoothing,
            glide_speed,
            is_whistling: false,
            is_locked: false,
            lock_end_frame: 0,
        }
    }

    pub fn mode(&self) -> BirdMode {
        if self.is_locked {
            BirdMode::Locked
        } else if self.is_whistling {
            BirdMode::Whistling
        } else {
            BirdMode::Gliding
        }
    }

    /// Ignore pitch input until `frame`
    pub fn lock_until(&mut self, frame: u64) {
        self.is_locked = true;
        self.is_whistling = false;
        self.lock_end_frame = frame;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.pos, self.size)
    }
}

/// Pipe component - an obstacle whose gap encodes a target note
#[derive(Debug, Clone, Copy)]
pub struct Pipe {
    pub x: f32, // left edge
    pub gap_top: f32,
    pub gap_center: f32,
    pub gap_size: f32, // frozen at spawn
    pub note: Note,
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: f32, note: Note, gap_center: f32, gap_size: f32) -> Self {
        Self {
            x,
            gap_top: gap_center - gap_size / 2.0,
            gap_center,
            gap_size,
            note,
            passed: false,
        }
    }

    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_size
    }

    /// Right edge of the pipe
    pub fn trailing_edge(&self, width: f32) -> f32 {
        self.x + width
    }
}
