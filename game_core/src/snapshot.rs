//! Read-only view of a session handed to the page every frame.

use serde::Serialize;

use crate::{Bird, BirdMode, GameMap, Pipe};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BirdView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub target_y: f32,
    pub velocity: f32,
    pub mode: BirdMode,
    pub is_locked: bool,
    pub lock_end_frame: u64,
}

impl From<&Bird> for BirdView {
    fn from(bird: &Bird) -> Self {
        Self {
            x: bird.pos.x,
            y: bird.pos.y,
            width: bird.size.x,
            height: bird.size.y,
            target_y: bird.target_y,
            velocity: bird.velocity,
            mode: bird.mode(),
            is_locked: bird.is_locked,
            lock_end_frame: bird.lock_end_frame,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipeView {
    pub x: f32,
    pub width: f32,
    pub gap_top: f32,
    pub gap_center: f32,
    pub gap_size: f32,
    pub note: &'static str,
    pub frequency: f32,
    pub passed: bool,
}

impl PipeView {
    pub fn new(pipe: &Pipe, map: &GameMap) -> Self {
        Self {
            x: pipe.x,
            width: map.pipe_width,
            gap_top: pipe.gap_top,
            gap_center: pipe.gap_center,
            gap_size: pipe.gap_size,
            note: pipe.note.name,
            frequency: pipe.note.freq,
            passed: pipe.passed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub frame: u64,
    pub score: u32,
    pub is_playing: bool,
    pub game_over: bool,
    pub frequency: f32,
    pub nearest_note: Option<&'static str>,
    pub bird: Option<BirdView>,
    pub pipes: Vec<PipeView>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
