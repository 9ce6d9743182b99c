use glam::Vec2;

use crate::{Params, Settings};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict horizontal overlap; touching edges do not overlap
    pub fn overlaps_x(&self, min_x: f32, max_x: f32) -> bool {
        self.max.x > min_x && self.min.x < max_x
    }

    /// Whether any part of the box lies outside the vertical band `[top, bottom]`
    pub fn escapes_y(&self, top: f32, bottom: f32) -> bool {
        self.min.y < top || self.max.y > bottom
    }
}

/// Canvas geometry the simulation runs in (screen pixels, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameMap {
    pub width: f32,
    pub height: f32,
    pub bird_x: f32,
    pub bird_size: Vec2,
    pub pipe_width: f32,
}

impl Default for GameMap {
    fn default() -> Self {
        Self {
            width: Params::CANVAS_WIDTH,
            height: Params::CANVAS_HEIGHT,
            bird_x: Params::BIRD_X,
            bird_size: Vec2::new(Params::BIRD_WIDTH, Params::BIRD_HEIGHT),
            pipe_width: Params::PIPE_WIDTH,
        }
    }
}

impl GameMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Highest (smallest) y the bird centre may reach
    pub fn bird_min_y(&self) -> f32 {
        self.bird_size.y / 2.0
    }

    /// Lowest (largest) y the bird centre may reach
    pub fn bird_max_y(&self) -> f32 {
        self.height - self.bird_size.y / 2.0
    }

    /// Never panics, even on a canvas shorter than the bird
    pub fn clamp_bird_y(&self, y: f32) -> f32 {
        y.max(self.bird_min_y()).min(self.bird_max_y())
    }

    pub fn bird_spawn(&self) -> Vec2 {
        Vec2::new(self.bird_x, self.height / 2.0)
    }

    /// Map a frequency to a screen y on a logarithmic scale.
    ///
    /// `min_freq` lands at the bottom of the central band and `max_freq` at its
    /// top; the band excludes a `PITCH_MARGIN` share of the bird's travel at
    /// each end. Frequencies outside the range extrapolate linearly in log space.
    pub fn pitch_to_y(&self, freq: f32, settings: &Settings) -> f32 {
        let log_min = settings.min_freq.ln();
        let log_max = settings.max_freq.ln();
        let normalized = (freq.ln() - log_min) / (log_max - log_min);

        let min_y = self.bird_min_y();
        let max_y = self.bird_max_y();
        let full_range = max_y - min_y;
        let margin = full_range * Params::PITCH_MARGIN;
        let usable = full_range - 2.0 * margin;
        let center_y = (min_y + max_y) / 2.0;

        center_y + usable / 2.0 - normalized * usable
    }
}
