use serde::Serialize;

/// Frame counter; every duration in the simulation is a frame count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameClock {
    pub frame: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) -> u64 {
        self.frame += 1;
        self.frame
    }
}

/// Pipes cleared this run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub value: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self) {
        self.value += 1;
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

/// Counts frames toward the next pipe spawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnTimer {
    pub elapsed: u32,
}

impl SpawnTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame; true when `interval` is reached (and the timer restarts)
    pub fn tick(&mut self, interval: u32) -> bool {
        self.elapsed += 1;
        if self.elapsed >= interval {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }
}

/// A pipe was cleared; the host plays the target note for `duration` seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassEvent {
    pub note: &'static str,
    pub frequency: f32,
    pub duration: f64,
    pub frame: u64,
}

/// Events that occurred during this frame
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub passes: Vec<PassEvent>,
    pub pipe_spawned: bool,
    pub bird_unlocked: bool,
    pub collided: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.passes.clear();
        self.pipe_spawned = false;
        self.bird_unlocked = false;
        self.collided = false;
    }
}
