//! A single player's game: owns the world and every resource `step` needs.

use hecs::World;

use crate::draw::{build_draw_list, DrawCmd};
use crate::snapshot::{BirdView, PipeView, Snapshot};
use crate::{
    create_bird, step, Bird, Derived, Events, FrameClock, GameMap, GameRng, Pipe, Score, Settings,
    SpawnTimer,
};

pub struct GameSession {
    pub world: World,
    pub clock: FrameClock,
    pub map: GameMap,
    pub settings: Settings,
    pub derived: Derived,
    pub score: Score,
    pub spawn_timer: SpawnTimer,
    pub events: Events,
    pub rng: GameRng,
    is_playing: bool,
    game_over: bool,
    frequency: f32,
}

impl GameSession {
    pub fn new(map: GameMap, settings: Settings, seed: u64) -> Self {
        let derived = Derived::from_settings(&settings, &map);
        let mut world = World::new();
        create_bird(&mut world, &map, &settings);

        Self {
            world,
            clock: FrameClock::new(),
            map,
            settings,
            derived,
            score: Score::new(),
            spawn_timer: SpawnTimer::new(),
            events: Events::new(),
            rng: GameRng::new(seed),
            is_playing: false,
            game_over: false,
            frequency: 0.0,
        }
    }

    /// Reset the run and begin playing under the current settings
    pub fn start(&mut self) {
        self.world.clear();
        create_bird(&mut self.world, &self.map, &self.settings);
        self.clock = FrameClock::new();
        self.score = Score::new();
        self.spawn_timer = SpawnTimer::new();
        self.events.clear();
        self.frequency = 0.0;
        self.game_over = false;
        self.is_playing = true;

        let settings = self.settings.clone();
        self.apply_settings(settings);
        log::info!("Run started");
    }

    /// Adopt a new settings snapshot without resetting the run.
    ///
    /// Pipes already in flight keep the gap they were spawned with.
    pub fn apply_settings(&mut self, settings: Settings) {
        self.derived = Derived::from_settings(&settings, &self.map);
        for (_entity, bird) in self.world.query_mut::<&mut Bird>() {
            bird.glide_speed = settings.glide_speed;
        }
        self.settings = settings;
    }

    /// Run one frame; a no-op unless playing and not yet over
    pub fn advance(&mut self, frequency: f32) -> &Events {
        if !self.is_playing || self.game_over {
            self.events.clear();
            return &self.events;
        }

        self.frequency = frequency;
        step(
            &mut self.world,
            &mut self.clock,
            &self.map,
            &self.settings,
            &self.derived,
            &mut self.score,
            &mut self.spawn_timer,
            &mut self.events,
            &mut self.rng,
            frequency,
        );

        if self.events.collided {
            self.game_over = true;
            log::info!(
                "Game over at frame {} with score {}",
                self.clock.frame,
                self.score.value
            );
        }
        &self.events
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score.value
    }

    pub fn frame(&self) -> u64 {
        self.clock.frame
    }

    /// Frequency fed to the most recent frame
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Grid note closest to the last frequency, if any pitch was heard
    pub fn nearest_note(&self) -> Option<&'static str> {
        if self.frequency > 0.0 {
            self.derived.notes.closest_note(self.frequency).map(|n| n.name)
        } else {
            None
        }
    }

    pub fn pitch_to_y(&self, frequency: f32) -> f32 {
        self.map.pitch_to_y(frequency, &self.settings)
    }

    pub fn bird(&self) -> Option<Bird> {
        let mut query = self.world.query::<&Bird>();
        query.iter().next().map(|(_e, bird)| *bird)
    }

    /// Live pipes, left to right
    pub fn pipes(&self) -> Vec<Pipe> {
        let mut pipes: Vec<Pipe> = self
            .world
            .query::<&Pipe>()
            .iter()
            .map(|(_e, pipe)| *pipe)
            .collect();
        pipes.sort_by(|a, b| a.x.total_cmp(&b.x));
        pipes
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame: self.clock.frame,
            score: self.score.value,
            is_playing: self.is_playing,
            game_over: self.game_over,
            frequency: self.frequency,
            nearest_note: self.nearest_note(),
            bird: self.bird().as_ref().map(BirdView::from),
            pipes: self
                .pipes()
                .iter()
                .map(|pipe| PipeView::new(pipe, &self.map))
                .collect(),
        }
    }

    pub fn draw_list(&self) -> Vec<DrawCmd> {
        build_draw_list(&self.world, &self.map, &self.settings, &self.derived)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameMap::new(), Settings::new(), 12345)
    }
}
