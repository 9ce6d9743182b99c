use game_core::*;

fn new_session() -> GameSession {
    let mut session = GameSession::new(GameMap::new(), Settings::new(), 42);
    session.start();
    session
}

/// A pipe whose gap is centred on the bird's current height
fn pipe_around_bird(session: &GameSession, x: f32) -> Pipe {
    let bird = session.bird().unwrap();
    Pipe::new(x, Note::new("A4", 440.0), bird.pos.y, session.derived.pipe_gap)
}

#[test]
fn test_pitch_to_y_is_monotonic() {
    let map = GameMap::new();
    let settings = Settings::new();
    let mut last = f32::INFINITY;
    let steps = 200;
    for i in 1..steps {
        let f = settings.min_freq
            + (settings.max_freq - settings.min_freq) * i as f32 / steps as f32;
        let y = map.pitch_to_y(f, &settings);
        assert!(y <= last, "pitch_to_y({}) = {} rose above {}", f, y, last);
        last = y;
    }
}

#[test]
fn test_pitch_extremes_stay_off_canvas_edges() {
    let map = GameMap::new();
    let settings = Settings::new();
    for f in [settings.min_freq, settings.max_freq] {
        let y = map.pitch_to_y(f, &settings);
        assert!(y > map.bird_min_y() && y < map.bird_max_y());
        assert!(y > 0.0 && y < map.height);
    }
}

#[test]
fn test_natural_notes_round_trip_through_closest_note() {
    let grid = NoteGrid::build(440.0, 830.61);
    for note in grid.natural_notes() {
        assert_eq!(grid.closest_note(note.freq).unwrap().name, note.name);
    }
}

#[test]
fn test_apply_settings_twice_yields_same_derived_state() {
    let mut session = new_session();
    let settings = Settings::new().with_difficulty("medium").unwrap();
    session.apply_settings(settings.clone());
    let once = session.derived.clone();
    session.apply_settings(settings);
    assert_eq!(session.derived, once);
}

#[test]
fn test_whistled_a4_converges_to_its_height() {
    let mut session = new_session();
    let target = session.pitch_to_y(440.0);

    for _ in 0..40 {
        session.advance(440.0);
    }

    let bird = session.bird().unwrap();
    assert_eq!(bird.mode(), BirdMode::Whistling);
    assert_eq!(bird.target_y, target);
    assert!(
        (bird.pos.y - target).abs() < 0.5,
        "bird at {} should be within half a pixel of {}",
        bird.pos.y,
        target
    );
}

#[test]
fn test_first_pipe_spawns_at_right_edge_after_easy_interval() {
    let mut session = new_session();
    assert_eq!(session.settings.pipe_spawn_interval, 150);

    for _ in 0..149 {
        session.advance(0.0);
    }
    assert!(session.pipes().is_empty());

    let events = session.advance(0.0);
    assert!(events.pipe_spawned);
    let pipes = session.pipes();
    assert_eq!(pipes.len(), 1);
    assert_eq!(pipes[0].x, session.map.width);
    assert!(pipes[0].note.is_natural());
}

#[test]
fn test_clearing_a_pipe_scores_and_locks_input() {
    let mut session = new_session();
    // After one 2px scroll the trailing edge sits at 79, left of the bird at 80
    let pipe = pipe_around_bird(&session, 29.0);
    session.world.spawn((pipe,));

    let events = session.advance(0.0).clone();
    let t = session.frame();
    assert_eq!(t, 1);
    assert_eq!(session.score(), 1);
    assert_eq!(events.passes.len(), 1);
    assert_eq!(events.passes[0].note, "A4");
    assert_eq!(events.passes[0].frequency, 440.0);
    assert_eq!(events.passes[0].duration, 0.45);
    assert!(session.pipes()[0].passed);

    let bird = session.bird().unwrap();
    assert!(bird.is_locked);
    assert_eq!(bird.lock_end_frame, t + 27);
    assert!(!session.is_game_over());
}

#[test]
fn test_lock_ignores_pitch_for_exactly_tone_frames() {
    let mut session = new_session();
    let pipe = pipe_around_bird(&session, 29.0);
    session.world.spawn((pipe,));
    session.advance(0.0);
    assert_eq!(session.score(), 1);

    let lock_frames = Params::frames_for(Params::TONE_DURATION);
    for i in 0..lock_frames {
        let before = session.bird().unwrap().pos.y;
        session.advance(660.0);
        let bird = session.bird().unwrap();
        assert!(!bird.is_whistling, "pitch ignored on locked frame {}", i + 1);
        assert!(
            (bird.pos.y - before - session.settings.glide_speed).abs() < 1e-4,
            "locked bird glides"
        );
    }
    assert!(!session.bird().unwrap().is_locked);

    session.advance(660.0);
    let bird = session.bird().unwrap();
    assert!(bird.is_whistling, "pitch accepted once the lock has run out");
    assert_eq!(bird.target_y, session.pitch_to_y(660.0));
    assert!(!session.is_game_over());
}

#[test]
fn test_silence_glides_until_floor() {
    let mut session = new_session();
    for _ in 0..60 {
        session.advance(660.0);
    }
    assert_eq!(session.bird().unwrap().mode(), BirdMode::Whistling);

    let glide = session.settings.glide_speed;
    for _ in 0..20 {
        let before = session.bird().unwrap().pos.y;
        session.advance(0.0);
        let bird = session.bird().unwrap();
        assert_eq!(bird.mode(), BirdMode::Gliding);
        assert!(bird.pos.y > before);
        assert!((bird.pos.y - before - glide).abs() < 1e-4);
    }

    // No obstacles, so the run can only end at the floor clamp
    for _ in 0..400 {
        let pipes: Vec<_> = session.world.query::<&Pipe>().iter().map(|(e, _)| e).collect();
        for entity in pipes {
            session.world.despawn(entity).unwrap();
        }
        session.advance(0.0);
    }
    assert!(!session.is_game_over());
    let bird = session.bird().unwrap();
    assert_eq!(bird.pos.y, session.map.bird_max_y());
    assert_eq!(bird.velocity, 0.0);
    assert_eq!(bird.mode(), BirdMode::Gliding);
}

#[test]
fn test_decaying_detector_output_drops_bird_into_glide() {
    let mut session = new_session();
    let settings = session.settings.clone();
    let mut detector = PitchDetector::new();
    let fft = Params::FFT_SIZE;
    let rate = Params::SAMPLE_RATE;

    // Peak at bin 82, about 441 Hz
    let mut loud = vec![0u8; fft / 2];
    loud[82] = 200;
    let silent = vec![0u8; fft / 2];

    let f0 = detector.detect(&loud, rate, fft, &settings);
    assert!(settings.in_range(f0));
    session.advance(f0);
    assert_eq!(session.bird().unwrap().mode(), BirdMode::Whistling);

    for _ in 0..20 {
        let before = session.bird().unwrap().pos.y;
        let f = detector.detect(&silent, rate, fft, &settings);
        assert!(f < f0 && f > 0.0);
        session.advance(f);
        let bird = session.bird().unwrap();
        assert_eq!(bird.mode(), BirdMode::Gliding);
        assert!((bird.pos.y - before - settings.glide_speed).abs() < 1e-4);
    }
}

#[test]
fn test_collision_ends_run_and_freezes_state() {
    let mut session = new_session();
    let mut blocking = pipe_around_bird(&session, 70.0);
    blocking.gap_top = 0.0;
    session.world.spawn((blocking,));

    let events = session.advance(0.0);
    assert!(events.collided);
    assert!(session.is_game_over());

    let frame = session.frame();
    session.advance(0.0);
    assert_eq!(session.frame(), frame, "advance is a no-op after game over");
}

#[test]
fn test_settings_change_mid_run_keeps_inflight_gap() {
    let mut session = new_session();
    for _ in 0..150 {
        session.advance(0.0);
    }
    let spawned_gap = session.pipes()[0].gap_size;

    session.apply_settings(session.settings.with("gapMultiplier", 5.0).unwrap());
    session.advance(0.0);

    assert_eq!(session.pipes()[0].gap_size, spawned_gap);
    assert_eq!(session.derived.pipe_gap, 120.0);
}

#[test]
fn test_offscreen_pipes_are_retired() {
    let mut session = new_session();
    let mut pipe = pipe_around_bird(&session, -50.0);
    pipe.passed = true;
    session.world.spawn((pipe,));

    session.advance(0.0);
    assert!(session.pipes().is_empty());
}

#[test]
fn test_same_seed_same_run() {
    let mut a = new_session();
    let mut b = new_session();
    for i in 0..600 {
        let f = if (i / 90) % 2 == 0 { 600.0 } else { 0.0 };
        a.advance(f);
        b.advance(f);
    }
    assert_eq!(a.snapshot(), b.snapshot());
}
