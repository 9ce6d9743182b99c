/// Game tuning parameters for Whistly Bird
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Canvas
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    // Bird
    pub const BIRD_X: f32 = 80.0;
    pub const BIRD_WIDTH: f32 = 34.0;
    pub const BIRD_HEIGHT: f32 = 24.0;
    pub const BIRD_SMOOTHING: f32 = 0.15; // fraction of remaining distance per frame

    // Pipes
    pub const PIPE_WIDTH: f32 = 52.0;

    // Pitch-to-screen mapping
    pub const PITCH_MARGIN: f32 = 0.15; // top and bottom share of the bird's travel band

    // Reward tone
    pub const TONE_DURATION: f64 = 0.45; // seconds
    pub const TONE_VOLUME: f32 = 0.15;
    pub const TONE_FADE_FLOOR: f32 = 0.01;
    pub const FRAMES_PER_SECOND: f64 = 60.0;

    // Pitch detection
    pub const NOISE_FLOOR: u8 = 80; // peak must exceed this on the 0-255 analyser scale
    pub const DECAY: f32 = 0.95;
    pub const FFT_SIZE: usize = 4096;
    pub const SAMPLE_RATE: f32 = 44100.0;

    /// Number of frames a tone of `duration` seconds spans at the nominal frame rate
    pub fn frames_for(duration: f64) -> u64 {
        (duration * Self::FRAMES_PER_SECOND).ceil() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_tone_spans_27_frames() {
        assert_eq!(Params::frames_for(Params::TONE_DURATION), 27);
    }

    #[test]
    fn test_frames_for_rounds_up() {
        assert_eq!(Params::frames_for(0.2), 12);
        assert_eq!(Params::frames_for(0.01), 1);
        assert_eq!(Params::frames_for(0.0), 0);
    }
}
