//! Web Audio plumbing: microphone spectrum source and pass tones

use game_core::{InputError, Params, SpectrumSource};
use js_sys::{Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AnalyserNode, AudioContext, AudioContextState, MediaStream, MediaStreamAudioSourceNode,
    MediaStreamConstraints, OscillatorType,
};

/// Best-effort human readable text for a rejected JS call
fn js_error_text(err: &JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}

fn denied(err: JsValue) -> InputError {
    InputError::Denied(js_error_text(&err))
}

/// Microphone routed into an analyser node
pub struct AnalyserSource {
    context: AudioContext,
    analyser: AnalyserNode,
    microphone: MediaStreamAudioSourceNode,
}

impl AnalyserSource {
    pub fn context(&self) -> AudioContext {
        self.context.clone()
    }

    /// Disconnect the microphone and shut the audio graph down
    pub fn close(self) {
        if let Err(err) = self.microphone.disconnect() {
            log::warn!("Failed to disconnect microphone: {}", js_error_text(&err));
        }
        if let Err(err) = self.context.close() {
            log::warn!("Failed to close AudioContext: {}", js_error_text(&err));
        }
        log::info!("Audio input stopped");
    }
}

impl SpectrumSource for AnalyserSource {
    fn sample_rate(&self) -> f32 {
        self.context.sample_rate()
    }

    fn fft_size(&self) -> usize {
        self.analyser.fft_size() as usize
    }

    fn bin_count(&self) -> usize {
        self.analyser.frequency_bin_count() as usize
    }

    fn read_magnitudes(&mut self, bins: &mut [u8]) -> bool {
        if bins.len() != self.bin_count() {
            return false;
        }
        self.analyser.get_byte_frequency_data(bins);
        true
    }
}

/// Ask for the microphone with browser voice processing disabled
pub async fn request_microphone() -> Result<AnalyserSource, InputError> {
    log::info!("Requesting microphone access...");
    let window = web_sys::window().ok_or(InputError::Unsupported)?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|_| InputError::Unsupported)?;

    // Echo cancellation and friends smear a whistle's spectral peak
    let audio = Object::new();
    for key in ["echoCancellation", "noiseSuppression", "autoGainControl"] {
        Reflect::set(&audio, &JsValue::from_str(key), &JsValue::FALSE).map_err(denied)?;
    }
    let constraints = MediaStreamConstraints::new();
    constraints.set_audio(&audio);

    let request = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|_| InputError::Unsupported)?;
    let stream: MediaStream = JsFuture::from(request)
        .await
        .map_err(denied)?
        .dyn_into()
        .map_err(denied)?;
    log::info!("Microphone access granted");

    let context = AudioContext::new().map_err(denied)?;
    let analyser = context.create_analyser().map_err(denied)?;
    analyser.set_fft_size(Params::FFT_SIZE as u32);
    let microphone = context.create_media_stream_source(&stream).map_err(denied)?;
    microphone
        .connect_with_audio_node(&analyser)
        .map_err(denied)?;

    Ok(AnalyserSource {
        context,
        analyser,
        microphone,
    })
}

/// Plays the target note of each passed pipe
pub struct ToneSynth {
    context: AudioContext,
}

impl ToneSynth {
    pub fn new(context: AudioContext) -> Self {
        Self { context }
    }

    /// Fire and forget; failures are logged and never reach the game
    pub fn play(&self, frequency: f32, duration: f64) {
        let context = self.context.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = play_tone(&context, frequency, duration).await {
                log::warn!("Error playing tone: {}", js_error_text(&err));
            }
        });
    }
}

async fn play_tone(context: &AudioContext, frequency: f32, duration: f64) -> Result<(), JsValue> {
    // Autoplay policy leaves fresh contexts suspended
    if context.state() == AudioContextState::Suspended {
        JsFuture::from(context.resume()?).await?;
        log::info!("AudioContext resumed");
    }

    log::info!("Playing tone: {:.2} Hz for {}s", frequency, duration);
    let now = context.current_time();
    let oscillator = context.create_oscillator()?;
    let gain = context.create_gain()?;

    oscillator.set_type(OscillatorType::Sine);
    oscillator.frequency().set_value_at_time(frequency, now)?;

    gain.gain().set_value_at_time(Params::TONE_VOLUME, now)?;
    gain.gain()
        .exponential_ramp_to_value_at_time(Params::TONE_FADE_FLOOR, now + duration)?;

    oscillator.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&context.destination())?;

    oscillator.start_with_when(now)?;
    oscillator.stop_with_when(now + duration)?;
    Ok(())
}
