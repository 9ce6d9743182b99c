//! Browser entry points
//!
//! The page owns the animation loop and DOM widgets; it calls `tick` once
//! per `requestAnimationFrame` and forwards button, slider and key events.

use std::cell::RefCell;

use game_core::{Access, AudioInput, GameMap, GameSession, InputError, Settings, SettingsError};
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, KeyboardEvent};

use crate::audio::{self, AnalyserSource, ToneSynth};
use crate::fsm::{FsmState, GameAction, GameFsm};
use crate::input::{command_for_key, KeyCommand};
use crate::renderer::Renderer;

pub struct WhistleClient {
    session: GameSession,
    input: AudioInput<AnalyserSource>,
    synth: Option<ToneSynth>,
    renderer: Renderer,
    fsm: GameFsm,
    settings_open: bool,
}

fn settings_err(err: SettingsError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn input_err(err: InputError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

impl WhistleClient {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let renderer = Renderer::new(canvas)?;
        let map = GameMap::with_size(canvas.width() as f32, canvas.height() as f32);
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;

        let mut client = Self {
            session: GameSession::new(map, Settings::new(), seed),
            input: AudioInput::new(),
            synth: None,
            renderer,
            fsm: GameFsm::new(),
            settings_open: false,
        };
        client.render()?;
        Ok(client)
    }

    /// Move to `RequestingMic`; the microphone is asked for on every start
    fn begin_start(&mut self) -> Result<(), JsValue> {
        let result = self.fsm.transition(GameAction::Start);
        if !result.success() {
            return Err(JsValue::from_str(&format!(
                "Cannot start from {:?}",
                result.from_state()
            )));
        }
        Ok(())
    }

    fn finish_start(&mut self, result: Result<AnalyserSource, InputError>) -> Result<(), JsValue> {
        match self.input.resolve(result) {
            Ok(()) => {
                if let Access::Ready(source) = self.input.access() {
                    self.synth = Some(ToneSynth::new(source.context()));
                }
                self.enter_play();
                Ok(())
            }
            Err(err) => {
                self.fsm.transition(GameAction::MicDenied);
                Err(input_err(err))
            }
        }
    }

    fn enter_play(&mut self) {
        self.fsm.transition(GameAction::MicGranted);
        self.session.start();
    }

    fn restart(&mut self) -> Result<(), JsValue> {
        let result = self.fsm.transition(GameAction::Restart);
        if !result.success() {
            return Err(JsValue::from_str(&format!(
                "No finished run to restart from {:?}",
                result.from_state()
            )));
        }
        self.session.start();
        Ok(())
    }

    /// One frame: sample pitch, advance, play pass tones, paint
    fn tick(&mut self) -> Result<String, JsValue> {
        if self.fsm.is_playing() {
            let frequency = self.input.sample(&self.session.settings);
            let events = self.session.advance(frequency).clone();

            if let Some(synth) = &self.synth {
                for pass in &events.passes {
                    synth.play(pass.frequency, pass.duration);
                }
            }

            if events.collided {
                self.fsm.transition(GameAction::GameOver);
                log::info!("Game over, final score {}", self.session.score());
            }
        }

        self.render()?;
        self.snapshot_json()
    }

    fn render(&mut self) -> Result<(), JsValue> {
        let cmds = self.session.draw_list();
        self.renderer.render(&cmds)
    }

    fn apply(&mut self, settings: Result<Settings, SettingsError>) -> Result<(), JsValue> {
        match settings {
            Ok(settings) => {
                self.session.apply_settings(settings);
                Ok(())
            }
            Err(err) => {
                log::warn!("Rejected settings change: {}", err);
                Err(settings_err(err))
            }
        }
    }

    fn snapshot_json(&self) -> Result<String, JsValue> {
        self.session
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    fn stop_audio(&mut self) {
        self.synth = None;
        if let Some(source) = self.input.stop() {
            source.close();
        }
    }
}

thread_local! {
    static CLIENT: RefCell<Option<WhistleClient>> = const { RefCell::new(None) };
}

fn with_client<R>(f: impl FnOnce(&mut WhistleClient) -> Result<R, JsValue>) -> Result<R, JsValue> {
    CLIENT.with(|cell| match cell.borrow_mut().as_mut() {
        Some(client) => f(client),
        None => Err(JsValue::from_str("Client not initialized")),
    })
}

fn settle(result: Result<(), JsValue>) -> Promise {
    match result {
        Ok(()) => Promise::resolve(&JsValue::UNDEFINED),
        Err(err) => Promise::reject(&err),
    }
}

#[wasm_bindgen]
pub fn init_client(canvas: HtmlCanvasElement) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // Already installed on a second init
    let _ = console_log::init_with_level(log::Level::Info);

    let client = WhistleClient::new(&canvas)?;
    CLIENT.with(|cell| *cell.borrow_mut() = Some(client));
    log::info!("Client initialized, microphone will be requested on start");
    Ok(())
}

/// Request the microphone (first time or retry) and begin a run.
/// Rejects with the reason when access is denied.
#[wasm_bindgen]
pub fn start_game() -> Promise {
    wasm_bindgen_futures::future_to_promise(async move {
        // The borrow is released before awaiting the permission prompt
        with_client(|client| client.begin_start())?;
        let result = audio::request_microphone().await;
        with_client(|client| client.finish_start(result))?;
        Ok(JsValue::UNDEFINED)
    })
}

#[wasm_bindgen]
pub fn restart_game() -> Result<(), JsValue> {
    with_client(|client| client.restart())
}

/// Advance one frame and return the HUD snapshot as JSON
#[wasm_bindgen]
pub fn tick() -> Result<String, JsValue> {
    with_client(|client| client.tick())
}

#[wasm_bindgen]
pub fn client_state() -> Result<FsmState, JsValue> {
    with_client(|client| Ok(client.fsm.state()))
}

#[wasm_bindgen]
pub fn snapshot_json() -> Result<String, JsValue> {
    with_client(|client| client.snapshot_json())
}

/// Slider input, e.g. `set_setting("gapMultiplier", 4)`
#[wasm_bindgen]
pub fn set_setting(key: &str, value: f32) -> Result<(), JsValue> {
    with_client(|client| {
        let next = client.session.settings.with(key, value);
        client.apply(next)
    })
}

#[wasm_bindgen]
pub fn set_difficulty(level: &str) -> Result<(), JsValue> {
    with_client(|client| {
        let next = client.session.settings.with_difficulty(level);
        client.apply(next)
    })
}

#[wasm_bindgen]
pub fn apply_settings_json(json: &str) -> Result<(), JsValue> {
    with_client(|client| client.apply(Settings::from_json(json)))
}

#[wasm_bindgen]
pub fn reset_settings() -> Result<(), JsValue> {
    with_client(|client| client.apply(Ok(Settings::reset())))
}

#[wasm_bindgen]
pub fn settings_json() -> Result<String, JsValue> {
    with_client(|client| client.session.settings.to_json().map_err(settings_err))
}

#[wasm_bindgen]
pub fn settings_open() -> Result<bool, JsValue> {
    with_client(|client| Ok(client.settings_open))
}

#[wasm_bindgen]
pub fn toggle_settings() -> Result<bool, JsValue> {
    with_client(|client| {
        client.settings_open = !client.settings_open;
        Ok(client.settings_open)
    })
}

/// Keyboard shortcuts; resolves once any triggered action has finished
#[wasm_bindgen]
pub fn handle_key(event: &KeyboardEvent) -> Promise {
    let state = match with_client(|client| Ok(client.fsm.state())) {
        Ok(state) => state,
        Err(err) => return Promise::reject(&err),
    };

    let Some(command) = command_for_key(&event.key(), state) else {
        return Promise::resolve(&JsValue::UNDEFINED);
    };
    // Keep Space from scrolling the page
    event.prevent_default();

    match command {
        KeyCommand::Start => start_game(),
        KeyCommand::Restart => settle(restart_game()),
        KeyCommand::ToggleSettings => settle(toggle_settings().map(|_| ())),
    }
}

/// Release the microphone; the next start asks for it again
#[wasm_bindgen]
pub fn stop_audio() -> Result<(), JsValue> {
    with_client(|client| {
        client.stop_audio();
        client.fsm.transition(GameAction::Quit);
        Ok(())
    })
}
