//! Client lifecycle state machine
//!
//! A run only begins once microphone access has been granted; a denied
//! request parks the client in `MicDenied` until the player retries.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Client states
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsmState {
    Idle,
    RequestingMic,
    MicDenied,
    Playing,
    GameOver,
}

/// Actions that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Start,
    MicGranted,
    MicDenied,
    GameOver,
    Restart,
    Quit,
}

/// Result of a state transition
#[derive(Debug, Clone)]
pub struct TransitionResult {
    success: bool,
    from_state: FsmState,
}

impl TransitionResult {
    pub fn success(&self) -> bool {
        self.success
    }

    #[allow(clippy::wrong_self_convention)]
    pub fn from_state(&self) -> FsmState {
        self.from_state
    }
}

/// Client Finite State Machine
pub struct GameFsm {
    state: FsmState,
}

impl GameFsm {
    pub fn new() -> Self {
        Self {
            state: FsmState::Idle,
        }
    }

    pub fn state(&self) -> FsmState {
        self.state
    }

    /// Attempt a transition; an invalid action leaves the state unchanged
    pub fn transition(&mut self, action: GameAction) -> TransitionResult {
        let from_state = self.state;

        match self.next_state(action) {
            Some(next_state) => {
                log::debug!("{:?} --{:?}--> {:?}", from_state, action, next_state);
                self.state = next_state;
                TransitionResult {
                    success: true,
                    from_state,
                }
            }
            None => TransitionResult {
                success: false,
                from_state,
            },
        }
    }

    fn next_state(&self, action: GameAction) -> Option<FsmState> {
        match (self.state, action) {
            (FsmState::Idle, GameAction::Start) => Some(FsmState::RequestingMic),

            (FsmState::RequestingMic, GameAction::MicGranted) => Some(FsmState::Playing),
            (FsmState::RequestingMic, GameAction::MicDenied) => Some(FsmState::MicDenied),

            // Retry
            (FsmState::MicDenied, GameAction::Start) => Some(FsmState::RequestingMic),
            (FsmState::MicDenied, GameAction::Quit) => Some(FsmState::Idle),

            (FsmState::Playing, GameAction::GameOver) => Some(FsmState::GameOver),
            (FsmState::Playing, GameAction::Quit) => Some(FsmState::Idle),

            // Microphone stays open across restarts
            (FsmState::GameOver, GameAction::Restart) => Some(FsmState::Playing),
            (FsmState::GameOver, GameAction::Quit) => Some(FsmState::Idle),

            _ => None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == FsmState::Playing
    }

}

impl Default for GameFsm {
    fn default() -> Self {
        Self::new()
    }
}
