//! Browser client for Whistly Bird
//!
//! Canvas 2D rendering and Web Audio microphone input around `game_core`.
//! The lifecycle FSM and key mapping have no browser dependency and are
//! tested on the host; everything else only builds for wasm32.

pub mod fsm;
pub mod input;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod audio;
#[cfg(target_arch = "wasm32")]
mod renderer;

#[cfg(target_arch = "wasm32")]
pub use app::*;
