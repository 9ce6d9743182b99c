//! Error types shared by the simulation and its browser host.

/// Rejected settings edit. The snapshot the edit was applied to stays unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("unknown setting: {0}")]
    UnknownKey(String),
    #[error("invalid difficulty: {0}")]
    UnknownDifficulty(String),
    #[error("{key} = {value} is outside {min}..={max}")]
    OutOfRange {
        key: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("frequency range {min}..{max} Hz is empty")]
    InvalidRange { min: f32, max: f32 },
    #[error("malformed settings: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Parse(err.to_string())
    }
}

/// Microphone acquisition failure. Fatal to starting a run, never to the process.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("microphone capture is not supported in this browser")]
    Unsupported,
    #[error("microphone access denied: {0}")]
    Denied(String),
}
