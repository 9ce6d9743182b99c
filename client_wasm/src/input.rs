//! Keyboard shortcuts

use crate::fsm::FsmState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Start,
    Restart,
    ToggleSettings,
}

/// Map a `KeyboardEvent.key` value to a command valid in `state`
pub fn command_for_key(key: &str, state: FsmState) -> Option<KeyCommand> {
    match key {
        " " | "Spacebar" | "Enter" => match state {
            FsmState::Idle | FsmState::MicDenied => Some(KeyCommand::Start),
            FsmState::GameOver => Some(KeyCommand::Restart),
            FsmState::RequestingMic | FsmState::Playing => None,
        },
        "Escape" => Some(KeyCommand::ToggleSettings),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_and_enter_start() {
        assert_eq!(command_for_key(" ", FsmState::Idle), Some(KeyCommand::Start));
        assert_eq!(command_for_key("Enter", FsmState::MicDenied), Some(KeyCommand::Start));
    }

    #[test]
    fn test_space_restarts_after_game_over() {
        assert_eq!(command_for_key(" ", FsmState::GameOver), Some(KeyCommand::Restart));
    }

    #[test]
    fn test_space_ignored_mid_run() {
        assert_eq!(command_for_key(" ", FsmState::Playing), None);
        assert_eq!(command_for_key("Enter", FsmState::RequestingMic), None);
    }

    #[test]
    fn test_escape_toggles_settings_anywhere() {
        assert_eq!(
            command_for_key("Escape", FsmState::Playing),
            Some(KeyCommand::ToggleSettings)
        );
        assert_eq!(command_for_key("a", FsmState::Idle), None);
    }
}
