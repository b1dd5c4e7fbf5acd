//! Log-only action executor.
//!
//! Accepts every action and reports it at `info` level instead of touching the
//! operating system. Selected with `backend = "log"`; useful on headless
//! machines and when wiring a host up for the first time.

use crate::platform::{Action, ActionExecutor, KeyState, PlatformError};

#[derive(Debug, Clone, Copy, Default)]
pub struct LogExecutor;

impl LogExecutor {
    pub fn new() -> Self {
        LogExecutor
    }
}

impl ActionExecutor for LogExecutor {
    fn execute(&self, action: &Action) -> Result<(), PlatformError> {
        match action {
            Action::InjectKey { key, state } => {
                let direction = match state {
                    KeyState::Down => "down",
                    KeyState::Up => "up",
                };
                log::info!("log executor: key {key:?} {direction}");
            }
            Action::TypeText { text } => {
                log::info!("log executor: type {} chars: {text:?}", text.chars().count());
            }
        }
        Ok(())
    }
}
