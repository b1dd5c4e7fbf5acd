//! The keyboard-simulation primitive the dispatcher drives.
//!
//! `Keyboard` speaks in the numeric codes hosts store (see
//! `KeyCode::code`). `SystemKeyboard` resolves those codes and forwards each
//! key event to a platform `ActionExecutor`.

use std::time::Duration;

use thiserror::Error;

use crate::config::{Backend, PluginConfig};
use crate::platform::{self, Action, ActionExecutor, KeyCode, KeyState, LogExecutor, PlatformError};

#[derive(Debug, Error)]
pub enum KeyboardError {
    /// The numeric code does not name any `KeyCode`.
    #[error("unknown key code {0}")]
    UnknownKeyCode(u32),
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Press, release, and type primitives.
///
/// Multi-key calls act on the codes in the order given.
pub trait Keyboard {
    fn press_keys(&self, codes: &[u32]) -> Result<(), KeyboardError>;
    fn release_keys(&self, codes: &[u32]) -> Result<(), KeyboardError>;
    fn type_text(&self, text: &str) -> Result<(), KeyboardError>;
}

/// Production `Keyboard` backed by an `ActionExecutor`.
pub struct SystemKeyboard {
    executor: Box<dyn ActionExecutor>,
    /// Pause after every injected action.
    key_delay: Duration,
}

impl SystemKeyboard {
    pub fn new(executor: Box<dyn ActionExecutor>) -> Self {
        Self {
            executor,
            key_delay: Duration::ZERO,
        }
    }

    /// Builds the keyboard `config` describes.
    pub fn from_config(config: &PluginConfig) -> Result<Self, PlatformError> {
        let executor: Box<dyn ActionExecutor> = match config.backend {
            Backend::Native => platform::create_action_executor()?,
            Backend::Log => {
                log::info!("executor: using log-only backend");
                Box::new(LogExecutor::new())
            }
        };
        Ok(Self::new(executor).with_key_delay(Duration::from_millis(config.key_delay_ms)))
    }

    pub fn with_key_delay(mut self, key_delay: Duration) -> Self {
        self.key_delay = key_delay;
        self
    }

    fn run(&self, action: Action) -> Result<(), KeyboardError> {
        log::trace!("keyboard: {action:?}");
        self.executor.execute(&action)?;
        if !self.key_delay.is_zero() {
            std::thread::sleep(self.key_delay);
        }
        Ok(())
    }

    /// Resolves every code before anything is injected, so an unknown code
    /// leaves no key half-pressed.
    fn send_keys(&self, codes: &[u32], state: KeyState) -> Result<(), KeyboardError> {
        let keys = codes
            .iter()
            .map(|&code| KeyCode::from_code(code).ok_or(KeyboardError::UnknownKeyCode(code)))
            .collect::<Result<Vec<_>, _>>()?;
        for key in keys {
            self.run(Action::InjectKey { key, state })?;
        }
        Ok(())
    }
}

impl Keyboard for SystemKeyboard {
    fn press_keys(&self, codes: &[u32]) -> Result<(), KeyboardError> {
        self.send_keys(codes, KeyState::Down)
    }

    fn release_keys(&self, codes: &[u32]) -> Result<(), KeyboardError> {
        self.send_keys(codes, KeyState::Up)
    }

    fn type_text(&self, text: &str) -> Result<(), KeyboardError> {
        self.run(Action::TypeText {
            text: text.to_owned(),
        })
    }
}
