//! Keyboard command plugin for launcher hosts.
//!
//! Offers a fixed catalog of commands (special keys, alphanumeric keys,
//! media keys, free text) and, when the host fires one, simulates the
//! matching keyboard input: the key bracketed by its modifiers, or the text
//! typed literally.
//!
//! ```no_run
//! use launchdeck_keyboard::{CommandData, KeyboardPlugin, Plugin};
//!
//! let plugin = KeyboardPlugin::new()?;
//! let commands = plugin.get_commands();
//! let text = &commands[3];
//! plugin.handle_command(&text.with_data(CommandData {
//!     value: Some("hello".into()),
//!     modifier: None,
//! }))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod catalog;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod keyboard;
pub mod platform;

pub use command::{
    Command, CommandData, CommandInput, CommandInputType, CommandType, Plugin, SelectionOption,
};
pub use config::{Backend, ConfigError, PluginConfig};
pub use dispatch::DispatchError;
pub use keyboard::{Keyboard, KeyboardError, SystemKeyboard};
pub use platform::{KeyCode, PlatformError};

/// Installs `env_logger` as the `log` backend: stderr, default level `info`,
/// overridable with `RUST_LOG`. Does nothing if the host already installed a
/// logger.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// The keyboard plugin, generic over the keyboard it drives.
pub struct KeyboardPlugin<K = SystemKeyboard> {
    keyboard: K,
}

impl KeyboardPlugin<SystemKeyboard> {
    /// Plugin on the native backend with default settings.
    pub fn new() -> Result<Self, PlatformError> {
        Self::from_config(&PluginConfig::default())
    }

    pub fn from_config(config: &PluginConfig) -> Result<Self, PlatformError> {
        Ok(Self::with_keyboard(SystemKeyboard::from_config(config)?))
    }
}

impl<K: Keyboard> KeyboardPlugin<K> {
    pub fn with_keyboard(keyboard: K) -> Self {
        Self { keyboard }
    }

    pub fn keyboard(&self) -> &K {
        &self.keyboard
    }
}

impl<K> Plugin for KeyboardPlugin<K>
where
    K: Keyboard + Send + Sync,
{
    fn name(&self) -> &str {
        "keyboard"
    }

    fn get_commands(&self) -> Vec<Command> {
        catalog::commands().to_vec()
    }

    fn handle_command(&self, command: &Command) -> Result<(), DispatchError> {
        dispatch::handle_command(&self.keyboard, command)
    }
}
