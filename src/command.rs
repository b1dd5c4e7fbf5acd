//! Host command contract.
//!
//! These types mirror the records a launcher host exchanges with its plugins:
//! the plugin describes the commands it offers (`Command` with its
//! `CommandInput`s), the user fills the inputs in, and the host hands the
//! command back with a `CommandData` payload when it fires. Field names
//! serialize in the host's camelCase form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dispatch::DispatchError;

/// Kind of command; decides how `data.value` is interpreted.
///
/// Serialized as its integer tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CommandType {
    /// Alphanumeric and punctuation key.
    KeyPress = 0,
    /// Navigation, editing, and function keys.
    SpecialKey = 1,
    Media = 2,
    /// Literal text.
    Text = 3,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command type {0}")]
pub struct UnknownCommandType(pub u8);

impl TryFrom<u8> for CommandType {
    type Error = UnknownCommandType;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(CommandType::KeyPress),
            1 => Ok(CommandType::SpecialKey),
            2 => Ok(CommandType::Media),
            3 => Ok(CommandType::Text),
            other => Err(UnknownCommandType(other)),
        }
    }
}

impl From<CommandType> for u8 {
    fn from(command_type: CommandType) -> u8 {
        command_type as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandInputType {
    Select,
    Text,
}

/// A label/value pair populating a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOption {
    pub name: String,
    pub data: String,
}

/// One user-editable field of a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandInput {
    pub name: String,
    #[serde(rename = "type")]
    pub input_type: CommandInputType,
    /// Multi-select dropdown; selections arrive comma-joined.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub multiple: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_options: Option<Vec<SelectionOption>>,
}

/// Values the user chose for a command instance, keyed like
/// `Command::command_inputs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Comma-separated key codes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub name: String,
    #[serde(rename = "type")]
    pub command_type: CommandType,
    pub command_inputs: BTreeMap<String, CommandInput>,
    /// Filled in by the host when the command fires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<CommandData>,
}

impl Command {
    /// Copy of this command carrying `data`, the way a host fires it.
    pub fn with_data(&self, data: CommandData) -> Command {
        Command {
            data: Some(data),
            ..self.clone()
        }
    }
}

/// The plugin side of the host contract.
pub trait Plugin: Send + Sync {
    /// Stable identifier of the plugin.
    fn name(&self) -> &str;
    /// Commands to offer in the host's command picker. Pure.
    fn get_commands(&self) -> Vec<Command>;
    /// Runs a command the user triggered.
    ///
    /// Blocks the calling thread until the input has been injected. Safe to
    /// call from async code, but a host on a tokio runtime should prefer
    /// `spawn_blocking` so worker threads stay free.
    fn handle_command(&self, command: &Command) -> Result<(), DispatchError>;
}
