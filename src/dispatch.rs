//! Turns a fired `Command` into keyboard primitive calls.
//!
//! Key commands become a strict bracket: press modifiers, press key, release
//! key, release modifiers. Both modifier calls use the order the host sent,
//! the release is not reversed. Text commands are typed verbatim.
//!
//! Codes are not checked against the catalog; whatever the host sends goes
//! to the `Keyboard`, which decides whether it can inject it.

use std::num::ParseIntError;

use thiserror::Error;

use crate::command::{Command, CommandType};
use crate::keyboard::{Keyboard, KeyboardError};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("invalid key code {value:?} in `{field}`")]
    InvalidKeyCode {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error(transparent)]
    Keyboard(#[from] KeyboardError),
}

/// Runs `command` against `keyboard`.
///
/// A missing or empty `data.value` is a no-op. The first failing primitive
/// call ends the sequence; keys pressed before it stay pressed.
pub fn handle_command<K>(keyboard: &K, command: &Command) -> Result<(), DispatchError>
where
    K: Keyboard + ?Sized,
{
    let data = command.data.as_ref();
    let Some(value) = data
        .and_then(|d| d.value.as_deref())
        .filter(|v| !v.is_empty())
    else {
        log::debug!("dispatch: {:?} has no value, nothing to do", command.name);
        return Ok(());
    };

    match command.command_type {
        CommandType::KeyPress | CommandType::SpecialKey | CommandType::Media => {
            let modifiers = parse_modifiers(data.and_then(|d| d.modifier.as_deref()))?;
            let key = parse_code("value", value)?;
            log::debug!(
                "dispatch: {:?} key {key} with modifiers {modifiers:?}",
                command.name
            );
            press_chord(keyboard, &modifiers, key)?;
        }
        CommandType::Text => {
            log::debug!(
                "dispatch: {:?} typing {} chars",
                command.name,
                value.chars().count()
            );
            keyboard.type_text(value)?;
        }
    }
    Ok(())
}

fn press_chord<K>(keyboard: &K, modifiers: &[u32], key: u32) -> Result<(), KeyboardError>
where
    K: Keyboard + ?Sized,
{
    if !modifiers.is_empty() {
        keyboard.press_keys(modifiers)?;
    }
    keyboard.press_keys(&[key])?;
    keyboard.release_keys(&[key])?;
    if !modifiers.is_empty() {
        keyboard.release_keys(modifiers)?;
    }
    Ok(())
}

fn parse_code(field: &'static str, value: &str) -> Result<u32, DispatchError> {
    value
        .trim()
        .parse()
        .map_err(|source| DispatchError::InvalidKeyCode {
            field,
            value: value.to_owned(),
            source,
        })
}

/// Parses a comma-joined modifier list. Blank entries (a trailing comma from
/// a multi-select) are skipped.
fn parse_modifiers(modifier: Option<&str>) -> Result<Vec<u32>, DispatchError> {
    modifier
        .unwrap_or_default()
        .split(',')
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| parse_code("modifier", entry))
        .collect()
}
