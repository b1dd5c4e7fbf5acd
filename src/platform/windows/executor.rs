//! Windows action executor via SendInput.
//!
//! `WindowsExecutor` implements `ActionExecutor`. Injection is synchronous:
//! `SendInput` returns after the events are queued, in order. No background
//! thread is needed.
//!
//! Text is typed with `KEYEVENTF_UNICODE`: one down/up pair per UTF-16 code
//! unit, all submitted in a single `SendInput` call so other input cannot
//! interleave with it.

use windows_sys::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT, KEYEVENTF_KEYUP, KEYEVENTF_UNICODE,
};

use super::keycodes::keycode_to_vkcode;
use crate::platform::{Action, ActionExecutor, KeyCode, KeyState, PlatformError};

// ---------------------------------------------------------------------------
// Public struct
// ---------------------------------------------------------------------------

/// Injects keyboard events via SendInput on Windows.
///
/// Stateless: each `execute()` call builds its `INPUT` records and calls
/// `SendInput` synchronously.
pub struct WindowsExecutor;

impl WindowsExecutor {
    pub fn new() -> Self {
        WindowsExecutor
    }
}

fn keyboard_input(vk: u16, scan: u16, flags: u32) -> INPUT {
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: vk,
                wScan: scan,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

/// Builds the `INPUT` record for one key event.
fn key_input(key: KeyCode, state: KeyState) -> INPUT {
    let (vk, extra_flags) = keycode_to_vkcode(key);
    let mut flags = extra_flags;
    if state == KeyState::Up {
        flags |= KEYEVENTF_KEYUP;
    }
    keyboard_input(vk, 0, flags)
}

/// Builds the down/up `INPUT` records that type `text`.
fn text_inputs(text: &str) -> Vec<INPUT> {
    text.encode_utf16()
        .flat_map(|unit| {
            [
                keyboard_input(0, unit, KEYEVENTF_UNICODE),
                keyboard_input(0, unit, KEYEVENTF_UNICODE | KEYEVENTF_KEYUP),
            ]
        })
        .collect()
}

fn send(inputs: &[INPUT]) -> Result<(), PlatformError> {
    if inputs.is_empty() {
        return Ok(());
    }
    let sent = unsafe {
        SendInput(
            inputs.len() as u32,
            inputs.as_ptr(),
            std::mem::size_of::<INPUT>() as i32,
        )
    };
    // SendInput returns 0 when UIPI blocks injection into an elevated window.
    if sent as usize != inputs.len() {
        return Err(PlatformError::Other(format!(
            "SendInput accepted {sent} of {} events",
            inputs.len()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// ActionExecutor trait impl
// ---------------------------------------------------------------------------

impl ActionExecutor for WindowsExecutor {
    fn execute(&self, action: &Action) -> Result<(), PlatformError> {
        let captured_at = std::time::Instant::now();

        match action {
            Action::InjectKey { key, state } => send(&[key_input(*key, *state)])?,
            Action::TypeText { text } => send(&text_inputs(text))?,
        }

        log::debug!(
            "executor: injected {:?} in {:.2}ms",
            action,
            captured_at.elapsed().as_secs_f64() * 1000.0
        );

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
