//! macOS action executor via CGEventPost.
//!
//! `MacOSExecutor` implements `ActionExecutor`. Injection is synchronous:
//! `CGEventPost` hands the event to the window server before returning, so no
//! background thread is needed and successive `execute()` calls arrive in
//! order.
//!
//! Playback media keys are not keyboard events on macOS. They are posted as
//! `NSSystemDefined` events carrying an auxiliary control button code, the
//! same shape the hardware media keys produce.
//!
//! Text is typed by attaching a Unicode string to a keyboard event
//! (`CGEventKeyboardSetUnicodeString`), which bypasses the active keyboard
//! layout. The window server truncates strings longer than 20 UTF-16 units,
//! so longer text is split into chunks.

use std::ffi::c_void;

use cocoa::base::{id, nil};
use cocoa::foundation::NSPoint;
use objc::{class, msg_send, sel, sel_impl};

use super::keycodes::{keycode_to_aux_key, keycode_to_vkcode};
use crate::platform::{Action, ActionExecutor, KeyCode, KeyState, PlatformError};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// CGEventTapLocation: kCGSessionEventTap.
const CG_SESSION_EVENT_TAP: u32 = 1;

/// CGEventTapLocation: kCGHIDEventTap. System-defined events go here.
const CG_HID_EVENT_TAP: u32 = 0;

/// NSEventTypeSystemDefined.
const NS_EVENT_TYPE_SYSTEM_DEFINED: u64 = 14;

/// NX_SUBTYPE_AUX_CONTROL_BUTTONS: media key events.
const NX_SUBTYPE_AUX_CONTROL_BUTTONS: i16 = 8;

/// kCGEventSourceStateHIDSystemState = 1 -- use the real HID hardware state.
const CG_EVENT_SOURCE_STATE_HID_SYSTEM_STATE: i32 = 1;

/// Longest string a single keyboard event carries.
const UNICODE_CHUNK_LEN: usize = 20;

// ---------------------------------------------------------------------------
// Raw FFI
// ---------------------------------------------------------------------------

type CGEventRef = *mut c_void;
type CGEventSourceRef = *mut c_void;

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    fn CGEventSourceCreate(state_id: i32) -> CGEventSourceRef;
    fn CGEventCreateKeyboardEvent(
        source: CGEventSourceRef,
        virtual_key: u16,
        key_down: bool,
    ) -> CGEventRef;
    fn CGEventKeyboardSetUnicodeString(
        event: CGEventRef,
        string_length: std::ffi::c_ulong,
        unicode_string: *const u16,
    );
    fn CGEventPost(tap_location: u32, event: CGEventRef);
}

#[link(name = "CoreFoundation", kind = "framework")]
extern "C" {
    fn CFRelease(cf: *const c_void);
}

// ---------------------------------------------------------------------------
// Public struct
// ---------------------------------------------------------------------------

/// Injects keyboard events via CGEventPost on macOS.
///
/// Stateless: each event gets its own `CGEventSource` and `CGEvent`, both
/// released right after posting.
pub struct MacOSExecutor;

impl MacOSExecutor {
    pub fn new() -> Self {
        MacOSExecutor
    }

    fn type_text(&self, text: &str) -> Result<(), PlatformError> {
        let units: Vec<u16> = text.encode_utf16().collect();
        for chunk in units.chunks(UNICODE_CHUNK_LEN) {
            // Virtual key 0 is ignored once a Unicode string is attached.
            post_keyboard_event(0, true, Some(chunk))?;
            post_keyboard_event(0, false, Some(chunk))?;
        }
        Ok(())
    }
}

/// Creates, posts, and releases one keyboard event.
fn post_keyboard_event(
    vkcode: u16,
    key_down: bool,
    unicode: Option<&[u16]>,
) -> Result<(), PlatformError> {
    unsafe {
        let source = CGEventSourceCreate(CG_EVENT_SOURCE_STATE_HID_SYSTEM_STATE);
        if source.is_null() {
            return Err(PlatformError::Other(
                "CGEventSourceCreate returned null".into(),
            ));
        }

        let event = CGEventCreateKeyboardEvent(source, vkcode, key_down);
        if event.is_null() {
            CFRelease(source.cast::<c_void>());
            return Err(PlatformError::Other(
                "CGEventCreateKeyboardEvent returned null".into(),
            ));
        }

        if let Some(units) = unicode {
            CGEventKeyboardSetUnicodeString(
                event,
                units.len() as std::ffi::c_ulong,
                units.as_ptr(),
            );
        }

        CGEventPost(CG_SESSION_EVENT_TAP, event);
        CFRelease(event.cast::<c_void>());
        CFRelease(source.cast::<c_void>());
    }
    Ok(())
}

/// Flags and `data1` of an auxiliary control button event: the button in the
/// upper 16 bits, `0xA` (down) or `0xB` (up) in bits 8-15.
fn aux_key_data(aux_key: u32, key_down: bool) -> (u64, i64) {
    let flags: u64 = if key_down { 0xA00 } else { 0xB00 };
    (flags, (i64::from(aux_key) << 16) | flags as i64)
}

/// Posts one media key transition as an `NSSystemDefined` event.
fn post_aux_key_event(aux_key: u32, key_down: bool) -> Result<(), PlatformError> {
    let (flags, data1) = aux_key_data(aux_key, key_down);
    unsafe {
        let event: id = msg_send![class!(NSEvent),
            otherEventWithType: NS_EVENT_TYPE_SYSTEM_DEFINED
            location: NSPoint::new(0.0, 0.0)
            modifierFlags: flags
            timestamp: 0.0f64
            windowNumber: 0i64
            context: nil
            subtype: NX_SUBTYPE_AUX_CONTROL_BUTTONS
            data1: data1
            data2: -1i64];
        if event == nil {
            return Err(PlatformError::Other(
                "NSEvent otherEventWithType returned nil".into(),
            ));
        }

        // Owned by the NSEvent; not released here.
        let cg_event: CGEventRef = msg_send![event, CGEvent];
        if cg_event.is_null() {
            return Err(PlatformError::Other("NSEvent has no CGEvent".into()));
        }
        CGEventPost(CG_HID_EVENT_TAP, cg_event);
    }
    Ok(())
}

fn inject_key(key: KeyCode, state: KeyState) -> Result<(), PlatformError> {
    let key_down = state == KeyState::Down;
    if let Some(vkcode) = keycode_to_vkcode(key) {
        return post_keyboard_event(vkcode, key_down, None);
    }
    let aux_key = keycode_to_aux_key(key).ok_or(PlatformError::UnsupportedKey(key))?;
    post_aux_key_event(aux_key, key_down)
}

// ---------------------------------------------------------------------------
// ActionExecutor trait impl
// ---------------------------------------------------------------------------

impl ActionExecutor for MacOSExecutor {
    fn execute(&self, action: &Action) -> Result<(), PlatformError> {
        let inject_start = std::time::Instant::now();

        match action {
            Action::InjectKey { key, state } => inject_key(*key, *state)?,
            Action::TypeText { text } => self.type_text(text)?,
        }

        log::debug!(
            "executor: injected {:?} in {:.2}ms",
            action,
            inject_start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Keys macOS cannot produce fail before any OS API is called.
    #[test]
    fn media_stop_is_unsupported() {
        let executor = MacOSExecutor::new();
        let result = executor.execute(&Action::InjectKey {
            key: KeyCode::MediaStop,
            state: KeyState::Down,
        });
        assert!(matches!(
            result,
            Err(PlatformError::UnsupportedKey(KeyCode::MediaStop))
        ));
    }

    #[test]
    fn aux_key_data_packs_button_and_state() {
        assert_eq!(aux_key_data(16, true), (0xA00, 0x10_0A00));
        assert_eq!(aux_key_data(16, false), (0xB00, 0x10_0B00));
        assert_eq!(aux_key_data(18, true), (0xA00, 0x12_0A00));
    }

    #[test]
    fn f24_is_unsupported() {
        let executor = MacOSExecutor::new();
        let result = executor.execute(&Action::InjectKey {
            key: KeyCode::F24,
            state: KeyState::Up,
        });
        assert!(matches!(result, Err(PlatformError::UnsupportedKey(KeyCode::F24))));
    }

    /// Empty text posts nothing.
    #[test]
    fn empty_text_is_noop() {
        let executor = MacOSExecutor::new();
        assert!(executor
            .execute(&Action::TypeText {
                text: String::new()
            })
            .is_ok());
    }
}
