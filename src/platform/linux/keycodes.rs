//! Linux injection codes.
//!
//! - `keycode_to_evdev`: canonical `KeyCode` to a Linux input event key code
//!   (`linux/input-event-codes.h`), the namespace the RemoteDesktop portal's
//!   `NotifyKeyboardKeycode` expects.
//! - `keycode_to_x11`: the same key as an X server keycode, for XTEST.
//! - `char_to_keysym`: a character to an X11 keysym for
//!   `NotifyKeyboardKeysym` (or a temporary X keyboard mapping), used to
//!   type text independent of the layout.

use crate::platform::KeyCode;

// ---------------------------------------------------------------------------
// KeyCode → evdev code
// ---------------------------------------------------------------------------

/// Converts a canonical `KeyCode` to a Linux evdev keycode.
///
/// Unified modifier variants map to their left-side physical key.
pub fn keycode_to_evdev(key: KeyCode) -> u32 {
    match key {
        // Letters
        KeyCode::A => 30,
        KeyCode::B => 48,
        KeyCode::C => 46,
        KeyCode::D => 32,
        KeyCode::E => 18,
        KeyCode::F => 33,
        KeyCode::G => 34,
        KeyCode::H => 35,
        KeyCode::I => 23,
        KeyCode::J => 36,
        KeyCode::K => 37,
        KeyCode::L => 38,
        KeyCode::M => 50,
        KeyCode::N => 49,
        KeyCode::O => 24,
        KeyCode::P => 25,
        KeyCode::Q => 16,
        KeyCode::R => 19,
        KeyCode::S => 31,
        KeyCode::T => 20,
        KeyCode::U => 22,
        KeyCode::V => 47,
        KeyCode::W => 17,
        KeyCode::X => 45,
        KeyCode::Y => 21,
        KeyCode::Z => 44,

        // Top-row digits (KEY_1 = 2 .. KEY_0 = 11)
        KeyCode::Key1 => 2,
        KeyCode::Key2 => 3,
        KeyCode::Key3 => 4,
        KeyCode::Key4 => 5,
        KeyCode::Key5 => 6,
        KeyCode::Key6 => 7,
        KeyCode::Key7 => 8,
        KeyCode::Key8 => 9,
        KeyCode::Key9 => 10,
        KeyCode::Key0 => 11,

        // Function keys F1–F12
        KeyCode::F1 => 59,
        KeyCode::F2 => 60,
        KeyCode::F3 => 61,
        KeyCode::F4 => 62,
        KeyCode::F5 => 63,
        KeyCode::F6 => 64,
        KeyCode::F7 => 65,
        KeyCode::F8 => 66,
        KeyCode::F9 => 67,
        KeyCode::F10 => 68,
        KeyCode::F11 => 87,
        KeyCode::F12 => 88,

        // Function keys F13–F24
        KeyCode::F13 => 183,
        KeyCode::F14 => 184,
        KeyCode::F15 => 185,
        KeyCode::F16 => 186,
        KeyCode::F17 => 187,
        KeyCode::F18 => 188,
        KeyCode::F19 => 189,
        KeyCode::F20 => 190,
        KeyCode::F21 => 191,
        KeyCode::F22 => 192,
        KeyCode::F23 => 193,
        KeyCode::F24 => 194,

        // Modifiers: left-side variant.
        KeyCode::Ctrl => 29,
        KeyCode::Shift => 42,
        KeyCode::Alt => 56,
        KeyCode::Meta => 125,

        // Navigation and editing
        KeyCode::Space => 57,
        KeyCode::Enter => 28,
        KeyCode::Tab => 15,
        KeyCode::Escape => 1,
        KeyCode::Backspace => 14,
        KeyCode::Delete => 111,
        KeyCode::Insert => 110,
        KeyCode::Home => 102,
        KeyCode::End => 107,
        KeyCode::PageUp => 104,
        KeyCode::PageDown => 109,
        KeyCode::Up => 103,
        KeyCode::Down => 108,
        KeyCode::Left => 105,
        KeyCode::Right => 106,

        // Lock and system keys
        KeyCode::CapsLock => 58,
        KeyCode::NumLock => 69,
        KeyCode::ScrollLock => 70,
        KeyCode::PrintScreen => 99,
        KeyCode::Pause => 119,

        // Numeric keypad
        KeyCode::Numpad0 => 82,
        KeyCode::Numpad1 => 79,
        KeyCode::Numpad2 => 80,
        KeyCode::Numpad3 => 81,
        KeyCode::Numpad4 => 75,
        KeyCode::Numpad5 => 76,
        KeyCode::Numpad6 => 77,
        KeyCode::Numpad7 => 71,
        KeyCode::Numpad8 => 72,
        KeyCode::Numpad9 => 73,
        KeyCode::NumpadAdd => 78,
        KeyCode::NumpadSub => 74,
        KeyCode::NumpadMul => 55,
        KeyCode::NumpadDiv => 98,
        KeyCode::NumpadEnter => 96,

        // Punctuation / symbol keys
        KeyCode::Backtick => 41,
        KeyCode::Minus => 12,
        KeyCode::Equal => 13,
        KeyCode::LeftBracket => 26,
        KeyCode::RightBracket => 27,
        KeyCode::Backslash => 43,
        KeyCode::Semicolon => 39,
        KeyCode::Apostrophe => 40,
        KeyCode::Comma => 51,
        KeyCode::Period => 52,
        KeyCode::Slash => 53,

        // Media keys
        KeyCode::VolumeMute => 113,
        KeyCode::VolumeDown => 114,
        KeyCode::VolumeUp => 115,
        KeyCode::MediaNext => 163,
        KeyCode::MediaPlayPause => 164,
        KeyCode::MediaPrev => 165,
        KeyCode::MediaStop => 166,
    }
}

/// X servers with the evdev or libinput driver number keys as the evdev code
/// plus 8.
const X11_KEYCODE_OFFSET: u32 = 8;

/// Converts a canonical `KeyCode` to an X server keycode.
pub fn keycode_to_x11(key: KeyCode) -> u8 {
    (keycode_to_evdev(key) + X11_KEYCODE_OFFSET) as u8
}

// ---------------------------------------------------------------------------
// char → keysym
// ---------------------------------------------------------------------------

/// `XK_BackSpace`, `XK_Tab`, `XK_Return`.
const XK_BACKSPACE: u32 = 0xff08;
const XK_TAB: u32 = 0xff09;
const XK_RETURN: u32 = 0xff0d;

/// Offset of the Unicode keysym range (`0x01000000 + code point`).
const UNICODE_KEYSYM_OFFSET: u32 = 0x0100_0000;

/// Converts a character to the keysym that types it.
///
/// Printable Latin-1 characters are their own keysyms; the control
/// characters with a key of their own map to that key; everything else uses
/// the Unicode keysym range. Other control characters have no keysym.
pub fn char_to_keysym(c: char) -> Option<u32> {
    let cp = c as u32;
    match c {
        '\n' | '\r' => Some(XK_RETURN),
        '\t' => Some(XK_TAB),
        '\u{8}' => Some(XK_BACKSPACE),
        _ if c.is_control() => None,
        ' '..='~' | '\u{a0}'..='\u{ff}' => Some(cp),
        _ => Some(UNICODE_KEYSYM_OFFSET + cp),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Every KeyCode maps to its own evdev code.
    #[test]
    fn evdev_codes_are_distinct() {
        let mut seen: HashMap<u32, KeyCode> = HashMap::new();
        for key in KeyCode::ALL {
            let code = keycode_to_evdev(key);
            if let Some(previous) = seen.insert(code, key) {
                panic!("{key:?} and {previous:?} both map to evdev {code}");
            }
        }
    }

    #[test]
    fn modifiers_use_left_side_codes() {
        assert_eq!(keycode_to_evdev(KeyCode::Ctrl), 29);
        assert_eq!(keycode_to_evdev(KeyCode::Shift), 42);
        assert_eq!(keycode_to_evdev(KeyCode::Alt), 56);
        assert_eq!(keycode_to_evdev(KeyCode::Meta), 125);
    }

    #[test]
    fn spot_check_letter_codes() {
        assert_eq!(keycode_to_evdev(KeyCode::A), 30);
        assert_eq!(keycode_to_evdev(KeyCode::Z), 44);
        assert_eq!(keycode_to_evdev(KeyCode::Q), 16);
        assert_eq!(keycode_to_evdev(KeyCode::M), 50);
    }

    #[test]
    fn spot_check_digit_codes() {
        assert_eq!(keycode_to_evdev(KeyCode::Key1), 2);
        assert_eq!(keycode_to_evdev(KeyCode::Key0), 11);
    }

    #[test]
    fn spot_check_function_key_codes() {
        assert_eq!(keycode_to_evdev(KeyCode::F1), 59);
        assert_eq!(keycode_to_evdev(KeyCode::F12), 88);
        assert_eq!(keycode_to_evdev(KeyCode::F13), 183);
        assert_eq!(keycode_to_evdev(KeyCode::F24), 194);
    }

    #[test]
    fn media_key_codes() {
        assert_eq!(keycode_to_evdev(KeyCode::MediaPlayPause), 164);
        assert_eq!(keycode_to_evdev(KeyCode::MediaNext), 163);
        assert_eq!(keycode_to_evdev(KeyCode::MediaPrev), 165);
        assert_eq!(keycode_to_evdev(KeyCode::MediaStop), 166);
        assert_eq!(keycode_to_evdev(KeyCode::VolumeMute), 113);
        assert_eq!(keycode_to_evdev(KeyCode::VolumeDown), 114);
        assert_eq!(keycode_to_evdev(KeyCode::VolumeUp), 115);
    }

    #[test]
    fn x11_keycodes_are_evdev_plus_eight_and_distinct() {
        assert_eq!(keycode_to_x11(KeyCode::Escape), 9);
        assert_eq!(keycode_to_x11(KeyCode::A), 38);
        assert_eq!(keycode_to_x11(KeyCode::MediaPlayPause), 172);
        let mut seen = std::collections::HashSet::new();
        for key in KeyCode::ALL {
            let x11 = keycode_to_x11(key);
            assert_eq!(u32::from(x11), keycode_to_evdev(key) + 8, "{key:?}");
            assert!(seen.insert(x11), "{key:?} shares X keycode {x11}");
        }
    }

    #[test]
    fn ascii_and_latin1_are_their_own_keysyms() {
        assert_eq!(char_to_keysym('a'), Some(0x61));
        assert_eq!(char_to_keysym(' '), Some(0x20));
        assert_eq!(char_to_keysym('~'), Some(0x7e));
        assert_eq!(char_to_keysym('é'), Some(0xe9));
    }

    #[test]
    fn other_characters_use_unicode_range() {
        assert_eq!(char_to_keysym('€'), Some(0x0100_20ac));
        assert_eq!(char_to_keysym('ж'), Some(0x0100_0436));
    }

    #[test]
    fn control_characters() {
        assert_eq!(char_to_keysym('\n'), Some(XK_RETURN));
        assert_eq!(char_to_keysym('\t'), Some(XK_TAB));
        assert_eq!(char_to_keysym('\u{7}'), None);
        assert_eq!(char_to_keysym('\u{7f}'), None);
    }
}
