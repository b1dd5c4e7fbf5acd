//! `KeyCode` -> macOS virtual key code (`CGKeyCode`) for injection.
//!
//! Codes are the `kVK_*` constants from `HIToolbox/Events.h`. They identify
//! physical ANSI key positions, so letters and punctuation follow the US
//! layout regardless of the user's input source.

use crate::platform::KeyCode;

/// Media key codes from `IOKit/hidsystem/ev_keymap.h` (`NX_KEYTYPE_*`).
pub const NX_KEYTYPE_PLAY: u32 = 16;
pub const NX_KEYTYPE_NEXT: u32 = 17;
pub const NX_KEYTYPE_PREVIOUS: u32 = 18;

/// Converts a canonical `KeyCode` to a macOS `CGKeyCode`.
///
/// Returns `None` for keys without a virtual key code: F21-F24 and the
/// playback media keys (those are delivered as `NX_SYSDEFINED` events, see
/// `keycode_to_aux_key`). Modifier keys use the left-hand variant.
/// `PrintScreen`, `ScrollLock`, and `Pause` share F13, F14, and F15, the
/// usual macOS extended-keyboard convention.
pub fn keycode_to_vkcode(key: KeyCode) -> Option<u16> {
    let vk = match key {
        // Letters
        KeyCode::A => 0x00,
        KeyCode::B => 0x0B,
        KeyCode::C => 0x08,
        KeyCode::D => 0x02,
        KeyCode::E => 0x0E,
        KeyCode::F => 0x03,
        KeyCode::G => 0x05,
        KeyCode::H => 0x04,
        KeyCode::I => 0x22,
        KeyCode::J => 0x26,
        KeyCode::K => 0x28,
        KeyCode::L => 0x25,
        KeyCode::M => 0x2E,
        KeyCode::N => 0x2D,
        KeyCode::O => 0x1F,
        KeyCode::P => 0x23,
        KeyCode::Q => 0x0C,
        KeyCode::R => 0x0F,
        KeyCode::S => 0x01,
        KeyCode::T => 0x11,
        KeyCode::U => 0x20,
        KeyCode::V => 0x09,
        KeyCode::W => 0x0D,
        KeyCode::X => 0x07,
        KeyCode::Y => 0x10,
        KeyCode::Z => 0x06,

        // Top-row digits
        KeyCode::Key0 => 0x1D,
        KeyCode::Key1 => 0x12,
        KeyCode::Key2 => 0x13,
        KeyCode::Key3 => 0x14,
        KeyCode::Key4 => 0x15,
        KeyCode::Key5 => 0x17,
        KeyCode::Key6 => 0x16,
        KeyCode::Key7 => 0x1A,
        KeyCode::Key8 => 0x1C,
        KeyCode::Key9 => 0x19,

        // Function keys
        KeyCode::F1 => 0x7A,
        KeyCode::F2 => 0x78,
        KeyCode::F3 => 0x63,
        KeyCode::F4 => 0x76,
        KeyCode::F5 => 0x60,
        KeyCode::F6 => 0x61,
        KeyCode::F7 => 0x62,
        KeyCode::F8 => 0x64,
        KeyCode::F9 => 0x65,
        KeyCode::F10 => 0x6D,
        KeyCode::F11 => 0x67,
        KeyCode::F12 => 0x6F,
        KeyCode::F13 | KeyCode::PrintScreen => 0x69,
        KeyCode::F14 | KeyCode::ScrollLock => 0x6B,
        KeyCode::F15 | KeyCode::Pause => 0x71,
        KeyCode::F16 => 0x6A,
        KeyCode::F17 => 0x40,
        KeyCode::F18 => 0x4F,
        KeyCode::F19 => 0x50,
        KeyCode::F20 => 0x5A,
        KeyCode::F21 | KeyCode::F22 | KeyCode::F23 | KeyCode::F24 => return None,

        // Modifiers: left-hand variant.
        KeyCode::Ctrl => 0x3B,
        KeyCode::Shift => 0x38,
        KeyCode::Alt => 0x3A,
        KeyCode::Meta => 0x37,

        // Navigation and editing. Insert has no key on Apple keyboards; Help
        // sits in its position.
        KeyCode::Space => 0x31,
        KeyCode::Enter => 0x24,
        KeyCode::Tab => 0x30,
        KeyCode::Escape => 0x35,
        KeyCode::Backspace => 0x33,
        KeyCode::Delete => 0x75,
        KeyCode::Insert => 0x72,
        KeyCode::Home => 0x73,
        KeyCode::End => 0x77,
        KeyCode::PageUp => 0x74,
        KeyCode::PageDown => 0x79,
        KeyCode::Up => 0x7E,
        KeyCode::Down => 0x7D,
        KeyCode::Left => 0x7B,
        KeyCode::Right => 0x7C,

        // Lock keys. NumLock is the keypad Clear key.
        KeyCode::CapsLock => 0x39,
        KeyCode::NumLock => 0x47,

        // Numeric keypad
        KeyCode::Numpad0 => 0x52,
        KeyCode::Numpad1 => 0x53,
        KeyCode::Numpad2 => 0x54,
        KeyCode::Numpad3 => 0x55,
        KeyCode::Numpad4 => 0x56,
        KeyCode::Numpad5 => 0x57,
        KeyCode::Numpad6 => 0x58,
        KeyCode::Numpad7 => 0x59,
        KeyCode::Numpad8 => 0x5B,
        KeyCode::Numpad9 => 0x5C,
        KeyCode::NumpadAdd => 0x45,
        KeyCode::NumpadSub => 0x4E,
        KeyCode::NumpadMul => 0x43,
        KeyCode::NumpadDiv => 0x4B,
        KeyCode::NumpadEnter => 0x4C,

        // Punctuation / symbol keys
        KeyCode::Backtick => 0x32,
        KeyCode::Minus => 0x1B,
        KeyCode::Equal => 0x18,
        KeyCode::LeftBracket => 0x21,
        KeyCode::RightBracket => 0x1E,
        KeyCode::Backslash => 0x2A,
        KeyCode::Semicolon => 0x29,
        KeyCode::Apostrophe => 0x27,
        KeyCode::Comma => 0x2B,
        KeyCode::Period => 0x2F,
        KeyCode::Slash => 0x2C,

        // Media: only the volume keys have virtual key codes.
        KeyCode::VolumeUp => 0x48,
        KeyCode::VolumeDown => 0x49,
        KeyCode::VolumeMute => 0x4A,
        KeyCode::MediaPlayPause
        | KeyCode::MediaNext
        | KeyCode::MediaPrev
        | KeyCode::MediaStop => return None,
    };
    Some(vk)
}

/// Converts a playback media key to its `NX_KEYTYPE_*` code.
///
/// `MediaStop` has no auxiliary control button on macOS and maps to `None`,
/// as does every key that is not a playback key.
pub fn keycode_to_aux_key(key: KeyCode) -> Option<u32> {
    match key {
        KeyCode::MediaPlayPause => Some(NX_KEYTYPE_PLAY),
        KeyCode::MediaNext => Some(NX_KEYTYPE_NEXT),
        KeyCode::MediaPrev => Some(NX_KEYTYPE_PREVIOUS),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn spot_check_letter_and_digit_codes() {
        assert_eq!(keycode_to_vkcode(KeyCode::A), Some(0x00));
        assert_eq!(keycode_to_vkcode(KeyCode::Z), Some(0x06));
        assert_eq!(keycode_to_vkcode(KeyCode::Key0), Some(0x1D));
        assert_eq!(keycode_to_vkcode(KeyCode::Key9), Some(0x19));
    }

    #[test]
    fn modifiers_use_left_hand_codes() {
        assert_eq!(keycode_to_vkcode(KeyCode::Ctrl), Some(0x3B));
        assert_eq!(keycode_to_vkcode(KeyCode::Shift), Some(0x38));
        assert_eq!(keycode_to_vkcode(KeyCode::Alt), Some(0x3A));
        assert_eq!(keycode_to_vkcode(KeyCode::Meta), Some(0x37));
    }

    #[test]
    fn volume_keys_have_codes_but_playback_keys_do_not() {
        assert_eq!(keycode_to_vkcode(KeyCode::VolumeUp), Some(0x48));
        assert_eq!(keycode_to_vkcode(KeyCode::VolumeDown), Some(0x49));
        assert_eq!(keycode_to_vkcode(KeyCode::VolumeMute), Some(0x4A));
        for key in [
            KeyCode::MediaPlayPause,
            KeyCode::MediaNext,
            KeyCode::MediaPrev,
            KeyCode::MediaStop,
        ] {
            assert_eq!(keycode_to_vkcode(key), None, "{key:?}");
        }
    }

    #[test]
    fn playback_keys_map_to_aux_control_buttons() {
        assert_eq!(keycode_to_aux_key(KeyCode::MediaPlayPause), Some(16));
        assert_eq!(keycode_to_aux_key(KeyCode::MediaNext), Some(17));
        assert_eq!(keycode_to_aux_key(KeyCode::MediaPrev), Some(18));
        assert_eq!(keycode_to_aux_key(KeyCode::MediaStop), None);
        assert_eq!(keycode_to_aux_key(KeyCode::VolumeUp), None);
        assert_eq!(keycode_to_aux_key(KeyCode::A), None);
    }

    /// Every key is reachable through exactly one of the two tables, except
    /// the ones macOS cannot produce at all.
    #[test]
    fn virtual_and_aux_tables_do_not_overlap() {
        let unreachable = [
            KeyCode::F21,
            KeyCode::F22,
            KeyCode::F23,
            KeyCode::F24,
            KeyCode::MediaStop,
        ];
        for key in KeyCode::ALL {
            let vk = keycode_to_vkcode(key).is_some();
            let aux = keycode_to_aux_key(key).is_some();
            if unreachable.contains(&key) {
                assert!(!vk && !aux, "{key:?}");
            } else {
                assert!(vk != aux, "{key:?}");
            }
        }
    }

    #[test]
    fn f21_f24_have_no_vkcode() {
        for key in [KeyCode::F21, KeyCode::F22, KeyCode::F23, KeyCode::F24] {
            assert_eq!(keycode_to_vkcode(key), None, "{key:?}");
        }
    }

    /// Apart from the deliberate F13-F15 aliases, no two keys share a code.
    #[test]
    fn mapped_codes_are_distinct() {
        let aliases = [KeyCode::PrintScreen, KeyCode::ScrollLock, KeyCode::Pause];
        let mut seen: HashMap<u16, KeyCode> = HashMap::new();
        for key in KeyCode::ALL {
            if aliases.contains(&key) {
                continue;
            }
            let Some(vk) = keycode_to_vkcode(key) else {
                continue;
            };
            if let Some(previous) = seen.insert(vk, key) {
                panic!("{key:?} and {previous:?} both map to {vk:#04x}");
            }
        }
    }
}
