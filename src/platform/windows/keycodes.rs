//! `KeyCode` -> Windows virtual key code (u16) for injection.
//!
//! VK codes are from the Windows SDK (winuser.h). Modifiers emit the
//! left-hand variant (VK_LSHIFT, VK_LCONTROL, ...).
//!
//! `keycode_to_vkcode` returns `(vk, extra_flags)` where `extra_flags` is
//! `KEYEVENTF_EXTENDEDKEY` (0x0001) for keys that require it (navigation keys,
//! NumpadEnter, NumpadDiv, media keys) and 0 otherwise. The executor ORs in
//! `KEYEVENTF_KEYUP` (0x0002) for key-up events.

use crate::platform::KeyCode;

/// `KEYEVENTF_EXTENDEDKEY`, set in `KEYBDINPUT.dwFlags` for extended keys.
pub const EXTENDED: u32 = 0x0001;

/// Converts a canonical `KeyCode` to a Windows virtual key code and extra
/// `dwFlags` bits for `KEYBDINPUT`. Every key has a mapping.
pub fn keycode_to_vkcode(key: KeyCode) -> (u16, u32) {
    match key {
        // Letters (VK_A = 0x41 .. VK_Z = 0x5A, same as ASCII uppercase)
        KeyCode::A => (0x41, 0),
        KeyCode::B => (0x42, 0),
        KeyCode::C => (0x43, 0),
        KeyCode::D => (0x44, 0),
        KeyCode::E => (0x45, 0),
        KeyCode::F => (0x46, 0),
        KeyCode::G => (0x47, 0),
        KeyCode::H => (0x48, 0),
        KeyCode::I => (0x49, 0),
        KeyCode::J => (0x4A, 0),
        KeyCode::K => (0x4B, 0),
        KeyCode::L => (0x4C, 0),
        KeyCode::M => (0x4D, 0),
        KeyCode::N => (0x4E, 0),
        KeyCode::O => (0x4F, 0),
        KeyCode::P => (0x50, 0),
        KeyCode::Q => (0x51, 0),
        KeyCode::R => (0x52, 0),
        KeyCode::S => (0x53, 0),
        KeyCode::T => (0x54, 0),
        KeyCode::U => (0x55, 0),
        KeyCode::V => (0x56, 0),
        KeyCode::W => (0x57, 0),
        KeyCode::X => (0x58, 0),
        KeyCode::Y => (0x59, 0),
        KeyCode::Z => (0x5A, 0),

        // Top-row digits (VK_0 = 0x30 .. VK_9 = 0x39)
        KeyCode::Key0 => (0x30, 0),
        KeyCode::Key1 => (0x31, 0),
        KeyCode::Key2 => (0x32, 0),
        KeyCode::Key3 => (0x33, 0),
        KeyCode::Key4 => (0x34, 0),
        KeyCode::Key5 => (0x35, 0),
        KeyCode::Key6 => (0x36, 0),
        KeyCode::Key7 => (0x37, 0),
        KeyCode::Key8 => (0x38, 0),
        KeyCode::Key9 => (0x39, 0),

        // Function keys (VK_F1 = 0x70 .. VK_F24 = 0x87)
        KeyCode::F1 => (0x70, 0),
        KeyCode::F2 => (0x71, 0),
        KeyCode::F3 => (0x72, 0),
        KeyCode::F4 => (0x73, 0),
        KeyCode::F5 => (0x74, 0),
        KeyCode::F6 => (0x75, 0),
        KeyCode::F7 => (0x76, 0),
        KeyCode::F8 => (0x77, 0),
        KeyCode::F9 => (0x78, 0),
        KeyCode::F10 => (0x79, 0),
        KeyCode::F11 => (0x7A, 0),
        KeyCode::F12 => (0x7B, 0),
        KeyCode::F13 => (0x7C, 0),
        KeyCode::F14 => (0x7D, 0),
        KeyCode::F15 => (0x7E, 0),
        KeyCode::F16 => (0x7F, 0),
        KeyCode::F17 => (0x80, 0),
        KeyCode::F18 => (0x81, 0),
        KeyCode::F19 => (0x82, 0),
        KeyCode::F20 => (0x83, 0),
        KeyCode::F21 => (0x84, 0),
        KeyCode::F22 => (0x85, 0),
        KeyCode::F23 => (0x86, 0),
        KeyCode::F24 => (0x87, 0),

        // Modifiers: left-hand variant.
        KeyCode::Shift => (0xA0, 0), // VK_LSHIFT
        KeyCode::Ctrl => (0xA2, 0),  // VK_LCONTROL
        KeyCode::Alt => (0xA4, 0),   // VK_LMENU
        KeyCode::Meta => (0x5B, 0),  // VK_LWIN

        // Navigation and editing. The cursor block needs EXTENDED to be told
        // apart from the numpad keys sharing its VK codes.
        KeyCode::Space => (0x20, 0),
        KeyCode::Enter => (0x0D, 0),
        KeyCode::NumpadEnter => (0x0D, EXTENDED),
        KeyCode::Tab => (0x09, 0),
        KeyCode::Escape => (0x1B, 0),
        KeyCode::Backspace => (0x08, 0),
        KeyCode::Delete => (0x2E, EXTENDED),
        KeyCode::Insert => (0x2D, EXTENDED),
        KeyCode::Home => (0x24, EXTENDED),
        KeyCode::End => (0x23, EXTENDED),
        KeyCode::PageUp => (0x21, EXTENDED),
        KeyCode::PageDown => (0x22, EXTENDED),
        KeyCode::Up => (0x26, EXTENDED),
        KeyCode::Down => (0x28, EXTENDED),
        KeyCode::Left => (0x25, EXTENDED),
        KeyCode::Right => (0x27, EXTENDED),

        // Lock and system keys
        KeyCode::CapsLock => (0x14, 0),
        KeyCode::NumLock => (0x90, 0),
        KeyCode::ScrollLock => (0x91, 0),
        KeyCode::PrintScreen => (0x2C, 0),
        KeyCode::Pause => (0x13, 0),

        // Numeric keypad
        KeyCode::Numpad0 => (0x60, 0),
        KeyCode::Numpad1 => (0x61, 0),
        KeyCode::Numpad2 => (0x62, 0),
        KeyCode::Numpad3 => (0x63, 0),
        KeyCode::Numpad4 => (0x64, 0),
        KeyCode::Numpad5 => (0x65, 0),
        KeyCode::Numpad6 => (0x66, 0),
        KeyCode::Numpad7 => (0x67, 0),
        KeyCode::Numpad8 => (0x68, 0),
        KeyCode::Numpad9 => (0x69, 0),
        KeyCode::NumpadAdd => (0x6B, 0),
        KeyCode::NumpadSub => (0x6D, 0),
        KeyCode::NumpadMul => (0x6A, 0),
        KeyCode::NumpadDiv => (0x6F, EXTENDED),

        // Punctuation / symbol keys (VK_OEM_*, US layout positions)
        KeyCode::Backtick => (0xC0, 0),
        KeyCode::Minus => (0xBD, 0),
        KeyCode::Equal => (0xBB, 0),
        KeyCode::LeftBracket => (0xDB, 0),
        KeyCode::RightBracket => (0xDD, 0),
        KeyCode::Backslash => (0xDC, 0),
        KeyCode::Semicolon => (0xBA, 0),
        KeyCode::Apostrophe => (0xDE, 0),
        KeyCode::Comma => (0xBC, 0),
        KeyCode::Period => (0xBE, 0),
        KeyCode::Slash => (0xBF, 0),

        // Media keys (VK_VOLUME_* / VK_MEDIA_*)
        KeyCode::VolumeMute => (0xAD, EXTENDED),
        KeyCode::VolumeDown => (0xAE, EXTENDED),
        KeyCode::VolumeUp => (0xAF, EXTENDED),
        KeyCode::MediaNext => (0xB0, EXTENDED),
        KeyCode::MediaPrev => (0xB1, EXTENDED),
        KeyCode::MediaStop => (0xB2, EXTENDED),
        KeyCode::MediaPlayPause => (0xB3, EXTENDED),
    }
}
