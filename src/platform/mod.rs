//! Platform abstraction layer.
//!
//! Defines the canonical `KeyCode` enumeration, the `Action` values a backend
//! injects, and the `ActionExecutor` trait. Platform-specific implementations
//! live in child modules; `create_action_executor` picks the one matching the
//! compile target.

#[cfg(target_os = "linux")]
mod linux;
mod log_executor;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

pub use log_executor::LogExecutor;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Key codes
// ---------------------------------------------------------------------------

/// Canonical key identifiers.
///
/// Each variant carries a stable numeric code (its discriminant). Those codes
/// are what the command catalog stores in selection options and what hosts
/// send back in `data.value` / `data.modifier`, so existing values must never
/// be renumbered.
///
/// Modifiers are unified (`Ctrl`, not `LeftCtrl`/`RightCtrl`); every backend
/// injects the left-hand physical key for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum KeyCode {
    // Letters
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
    I = 8,
    J = 9,
    K = 10,
    L = 11,
    M = 12,
    N = 13,
    O = 14,
    P = 15,
    Q = 16,
    R = 17,
    S = 18,
    T = 19,
    U = 20,
    V = 21,
    W = 22,
    X = 23,
    Y = 24,
    Z = 25,

    // Top-row digits
    Key0 = 26,
    Key1 = 27,
    Key2 = 28,
    Key3 = 29,
    Key4 = 30,
    Key5 = 31,
    Key6 = 32,
    Key7 = 33,
    Key8 = 34,
    Key9 = 35,

    // Function keys
    F1 = 36,
    F2 = 37,
    F3 = 38,
    F4 = 39,
    F5 = 40,
    F6 = 41,
    F7 = 42,
    F8 = 43,
    F9 = 44,
    F10 = 45,
    F11 = 46,
    F12 = 47,
    F13 = 48,
    F14 = 49,
    F15 = 50,
    F16 = 51,
    F17 = 52,
    F18 = 53,
    F19 = 54,
    F20 = 55,
    F21 = 56,
    F22 = 57,
    F23 = 58,
    F24 = 59,

    // Modifiers
    Ctrl = 60,
    Shift = 61,
    Alt = 62,
    /// Windows / Command / Super key.
    Meta = 63,

    // Navigation and editing
    Space = 64,
    Enter = 65,
    Tab = 66,
    Escape = 67,
    Backspace = 68,
    Delete = 69,
    Insert = 70,
    Home = 71,
    End = 72,
    PageUp = 73,
    PageDown = 74,
    Up = 75,
    Down = 76,
    Left = 77,
    Right = 78,

    // Lock and system keys
    CapsLock = 79,
    NumLock = 80,
    ScrollLock = 81,
    PrintScreen = 82,
    Pause = 83,

    // Numeric keypad
    Numpad0 = 84,
    Numpad1 = 85,
    Numpad2 = 86,
    Numpad3 = 87,
    Numpad4 = 88,
    Numpad5 = 89,
    Numpad6 = 90,
    Numpad7 = 91,
    Numpad8 = 92,
    Numpad9 = 93,
    NumpadAdd = 94,
    NumpadSub = 95,
    NumpadMul = 96,
    NumpadDiv = 97,
    NumpadEnter = 98,

    // Punctuation / symbol keys
    Backtick = 99,
    Minus = 100,
    Equal = 101,
    LeftBracket = 102,
    RightBracket = 103,
    Backslash = 104,
    Semicolon = 105,
    Apostrophe = 106,
    Comma = 107,
    Period = 108,
    Slash = 109,

    // Media keys
    MediaPlayPause = 110,
    MediaNext = 111,
    MediaPrev = 112,
    MediaStop = 113,
    VolumeMute = 114,
    VolumeDown = 115,
    VolumeUp = 116,
}

impl KeyCode {
    /// Every variant, in code order.
    pub const ALL: [KeyCode; 117] = [
        KeyCode::A,
        KeyCode::B,
        KeyCode::C,
        KeyCode::D,
        KeyCode::E,
        KeyCode::F,
        KeyCode::G,
        KeyCode::H,
        KeyCode::I,
        KeyCode::J,
        KeyCode::K,
        KeyCode::L,
        KeyCode::M,
        KeyCode::N,
        KeyCode::O,
        KeyCode::P,
        KeyCode::Q,
        KeyCode::R,
        KeyCode::S,
        KeyCode::T,
        KeyCode::U,
        KeyCode::V,
        KeyCode::W,
        KeyCode::X,
        KeyCode::Y,
        KeyCode::Z,
        KeyCode::Key0,
        KeyCode::Key1,
        KeyCode::Key2,
        KeyCode::Key3,
        KeyCode::Key4,
        KeyCode::Key5,
        KeyCode::Key6,
        KeyCode::Key7,
        KeyCode::Key8,
        KeyCode::Key9,
        KeyCode::F1,
        KeyCode::F2,
        KeyCode::F3,
        KeyCode::F4,
        KeyCode::F5,
        KeyCode::F6,
        KeyCode::F7,
        KeyCode::F8,
        KeyCode::F9,
        KeyCode::F10,
        KeyCode::F11,
        KeyCode::F12,
        KeyCode::F13,
        KeyCode::F14,
        KeyCode::F15,
        KeyCode::F16,
        KeyCode::F17,
        KeyCode::F18,
        KeyCode::F19,
        KeyCode::F20,
        KeyCode::F21,
        KeyCode::F22,
        KeyCode::F23,
        KeyCode::F24,
        KeyCode::Ctrl,
        KeyCode::Shift,
        KeyCode::Alt,
        KeyCode::Meta,
        KeyCode::Space,
        KeyCode::Enter,
        KeyCode::Tab,
        KeyCode::Escape,
        KeyCode::Backspace,
        KeyCode::Delete,
        KeyCode::Insert,
        KeyCode::Home,
        KeyCode::End,
        KeyCode::PageUp,
        KeyCode::PageDown,
        KeyCode::Up,
        KeyCode::Down,
        KeyCode::Left,
        KeyCode::Right,
        KeyCode::CapsLock,
        KeyCode::NumLock,
        KeyCode::ScrollLock,
        KeyCode::PrintScreen,
        KeyCode::Pause,
        KeyCode::Numpad0,
        KeyCode::Numpad1,
        KeyCode::Numpad2,
        KeyCode::Numpad3,
        KeyCode::Numpad4,
        KeyCode::Numpad5,
        KeyCode::Numpad6,
        KeyCode::Numpad7,
        KeyCode::Numpad8,
        KeyCode::Numpad9,
        KeyCode::NumpadAdd,
        KeyCode::NumpadSub,
        KeyCode::NumpadMul,
        KeyCode::NumpadDiv,
        KeyCode::NumpadEnter,
        KeyCode::Backtick,
        KeyCode::Minus,
        KeyCode::Equal,
        KeyCode::LeftBracket,
        KeyCode::RightBracket,
        KeyCode::Backslash,
        KeyCode::Semicolon,
        KeyCode::Apostrophe,
        KeyCode::Comma,
        KeyCode::Period,
        KeyCode::Slash,
        KeyCode::MediaPlayPause,
        KeyCode::MediaNext,
        KeyCode::MediaPrev,
        KeyCode::MediaStop,
        KeyCode::VolumeMute,
        KeyCode::VolumeDown,
        KeyCode::VolumeUp,
    ];

    /// Stable numeric code for this key.
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Looks up the key for a numeric code. `None` for unassigned codes.
    pub fn from_code(code: u32) -> Option<KeyCode> {
        // Codes are dense and ALL is in code order.
        KeyCode::ALL
            .get(usize::try_from(code).ok()?)
            .copied()
            .filter(|key| key.code() == code)
    }
}

/// Direction of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Down,
    Up,
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// A single unit of work for an `ActionExecutor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Press or release one key.
    InjectKey { key: KeyCode, state: KeyState },
    /// Type a string literally, independent of the active keyboard layout
    /// where the backend allows it.
    TypeText { text: String },
}

/// Injects `Action`s into the operating system's input stream.
///
/// `execute` returns once the backend has accepted the event, so callers that
/// issue actions one after another observe them in that order.
pub trait ActionExecutor: Send + Sync {
    fn execute(&self, action: &Action) -> Result<(), PlatformError>;
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum PlatformError {
    /// No usable injection backend in this session.
    #[error("input injection unavailable: {0}")]
    Unavailable(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// The backend has no native code for this key.
    #[error("key {0:?} is not supported by this backend")]
    UnsupportedKey(KeyCode),
    #[error("{0}")]
    Other(String),
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Returns the native `ActionExecutor` for the current platform and session.
#[cfg(target_os = "linux")]
pub fn create_action_executor() -> Result<Box<dyn ActionExecutor>, PlatformError> {
    linux::create_action_executor()
}

/// Returns the native `ActionExecutor` for the current platform and session.
#[cfg(target_os = "windows")]
pub fn create_action_executor() -> Result<Box<dyn ActionExecutor>, PlatformError> {
    windows::create_action_executor()
}

/// Returns the native `ActionExecutor` for the current platform and session.
#[cfg(target_os = "macos")]
pub fn create_action_executor() -> Result<Box<dyn ActionExecutor>, PlatformError> {
    macos::create_action_executor()
}

/// Returns the native `ActionExecutor` for the current platform and session.
#[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
pub fn create_action_executor() -> Result<Box<dyn ActionExecutor>, PlatformError> {
    Err(PlatformError::Unavailable(
        "no input injection backend for this operating system".into(),
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn all_is_in_code_order() {
        for (index, key) in KeyCode::ALL.iter().enumerate() {
            assert_eq!(key.code() as usize, index, "{key:?} is out of order");
        }
    }

    #[test]
    fn codes_round_trip() {
        for key in KeyCode::ALL {
            assert_eq!(KeyCode::from_code(key.code()), Some(key));
        }
    }

    #[test]
    fn codes_are_distinct() {
        let codes: HashSet<u32> = KeyCode::ALL.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), KeyCode::ALL.len());
    }

    #[test]
    fn unassigned_codes_return_none() {
        assert_eq!(KeyCode::from_code(KeyCode::ALL.len() as u32), None);
        assert_eq!(KeyCode::from_code(9999), None);
        assert_eq!(KeyCode::from_code(u32::MAX), None);
    }

    #[test]
    fn spot_check_stable_codes() {
        assert_eq!(KeyCode::A.code(), 0);
        assert_eq!(KeyCode::Ctrl.code(), 60);
        assert_eq!(KeyCode::Space.code(), 64);
        assert_eq!(KeyCode::MediaPlayPause.code(), 110);
        assert_eq!(KeyCode::VolumeUp.code(), 116);
    }
}
