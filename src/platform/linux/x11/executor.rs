//! X11 action executor via the XTEST extension.
//!
//! `LinuxX11Executor` implements `ActionExecutor` over one `x11rb`
//! connection. Each key event is a `FakeInput` request whose void cookie is
//! checked, so the server has processed the event (and reported any error)
//! before `execute()` returns.
//!
//! Keys are sent as X keycodes (evdev code + 8). Text goes through a spare
//! keycode: for every character the keycode is mapped to the character's
//! keysym, pressed, and released. The keycode is unmapped again when the
//! text is done.

use std::sync::{Mutex, PoisonError};

use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    ConnectionExt as _, Keycode, Keysym, Window, KEY_PRESS_EVENT, KEY_RELEASE_EVENT,
};
use x11rb::protocol::xtest::ConnectionExt as _;
use x11rb::rust_connection::RustConnection;

use super::super::keycodes::{char_to_keysym, keycode_to_x11};
use crate::platform::{Action, ActionExecutor, KeyState, PlatformError};

/// Keysym value of an unmapped slot.
const NO_SYMBOL: Keysym = 0;

/// Injects keyboard events via XTEST on X11.
pub struct LinuxX11Executor {
    conn: RustConnection,
    root: Window,
    /// Keycode without keysyms, borrowed while typing text.
    spare_keycode: Option<Keycode>,
    keysyms_per_keycode: u8,
    /// Serializes text typing, which rewrites the spare keycode's mapping.
    typing: Mutex<()>,
}

impl LinuxX11Executor {
    /// Connects to `$DISPLAY` and checks that the XTEST extension is present.
    pub fn new() -> Result<Self, PlatformError> {
        let (conn, screen_num) = x11rb::connect(None)
            .map_err(|e| PlatformError::Unavailable(format!("cannot connect to X server: {e}")))?;

        let version = conn
            .xtest_get_version(2, 2)
            .map_err(x11_error)?
            .reply()
            .map_err(|e| PlatformError::Unavailable(format!("XTEST extension missing: {e}")))?;
        log::debug!(
            "executor: XTEST {}.{}",
            version.major_version,
            version.minor_version
        );

        let setup = conn.setup();
        let root = setup.roots[screen_num].root;
        let (min_keycode, max_keycode) = (setup.min_keycode, setup.max_keycode);

        let mapping = conn
            .get_keyboard_mapping(min_keycode, max_keycode - min_keycode + 1)
            .map_err(x11_error)?
            .reply()
            .map_err(x11_error)?;
        let spare_keycode =
            find_spare_keycode(min_keycode, mapping.keysyms_per_keycode, &mapping.keysyms);
        match spare_keycode {
            Some(keycode) => log::debug!("executor: typing text through keycode {keycode}"),
            None => log::warn!("executor: no unused keycode, text typing unavailable"),
        }

        Ok(Self {
            conn,
            root,
            spare_keycode,
            keysyms_per_keycode: mapping.keysyms_per_keycode,
            typing: Mutex::new(()),
        })
    }

    /// Sends one fake key event and waits for the server to process it.
    fn fake_key(&self, keycode: Keycode, state: KeyState) -> Result<(), PlatformError> {
        self.conn
            .xtest_fake_input(fake_event_type(state), keycode, 0, self.root, 0, 0, 0)
            .map_err(x11_error)?
            .check()
            .map_err(x11_error)
    }

    /// Maps every level of `keycode` to `keysym`.
    fn map_keycode(&self, keycode: Keycode, keysym: Keysym) -> Result<(), PlatformError> {
        let keysyms = vec![keysym; usize::from(self.keysyms_per_keycode)];
        self.conn
            .change_keyboard_mapping(1, keycode, self.keysyms_per_keycode, &keysyms)
            .map_err(x11_error)?
            .check()
            .map_err(x11_error)
    }

    fn type_text(&self, text: &str) -> Result<(), PlatformError> {
        if text.is_empty() {
            return Ok(());
        }
        let spare = self.spare_keycode.ok_or_else(|| {
            PlatformError::Unavailable("no unused X keycode to type text with".into())
        })?;
        let _typing = self.typing.lock().unwrap_or_else(PoisonError::into_inner);

        let typed = self.type_through(spare, text);
        let restored = self.map_keycode(spare, NO_SYMBOL);
        typed.and(restored)
    }

    fn type_through(&self, spare: Keycode, text: &str) -> Result<(), PlatformError> {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            // CRLF is one line break.
            if c == '\r' && chars.peek() == Some(&'\n') {
                continue;
            }
            let Some(keysym) = char_to_keysym(c) else {
                log::debug!("executor: no keysym for {c:?}, skipping");
                continue;
            };
            self.map_keycode(spare, keysym)?;
            self.fake_key(spare, KeyState::Down)?;
            self.fake_key(spare, KeyState::Up)?;
        }
        Ok(())
    }
}

impl ActionExecutor for LinuxX11Executor {
    fn execute(&self, action: &Action) -> Result<(), PlatformError> {
        let inject_start = std::time::Instant::now();

        match action {
            Action::InjectKey { key, state } => self.fake_key(keycode_to_x11(*key), *state)?,
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

fn x11_error(e: impl std::fmt::Display) -> PlatformError {
    PlatformError::Other(format!("X11: {e}"))
}

fn fake_event_type(state: KeyState) -> u8 {
    match state {
        KeyState::Down => KEY_PRESS_EVENT,
        KeyState::Up => KEY_RELEASE_EVENT,
    }
}

/// Highest keycode whose keysyms are all `NoSymbol`. `keysyms` is the
/// `GetKeyboardMapping` reply starting at `min_keycode`.
fn find_spare_keycode(
    min_keycode: Keycode,
    keysyms_per_keycode: u8,
    keysyms: &[Keysym],
) -> Option<Keycode> {
    if keysyms_per_keycode == 0 {
        return None;
    }
    keysyms
        .chunks(usize::from(keysyms_per_keycode))
        .enumerate()
        .rev()
        .find(|(_, syms)| syms.iter().all(|&sym| sym == NO_SYMBOL))
        .and_then(|(offset, _)| Keycode::try_from(usize::from(min_keycode) + offset).ok())
}
