//! Wayland action executor via xdg-desktop-portal RemoteDesktop portal.
//!
//! `LinuxWaylandExecutor` implements the `ActionExecutor` trait. `new()` spawns a
//! background thread that owns a single-threaded tokio runtime; that runtime runs
//! the portal session setup and then loops waiting for injection commands.
//!
//! `execute()` sends one command per key event over a bounded channel and
//! blocks until the portal call for that event has completed, so a release
//! can never overtake its press and portal errors reach the caller. Called
//! from inside an async runtime, the blocking part runs on a scoped helper
//! thread, since tokio's blocking channel calls panic on runtime threads.
//!
//! Keys are injected as evdev keycodes; text is injected character by
//! character as keysyms, which the compositor resolves without depending on
//! the active keyboard layout.

use std::path::PathBuf;
use std::thread;

use ashpd::desktop::{
    remote_desktop::{DeviceType, KeyState as PortalKeyState, RemoteDesktop},
    PersistMode,
};
use tokio::sync::{mpsc, oneshot};

use super::super::keycodes::{char_to_keysym, keycode_to_evdev};
use crate::platform::{Action, ActionExecutor, KeyState, PlatformError};

// ---------------------------------------------------------------------------
// Internal command type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Injection {
    /// Linux evdev keycode (same namespace as `/dev/input/`).
    Keycode(i32),
    /// X11 keysym.
    Keysym(i32),
}

/// A single key event sent from `execute()` to the executor task.
struct InjectionCmd {
    injection: Injection,
    state: PortalKeyState,
    /// Completion of the portal call; `Err` carries the portal error text.
    reply: oneshot::Sender<Result<(), String>>,
    /// Timestamp captured in `execute()` to measure end-to-end injection latency.
    queued_at: std::time::Instant,
}

// ---------------------------------------------------------------------------
// Public struct
// ---------------------------------------------------------------------------

/// Injects keyboard events via xdg-desktop-portal RemoteDesktop on Wayland.
///
/// Maintains a long-lived portal session on a background thread.
pub struct LinuxWaylandExecutor {
    /// Bounded channel to the executor task (capacity `CMD_CAPACITY`).
    cmd_tx: mpsc::Sender<InjectionCmd>,
    thread: Option<thread::JoinHandle<()>>,
}

/// Channel capacity for pending injection commands. Callers wait for every
/// command, so only concurrent callers ever queue more than one.
const CMD_CAPACITY: usize = 64;

impl LinuxWaylandExecutor {
    /// Creates the executor and launches the background portal session.
    ///
    /// The session is established asynchronously. The first `execute()` call
    /// blocks until the user has answered the portal's permission dialog (or
    /// a saved restore token made it unnecessary).
    pub fn new() -> Result<Self, PlatformError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<InjectionCmd>(CMD_CAPACITY);

        let thread = thread::Builder::new()
            .name("remote-desktop".into())
            .spawn(move || {
                let rt = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(rt) => rt,
                    Err(e) => {
                        log::error!("executor: failed to build tokio runtime: {e}");
                        return;
                    }
                };
                rt.block_on(run_executor(cmd_rx));
            })
            .map_err(|e| PlatformError::Other(format!("failed to spawn executor thread: {e}")))?;

        Ok(Self {
            cmd_tx,
            thread: Some(thread),
        })
    }

    /// Sends one key event and waits for the portal call to finish.
    fn inject(&self, injection: Injection, state: KeyState) -> Result<(), PlatformError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let portal_state = match state {
            KeyState::Down => PortalKeyState::Pressed,
            KeyState::Up => PortalKeyState::Released,
        };

        self.cmd_tx
            .blocking_send(InjectionCmd {
                injection,
                state: portal_state,
                reply: reply_tx,
                queued_at: std::time::Instant::now(),
            })
            .map_err(|_| session_closed())?;

        match reply_rx.blocking_recv() {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(PlatformError::Other(format!("RemoteDesktop: {e}"))),
            Err(_) => Err(session_closed()),
        }
    }

    fn type_text(&self, text: &str) -> Result<(), PlatformError> {
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
            let injection = Injection::Keysym(keysym as i32);
            self.inject(injection, KeyState::Down)?;
            self.inject(injection, KeyState::Up)?;
        }
        Ok(())
    }

    fn execute_blocking(&self, action: &Action) -> Result<(), PlatformError> {
        match action {
            Action::InjectKey { key, state } => {
                let keycode = keycode_to_evdev(*key) as i32;
                self.inject(Injection::Keycode(keycode), *state)
            }
            Action::TypeText { text } => self.type_text(text),
        }
    }
}

fn session_closed() -> PlatformError {
    PlatformError::Other("executor session closed".into())
}

impl Drop for LinuxWaylandExecutor {
    fn drop(&mut self) {
        // Dropping cmd_tx closes the channel; the executor task will exit its loop.
        // The JoinHandle is dropped here as well (detaching the thread).
        drop(self.thread.take());
    }
}

// ---------------------------------------------------------------------------
// ActionExecutor trait impl
// ---------------------------------------------------------------------------

impl ActionExecutor for LinuxWaylandExecutor {
    fn execute(&self, action: &Action) -> Result<(), PlatformError> {
        if tokio::runtime::Handle::try_current().is_err() {
            return self.execute_blocking(action);
        }
        log::trace!("executor: called from a runtime thread, injecting from a helper thread");
        let joined = thread::scope(|scope| {
            scope
                .spawn(|| self.execute_blocking(action))
                .join()
        });
        match joined {
            Ok(result) => result,
            Err(_) => Err(PlatformError::Other("injection thread panicked".into())),
        }
    }
}

// ---------------------------------------------------------------------------
// Async executor task
// ---------------------------------------------------------------------------

/// Runs on the background thread's tokio runtime.
///
/// If the portal session cannot be established, every later command is
/// answered with the setup error so callers see why injection failed.
async fn run_executor(mut cmd_rx: mpsc::Receiver<InjectionCmd>) {
    if let Err(e) = executor_loop(&mut cmd_rx).await {
        log::error!("executor: {e}");
        let reason = format!("session unavailable: {e}");
        while let Some(cmd) = cmd_rx.recv().await {
            let _ = cmd.reply.send(Err(reason.clone()));
        }
    }
}

async fn executor_loop(
    cmd_rx: &mut mpsc::Receiver<InjectionCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    let portal = RemoteDesktop::new().await?;
    let session = portal.create_session().await?;

    // A saved restore token skips the permission dialog after the first grant.
    let saved_token = load_restore_token();
    portal
        .select_devices(
            &session,
            DeviceType::Keyboard.into(),
            saved_token.as_deref(),
            PersistMode::ExplicitlyRevoked,
        )
        .await?;

    let start_response = portal.start(&session, None).await?;

    if let Some(token) = start_response.response()?.restore_token() {
        save_restore_token(token);
    }

    log::info!("executor: RemoteDesktop session active");

    while let Some(cmd) = cmd_rx.recv().await {
        let result = match cmd.injection {
            Injection::Keycode(keycode) => {
                portal
                    .notify_keyboard_keycode(&session, keycode, cmd.state)
                    .await
            }
            Injection::Keysym(keysym) => {
                portal
                    .notify_keyboard_keysym(&session, keysym, cmd.state)
                    .await
            }
        };

        let reply = match result {
            Ok(()) => {
                log::debug!(
                    "executor: injected {:?} in {:.2}ms",
                    cmd.injection,
                    cmd.queued_at.elapsed().as_secs_f64() * 1000.0
                );
                Ok(())
            }
            Err(e) => {
                log::warn!("executor: injecting {:?} failed: {e}", cmd.injection);
                Err(e.to_string())
            }
        };
        // The caller may have given up waiting; nothing to do then.
        let _ = cmd.reply.send(reply);
    }

    log::info!("executor: command channel closed, exiting");
    Ok(())
}

// ---------------------------------------------------------------------------
// Restore token helpers
// ---------------------------------------------------------------------------

/// Returns the path used to persist the RemoteDesktop restore token.
///
/// Respects `$XDG_CONFIG_HOME`; falls back to `$HOME/.config`.
fn token_path() -> Option<PathBuf> {
    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
    Some(
        config_dir
            .join("launchdeck-keyboard")
            .join("remote-desktop-token"),
    )
}

/// Reads the restore token from disk. `None` if absent, empty, or unreadable.
fn load_restore_token() -> Option<String> {
    let path = token_path()?;
    let token = std::fs::read_to_string(&path).ok()?;
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return None;
    }
    log::debug!("executor: loaded restore token from {}", path.display());
    Some(trimmed.to_owned())
}

/// Writes the restore token to disk, creating the parent directory if needed.
fn save_restore_token(token: &str) {
    let Some(path) = token_path() else { return };
    if let Some(dir) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(dir) {
            log::warn!(
                "executor: could not create config dir {}: {e}",
                dir.display()
            );
            return;
        }
    }
    match std::fs::write(&path, token) {
        Ok(()) => log::debug!("executor: restore token saved to {}", path.display()),
        Err(e) => log::warn!("executor: could not save restore token: {e}"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::KeyCode;

    fn executor_with(cmd_tx: mpsc::Sender<InjectionCmd>) -> LinuxWaylandExecutor {
        LinuxWaylandExecutor {
            cmd_tx,
            thread: None,
        }
    }

    /// Stands in for the portal task: answers every command with `reply`
    /// and returns what it saw once the channel closes.
    fn fake_portal(
        mut cmd_rx: mpsc::Receiver<InjectionCmd>,
        reply: Result<(), String>,
    ) -> thread::JoinHandle<Vec<(Injection, bool)>> {
        thread::spawn(move || {
            let mut seen = Vec::new();
            while let Some(cmd) = cmd_rx.blocking_recv() {
                seen.push((cmd.injection, matches!(cmd.state, PortalKeyState::Pressed)));
                let _ = cmd.reply.send(reply.clone());
            }
            seen
        })
    }

    #[test]
    fn inject_key_sends_evdev_code_and_waits_for_reply() {
        let (cmd_tx, cmd_rx) = mpsc::channel::<InjectionCmd>(1);
        let portal = fake_portal(cmd_rx, Ok(()));
        let executor = executor_with(cmd_tx);

        executor
            .execute(&Action::InjectKey {
                key: KeyCode::A,
                state: KeyState::Down,
            })
            .unwrap();
        executor
            .execute(&Action::InjectKey {
                key: KeyCode::A,
                state: KeyState::Up,
            })
            .unwrap();
        drop(executor);

        let seen = portal.join().unwrap();
        assert_eq!(
            seen,
            vec![(Injection::Keycode(30), true), (Injection::Keycode(30), false)]
        );
    }

    #[test]
    fn type_text_sends_keysym_pairs_in_order() {
        let (cmd_tx, cmd_rx) = mpsc::channel::<InjectionCmd>(1);
        let portal = fake_portal(cmd_rx, Ok(()));
        let executor = executor_with(cmd_tx);

        executor
            .execute(&Action::TypeText {
                text: "hi\u{7}".into(),
            })
            .unwrap();
        drop(executor);

        // The bell character has no keysym and is skipped.
        let seen = portal.join().unwrap();
        assert_eq!(
            seen,
            vec![
                (Injection::Keysym(0x68), true),
                (Injection::Keysym(0x68), false),
                (Injection::Keysym(0x69), true),
                (Injection::Keysym(0x69), false),
            ]
        );
    }

    #[test]
    fn crlf_types_a_single_return() {
        let (cmd_tx, cmd_rx) = mpsc::channel::<InjectionCmd>(1);
        let portal = fake_portal(cmd_rx, Ok(()));
        let executor = executor_with(cmd_tx);

        executor
            .execute(&Action::TypeText {
                text: "a\r\nb\r".into(),
            })
            .unwrap();
        drop(executor);

        let keysyms: Vec<Injection> = portal
            .join()
            .unwrap()
            .into_iter()
            .filter(|&(_, pressed)| pressed)
            .map(|(injection, _)| injection)
            .collect();
        // A lone trailing CR still types Return.
        assert_eq!(
            keysyms,
            vec![
                Injection::Keysym(0x61),
                Injection::Keysym(0xff0d),
                Injection::Keysym(0x62),
                Injection::Keysym(0xff0d),
            ]
        );
    }

    #[test]
    fn execute_inside_a_runtime_does_not_panic() {
        let (cmd_tx, cmd_rx) = mpsc::channel::<InjectionCmd>(1);
        let portal = fake_portal(cmd_rx, Ok(()));
        let executor = executor_with(cmd_tx);

        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let result = rt.block_on(async {
            executor.execute(&Action::InjectKey {
                key: KeyCode::A,
                state: KeyState::Down,
            })
        });
        result.unwrap();
        drop(executor);

        assert_eq!(portal.join().unwrap(), vec![(Injection::Keycode(30), true)]);
    }

    #[test]
    fn portal_error_is_returned() {
        let (cmd_tx, cmd_rx) = mpsc::channel::<InjectionCmd>(1);
        let portal = fake_portal(cmd_rx, Err("device not granted".into()));
        let executor = executor_with(cmd_tx);

        let result = executor.execute(&Action::InjectKey {
            key: KeyCode::MediaPlayPause,
            state: KeyState::Down,
        });
        drop(executor);
        portal.join().unwrap();

        match result {
            Err(PlatformError::Other(msg)) => assert!(msg.contains("device not granted"), "{msg}"),
            other => panic!("expected portal error, got {other:?}"),
        }
    }

    #[test]
    fn inject_key_on_closed_channel_returns_error() {
        let (cmd_tx, cmd_rx) = mpsc::channel::<InjectionCmd>(1);
        drop(cmd_rx);
        let executor = executor_with(cmd_tx);

        let result = executor.execute(&Action::InjectKey {
            key: KeyCode::A,
            state: KeyState::Down,
        });
        assert!(result.is_err());
    }

    #[test]
    fn dropped_reply_returns_error() {
        let (cmd_tx, mut cmd_rx) = mpsc::channel::<InjectionCmd>(1);
        // Receives the command but never answers it.
        let portal = thread::spawn(move || {
            let cmd = cmd_rx.blocking_recv();
            drop(cmd);
        });
        let executor = executor_with(cmd_tx);

        let result = executor.execute(&Action::InjectKey {
            key: KeyCode::Enter,
            state: KeyState::Up,
        });
        portal.join().unwrap();
        assert!(result.is_err());
    }
}
