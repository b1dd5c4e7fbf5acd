//! Linux platform backend.
//!
//! Injection: xdg-desktop-portal RemoteDesktop via `LinuxWaylandExecutor`,
//! or the XTEST extension via `LinuxX11Executor`.
//!
//! Startup detection:
//! 1. `WAYLAND_DISPLAY` set  → RemoteDesktop portal, use the Wayland executor
//! 2. `DISPLAY` only (X11)   → XTEST, use the X11 executor
//! 3. Neither variable set   → no display, clear error

mod detect;
mod keycodes;
mod wayland;
mod x11;

use wayland::LinuxWaylandExecutor;
use x11::LinuxX11Executor;

use crate::platform::{ActionExecutor, PlatformError};
use detect::{detect_display_server, DisplayServer};

/// Returns the appropriate `ActionExecutor` for the current session.
pub fn create_action_executor() -> Result<Box<dyn ActionExecutor>, PlatformError> {
    match detect_display_server() {
        Some(DisplayServer::Wayland) => {
            log::info!("executor: Wayland session, using RemoteDesktop portal");
            LinuxWaylandExecutor::new().map(|e| Box::new(e) as Box<dyn ActionExecutor>)
        }
        Some(DisplayServer::X11) => {
            log::info!("executor: X11 session, using XTEST");
            LinuxX11Executor::new().map(|e| Box::new(e) as Box<dyn ActionExecutor>)
        }
        None => Err(PlatformError::Unavailable(
            "No display server detected.".into(),
        )),
    }
}
