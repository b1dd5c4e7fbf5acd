//! Display server detection for Linux.
//!
//! The session manager exports `WAYLAND_DISPLAY` for Wayland sessions and
//! `DISPLAY` for X11 (and for XWayland inside a Wayland session). Each has
//! its own injection backend, so the factory needs to tell the three cases
//! apart.

use std::env;

/// The active Linux display server protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayServer {
    /// `WAYLAND_DISPLAY` is set, with or without `DISPLAY`.
    Wayland,
    /// Only `DISPLAY` is set.
    X11,
}

/// Detects the display server from the process environment.
///
/// Returns `None` outside of any graphical session.
pub fn detect_display_server() -> Option<DisplayServer> {
    classify_display(env_is_set("WAYLAND_DISPLAY"), env_is_set("DISPLAY"))
}

fn env_is_set(name: &str) -> bool {
    env::var_os(name).is_some_and(|v| !v.is_empty())
}

/// Pure classification, kept separate so tests need not touch the
/// environment.
fn classify_display(has_wayland: bool, has_display: bool) -> Option<DisplayServer> {
    match (has_wayland, has_display) {
        // XWayland sets DISPLAY too; the portal is reached over D-Bus either way.
        (true, _) => Some(DisplayServer::Wayland),
        (false, true) => Some(DisplayServer::X11),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wayland_wins_over_xwayland_display() {
        assert_eq!(classify_display(true, false), Some(DisplayServer::Wayland));
        assert_eq!(classify_display(true, true), Some(DisplayServer::Wayland));
    }

    #[test]
    fn display_only_is_x11() {
        assert_eq!(classify_display(false, true), Some(DisplayServer::X11));
    }

    #[test]
    fn headless_is_none() {
        assert_eq!(classify_display(false, false), None);
    }
}
