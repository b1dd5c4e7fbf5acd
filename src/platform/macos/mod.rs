//! macOS platform backend.
//!
//! Injection: CGEventPost (synchronous) via `MacOSExecutor`.
//!
//! Posting synthetic events requires Accessibility permission. The factory
//! calls `AXIsProcessTrusted()` and returns `PlatformError::PermissionDenied`
//! when permission has not been granted. Guide the user to:
//!   System Settings > Privacy & Security > Accessibility

mod executor;
mod keycodes;

use executor::MacOSExecutor;

use crate::platform::{ActionExecutor, PlatformError};

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    /// Returns true if this process has been granted Accessibility permission.
    fn AXIsProcessTrusted() -> bool;
}

/// Returns the CGEventPost-based action executor.
pub fn create_action_executor() -> Result<Box<dyn ActionExecutor>, PlatformError> {
    if !unsafe { AXIsProcessTrusted() } {
        return Err(PlatformError::PermissionDenied(
            "Accessibility permission required. \
             Grant it in System Settings > Privacy & Security > Accessibility."
                .into(),
        ));
    }
    log::info!("executor: using CGEventPost backend");
    Ok(Box::new(MacOSExecutor::new()))
}
