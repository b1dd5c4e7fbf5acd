//! Windows platform backend: SendInput injection.

mod executor;
pub mod keycodes;

use executor::WindowsExecutor;

use crate::platform::{ActionExecutor, PlatformError};

/// Returns a `WindowsExecutor` backed by `SendInput`.
pub fn create_action_executor() -> Result<Box<dyn ActionExecutor>, PlatformError> {
    log::info!("executor: using SendInput backend");
    Ok(Box::new(WindowsExecutor::new()))
}
