//! Wayland platform backend: RemoteDesktop portal (injection).

mod executor;

pub use executor::LinuxWaylandExecutor;
