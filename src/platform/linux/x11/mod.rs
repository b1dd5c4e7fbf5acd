//! X11 platform backend: XTEST extension (injection).

mod executor;

pub use executor::LinuxX11Executor;
