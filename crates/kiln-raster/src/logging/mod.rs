//! Logger setup for binaries and tests.
//!
//! The rasterizer itself only talks to the `log` facade: one `debug!` summary per draw,
//! `trace!` for culled or clipped primitives, `warn!` when a configuration is rejected.
//! Hosts that want to see those records call [`init_logging`] once at startup.

mod init;

pub use init::{init_logging, init_test_logging, LoggingConfig};
