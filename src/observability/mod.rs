//! Observability subsystem.
//!
//! All progress output (which contract, raw call, transaction hash, polling
//! state) goes through `tracing` events; `logging.rs` installs the subscriber.

pub mod logging;

pub use logging::init_logging;
