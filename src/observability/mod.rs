//! Observability for racedb
//!
//! Structured JSON logging: one line per event, explicit severity,
//! synchronous writes, no buffering.

mod logger;

pub use logger::{Logger, Severity};
