//! Process-wide logging setup shared by the binaries.

pub mod tracing;

pub use tracing::{LogFormat, init, init_with};
