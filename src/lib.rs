//! Shared library for scripts that manage Oracle installations on a host:
//! oratab lookup, per-SID environment setup, and message-code scanning of
//! tool output.

pub mod config;
pub mod error;
pub mod logging;
pub mod oracle;
pub mod util;

pub use error::{OraError, Result};
