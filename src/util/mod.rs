//! Small helpers shared by Oracle host scripts.

pub mod chunk;
pub mod config_dump;
pub mod size;
pub mod version;

pub use chunk::{chunk_string, Chunks};
pub use config_dump::dump_config;
pub use size::convert_size;
pub use version::{check_toolchain, Version, VersionGate};
