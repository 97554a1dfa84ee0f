//! Version gating.
//!
//! Tools built on this crate refuse to run when the recorded toolchain falls
//! outside the range they were validated against.

use crate::error::{OraError, Result};
use std::fmt;
use std::str::FromStr;

/// `rustc --version` output captured by the build script.
pub const BUILD_RUSTC_VERSION: &str = env!("ORATOOLS_RUSTC_VERSION");

/// Toolchains this crate is supported on (inclusive, major.minor).
pub const TOOLCHAIN_GATE: VersionGate = VersionGate::new((1, 77), (1, 999));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl FromStr for Version {
    type Err = OraError;

    /// Accepts `1.77`, `1.77.2`, `1.80.0-nightly` and tool banners like
    /// `rustc 1.77.2 (25ef9e3d8 2024-03-27)`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || OraError::InvalidVersion(s.to_string());
        let token = s
            .split_whitespace()
            .find(|t| t.starts_with(|c: char| c.is_ascii_digit()))
            .ok_or_else(invalid)?;
        let numeric = token.split(['-', '+']).next().unwrap_or(token);

        let mut parts = numeric.split('.').map(str::parse::<u32>);
        let major = parts.next().and_then(|p| p.ok()).ok_or_else(invalid)?;
        let minor = parts.next().and_then(|p| p.ok()).ok_or_else(invalid)?;
        let patch = match parts.next() {
            Some(p) => p.map_err(|_| invalid())?,
            None => 0,
        };
        Ok(Version { major, minor, patch })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Inclusive `major.minor` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionGate {
    pub min: (u32, u32),
    pub max: (u32, u32),
}

impl VersionGate {
    pub const fn new(min: (u32, u32), max: (u32, u32)) -> Self {
        Self { min, max }
    }

    /// Parses `version` and checks it against the range.
    ///
    /// # Returns
    /// The parsed version, or `OraError::UnsupportedVersion` when outside
    pub fn check(&self, version: &str) -> Result<Version> {
        let parsed: Version = version.parse()?;
        let key = (parsed.major, parsed.minor);
        if key < self.min || key > self.max {
            return Err(OraError::UnsupportedVersion {
                found: format!("{}.{}", parsed.major, parsed.minor),
                min: format!("{}.{}", self.min.0, self.min.1),
                max: format!("{}.{}", self.max.0, self.max.1),
            });
        }
        Ok(parsed)
    }
}

/// Checks the toolchain this crate was built with against [`TOOLCHAIN_GATE`].
pub fn check_toolchain() -> Result<Version> {
    TOOLCHAIN_GATE.check(BUILD_RUSTC_VERSION)
}
