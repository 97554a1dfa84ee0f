//! Error types shared by the registry resolver, the error scanner and the
//! leaf utilities.
//!
//! Expected absence (no oratab on the host, unknown SID, nothing matched) is
//! never an error here; those are ordinary values. Only conditions a caller
//! must treat differently from "found nothing" get a variant.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`OraError`].
pub type Result<T> = std::result::Result<T, OraError>;

#[derive(Error, Debug)]
pub enum OraError {
    /// An oratab file exists but could not be read.
    #[error("Cannot open oratab file: {} for read", path.display())]
    OratabUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scanner needs an installation to locate `facility.lis`.
    #[error("ORACLE_HOME is not set")]
    NoActiveInstallation,

    #[error("Cannot read facility file: {}", path.display())]
    FacilityUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration file does not exist or is not readable: {}: {message}", path.display())]
    ConfigRead { path: PathBuf, message: String },

    #[error("Version {found} must be between {min} and {max}")]
    UnsupportedVersion {
        found: String,
        min: String,
        max: String,
    },

    #[error("Cannot parse version string: {0}")]
    InvalidVersion(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl OraError {
    /// Exit status the `oratool` binary reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            OraError::OratabUnreadable { .. } => 2,
            OraError::NoActiveInstallation => 3,
            OraError::FacilityUnreadable { .. } => 4,
            OraError::ConfigRead { .. }
            | OraError::UnsupportedVersion { .. }
            | OraError::InvalidVersion(_)
            | OraError::Io(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_active_installation_message() {
        assert_eq!(OraError::NoActiveInstallation.to_string(), "ORACLE_HOME is not set");
        assert_eq!(OraError::NoActiveInstallation.exit_code(), 3);
    }

    #[test]
    fn test_unreadable_keeps_source() {
        use std::error::Error as _;

        let err = OraError::OratabUnreadable {
            path: PathBuf::from("/etc/oratab"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("/etc/oratab"));
        assert!(err.source().is_some());
    }
}
