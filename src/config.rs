//! Locations and environment variable names used by the resolver and scanner.

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable that names an alternate oratab file.
pub const ORATAB_OVERRIDE_VAR: &str = "_ORATAB_";

pub const ORACLE_HOME_VAR: &str = "ORACLE_HOME";

pub const ORACLE_SID_VAR: &str = "ORACLE_SID";

/// Standard oratab locations, searched after any caller-supplied path.
/// `/var/opt/oracle/oratab` is the Solaris convention.
pub const DEFAULT_ORATAB_LOCATIONS: [&str; 2] = ["/etc/oratab", "/var/opt/oracle/oratab"];

/// Facility definitions, relative to an installation home.
pub const FACILITY_FILE: &str = "lib/facility.lis";

/// Dynamic loader search path variable for the current platform.
#[cfg(target_os = "macos")]
pub const LIBRARY_PATH_VAR: &str = "DYLD_LIBRARY_PATH";

#[cfg(not(target_os = "macos"))]
pub const LIBRARY_PATH_VAR: &str = "LD_LIBRARY_PATH";

/// Variable names and fixed paths, grouped so tests and embedding tools can
/// point the library somewhere other than the host defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub oratab_override_var: String,
    pub default_oratab_locations: Vec<PathBuf>,
    pub oracle_home_var: String,
    pub oracle_sid_var: String,
    pub library_path_var: String,
    pub facility_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            oratab_override_var: ORATAB_OVERRIDE_VAR.to_string(),
            default_oratab_locations: DEFAULT_ORATAB_LOCATIONS.iter().map(PathBuf::from).collect(),
            oracle_home_var: ORACLE_HOME_VAR.to_string(),
            oracle_sid_var: ORACLE_SID_VAR.to_string(),
            library_path_var: LIBRARY_PATH_VAR.to_string(),
            facility_file: PathBuf::from(FACILITY_FILE),
        }
    }
}

impl Settings {
    /// Value of the oratab override variable, if set and non-empty.
    pub fn oratab_override(&self) -> Option<String> {
        non_empty_var(&self.oratab_override_var)
    }

    /// Active installation home from the environment, if set and non-empty.
    pub fn oracle_home(&self) -> Option<PathBuf> {
        non_empty_var(&self.oracle_home_var).map(PathBuf::from)
    }

    /// Current library search path. Read as an `OsString` so a non-UTF-8
    /// value is still prefixed rather than dropped.
    pub fn library_path(&self) -> Option<OsString> {
        std::env::var_os(&self.library_path_var)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(v) if !v.is_empty() => Some(v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locations_order() {
        let settings = Settings::default();
        assert_eq!(
            settings.default_oratab_locations,
            vec![PathBuf::from("/etc/oratab"), PathBuf::from("/var/opt/oracle/oratab")]
        );
        assert_eq!(settings.facility_file, PathBuf::from("lib/facility.lis"));
    }

    #[test]
    fn test_unset_variable_reads_as_none() {
        let settings = Settings {
            oracle_home_var: "ORATOOLS_TEST_SURELY_UNSET_HOME".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.oracle_home(), None);
    }
}
