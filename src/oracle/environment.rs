/// Oracle environment resolution
///
/// Resolution is pure: it computes the ORACLE_SID / ORACLE_HOME / library
/// path values for a SID. Writing them into the process environment is a
/// separate, explicit step ([`OracleEnv::apply`]).

use super::oratab::{load_registry_or_empty, Registry};
use crate::config::Settings;
use std::ffi::{OsStr, OsString};

/// Environment values for one resolved SID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleEnv {
    pub sid: String,
    pub home: String,
    /// New library search path with `<home>/lib` in front. Kept as an
    /// `OsString` so a non-UTF-8 existing value survives untouched.
    pub library_path: OsString,
}

/// Resolves the environment for `identifier`.
///
/// # Arguments
/// * `identifier` - The ORACLE_SID to look up
/// * `registry` - Parsed oratab
/// * `existing_library_path` - Current library search path, if any
///
/// # Returns
/// `None` if the SID is not in the registry
pub fn resolve_environment(
    identifier: &str,
    registry: &Registry,
    existing_library_path: Option<&OsStr>,
) -> Option<OracleEnv> {
    let home = registry.home(identifier)?;
    Some(OracleEnv {
        sid: identifier.to_string(),
        home: home.to_string(),
        library_path: prepend_library_path(home, existing_library_path),
    })
}

fn prepend_library_path(home: &str, existing: Option<&OsStr>) -> OsString {
    let mut path = OsString::from(format!("{}/lib", home));
    if let Some(current) = existing.filter(|c| !c.is_empty()) {
        path.push(":");
        path.push(current);
    }
    path
}

impl OracleEnv {
    /// Writes the values into the process environment using the standard
    /// variable names.
    ///
    /// This mutates process-global state that persists until exit. Callers
    /// running threads must serialize it with any other environment access.
    pub fn apply(&self) {
        self.apply_with(&Settings::default());
    }

    pub fn apply_with(&self, settings: &Settings) {
        std::env::set_var(&settings.oracle_sid_var, &self.sid);
        std::env::set_var(&settings.oracle_home_var, &self.home);
        std::env::set_var(&settings.library_path_var, &self.library_path);
        log::info!(
            "Set {}={} {}={} {}={:?}",
            settings.oracle_sid_var,
            self.sid,
            settings.oracle_home_var,
            self.home,
            settings.library_path_var,
            self.library_path
        );
    }

    /// `export` lines suitable for `eval` in a POSIX shell. Bytes rather than
    /// a `String` because the library path may not be UTF-8.
    pub fn shell_exports(&self, settings: &Settings) -> Vec<u8> {
        let mut out = Vec::new();
        for (name, value) in [
            (&settings.oracle_sid_var, OsStr::new(&self.sid)),
            (&settings.oracle_home_var, OsStr::new(&self.home)),
            (&settings.library_path_var, self.library_path.as_os_str()),
        ] {
            out.extend_from_slice(format!("export {}=", name).as_bytes());
            out.extend_from_slice(&shell_quote(value.as_encoded_bytes()));
            out.push(b'\n');
        }
        out
    }
}

fn shell_quote(value: &[u8]) -> Vec<u8> {
    let mut quoted = vec![b'\''];
    for &byte in value {
        if byte == b'\'' {
            quoted.extend_from_slice(br"'\''");
        } else {
            quoted.push(byte);
        }
    }
    quoted.push(b'\'');
    quoted
}

/// Loads the oratab, resolves `sid` and applies it to this process.
///
/// # Returns
/// `(ORACLE_SID, ORACLE_HOME)`, or two empty strings when the SID is
/// unknown (in which case nothing is written)
pub fn set_oracle_env(sid: &str, explicit_oratab: Option<&str>) -> (String, String) {
    let registry = load_registry_or_empty(explicit_oratab);
    let current = Settings::default().library_path();

    match resolve_environment(sid, &registry, current.as_deref()) {
        Some(env) => {
            env.apply();
            (env.sid, env.home)
        }
        None => {
            log::debug!("SID '{}' not found in oratab", sid);
            (String::new(), String::new())
        }
    }
}
