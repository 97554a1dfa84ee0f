//! Scans tool output (sqlplus, tnsping, crsctl, srvctl, ...) for Oracle
//! message codes such as `ORA-01017` or `SP2-0641`.
//!
//! A code is a facility prefix from `facility.lis`, a hyphen and four digits.

use super::facility::{ComponentFilter, FacilityTable};
use crate::config::Settings;
use crate::error::{OraError, Result};
use regex::Regex;
use serde::Serialize;
use std::path::Path;

/// One flagged message code and the line it appeared on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorMatch {
    pub code: String,
    pub source_line: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub found: bool,
    pub matches: Vec<ErrorMatch>,
}

impl ErrorReport {
    pub fn from_matches(matches: Vec<ErrorMatch>) -> Self {
        Self {
            found: !matches.is_empty(),
            matches,
        }
    }

    /// 1 when anything was flagged, else 0.
    pub fn exit_code(&self) -> i32 {
        i32::from(self.found)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.matches.iter().map(|m| m.code.as_str())
    }
}

/// Compiled patterns for the active facilities of one table.
#[derive(Debug, Clone)]
pub struct ErrorScanner {
    patterns: Vec<Regex>,
}

impl ErrorScanner {
    pub fn new(table: &FacilityTable, filter: &ComponentFilter) -> Self {
        let patterns = table
            .active_codes(filter)
            .iter()
            .filter_map(|code| match Regex::new(&format!("{}-[0-9]{{4}}", regex::escape(code))) {
                Ok(re) => Some(re),
                Err(e) => {
                    log::warn!("Skipping facility {}: {}", code, e);
                    None
                }
            })
            .collect::<Vec<_>>();
        log::debug!("Scanning for {} facilities", patterns.len());
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Single pass over `output`. Each facility contributes at most its first
    /// hit per line; different facilities on one line each contribute.
    pub fn scan(&self, output: &str) -> ErrorReport {
        let mut matches = Vec::new();
        for line in output.split('\n') {
            for pattern in &self.patterns {
                if let Some(hit) = pattern.find(line) {
                    matches.push(ErrorMatch {
                        code: hit.as_str().to_string(),
                        source_line: line.to_string(),
                    });
                }
            }
        }
        ErrorReport::from_matches(matches)
    }
}

/// Scans `output` for codes of the facilities `filter` selects from `table`.
pub fn scan_for_errors(output: &str, table: &FacilityTable, filter: &ComponentFilter) -> ErrorReport {
    ErrorScanner::new(table, filter).scan(output)
}

/// Loads the facility table of `home` and scans `output`.
///
/// # Returns
/// `OraError::NoActiveInstallation` when `home` is `None`; this is distinct
/// from a successful scan that found nothing
pub fn check_output(output: &str, home: Option<&Path>, filter: &ComponentFilter) -> Result<ErrorReport> {
    let home = home.ok_or(OraError::NoActiveInstallation)?;
    let table = FacilityTable::load_for_home(home, &Settings::default())?;
    Ok(scan_for_errors(output, &table, filter))
}

/// [`check_output`] against the installation named by `ORACLE_HOME`.
pub fn check_output_from_env(output: &str, filter: &ComponentFilter) -> Result<ErrorReport> {
    let home = Settings::default().oracle_home();
    if home.is_none() {
        log::error!("ORACLE_HOME is not set");
    }
    check_output(output, home.as_deref(), filter)
}
