//! Oratab discovery and parsing
//!
//! The oratab maps each SID to its installation home, one entry per line:
//!
//! ```text
//! # SID:ORACLE_HOME:autostart
//! dbm:/u01/app/oracle/product/11.2.0.3/dbhome_1:Y
//! ```

use crate::config::Settings;
use crate::error::{OraError, Result};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One parsed oratab line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    pub identifier: String,
    pub home_path: String,
    /// The start/stop flag (`Y`/`N`). Parsed but not kept in a [`Registry`].
    pub autostart_flag: Option<String>,
}

/// Parses a single oratab line.
///
/// Anything after the first `#` is a comment. Lines without a `:` are not
/// entries. With three or more fields only the first three count.
///
/// # Returns
/// `None` for blank, comment-only and delimiter-free lines
pub fn parse_oratab_line(line: &str) -> Option<RegistryEntry> {
    let line = line.split_once('#').map_or(line, |(head, _)| head).trim();
    let delimiters = line.matches(':').count();
    if delimiters == 0 {
        return None;
    }

    let mut fields = line.split(':');
    let identifier = fields.next()?.to_string();
    let home_path = fields.next()?.to_string();
    let autostart_flag = if delimiters >= 2 {
        fields.next().map(str::to_string)
    } else {
        None
    };

    Some(RegistryEntry {
        identifier,
        home_path,
        autostart_flag,
    })
}

/// SID to ORACLE_HOME mapping, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Registry {
    entries: IndexMap<String, String>,
}

impl Registry {
    /// Parses oratab text. Malformed lines are skipped, never rejected.
    pub fn parse(text: &str) -> Self {
        let mut registry = Self::default();
        for entry in text.lines().filter_map(parse_oratab_line) {
            registry.insert(entry);
        }
        registry
    }

    /// Adds an entry, replacing the home of an existing SID.
    pub fn insert(&mut self, entry: RegistryEntry) {
        if let Some(previous) = self.entries.insert(entry.identifier.clone(), entry.home_path) {
            log::debug!("Duplicate oratab SID '{}' replaces home {}", entry.identifier, previous);
        }
    }

    pub fn home(&self, identifier: &str) -> Option<&str> {
        self.entries.get(identifier).map(String::as_str)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Ordered, duplicate-free list of oratab candidates. Earlier wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    locations: Vec<PathBuf>,
}

impl SearchPath {
    /// Builds the search order.
    ///
    /// # Arguments
    /// * `explicit` - Caller-supplied oratab; searched first
    /// * `override_value` - Value of the override variable; searched next
    /// * `defaults` - Standard locations, searched last
    pub fn build(explicit: Option<&str>, override_value: Option<&str>, defaults: &[PathBuf]) -> Self {
        let mut search = Self {
            locations: defaults.to_vec(),
        };
        if let Some(value) = override_value.filter(|v| !v.is_empty()) {
            search.insert_front(expand_home(value));
        }
        if let Some(value) = explicit.filter(|v| !v.is_empty()) {
            search.insert_front(expand_home(value));
        }
        search
    }

    /// Search order using the `_ORATAB_` variable and the standard locations.
    pub fn from_env(explicit: Option<&str>) -> Self {
        Self::with_settings(explicit, &Settings::default())
    }

    pub fn with_settings(explicit: Option<&str>, settings: &Settings) -> Self {
        let override_value = settings.oratab_override();
        Self::build(explicit, override_value.as_deref(), &settings.default_oratab_locations)
    }

    fn insert_front(&mut self, path: PathBuf) {
        if !self.locations.contains(&path) {
            self.locations.insert(0, path);
        }
    }

    pub fn locations(&self) -> &[PathBuf] {
        &self.locations
    }

    /// First candidate that exists as a regular file.
    pub fn find_existing(&self) -> Option<&Path> {
        self.locations.iter().map(PathBuf::as_path).find(|p| p.is_file())
    }
}

/// Expands a leading `~/` to the user's home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// What a registry lookup found on this host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { path: PathBuf, registry: Registry },
    /// None of the candidates exist. Expected on hosts without Oracle.
    NotFound { searched: Vec<PathBuf> },
}

impl LoadOutcome {
    pub fn registry(&self) -> Option<&Registry> {
        match self {
            LoadOutcome::Loaded { registry, .. } => Some(registry),
            LoadOutcome::NotFound { .. } => None,
        }
    }

    /// The loaded registry, or an empty one when nothing was found.
    pub fn into_registry(self) -> Registry {
        match self {
            LoadOutcome::Loaded { registry, .. } => registry,
            LoadOutcome::NotFound { .. } => Registry::default(),
        }
    }
}

/// Loads the first oratab found on the standard search path.
///
/// # Arguments
/// * `explicit` - Optional oratab path that takes precedence over all others
///
/// # Returns
/// `LoadOutcome::NotFound` when no candidate exists, or
/// `OraError::OratabUnreadable` when the chosen file cannot be read
pub fn load_registry(explicit: Option<&str>) -> Result<LoadOutcome> {
    load_from(&SearchPath::from_env(explicit))
}

/// Loads the first existing oratab of `search`. Later candidates are not
/// tried once one exists, even if it turns out unreadable.
pub fn load_from(search: &SearchPath) -> Result<LoadOutcome> {
    let Some(path) = search.find_existing() else {
        log::debug!("No oratab found in {:?}", search.locations());
        return Ok(LoadOutcome::NotFound {
            searched: search.locations().to_vec(),
        });
    };

    let bytes = std::fs::read(path).map_err(|source| {
        log::error!("Cannot open oratab file: {} for read: {}", path.display(), source);
        OraError::OratabUnreadable {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let registry = Registry::parse(&String::from_utf8_lossy(&bytes));
    log::info!("Loaded {} SID(s) from oratab: {:?}", registry.len(), path);

    Ok(LoadOutcome::Loaded {
        path: path.to_path_buf(),
        registry,
    })
}

/// Permissive variant of [`load_registry`] for scripts that only care
/// about the mapping: absence and read failures both give an empty registry.
pub fn load_registry_or_empty(explicit: Option<&str>) -> Registry {
    registry_or_empty(load_registry(explicit))
}

/// Collapses a load result to a registry, logging read failures.
pub fn registry_or_empty(result: Result<LoadOutcome>) -> Registry {
    match result {
        Ok(outcome) => outcome.into_registry(),
        Err(e) => {
            log::warn!("Continuing with an empty oratab: {}", e);
            Registry::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Vec<PathBuf> {
        vec![PathBuf::from("/etc/oratab"), PathBuf::from("/var/opt/oracle/oratab")]
    }

    #[test]
    fn test_parse_line_field_counts() {
        let two = parse_oratab_line("dbm:/u01/db").unwrap();
        assert_eq!(two.identifier, "dbm");
        assert_eq!(two.home_path, "/u01/db");
        assert_eq!(two.autostart_flag, None);

        let three = parse_oratab_line("dbm:/u01/db:Y").unwrap();
        assert_eq!(three.autostart_flag.as_deref(), Some("Y"));

        let five = parse_oratab_line("dbm:/u01/db:N:extra:more").unwrap();
        assert_eq!(five.home_path, "/u01/db");
        assert_eq!(five.autostart_flag.as_deref(), Some("N"));
    }

    #[test]
    fn test_parse_line_skips_non_entries() {
        assert_eq!(parse_oratab_line(""), None);
        assert_eq!(parse_oratab_line("   "), None);
        assert_eq!(parse_oratab_line("# dbm:/u01/db:Y"), None);
        assert_eq!(parse_oratab_line("no delimiter here"), None);
    }

    #[test]
    fn test_parse_line_strips_comment() {
        assert_eq!(parse_oratab_line("dbm:/u01/db # comment"), parse_oratab_line("dbm:/u01/db"));
    }

    #[test]
    fn test_registry_last_duplicate_wins() {
        let registry = Registry::parse("dbm:/old\nbiuat:/u01/bi\ndbm:/new\n");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.home("dbm"), Some("/new"));
        assert_eq!(registry.identifiers().collect::<Vec<_>>(), vec!["dbm", "biuat"]);
    }

    #[test]
    fn test_search_path_precedence() {
        let search = SearchPath::build(Some("/tmp/explicit"), Some("/tmp/override"), &defaults());
        assert_eq!(
            search.locations(),
            &[
                PathBuf::from("/tmp/explicit"),
                PathBuf::from("/tmp/override"),
                PathBuf::from("/etc/oratab"),
                PathBuf::from("/var/opt/oracle/oratab"),
            ]
        );
    }

    #[test]
    fn test_search_path_no_duplicates() {
        // An explicit default keeps its default position
        let search = SearchPath::build(Some("/var/opt/oracle/oratab"), Some("/etc/oratab"), &defaults());
        assert_eq!(search.locations(), defaults().as_slice());

        let search = SearchPath::build(Some("/tmp/x"), Some("/tmp/x"), &defaults());
        assert_eq!(search.locations().len(), 3);
        assert_eq!(search.locations()[0], PathBuf::from("/tmp/x"));
    }

    #[test]
    fn test_search_path_ignores_empty_values() {
        let search = SearchPath::build(Some(""), Some(""), &defaults());
        assert_eq!(search.locations(), defaults().as_slice());
    }

    #[test]
    fn test_read_failure_collapses_to_empty_registry() {
        let failed = Err(OraError::OratabUnreadable {
            path: PathBuf::from("/etc/oratab"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        });
        assert!(registry_or_empty(failed).is_empty());

        let loaded = Ok(LoadOutcome::Loaded {
            path: PathBuf::from("/etc/oratab"),
            registry: Registry::parse("dbm:/u01/db\n"),
        });
        assert_eq!(registry_or_empty(loaded).home("dbm"), Some("/u01/db"));
    }

    #[test]
    fn test_into_registry_for_not_found_is_empty() {
        let outcome = LoadOutcome::NotFound { searched: defaults() };
        assert!(outcome.registry().is_none());
        assert!(outcome.into_registry().is_empty());
    }
}
