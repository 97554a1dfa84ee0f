//! Facility table (`$ORACLE_HOME/lib/facility.lis`)
//!
//! A facility is the prefix of an Oracle message code (`ORA`, `TNS`, `SP2`,
//! ...); a component is the product that owns it. sqlplus, for example,
//! owns five:
//!
//! ```text
//! cpy:sqlplus:*:
//! sp1:sqlplus:*:
//! sp2:sqlplus:*:
//! sp3:sqlplus:*:
//! spw:sqlplus:*:
//! ```

use crate::config::Settings;
use crate::error::{OraError, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Component list entry that selects every facility.
pub const ALL_COMPONENTS: &str = "ALL_COMPONENTS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacilityInfo {
    pub component: String,
    /// Alternate facility name; `*` in the file means none.
    pub rename: Option<String>,
    pub description: Option<String>,
}

/// Facility code (uppercase) to owning component, sorted by code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FacilityTable {
    facilities: BTreeMap<String, FacilityInfo>,
}

impl FacilityTable {
    pub fn parse(text: &str) -> Self {
        let mut table = Self::default();
        for (number, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split(':');
            let code = fields.next().unwrap_or("").trim();
            let component = match fields.next() {
                Some(c) if !code.is_empty() => c.trim(),
                _ => {
                    log::debug!("Skipping facility line {}: {:?}", number + 1, raw);
                    continue;
                }
            };
            let rename = optional_field(fields.next()).filter(|r| r != "*");
            let description = optional_field(fields.next());

            table.facilities.insert(
                code.to_uppercase(),
                FacilityInfo {
                    component: component.to_string(),
                    rename,
                    description,
                },
            );
        }
        table
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| OraError::FacilityUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(&text);
        log::debug!("Loaded {} facilities from {:?}", table.len(), path);
        Ok(table)
    }

    /// Loads `<home>/lib/facility.lis`.
    pub fn load_for_home(home: &Path, settings: &Settings) -> Result<Self> {
        Self::load(&facility_path(home, settings))
    }

    pub fn insert(&mut self, code: &str, component: &str) {
        self.facilities.insert(
            code.to_uppercase(),
            FacilityInfo {
                component: component.to_string(),
                rename: None,
                description: None,
            },
        );
    }

    /// Case-insensitive lookup.
    pub fn get(&self, code: &str) -> Option<&FacilityInfo> {
        self.facilities.get(&code.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    /// Codes selected by `filter`, sorted.
    pub fn active_codes(&self, filter: &ComponentFilter) -> Vec<String> {
        self.facilities
            .iter()
            .filter(|(_, info)| filter.matches(&info.component))
            .map(|(code, _)| code.clone())
            .collect()
    }
}

fn optional_field(field: Option<&str>) -> Option<String> {
    field.map(str::trim).filter(|f| !f.is_empty()).map(str::to_string)
}

pub fn facility_path(home: &Path, settings: &Settings) -> PathBuf {
    home.join(&settings.facility_file)
}

/// Which components' facilities the scanner looks for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ComponentFilter {
    #[default]
    All,
    /// Exact component names, e.g. `sqlplus`, `rdbms`, `network`.
    Only(BTreeSet<String>),
}

impl ComponentFilter {
    /// Builds a filter from a component list. A list whose first entry is
    /// `ALL_COMPONENTS` (any case), or an empty list, selects everything.
    pub fn from_components<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = components.into_iter().map(Into::into).collect();
        match names.first() {
            None => ComponentFilter::All,
            Some(first) if first.eq_ignore_ascii_case(ALL_COMPONENTS) => ComponentFilter::All,
            Some(_) => ComponentFilter::Only(names.into_iter().collect()),
        }
    }

    pub fn matches(&self, component: &str) -> bool {
        match self {
            ComponentFilter::All => true,
            ComponentFilter::Only(names) => names.contains(component),
        }
    }
}
