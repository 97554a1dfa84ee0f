/// Oracle host integration module
///
/// This module provides oratab resolution, environment setup for a SID, and
/// message-code scanning of tool output.

pub mod environment;
pub mod error_check;
pub mod facility;
pub mod oratab;

pub use environment::{resolve_environment, set_oracle_env, OracleEnv};
pub use error_check::{check_output, check_output_from_env, scan_for_errors, ErrorMatch, ErrorReport, ErrorScanner};
pub use facility::{ComponentFilter, FacilityInfo, FacilityTable, ALL_COMPONENTS};
pub use oratab::{load_registry, load_registry_or_empty, registry_or_empty, parse_oratab_line, LoadOutcome, Registry, RegistryEntry, SearchPath};
