//! Prints the contents of an INI-style script configuration file.

use crate::error::{OraError, Result};
use ini::Ini;
use std::io::Write;
use std::path::Path;

const RULE: &str = "-------------------------------------------------------------------";

/// Writes every section of `path` and its options, sorted, to `out`.
///
/// Options outside any section are not printed.
pub fn dump_config<W: Write>(path: &Path, out: &mut W) -> Result<()> {
    let config = Ini::load_from_file(path).map_err(|e| OraError::ConfigRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sections: Vec<&str> = config.sections().flatten().collect();

    writeln!(out, "\nConfiguration: {}", path.display())?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Sections: {:?}", sections)?;

    for name in &sections {
        writeln!(out, "\n[{}]", name)?;
        let mut options: Vec<(&str, &str)> = config
            .section(Some(*name))
            .map(|props| props.iter().collect())
            .unwrap_or_default();
        options.sort_by(|a, b| a.0.cmp(b.0));
        for (option, value) in options {
            writeln!(out, "{:<40} = {:<40}", option, value)?;
        }
    }
    Ok(())
}
