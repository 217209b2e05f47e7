//! File loading with `include` expansion.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{SuitesError, SuitesResult};
use crate::fs_helpers::read_to_string;

use super::Properties;
use super::parser::parse_entries;

/// Key whose value names another properties file to splice in place.
pub const INCLUDE_KEY: &str = "include";

pub(super) fn load_with_includes(path: &Utf8Path) -> SuitesResult<Properties> {
    let mut properties = Properties::new();
    let mut stack = Vec::new();
    load_into(path, &mut properties, &mut stack)?;
    Ok(properties)
}

fn load_into(
    path: &Utf8Path,
    properties: &mut Properties,
    stack: &mut Vec<Utf8PathBuf>,
) -> SuitesResult<()> {
    let canonical = canonicalise(path)?;
    if stack.contains(&canonical) {
        let mut cycle: Vec<String> = stack.iter().map(ToString::to_string).collect();
        cycle.push(canonical.to_string());
        return Err(SuitesError::IncludeCycle {
            cycle: cycle.join(" -> "),
        });
    }

    let text = read_to_string(&canonical)?;
    let entries = parse_entries(&text, canonical.as_str())?;
    let base_dir = canonical
        .parent()
        .map_or_else(|| Utf8PathBuf::from("."), Utf8Path::to_path_buf);

    stack.push(canonical.clone());
    for entry in entries {
        if entry.key != INCLUDE_KEY {
            properties.insert(entry.key, entry.value);
            continue;
        }
        let target = entry.value.trim();
        if target.is_empty() {
            return Err(SuitesError::Properties {
                source_name: canonical.to_string(),
                line: entry.line,
                message: "include requires a file name".to_owned(),
            });
        }
        load_into(&base_dir.join(target), properties, stack)?;
    }
    stack.pop();

    Ok(())
}

fn canonicalise(path: &Utf8Path) -> SuitesResult<Utf8PathBuf> {
    let canonical = dunce::canonicalize(path).map_err(|err| SuitesError::io(path, err))?;
    Utf8PathBuf::from_path_buf(canonical).map_err(|raw| {
        SuitesError::io(
            path,
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("'{}' is not valid UTF-8", raw.display()),
            ),
        )
    })
}
