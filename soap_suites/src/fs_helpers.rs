//! Filesystem helpers shared across modules.

use std::io::{Read, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};

use crate::error::{SuitesError, SuitesResult};

/// Reads a UTF-8 file, reporting failures against `path`.
pub(crate) fn read_to_string(path: &Utf8Path) -> SuitesResult<String> {
    read_optional(path)?.ok_or_else(|| {
        SuitesError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        )
    })
}

/// Reads a UTF-8 file, returning `None` when it does not exist.
pub(crate) fn read_optional(path: &Utf8Path) -> SuitesResult<Option<String>> {
    let (parent, file_name) = split_path(path)?;
    let dir = match Dir::open_ambient_dir(parent, ambient_authority()) {
        Ok(dir) => dir,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(SuitesError::io(path, err)),
    };
    let mut file = match dir.open(file_name) {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(SuitesError::io(path, err)),
    };

    let mut buffer = String::new();
    file.read_to_string(&mut buffer)
        .map_err(|err| SuitesError::io(path, err))?;
    Ok(Some(buffer))
}

/// Opens `path` as a directory, creating it (and its parents) when missing.
pub(crate) fn ensure_dir(path: &Utf8Path) -> SuitesResult<Dir> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority())
                .map_err(|err| SuitesError::io(path, err))?;
            Dir::open_ambient_dir(path, ambient_authority())
                .map_err(|err| SuitesError::io(path, err))
        }
        Err(open_err) => Err(SuitesError::io(path, open_err)),
    }
}

/// Writes `contents` to `dir_path/file_name`, replacing any previous file.
pub(crate) fn write_file(
    dir_path: &Utf8Path,
    file_name: &str,
    contents: &str,
) -> SuitesResult<Utf8PathBuf> {
    let dir = ensure_dir(dir_path)?;
    let target = dir_path.join(file_name);
    let mut file = dir
        .open_with(
            file_name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(|err| SuitesError::io(&target, err))?;
    file.write_all(contents.as_bytes())
        .map_err(|err| SuitesError::io(&target, err))?;
    Ok(target)
}

fn split_path(path: &Utf8Path) -> SuitesResult<(&Utf8Path, &str)> {
    let file_name = path.file_name().ok_or_else(|| {
        SuitesError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    Ok((parent, file_name))
}
