//! Helpers for settings tests that run inside a [`figment::Jail`].
//!
//! A jail gives each test a fresh working directory and restores any
//! environment variables it sets, so tests exercising the
//! `SOAP_SUITE_RUNNER_*` layer cannot leak into one another.

use anyhow::{Result, anyhow};
use camino::Utf8PathBuf;

/// Runs `f` inside a jail and returns its value as an `anyhow::Result`.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Returns the jail's working directory as a UTF-8 path.
///
/// # Errors
///
/// Returns a [`figment::Error`] when the directory is not valid UTF-8.
pub fn jail_root(jail: &figment::Jail) -> figment::error::Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(jail.directory().to_path_buf())
        .map_err(|path| figment::Error::from(format!("non-UTF-8 jail path: {}", path.display())))
}

/// Converts any displayable error into a [`figment::Error`] so it can be
/// returned from a jail closure with `?`.
pub fn figment_error<E: ToString>(err: &E) -> figment::Error {
    figment::Error::from(err.to_string())
}
