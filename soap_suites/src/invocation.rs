//! Command lines for the external SoapUI runner.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::process::{Command, Stdio};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs_utf8::OpenOptions;

use crate::catalogue::SuiteDescriptor;
use crate::error::{SuitesError, SuitesResult};
use crate::fs_helpers;

/// Environment variable through which the runner finds the overrides file.
pub const OVERRIDE_ENV: &str = "OVERRIDE";

/// Everything needed to launch the runner for one suite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunnerInvocation {
    suite: String,
    program: Utf8PathBuf,
    args: Vec<String>,
    env: BTreeMap<String, String>,
    clear_env: bool,
    log_file: Utf8PathBuf,
}

impl RunnerInvocation {
    /// Builds the invocation for `suite`.
    ///
    /// Arguments are `-s<suite>`, the configured runner flags, `-f<report
    /// dir>`, and finally the project path.
    ///
    /// # Errors
    ///
    /// Returns [`SuitesError::MissingKey`] when the suite lacks a project,
    /// runner directory, or report directory, and
    /// [`SuitesError::InvalidValue`] for a malformed `inherit-env` flag.
    pub fn for_suite(
        suite: &SuiteDescriptor,
        overrides_file: &Utf8Path,
        log_file: &Utf8Path,
    ) -> SuitesResult<Self> {
        let program = suite.runner_dir()?.join(suite.runner_script());
        let report_dir = suite.report_dir()?;
        let project = suite.project_path()?;

        let mut args = vec![format!("-s{}", suite.name())];
        args.extend(suite.runner_flags());
        args.push(format!("-f{report_dir}"));
        args.push(project.into_string());

        let env = BTreeMap::from([(OVERRIDE_ENV.to_owned(), overrides_file.to_string())]);

        Ok(Self {
            suite: suite.name().to_owned(),
            program,
            args,
            env,
            clear_env: !suite.inherit_env()?,
            log_file: log_file.to_path_buf(),
        })
    }

    /// Suite this invocation runs.
    #[must_use]
    pub fn suite(&self) -> &str {
        &self.suite
    }

    /// Runner script path.
    #[must_use]
    pub fn program(&self) -> &Utf8Path {
        &self.program
    }

    /// Arguments after the program.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Variables set for the child.
    #[must_use]
    pub const fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Whether the child starts from an empty environment.
    #[must_use]
    pub const fn clears_env(&self) -> bool {
        self.clear_env
    }

    /// File receiving the child's stdout and stderr.
    #[must_use]
    pub fn log_file(&self) -> &Utf8Path {
        &self.log_file
    }

    /// Prepares a [`Command`] with output appended to the log file.
    ///
    /// # Errors
    ///
    /// Returns [`SuitesError::Io`] when the log file cannot be opened.
    pub fn to_command(&self) -> SuitesResult<Command> {
        let (stdout, stderr) = self.open_log()?;
        let mut command = Command::new(self.program.as_std_path());
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr);
        if self.clear_env {
            command.env_clear();
        }
        command.envs(&self.env);
        Ok(command)
    }

    fn open_log(&self) -> SuitesResult<(Stdio, Stdio)> {
        let file_name = self.log_file.file_name().ok_or_else(|| {
            SuitesError::io(
                &self.log_file,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "log path has no file name"),
            )
        })?;
        let dir_path = match self.log_file.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let dir = fs_helpers::ensure_dir(dir_path)?;
        let file = dir
            .open_with(file_name, OpenOptions::new().append(true).create(true))
            .map_err(|err| SuitesError::io(&self.log_file, err))?
            .into_std();
        let copy = file
            .try_clone()
            .map_err(|err| SuitesError::io(&self.log_file, err))?;
        Ok((Stdio::from(file), Stdio::from(copy)))
    }

    /// Renders the invocation as a shell command line.
    #[must_use]
    pub fn display_line(&self) -> String {
        let mut parts: Vec<String> = self
            .env
            .iter()
            .map(|(key, value)| format!("{key}={}", shell_quote(value)))
            .collect();
        if self.clear_env {
            parts.insert(0, "env -i".to_owned());
        }
        parts.push(shell_quote(self.program.as_str()));
        parts.extend(self.args.iter().map(|arg| shell_quote(arg)));
        parts.join(" ")
    }
}

/// Quotes `word` for a POSIX shell. A word holding a NUL byte cannot be
/// quoted and is shown escaped instead.
fn shell_quote(word: &str) -> String {
    shlex::try_quote(word).map_or_else(|_| word.escape_default().to_string(), Cow::into_owned)
}
