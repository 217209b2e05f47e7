//! On-disk runner workspaces for integration tests.
//!
//! A [`RunnerWorkspace`] owns a temporary directory laid out the way a CI job
//! would have it: `runner.properties` at the root, `<suite>.properties`
//! overrides beside it, and optionally a fake `testrunner.sh` that behaves
//! like SoapUI's command-line runner closely enough for the pipeline to
//! exercise real processes.

use std::fs;

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// File name of the runner properties inside a workspace.
pub const RUNNER_PROPERTIES: &str = "runner.properties";

/// Temporary directory holding runner inputs and outputs.
#[derive(Debug)]
pub struct RunnerWorkspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl RunnerWorkspace {
    /// Creates an empty workspace.
    ///
    /// # Errors
    ///
    /// Returns an error when the temporary directory cannot be created or its
    /// path is not UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create workspace dir")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("workspace path is not UTF-8: {}", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Root directory of the workspace.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Resolves `relative` inside the workspace.
    #[must_use]
    pub fn path(&self, relative: &str) -> Utf8PathBuf {
        self.root.join(relative)
    }

    /// Path of the runner properties file.
    #[must_use]
    pub fn runner_properties(&self) -> Utf8PathBuf {
        self.path(RUNNER_PROPERTIES)
    }

    /// Writes `contents` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error when the file or its parents cannot be written.
    pub fn write(&self, relative: &str, contents: &str) -> Result<Utf8PathBuf> {
        let target = self.path(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        fs::write(&target, contents).with_context(|| format!("write {target}"))?;
        Ok(target)
    }

    /// Writes `runner.properties`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write_runner_properties(&self, contents: &str) -> Result<Utf8PathBuf> {
        self.write(RUNNER_PROPERTIES, contents)
    }

    /// Writes `<suite>.properties` next to the runner properties.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write_suite_overrides(&self, suite: &str, contents: &str) -> Result<Utf8PathBuf> {
        self.write(&format!("{suite}.properties"), contents)
    }

    /// Writes `TEST-<suite>.xml` into `report_dir` (relative to the root).
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write_result(&self, report_dir: &str, suite: &str, xml: &str) -> Result<Utf8PathBuf> {
        self.write(&format!("{report_dir}/TEST-{suite}.xml"), xml)
    }

    /// Reads a file inside the workspace.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read.
    pub fn read(&self, relative: &str) -> Result<String> {
        let target = self.path(relative);
        fs::read_to_string(&target).with_context(|| format!("read {target}"))
    }

    /// Installs an executable fake runner at `<dir>/testrunner.sh`.
    ///
    /// The script only uses shell built-ins because the runner is launched
    /// with an empty environment. It records its arguments and the
    /// `OVERRIDE` path in `<dir>/invocations.log`, copies the `endpoint`
    /// override into the test case name, and writes a one-case JUnit report
    /// into the `-f` directory. Suites whose name starts with `Broken` exit
    /// with status 3 after writing a failing report; suites whose name
    /// starts with `Silent` write nothing.
    ///
    /// # Errors
    ///
    /// Returns an error when the script cannot be written or made executable.
    #[cfg(unix)]
    pub fn install_fake_runner(&self, dir: &str) -> Result<Utf8PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        let script_dir = self.path(dir);
        let script = self.write(&format!("{dir}/testrunner.sh"), FAKE_RUNNER)?;
        let mut permissions = fs::metadata(&script)
            .with_context(|| format!("stat {script}"))?
            .permissions();
        permissions.set_mode(0o755);
        fs::set_permissions(&script, permissions).with_context(|| format!("chmod {script}"))?;
        Ok(script_dir)
    }
}

#[cfg(unix)]
const FAKE_RUNNER: &str = r#"#!/bin/sh
suite=""
report=""
for arg in "$@"; do
  case "$arg" in
    -s*) suite="${arg#-s}" ;;
    -f*) report="${arg#-f}" ;;
  esac
done
log_dir="${0%/*}"
printf '%s|OVERRIDE=%s\n' "$*" "$OVERRIDE" >> "$log_dir/invocations.log"
endpoint="unset"
if [ -n "$OVERRIDE" ]; then
  while IFS= read -r line; do
    case "$line" in
      endpoint=*) endpoint="${line#endpoint=}" ;;
    esac
  done < "$OVERRIDE"
fi
echo "fake runner: $suite against $endpoint"
case "$suite" in
  Silent*) exit 0 ;;
  Broken*)
    printf '<testsuite name="%s" tests="1" failures="1" errors="0" time="0.5"><testcase name="call %s" time="0.5"><failure message="boom">stack</failure></testcase></testsuite>\n' "$suite" "$endpoint" > "$report/TEST-$suite.xml"
    exit 3 ;;
esac
printf '<testsuite name="%s" tests="1" failures="0" errors="0" time="0.5"><testcase name="call %s" time="0.5"/></testsuite>\n' "$suite" "$endpoint" > "$report/TEST-$suite.xml"
exit 0
"#;
