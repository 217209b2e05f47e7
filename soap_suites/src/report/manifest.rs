//! The `all-testsuites.xml` manifest listing result files to aggregate.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::catalogue::{SuiteCatalogue, SuiteDescriptor};
use crate::error::{SuitesError, SuitesResult};
use crate::fs_helpers;

use super::MANIFEST_FILE;
use super::tree::Document;
use super::xml_writer::{XML_DECLARATION, XmlWriter};

const ROOT: &str = "results-aggregator";
const ENTRY: &str = "result-file";

/// Renders a manifest naming `result_files`.
#[must_use]
pub fn render_manifest<S: AsRef<str>>(result_files: &[S]) -> String {
    let mut writer = XmlWriter::new();
    writer.line(XML_DECLARATION);
    writer.open(ROOT, &[]);
    for file in result_files {
        writer.text(ENTRY, &[], file.as_ref());
    }
    writer.close(ROOT);
    writer.finish()
}

/// Writes `all-testsuites.xml` into `report_dir`, listing one result file per
/// suite in the catalogue.
///
/// # Errors
///
/// Returns [`SuitesError::Io`] when the directory or file cannot be written.
pub fn write_manifest(report_dir: &Utf8Path, catalogue: &SuiteCatalogue) -> SuitesResult<Utf8PathBuf> {
    let files: Vec<String> = catalogue
        .suites()
        .iter()
        .map(|suite| manifest_entry(report_dir, suite))
        .collect();
    let path = fs_helpers::write_file(report_dir, MANIFEST_FILE, &render_manifest(&files))?;
    debug!(path = %path, entries = files.len(), "wrote manifest");
    Ok(path)
}

/// Result files written to the shared report directory are listed by name;
/// a suite whose overrides redirect its results elsewhere is listed by full
/// path.
fn manifest_entry(report_dir: &Utf8Path, suite: &SuiteDescriptor) -> String {
    let file_name = suite.result_file_name();
    match suite.report_dir() {
        Ok(dir) if dir.as_path() != report_dir => dir.join(file_name).into_string(),
        _ => file_name,
    }
}

/// Parses manifest text into its result-file entries.
///
/// # Errors
///
/// Returns [`SuitesError::Xml`] when the text is not a `results-aggregator`
/// document.
pub fn parse_manifest(text: &str, source_name: &str) -> SuitesResult<Vec<String>> {
    let mut document = Document::parse(text, source_name)?;
    let root = document.name(ROOT);
    let entry = document.name(ENTRY);
    if !document.is(document.root, root) {
        return Err(SuitesError::xml(
            source_name,
            format!("expected a <{ROOT}> root element"),
        ));
    }
    Ok(document
        .children_named(document.root, entry)
        .filter_map(|node| document.text(node))
        .collect())
}

/// Reads the manifest at `path`.
///
/// # Errors
///
/// Returns [`SuitesError::Io`] when the file cannot be read and
/// [`SuitesError::Xml`] when it is malformed.
pub fn read_manifest(path: &Utf8Path) -> SuitesResult<Vec<String>> {
    let text = fs_helpers::read_to_string(path)?;
    parse_manifest(&text, path.as_str())
}
