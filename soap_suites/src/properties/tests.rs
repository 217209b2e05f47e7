//! Unit tests for properties parsing, includes, and serialisation.

use super::*;
use crate::SuitesError;
use camino::Utf8PathBuf;
use rstest::rstest;
use std::fs;

fn parse(text: &str) -> Properties {
    Properties::parse(text, "inline").expect("properties should parse")
}

#[rstest]
#[case("key=value", "value")]
#[case("key = value", "value")]
#[case("key:value", "value")]
#[case("key : value", "value")]
#[case("key value", "value")]
#[case("key\t\tvalue", "value")]
#[case("   key=value", "value")]
#[case("key=", "")]
#[case("key", "")]
#[case("key==value", "=value")]
fn separators_are_recognised(#[case] line: &str, #[case] expected: &str) {
    assert_eq!(parse(line).get("key"), Some(expected));
}

#[rstest]
fn comments_and_blank_lines_are_skipped() {
    let props = parse("# comment\n! bang comment\n\n   \nname=alpha\n");
    assert_eq!(props.len(), 1);
    assert_eq!(props.get("name"), Some("alpha"));
}

#[rstest]
#[case("a=1\rb=2\r")]
#[case("a=1\r\nb=2\r\n")]
#[case("a=1\nb=2")]
fn every_line_ending_splits_entries(#[case] text: &str) {
    let props = parse(text);
    assert_eq!(props.len(), 2);
    assert_eq!(props.get("a"), Some("1"));
    assert_eq!(props.get("b"), Some("2"));
}

#[rstest]
fn lone_carriage_return_lines_keep_their_numbers() {
    let err = Properties::parse("a=1\rb=2\rbad=\\u12\r", "inline")
        .expect_err("malformed escape should fail");
    assert!(matches!(err, SuitesError::Properties { line: 3, .. }));
}

#[rstest]
fn non_breaking_space_is_not_a_separator() {
    let props = parse("a\u{a0}b=1\nk=\u{a0}v\n");
    assert_eq!(props.keys().collect::<Vec<_>>(), ["a\u{a0}b", "k"]);
    assert_eq!(props.get("a\u{a0}b"), Some("1"));
    assert_eq!(props.get("k"), Some("\u{a0}v"));
}

#[rstest]
fn form_feed_separates_like_a_space() {
    let props = parse("\u{c}key\u{c}value\n");
    assert_eq!(props.get("key"), Some("value"));
}

#[rstest]
fn continuation_lines_are_joined() {
    let props = parse("endpoints = http://one,\\\n    http://two,\\\n    http://three\nafter=1\n");
    assert_eq!(props.get("endpoints"), Some("http://one,http://two,http://three"));
    assert_eq!(props.get("after"), Some("1"));
}

#[rstest]
fn even_backslashes_do_not_continue() {
    let props = parse("path=C:\\\\\nnext=2\n");
    assert_eq!(props.get("path"), Some("C:\\"));
    assert_eq!(props.get("next"), Some("2"));
}

#[rstest]
fn escaped_separators_belong_to_the_key() {
    let props = parse("a\\=b\\:c\\ d = value");
    assert_eq!(props.get("a=b:c d"), Some("value"));
}

#[rstest]
#[case("greeting=caf\\u00e9", "caf\u{e9}")]
#[case("smile=\\uD83D\\uDE00", "\u{1F600}")]
#[case("tabbed=a\\tb", "a\tb")]
#[case("other=\\q", "q")]
fn escapes_are_decoded(#[case] line: &str, #[case] expected: &str) {
    let props = parse(line);
    let (_, values) = props.iter().next().expect("one entry");
    assert_eq!(values, [expected.to_owned()]);
}

#[rstest]
fn malformed_unicode_escape_reports_line() {
    let err = Properties::parse("ok=1\nbad=\\u12G4\n", "suite.properties")
        .expect_err("malformed escape must fail");
    match err {
        SuitesError::Properties {
            source_name, line, ..
        } => {
            assert_eq!(source_name, "suite.properties");
            assert_eq!(line, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
fn repeated_keys_accumulate_in_order() {
    let props = parse("host=a\nport=1\nhost=b\n");
    assert_eq!(props.get("host"), Some("a"));
    assert_eq!(props.get_all("host"), ["a".to_owned(), "b".to_owned()]);
    assert_eq!(props.keys().collect::<Vec<_>>(), ["host", "port"]);
}

#[rstest]
fn subset_strips_prefix_and_ignores_bare_prefix() {
    let props = parse("soapui=ignored\nsoapui.project=p.xml\nsoapuix.other=1\nendpoint=x\n");
    let subset = props.subset("soapui");
    assert_eq!(subset.keys().collect::<Vec<_>>(), ["project"]);
    assert_eq!(subset.get("project"), Some("p.xml"));
}

#[rstest]
fn rendered_document_parses_back_to_the_same_entries() {
    let original: Properties = [
        ("plain", "value"),
        ("spaced key", "  leading"),
        ("path", "C:\\soapui\\bin"),
        ("multi", "one"),
        ("multi", "two"),
        ("unicode", "na\u{ef}ve \u{1F600}"),
        ("empty", ""),
    ]
    .into_iter()
    .collect();

    let rendered = original.to_properties_string();
    let reparsed = parse(&rendered);
    assert_eq!(reparsed, original);
}

fn temp_dir() -> (tempfile::TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp path");
    (dir, path)
}

#[rstest]
fn include_splices_file_in_place() {
    let (_guard, root) = temp_dir();
    fs::create_dir_all(root.join("shared")).expect("create shared dir");
    fs::write(root.join("shared/common.properties"), "timeout=30\nhost=shared\n")
        .expect("write include");
    fs::write(
        root.join("runner.properties"),
        "first=1\ninclude = shared/common.properties\nhost=local\n",
    )
    .expect("write runner");

    let props = Properties::load(&root.join("runner.properties")).expect("load with include");
    assert_eq!(props.keys().collect::<Vec<_>>(), ["first", "timeout", "host"]);
    assert_eq!(props.get("host"), Some("shared"));
    assert_eq!(props.get_all("host").len(), 2);
    assert!(!props.contains_key(INCLUDE_KEY));
}

#[rstest]
fn include_cycle_is_rejected() {
    let (_guard, root) = temp_dir();
    fs::write(root.join("a.properties"), "include=b.properties\n").expect("write a");
    fs::write(root.join("b.properties"), "include=a.properties\n").expect("write b");

    let err = Properties::load(&root.join("a.properties")).expect_err("cycle must fail");
    let cycle = match err {
        SuitesError::IncludeCycle { cycle } => cycle,
        other => panic!("expected include cycle, got {other}"),
    };
    assert!(cycle.contains("a.properties"));
    assert!(cycle.contains("b.properties"));
}

#[rstest]
fn missing_include_is_an_io_error() {
    let (_guard, root) = temp_dir();
    fs::write(root.join("a.properties"), "include=absent.properties\n").expect("write a");

    let err = Properties::load(&root.join("a.properties")).expect_err("missing include");
    assert!(matches!(err, SuitesError::Io { .. }));
}
