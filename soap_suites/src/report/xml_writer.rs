//! Indented markup output shared by the XML and HTML writers.

use std::time::Duration;

pub(super) const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

pub(super) fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Formats a duration as decimal seconds with millisecond precision.
pub(super) fn seconds(duration: Duration) -> String {
    format!("{}.{:03}", duration.as_secs(), duration.subsec_millis())
}

/// Builds a start tag, escaping attribute values. Attributes with `None`
/// values are omitted.
pub(super) fn start_tag(name: &str, attrs: &[(&str, Option<&str>)], empty: bool) -> String {
    let mut tag = format!("<{name}");
    for (attr, value) in attrs {
        if let Some(text) = value {
            tag.push_str(&format!(r#" {attr}="{}""#, escape_xml(text)));
        }
    }
    tag.push_str(if empty { "/>" } else { ">" });
    tag
}

pub(super) struct XmlWriter {
    buffer: String,
    indent: usize,
}

impl XmlWriter {
    #[expect(
        clippy::missing_const_for_fn,
        reason = "avoid relying on const-stability details for allocation constructors"
    )]
    pub(super) fn new() -> Self {
        Self {
            buffer: String::new(),
            indent: 0,
        }
    }

    pub(super) const fn indent(&mut self) {
        self.indent += 1;
    }

    pub(super) const fn outdent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub(super) fn line(&mut self, line: &str) {
        for _ in 0..self.indent {
            self.buffer.push_str("  ");
        }
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    /// Writes a start tag and indents what follows.
    pub(super) fn open(&mut self, name: &str, attrs: &[(&str, Option<&str>)]) {
        self.line(&start_tag(name, attrs, false));
        self.indent();
    }

    /// Outdents and writes an end tag.
    pub(super) fn close(&mut self, name: &str) {
        self.outdent();
        self.line(&format!("</{name}>"));
    }

    pub(super) fn empty(&mut self, name: &str, attrs: &[(&str, Option<&str>)]) {
        self.line(&start_tag(name, attrs, true));
    }

    /// Writes `<name attrs>text</name>` on one line.
    pub(super) fn text(&mut self, name: &str, attrs: &[(&str, Option<&str>)], text: &str) {
        let open = start_tag(name, attrs, false);
        self.line(&format!("{open}{}</{name}>", escape_xml(text)));
    }

    pub(super) fn finish(self) -> String {
        self.buffer
    }
}
