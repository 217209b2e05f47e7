//! Builders for JUnit-style result documents as SoapUI writes them.

/// Outcome of a single fixture test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case<'a> {
    /// The case passed.
    Pass(&'a str),
    /// The case failed an assertion with the given message.
    Fail(&'a str, &'a str),
    /// The case raised an error with the given message.
    Error(&'a str, &'a str),
    /// The case was skipped.
    Skip(&'a str),
}

impl Case<'_> {
    fn name(&self) -> &str {
        match self {
            Self::Pass(name) | Self::Fail(name, _) | Self::Error(name, _) | Self::Skip(name) => name,
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders a `<testsuite>` document with counts derived from `cases`.
#[must_use]
pub fn suite_xml(name: &str, cases: &[Case<'_>]) -> String {
    let failures = cases.iter().filter(|case| matches!(case, Case::Fail(..))).count();
    let errors = cases.iter().filter(|case| matches!(case, Case::Error(..))).count();
    let skipped = cases.iter().filter(|case| matches!(case, Case::Skip(..))).count();

    let mut xml = format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<testsuite name=\"{}\" tests=\"{}\" failures=\"{}\" errors=\"{}\" skipped=\"{}\" time=\"0.250\">\n",
        ),
        escape(name),
        cases.len(),
        failures,
        errors,
        skipped,
    );
    for case in cases {
        xml.push_str(&format!(
            "  <testcase name=\"{}\" classname=\"{}\" time=\"0.125\">\n",
            escape(case.name()),
            escape(name)
        ));
        match case {
            Case::Pass(_) => {}
            Case::Fail(_, raw) => xml.push_str(&format!(
                "    <failure type=\"AssertionFailure\" message=\"{message}\">{message} detail</failure>\n",
                message = escape(raw)
            )),
            Case::Error(_, raw) => xml.push_str(&format!(
                "    <error type=\"Exception\" message=\"{message}\">{message} trace</error>\n",
                message = escape(raw)
            )),
            Case::Skip(_) => xml.push_str("    <skipped/>\n"),
        }
        xml.push_str("  </testcase>\n");
    }
    xml.push_str("</testsuite>\n");
    xml
}
