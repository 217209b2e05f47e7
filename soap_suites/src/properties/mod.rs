//! Java-style `.properties` documents.
//!
//! Runner properties and suite overrides are written by hand by the people
//! maintaining the SoapUI projects, so the parser accepts the full
//! `java.util.Properties` line syntax: `=`, `:` or whitespace separators,
//! backslash continuations, and `\uXXXX` escapes. Keys assigned more than
//! once keep every value in assignment order; lookups return the first.

mod escape;
mod include;
mod parser;
#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::io::Write;

use camino::Utf8Path;

use crate::error::SuitesResult;

pub use include::INCLUDE_KEY;

/// Ordered multi-valued key/value document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl Properties {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `text` without resolving `include` directives.
    ///
    /// `source_name` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SuitesError::Properties`] when an escape sequence is
    /// malformed.
    pub fn parse(text: &str, source_name: &str) -> SuitesResult<Self> {
        let mut properties = Self::new();
        for entry in parser::parse_entries(text, source_name)? {
            properties.insert(entry.key, entry.value);
        }
        Ok(properties)
    }

    /// Reads and parses the file at `path`, expanding `include` directives
    /// relative to the including file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file (or an included file) cannot be read or
    /// parsed, or when includes form a cycle.
    pub fn load(path: &Utf8Path) -> SuitesResult<Self> {
        include::load_with_includes(path)
    }

    /// Appends `value` to the values held for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key_string = key.into();
        match self.index.get(&key_string) {
            Some(&slot) => {
                if let Some((_, values)) = self.entries.get_mut(slot) {
                    values.push(value.into());
                }
            }
            None => {
                self.index.insert(key_string.clone(), self.entries.len());
                self.entries.push((key_string, vec![value.into()]));
            }
        }
    }

    /// Returns the first value assigned to `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_all(key).first().map(String::as_str)
    }

    /// Returns every value assigned to `key`, in assignment order.
    #[must_use]
    pub fn get_all(&self, key: &str) -> &[String] {
        self.index
            .get(key)
            .and_then(|&slot| self.entries.get(slot))
            .map_or(&[], |(_, values)| values.as_slice())
    }

    /// Reports whether `key` has at least one value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Iterates keys in first-assignment order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Iterates `(key, values)` pairs in first-assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Number of distinct keys.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the document holds no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entries below `prefix.` with the prefix stripped.
    ///
    /// ```rust
    /// use soap_suites::Properties;
    ///
    /// let props = Properties::parse("soapui.report.dir=out\nother=1\n", "inline")?;
    /// let tool = props.subset("soapui");
    /// assert_eq!(tool.get("report.dir"), Some("out"));
    /// assert!(!tool.contains_key("other"));
    /// # Ok::<_, soap_suites::SuitesError>(())
    /// ```
    #[must_use]
    pub fn subset(&self, prefix: &str) -> Self {
        let dotted = format!("{prefix}.");
        let mut subset = Self::new();
        for (key, values) in self.iter() {
            let Some(stripped) = key.strip_prefix(&dotted) else {
                continue;
            };
            if stripped.is_empty() {
                continue;
            }
            for value in values {
                subset.insert(stripped, value.clone());
            }
        }
        subset
    }

    /// Writes one `key=value` line per value.
    ///
    /// # Errors
    ///
    /// Propagates failures from `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(self.to_properties_string().as_bytes())
    }

    /// Renders the document in `.properties` syntax.
    #[must_use]
    pub fn to_properties_string(&self) -> String {
        let mut rendered = String::new();
        for (key, values) in self.iter() {
            let escaped_key = escape::escape_key(key);
            for value in values {
                rendered.push_str(&escaped_key);
                rendered.push('=');
                rendered.push_str(&escape::escape_value(value));
                rendered.push('\n');
            }
        }
        rendered
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Self::new();
        for (key, value) in iter {
            properties.insert(key, value);
        }
        properties
    }
}
