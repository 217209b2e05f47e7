//! Line-level parsing of `.properties` text.

use crate::error::{SuitesError, SuitesResult};

/// A single `key = value` assignment with the physical line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Entry {
    pub(super) key: String,
    pub(super) value: String,
    pub(super) line: usize,
}

/// Splits `text` into unescaped entries, joining continuation lines.
///
/// Lines end at `\n`, `\r\n`, or a lone `\r`.
pub(super) fn parse_entries(text: &str, source_name: &str) -> SuitesResult<Vec<Entry>> {
    let mut entries = Vec::new();
    let normalised = text.replace("\r\n", "\n");
    let mut lines = normalised.split(['\n', '\r']).enumerate();

    while let Some((index, raw)) = lines.next() {
        let trimmed = raw.trim_start_matches(is_properties_space);
        if is_blank_or_comment(trimmed) {
            continue;
        }

        let line = index + 1;
        let mut logical = String::new();
        let mut current = trimmed;
        loop {
            if !has_continuation(current) {
                logical.push_str(current);
                break;
            }
            logical.push_str(current.strip_suffix('\\').unwrap_or(current));
            match lines.next() {
                Some((_, next)) => current = next.trim_start_matches(is_properties_space),
                None => break,
            }
        }

        entries.push(split_entry(&logical, source_name, line)?);
    }

    Ok(entries)
}

/// Only space, tab, and form feed separate tokens; other Unicode spaces are
/// ordinary key and value characters.
const fn is_properties_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\u{000C}')
}

fn is_blank_or_comment(line: &str) -> bool {
    line.is_empty() || line.starts_with('#') || line.starts_with('!')
}

/// A line continues when it ends in an odd number of backslashes.
fn has_continuation(line: &str) -> bool {
    let trailing = line.chars().rev().take_while(|&ch| ch == '\\').count();
    !trailing.is_multiple_of(2)
}

fn split_entry(logical: &str, source_name: &str, line: usize) -> SuitesResult<Entry> {
    let mut key_end = logical.len();
    let mut value_start = logical.len();
    let mut is_escaped = false;

    for (pos, ch) in logical.char_indices() {
        if is_escaped {
            is_escaped = false;
            continue;
        }
        match ch {
            '\\' => is_escaped = true,
            '=' | ':' => {
                key_end = pos;
                value_start = pos + ch.len_utf8();
                break;
            }
            _ if is_properties_space(ch) => {
                key_end = pos;
                value_start = skip_separator(logical, pos);
                break;
            }
            _ => {}
        }
    }

    let raw_key = logical.get(..key_end).unwrap_or_default();
    let raw_value = logical
        .get(value_start..)
        .unwrap_or_default()
        .trim_start_matches(is_properties_space);

    Ok(Entry {
        key: unescape(raw_key, source_name, line)?,
        value: unescape(raw_value, source_name, line)?,
        line,
    })
}

/// Skips whitespace after a key and at most one `=` or `:` separator.
fn skip_separator(logical: &str, from: usize) -> usize {
    let rest = logical.get(from..).unwrap_or_default();
    let after_space = rest.trim_start_matches(is_properties_space);
    let mut offset = logical.len() - after_space.len();
    if let Some(sep) = after_space.chars().next().filter(|c| matches!(c, '=' | ':')) {
        offset += sep.len_utf8();
    }
    offset
}

/// Resolves backslash escapes, including UTF-16 surrogate pairs written as
/// consecutive `\uXXXX` sequences.
pub(super) fn unescape(raw: &str, source_name: &str, line: usize) -> SuitesResult<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    let mut pending_high: Option<u16> = None;

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            flush_high_surrogate(&mut pending_high, &mut out);
            out.push(ch);
            continue;
        }
        let Some(escaped) = chars.next() else {
            break;
        };
        if escaped != 'u' {
            flush_high_surrogate(&mut pending_high, &mut out);
            out.push(match escaped {
                't' => '\t',
                'n' => '\n',
                'r' => '\r',
                'f' => '\u{000C}',
                other => other,
            });
            continue;
        }

        let hex: String = chars.by_ref().take(4).collect();
        let unit = parse_code_unit(&hex).ok_or_else(|| SuitesError::Properties {
            source_name: source_name.to_owned(),
            line,
            message: format!("malformed \\u escape '\\u{hex}'"),
        })?;

        let previous = pending_high.take();
        if (0xDC00..=0xDFFF).contains(&unit) {
            match previous {
                Some(high) => out.extend(
                    char::decode_utf16([high, unit])
                        .map(|decoded| decoded.unwrap_or(char::REPLACEMENT_CHARACTER)),
                ),
                None => out.push(char::REPLACEMENT_CHARACTER),
            }
            continue;
        }
        if previous.is_some() {
            out.push(char::REPLACEMENT_CHARACTER);
        }
        if (0xD800..=0xDBFF).contains(&unit) {
            pending_high = Some(unit);
            continue;
        }
        out.push(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER));
    }
    flush_high_surrogate(&mut pending_high, &mut out);

    Ok(out)
}

fn parse_code_unit(hex: &str) -> Option<u16> {
    if hex.len() != 4 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(hex, 16).ok()
}

fn flush_high_surrogate(pending: &mut Option<u16>, out: &mut String) {
    if pending.take().is_some() {
        out.push(char::REPLACEMENT_CHARACTER);
    }
}
