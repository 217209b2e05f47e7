//! Escaping for `.properties` output.
//!
//! The SoapUI runner reads overrides with `java.util.Properties::load`,
//! which decodes ISO-8859-1, so everything outside printable ASCII is written
//! as `\uXXXX`.

pub(super) fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for ch in key.chars() {
        match ch {
            '=' | ':' | '#' | '!' | ' ' => {
                out.push('\\');
                out.push(ch);
            }
            _ => push_escaped(&mut out, ch),
        }
    }
    out
}

pub(super) fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut is_leading = true;
    for ch in value.chars() {
        if is_leading && ch == ' ' {
            out.push_str("\\ ");
            continue;
        }
        is_leading = false;
        push_escaped(&mut out, ch);
    }
    out
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '\\' => out.push_str("\\\\"),
        '\t' => out.push_str("\\t"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\u{000C}' => out.push_str("\\f"),
        ' '..='~' => out.push(ch),
        _ => {
            let mut units = [0_u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{unit:04X}"));
            }
        }
    }
}
