//! `.properties` text codec.
//!
//! Reads the format produced by Eclipse for `.prefs` files (comments, line
//! continuations, backslash and `\uXXXX` escapes) and writes one `key=value`
//! line per entry with no timestamp header, so unchanged content serializes to
//! identical bytes.

use std::fmt::Write;

/// Syntax problem found while decoding a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// 1-based physical line where the offending logical line starts.
    pub line: usize,
    pub reason: String,
}

impl SyntaxError {
    fn new(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\x0c'
}

/// Decode `text` into key-value pairs in file order. Duplicate keys are
/// returned as they appear; callers keep the last one.
pub fn parse(text: &str) -> Result<Vec<(String, String)>, SyntaxError> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut physical = normalized.split('\n').enumerate();
    let mut entries = Vec::new();

    while let Some((index, raw)) = physical.next() {
        let line = index + 1;
        let trimmed = raw.trim_start_matches(is_blank);
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = trimmed.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match physical.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        let (key, value) = split_key_value(&logical);
        entries.push((unescape(key, line)?, unescape(value, line)?));
    }

    Ok(entries)
}

/// An odd number of trailing backslashes joins the next physical line.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_key_value(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut has_separator = false;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                has_separator = true;
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = if key_end < line.len() {
        &line[key_end + 1..]
    } else {
        ""
    };

    loop {
        let Some(c) = rest.chars().next() else { break };
        if is_blank(c) {
            rest = &rest[c.len_utf8()..];
        } else if !has_separator && (c == '=' || c == ':') {
            has_separator = true;
            rest = &rest[1..];
        } else {
            break;
        }
    }

    (key, rest)
}

fn push_char(units: &mut Vec<u16>, c: char) {
    let mut buf = [0u16; 2];
    units.extend_from_slice(c.encode_utf16(&mut buf));
}

fn unescape(raw: &str, line: usize) -> Result<String, SyntaxError> {
    let mut units: Vec<u16> = Vec::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            push_char(&mut units, c);
            continue;
        }
        match chars.next() {
            Some('t') => units.push(u16::from(b'\t')),
            Some('n') => units.push(u16::from(b'\n')),
            Some('r') => units.push(u16::from(b'\r')),
            Some('f') => units.push(0x0c),
            Some('u') => {
                let digits: String = chars.by_ref().take(4).collect();
                if digits.chars().count() != 4 || !digits.chars().all(|d| d.is_ascii_hexdigit()) {
                    return Err(SyntaxError::new(
                        line,
                        format!("Malformed \\uxxxx encoding: \\u{}", digits),
                    ));
                }
                let unit = u16::from_str_radix(&digits, 16)
                    .map_err(|e| SyntaxError::new(line, e.to_string()))?;
                units.push(unit);
            }
            Some(other) => push_char(&mut units, other),
            None => {}
        }
    }

    String::from_utf16(&units)
        .map_err(|_| SyntaxError::new(line, "Invalid UTF-16 surrogate sequence in escape"))
}

/// Encode entries as `key=value` lines in the order given.
pub fn serialize<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = String::new();
    for (key, value) in entries {
        escape_into(&mut out, key, true);
        out.push('=');
        escape_into(&mut out, value, false);
        out.push('\n');
    }
    out
}

fn escape_into(out: &mut String, text: &str, is_key: bool) {
    for (i, c) in text.chars().enumerate() {
        match c {
            ' ' if i == 0 || is_key => out.push_str("\\ "),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || (c as u32) > 0x7e => {
                let mut buf = [0u16; 2];
                for unit in c.encode_utf16(&mut buf) {
                    let _ = write!(out, "\\u{:04X}", unit);
                }
            }
            c => out.push(c),
        }
    }
}
