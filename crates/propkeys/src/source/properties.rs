//! Parser for the line-oriented properties format.

use super::Properties;
use crate::SourceError;

const WHITESPACE: [char; 3] = [' ', '\t', '\u{c}'];

pub(super) fn parse(input: &str) -> Result<Properties, SourceError> {
    let mut properties = Properties::new();
    let mut lines = input.lines().enumerate();

    while let Some((idx, line)) = lines.next() {
        let line_number = idx + 1;
        let line = line.trim_start_matches(WHITESPACE);
        if line.is_empty() || line.starts_with(['#', '!']) {
            continue;
        }

        let mut logical_line = String::new();
        let mut current = line;
        while let Some(stripped) = strip_continuation(current) {
            logical_line.push_str(stripped);
            let Some((_, next)) = lines.next() else {
                current = "";
                break;
            };
            current = next.trim_start_matches(WHITESPACE);
        }
        logical_line.push_str(current);

        let (raw_key, raw_value) = split_entry(&logical_line);
        let key = unescape(raw_key, line_number)?;
        let value = unescape(raw_value, line_number)?;
        properties.insert(key, value);
    }
    Ok(properties)
}

/// Strips the trailing continuation backslash. A line is continued if it ends with an odd number of backslashes.
fn strip_continuation(line: &str) -> Option<&str> {
    let trailing_backslashes = line.chars().rev().take_while(|&ch| ch == '\\').count();
    (trailing_backslashes % 2 == 1).then(|| &line[..line.len() - 1])
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (pos, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if ch == '\\' {
            escaped = true;
        } else if ch == '=' || ch == ':' || WHITESPACE.contains(&ch) {
            key_end = pos;
            break;
        }
    }

    let (key, rest) = line.split_at(key_end);
    let rest = rest.trim_start_matches(WHITESPACE);
    let rest = rest.strip_prefix(['=', ':']).unwrap_or(rest);
    (key, rest.trim_start_matches(WHITESPACE))
}

fn unescape(raw: &str, line: usize) -> Result<String, SourceError> {
    if !raw.contains('\\') {
        return Ok(raw.to_owned());
    }

    let mut output = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            output.push(ch);
            continue;
        }
        let Some(escaped) = chars.next() else {
            break;
        };
        let unescaped = match escaped {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => '\u{c}',
            'u' => unescape_unicode(&mut chars, line)?,
            _ => escaped,
        };
        output.push(unescaped);
    }
    Ok(output)
}

fn read_code_unit(chars: &mut std::str::Chars<'_>, line: usize) -> Result<u16, SourceError> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.len() != 4 || !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(SourceError::Syntax {
            line,
            message: format!("malformed \\uXXXX escape: `\\u{digits}`"),
        });
    }
    u16::from_str_radix(&digits, 16).map_err(|err| SourceError::Syntax {
        line,
        message: err.to_string(),
    })
}

/// Decodes a `\uXXXX` escape (the `\u` prefix is already consumed), including UTF-16 surrogate pairs
/// encoded as two escapes.
fn unescape_unicode(chars: &mut std::str::Chars<'_>, line: usize) -> Result<char, SourceError> {
    let unit = read_code_unit(chars, line)?;
    let units = if (0xd800..0xdc00).contains(&unit) {
        if !chars.as_str().starts_with("\\u") {
            return Err(SourceError::Syntax {
                line,
                message: format!("unpaired surrogate `\\u{unit:04x}`"),
            });
        }
        // Skip the `\u` prefix of the low surrogate
        chars.next();
        chars.next();
        vec![unit, read_code_unit(chars, line)?]
    } else {
        vec![unit]
    };

    char::decode_utf16(units)
        .next()
        .and_then(Result::ok)
        .ok_or_else(|| SourceError::Syntax {
            line,
            message: format!("invalid Unicode escape `\\u{unit:04x}`"),
        })
}
