//! Line-oriented `key<sep>value` loader.
//!
//! # Format
//!
//! ```text
//! # comment
//! // also a comment
//! Home = /srv/app
//! Bin  = ${Home}/bin
//! Motd = "hello\tworld"
//! ```
//!
//! Each line is handled independently and nothing is ever reported as an
//! error: lines shorter than three bytes, comments and lines without the
//! separator are skipped. Keys and values are trimmed. With the matching
//! options enabled, values are unquoted, `${NAME}` tokens are expanded from
//! earlier keys then the environment, and each pair is exported into the
//! environment before the next line is read.

use std::io::BufRead;

use crate::env::Environment;
use crate::expand;
use crate::value::{Value, ValueMap};

/// Options for [`load_value_map`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Literal separator between key and value. Only the first occurrence
    /// on a line splits it.
    pub separator: String,
    /// Interpret quoted values as string literals.
    pub unquote: bool,
    /// Expand `$NAME` / `${NAME}` tokens in values.
    pub expand_vars: bool,
    /// Export every pair into the environment as it is loaded.
    pub set_env: bool,
}

impl LoadOptions {
    /// Plain loading with `separator`, all transformations off.
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            unquote: false,
            expand_vars: false,
            set_env: false,
        }
    }

    pub fn unquote(mut self, on: bool) -> Self {
        self.unquote = on;
        self
    }

    pub fn expand_vars(mut self, on: bool) -> Self {
        self.expand_vars = on;
        self
    }

    pub fn set_env(mut self, on: bool) -> Self {
        self.set_env = on;
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::new("=")
    }
}

/// Parse every line of `reader` into a [`ValueMap`].
///
/// `env` backs the expansion fallback and receives exported pairs. Pass
/// [`ProcessEnv`](crate::env::ProcessEnv) for real process-wide export or a
/// [`MemoryEnv`](crate::env::MemoryEnv) to contain it. Reading stops
/// quietly at the first I/O error; invalid UTF-8 is replaced.
pub fn load_value_map<R: BufRead>(
    mut reader: R,
    options: &LoadOptions,
    env: &mut dyn Environment,
) -> ValueMap {
    let mut map = ValueMap::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::debug!("[kv] stopped reading: {e}");
                break;
            }
        }

        let raw = String::from_utf8_lossy(&buf);
        let line = raw.strip_suffix('\n').unwrap_or(&raw);
        let line = line.strip_suffix('\r').unwrap_or(line);

        let Some((key, value)) = split_line(line, &options.separator) else {
            tracing::trace!("[kv] skipped line {line:?}");
            continue;
        };

        let mut value = value.to_string();
        if options.unquote {
            if let Some(unquoted) = unquote(&value) {
                value = unquoted;
            }
        }

        if options.expand_vars {
            value = expand::expand(&value, |name| {
                map.get(name)
                    .map(|v| v.as_str().to_string())
                    .or_else(|| env.get(name))
            });
        }

        if options.set_env {
            env.set(key, &value);
        }

        map.insert(key.to_string(), Value::new(value));
    }

    map
}

/// Split a line into trimmed key and value, or `None` if it is skipped.
fn split_line<'a>(line: &'a str, sep: &str) -> Option<(&'a str, &'a str)> {
    if line.len() < 3 || line.starts_with('#') || line.starts_with("//") {
        return None;
    }
    if sep.is_empty() {
        return None;
    }
    let (key, value) = line.split_once(sep)?;
    Some((key.trim(), value.trim()))
}

/// Interpret `s` as a quoted string literal.
///
/// - `"..."` with escapes `\a \b \f \n \r \t \v \\ \"`, `\xHH`, octal
///   `\OOO`, `\uHHHH` and `\UHHHHHHHH`
/// - `'c'` holding exactly one character (escapes allowed, `\'` instead
///   of `\"`)
/// - `` `...` `` raw, with carriage returns removed
///
/// Returns `None` when `s` is not a well-formed literal.
pub fn unquote(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != bytes[bytes.len() - 1] {
        return None;
    }
    let inner = &s[1..s.len() - 1];

    match bytes[0] {
        b'`' => {
            if inner.contains('`') {
                return None;
            }
            Some(inner.replace('\r', ""))
        }
        quote @ (b'"' | b'\'') => {
            if inner.contains('\n') {
                return None;
            }
            let out = unescape(inner, quote as char)?;
            if quote == b'\'' && out.chars().count() != 1 {
                return None;
            }
            Some(out)
        }
        _ => None,
    }
}

fn unescape(inner: &str, quote: char) -> Option<String> {
    let mut out: Vec<u8> = Vec::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c == quote {
            return None;
        }
        if c != '\\' {
            push_char(&mut out, c);
            continue;
        }

        match chars.next()? {
            'a' => out.push(0x07),
            'b' => out.push(0x08),
            'f' => out.push(0x0c),
            'n' => out.push(b'\n'),
            'r' => out.push(b'\r'),
            't' => out.push(b'\t'),
            'v' => out.push(0x0b),
            '\\' => out.push(b'\\'),
            q @ ('\'' | '"') if q == quote => out.push(q as u8),
            'x' => out.push(u8::try_from(read_digits(&mut chars, 2, 16)?).ok()?),
            'u' => push_char(&mut out, char::from_u32(read_digits(&mut chars, 4, 16)?)?),
            'U' => push_char(&mut out, char::from_u32(read_digits(&mut chars, 8, 16)?)?),
            d @ '0'..='7' => {
                let rest = read_digits(&mut chars, 2, 8)?;
                let value = d.to_digit(8)? * 64 + rest;
                out.push(u8::try_from(value).ok()?);
            }
            _ => return None,
        }
    }

    String::from_utf8(out).ok()
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

fn read_digits(chars: &mut std::str::Chars<'_>, count: usize, radix: u32) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..count {
        value = value * radix + chars.next()?.to_digit(radix)?;
    }
    Some(value)
}
