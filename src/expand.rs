//! Shell-style variable expansion.
//!
//! Recognizes `$NAME`, `${NAME}` and the single-character shell specials
//! (`$1`, `$?`, `${#}`, ...). Unresolved names expand to the empty string.
//! A `$` not followed by a name is kept literally; malformed braces
//! (`${}`, `${unterminated`) are dropped.

use crate::env::Environment;

/// Expand `$NAME` / `${NAME}` tokens in `template` using `lookup`.
///
/// ```
/// let out = fpath::expand::expand("${HOME}/bin:$X", |name| match name {
///     "HOME" => Some("/root".to_string()),
///     _ => None,
/// });
/// assert_eq!(out, "/root/bin:");
/// ```
pub fn expand<F>(template: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len());
    let mut start = 0;
    let mut j = 0;

    while j < bytes.len() {
        if bytes[j] == b'$' && j + 1 < bytes.len() {
            out.push_str(&template[start..j]);
            let (name, width) = shell_name(&template[j + 1..]);
            match name {
                // Bad syntax: swallow the consumed characters.
                None if width > 0 => {}
                None => out.push('$'),
                Some(name) => out.push_str(&lookup(name).unwrap_or_default()),
            }
            j += width;
            start = j + 1;
        }
        j += 1;
    }

    if start == 0 {
        return template.to_string();
    }
    out.push_str(&template[start.min(bytes.len())..]);
    out
}

/// Expand against an [`Environment`].
pub fn expand_env(template: &str, env: &dyn Environment) -> String {
    expand(template, |name| env.get(name))
}

/// Expand against the process environment.
pub fn expand_process_env(template: &str) -> String {
    expand(template, |name| std::env::var(name).ok())
}

fn is_shell_special(c: u8) -> bool {
    matches!(
        c,
        b'*' | b'#' | b'$' | b'@' | b'!' | b'?' | b'-' | b'0'..=b'9'
    )
}

fn is_name_char(c: u8) -> bool {
    c == b'_' || c.is_ascii_alphanumeric()
}

/// Parse the name following a `$`. Returns the name (if well formed) and
/// the number of bytes consumed.
fn shell_name(s: &str) -> (Option<&str>, usize) {
    let bytes = s.as_bytes();
    if bytes[0] == b'{' {
        if bytes.len() > 2 && is_shell_special(bytes[1]) && bytes[2] == b'}' {
            return (Some(&s[1..2]), 3);
        }
        return match s[1..].find('}') {
            // `${}`
            Some(0) => (None, 2),
            Some(i) => (Some(&s[1..i + 1]), i + 2),
            // Unterminated: consume just the brace.
            None => (None, 1),
        };
    }
    if is_shell_special(bytes[0]) {
        return (Some(&s[0..1]), 1);
    }
    let len = bytes.iter().take_while(|c| is_name_char(**c)).count();
    if len == 0 {
        (None, 0)
    } else {
        (Some(&s[..len]), len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MemoryEnv;

    fn vars(name: &str) -> Option<String> {
        match name {
            "HOME" => Some("/home/me".to_string()),
            "A" => Some("x".to_string()),
            "1" => Some("first".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_expand_forms() {
        assert_eq!(expand("$HOME/t.js", vars), "/home/me/t.js");
        assert_eq!(expand("${HOME}/t.js", vars), "/home/me/t.js");
        assert_eq!(expand("$A$A", vars), "xx");
        assert_eq!(expand("${A}b", vars), "xb");
        assert_eq!(expand("$Ab", vars), "");
        assert_eq!(expand("$1x", vars), "firstx");
    }

    #[test]
    fn test_expand_unresolved_is_empty() {
        assert_eq!(expand("a/${MISSING}/b", vars), "a//b");
        assert_eq!(expand("$MISSING", vars), "");
    }

    #[test]
    fn test_expand_literal_dollar() {
        assert_eq!(expand("cost: $", vars), "cost: $");
        assert_eq!(expand("a $ b", vars), "a $ b");
        assert_eq!(expand("no tokens", vars), "no tokens");
    }

    #[test]
    fn test_expand_bad_syntax() {
        assert_eq!(expand("a${}b", vars), "ab");
        assert_eq!(expand("a${HOME", vars), "aHOME");
    }

    #[test]
    fn test_expand_non_ascii() {
        assert_eq!(expand("ñ/$A/ü", vars), "ñ/x/ü");
    }

    #[test]
    fn test_expand_env() {
        let env = MemoryEnv::new().with("ROOT", "/srv");
        assert_eq!(expand_env("${ROOT}/www", &env), "/srv/www");
    }
}
