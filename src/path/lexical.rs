//! Purely textual path manipulation.
//!
//! Nothing here touches the filesystem. Paths use `/` as the separator and
//! `..` is collapsed against the preceding element whenever one exists,
//! regardless of what is actually on disk.

/// Lexically normalize a path.
///
/// - repeated separators collapse to one
/// - `.` elements are removed
/// - `..` removes the preceding non-`..` element
/// - `..` directly under the root is dropped (`/..` is `/`)
/// - trailing separators are removed (except for the root)
/// - the empty result is `.`
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            _ => parts.push(part),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Join elements with `/` and clean the result.
///
/// Leading empty elements are ignored; if every element is empty the result
/// is the empty string (not `.`). An absolute element after the first does
/// not reset the path: `join(["a", "/b"])` is `a/b`.
pub fn join<I, S>(elems: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut buf = String::new();
    let mut started = false;

    for elem in elems {
        let elem = elem.as_ref();
        if !started {
            if elem.is_empty() {
                continue;
            }
            started = true;
        } else {
            buf.push('/');
        }
        buf.push_str(elem);
    }

    if started { clean(&buf) } else { String::new() }
}

/// Strip trailing separators, keeping a lone root.
fn trim_trailing(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && !path.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Directory part of a path (`dirname`).
///
/// Trailing separators are ignored, the parent of the root is the root,
/// and a path with no directory component yields `.`.
pub fn dir(path: &str) -> String {
    let path = trim_trailing(path);
    match path.rfind('/') {
        Some(i) => clean(&path[..=i]),
        None => ".".to_string(),
    }
}

/// Last element of a path (`basename`).
///
/// Trailing separators are ignored; the empty path yields `.` and a path of
/// only separators yields `/`.
pub fn base(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let path = trim_trailing(path);
    if path == "/" {
        return "/".to_string();
    }
    match path.rfind('/') {
        Some(i) => path[i + 1..].to_string(),
        None => path.to_string(),
    }
}

/// Extension of the final element, including the dot. Empty when the final
/// element has no dot.
pub fn ext(path: &str) -> &str {
    let last = path.rsplit('/').next().unwrap_or(path);
    match last.rfind('.') {
        Some(i) => &last[i..],
        None => "",
    }
}

/// Basename without its extension. A dot at position 0 does not start an
/// extension, so dotfiles keep their full name.
pub fn stem(base: &str) -> &str {
    match base.rfind('.') {
        Some(i) if i > 0 => &base[..i],
        _ => base,
    }
}

/// True when the path is rooted.
pub fn is_abs(path: &str) -> bool {
    path.starts_with('/') || std::path::Path::new(path).is_absolute()
}
