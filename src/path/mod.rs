//! String-backed filesystem paths with chainable operations.
//!
//! A [`Path`] wraps a path string and never caches anything about the
//! filesystem: every query stats again. Derivation operations (`join`,
//! `parent`, `with_suffix`, ...) are purely lexical.
//!
//! # Example
//!
//! ```
//! use fpath::Path;
//!
//! let p = Path::new("/srv/www/site.css");
//! assert_eq!(p.parent().as_str(), "/srv/www");
//! assert_eq!(p.stem(), "site");
//! assert_eq!(p.with_suffix(".min.css").as_str(), "/srv/www/site.min.css");
//! ```

mod download;
mod fs;
mod io;
pub mod lexical;
mod size;

pub use io::{FILE_MODE, OpenMode};
pub use size::pretty_size;

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{FsError, FsResult};

/// Platform path separator.
pub const SEPARATOR: char = std::path::MAIN_SEPARATOR;

/// Platform separator for path lists (`PATH`-style variables).
#[cfg(unix)]
pub const LIST_SEPARATOR: char = ':';
#[cfg(not(unix))]
pub const LIST_SEPARATOR: char = ';';

/// An immutable filesystem path string.
///
/// Equality is plain string equality; no normalization happens except in
/// the operations documented to normalize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(String);

impl Path {
    /// Wrap a path string as-is.
    pub fn new(path: impl Into<String>) -> Self {
        Path(path.into())
    }

    /// Join elements and clean the result lexically.
    ///
    /// ```
    /// use fpath::Path;
    /// assert_eq!(Path::join_all(["..", "a", "b"]).as_str(), "../a/b");
    /// assert_eq!(Path::join_all(["", ""]).as_str(), "");
    /// ```
    pub fn join_all<I, S>(elems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Path(lexical::join(elems))
    }

    /// Build a path from a template, expanding `$NAME` / `${NAME}` through
    /// `lookup`. Unresolved names become empty.
    pub fn expand_with<F>(template: &str, lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        Path(crate::expand::expand(template, lookup))
    }

    /// Build a path from a template expanded against the process environment.
    pub fn from_env(template: &str) -> Self {
        Path(crate::expand::expand_process_env(template))
    }

    /// Current working directory, or `None` if the platform cannot report it.
    pub fn cwd() -> Option<Self> {
        std::env::current_dir().ok().map(Self::from)
    }

    /// The user's home directory.
    pub fn home() -> Option<Self> {
        dirs::home_dir().map(Self::from)
    }

    /// The wrapped string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the owned string.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Convert to a standard library path buffer.
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// Append elements and clean the result.
    ///
    /// ```
    /// use fpath::Path;
    /// assert_eq!(Path::new("a").join(["b", "c"]).as_str(), "a/b/c");
    /// ```
    pub fn join<I, S>(&self, elems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tail = lexical::join(elems);
        Path(lexical::join([self.0.as_str(), tail.as_str()]))
    }

    /// Expand environment variables inside this path.
    pub fn expand(&self) -> Self {
        Self::from_env(&self.0)
    }

    /// Absolute form: relative paths are joined onto the working directory,
    /// then everything is cleaned lexically. Falls back to the cleaned input
    /// when the working directory is unavailable.
    pub fn abs(&self) -> Self {
        self.try_abs()
            .unwrap_or_else(|_| Path(lexical::clean(&self.0)))
    }

    /// Like [`abs`](Self::abs), reporting a missing working directory.
    pub fn try_abs(&self) -> FsResult<Self> {
        if lexical::is_abs(&self.0) {
            return Ok(Path(lexical::clean(&self.0)));
        }
        let cwd = Self::cwd().ok_or(FsError::NoWorkingDirectory)?;
        Ok(Path(lexical::join([cwd.as_str(), self.0.as_str()])))
    }

    /// Containing directory. The root's parent is the root; a bare name's
    /// parent is `.`.
    pub fn parent(&self) -> Self {
        Path(lexical::dir(&self.0))
    }

    /// Apply [`parent`](Self::parent) `level + 1` times.
    ///
    /// ```
    /// use fpath::Path;
    /// assert_eq!(Path::new("/a/b").parents(1).as_str(), "/");
    /// assert_eq!(Path::new("").parents(0).as_str(), ".");
    /// ```
    pub fn parents(&self, level: usize) -> Self {
        let mut path = lexical::dir(&self.0);
        for _ in 0..level {
            path = lexical::dir(&path);
        }
        Path(path)
    }

    /// Parent directory as a plain string.
    pub fn dir(&self) -> String {
        lexical::dir(&self.0)
    }

    /// Final path element.
    pub fn base(&self) -> String {
        lexical::base(&self.0)
    }

    /// Final element without its extension; dotfiles keep their leading dot.
    pub fn stem(&self) -> String {
        lexical::stem(&self.base()).to_string()
    }

    /// Extension of the final element including the dot, or empty.
    pub fn ext(&self) -> String {
        lexical::ext(&self.base()).to_string()
    }

    /// Sibling path whose basename is `prefix + base`.
    pub fn with_prefix(&self, prefix: &str) -> Self {
        self.parent().join([format!("{prefix}{}", self.base())])
    }

    /// Sibling path whose basename is `stem + suffix`.
    pub fn with_suffix(&self, suffix: &str) -> Self {
        self.parent().join([format!("{}{suffix}", self.stem())])
    }

    /// Shell-glob match of the whole path string. `*` does not cross `/`.
    /// A malformed pattern matches nothing.
    pub fn matches(&self, pattern: &str) -> bool {
        glob_match(pattern, &self.0)
    }
}

/// Glob match where wildcards do not cross separators.
pub(crate) fn glob_match(pattern: &str, name: &str) -> bool {
    let options = glob::MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    glob::Pattern::new(pattern)
        .map(|p| p.matches_with(name, options))
        .unwrap_or(false)
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<std::path::Path> for Path {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&self.0)
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path(s.to_string())
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Path(s)
    }
}

impl From<PathBuf> for Path {
    fn from(p: PathBuf) -> Self {
        Path(p.to_string_lossy().into_owned())
    }
}

impl From<&std::path::Path> for Path {
    fn from(p: &std::path::Path) -> Self {
        Path(p.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_string() {
        assert_eq!(Path::new("a/b").as_str(), "a/b");
        assert_eq!(Path::new("a//b/"), Path::from("a//b/"));
    }

    #[test]
    fn test_join_method() {
        assert_eq!(Path::new("").join(["", ""]).as_str(), "");
        assert_eq!(Path::new("a").join(["b", "c"]).as_str(), "a/b/c");
        assert_eq!(Path::new("/a/b").join([".."]).as_str(), "/a");
        assert_eq!(Path::new("a").join(["/x"]).as_str(), "a/x");
    }

    #[test]
    fn test_abs() {
        assert_eq!(Path::new("/a/../../x").abs().as_str(), "/x");
        let cwd = Path::cwd().unwrap();
        assert_eq!(Path::new("a/../x").abs(), cwd.join(["/x"]));
    }

    #[test]
    fn test_parents() {
        assert_eq!(Path::new("").parents(0).as_str(), ".");
        assert_eq!(Path::new("/").parents(0).as_str(), "/");
        assert_eq!(Path::new("/a").parents(0).as_str(), "/");
        assert_eq!(Path::new("/a/b").parents(1).as_str(), "/");
        assert_eq!(Path::new("/a/b/c").parents(0), Path::new("/a/b/c").parent());
        assert_eq!(Path::new("/a/b/c").parents(10).as_str(), "/");
    }

    #[test]
    fn test_name_parts() {
        let p = Path::new("/home/me/t.js");
        assert_eq!(p.dir(), "/home/me");
        assert_eq!(p.base(), "t.js");
        assert_eq!(p.stem(), "t");
        assert_eq!(p.ext(), ".js");
        assert_eq!(p.with_prefix("new-").as_str(), "/home/me/new-t.js");
        assert_eq!(p.with_suffix(".gz").as_str(), "/home/me/t.gz");
    }

    #[test]
    fn test_stem_ext_roundtrip() {
        for raw in ["a/b.txt", "/x/archive.gz", "notes.md"] {
            let p = Path::new(raw);
            assert_eq!(format!("{}{}", p.stem(), p.ext()), p.base());
        }
    }

    #[test]
    fn test_dotfile_stem() {
        let p = Path::new("/home/me/.bashrc");
        assert_eq!(p.stem(), ".bashrc");
        assert_eq!(Path::new(".env.local").stem(), ".env");
    }

    #[test]
    fn test_expand_with() {
        let p = Path::expand_with("${ROOT}/$NAME.txt", |k| match k {
            "ROOT" => Some("/srv".to_string()),
            _ => None,
        });
        assert_eq!(p.as_str(), "/srv/.txt");
    }

    #[test]
    fn test_expand_against_process_env() {
        // SAFETY: the variable names are unique to this test.
        unsafe { std::env::set_var("FPATH_PATH_TEST_ROOT", "/srv") };

        let p = Path::new("$FPATH_PATH_TEST_ROOT/${FPATH_PATH_TEST_UNSET}x");
        assert_eq!(p.expand().as_str(), "/srv/x");
        assert_eq!(p.as_str(), "$FPATH_PATH_TEST_ROOT/${FPATH_PATH_TEST_UNSET}x");
        assert_eq!(
            Path::from_env("${FPATH_PATH_TEST_ROOT}/www").as_str(),
            "/srv/www"
        );

        unsafe { std::env::remove_var("FPATH_PATH_TEST_ROOT") };
    }

    #[test]
    fn test_home() {
        assert_eq!(Path::home(), dirs::home_dir().map(Path::from));
        if let Some(home) = Path::home() {
            assert!(!home.as_str().is_empty());
        }
    }

    #[test]
    fn test_matches() {
        let p = Path::new("src/main.rs");
        assert!(p.matches("src/*.rs"));
        assert!(!p.matches("*.rs"));
        assert!(p.matches("src/m?in.[r]s"));
        assert!(!p.matches("[unterminated"));
    }
}
