//! Filesystem queries, mutations and directory listing.
//!
//! Queries come in pairs: a convenience form that maps any failure to a
//! sentinel (`None`, `-1`, `false`, empty) and a `try_*` form that returns
//! the underlying error.

use std::fs::{self, DirEntry, Metadata};

use regex::Regex;
use walkdir::WalkDir;

use super::{Path, size};
use crate::error::{FsError, FsResult};

impl Path {
    /// Metadata (following symlinks), or `None` on any failure.
    pub fn stat(&self) -> Option<Metadata> {
        self.try_stat().ok()
    }

    pub fn try_stat(&self) -> FsResult<Metadata> {
        fs::metadata(&self.0).map_err(|e| FsError::io(&self.0, e))
    }

    /// File size in bytes, `-1` when it cannot be determined.
    pub fn size(&self) -> i64 {
        self.try_size()
            .ok()
            .and_then(|len| i64::try_from(len).ok())
            .unwrap_or(-1)
    }

    pub fn try_size(&self) -> FsResult<u64> {
        self.try_stat().map(|m| m.len())
    }

    /// Size formatted with IEC units (`"1.5 KB"`), `"0 B"` on failure.
    pub fn pretty_size(&self) -> String {
        match self.try_size() {
            Ok(len) => size::pretty_size(len),
            Err(_) => "0 B".to_string(),
        }
    }

    /// True when the path can be stat'ed.
    pub fn exists(&self) -> bool {
        self.stat().is_some()
    }

    pub fn is_dir(&self) -> bool {
        self.stat().is_some_and(|m| m.is_dir())
    }

    /// True for anything that exists and is not a directory.
    pub fn is_file(&self) -> bool {
        self.stat().is_some_and(|m| !m.is_dir())
    }

    /// Target of a symlink, or `None` if this is not a readable symlink.
    pub fn read_link(&self) -> Option<Path> {
        self.try_read_link().ok()
    }

    pub fn try_read_link(&self) -> FsResult<Path> {
        fs::read_link(&self.0)
            .map(Path::from)
            .map_err(|e| FsError::io(&self.0, e))
    }

    /// Create an empty file if nothing exists at the path. An existing file
    /// is left untouched.
    pub fn touch(&self) -> FsResult<()> {
        self.open(super::OpenMode::Write).map(drop)
    }

    /// Remove a file or an empty directory.
    pub fn remove(&self) -> FsResult<()> {
        let is_dir = fs::symlink_metadata(&self.0).is_ok_and(|m| m.is_dir());
        let result = if is_dir {
            fs::remove_dir(&self.0)
        } else {
            fs::remove_file(&self.0)
        };
        result.map_err(|e| FsError::io(&self.0, e))
    }

    /// Remove the path and everything below it.
    pub fn remove_all(&self) -> FsResult<()> {
        let meta = match fs::symlink_metadata(&self.0) {
            Ok(meta) => meta,
            // Nothing to remove.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(FsError::io(&self.0, e)),
        };
        let result = if meta.is_dir() {
            fs::remove_dir_all(&self.0)
        } else {
            fs::remove_file(&self.0)
        };
        result.map_err(|e| FsError::io(&self.0, e))
    }

    /// Create a directory with permission bits `perm` (Unix only; ignored
    /// elsewhere). With `parents`, missing ancestors are created and an
    /// existing directory is not an error, like `mkdir -p`.
    pub fn mkdir(&self, perm: u32, parents: bool) -> FsResult<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(parents);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(perm);
        }
        #[cfg(not(unix))]
        let _ = perm;
        builder
            .create(&self.0)
            .map_err(|e| FsError::io(&self.0, e))
    }

    /// Directory entries sorted by name; empty on failure.
    pub fn read_dir(&self) -> Vec<DirEntry> {
        self.try_read_dir().unwrap_or_default()
    }

    pub fn try_read_dir(&self) -> FsResult<Vec<DirEntry>> {
        let entries = fs::read_dir(&self.0).map_err(|e| FsError::io(&self.0, e))?;
        let mut entries: Vec<DirEntry> = entries.filter_map(Result::ok).collect();
        entries.sort_by_key(|e| e.file_name());
        Ok(entries)
    }

    /// Children of this directory as paths. Names starting with `.` are
    /// skipped unless `show_hidden`.
    pub fn list_dir(&self, show_hidden: bool) -> Vec<Path> {
        self.read_dir()
            .into_iter()
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| show_hidden || !name.starts_with('.'))
            .map(|name| self.join([name]))
            .collect()
    }

    /// All descendants, depth first, sorted by name within each directory.
    /// Hidden entries (and everything below hidden directories) are skipped
    /// unless `show_hidden`.
    pub fn walk(&self, show_hidden: bool) -> Vec<Path> {
        WalkDir::new(&self.0)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0 || show_hidden || !e.file_name().to_string_lossy().starts_with('.')
            })
            .filter_map(Result::ok)
            .map(|e| Path::from(e.path()))
            .collect()
    }

    /// Paths matching a shell glob rooted at this path; empty on a
    /// malformed pattern.
    pub fn glob(&self, pattern: &str) -> Vec<Path> {
        self.try_glob(pattern).unwrap_or_default()
    }

    pub fn try_glob(&self, pattern: &str) -> FsResult<Vec<Path>> {
        let full = self.join([pattern]);
        let paths = glob::glob(full.as_str()).map_err(|e| FsError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.msg.to_string(),
        })?;
        Ok(paths.filter_map(Result::ok).map(Path::from).collect())
    }

    /// Call `handler` for every direct child whose name matches `regex`.
    ///
    /// Returns whether the directory had any entries at all, not whether
    /// anything matched. An invalid regex returns `false` without listing;
    /// use [`try_find`](Self::try_find) to see why.
    pub fn find<F>(&self, regex: &str, handler: F) -> bool
    where
        F: FnMut(Path),
    {
        self.try_find(regex, handler).unwrap_or_else(|e| {
            tracing::debug!("[path] {e}");
            false
        })
    }

    /// [`find`](Self::find), failing with [`FsError::InvalidPattern`] when
    /// `regex` does not compile.
    pub fn try_find<F>(&self, regex: &str, mut handler: F) -> FsResult<bool>
    where
        F: FnMut(Path),
    {
        let rx = Regex::new(regex).map_err(|e| FsError::InvalidPattern {
            pattern: regex.to_string(),
            reason: e.to_string(),
        })?;
        let entries = self.read_dir();
        for entry in &entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            if rx.is_match(&name) {
                handler(self.join([name]));
            }
        }
        Ok(!entries.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn root(dir: &TempDir) -> Path {
        Path::from(dir.path())
    }

    #[test]
    fn test_sentinels_on_missing_path() {
        let dir = TempDir::new().unwrap();
        let missing = root(&dir).join(["nope.txt"]);
        assert!(missing.stat().is_none());
        assert_eq!(missing.size(), -1);
        assert!(!missing.exists());
        assert!(!missing.is_dir());
        assert!(!missing.is_file());
        assert!(missing.read_link().is_none());
        assert!(missing.read_dir().is_empty());
        assert!(missing.try_stat().unwrap_err().is_not_found());
    }

    #[test]
    fn test_size_reports_length() {
        let dir = TempDir::new().unwrap();
        let f = root(&dir).join(["five.txt"]);
        fs::write(f.as_str(), b"hello").unwrap();
        assert_eq!(f.size(), 5);
        assert_eq!(f.try_size().unwrap(), 5);
        assert_eq!(f.pretty_size(), "5 B");
    }

    #[test]
    fn test_touch_keeps_existing_content() {
        let dir = TempDir::new().unwrap();
        let f = root(&dir).join(["t.txt"]);
        f.touch().unwrap();
        assert!(f.is_file());
        assert_eq!(f.size(), 0);

        fs::write(f.as_str(), b"data").unwrap();
        f.touch().unwrap();
        assert_eq!(f.size(), 4);
    }

    #[test]
    fn test_remove_requires_empty_dir() {
        let dir = TempDir::new().unwrap();
        let d = root(&dir).join(["d"]);
        d.join(["sub"]).mkdir(0o755, true).unwrap();
        assert!(d.remove().is_err());
        d.remove_all().unwrap();
        assert!(!d.exists());
        // Removing something that is already gone is fine.
        d.remove_all().unwrap();
    }

    #[test]
    fn test_mkdir_parents() {
        let dir = TempDir::new().unwrap();
        let deep = root(&dir).join(["a", "b", "c"]);
        assert!(deep.mkdir(0o755, false).is_err());
        deep.mkdir(0o755, true).unwrap();
        assert!(deep.is_dir());
        deep.mkdir(0o755, true).unwrap();
        assert!(deep.mkdir(0o755, false).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_mkdir_permission_bits() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let d = root(&dir).join(["private"]);
        d.mkdir(0o700, false).unwrap();
        let mode = d.stat().unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o700);
    }

    #[test]
    fn test_list_dir_hidden_filter() {
        let dir = TempDir::new().unwrap();
        let r = root(&dir);
        for name in ["b.txt", ".hidden", "a.txt"] {
            r.join([name]).touch().unwrap();
        }
        assert_eq!(
            r.list_dir(false),
            vec![r.join(["a.txt"]), r.join(["b.txt"])]
        );
        assert_eq!(r.list_dir(true).len(), 3);
        assert_eq!(r.list_dir(true)[0], r.join([".hidden"]));
    }

    #[test]
    fn test_walk_recurses() {
        let dir = TempDir::new().unwrap();
        let r = root(&dir);
        r.join(["src", "deep"]).mkdir(0o755, true).unwrap();
        r.join(["src", "deep", "x.rs"]).touch().unwrap();
        r.join([".git"]).mkdir(0o755, false).unwrap();
        r.join([".git", "HEAD"]).touch().unwrap();

        let visible = r.walk(false);
        assert_eq!(
            visible,
            vec![
                r.join(["src"]),
                r.join(["src", "deep"]),
                r.join(["src", "deep", "x.rs"]),
            ]
        );
        assert_eq!(r.walk(true).len(), 5);
    }

    #[test]
    fn test_glob() {
        let dir = TempDir::new().unwrap();
        let r = root(&dir);
        for name in ["a.css", "b.css", "c.js"] {
            r.join([name]).touch().unwrap();
        }
        assert_eq!(r.glob("*.css"), vec![r.join(["a.css"]), r.join(["b.css"])]);
        assert!(r.glob("*.none").is_empty());
        assert!(r.glob("[").is_empty());
        assert!(matches!(
            r.try_glob("["),
            Err(FsError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_find_returns_non_empty_flag() {
        let dir = TempDir::new().unwrap();
        let r = root(&dir);
        r.join(["report-1.csv"]).touch().unwrap();
        r.join(["notes.txt"]).touch().unwrap();

        let mut hits = Vec::new();
        assert!(r.find(r"^report-\d+\.csv$", |p| hits.push(p)));
        assert_eq!(hits, vec![r.join(["report-1.csv"])]);

        // No matches, but the directory is non-empty.
        assert!(r.find("^zzz$", |_| panic!("unexpected match")));

        let empty = r.join(["empty"]);
        empty.mkdir(0o755, false).unwrap();
        assert!(!empty.find(".*", |_| {}));
        assert!(!r.find("(", |_| {}));
    }

    #[test]
    fn test_try_find_reports_bad_pattern() {
        let dir = TempDir::new().unwrap();
        let r = root(&dir);
        r.join(["a.log"]).touch().unwrap();

        let mut hits = Vec::new();
        assert!(r.try_find(r"\.log$", |p| hits.push(p)).unwrap());
        assert_eq!(hits, vec![r.join(["a.log"])]);

        let err = r.try_find("(", |_| panic!("listed with a bad pattern")).unwrap_err();
        assert!(matches!(err, FsError::InvalidPattern { ref pattern, .. } if pattern == "("));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_link() {
        let dir = TempDir::new().unwrap();
        let r = root(&dir);
        let target = r.join(["target.txt"]);
        target.touch().unwrap();
        let link = r.join(["link"]);
        std::os::unix::fs::symlink(target.as_str(), link.as_str()).unwrap();
        assert_eq!(link.read_link(), Some(target.clone()));
        assert!(target.read_link().is_none());
    }
}
