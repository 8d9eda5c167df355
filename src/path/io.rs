//! Whole-file reads and writes: bytes, text, JSON and key-value files.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, Write};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};

use super::Path;
use crate::env::{Environment, ProcessEnv};
use crate::error::{FsError, FsResult};
use crate::kv::{self, LoadOptions};
use crate::value::ValueMap;

/// Permission bits for every file this crate creates (`rw-r--r--`).
pub const FILE_MODE: u32 = 0o644;

/// How [`Path::open`] opens a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Read only; the file must exist.
    Read,
    /// Write, creating if absent; existing content is kept.
    Write,
    /// Read and write, creating if absent.
    ReadWrite,
    /// Read and append, creating if absent.
    Append,
    /// Write, creating if absent and truncating existing content.
    NewWrite,
}

impl OpenMode {
    fn options(self) -> OpenOptions {
        let mut opts = OpenOptions::new();
        match self {
            OpenMode::Read => opts.read(true),
            OpenMode::Write => opts.write(true).create(true),
            OpenMode::ReadWrite => opts.read(true).write(true).create(true),
            OpenMode::Append => opts.read(true).append(true).create(true),
            OpenMode::NewWrite => opts.write(true).create(true).truncate(true),
        };
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            opts.mode(FILE_MODE);
        }
        opts
    }
}

impl Path {
    /// Open the file in the given mode.
    pub fn open(&self, mode: OpenMode) -> FsResult<File> {
        mode.options()
            .open(&self.0)
            .map_err(|e| FsError::io(&self.0, e))
    }

    /// Whole file as bytes; empty on failure.
    pub fn read_bytes(&self) -> Vec<u8> {
        self.try_read_bytes().unwrap_or_default()
    }

    pub fn try_read_bytes(&self) -> FsResult<Vec<u8>> {
        std::fs::read(&self.0).map_err(|e| FsError::io(&self.0, e))
    }

    /// Replace the file's content.
    pub fn write_bytes(&self, content: impl AsRef<[u8]>) -> FsResult<()> {
        let mut file = self.open(OpenMode::NewWrite)?;
        file.write_all(content.as_ref())
            .map_err(|e| FsError::io(&self.0, e))
    }

    /// Whole file as text; empty on failure (including invalid UTF-8).
    pub fn read_text(&self) -> String {
        self.try_read_text().unwrap_or_default()
    }

    pub fn try_read_text(&self) -> FsResult<String> {
        std::fs::read_to_string(&self.0).map_err(|e| FsError::io(&self.0, e))
    }

    pub fn write_text(&self, content: &str) -> FsResult<()> {
        self.write_bytes(content)
    }

    /// Parse the file as JSON; `Null` when unreadable or malformed.
    pub fn read_json(&self) -> JsonValue {
        self.try_read_json().unwrap_or(JsonValue::Null)
    }

    pub fn try_read_json(&self) -> FsResult<JsonValue> {
        self.read_json_as()
    }

    /// Parse the file as a JSON object; empty when unreadable, malformed or
    /// not an object.
    pub fn read_json_map(&self) -> Map<String, JsonValue> {
        self.try_read_json_map().unwrap_or_default()
    }

    pub fn try_read_json_map(&self) -> FsResult<Map<String, JsonValue>> {
        self.read_json_as()
    }

    /// Deserialize the file into any `serde` type.
    pub fn read_json_as<T: DeserializeOwned>(&self) -> FsResult<T> {
        let bytes = self.try_read_bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Serialize `content` as compact JSON, replacing the file.
    pub fn write_json<T: Serialize + ?Sized>(&self, content: &T) -> FsResult<()> {
        let bytes = serde_json::to_vec(content)?;
        self.write_bytes(bytes)
    }

    /// Load a `key<sep>value` file without unquoting, expansion or export.
    /// An unreadable file yields an empty map.
    pub fn read_kv(&self, sep: &str) -> ValueMap {
        self.read_kv_with(&LoadOptions::new(sep), &mut ProcessEnv)
            .unwrap_or_default()
    }

    /// Load a `key<sep>value` file with explicit options. Expansion falls
    /// back to, and export writes into, `env`.
    pub fn read_kv_with(
        &self,
        options: &LoadOptions,
        env: &mut dyn Environment,
    ) -> FsResult<ValueMap> {
        let file = self.open(OpenMode::Read)?;
        Ok(kv::load_value_map(BufReader::new(file), options, env))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::{Read, Seek, SeekFrom};
    use tempfile::TempDir;

    fn file(dir: &TempDir, name: &str) -> Path {
        Path::from(dir.path()).join([name])
    }

    #[test]
    fn test_open_modes() {
        let dir = TempDir::new().unwrap();
        let p = file(&dir, "modes.txt");

        assert!(p.open(OpenMode::Read).is_err());

        p.write_text("abc").unwrap();
        {
            let mut f = p.open(OpenMode::Append).unwrap();
            f.write_all(b"def").unwrap();
        }
        assert_eq!(p.read_text(), "abcdef");

        {
            let mut f = p.open(OpenMode::Write).unwrap();
            f.write_all(b"X").unwrap();
        }
        assert_eq!(p.read_text(), "Xbcdef");

        {
            let mut f = p.open(OpenMode::ReadWrite).unwrap();
            let mut s = String::new();
            f.read_to_string(&mut s).unwrap();
            assert_eq!(s, "Xbcdef");
            f.seek(SeekFrom::Start(0)).unwrap();
        }

        p.open(OpenMode::NewWrite).unwrap();
        assert_eq!(p.size(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_created_file_mode() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let p = file(&dir, "mode.bin");
        p.write_bytes([1u8, 2, 3]).unwrap();
        let mode = p.stat().unwrap().permissions().mode() & 0o777;
        // Owner read-write, never executable or group/other writable.
        assert_eq!(mode & 0o600, 0o600);
        assert_eq!(mode & 0o133, 0);
    }

    #[test]
    fn test_bytes_and_text() {
        let dir = TempDir::new().unwrap();
        let p = file(&dir, "data.bin");
        assert!(p.read_bytes().is_empty());
        assert_eq!(p.read_text(), "");

        p.write_bytes(b"\x00\x01").unwrap();
        assert_eq!(p.read_bytes(), vec![0u8, 1]);

        p.write_text("short").unwrap();
        assert_eq!(p.read_text(), "short");
        p.write_text("s").unwrap();
        assert_eq!(p.read_text(), "s");

        p.write_bytes([0xffu8, 0xfe]).unwrap();
        assert_eq!(p.read_text(), "");
        assert!(p.try_read_text().is_err());
    }

    #[test]
    fn test_json() {
        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        struct Site {
            name: String,
            port: u16,
        }

        let dir = TempDir::new().unwrap();
        let p = file(&dir, "site.json");
        assert_eq!(p.read_json(), JsonValue::Null);
        assert!(p.read_json_map().is_empty());

        let site = Site {
            name: "docs".to_string(),
            port: 8080,
        };
        p.write_json(&site).unwrap();
        assert_eq!(p.read_json()["port"], 8080);
        assert_eq!(p.read_json_map()["name"], "docs");
        assert_eq!(p.read_json_as::<Site>().unwrap(), site);

        p.write_json(&[1, 2, 3]).unwrap();
        assert!(p.read_json().is_array());
        assert!(p.read_json_map().is_empty());
        assert!(matches!(p.try_read_json_map(), Err(FsError::Json(_))));

        p.write_text("{ not json").unwrap();
        assert_eq!(p.read_json(), JsonValue::Null);
    }

    #[test]
    fn test_read_kv() {
        let dir = TempDir::new().unwrap();
        let p = file(&dir, "app.conf");
        assert!(p.read_kv("=").is_empty());

        p.write_text("# comment\nname = demo\nport=8080\n").unwrap();
        let map = p.read_kv("=");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("name").unwrap().as_str(), "demo");
        assert_eq!(map.get("port").unwrap().int(), 8080);
    }
}
