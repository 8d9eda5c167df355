//! Filesystem paths as chainable string values, typed configuration values
//! loaded from `key=value` files, and glob-dispatched file watching.
//!
//! ```no_run
//! use fpath::Path;
//!
//! let conf = Path::from_env("$HOME/.config/app/app.conf");
//! let settings = conf.read_kv("=");
//! let port = settings.get("port").map(|v| v.int()).unwrap_or(8080);
//! let root = settings.get("root").map(|v| v.path()).unwrap_or_default();
//! for css in root.glob("*.css") {
//!     println!("{css} {}", css.pretty_size());
//! }
//! # let _ = port;
//! ```

pub mod logging;

pub mod config;
pub mod env;
pub mod error;
pub mod expand;
pub mod kv;
pub mod lock;
pub mod path;
pub mod value;
pub mod watcher;

pub use config::Settings;
pub use env::{Environment, MemoryEnv, ProcessEnv};
pub use error::{FsError, FsResult};
pub use kv::{LoadOptions, load_value_map};
pub use lock::{LOCKING_SUPPORTED, LockedFile};
pub use path::{FILE_MODE, LIST_SEPARATOR, OpenMode, Path, SEPARATOR, pretty_size};
pub use value::{Value, ValueError, ValueMap};
