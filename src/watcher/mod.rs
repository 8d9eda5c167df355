//! Glob-dispatched file watching.
//!
//! ```text
//! notify backend --(channel)--> dispatch loop (own thread)
//!                                  |  base name vs. pattern, in order
//!                                  |  skip if mtime unchanged
//!                                  v
//!                               Handler(action, path) -> continue?
//! ```
//!
//! ```no_run
//! use fpath::Path;
//! use fpath::watcher::{EventMap, WatchOptions, watch};
//!
//! let events = EventMap::new().on("*.css", |action, file| {
//!     println!("{action} {file}");
//!     true
//! });
//! let handle = watch(&Path::new("static"), events, &WatchOptions::default())?;
//! // ...
//! handle.close();
//! # Ok::<(), fpath::watcher::WatchError>(())
//! ```

mod dispatch;
mod error;
mod event;
mod handler;
mod mtime;
mod watch;

pub use dispatch::Dispatcher;
pub use error::WatchError;
pub use event::{Action, ChangeEvent};
pub use handler::{EventMap, Handler};
pub use mtime::ModTimeCache;
pub use watch::{WatchHandle, WatchOptions, watch};
