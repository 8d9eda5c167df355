//! Backend subscription and the background dispatch loop.

use std::thread::JoinHandle;

use crossbeam_channel::Receiver;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};

use super::dispatch::Dispatcher;
use super::error::WatchError;
use super::event::ChangeEvent;
use super::handler::EventMap;
use crate::path::Path;

/// Subscription settings for [`watch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchOptions {
    /// Watch subdirectories as well.
    pub recursive: bool,
    /// Events buffered between the backend and the dispatch loop.
    pub channel_capacity: usize,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            channel_capacity: 1024,
        }
    }
}

impl WatchOptions {
    fn mode(&self) -> RecursiveMode {
        if self.recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        }
    }
}

/// A running watch. Dropping it stops the loop like [`close`](Self::close).
pub struct WatchHandle {
    watcher: Option<RecommendedWatcher>,
    thread: Option<JoinHandle<()>>,
    mode: RecursiveMode,
}

/// Watch `root` and dispatch its changes to `events` on a background thread.
///
/// Events are handled one at a time in arrival order. Backend errors are
/// logged and the loop keeps going until the handle is closed.
pub fn watch(
    root: &Path,
    events: EventMap,
    options: &WatchOptions,
) -> Result<WatchHandle, WatchError> {
    let (tx, rx) = crossbeam_channel::bounded(options.channel_capacity.max(1));
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        let _ = tx.send(res);
    })?;

    let mode = options.mode();
    watcher
        .watch(std::path::Path::new(root.as_str()), mode)
        .map_err(|e| WatchError::path(root.to_path_buf(), e))?;

    let patterns = events.len();
    let dispatcher = Dispatcher::new(events);
    let thread = std::thread::Builder::new()
        .name("fpath-watch".to_string())
        .spawn(move || run_loop(rx, dispatcher))
        .map_err(|e| WatchError::InitFailed {
            reason: e.to_string(),
        })?;

    crate::log_event!("watcher", "started", "{root} ({patterns} patterns)");
    Ok(WatchHandle {
        watcher: Some(watcher),
        thread: Some(thread),
        mode,
    })
}

fn run_loop(rx: Receiver<notify::Result<Event>>, mut dispatcher: Dispatcher) {
    for res in rx {
        match res {
            Ok(event) => {
                for change in ChangeEvent::from_notify(&event) {
                    dispatcher.dispatch(&change);
                }
            }
            Err(e) => tracing::warn!("[watcher] subscription error: {e}"),
        }
    }
    crate::debug_event!("watcher", "stopped");
}

impl WatchHandle {
    /// Extend the subscription to another path.
    pub fn add(&mut self, path: &Path) -> Result<(), WatchError> {
        let mode = self.mode;
        let watcher = self.watcher_mut()?;
        watcher
            .watch(std::path::Path::new(path.as_str()), mode)
            .map_err(|e| WatchError::path(path.to_path_buf(), e))?;
        crate::debug_event!("watcher", "added", "{path}");
        Ok(())
    }

    /// Stop watching a previously added path.
    pub fn remove(&mut self, path: &Path) -> Result<(), WatchError> {
        let watcher = self.watcher_mut()?;
        watcher
            .unwatch(std::path::Path::new(path.as_str()))
            .map_err(|e| WatchError::path(path.to_path_buf(), e))?;
        crate::debug_event!("watcher", "removed", "{path}");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Drop the subscription and wait for the loop to drain and exit.
    pub fn close(mut self) {
        self.shutdown();
    }

    fn watcher_mut(&mut self) -> Result<&mut RecommendedWatcher, WatchError> {
        self.watcher.as_mut().ok_or(WatchError::Closed)
    }

    fn shutdown(&mut self) {
        // Dropping the backend drops the only sender, which ends the loop.
        drop(self.watcher.take());
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!("[watcher] dispatch loop panicked");
            }
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHandle")
            .field("running", &self.is_running())
            .field("mode", &self.mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_closed_handle_rejects_changes() {
        let dir = TempDir::new().unwrap();
        let root = Path::from(dir.path());
        let mut handle = watch(&root, EventMap::new(), &WatchOptions::default()).unwrap();

        handle.shutdown();
        assert!(!handle.is_running());
        assert!(matches!(handle.add(&root), Err(WatchError::Closed)));
        assert!(matches!(handle.remove(&root), Err(WatchError::Closed)));
    }
}
