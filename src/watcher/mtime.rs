use std::collections::HashMap;
use std::time::SystemTime;

/// Last modification time seen per raw event path.
///
/// Private to the watch loop: one loop owns one cache, so no locking.
/// Entries are never evicted for the lifetime of the loop.
#[derive(Debug, Default)]
pub struct ModTimeCache {
    seen: HashMap<String, SystemTime>,
}

impl ModTimeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether an event for `key` is new.
    ///
    /// Fresh when the key was never seen, when `mtime` is unknown (the path
    /// could not be stat'ed), or when it differs from the recorded time. A
    /// known `mtime` is recorded; an unknown one leaves the entry as is.
    pub fn observe(&mut self, key: &str, mtime: Option<SystemTime>) -> bool {
        let fresh = match (self.seen.get(key), mtime) {
            (Some(last), Some(now)) => *last != now,
            _ => true,
        };
        if let (true, Some(now)) = (fresh, mtime) {
            self.seen.insert(key.to_string(), now);
        }
        fresh
    }

    pub fn get(&self, key: &str) -> Option<SystemTime> {
        self.seen.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
