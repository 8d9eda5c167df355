//! Pattern matching and de-duplication for change events.

use super::event::ChangeEvent;
use super::handler::EventMap;
use super::mtime::ModTimeCache;
use crate::path::glob_match;

/// Routes change events to the handlers whose pattern matches the event's
/// base name, suppressing repeats whose modification time is unchanged.
///
/// Freshness is decided once per event, on the first matching pattern, so
/// chained handlers all see the same verdict.
#[derive(Debug)]
pub struct Dispatcher {
    events: EventMap,
    mtimes: ModTimeCache,
}

impl Dispatcher {
    pub fn new(events: EventMap) -> Self {
        Self {
            events,
            mtimes: ModTimeCache::new(),
        }
    }

    /// Handle one event. Returns how many handlers were invoked.
    pub fn dispatch(&mut self, event: &ChangeEvent) -> usize {
        let Self { events, mtimes } = self;
        let name = event.path.base();
        let mut fresh = None;
        let mut invoked = 0;

        for (pattern, handler) in events.iter_mut() {
            if !glob_match(pattern, &name) {
                continue;
            }

            let is_fresh = *fresh.get_or_insert_with(|| {
                let mtime = event.path.stat().and_then(|m| m.modified().ok());
                mtimes.observe(event.path.as_str(), mtime)
            });
            if !is_fresh {
                crate::debug_event!("watcher", "unchanged", "{} {}", event.action, event.path);
                break;
            }

            crate::debug_event!(
                "watcher",
                "dispatch",
                "{pattern} <- {} {}",
                event.action,
                event.path
            );
            invoked += 1;
            if !handler(event.action.as_str(), &event.path) {
                break;
            }
        }

        invoked
    }

    pub fn mtimes(&self) -> &ModTimeCache {
        &self.mtimes
    }

    pub fn events(&self) -> &EventMap {
        &self.events
    }
}
