//! Handlers keyed by glob pattern.

use indexmap::IndexMap;

use crate::path::Path;

/// Called with the action name and the changed path. Returning `true`
/// lets later matching patterns see the same event; `false` stops there.
pub type Handler = Box<dyn FnMut(&str, &Path) -> bool + Send>;

/// Ordered mapping from glob pattern to [`Handler`].
///
/// Patterns are matched against the base name of the changed path and
/// evaluated in insertion order. Re-inserting a pattern replaces its
/// handler but keeps its position.
#[derive(Default)]
pub struct EventMap {
    handlers: IndexMap<String, Handler>,
}

impl EventMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn on<F>(mut self, pattern: impl Into<String>, handler: F) -> Self
    where
        F: FnMut(&str, &Path) -> bool + Send + 'static,
    {
        self.insert(pattern, handler);
        self
    }

    pub fn insert<F>(&mut self, pattern: impl Into<String>, handler: F)
    where
        F: FnMut(&str, &Path) -> bool + Send + 'static,
    {
        self.handlers.insert(pattern.into(), Box::new(handler));
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Handler)> {
        self.handlers.iter_mut().map(|(k, v)| (k.as_str(), v))
    }
}

impl std::fmt::Debug for EventMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventMap")
            .field("patterns", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
