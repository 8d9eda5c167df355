//! Change events as handlers see them.

use std::fmt;

use notify::EventKind;
use notify::event::ModifyKind;

use crate::path::Path;

/// What happened to a path. Rendered with the upper-case names handlers
/// receive (`CREATE`, `WRITE`, `REMOVE`, `RENAME`, `CHMOD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Write,
    Remove,
    Rename,
    Chmod,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Create => "CREATE",
            Action::Write => "WRITE",
            Action::Remove => "REMOVE",
            Action::Rename => "RENAME",
            Action::Chmod => "CHMOD",
        }
    }

    /// Map a backend event kind. Access and unclassified events have no
    /// action and are not dispatched.
    pub fn from_kind(kind: &EventKind) -> Option<Action> {
        match kind {
            EventKind::Create(_) => Some(Action::Create),
            EventKind::Modify(ModifyKind::Name(_)) => Some(Action::Rename),
            EventKind::Modify(ModifyKind::Metadata(_)) => Some(Action::Chmod),
            EventKind::Modify(_) | EventKind::Any => Some(Action::Write),
            EventKind::Remove(_) => Some(Action::Remove),
            EventKind::Access(_) | EventKind::Other => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(path, action)` change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub path: Path,
    pub action: Action,
}

impl ChangeEvent {
    pub fn new(path: impl Into<Path>, action: Action) -> Self {
        Self {
            path: path.into(),
            action,
        }
    }

    /// Split a backend event into one change per affected path.
    pub fn from_notify(event: &notify::Event) -> Vec<ChangeEvent> {
        let Some(action) = Action::from_kind(&event.kind) else {
            return Vec::new();
        };
        event
            .paths
            .iter()
            .map(|p| ChangeEvent::new(p.as_path(), action))
            .collect()
    }
}
