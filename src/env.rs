//! Environment capability used by expansion and the KV loader.
//!
//! The loader's "export to environment" step writes through this trait
//! instead of touching process state directly, so callers can contain the
//! effect in a [`MemoryEnv`] or opt into the real process environment with
//! [`ProcessEnv`].

use std::collections::HashMap;

/// A readable and writable string-to-string environment.
pub trait Environment {
    /// Look up a variable.
    fn get(&self, key: &str) -> Option<String>;

    /// Set a variable, replacing any previous value.
    fn set(&mut self, key: &str, value: &str);
}

/// The host process environment.
///
/// Writes are process-wide and unsynchronized with any other reader or
/// writer of the environment in the same program.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        // `set_var` panics on these; skip instead of failing the load.
        if key.is_empty() || key.contains(['=', '\0']) || value.contains('\0') {
            tracing::debug!("[env] refusing to export invalid variable {key:?}");
            return;
        }
        // SAFETY: the caller opted into process-wide export; concurrent
        // environment access elsewhere in the program is their responsibility.
        unsafe { std::env::set_var(key, value) }
    }
}

/// An in-memory environment, optionally falling back to the process
/// environment for reads.
#[derive(Debug, Default, Clone)]
pub struct MemoryEnv {
    vars: HashMap<String, String>,
    inherit: bool,
}

impl MemoryEnv {
    /// An empty environment with no process fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// An environment whose reads fall back to the process environment.
    /// Writes stay in memory.
    pub fn inheriting() -> Self {
        Self {
            vars: HashMap::new(),
            inherit: true,
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Variables written so far.
    pub fn vars(&self) -> &HashMap<String, String> {
        &self.vars
    }
}

impl Environment for MemoryEnv {
    fn get(&self, key: &str) -> Option<String> {
        match self.vars.get(key) {
            Some(v) => Some(v.clone()),
            None if self.inherit => std::env::var(key).ok(),
            None => None,
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }
}
