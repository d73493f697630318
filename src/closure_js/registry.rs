use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use super::error::ConfigError;

/// Per-run store of extension configurations, keyed by extension name.
///
/// The host keeps one registry per visited directory. Cloning only copies the
/// handles, and entries are replaced rather than mutated in place, so a child
/// directory can never disturb what its parent stored.
#[derive(Clone, Default)]
pub struct Registry {
    exts: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<T: Any + Send + Sync>(&mut self, name: &str, value: T) {
        self.exts.insert(name.to_string(), Arc::new(value));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.exts.contains_key(name)
    }

    pub fn get<T: Any>(&self, name: &str) -> Result<&T, ConfigError> {
        let raw = self
            .exts
            .get(name)
            .ok_or_else(|| ConfigError::NotConfigured(name.to_string()))?;
        raw.downcast_ref::<T>()
            .ok_or_else(|| ConfigError::TypeMismatch(name.to_string()))
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.exts.keys().collect();
        names.sort();
        f.debug_struct("Registry").field("exts", &names).finish()
    }
}
