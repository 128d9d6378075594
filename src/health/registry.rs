//! Named check collections.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::check::Check;

/// Checks for one probe kind, keyed by name.
///
/// Registration takes the write lock, evaluation clones the entries under
/// the read lock and runs them after releasing it.
#[derive(Default)]
pub struct CheckCollection {
    checks: RwLock<HashMap<String, Arc<dyn Check>>>,
}

impl CheckCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a check, replacing any previous check with the same name.
    pub fn insert(&self, name: impl Into<String>, check: Arc<dyn Check>) -> bool {
        let mut checks = self.checks.write().unwrap_or_else(PoisonError::into_inner);
        checks.insert(name.into(), check).is_some()
    }

    /// Point-in-time copy of the registered checks.
    pub fn snapshot(&self) -> Vec<(String, Arc<dyn Check>)> {
        let checks = self.checks.read().unwrap_or_else(PoisonError::into_inner);
        checks
            .iter()
            .map(|(name, check)| (name.clone(), Arc::clone(check)))
            .collect()
    }

    /// Registered check names, sorted.
    pub fn names(&self) -> Vec<String> {
        let checks = self.checks.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = checks.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.checks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for CheckCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckCollection")
            .field("checks", &self.names())
            .finish()
    }
}

/// Liveness and readiness collections.
#[derive(Debug, Default)]
pub struct CheckRegistry {
    liveness: CheckCollection,
    readiness: CheckCollection,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a liveness check.
    pub fn register_liveness<C>(&self, name: impl Into<String>, check: C)
    where
        C: Check + 'static,
    {
        let name = name.into();
        if self.liveness.insert(name.clone(), Arc::new(check)) {
            tracing::debug!(check = %name, "Replaced liveness check");
        }
    }

    /// Register (or replace) a readiness check.
    pub fn register_readiness<C>(&self, name: impl Into<String>, check: C)
    where
        C: Check + 'static,
    {
        let name = name.into();
        if self.readiness.insert(name.clone(), Arc::new(check)) {
            tracing::debug!(check = %name, "Replaced readiness check");
        }
    }

    pub fn liveness(&self) -> &CheckCollection {
        &self.liveness
    }

    pub fn readiness(&self) -> &CheckCollection {
        &self.readiness
    }
}
