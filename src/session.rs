use std::{collections::BTreeMap, sync::Arc};

use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use crate::any::{AnyValue, TypeKey};

/// Shared cache for memoized constructions.
///
/// A session outlives individual [`make`](crate::Registry::make) calls: every
/// registry memoized against the same session shares the values it
/// materializes, and each memoized construction runs at most once per session.
/// Cloning a session shares the cache.
///
/// Per-type slots are [`OnceCell`]s, so under concurrent first access every
/// requester except the winner blocks until the value is ready; subsequent
/// reads are lock-free.
#[derive(Clone, Default)]
pub struct Session {
    slots: Arc<Mutex<BTreeMap<TypeKey, Arc<OnceCell<AnyValue>>>>>,
}

impl Session {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub(crate) fn slot(&self, key: TypeKey) -> Arc<OnceCell<AnyValue>> {
        self.slots.lock().entry(key).or_default().clone()
    }

    /// Number of memoized values materialized so far.
    #[must_use]
    pub fn materialized(&self) -> usize {
        self.slots.lock().values().filter(|slot| slot.get().is_some()).count()
    }
}
