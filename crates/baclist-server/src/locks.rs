use baclist_core::types::{ObjectId, PropertyId};
use std::collections::HashSet;
use std::sync::{Condvar, Mutex, PoisonError};

type PropertyKey = (ObjectId, PropertyId);

/// Exclusive locks keyed by (object, property).
///
/// Requests against the same property wait for each other; requests
/// against any other property proceed without contention beyond the short
/// table lookup.
#[derive(Debug, Default)]
pub struct PropertyLocks {
    held: Mutex<HashSet<PropertyKey>>,
    released: Condvar,
}

impl PropertyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until the property is free, then holds it until the guard drops.
    pub fn lock(&self, object_id: ObjectId, property_id: PropertyId) -> PropertyGuard<'_> {
        let key = (object_id, property_id);
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        while held.contains(&key) {
            held = self
                .released
                .wait(held)
                .unwrap_or_else(PoisonError::into_inner);
        }
        held.insert(key);
        PropertyGuard { locks: self, key }
    }

    pub fn is_locked(&self, object_id: ObjectId, property_id: PropertyId) -> bool {
        self.held
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&(object_id, property_id))
    }
}

#[derive(Debug)]
pub struct PropertyGuard<'a> {
    locks: &'a PropertyLocks,
    key: PropertyKey,
}

impl Drop for PropertyGuard<'_> {
    fn drop(&mut self) {
        self.locks
            .held
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
        self.locks.released.notify_all();
    }
}
