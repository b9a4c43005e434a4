//! Per-profile memoized graph defaults.
//!
//! Each slot is assigned at most once and never invalidated. The first
//! caller for a profile computes the entry while holding an upgradable
//! read guard, so concurrent first access never encodes twice. A failed
//! computation leaves the slot empty.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use tracing::debug;

use crate::defaults::ProfileGraphDefaults;
use crate::error::Result;

/// Graph defaults keyed by profile name.
#[derive(Debug, Default)]
pub struct ProfileDefaultsCache {
    slots: RwLock<HashMap<String, Arc<ProfileGraphDefaults>>>,
}

impl ProfileDefaultsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached entry for `profile`, computing it with `factory`
    /// on first access.
    pub fn get_or_create<F>(&self, profile: &str, factory: F) -> Result<Arc<ProfileGraphDefaults>>
    where
        F: FnOnce() -> Result<ProfileGraphDefaults>,
    {
        if let Some(hit) = self.slots.read().get(profile) {
            return Ok(Arc::clone(hit));
        }

        let guard = self.slots.upgradable_read();
        // Another caller may have filled the slot between the two locks.
        if let Some(hit) = guard.get(profile) {
            return Ok(Arc::clone(hit));
        }

        let computed = Arc::new(factory()?);
        let mut slots = RwLockUpgradableReadGuard::upgrade(guard);
        slots.insert(profile.to_string(), Arc::clone(&computed));
        debug!(
            profile,
            payload_keys = computed.custom_payload().len(),
            "graph.defaults.computed"
        );
        Ok(computed)
    }

    /// Cached entry, if already computed.
    pub fn get(&self, profile: &str) -> Option<Arc<ProfileGraphDefaults>> {
        self.slots.read().get(profile).cloned()
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }
}
