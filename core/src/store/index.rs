/*
 * index.rs
 * Copyright (C) 2026 The Oxio Authors
 *
 * This file is part of Oxio, an Open-Xchange backend for mapistore.
 *
 * Oxio is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Oxio is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Oxio.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Identity index: bidirectional map between host folder ids (64-bit) and OX locators.
//!
//! The host addresses folders by numeric id; Open-Xchange addresses them by string.
//! Ids handed out here must stay stable for the lifetime of the owning context: the same
//! locator always maps back to the same id, however often its parent is re-listed.
//!
//! Lookups take the read lock and may run concurrently. `bind` and `allocate_or_lookup`
//! take the write lock, so the "max + 1 then bind" allocation step is mutually exclusive.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::store::error::OxioError;

/// Host folder identifier.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(v: u64) -> Self {
        NodeId(v)
    }
}

#[derive(Default)]
struct Entries {
    /// Ordered so the highest id is the last key.
    by_id: BTreeMap<NodeId, String>,
    by_locator: HashMap<String, NodeId>,
}

impl Entries {
    fn insert(&mut self, id: NodeId, locator: &str) {
        // Evict stale partners on both sides so the two maps stay mutual inverses.
        if let Some(old_locator) = self.by_id.insert(id, locator.to_string()) {
            if old_locator != locator {
                self.by_locator.remove(&old_locator);
            }
        }
        if let Some(old_id) = self.by_locator.insert(locator.to_string(), id) {
            if old_id != id {
                self.by_id.remove(&old_id);
            }
        }
    }
}

/// Bidirectional id <-> locator map with monotonic allocation.
#[derive(Default)]
pub struct IdentityIndex {
    entries: RwLock<Entries>,
}

impl IdentityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Bind `id` to `locator` in both directions. Last write wins: any previous partner of
    /// either side is dropped.
    pub fn bind(&self, id: NodeId, locator: &str) {
        debug!(%id, locator, "index bind");
        self.write().insert(id, locator);
    }

    /// Return the id bound to `locator`, allocating `max(id) + 1` if it has none.
    ///
    /// Fails with `IndexNotSeeded` when nothing has been bound yet.
    pub fn allocate_or_lookup(&self, locator: &str) -> Result<NodeId, OxioError> {
        let mut entries = self.write();
        if let Some(id) = entries.by_locator.get(locator) {
            return Ok(*id);
        }
        let max = entries
            .by_id
            .last_key_value()
            .map(|(id, _)| *id)
            .ok_or(OxioError::IndexNotSeeded)?;
        let next = max
            .0
            .checked_add(1)
            .map(NodeId)
            .ok_or_else(|| OxioError::invalid("identifier space exhausted"))?;
        entries.insert(next, locator);
        debug!(id = %next, locator, "index allocate");
        Ok(next)
    }

    /// Locator bound to `id`, or None for an unknown identifier.
    pub fn locator_for(&self, id: NodeId) -> Option<String> {
        self.read().by_id.get(&id).cloned()
    }

    /// Id bound to `locator`.
    pub fn id_for(&self, locator: &str) -> Option<NodeId> {
        self.read().by_locator.get(locator).copied()
    }

    pub fn contains_id(&self, id: NodeId) -> bool {
        self.read().by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().by_id.is_empty()
    }
}
