//! Per-character memory: what each character believes about where things are.
//!
//! A memory is a belief, not ground truth. It goes stale the moment its
//! subject is moved by somebody else, and nothing notices until the
//! character acts on it. There is at most one memory per subject; writing a
//! new one replaces the old with no history kept.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// One belief about a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    /// The thing (or person) remembered.
    pub subject: EntityId,
    /// Where it is believed to be: a location, a container, or a character.
    pub location: EntityId,
    /// The character put it there on purpose.
    pub i_hid_it_there: bool,
}

/// The memory bank, a character's beliefs keyed by subject.
///
/// Iteration is in subject-id order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    entries: BTreeMap<EntityId, Memory>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Believe `subject` is at `location`, not placed there by us.
    pub fn remember(&mut self, subject: EntityId, location: EntityId) {
        self.remember_with(subject, location, false);
    }

    /// Believe `subject` is at `location`, optionally as its hider.
    pub fn remember_with(&mut self, subject: EntityId, location: EntityId, i_hid_it_there: bool) {
        self.entries.insert(
            subject,
            Memory {
                subject,
                location,
                i_hid_it_there,
            },
        );
    }

    /// What we believe about `subject`, if anything.
    #[must_use]
    pub fn recall(&self, subject: EntityId) -> Option<Memory> {
        self.entries.get(&subject).copied()
    }

    /// Drop the belief about `subject`, returning it.
    pub fn forget(&mut self, subject: EntityId) -> Option<Memory> {
        self.entries.remove(&subject)
    }

    /// Every belief, in subject-id order.
    pub fn iter(&self) -> impl Iterator<Item = &Memory> {
        self.entries.values()
    }

    /// Beliefs about things thought to be inside `location`.
    #[must_use]
    pub fn located_in(&self, location: EntityId) -> Vec<Memory> {
        self.entries
            .values()
            .filter(|m| m.location == location)
            .copied()
            .collect()
    }

    /// Number of subjects remembered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is remembered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
