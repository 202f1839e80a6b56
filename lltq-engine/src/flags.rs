//! Narrative flags: an append-only set of story facts.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::state::WorldState;

/// Flag names are an open vocabulary owned by the content; a flag nobody has
/// set reads as absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagSet(BTreeSet<String>);

impl FlagSet {
    #[must_use]
    pub fn contains(&self, flag: &str) -> bool {
        self.0.contains(flag)
    }

    pub(crate) fn insert(&mut self, flag: &str) {
        if !self.0.contains(flag) {
            self.0.insert(flag.to_string());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        self.0.is_superset(&other.0)
    }
}

impl WorldState {
    /// Set a flag. Adding an existing flag returns an equal state.
    #[must_use]
    pub fn add_flag(&self, flag: &str) -> Self {
        self.with_changes(|state| state.flags.insert(flag))
    }

    #[must_use]
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    #[must_use]
    pub fn has_all_flags(&self, flags: &[&str]) -> bool {
        flags.iter().all(|flag| self.flags.contains(flag))
    }

    #[must_use]
    pub fn has_any_flag(&self, flags: &[&str]) -> bool {
        flags.iter().any(|flag| self.flags.contains(flag))
    }

    #[must_use]
    pub fn has_no_flags(&self, flags: &[&str]) -> bool {
        !self.has_any_flag(flags)
    }

    /// True when at least one of `flags` is unset.
    #[must_use]
    pub fn has_any_missing(&self, flags: &[&str]) -> bool {
        !self.has_all_flags(flags)
    }
}
