//! Name sets and the set algebra used by reconciliation

use std::collections::BTreeSet;
use std::collections::btree_set;

use serde::{Deserialize, Serialize};

/// A collection of unique names: declared names, directory entry names or
/// tracked descriptor paths.
///
/// Inserting a name that is already present is a no-op. Iteration is in
/// sorted order so every rendering of a set is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameSet {
    names: BTreeSet<String>,
}

impl NameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a name. Returns `false` if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Names in `self` that are not in `other`.
    pub fn difference(&self, other: &NameSet) -> NameSet {
        self.names.difference(&other.names).cloned().collect()
    }

    /// Names present in both sets.
    pub fn intersection(&self, other: &NameSet) -> NameSet {
        self.names.intersection(&other.names).cloned().collect()
    }

    /// Names present in either set.
    pub fn union(&self, other: &NameSet) -> NameSet {
        self.names.union(&other.names).cloned().collect()
    }

    /// Split into the names accepted by `predicate` and the rest.
    pub fn partition(&self, mut predicate: impl FnMut(&str) -> bool) -> (NameSet, NameSet) {
        let (accepted, rejected): (BTreeSet<String>, BTreeSet<String>) = self
            .names
            .iter()
            .cloned()
            .partition(|name| predicate(name));
        (Self { names: accepted }, Self { names: rejected })
    }
}

impl<S: Into<String>> FromIterator<S> for NameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for NameSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for NameSet {
    type Item = String;
    type IntoIter = btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter()
    }
}

impl<'a> IntoIterator for &'a NameSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}
