// Copyright 2018 The Starlark in Rust Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Simple implementation of `LinkedHashSet`.

use linked_hash_map::{Entry, LinkedHashMap};
use std::hash::Hash;

/// `LinkedHashSet` is a tiny wrapper around `LinkedHashMap`.
///
/// Sets keep insertion order so that freezing a set and printing it are
/// deterministic.
#[derive(PartialEq, Eq, Debug, Clone)]
pub(crate) struct LinkedHashSet<K: Eq + Hash> {
    map: LinkedHashMap<K, ()>,
}

impl<K: Eq + Hash> LinkedHashSet<K> {
    pub fn new() -> Self {
        LinkedHashSet {
            map: LinkedHashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        LinkedHashSet {
            map: LinkedHashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear()
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.map.keys()
    }

    pub fn contains(&self, value: &K) -> bool {
        self.map.get(value).is_some()
    }

    /// Insert `value` unless an equal value is already there, in which
    /// case the set keeps the old value and its position.
    pub fn insert_if_absent(&mut self, value: K) {
        if let Entry::Vacant(e) = self.map.entry(value) {
            e.insert(());
        }
    }

    pub fn remove(&mut self, value: &K) -> bool {
        self.map.remove(value).is_some()
    }

    pub fn is_subset(&self, other: &LinkedHashSet<K>) -> bool {
        self.len() <= other.len() && self.iter().all(|k| other.contains(k))
    }
}

impl<K: Eq + Hash> Default for LinkedHashSet<K> {
    fn default() -> Self {
        LinkedHashSet::new()
    }
}

impl<K: Eq + Hash> std::iter::FromIterator<K> for LinkedHashSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = LinkedHashSet::new();
        for k in iter {
            set.insert_if_absent(k);
        }
        set
    }
}
