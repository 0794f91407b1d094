use core::fmt::{self, Debug};
use core::hash::Hash;
use std::collections::btree_map;
use std::collections::BTreeMap;

use dashmap::DashMap;

use crate::Value;

/// Key type for agent state.
///
/// Deterministic planning requires a total order (`Ord`) so snapshots have a canonical layout.
pub trait StateKey: Clone + Ord + Hash + Debug + Send + Sync + 'static {}

impl<T> StateKey for T where T: Clone + Ord + Hash + Debug + Send + Sync + 'static {}

static ABSENT: Value = Value::Absent;

/// An immutable-by-convention snapshot of an agent's state.
///
/// Keys are kept sorted, so two snapshots with the same entries compare and hash equal no matter
/// how they were built. `Value::Absent` is never stored: writing it removes the key.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct WorldState<K: StateKey> {
    values: BTreeMap<K, Value>,
}

impl<K: StateKey> Default for WorldState<K> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<K: StateKey> WorldState<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored under `key`, or `Value::Absent`.
    pub fn get(&self, key: &K) -> &Value {
        self.values.get(key).unwrap_or(&ABSENT)
    }

    pub fn set(&mut self, key: K, value: impl Into<Value>) {
        let value = value.into();
        if value.is_absent() {
            self.values.remove(&key);
        } else {
            self.values.insert(key, value);
        }
    }

    pub fn with(mut self, key: K, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn remove(&mut self, key: &K) -> Value {
        self.values.remove(key).unwrap_or_default()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, K, Value> {
        self.values.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, K, Value> {
        self.values.keys()
    }
}

impl<K: StateKey> Debug for WorldState<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.values.iter()).finish()
    }
}

impl<K: StateKey, V: Into<Value>> FromIterator<(K, V)> for WorldState<K> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut state = Self::new();
        state.extend(iter);
        state
    }
}

impl<K: StateKey, V: Into<Value>> Extend<(K, V)> for WorldState<K> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<'a, K: StateKey> IntoIterator for &'a WorldState<K> {
    type Item = (&'a K, &'a Value);
    type IntoIter = btree_map::Iter<'a, K, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// The agent's live state store.
///
/// Readers (render/query threads) and writers (executors, sensors) may touch it concurrently;
/// planning never reads it directly but works on a [`WorldState`] snapshot.
pub struct LiveState<K: StateKey> {
    values: DashMap<K, Value>,
}

impl<K: StateKey> Default for LiveState<K> {
    fn default() -> Self {
        Self {
            values: DashMap::new(),
        }
    }
}

impl<K: StateKey> LiveState<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Value {
        self.values
            .get(key)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    pub fn set(&self, key: K, value: impl Into<Value>) {
        let value = value.into();
        if value.is_absent() {
            self.values.remove(&key);
        } else {
            self.values.insert(key, value);
        }
    }

    pub fn remove(&self, key: &K) -> Value {
        self.values
            .remove(key)
            .map(|(_, value)| value)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy the current contents into a sorted snapshot.
    pub fn snapshot(&self) -> WorldState<K> {
        self.values
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

impl<K: StateKey> Debug for LiveState<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.snapshot().iter()).finish()
    }
}

impl<K: StateKey, V: Into<Value>> FromIterator<(K, V)> for LiveState<K> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let state = Self::new();
        for (key, value) in iter {
            state.set(key, value);
        }
        state
    }
}
