use std::collections::HashMap;
use std::hash::Hash;

/// An injective two-way mapping backed by a pair of [HashMap]s kept in sync
/// behind one interface.
#[derive(Debug, Default)]
pub struct BidiMap<K, V> {
    forward: HashMap<K, V>,
    reverse: HashMap<V, K>,
}

impl<K, V> BidiMap<K, V>
where
    K: Copy + Eq + Hash,
    V: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            forward: HashMap::new(),
            reverse: HashMap::new(),
        }
    }

    /// Inserts a pair. Returns `false` without touching the map if either
    /// side is already mapped, which would break injectivity.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.forward.contains_key(&key) || self.reverse.contains_key(&value) {
            return false;
        }

        self.forward.insert(key, value);
        self.reverse.insert(value, key);

        true
    }

    pub fn get_forward(&self, key: &K) -> Option<&V> {
        self.forward.get(key)
    }

    pub fn get_reverse(&self, value: &V) -> Option<&K> {
        self.reverse.get(value)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.forward.iter()
    }
}
