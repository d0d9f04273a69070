use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Arc;

/// Concurrent keyed table backing every repository.
///
/// Reads return clones; no reference into the map outlives a call, so
/// callers can never hold a shard lock across an insert.
#[derive(Debug)]
pub struct MemoryTable<K, V>
where
    K: Hash + Eq,
{
    entries: Arc<DashMap<K, V>>,
}

impl<K, V> Clone for MemoryTable<K, V>
where
    K: Hash + Eq,
{
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K, V> Default for MemoryTable<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MemoryTable<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts or replaces, returning the previous value.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Inserts only into a vacant key; returns false when the key was taken.
    pub fn insert_new(&self, key: K, value: V) -> bool {
        match self.entries.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|(_, value)| value)
    }

    /// Applies `f` to the stored value and returns the updated copy.
    pub fn update<F>(&self, key: &K, f: F) -> Option<V>
    where
        F: FnOnce(&mut V),
    {
        self.entries.get_mut(key).map(|mut entry| {
            f(entry.value_mut());
            entry.value().clone()
        })
    }

    pub fn values(&self) -> Vec<V> {
        self.entries.iter().map(|entry| entry.value().clone()).collect()
    }

    pub fn filter<P>(&self, predicate: P) -> Vec<V>
    where
        P: Fn(&V) -> bool,
    {
        self.entries
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn find<P>(&self, predicate: P) -> Option<V>
    where
        P: Fn(&V) -> bool,
    {
        self.entries
            .iter()
            .find(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
    }

    pub fn any<P>(&self, predicate: P) -> bool
    where
        P: Fn(&K, &V) -> bool,
    {
        self.entries
            .iter()
            .any(|entry| predicate(entry.key(), entry.value()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_returns_new_value() {
        let table: MemoryTable<u32, String> = MemoryTable::new();
        table.insert(1, "a".to_string());
        let updated = table.update(&1, |v| v.push('b'));
        assert_eq!(updated.as_deref(), Some("ab"));
        assert_eq!(table.update(&2, |v| v.push('c')), None);
    }

    #[test]
    fn test_insert_new_keeps_existing() {
        let table: MemoryTable<u32, &str> = MemoryTable::new();
        assert!(table.insert_new(1, "first"));
        assert!(!table.insert_new(1, "second"));
        assert_eq!(table.get(&1), Some("first"));
    }

    #[test]
    fn test_clones_share_rows() {
        let table: MemoryTable<u32, u32> = MemoryTable::new();
        let other = table.clone();
        other.insert(7, 49);
        assert_eq!(table.get(&7), Some(49));
        assert_eq!(table.len(), 1);
    }
}
