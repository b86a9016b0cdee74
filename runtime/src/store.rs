use std::collections::HashMap;
use std::hash::Hash;

/// Per-instance storage backing the expanded aggregator accessors of a
/// generated type.
///
/// For a true schema choice the key is the type's discriminator enum and
/// each alternative lives under its own key. For sequence-group aggregation
/// there is no discriminator and the store is used with the unit key.
///
/// The store is a plain owned field on the generated type, initialized with
/// the instance.
#[derive(Clone, Debug)]
pub struct ChoiceItemStore<K, V> {
    items: HashMap<K, Vec<V>>,
}

impl<K, V> Default for ChoiceItemStore<K, V> {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> ChoiceItemStore<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The single value stored under `key`, if any.
    pub fn single(&self, key: &K) -> Option<&V> {
        self.items.get(key).and_then(|values| values.first())
    }

    /// Stores exactly one value under `key`, replacing anything previously
    /// stored under that key. Other keys are untouched.
    pub fn set_single(&mut self, key: K, value: V) {
        self.items.insert(key, vec![value]);
    }

    pub fn all(&self, key: &K) -> &[V] {
        self.items.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set_all(&mut self, key: K, values: Vec<V>) {
        self.items.insert(key, values);
    }

    pub fn clear(&mut self, key: &K) {
        self.items.remove(key);
    }

    pub fn is_empty(&self) -> bool {
        self.items.values().all(Vec::is_empty)
    }
}

impl<V> ChoiceItemStore<(), V> {
    /// Unkeyed accessors for sequence-group aggregation.
    pub fn item(&self) -> Option<&V> {
        self.single(&())
    }

    pub fn set_item(&mut self, value: V) {
        self.set_single((), value);
    }

    pub fn items(&self) -> &[V] {
        self.all(&())
    }

    pub fn set_items(&mut self, values: Vec<V>) {
        self.set_all((), values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Key {
        ListId,
        FullName,
    }

    #[test]
    fn set_then_read_same_key_round_trips() {
        let mut store = ChoiceItemStore::new();
        store.set_single(Key::ListId, "80000-1234".to_string());
        assert_eq!(store.single(&Key::ListId).unwrap(), "80000-1234");
    }

    #[test]
    fn keys_store_mutually_exclusive_values() {
        let mut store = ChoiceItemStore::new();
        store.set_single(Key::ListId, "80000-1234".to_string());
        assert!(store.single(&Key::FullName).is_none());
        assert!(store.all(&Key::FullName).is_empty());
    }

    #[test]
    fn set_single_replaces_previous_sequence() {
        let mut store = ChoiceItemStore::new();
        store.set_all(Key::FullName, vec!["a".to_string(), "b".to_string()]);
        store.set_single(Key::FullName, "c".to_string());
        assert_eq!(store.all(&Key::FullName), ["c".to_string()]);
    }

    #[test]
    fn unkeyed_accessors_use_unit_key() {
        let mut store = ChoiceItemStore::<(), u32>::new();
        store.set_items(vec![1, 2, 3]);
        assert_eq!(store.items(), [1, 2, 3]);
        assert_eq!(store.item(), Some(&1));
    }
}
