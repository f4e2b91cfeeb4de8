use std::borrow::Borrow;
use std::slice;

/// A registry of keys in the order they were first registered.
///
/// A key's position is its index in the registry. Positions are assigned on first registration
/// and never reassigned while the key remains registered; deregistering a key moves every later
/// key down by one, which preserves their relative order.
///
/// Every query is a linear scan over the registered keys.
#[derive(Clone, Debug)]
pub struct OrderIndex<K> {
    keys: Vec<K>,
}

impl<K> OrderIndex<K> {
    /// Creates an empty index.
    pub fn new() -> Self { OrderIndex { keys: Vec::new() } }

    /// Returns the number of registered keys.
    pub fn len(&self) -> usize { self.keys.len() }

    /// Checks if no key is registered.
    pub fn is_empty(&self) -> bool { self.keys.is_empty() }

    /// Returns the key at the given position, if any.
    pub fn get(&self, position: usize) -> Option<&K> { self.keys.get(position) }

    /// Returns an iterator over the registered keys in registration order.
    pub fn iter(&self) -> slice::Iter<'_, K> { self.keys.iter() }

    /// Deregisters every key.
    pub fn clear(&mut self) { self.keys.clear(); }

    /// Returns the position of the given key, or `None` if it is not registered.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut index = fifo_map::OrderIndex::new();
    /// index.register(&"b");
    /// index.register(&"a");
    ///
    /// assert_eq!(index.position_of("b"), Some(0));
    /// assert_eq!(index.position_of("a"), Some(1));
    /// assert_eq!(index.position_of("c"), None);
    /// ```
    pub fn position_of<Q: ?Sized>(&self, key: &Q) -> Option<usize> where K: Borrow<Q>, Q: Eq {
        self.keys.iter().position(|k| Borrow::<Q>::borrow(k) == key)
    }

    /// Checks if the given key is registered.
    pub fn contains<Q: ?Sized>(&self, key: &Q) -> bool where K: Borrow<Q>, Q: Eq {
        self.position_of(key).is_some()
    }

    /// Registers the key at the end of the order unless it is already registered, returning its
    /// position.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut index = fifo_map::OrderIndex::new();
    /// assert_eq!(index.register(&'x'), 0);
    /// assert_eq!(index.register(&'y'), 1);
    /// assert_eq!(index.register(&'x'), 0);
    /// assert_eq!(index.len(), 2);
    /// ```
    pub fn register(&mut self, key: &K) -> usize where K: Eq + Clone {
        match self.position_of(key) {
            Some(position) => position,
            None => {
                self.keys.push(key.clone());
                self.keys.len() - 1
            }
        }
    }

    /// Deregisters the key, returning the position it held.
    ///
    /// # Panics
    ///
    /// Panics if the key is not registered. Callers only deregister keys they know to be present,
    /// so an unknown key means the index no longer matches the collection that owns it.
    pub fn deregister<Q: ?Sized>(&mut self, key: &Q) -> usize where K: Borrow<Q>, Q: Eq {
        match self.position_of(key) {
            Some(position) => {
                self.keys.remove(position);
                position
            }
            None => panic!("deregistered a key missing from the order index"),
        }
    }

    /// Deregisters the key at the given position and returns it.
    pub(crate) fn deregister_at(&mut self, position: usize) -> K { self.keys.remove(position) }
}

impl<K> Default for OrderIndex<K> {
    fn default() -> Self { OrderIndex::new() }
}

impl<'a, K> IntoIterator for &'a OrderIndex<K> {
    type Item = &'a K;
    type IntoIter = slice::Iter<'a, K>;
    fn into_iter(self) -> slice::Iter<'a, K> { self.iter() }
}
