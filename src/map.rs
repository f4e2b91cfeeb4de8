//! An ordered map that iterates in insertion order.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Bound, Index};
use super::cmp::ByOrder;
use super::error::KeyNotFound;
use super::node::{self, Dir, Left, Link, MutNode, Node, Right};
use super::order::OrderIndex;

const OCCUPIED: &str = "occupied entry is missing from the map";

/// An ordered map that iterates in insertion order.
///
/// The map is a binary search tree ordered by an [`OrderIndex`] that records the order in which
/// keys were first inserted. Inserting a key that is already present changes neither its value
/// nor its position; removing a key and inserting it again places it last.
///
/// Keys are located by equality, so they need only implement `Eq` and `Clone`: the order index
/// keeps its own copy of every key.
#[derive(Clone)]
pub struct FifoMap<K, V> {
    order: OrderIndex<K>,
    root: Link<K, V>,
    len: usize,
}

impl<K, V> FifoMap<K, V> {
    /// Creates an empty map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = fifo_map::FifoMap::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// map.insert(3, "c");
    ///
    /// let mut it = map.iter();
    /// assert_eq!(it.next(), Some((&2, &"b")));
    /// assert_eq!(it.next(), Some((&1, &"a")));
    /// assert_eq!(it.next(), Some((&3, &"c")));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self {
        FifoMap { order: OrderIndex::new(), root: None, len: 0 }
    }

    /// Checks if the map is empty.
    pub fn is_empty(&self) -> bool { self.root.is_none() }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize { self.len }

    /// Returns the map's order index, which lists the keys in insertion order.
    pub fn order_index(&self) -> &OrderIndex<K> { &self.order }

    /// Returns the comparator that orders the map's keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use compare::Compare;
    ///
    /// let mut map = fifo_map::FifoMap::new();
    /// map.insert("b", 2);
    /// map.insert("a", 1);
    ///
    /// assert!(map.comparator().compares_lt(&"b", &"a"));
    /// ```
    pub fn comparator(&self) -> ByOrder<'_, K> { ByOrder::new(&self.order) }

    /// Removes all entries from the map.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = fifo_map::FifoMap::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// map.clear();
    ///
    /// assert_eq!(map.len(), 0);
    /// assert!(map.order_index().is_empty());
    /// assert_eq!(map.iter().next(), None);
    /// ```
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
        self.order.clear();
    }

    /// Exchanges the contents of two maps, including their insertion orders.
    pub fn swap(&mut self, other: &mut Self) { mem::swap(self, other); }

    /// Returns the first inserted key and its value, or `None` if the map is empty.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        Left::extremum(&self.root).map(Node::key_value)
    }

    /// Returns the last inserted key and its value, or `None` if the map is empty.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        Right::extremum(&self.root).map(Node::key_value)
    }

    /// Removes and returns the first inserted entry, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = fifo_map::FifoMap::new();
    /// assert_eq!(map.pop_first(), None);
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// assert_eq!(map.pop_first(), Some((2, "b")));
    /// assert_eq!(map.order_index().position_of(&1), Some(0));
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let key_value = Left::remove_extremum(&mut self.root)?;
        self.order.deregister_at(0);
        self.len -= 1;
        self.check_order();
        Some(key_value)
    }

    /// Removes and returns the last inserted entry, or `None` if the map is empty.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let key_value = Right::remove_extremum(&mut self.root)?;
        self.len -= 1;
        self.order.deregister_at(self.len);
        self.check_order();
        Some(key_value)
    }

    /// Returns an iterator over the map's entries in insertion order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter(node::Iter::new(self.root.as_deref(), self.len))
    }

    /// Returns an iterator over the map's entries in insertion order, with mutable references to
    /// the values.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = fifo_map::FifoMap::new();
    ///
    /// map.insert("b", 1);
    /// map.insert("a", 2);
    ///
    /// for (_, value) in map.iter_mut() { *value *= 10; }
    ///
    /// assert_eq!(map[&"b"], 10);
    /// assert_eq!(map[&"a"], 20);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut(node::Iter::new(self.root.as_deref_mut().map(MutNode::new), self.len))
    }

    /// Returns an iterator over the map's keys in insertion order.
    pub fn keys(&self) -> Keys<'_, K, V> { Keys(self.iter()) }

    /// Returns an iterator over the map's values in the insertion order of their keys.
    pub fn values(&self) -> Values<'_, K, V> { Values(self.iter()) }

    /// Returns an iterator over mutable references to the map's values in the insertion order of
    /// their keys.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> { ValuesMut(self.iter_mut()) }

    /// Returns an iterator that consumes the map, yielding its keys in insertion order.
    pub fn into_keys(self) -> IntoKeys<K, V> { IntoKeys(self.into_iter()) }

    /// Returns an iterator that consumes the map, yielding its values in the insertion order of
    /// their keys.
    pub fn into_values(self) -> IntoValues<K, V> { IntoValues(self.into_iter()) }

    fn check_order(&self) {
        debug_assert_eq!(self.order.len(), self.len, "order index out of sync with the map");
    }

}

impl<K, V> FifoMap<K, V> {
    /// Returns a reference to the value associated with the given key, or `None` if the map does
    /// not contain the key.
    ///
    /// Lookups never register the key, so they leave the insertion order untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = fifo_map::FifoMap::new();
    /// assert_eq!(map.get(&1), None);
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// ```
    pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&V> where K: Borrow<Q>, Q: Eq {
        self.get_key_value(key).map(|e| e.1)
    }

    /// Returns the stored key and a reference to its value, or `None` if the map does not contain
    /// the key.
    pub fn get_key_value<Q: ?Sized>(&self, key: &Q) -> Option<(&K, &V)>
        where K: Borrow<Q>, Q: Eq {

        node::get(&self.root, &ByOrder::new(&self.order), key).map(Node::key_value)
    }

    /// Returns a mutable reference to the value associated with the given key, or `None` if the
    /// map does not contain the key.
    pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut V> where K: Borrow<Q>, Q: Eq {
        node::get_mut(&mut self.root, &ByOrder::new(&self.order), key).map(|e| e.1)
    }

    /// Returns a reference to the value associated with the given key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotFound`] if the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_map::{FifoMap, KeyNotFound};
    ///
    /// let map: FifoMap<_, _> = [("C", 1), ("A", 2)].into();
    /// assert_eq!(map.at("A"), Ok(&2));
    /// assert_eq!(map.at("Z"), Err(KeyNotFound));
    /// ```
    pub fn at<Q: ?Sized>(&self, key: &Q) -> Result<&V, KeyNotFound> where K: Borrow<Q>, Q: Eq {
        self.get(key).ok_or(KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with the given key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotFound`] if the map does not contain the key.
    pub fn at_mut<Q: ?Sized>(&mut self, key: &Q) -> Result<&mut V, KeyNotFound>
        where K: Borrow<Q>, Q: Eq {

        self.get_mut(key).ok_or(KeyNotFound)
    }

    /// Checks if the map contains the given key.
    pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool where K: Borrow<Q>, Q: Eq {
        self.get_key_value(key).is_some()
    }

    /// Returns the number of entries with the given key, which is either zero or one.
    pub fn count<Q: ?Sized>(&self, key: &Q) -> usize where K: Borrow<Q>, Q: Eq {
        usize::from(self.contains_key(key))
    }

    /// Returns the key's position in insertion order, or `None` if the map does not contain the
    /// key.
    pub fn position_of<Q: ?Sized>(&self, key: &Q) -> Option<usize> where K: Borrow<Q>, Q: Eq {
        self.order.position_of(key)
    }

    /// Returns the entry at the given position in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// let map: fifo_map::FifoMap<_, _> = [('x', 1), ('a', 2)].into();
    /// assert_eq!(map.get_index(1), Some((&'a', &2)));
    /// assert_eq!(map.get_index(2), None);
    /// ```
    pub fn get_index(&self, position: usize) -> Option<(&K, &V)> where K: Eq {
        self.get_key_value(self.order.get(position)?)
    }

    /// Returns an iterator over the entries whose keys lie between `min` and `max` in insertion
    /// order.
    ///
    /// A key the map does not contain ranks after every key it does contain.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ops::Bound::{Excluded, Included, Unbounded};
    ///
    /// let map: fifo_map::FifoMap<_, _> = [("d", 1), ("b", 2), ("c", 3), ("a", 4)].into();
    ///
    /// assert_eq!(map.range(Included("b"), Excluded("a")).collect::<Vec<_>>(),
    ///            [(&"b", &2), (&"c", &3)]);
    /// assert_eq!(map.range(Excluded("c"), Unbounded).collect::<Vec<_>>(), [(&"a", &4)]);
    /// assert_eq!(map.range(Included("z"), Unbounded).next(), None);
    /// ```
    pub fn range<Q: ?Sized>(&self, min: Bound<&Q>, max: Bound<&Q>) -> Range<'_, K, V>
        where K: Borrow<Q>, Q: Eq {

        let size = self.range_len(min, max);
        Range(node::Iter::range(self.root.as_deref(), size, &ByOrder::new(&self.order), min, max))
    }

    /// Returns an iterator over the entries whose keys lie between `min` and `max` in insertion
    /// order, with mutable references to the values.
    pub fn range_mut<Q: ?Sized>(&mut self, min: Bound<&Q>, max: Bound<&Q>) -> RangeMut<'_, K, V>
        where K: Borrow<Q>, Q: Eq {

        let size = self.range_len(min, max);
        let root = self.root.as_deref_mut().map(MutNode::new);
        RangeMut(node::Iter::range(root, size, &ByOrder::new(&self.order), min, max))
    }

    /// Returns an iterator over the entries inserted at or after the given key.
    ///
    /// The iterator is empty if the map does not contain the key.
    pub fn lower_bound<Q: ?Sized>(&self, key: &Q) -> Range<'_, K, V> where K: Borrow<Q>, Q: Eq {
        self.range(Bound::Included(key), Bound::Unbounded)
    }

    /// Returns an iterator over the entries inserted after the given key.
    ///
    /// The iterator is empty if the map does not contain the key.
    pub fn upper_bound<Q: ?Sized>(&self, key: &Q) -> Range<'_, K, V> where K: Borrow<Q>, Q: Eq {
        self.range(Bound::Excluded(key), Bound::Unbounded)
    }

    /// Returns an iterator over the entries whose key equals the given key: the single matching
    /// entry, or none.
    pub fn equal_range<Q: ?Sized>(&self, key: &Q) -> Range<'_, K, V> where K: Borrow<Q>, Q: Eq {
        self.range(Bound::Included(key), Bound::Included(key))
    }

    /// Removes the given key from the map, returning its value, or `None` if the map does not
    /// contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = fifo_map::FifoMap::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// assert_eq!(map.remove(&2), Some("b"));
    /// assert_eq!(map.remove(&2), None);
    /// assert_eq!(map.order_index().iter().collect::<Vec<_>>(), [&1]);
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<V> where K: Borrow<Q>, Q: Eq {
        self.remove_entry(key).map(|e| e.1)
    }

    /// Removes the given key from the map, returning the stored key and its value, or `None` if
    /// the map does not contain the key.
    pub fn remove_entry<Q: ?Sized>(&mut self, key: &Q) -> Option<(K, V)>
        where K: Borrow<Q>, Q: Eq {

        // the key must stay registered until the tree has let go of it
        let key_value = node::remove(&mut self.root, &ByOrder::new(&self.order), key)?;
        self.order.deregister(key);
        self.len -= 1;
        self.check_order();
        Some(key_value)
    }

    /// Removes the given key from the map, returning the number of entries removed.
    pub fn erase<Q: ?Sized>(&mut self, key: &Q) -> usize where K: Borrow<Q>, Q: Eq {
        usize::from(self.remove_entry(key).is_some())
    }

    fn range_len<Q: ?Sized>(&self, min: Bound<&Q>, max: Bound<&Q>) -> usize
        where K: Borrow<Q>, Q: Eq {

        let len = self.len;
        let position = |key: &Q| self.order.position_of(key).unwrap_or(len);

        let lo = match min {
            Bound::Unbounded => 0,
            Bound::Included(key) => position(key),
            Bound::Excluded(key) => (position(key) + 1).min(len),
        };

        let hi = match max {
            Bound::Unbounded => len,
            Bound::Included(key) => (position(key) + 1).min(len),
            Bound::Excluded(key) => position(key),
        };

        hi.saturating_sub(lo)
    }
}

impl<K, V> FifoMap<K, V> where K: Eq + Clone {
    /// Inserts an entry into the map unless the map already contains the key, in which case the
    /// map is left unchanged.
    ///
    /// Returns the key's position in insertion order and whether the entry was inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = fifo_map::FifoMap::new();
    ///
    /// assert_eq!(map.insert("C", 1), (0, true));
    /// assert_eq!(map.insert("A", 2), (1, true));
    /// assert_eq!(map.insert("C", 3), (0, false));
    /// assert_eq!(map[&"C"], 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (usize, bool) {
        let position = self.order.register(&key);
        let inserted = self.insert_registered(key, value);
        self.check_order();
        (position, inserted)
    }

    /// Inserts an entry into the map, replacing the value if the map already contains the key.
    ///
    /// The key keeps its position in insertion order. Returns the replaced value, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = fifo_map::FifoMap::new();
    ///
    /// map.insert("C", 1);
    /// map.insert("A", 2);
    ///
    /// assert_eq!(map.insert_or_assign("C", 3), Some(1));
    /// assert_eq!(map.iter().collect::<Vec<_>>(), [(&"C", &3), (&"A", &2)]);
    /// ```
    pub fn insert_or_assign(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.get_mut(&key) {
            return Some(mem::replace(slot, value));
        }

        self.insert(key, value);
        None
    }

    /// Inserts every entry of the iterator, registering all keys in iteration order before any
    /// entry is inserted. Keys the map already contains keep their values.
    pub fn insert_range<I>(&mut self, entries: I) where I: IntoIterator<Item=(K, V)> {
        let entries: Vec<(K, V)> = entries.into_iter().collect();

        for (key, _) in &entries { self.order.register(key); }
        for (key, value) in entries { self.insert_registered(key, value); }

        self.check_order();
    }

    /// Returns the map's entry corresponding to the given key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut counts = fifo_map::FifoMap::new();
    ///
    /// for s in vec!["b", "a", "b", "c", "a", "b"] {
    ///     *counts.entry(s).or_insert(0) += 1;
    /// }
    ///
    /// assert_eq!(counts.iter().collect::<Vec<_>>(), [(&"b", &3), (&"a", &2), (&"c", &1)]);
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        if self.contains_key(&key) {
            Entry::Occupied(OccupiedEntry { map: self, key: key })
        } else {
            Entry::Vacant(VacantEntry { map: self, key: key })
        }
    }

    /// Returns a mutable reference to the key's value, inserting the result of `default` at the
    /// end of the order if the map does not contain the key.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V where F: FnOnce() -> V {
        self.entry(key).or_insert_with(default)
    }

    /// Returns a mutable reference to the key's value, inserting `V::default()` at the end of the
    /// order if the map does not contain the key.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map: fifo_map::FifoMap<_, _> = [("C", 1), ("A", 2)].into();
    ///
    /// *map.get_or_default("A") += 5;
    /// assert_eq!(*map.get_or_default("Z"), 0);
    ///
    /// assert_eq!(map.into_iter().collect::<Vec<_>>(), [("C", 1), ("A", 7), ("Z", 0)]);
    /// ```
    pub fn get_or_default(&mut self, key: K) -> &mut V where V: Default {
        self.entry(key).or_default()
    }

    /// Removes every entry whose key lies between `min` and `max` in insertion order, returning
    /// the number of entries removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::ops::Bound::{Included, Unbounded};
    ///
    /// let mut map: fifo_map::FifoMap<_, _> = [(5, 'a'), (3, 'b'), (9, 'c'), (1, 'd')].into();
    ///
    /// assert_eq!(map.remove_range(Included(&3), Included(&9)), 2);
    /// assert_eq!(map.keys().collect::<Vec<_>>(), [&5, &1]);
    /// assert_eq!(map.remove_range::<i32>(Unbounded, Unbounded), 2);
    /// assert!(map.is_empty());
    /// ```
    pub fn remove_range<Q: ?Sized>(&mut self, min: Bound<&Q>, max: Bound<&Q>) -> usize
        where K: Borrow<Q>, Q: Eq {

        let keys: Vec<K> = self.range(min, max).map(|e| e.0.clone()).collect();
        for key in &keys { self.remove_entry::<K>(key); }
        keys.len()
    }

    /// Retains only the entries for which the predicate returns `true`.
    pub fn retain<F>(&mut self, mut f: F) where F: FnMut(&K, &mut V) -> bool {
        let rejected: Vec<K> = self.iter_mut()
            .filter_map(|(key, value)| if f(key, value) { None } else { Some(key.clone()) })
            .collect();

        for key in &rejected { self.remove_entry(key); }
    }

    /// Moves every entry of `other` to the end of this map, in `other`'s order, leaving `other`
    /// empty. Keys this map already contains keep their values.
    pub fn append(&mut self, other: &mut Self) {
        for (key, value) in mem::take(other) { self.insert(key, value); }
    }

    fn insert_registered(&mut self, key: K, value: V) -> bool {
        let inserted = node::insert(&mut self.root, &ByOrder::new(&self.order), key, value);
        if inserted { self.len += 1; }
        inserted
    }

    fn insert_vacant(&mut self, key: K, value: V) -> &mut V {
        let position = self.order.register(&key);
        self.insert_registered(key, value);
        self.check_order();

        let cmp = ByOrder::new(&self.order);
        let root = &mut self.root;
        self.order.get(position)
            .and_then(|key| node::get_mut(root, &cmp, key))
            .map(|e| e.1)
            .expect("vacant entry is missing right after its insertion")
    }
}

impl<K, V> FifoMap<K, V> where K: Ord {
    fn sorted_entries(&self) -> Vec<(&K, &V)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|l, r| l.0.cmp(r.0));
        entries
    }
}

impl<K, V> Debug for FifoMap<K, V> where K: Debug, V: Debug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for FifoMap<K, V> {
    fn default() -> Self { FifoMap::new() }
}

impl<K, V> Extend<(K, V)> for FifoMap<K, V> where K: Eq + Clone {
    fn extend<I: IntoIterator<Item=(K, V)>>(&mut self, it: I) {
        for (k, v) in it { self.insert(k, v); }
    }
}

impl<'a, K, V> Extend<(&'a K, &'a V)> for FifoMap<K, V> where K: Eq + Copy, V: Copy {
    fn extend<I: IntoIterator<Item=(&'a K, &'a V)>>(&mut self, it: I) {
        for (&k, &v) in it { self.insert(k, v); }
    }
}

impl<K, V> FromIterator<(K, V)> for FifoMap<K, V> where K: Eq + Clone {
    fn from_iter<I: IntoIterator<Item=(K, V)>>(it: I) -> Self {
        let mut map = FifoMap::new();
        map.extend(it);
        map
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for FifoMap<K, V> where K: Eq + Clone {
    fn from(entries: [(K, V); N]) -> Self { entries.into_iter().collect() }
}

/// Maps are equal if they hold equal values for the same keys, in any order.
///
/// # Examples
///
/// ```
/// let l: fifo_map::FifoMap<_, _> = [("C", 1), ("A", 2)].into();
/// let r: fifo_map::FifoMap<_, _> = [("A", 2), ("C", 1)].into();
/// assert_eq!(l, r);
/// ```
impl<K, V> PartialEq for FifoMap<K, V> where K: Eq, V: PartialEq {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V> Eq for FifoMap<K, V> where K: Eq, V: Eq {}

/// Maps are compared by their entries sorted by key, ignoring insertion order.
impl<K, V> PartialOrd for FifoMap<K, V> where K: Ord, V: PartialOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.sorted_entries().partial_cmp(&other.sorted_entries())
    }
}

impl<K, V> Ord for FifoMap<K, V> where K: Ord, V: Ord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sorted_entries().cmp(&other.sorted_entries())
    }
}

impl<K, V> Hash for FifoMap<K, V> where K: Ord + Hash, V: Hash {
    fn hash<H: Hasher>(&self, h: &mut H) {
        self.sorted_entries().hash(h);
    }
}

impl<'a, K, V, Q: ?Sized> Index<&'a Q> for FifoMap<K, V> where K: Borrow<Q>, Q: Eq {
    type Output = V;
    fn index(&self, key: &Q) -> &V { self.get(key).expect("key not found") }
}

impl<'a, K, V> IntoIterator for &'a FifoMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> { self.iter() }
}

impl<'a, K, V> IntoIterator for &'a mut FifoMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> IterMut<'a, K, V> { self.iter_mut() }
}

impl<K, V> IntoIterator for FifoMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Returns an iterator that consumes the map, yielding its entries in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut map = fifo_map::FifoMap::new();
    ///
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    ///
    /// let mut it = map.into_iter();
    /// assert_eq!(it.next_back(), Some((1, "a")));
    /// assert_eq!(it.next(), Some((2, "b")));
    /// assert_eq!(it.next(), None);
    /// ```
    fn into_iter(self) -> IntoIter<K, V> {
        let FifoMap { root, len, .. } = self;
        IntoIter(node::Iter::new(root, len))
    }
}

/// An iterator that consumes the map, yielding entries in insertion order.
#[derive(Clone)]
pub struct IntoIter<K, V>(node::Iter<Box<Node<K, V>>>);

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    fn next(&mut self) -> Option<(K, V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> { self.0.next_back() }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

/// An iterator over the map's entries in insertion order.
///
/// Acquire through [`FifoMap::iter`] or the `IntoIterator` trait:
///
/// ```
/// let map: fifo_map::FifoMap<_, _> = [(2, "b"), (1, "a")].into();
///
/// for (key, value) in &map {
///     println!("{:?}: {:?}", key, value);
/// }
/// ```
pub struct Iter<'a, K: 'a, V: 'a>(node::Iter<&'a Node<K, V>>);

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Iter<'a, K, V> { Iter(self.0.clone()) }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<(&'a K, &'a V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> { self.0.next_back() }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

/// An iterator over the map's entries in insertion order, with mutable references to the values.
pub struct IterMut<'a, K: 'a, V: 'a>(node::Iter<MutNode<'a, K, V>>);

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    fn next(&mut self) -> Option<(&'a K, &'a mut V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for IterMut<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> { self.0.next_back() }
}

impl<'a, K, V> ExactSizeIterator for IterMut<'a, K, V> {}

/// An iterator over the map's keys in insertion order.
pub struct Keys<'a, K: 'a, V: 'a>(Iter<'a, K, V>);

impl<'a, K, V> Clone for Keys<'a, K, V> {
    fn clone(&self) -> Keys<'a, K, V> { Keys(self.0.clone()) }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    fn next(&mut self) -> Option<&'a K> { self.0.next().map(|e| e.0) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> { self.0.next_back().map(|e| e.0) }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

/// An iterator over the map's values in the insertion order of their keys.
pub struct Values<'a, K: 'a, V: 'a>(Iter<'a, K, V>);

impl<'a, K, V> Clone for Values<'a, K, V> {
    fn clone(&self) -> Values<'a, K, V> { Values(self.0.clone()) }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    fn next(&mut self) -> Option<&'a V> { self.0.next().map(|e| e.1) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> { self.0.next_back().map(|e| e.1) }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

/// An iterator over mutable references to the map's values in the insertion order of their keys.
pub struct ValuesMut<'a, K: 'a, V: 'a>(IterMut<'a, K, V>);

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;
    fn next(&mut self) -> Option<&'a mut V> { self.0.next().map(|e| e.1) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for ValuesMut<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a mut V> { self.0.next_back().map(|e| e.1) }
}

impl<'a, K, V> ExactSizeIterator for ValuesMut<'a, K, V> {}

/// An iterator that consumes the map, yielding its keys in insertion order.
pub struct IntoKeys<K, V>(IntoIter<K, V>);

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;
    fn next(&mut self) -> Option<K> { self.0.next().map(|e| e.0) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    fn next_back(&mut self) -> Option<K> { self.0.next_back().map(|e| e.0) }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {}

/// An iterator that consumes the map, yielding its values in the insertion order of their keys.
pub struct IntoValues<K, V>(IntoIter<K, V>);

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;
    fn next(&mut self) -> Option<V> { self.0.next().map(|e| e.1) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<K, V> DoubleEndedIterator for IntoValues<K, V> {
    fn next_back(&mut self) -> Option<V> { self.0.next_back().map(|e| e.1) }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {}

/// An iterator over the map's entries whose keys lie in a given range of the insertion order.
///
/// Acquire through [`FifoMap::range`], [`FifoMap::lower_bound`], [`FifoMap::upper_bound`] or
/// [`FifoMap::equal_range`].
pub struct Range<'a, K: 'a, V: 'a>(node::Iter<&'a Node<K, V>>);

impl<'a, K, V> Clone for Range<'a, K, V> {
    fn clone(&self) -> Range<'a, K, V> { Range(self.0.clone()) }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<(&'a K, &'a V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for Range<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> { self.0.next_back() }
}

impl<'a, K, V> ExactSizeIterator for Range<'a, K, V> {}

/// An iterator over the map's entries whose keys lie in a given range of the insertion order, with
/// mutable references to the values.
///
/// Acquire through [`FifoMap::range_mut`].
pub struct RangeMut<'a, K: 'a, V: 'a>(node::Iter<MutNode<'a, K, V>>);

impl<'a, K, V> Iterator for RangeMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    fn next(&mut self) -> Option<(&'a K, &'a mut V)> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, K, V> DoubleEndedIterator for RangeMut<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a mut V)> { self.0.next_back() }
}

impl<'a, K, V> ExactSizeIterator for RangeMut<'a, K, V> {}

/// An entry in the map.
///
/// See [`FifoMap::entry`] for an example.
pub enum Entry<'a, K: 'a, V: 'a> {
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> where K: Eq + Clone {
    /// Returns a reference to the entry's key.
    pub fn key(&self) -> &K {
        match *self {
            Entry::Occupied(ref e) => e.key(),
            Entry::Vacant(ref e) => e.key(),
        }
    }

    /// Returns the entry's value, inserting the given default if the entry is vacant.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(default),
        }
    }

    /// Returns the entry's value, inserting the given function's result if the entry is vacant.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V where F: FnOnce() -> V {
        match self {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(default()),
        }
    }

    /// Returns the entry's value, inserting `V::default()` if the entry is vacant.
    pub fn or_default(self) -> &'a mut V where V: Default {
        self.or_insert_with(V::default)
    }

    /// Applies the given function to the entry's value if the entry is occupied.
    pub fn and_modify<F>(self, f: F) -> Self where F: FnOnce(&mut V) {
        match self {
            Entry::Occupied(mut e) => {
                f(e.get_mut());
                Entry::Occupied(e)
            }
            Entry::Vacant(e) => Entry::Vacant(e),
        }
    }
}

/// An occupied entry.
///
/// See [`FifoMap::entry`] for an example.
pub struct OccupiedEntry<'a, K: 'a, V: 'a> {
    map: &'a mut FifoMap<K, V>,
    key: K,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> where K: Eq + Clone {
    /// Returns a reference to the entry's key.
    pub fn key(&self) -> &K { &self.key }

    /// Returns the entry's position in insertion order.
    pub fn position(&self) -> usize { self.map.position_of(&self.key).expect(OCCUPIED) }

    /// Returns a reference to the entry's value.
    pub fn get(&self) -> &V { self.map.get(&self.key).expect(OCCUPIED) }

    /// Returns a mutable reference to the entry's value.
    pub fn get_mut(&mut self) -> &mut V { self.map.get_mut(&self.key).expect(OCCUPIED) }

    /// Returns a mutable reference to the entry's value with the same lifetime as the map.
    pub fn into_mut(self) -> &'a mut V {
        let OccupiedEntry { map, key } = self;
        map.get_mut(&key).expect(OCCUPIED)
    }

    /// Replaces the entry's value with the given value, returning the old one. The entry keeps
    /// its position.
    pub fn insert(&mut self, value: V) -> V { mem::replace(self.get_mut(), value) }

    /// Removes the entry from the map and returns its key and value.
    pub fn remove_entry(self) -> (K, V) { self.map.remove_entry(&self.key).expect(OCCUPIED) }

    /// Removes the entry from the map and returns its value.
    pub fn remove(self) -> V { self.remove_entry().1 }
}

/// A vacant entry.
///
/// See [`FifoMap::entry`] for an example.
pub struct VacantEntry<'a, K: 'a, V: 'a> {
    map: &'a mut FifoMap<K, V>,
    key: K,
}

impl<'a, K, V> VacantEntry<'a, K, V> where K: Eq + Clone {
    /// Returns a reference to the key the entry would be inserted with.
    pub fn key(&self) -> &K { &self.key }

    /// Takes ownership of the key.
    pub fn into_key(self) -> K { self.key }

    /// Inserts the entry at the end of the map's order with its key and the given value,
    /// returning a mutable reference to the value with the same lifetime as the map.
    pub fn insert(self, value: V) -> &'a mut V {
        let VacantEntry { map, key } = self;
        map.insert_vacant(key, value)
    }
}

#[cfg(test)]
mod test {
    use super::FifoMap;
    use compare::Compare;

    #[test]
    fn tree_follows_order_index_through_mutation() {
        let mut map = FifoMap::new();

        for i in 0..64u32 { map.insert((i * 37) % 64, i); }
        for i in (0..64u32).step_by(3) { map.remove(&i); }
        map.pop_first();
        map.pop_last();
        for i in 0..16u32 { map.insert(i, i); }

        let cmp = map.comparator();
        let keys: Vec<_> = map.keys().collect();
        for pair in keys.windows(2) { assert!(cmp.compares_lt(pair[0], pair[1])); }
        assert_eq!(keys, map.order_index().iter().collect::<Vec<_>>());
        assert_eq!(map.len(), map.order_index().len());
    }

    #[test]
    fn vacant_entry_lands_last() {
        let mut map: FifoMap<_, _> = [("x", 1), ("y", 2)].into();
        *map.entry("a").or_insert(0) += 3;

        assert_eq!(map.position_of("a"), Some(2));
        assert_eq!(map.get("a"), Some(&3));
    }

    #[test]
    fn occupied_entry_keeps_position() {
        let mut map: FifoMap<_, _> = [("x", 1), ("y", 2)].into();

        match map.entry("x") {
            super::Entry::Occupied(mut e) => {
                assert_eq!(e.position(), 0);
                assert_eq!(e.insert(5), 1);
            }
            super::Entry::Vacant(_) => panic!("expected an occupied entry"),
        }

        assert_eq!(map.iter().collect::<Vec<_>>(), [(&"x", &5), (&"y", &2)]);
        assert_eq!(map.entry("y").and_modify(|v| *v *= 10).key(), &"y");
        assert_eq!(map[&"y"], 20);
    }

    #[test]
    fn range_of_unknown_keys() {
        use std::ops::Bound::*;

        let map: FifoMap<_, _> = [(4, 'a'), (2, 'b'), (8, 'c')].into();

        assert_eq!(map.range(Included(&2), Included(&99)).count(), 2);
        assert_eq!(map.range(Excluded(&99), Unbounded).count(), 0);
        assert_eq!(map.range(Unbounded, Excluded(&99)).len(), 3);
        assert_eq!(map.range(Included(&8), Included(&4)).next(), None);
        assert_eq!(map.lower_bound(&99).next(), None);
        assert_eq!(map.equal_range(&2).collect::<Vec<_>>(), [(&2, &'b')]);
        assert_eq!(map.upper_bound(&2).collect::<Vec<_>>(), [(&8, &'c')]);
    }

    #[test]
    fn remove_range_with_borrowed_bounds() {
        use std::ops::Bound::*;

        let mut map: FifoMap<String, i32> = FifoMap::new();
        for (i, key) in ["d", "a", "c", "b"].iter().enumerate() {
            map.insert(key.to_string(), i as i32);
        }

        assert_eq!(map.remove_range::<str>(Included("a"), Excluded("b")), 2);
        assert_eq!(map.keys().map(String::as_str).collect::<Vec<_>>(), ["d", "b"]);
        assert_eq!(map.order_index().len(), 2);
        assert_eq!(map.remove_range::<str>(Excluded("d"), Unbounded), 1);
        assert_eq!(map.keys().map(String::as_str).collect::<Vec<_>>(), ["d"]);
    }
}
