//! An ordered set that iterates in insertion order.

use std::borrow::Borrow;
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::ops::Bound;
use super::map::{self, FifoMap};
use super::order::OrderIndex;

/// An ordered set that iterates in insertion order.
///
/// Inserting an item that is already present leaves the set unchanged; removing an item and
/// inserting it again places it last.
#[derive(Clone)]
pub struct FifoSet<T> {
    map: FifoMap<T, ()>,
}

impl<T> FifoSet<T> {
    /// Creates an empty set.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = fifo_map::FifoSet::new();
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut it = set.iter();
    /// assert_eq!(it.next(), Some(&2));
    /// assert_eq!(it.next(), Some(&1));
    /// assert_eq!(it.next(), Some(&3));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn new() -> Self { FifoSet { map: FifoMap::new() } }

    /// Checks if the set is empty.
    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    /// Returns the number of items in the set.
    pub fn len(&self) -> usize { self.map.len() }

    /// Returns the set's order index, which lists the items in insertion order.
    pub fn order_index(&self) -> &OrderIndex<T> { self.map.order_index() }

    /// Removes all items from the set.
    pub fn clear(&mut self) { self.map.clear(); }

    /// Exchanges the contents of two sets, including their insertion orders.
    pub fn swap(&mut self, other: &mut Self) { self.map.swap(&mut other.map); }

    /// Returns the first inserted item, or `None` if the set is empty.
    pub fn first(&self) -> Option<&T> { self.map.first_key_value().map(|e| e.0) }

    /// Returns the last inserted item, or `None` if the set is empty.
    pub fn last(&self) -> Option<&T> { self.map.last_key_value().map(|e| e.0) }

    /// Removes and returns the first inserted item, or `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set: fifo_map::FifoSet<_> = ['q', 'a'].into();
    ///
    /// assert_eq!(set.pop_first(), Some('q'));
    /// assert_eq!(set.pop_first(), Some('a'));
    /// assert_eq!(set.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<T> { self.map.pop_first().map(|e| e.0) }

    /// Removes and returns the last inserted item, or `None` if the set is empty.
    pub fn pop_last(&mut self) -> Option<T> { self.map.pop_last().map(|e| e.0) }

    /// Returns an iterator over the set's items in insertion order.
    pub fn iter(&self) -> Iter<'_, T> { Iter(self.map.iter()) }
}

impl<T> FifoSet<T> {
    /// Checks if the set contains the given item.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = fifo_map::FifoSet::new();
    /// assert!(!set.contains("b"));
    ///
    /// set.insert("b".to_string());
    /// assert!(set.contains("b"));
    /// ```
    pub fn contains<Q: ?Sized>(&self, item: &Q) -> bool where T: Borrow<Q>, Q: Eq {
        self.map.contains_key(item)
    }

    /// Returns a reference to the set's item that equals the given item, if any.
    pub fn get<Q: ?Sized>(&self, item: &Q) -> Option<&T> where T: Borrow<Q>, Q: Eq {
        self.map.get_key_value(item).map(|e| e.0)
    }

    /// Returns the item's position in insertion order, or `None` if the set does not contain the
    /// item.
    pub fn position_of<Q: ?Sized>(&self, item: &Q) -> Option<usize> where T: Borrow<Q>, Q: Eq {
        self.map.position_of(item)
    }

    /// Removes the given item from the set, returning `true` if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set: fifo_map::FifoSet<_> = [2, 1].into();
    ///
    /// assert!(set.remove(&2));
    /// assert!(!set.remove(&2));
    ///
    /// set.insert(2);
    /// assert_eq!(set.iter().collect::<Vec<_>>(), [&1, &2]);
    /// ```
    pub fn remove<Q: ?Sized>(&mut self, item: &Q) -> bool where T: Borrow<Q>, Q: Eq {
        self.map.remove(item).is_some()
    }

    /// Removes the given item from the set and returns the stored item, if any.
    pub fn take<Q: ?Sized>(&mut self, item: &Q) -> Option<T> where T: Borrow<Q>, Q: Eq {
        self.map.remove_entry(item).map(|e| e.0)
    }

    /// Returns an iterator over the items that lie between `min` and `max` in insertion order.
    ///
    /// An item the set does not contain ranks after every item it does contain.
    pub fn range<Q: ?Sized>(&self, min: Bound<&Q>, max: Bound<&Q>) -> Range<'_, T>
        where T: Borrow<Q>, Q: Eq {

        Range(self.map.range(min, max))
    }
}

impl<T> FifoSet<T> where T: Eq + Clone {
    /// Inserts the item into the set, returning `true` if the set did not already contain it.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut set = fifo_map::FifoSet::new();
    ///
    /// assert!(set.insert("C"));
    /// assert!(set.insert("A"));
    /// assert!(!set.insert("C"));
    /// assert_eq!(set.position_of("C"), Some(0));
    /// ```
    pub fn insert(&mut self, item: T) -> bool { self.map.insert(item, ()).1 }

    /// Retains only the items for which the predicate returns `true`.
    pub fn retain<F>(&mut self, mut f: F) where F: FnMut(&T) -> bool {
        self.map.retain(|item, _| f(item));
    }
}

impl<T> Debug for FifoSet<T> where T: Debug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for FifoSet<T> {
    fn default() -> Self { FifoSet::new() }
}

impl<T> Extend<T> for FifoSet<T> where T: Eq + Clone {
    fn extend<I: IntoIterator<Item=T>>(&mut self, it: I) {
        for item in it { self.insert(item); }
    }
}

impl<T> FromIterator<T> for FifoSet<T> where T: Eq + Clone {
    fn from_iter<I: IntoIterator<Item=T>>(it: I) -> Self {
        let mut set = FifoSet::new();
        set.extend(it);
        set
    }
}

impl<T, const N: usize> From<[T; N]> for FifoSet<T> where T: Eq + Clone {
    fn from(items: [T; N]) -> Self { items.into_iter().collect() }
}

/// Sets are equal if they contain the same items, in any order.
impl<T> PartialEq for FifoSet<T> where T: Eq {
    fn eq(&self, other: &Self) -> bool { self.map == other.map }
}

impl<T> Eq for FifoSet<T> where T: Eq {}

impl<T> Hash for FifoSet<T> where T: Ord + Hash {
    fn hash<H: Hasher>(&self, h: &mut H) { self.map.hash(h); }
}

impl<'a, T> IntoIterator for &'a FifoSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}

impl<T> IntoIterator for FifoSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Returns an iterator that consumes the set, yielding its items in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// let set: fifo_map::FifoSet<_> = [2, 1, 3].into();
    /// assert_eq!(set.into_iter().rev().collect::<Vec<_>>(), [3, 1, 2]);
    /// ```
    fn into_iter(self) -> IntoIter<T> { IntoIter(self.map.into_keys()) }
}

/// An iterator that consumes the set, yielding items in insertion order.
pub struct IntoIter<T>(map::IntoKeys<T, ()>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<T> { self.0.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> { self.0.next_back() }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

/// An iterator over the set's items in insertion order.
pub struct Iter<'a, T: 'a>(map::Iter<'a, T, ()>);

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Iter<'a, T> { Iter(self.0.clone()) }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<&'a T> { self.0.next().map(|e| e.0) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> { self.0.next_back().map(|e| e.0) }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

/// An iterator over the set's items that lie in a given range of the insertion order.
///
/// Acquire through [`FifoSet::range`].
pub struct Range<'a, T: 'a>(map::Range<'a, T, ()>);

impl<'a, T> Clone for Range<'a, T> {
    fn clone(&self) -> Range<'a, T> { Range(self.0.clone()) }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<&'a T> { self.0.next().map(|e| e.0) }
    fn size_hint(&self) -> (usize, Option<usize>) { self.0.size_hint() }
}

impl<'a, T> DoubleEndedIterator for Range<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> { self.0.next_back().map(|e| e.0) }
}

impl<'a, T> ExactSizeIterator for Range<'a, T> {}
