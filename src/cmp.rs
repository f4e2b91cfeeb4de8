//! Comparators that order keys by when they were first seen.

use compare::Compare;
use std::borrow::Borrow;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt::{self, Debug};
use super::order::OrderIndex;

/// A comparator that orders keys by their position in an [`OrderIndex`].
///
/// The comparator borrows the index, so it cannot outlive the collection that owns it. Keys that
/// are not registered compare greater than every registered key and equal to each other.
/// Keys are added and removed through [`OrderIndex::register`] and [`OrderIndex::deregister`].
///
/// # Examples
///
/// ```
/// # extern crate compare;
/// # extern crate fifo_map;
/// # fn main() {
/// use compare::Compare;
/// use fifo_map::{ByOrder, OrderIndex};
///
/// let mut index = OrderIndex::new();
/// index.register(&"z");
/// index.register(&"a");
///
/// let cmp = ByOrder::new(&index);
/// assert!(cmp.compares_lt("z", &"a"));
/// assert!(cmp.compares_gt("m", &"a"));
/// # }
/// ```
pub struct ByOrder<'a, K: 'a> {
    order: &'a OrderIndex<K>,
}

impl<'a, K> ByOrder<'a, K> {
    /// Creates a comparator reading the given index.
    pub fn new(order: &'a OrderIndex<K>) -> Self { ByOrder { order: order } }

    /// Returns the index the comparator reads.
    pub fn order_index(&self) -> &'a OrderIndex<K> { self.order }

    fn rank<Q: ?Sized>(&self, key: &Q) -> usize where K: Borrow<Q>, Q: Eq {
        self.order.position_of(key).unwrap_or(usize::MAX)
    }
}

impl<'a, K> Clone for ByOrder<'a, K> {
    fn clone(&self) -> Self { *self }
}

impl<'a, K> Copy for ByOrder<'a, K> {}

impl<'a, K> Debug for ByOrder<'a, K> where K: Debug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ByOrder").field(self.order).finish()
    }
}

impl<'a, K, Q: ?Sized> Compare<Q, K> for ByOrder<'a, K> where K: Borrow<Q>, Q: Eq {
    fn compare(&self, l: &Q, r: &K) -> Ordering {
        self.rank(l).cmp(&self.rank(Borrow::<Q>::borrow(r)))
    }
}

/// A comparator that discovers the order of keys while comparing them.
///
/// The first time a key takes part in a comparison it is appended to the comparator's private
/// order, ranking after every key seen before it. When keys are inserted one at a time into a
/// binary search tree ordered by a fresh `FirstSeen`, the tree iterates them in insertion order.
///
/// Comparing mutates the comparator, so one instance must only ever serve a single collection.
/// The comparator cannot be shared between threads. [`FifoMap`](crate::FifoMap) registers keys
/// explicitly and does not use this type.
///
/// # Examples
///
/// ```
/// # extern crate compare;
/// # extern crate fifo_map;
/// # fn main() {
/// use compare::Compare;
/// use fifo_map::FirstSeen;
///
/// let cmp = FirstSeen::new();
/// assert!(cmp.compares_gt(&"b", &"a"));
/// assert!(cmp.compares_lt(&"a", &"b"));
/// assert!(cmp.compares_lt(&"b", &"c"));
/// assert_eq!(cmp.seen(), ["a", "b", "c"]);
/// # }
/// ```
#[derive(Clone)]
pub struct FirstSeen<K> {
    keys: RefCell<Vec<K>>,
}

impl<K> FirstSeen<K> {
    /// Creates a comparator that has not seen any key.
    pub fn new() -> Self { FirstSeen { keys: RefCell::new(Vec::new()) } }

    /// Returns the number of keys seen so far.
    pub fn len(&self) -> usize { self.keys.borrow().len() }

    /// Checks if the comparator has not seen any key.
    pub fn is_empty(&self) -> bool { self.keys.borrow().is_empty() }

    /// Returns the keys seen so far, in the order they were first seen.
    pub fn seen(&self) -> Vec<K> where K: Clone { self.keys.borrow().clone() }

    fn rank_or_insert(&self, key: &K) -> usize where K: Eq + Clone {
        let mut keys = self.keys.borrow_mut();

        match keys.iter().position(|k| k == key) {
            Some(rank) => rank,
            None => {
                keys.push(key.clone());
                // ranks past every stored position, including its own
                keys.len() + 1
            }
        }
    }
}

impl<K> Default for FirstSeen<K> {
    fn default() -> Self { FirstSeen::new() }
}

impl<K> Debug for FirstSeen<K> where K: Debug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FirstSeen").field(&*self.keys.borrow()).finish()
    }
}

impl<K> Compare<K> for FirstSeen<K> where K: Eq + Clone {
    fn compare(&self, l: &K, r: &K) -> Ordering {
        let r_rank = self.rank_or_insert(r);
        let l_rank = self.rank_or_insert(l);
        l_rank.cmp(&r_rank)
    }
}
