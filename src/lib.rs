//! Ordered maps and sets that iterate in insertion order.
//!
//! [`FifoMap`] and [`FifoSet`] are backed by a balanced binary search tree like any ordered
//! collection, but the tree is ordered by an [`OrderIndex`] that records when each key was first
//! inserted. Iteration therefore yields entries in the order their keys were inserted, while
//! lookups, insertions and removals still descend the tree.
//!
//! ```
//! use fifo_map::FifoMap;
//!
//! let mut map = FifoMap::new();
//! map.insert("C", 1);
//! map.insert("A", 2);
//! map.insert("B", 3);
//!
//! assert_eq!(map.keys().collect::<Vec<_>>(), [&"C", &"A", &"B"]);
//!
//! map.remove("A");
//! map.insert("A", 9);
//! assert_eq!(map.iter().collect::<Vec<_>>(), [(&"C", &1), (&"B", &3), (&"A", &9)]);
//! ```

#![deny(missing_docs)]

mod cmp;
mod error;
mod node;
mod order;

pub mod map;
pub mod set;

#[cfg(feature = "quickcheck")]
mod quickcheck;

#[cfg(feature = "serde")]
mod serde;

pub use cmp::{ByOrder, FirstSeen};
pub use error::KeyNotFound;
pub use map::FifoMap;
pub use order::OrderIndex;
pub use set::FifoSet;
