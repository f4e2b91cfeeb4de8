use fifo_map::map::{self, FifoMap};
use quickcheck::{Arbitrary, Gen, TestResult};
use quickcheck_macros::quickcheck;
use std::ops::Bound;

/// Returns the keys of `entries` in first-occurrence order.
fn first_occurrences<K: PartialEq + Clone, V>(entries: &[(K, V)]) -> Vec<K> {
    let mut keys: Vec<K> = vec![];
    for (key, _) in entries {
        if !keys.contains(key) { keys.push(key.clone()); }
    }
    keys
}

pub trait Remove<K> {
    fn remove<V>(&self, map: &mut FifoMap<K, V>) -> Option<(K, V)>;
}

macro_rules! remove {
    ($K:ty, $V:ty, $R:ty) => {
        mod remove {
            use crate::Remove;
            use fifo_map::FifoMap;
            use quickcheck::{quickcheck, TestResult};

            #[test]
            fn removes_key() {
                fn test(mut map: FifoMap<$K, $V>, removal: $R) -> TestResult {
                    match removal.remove(&mut map) {
                        None => TestResult::discard(),
                        Some((ref key, _)) => TestResult::from_bool(
                            !map.contains_key(key) &&
                            map.get(key).is_none() &&
                            map.get_mut(key).is_none() &&
                            map.position_of(key).is_none() &&
                            map.iter().find(|e| e.0 == key).is_none()
                        ),
                    }
                }

                quickcheck(test as fn(FifoMap<$K, $V>, $R) -> TestResult);
            }

            #[test]
            fn keeps_others_in_order() {
                fn test(mut map: FifoMap<$K, $V>, removal: $R) -> bool {
                    let old_map = map.clone();

                    match removal.remove(&mut map) {
                        None => map.iter().eq(old_map.iter()),
                        Some((ref key, _)) =>
                            map.iter().collect::<Vec<_>>() ==
                               old_map.iter().filter(|e| e.0 != key).collect::<Vec<_>>()
                    }
                }

                quickcheck(test as fn(FifoMap<$K, $V>, $R) -> bool);
            }

            #[test]
            fn sets_len() {
                fn test(mut map: FifoMap<$K, $V>, removal: $R) -> bool {
                    let old_len = map.len();

                    match removal.remove(&mut map) {
                        None => map.len() == old_len,
                        Some(_) => map.len() == old_len - 1 && map.order_index().len() == map.len(),
                    }
                }

                quickcheck(test as fn(FifoMap<$K, $V>, $R) -> bool);
            }
        }
    }
}

#[derive(Clone, Debug)]
struct Find<Q>(Q);

impl<Q> Arbitrary for Find<Q> where Q: Arbitrary {
    fn arbitrary(gen: &mut Gen) -> Self { Find(Q::arbitrary(gen)) }
    fn shrink(&self) -> Box<dyn Iterator<Item=Self>> { Box::new(self.0.shrink().map(Find)) }
}

impl<K> Remove<K> for Find<K> where K: Eq {
    fn remove<V>(&self, map: &mut FifoMap<K, V>) -> Option<(K, V)> { map.remove_entry(&self.0) }
}

/// Picks an existing key by position, so removals rarely miss.
#[derive(Clone, Debug)]
struct Nth(usize);

impl Arbitrary for Nth {
    fn arbitrary(gen: &mut Gen) -> Self { Nth(usize::arbitrary(gen)) }
    fn shrink(&self) -> Box<dyn Iterator<Item=Self>> { Box::new(self.0.shrink().map(Nth)) }
}

impl<K> Remove<K> for Nth where K: Eq + Clone {
    fn remove<V>(&self, map: &mut FifoMap<K, V>) -> Option<(K, V)> {
        if map.is_empty() { return None; }
        let key = map.order_index().get(self.0 % map.len())?.clone();

        match map.entry(key) {
            map::Entry::Occupied(e) => Some(e.remove_entry()),
            map::Entry::Vacant(_) => None,
        }
    }
}

#[derive(Clone, Debug)]
struct First;

impl Arbitrary for First { fn arbitrary(_gen: &mut Gen) -> Self { First } }

impl<K> Remove<K> for First {
    fn remove<V>(&self, map: &mut FifoMap<K, V>) -> Option<(K, V)> { map.pop_first() }
}

#[derive(Clone, Debug)]
struct Last;

impl Arbitrary for Last { fn arbitrary(_gen: &mut Gen) -> Self { Last } }

impl<K> Remove<K> for Last {
    fn remove<V>(&self, map: &mut FifoMap<K, V>) -> Option<(K, V)> { map.pop_last() }
}

mod find {
    remove!{u8, u16, crate::Find<u8>}
}

mod nth {
    remove!{u32, u16, crate::Nth}
}

mod first {
    use fifo_map::FifoMap;
    use quickcheck::quickcheck;

    #[test]
    fn agrees_with_iter() {
        fn test(map: FifoMap<u32, u16>) -> bool {
            map.first_key_value() == map.iter().next()
        }

        quickcheck(test as fn(FifoMap<u32, u16>) -> bool);
    }

    remove!{u32, u16, crate::First}
}

mod last {
    use fifo_map::FifoMap;
    use quickcheck::quickcheck;

    #[test]
    fn agrees_with_iter() {
        fn test(map: FifoMap<u32, u16>) -> bool {
            map.last_key_value() == map.iter().next_back()
        }

        quickcheck(test as fn(FifoMap<u32, u16>) -> bool);
    }

    remove!{u32, u16, crate::Last}
}

#[quickcheck]
fn iterates_in_first_insertion_order(entries: Vec<(u8, u16)>) -> bool {
    let map: FifoMap<_, _> = entries.iter().cloned().collect();
    map.keys().cloned().collect::<Vec<_>>() == first_occurrences(&entries)
}

#[quickcheck]
fn insert_never_overwrites(entries: Vec<(u8, u16)>) -> bool {
    let map: FifoMap<_, _> = entries.iter().cloned().collect();

    map.iter().all(|(key, value)| entries.iter().find(|e| e.0 == *key).map(|e| &e.1) == Some(value))
}

#[quickcheck]
fn insert_or_assign_keeps_position(map: FifoMap<u8, u16>, key: u8, value: u16) -> bool {
    let mut updated = map.clone();
    let old = updated.insert_or_assign(key, value);

    match old {
        Some(old) =>
            map.get(&key) == Some(&old) &&
            updated.keys().eq(map.keys()) &&
            updated.get(&key) == Some(&value),
        None =>
            updated.keys().take(map.len()).eq(map.keys()) &&
            updated.last_key_value() == Some((&key, &value)),
    }
}

#[quickcheck]
fn reinsertion_moves_to_back(map: FifoMap<u8, u16>, key: u8, value: u16) -> bool {
    let mut map = map;
    map.remove(&key);
    map.insert(key, value);

    map.last_key_value() == Some((&key, &value)) && map.position_of(&key) == Some(map.len() - 1)
}

#[quickcheck]
fn lookups_do_not_register(map: FifoMap<u8, u16>, key: u8) -> bool {
    let before: Vec<u8> = map.order_index().iter().cloned().collect();
    let mut map = map;

    let _ = map.get(&key);
    let _ = map.contains_key(&key);
    let _ = map.count(&key);
    let _ = map.get_mut(&key);
    let _ = map.at(&key);
    let _ = map.lower_bound(&key).count();
    let _ = map.upper_bound(&key).count();
    let _ = map.equal_range(&key).count();

    map.order_index().iter().cloned().collect::<Vec<_>>() == before
}

#[quickcheck]
fn order_index_matches_iteration(map: FifoMap<u8, u16>) -> bool {
    map.keys().eq(map.order_index().iter()) &&
        map.keys().enumerate().all(|(i, key)| map.position_of(key) == Some(i))
}

#[quickcheck]
fn equality_ignores_order(entries: Vec<(u8, u16)>) -> bool {
    let forward: FifoMap<_, _> = entries.iter().cloned().collect();

    let mut reversed: FifoMap<u8, u16> = FifoMap::new();
    for key in first_occurrences(&entries).into_iter().rev() {
        reversed.insert(key, forward[&key]);
    }

    forward == reversed && forward.cmp(&reversed) == std::cmp::Ordering::Equal
}

#[quickcheck]
fn range_agrees_with_iter(map: FifoMap<u8, u16>, a: u8, b: u8, inc: (bool, bool)) -> TestResult {
    let min = if inc.0 { Bound::Included(&a) } else { Bound::Excluded(&a) };
    let max = if inc.1 { Bound::Included(&b) } else { Bound::Excluded(&b) };

    let keys: Vec<u8> = map.keys().cloned().collect();
    let position = |key: &u8| map.position_of(key).unwrap_or(keys.len());

    let lo = match min {
        Bound::Included(key) => position(key),
        Bound::Excluded(key) => (position(key) + 1).min(keys.len()),
        Bound::Unbounded => unreachable!(),
    };
    let hi = match max {
        Bound::Included(key) => (position(key) + 1).min(keys.len()),
        Bound::Excluded(key) => position(key),
        Bound::Unbounded => unreachable!(),
    };
    let expected: &[u8] = if lo < hi { &keys[lo..hi] } else { &[] };

    let range = map.range(min, max);
    let len = range.len();
    let found: Vec<u8> = range.map(|e| *e.0).collect();
    let found_rev: Vec<u8> = map.range(min, max).rev().map(|e| *e.0).collect();

    TestResult::from_bool(
        found == expected &&
        len == expected.len() &&
        found_rev.into_iter().rev().eq(expected.iter().cloned())
    )
}

#[quickcheck]
fn remove_range_removes_exactly_the_range(map: FifoMap<u8, u16>, a: u8, b: u8) -> bool {
    let expected: Vec<(u8, u16)> = map.range(Bound::Included(&a), Bound::Included(&b))
        .map(|(k, v)| (*k, *v))
        .collect();

    let mut removed = map.clone();
    let count = removed.remove_range(Bound::Included(&a), Bound::Included(&b));

    count == expected.len() &&
        removed.len() == map.len() - count &&
        map.iter().filter(|e| !expected.iter().any(|x| x.0 == *e.0)).eq(removed.iter())
}

#[quickcheck]
fn insert_range_registers_in_order(map: FifoMap<u8, u16>, entries: Vec<(u8, u16)>) -> bool {
    let mut bulk = map.clone();
    bulk.insert_range(entries.clone());

    let mut one_by_one = map;
    one_by_one.extend(entries);

    bulk.iter().eq(one_by_one.iter())
}

#[test]
fn set_iterates_in_first_insertion_order() {
    fn test(items: Vec<u8>) -> bool {
        let set: fifo_map::FifoSet<_> = items.iter().cloned().collect();
        let entries: Vec<(u8, ())> = items.into_iter().map(|i| (i, ())).collect();
        set.iter().cloned().eq(first_occurrences(&entries))
    }

    ::quickcheck::quickcheck(test as fn(Vec<u8>) -> bool);
}
