use compare::Compare;
use std::cmp::Ordering::*;
use std::collections::VecDeque;
use std::ops::Bound;
use self::visit::{Seen, Visit};
use super::{Link, Node};

pub trait NodeRef: Sized {
    type Key;
    type Item;
    fn key(&self) -> &Self::Key;
    fn item(self) -> Self::Item;
    fn left(&mut self) -> Option<Self>;
    fn right(&mut self) -> Option<Self>;
}

impl<'a, K, V> NodeRef for &'a Node<K, V> {
    type Key = K;
    type Item = (&'a K, &'a V);
    fn key(&self) -> &K { &self.key }
    fn item(self) -> (&'a K, &'a V) { (&self.key, &self.value) }
    fn left(&mut self) -> Option<&'a Node<K, V>> { self.left.as_deref() }
    fn right(&mut self) -> Option<&'a Node<K, V>> { self.right.as_deref() }
}

impl<K, V> NodeRef for Box<Node<K, V>> {
    type Key = K;
    type Item = (K, V);
    fn key(&self) -> &K { &self.key }
    fn item(self) -> (K, V) { let node = *self; (node.key, node.value) }
    fn left(&mut self) -> Link<K, V> { self.left.take() }
    fn right(&mut self) -> Link<K, V> { self.right.take() }
}

/// A node split into disjoint borrows of its key, value and children.
pub struct MutNode<'a, K: 'a, V: 'a> {
    key: &'a K,
    value: &'a mut V,
    left: Option<&'a mut Node<K, V>>,
    right: Option<&'a mut Node<K, V>>,
}

impl<'a, K, V> MutNode<'a, K, V> {
    pub fn new(node: &'a mut Node<K, V>) -> Self {
        let Node { left, right, key, value, .. } = node;
        MutNode { key: key, value: value, left: left.as_deref_mut(), right: right.as_deref_mut() }
    }
}

impl<'a, K, V> NodeRef for MutNode<'a, K, V> {
    type Key = K;
    type Item = (&'a K, &'a mut V);
    fn key(&self) -> &K { self.key }
    fn item(self) -> (&'a K, &'a mut V) { (self.key, self.value) }
    fn left(&mut self) -> Option<Self> { self.left.take().map(MutNode::new) }
    fn right(&mut self) -> Option<Self> { self.right.take().map(MutNode::new) }
}

#[derive(Clone)]
pub struct Iter<N> where N: NodeRef {
    visits: VecDeque<Visit<N>>,
    size: usize,
}

impl<N> Iter<N> where N: NodeRef {
    pub fn new(root: Option<N>, size: usize) -> Iter<N> {
        Iter { visits: root.into_iter().map(Visit::new).collect(), size: size }
    }

    /// Returns an iterator over the nodes whose keys lie between `min` and `max`.
    ///
    /// `size` must be the exact number of such nodes; the range must not be inverted.
    pub fn range<C, Q: ?Sized>(root: Option<N>, size: usize, cmp: &C,
                               min: Bound<&Q>, max: Bound<&Q>)
        -> Iter<N> where C: Compare<Q, N::Key> {

        fn bound_to_opt<T>(bound: Bound<T>) -> Option<(T, bool)> {
            match bound {
                Bound::Unbounded => None,
                Bound::Included(bound) => Some((bound, true)),
                Bound::Excluded(bound) => Some((bound, false)),
            }
        }

        enum Op<T> {
            PopPush(Option<T>, bool),
            Push(Option<T>),
        }

        let mut it = Iter::new(if size == 0 { None } else { root }, size);

        if let Some((min, inc)) = bound_to_opt(min) {
            loop {
                let op = match it.visits.back_mut() {
                    None => break,
                    Some(visit) => match cmp.compare(min, visit.key()) {
                        Equal =>
                            if inc {
                                visit.left();
                                break;
                            } else {
                                Op::PopPush(visit.right(), true)
                            },
                        Greater => Op::PopPush(visit.right(), false),
                        Less => Op::Push(visit.left()),
                    },
                };

                match op {
                    Op::Push(node_ref) => match node_ref {
                        None => break,
                        Some(node) => it.visits.push_back(Visit::new(node)),
                    },
                    Op::PopPush(node_ref, terminate) => {
                        it.visits.pop_back();
                        if let Some(node) = node_ref { it.visits.push_back(Visit::new(node)); }
                        if terminate { break; }
                    }
                }
            }
        }

        if let Some((max, inc)) = bound_to_opt(max) {
            loop {
                let op = match it.visits.front_mut() {
                    None => break,
                    Some(visit) => match cmp.compare(max, visit.key()) {
                        Equal =>
                            if inc {
                                visit.right();
                                break;
                            } else {
                                Op::PopPush(visit.left(), true)
                            },
                        Less => Op::PopPush(visit.left(), false),
                        Greater => Op::Push(visit.right()),
                    },
                };

                match op {
                    Op::Push(node_ref) => match node_ref {
                        None => break,
                        Some(node) => it.visits.push_front(Visit::new(node)),
                    },
                    Op::PopPush(node_ref, terminate) => {
                        it.visits.pop_front();
                        if let Some(node) = node_ref { it.visits.push_front(Visit::new(node)); }
                        if terminate { break; }
                    }
                }
            }
        }

        it
    }
}

impl<N> Iterator for Iter<N> where N: NodeRef {
    type Item = N::Item;

    fn next(&mut self) -> Option<N::Item> {
        loop {
            let op = match self.visits.back_mut() {
                None => return None,
                Some(visit) => match visit.seen() {
                    Seen::N | Seen::R => Op::Push(visit.left()),
                    Seen::L => Op::PopPush(visit.right()),
                    Seen::B => Op::Pop,
                }
            };

            match op {
                Op::Push(node_ref) =>
                    if let Some(node) = node_ref { self.visits.push_back(Visit::new(node)); },
                Op::PopPush(node_ref) => {
                    let visit = self.visits.pop_back()?;
                    self.size -= 1;
                    if let Some(node) = node_ref { self.visits.push_back(Visit::new(node)); }
                    return Some(visit.item());
                }
                Op::Pop => {
                    let visit = self.visits.pop_back()?;
                    self.size -= 1;
                    return Some(visit.item());
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.size, Some(self.size)) }
}

impl<N> DoubleEndedIterator for Iter<N> where N: NodeRef {
    fn next_back(&mut self) -> Option<N::Item> {
        loop {
            let op = match self.visits.front_mut() {
                None => return None,
                Some(visit) => match visit.seen() {
                    Seen::N | Seen::L => Op::Push(visit.right()),
                    Seen::R => Op::PopPush(visit.left()),
                    Seen::B => Op::Pop,
                }
            };

            match op {
                Op::Push(node_ref) =>
                    if let Some(node) = node_ref { self.visits.push_front(Visit::new(node)); },
                Op::PopPush(node_ref) => {
                    let visit = self.visits.pop_front()?;
                    self.size -= 1;
                    if let Some(node) = node_ref { self.visits.push_front(Visit::new(node)); }
                    return Some(visit.item());
                }
                Op::Pop => {
                    let visit = self.visits.pop_front()?;
                    self.size -= 1;
                    return Some(visit.item());
                }
            }
        }
    }
}

impl<N> ExactSizeIterator for Iter<N> where N: NodeRef {}

mod visit {
    #[derive(Clone)]
    pub struct Visit<N> where N: super::NodeRef {
        node: N,
        seen: Seen,
    }

    impl<N> Visit<N> where N: super::NodeRef {
        pub fn new(node: N) -> Visit<N> { Visit { node: node, seen: Seen::N } }

        pub fn left(&mut self) -> Option<N> {
            match self.seen {
                Seen::N => { self.seen = Seen::L; self.node.left() }
                Seen::R => { self.seen = Seen::B; self.node.left() }
                Seen::L | Seen::B => None,
            }
        }

        pub fn right(&mut self) -> Option<N> {
            match self.seen {
                Seen::N => { self.seen = Seen::R; self.node.right() }
                Seen::L => { self.seen = Seen::B; self.node.right() }
                Seen::R | Seen::B => None,
            }
        }

        pub fn key(&self) -> &N::Key { self.node.key() }

        pub fn item(self) -> N::Item { self.node.item() }

        pub fn seen(&self) -> Seen { self.seen }
    }

    #[derive(Clone, Copy)]
    pub enum Seen {
        N,
        L,
        R,
        B,
    }
}

enum Op<T> {
    Push(Option<T>),
    PopPush(Option<T>),
    Pop,
}
