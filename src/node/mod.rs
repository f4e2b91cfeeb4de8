//! An AA tree whose operations take the comparator as an argument.

mod iter;


use compare::Compare;
use std::cmp::Ordering::*;
use std::mem::{replace, swap};

pub use self::iter::{Iter, MutNode, NodeRef};

pub type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Clone)]
pub struct Node<K, V> {
    left: Link<K, V>,
    right: Link<K, V>,
    level: usize,
    key: K,
    value: V,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Node { left: None, right: None, level: 1, key: key, value: value }
    }

    pub fn key_value(&self) -> (&K, &V) { (&self.key, &self.value) }

    // Remove left horizontal link by rotating right
    //
    // From https://github.com/Gankro/collect-rs/tree/map.rs
    fn skew(node: &mut Box<Self>) {
        if !node.left.as_ref().is_some_and(|x| x.level == node.level) { return; }

        if let Some(mut save) = node.left.take() {
            swap(&mut node.left, &mut save.right); // save.right now None
            swap(node, &mut save);
            node.right = Some(save);
        }
    }

    // Remove dual horizontal link by rotating left and increasing level of
    // the parent
    //
    // From https://github.com/Gankro/collect-rs/tree/map.rs
    fn split(node: &mut Box<Self>) {
        let level = node.level;
        if !node.right.as_ref().is_some_and(|x| x.right.as_ref().is_some_and(|y| y.level == level)) {
            return;
        }

        if let Some(mut save) = node.right.take() {
            swap(&mut node.right, &mut save.left); // save.left now None
            save.level += 1;
            swap(node, &mut save);
            node.left = Some(save);
        }
    }
}

/// Inserts the entry unless the tree already holds an equal key, in which case the tree is left
/// untouched. Returns `true` if the entry was inserted.
pub fn insert<K, V, C>(link: &mut Link<K, V>, cmp: &C, key: K, value: V) -> bool
    where C: Compare<K> {

    match *link {
        None => {
            *link = Some(Box::new(Node::new(key, value)));
            true
        }
        Some(ref mut node) => {
            let inserted = match cmp.compare(&key, &node.key) {
                Equal => return false,
                Less => insert(&mut node.left, cmp, key, value),
                Greater => insert(&mut node.right, cmp, key, value),
            };

            if inserted {
                Node::skew(node);
                Node::split(node);
            }

            inserted
        }
    }
}

pub fn get<'a, K, V, C, Q: ?Sized>(mut link: &'a Link<K, V>, cmp: &C, key: &Q)
    -> Option<&'a Node<K, V>> where C: Compare<Q, K> {

    while let Some(node) = link {
        match cmp.compare(key, &node.key) {
            Equal => return Some(&**node),
            Less => link = &node.left,
            Greater => link = &node.right,
        }
    }

    None
}

pub fn get_mut<'a, K, V, C, Q: ?Sized>(mut link: &'a mut Link<K, V>, cmp: &C, key: &Q)
    -> Option<(&'a K, &'a mut V)> where C: Compare<Q, K> {

    loop {
        match link {
            None => return None,
            Some(node) => {
                let node = &mut **node;
                match cmp.compare(key, &node.key) {
                    Equal => return Some((&node.key, &mut node.value)),
                    Less => link = &mut node.left,
                    Greater => link = &mut node.right,
                }
            }
        }
    }
}

/// Removes the entry whose key compares equal to the given key.
pub fn remove<K, V, C, Q: ?Sized>(link: &mut Link<K, V>, cmp: &C, key: &Q) -> Option<(K, V)>
    where C: Compare<Q, K> {

    let node = link.as_mut()?;

    let key_value = match cmp.compare(key, &node.key) {
        Less => remove(&mut node.left, cmp, key)?,
        Greater => remove(&mut node.right, cmp, key)?,
        Equal => {
            let replacement = if node.left.is_some() {
                Right::remove_extremum(&mut node.left)
            } else {
                Left::remove_extremum(&mut node.right)
            };

            match replacement {
                Some((k, v)) => (replace(&mut node.key, k), replace(&mut node.value, v)),
                None => return link.take().map(|node| { let node = *node; (node.key, node.value) }),
            }
        }
    };

    if let Some(node) = link.as_mut() { rebalance(node); }
    Some(key_value)
}

fn rebalance<K, V>(save: &mut Box<Node<K, V>>) {
    let left_level = save.left.as_ref().map_or(0, |node| node.level);
    let right_level = save.right.as_ref().map_or(0, |node| node.level);

    // re-balance, if necessary
    if left_level < save.level - 1 || right_level < save.level - 1 {
        save.level -= 1;

        if right_level > save.level {
            let save_level = save.level;
            if let Some(ref mut x) = save.right { x.level = save_level; }
        }

        Node::skew(save);

        if let Some(ref mut right) = save.right {
            Node::skew(right);
            if let Some(ref mut x) = right.right { Node::skew(x); };
        }

        Node::split(save);
        if let Some(ref mut x) = save.right { Node::split(x); }
    }
}

pub trait Dir: Sized {
    type Opposite: Dir<Opposite=Self>;

    fn forward<K, V>(node: &Node<K, V>) -> &Link<K, V>;
    fn forward_mut<K, V>(node: &mut Node<K, V>) -> &mut Link<K, V>;

    fn extremum<K, V>(link: &Link<K, V>) -> Option<&Node<K, V>> {
        let mut node = link.as_deref()?;
        while let Some(next) = Self::forward(node).as_deref() { node = next; }
        Some(node)
    }

    fn remove_extremum<K, V>(link: &mut Link<K, V>) -> Option<(K, V)> {
        match *link {
            Some(ref mut node) if Self::forward(node).is_some() => {
                let key_value = Self::remove_extremum(Self::forward_mut(node));
                rebalance(node);
                key_value
            }
            _ => link.take().map(|node| {
                let mut node = *node;
                *link = Self::Opposite::forward_mut(&mut node).take();
                (node.key, node.value)
            }),
        }
    }
}

pub enum Left {}

impl Dir for Left {
    type Opposite = Right;

    fn forward<K, V>(node: &Node<K, V>) -> &Link<K, V> { &node.left }
    fn forward_mut<K, V>(node: &mut Node<K, V>) -> &mut Link<K, V> { &mut node.left }
}

pub enum Right {}

impl Dir for Right {
    type Opposite = Left;

    fn forward<K, V>(node: &Node<K, V>) -> &Link<K, V> { &node.right }
    fn forward_mut<K, V>(node: &mut Node<K, V>) -> &mut Link<K, V> { &mut node.right }
}
