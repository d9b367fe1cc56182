use std::{
    borrow::Borrow,
    cmp::Ordering,
    mem,
    ops::Deref,
};

use log::{debug, warn};
use rand::Rng;

use crate::depth::Depth;
use crate::error::LlrbError;
use crate::node::{self, Color, Direction, Node};

/// Llrb manage a single instance of in-memory ordered key-value
/// container using [left-leaning-red-black][llrb] tree.
///
/// Search, insert and delete are O(log n). Keys need a total order,
/// values are opaque to the tree. An instance is a plain mutable
/// structure, callers sharing it across threads must guard the whole
/// handle with a single exclusive lock.
///
/// [llrb]: https://sedgewick.io/wp-content/themes/sedgewick/papers/2008LLRB.pdf
#[derive(Clone)]
pub struct Llrb<K, V> {
    root: Option<Box<Node<K, V>>>,
    n_count: usize, // number of entries in the tree.
}

impl<K, V> Default for Llrb<K, V>
where
    K: Ord,
{
    fn default() -> Llrb<K, V> {
        Llrb::new()
    }
}

impl<K, V> Llrb<K, V>
where
    K: Ord,
{
    /// Create an empty instance of Llrb.
    pub fn new() -> Llrb<K, V> {
        Llrb {
            root: Default::default(),
            n_count: Default::default(),
        }
    }
}

/// Maintenance API.
impl<K, V> Llrb<K, V>
where
    K: Ord,
{
    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Return quickly with basic statisics, only entries() and
    /// node_size() are valid with this statisics.
    pub fn stats(&self) -> Stats {
        Stats::new(self.n_count, mem::size_of::<Node<K, V>>())
    }

    #[inline]
    fn root_deref(&self) -> Option<&Node<K, V>> {
        self.root.as_ref().map(Deref::deref)
    }
}

type Insert<K, V> = (Box<Node<K, V>>, Option<V>);

type Delete<K, V> = (Option<Box<Node<K, V>>>, Option<V>);

type Delmin<K, V> = (Option<Box<Node<K, V>>>, Option<Box<Node<K, V>>>);

/// Write operations on Llrb instance.
impl<K, V> Llrb<K, V>
where
    K: Ord,
{
    /// Create a new {key, value} entry in the index. If key is already
    /// present return error and leave the entry untouched.
    pub fn create(&mut self, key: K, value: V) -> Result<(), LlrbError<K>> {
        if Llrb::search(self.root_deref(), &key).is_some() {
            debug!("create(): key already present");
            return Err(LlrbError::OverwriteKey(key));
        }
        self.set(key, value);
        Ok(())
    }

    /// Set value for key. If there is an existing entry for key,
    /// overwrite the old value with new value and return the old value.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let (mut root, old_value) = Llrb::insert(self.root.take(), key, value);
        root.set_color(Color::Black);
        self.root = Some(root);
        if old_value.is_none() {
            self.n_count += 1;
        }
        old_value
    }

    /// Delete key from this instance and return its value. If key is
    /// not present, including on an empty tree, delete is a no-op and
    /// the tree is left untouched.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if Llrb::search(self.root_deref(), key).is_none() {
            debug!("delete(): key missing, no-op");
            return None;
        }

        let (root, old_value) = Llrb::do_delete(self.root.take(), key);
        self.root = root.map(|mut root| {
            root.set_color(Color::Black);
            root
        });
        if old_value.is_some() {
            self.n_count -= 1;
        }
        old_value
    }
}

/// Validation API.
impl<K, V> Llrb<K, V>
where
    K: Clone + Ord,
{
    /// Validate LLRB tree with following rules:
    ///
    /// * Root is always black.
    /// * Red links only lean left.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Make sure keys are in sorted order.
    ///
    /// Additionally return full statistics on the tree. Refer to [`Stats`]
    /// for more information.
    pub fn validate(&self) -> Result<Stats, LlrbError<K>> {
        let root = self.root_deref();
        let res = if node::is_red(root) {
            Err(LlrbError::RedRoot)
        } else {
            let mut stats = Stats::new(self.n_count, mem::size_of::<Node<K, V>>());
            stats.set_depths(Depth::new());
            Llrb::validate_tree(root, false, 0, 0, &mut stats).map(|blacks| {
                stats.set_blacks(blacks);
                stats
            })
        };
        if res.is_err() {
            warn!("validate(): broken invariant with {} entries", self.n_count);
        }
        res
    }

    fn validate_tree(
        node: Option<&Node<K, V>>,
        fromred: bool,
        mut nb: usize,
        depth: usize,
        stats: &mut Stats,
    ) -> Result<usize, LlrbError<K>> {
        let node = match node {
            None => {
                if let Some(depths) = stats.depths.as_mut() {
                    depths.sample(depth);
                }
                return Ok(nb);
            }
            Some(node) => node,
        };

        let red = node.color() == Color::Red;
        if fromred && red {
            return Err(LlrbError::ConsecutiveReds);
        }
        if node::is_red(node.right_deref()) {
            return Err(LlrbError::RightLeaningRed);
        }
        if !red {
            nb += 1;
        }
        let (left, right) = (node.left_deref(), node.right_deref());
        let lblacks = Llrb::validate_tree(left, red, nb, depth + 1, stats)?;
        let rblacks = Llrb::validate_tree(right, red, nb, depth + 1, stats)?;
        if lblacks != rblacks {
            return Err(LlrbError::UnbalancedBlacks {
                left: lblacks,
                right: rblacks,
            });
        }
        if let Some(left) = left {
            if left.key.ge(&node.key) {
                return Err(LlrbError::SortError(left.key.clone(), node.key.clone()));
            }
        }
        if let Some(right) = right {
            if right.key.le(&node.key) {
                return Err(LlrbError::SortError(right.key.clone(), node.key.clone()));
            }
        }
        Ok(lblacks)
    }
}

/// Read operations on Llrb instance.
impl<K, V> Llrb<K, V>
where
    K: Ord,
{
    /// Get a copy of the value for key.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        V: Clone,
    {
        Llrb::search(self.root_deref(), key).cloned()
    }

    /// Check whether key is present in this instance.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Llrb::search(self.root_deref(), key).is_some()
    }

    /// Return a random entry from this index.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        let mut nref = self.root_deref()?;

        let mut at_depth = rng.gen::<u8>() % 40;
        loop {
            let next = match rng.gen::<u8>() % 2 {
                0 => nref.left_deref(),
                _ => nref.right_deref(),
            };
            match next {
                Some(next) if at_depth > 0 => {
                    at_depth -= 1;
                    nref = next;
                }
                _ => break Some((nref.key.clone(), nref.value.clone())),
            }
        }
    }

    /// Return all entries in sort order.
    #[cfg(test)]
    pub(crate) fn to_vec(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        fn walk<K: Clone, V: Clone>(node: Option<&Node<K, V>>, acc: &mut Vec<(K, V)>) {
            if let Some(node) = node {
                walk(node.left_deref(), acc);
                acc.push((node.key.clone(), node.value.clone()));
                walk(node.right_deref(), acc);
            }
        }

        let mut acc = Vec::with_capacity(self.n_count);
        walk(self.root_deref(), &mut acc);
        acc
    }
}

impl<K, V> Llrb<K, V>
where
    K: Ord,
{
    fn search<'a, Q>(root: Option<&'a Node<K, V>>, key: &Q) -> Option<&'a V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = root;
        while let Some(nref) = node {
            node = match nref.key.borrow().cmp(key) {
                Ordering::Less => nref.right_deref(),
                Ordering::Greater => nref.left_deref(),
                Ordering::Equal => return Some(&nref.value),
            };
        }
        None
    }

    fn search_min(root: &mut Node<K, V>) -> &mut Node<K, V> {
        let mut node = root;
        while node[Direction::Left].is_some() {
            node = match node[Direction::Left].as_mut() {
                Some(left) => &mut **left,
                None => unreachable!(),
            };
        }
        node
    }

    fn insert(node: Option<Box<Node<K, V>>>, key: K, value: V) -> Insert<K, V> {
        let mut node = match node {
            None => return (Node::new(key, value), None),
            Some(node) => node,
        };

        let old_value = match node.key.cmp(&key) {
            Ordering::Equal => Some(node.set_value(value)),
            ord => {
                let dir = match ord {
                    Ordering::Greater => Direction::Left,
                    _ => Direction::Right,
                };
                let (child, old_value) = Llrb::insert(node[dir].take(), key, value);
                node[dir] = Some(child);
                old_value
            }
        };
        (node::fixup(node), old_value)
    }

    // Top-down delete, key must be present in the sub-tree. Never
    // descend into a black node with only black children, borrowing a
    // red link from the sibling side on the way down.
    fn do_delete<Q>(node: Option<Box<Node<K, V>>>, key: &Q) -> Delete<K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = match node {
            None => return (None, None),
            Some(node) => node,
        };

        if node.key.borrow().gt(key) {
            let left = node.left_deref();
            if !node::is_red(left) && !node::is_red(left.and_then(Node::left_deref)) {
                node = node::move_red_left(node);
            }
            let (left, old_value) = Llrb::do_delete(node[Direction::Left].take(), key);
            node[Direction::Left] = left;
            return (Some(node::fixup(node)), old_value);
        }

        if node::is_red(node.left_deref()) {
            node = node::rotate(node, Direction::Right);
        }

        if !node.key.borrow().lt(key) && node[Direction::Right].is_none() {
            return (None, Some(node.value));
        }

        let right = node.right_deref();
        let ok = right.is_some() && !node::is_red(right);
        if ok && !node::is_red(right.and_then(Node::left_deref)) {
            node = node::move_red_right(node);
        }

        if !node.key.borrow().lt(key) {
            // swap entry with its in-order successor, then detach the
            // successor position which now holds this entry.
            let mut right = match node[Direction::Right].take() {
                Some(right) => right,
                None => panic!("do_delete(): missing successor, call the programmer"),
            };
            let min = Llrb::search_min(&mut right);
            mem::swap(&mut node.key, &mut min.key);
            mem::swap(&mut node.value, &mut min.value);

            let (right, detached) = Llrb::delete_min(Some(right));
            node[Direction::Right] = right;
            (Some(node::fixup(node)), detached.map(|n| n.value))
        } else {
            let (right, old_value) = Llrb::do_delete(node[Direction::Right].take(), key);
            node[Direction::Right] = right;
            (Some(node::fixup(node)), old_value)
        }
    }

    // Remove the leftmost node, returning the new subtree root and the
    // detached node.
    fn delete_min(node: Option<Box<Node<K, V>>>) -> Delmin<K, V> {
        let mut node = match node {
            None => return (None, None),
            Some(node) => node,
        };
        if node[Direction::Left].is_none() {
            return (None, Some(node));
        }
        let left = node.left_deref();
        if !node::is_red(left) && !node::is_red(left.and_then(Node::left_deref)) {
            node = node::move_red_left(node);
        }
        let (left, detached) = Llrb::delete_min(node[Direction::Left].take());
        node[Direction::Left] = left;
        (Some(node::fixup(node)), detached)
    }
}

/// Statistics on [`Llrb`] tree. Serves two purpose:
///
/// * To get partial but quick statistics via [`Llrb::stats`] method.
/// * To get full statisics via [`Llrb::validate`] method.
#[derive(Default, Debug)]
pub struct Stats {
    entries: usize, // number of entries in the tree.
    node_size: usize,
    blacks: Option<usize>,
    depths: Option<Depth>,
}

impl Stats {
    fn new(entries: usize, node_size: usize) -> Stats {
        Stats {
            entries,
            node_size,
            blacks: Default::default(),
            depths: Default::default(),
        }
    }

    #[inline]
    fn set_blacks(&mut self, blacks: usize) {
        self.blacks = Some(blacks)
    }

    #[inline]
    fn set_depths(&mut self, depths: Depth) {
        self.depths = Some(depths)
    }

    /// Return number entries in [`Llrb`] instance.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return node-size, including over-head for `Llrb<k,V>`. Although
    /// the node overhead is constant, the node size varies based on
    /// key and value types.
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return number of black links from root to any absent child.
    /// Available only from [`Llrb::validate`].
    #[inline]
    pub fn blacks(&self) -> Option<usize> {
        self.blacks
    }

    /// Return [`Depth`] statistics, available only from
    /// [`Llrb::validate`] on a non-empty tree.
    pub fn depths(&self) -> Option<Depth> {
        match &self.depths {
            Some(depths) if depths.samples() > 0 => Some(depths.clone()),
            _ => None,
        }
    }
}
