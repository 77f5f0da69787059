use std::fmt::Debug;

use serde::Serialize;

use crate::error::Result;
use crate::types::default_comparator;
use crate::util::{first, last, next, size};

use super::types::{AvlNode, NodeSnapshot, TreeStats};
use super::util::{assert_avl_tree, insert, print, remove, snapshot};

/// Ordered set of distinct keys kept height-balanced.
///
/// Nodes live in a dense arena; child links own, the parent link does not.
/// Removing a key frees exactly one arena slot.
pub struct AvlTree<K, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    root: Option<u32>,
    comparator: C,
    arena: Vec<AvlNode<K>>,
    stats: TreeStats,
}

impl<K> AvlTree<K, fn(&K, &K) -> i32>
where
    K: Ord,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K> Default for AvlTree<K, fn(&K, &K) -> i32>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C> AvlTree<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            comparator,
            arena: Vec::new(),
            stats: TreeStats::default(),
        }
    }

    /// Inserts `key`, returning the arena index of its node.
    ///
    /// The index stays valid until the next removal, which may move one node
    /// into the freed slot.
    ///
    /// Fails with [`crate::ForestError::DuplicateKey`] if the key is present; the
    /// tree is left as it was.
    pub fn insert(&mut self, key: K) -> Result<u32> {
        let (root, idx) = insert(
            &mut self.arena,
            self.root,
            AvlNode::new(key),
            &self.comparator,
            &mut self.stats,
        )?;
        self.root = Some(root);
        self.debug_check();
        Ok(idx)
    }

    /// Removes `key` and hands it back.
    pub fn take(&mut self, key: &K) -> Result<K> {
        let (node, root) = remove(
            &mut self.arena,
            self.root,
            key,
            &self.comparator,
            &mut self.stats,
        )?;
        self.root = root;
        self.debug_check();
        Ok(node.k)
    }

    /// Removes `key`. Returns `false`, leaving the tree untouched, if absent.
    pub fn delete(&mut self, key: &K) -> bool {
        self.take(key).is_ok()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    fn find(&self, key: &K) -> Option<u32> {
        crate::util::find(&self.arena, self.root, key, &self.comparator)
    }

    /// Smallest key.
    pub fn first(&self) -> Option<&K> {
        first(&self.arena, self.root).map(|i| self.key_at(i))
    }

    /// Largest key.
    pub fn last(&self) -> Option<&K> {
        last(&self.arena, self.root).map(|i| self.key_at(i))
    }

    pub fn root_key(&self) -> Option<&K> {
        self.root.map(|i| self.key_at(i))
    }

    /// Key stored at an index returned by [`AvlTree::insert`], or `None` once
    /// a removal has shrunk the arena past it.
    pub fn key(&self, idx: u32) -> Option<&K> {
        self.arena.get(idx as usize).map(|n| &n.k)
    }

    fn key_at(&self, idx: u32) -> &K {
        &self.arena[idx as usize].k
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the whole tree; -1 when empty.
    pub fn height(&self) -> i32 {
        self.root.map_or(-1, |i| self.arena[i as usize].h)
    }

    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.arena.clear();
    }

    /// Visits keys in ascending order.
    pub fn for_each<G: FnMut(&K)>(&self, mut f: G) {
        let mut curr = first(&self.arena, self.root);
        while let Some(i) = curr {
            f(self.key_at(i));
            curr = next(&self.arena, i);
        }
    }

    pub fn assert_valid(&self) -> std::result::Result<(), String> {
        assert_avl_tree(&self.arena, self.root, &self.comparator)?;
        let reachable = size(&self.arena, self.root);
        if reachable != self.arena.len() {
            return Err(format!(
                "Arena holds {} nodes but {reachable} are reachable",
                self.arena.len()
            ));
        }
        Ok(())
    }

    #[inline]
    fn debug_check(&self) {
        if cfg!(debug_assertions) {
            if let Err(err) = self.assert_valid() {
                panic!("AVL invariant broken: {err}");
            }
        }
    }
}

impl<K: Clone, C> AvlTree<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    /// Pre-order dump of every node.
    pub fn snapshot(&self) -> Vec<NodeSnapshot<K>> {
        snapshot(&self.arena, self.root)
    }

    /// Keys in ascending order.
    pub fn to_vec(&self) -> Vec<K> {
        let mut out = Vec::with_capacity(self.len());
        self.for_each(|k| out.push(k.clone()));
        out
    }
}

impl<K: Clone + Serialize, C> AvlTree<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    /// Pre-order dump as JSON.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self.snapshot())
    }
}

impl<K: Debug, C> AvlTree<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn print(&self) -> String {
        print(&self.arena, self.root, "")
    }
}

impl<K: Debug, C> Debug for AvlTree<K, C>
where
    C: Fn(&K, &K) -> i32,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.print())
    }
}
