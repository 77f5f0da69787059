use serde::{Deserialize, Serialize};

use crate::types::{KeyNode, Node};

/// Arena slot of an AVL tree.
#[derive(Clone, Debug)]
pub struct AvlNode<K> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: K,
    /// Subtree height; a childless node is 0, an empty subtree is -1.
    pub h: i32,
}

impl<K> AvlNode<K> {
    pub fn new(k: K) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            h: 0,
        }
    }
}

impl<K> Node for AvlNode<K> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}

impl<K> KeyNode<K> for AvlNode<K> {
    fn key(&self) -> &K {
        &self.k
    }

    fn key_mut(&mut self) -> &mut K {
        &mut self.k
    }
}

/// AVL-specific node behavior.
pub trait AvlNodeLike<K>: KeyNode<K> {
    fn height(&self) -> i32;
    fn set_height(&mut self, h: i32);
}

impl<K> AvlNodeLike<K> for AvlNode<K> {
    fn height(&self) -> i32 {
        self.h
    }

    fn set_height(&mut self, h: i32) {
        self.h = h;
    }
}

/// Which child slot of its parent a node occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Root,
    Left,
    Right,
}

/// One row of a pre-order tree dump.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot<K> {
    pub key: K,
    pub height: i32,
    pub parent: Option<K>,
    pub side: Side,
}

/// Cumulative rebalancing counters of a tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Tri-node restructures (one per single or double rotation case).
    pub restructures: u64,
    /// Primitive single rotations; a double rotation counts two.
    pub rotations: u64,
}
