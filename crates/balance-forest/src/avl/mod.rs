//! Height-tracking AVL tree over an index arena.

#[path = "AvlTree.rs"]
pub mod avl_tree;
pub mod types;
pub mod util;

pub use avl_tree::AvlTree;
pub use types::{AvlNode, AvlNodeLike, NodeSnapshot, Side, TreeStats};
pub use util::{
    assert_avl_tree, insert, print, remove, restructure, rotate_left, rotate_right, RotationCase,
};
