//! Arena-based balanced trees and heaps.
//!
//! Two independent containers:
//!
//! - **AVL tree** ([`avl::AvlTree`]): an ordered set of distinct keys kept
//!   height-balanced by single and double rotations. Nodes live in a dense
//!   `Vec` arena. Child links (`l` / `r`) are owning `Option<u32>` indices,
//!   and the parent link (`p`) is a non-owning index used for upward height
//!   propagation.
//! - **Median tracker** ([`heap::MedianTracker`]): a max-heap of the lower
//!   half and a min-heap of the upper half, sized within one of each other,
//!   answering the running median in O(1).
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] / [`KeyNode`] arena link traits, comparator |
//! [`util`] | traversal (`first`, `next`, …), `find`, slot reclamation |
//! [`avl`] | height bookkeeping, rotations, insert / remove, [`AvlTree`] |
//! [`heap`] | `fixup` / `fixdown` primitives, [`Heap`], [`MedianTracker`] |
//! [`print`] | tree-dump rendering used by the debug printers |
//! [`error`] | [`ForestError`] |
//!
//! # Example
//!
//! ```
//! use balance_forest::{AvlTree, MedianTracker};
//!
//! let mut tree = AvlTree::new();
//! for k in [3, 1, 2] {
//!     tree.insert(k).unwrap();
//! }
//! assert_eq!(tree.root_key(), Some(&2));
//! assert!(tree.delete(&1));
//! assert!(!tree.delete(&1));
//!
//! let mut median = MedianTracker::new();
//! median.extend([5, 1, 9, 7]);
//! assert_eq!(median.current_median().unwrap(), 6.0);
//! ```

pub mod avl;
pub mod error;
pub mod heap;
pub mod print;
pub mod types;
pub mod util;

pub use avl::{AvlNode, AvlTree, NodeSnapshot, Side, TreeStats};
pub use error::{ForestError, Result};
pub use heap::{Heap, HeapKind, Median, MedianTracker};
pub use types::{KeyNode, Node};
