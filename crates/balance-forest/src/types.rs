//! Node trait definitions.
//!
//! Nodes live in a caller-owned `Vec<N>` arena. Each "pointer" is an
//! `Option<u32>` index into that arena: `l` / `r` are the owning child links,
//! `p` is the non-owning back-link to the parent. All tree-manipulation
//! functions take the arena as `&mut [N]` (or `&mut Vec<N>` when they need
//! to shrink it) and work with indices.

/// Binary-tree links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Keyed node interface used by ordered trees.
pub trait KeyNode<K>: Node {
    fn key(&self) -> &K;
    fn key_mut(&mut self) -> &mut K;
}

/// Default comparator for totally ordered keys.
///
/// Comparators return a negative number when `a < b`, zero when equal, and a
/// positive number when `a > b`.
pub fn default_comparator<K: Ord>(a: &K, b: &K) -> i32 {
    match a.cmp(b) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}
