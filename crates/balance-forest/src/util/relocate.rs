use crate::types::Node;

use super::{get_l, get_p, get_r, replace_child, set_p};

/// Re-points every link that referenced slot `from` at slot `to`.
///
/// Call after the node formerly stored at `from` has been moved to `to`
/// (e.g. by [`Vec::swap_remove`]). Returns the root, which changes only if the
/// moved node was the root.
pub fn relocate<N: Node>(arena: &mut [N], root: Option<u32>, from: u32, to: u32) -> Option<u32> {
    if from == to {
        return root;
    }

    let p = get_p(arena, to);
    replace_child(arena, p, from, Some(to));
    if let Some(l) = get_l(arena, to) {
        set_p(arena, l, Some(to));
    }
    if let Some(r) = get_r(arena, to) {
        set_p(arena, r, Some(to));
    }

    if root == Some(from) {
        Some(to)
    } else {
        root
    }
}

/// Frees the arena slot of a detached node and returns it by value.
///
/// The node at `idx` must already be unlinked from the tree. The last slot is
/// moved into the hole so the arena stays dense. Returns the node together
/// with the (possibly re-indexed) root.
pub fn vacate<N: Node>(arena: &mut Vec<N>, root: Option<u32>, idx: u32) -> (N, Option<u32>) {
    let removed = arena.swap_remove(idx as usize);
    let moved_from = arena.len() as u32;
    let root = if idx < moved_from {
        relocate(arena, root, moved_from, idx)
    } else {
        root
    };
    (removed, root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avl::AvlNode;

    fn node(k: i32, p: Option<u32>, l: Option<u32>, r: Option<u32>) -> AvlNode<i32> {
        let mut n = AvlNode::new(k);
        n.p = p;
        n.l = l;
        n.r = r;
        n
    }

    #[test]
    fn vacate_moves_last_slot_into_hole() {
        // Slot 1 (key 9) is detached; slot 3 (key 3) is the right child of
        // slot 2 and moves into slot 1.
        let mut arena = vec![
            node(5, None, Some(2), None),
            node(9, None, None, None),
            node(2, Some(0), None, Some(3)),
            node(3, Some(2), None, None),
        ];
        let (removed, root) = vacate(&mut arena, Some(0), 1);
        assert_eq!(removed.k, 9);
        assert_eq!(root, Some(0));
        assert_eq!(arena.len(), 3);
        assert_eq!(arena[1].k, 3);
        assert_eq!(arena[2].r, Some(1));
        assert_eq!(arena[1].p, Some(2));
    }

    #[test]
    fn relocating_the_root_updates_it() {
        let mut arena = vec![node(1, Some(1), None, None), node(2, None, Some(0), None)];
        let root = relocate(&mut arena, Some(7), 7, 1);
        assert_eq!(root, Some(1));
        assert_eq!(arena[0].p, Some(1));
    }

    #[test]
    fn vacating_the_last_slot_moves_nothing() {
        let mut arena = vec![node(1, None, None, None), node(2, None, None, None)];
        let (removed, root) = vacate(&mut arena, Some(0), 1);
        assert_eq!(removed.k, 2);
        assert_eq!(root, Some(0));
        assert_eq!(arena.len(), 1);
    }
}
