use std::cmp::Ordering;
use std::fmt::Debug;

use tracing::{debug, trace};

use crate::error::{ForestError, Result};
use crate::print::{render_node, Subtree};
use crate::types::KeyNode;
use crate::util::{
    find, first, get_l, get_p, get_r, next, replace_child, set_l, set_p, set_r, vacate,
};

use super::types::{AvlNodeLike, NodeSnapshot, Side, TreeStats};

/// The four classical rebalancing shapes, named by the path from the
/// unbalanced node to its taller grandchild.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationCase {
    LeftLeft,
    LeftRight,
    RightRight,
    RightLeft,
}

impl RotationCase {
    /// Number of primitive rotations the case performs.
    pub fn rotations(self) -> u64 {
        match self {
            RotationCase::LeftLeft | RotationCase::RightRight => 1,
            RotationCase::LeftRight | RotationCase::RightLeft => 2,
        }
    }
}

/// Height of a possibly empty subtree; the empty subtree is -1.
#[inline]
pub fn height<K, N>(arena: &[N], node: Option<u32>) -> i32
where
    N: AvlNodeLike<K>,
{
    node.map_or(-1, |i| arena[i as usize].height())
}

/// Recomputes the stored height of `i` from its children.
#[inline]
pub fn update_height<K, N>(arena: &mut [N], i: u32)
where
    N: AvlNodeLike<K>,
{
    let h = 1 + height(arena, get_l(arena, i)).max(height(arena, get_r(arena, i)));
    arena[i as usize].set_height(h);
}

/// `height(left) - height(right)`.
#[inline]
pub fn balance_factor<K, N>(arena: &[N], i: u32) -> i32
where
    N: AvlNodeLike<K>,
{
    height(arena, get_l(arena, i)) - height(arena, get_r(arena, i))
}

#[inline]
fn is_unbalanced<K, N>(arena: &[N], i: u32) -> bool
where
    N: AvlNodeLike<K>,
{
    balance_factor(arena, i).abs() > 1
}

/// Right rotation around `z`; its left child becomes the subtree root.
///
/// Returns the new subtree root. The grandparent's child slot is re-pointed.
pub fn rotate_right<K, N>(arena: &mut [N], z: u32) -> u32
where
    N: AvlNodeLike<K>,
{
    let y = get_l(arena, z).expect("right rotation needs a left child");
    let p = get_p(arena, z);
    let t = get_r(arena, y);

    set_l(arena, z, t);
    if let Some(t) = t {
        set_p(arena, t, Some(z));
    }
    set_r(arena, y, Some(z));
    set_p(arena, z, Some(y));
    set_p(arena, y, p);
    replace_child(arena, p, z, Some(y));

    update_height(arena, z);
    update_height(arena, y);
    trace!(z, y, "rotate right");
    y
}

/// Left rotation around `z`; its right child becomes the subtree root.
///
/// Returns the new subtree root. The grandparent's child slot is re-pointed.
pub fn rotate_left<K, N>(arena: &mut [N], z: u32) -> u32
where
    N: AvlNodeLike<K>,
{
    let y = get_r(arena, z).expect("left rotation needs a right child");
    let p = get_p(arena, z);
    let t = get_l(arena, y);

    set_r(arena, z, t);
    if let Some(t) = t {
        set_p(arena, t, Some(z));
    }
    set_l(arena, y, Some(z));
    set_p(arena, z, Some(y));
    set_p(arena, y, p);
    replace_child(arena, p, z, Some(y));

    update_height(arena, z);
    update_height(arena, y);
    trace!(z, y, "rotate left");
    y
}

/// Taller child of `n`.
///
/// On a tie the child on the same side `n` hangs from its parent wins, which
/// keeps the restructure a single rotation.
fn taller_child<K, N>(arena: &[N], n: u32) -> Option<u32>
where
    N: AvlNodeLike<K>,
{
    let l = get_l(arena, n);
    let r = get_r(arena, n);
    match height(arena, l).cmp(&height(arena, r)) {
        Ordering::Greater => l,
        Ordering::Less => r,
        Ordering::Equal => match get_p(arena, n) {
            Some(p) if get_l(arena, p) == Some(n) => l,
            _ => r,
        },
    }
}

/// Restores balance at the unbalanced node `z` with one single or double
/// rotation. Returns the new subtree root.
pub fn restructure<K, N>(arena: &mut [N], z: u32, stats: &mut TreeStats) -> u32
where
    N: AvlNodeLike<K>,
{
    let y = taller_child(arena, z).expect("unbalanced node has a child");
    let x = taller_child(arena, y).expect("taller child of unbalanced node has a child");
    let y_left = get_l(arena, z) == Some(y);
    let x_left = get_l(arena, y) == Some(x);

    let (case, top) = match (y_left, x_left) {
        (true, true) => (RotationCase::LeftLeft, rotate_right(arena, z)),
        (true, false) => {
            rotate_left(arena, y);
            (RotationCase::LeftRight, rotate_right(arena, z))
        }
        (false, false) => (RotationCase::RightRight, rotate_left(arena, z)),
        (false, true) => {
            rotate_right(arena, y);
            (RotationCase::RightLeft, rotate_left(arena, z))
        }
    };

    stats.restructures += 1;
    stats.rotations += case.rotations();
    debug!(?case, z, top, "avl restructure");
    top
}

/// Climbs from the fresh leaf `z`, fixing heights, and rebalances at the first
/// unbalanced ancestor only. Returns the root.
fn rebalance_after_insert<K, N>(
    arena: &mut [N],
    mut root: u32,
    z: u32,
    stats: &mut TreeStats,
) -> u32
where
    N: AvlNodeLike<K>,
{
    let mut curr = get_p(arena, z);
    while let Some(a) = curr {
        if is_unbalanced(arena, a) {
            let p = get_p(arena, a);
            let top = restructure(arena, a, stats);
            if p.is_none() {
                root = top;
            }
            break;
        }
        let before = arena[a as usize].height();
        update_height(arena, a);
        if arena[a as usize].height() == before {
            break;
        }
        curr = get_p(arena, a);
    }
    root
}

/// Inserts `node` as a new leaf and rebalances.
///
/// The node is pushed onto the arena only if its key is not present yet.
/// Returns `(root, index of the new node)`.
pub fn insert<K, N, C>(
    arena: &mut Vec<N>,
    root: Option<u32>,
    mut node: N,
    comparator: &C,
    stats: &mut TreeStats,
) -> Result<(u32, u32)>
where
    N: AvlNodeLike<K>,
    C: Fn(&K, &K) -> i32,
{
    node.set_p(None);
    node.set_l(None);
    node.set_r(None);
    node.set_height(0);

    let z = arena.len() as u32;
    let Some(start) = root else {
        arena.push(node);
        return Ok((z, z));
    };

    let mut curr = start;
    let (parent, go_left) = loop {
        let cmp = comparator(node.key(), arena[curr as usize].key());
        if cmp == 0 {
            return Err(ForestError::DuplicateKey);
        }
        let next = if cmp < 0 {
            get_l(arena, curr)
        } else {
            get_r(arena, curr)
        };
        match next {
            Some(next) => curr = next,
            None => break (curr, cmp < 0),
        }
    };

    arena.push(node);
    set_p(arena, z, Some(parent));
    if go_left {
        set_l(arena, parent, Some(z));
    } else {
        set_r(arena, parent, Some(z));
    }

    let root = rebalance_after_insert(arena, start, z, stats);
    Ok((root, z))
}

/// Climbs from `start` to the root, fixing heights and rebalancing at every
/// unbalanced ancestor. Returns the root.
fn rebalance_after_remove<K, N>(
    arena: &mut [N],
    mut root: Option<u32>,
    start: Option<u32>,
    stats: &mut TreeStats,
) -> Option<u32>
where
    N: AvlNodeLike<K>,
{
    let mut curr = start;
    while let Some(z) = curr {
        update_height(arena, z);
        let mut top = z;
        if is_unbalanced(arena, z) {
            let p = get_p(arena, z);
            top = restructure(arena, z, stats);
            if p.is_none() {
                root = Some(top);
            }
        }
        curr = get_p(arena, top);
    }
    root
}

fn swap_keys<K, N>(arena: &mut [N], a: u32, b: u32)
where
    N: KeyNode<K>,
{
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    let (head, tail) = arena.split_at_mut(hi as usize);
    std::mem::swap(head[lo as usize].key_mut(), tail[0].key_mut());
}

/// Removes the node holding `key` and rebalances.
///
/// A node with two children takes its in-order successor's key; the
/// successor's slot, now holding `key`, is the one spliced out and freed.
/// Returns the freed node and the new root, or [`ForestError::NotFound`]
/// without touching the tree.
pub fn remove<K, N, C>(
    arena: &mut Vec<N>,
    root: Option<u32>,
    key: &K,
    comparator: &C,
    stats: &mut TreeStats,
) -> Result<(N, Option<u32>)>
where
    N: AvlNodeLike<K>,
    C: Fn(&K, &K) -> i32,
{
    let n = find(arena, root, key, comparator).ok_or(ForestError::NotFound)?;

    let target = match (get_l(arena, n), get_r(arena, n)) {
        (Some(_), Some(r)) => {
            let s = first(arena, Some(r)).expect("right subtree has a leftmost node");
            swap_keys(arena, n, s);
            s
        }
        _ => n,
    };

    let child = get_l(arena, target).or(get_r(arena, target));
    let p = get_p(arena, target);
    if let Some(c) = child {
        set_p(arena, c, p);
    }
    replace_child(arena, p, target, child);
    let root = if p.is_none() { child } else { root };

    set_p(arena, target, None);
    set_l(arena, target, None);
    set_r(arena, target, None);

    let root = rebalance_after_remove(arena, root, p, stats);
    Ok(vacate(arena, root, target))
}

/// Checks parent links, stored heights, balance, and strict key order.
pub fn assert_avl_tree<K, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> std::result::Result<(), String>
where
    N: AvlNodeLike<K>,
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };

    if get_p(arena, root).is_some() {
        return Err("Root has parent".to_string());
    }

    fn validate<K, N>(arena: &[N], node: u32) -> std::result::Result<i32, String>
    where
        N: AvlNodeLike<K>,
    {
        let l = get_l(arena, node);
        let r = get_r(arena, node);

        let lh = match l {
            Some(l) => {
                if get_p(arena, l) != Some(node) {
                    return Err(format!("Broken parent link on left child of node {node}"));
                }
                validate::<K, N>(arena, l)?
            }
            None => -1,
        };
        let rh = match r {
            Some(r) => {
                if get_p(arena, r) != Some(node) {
                    return Err(format!("Broken parent link on right child of node {node}"));
                }
                validate::<K, N>(arena, r)?
            }
            None => -1,
        };

        let expected = 1 + lh.max(rh);
        let actual = arena[node as usize].height();
        if actual != expected {
            return Err(format!(
                "Height mismatch at node {node}: expected {expected}, got {actual}"
            ));
        }
        if (lh - rh).abs() > 1 {
            return Err(format!("AVL balance violated at node {node}: {lh} vs {rh}"));
        }
        Ok(expected)
    }

    validate::<K, N>(arena, root)?;

    let mut curr = first(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            if comparator(arena[prev as usize].key(), arena[i as usize].key()) >= 0 {
                return Err("Node order violated".to_string());
            }
        }
        prev_node = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}

/// Pre-order dump of key, height, and parent key per node.
pub fn snapshot<K, N>(arena: &[N], root: Option<u32>) -> Vec<NodeSnapshot<K>>
where
    K: Clone,
    N: AvlNodeLike<K>,
{
    let mut out = Vec::new();
    let mut stack: Vec<u32> = root.into_iter().collect();
    while let Some(i) = stack.pop() {
        let n = &arena[i as usize];
        let (parent, side) = match n.p() {
            None => (None, Side::Root),
            Some(p) => {
                let side = if get_l(arena, p) == Some(i) {
                    Side::Left
                } else {
                    Side::Right
                };
                (Some(arena[p as usize].key().clone()), side)
            }
        };
        out.push(NodeSnapshot {
            key: n.key().clone(),
            height: n.height(),
            parent,
            side,
        });
        stack.extend(n.r());
        stack.extend(n.l());
    }
    out
}

/// Debug printer: each node shows its key, height, and parent key.
pub fn print<K, N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    N: AvlNodeLike<K>,
{
    let Some(i) = node else {
        return "∅".to_string();
    };

    let n = &arena[i as usize];
    let parent = match n.p() {
        Some(p) => format!("{:?}", arena[p as usize].key()),
        None => "N".to_string(),
    };
    let head = format!("{:?} (h={}) (p={parent})", n.key(), n.height());
    let (l, r) = (n.l(), n.r());
    if l.is_none() && r.is_none() {
        return head;
    }

    let left: &Subtree = &|tab: &str| print::<K, N>(arena, l, tab);
    let right: &Subtree = &|tab: &str| print::<K, N>(arena, r, tab);
    render_node(head, tab, Some(left), Some(right))
}
