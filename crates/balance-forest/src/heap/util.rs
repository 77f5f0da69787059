//! Heap primitives over a dense, 0-indexed `Vec`.
//!
//! Slot `k` has parent `(k - 1) / 2` and children `2k + 1`, `2k + 2`.

use std::fmt::Debug;

use crate::error::{ForestError, Result};
use crate::print::{render_node, Subtree};

/// Ordering a heap keeps at its root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeapKind {
    Max,
    Min,
}

impl HeapKind {
    /// Whether `a` must sit strictly above `b`.
    #[inline]
    pub fn above<T: Ord>(self, a: &T, b: &T) -> bool {
        match self {
            HeapKind::Max => a > b,
            HeapKind::Min => a < b,
        }
    }
}

#[inline]
fn parent(k: usize) -> usize {
    (k - 1) / 2
}

/// Sifts slot `k` toward the root while it beats its parent.
pub fn fixup<T: Ord>(heap: &mut [T], mut k: usize, kind: HeapKind) {
    while k > 0 {
        let p = parent(k);
        if !kind.above(&heap[k], &heap[p]) {
            break;
        }
        heap.swap(k, p);
        k = p;
    }
}

/// Sifts slot `k` toward the leaves while a child beats it.
///
/// The left child is taken unless the right one is strictly more extreme.
pub fn fixdown<T: Ord>(heap: &mut [T], mut k: usize, kind: HeapKind) {
    let n = heap.len();
    while 2 * k + 1 < n {
        let mut j = 2 * k + 1;
        if j + 1 < n && kind.above(&heap[j + 1], &heap[j]) {
            j += 1;
        }
        if !kind.above(&heap[j], &heap[k]) {
            break;
        }
        heap.swap(k, j);
        k = j;
    }
}

pub fn push<T: Ord>(heap: &mut Vec<T>, value: T, kind: HeapKind) {
    heap.push(value);
    let k = heap.len() - 1;
    fixup(heap, k, kind);
}

/// Removes and returns the root; the last slot takes its place and sinks.
pub fn pop<T: Ord>(heap: &mut Vec<T>, kind: HeapKind) -> Result<T> {
    if heap.is_empty() {
        return Err(ForestError::EmptyHeap);
    }
    let top = heap.swap_remove(0);
    fixdown(heap, 0, kind);
    Ok(top)
}

pub fn assert_heap<T: Ord>(heap: &[T], kind: HeapKind) -> std::result::Result<(), String> {
    for k in 1..heap.len() {
        if kind.above(&heap[k], &heap[parent(k)]) {
            return Err(format!("{kind:?}-heap order violated at slot {k}"));
        }
    }
    Ok(())
}

/// Renders the heap as a tree starting at slot `k`.
pub fn print<T: Debug>(heap: &[T], k: usize, tab: &str) -> String {
    let Some(value) = heap.get(k) else {
        return "∅".to_string();
    };
    let head = format!("{value:?}");
    let (l, r) = (2 * k + 1, 2 * k + 2);
    let left: &Subtree = &|tab: &str| print(heap, l, tab);
    let right: &Subtree = &|tab: &str| print(heap, r, tab);
    render_node(
        head,
        tab,
        (l < heap.len()).then_some(left),
        (r < heap.len()).then_some(right),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(mut heap: Vec<i32>, kind: HeapKind) -> Vec<i32> {
        let mut out = Vec::new();
        while let Ok(v) = pop(&mut heap, kind) {
            out.push(v);
        }
        out
    }

    #[test]
    fn max_heap_pops_descending() {
        let mut heap = Vec::new();
        for v in [15, 10, 1, 20, 30, 0, 4, 35, 23, 6, 17, -1, 2, 3] {
            push(&mut heap, v, HeapKind::Max);
            assert_heap(&heap, HeapKind::Max).unwrap();
        }
        assert_eq!(heap[0], 35);
        assert_eq!(
            drain(heap, HeapKind::Max),
            vec![35, 30, 23, 20, 17, 15, 10, 6, 4, 3, 2, 1, 0, -1]
        );
    }

    #[test]
    fn min_heap_pops_ascending_with_duplicates() {
        let mut heap = Vec::new();
        for v in [5, 3, 5, 1, 3, 1] {
            push(&mut heap, v, HeapKind::Min);
        }
        assert_eq!(drain(heap, HeapKind::Min), vec![1, 1, 3, 3, 5, 5]);
    }

    #[test]
    fn pop_empty_is_an_error() {
        let mut heap: Vec<i32> = Vec::new();
        assert_eq!(pop(&mut heap, HeapKind::Min), Err(ForestError::EmptyHeap));
    }

    #[test]
    fn fixdown_prefers_left_child_on_tie() {
        let mut heap = vec![0, 5, 5];
        fixdown(&mut heap, 0, HeapKind::Max);
        assert_eq!(heap, vec![5, 0, 5]);
    }

    #[test]
    fn fixdown_takes_strictly_better_right_child() {
        let mut heap = vec![9, 4, 2];
        fixdown(&mut heap, 0, HeapKind::Min);
        assert_eq!(heap, vec![2, 4, 9]);
    }

    #[test]
    fn assert_heap_reports_slot() {
        assert!(assert_heap(&[3, 1, 2], HeapKind::Max).is_ok());
        let err = assert_heap(&[1, 3, 2], HeapKind::Max).unwrap_err();
        assert!(err.contains("slot 1"));
    }

    #[test]
    fn print_renders_breadth_first_layout() {
        let heap = vec![1, 2, 3, 4];
        assert_eq!(print(&heap, 0, ""), "1\n├─ 2\n│  └─ 4\n└─ 3");
        assert_eq!(print::<i32>(&[], 0, ""), "∅");
    }
}
