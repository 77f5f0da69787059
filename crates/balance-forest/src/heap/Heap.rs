use std::fmt::Debug;

use crate::error::Result;

use super::util::{assert_heap, pop, print, push, HeapKind};

/// Binary heap stored breadth-first in a `Vec`.
#[derive(Clone, Debug)]
pub struct Heap<T> {
    kind: HeapKind,
    data: Vec<T>,
}

impl<T: Ord> Heap<T> {
    pub fn new(kind: HeapKind) -> Self {
        Self {
            kind,
            data: Vec::new(),
        }
    }

    pub fn max() -> Self {
        Self::new(HeapKind::Max)
    }

    pub fn min() -> Self {
        Self::new(HeapKind::Min)
    }

    pub fn kind(&self) -> HeapKind {
        self.kind
    }

    /// Wraps a `Vec` as-is, without heapifying it.
    #[cfg(test)]
    pub(crate) fn from_raw(kind: HeapKind, data: Vec<T>) -> Self {
        Self { kind, data }
    }

    pub fn push(&mut self, value: T) {
        push(&mut self.data, value, self.kind);
        self.debug_check();
    }

    pub fn pop(&mut self) -> Result<T> {
        let top = pop(&mut self.data, self.kind)?;
        self.debug_check();
        Ok(top)
    }

    /// Root element: the largest of a max-heap, the smallest of a min-heap.
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn assert_valid(&self) -> std::result::Result<(), String> {
        assert_heap(&self.data, self.kind)
    }

    #[inline]
    fn debug_check(&self) {
        if cfg!(debug_assertions) {
            if let Err(err) = self.assert_valid() {
                panic!("heap invariant broken: {err}");
            }
        }
    }
}

impl<T: Debug> Heap<T> {
    pub fn print(&self) -> String {
        print(&self.data, 0, "")
    }
}
