//! Array-backed binary heaps and the dual-heap running median.

#[path = "Heap.rs"]
pub mod binary_heap;
#[path = "MedianTracker.rs"]
pub mod median_tracker;
pub mod util;

pub use binary_heap::Heap;
pub use median_tracker::{Median, MedianTracker};
pub use util::{assert_heap, fixdown, fixup, pop, push, HeapKind};
