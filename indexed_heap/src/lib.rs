//! Binary heaps ordered by a caller-supplied `less` predicate.
//!
//! `IndexedHeap` additionally tracks where each element sits in the heap
//! array, which allows decrease-key (`fix`) and removal of arbitrary elements
//! in O(log n). `PriorityQueue` is the plain variant and `sort_by_less` sorts a
//! slice with the same sift primitives.

mod comparator;
mod error;
mod heap_sort;
mod indexed_heap;
mod priority_queue;

pub use comparator::{Ascending, Comparator, Reverse};
pub use error::HeapError;
pub use heap_sort::{
    down_heap, down_heap_with_callback, is_heap, make_heap, make_heap_with_callback, sort_by_less,
    up_heap, up_heap_with_callback, update_heap, update_heap_with_callback,
};
pub use indexed_heap::IndexedHeap;
pub use priority_queue::PriorityQueue;
