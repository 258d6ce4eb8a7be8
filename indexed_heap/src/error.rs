/// Failure of a heap operation. A call that returns an error has not touched the heap.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HeapError {
    /// `pop` or `peek` on a heap with no elements.
    Empty,
    /// The element is not tracked by the heap.
    NotFound,
    /// `slot` is not an occupied position of a heap holding `len` elements.
    InvalidSlot { slot: usize, len: usize },
    /// The element is already present; `slot` is where the repeat was met.
    DuplicateElement { slot: usize },
}

impl std::fmt::Display for HeapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeapError::Empty => write!(f, "heap is empty"),
            HeapError::NotFound => write!(f, "element not found in heap"),
            HeapError::InvalidSlot { slot, len } => {
                write!(f, "slot {} is out of range for heap of length {}", slot, len)
            }
            HeapError::DuplicateElement { slot } => {
                write!(f, "duplicate element at slot {}", slot)
            }
        }
    }
}

impl std::error::Error for HeapError {}
