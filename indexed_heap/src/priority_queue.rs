use super::{Comparator, HeapError, heap_sort};

/// Binary heap without position tracking. Pops the element that is not
/// `less` than any other first.
pub struct PriorityQueue<ValueT, CompareT>
where
    CompareT: Comparator<ValueT>,
{
    compare: CompareT,
    array: Vec<ValueT>,
}

impl<ValueT, CompareT> PriorityQueue<ValueT, CompareT>
where
    CompareT: Comparator<ValueT>,
{
    #[inline(always)]
    pub fn new(compare: CompareT) -> Self {
        Self {
            compare,
            array: Vec::default(),
        }
    }

    /// Adopts `array` and heapifies it in O(n).
    pub fn from_vec(compare: CompareT, mut array: Vec<ValueT>) -> Self {
        heap_sort::make_heap(&mut array, &compare);
        Self { compare, array }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.array.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// Elements in heap-array order, not sorted.
    pub fn iter(&self) -> impl Iterator<Item = &ValueT> + Clone + '_ {
        self.array.iter()
    }

    #[inline(always)]
    pub fn peek(&self) -> Result<&ValueT, HeapError> {
        self.array.first().ok_or(HeapError::Empty)
    }

    pub fn push(&mut self, value: ValueT) {
        let position = self.array.len();
        self.array.push(value);
        heap_sort::up_heap(&mut self.array, position, &self.compare);
    }

    pub fn pop(&mut self) -> Result<ValueT, HeapError> {
        if self.array.is_empty() {
            return Err(HeapError::Empty);
        } else {
            let value = self.array.swap_remove(0);
            if !self.array.is_empty() {
                heap_sort::down_heap(&mut self.array, 0, &self.compare);
            }
            return Ok(value);
        }
    }

    pub fn clear(&mut self) {
        self.array.clear();
    }

    pub fn into_vec(self) -> Vec<ValueT> {
        self.array
    }

    pub fn into_sorted_vec(self) -> Vec<ValueT> {
        let mut array = self.array;
        heap_sort::sort_by_less(&mut array, &self.compare);
        array
    }
}

impl<ValueT, CompareT> Default for PriorityQueue<ValueT, CompareT>
where
    CompareT: Comparator<ValueT> + Default,
{
    fn default() -> Self {
        Self {
            compare: CompareT::default(),
            array: Vec::default(),
        }
    }
}

impl<ValueT, CompareT> Clone for PriorityQueue<ValueT, CompareT>
where
    ValueT: Clone,
    CompareT: Comparator<ValueT> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            compare: self.compare.clone(),
            array: self.array.clone(),
        }
    }
}

impl<ValueT, CompareT> std::fmt::Debug for PriorityQueue<ValueT, CompareT>
where
    ValueT: std::fmt::Debug,
    CompareT: Comparator<ValueT>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.array.iter()).finish()
    }
}
