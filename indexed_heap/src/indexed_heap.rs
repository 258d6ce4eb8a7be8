use std::{borrow::Borrow, collections::HashMap, hash::Hash};

use super::{Comparator, HeapError, heap_sort};

/// Binary min-heap that also knows the slot of every element it holds, so any
/// element can be re-prioritised or removed in O(log n).
///
/// Elements are their own keys: two equal values are the same element. `push`
/// and `try_from_vec` refuse duplicates. `from_vec` does not check, and with
/// duplicates the index keeps the slot written last; `index_of` is then
/// unspecified for the repeated value.
///
/// If the ordering of an element changes while it is stored (typically through
/// `comparator_mut`), call `fix` at its slot before any other operation.
///
/// The heap has no internal synchronisation.
pub struct IndexedHeap<ValueT, CompareT>
where
    ValueT: Hash + Eq + Clone,
    CompareT: Comparator<ValueT>,
{
    compare: CompareT,
    item_array: Vec<ValueT>,
    value_to_position: HashMap<ValueT, usize>,
}

impl<ValueT, CompareT> Default for IndexedHeap<ValueT, CompareT>
where
    ValueT: Hash + Eq + Clone,
    CompareT: Comparator<ValueT> + Default,
{
    fn default() -> Self {
        Self {
            compare: CompareT::default(),
            item_array: Vec::default(),
            value_to_position: HashMap::default(),
        }
    }
}

impl<ValueT, CompareT> Clone for IndexedHeap<ValueT, CompareT>
where
    ValueT: Hash + Eq + Clone,
    CompareT: Comparator<ValueT> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            compare: self.compare.clone(),
            item_array: self.item_array.clone(),
            value_to_position: self.value_to_position.clone(),
        }
    }
}

impl<ValueT, CompareT> IndexedHeap<ValueT, CompareT>
where
    ValueT: Hash + Eq + Clone,
    CompareT: Comparator<ValueT>,
{
    #[inline(always)]
    pub fn new(compare: CompareT) -> Self {
        Self {
            compare,
            item_array: Vec::default(),
            value_to_position: HashMap::default(),
        }
    }

    pub fn with_capacity(compare: CompareT, capacity: usize) -> Self {
        Self {
            compare,
            item_array: Vec::with_capacity(capacity),
            value_to_position: HashMap::with_capacity(capacity),
        }
    }

    /// Adopts `item_array` and heapifies it in O(n) without checking for
    /// duplicates (see the type documentation).
    pub fn from_vec(compare: CompareT, item_array: Vec<ValueT>) -> Self {
        let mut value_to_position = HashMap::with_capacity(item_array.len());
        for (position, value) in item_array.iter().enumerate() {
            value_to_position.insert(value.clone(), position);
        }
        return Self::heapify(compare, item_array, value_to_position);
    }

    /// Like `from_vec`, but fails with `DuplicateElement` if a value repeats.
    pub fn try_from_vec(compare: CompareT, item_array: Vec<ValueT>) -> Result<Self, HeapError> {
        let mut value_to_position = HashMap::with_capacity(item_array.len());
        for (position, value) in item_array.iter().enumerate() {
            if value_to_position.insert(value.clone(), position).is_some() {
                return Err(HeapError::DuplicateElement { slot: position });
            }
        }
        return Ok(Self::heapify(compare, item_array, value_to_position));
    }

    fn heapify(
        compare: CompareT,
        mut item_array: Vec<ValueT>,
        mut value_to_position: HashMap<ValueT, usize>,
    ) -> Self {
        heap_sort::make_heap_with_callback(&mut item_array, &compare, |value, position| {
            Self::relocate(&mut value_to_position, value, position)
        });
        Self {
            compare,
            item_array,
            value_to_position,
        }
    }

    #[inline(always)]
    fn relocate(value_to_position: &mut HashMap<ValueT, usize>, value: &ValueT, position: usize) {
        if let Some(entry) = value_to_position.get_mut(value) {
            *entry = position;
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.item_array.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.item_array.is_empty()
    }

    #[inline(always)]
    pub fn peek(&self) -> Result<&ValueT, HeapError> {
        self.item_array.first().ok_or(HeapError::Empty)
    }

    #[inline(always)]
    pub fn get(&self, slot: usize) -> Option<&ValueT> {
        self.item_array.get(slot)
    }

    /// Current slot of `value`, or `None` if it is not in the heap.
    #[inline(always)]
    pub fn index_of<QueryT>(&self, value: &QueryT) -> Option<usize>
    where
        ValueT: Borrow<QueryT>,
        QueryT: Hash + Eq + ?Sized,
    {
        self.value_to_position.get(value).copied()
    }

    #[inline(always)]
    pub fn contains<QueryT>(&self, value: &QueryT) -> bool
    where
        ValueT: Borrow<QueryT>,
        QueryT: Hash + Eq + ?Sized,
    {
        self.value_to_position.contains_key(value)
    }

    #[inline(always)]
    pub fn comparator(&self) -> &CompareT {
        &self.compare
    }

    /// Mutable access to the ordering state. Every stored element whose order
    /// changed must be passed to `fix` afterwards.
    #[inline(always)]
    pub fn comparator_mut(&mut self) -> &mut CompareT {
        &mut self.compare
    }

    pub fn push(&mut self, value: ValueT) -> Result<(), HeapError> {
        let position = self.item_array.len();
        if self.value_to_position.contains_key(&value) {
            return Err(HeapError::DuplicateElement { slot: position });
        }
        self.value_to_position.insert(value.clone(), position);
        self.item_array.push(value);
        heap_sort::up_heap_with_callback(
            &mut self.item_array,
            position,
            &self.compare,
            |value, position| Self::relocate(&mut self.value_to_position, value, position),
        );
        return Ok(());
    }

    pub fn pop(&mut self) -> Result<ValueT, HeapError> {
        if self.item_array.is_empty() {
            return Err(HeapError::Empty);
        } else {
            let value = self.item_array.swap_remove(0);
            self.value_to_position.remove(&value);
            if !self.item_array.is_empty() {
                Self::relocate(&mut self.value_to_position, &self.item_array[0], 0);
                heap_sort::down_heap_with_callback(
                    &mut self.item_array,
                    0,
                    &self.compare,
                    |value, position| Self::relocate(&mut self.value_to_position, value, position),
                );
            }
            return Ok(value);
        }
    }

    /// Restores heap order at `slot` after the element there changed priority.
    pub fn fix(&mut self, slot: usize) -> Result<(), HeapError> {
        if slot >= self.item_array.len() {
            return Err(HeapError::InvalidSlot {
                slot,
                len: self.item_array.len(),
            });
        }
        heap_sort::update_heap_with_callback(
            &mut self.item_array,
            slot,
            &self.compare,
            |value, position| Self::relocate(&mut self.value_to_position, value, position),
        );
        return Ok(());
    }

    pub fn remove_at(&mut self, slot: usize) -> Result<ValueT, HeapError> {
        if slot >= self.item_array.len() {
            return Err(HeapError::InvalidSlot {
                slot,
                len: self.item_array.len(),
            });
        }
        let value = self.item_array.swap_remove(slot);
        self.value_to_position.remove(&value);
        if slot != self.item_array.len() {
            Self::relocate(&mut self.value_to_position, &self.item_array[slot], slot);
            heap_sort::update_heap_with_callback(
                &mut self.item_array,
                slot,
                &self.compare,
                |value, position| Self::relocate(&mut self.value_to_position, value, position),
            );
        }
        return Ok(value);
    }

    pub fn remove<QueryT>(&mut self, value: &QueryT) -> Result<ValueT, HeapError>
    where
        ValueT: Borrow<QueryT>,
        QueryT: Hash + Eq + ?Sized,
    {
        let Some(slot) = self.index_of(value) else {
            return Err(HeapError::NotFound);
        };
        return self.remove_at(slot);
    }

    pub fn clear(&mut self) {
        self.item_array.clear();
        self.value_to_position.clear();
    }

    /// Elements in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &ValueT> + Clone {
        self.item_array.iter()
    }

    pub fn into_vec(self) -> Vec<ValueT> {
        self.item_array
    }

    pub fn into_sorted_vec(self) -> Vec<ValueT> {
        let mut item_array = self.item_array;
        heap_sort::sort_by_less(&mut item_array, &self.compare);
        item_array
    }
}

impl<ValueT, CompareT> std::fmt::Debug for IndexedHeap<ValueT, CompareT>
where
    ValueT: Hash + Eq + Clone + std::fmt::Debug,
    CompareT: Comparator<ValueT>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.item_array.iter()).finish()
    }
}

#[cfg(test)]
mod test {
    use std::hash::Hash;

    use proptest::prelude::*;
    use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};

    use crate::{Ascending, Comparator, HeapError, Reverse, heap_sort};

    use super::IndexedHeap;

    fn assert_invariants<ValueT, CompareT>(heap: &IndexedHeap<ValueT, CompareT>)
    where
        ValueT: Hash + Eq + Clone + std::fmt::Debug,
        CompareT: Comparator<ValueT>,
    {
        assert!(heap_sort::is_heap(&heap.item_array, &heap.compare), "{:?}", heap);
        assert_eq!(heap.value_to_position.len(), heap.len());
        for (slot, value) in heap.iter().enumerate() {
            assert_eq!(heap.index_of(value), Some(slot));
            assert_eq!(heap.get(slot), Some(value));
        }
    }

    #[derive(Clone, Default)]
    struct ByPriority {
        priority: Vec<i64>,
    }

    impl Comparator<usize> for ByPriority {
        fn less(&self, a: &usize, b: &usize) -> bool {
            self.priority[*a] < self.priority[*b]
        }
    }

    #[test]
    fn test_scenario() {
        let mut heap = IndexedHeap::from_vec(Ascending, vec![5, 3, 8, 1, 9, 2]);
        assert_invariants(&heap);
        assert_eq!(heap.len(), 6);
        assert_eq!(heap.peek(), Ok(&1));

        let slot = heap.index_of(&8).unwrap();
        assert_eq!(heap.get(slot), Some(&8));
        assert_eq!(heap.remove_at(slot), Ok(8));
        assert_eq!(heap.index_of(&8), None);
        assert_eq!(heap.len(), 5);
        assert_invariants(&heap);

        let mut popped = Vec::default();
        while let Ok(value) = heap.pop() {
            popped.push(value);
            assert_invariants(&heap);
        }
        assert_eq!(popped, vec![1, 2, 3, 5, 9]);

        let mut heap = IndexedHeap::from_vec(Ascending, vec![5, 3, 8, 1, 9, 2]);
        let mut popped = Vec::default();
        while let Ok(value) = heap.pop() {
            popped.push(value);
            assert_invariants(&heap);
        }
        assert_eq!(popped, vec![1, 2, 3, 5, 8, 9]);

        let heap = IndexedHeap::from_vec(Ascending, vec![5, 3, 8, 1, 9, 2]);
        assert_eq!(heap.into_sorted_vec(), vec![1, 2, 3, 5, 8, 9]);
    }

    #[test]
    fn test_empty() {
        let mut heap: IndexedHeap<u32, Ascending> = IndexedHeap::default();
        assert!(heap.is_empty());
        assert_eq!(heap.pop(), Err(HeapError::Empty));
        assert_eq!(heap.pop(), Err(HeapError::Empty));
        assert_eq!(heap.peek(), Err(HeapError::Empty));
        assert_eq!(heap.index_of(&0), None);
        assert_eq!(heap.remove(&0), Err(HeapError::NotFound));
        assert_eq!(heap.fix(0), Err(HeapError::InvalidSlot { slot: 0, len: 0 }));
        assert_eq!(heap.remove_at(0), Err(HeapError::InvalidSlot { slot: 0, len: 0 }));
        assert!(heap.is_empty());

        heap.push(7).unwrap();
        assert!(!heap.is_empty());
        assert_eq!(heap.remove(&7), Ok(7));
        assert!(heap.is_empty());
        assert_eq!(heap.pop(), Err(HeapError::Empty));
    }

    #[test]
    fn test_pop_order() {
        let mut rng = SmallRng::seed_from_u64(1);
        for n in [1, 2, 3, 10, 100, 1000] {
            let mut values: Vec<u32> = (1..=n).collect();
            values.shuffle(&mut rng);

            let mut heap = IndexedHeap::new(|a: &u32, b: &u32| a < b);
            for value in values.iter().copied() {
                heap.push(value).unwrap();
            }
            assert_invariants(&heap);
            for expected in 1..=n {
                assert_eq!(heap.pop(), Ok(expected));
            }
            assert!(heap.is_empty());
        }
    }

    #[test]
    fn test_max_heap() {
        let mut heap = IndexedHeap::from_vec(Reverse(Ascending), vec![5, 3, 8, 1, 9, 2]);
        assert_invariants(&heap);
        assert_eq!(heap.pop(), Ok(9));
        assert_eq!(heap.pop(), Ok(8));
        assert_eq!(heap.remove(&1), Ok(1));
        assert_eq!(heap.into_sorted_vec(), vec![5, 3, 2]);
    }

    #[test]
    fn test_string_keys() {
        let mut heap = IndexedHeap::new(|a: &String, b: &String| a.len() < b.len());
        for word in ["banana", "fig", "cherry!", "kiwi"] {
            heap.push(word.to_string()).unwrap();
        }
        assert!(heap.contains("kiwi"));
        assert_eq!(heap.remove("kiwi"), Ok("kiwi".to_string()));
        assert!(!heap.contains("kiwi"));
        assert_eq!(heap.remove("kiwi"), Err(HeapError::NotFound));
        assert_eq!(heap.pop(), Ok("fig".to_string()));
        assert_invariants(&heap);
    }

    #[test]
    fn test_duplicates() {
        assert_eq!(
            IndexedHeap::try_from_vec(Ascending, vec![4, 1, 4]).map(|heap| heap.len()),
            Err(HeapError::DuplicateElement { slot: 2 })
        );
        let heap = IndexedHeap::try_from_vec(Ascending, vec![4, 1, 3]).unwrap();
        assert_invariants(&heap);

        let mut heap = IndexedHeap::new(Ascending);
        heap.push(3).unwrap();
        heap.push(1).unwrap();
        assert_eq!(heap.push(3), Err(HeapError::DuplicateElement { slot: 2 }));
        assert_eq!(heap.len(), 2);
        assert_invariants(&heap);

        // permissive construction keeps every copy in the array
        let heap = IndexedHeap::from_vec(Ascending, vec![2, 2, 1]);
        assert_eq!(heap.len(), 3);
        assert!(heap.contains(&2));
        assert_eq!(heap.into_sorted_vec(), vec![1, 2, 2]);
    }

    #[test]
    fn test_decrease_key() {
        let n: usize = 16;
        let priority: Vec<i64> = (0..n as i64).map(|i| 100 + 10 * i).collect();
        let mut heap = IndexedHeap::new(ByPriority { priority });
        for index in 0..n {
            heap.push(index).unwrap();
        }
        assert_eq!(heap.peek(), Ok(&0));

        // 11 becomes the global minimum
        heap.comparator_mut().priority[11] = 0;
        let slot = heap.index_of(&11).unwrap();
        heap.fix(slot).unwrap();
        assert_eq!(heap.index_of(&11), Some(0));
        assert_eq!(heap.peek(), Ok(&11));
        assert_invariants(&heap);

        // 13 moves up but not to the root
        heap.comparator_mut().priority[13] = 105;
        heap.fix(heap.index_of(&13).unwrap()).unwrap();
        assert_invariants(&heap);
        assert_eq!(heap.pop(), Ok(11));
        assert_eq!(heap.pop(), Ok(0));
        assert_eq!(heap.pop(), Ok(13));
    }

    #[test]
    fn test_increase_key() {
        let n: usize = 32;
        let priority: Vec<i64> = (0..n as i64).collect();
        let mut heap = IndexedHeap::from_vec(ByPriority { priority }, (0..n).collect::<Vec<usize>>());
        assert_invariants(&heap);

        heap.comparator_mut().priority[0] = 1000;
        heap.fix(0).unwrap();
        assert_invariants(&heap);
        assert_eq!(heap.peek(), Ok(&1));

        // a no-op fix leaves everything in place
        let before = heap.clone().into_vec();
        let slot = heap.index_of(&7).unwrap();
        heap.fix(slot).unwrap();
        assert_eq!(heap.clone().into_vec(), before);

        let mut popped = Vec::default();
        while let Ok(index) = heap.pop() {
            popped.push(index);
        }
        assert_eq!(popped.last(), Some(&0));
        assert_eq!(popped.len(), n);
    }

    #[test]
    fn test_random_operations() {
        let mut rng = SmallRng::seed_from_u64(0xdecade);
        let n: usize = 200;
        let mut heap = IndexedHeap::new(ByPriority {
            priority: vec![0; n],
        });
        let mut present = vec![false; n];

        for _ in 0..5000 {
            let index = rng.gen_range(0..n);
            match rng.gen_range(0..5) {
                0 => {
                    heap.comparator_mut().priority[index] = rng.gen_range(-1000..1000);
                    if present[index] {
                        let slot = heap.index_of(&index).unwrap();
                        heap.fix(slot).unwrap();
                    } else {
                        heap.push(index).unwrap();
                        present[index] = true;
                    }
                }
                1 => {
                    if present[index] {
                        assert_eq!(heap.remove(&index), Ok(index));
                        present[index] = false;
                    } else {
                        assert_eq!(heap.remove(&index), Err(HeapError::NotFound));
                    }
                }
                2 => match heap.pop() {
                    Ok(popped) => {
                        let minimum = (0..n)
                            .filter(|&i| present[i] && i != popped)
                            .map(|i| heap.comparator().priority[i])
                            .min();
                        if let Some(minimum) = minimum {
                            assert!(heap.comparator().priority[popped] <= minimum);
                        }
                        present[popped] = false;
                    }
                    Err(error) => {
                        assert_eq!(error, HeapError::Empty);
                        assert!(present.iter().all(|p| !p));
                    }
                },
                3 => {
                    let len = heap.len();
                    let slot = rng.gen_range(0..len + 1);
                    match heap.remove_at(slot) {
                        Ok(removed) => {
                            assert!(present[removed]);
                            present[removed] = false;
                            assert_eq!(heap.len(), len - 1);
                            assert_eq!(heap.index_of(&removed), None);
                        }
                        Err(error) => {
                            assert_eq!(error, HeapError::InvalidSlot { slot, len });
                            assert_eq!(heap.len(), len);
                        }
                    }
                }
                _ => {
                    if present[index] {
                        assert_eq!(
                            heap.push(index),
                            Err(HeapError::DuplicateElement { slot: heap.len() })
                        );
                    }
                }
            }
            assert_invariants(&heap);
            assert_eq!(heap.len(), present.iter().filter(|p| **p).count());
        }
    }

    proptest! {
        #[test]
        fn removal_keeps_index_consistent(
            values in proptest::collection::hash_set(any::<i32>(), 0..64),
            picks in proptest::collection::vec(any::<prop::sample::Index>(), 0..16),
        ) {
            let values: Vec<i32> = values.into_iter().collect();
            let mut heap = IndexedHeap::try_from_vec(Ascending, values.clone()).unwrap();
            let mut remaining = values;
            for pick in picks {
                if remaining.is_empty() {
                    break;
                }
                let value = remaining.swap_remove(pick.index(remaining.len()));
                prop_assert_eq!(heap.remove(&value), Ok(value));
                prop_assert_eq!(heap.index_of(&value), None);
                prop_assert_eq!(heap.len(), remaining.len());
                assert_invariants(&heap);
            }
            remaining.sort();
            prop_assert_eq!(heap.into_sorted_vec(), remaining);
        }
    }
}
