use super::Comparator;

#[inline(always)]
fn parent_of(position: usize) -> usize {
    debug_assert!(position != 0);
    return (position + 1) / 2 - 1;
}

#[inline(always)]
fn left_of(position: usize) -> usize {
    return (position + 1) * 2 - 1;
}

#[inline(always)]
fn right_of(position: usize) -> usize {
    (position + 1) * 2
}

#[inline(always)]
pub fn up_heap<ValueT>(
    array: &mut [ValueT],
    position: usize,
    compare: &impl Comparator<ValueT>,
) {
    up_heap_with_callback(array, position, compare, |_, _| ());
}

#[inline(always)]
pub fn down_heap<ValueT>(
    array: &mut [ValueT],
    position: usize,
    compare: &impl Comparator<ValueT>,
) {
    down_heap_with_callback(array, position, compare, |_, _| ());
}

#[inline(always)]
pub fn update_heap<ValueT>(
    array: &mut [ValueT],
    position: usize,
    compare: &impl Comparator<ValueT>,
) {
    update_heap_with_callback(array, position, compare, |_, _| ());
}

#[inline(always)]
pub fn make_heap<ValueT>(array: &mut [ValueT], compare: &impl Comparator<ValueT>) {
    make_heap_with_callback(array, compare, |_, _| ());
}

/// Restores heap order at `position` after its element changed in either direction.
#[inline(always)]
pub fn update_heap_with_callback<ValueT>(
    array: &mut [ValueT],
    position: usize,
    compare: &impl Comparator<ValueT>,
    callback_move: impl FnMut(&ValueT, usize),
) {
    debug_assert!(position < array.len());
    if position != 0 && compare.less(&array[position], &array[parent_of(position)]) {
        up_heap_with_callback(array, position, compare, callback_move);
    } else {
        down_heap_with_callback(array, position, compare, callback_move);
    }
}

/// Moves the element at `position` toward the root while it is strictly less
/// than its parent. `callback_move(value, position)` is called for both
/// elements of every swap, with their new positions.
pub fn up_heap_with_callback<ValueT>(
    array: &mut [ValueT],
    position: usize,
    compare: &impl Comparator<ValueT>,
    mut callback_move: impl FnMut(&ValueT, usize),
) {
    debug_assert!(position < array.len());
    let mut current = position;
    loop {
        if current == 0 {
            break;
        }
        let parent = parent_of(current);
        if compare.less(&array[current], &array[parent]) {
            array.swap(parent, current);
            callback_move(&array[parent], parent);
            callback_move(&array[current], current);
            current = parent;
        } else {
            break;
        }
    }
}

/// Moves the element at `position` toward the leaves while its smaller child
/// is strictly less than it. Reports swaps like `up_heap_with_callback`.
pub fn down_heap_with_callback<ValueT>(
    array: &mut [ValueT],
    position: usize,
    compare: &impl Comparator<ValueT>,
    mut callback_move: impl FnMut(&ValueT, usize),
) {
    debug_assert!(position < array.len());
    let mut current = position;
    loop {
        let left = left_of(current);
        if left >= array.len() {
            break;
        }
        let right = right_of(current);
        let child = if right >= array.len() || compare.less(&array[left], &array[right]) {
            left
        } else {
            right
        };
        if compare.less(&array[child], &array[current]) {
            array.swap(current, child);
            callback_move(&array[current], current);
            callback_move(&array[child], child);
            current = child;
        } else {
            break;
        }
    }
}

/// Bottom-up heapify, O(n).
pub fn make_heap_with_callback<ValueT>(
    array: &mut [ValueT],
    compare: &impl Comparator<ValueT>,
    mut callback_move: impl FnMut(&ValueT, usize),
) {
    for position in (0..array.len() / 2).rev() {
        down_heap_with_callback(array, position, compare, &mut callback_move);
    }
}

pub fn is_heap<ValueT>(array: &[ValueT], compare: &impl Comparator<ValueT>) -> bool {
    (1..array.len()).all(|position| !compare.less(&array[position], &array[parent_of(position)]))
}

/// Sorts `array` in place so that no element is `less` than the one before it.
/// Not stable.
pub fn sort_by_less<ValueT>(array: &mut [ValueT], compare: &impl Comparator<ValueT>) {
    // max-heap under `compare`, then move the root behind the shrinking heap
    let greater = |a: &ValueT, b: &ValueT| compare.less(b, a);
    make_heap(array, &greater);
    for end in (1..array.len()).rev() {
        array.swap(0, end);
        down_heap(&mut array[..end], 0, &greater);
    }
}
