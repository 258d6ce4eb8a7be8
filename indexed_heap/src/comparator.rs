/// Strict "less than" predicate that orders the elements of a heap.
///
/// Every `Fn(&ValueT, &ValueT) -> bool` is a comparator, so closures can be
/// passed directly. Structs are useful when the ordering depends on state
/// the caller wants to change later (see `IndexedHeap::comparator_mut`).
pub trait Comparator<ValueT: ?Sized> {
    fn less(&self, a: &ValueT, b: &ValueT) -> bool;
}

impl<ValueT, FunctionT> Comparator<ValueT> for FunctionT
where
    ValueT: ?Sized,
    FunctionT: Fn(&ValueT, &ValueT) -> bool,
{
    #[inline(always)]
    fn less(&self, a: &ValueT, b: &ValueT) -> bool {
        self(a, b)
    }
}

/// Natural ascending order; the resulting heap pops the smallest value first.
#[derive(Clone, Copy, Default, Debug)]
pub struct Ascending;

impl<ValueT> Comparator<ValueT> for Ascending
where
    ValueT: PartialOrd + ?Sized,
{
    #[inline(always)]
    fn less(&self, a: &ValueT, b: &ValueT) -> bool {
        a < b
    }
}

/// Inverts a comparator. `Reverse(Ascending)` turns a min-heap into a max-heap.
#[derive(Clone, Copy, Default, Debug)]
pub struct Reverse<CompareT>(pub CompareT);

impl<ValueT, CompareT> Comparator<ValueT> for Reverse<CompareT>
where
    ValueT: ?Sized,
    CompareT: Comparator<ValueT>,
{
    #[inline(always)]
    fn less(&self, a: &ValueT, b: &ValueT) -> bool {
        self.0.less(b, a)
    }
}
