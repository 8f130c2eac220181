use std::{
    collections::{vec_deque, TryReserveError, VecDeque},
    iter, slice,
};

/// The plain collection backing an observable container.
///
/// Indices are positions in iteration order, which is also the order of
/// `to_vec` and the order observers mirror the contents in.
pub(crate) trait Storage<T>: Default + Send + 'static {
    type Iter<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    fn with_capacity(capacity: usize) -> Self;

    fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError>;

    /// Add an element, returning its index afterwards.
    fn put(&mut self, item: T) -> usize;

    /// Remove the next element, returning it together with the index it had.
    fn take(&mut self) -> Option<(T, usize)>;

    /// The element `take` would remove.
    fn next(&self) -> Option<&T>;

    fn len(&self) -> usize;

    fn shrink_to_fit(&mut self);

    fn iter(&self) -> Self::Iter<'_>;
}

/// FIFO: elements are added at the back and taken from the front.
impl<T: Send + 'static> Storage<T> for VecDeque<T> {
    type Iter<'a> = vec_deque::Iter<'a, T>;

    fn with_capacity(capacity: usize) -> Self {
        VecDeque::with_capacity(capacity)
    }

    fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        VecDeque::try_reserve(self, additional)
    }

    fn put(&mut self, item: T) -> usize {
        self.push_back(item);
        self.len() - 1
    }

    fn take(&mut self) -> Option<(T, usize)> {
        self.pop_front().map(|item| (item, 0))
    }

    fn next(&self) -> Option<&T> {
        self.front()
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn shrink_to_fit(&mut self) {
        VecDeque::shrink_to_fit(self);
    }

    fn iter(&self) -> Self::Iter<'_> {
        VecDeque::iter(self)
    }
}

/// LIFO: the top of the stack is the end of the `Vec`, but iteration starts
/// at the top, so the top always has index `0`.
impl<T: Send + 'static> Storage<T> for Vec<T> {
    type Iter<'a> = iter::Rev<slice::Iter<'a, T>>;

    fn with_capacity(capacity: usize) -> Self {
        Vec::with_capacity(capacity)
    }

    fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        Vec::try_reserve(self, additional)
    }

    fn put(&mut self, item: T) -> usize {
        self.push(item);
        0
    }

    fn take(&mut self) -> Option<(T, usize)> {
        self.pop().map(|item| (item, 0))
    }

    fn next(&self) -> Option<&T> {
        self.last()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn shrink_to_fit(&mut self) {
        Vec::shrink_to_fit(self);
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.as_slice().iter().rev()
    }
}
