use std::{fmt, iter, slice};

use crate::{container::Container, DispatchContext, Observer, Result, Subscriber, Subscription};

/// A last-in, first-out stack that notifies observers of every change.
///
/// Elements are indexed from the top (`0`) down, which is also the order
/// [`iter`][Self::iter] and [`to_vec`][Self::to_vec] use. Pushing reports an
/// [`Add`](crate::CollectionChange::Add) at index `0`, popping a
/// [`Remove`](crate::CollectionChange::Remove) at index `0`.
///
/// See [`ObservableQueue`](crate::ObservableQueue) for how notifications are
/// delivered; the two behave the same apart from the element order.
pub struct ObservableStack<T> {
    inner: Container<T, Vec<T>>,
}

impl<T: Clone + Send + Sync + 'static> ObservableStack<T> {
    /// Create a new, empty `ObservableStack` delivering notifications on
    /// [`DispatchContext::current()`].
    pub fn new() -> Self {
        Self::with_context(DispatchContext::current())
    }

    /// Create a new, empty `ObservableStack` delivering notifications on the
    /// given context.
    pub fn with_context(context: DispatchContext) -> Self {
        Self { inner: Container::new(Vec::new(), context) }
    }

    /// Create a new, empty `ObservableStack` with space for at least
    /// `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if the capacity overflows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_context(capacity, DispatchContext::current())
    }

    /// Like [`with_capacity`][Self::with_capacity], delivering notifications
    /// on the given context.
    pub fn with_capacity_and_context(capacity: usize, context: DispatchContext) -> Self {
        Self { inner: Container::with_capacity(capacity, context) }
    }

    /// Non-panicking version of [`with_capacity`][Self::with_capacity].
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        Self::try_with_capacity_and_context(capacity, DispatchContext::current())
    }

    /// Non-panicking version of
    /// [`with_capacity_and_context`][Self::with_capacity_and_context].
    pub fn try_with_capacity_and_context(
        capacity: usize,
        context: DispatchContext,
    ) -> Result<Self> {
        Ok(Self { inner: Container::try_with_capacity(capacity, context)? })
    }

    /// Create an `ObservableStack` by pushing the given elements in order, so
    /// the last one ends up on top.
    pub fn from_iter_with_context(
        items: impl IntoIterator<Item = T>,
        context: DispatchContext,
    ) -> Self {
        Self { inner: Container::new(items.into_iter().collect(), context) }
    }

    /// Turn the `ObservableStack` back into a regular `Vec`, with the top of
    /// the stack at the end.
    pub fn into_inner(self) -> Vec<T> {
        self.inner.into_storage()
    }

    /// Register an observer.
    pub fn observe(&self, observer: impl Observer<T> + 'static) -> Subscription {
        self.inner.observe(observer)
    }

    /// Obtain a new subscriber.
    pub fn subscribe(&self) -> Subscriber<T> {
        self.inner.subscribe()
    }

    /// Put an element on top of the stack and notify observers.
    pub fn push(&mut self, item: T) {
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "eyeball_queue::stack::update", "push");

        self.inner.put(item);
    }

    /// Remove the top element, notify observers and return the element.
    ///
    /// If the stack is empty, returns
    /// [`Error::EmptyContainer`](crate::Error::EmptyContainer) and observers
    /// are not notified.
    pub fn pop(&mut self) -> Result<T> {
        let item = self.inner.take()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(target: "eyeball_queue::stack::update", "pop");

        Ok(item)
    }

    /// Get the top element without removing it.
    pub fn peek(&self) -> Result<&T> {
        self.inner.next()
    }

    /// Remove all elements and notify observers with a single reset.
    pub fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "eyeball_queue::stack::update", "clear(len = {})", self.len());

        self.inner.clear();
    }

    /// Whether the stack contains an element equal to `item`.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.inner.contains(item)
    }

    /// Clone the elements, top first, into `dest` starting at `offset`.
    pub fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<()> {
        self.inner.copy_to(dest, offset)
    }

    /// Clone the elements, top first, into a new `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.to_vec()
    }

    /// Release unused capacity.
    pub fn shrink_to_fit(&mut self) {
        self.inner.shrink_to_fit();
    }

    /// The number of elements on the stack.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the elements, top first.
    pub fn iter(&self) -> iter::Rev<slice::Iter<'_, T>> {
        self.inner.storage().iter().rev()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for ObservableStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ObservableStack<T>
where
    T: fmt::Debug + Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableStack").field("items", &self.to_vec()).finish_non_exhaustive()
    }
}

impl<T: Clone + Send + Sync + 'static> FromIterator<T> for ObservableStack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_with_context(iter, DispatchContext::current())
    }
}

impl<T: Clone + Send + Sync + 'static> From<Vec<T>> for ObservableStack<T> {
    fn from(items: Vec<T>) -> Self {
        Self { inner: Container::new(items, DispatchContext::current()) }
    }
}

impl<'a, T: Clone + Send + Sync + 'static> IntoIterator for &'a ObservableStack<T> {
    type Item = &'a T;
    type IntoIter = iter::Rev<slice::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
