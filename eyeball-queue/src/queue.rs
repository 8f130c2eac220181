use std::{
    collections::{vec_deque, VecDeque},
    fmt,
};

use crate::{container::Container, DispatchContext, Observer, Result, Subscriber, Subscription};

/// A first-in, first-out queue that notifies observers of every change.
///
/// Elements are indexed from the head (`0`) to the tail. Enqueuing reports an
/// [`Add`](crate::CollectionChange::Add) at the new tail index, dequeuing a
/// [`Remove`](crate::CollectionChange::Remove) at index `0` and clearing a
/// single [`Reset`](crate::CollectionChange::Reset).
///
/// The queue itself is not synchronized: mutate it from one place at a time,
/// like any other `&mut`-based collection. Only notification delivery may
/// happen elsewhere, as determined by the queue's [`DispatchContext`].
pub struct ObservableQueue<T> {
    inner: Container<T, VecDeque<T>>,
}

impl<T: Clone + Send + Sync + 'static> ObservableQueue<T> {
    /// Create a new, empty `ObservableQueue` delivering notifications on
    /// [`DispatchContext::current()`].
    pub fn new() -> Self {
        Self::with_context(DispatchContext::current())
    }

    /// Create a new, empty `ObservableQueue` delivering notifications on the
    /// given context.
    pub fn with_context(context: DispatchContext) -> Self {
        Self { inner: Container::new(VecDeque::new(), context) }
    }

    /// Create a new, empty `ObservableQueue` with space for at least
    /// `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if the capacity overflows. See
    /// [`try_with_capacity`][Self::try_with_capacity] for a non-panicking
    /// version.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_context(capacity, DispatchContext::current())
    }

    /// Create a new, empty `ObservableQueue` with space for at least
    /// `capacity` elements, delivering notifications on the given context.
    ///
    /// # Panics
    ///
    /// Panics if the capacity overflows.
    pub fn with_capacity_and_context(capacity: usize, context: DispatchContext) -> Self {
        Self { inner: Container::with_capacity(capacity, context) }
    }

    /// Create a new, empty `ObservableQueue` with space for at least
    /// `capacity` elements.
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
    /// the space can't be reserved.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        Self::try_with_capacity_and_context(capacity, DispatchContext::current())
    }

    /// Like [`try_with_capacity`][Self::try_with_capacity], delivering
    /// notifications on the given context.
    pub fn try_with_capacity_and_context(
        capacity: usize,
        context: DispatchContext,
    ) -> Result<Self> {
        Ok(Self { inner: Container::try_with_capacity(capacity, context)? })
    }

    /// Create an `ObservableQueue` holding the given elements, the first one
    /// at the head, delivering notifications on the given context.
    pub fn from_iter_with_context(
        items: impl IntoIterator<Item = T>,
        context: DispatchContext,
    ) -> Self {
        Self { inner: Container::new(items.into_iter().collect(), context) }
    }

    /// Turn the `ObservableQueue` back into a regular `VecDeque`.
    ///
    /// Notifications that were already scheduled are still delivered.
    pub fn into_inner(self) -> VecDeque<T> {
        self.inner.into_storage()
    }

    /// Register an observer.
    ///
    /// The observer is told about every change made after this call, until
    /// the returned [`Subscription`] is dropped.
    pub fn observe(&self, observer: impl Observer<T> + 'static) -> Subscription {
        self.inner.observe(observer)
    }

    /// Obtain a new subscriber.
    ///
    /// The subscriber only receives changes made after this call. To mirror
    /// the queue, take a [`to_vec`][Self::to_vec] snapshot right before
    /// subscribing, without mutating the queue in between.
    pub fn subscribe(&self) -> Subscriber<T> {
        self.inner.subscribe()
    }

    /// Add an element at the tail of the queue and notify observers.
    pub fn enqueue(&mut self, item: T) {
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "eyeball_queue::queue::update", "enqueue");

        self.inner.put(item);
    }

    /// Remove the element at the head of the queue, notify observers and
    /// return the element.
    ///
    /// If the queue is empty, returns
    /// [`Error::EmptyContainer`](crate::Error::EmptyContainer) and observers
    /// are not notified.
    pub fn dequeue(&mut self) -> Result<T> {
        let item = self.inner.take()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(target: "eyeball_queue::queue::update", "dequeue");

        Ok(item)
    }

    /// Get the element at the head of the queue without removing it.
    ///
    /// If the queue is empty, returns
    /// [`Error::EmptyContainer`](crate::Error::EmptyContainer).
    pub fn peek(&self) -> Result<&T> {
        self.inner.next()
    }

    /// Remove all elements and notify observers with a single reset.
    ///
    /// The removed elements are dropped in the background rather than by the
    /// caller.
    pub fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "eyeball_queue::queue::update", "clear(len = {})", self.len());

        self.inner.clear();
    }

    /// Whether the queue contains an element equal to `item`.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.inner.contains(item)
    }

    /// Clone the elements, head first, into `dest` starting at `offset`.
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
    /// `offset` is past the end of `dest` or the elements don't fit.
    pub fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<()> {
        self.inner.copy_to(dest, offset)
    }

    /// Clone the elements, head first, into a new `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.to_vec()
    }

    /// Release unused capacity.
    ///
    /// Capacity is not observable, so observers are not notified.
    pub fn shrink_to_fit(&mut self) {
        self.inner.shrink_to_fit();
    }

    /// The number of elements in the queue.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the elements, head first.
    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.inner.storage().iter()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for ObservableQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ObservableQueue<T>
where
    T: fmt::Debug + Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableQueue")
            .field("items", self.inner.storage())
            .finish_non_exhaustive()
    }
}

impl<T: Clone + Send + Sync + 'static> FromIterator<T> for ObservableQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_iter_with_context(iter, DispatchContext::current())
    }
}

impl<T: Clone + Send + Sync + 'static> From<VecDeque<T>> for ObservableQueue<T> {
    fn from(items: VecDeque<T>) -> Self {
        Self { inner: Container::new(items, DispatchContext::current()) }
    }
}

impl<T: Clone + Send + Sync + 'static> From<Vec<T>> for ObservableQueue<T> {
    fn from(items: Vec<T>) -> Self {
        VecDeque::from(items).into()
    }
}

impl<'a, T: Clone + Send + Sync + 'static> IntoIterator for &'a ObservableQueue<T> {
    type Item = &'a T;
    type IntoIter = vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
