use std::{mem, sync::Arc};

use crate::{
    dispatch::Dispatcher,
    notification::NotificationBatch,
    observer::{ObserverRegistry, Subscriber, Subscription},
    CollectionChange, DispatchContext, Error, Observer, Result,
};

mod storage;

pub(crate) use self::storage::Storage;

/// The machinery shared by all observable containers: the storage slot,
/// its observers and the dispatcher delivering to them.
pub(crate) struct Container<T, S> {
    storage: S,
    observers: ObserverRegistry<T>,
    dispatcher: Dispatcher,
}

impl<T, S> Container<T, S>
where
    T: Clone + Send + Sync + 'static,
    S: Storage<T>,
{
    pub(crate) fn new(storage: S, context: DispatchContext) -> Self {
        Self { storage, observers: ObserverRegistry::new(), dispatcher: Dispatcher::new(context) }
    }

    pub(crate) fn with_capacity(capacity: usize, context: DispatchContext) -> Self {
        Self::new(S::with_capacity(capacity), context)
    }

    pub(crate) fn try_with_capacity(capacity: usize, context: DispatchContext) -> Result<Self> {
        let mut storage = S::default();
        storage
            .try_reserve(capacity)
            .map_err(|e| Error::invalid_argument("capacity", e.to_string()))?;
        Ok(Self::new(storage, context))
    }

    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    pub(crate) fn into_storage(self) -> S {
        self.storage
    }

    pub(crate) fn observe(&self, observer: impl Observer<T> + 'static) -> Subscription {
        self.observers.register(Arc::new(observer))
    }

    pub(crate) fn subscribe(&self) -> Subscriber<T> {
        Subscriber::new(&self.observers)
    }

    pub(crate) fn put(&mut self, item: T) {
        let index = self.storage.put(item.clone());
        self.notify(CollectionChange::Add { item, index });
    }

    pub(crate) fn take(&mut self) -> Result<T> {
        let (item, index) = self.storage.take().ok_or(Error::EmptyContainer)?;
        self.notify(CollectionChange::Remove { item: item.clone(), index });
        Ok(item)
    }

    pub(crate) fn next(&self) -> Result<&T> {
        self.storage.next().ok_or(Error::EmptyContainer)
    }

    /// Swap in a fresh slot and report a single reset, no matter how many
    /// elements there were.
    pub(crate) fn clear(&mut self) {
        let detached = mem::take(&mut self.storage);
        self.notify(CollectionChange::Reset);

        if detached.len() == 0 || !mem::needs_drop::<T>() {
            drop(detached);
        } else {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                target: "eyeball_queue::dispatch",
                "Offloading teardown of {} elements",
                detached.len()
            );
            self.dispatcher.offload_drop(detached);
        }
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.storage.shrink_to_fit();
    }

    pub(crate) fn len(&self) -> usize {
        self.storage.len()
    }

    pub(crate) fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.storage.iter().any(|x| x == item)
    }

    pub(crate) fn to_vec(&self) -> Vec<T> {
        self.storage.iter().cloned().collect()
    }

    pub(crate) fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<()> {
        let len = self.storage.len();
        let Some(room) = dest.len().checked_sub(offset) else {
            return Err(Error::invalid_argument(
                "offset",
                format!("offset {offset} is past the end of the destination ({})", dest.len()),
            ));
        };
        if room < len {
            return Err(Error::invalid_argument(
                "dest",
                format!("{len} elements don't fit into {room} slots after offset {offset}"),
            ));
        }

        for (slot, item) in dest[offset..].iter_mut().zip(self.storage.iter()) {
            slot.clone_from(item);
        }
        Ok(())
    }

    fn notify(&self, change: CollectionChange<T>) {
        let observers = self.observers.snapshot();
        if observers.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                target: "eyeball_queue::dispatch",
                "Skipping notification, there are no observers"
            );
            return;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "eyeball_queue::dispatch",
            "Scheduling {:?} notification for {} observers",
            change.kind(),
            observers.len()
        );

        let batch = NotificationBatch::new(change);
        self.dispatcher.dispatch(Box::new(move || batch.deliver(&observers)));
    }
}
