use std::{
    fmt,
    panic::{catch_unwind, AssertUnwindSafe},
    pin::Pin,
    sync::{Arc, RwLock, Weak},
    task::{Context, Poll},
};

use futures_core::Stream;
use slab::Slab;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{notification::NotificationBatch, CollectionChange, Notification, Property};

/// Something that wants to be told about changes to an observable container.
///
/// Both methods default to doing nothing, so implementors only need to
/// override the ones they care about. Any closure taking a
/// `&`[`Notification<T>`] is an observer as well.
///
/// Observers run on the container's
/// [`DispatchContext`](crate::DispatchContext), not necessarily on the
/// thread that changed the container. If an observer panics, the panic is
/// caught and reported, and delivery continues with the next observer.
pub trait Observer<T>: Send + Sync {
    /// The value of `property` may have changed.
    fn property_changed(&self, property: Property) {
        let _ = property;
    }

    /// The contents of the container changed.
    fn collection_changed(&self, change: &CollectionChange<T>) {
        let _ = change;
    }
}

impl<T, F> Observer<T> for F
where
    T: Clone,
    F: Fn(&Notification<T>) + Send + Sync,
{
    fn property_changed(&self, property: Property) {
        self(&Notification::PropertyChanged(property));
    }

    fn collection_changed(&self, change: &CollectionChange<T>) {
        self(&Notification::CollectionChanged(change.clone()));
    }
}

type SharedObserver<T> = Arc<dyn Observer<T>>;
type ObserverSlab<T> = RwLock<Slab<SharedObserver<T>>>;

/// The observers currently registered with one container.
pub(crate) struct ObserverRegistry<T> {
    observers: Arc<ObserverSlab<T>>,
}

impl<T: 'static> ObserverRegistry<T> {
    pub(crate) fn new() -> Self {
        Self { observers: Arc::new(RwLock::new(Slab::new())) }
    }

    pub(crate) fn register(&self, observer: SharedObserver<T>) -> Subscription {
        let key = self.observers.write().unwrap().insert(observer);
        let weak = Arc::downgrade(&self.observers);
        let registry: Weak<dyn Unregister> = weak;
        Subscription { registry: Some(registry), key }
    }

    /// The observers a notification scheduled right now has to reach.
    pub(crate) fn snapshot(&self) -> Vec<SharedObserver<T>> {
        self.observers.read().unwrap().iter().map(|(_, observer)| Arc::clone(observer)).collect()
    }
}

impl<T: 'static> NotificationBatch<T> {
    /// Tell each of `observers` about every notification in this batch,
    /// property changes first.
    pub(crate) fn deliver(self, observers: &[SharedObserver<T>]) {
        for property in Self::PROPERTIES {
            for observer in observers {
                run_observer(|| observer.property_changed(property));
            }
        }

        let change = self.change();
        for observer in observers {
            run_observer(|| observer.collection_changed(change));
        }
    }
}

fn run_observer(f: impl FnOnce()) {
    if let Err(_payload) = catch_unwind(AssertUnwindSafe(f)) {
        #[cfg(feature = "tracing")]
        tracing::error!(
            target: "eyeball_queue::dispatch",
            "Observer panicked: {}",
            panic_message(&*_payload)
        );
    }
}

#[cfg(feature = "tracing")]
fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "<non-string payload>"
    }
}

trait Unregister: Send + Sync {
    fn unregister(&self, key: usize);
}

impl<T: 'static> Unregister for ObserverSlab<T> {
    fn unregister(&self, key: usize) {
        let _res = self.write().unwrap().try_remove(key);
        debug_assert!(_res.is_some());
    }
}

/// Keeps an observer registered with its container.
///
/// Dropping a `Subscription` unregisters the observer. Notifications that
/// were already scheduled when that happens may still reach it.
#[must_use = "dropping a `Subscription` unregisters the observer"]
pub struct Subscription {
    registry: Option<Weak<dyn Unregister>>,
    key: usize,
}

impl Subscription {
    /// Keep the observer registered for as long as the container lives.
    pub fn detach(mut self) {
        self.registry = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.take().and_then(|weak| weak.upgrade()) {
            registry.unregister(self.key);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("key", &self.key)
            .field("attached", &self.registry.is_some())
            .finish()
    }
}

/// A subscriber for the notifications of an observable container.
///
/// Use its [`Stream`] implementation to interact with it (futures-util and
/// other futures-related crates have extension traits with convenience
/// methods). The stream ends once the container was dropped and every
/// notification scheduled before that has been received.
#[derive(Debug)]
pub struct Subscriber<T> {
    rx: UnboundedReceiver<Notification<T>>,
    _subscription: Subscription,
}

impl<T: Clone + Send + Sync + 'static> Subscriber<T> {
    pub(crate) fn new(registry: &ObserverRegistry<T>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let _subscription = registry.register(Arc::new(ChannelObserver { tx }));
        Self { rx, _subscription }
    }

    /// Wait for the next notification.
    ///
    /// This method is a convenience so you don't have to import a `Stream`
    /// extension trait such as `futures::StreamExt` or
    /// `tokio_stream::StreamExt`.
    pub async fn next(&mut self) -> Option<Notification<T>> {
        self.rx.recv().await
    }

    /// Get the next notification if one has already been delivered, without
    /// waiting.
    pub fn next_now(&mut self) -> Option<Notification<T>> {
        self.rx.try_recv().ok()
    }
}

impl<T> Stream for Subscriber<T> {
    type Item = Notification<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

struct ChannelObserver<T> {
    tx: UnboundedSender<Notification<T>>,
}

impl<T: Clone + Send + Sync> Observer<T> for ChannelObserver<T> {
    fn property_changed(&self, property: Property) {
        // Only fails if the subscriber is gone.
        let _ = self.tx.send(Notification::PropertyChanged(property));
    }

    fn collection_changed(&self, change: &CollectionChange<T>) {
        let _ = self.tx.send(Notification::CollectionChanged(change.clone()));
    }
}
