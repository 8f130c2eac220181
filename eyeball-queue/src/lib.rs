//! Observable queues and stacks.
//!
//! [`ObservableQueue<T>`] and [`ObservableStack<T>`] wrap a plain
//! `VecDeque<T>` / `Vec<T>` and tell observers about every change to their
//! contents or length. Mutations are applied synchronously and are visible
//! immediately; the resulting [`Notification`]s are handed to a
//! [`DispatchContext`] and delivered later, possibly on another thread,
//! without the mutating call ever waiting for observers.
//!
//! Every mutation produces one batch of notifications: a property change for
//! [`Property::Count`], one for [`Property::Indexer`] and finally the
//! [`CollectionChange`] itself. Batches of one container are delivered in
//! the order the mutations were applied.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//!
//! use eyeball_queue::{
//!     CollectionChange, DispatchContext, Notification, ObservableQueue, Property,
//! };
//!
//! let mut queue: ObservableQueue<i32> = ObservableQueue::with_context(DispatchContext::inline());
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = Arc::clone(&seen);
//! let _subscription =
//!     queue.observe(move |n: &Notification<i32>| sink.lock().unwrap().push(n.clone()));
//!
//! queue.enqueue(5);
//! assert_eq!(queue.dequeue().unwrap(), 5);
//!
//! assert_eq!(
//!     *seen.lock().unwrap(),
//!     [
//!         Notification::PropertyChanged(Property::Count),
//!         Notification::PropertyChanged(Property::Indexer),
//!         Notification::CollectionChanged(CollectionChange::Add { item: 5, index: 0 }),
//!         Notification::PropertyChanged(Property::Count),
//!         Notification::PropertyChanged(Property::Indexer),
//!         Notification::CollectionChanged(CollectionChange::Remove { item: 5, index: 0 }),
//!     ]
//! );
//! ```
//!
//! Cargo features:
//!
//! - `tracing`: Emit [tracing] events when updates are applied and
//!   notifications are dispatched, and when an observer panics
//! - `serde`: Implement `serde::Serialize` for the notification types
//!
//! [tracing]: https://docs.rs/tracing

mod container;
mod dispatch;
mod error;
mod notification;
mod observer;
mod queue;
mod stack;

pub use self::{
    dispatch::{DispatchContext, Job},
    error::{Error, Result},
    notification::{ChangeKind, CollectionChange, Notification, Property},
    observer::{Observer, Subscriber, Subscription},
    queue::ObservableQueue,
    stack::ObservableStack,
};
