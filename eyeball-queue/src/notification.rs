use std::fmt;

/// A property of an observable container whose value may have changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Property {
    /// The number of elements.
    Count,
    /// The positional view of the elements.
    ///
    /// Signals to list-like observers that any index they hold may now refer
    /// to a different element.
    #[cfg_attr(feature = "serde", serde(rename = "Item[]"))]
    Indexer,
}

impl Property {
    /// The name under which this property is reported to observers that
    /// identify properties by string.
    pub fn name(self) -> &'static str {
        match self {
            Property::Count => "Count",
            Property::Indexer => "Item[]",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The kind of a [`CollectionChange`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ChangeKind {
    /// An element was added.
    Add,
    /// An element was removed.
    Remove,
    /// The contents changed drastically.
    Reset,
}

/// A structural change to an observable container.
///
/// Indices refer to the container's iteration order: head to tail for an
/// [`ObservableQueue`](crate::ObservableQueue), top to bottom for an
/// [`ObservableStack`](crate::ObservableStack).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CollectionChange<T> {
    /// An element was added.
    Add {
        /// The new element.
        item: T,
        /// The index of the new element right after it was added.
        index: usize,
    },
    /// An element was removed.
    Remove {
        /// The removed element.
        item: T,
        /// The index the element had before it was removed.
        index: usize,
    },
    /// The container was cleared.
    ///
    /// Observers must not assume anything about the previous contents.
    Reset,
}

impl<T> CollectionChange<T> {
    /// The kind of this change.
    pub fn kind(&self) -> ChangeKind {
        match self {
            CollectionChange::Add { .. } => ChangeKind::Add,
            CollectionChange::Remove { .. } => ChangeKind::Remove,
            CollectionChange::Reset => ChangeKind::Reset,
        }
    }

    /// The element affected by this change, if any.
    pub fn item(&self) -> Option<&T> {
        match self {
            CollectionChange::Add { item, .. } | CollectionChange::Remove { item, .. } => {
                Some(item)
            }
            CollectionChange::Reset => None,
        }
    }

    /// The index affected by this change, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            CollectionChange::Add { index, .. } | CollectionChange::Remove { index, .. } => {
                Some(*index)
            }
            CollectionChange::Reset => None,
        }
    }

    /// Transform `CollectionChange<T>` into `CollectionChange<U>` by applying
    /// the given function to the contained item.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CollectionChange<U> {
        match self {
            CollectionChange::Add { item, index } => CollectionChange::Add { item: f(item), index },
            CollectionChange::Remove { item, index } => {
                CollectionChange::Remove { item: f(item), index }
            }
            CollectionChange::Reset => CollectionChange::Reset,
        }
    }

    /// Applies this change to a `Vec` mirroring the container in iteration
    /// order.
    ///
    /// This is useful to keep a copy of the container in sync, with
    /// potentially the elements [`map`](Self::map)ped.
    ///
    /// # Panics
    ///
    /// When adding or removing past the end of `vec`.
    pub fn apply(self, vec: &mut Vec<T>) {
        match self {
            CollectionChange::Add { item, index } => {
                vec.insert(index, item);
            }
            CollectionChange::Remove { index, .. } => {
                vec.remove(index);
            }
            CollectionChange::Reset => {
                vec.clear();
            }
        }
    }
}

/// A single notification delivered to observers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Notification<T> {
    /// The value of a property may have changed.
    PropertyChanged(Property),
    /// The contents of the container changed.
    CollectionChanged(CollectionChange<T>),
}

/// The notifications produced by one mutation.
///
/// Property changes always come before the collection change, so that an
/// observer reacting to the collection change can already rely on the new
/// [`Count`](Property::Count).
#[derive(Debug)]
pub(crate) struct NotificationBatch<T> {
    change: CollectionChange<T>,
}

impl<T> NotificationBatch<T> {
    pub(crate) const PROPERTIES: [Property; 2] = [Property::Count, Property::Indexer];

    pub(crate) fn new(change: CollectionChange<T>) -> Self {
        Self { change }
    }

    pub(crate) fn change(&self) -> &CollectionChange<T> {
        &self.change
    }
}
