use thiserror::Error;

/// Errors returned by the operations of [`ObservableQueue`] and
/// [`ObservableStack`].
///
/// A failed operation never changes the container and never schedules a
/// notification.
///
/// [`ObservableQueue`]: crate::ObservableQueue
/// [`ObservableStack`]: crate::ObservableStack
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An element was requested from an empty container.
    #[error("the container is empty")]
    EmptyContainer,

    /// An argument was out of the accepted range.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// The name of the offending argument.
        name: &'static str,
        /// Why the argument was rejected.
        reason: String,
    },
}

impl Error {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument { name, reason: reason.into() }
    }
}

/// Alias for `std::result::Result` with this crate's [`Error`] as the default
/// error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
