use std::{
    fmt,
    panic::{catch_unwind, AssertUnwindSafe},
    sync::{Arc, OnceLock},
    thread,
};

use tokio::{
    runtime::Handle,
    sync::mpsc::{self, error::SendError, UnboundedReceiver, UnboundedSender},
};

/// A unit of work handed to a [`DispatchContext`].
///
/// Jobs created by this crate never panic, even if an observer does.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// The execution context on which a container delivers its notifications.
///
/// The context is captured when the container is constructed and used for
/// the container's entire lifetime.
#[derive(Clone)]
pub struct DispatchContext {
    kind: ContextKind,
}

#[derive(Clone)]
enum ContextKind {
    Inline,
    Tokio(Handle),
    Custom(Arc<dyn Fn(Job) + Send + Sync>),
}

impl DispatchContext {
    /// Deliver notifications synchronously, on the thread that mutates the
    /// container, before the mutating method returns.
    pub fn inline() -> Self {
        Self { kind: ContextKind::Inline }
    }

    /// Deliver notifications on the given tokio runtime.
    ///
    /// Every container constructed with this context spawns its own delivery
    /// task, so notifications of one container are delivered in the order the
    /// mutations happened, while separate containers don't wait on each
    /// other.
    pub fn tokio(handle: Handle) -> Self {
        Self { kind: ContextKind::Tokio(handle) }
    }

    /// Deliver notifications through an arbitrary scheduling function, for
    /// example one that posts jobs to a UI event loop.
    ///
    /// The function must run the jobs it receives in the order it receives
    /// them, otherwise observers can see changes out of order.
    pub fn from_fn(submit: impl Fn(Job) + Send + Sync + 'static) -> Self {
        Self { kind: ContextKind::Custom(Arc::new(submit)) }
    }

    /// The tokio runtime the calling thread is running in, or
    /// [`inline`][Self::inline] if there is none.
    pub fn current() -> Self {
        match Handle::try_current() {
            Ok(handle) => Self::tokio(handle),
            Err(_) => Self::inline(),
        }
    }
}

impl Default for DispatchContext {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Debug for DispatchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ContextKind::Inline => f.write_str("DispatchContext::Inline"),
            ContextKind::Tokio(_) => f.write_str("DispatchContext::Tokio"),
            ContextKind::Custom(_) => f.write_str("DispatchContext::Custom"),
        }
    }
}

/// Schedules the jobs of a single container on its [`DispatchContext`].
pub(crate) struct Dispatcher {
    target: Target,
}

enum Target {
    Inline,
    Serial { handle: Handle, jobs: UnboundedSender<Job> },
    Custom(Arc<dyn Fn(Job) + Send + Sync>),
}

impl Dispatcher {
    pub(crate) fn new(context: DispatchContext) -> Self {
        let target = match context.kind {
            ContextKind::Inline => Target::Inline,
            ContextKind::Tokio(handle) => {
                let (jobs, rx) = mpsc::unbounded_channel();
                handle.spawn(DeliveryTask { rx }.run());
                Target::Serial { handle, jobs }
            }
            ContextKind::Custom(submit) => Target::Custom(submit),
        };

        Self { target }
    }

    /// Schedule a job without waiting for it to run.
    pub(crate) fn dispatch(&self, job: Job) {
        match &self.target {
            Target::Inline => job(),
            Target::Serial { jobs, .. } => {
                if let Err(SendError(job)) = jobs.send(job) {
                    // The runtime was shut down and took the delivery task
                    // with it.
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        target: "eyeball_queue::dispatch",
                        "Delivery task is gone, running notification job inline"
                    );
                    job();
                }
            }
            Target::Custom(submit) => submit(job),
        }
    }

    /// Drop `value` away from the calling thread.
    pub(crate) fn offload_drop<V: Send + 'static>(&self, value: V) {
        match &self.target {
            Target::Serial { handle, .. } => {
                handle.spawn_blocking(move || drop(value));
            }
            Target::Inline | Target::Custom(_) => match teardown_thread() {
                Some(garbage) => {
                    // Only fails if the teardown thread is gone, in which case
                    // the value comes back and is dropped right here.
                    let _res = garbage.send(Box::new(value));
                }
                None => drop(value),
            },
        }
    }
}

/// Runs the jobs of one container, in order.
///
/// Finishes once the container is dropped and the remaining jobs have run.
/// If the runtime shuts down first, the future is dropped and the jobs still
/// queued at that point run on the thread dropping it, so none are lost.
struct DeliveryTask {
    rx: UnboundedReceiver<Job>,
}

impl DeliveryTask {
    async fn run(mut self) {
        while let Some(job) = self.rx.recv().await {
            job();
        }
    }
}

impl Drop for DeliveryTask {
    fn drop(&mut self) {
        while let Ok(job) = self.rx.try_recv() {
            job();
        }
    }
}

type Garbage = Box<dyn Send>;

/// The thread dropping values for containers that aren't on a tokio runtime.
///
/// Started on first use and shared by all containers. `None` if it couldn't be
/// spawned.
fn teardown_thread() -> Option<&'static UnboundedSender<Garbage>> {
    static TEARDOWN: OnceLock<Option<UnboundedSender<Garbage>>> = OnceLock::new();

    TEARDOWN
        .get_or_init(|| {
            let (tx, mut rx) = mpsc::unbounded_channel::<Garbage>();
            let res = thread::Builder::new().name("eyeball-queue-teardown".to_owned()).spawn(
                move || {
                    while let Some(garbage) = rx.blocking_recv() {
                        // A panicking destructor must not take the thread down.
                        let _ = catch_unwind(AssertUnwindSafe(move || drop(garbage)));
                    }
                },
            );

            match res {
                Ok(_) => Some(tx),
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        target: "eyeball_queue::dispatch",
                        "Failed to spawn teardown thread, dropping inline: {_e}"
                    );
                    None
                }
            }
        })
        .as_ref()
}
