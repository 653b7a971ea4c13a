use crossbeam_utils::Backoff;
use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicU8, Ordering};
use std::thread::{self, Thread};

const PENDING: u8 = 0;
const READY: u8 = 1;

/// Why a parked thread was released without its operation completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Failure {
    /// The channel was closed while the thread was parked.
    Closed,
    /// The channel state was torn down while the thread was parked.
    Disconnected,
}

/// A single-shot carrier of a value or a failure between two threads.
///
/// The parking thread creates the signal, leaves a shared alias of it where
/// the counterpart can find it, and calls [`wait`](Signal::wait). The
/// counterpart calls [`complete`](Signal::complete) or
/// [`fail`](Signal::fail) exactly once; both are non-blocking and safe to
/// call while holding the channel mutex. `wait` must only be called with
/// the mutex released.
pub(crate) struct Signal<V> {
    state: AtomicU8,
    slot: UnsafeCell<Option<Result<V, Failure>>>,
    thread: Thread,
}

// The slot is written once by the completing thread before the release
// store on `state`, and read once by the waiting thread after the acquire
// load observes READY.
unsafe impl<V: Send> Send for Signal<V> {}
unsafe impl<V: Send> Sync for Signal<V> {}

impl<V> Signal<V> {
    /// Creates a signal owned by the current thread.
    pub(crate) fn new() -> Self {
        Self {
            state: AtomicU8::new(PENDING),
            slot: UnsafeCell::new(None),
            thread: thread::current(),
        }
    }

    /// Hands `value` to the waiting thread and wakes it.
    pub(crate) fn complete(&self, value: V) {
        self.finish(Ok(value));
    }

    /// Releases the waiting thread with `failure` instead of a value.
    pub(crate) fn fail(&self, failure: Failure) {
        self.finish(Err(failure));
    }

    fn finish(&self, outcome: Result<V, Failure>) {
        unsafe { *self.slot.get() = Some(outcome) };
        self.state.store(READY, Ordering::Release);
        self.thread.unpark();
    }

    /// Blocks the current thread until the counterpart finishes the signal.
    ///
    /// Spins briefly before parking; unparks from stale tokens and spurious
    /// wakeups re-check the state.
    pub(crate) fn wait(&self) -> Result<V, Failure> {
        let backoff = Backoff::new();
        while self.state.load(Ordering::Acquire) == PENDING {
            if backoff.is_completed() {
                thread::park();
            } else {
                backoff.snooze();
            }
        }
        match unsafe { &mut *self.slot.get() }.take() {
            Some(outcome) => outcome,
            None => unreachable!("signal marked ready with an empty slot"),
        }
    }
}
