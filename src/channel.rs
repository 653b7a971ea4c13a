use crate::buffer::Buffer;
use crate::error::{CloseError, RecvError, SendError, TryRecvError, TrySendError};
use crate::signal::{Failure, Signal};
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A sender parked on a full (or rendezvous) channel, together with the
/// value it wants to deliver. The value is owned by the channel until a
/// receiver or `close` takes the entry off the queue.
struct SendWaiter<T> {
    signal: Arc<Signal<()>>,
    value: T,
}

/// The mutex-guarded portion of the channel state.
struct State<T> {
    buffer: Buffer<T>,
    send_waiters: VecDeque<SendWaiter<T>>,
    recv_waiters: VecDeque<Arc<Signal<T>>>,
}

struct Channel<T> {
    cap: usize,
    /// Monotonic; written only under the lock, readable without it.
    closed: AtomicBool,
    /// Mirror of `buffer.len()`, maintained under the lock so the
    /// non-blocking screens can read it without locking.
    len: AtomicUsize,
    parked_sends: AtomicUsize,
    parked_recvs: AtomicUsize,
    state: Mutex<State<T>>,
}

impl<T> Channel<T> {
    fn new(cap: usize) -> Self {
        Self {
            cap,
            closed: AtomicBool::new(false),
            len: AtomicUsize::new(0),
            parked_sends: AtomicUsize::new(0),
            parked_recvs: AtomicUsize::new(0),
            state: Mutex::new(State {
                buffer: Buffer::new(cap),
                send_waiters: VecDeque::new(),
                recv_waiters: VecDeque::new(),
            }),
        }
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Tries to complete a send under the lock: hand the value to the head
    /// parked receiver, else stash it in the buffer. Hands the value back
    /// if neither is possible.
    fn deliver(&self, state: &mut State<T>, value: T) -> Result<(), T> {
        if let Some(receiver) = state.recv_waiters.pop_front() {
            self.parked_recvs.fetch_sub(1, Ordering::Release);
            receiver.complete(value);
            return Ok(());
        }
        if !state.buffer.is_full() {
            state.buffer.push(value);
            self.len.store(state.buffer.len(), Ordering::Release);
            return Ok(());
        }
        Err(value)
    }

    /// Tries to complete a receive under the lock: take from the head
    /// parked sender, else from the buffer.
    fn take(&self, state: &mut State<T>) -> Option<T> {
        if let Some(SendWaiter { signal, value }) = state.send_waiters.pop_front() {
            self.parked_sends.fetch_sub(1, Ordering::Release);
            let out = if state.buffer.capacity() == 0 {
                // Rendezvous: the value moves straight across.
                value
            } else {
                // A parked sender means the buffer is at capacity: hand out
                // the oldest element and slot the parked value in at the
                // tail, keeping delivery order equal to send order.
                let oldest = match state.buffer.pop() {
                    Some(elem) => elem,
                    None => unreachable!("sender parked on a buffer with free room"),
                };
                state.buffer.push(value);
                oldest
            };
            signal.complete(());
            return Some(out);
        }
        let elem = state.buffer.pop()?;
        self.len.store(state.buffer.len(), Ordering::Release);
        Some(elem)
    }

    /// Releases every parked thread with `failure`. Values owned by parked
    /// senders are dropped; buffered elements stay for later receives.
    fn release_waiters(&self, state: &mut State<T>, failure: Failure) {
        while let Some(receiver) = state.recv_waiters.pop_front() {
            self.parked_recvs.fetch_sub(1, Ordering::Release);
            receiver.fail(failure);
        }
        while let Some(SendWaiter { signal, .. }) = state.send_waiters.pop_front() {
            self.parked_sends.fetch_sub(1, Ordering::Release);
            signal.fail(failure);
        }
    }
}

impl<T> Drop for Channel<T> {
    fn drop(&mut self) {
        // The last handle is gone. Nothing can be parked here through the
        // public surface (a parked thread borrows a live handle), but the
        // teardown still releases any waiter so it never hangs.
        let state = match self.state.get_mut() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        while let Some(receiver) = state.recv_waiters.pop_front() {
            receiver.fail(Failure::Disconnected);
        }
        while let Some(SendWaiter { signal, .. }) = state.send_waiters.pop_front() {
            signal.fail(Failure::Disconnected);
        }
    }
}

/// A handle to a synchronizing FIFO channel.
///
/// All clones of a handle alias the same underlying channel; any thread
/// holding one may send, receive, and close. The channel state lives until
/// the last handle is dropped.
///
/// # Examples
///
/// ```
/// use oluk::channel;
/// use std::thread;
///
/// let ch = channel(0);
/// let tx = ch.clone();
/// thread::spawn(move || {
///     tx.send(7).unwrap();
/// });
/// assert_eq!(ch.recv(), Ok(7));
/// ```
pub struct Chan<T> {
    inner: Arc<Channel<T>>,
}

impl<T> Clone for Chan<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Chan<T> {
    /// Creates a channel with room for `capacity` buffered elements.
    ///
    /// A capacity of zero creates a rendezvous channel: every send blocks
    /// until a receiver takes the value directly.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Channel::new(capacity)),
        }
    }

    /// Returns the fixed buffer capacity.
    pub fn capacity(&self) -> usize {
        self.inner.cap
    }

    /// Returns a snapshot of the number of buffered elements, without
    /// taking the lock. Always zero for a rendezvous channel.
    pub fn len(&self) -> usize {
        self.inner.len.load(Ordering::Acquire)
    }

    /// Returns true if no elements are buffered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the buffer is at capacity. A rendezvous channel is
    /// always full (and always empty).
    pub fn is_full(&self) -> bool {
        self.len() >= self.inner.cap
    }

    /// Returns true once [`close`](Chan::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// Returns true if both handles alias the same channel.
    pub fn same_channel(&self, other: &Chan<T>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Sends a value, blocking until a receiver or a buffer slot takes it.
    ///
    /// A waiting receiver is served directly, bypassing the buffer;
    /// otherwise the value is buffered if room exists; otherwise the
    /// calling thread parks until a receiver completes the transfer.
    ///
    /// # Errors
    ///
    /// [`SendError::Closed`] if the channel was already closed,
    /// [`SendError::ClosedWhileWaiting`] if it was closed while this send
    /// was parked. In both cases the value is dropped.
    pub fn send(&self, value: T) -> Result<(), SendError> {
        let mut state = self.inner.state.lock().unwrap();
        if self.inner.is_closed() {
            return Err(SendError::Closed);
        }
        match self.inner.deliver(&mut state, value) {
            Ok(()) => Ok(()),
            Err(value) => {
                debug_assert!(state.recv_waiters.is_empty());
                let signal = Arc::new(Signal::new());
                state.send_waiters.push_back(SendWaiter {
                    signal: signal.clone(),
                    value,
                });
                self.inner.parked_sends.fetch_add(1, Ordering::Release);
                // Park with the lock released; a receiver (or close) will
                // finish the transfer.
                drop(state);
                match signal.wait() {
                    Ok(()) => Ok(()),
                    Err(Failure::Closed) => Err(SendError::ClosedWhileWaiting),
                    Err(Failure::Disconnected) => Err(SendError::Disconnected),
                }
            }
        }
    }

    /// Sends a value only if it can be delivered without blocking.
    ///
    /// # Errors
    ///
    /// [`TrySendError::Full`] when no receiver is waiting and no buffer
    /// slot is free, [`TrySendError::Closed`] when the channel is closed.
    /// Both hand the value back.
    ///
    /// # Examples
    ///
    /// ```
    /// use oluk::{channel, TrySendError};
    ///
    /// let ch = channel(1);
    /// assert_eq!(ch.try_send(1), Ok(()));
    /// assert_eq!(ch.try_send(2), Err(TrySendError::Full(2)));
    /// ```
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        // Fast fail without the lock. Best effort: the locked path below
        // re-validates, so a stale read only costs a wasted lock round.
        if !self.inner.is_closed() {
            let cannot_accept = if self.inner.cap == 0 {
                self.inner.parked_recvs.load(Ordering::Acquire) == 0
            } else {
                self.inner.len.load(Ordering::Acquire) >= self.inner.cap
            };
            if cannot_accept {
                return Err(TrySendError::Full(value));
            }
        }

        let mut state = self.inner.state.lock().unwrap();
        if self.inner.is_closed() {
            return Err(TrySendError::Closed(value));
        }
        self.inner
            .deliver(&mut state, value)
            .map_err(TrySendError::Full)
    }

    /// Receives a value, blocking until one is available.
    ///
    /// A parked sender is served before the calling thread parks; on a
    /// buffered channel the oldest element always comes out first.
    ///
    /// # Errors
    ///
    /// [`RecvError::Closed`] once the channel is closed and every buffered
    /// element has been drained. This is the normal end-of-stream outcome:
    /// a receiver parked at close time gets it too.
    ///
    /// # Examples
    ///
    /// ```
    /// use oluk::{channel, RecvError};
    ///
    /// let ch = channel(2);
    /// ch.send(1).unwrap();
    /// ch.close().unwrap();
    /// assert_eq!(ch.recv(), Ok(1));
    /// assert_eq!(ch.recv(), Err(RecvError::Closed));
    /// ```
    pub fn recv(&self) -> Result<T, RecvError> {
        let mut state = self.inner.state.lock().unwrap();
        if self.inner.is_closed() && state.buffer.is_empty() {
            return Err(RecvError::Closed);
        }
        if let Some(value) = self.inner.take(&mut state) {
            return Ok(value);
        }
        let signal = Arc::new(Signal::new());
        state.recv_waiters.push_back(signal.clone());
        self.inner.parked_recvs.fetch_add(1, Ordering::Release);
        // Park with the lock released; a sender (or close) will hand over
        // a value or release us.
        drop(state);
        match signal.wait() {
            Ok(value) => Ok(value),
            Err(Failure::Closed) => Err(RecvError::Closed),
            Err(Failure::Disconnected) => Err(RecvError::Disconnected),
        }
    }

    /// Receives a value only if one is immediately available.
    ///
    /// # Errors
    ///
    /// [`TryRecvError::Empty`] when nothing is buffered and no sender is
    /// waiting, [`TryRecvError::Closed`] when the channel is closed and
    /// drained. A closed channel is never reported as `Empty`: closed is
    /// terminal and observable without parking.
    pub fn try_recv(&self) -> Result<T, TryRecvError> {
        // Fast fail without the lock. The emptiness read must come before
        // the closed read: reversed, a close that drains the channel
        // between the two loads would be reported as Empty instead of
        // Closed.
        let starved = if self.inner.cap == 0 {
            self.inner.parked_sends.load(Ordering::Acquire) == 0
        } else {
            self.inner.len.load(Ordering::Acquire) == 0
        };
        if starved && !self.inner.is_closed() {
            return Err(TryRecvError::Empty);
        }

        let mut state = self.inner.state.lock().unwrap();
        if self.inner.is_closed() && state.buffer.is_empty() {
            return Err(TryRecvError::Closed);
        }
        self.inner.take(&mut state).ok_or(TryRecvError::Empty)
    }

    /// Closes the channel: no further sends are accepted, and every parked
    /// thread is released. Parked receivers observe the end-of-stream
    /// outcome; parked senders get [`SendError::ClosedWhileWaiting`].
    /// Elements already buffered remain receivable.
    ///
    /// # Errors
    ///
    /// [`CloseError`] if the channel was already closed.
    pub fn close(&self) -> Result<(), CloseError> {
        let mut state = self.inner.state.lock().unwrap();
        if self.inner.is_closed() {
            return Err(CloseError);
        }
        self.inner.closed.store(true, Ordering::Release);
        self.inner.release_waiters(&mut state, Failure::Closed);
        Ok(())
    }
}

impl<T> fmt::Debug for Chan<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chan")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .field("closed", &self.is_closed())
            .finish()
    }
}
