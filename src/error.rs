use std::error::Error;
use std::fmt;

/// Typed errors for a blocking [`send`](crate::Chan::send).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError {
    /// The channel was already closed when the send started.
    Closed,
    /// The channel was closed while the send was parked waiting for room.
    ClosedWhileWaiting,
    /// The channel state was torn down while the send was parked.
    Disconnected,
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::Closed => write!(f, "send on closed channel"),
            SendError::ClosedWhileWaiting => {
                write!(f, "channel closed while send was waiting")
            }
            SendError::Disconnected => {
                write!(f, "channel dropped while send was waiting")
            }
        }
    }
}

impl Error for SendError {}

/// Typed errors for a blocking [`recv`](crate::Chan::recv).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecvError {
    /// The channel is closed and fully drained; the clean end-of-stream
    /// outcome, not an exceptional condition.
    Closed,
    /// The channel state was torn down while the receive was parked.
    Disconnected,
}

impl fmt::Display for RecvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecvError::Closed => write!(f, "receive on closed and drained channel"),
            RecvError::Disconnected => {
                write!(f, "channel dropped while receive was waiting")
            }
        }
    }
}

impl Error for RecvError {}

/// Typed errors for [`try_send`](crate::Chan::try_send); both kinds hand
/// the undelivered value back to the caller.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum TrySendError<T> {
    /// No receiver was waiting and no buffer slot was free.
    Full(T),
    /// The channel was already closed.
    Closed(T),
}

impl<T> TrySendError<T> {
    /// Unwraps the value that could not be sent.
    pub fn into_inner(self) -> T {
        match self {
            TrySendError::Full(value) | TrySendError::Closed(value) => value,
        }
    }
}

impl<T> fmt::Debug for TrySendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrySendError::Full(..) => f.pad("Full(..)"),
            TrySendError::Closed(..) => f.pad("Closed(..)"),
        }
    }
}

impl<T> fmt::Display for TrySendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrySendError::Full(..) => write!(f, "channel full, send would block"),
            TrySendError::Closed(..) => write!(f, "send on closed channel"),
        }
    }
}

impl<T> Error for TrySendError<T> {}

/// Typed errors for [`try_recv`](crate::Chan::try_recv).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryRecvError {
    /// Nothing was buffered and no sender was waiting.
    Empty,
    /// The channel is closed and fully drained.
    Closed,
}

impl fmt::Display for TryRecvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TryRecvError::Empty => write!(f, "channel empty, receive would block"),
            TryRecvError::Closed => write!(f, "receive on closed and drained channel"),
        }
    }
}

impl Error for TryRecvError {}

/// Error for [`close`](crate::Chan::close) on an already-closed channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseError;

impl fmt::Display for CloseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "close of closed channel")
    }
}

impl Error for CloseError {}
