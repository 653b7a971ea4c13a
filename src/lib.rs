//! Go-style synchronizing FIFO channels for threads.
//!
//! This crate provides a typed, optionally-buffered channel through which
//! threads exchange values with built-in synchronization. A single cloneable
//! handle type carries the whole surface: any thread holding a [`Chan`] may
//! send, receive, and close.
//!
//! # Key Features
//!
//! - **Rendezvous or buffered**: capacity zero makes every send wait for a
//!   receiver; a positive capacity gives bounded producer/consumer queueing.
//! - **FIFO end to end**: senders are matched to receivers in arrival order,
//!   and buffered delivery order equals send order.
//! - **Closing protocol**: [`Chan::close`] releases every parked thread with
//!   a well-defined outcome, and buffered elements stay receivable.
//! - **Non-blocking variants**: [`Chan::try_send`] and [`Chan::try_recv`]
//!   are the building blocks for composing multi-way selection by hand.
//! - **Draining**: [`Chan::for_each`] and the iterator surface consume a
//!   channel until it is closed and empty.
//!
//! # Example
//!
//! ```rust
//! use oluk::channel;
//! use std::thread;
//!
//! // A rendezvous channel: each send below parks until the main thread
//! // is ready to take the value.
//! let ch = channel(0);
//!
//! let tx = ch.clone();
//! thread::spawn(move || {
//!     for i in 0..3 {
//!         tx.send(i).unwrap();
//!     }
//!     tx.close().unwrap();
//! });
//!
//! let mut seen = Vec::new();
//! ch.for_each(|v| seen.push(v));
//! assert_eq!(seen, [0, 1, 2]);
//! ```
//!
//! # Blocking model
//!
//! Blocked sends and receives return only upon delivery, channel close, or
//! channel teardown; there are no timeouts and no external cancellation.
//! The internals are a single mutex over the channel state plus atomic
//! fast-path screens for the non-blocking variants; the mutex is never held
//! while a thread is parked.

#![warn(missing_docs)]

mod buffer;
mod channel;
mod error;
mod iter;
mod signal;

pub use channel::Chan;
pub use error::{CloseError, RecvError, SendError, TryRecvError, TrySendError};
pub use iter::{IntoIter, Iter};

/// Creates a channel with room for `capacity` buffered elements.
///
/// A capacity of zero creates a rendezvous channel: every send blocks until
/// a receiver takes the value directly.
pub fn channel<T>(capacity: usize) -> Chan<T> {
    Chan::new(capacity)
}
