use oluk::{channel, CloseError, RecvError, SendError, TryRecvError, TrySendError};
use std::thread;
use std::time::Duration;

#[test]
fn test_close_drains_buffer_first() {
    let ch = channel(2);
    ch.send(1).unwrap();
    ch.send(2).unwrap();
    ch.close().unwrap();

    assert_eq!(ch.recv(), Ok(1));
    assert_eq!(ch.recv(), Ok(2));
    assert_eq!(ch.recv(), Err(RecvError::Closed));
    assert_eq!(ch.recv(), Err(RecvError::Closed));
}

#[test]
fn test_double_close_fails() {
    let ch = channel::<i32>(1);
    assert_eq!(ch.close(), Ok(()));
    assert_eq!(ch.close(), Err(CloseError));
}

#[test]
fn test_send_after_close_fails() {
    let ch = channel(1);
    ch.close().unwrap();
    assert_eq!(ch.send(1), Err(SendError::Closed));
    assert_eq!(ch.try_send(2), Err(TrySendError::Closed(2)));
}

#[test]
fn test_close_observable_without_blocking() {
    let ch = channel::<i32>(2);
    ch.close().unwrap();
    assert!(ch.is_closed());
    // Closed and empty reports Closed, never Empty
    assert_eq!(ch.try_recv(), Err(TryRecvError::Closed));
}

#[test]
fn test_close_keeps_buffered_values_for_try_recv() {
    let ch = channel(2);
    ch.send(9).unwrap();
    ch.close().unwrap();
    assert_eq!(ch.try_recv(), Ok(9));
    assert_eq!(ch.try_recv(), Err(TryRecvError::Closed));
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_close_releases_parked_receiver() {
    let ch = channel::<i32>(0);

    let rx = ch.clone();
    let t = thread::spawn(move || rx.recv());

    // Let the receiver park, then close underneath it
    thread::sleep(Duration::from_millis(100));
    ch.close().unwrap();

    assert_eq!(t.join().unwrap(), Err(RecvError::Closed));
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_close_releases_parked_sender() {
    let ch = channel(1);
    ch.send(1).unwrap();

    let tx = ch.clone();
    let t = thread::spawn(move || tx.send(2));

    // Let the sender park on the full buffer, then close underneath it
    thread::sleep(Duration::from_millis(100));
    ch.close().unwrap();

    assert_eq!(t.join().unwrap(), Err(SendError::ClosedWhileWaiting));

    // The parked sender's value was never delivered; the buffered one was
    assert_eq!(ch.recv(), Ok(1));
    assert_eq!(ch.recv(), Err(RecvError::Closed));
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_close_releases_all_parked_receivers() {
    let ch = channel::<i32>(0);

    let mut handles = vec![];
    for _ in 0..4 {
        let rx = ch.clone();
        handles.push(thread::spawn(move || rx.recv()));
    }

    thread::sleep(Duration::from_millis(150));
    ch.close().unwrap();

    for h in handles {
        assert_eq!(h.join().unwrap(), Err(RecvError::Closed));
    }
}
