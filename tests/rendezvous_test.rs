use oluk::channel;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn test_rendezvous_transfer() {
    let ch = channel(0);

    let tx = ch.clone();
    let t = thread::spawn(move || {
        tx.send(7).unwrap();
    });

    assert_eq!(ch.recv(), Ok(7));
    t.join().unwrap();
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_sender_parks_until_received() {
    let ch = channel(0);
    let sent = Arc::new(AtomicBool::new(false));

    let tx = ch.clone();
    let sent2 = sent.clone();
    let t = thread::spawn(move || {
        tx.send(7).unwrap();
        sent2.store(true, Ordering::SeqCst);
    });

    // The send must not return before a receiver takes the value
    thread::sleep(Duration::from_millis(100));
    assert!(!sent.load(Ordering::SeqCst));

    assert_eq!(ch.recv(), Ok(7));
    t.join().unwrap();
    assert!(sent.load(Ordering::SeqCst));
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_two_parked_senders_served_in_order() {
    let ch = channel(0);

    let tx1 = ch.clone();
    let t1 = thread::spawn(move || {
        tx1.send(5).unwrap();
    });
    thread::sleep(Duration::from_millis(100));

    let tx2 = ch.clone();
    let t2 = thread::spawn(move || {
        tx2.send(7).unwrap();
    });
    thread::sleep(Duration::from_millis(100));

    assert_eq!(ch.recv(), Ok(5));
    assert_eq!(ch.recv(), Ok(7));

    t1.join().unwrap();
    t2.join().unwrap();
}

#[test]
fn test_single_sender_order_preserved() {
    let ch = channel(0);

    let tx = ch.clone();
    let t = thread::spawn(move || {
        for i in 0..100 {
            tx.send(i).unwrap();
        }
    });

    for i in 0..100 {
        assert_eq!(ch.recv(), Ok(i));
    }
    t.join().unwrap();
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_parked_receivers_served_in_order() {
    let ch = channel(150);

    let rx1 = ch.clone();
    let t1 = thread::spawn(move || {
        assert_eq!(rx1.recv(), Ok(0));
    });
    thread::sleep(Duration::from_millis(100));

    let rx2 = ch.clone();
    let t2 = thread::spawn(move || {
        assert_eq!(rx2.recv(), Ok(1));
    });
    thread::sleep(Duration::from_millis(100));

    let tx = ch.clone();
    let t3 = thread::spawn(move || {
        tx.send(0).unwrap();
        tx.send(1).unwrap();
    });

    t3.join().unwrap();
    t1.join().unwrap();
    t2.join().unwrap();
}
