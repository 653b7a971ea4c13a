//! A many-to-many pipeline: several senders partition a data set over one
//! rendezvous channel, several receivers drain it until close.

use oluk::channel;
use std::thread;

const SENDERS: usize = 3;
const RECEIVERS: usize = 3;
const SEND_UPTO: i32 = 1000;

fn main() {
    let ch = channel(0);

    let mut all_sent: Vec<i32> = (1..=SEND_UPTO).collect();
    let chunk_size = (all_sent.len() + SENDERS - 1) / SENDERS;

    let mut receivers = vec![];
    for _ in 0..RECEIVERS {
        let rx = ch.clone();
        receivers.push(thread::spawn(move || {
            let mut taken = Vec::new();
            rx.for_each(|num| taken.push(num));
            taken
        }));
    }

    let mut senders = vec![];
    for part in all_sent.chunks(chunk_size) {
        let tx = ch.clone();
        let part = part.to_vec();
        senders.push(thread::spawn(move || {
            for num in part {
                tx.send(num).unwrap();
            }
        }));
    }

    for s in senders {
        s.join().unwrap();
    }
    // All data is in flight or delivered; close so the drains terminate
    ch.close().unwrap();

    let mut all_received = Vec::new();
    for r in receivers {
        let taken = r.join().unwrap();
        println!("received {} ints", taken.len());
        all_received.extend(taken);
    }

    all_received.sort();
    all_sent.sort();
    assert_eq!(all_received, all_sent);
    println!("all {SEND_UPTO} ints accounted for");
}
