//! Two threads exchanging values over one unbuffered channel.

use oluk::channel;
use std::thread;

fn main() {
    let ch = channel::<String>(0);

    let first = ch.clone();
    let t1 = thread::spawn(move || {
        let data = first.recv().unwrap();
        println!("data received by first thread: {data}");
        first.send(String::from("first thread data")).unwrap();
    });

    let second = ch.clone();
    let t2 = thread::spawn(move || {
        second.send(String::from("second thread data")).unwrap();
        let data = second.recv().unwrap();
        println!("data received by second thread: {data}");
    });

    t1.join().unwrap();
    t2.join().unwrap();
}
