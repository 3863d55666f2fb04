use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use centipede::clock::{ClockError, GameClock, Signal};

#[test]
fn signal_wakes_a_waiter() {
    let signal = Arc::new(Signal::new());
    let waiter = {
        let signal = Arc::clone(&signal);
        thread::spawn(move || signal.wait())
    };
    // Keep raising until the waiter has gone through; raises with nobody
    // waiting are allowed to be lost.
    while !waiter.is_finished() {
        signal.raise();
        thread::sleep(Duration::from_millis(1));
    }
    waiter.join().unwrap();
}

#[test]
fn clock_ticks_while_alive_and_stops_at_zero() {
    let lives = Arc::new(AtomicI32::new(1));
    let mut clock = GameClock::new();
    let signal = clock.start(1, Arc::clone(&lives)).unwrap();

    // Consume a few ticks; each wait corresponds to one subsequent raise.
    for _ in 0..3 {
        signal.wait();
    }

    lives.store(0, Ordering::Release);
    let started = Instant::now();
    clock.join();
    // Cooperative shutdown: at most one extra interval plus scheduling slack.
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn starting_a_running_clock_is_an_error() {
    let lives = Arc::new(AtomicI32::new(1));
    let mut clock = GameClock::new();
    clock.start(1, Arc::clone(&lives)).unwrap();

    assert_eq!(
        clock.start(1, Arc::clone(&lives)).unwrap_err(),
        ClockError::AlreadyRunning
    );

    lives.store(0, Ordering::Release);
    clock.join();
}

#[test]
fn clock_can_restart_after_join() {
    let lives = Arc::new(AtomicI32::new(1));
    let mut clock = GameClock::new();
    clock.start(1, Arc::clone(&lives)).unwrap();
    lives.store(0, Ordering::Release);
    clock.join();

    lives.store(1, Ordering::Release);
    let signal = clock.start(1, Arc::clone(&lives)).unwrap();
    signal.wait();
    lives.store(0, Ordering::Release);
    clock.join();
}
