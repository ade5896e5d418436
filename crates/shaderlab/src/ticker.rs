//! Cooperative frame ticker driving the elapsed-time uniform. A background
//! thread emits timestamps at the requested cadence; ticks that the consumer
//! has not drained yet are dropped rather than queued, matching frame
//! callbacks. Cancellation stops scheduling further ticks and joins the
//! thread, so no timer outlives the screen that owns it.

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};

/// Default cadence, roughly 60 Hz.
pub const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

pub struct Ticker {
    ticks: Receiver<Instant>,
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn(interval: Duration) -> Self {
        let (tick_tx, tick_rx) = bounded(1);
        let (stop_tx, stop_rx) = bounded::<()>(0);

        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    // Consumer still busy with the previous frame: skip.
                    let _ = tick_tx.try_send(Instant::now());
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        Self {
            ticks: tick_rx,
            stop: Some(stop_tx),
            handle: Some(handle),
        }
    }

    pub fn ticks(&self) -> Receiver<Instant> {
        self.ticks.clone()
    }

    /// Stops scheduling further ticks and waits for the timer thread to
    /// finish. Idempotent.
    pub fn cancel(&mut self) {
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_emits_ticks_at_interval() {
        let ticker = Ticker::spawn(Duration::from_millis(2));
        let ticks = ticker.ticks();
        let first = ticks.recv_timeout(Duration::from_secs(1)).unwrap();
        let second = ticks.recv_timeout(Duration::from_secs(1)).unwrap();
        assert!(second >= first);
    }

    #[test]
    fn cancel_stops_further_ticks() {
        let mut ticker = Ticker::spawn(Duration::from_millis(2));
        let ticks = ticker.ticks();
        let _ = ticks.recv_timeout(Duration::from_secs(1)).unwrap();

        ticker.cancel();
        // The thread has joined; at most one already-buffered tick remains.
        while ticks.try_recv().is_ok() {}
        thread::sleep(Duration::from_millis(10));
        assert!(ticks.try_recv().is_err());
    }

    #[test]
    fn cancel_is_idempotent_and_drop_safe() {
        let mut ticker = Ticker::spawn(FRAME_INTERVAL);
        ticker.cancel();
        ticker.cancel();
    }
}
