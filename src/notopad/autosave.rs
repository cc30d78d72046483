//! Periodic backup timer.
//!
//! One background thread per timer. It sleeps on a stop channel with a timeout,
//! calling [`Autosave::tick`] every time the timeout elapses. Stopping (or
//! dropping) the timer wakes the thread and joins it, so a backup that is
//! already being written finishes before `stop` returns.

use crate::coordinator::Autosave;
use crate::error::{NotopadError, Result};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct AutosaveTimer {
    interval: Duration,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl AutosaveTimer {
    pub fn start<T: Autosave + 'static>(target: Arc<T>, interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(NotopadError::Config(
                "Autosave interval must be greater than zero".to_string(),
            ));
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("notopad-autosave".to_string())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        let outcome = target.tick();
                        debug!(?outcome, "autosave tick");
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })
            .map_err(NotopadError::Io)?;

        info!(interval_secs = interval.as_secs_f64(), "autosave started");
        Ok(Self {
            interval,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Stop the timer and wait for the thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            // The thread may already be gone; nothing to do then.
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("autosave thread panicked");
            }
            info!("autosave stopped");
        }
    }
}

impl Drop for AutosaveTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TickOutcome;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    #[derive(Default)]
    struct Counter {
        ticks: AtomicUsize,
    }

    impl Autosave for Counter {
        fn tick(&self) -> TickOutcome {
            self.ticks.fetch_add(1, Ordering::SeqCst);
            TickOutcome::Clean
        }
    }

    fn wait_for(counter: &Counter, at_least: usize) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if counter.ticks.load(Ordering::SeqCst) >= at_least {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn ticks_periodically() {
        let counter = Arc::new(Counter::default());
        let timer = AutosaveTimer::start(counter.clone(), Duration::from_millis(10)).unwrap();
        assert!(timer.is_running());
        assert!(wait_for(&counter, 3));
        timer.stop();
    }

    #[test]
    fn stop_halts_ticking() {
        let counter = Arc::new(Counter::default());
        let timer = AutosaveTimer::start(counter.clone(), Duration::from_millis(10)).unwrap();
        assert!(wait_for(&counter, 1));
        timer.stop();

        let after_stop = counter.ticks.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(counter.ticks.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn stop_does_not_wait_for_next_interval() {
        let counter = Arc::new(Counter::default());
        let timer = AutosaveTimer::start(counter.clone(), Duration::from_secs(3600)).unwrap();
        let started = Instant::now();
        drop(timer);
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(counter.ticks.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let counter = Arc::new(Counter::default());
        assert!(AutosaveTimer::start(counter, Duration::ZERO).is_err());
    }
}
