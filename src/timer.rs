use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A periodic callback on a helper thread.
///
/// The callback runs once per `period` until [`Interval::cancel`] is called,
/// the value is dropped, or the callback itself returns `false`. Once
/// `cancel` (or drop) returns, the callback will not run again.
#[derive(Debug)]
pub struct Interval {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Interval {
    pub fn start<F>(period: Duration, mut callback: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(period) {
                Err(RecvTimeoutError::Timeout) => {
                    if !callback() {
                        break;
                    }
                }
                // explicit stop, or the owner went away
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn cancel(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("countdown thread panicked");
            }
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn fires_repeatedly() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let interval = Interval::start(Duration::from_millis(2), move || {
            c.fetch_add(1, Ordering::SeqCst);
            true
        });

        for _ in 0..500 {
            if count.load(Ordering::SeqCst) >= 3 {
                break;
            }
            thread::sleep(Duration::from_millis(2));
        }
        interval.cancel();
        assert!(count.load(Ordering::SeqCst) >= 3);
    }

    #[test]
    fn nothing_fires_after_cancel() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let interval = Interval::start(Duration::from_millis(1), move || {
            c.fetch_add(1, Ordering::SeqCst);
            true
        });
        thread::sleep(Duration::from_millis(10));
        interval.cancel();

        let after_cancel = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), after_cancel);
    }

    #[test]
    fn drop_cancels() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        {
            let _interval = Interval::start(Duration::from_millis(1), move || {
                c.fetch_add(1, Ordering::SeqCst);
                true
            });
            thread::sleep(Duration::from_millis(5));
        }
        let after_drop = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), after_drop);
    }

    #[test]
    fn callback_can_stop_itself() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let interval = Interval::start(Duration::from_millis(1), move || {
            c.fetch_add(1, Ordering::SeqCst) < 1
        });

        for _ in 0..500 {
            if !interval.is_running() {
                break;
            }
            thread::sleep(Duration::from_millis(2));
        }
        assert!(!interval.is_running());
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn long_period_cancels_promptly() {
        let interval = Interval::start(Duration::from_secs(3600), || true);
        assert!(interval.is_running());
        // would hang for an hour if cancel waited for the period
        interval.cancel();
    }
}
