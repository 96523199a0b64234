//! Delegate score delivery on a worker thread.
//!
//! The gate publishes one score per detection pass over a channel; the
//! notifier drains it off the capture thread and invokes the host
//! callback, so a slow callback never stalls frame processing.

use std::thread::JoinHandle;

use crossbeam_channel::Sender;

pub type ScoreCallback = Box<dyn Fn(i32) + Send>;

pub struct ScoreNotifier {
    tx: Option<Sender<i32>>,
    handle: Option<JoinHandle<()>>,
}

impl ScoreNotifier {
    /// Start the worker; it runs until every sender has been dropped.
    pub fn spawn(callback: ScoreCallback) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded::<i32>();
        let handle = std::thread::spawn(move || {
            for score in rx.iter() {
                callback(score);
            }
            log::debug!("score channel closed, notifier exiting");
        });
        Self {
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    /// Clone of the sending half, to be handed to score producers.
    pub fn sender(&self) -> Option<Sender<i32>> {
        self.tx.clone()
    }

    /// Drop this side's sender. Non-blocking: the worker drains whatever
    /// is queued and exits once the producers drop their clones too.
    pub fn shutdown(&mut self) {
        self.tx = None;
    }

    /// Join the worker thread. Only returns once every sender clone is
    /// gone, so callers release producers first.
    pub fn wait(&mut self) {
        self.tx = None;
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("score notifier thread panicked");
            }
        }
    }
}

impl Drop for ScoreNotifier {
    fn drop(&mut self) {
        // Senders may still be live elsewhere, so never join here; the
        // detached worker exits as soon as the channel closes.
        self.tx = None;
        self.handle.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_scores_reach_the_callback_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut notifier = ScoreNotifier::spawn(Box::new(move |score| {
            sink.lock().unwrap().push(score);
        }));

        let tx = notifier.sender().unwrap();
        for score in [3, 1, 4] {
            tx.send(score).unwrap();
        }
        drop(tx);
        notifier.wait();

        assert_eq!(*seen.lock().unwrap(), vec![3, 1, 4]);
    }

    #[test]
    fn test_queued_scores_are_drained_after_shutdown() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut notifier = ScoreNotifier::spawn(Box::new(move |score| {
            sink.lock().unwrap().push(score);
        }));

        let tx = notifier.sender().unwrap();
        tx.send(9).unwrap();
        notifier.shutdown();
        assert!(notifier.sender().is_none());
        drop(tx);
        notifier.wait();

        assert_eq!(*seen.lock().unwrap(), vec![9]);
    }

    #[test]
    fn test_wait_without_traffic_returns() {
        let mut notifier = ScoreNotifier::spawn(Box::new(|_| {}));
        notifier.wait();
    }
}
