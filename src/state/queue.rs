//! Loader-to-tick hand-off queue.
//!
//! The loader thread pushes entities as it decodes them; the update tick
//! drains whatever has arrived. Neither side ever blocks on the other:
//! loading must not stall behind a slow tick, and an empty drain is a no-op.
//! FIFO order of pushes is preserved.

use crossbeam_channel::{unbounded, Receiver, Sender};

/// Producer half, handed to the loader thread.
#[derive(Debug)]
pub struct PublishSender<T> {
    tx: Sender<T>,
}

/// Consumer half, owned by whoever runs the update tick.
#[derive(Debug)]
pub struct PublishQueue<T> {
    rx: Receiver<T>,
}

/// Create a connected sender/queue pair.
pub fn publish_queue<T>() -> (PublishSender<T>, PublishQueue<T>) {
    let (tx, rx) = unbounded();
    (PublishSender { tx }, PublishQueue { rx })
}

impl<T> Clone for PublishSender<T> {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}

impl<T> PublishSender<T> {
    /// Never blocks. A value pushed after the consumer is gone is dropped;
    /// that only happens during teardown.
    pub fn push(&self, value: T) {
        let _ = self.tx.send(value);
    }
}

impl<T> PublishQueue<T> {
    /// Move everything currently queued into `out`, in FIFO order. Returns
    /// the number of values moved. Never blocks waiting for more.
    pub fn drain_into(&self, out: &mut Vec<T>) -> usize {
        let before = out.len();
        out.extend(self.rx.try_iter());
        out.len() - before
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
