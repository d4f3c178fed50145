// ABOUTME: Bounded, ordered channel from the pull worker to the presentation loop.
// ABOUTME: The only path by which worker-side activity reaches session state.

use super::event::Event;
use tokio::sync::mpsc;

/// Create a relay holding at most `capacity` undelivered events.
pub fn channel(capacity: usize) -> (RelaySender, RelayReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (RelaySender { tx }, RelayReceiver { rx })
}

/// Producer half, owned by the worker.
#[derive(Debug)]
pub struct RelaySender {
    tx: mpsc::Sender<Event>,
}

impl RelaySender {
    /// Enqueue an event, waiting only while the relay is full.
    ///
    /// Returns false if the receiving side is gone; the event is discarded.
    pub async fn send(&self, event: Event) -> bool {
        match self.tx.send(event).await {
            Ok(()) => true,
            Err(mpsc::error::SendError(event)) => {
                tracing::debug!(?event, "relay closed, dropping event");
                false
            }
        }
    }

    /// Like [`RelaySender::send`], for threads that have no runtime.
    ///
    /// Must not be called from inside an async context.
    pub fn blocking_send(&self, event: Event) -> bool {
        match self.tx.blocking_send(event) {
            Ok(()) => true,
            Err(mpsc::error::SendError(event)) => {
                tracing::debug!(?event, "relay closed, dropping event");
                false
            }
        }
    }
}

/// Consumer half, owned by the session controller.
#[derive(Debug)]
pub struct RelayReceiver {
    rx: mpsc::Receiver<Event>,
}

impl RelayReceiver {
    /// Next event in emission order, or `None` once the worker's sender is dropped
    /// and everything has been drained.
    pub async fn recv(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
