//! Message plumbing between input sources and the engine's actors.
//!
//! Events travel together with the [`tracing::Span`] current at send time, so
//! an actor handles each event inside the span that produced it.

use tokio::sync::mpsc::error::SendError;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{Span, warn};

pub mod cycler;

pub struct Sender<T>(UnboundedSender<(Span, T)>);

// a derived Clone would bound T: Clone
impl<T> Clone for Sender<T> {
    fn clone(&self) -> Self { Sender(self.0.clone()) }
}

impl<T> Sender<T> {
    /// Sends an event tagged with the current span. Fails only when the
    /// receiving actor has shut down.
    pub fn try_send(&self, event: T) -> Result<(), SendError<(Span, T)>> {
        self.0.send((Span::current(), event))
    }

    /// Like [`Sender::try_send`], for callers with nothing useful to do about
    /// a closed channel beyond noting it.
    pub fn send(&self, event: T) {
        if self.try_send(event).is_err() {
            warn!("event dropped, receiving actor has shut down");
        }
    }
}

pub struct Receiver<T>(UnboundedReceiver<(Span, T)>);

impl<T> Receiver<T> {
    pub async fn recv(&mut self) -> Option<(Span, T)> { self.0.recv().await }
}

pub fn channel<T>() -> (Sender<T>, Receiver<T>) {
    let (tx, rx) = unbounded_channel();
    (Sender(tx), Receiver(rx))
}
