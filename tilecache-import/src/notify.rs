//! Delivery of progress messages to whoever hosts the importer.
//!
//! The importer only knows the [`Notifier`] capability. Hosts decide whether
//! messages are handled on the calling thread (closures, [`LogNotifier`]) or
//! handed to a thread that owns the user interface ([`ChannelNotifier`]).

use std::sync::{
    Arc, Mutex, PoisonError,
    mpsc::{self, Receiver, Sender},
};

use log::{info, warn};

/// Receives human-readable progress messages.
pub trait Notifier {
    /// Deliver one message.
    fn notify(&self, message: &str);
}

impl<F> Notifier for F
where
    F: Fn(&str),
{
    fn notify(&self, message: &str) {
        self(message);
    }
}

/// Writes messages to the `log` facade at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!(target: "tilecache::progress", "{message}");
    }
}

/// Hands messages to another thread over an mpsc channel.
///
/// Messages sent after the receiver is dropped are logged and discarded.
///
/// # Examples
///
/// ```
/// use tilecache_import::{ChannelNotifier, Notifier};
///
/// let (notifier, messages) = ChannelNotifier::channel();
/// notifier.notify("Caching map tiles in progress");
/// assert_eq!(messages.recv().as_deref(), Ok("Caching map tiles in progress"));
/// ```
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: Sender<String>,
}

impl ChannelNotifier {
    /// Wrap an existing sender.
    #[must_use]
    pub const fn new(sender: Sender<String>) -> Self {
        Self { sender }
    }

    /// Create a notifier together with the receiving end of its channel.
    #[must_use]
    pub fn channel() -> (Self, Receiver<String>) {
        let (sender, receiver) = mpsc::channel();
        (Self::new(sender), receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, message: &str) {
        if self.sender.send(message.to_owned()).is_err() {
            warn!("dropping notification {message:?}: receiver disconnected");
        }
    }
}

/// Keeps every message in memory, in delivery order.
///
/// Clones share the same buffer, so a host can keep one handle and give the
/// other to the importer. Useful for headless runs and tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages delivered so far.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_owned());
    }
}
