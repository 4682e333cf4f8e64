//! In-process realtime notifiers.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tracing::debug;

use crate::task::ports::{NotifierError, RealtimeNotifier, TaskUpdatedEvent};

const CHANNEL_CAPACITY: usize = 256;

/// Fans task changes out to in-process subscribers over a broadcast channel.
///
/// Publishing with no subscribers succeeds.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<TaskUpdatedEvent>,
}

impl BroadcastNotifier {
    /// Creates a notifier with the default channel capacity.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Subscribes to subsequent task changes.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TaskUpdatedEvent> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RealtimeNotifier for BroadcastNotifier {
    async fn notify_task_updated(&self, event: TaskUpdatedEvent) -> Result<(), NotifierError> {
        let task_id = event.task_id;
        match self.sender.send(event) {
            Ok(receivers) => debug!(%task_id, receivers, "task update published"),
            Err(_) => debug!(%task_id, "task update published (no receivers)"),
        }
        Ok(())
    }
}

/// Notifier that keeps every published event, optionally failing each call
/// after recording it.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<TaskUpdatedEvent>>>,
    failing: bool,
}

impl RecordingNotifier {
    /// Creates a notifier that accepts every event.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a notifier that records then rejects every event.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            events: Arc::default(),
            failing: true,
        }
    }

    /// Returns the events published so far.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TaskUpdatedEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RealtimeNotifier for RecordingNotifier {
    async fn notify_task_updated(&self, event: TaskUpdatedEvent) -> Result<(), NotifierError> {
        self.events
            .lock()
            .map_err(|err| NotifierError(err.to_string()))?
            .push(event);
        if self.failing {
            return Err(NotifierError("subscriber unavailable".to_owned()));
        }
        Ok(())
    }
}
