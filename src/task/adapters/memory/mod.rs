//! In-memory task adapters.

mod notifier;
mod task;

pub use notifier::{BroadcastNotifier, RecordingNotifier};
pub use task::InMemoryTaskRepository;
