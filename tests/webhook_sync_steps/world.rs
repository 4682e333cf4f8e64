//! Shared world state for webhook synchronization BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use secrecy::SecretString;
use serde_json::json;
use tasklink::project::{adapters::memory::InMemoryProjectRepository, domain::Project};
use tasklink::task::{
    adapters::memory::{InMemoryTaskRepository, RecordingNotifier},
    domain::{Task, TaskId},
    ports::TaskRepository,
};
use tasklink::webhook::{
    adapters::memory::InMemoryDeliveryLedger,
    services::{
        SignatureValidator, WebhookError, WebhookOutcome, WebhookPorts, WebhookProcessor,
        sign_payload,
    },
};

/// Secret configured on both ends of the scenario.
pub const WEBHOOK_SECRET: &str = "scenario-secret";

/// Processor type used by the BDD world.
pub type TestProcessor = WebhookProcessor<
    InMemoryProjectRepository,
    InMemoryTaskRepository,
    InMemoryDeliveryLedger,
    RecordingNotifier,
    DefaultClock,
>;

/// Scenario world for webhook synchronization behaviour tests.
pub struct WebhookSyncWorld {
    pub processor: TestProcessor,
    pub projects: Arc<InMemoryProjectRepository>,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub ledger: InMemoryDeliveryLedger,
    pub project: Option<Project>,
    pub task_id: Option<TaskId>,
    pub last_result: Option<Result<WebhookOutcome, WebhookError>>,
}

impl WebhookSyncWorld {
    /// Creates a world with empty stores.
    #[must_use]
    pub fn new() -> Self {
        let projects = Arc::new(InMemoryProjectRepository::new());
        let task_store = InMemoryTaskRepository::new();
        let ledger = InMemoryDeliveryLedger::new(task_store.clone());
        let tasks = Arc::new(task_store);
        let processor = WebhookProcessor::new(
            WebhookPorts {
                projects: Arc::clone(&projects),
                tasks: Arc::clone(&tasks),
                ledger: Arc::new(ledger.clone()),
                notifier: Arc::new(RecordingNotifier::new()),
            },
            SignatureValidator::new(Some(SecretString::from(WEBHOOK_SECRET))),
            Arc::new(DefaultClock),
        );

        Self {
            processor,
            projects,
            tasks,
            ledger,
            project: None,
            task_id: None,
            last_result: None,
        }
    }

    /// Loads the scenario task from the store.
    ///
    /// # Errors
    ///
    /// Returns an error when no task was seeded or the lookup fails.
    pub fn stored_task(&self) -> Result<Task, eyre::Report> {
        let task_id = self
            .task_id
            .ok_or_else(|| eyre::eyre!("missing seeded task in scenario world"))?;
        run_async(self.tasks.find_by_id(task_id))?
            .ok_or_else(|| eyre::eyre!("seeded task disappeared"))
    }
}

impl Default for WebhookSyncWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> WebhookSyncWorld {
    WebhookSyncWorld::default()
}

/// Builds an `issues` payload for `octo/board`.
///
/// # Errors
///
/// Returns an error when the issue number does not fit the payload.
pub fn issue_payload(action: &str, issue_number: u64) -> Result<Vec<u8>, eyre::Report> {
    Ok(serde_json::to_vec(&json!({
        "action": action,
        "issue": { "number": issue_number, "title": "Fix login" },
        "repository": { "name": "board", "owner": { "login": "octo" } }
    }))?)
}

/// Signs a body with the scenario secret.
///
/// # Errors
///
/// Returns an error when signing fails.
pub fn sign(body: &[u8]) -> Result<String, eyre::Report> {
    Ok(sign_payload(&SecretString::from(WEBHOOK_SECRET), body)?)
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
