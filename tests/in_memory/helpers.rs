//! Shared test helpers for in-memory integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use mockable::DefaultClock;
use rstest::fixture;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tasklink::config::{LOG_FILTER_VAR, SyncConfig, WEBHOOK_SECRET_VAR};
use tasklink::project::{
    adapters::memory::{InMemoryProjectRepository, PassthroughTokenProtector},
    domain::{Project, RepositoryCoordinates},
    services::{CreateProjectRequest, ProjectRegistry},
};
use tasklink::task::{
    adapters::memory::{BroadcastNotifier, InMemoryTaskRepository},
    domain::{IssueComment, IssueDetails, IssueDraft, IssueNumber},
    ports::{IssueTrackerClient, IssueTrackerError, IssueTrackerResult},
    services::{OrchestratorPorts, TaskOrchestrator},
};
use tasklink::telemetry::init_tracing;
use tasklink::webhook::{
    adapters::memory::InMemoryDeliveryLedger,
    services::{SignatureValidator, WebhookPorts, WebhookProcessor, sign_payload},
};

/// Webhook secret shared by the sender and the processor.
pub const WEBHOOK_SECRET: &str = "integration-secret";

/// Plaintext credential registered for every project.
pub const ACCESS_TOKEN: &str = "ghp_integration";

/// State of one issue held by [`FakeIssueTracker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeIssue {
    pub title: String,
    pub body: Option<String>,
    pub open: bool,
}

/// Issue tracker double that keeps issues in memory and checks the
/// credential on every call.
#[derive(Debug, Clone, Default)]
pub struct FakeIssueTracker {
    issues: Arc<Mutex<HashMap<(String, i64), FakeIssue>>>,
}

impl FakeIssueTracker {
    /// Returns the issue stored under `repository` and `number`.
    pub fn issue(&self, repository: &str, number: IssueNumber) -> Option<FakeIssue> {
        self.lock()
            .get(&(repository.to_owned(), number.value()))
            .cloned()
    }

    /// Returns how many issues were opened in total.
    pub fn issue_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<(String, i64), FakeIssue>> {
        self.issues.lock().expect("tracker lock should not be poisoned")
    }

    fn authorize(credential: &SecretString) -> IssueTrackerResult<()> {
        if credential.expose_secret() == ACCESS_TOKEN {
            Ok(())
        } else {
            Err(IssueTrackerError::Unauthorized("bad credentials".to_owned()))
        }
    }

    fn set_open(
        &self,
        repository: &RepositoryCoordinates,
        issue_number: IssueNumber,
        open: bool,
    ) -> IssueTrackerResult<()> {
        let mut issues = self.lock();
        let issue = issues
            .get_mut(&(repository.to_string(), issue_number.value()))
            .ok_or_else(|| IssueTrackerError::NotFound(format!("issue #{issue_number}")))?;
        issue.open = open;
        Ok(())
    }
}

#[async_trait]
impl IssueTrackerClient for FakeIssueTracker {
    async fn create_issue(
        &self,
        repository: &RepositoryCoordinates,
        draft: &IssueDraft,
        credential: &SecretString,
    ) -> IssueTrackerResult<IssueNumber> {
        Self::authorize(credential)?;
        let mut issues = self.lock();
        let next = i64::try_from(issues.len()).expect("issue count fits i64") + 1;
        issues.insert(
            (repository.to_string(), next),
            FakeIssue {
                title: draft.title().as_str().to_owned(),
                body: draft.body().map(str::to_owned),
                open: true,
            },
        );
        Ok(IssueNumber::new(next).expect("issue numbers start at one"))
    }

    async fn close_issue(
        &self,
        repository: &RepositoryCoordinates,
        issue_number: IssueNumber,
        credential: &SecretString,
    ) -> IssueTrackerResult<()> {
        Self::authorize(credential)?;
        self.set_open(repository, issue_number, false)
    }

    async fn reopen_issue(
        &self,
        repository: &RepositoryCoordinates,
        issue_number: IssueNumber,
        credential: &SecretString,
    ) -> IssueTrackerResult<()> {
        Self::authorize(credential)?;
        self.set_open(repository, issue_number, true)
    }

    async fn issue_details(
        &self,
        repository: &RepositoryCoordinates,
        issue_number: IssueNumber,
        credential: &SecretString,
    ) -> IssueTrackerResult<IssueDetails> {
        Self::authorize(credential)?;
        let issue = self
            .issue(&repository.to_string(), issue_number)
            .ok_or_else(|| IssueTrackerError::NotFound(format!("issue #{issue_number}")))?;
        let now = Utc::now();
        let state = if issue.open { "open" } else { "closed" };
        Ok(IssueDetails {
            number: issue_number,
            title: issue.title,
            description: issue.body,
            state: state.to_owned(),
            state_reason: None,
            author: None,
            assignees: Vec::new(),
            labels: Vec::new(),
            comments_count: 0,
            created_at: now,
            updated_at: now,
            url: None,
        })
    }

    async fn issue_comments(
        &self,
        _repository: &RepositoryCoordinates,
        _issue_number: IssueNumber,
        credential: &SecretString,
    ) -> IssueTrackerResult<Vec<IssueComment>> {
        Self::authorize(credential)?;
        Ok(Vec::new())
    }
}

/// Orchestrator wired to in-memory adapters.
pub type TestOrchestrator = TaskOrchestrator<
    InMemoryTaskRepository,
    InMemoryProjectRepository,
    FakeIssueTracker,
    PassthroughTokenProtector,
    BroadcastNotifier,
    DefaultClock,
>;

/// Webhook processor wired to in-memory adapters.
pub type TestProcessor = WebhookProcessor<
    InMemoryProjectRepository,
    InMemoryTaskRepository,
    InMemoryDeliveryLedger,
    BroadcastNotifier,
    DefaultClock,
>;

/// Every service of the synchronization system over shared in-memory state.
pub struct SyncSystem {
    pub registry:
        ProjectRegistry<InMemoryProjectRepository, PassthroughTokenProtector, DefaultClock>,
    pub orchestrator: TestOrchestrator,
    pub processor: TestProcessor,
    pub tracker: FakeIssueTracker,
    pub notifier: BroadcastNotifier,
    pub ledger: InMemoryDeliveryLedger,
}

impl SyncSystem {
    /// Registers the `octo/board` project.
    pub async fn register_board(&self) -> Project {
        self.registry
            .create_project(CreateProjectRequest::new(
                "Board",
                "octo",
                "board",
                SecretString::from(ACCESS_TOKEN),
            ))
            .await
            .expect("project registration should succeed")
    }

    /// Sends a signed `issues` delivery for `octo/board`.
    pub async fn deliver_issue_event(
        &self,
        delivery_id: &str,
        action: &str,
        issue_number: IssueNumber,
        title: &str,
    ) -> tasklink::webhook::services::WebhookOutcome {
        let body = serde_json::to_vec(&json!({
            "action": action,
            "issue": { "number": issue_number.value(), "title": title },
            "repository": { "name": "board", "owner": { "login": "octo" } }
        }))
        .expect("payload should serialize");
        let signature = sign_payload(&SecretString::from(WEBHOOK_SECRET), &body)
            .expect("signing should succeed");
        self.processor
            .receive("issues", delivery_id, Some(&signature), &body)
            .await
            .expect("delivery should process")
    }
}

/// Provides a fresh system for each test.
#[fixture]
pub fn system() -> SyncSystem {
    let config = SyncConfig::from_lookup(|key| match key {
        WEBHOOK_SECRET_VAR => Some(WEBHOOK_SECRET.to_owned()),
        LOG_FILTER_VAR => Some("tasklink=debug".to_owned()),
        _ => None,
    });
    init_tracing(config.log_filter());

    let projects = Arc::new(InMemoryProjectRepository::new());
    let task_store = InMemoryTaskRepository::new();
    let ledger = InMemoryDeliveryLedger::new(task_store.clone());
    let tasks = Arc::new(task_store);
    let protector = Arc::new(PassthroughTokenProtector);
    let tracker = FakeIssueTracker::default();
    let notifier = BroadcastNotifier::new();
    let clock = Arc::new(DefaultClock);

    let orchestrator = TaskOrchestrator::new(
        OrchestratorPorts {
            tasks: Arc::clone(&tasks),
            projects: Arc::clone(&projects),
            issue_tracker: Arc::new(tracker.clone()),
            token_protector: Arc::clone(&protector),
            notifier: Arc::new(notifier.clone()),
        },
        Arc::clone(&clock),
    );
    let processor = WebhookProcessor::new(
        WebhookPorts {
            projects: Arc::clone(&projects),
            tasks,
            ledger: Arc::new(ledger.clone()),
            notifier: Arc::new(notifier.clone()),
        },
        SignatureValidator::from_config(&config),
        Arc::clone(&clock),
    );

    SyncSystem {
        registry: ProjectRegistry::new(projects, protector, clock),
        orchestrator,
        processor,
        tracker,
        notifier,
        ledger,
    }
}
