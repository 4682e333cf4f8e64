//! Inbound synchronization: applies authenticated `issues` deliveries to
//! local tasks exactly once per delivery identifier.

use super::signature::{SignatureError, SignatureValidator};
use crate::error::{Classify, ErrorKind};
use crate::project::ports::{ProjectRepository, ProjectRepositoryError};
use crate::task::{
    domain::{Task, TaskDomainError, TaskId, TaskStatus, TaskTitle},
    ports::{
        RealtimeNotifier, TaskRepository, TaskRepositoryError, TaskUpdatedEvent, UpdateSource,
    },
};
use crate::webhook::{
    domain::{
        DeliveryId, DeliveryRecord, EventName, InboundWebhook, IssueAction, IssueEvent,
        WebhookDomainError, WebhookPayloadError,
    },
    ports::{DeliveryLedger, DeliveryLedgerError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Successful result of processing one delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// The event is not synchronized; nothing was written.
    Ignored,
    /// The delivery was already recorded; nothing was written.
    Duplicate,
    /// No local task mirrors the issue; only the delivery was recorded.
    Unmatched,
    /// A task matched; the delivery was recorded with any task change.
    Processed {
        /// Matched task.
        task_id: TaskId,
        /// Whether the task was modified.
        changed: bool,
    },
}

/// Errors returned by [`WebhookProcessor`].
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Delivery metadata is missing or too long.
    #[error(transparent)]
    InvalidRequest(#[from] WebhookDomainError),

    /// The body could not be parsed.
    #[error(transparent)]
    Payload(#[from] WebhookPayloadError),

    /// Authentication failed or is not configured.
    #[error(transparent)]
    Signature(#[from] SignatureError),

    /// The task rejected the change.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The ledger commit failed.
    #[error(transparent)]
    Ledger(#[from] DeliveryLedgerError),

    /// Task lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Project lookup failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),
}

impl Classify for WebhookError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRequest(_) | Self::Payload(_) => ErrorKind::Validation,
            Self::Signature(err) => err.kind(),
            Self::Domain(_) => ErrorKind::Domain,
            Self::Ledger(_) | Self::Tasks(_) | Self::Projects(_) => ErrorKind::Internal,
        }
    }
}

/// Port bundle used by [`WebhookProcessor`].
pub struct WebhookPorts<P, T, L, N> {
    /// Project lookup by repository.
    pub projects: Arc<P>,
    /// Task lookup by issue.
    pub tasks: Arc<T>,
    /// Delivery ledger committing task changes.
    pub ledger: Arc<L>,
    /// Realtime fan-out.
    pub notifier: Arc<N>,
}

/// Inbound synchronization service.
pub struct WebhookProcessor<P, T, L, N, C>
where
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    tasks: Arc<T>,
    ledger: Arc<L>,
    notifier: Arc<N>,
    validator: SignatureValidator,
    clock: Arc<C>,
}

impl<P, T, L, N, C> WebhookProcessor<P, T, L, N, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    L: DeliveryLedger,
    N: RealtimeNotifier,
    C: Clock + Send + Sync,
{
    /// Creates a new processor.
    #[must_use]
    pub fn new(
        ports: WebhookPorts<P, T, L, N>,
        validator: SignatureValidator,
        clock: Arc<C>,
    ) -> Self {
        Self {
            projects: ports.projects,
            tasks: ports.tasks,
            ledger: ports.ledger,
            notifier: ports.notifier,
            validator,
            clock,
        }
    }

    /// Ingestion boundary: validates header values, then processes.
    ///
    /// # Errors
    ///
    /// See [`WebhookProcessor::process`]; additionally returns
    /// [`WebhookError::InvalidRequest`] when the event name or delivery
    /// identifier is blank.
    pub async fn receive(
        &self,
        event_name: &str,
        delivery_id: &str,
        signature: Option<&str>,
        body: &[u8],
    ) -> Result<WebhookOutcome, WebhookError> {
        let webhook = InboundWebhook::new(event_name, delivery_id, signature, body)?;
        self.process(&webhook).await
    }

    /// Processes one delivery.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError`] when authentication fails, the body is
    /// malformed, the task rejects the change, or persistence fails. Nothing
    /// is recorded in the ledger on error, so the sender may redeliver.
    pub async fn process(&self, webhook: &InboundWebhook) -> Result<WebhookOutcome, WebhookError> {
        if !webhook.is_issues_event() {
            debug!(event = webhook.event_name(), "ignoring non-issues webhook event");
            return Ok(WebhookOutcome::Ignored);
        }

        self.validator
            .validate(webhook.body(), webhook.signature())?;

        let delivery_id = DeliveryId::new(webhook.delivery_id())?;
        let event_name = EventName::new(webhook.event_name())?;
        if self.ledger.contains(&delivery_id).await? {
            info!(delivery_id = %delivery_id, "skipping already processed delivery");
            return Ok(WebhookOutcome::Duplicate);
        }

        let event = IssueEvent::from_slice(webhook.body())?;
        let (task, changed) = match self.find_task(&event).await? {
            Some(mut found) => {
                let modified = self.apply_action(&mut found, &event)?;
                (Some(found), modified)
            }
            None => {
                info!(
                    delivery_id = %delivery_id,
                    issue_number = %event.issue_number(),
                    repository = %event.repository(),
                    "no local task matched webhook issue"
                );
                (None, false)
            }
        };

        let record = DeliveryRecord::new(delivery_id, event_name, &*self.clock);
        let changed_task = task.as_ref().filter(|_| changed);
        match self.ledger.commit(&record, changed_task).await {
            Ok(()) => {}
            Err(DeliveryLedgerError::DuplicateDelivery(id)) => {
                info!(delivery_id = %id, "delivery recorded concurrently");
                return Ok(WebhookOutcome::Duplicate);
            }
            Err(err) => return Err(err.into()),
        }

        let Some(matched_task) = task else {
            return Ok(WebhookOutcome::Unmatched);
        };
        if changed {
            self.notify(&matched_task).await;
        }
        Ok(WebhookOutcome::Processed {
            task_id: matched_task.id(),
            changed,
        })
    }

    async fn find_task(&self, event: &IssueEvent) -> Result<Option<Task>, WebhookError> {
        let projects = self.projects.find_by_repository(event.repository()).await?;
        for project in projects {
            if let Some(task) = self
                .tasks
                .find_by_issue(project.id(), event.issue_number())
                .await?
            {
                return Ok(Some(task));
            }
        }
        Ok(None)
    }

    fn apply_action(&self, task: &mut Task, event: &IssueEvent) -> Result<bool, TaskDomainError> {
        match event.action() {
            IssueAction::Closed => task.apply_external_status(TaskStatus::Done, &*self.clock),
            IssueAction::Reopened => {
                task.apply_external_status(TaskStatus::InProgress, &*self.clock)
            }
            IssueAction::Edited => match event.title() {
                Some(title) if title != task.title().as_str() => {
                    task.sync_title(TaskTitle::new(title)?);
                    Ok(true)
                }
                _ => Ok(false),
            },
            IssueAction::Other => Ok(false),
        }
    }

    async fn notify(&self, task: &Task) {
        let event = TaskUpdatedEvent::from_task(task, UpdateSource::Webhook);
        if let Err(err) = self.notifier.notify_task_updated(event).await {
            warn!(task_id = %task.id(), error = %err, "failed to publish webhook task update");
        }
    }
}
