//! Inbound synchronization: signed deliveries applied to local tasks.

use super::helpers::{SyncSystem, system};
use rstest::rstest;
use tasklink::task::{
    domain::{IssueNumber, TaskStatus},
    ports::UpdateSource,
    services::CreateTaskRequest,
};
use tasklink::webhook::services::WebhookOutcome;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remote_close_completes_the_task_once(system: SyncSystem) {
    let project = system.register_board().await;
    let task = system
        .orchestrator
        .create_task(CreateTaskRequest::new(project.id(), "Remote close"))
        .await
        .expect("task creation should succeed");
    let issue_number = task.issue_number().expect("task should be bound");
    let mut updates = system.notifier.subscribe();

    let first = system
        .deliver_issue_event("delivery-1", "closed", issue_number, "Remote close")
        .await;
    let second = system
        .deliver_issue_event("delivery-1", "closed", issue_number, "Remote close")
        .await;

    assert_eq!(
        first,
        WebhookOutcome::Processed {
            task_id: task.id(),
            changed: true
        }
    );
    assert_eq!(second, WebhookOutcome::Duplicate);
    let stored = system
        .orchestrator
        .find_task(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(stored.status(), TaskStatus::Done);
    let event = updates.recv().await.expect("update should be published");
    assert_eq!(event.source, UpdateSource::Webhook);
    assert!(updates.try_recv().is_err());
    assert_eq!(system.ledger.records().expect("ledger readable").len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remote_title_edit_is_mirrored_locally(system: SyncSystem) {
    let project = system.register_board().await;
    let task = system
        .orchestrator
        .create_task(CreateTaskRequest::new(project.id(), "Old title"))
        .await
        .expect("task creation should succeed");
    let issue_number = task.issue_number().expect("task should be bound");

    system
        .deliver_issue_event("delivery-2", "edited", issue_number, "New title")
        .await;

    let stored = system
        .orchestrator
        .find_task(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(stored.title().as_str(), "New title");
    assert_eq!(stored.status(), TaskStatus::Todo);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_issue_is_recorded_as_unmatched(system: SyncSystem) {
    system.register_board().await;

    let outcome = system
        .deliver_issue_event(
            "delivery-3",
            "closed",
            IssueNumber::new(77).expect("valid issue number"),
            "Untracked",
        )
        .await;

    assert_eq!(outcome, WebhookOutcome::Unmatched);
    assert_eq!(system.ledger.records().expect("ledger readable").len(), 1);
}
