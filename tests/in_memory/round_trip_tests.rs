//! Local and remote changes interleaved on one task.

use super::helpers::{SyncSystem, system};
use rstest::rstest;
use tasklink::error::{Classify, ErrorKind};
use tasklink::task::{
    domain::TaskStatus,
    services::{CreateTaskRequest, UpdateTaskStatusRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remote_close_then_local_reopen_reopens_the_issue(system: SyncSystem) {
    let project = system.register_board().await;
    let task = system
        .orchestrator
        .create_task(CreateTaskRequest::new(project.id(), "Ping pong"))
        .await
        .expect("task creation should succeed");
    let issue_number = task.issue_number().expect("task should be bound");

    system
        .deliver_issue_event("delivery-a", "closed", issue_number, "Ping pong")
        .await;
    let reopened = system
        .orchestrator
        .update_status(UpdateTaskStatusRequest::new(task.id(), "InProgress"))
        .await
        .expect("update should succeed")
        .expect("task should exist");

    assert_eq!(reopened.status(), TaskStatus::InProgress);
    assert_eq!(reopened.completed_at(), None);
    assert_eq!(
        system.tracker.issue("octo/board", issue_number).map(|issue| issue.open),
        Some(true)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn done_task_cannot_return_to_todo_locally(system: SyncSystem) {
    let project = system.register_board().await;
    let task = system
        .orchestrator
        .create_task(CreateTaskRequest::new(project.id(), "One way"))
        .await
        .expect("task creation should succeed");
    let issue_number = task.issue_number().expect("task should be bound");
    system
        .deliver_issue_event("delivery-b", "closed", issue_number, "One way")
        .await;

    let err = system
        .orchestrator
        .update_status(UpdateTaskStatusRequest::new(task.id(), "Todo"))
        .await
        .expect_err("move should be rejected");

    assert_eq!(err.kind(), ErrorKind::Domain);
    let stored = system
        .orchestrator
        .find_task(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(stored.status(), TaskStatus::Done);
}
