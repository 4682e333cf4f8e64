//! Outbound synchronization: local operations mirrored to the tracker.

use super::helpers::{SyncSystem, system};
use rstest::rstest;
use tasklink::error::{Classify, ErrorKind};
use tasklink::task::{
    domain::TaskStatus,
    ports::UpdateSource,
    services::{CreateTaskRequest, UpdateTaskStatusRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_is_bound_to_a_new_open_issue(system: SyncSystem) {
    let project = system.register_board().await;

    let task = system
        .orchestrator
        .create_task(
            CreateTaskRequest::new(project.id(), "  Ship release notes ")
                .with_description("Draft the changelog"),
        )
        .await
        .expect("task creation should succeed");

    assert_eq!(task.status(), TaskStatus::Todo);
    assert_eq!(task.title().as_str(), "Ship release notes");
    let issue_number = task.issue_number().expect("task should be bound");
    let issue = system
        .tracker
        .issue("octo/board", issue_number)
        .expect("issue should exist");
    assert!(issue.open);
    assert_eq!(issue.title, "Ship release notes");
    assert_eq!(issue.body.as_deref(), Some("Draft the changelog"));

    let listed = system
        .orchestrator
        .list_project_tasks(project.id())
        .await
        .expect("listing should succeed");
    assert_eq!(listed, vec![task]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_are_listed_in_creation_order(system: SyncSystem) {
    let project = system.register_board().await;
    let mut created = Vec::new();
    for title in ["First", "Second", "Third"] {
        created.push(
            system
                .orchestrator
                .create_task(CreateTaskRequest::new(project.id(), title))
                .await
                .expect("task creation should succeed"),
        );
    }

    let listed = system
        .orchestrator
        .list_project_tasks(project.id())
        .await
        .expect("listing should succeed");

    assert_eq!(listed, created);
    assert_eq!(system.tracker.issue_count(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completing_a_task_closes_its_issue_and_publishes(system: SyncSystem) {
    let project = system.register_board().await;
    let task = system
        .orchestrator
        .create_task(CreateTaskRequest::new(project.id(), "Close me"))
        .await
        .expect("task creation should succeed");
    let mut updates = system.notifier.subscribe();

    let done = system
        .orchestrator
        .update_status(UpdateTaskStatusRequest::new(task.id(), "Done"))
        .await
        .expect("update should succeed")
        .expect("task should exist");

    assert_eq!(done.status(), TaskStatus::Done);
    assert!(done.completed_at().is_some());
    let issue_number = done.issue_number().expect("task should be bound");
    assert_eq!(
        system.tracker.issue("octo/board", issue_number).map(|issue| issue.open),
        Some(false)
    );
    let event = updates.recv().await.expect("update should be published");
    assert_eq!(event.task_id, task.id());
    assert_eq!(event.status, TaskStatus::Done);
    assert_eq!(event.source, UpdateSource::Local);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creation_for_unknown_project_touches_nothing(system: SyncSystem) {
    let err = system
        .orchestrator
        .create_task(CreateTaskRequest::new(
            tasklink::project::domain::ProjectId::new(),
            "Orphan",
        ))
        .await
        .expect_err("creation should fail");

    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert_eq!(err.kind().status_code(), 400);
    assert_eq!(system.tracker.issue_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn issue_details_reflect_the_remote_state(system: SyncSystem) {
    let project = system.register_board().await;
    let task = system
        .orchestrator
        .create_task(CreateTaskRequest::new(project.id(), "Inspect me"))
        .await
        .expect("task creation should succeed");

    let details = system
        .orchestrator
        .issue_details(task.id())
        .await
        .expect("details should load")
        .expect("task should exist");
    let comments = system
        .orchestrator
        .issue_comments(task.id())
        .await
        .expect("comments should load")
        .expect("task should exist");

    assert_eq!(details.task_id, task.id());
    assert_eq!(details.details.title, "Inspect me");
    assert_eq!(details.details.state, "open");
    assert!(comments.comments.is_empty());
}
