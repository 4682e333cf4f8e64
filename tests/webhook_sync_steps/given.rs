//! Given steps for webhook synchronization BDD scenarios.

use super::world::{WebhookSyncWorld, issue_payload, run_async, sign};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use tasklink::project::{
    domain::{Project, ProtectedToken, RepositoryCoordinates},
    ports::ProjectRepository,
};
use tasklink::task::{
    domain::{IssueNumber, Task, TaskStatus, TaskTitle},
    ports::TaskRepository,
};

#[given(r#"a project mirroring "{repository}""#)]
fn project_mirroring(
    world: &mut WebhookSyncWorld,
    repository: String,
) -> Result<(), eyre::Report> {
    let (owner, name) = repository
        .split_once('/')
        .ok_or_else(|| eyre::eyre!("repository must be owner/name, got {repository}"))?;
    let project = Project::new(
        "Scenario board",
        RepositoryCoordinates::new(owner, name)?,
        ProtectedToken::new("cipher")?,
        &DefaultClock,
    )?;
    run_async(world.projects.store(&project)).wrap_err("store scenario project")?;
    world.project = Some(project);
    Ok(())
}

#[given("an in-progress task bound to issue #{issue_number:u64}")]
fn in_progress_task(world: &mut WebhookSyncWorld, issue_number: u64) -> Result<(), eyre::Report> {
    let project = world
        .project
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing project in scenario world"))?;
    let mut task = Task::new(project.id(), TaskTitle::new("Fix login")?, &DefaultClock);
    task.bind_issue(IssueNumber::new(i64::try_from(issue_number)?)?)?;
    task.move_locally(TaskStatus::InProgress, &DefaultClock)?;
    run_async(world.tasks.store(&task)).wrap_err("store scenario task")?;
    world.task_id = Some(task.id());
    Ok(())
}

#[given(r#"a signed "{action}" delivery "{delivery_id}" was processed for issue #{issue_number:u64}"#)]
fn delivery_was_processed(
    world: &mut WebhookSyncWorld,
    action: String,
    delivery_id: String,
    issue_number: u64,
) -> Result<(), eyre::Report> {
    let body = issue_payload(&action, issue_number)?;
    let signature = sign(&body)?;
    run_async(
        world
            .processor
            .receive("issues", &delivery_id, Some(&signature), &body),
    )
    .wrap_err("process setup delivery")?;
    Ok(())
}
