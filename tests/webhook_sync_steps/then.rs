//! Then steps for webhook synchronization BDD scenarios.

use super::world::WebhookSyncWorld;
use rstest_bdd_macros::then;
use tasklink::error::{Classify, ErrorKind};
use tasklink::task::domain::TaskStatus;
use tasklink::webhook::services::WebhookOutcome;

#[then(r#"the delivery outcome is "{outcome}""#)]
fn delivery_outcome_is(world: &WebhookSyncWorld, outcome: String) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing delivery result"))?;
    let actual = match result {
        Ok(WebhookOutcome::Ignored) => "ignored",
        Ok(WebhookOutcome::Duplicate) => "duplicate",
        Ok(WebhookOutcome::Unmatched) => "unmatched",
        Ok(WebhookOutcome::Processed { .. }) => "processed",
        Err(err) => return Err(eyre::eyre!("expected outcome {outcome}, got error {err}")),
    };
    eyre::ensure!(actual == outcome, "expected outcome {outcome}, got {actual}");
    Ok(())
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &WebhookSyncWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = world.stored_task()?;
    eyre::ensure!(
        task.status() == expected,
        "expected status {}, found {}",
        expected.as_str(),
        task.status().as_str()
    );
    eyre::ensure!(
        (task.status() == TaskStatus::Done) == task.completed_at().is_some(),
        "completion time out of step with status {}",
        task.status().as_str()
    );
    Ok(())
}

#[then("the ledger holds {count:usize} entries")]
fn ledger_holds(world: &WebhookSyncWorld, count: usize) -> Result<(), eyre::Report> {
    let recorded = world.ledger.records()?.len();
    eyre::ensure!(recorded == count, "expected {count} ledger entries, found {recorded}");
    Ok(())
}

#[then("the delivery is rejected as unauthenticated")]
fn delivery_rejected(world: &WebhookSyncWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing delivery result"))?;
    match result {
        Err(err) if err.kind() == ErrorKind::Authenticity => Ok(()),
        other => Err(eyre::eyre!("expected authenticity failure, got {other:?}")),
    }
}
