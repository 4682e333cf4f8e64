//! When steps for webhook synchronization BDD scenarios.

use super::world::{WebhookSyncWorld, issue_payload, run_async, sign};
use rstest_bdd_macros::when;

#[when(r#"a signed "{action}" delivery "{delivery_id}" arrives for issue #{issue_number:u64}"#)]
fn signed_delivery_arrives(
    world: &mut WebhookSyncWorld,
    action: String,
    delivery_id: String,
    issue_number: u64,
) -> Result<(), eyre::Report> {
    let body = issue_payload(&action, issue_number)?;
    let signature = sign(&body)?;
    let result = run_async(
        world
            .processor
            .receive("issues", &delivery_id, Some(&signature), &body),
    );
    world.last_result = Some(result);
    Ok(())
}

#[when(
    r#"a "{action}" delivery "{delivery_id}" with a forged signature arrives for issue #{issue_number:u64}"#
)]
fn forged_delivery_arrives(
    world: &mut WebhookSyncWorld,
    action: String,
    delivery_id: String,
    issue_number: u64,
) -> Result<(), eyre::Report> {
    let body = issue_payload(&action, issue_number)?;
    let forged = format!("sha256={}", "0".repeat(64));
    let result = run_async(
        world
            .processor
            .receive("issues", &delivery_id, Some(&forged), &body),
    );
    world.last_result = Some(result);
    Ok(())
}
