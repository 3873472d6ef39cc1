//! Synchronous workflows - submit, wait, resolve
//!
//! Each workflow submits a request through a resource handler, polls the
//! resulting operation until it reaches a terminal status, and where the
//! operation produces a resource, reads that resource back.
//!
//! The handler methods (`add_async`, `delete_async`, ...) remain available
//! for callers that want to poll on their own schedule.

use crate::client::CloudCenterClient;
use crate::error::{CoreError, Result};
use crate::poll::{
    OPERATION_SUCCESS, OperationKind, PollOptions, ProgressCallback, poll_until_terminal,
};
use crate::resources::cloud_accounts::{CloudAccount, CloudAccountHandler};
use crate::resources::jobs::{Job, JobHandler};
use crate::resources::operation_status::{OperationStatus, OperationStatusHandler};
use crate::resources::tenants::TenantHandler;
use tracing::debug;

/// Remote message signalling a queued, not finished, tenant deletion
pub const TENANT_DELETE_ACCEPTED: &str = "Delete tenant request accepted";

const TENANT_DELETE_CONDITIONS: &str = "Delete tenant request accepted. The tenant is only removed once \
all running jobs for all users are terminated, all users in the tenant are deleted, \
and all sub-tenants of the tenant are deleted.";

/// Create a cloud account and wait for it to become usable
///
/// 1. Submits the account (returns an operation record with a `resourceUrl`)
/// 2. Polls the `resourceUrl` until the status leaves `RUNNING`; a submission
///    that already reports `SUCCESS` without a `resourceUrl` skips this step
/// 3. Looks the account up by display name under its own tenant and cloud
///
/// # Example
///
/// ```rust,ignore
/// use cloudcenter_core::{CloudAccount, PollOptions, workflows::add_cloud_account_and_wait};
///
/// let account = CloudAccount {
///     tenant_id: Some("1".into()),
///     cloud_id: Some("2".into()),
///     display_name: Some("aws-dev".into()),
///     ..Default::default()
/// };
/// let created = add_cloud_account_and_wait(&client, &account, &PollOptions::default(), None).await?;
/// println!("account id {}", created.id.unwrap_or_default());
/// ```
pub async fn add_cloud_account_and_wait(
    client: &CloudCenterClient,
    account: &CloudAccount,
    options: &PollOptions,
    on_progress: Option<ProgressCallback>,
) -> Result<CloudAccount> {
    let handler = CloudAccountHandler::new(client.clone());
    let submitted = handler.add_async(account).await?;
    settle_cloud_account(
        client,
        &handler,
        account,
        submitted,
        OperationKind::CloudAccountCreation,
        options,
        on_progress,
    )
    .await
}

/// Update a cloud account and wait for the change to apply
pub async fn update_cloud_account_and_wait(
    client: &CloudCenterClient,
    account: &CloudAccount,
    options: &PollOptions,
    on_progress: Option<ProgressCallback>,
) -> Result<CloudAccount> {
    let handler = CloudAccountHandler::new(client.clone());
    let submitted = handler.update_async(account).await?;
    settle_cloud_account(
        client,
        &handler,
        account,
        submitted,
        OperationKind::CloudAccountUpdate,
        options,
        on_progress,
    )
    .await
}

async fn settle_cloud_account(
    client: &CloudCenterClient,
    handler: &CloudAccountHandler,
    account: &CloudAccount,
    submitted: OperationStatus,
    kind: OperationKind,
    options: &PollOptions,
    on_progress: Option<ProgressCallback>,
) -> Result<CloudAccount> {
    // Both were validated by the submission call.
    let display_name = account.display_name.as_deref().unwrap_or_default();
    let tenant_id = account.tenant_id.as_deref().unwrap_or_default();
    let cloud_id = account.cloud_id.as_deref().unwrap_or_default();

    match submitted.resource_url.as_deref().filter(|u| !u.is_empty()) {
        Some(status_url) => {
            poll_until_terminal(kind, display_name, options, on_progress, || {
                client.get::<OperationStatus>(status_url)
            })
            .await?;
        }
        // Finished synchronously: the lookup below is the resolving read.
        None if submitted.status.as_deref() == Some(OPERATION_SUCCESS) => {
            debug!("{} for '{}' completed on submission", kind, display_name);
        }
        None => {
            return Err(CoreError::UnexpectedResponse(format!(
                "{} response has no resourceUrl",
                kind
            )));
        }
    }

    handler
        .find_by_display_name(tenant_id, cloud_id, display_name)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| {
            CoreError::NotFound(format!(
                "cloud account '{}' in tenant {} cloud {}",
                display_name, tenant_id, cloud_id
            ))
        })
}

/// Submit a job and wait until it is deployed
///
/// Returns the job as read after it reached a success status.
pub async fn add_job_and_wait(
    client: &CloudCenterClient,
    job: &Job,
    options: &PollOptions,
    on_progress: Option<ProgressCallback>,
) -> Result<Job> {
    let handler = JobHandler::new(client.clone());
    let submitted = handler.add_async(job).await?;
    settle_job(&handler, submitted, OperationKind::JobDeployment, options, on_progress).await
}

/// Submit changes to a job and wait until they are applied
pub async fn update_job_and_wait(
    client: &CloudCenterClient,
    job: &Job,
    options: &PollOptions,
    on_progress: Option<ProgressCallback>,
) -> Result<Job> {
    let handler = JobHandler::new(client.clone());
    let submitted = handler.update_async(job).await?;
    settle_job(&handler, submitted, OperationKind::JobUpdate, options, on_progress).await
}

async fn settle_job(
    handler: &JobHandler,
    submitted: Job,
    kind: OperationKind,
    options: &PollOptions,
    on_progress: Option<ProgressCallback>,
) -> Result<Job> {
    let job_id = submitted
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| CoreError::UnexpectedResponse(format!("{} response has no job id", kind)))?;

    // The status on the submission response is never trusted; always re-read.
    poll_until_terminal(kind, &job_id, options, on_progress, || handler.get(&job_id)).await?;

    handler.get(&job_id).await
}

/// Terminate a job and wait for the deletion operation to finish
pub async fn delete_job_and_wait(
    client: &CloudCenterClient,
    job_id: &str,
    options: &PollOptions,
    on_progress: Option<ProgressCallback>,
) -> Result<OperationStatus> {
    let jobs = JobHandler::new(client.clone());
    let operations = OperationStatusHandler::new(client.clone());

    let submitted = jobs.delete_async(job_id).await?;
    let operation_id = submitted.poll_id().map(str::to_string).ok_or_else(|| {
        CoreError::UnexpectedResponse(format!(
            "deleting job {} returned an operation without an id",
            job_id
        ))
    })?;

    poll_until_terminal(
        OperationKind::JobDeletion,
        job_id,
        options,
        on_progress,
        || operations.get(&operation_id),
    )
    .await
}

/// Replace a "Delete tenant request accepted" API error with
/// [`CoreError::DeletionAccepted`] carrying the conditions for removal.
/// Other errors pass through unchanged.
pub fn tenant_deletion_accepted(err: CoreError) -> CoreError {
    if err.remote_msg().as_deref() == Some(TENANT_DELETE_ACCEPTED) {
        CoreError::DeletionAccepted(TENANT_DELETE_CONDITIONS.to_string())
    } else {
        err
    }
}

/// Delete a tenant, following the deletion operation when one is returned
///
/// The remote side may refuse to finish the deletion immediately and answer
/// with "Delete tenant request accepted". That answer becomes
/// [`CoreError::DeletionAccepted`] carrying the conditions that must be met
/// before the tenant disappears.
pub async fn delete_tenant_and_wait(
    client: &CloudCenterClient,
    tenant_id: &str,
    options: &PollOptions,
    on_progress: Option<ProgressCallback>,
) -> Result<Option<OperationStatus>> {
    let tenants = TenantHandler::new(client.clone());

    let submitted = tenants
        .delete_async(tenant_id)
        .await
        .map_err(tenant_deletion_accepted)?;

    let Some(operation_id) = submitted
        .as_ref()
        .and_then(OperationStatus::poll_id)
        .map(str::to_string)
    else {
        return Ok(submitted);
    };

    let operations = OperationStatusHandler::new(client.clone());
    poll_until_terminal(
        OperationKind::TenantDeletion,
        tenant_id,
        options,
        on_progress,
        || operations.get(&operation_id),
    )
    .await
    .map(Some)
}
