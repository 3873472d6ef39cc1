//! Job command implementations
//!
//! `deploy`, `update` and `delete` wait for the operation to finish unless
//! `--async` is given, in which case the submission response is printed.

use cloudcenter_core::workflows::{add_job_and_wait, delete_job_and_wait, update_job_and_wait};
use cloudcenter_core::{Job, JobHandler, OperationKind, PollOptions, poll_until_terminal};
use tracing::debug;

use super::CommandContext;
use super::utils::read_record;
use super::wait::WaitSpinner;
use crate::cli::{JobCommands, WaitArgs};
use crate::error::Result as CliResult;

pub async fn handle_job_command(ctx: &CommandContext<'_>, cmd: &JobCommands) -> CliResult<()> {
    let client = ctx.client()?;
    let handler = JobHandler::new(client.clone());

    match cmd {
        JobCommands::List { name } => match name {
            Some(name) => ctx.emit(handler.find_by_name(name).await?),
            None => ctx.emit(handler.list().await?),
        },
        JobCommands::Get { id } => ctx.emit(handler.get(id).await?),
        JobCommands::Deploy { data, wait } => {
            let job: Job = read_record(data)?;
            if wait.no_wait {
                debug!("Submitting job without waiting");
                return ctx.emit(handler.add_async(&job).await?);
            }
            let options = ctx.poll_options(wait);
            let spinner = WaitSpinner::new("Submitting job");
            let result = add_job_and_wait(&client, &job, &options, Some(spinner.callback())).await;
            spinner.finish();
            ctx.emit(result?)
        }
        JobCommands::Update { data, wait } => {
            let job: Job = read_record(data)?;
            if wait.no_wait {
                return ctx.emit(handler.update_async(&job).await?);
            }
            let options = ctx.poll_options(wait);
            let spinner = WaitSpinner::new(format!(
                "Updating job {}",
                job.id.as_deref().unwrap_or_default()
            ));
            let result =
                update_job_and_wait(&client, &job, &options, Some(spinner.callback())).await;
            spinner.finish();
            ctx.emit(result?)
        }
        JobCommands::Delete { id, wait } => {
            if wait.no_wait {
                return ctx.emit(handler.delete_async(id).await?);
            }
            let options = ctx.poll_options(wait);
            let spinner = WaitSpinner::new(format!("Deleting job {}", id));
            let result = delete_job_and_wait(&client, id, &options, Some(spinner.callback())).await;
            spinner.finish();
            ctx.emit(result?)
        }
        JobCommands::Wait {
            id,
            interval,
            timeout,
        } => {
            let options = wait_options(ctx, *interval, *timeout);
            let spinner = WaitSpinner::new(format!("Waiting for job {}", id));
            let result = poll_until_terminal(
                OperationKind::JobDeployment,
                id,
                &options,
                Some(spinner.callback()),
                || handler.get(id),
            )
            .await;
            spinner.finish();
            ctx.emit(result?)
        }
    }
}

/// Polling bounds for the standalone `wait` commands
pub(crate) fn wait_options(
    ctx: &CommandContext<'_>,
    interval: Option<u64>,
    timeout: Option<u64>,
) -> PollOptions {
    ctx.poll_options(&WaitArgs {
        no_wait: false,
        interval,
        timeout,
    })
}
