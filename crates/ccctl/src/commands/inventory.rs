//! Read-mostly commands: users, clouds, bundles, virtual machines and
//! operation status

use cloudcenter_core::resources::bundles::BundleHandler;
use cloudcenter_core::resources::cloud_instance_types::CloudInstanceTypeHandler;
use cloudcenter_core::resources::cloud_regions::CloudRegionHandler;
use cloudcenter_core::{
    CloudHandler, OperationKind, OperationStatusHandler, UserHandler, VirtualMachineHandler,
    poll_until_terminal,
};

use super::CommandContext;
use super::job::wait_options;
use super::wait::WaitSpinner;
use crate::cli::{BundleCommands, CloudCommands, OperationCommands, UserCommands, VmCommands};
use crate::error::{CcctlError, Result as CliResult};

pub async fn handle_user_command(ctx: &CommandContext<'_>, cmd: &UserCommands) -> CliResult<()> {
    let handler = UserHandler::new(ctx.client()?);
    match cmd {
        UserCommands::List => ctx.emit(handler.list().await?),
        UserCommands::Get { id } => ctx.emit(handler.get(id).await?),
    }
}

pub async fn handle_cloud_command(ctx: &CommandContext<'_>, cmd: &CloudCommands) -> CliResult<()> {
    let client = ctx.client()?;
    match cmd {
        CloudCommands::List => ctx.emit(CloudHandler::new(client).list().await?),
        CloudCommands::Regions { tenant, cloud } => {
            ctx.emit(CloudRegionHandler::new(client).list(tenant, cloud).await?)
        }
        CloudCommands::InstanceTypes {
            tenant,
            cloud,
            region,
            sync,
        } => {
            let handler = CloudInstanceTypeHandler::new(client);
            if *sync {
                ctx.emit(handler.sync(tenant, cloud, region).await?)
            } else {
                ctx.emit(handler.list(tenant, cloud, region).await?)
            }
        }
    }
}

pub async fn handle_bundle_command(
    ctx: &CommandContext<'_>,
    cmd: &BundleCommands,
) -> CliResult<()> {
    let handler = BundleHandler::new(ctx.client()?);
    match cmd {
        BundleCommands::List { tenant } => ctx.emit(handler.list(tenant).await?),
        BundleCommands::Get { tenant, id, name } => match (id, name) {
            (Some(id), _) => ctx.emit(handler.get(tenant, id).await?),
            (None, Some(name)) => ctx.emit(handler.find_by_name(tenant, name).await?),
            (None, None) => Err(CcctlError::InvalidInput {
                message: "Either a bundle ID or --name is required".to_string(),
            }),
        },
    }
}

pub async fn handle_vm_command(ctx: &CommandContext<'_>, cmd: &VmCommands) -> CliResult<()> {
    let handler = VirtualMachineHandler::new(ctx.client()?);
    match cmd {
        VmCommands::List => ctx.emit(handler.list().await?),
        VmCommands::Get { id } => ctx.emit(handler.get(id).await?),
        VmCommands::Cost => ctx.emit(handler.cost_summary().await?),
    }
}

pub async fn handle_operation_command(
    ctx: &CommandContext<'_>,
    cmd: &OperationCommands,
) -> CliResult<()> {
    let handler = OperationStatusHandler::new(ctx.client()?);
    match cmd {
        OperationCommands::Get { id } => ctx.emit(handler.get(id).await?),
        OperationCommands::Wait {
            id,
            interval,
            timeout,
        } => {
            let options = wait_options(ctx, *interval, *timeout);
            let spinner = WaitSpinner::new(format!("Waiting for operation {}", id));
            let result = poll_until_terminal(
                OperationKind::Operation,
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
