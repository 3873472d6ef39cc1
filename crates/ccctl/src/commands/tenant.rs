//! Tenant command implementations

use cloudcenter_core::workflows::{delete_tenant_and_wait, tenant_deletion_accepted};
use cloudcenter_core::{CoreError, Tenant, TenantHandler};
use colored::Colorize;
use tracing::debug;

use super::CommandContext;
use super::utils::read_record;
use super::wait::WaitSpinner;
use crate::cli::TenantCommands;
use crate::error::Result as CliResult;

pub async fn handle_tenant_command(ctx: &CommandContext<'_>, cmd: &TenantCommands) -> CliResult<()> {
    let client = ctx.client()?;
    let handler = TenantHandler::new(client.clone());

    match cmd {
        TenantCommands::List => ctx.emit(handler.list().await?),
        TenantCommands::Get { id } => ctx.emit(handler.get(id).await?),
        TenantCommands::Create { data } => {
            let tenant: Tenant = read_record(data)?;
            handler.add(&tenant).await?;
            println!(
                "Tenant '{}' created",
                tenant.name.as_deref().unwrap_or_default()
            );
            Ok(())
        }
        TenantCommands::Update { data } => {
            let tenant: Tenant = read_record(data)?;
            ctx.emit(handler.update(&tenant).await?)
        }
        TenantCommands::Delete { id, wait } => {
            let result = if wait.no_wait {
                debug!("Deleting tenant {} without waiting", id);
                handler.delete_async(id).await.map_err(tenant_deletion_accepted)
            } else {
                let options = ctx.poll_options(wait);
                let spinner = WaitSpinner::new(format!("Deleting tenant {}", id));
                let result =
                    delete_tenant_and_wait(&client, id, &options, Some(spinner.callback())).await;
                spinner.finish();
                result
            };

            match result {
                Ok(Some(operation)) => ctx.emit(operation),
                Ok(None) => {
                    println!("Tenant {} deleted", id);
                    Ok(())
                }
                // Queued, not failed: the tenant goes away once its conditions are met.
                Err(CoreError::DeletionAccepted(conditions)) => {
                    eprintln!("{}{} {}", "note".yellow().bold(), ":".bold(), conditions);
                    Ok(())
                }
                Err(e) => Err(e.into()),
            }
        }
    }
}
