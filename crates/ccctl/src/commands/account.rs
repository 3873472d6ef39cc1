//! Cloud account command implementations

use cloudcenter_core::workflows::{add_cloud_account_and_wait, update_cloud_account_and_wait};
use cloudcenter_core::{CloudAccount, CloudAccountHandler};

use super::CommandContext;
use super::utils::read_record;
use super::wait::WaitSpinner;
use crate::cli::AccountCommands;
use crate::error::Result as CliResult;

pub async fn handle_account_command(
    ctx: &CommandContext<'_>,
    cmd: &AccountCommands,
) -> CliResult<()> {
    let client = ctx.client()?;
    let handler = CloudAccountHandler::new(client.clone());

    match cmd {
        AccountCommands::List {
            tenant,
            cloud,
            name,
        } => match name {
            Some(name) => ctx.emit(handler.find_by_display_name(tenant, cloud, name).await?),
            None => ctx.emit(handler.list(tenant, cloud).await?),
        },
        AccountCommands::Get { tenant, cloud, id } => ctx.emit(handler.get(tenant, cloud, id).await?),
        AccountCommands::Create { data, wait } => {
            let account: CloudAccount = read_record(data)?;
            if wait.no_wait {
                return ctx.emit(handler.add_async(&account).await?);
            }
            let options = ctx.poll_options(wait);
            let spinner = WaitSpinner::new(format!(
                "Creating cloud account {}",
                account.display_name.as_deref().unwrap_or_default()
            ));
            let result =
                add_cloud_account_and_wait(&client, &account, &options, Some(spinner.callback()))
                    .await;
            spinner.finish();
            ctx.emit(result?)
        }
        AccountCommands::Update { data, wait } => {
            let account: CloudAccount = read_record(data)?;
            if wait.no_wait {
                return ctx.emit(handler.update_async(&account).await?);
            }
            let options = ctx.poll_options(wait);
            let spinner = WaitSpinner::new(format!(
                "Updating cloud account {}",
                account.display_name.as_deref().unwrap_or_default()
            ));
            let result = update_cloud_account_and_wait(
                &client,
                &account,
                &options,
                Some(spinner.callback()),
            )
            .await;
            spinner.finish();
            ctx.emit(result?)
        }
        AccountCommands::Delete { tenant, cloud, id } => {
            handler.delete(tenant, cloud, id).await?;
            println!("Cloud account {} deleted", id);
            Ok(())
        }
    }
}
