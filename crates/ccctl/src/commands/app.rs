//! Application profile command implementations

use cloudcenter_core::AppHandler;

use super::CommandContext;
use crate::cli::AppCommands;
use crate::error::{CcctlError, Result as CliResult};

pub async fn handle_app_command(ctx: &CommandContext<'_>, cmd: &AppCommands) -> CliResult<()> {
    let handler = AppHandler::new(ctx.client()?);

    match cmd {
        AppCommands::List => ctx.emit(handler.list().await?),
        AppCommands::Import { file } => {
            let archive = tokio::fs::read(file)
                .await
                .map_err(|e| CcctlError::FileError {
                    path: file.display().to_string(),
                    message: e.to_string(),
                })?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| CcctlError::InvalidInput {
                    message: format!("'{}' is not a file", file.display()),
                })?;
            ctx.emit(handler.import(&file_name, archive).await?)
        }
    }
}
