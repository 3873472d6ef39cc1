//! Command implementations

pub mod account;
pub mod api;
pub mod app;
pub mod inventory;
pub mod job;
pub mod profile;
pub mod tenant;
pub mod utils;
pub mod wait;

use cloudcenter_core::{CloudCenterClient, PollOptions};
use tokio_util::sync::CancellationToken;

use crate::cli::WaitArgs;
use crate::connection::ConnectionManager;
use crate::error::Result as CliResult;
use crate::output::OutputFormat;

/// Everything a resource command needs besides its own arguments
pub struct CommandContext<'a> {
    pub conn_mgr: &'a ConnectionManager,
    pub profile: Option<&'a str>,
    pub format: OutputFormat,
    pub query: Option<&'a str>,
    /// Cancelled on Ctrl-C so waits stop promptly
    pub cancel: CancellationToken,
}

impl CommandContext<'_> {
    pub fn client(&self) -> CliResult<CloudCenterClient> {
        self.conn_mgr.create_client(self.profile)
    }

    /// Polling bounds for a waiting command, tied to the Ctrl-C token
    pub fn poll_options(&self, wait: &WaitArgs) -> PollOptions {
        self.conn_mgr
            .poll_options(self.profile, wait)
            .with_cancel(self.cancel.clone())
    }

    /// Print a result with the global output settings
    pub fn emit<T: serde::Serialize>(&self, data: T) -> CliResult<()> {
        utils::emit(data, self.format, self.query)
    }
}
