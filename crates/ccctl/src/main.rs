use clap::{CommandFactory, Parser};
use clap_complete::{generate, shells};
use cloudcenter_core::Config;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod connection;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::CommandContext;
use connection::ConnectionManager;
use error::CcctlError;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        e.print_diagnostic();
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CcctlError> {
    // Load configuration from specified path or default location
    let (config, config_path) = if let Some(config_file) = &cli.config_file {
        let path = std::path::PathBuf::from(config_file);
        debug!("Loading config from explicit path: {:?}", path);
        (Config::load_from_path(&path)?, Some(path))
    } else {
        debug!("Loading config from default location");
        (Config::load()?, None)
    };
    debug!(
        "Creating ConnectionManager with config_path: {:?}",
        config_path
    );
    let mut conn_mgr = ConnectionManager::with_config_path(config, config_path);

    execute_command(&cli, &mut conn_mgr).await
}

fn init_tracing(verbose: u8) {
    // Check for RUST_LOG env var first, then fall back to verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "ccctl=warn,cloudcenter_core=warn",
            1 => "ccctl=info,cloudcenter_core=info",
            2 => "ccctl=debug,cloudcenter_core=debug",
            _ => "ccctl=trace,cloudcenter_core=trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .init();

    debug!("Tracing initialized with verbosity level: {}", verbose);
}

/// Cancel `token` on Ctrl-C
fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Interrupt received, cancelling");
            token.cancel();
        }
    });
}

async fn execute_command(cli: &Cli, conn_mgr: &mut ConnectionManager) -> Result<(), CcctlError> {
    // Log command execution with sanitized parameters
    trace!("Executing command: {:?}", format_command(&cli.command));
    info!("Command: {}", format_command(&cli.command));

    let format = output::OutputFormat::from_cli(cli.output);
    let cancel = CancellationToken::new();

    let start = std::time::Instant::now();
    let result = match &cli.command {
        Commands::Version => {
            debug!("Showing version information");
            match cli.output {
                cli::OutputFormat::Json | cli::OutputFormat::Yaml => {
                    let output_data = serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "name": env!("CARGO_PKG_NAME"),
                    });
                    commands::utils::emit(&output_data, format, None)
                }
                _ => {
                    println!("ccctl {}", env!("CARGO_PKG_VERSION"));
                    Ok(())
                }
            }
        }
        Commands::Completions { shell } => {
            debug!("Generating completions for {:?}", shell);
            generate_completions(*shell);
            Ok(())
        }

        Commands::Profile(profile_cmd) => {
            debug!("Executing profile command");
            commands::profile::handle_profile_command(profile_cmd, conn_mgr, format).await
        }

        command => {
            cancel_on_ctrl_c(cancel.clone());
            // Raw API responses default to JSON rather than a table.
            let format = match (command, cli.output) {
                (Commands::Api { .. }, cli::OutputFormat::Auto) => output::OutputFormat::Json,
                _ => format,
            };
            let ctx = CommandContext {
                conn_mgr,
                profile: cli.profile.as_deref(),
                format,
                query: cli.query.as_deref(),
                cancel,
            };
            execute_resource_command(&ctx, command).await
        }
    };

    let duration = start.elapsed();
    match &result {
        Ok(_) => info!("Command completed successfully in {:?}", duration),
        Err(e) => error!("Command failed after {:?}: {}", duration, e),
    }

    result
}

async fn execute_resource_command(
    ctx: &CommandContext<'_>,
    command: &Commands,
) -> Result<(), CcctlError> {
    match command {
        Commands::Api { method, path, data } => {
            info!(
                "API call: {} {} {}",
                method,
                path,
                if data.is_some() { "with data" } else { "no data" }
            );
            commands::api::handle_api_command(ctx, *method, path, data.as_deref()).await
        }
        Commands::Tenant(cmd) => commands::tenant::handle_tenant_command(ctx, cmd).await,
        Commands::User(cmd) => commands::inventory::handle_user_command(ctx, cmd).await,
        Commands::Cloud(cmd) => commands::inventory::handle_cloud_command(ctx, cmd).await,
        Commands::Account(cmd) => commands::account::handle_account_command(ctx, cmd).await,
        Commands::Job(cmd) => commands::job::handle_job_command(ctx, cmd).await,
        Commands::Operation(cmd) => commands::inventory::handle_operation_command(ctx, cmd).await,
        Commands::App(cmd) => commands::app::handle_app_command(ctx, cmd).await,
        Commands::Bundle(cmd) => commands::inventory::handle_bundle_command(ctx, cmd).await,
        Commands::Vm(cmd) => commands::inventory::handle_vm_command(ctx, cmd).await,
        Commands::Version | Commands::Completions { .. } | Commands::Profile(_) => Ok(()),
    }
}

/// Generate shell completions
fn generate_completions(shell: cli::Shell) {
    let mut cmd = cli::Cli::command();
    let name = cmd.get_name().to_string();

    match shell {
        cli::Shell::Bash => generate(shells::Bash, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Zsh => generate(shells::Zsh, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Fish => generate(shells::Fish, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::PowerShell => {
            generate(shells::PowerShell, &mut cmd, name, &mut std::io::stdout())
        }
        cli::Shell::Elvish => generate(shells::Elvish, &mut cmd, name, &mut std::io::stdout()),
    }
}

/// Format command for human-readable logging (without sensitive data)
fn format_command(command: &Commands) -> String {
    match command {
        Commands::Version => "version".to_string(),
        Commands::Completions { shell } => format!("completions {:?}", shell),
        Commands::Profile(cmd) => {
            use cli::ProfileCommands::*;
            match cmd {
                List => "profile list".to_string(),
                Path => "profile path".to_string(),
                Show { name } => format!("profile show {}", name),
                Set { name, .. } => format!("profile set {} [credentials redacted]", name),
                Remove { name } => format!("profile remove {}", name),
                Default { name } => format!("profile default {}", name),
                Validate { connect } => format!("profile validate (connect={})", connect),
            }
        }
        Commands::Api { method, path, .. } => format!("api {} {}", method, path),
        Commands::Tenant(cmd) => format!("tenant {:?}", cmd),
        Commands::User(cmd) => format!("user {:?}", cmd),
        Commands::Cloud(cmd) => format!("cloud {:?}", cmd),
        Commands::Account(cmd) => {
            use cli::AccountCommands::*;
            match cmd {
                // Account bodies carry cloud credentials
                Create { .. } => "account create [data redacted]".to_string(),
                Update { .. } => "account update [data redacted]".to_string(),
                other => format!("account {:?}", other),
            }
        }
        Commands::Job(cmd) => format!("job {:?}", cmd),
        Commands::Operation(cmd) => format!("operation {:?}", cmd),
        Commands::App(cmd) => format!("app {:?}", cmd),
        Commands::Bundle(cmd) => format!("bundle {:?}", cmd),
        Commands::Vm(cmd) => format!("vm {:?}", cmd),
    }
}
