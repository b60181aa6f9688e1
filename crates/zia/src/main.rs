mod cli;
mod commands;
mod config;
mod error;
mod output;
mod state;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use zia_provider::Provider;

use crate::cli::{Cli, Command};
use crate::commands::Context;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // stdout carries command output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let provider = Provider::new();

    match cli.command {
        // No API session needed
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "zia", &mut std::io::stdout());
            Ok(())
        }

        Command::Resources => commands::catalog::resources(&provider, &Context::new(&cli.global)),
        Command::DataSources => {
            commands::catalog::data_sources(&provider, &Context::new(&cli.global))
        }
        Command::Schema { type_name, data } => {
            commands::catalog::schema(&provider, &type_name, data, &Context::new(&cli.global))
        }
        Command::Show { address } => {
            commands::resource_cmd::show(&provider, address.as_deref(), &Context::new(&cli.global))
        }

        // Everything else runs inside a session
        cmd => {
            let provider_config = config::build_provider_config(&cli.global)?;
            let meta = provider.configure(provider_config).await?;

            tracing::debug!(command = ?cmd, "dispatching command");
            let ctx = Context::new(&cli.global);
            let result = commands::dispatch(cmd, &provider, &meta, &ctx).await;

            if let Err(e) = meta.close().await {
                warn!(error = %e, "logout failed");
            }
            result
        }
    }
}
