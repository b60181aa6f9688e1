pub mod activation_cmd;
pub mod catalog;
pub mod config_cmd;
pub mod data_cmd;
pub mod resource_cmd;
pub mod util;

use std::path::PathBuf;

use zia_provider::{Meta, Provider};

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Per-invocation settings every handler needs.
#[derive(Debug, Clone)]
pub struct Context {
    pub format: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub yes: bool,
    pub state_path: PathBuf,
}

impl Context {
    pub fn new(global: &GlobalOpts) -> Self {
        Self {
            format: global.output,
            color: output::should_color(global.color),
            quiet: global.quiet,
            yes: global.yes,
            state_path: crate::config::state_file(global),
        }
    }
}

/// Route a session-bound command to its handler.
pub async fn dispatch(
    cmd: Command,
    provider: &Provider,
    meta: &Meta,
    ctx: &Context,
) -> Result<(), CliError> {
    match cmd {
        Command::Apply(args) => resource_cmd::apply(args, provider, meta, ctx).await,
        Command::Refresh { address } => {
            resource_cmd::refresh(address.as_deref(), provider, meta, ctx).await
        }
        Command::Import {
            type_name,
            name,
            identifier,
        } => resource_cmd::import(&type_name, &name, &identifier, provider, meta, ctx).await,
        Command::Destroy { type_name, name } => {
            resource_cmd::destroy(&type_name, &name, provider, meta, ctx).await
        }
        Command::Data(args) => data_cmd::handle(args, provider, meta, ctx).await,
        Command::Activate => activation_cmd::activate(meta, ctx).await,
        Command::Status => activation_cmd::status(meta, ctx).await,

        // Handled in main without a session
        Command::Resources
        | Command::DataSources
        | Command::Schema { .. }
        | Command::Show { .. }
        | Command::Config(_)
        | Command::Completions(_) => unreachable!("session-free command routed to dispatch"),
    }
}
