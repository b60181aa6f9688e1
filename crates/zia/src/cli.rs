//! Clap derive structures for the `zia` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// zia -- drive Zscaler Internet Access resources from the command line
#[derive(Debug, Parser)]
#[command(
    name = "zia",
    version,
    about = "Manage Zscaler Internet Access policy as resources",
    long_about = "Applies, refreshes, imports and destroys ZIA resources against a\n\
        local state file, and reads ZIA data sources.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Tenant profile to use
    #[arg(long, short = 'p', env = "ZIA_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Config file (defaults to the platform config dir)
    #[arg(long, env = "ZIA_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// ZIA cloud name, e.g. zscalertwo (overrides profile)
    #[arg(long, global = true)]
    pub cloud: Option<String>,

    /// Full API base URL (overrides cloud and profile)
    #[arg(long, env = "ZIA_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// State file path
    #[arg(long, env = "ZIA_STATE", global = true)]
    pub state: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', env = "ZIA_OUTPUT", default_value = "table", global = true)]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "ZIA_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List resource types
    Resources,

    /// List data source types
    #[command(name = "data-sources")]
    DataSources,

    /// Show the schema of a resource or data source type
    Schema {
        /// Type name, e.g. zia_rule_labels
        type_name: String,

        /// Show the data source of that name instead of the resource
        #[arg(long)]
        data: bool,
    },

    /// Create or update a resource from a configuration file
    Apply(ApplyArgs),

    /// Re-read resources in state from the API
    Refresh {
        /// Only refresh this address (type.name)
        address: Option<String>,
    },

    /// Adopt an existing entity into state
    Import {
        /// Resource type, e.g. zia_rule_labels
        type_name: String,
        /// Local name for the state address
        name: String,
        /// Numeric ID, or a name to look up
        identifier: String,
    },

    /// Delete a resource and drop it from state
    Destroy {
        /// Resource type
        type_name: String,
        /// Local name in state
        name: String,
    },

    /// Show resources recorded in state
    #[command(alias = "ls")]
    Show {
        /// Only show this address (type.name)
        address: Option<String>,
    },

    /// Read a data source
    Data(DataArgs),

    /// Activate pending configuration changes
    Activate,

    /// Show the configuration activation status
    Status,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RESOURCES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Resource type, e.g. zia_rule_labels
    pub type_name: String,

    /// Local name for the state address
    pub name: String,

    /// Attribute file (JSON, YAML or TOML, by extension)
    #[arg(long, short = 'f')]
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct DataArgs {
    /// Data source type, e.g. zia_location_groups
    pub type_name: String,

    /// Lookup file (JSON, YAML or TOML)
    #[arg(long, short = 'f', conflicts_with_all = ["id", "name"])]
    pub file: Option<PathBuf>,

    /// Look up by ID (numeric, or e.g. CUSTOM_01 for URL categories)
    #[arg(long)]
    pub id: Option<String>,

    /// Look up by name
    #[arg(long)]
    pub name: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets redacted)
    Show,

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },

    /// Store an API key in the system keyring
    SetApiKey {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
