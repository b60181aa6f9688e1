//! CLI error types with miette diagnostics.
//!
//! Maps provider and config errors into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use zia_config::ConfigError;
use zia_provider::ProviderError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the ZIA API")]
    #[diagnostic(
        code(zia::connection_failed),
        help(
            "Check the cloud name or --base-url and your network path.\n\
             Behind a TLS-inspecting proxy, configure ca_cert in your profile."
        )
    )]
    ConnectionFailed {
        #[source]
        source: zia_api::Error,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(zia::auth_failed),
        help(
            "Verify the username, password and API key.\n\
             Run: zia config set-password --profile {profile}"
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("No {missing} configured for profile '{profile}'")]
    #[diagnostic(
        code(zia::no_credentials),
        help(
            "Configure credentials with: zia config init\n\
             Or set ZIA_USERNAME, ZIA_PASSWORD and ZIA_API_KEY."
        )
    )]
    NoCredentials {
        profile: String,
        missing: &'static str,
    },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{kind} '{identifier}' not found")]
    #[diagnostic(code(zia::not_found))]
    NotFound { kind: String, identifier: String },

    #[error("'{address}' is not in state")]
    #[diagnostic(
        code(zia::not_in_state),
        help("Run: zia show to list managed resources, or zia import to adopt one.")
    )]
    NotInState { address: String },

    #[error("'{address}' is already managed")]
    #[diagnostic(
        code(zia::already_managed),
        help("Pick another local name, or destroy the existing resource first.")
    )]
    AlreadyManaged { address: String },

    #[error("Unknown type '{type_name}'")]
    #[diagnostic(
        code(zia::unknown_type),
        help("Run: zia resources or zia data-sources to list supported types.")
    )]
    UnknownType { type_name: String },

    // ── Provider ─────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(zia::provider))]
    Provider(ProviderError),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(zia::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(zia::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: zia config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(zia::config))]
    Config(ConfigError),

    #[error("State file {path} is unreadable: {reason}")]
    #[diagnostic(
        code(zia::state),
        help("Fix or move the file; zia never rewrites a state file it cannot parse.")
    )]
    State { path: String, reason: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(zia::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(zia::json), help("Check the file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML payload: {0}")]
    #[diagnostic(code(zia::yaml), help("Check the file contents and try again."))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid TOML payload: {0}")]
    #[diagnostic(code(zia::toml), help("Check the file contents and try again."))]
    Toml(#[from] toml::de::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::NotInState { .. } | Self::UnknownType { .. } => {
                exit_code::NOT_FOUND
            }
            Self::AlreadyManaged { .. } => exit_code::CONFLICT,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::ProfileNotFound { .. } => exit_code::USAGE,
            Self::Provider(e) if e.is_not_found() => exit_code::NOT_FOUND,
            Self::Provider(ProviderError::Validation(_) | ProviderError::MissingAttribute { .. }) => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── ProviderError → CliError mapping ─────────────────────────────────

impl From<ProviderError> for CliError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Api(zia_api::Error::Authentication { message }) => Self::AuthFailed {
                profile: "current".into(),
                message,
            },
            ProviderError::Api(source @ (zia_api::Error::Transport(_) | zia_api::Error::Tls(_))) => {
                Self::ConnectionFailed { source }
            }
            ProviderError::NotFound { kind, identifier } => Self::NotFound {
                kind: kind.to_owned(),
                identifier,
            },
            ProviderError::UnknownResource { type_name } => Self::UnknownType { type_name },
            other => Self::Provider(other),
        }
    }
}

impl From<zia_api::Error> for CliError {
    fn from(err: zia_api::Error) -> Self {
        ProviderError::from(err).into()
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile, missing } => Self::NoCredentials { profile, missing },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        let missing: CliError = ProviderError::NotFound {
            kind: "rule label",
            identifier: "x".into(),
        }
        .into();
        assert_eq!(missing.exit_code(), exit_code::NOT_FOUND);

        let auth: CliError = zia_api::Error::Authentication {
            message: "bad password".into(),
        }
        .into();
        assert_eq!(auth.exit_code(), exit_code::AUTH);

        let creds: CliError = ConfigError::NoCredentials {
            profile: "default".into(),
            missing: "password",
        }
        .into();
        assert_eq!(creds.exit_code(), exit_code::AUTH);

        let api: CliError = zia_api::Error::Api {
            status: 500,
            code: None,
            message: "boom".into(),
        }
        .into();
        assert_eq!(api.exit_code(), exit_code::GENERAL);
    }
}
