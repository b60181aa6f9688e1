//! Config subcommand handlers.

use std::str::FromStr;

use dialoguer::{Confirm, Input, Select};

use zia_api::ZiaCloud;
use zia_config::{Config, Profile, SecretKind};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

const SECRET_SET: &str = "(set)";

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn prompt_secret(prompt: &str, field: &str) -> Result<String, CliError> {
    let secret = rpassword::prompt_password(prompt).map_err(prompt_err)?;
    if secret.is_empty() {
        return Err(CliError::Validation {
            field: field.into(),
            reason: format!("{field} cannot be empty"),
        });
    }
    Ok(secret)
}

/// Store in the keyring when chosen, else hand back the plaintext for the file.
fn place_secret(
    profile_name: &str,
    kind: SecretKind,
    label: &str,
    secret: String,
) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt(format!("Where to store the {label}?"))
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        zia_config::store_secret(profile_name, kind, &secret)?;
        eprintln!("   ✓ {label} stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(secret))
    }
}

/// Copy of the config with plaintext secrets masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some(SECRET_SET.into());
        }
        if profile.api_key.is_some() {
            profile.api_key = Some(SECRET_SET.into());
        }
    }
    cfg
}

fn render_config(cfg: &Config, format: OutputFormat) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(cfg)?,
        OutputFormat::JsonCompact => serde_json::to_string(cfg)?,
        OutputFormat::Yaml => serde_yaml::to_string(cfg)?,
        OutputFormat::Table | OutputFormat::Plain => toml::to_string_pretty(cfg).map_err(|e| {
            CliError::Validation {
                field: "config".into(),
                reason: format!("failed to serialize config: {e}"),
            }
        })?,
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),

        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            let out = render_config(&redacted(&cfg), global.output)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::SetPassword { profile } => {
            let cfg = config::load(global)?;
            let name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            let password = prompt_secret(&format!("Password for profile '{name}': "), "password")?;
            zia_config::store_secret(&name, SecretKind::Password, &password)?;
            eprintln!("✓ Password stored in system keyring for profile '{name}'");
            Ok(())
        }

        ConfigCommand::SetApiKey { profile } => {
            let cfg = config::load(global)?;
            let name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            let api_key = prompt_secret(&format!("API key for profile '{name}': "), "api_key")?;
            zia_config::store_secret(&name, SecretKind::ApiKey, &api_key)?;
            eprintln!("✓ API key stored in system keyring for profile '{name}'");
            Ok(())
        }
    }
}

// ── Init: interactive wizard ────────────────────────────────────────

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_file(global);
    eprintln!("ZIA CLI configuration wizard");
    eprintln!("   Config path: {}\n", path.display());

    let mut cfg = config::load(global)?;

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    let cloud: String = Input::new()
        .with_prompt("ZIA cloud (zscaler, zscalerone, zscalertwo, ...)")
        .default("zscaler".into())
        .validate_with(|input: &String| -> Result<(), String> {
            ZiaCloud::from_str(input)
                .map(|_| ())
                .map_err(|_| format!("unknown ZIA cloud '{input}'"))
        })
        .interact_text()
        .map_err(prompt_err)?;

    let username: String = Input::new()
        .with_prompt("Admin username")
        .interact_text()
        .map_err(prompt_err)?;

    let password = prompt_secret("Password: ", "password")?;
    let password = place_secret(&profile_name, SecretKind::Password, "password", password)?;

    let api_key = prompt_secret("API key: ", "api_key")?;
    let api_key = place_secret(&profile_name, SecretKind::ApiKey, "API key", api_key)?;

    let activation = Confirm::new()
        .with_prompt("Activate configuration after every change?")
        .default(false)
        .interact()
        .map_err(prompt_err)?;

    cfg.profiles.insert(
        profile_name.clone(),
        Profile {
            cloud: Some(cloud),
            username: Some(username),
            password,
            api_key,
            activation: Some(activation),
            ..Profile::default()
        },
    );
    cfg.default_profile = Some(profile_name.clone());

    zia_config::save_config_to(&cfg, &path)?;

    eprintln!("\n✓ Configuration written to {}", path.display());
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Test it: zia status");
    Ok(())
}
