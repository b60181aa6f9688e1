//! Shared configuration for the ZIA tools.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `zia_provider::ProviderConfig`. The CLI layers its
//! flag overrides on top of this crate.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use zia_api::{Credentials, TlsMode, TransportConfig, ZiaCloud};
use zia_provider::ProviderConfig;
use zia_provider::activation::{ACTIVATION_ENV, ActivationSettings, DEFAULT_ACTIVATION_DELAY};

/// Keyring service name; entries are keyed `<profile>/<secret>`.
pub const KEYRING_SERVICE: &str = "zia";

pub const USERNAME_ENV: &str = "ZIA_USERNAME";
pub const PASSWORD_ENV: &str = "ZIA_PASSWORD";
pub const API_KEY_ENV: &str = "ZIA_API_KEY";
pub const CLOUD_ENV: &str = "ZIA_CLOUD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no {missing} configured for profile '{profile}'")]
    NoCredentials {
        profile: String,
        missing: &'static str,
    },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named tenant profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Profile to use: the explicit name, else `default_profile`, else `"default"`.
    pub fn profile_name<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Path of the local state file.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            state_file: default_state_file(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    60
}
fn default_state_file() -> PathBuf {
    PathBuf::from("zia.state.json")
}

/// A named ZIA tenant profile.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    /// Cloud name, e.g. "zscalertwo".
    pub cloud: Option<String>,

    /// Full API base URL; overrides `cloud` (test tenants, proxies).
    pub base_url: Option<String>,

    pub username: Option<String>,

    /// Password (plaintext, prefer keyring).
    pub password: Option<String>,

    /// API key (plaintext, prefer keyring or env var).
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,

    /// Request timeout in seconds.
    pub timeout: Option<u64>,

    /// Accept invalid TLS certificates.
    pub insecure: Option<bool>,

    /// Path to a custom CA certificate (TLS-inspecting proxies).
    pub ca_cert: Option<PathBuf>,

    /// Activate after every change.
    pub activation: Option<bool>,

    /// Delay before activation, e.g. "2s" or "500ms".
    pub activation_delay: Option<String>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "zia", "zia").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("zia");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path`, merged with `ZIA_`-prefixed environment
/// variables (`ZIA_DEFAULT_PROFILE`, `ZIA_DEFAULTS__OUTPUT`, ...).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("ZIA_").split("__").only(&[
            "default_profile",
            "defaults.output",
            "defaults.color",
            "defaults.timeout",
            "defaults.state_file",
        ]));

    Ok(figment.extract()?)
}

/// Load config, returning a default if the file is missing or broken.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to the canonical path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Keyring ─────────────────────────────────────────────────────────

/// Which secret a keyring entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKind {
    Password,
    ApiKey,
}

impl SecretKind {
    fn entry_name(self, profile_name: &str) -> String {
        match self {
            Self::Password => format!("{profile_name}/password"),
            Self::ApiKey => format!("{profile_name}/api-key"),
        }
    }
}

/// Read a secret from the system keyring; any failure reads as absent.
pub fn keyring_secret(profile_name: &str, kind: SecretKind) -> Option<String> {
    keyring::Entry::new(KEYRING_SERVICE, &kind.entry_name(profile_name))
        .ok()?
        .get_password()
        .ok()
}

/// Store a secret in the system keyring.
pub fn store_secret(profile_name: &str, kind: SecretKind, secret: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &kind.entry_name(profile_name))?;
    entry.set_password(secret)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve credentials from the process environment and the keyring.
pub fn resolve_credentials(profile: &Profile, profile_name: &str) -> Result<Credentials, ConfigError> {
    resolve_credentials_with(
        profile,
        profile_name,
        |name| std::env::var(name).ok(),
        |kind| keyring_secret(profile_name, kind),
    )
}

/// Credential chain with injectable sources: env, then keyring, then
/// plaintext profile values.
pub fn resolve_credentials_with(
    profile: &Profile,
    profile_name: &str,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl Fn(SecretKind) -> Option<String>,
) -> Result<Credentials, ConfigError> {
    let missing = |what| ConfigError::NoCredentials {
        profile: profile_name.into(),
        missing: what,
    };

    let username = env(USERNAME_ENV)
        .or_else(|| profile.username.clone())
        .ok_or_else(|| missing("username"))?;

    let password = env(PASSWORD_ENV)
        .or_else(|| keyring(SecretKind::Password))
        .or_else(|| profile.password.clone())
        .ok_or_else(|| missing("password"))?;

    let api_key = profile
        .api_key_env
        .as_deref()
        .and_then(&env)
        .or_else(|| env(API_KEY_ENV))
        .or_else(|| keyring(SecretKind::ApiKey))
        .or_else(|| profile.api_key.clone())
        .ok_or_else(|| missing("API key"))?;

    Ok(Credentials {
        username,
        password: SecretString::from(password),
        api_key: SecretString::from(api_key),
    })
}

// ── Provider config ─────────────────────────────────────────────────

/// API base URL: `base_url` wins, then the profile's `cloud`, then `ZIA_CLOUD`.
pub fn resolve_base_url(
    profile: &Profile,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Url, ConfigError> {
    if let Some(raw) = &profile.base_url {
        return Url::parse(raw).map_err(|e| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("{e}: {raw}"),
        });
    }

    let cloud = profile
        .cloud
        .clone()
        .or_else(|| env(CLOUD_ENV))
        .ok_or_else(|| ConfigError::Validation {
            field: "cloud".into(),
            reason: "set `cloud`, `base_url` or ZIA_CLOUD".into(),
        })?;
    let cloud = ZiaCloud::from_str(&cloud).map_err(|_| ConfigError::Validation {
        field: "cloud".into(),
        reason: format!("unknown ZIA cloud '{cloud}'"),
    })?;
    Ok(cloud.base_url())
}

/// Activation toggle: `ZIA_ACTIVATION` overrides the profile setting.
pub fn resolve_activation(
    profile: &Profile,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ActivationSettings, ConfigError> {
    let enabled = match env(ACTIVATION_ENV) {
        Some(raw) => ActivationSettings::from_env_value(Some(&raw)).enabled,
        None => profile.activation.unwrap_or(false),
    };

    let delay = match &profile.activation_delay {
        Some(raw) => humantime::parse_duration(raw).map_err(|e| ConfigError::Validation {
            field: "activation_delay".into(),
            reason: e.to_string(),
        })?,
        None => DEFAULT_ACTIVATION_DELAY,
    };

    Ok(ActivationSettings::enabled(enabled).with_delay(delay))
}

pub fn resolve_transport(profile: &Profile, default_timeout: u64) -> TransportConfig {
    let tls = if profile.insecure.unwrap_or(false) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ca_path) = &profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    TransportConfig {
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(default_timeout)),
        cookie_jar: None,
    }
    .with_cookie_jar()
}

/// Build a `ProviderConfig` from a profile, no CLI flag overrides.
pub fn profile_to_provider_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<ProviderConfig, ConfigError> {
    let env = |name: &str| std::env::var(name).ok();
    Ok(ProviderConfig {
        base_url: resolve_base_url(profile, env)?,
        credentials: resolve_credentials(profile, profile_name)?,
        transport: resolve_transport(profile, default_timeout()),
        activation: resolve_activation(profile, env)?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn no_keyring(_: SecretKind) -> Option<String> {
        None
    }

    fn plaintext_profile() -> Profile {
        Profile {
            cloud: Some("zscalertwo".into()),
            username: Some("admin@example.com".into()),
            password: Some("plain-pw".into()),
            api_key: Some("plainapikey0".into()),
            ..Profile::default()
        }
    }

    #[test]
    fn plaintext_is_the_last_resort() {
        let creds =
            resolve_credentials_with(&plaintext_profile(), "default", no_env, no_keyring).unwrap();
        assert_eq!(creds.username, "admin@example.com");
        assert_eq!(creds.password.expose_secret(), "plain-pw");
        assert_eq!(creds.api_key.expose_secret(), "plainapikey0");
    }

    #[test]
    fn env_beats_keyring_beats_plaintext() {
        let env = |name: &str| (name == PASSWORD_ENV).then(|| "env-pw".to_owned());
        let keyring = |kind: SecretKind| (kind == SecretKind::ApiKey).then(|| "keyringkey00".to_owned());
        let creds = resolve_credentials_with(&plaintext_profile(), "default", env, keyring).unwrap();
        assert_eq!(creds.password.expose_secret(), "env-pw");
        assert_eq!(creds.api_key.expose_secret(), "keyringkey00");
    }

    #[test]
    fn custom_api_key_env_is_consulted_first() {
        let profile = Profile {
            api_key_env: Some("TENANT_B_KEY".into()),
            ..plaintext_profile()
        };
        let env = |name: &str| match name {
            "TENANT_B_KEY" => Some("tenantbkey00".to_owned()),
            API_KEY_ENV => Some("generickey00".to_owned()),
            _ => None,
        };
        let creds = resolve_credentials_with(&profile, "b", env, no_keyring).unwrap();
        assert_eq!(creds.api_key.expose_secret(), "tenantbkey00");
    }

    #[test]
    fn missing_secret_names_what_is_missing() {
        let profile = Profile {
            api_key: None,
            ..plaintext_profile()
        };
        let err = resolve_credentials_with(&profile, "lab", no_env, no_keyring).unwrap_err();
        assert_eq!(err.to_string(), "no API key configured for profile 'lab'");
    }

    #[test]
    fn base_url_precedence() {
        let env = |name: &str| (name == CLOUD_ENV).then(|| "zscalerbeta".to_owned());
        let mut profile = Profile::default();
        assert_eq!(
            resolve_base_url(&profile, env).unwrap().as_str(),
            "https://zsapi.zscalerbeta.net/api/v1/"
        );

        profile.cloud = Some("zscalertwo".into());
        assert_eq!(
            resolve_base_url(&profile, env).unwrap().as_str(),
            "https://zsapi.zscalertwo.net/api/v1/"
        );

        profile.base_url = Some("http://127.0.0.1:9000/api/v1/".into());
        assert_eq!(
            resolve_base_url(&profile, env).unwrap().as_str(),
            "http://127.0.0.1:9000/api/v1/"
        );
    }

    #[test]
    fn unknown_cloud_is_rejected() {
        let profile = Profile {
            cloud: Some("zscalerten".into()),
            ..Profile::default()
        };
        assert!(matches!(
            resolve_base_url(&profile, no_env),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn activation_env_overrides_profile() {
        let profile = Profile {
            activation: Some(true),
            activation_delay: Some("500ms".into()),
            ..Profile::default()
        };
        let settings = resolve_activation(&profile, no_env).unwrap();
        assert!(settings.enabled);
        assert_eq!(settings.delay, Duration::from_millis(500));

        let env = |name: &str| (name == ACTIVATION_ENV).then(|| "false".to_owned());
        assert!(!resolve_activation(&profile, env).unwrap().enabled);
    }

    #[test]
    fn bad_activation_delay_is_a_validation_error() {
        let profile = Profile {
            activation_delay: Some("soon".into()),
            ..Profile::default()
        };
        assert!(resolve_activation(&profile, no_env).is_err());
    }

    #[test]
    fn transport_honours_tls_overrides() {
        let profile = Profile {
            insecure: Some(true),
            timeout: Some(5),
            ..Profile::default()
        };
        let transport = resolve_transport(&profile, 60);
        assert!(matches!(transport.tls, TlsMode::DangerAcceptInvalid));
        assert_eq!(transport.timeout, Duration::from_secs(5));
        assert!(transport.cookie_jar.is_some());
    }

    #[test]
    fn config_round_trips_through_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert("default".into(), plaintext_profile());
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profiles["default"], plaintext_profile());
        assert_eq!(loaded.profile_name(None), "default");
        assert_eq!(loaded.profile_name(Some("lab")), "lab");
        assert!(loaded.profile("lab").is_err());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.defaults.output, "table");
        assert!(cfg.profiles.is_empty());
    }
}
