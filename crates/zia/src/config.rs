//! Bridge from CLI flags to `zia_config`: picks the config file and
//! profile, applies flag overrides, and builds the `ProviderConfig`.

use std::path::PathBuf;

use zia_config::{Config, Profile};
use zia_provider::ProviderConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Config file in effect: `--config`/`ZIA_CONFIG`, else the platform path.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(zia_config::config_path)
}

/// Load the config file, falling back to defaults when it is absent.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(zia_config::load_config_from(&config_file(global))?)
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.profile_name(global.profile.as_deref()).to_owned()
}

/// State file in effect: `--state`/`ZIA_STATE`, else the configured default.
pub fn state_file(global: &GlobalOpts) -> PathBuf {
    global.state.clone().unwrap_or_else(|| {
        load(global)
            .map(|cfg| cfg.defaults.state_file)
            .unwrap_or_else(|_| PathBuf::from("zia.state.json"))
    })
}

/// The profile plus flag overrides. An explicitly named profile must exist;
/// otherwise an empty profile lets env vars and flags carry everything.
fn effective_profile(global: &GlobalOpts, cfg: &Config, name: &str) -> Result<Profile, CliError> {
    let mut profile = match cfg.profiles.get(name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: name.to_owned(),
                available: cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", "),
            });
        }
        None => Profile::default(),
    };

    if let Some(cloud) = &global.cloud {
        profile.cloud = Some(cloud.clone());
        profile.base_url = None;
    }
    if let Some(base_url) = &global.base_url {
        profile.base_url = Some(base_url.clone());
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    profile.timeout = global
        .timeout
        .or(profile.timeout)
        .or(Some(cfg.defaults.timeout));
    Ok(profile)
}

/// Build a `ProviderConfig` from the config file, profile, and CLI overrides.
pub fn build_provider_config(global: &GlobalOpts) -> Result<ProviderConfig, CliError> {
    let cfg = load(global)?;
    let name = active_profile_name(global, &cfg);
    let profile = effective_profile(global, &cfg, &name)?;
    Ok(zia_config::profile_to_provider_config(&profile, &name)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["zia"];
        argv.extend_from_slice(args);
        argv.push("resources");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with(name: &str, profile: Profile) -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(name.into(), profile);
        cfg
    }

    #[test]
    fn flags_override_profile() {
        let cfg = config_with(
            "default",
            Profile {
                cloud: Some("zscaler".into()),
                base_url: Some("https://proxy.example.com/api/v1/".into()),
                timeout: Some(10),
                ..Profile::default()
            },
        );
        let g = global(&["--cloud", "zscalertwo", "-k", "--timeout", "5"]);
        let profile = effective_profile(&g, &cfg, "default").unwrap();
        assert_eq!(profile.cloud.as_deref(), Some("zscalertwo"));
        assert_eq!(profile.base_url, None);
        assert_eq!(profile.insecure, Some(true));
        assert_eq!(profile.timeout, Some(5));
    }

    #[test]
    fn explicit_missing_profile_is_an_error() {
        let cfg = config_with("prod", Profile::default());
        let g = global(&["--profile", "lab"]);
        let err = effective_profile(&g, &cfg, "lab").unwrap_err();
        assert!(matches!(err, CliError::ProfileNotFound { ref available, .. } if available == "prod"));
    }

    #[test]
    fn implicit_missing_profile_uses_defaults() {
        let cfg = Config::default();
        let g = global(&[]);
        let profile = effective_profile(&g, &cfg, "default").unwrap();
        assert_eq!(profile.timeout, Some(cfg.defaults.timeout));
        assert!(profile.cloud.is_none());
    }
}
