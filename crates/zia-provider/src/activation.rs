// ── Configuration activation ──
//
// ZIA keeps policy edits pending until they are activated. When enabled,
// every successful create/update/delete waits a short, fixed delay for the
// change to settle and then activates it. There is no retry.

use std::time::Duration;

use tracing::{debug, info};

use crate::error::ProviderError;
use crate::provider::Meta;

/// Environment variable that turns activation on (`true`, any case).
pub const ACTIVATION_ENV: &str = "ZIA_ACTIVATION";

/// Delay before the activation call.
pub const DEFAULT_ACTIVATION_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationSettings {
    pub enabled: bool,
    pub delay: Duration,
}

impl Default for ActivationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            delay: DEFAULT_ACTIVATION_DELAY,
        }
    }
}

impl ActivationSettings {
    /// Read `ZIA_ACTIVATION` from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(ACTIVATION_ENV).ok().as_deref())
    }

    /// Interpret a raw `ZIA_ACTIVATION` value.
    pub fn from_env_value(raw: Option<&str>) -> Self {
        let enabled = raw.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Activate pending changes if activation is enabled.
///
/// Called after a successful mutation only; errors surface as errors of
/// the mutating operation.
pub async fn trigger_activation(meta: &Meta) -> Result<(), ProviderError> {
    if !meta.activation.enabled {
        debug!("activation disabled, leaving changes pending");
        return Ok(());
    }

    if !meta.activation.delay.is_zero() {
        debug!(delay = ?meta.activation.delay, "waiting before activation");
        tokio::time::sleep(meta.activation.delay).await;
    }

    let status = meta.client.activate().await?;
    info!(status = %status.status, "configuration activated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_value_parsing() {
        assert!(!ActivationSettings::from_env_value(None).enabled);
        assert!(ActivationSettings::from_env_value(Some("true")).enabled);
        assert!(ActivationSettings::from_env_value(Some("TRUE")).enabled);
        assert!(!ActivationSettings::from_env_value(Some("1")).enabled);
        assert!(!ActivationSettings::from_env_value(Some("false")).enabled);
    }

    #[test]
    fn default_delay_is_two_seconds() {
        let settings = ActivationSettings::default();
        assert_eq!(settings.delay, Duration::from_secs(2));
        assert_eq!(
            settings.with_delay(Duration::ZERO).delay,
            Duration::ZERO
        );
    }
}
