use secrecy::{ExposeSecret, SecretString};
use strum::{Display, EnumIter, EnumString};
use url::Url;

use crate::error::Error;

/// The ZIA cloud a tenant lives on.
///
/// Each cloud exposes its API at `https://zsapi.<cloud>.net/api/v1/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ZiaCloud {
    Zscaler,
    ZscalerOne,
    ZscalerTwo,
    ZscalerThree,
    ZsCloud,
    ZscalerBeta,
    ZscalerGov,
    ZscalerTen,
    ZsPreview,
}

impl ZiaCloud {
    /// API base URL for this cloud, always ending in `/api/v1/`.
    pub fn base_url(self) -> Url {
        let raw = format!("https://zsapi.{self}.net/api/v1/");
        Url::parse(&raw).expect("cloud names form valid hostnames")
    }
}

/// Credentials for a ZIA session login.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
    pub api_key: SecretString,
}

/// Minimum API key length: the obfuscation indexes up to position 11.
const MIN_API_KEY_LEN: usize = 12;

/// Obfuscate the API key with a millisecond timestamp.
///
/// ZIA never receives the raw key. The last six digits `n` of the
/// timestamp select characters from the key, then the digits of
/// `n >> 1` (left-padded to six) select characters offset by two.
pub fn obfuscate_api_key(api_key: &SecretString, timestamp_ms: i64) -> Result<String, Error> {
    let key = api_key.expose_secret().as_bytes();
    if key.len() < MIN_API_KEY_LEN || !key.is_ascii() {
        return Err(Error::InvalidApiKey {
            reason: format!("expected at least {MIN_API_KEY_LEN} ASCII characters"),
        });
    }

    let ts = timestamp_ms.unsigned_abs().to_string();
    let high = &ts[ts.len().saturating_sub(6)..];
    let high_num: u32 = high.parse().map_err(|_| Error::InvalidApiKey {
        reason: format!("timestamp {timestamp_ms} is not numeric"),
    })?;
    let low = format!("{:06}", high_num >> 1);

    let mut out = String::with_capacity(12);
    for digit in high.chars().filter_map(|c| c.to_digit(10)) {
        out.push(char::from(key[digit as usize]));
    }
    for digit in low.chars().filter_map(|c| c.to_digit(10)) {
        out.push(char::from(key[digit as usize + 2]));
    }
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn key(raw: &str) -> SecretString {
        SecretString::from(raw.to_owned())
    }

    #[test]
    fn obfuscates_known_vector() {
        // n = 123456, r = 061728
        let out = obfuscate_api_key(&key("abcdefghijkl"), 1_700_000_123_456).unwrap();
        assert_eq!(out, "bcdefgcidjek");
    }

    #[test]
    fn obfuscation_pads_low_digits() {
        // n = 000010, r = 000005
        let out = obfuscate_api_key(&key("0123456789AB"), 1_700_000_000_010).unwrap();
        assert_eq!(out, "000010222227");
    }

    #[test]
    fn short_key_is_rejected() {
        let err = obfuscate_api_key(&key("short"), 1_700_000_123_456).unwrap_err();
        assert!(matches!(err, Error::InvalidApiKey { .. }));
    }

    #[test]
    fn cloud_parses_case_insensitively() {
        assert_eq!(ZiaCloud::from_str("ZscalerTwo").unwrap(), ZiaCloud::ZscalerTwo);
        assert_eq!(ZiaCloud::from_str("zscloud").unwrap(), ZiaCloud::ZsCloud);
        assert!(ZiaCloud::from_str("zscalerfoo").is_err());
    }

    #[test]
    fn cloud_base_url() {
        assert_eq!(
            ZiaCloud::ZscalerBeta.base_url().as_str(),
            "https://zsapi.zscalerbeta.net/api/v1/"
        );
    }
}
