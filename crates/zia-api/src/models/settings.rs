// ── Tenant-wide settings singletons ──

use serde::{Deserialize, Serialize};

/// Allow-listed URLs (`/security`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityWhitelist {
    #[serde(default)]
    pub whitelist_urls: Vec<String>,
}

/// Deny-listed URLs (`/security/advanced`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityBlacklist {
    #[serde(default)]
    pub blacklist_urls: Vec<String>,
}

/// URLs exempted from authentication (`/authSettings/exemptedUrls`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExemptedUrls {
    #[serde(default)]
    pub urls: Vec<String>,
}
