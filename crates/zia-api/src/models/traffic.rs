// ── Traffic forwarding models ──

use serde::{Deserialize, Serialize};

use super::{IdNameExtensions, is_zero};

/// VPN credential (`/vpnCredentials`) used by IPSec tunnels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpnCredential {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub credential_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fqdn: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_shared_key: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comments: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_by: Option<IdNameExtensions>,
}

/// Static IP (`/staticIP`) used by GRE tunnels and IP-based VPN credentials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticIp {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub geo_override: bool,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub routable_ip: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub last_modification_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_by: Option<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<IdNameExtensions>,
}
