// ── Location models ──

use serde::{Deserialize, Serialize};

use super::traffic::VpnCredential;
use super::{IdNameExtensions, is_zero};

/// Location (`/locations`): a site whose traffic is forwarded to ZIA.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub parent_id: i64,
    #[serde(default)]
    pub up_bandwidth: i64,
    #[serde(default)]
    pub dn_bandwidth: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tz: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_addresses: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vpn_credentials: Vec<VpnCredential>,
    #[serde(default)]
    pub auth_required: bool,
    #[serde(default)]
    pub ssl_scan_enabled: bool,
    #[serde(default)]
    pub zapp_ssl_scan_enabled: bool,
    #[serde(default)]
    pub xff_forward_enabled: bool,
    #[serde(default)]
    pub surrogate_ip: bool,
    #[serde(default)]
    pub idle_time_in_minutes: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_time_unit: String,
    #[serde(default)]
    pub surrogate_ip_enforced_for_known_browsers: bool,
    #[serde(default)]
    pub surrogate_refresh_time_in_minutes: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub surrogate_refresh_time_unit: String,
    #[serde(default)]
    pub ofw_enabled: bool,
    #[serde(default)]
    pub ips_control: bool,
    #[serde(default)]
    pub aup_enabled: bool,
    #[serde(default)]
    pub caution_enabled: bool,
    #[serde(default)]
    pub aup_block_internet_until_accepted: bool,
    #[serde(default)]
    pub aup_force_ssl_inspection: bool,
    #[serde(default)]
    pub aup_timeout_in_days: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub profile: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Location group (`/locations/groups`, read-only).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationGroup {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub group_type: String,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub locations: Vec<IdNameExtensions>,
    #[serde(default)]
    pub last_mod_time: i64,
}
