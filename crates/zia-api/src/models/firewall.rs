// ── Cloud firewall models ──

use serde::{Deserialize, Serialize};

use super::{IdNameExtensions, is_zero};

/// Cloud firewall filtering rule (`/firewallFilteringRules`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallFilteringRule {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub rank: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_control: Option<String>,
    #[serde(default)]
    pub enable_full_logging: bool,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub state: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub last_modified_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub src_ips: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dest_addresses: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dest_ip_categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dest_countries: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nw_applications: Vec<String>,
    #[serde(default)]
    pub default_rule: bool,
    #[serde(default)]
    pub predefined: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub location_groups: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub departments: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub time_windows: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub src_ip_groups: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dest_ip_groups: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nw_services: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nw_service_groups: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nw_application_groups: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub app_services: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub app_service_groups: Vec<IdNameExtensions>,
}

/// Inclusive port range; `end` is 0 for a single port.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkPorts {
    #[serde(default)]
    pub start: i32,
    #[serde(default)]
    pub end: i32,
}

/// Network service (`/networkServices`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkService {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub src_tcp_ports: Vec<NetworkPorts>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dest_tcp_ports: Vec<NetworkPorts>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub src_udp_ports: Vec<NetworkPorts>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dest_udp_ports: Vec<NetworkPorts>,
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub service_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, rename = "isNameL10nTag")]
    pub is_name_l10n_tag: bool,
}

/// Source IP group (`/ipSourceGroups`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpSourceGroup {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ip_addresses: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Destination IP group (`/ipDestinationGroups`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpDestinationGroup {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub group_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<String>,
}

/// Time window used by rule schedules (`/timeWindows`, read-only).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start_time: i32,
    #[serde(default)]
    pub end_time: i32,
    #[serde(default)]
    pub day_of_week: Vec<String>,
}

/// Rule label (`/ruleLabels`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleLabel {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub last_modified_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<IdNameExtensions>,
    #[serde(default)]
    pub referenced_rule_count: i32,
}
