// ── URL category and URL filtering models ──

use serde::{Deserialize, Serialize};

use super::{IdNameExtensions, is_zero};

/// Administrative scope attached to a custom URL category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlCategoryScope {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scope_group_member_entities: Vec<IdNameExtensions>,
    // The API capitalises this one field.
    #[serde(default, rename = "Type")]
    pub scope_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scope_entities: Vec<IdNameExtensions>,
}

/// Computed URL/keyword counters of a category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlKeywordCounts {
    #[serde(default)]
    pub total_url_count: i32,
    #[serde(default)]
    pub retain_parent_url_count: i32,
    #[serde(default)]
    pub total_keyword_count: i32,
    #[serde(default)]
    pub retain_parent_keyword_count: i32,
}

/// URL category (`/urlCategories`). Custom categories carry string IDs
/// such as `CUSTOM_01`, assigned by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlCategory {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub configured_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords_retaining_parent_category: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub db_categorized_urls: Vec<String>,
    #[serde(default)]
    pub custom_category: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<UrlCategoryScope>,
    #[serde(default)]
    pub editable: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub category_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_keyword_counts: Option<UrlKeywordCounts>,
    #[serde(default)]
    pub val: i32,
    #[serde(default)]
    pub custom_urls_count: i32,
    #[serde(default)]
    pub urls_retaining_parent_category_count: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub super_category: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_ranges: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_ranges_retaining_parent_category: Vec<String>,
    #[serde(default)]
    pub custom_ip_ranges_count: i32,
    #[serde(default)]
    pub ip_range_retaining_parent_category_count: i32,
}

/// URL filtering rule (`/urlFilteringRules`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlFilteringRule {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub rank: i32,
    #[serde(default)]
    pub state: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub action: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub protocols: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub url_categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub request_methods: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_agent_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub device_trust_levels: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub end_user_notification_url: String,
    #[serde(default)]
    pub block_override: bool,
    #[serde(default)]
    pub time_quota: i32,
    #[serde(default)]
    pub size_quota: i32,
    #[serde(default)]
    pub enforce_time_validity: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub validity_start_time: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub validity_end_time: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub validity_time_zone_id: String,
    #[serde(default)]
    pub ciparule: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub last_modified_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub override_users: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub override_groups: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub location_groups: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub departments: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub time_windows: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<IdNameExtensions>,
}
