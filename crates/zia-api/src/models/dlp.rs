// ── Data loss prevention models ──

use serde::{Deserialize, Serialize};

use super::{IdNameExtensions, is_zero};

/// Web DLP policy rule (`/webDlpRules`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebDlpRule {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub rank: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub action: String,
    #[serde(default)]
    pub state: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub severity: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub protocols: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cloud_applications: Vec<String>,
    #[serde(default)]
    pub min_size: i32,
    #[serde(default)]
    pub match_only: bool,
    #[serde(default)]
    pub without_content_inspection: bool,
    #[serde(default)]
    pub ocr_enabled: bool,
    #[serde(default)]
    pub zscaler_incident_receiver: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub external_auditor_email: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub last_modified_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auditor: Option<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_template: Option<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icap_server: Option<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dlp_engines: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub url_categories: Vec<IdNameExtensions>,
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
    pub excluded_groups: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_departments: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_users: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub time_windows: Vec<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<IdNameExtensions>,
}

/// DLP notification template (`/dlpNotificationTemplates`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DlpNotificationTemplate {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subject: String,
    #[serde(default)]
    pub attach_content: bool,
    #[serde(default)]
    pub tls_enabled: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub plain_text_message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub html_message: String,
}
