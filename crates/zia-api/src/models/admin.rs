// ── Administrator models ──

use serde::{Deserialize, Serialize};

use super::{IdNameExtensions, is_zero};

/// Admin role, as listed by `GET /adminRoles/lite`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRole {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub rank: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub policy_access: Option<String>,
    #[serde(default)]
    pub dashboard_access: Option<String>,
    #[serde(default)]
    pub report_access: Option<String>,
    #[serde(default)]
    pub analysis_access: Option<String>,
    #[serde(default)]
    pub username_access: Option<String>,
    #[serde(default)]
    pub admin_acct_access: Option<String>,
    #[serde(default)]
    pub is_auditor: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub is_non_editable: bool,
    #[serde(default)]
    pub logs_limit: Option<String>,
    #[serde(default)]
    pub role_type: Option<String>,
}

/// Administrator account (`/adminUsers`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default)]
    pub login_name: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<IdNameExtensions>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comments: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub admin_scope_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub admin_scope_scope_entities: Vec<IdNameExtensions>,
    #[serde(
        default,
        rename = "adminScopescopeGroupMemberEntities",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub admin_scope_group_member_entities: Vec<IdNameExtensions>,
    #[serde(default)]
    pub is_non_editable: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub is_auditor: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub is_password_login_allowed: bool,
    #[serde(default)]
    pub is_security_report_comm_enabled: bool,
    #[serde(default)]
    pub is_service_update_comm_enabled: bool,
    #[serde(default)]
    pub is_product_update_comm_enabled: bool,
    #[serde(default)]
    pub is_password_expired: bool,
    #[serde(default)]
    pub is_exec_mobile_app_enabled: bool,
}
