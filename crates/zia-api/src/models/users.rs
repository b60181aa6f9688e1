// ── User management models (read-only from the provider's view) ──

use serde::{Deserialize, Serialize};

/// Department (`/departments`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub idp_id: i64,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub deleted: bool,
}

/// User group (`/groups`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub idp_id: i64,
    #[serde(default)]
    pub comments: String,
}

/// User (`/users`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub department: Option<Department>,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub temp_auth_email: String,
    #[serde(default)]
    pub admin_user: bool,
    #[serde(default, rename = "type")]
    pub user_type: String,
}
