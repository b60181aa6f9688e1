// zia_admin_roles, zia_admin_users

use async_trait::async_trait;
use serde_json::json;
use zia_api::models::{AdminRole, AdminUser};

use super::{
    computed_bool, computed_int, computed_string, computed_strings, lookup_schema, set_identity,
};
use crate::convert::{flatten_id_name_extensions, flatten_id_name_extensions_single};
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{DataSource, Lookup, not_found};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema, computed_id_name_extensions};

// ── Admin roles ──────────────────────────────────────────────────────

pub struct AdminRolesDataSource;

fn flatten_role(d: &mut ResourceData, role: &AdminRole) -> Result<(), ProviderError> {
    set_identity(d, role.id)?;
    d.set("name", role.name.as_str())?;
    d.set("rank", role.rank)?;
    d.set("policy_access", role.policy_access.clone())?;
    d.set("dashboard_access", role.dashboard_access.clone())?;
    d.set("report_access", role.report_access.clone())?;
    d.set("analysis_access", role.analysis_access.clone())?;
    d.set("username_access", role.username_access.clone())?;
    d.set("admin_acct_access", role.admin_acct_access.clone())?;
    d.set("is_auditor", role.is_auditor)?;
    d.set("permissions", json!(role.permissions))?;
    d.set("is_non_editable", role.is_non_editable)?;
    d.set("logs_limit", role.logs_limit.clone())?;
    d.set("role_type", role.role_type.clone())?;
    Ok(())
}

#[async_trait]
impl DataSource for AdminRolesDataSource {
    fn type_name(&self) -> &'static str {
        "zia_admin_roles"
    }

    fn schema(&self) -> Schema {
        lookup_schema("name")
            .attr("rank", computed_int())
            .attr("policy_access", computed_string())
            .attr("dashboard_access", computed_string())
            .attr("report_access", computed_string())
            .attr("analysis_access", computed_string())
            .attr("username_access", computed_string())
            .attr("admin_acct_access", computed_string())
            .attr("is_auditor", computed_bool())
            .attr("permissions", computed_strings())
            .attr("is_non_editable", computed_bool())
            .attr("logs_limit", computed_string())
            .attr("role_type", computed_string())
    }

    // Roles have no single-entity endpoint; both lookups filter the list.
    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let lookup = Lookup::from_data(d, "name")?;
        let role = match &lookup {
            Lookup::Id(id) => meta
                .client
                .list_admin_roles()
                .await?
                .into_iter()
                .find(|r| r.id == *id),
            Lookup::Name(name) => Some(meta.client.get_admin_role_by_name(name).await?),
        };
        let Some(role) = role else {
            return not_found("admin role", &lookup);
        };
        flatten_role(d, &role)
    }
}

// ── Admin users ──────────────────────────────────────────────────────

pub struct AdminUsersDataSource;

fn flatten_admin(d: &mut ResourceData, admin: &AdminUser) -> Result<(), ProviderError> {
    set_identity(d, admin.id)?;
    d.set("login_name", admin.login_name.as_str())?;
    d.set("user_name", admin.user_name.as_str())?;
    d.set("email", admin.email.as_str())?;
    d.set("comments", admin.comments.as_str())?;
    d.set("role", flatten_id_name_extensions_single(admin.role.as_ref()))?;
    d.set(
        "admin_scope",
        json!([{
            "type": admin.admin_scope_type,
            "scope_entities": flatten_id_name_extensions(&admin.admin_scope_scope_entities),
            "scope_group_member_entities":
                flatten_id_name_extensions(&admin.admin_scope_group_member_entities),
        }]),
    )?;
    d.set("is_non_editable", admin.is_non_editable)?;
    d.set("disabled", admin.disabled)?;
    d.set("is_auditor", admin.is_auditor)?;
    d.set("is_password_login_allowed", admin.is_password_login_allowed)?;
    d.set("is_security_report_comm_enabled", admin.is_security_report_comm_enabled)?;
    d.set("is_service_update_comm_enabled", admin.is_service_update_comm_enabled)?;
    d.set("is_product_update_comm_enabled", admin.is_product_update_comm_enabled)?;
    d.set("is_password_expired", admin.is_password_expired)?;
    d.set("is_exec_mobile_app_enabled", admin.is_exec_mobile_app_enabled)?;
    Ok(())
}

fn admin_scope_schema() -> Schema {
    Schema::new()
        .attr("type", computed_string())
        .attr("scope_entities", computed_id_name_extensions("Scope entities"))
        .attr(
            "scope_group_member_entities",
            computed_id_name_extensions("Scope group members"),
        )
}

#[async_trait]
impl DataSource for AdminUsersDataSource {
    fn type_name(&self) -> &'static str {
        "zia_admin_users"
    }

    fn schema(&self) -> Schema {
        lookup_schema("login_name")
            .attr("user_name", computed_string())
            .attr("email", computed_string())
            .attr("comments", computed_string())
            .attr("role", computed_id_name_extensions("Role assigned to the admin"))
            .attr(
                "admin_scope",
                Attribute::list_of_block(admin_scope_schema()).computed(),
            )
            .attr("is_non_editable", computed_bool())
            .attr("disabled", computed_bool())
            .attr("is_auditor", computed_bool())
            .attr("is_password_login_allowed", computed_bool())
            .attr("is_security_report_comm_enabled", computed_bool())
            .attr("is_service_update_comm_enabled", computed_bool())
            .attr("is_product_update_comm_enabled", computed_bool())
            .attr("is_password_expired", computed_bool())
            .attr("is_exec_mobile_app_enabled", computed_bool())
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let admin = match Lookup::from_data(d, "login_name")? {
            Lookup::Id(id) => meta.client.get_admin_user(id).await?,
            Lookup::Name(login) => meta.client.get_admin_user_by_login_name(&login).await?,
        };
        flatten_admin(d, &admin)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::Map;
    use zia_api::models::IdNameExtensions;

    use super::*;

    #[test]
    fn admin_scope_is_a_single_block() {
        let admin = AdminUser {
            id: 14,
            login_name: "ops@example.com".into(),
            role: Some(IdNameExtensions {
                id: 1,
                name: "Super Admin".into(),
                ..IdNameExtensions::default()
            }),
            admin_scope_type: "ORGANIZATION".into(),
            ..AdminUser::default()
        };
        let mut d = ResourceData::from_state(AdminUsersDataSource.schema(), "", Map::new());
        flatten_admin(&mut d, &admin).unwrap();
        assert_eq!(d.id(), Some("14"));
        assert_eq!(d.get_string("role.0.name"), "Super Admin");
        assert_eq!(d.get_string("admin_scope.0.type"), "ORGANIZATION");
        assert_eq!(d.get("admin_scope.0.scope_entities"), Some(&json!([])));
    }
}
