// zia_admin_users

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::info;
use zia_api::models::AdminUser;

use crate::activation::trigger_activation;
use crate::convert::{
    expand_id_name_extensions_single, expand_id_set_value, flatten_id_extensions_list_ids,
    flatten_id_extensions_single,
};
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{Resource, read_created, read_or_remove};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema, Validation, id_block, id_set_block};

const TYPE_NAME: &str = "zia_admin_users";

const SCOPE_TYPES: &[&str] = &["ORGANIZATION", "DEPARTMENT", "LOCATION", "LOCATION_GROUP"];

/// Administrator accounts of the ZIA admin portal.
pub struct AdminUsersResource;

fn expand(d: &ResourceData, include_password: bool) -> AdminUser {
    let scope = d.get("admin_scope.0");
    AdminUser {
        login_name: d.get_string("login_name"),
        user_name: d.get_string("user_name"),
        email: d.get_string("email"),
        comments: d.get_string("comments"),
        role: expand_id_name_extensions_single(d, "role"),
        admin_scope_type: d.get_string("admin_scope.0.type"),
        admin_scope_scope_entities: scope
            .and_then(|s| s.get("scope_entities"))
            .map(expand_id_set_value)
            .unwrap_or_default(),
        admin_scope_group_member_entities: scope
            .and_then(|s| s.get("scope_group_member_entities"))
            .map(expand_id_set_value)
            .unwrap_or_default(),
        is_non_editable: d.get_bool("is_non_editable"),
        disabled: d.get_bool("disabled"),
        is_auditor: d.get_bool("is_auditor"),
        password: include_password
            .then(|| d.get_string("password"))
            .filter(|p| !p.is_empty()),
        is_password_login_allowed: d.get_bool("is_password_login_allowed"),
        is_security_report_comm_enabled: d.get_bool("is_security_report_comm_enabled"),
        is_service_update_comm_enabled: d.get_bool("is_service_update_comm_enabled"),
        is_product_update_comm_enabled: d.get_bool("is_product_update_comm_enabled"),
        is_password_expired: d.get_bool("is_password_expired"),
        is_exec_mobile_app_enabled: d.get_bool("is_exec_mobile_app_enabled"),
        ..AdminUser::default()
    }
}

fn flatten_scope(user: &AdminUser) -> Value {
    if user.admin_scope_type.is_empty()
        && user.admin_scope_scope_entities.is_empty()
        && user.admin_scope_group_member_entities.is_empty()
    {
        return Value::Null;
    }
    let mut block = json!({ "type": user.admin_scope_type });
    let entities = flatten_id_extensions_list_ids(&user.admin_scope_scope_entities);
    if !entities.is_null() {
        block["scope_entities"] = entities;
    }
    let members = flatten_id_extensions_list_ids(&user.admin_scope_group_member_entities);
    if !members.is_null() {
        block["scope_group_member_entities"] = members;
    }
    json!([block])
}

// The password is write-only: the API never returns it, so state keeps
// whatever the configuration supplied.
fn flatten(d: &mut ResourceData, user: &AdminUser) -> Result<(), ProviderError> {
    d.set("admin_id", user.id)?;
    d.set("login_name", user.login_name.as_str())?;
    d.set("user_name", user.user_name.as_str())?;
    d.set("email", user.email.as_str())?;
    d.set("comments", user.comments.as_str())?;
    d.set("role", flatten_id_extensions_single(user.role.as_ref()))?;
    d.set("admin_scope", flatten_scope(user))?;
    d.set("is_non_editable", user.is_non_editable)?;
    d.set("disabled", user.disabled)?;
    d.set("is_auditor", user.is_auditor)?;
    d.set("is_password_login_allowed", user.is_password_login_allowed)?;
    d.set("is_security_report_comm_enabled", user.is_security_report_comm_enabled)?;
    d.set("is_service_update_comm_enabled", user.is_service_update_comm_enabled)?;
    d.set("is_product_update_comm_enabled", user.is_product_update_comm_enabled)?;
    d.set("is_password_expired", user.is_password_expired)?;
    d.set("is_exec_mobile_app_enabled", user.is_exec_mobile_app_enabled)?;
    Ok(())
}

fn check_password_login(d: &ResourceData) -> Result<(), ProviderError> {
    if d.get_bool("is_password_login_allowed") && d.get_ok("password").is_none() {
        return Err(ProviderError::invalid(
            "password",
            "required when is_password_login_allowed is true",
        ));
    }
    Ok(())
}

#[async_trait]
impl Resource for AdminUsersResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        let scope = Schema::new()
            .attr(
                "type",
                Attribute::string()
                    .optional()
                    .default("ORGANIZATION")
                    .validate(Validation::one_of(SCOPE_TYPES)),
            )
            .attr("scope_entities", id_set_block("Entities the admin scope covers"))
            .attr(
                "scope_group_member_entities",
                id_set_block("Location groups the admin scope covers"),
            );

        Schema::new()
            .attr("admin_id", Attribute::int().computed())
            .attr(
                "login_name",
                Attribute::string()
                    .required()
                    .force_new()
                    .validate(Validation::StringLenBetween(1, 255))
                    .description("Admin login name, in email format"),
            )
            .attr(
                "user_name",
                Attribute::string()
                    .required()
                    .validate(Validation::StringLenBetween(1, 127)),
            )
            .attr("email", Attribute::string().required())
            .attr(
                "comments",
                Attribute::string()
                    .optional()
                    .validate(Validation::StringLenBetween(0, 10240)),
            )
            .attr("role", id_block("Role assigned to the admin").required())
            .attr(
                "admin_scope",
                Attribute::list_of_block(scope).optional().computed().max_items(1),
            )
            .attr("is_non_editable", Attribute::boolean().optional().computed())
            .attr("disabled", Attribute::boolean().optional().computed())
            .attr("is_auditor", Attribute::boolean().optional().computed())
            .attr(
                "password",
                Attribute::string()
                    .optional()
                    .sensitive()
                    .validate(Validation::StringLenBetween(8, 100)),
            )
            .attr("is_password_login_allowed", Attribute::boolean().optional().computed())
            .attr(
                "is_security_report_comm_enabled",
                Attribute::boolean().optional().computed(),
            )
            .attr(
                "is_service_update_comm_enabled",
                Attribute::boolean().optional().computed(),
            )
            .attr(
                "is_product_update_comm_enabled",
                Attribute::boolean().optional().computed(),
            )
            .attr("is_password_expired", Attribute::boolean().optional().computed())
            .attr("is_exec_mobile_app_enabled", Attribute::boolean().optional().computed())
    }

    async fn create(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        check_password_login(d)?;
        let user = meta.client.create_admin_user(&expand(d, true)).await?;
        info!(resource = TYPE_NAME, id = user.id, "created");
        d.set_id(user.id.to_string());
        trigger_activation(meta).await?;
        read_created(self, d, meta).await
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        let result = meta.client.get_admin_user(id).await;
        let Some(user) = read_or_remove(d, TYPE_NAME, result)? else {
            return Ok(());
        };
        d.set_id(user.id.to_string());
        flatten(d, &user)
    }

    async fn update(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        check_password_login(d)?;
        let id = d.numeric_id()?;
        // Re-sending an unchanged password trips the password-history check.
        let request = expand(d, d.has_change("password"));
        let result = meta.client.update_admin_user(id, &request).await;
        if read_or_remove(d, TYPE_NAME, result)?.is_none() {
            return Ok(());
        }
        info!(resource = TYPE_NAME, id, "updated");
        trigger_activation(meta).await?;
        self.read(d, meta).await
    }

    async fn delete(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        meta.client.delete_admin_user(id).await?;
        info!(resource = TYPE_NAME, id, "deleted");
        d.clear_id();
        trigger_activation(meta).await
    }

    async fn lookup_id(&self, name: &str, meta: &Meta) -> Result<String, ProviderError> {
        let user = meta.client.get_admin_user_by_login_name(name).await?;
        Ok(user.id.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn data(config: Value) -> ResourceData {
        ResourceData::from_config(AdminUsersResource.schema(), config.as_object().cloned().unwrap())
            .unwrap()
    }

    #[test]
    fn expand_reads_scope_block() {
        let d = data(json!({
            "login_name": "ops@example.com",
            "user_name": "Ops",
            "email": "ops@example.com",
            "role": [{"id": 11}],
            "admin_scope": [{"type": "DEPARTMENT", "scope_entities": [{"id": [4, 2]}]}]
        }));
        let user = expand(&d, false);
        assert_eq!(user.role.unwrap().id, 11);
        assert_eq!(user.admin_scope_type, "DEPARTMENT");
        assert_eq!(
            user.admin_scope_scope_entities.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![2, 4]
        );
        assert!(user.password.is_none());
    }

    #[test]
    fn password_required_for_password_login() {
        let d = data(json!({
            "login_name": "ops@example.com",
            "user_name": "Ops",
            "email": "ops@example.com",
            "role": [{"id": 11}],
            "is_password_login_allowed": true
        }));
        assert!(check_password_login(&d).is_err());
    }
}
