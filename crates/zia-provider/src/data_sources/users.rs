// zia_user_management, zia_group_management, zia_department_management

use async_trait::async_trait;
use serde_json::{Value, json};
use zia_api::models::{Department, Group, User};

use super::{computed_bool, computed_int, computed_string, lookup_schema, set_identity};
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{DataSource, Lookup};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema};

fn group_block(group: &Group) -> Value {
    json!({
        "id": group.id,
        "name": group.name,
        "idp_id": group.idp_id,
        "comments": group.comments,
    })
}

fn department_block(department: &Department) -> Value {
    json!({
        "id": department.id,
        "name": department.name,
        "idp_id": department.idp_id,
        "comments": department.comments,
        "deleted": department.deleted,
    })
}

fn group_schema() -> Schema {
    Schema::new()
        .attr("id", computed_int())
        .attr("name", computed_string())
        .attr("idp_id", computed_int())
        .attr("comments", computed_string())
}

fn department_schema() -> Schema {
    group_schema().attr("deleted", computed_bool())
}

// ── Users ────────────────────────────────────────────────────────────

pub struct UserManagementDataSource;

fn flatten_user(d: &mut ResourceData, user: &User) -> Result<(), ProviderError> {
    set_identity(d, user.id)?;
    d.set("name", user.name.as_str())?;
    d.set("email", user.email.as_str())?;
    d.set(
        "groups",
        Value::Array(user.groups.iter().map(group_block).collect()),
    )?;
    d.set(
        "department",
        Value::Array(user.department.iter().map(department_block).collect()),
    )?;
    d.set("comments", user.comments.as_str())?;
    d.set("temp_auth_email", user.temp_auth_email.as_str())?;
    d.set("admin_user", user.admin_user)?;
    d.set("type", user.user_type.as_str())?;
    Ok(())
}

#[async_trait]
impl DataSource for UserManagementDataSource {
    fn type_name(&self) -> &'static str {
        "zia_user_management"
    }

    fn schema(&self) -> Schema {
        lookup_schema("name")
            .attr("email", computed_string())
            .attr("groups", Attribute::list_of_block(group_schema()).computed())
            .attr(
                "department",
                Attribute::list_of_block(department_schema()).computed(),
            )
            .attr("comments", computed_string())
            .attr("temp_auth_email", computed_string())
            .attr("admin_user", computed_bool())
            .attr("type", computed_string())
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let user = match Lookup::from_data(d, "name")? {
            Lookup::Id(id) => meta.client.get_user(id).await?,
            Lookup::Name(name) => meta.client.get_user_by_name(&name).await?,
        };
        flatten_user(d, &user)
    }
}

// ── Groups ───────────────────────────────────────────────────────────

pub struct GroupManagementDataSource;

#[async_trait]
impl DataSource for GroupManagementDataSource {
    fn type_name(&self) -> &'static str {
        "zia_group_management"
    }

    fn schema(&self) -> Schema {
        lookup_schema("name")
            .attr("idp_id", computed_int())
            .attr("comments", computed_string())
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let group = match Lookup::from_data(d, "name")? {
            Lookup::Id(id) => meta.client.get_group(id).await?,
            Lookup::Name(name) => meta.client.get_group_by_name(&name).await?,
        };
        set_identity(d, group.id)?;
        d.set("name", group.name)?;
        d.set("idp_id", group.idp_id)?;
        d.set("comments", group.comments)
    }
}

// ── Departments ──────────────────────────────────────────────────────

pub struct DepartmentManagementDataSource;

#[async_trait]
impl DataSource for DepartmentManagementDataSource {
    fn type_name(&self) -> &'static str {
        "zia_department_management"
    }

    fn schema(&self) -> Schema {
        lookup_schema("name")
            .attr("idp_id", computed_int())
            .attr("comments", computed_string())
            .attr("deleted", computed_bool())
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let department = match Lookup::from_data(d, "name")? {
            Lookup::Id(id) => meta.client.get_department(id).await?,
            Lookup::Name(name) => meta.client.get_department_by_name(&name).await?,
        };
        set_identity(d, department.id)?;
        d.set("name", department.name)?;
        d.set("idp_id", department.idp_id)?;
        d.set("comments", department.comments)?;
        d.set("deleted", department.deleted)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::Map;

    use super::*;

    #[test]
    fn user_without_department_flattens_to_empty_list() {
        let user = User {
            id: 77,
            name: "Jo Doe".into(),
            email: "jo@example.com".into(),
            groups: vec![Group {
                id: 3,
                name: "Engineering".into(),
                ..Group::default()
            }],
            ..User::default()
        };
        let mut d = ResourceData::from_state(UserManagementDataSource.schema(), "", Map::new());
        flatten_user(&mut d, &user).unwrap();
        assert_eq!(d.id(), Some("77"));
        assert_eq!(d.get_string("groups.0.name"), "Engineering");
        assert_eq!(d.get("department"), Some(&json!([])));
    }
}
