// Administrator endpoints

use tracing::debug;

use crate::client::{ZiaClient, find_by_name};
use crate::error::Error;
use crate::models::{AdminRole, AdminUser};

impl ZiaClient {
    /// List admin roles.
    ///
    /// `GET /adminRoles/lite`
    pub async fn list_admin_roles(&self) -> Result<Vec<AdminRole>, Error> {
        self.get("adminRoles/lite").await
    }

    /// Find an admin role by name.
    pub async fn get_admin_role_by_name(&self, name: &str) -> Result<AdminRole, Error> {
        let roles = self.list_admin_roles().await?;
        find_by_name(roles, name, |r| r.name.as_str(), "admin role")
    }

    /// List administrators, auditors included.
    ///
    /// `GET /adminUsers?includeAuditorUsers=true&includeAdminUsers=true`
    pub async fn list_admin_users(&self) -> Result<Vec<AdminUser>, Error> {
        let params = [
            ("includeAuditorUsers", "true".to_owned()),
            ("includeAdminUsers", "true".to_owned()),
        ];
        self.get_all_pages("adminUsers", &params).await
    }

    /// Fetch one administrator.
    ///
    /// The API has no single-item GET for admins, so this filters the list.
    pub async fn get_admin_user(&self, id: i64) -> Result<AdminUser, Error> {
        self.list_admin_users()
            .await?
            .into_iter()
            .find(|u| u.id == id)
            .ok_or_else(|| Error::NotFound {
                resource: "admin user",
                identifier: id.to_string(),
            })
    }

    /// Find an administrator by login name.
    pub async fn get_admin_user_by_login_name(&self, login: &str) -> Result<AdminUser, Error> {
        let users = self.list_admin_users().await?;
        find_by_name(users, login, |u| u.login_name.as_str(), "admin user")
    }

    /// `POST /adminUsers`
    pub async fn create_admin_user(&self, user: &AdminUser) -> Result<AdminUser, Error> {
        debug!(login = %user.login_name, "creating admin user");
        self.post("adminUsers", user).await
    }

    /// `PUT /adminUsers/{id}`
    pub async fn update_admin_user(&self, id: i64, user: &AdminUser) -> Result<AdminUser, Error> {
        debug!(id, "updating admin user");
        self.put(&format!("adminUsers/{id}"), user).await
    }

    /// `DELETE /adminUsers/{id}`
    pub async fn delete_admin_user(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting admin user");
        self.delete(&format!("adminUsers/{id}")).await
    }
}
