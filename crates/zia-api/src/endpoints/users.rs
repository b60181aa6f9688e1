// User management lookups (read-only)

use crate::client::{ZiaClient, find_by_name};
use crate::error::Error;
use crate::models::{Department, Group, User};

impl ZiaClient {
    /// `GET /users` (paginated)
    pub async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.get_all_pages("users", &[]).await
    }

    /// `GET /users/{id}`
    pub async fn get_user(&self, id: i64) -> Result<User, Error> {
        self.get(&format!("users/{id}")).await
    }

    /// Find a user by display name using the `name` filter.
    pub async fn get_user_by_name(&self, name: &str) -> Result<User, Error> {
        let params = [("name", name.to_owned())];
        let users: Vec<User> = self.get_all_pages("users", &params).await?;
        find_by_name(users, name, |u| u.name.as_str(), "user")
    }

    /// `GET /groups` (paginated)
    pub async fn list_groups(&self) -> Result<Vec<Group>, Error> {
        self.get_all_pages("groups", &[]).await
    }

    /// `GET /groups/{id}`
    pub async fn get_group(&self, id: i64) -> Result<Group, Error> {
        self.get(&format!("groups/{id}")).await
    }

    pub async fn get_group_by_name(&self, name: &str) -> Result<Group, Error> {
        let params = [("search", name.to_owned())];
        let groups: Vec<Group> = self.get_all_pages("groups", &params).await?;
        find_by_name(groups, name, |g| g.name.as_str(), "group")
    }

    /// `GET /departments` (paginated)
    pub async fn list_departments(&self) -> Result<Vec<Department>, Error> {
        self.get_all_pages("departments", &[]).await
    }

    /// `GET /departments/{id}`
    pub async fn get_department(&self, id: i64) -> Result<Department, Error> {
        self.get(&format!("departments/{id}")).await
    }

    pub async fn get_department_by_name(&self, name: &str) -> Result<Department, Error> {
        let params = [("search", name.to_owned())];
        let departments: Vec<Department> = self.get_all_pages("departments", &params).await?;
        find_by_name(departments, name, |d| d.name.as_str(), "department")
    }
}
