// URL category and URL filtering endpoints

use tracing::debug;

use crate::client::{ZiaClient, find_by_name};
use crate::error::Error;
use crate::models::{UrlCategory, UrlFilteringRule};

impl ZiaClient {
    // ── URL categories ───────────────────────────────────────────────

    /// List URL categories, predefined ones included unless `custom_only`.
    ///
    /// `GET /urlCategories[?customOnly=true]`
    pub async fn list_url_categories(&self, custom_only: bool) -> Result<Vec<UrlCategory>, Error> {
        if custom_only {
            let params = [("customOnly", "true".to_owned())];
            self.get_with_params("urlCategories", &params).await
        } else {
            self.get("urlCategories").await
        }
    }

    /// `GET /urlCategories/{id}`; IDs are strings such as `CUSTOM_01`.
    pub async fn get_url_category(&self, id: &str) -> Result<UrlCategory, Error> {
        self.get(&format!("urlCategories/{id}")).await
    }

    /// Resolve a category by configured name, falling back to its ID.
    ///
    /// Predefined categories have no configured name, so `"NEWS_AND_MEDIA"`
    /// style identifiers resolve through the ID.
    pub async fn get_url_category_by_name(&self, name: &str) -> Result<UrlCategory, Error> {
        let categories = self.list_url_categories(false).await?;
        let (named, rest): (Vec<_>, Vec<_>) = categories
            .into_iter()
            .partition(|c| c.configured_name.eq_ignore_ascii_case(name));
        if let Some(found) = named.into_iter().next() {
            return Ok(found);
        }
        find_by_name(rest, name, |c| c.id.as_str(), "url category")
    }

    /// `POST /urlCategories`
    pub async fn create_url_category(&self, category: &UrlCategory) -> Result<UrlCategory, Error> {
        debug!(name = %category.configured_name, "creating url category");
        self.post("urlCategories", category).await
    }

    /// `PUT /urlCategories/{id}`
    pub async fn update_url_category(
        &self,
        id: &str,
        category: &UrlCategory,
    ) -> Result<UrlCategory, Error> {
        debug!(id, "updating url category");
        self.put(&format!("urlCategories/{id}"), category).await
    }

    /// `DELETE /urlCategories/{id}`
    pub async fn delete_url_category(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting url category");
        self.delete(&format!("urlCategories/{id}")).await
    }

    // ── URL filtering rules ──────────────────────────────────────────

    /// `GET /urlFilteringRules`
    pub async fn list_url_filtering_rules(&self) -> Result<Vec<UrlFilteringRule>, Error> {
        self.get("urlFilteringRules").await
    }

    /// `GET /urlFilteringRules/{id}`
    pub async fn get_url_filtering_rule(&self, id: i64) -> Result<UrlFilteringRule, Error> {
        self.get(&format!("urlFilteringRules/{id}")).await
    }

    pub async fn get_url_filtering_rule_by_name(
        &self,
        name: &str,
    ) -> Result<UrlFilteringRule, Error> {
        let rules = self.list_url_filtering_rules().await?;
        find_by_name(rules, name, |r| r.name.as_str(), "url filtering rule")
    }

    /// `POST /urlFilteringRules`
    pub async fn create_url_filtering_rule(
        &self,
        rule: &UrlFilteringRule,
    ) -> Result<UrlFilteringRule, Error> {
        debug!(name = %rule.name, "creating url filtering rule");
        self.post("urlFilteringRules", rule).await
    }

    /// `PUT /urlFilteringRules/{id}`
    pub async fn update_url_filtering_rule(
        &self,
        id: i64,
        rule: &UrlFilteringRule,
    ) -> Result<UrlFilteringRule, Error> {
        debug!(id, "updating url filtering rule");
        self.put(&format!("urlFilteringRules/{id}"), rule).await
    }

    /// `DELETE /urlFilteringRules/{id}`
    pub async fn delete_url_filtering_rule(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting url filtering rule");
        self.delete(&format!("urlFilteringRules/{id}")).await
    }
}
