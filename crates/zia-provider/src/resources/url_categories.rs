// zia_url_categories

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tracing::info;
use zia_api::models::{UrlCategory, UrlCategoryScope, UrlKeywordCounts};

use crate::activation::trigger_activation;
use crate::convert::{
    expand_id_set_value, expand_string_set, flatten_id_extensions_list_ids, flatten_string_set,
};
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{Resource, read_created, read_or_remove};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, AttributeType, Schema, Validation, id_set_block};

const TYPE_NAME: &str = "zia_url_categories";

const CATEGORY_TYPES: &[&str] = &["URL_CATEGORY", "TLD_CATEGORY", "ALL"];

const SCOPE_TYPES: &[&str] = &["ORGANIZATION", "DEPARTMENT", "LOCATION", "LOCATION_GROUP"];

/// Custom URL category. IDs are strings assigned by ZIA (`CUSTOM_01`),
/// so reads use the ID as-is.
pub struct UrlCategoriesResource;

fn scope_schema() -> Schema {
    Schema::new()
        .attr(
            "scope_group_member_entities",
            id_set_block("Entities that are members of the scope group"),
        )
        .attr(
            "type",
            Attribute::string()
                .optional()
                .computed()
                .validate(Validation::one_of(SCOPE_TYPES)),
        )
        .attr("scope_entities", id_set_block("Entities the scope covers"))
}

fn keyword_counts_schema() -> Schema {
    Schema::new()
        .attr("total_url_count", Attribute::int().computed())
        .attr("retain_parent_url_count", Attribute::int().computed())
        .attr("total_keyword_count", Attribute::int().computed())
        .attr("retain_parent_keyword_count", Attribute::int().computed())
}

fn expand_scopes(d: &ResourceData) -> Vec<UrlCategoryScope> {
    d.get_blocks("scopes")
        .into_iter()
        .map(|block| UrlCategoryScope {
            scope_group_member_entities: block
                .get("scope_group_member_entities")
                .map(expand_id_set_value)
                .unwrap_or_default(),
            scope_type: block
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned(),
            scope_entities: block
                .get("scope_entities")
                .map(expand_id_set_value)
                .unwrap_or_default(),
        })
        .collect()
}

fn flatten_scopes(scopes: &[UrlCategoryScope]) -> Value {
    if scopes.is_empty() {
        return Value::Null;
    }
    Value::Array(
        scopes
            .iter()
            .map(|scope| {
                let mut block = Map::new();
                block.insert(
                    "scope_group_member_entities".into(),
                    flatten_id_extensions_list_ids(&scope.scope_group_member_entities),
                );
                block.insert("type".into(), Value::String(scope.scope_type.clone()));
                block.insert(
                    "scope_entities".into(),
                    flatten_id_extensions_list_ids(&scope.scope_entities),
                );
                block.retain(|_, v| !v.is_null());
                Value::Object(block)
            })
            .collect(),
    )
}

fn flatten_keyword_counts(counts: Option<&UrlKeywordCounts>) -> Value {
    match counts {
        Some(c) => json!([{
            "total_url_count": c.total_url_count,
            "retain_parent_url_count": c.retain_parent_url_count,
            "total_keyword_count": c.total_keyword_count,
            "retain_parent_keyword_count": c.retain_parent_keyword_count,
        }]),
        None => Value::Null,
    }
}

fn expand(d: &ResourceData) -> UrlCategory {
    UrlCategory {
        configured_name: d.get_string("configured_name"),
        keywords: expand_string_set(d, "keywords"),
        keywords_retaining_parent_category: expand_string_set(
            d,
            "keywords_retaining_parent_category",
        ),
        urls: expand_string_set(d, "urls"),
        db_categorized_urls: expand_string_set(d, "db_categorized_urls"),
        custom_category: d.get_bool("custom_category"),
        scopes: expand_scopes(d),
        editable: d.get_bool("editable"),
        description: d.get_string("description"),
        category_type: d.get_string("type"),
        super_category: d.get_string("super_category"),
        ip_ranges: expand_string_set(d, "ip_ranges"),
        ip_ranges_retaining_parent_category: expand_string_set(
            d,
            "ip_ranges_retaining_parent_category",
        ),
        ..UrlCategory::default()
    }
}

fn flatten(d: &mut ResourceData, category: &UrlCategory) -> Result<(), ProviderError> {
    d.set("category_id", category.id.as_str())?;
    d.set("configured_name", category.configured_name.as_str())?;
    d.set("keywords", flatten_string_set(&category.keywords))?;
    d.set(
        "keywords_retaining_parent_category",
        flatten_string_set(&category.keywords_retaining_parent_category),
    )?;
    d.set("urls", flatten_string_set(&category.urls))?;
    d.set(
        "db_categorized_urls",
        flatten_string_set(&category.db_categorized_urls),
    )?;
    d.set("custom_category", category.custom_category)?;
    d.set("scopes", flatten_scopes(&category.scopes))?;
    d.set("editable", category.editable)?;
    d.set("description", category.description.as_str())?;
    d.set("type", category.category_type.as_str())?;
    d.set(
        "url_keyword_counts",
        flatten_keyword_counts(category.url_keyword_counts.as_ref()),
    )?;
    d.set("val", category.val)?;
    d.set("custom_urls_count", category.custom_urls_count)?;
    d.set(
        "urls_retaining_parent_category_count",
        category.urls_retaining_parent_category_count,
    )?;
    d.set("super_category", category.super_category.as_str())?;
    d.set("ip_ranges", flatten_string_set(&category.ip_ranges))?;
    d.set(
        "ip_ranges_retaining_parent_category",
        flatten_string_set(&category.ip_ranges_retaining_parent_category),
    )?;
    d.set("custom_ip_ranges_count", category.custom_ip_ranges_count)?;
    d.set(
        "ip_range_retaining_parent_category_count",
        category.ip_range_retaining_parent_category_count,
    )?;
    Ok(())
}

fn string_set(description: &str) -> Attribute {
    Attribute::set_of(AttributeType::String)
        .optional()
        .description(description)
}

#[async_trait]
impl Resource for UrlCategoriesResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("category_id", Attribute::string().computed())
            .attr(
                "configured_name",
                Attribute::string()
                    .optional()
                    .description("Name of the URL category"),
            )
            .attr("keywords", string_set("Custom keywords matched by the category"))
            .attr(
                "keywords_retaining_parent_category",
                string_set("Keywords that keep their predefined parent category"),
            )
            .attr("urls", string_set("Custom URLs added to the category"))
            .attr(
                "db_categorized_urls",
                string_set("URLs that keep their predefined parent category"),
            )
            .attr("custom_category", Attribute::boolean().optional().default(false))
            .attr(
                "scopes",
                Attribute::list_of_block(scope_schema())
                    .optional()
                    .description("Administrative scopes the category is visible in"),
            )
            .attr("editable", Attribute::boolean().optional().computed())
            .attr(
                "description",
                Attribute::string()
                    .optional()
                    .validate(Validation::StringLenBetween(0, 10240)),
            )
            .attr(
                "type",
                Attribute::string()
                    .optional()
                    .default("URL_CATEGORY")
                    .validate(Validation::one_of(CATEGORY_TYPES)),
            )
            .attr(
                "super_category",
                Attribute::string()
                    .optional()
                    .computed()
                    .description("Predefined super category the category sits under"),
            )
            .attr("ip_ranges", string_set("Custom IP address ranges"))
            .attr(
                "ip_ranges_retaining_parent_category",
                string_set("IP ranges that keep their predefined parent category"),
            )
            .attr(
                "url_keyword_counts",
                Attribute::list_of_block(keyword_counts_schema()).computed(),
            )
            .attr("val", Attribute::int().computed())
            .attr("custom_urls_count", Attribute::int().computed())
            .attr("urls_retaining_parent_category_count", Attribute::int().computed())
            .attr("custom_ip_ranges_count", Attribute::int().computed())
            .attr("ip_range_retaining_parent_category_count", Attribute::int().computed())
    }

    async fn create(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        if d.get_bool("custom_category") && d.get_ok("configured_name").is_none() {
            return Err(ProviderError::invalid(
                "configured_name",
                "required for custom categories",
            ));
        }
        let category = meta.client.create_url_category(&expand(d)).await?;
        info!(resource = TYPE_NAME, id = %category.id, "created");
        d.set_id(category.id.as_str());
        trigger_activation(meta).await?;
        read_created(self, d, meta).await
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d
            .id()
            .ok_or_else(|| ProviderError::MissingAttribute { attribute: "id".into() })?
            .to_owned();
        let result = meta.client.get_url_category(&id).await;
        let Some(category) = read_or_remove(d, TYPE_NAME, result)? else {
            return Ok(());
        };
        d.set_id(category.id.as_str());
        flatten(d, &category)
    }

    async fn update(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d
            .id()
            .ok_or_else(|| ProviderError::MissingAttribute { attribute: "id".into() })?
            .to_owned();
        let mut request = expand(d);
        request.id.clone_from(&id);
        let result = meta.client.update_url_category(&id, &request).await;
        if read_or_remove(d, TYPE_NAME, result)?.is_none() {
            return Ok(());
        }
        info!(resource = TYPE_NAME, id = %id, "updated");
        trigger_activation(meta).await?;
        self.read(d, meta).await
    }

    async fn delete(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d
            .id()
            .ok_or_else(|| ProviderError::MissingAttribute { attribute: "id".into() })?
            .to_owned();
        meta.client.delete_url_category(&id).await?;
        info!(resource = TYPE_NAME, id = %id, "deleted");
        d.clear_id();
        trigger_activation(meta).await
    }

    /// Import accepts a configured name or a category ID.
    async fn lookup_id(&self, name: &str, meta: &Meta) -> Result<String, ProviderError> {
        let category = meta.client.get_url_category_by_name(name).await?;
        Ok(category.id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use zia_api::models::IdNameExtensions;

    use super::*;

    #[test]
    fn scopes_round_trip_with_capitalised_type() {
        let schema = UrlCategoriesResource.schema();
        let config = json!({
            "configured_name": "Partners",
            "custom_category": true,
            "urls": [".partner.example.com"],
            "scopes": [{"type": "LOCATION", "scope_entities": [{"id": [5]}]}]
        });
        let d = ResourceData::from_config(schema.clone(), config.as_object().cloned().unwrap())
            .unwrap();
        let mut category = expand(&d);
        assert_eq!(category.category_type, "URL_CATEGORY");
        assert_eq!(category.scopes[0].scope_entities, vec![IdNameExtensions::from_id(5)]);

        let wire = serde_json::to_value(&category).unwrap();
        assert_eq!(wire["scopes"][0]["Type"], json!("LOCATION"));

        category.id = "CUSTOM_02".into();
        category.url_keyword_counts = Some(UrlKeywordCounts {
            total_url_count: 1,
            ..UrlKeywordCounts::default()
        });
        let mut out = ResourceData::from_state(schema, "CUSTOM_02", Map::new());
        flatten(&mut out, &category).unwrap();
        assert_eq!(out.get_string("category_id"), "CUSTOM_02");
        assert_eq!(
            out.get("scopes"),
            Some(&json!([{"type": "LOCATION", "scope_entities": [{"id": [5]}]}]))
        );
        assert_eq!(out.get_int("url_keyword_counts.0.total_url_count"), 1);
    }

    #[test]
    fn rejects_unknown_type() {
        let config = json!({"configured_name": "x", "type": "DOMAIN"});
        assert!(
            ResourceData::from_config(
                UrlCategoriesResource.schema(),
                config.as_object().cloned().unwrap()
            )
            .is_err()
        );
    }
}
