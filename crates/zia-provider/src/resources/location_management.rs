// zia_location_management

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tracing::info;
use zia_api::models::{Location, VpnCredential};

use crate::activation::trigger_activation;
use crate::convert::{expand_i32_set, expand_string_set, flatten_i32_set, flatten_string_set};
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{Resource, read_created, read_or_remove};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, AttributeType, Schema, Validation};

const TYPE_NAME: &str = "zia_location_management";

const TIME_UNITS: &[&str] = &["MINUTE", "HOUR", "DAY"];
const PROFILES: &[&str] = &["NONE", "CORPORATE", "SERVER", "GUESTWIFI", "IOT"];
const CREDENTIAL_TYPES: &[&str] = &["CN", "IP", "UFQDN", "XAUTH"];

/// Location: a site (or sub-location) whose traffic is forwarded to ZIA.
pub struct LocationManagementResource;

fn expand_vpn_credentials(blocks: &[&Map<String, Value>]) -> Vec<VpnCredential> {
    blocks
        .iter()
        .filter_map(|block| {
            let id = block.get("id").and_then(Value::as_i64).unwrap_or_default();
            let text = |key: &str| {
                block
                    .get(key)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned()
            };
            (id != 0).then(|| VpnCredential {
                id,
                credential_type: text("type"),
                fqdn: text("fqdn"),
                ip_address: text("ip_address"),
                ..VpnCredential::default()
            })
        })
        .collect()
}

fn flatten_vpn_credentials(credentials: &[VpnCredential]) -> Value {
    if credentials.is_empty() {
        return Value::Null;
    }
    Value::Array(
        credentials
            .iter()
            .map(|c| {
                let mut block = json!({ "id": c.id, "type": c.credential_type });
                if !c.fqdn.is_empty() {
                    block["fqdn"] = json!(c.fqdn);
                }
                if !c.ip_address.is_empty() {
                    block["ip_address"] = json!(c.ip_address);
                }
                block
            })
            .collect(),
    )
}

fn expand(d: &ResourceData) -> Result<Location, ProviderError> {
    Ok(Location {
        name: d.get_string("name"),
        parent_id: d.get_int("parent_id"),
        up_bandwidth: d.get_int("up_bandwidth"),
        dn_bandwidth: d.get_int("dn_bandwidth"),
        country: d.get_string("country"),
        tz: d.get_string("tz"),
        ip_addresses: expand_string_set(d, "ip_addresses"),
        ports: expand_i32_set(d, "ports"),
        vpn_credentials: expand_vpn_credentials(&d.get_blocks("vpn_credentials")),
        auth_required: d.get_bool("auth_required"),
        ssl_scan_enabled: d.get_bool("ssl_scan_enabled"),
        zapp_ssl_scan_enabled: d.get_bool("zapp_ssl_scan_enabled"),
        xff_forward_enabled: d.get_bool("xff_forward_enabled"),
        surrogate_ip: d.get_bool("surrogate_ip"),
        idle_time_in_minutes: d.get_i32("idle_time_in_minutes")?,
        display_time_unit: d.get_string("display_time_unit"),
        surrogate_ip_enforced_for_known_browsers: d
            .get_bool("surrogate_ip_enforced_for_known_browsers"),
        surrogate_refresh_time_in_minutes: d.get_i32("surrogate_refresh_time_in_minutes")?,
        surrogate_refresh_time_unit: d.get_string("surrogate_refresh_time_unit"),
        ofw_enabled: d.get_bool("ofw_enabled"),
        ips_control: d.get_bool("ips_control"),
        aup_enabled: d.get_bool("aup_enabled"),
        caution_enabled: d.get_bool("caution_enabled"),
        aup_block_internet_until_accepted: d.get_bool("aup_block_internet_until_accepted"),
        aup_force_ssl_inspection: d.get_bool("aup_force_ssl_inspection"),
        aup_timeout_in_days: d.get_i32("aup_timeout_in_days")?,
        profile: d.get_string("profile"),
        description: d.get_string("description"),
        ..Location::default()
    })
}

fn flatten(d: &mut ResourceData, location: &Location) -> Result<(), ProviderError> {
    d.set("location_id", location.id)?;
    d.set("name", location.name.as_str())?;
    d.set("parent_id", location.parent_id)?;
    d.set("up_bandwidth", location.up_bandwidth)?;
    d.set("dn_bandwidth", location.dn_bandwidth)?;
    d.set("country", location.country.as_str())?;
    d.set("tz", location.tz.as_str())?;
    d.set("ip_addresses", flatten_string_set(&location.ip_addresses))?;
    d.set("ports", flatten_i32_set(&location.ports))?;
    d.set("vpn_credentials", flatten_vpn_credentials(&location.vpn_credentials))?;
    d.set("auth_required", location.auth_required)?;
    d.set("ssl_scan_enabled", location.ssl_scan_enabled)?;
    d.set("zapp_ssl_scan_enabled", location.zapp_ssl_scan_enabled)?;
    d.set("xff_forward_enabled", location.xff_forward_enabled)?;
    d.set("surrogate_ip", location.surrogate_ip)?;
    d.set("idle_time_in_minutes", location.idle_time_in_minutes)?;
    d.set("display_time_unit", location.display_time_unit.as_str())?;
    d.set(
        "surrogate_ip_enforced_for_known_browsers",
        location.surrogate_ip_enforced_for_known_browsers,
    )?;
    d.set(
        "surrogate_refresh_time_in_minutes",
        location.surrogate_refresh_time_in_minutes,
    )?;
    d.set(
        "surrogate_refresh_time_unit",
        location.surrogate_refresh_time_unit.as_str(),
    )?;
    d.set("ofw_enabled", location.ofw_enabled)?;
    d.set("ips_control", location.ips_control)?;
    d.set("aup_enabled", location.aup_enabled)?;
    d.set("caution_enabled", location.caution_enabled)?;
    d.set(
        "aup_block_internet_until_accepted",
        location.aup_block_internet_until_accepted,
    )?;
    d.set("aup_force_ssl_inspection", location.aup_force_ssl_inspection)?;
    d.set("aup_timeout_in_days", location.aup_timeout_in_days)?;
    d.set("profile", location.profile.as_str())?;
    d.set("description", location.description.as_str())?;
    Ok(())
}

/// Surrogate IP requires authentication, and browser enforcement requires
/// surrogate IP.
fn check_surrogate(d: &ResourceData) -> Result<(), ProviderError> {
    if d.get_bool("surrogate_ip") && !d.get_bool("auth_required") {
        return Err(ProviderError::invalid(
            "surrogate_ip",
            "requires auth_required to be true",
        ));
    }
    if d.get_bool("surrogate_ip_enforced_for_known_browsers") && !d.get_bool("surrogate_ip") {
        return Err(ProviderError::invalid(
            "surrogate_ip_enforced_for_known_browsers",
            "requires surrogate_ip to be true",
        ));
    }
    Ok(())
}

#[async_trait]
impl Resource for LocationManagementResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        let vpn_credential = Schema::new()
            .attr("id", Attribute::int().required())
            .attr(
                "type",
                Attribute::string()
                    .optional()
                    .computed()
                    .validate(Validation::one_of(CREDENTIAL_TYPES)),
            )
            .attr("fqdn", Attribute::string().optional().computed())
            .attr("ip_address", Attribute::string().optional().computed());

        Schema::new()
            .attr("location_id", Attribute::int().computed())
            .attr(
                "name",
                Attribute::string()
                    .required()
                    .validate(Validation::StringLenBetween(1, 255)),
            )
            .attr(
                "parent_id",
                Attribute::int()
                    .optional()
                    .computed()
                    .description("Parent location ID; set for sub-locations"),
            )
            .attr(
                "up_bandwidth",
                Attribute::int()
                    .optional()
                    .computed()
                    .validate(Validation::IntBetween(0, 99_999_999))
                    .description("Upload bandwidth in kbps; 0 means no limit"),
            )
            .attr(
                "dn_bandwidth",
                Attribute::int()
                    .optional()
                    .computed()
                    .validate(Validation::IntBetween(0, 99_999_999)),
            )
            .attr("country", Attribute::string().optional().computed())
            .attr("tz", Attribute::string().optional().computed())
            .attr(
                "ip_addresses",
                Attribute::set_of(AttributeType::String)
                    .optional()
                    .validate(Validation::IsCidrOrIp),
            )
            .attr("ports", Attribute::set_of(AttributeType::Int).optional())
            .attr(
                "vpn_credentials",
                Attribute::list_of_block(vpn_credential).optional().computed(),
            )
            .attr("auth_required", Attribute::boolean().optional().computed())
            .attr("ssl_scan_enabled", Attribute::boolean().optional().computed())
            .attr("zapp_ssl_scan_enabled", Attribute::boolean().optional().computed())
            .attr("xff_forward_enabled", Attribute::boolean().optional().computed())
            .attr("surrogate_ip", Attribute::boolean().optional().computed())
            .attr(
                "idle_time_in_minutes",
                Attribute::int()
                    .optional()
                    .computed()
                    .validate(Validation::IntBetween(0, 43200)),
            )
            .attr(
                "display_time_unit",
                Attribute::string()
                    .optional()
                    .computed()
                    .validate(Validation::one_of(TIME_UNITS)),
            )
            .attr(
                "surrogate_ip_enforced_for_known_browsers",
                Attribute::boolean().optional().computed(),
            )
            .attr(
                "surrogate_refresh_time_in_minutes",
                Attribute::int()
                    .optional()
                    .computed()
                    .validate(Validation::IntBetween(0, 43200)),
            )
            .attr(
                "surrogate_refresh_time_unit",
                Attribute::string()
                    .optional()
                    .computed()
                    .validate(Validation::one_of(TIME_UNITS)),
            )
            .attr("ofw_enabled", Attribute::boolean().optional().computed())
            .attr("ips_control", Attribute::boolean().optional().computed())
            .attr("aup_enabled", Attribute::boolean().optional().computed())
            .attr("caution_enabled", Attribute::boolean().optional().computed())
            .attr(
                "aup_block_internet_until_accepted",
                Attribute::boolean().optional().computed(),
            )
            .attr("aup_force_ssl_inspection", Attribute::boolean().optional().computed())
            .attr(
                "aup_timeout_in_days",
                Attribute::int()
                    .optional()
                    .computed()
                    .validate(Validation::IntBetween(0, 180)),
            )
            .attr(
                "profile",
                Attribute::string()
                    .optional()
                    .computed()
                    .validate(Validation::one_of(PROFILES)),
            )
            .attr(
                "description",
                Attribute::string()
                    .optional()
                    .validate(Validation::StringLenBetween(0, 1024)),
            )
    }

    async fn create(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        check_surrogate(d)?;
        let location = meta.client.create_location(&expand(d)?).await?;
        info!(resource = TYPE_NAME, id = location.id, "created");
        d.set_id(location.id.to_string());
        trigger_activation(meta).await?;
        read_created(self, d, meta).await
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        let result = meta.client.get_location(id).await;
        let Some(location) = read_or_remove(d, TYPE_NAME, result)? else {
            return Ok(());
        };
        d.set_id(location.id.to_string());
        flatten(d, &location)
    }

    async fn update(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        check_surrogate(d)?;
        let id = d.numeric_id()?;
        let result = meta.client.update_location(id, &expand(d)?).await;
        if read_or_remove(d, TYPE_NAME, result)?.is_none() {
            return Ok(());
        }
        info!(resource = TYPE_NAME, id, "updated");
        trigger_activation(meta).await?;
        self.read(d, meta).await
    }

    async fn delete(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        meta.client.delete_location(id).await?;
        info!(resource = TYPE_NAME, id, "deleted");
        d.clear_id();
        trigger_activation(meta).await
    }

    async fn lookup_id(&self, name: &str, meta: &Meta) -> Result<String, ProviderError> {
        let location = meta.client.get_location_by_name(name).await?;
        Ok(location.id.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn data(config: Value) -> ResourceData {
        ResourceData::from_config(
            LocationManagementResource.schema(),
            config.as_object().cloned().unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn surrogate_ip_requires_auth() {
        let d = data(json!({"name": "hq", "surrogate_ip": true}));
        assert!(check_surrogate(&d).is_err());
        let d = data(json!({"name": "hq", "surrogate_ip": true, "auth_required": true}));
        assert!(check_surrogate(&d).is_ok());
    }

    #[test]
    fn vpn_credential_blocks_expand_by_id() {
        let d = data(json!({
            "name": "branch",
            "vpn_credentials": [
                {"id": 301, "type": "UFQDN", "fqdn": "branch@example.com"},
                {"id": 0}
            ]
        }));
        let location = expand(&d).unwrap();
        assert_eq!(location.vpn_credentials.len(), 1);
        assert_eq!(location.vpn_credentials[0].fqdn, "branch@example.com");

        let flat = flatten_vpn_credentials(&location.vpn_credentials);
        assert_eq!(
            flat,
            json!([{"id": 301, "type": "UFQDN", "fqdn": "branch@example.com"}])
        );
    }
}
