// zia_traffic_forwarding_vpn_credentials

use async_trait::async_trait;
use tracing::info;
use zia_api::models::VpnCredential;

use crate::activation::trigger_activation;
use crate::convert::{expand_id_name_extensions_single, flatten_id_extensions_single};
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{Resource, read_created, read_or_remove};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema, Validation, id_block};

const TYPE_NAME: &str = "zia_traffic_forwarding_vpn_credentials";

const CREDENTIAL_TYPES: &[&str] = &["CN", "IP", "UFQDN", "XAUTH"];

/// VPN credential used by IPSec tunnels: identified by FQDN (UFQDN) or
/// by a static IP (IP).
pub struct VpnCredentialsResource;

fn expand(d: &ResourceData, include_psk: bool) -> VpnCredential {
    VpnCredential {
        credential_type: d.get_string("type"),
        fqdn: d.get_string("fqdn"),
        ip_address: d.get_string("ip_address"),
        pre_shared_key: include_psk
            .then(|| d.get_string("pre_shared_key"))
            .filter(|k| !k.is_empty()),
        comments: d.get_string("comments"),
        location: expand_id_name_extensions_single(d, "location"),
        managed_by: expand_id_name_extensions_single(d, "managed_by"),
        ..VpnCredential::default()
    }
}

// The pre-shared key is never echoed back and stays as configured.
fn flatten(d: &mut ResourceData, credential: &VpnCredential) -> Result<(), ProviderError> {
    d.set("vpn_credental_id", credential.id)?;
    d.set("type", credential.credential_type.as_str())?;
    d.set("fqdn", credential.fqdn.as_str())?;
    d.set("ip_address", credential.ip_address.as_str())?;
    d.set("comments", credential.comments.as_str())?;
    d.set("location", flatten_id_extensions_single(credential.location.as_ref()))?;
    d.set("managed_by", flatten_id_extensions_single(credential.managed_by.as_ref()))?;
    Ok(())
}

/// Each credential type needs its identity attribute.
fn check_identity(d: &ResourceData) -> Result<(), ProviderError> {
    match d.get_str("type") {
        Some("UFQDN") if d.get_ok("fqdn").is_none() => Err(ProviderError::invalid(
            "fqdn",
            "required when type is UFQDN",
        )),
        Some("IP") if d.get_ok("ip_address").is_none() => Err(ProviderError::invalid(
            "ip_address",
            "required when type is IP",
        )),
        Some("UFQDN" | "XAUTH") if d.get_ok("pre_shared_key").is_none() && d.id().is_none() => {
            Err(ProviderError::invalid(
                "pre_shared_key",
                "required when creating UFQDN and XAUTH credentials",
            ))
        }
        _ => Ok(()),
    }
}

#[async_trait]
impl Resource for VpnCredentialsResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("vpn_credental_id", Attribute::int().computed())
            .attr(
                "type",
                Attribute::string()
                    .required()
                    .force_new()
                    .validate(Validation::one_of(CREDENTIAL_TYPES)),
            )
            .attr(
                "fqdn",
                Attribute::string()
                    .optional()
                    .computed()
                    .description("Fully qualified domain name; required for UFQDN credentials"),
            )
            .attr(
                "ip_address",
                Attribute::string()
                    .optional()
                    .computed()
                    .validate(Validation::IsIpAddress)
                    .description("Static IP address; required for IP credentials"),
            )
            .attr(
                "pre_shared_key",
                Attribute::string()
                    .optional()
                    .sensitive()
                    .validate(Validation::StringLenBetween(8, 128)),
            )
            .attr(
                "comments",
                Attribute::string()
                    .optional()
                    .validate(Validation::StringLenBetween(0, 10240)),
            )
            .attr("location", id_block("Location the credential is linked to").computed())
            .attr("managed_by", id_block("Partner managing the credential").computed())
    }

    async fn create(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        check_identity(d)?;
        let credential = meta.client.create_vpn_credential(&expand(d, true)).await?;
        info!(resource = TYPE_NAME, id = credential.id, "created");
        d.set_id(credential.id.to_string());
        trigger_activation(meta).await?;
        read_created(self, d, meta).await
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        let result = meta.client.get_vpn_credential(id).await;
        let Some(credential) = read_or_remove(d, TYPE_NAME, result)? else {
            return Ok(());
        };
        d.set_id(credential.id.to_string());
        flatten(d, &credential)
    }

    async fn update(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        check_identity(d)?;
        let id = d.numeric_id()?;
        let request = expand(d, d.has_change("pre_shared_key"));
        let result = meta.client.update_vpn_credential(id, &request).await;
        if read_or_remove(d, TYPE_NAME, result)?.is_none() {
            return Ok(());
        }
        info!(resource = TYPE_NAME, id, "updated");
        trigger_activation(meta).await?;
        self.read(d, meta).await
    }

    async fn delete(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        meta.client.delete_vpn_credential(id).await?;
        info!(resource = TYPE_NAME, id, "deleted");
        d.clear_id();
        trigger_activation(meta).await
    }

    /// Import accepts an FQDN or an IP address.
    async fn lookup_id(&self, name: &str, meta: &Meta) -> Result<String, ProviderError> {
        let credential = if name.parse::<std::net::IpAddr>().is_ok() {
            meta.client.get_vpn_credential_by_ip(name).await?
        } else {
            meta.client.get_vpn_credential_by_fqdn(name).await?
        };
        Ok(credential.id.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn data(config: Value) -> ResourceData {
        ResourceData::from_config(
            VpnCredentialsResource.schema(),
            config.as_object().cloned().unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn ufqdn_needs_fqdn_and_key() {
        assert!(check_identity(&data(json!({"type": "UFQDN"}))).is_err());
        assert!(
            check_identity(&data(json!({"type": "UFQDN", "fqdn": "a@example.com"}))).is_err()
        );
        assert!(
            check_identity(&data(json!({
                "type": "UFQDN",
                "fqdn": "a@example.com",
                "pre_shared_key": "supersecret"
            })))
            .is_ok()
        );
    }

    #[test]
    fn ip_needs_address() {
        assert!(check_identity(&data(json!({"type": "IP"}))).is_err());
        assert!(check_identity(&data(json!({"type": "IP", "ip_address": "203.0.113.7"}))).is_ok());
    }

    #[test]
    fn unchanged_key_is_not_resent() {
        let d = data(json!({"type": "UFQDN", "fqdn": "a@example.com", "pre_shared_key": "supersecret"}));
        assert!(expand(&d, false).pre_shared_key.is_none());
        assert_eq!(expand(&d, true).pre_shared_key.as_deref(), Some("supersecret"));
    }
}
